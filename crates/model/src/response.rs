use serde::{Deserialize, Serialize};

/// A successful answer from the chat provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatReply {
    /// The assistant text, appended to the conversation verbatim.
    pub response: String,
}

impl ChatReply {
    /// Creates a reply with the given text.
    #[inline]
    pub fn new<S: Into<String>>(response: S) -> Self {
        Self {
            response: response.into(),
        }
    }
}
