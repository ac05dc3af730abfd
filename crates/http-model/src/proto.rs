use little_chat_model::{ChatReply, ChatRequest};
use serde::{Deserialize, Serialize};

// ------------------------------
// Types received from the server
// ------------------------------

/// Body of a successful answer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct ChatResponseBody {
    pub response: String,
}

/// Body of a rate limited answer, when the server sends a structured one.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct RateLimitBody {
    pub detail: Option<String>,
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ChatPayload<'a> {
    prompt: &'a str,
}

// -----------
// Conversions
// -----------

#[inline]
pub fn create_payload(req: &ChatRequest) -> ChatPayload<'_> {
    ChatPayload {
        prompt: &req.prompt,
    }
}

impl From<ChatResponseBody> for ChatReply {
    #[inline]
    fn from(body: ChatResponseBody) -> Self {
        ChatReply::new(body.response)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_create_payload() {
        let request = ChatRequest::new("What is Rust?");
        let payload = create_payload(&request);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "prompt": "What is Rust?" })
        );
    }

    #[test]
    fn test_parse_bodies() {
        let body: ChatResponseBody =
            serde_json::from_str(r#"{"response":"Hi there","extra":1}"#)
                .unwrap();
        assert_eq!(ChatReply::from(body), ChatReply::new("Hi there"));

        let body: RateLimitBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.detail, None);

        assert!(
            serde_json::from_str::<RateLimitBody>(r#"{"detail":42}"#).is_err()
        );
    }
}
