use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use little_chat_model::{
    ChatProvider, ChatProviderError, ChatReply, ChatRequest, ErrorKind,
};
use tokio::time::sleep;

#[derive(Debug)]
struct FakeChatProviderError {
    kind: ErrorKind,
    detail: Option<String>,
}

impl Display for FakeChatProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl Error for FakeChatProviderError {}

impl ChatProviderError for FakeChatProviderError {
    fn kind(&self) -> ErrorKind {
        self.kind
    }

    fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

/// Echoes the prompt back, refusing empty prompts and rate limiting
/// anything that mentions "spam".
struct FakeChatProvider;

impl ChatProvider for FakeChatProvider {
    type Error = FakeChatProviderError;

    fn send_request(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, Self::Error>> + Send + 'static
    {
        let prompt = req.prompt.clone();
        async move {
            sleep(Duration::from_millis(1)).await;
            if prompt.is_empty() {
                return Err(FakeChatProviderError {
                    kind: ErrorKind::RequestFailed,
                    detail: None,
                });
            }
            if prompt.contains("spam") {
                return Err(FakeChatProviderError {
                    kind: ErrorKind::RateLimited,
                    detail: Some("slow down".to_owned()),
                });
            }
            Ok(ChatReply::new(format!("You said {prompt}")))
        }
    }
}

mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completion() {
        let provider = FakeChatProvider;
        let reply = provider
            .send_request(&ChatRequest::new("Good morning"))
            .await
            .unwrap();
        assert_eq!(reply.response, "You said Good morning");
    }

    #[tokio::test]
    async fn test_error() {
        let provider = FakeChatProvider;
        let err = provider
            .send_request(&ChatRequest::new(""))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestFailed);
        assert_eq!(err.detail(), None);
        assert_eq!(err.to_string(), "Request failed");

        let err = provider
            .send_request(&ChatRequest::new("spam spam"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RateLimited);
        assert_eq!(err.detail(), Some("slow down"));
    }
}
