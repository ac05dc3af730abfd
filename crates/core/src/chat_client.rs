use std::pin::Pin;
use std::sync::Arc;

use little_chat_model::{
    ChatProvider, ChatProviderError, ChatReply, ChatRequest,
};
use tracing::Instrument;

pub(crate) type SendRequestResult =
    Result<ChatReply, Box<dyn ChatProviderError>>;
type BoxedSendRequestFuture =
    Pin<Box<dyn Future<Output = SendRequestResult> + Send>>;
type HandlerFn = Arc<dyn Fn(ChatRequest) -> BoxedSendRequestFuture + Send + Sync>;

/// A wrapper around a chat provider that provides a type-erased
/// interface for the other modules.
#[derive(Clone)]
pub struct ChatClient {
    handler_fn: HandlerFn,
}

impl ChatClient {
    #[inline]
    pub fn new<P: ChatProvider + 'static>(provider: P) -> Self {
        // We have to erase the type `P`, since `ChatClient` doesn't have a
        // generic parameter and we don't want it either.
        let handler_fn: HandlerFn = Arc::new(move |req| {
            let fut = provider.send_request(&req);
            Box::pin(
                async move {
                    trace!("got a request: {:?}", req);
                    match fut.await {
                        Ok(reply) => {
                            trace!("finished a request");
                            Ok(reply)
                        }
                        Err(err) => {
                            debug!("got an error: {err:?}");
                            Err(Box::new(err) as Box<dyn ChatProviderError>)
                        }
                    }
                }
                .instrument(trace_span!("chat client req")),
            )
        });
        Self { handler_fn }
    }

    /// Sends a request and returns the reply.
    ///
    /// The provider is called right away, only awaiting the result is
    /// deferred.
    ///
    /// # Cancel safety
    ///
    /// The returned future is cancel safe. Dropping it aborts the request.
    #[inline]
    pub fn send_request(
        &self,
        req: ChatRequest,
    ) -> impl Future<Output = SendRequestResult> + Send + 'static {
        (self.handler_fn)(req)
    }
}

#[cfg(test)]
mod tests {
    use little_chat_model::ErrorKind;
    use little_chat_test_model::{PresetResponse, TestChatProvider};

    use super::*;

    #[tokio::test]
    async fn test_send_request() {
        let mut provider = TestChatProvider::default();
        provider.add_response(PresetResponse::reply("How are you?"));

        let chat_client = ChatClient::new(provider.clone());
        let fut = chat_client.send_request(ChatRequest::new("Hi"));
        // The provider has been reached before the future is polled.
        assert_eq!(provider.request_count(), 1);

        let reply = fut.await.unwrap();
        assert_eq!(reply.response, "How are you?");
    }

    #[tokio::test]
    async fn test_error_handling() {
        let mut provider = TestChatProvider::default();
        provider.add_response(PresetResponse::rate_limited(
            "",
            Some("slow down"),
        ));
        let chat_client = ChatClient::new(provider);

        let err = chat_client
            .send_request(ChatRequest::new("Hi"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RateLimited);
        assert_eq!(err.detail(), Some("slow down"));

        // The script is exhausted.
        let err = chat_client
            .send_request(ChatRequest::new("Hi"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }
}
