use std::error::Error;

use crate::error::ErrorKind;
use crate::request::ChatRequest;
use crate::response::ChatReply;

/// The error type for a chat provider.
///
/// The [`Display`](std::fmt::Display) output should be the best
/// diagnostic text available for the failure: the raw response body, the
/// status phrase, or the transport error description. Callers surface it
/// to the user as is.
pub trait ChatProviderError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;

    /// Returns the human readable detail supplied by the endpoint, if
    /// the endpoint sent a structured one.
    fn detail(&self) -> Option<&str> {
        None
    }
}

/// A type that represents a chat endpoint.
///
/// Once the provider is created, it should behave like a stateless object.
/// It can still have internal state, but callers should not rely on it,
/// and the provider should be prepared for being dropped anytime.
///
/// Dropping the returned future must abort the request, that's how the
/// callers cancel it.
pub trait ChatProvider: Send + Sync {
    /// The error type that may be returned by the provider.
    type Error: ChatProviderError;

    /// Sends a request to the endpoint.
    fn send_request(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, Self::Error>> + Send + 'static;
}
