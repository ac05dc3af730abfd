//! A local fake chat endpoint for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};
use std::future::pending;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use little_chat_model::{
    ChatProvider, ChatProviderError, ChatReply, ChatRequest, ErrorKind,
};
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
    detail: Option<String>,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl ChatProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

#[derive(Default)]
struct Shared {
    script: VecDeque<PresetResponse>,
    received: Vec<ChatRequest>,
}

/// A local fake chat endpoint for testing purpose.
///
/// Before sending requests, you need to setup the script, which is how the
/// endpoint should answer each request in turn. If the script runs out, an
/// error of [`ErrorKind::Network`] is returned.
///
/// Clones share the script and the record of received requests, so a test
/// can hand one clone to the code under test and inspect the other.
#[derive(Clone, Default)]
pub struct TestChatProvider {
    shared: Arc<Mutex<Shared>>,
    delay: Option<Duration>,
}

impl TestChatProvider {
    #[inline]
    pub fn add_response(&mut self, preset: PresetResponse) {
        self.lock().script.push_back(preset);
    }

    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns the requests received so far.
    #[inline]
    pub fn received_requests(&self) -> Vec<ChatRequest> {
        self.lock().received.clone()
    }

    /// Returns the number of requests received so far.
    #[inline]
    pub fn request_count(&self) -> usize {
        self.lock().received.len()
    }

    #[inline]
    fn lock(&self) -> std::sync::MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ChatProvider for TestChatProvider {
    type Error = crate::Error;

    fn send_request(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, Self::Error>> + Send + 'static
    {
        let preset = {
            let mut shared = self.lock();
            shared.received.push(req.clone());
            shared.script.pop_front()
        };
        let default_delay = self.delay.unwrap_or(Duration::from_millis(1));

        async move {
            let Some(preset) = preset else {
                return Err(Error {
                    message: "script exhausted".to_owned(),
                    kind: ErrorKind::Network,
                    detail: None,
                });
            };

            sleep(preset.delay.unwrap_or(default_delay)).await;
            match preset.outcome {
                PresetOutcome::Reply(text) => Ok(ChatReply::new(text)),
                PresetOutcome::Failure {
                    kind,
                    message,
                    detail,
                } => Err(Error {
                    message,
                    kind: kind.into(),
                    detail,
                }),
                PresetOutcome::Hang => pending().await,
            }
        }
    }
}
