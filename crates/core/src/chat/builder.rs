use std::time::Duration;

use little_chat_model::ChatProvider;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use super::runner::run_chat;
use super::{Chat, ChatState};
use crate::chat_client::ChatClient;
use crate::conversation::Message;

/// Options of the request lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatOptions {
    /// How long a request may stay in flight before it is cancelled.
    pub timeout: Duration,
}

impl ChatOptions {
    /// The timeout used when none is configured.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Creates options with a timeout given in milliseconds.
    #[inline]
    pub fn with_timeout_ms(timeout_ms: u64) -> Self {
        Self {
            timeout: Duration::from_millis(timeout_ms),
        }
    }
}

impl Default for ChatOptions {
    #[inline]
    fn default() -> Self {
        Self {
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}

/// [`Chat`] builder.
pub struct ChatBuilder {
    pub(crate) chat_client: ChatClient,
    pub(crate) options: ChatOptions,
    pub(crate) on_message: Option<Box<dyn Fn(&Message) + Send + Sync>>,
    pub(crate) on_idle: Option<Box<dyn Fn() + Send + Sync>>,
}

impl ChatBuilder {
    /// Creates a new builder with the specified chat provider.
    #[inline]
    pub fn with_provider<P: ChatProvider + 'static>(provider: P) -> Self {
        Self {
            chat_client: ChatClient::new(provider),
            options: ChatOptions::default(),
            on_message: None,
            on_idle: None,
        }
    }

    /// Replaces all options.
    #[inline]
    pub fn with_options(mut self, options: ChatOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets how long a request may stay in flight.
    #[inline]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Attaches a callback to be invoked after each message is appended.
    #[inline]
    pub fn on_message(
        mut self,
        on_message: impl Fn(&Message) + Send + Sync + 'static,
    ) -> Self {
        self.on_message = Some(Box::new(on_message));
        self
    }

    /// Attaches a callback to be invoked whenever a request has settled
    /// and the chat is idle again.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.on_idle = Some(Box::new(on_idle));
        self
    }

    /// Builds the chat and starts its controller.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn build(self) -> Chat {
        let ChatBuilder {
            chat_client,
            options,
            on_message,
            on_idle,
        } = self;

        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();
        let state = ChatState::new(
            chat_client,
            options,
            cmd_tx.downgrade(),
            shutdown.clone(),
            on_message,
            on_idle,
        );
        tokio::spawn(
            run_chat(state, cmd_rx, shutdown.clone())
                .instrument(trace_span!("chat")),
        );
        Chat { cmd_tx, shutdown }
    }
}
