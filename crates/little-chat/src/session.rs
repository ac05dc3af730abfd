use little_chat_core::conversation::Message;
use little_chat_core::{
    Chat, ChatBuilder, ChatClosedError, ChatOptions, ChatSnapshot,
};
use little_chat_http_model::HttpChatProvider;
use little_chat_model::ChatProvider;

use crate::settings::Settings;

/// A session builder.
///
/// See [`Session`].
pub struct SessionBuilder {
    chat_builder: ChatBuilder,
}

impl SessionBuilder {
    /// Creates a session builder that talks to the configured HTTP
    /// endpoint.
    pub fn with_settings(settings: Settings) -> Self {
        let Settings { http, options } = settings;
        debug!("chat endpoint: {}", http.endpoint());
        Self::with_provider(HttpChatProvider::new(http)).with_options(options)
    }

    /// Creates a session builder with a specified chat provider.
    pub fn with_provider<P: ChatProvider + 'static>(provider: P) -> Self {
        let chat_builder = ChatBuilder::with_provider(provider);
        Self { chat_builder }
    }

    /// Sets the request lifecycle options.
    #[inline]
    pub fn with_options(mut self, options: ChatOptions) -> Self {
        self.chat_builder = self.chat_builder.with_options(options);
        self
    }

    /// Attaches a callback to be invoked after each message is appended.
    #[inline]
    pub fn on_message(
        mut self,
        on_message: impl Fn(&Message) + Send + Sync + 'static,
    ) -> Self {
        self.chat_builder = self.chat_builder.on_message(on_message);
        self
    }

    /// Attaches a callback to be invoked when the session is idle again.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.chat_builder = self.chat_builder.on_idle(on_idle);
        self
    }

    /// Builds a new session.
    pub fn build(self) -> Session {
        Session {
            chat: self.chat_builder.build(),
        }
    }
}

/// A chat session, like a window that displays messages and has a input
/// box.
///
/// It is basically a wrapper around [`Chat`].
pub struct Session {
    chat: Chat,
}

impl Session {
    /// Sends a message to the session.
    ///
    /// Returns `false` if the message is blank and nothing was sent. A
    /// non-blank message is still dropped if a request is in flight.
    #[inline]
    pub fn send_message(&self, message: &str) -> bool {
        if message.trim().is_empty() {
            return false;
        }
        self.chat.submit(message);
        true
    }

    /// Returns a copy of the current state.
    #[inline]
    pub async fn snapshot(&self) -> Result<ChatSnapshot, ChatClosedError> {
        self.chat.snapshot().await
    }

    /// Returns the underlying chat.
    #[inline]
    pub fn chat(&self) -> &Chat {
        &self.chat
    }
}
