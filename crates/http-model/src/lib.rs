//! A chat provider for HTTP endpoints that accept `POST <base>/chat`.

#[macro_use]
extern crate tracing;

mod config;
mod proto;
mod response;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use little_chat_model::{
    ChatProvider, ChatProviderError, ChatReply, ChatRequest, ErrorKind,
};
use reqwest::{Client, StatusCode, header};

pub use config::{ConfigError, HttpChatConfig, HttpChatConfigBuilder};
pub use response::classify_response;

/// Error type for [`HttpChatProvider`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
    detail: Option<String>,
    status: Option<StatusCode>,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
            detail: None,
            status: None,
        }
    }

    #[inline]
    fn with_detail(mut self, detail: String) -> Self {
        self.detail = Some(detail);
        self
    }

    #[inline]
    fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the status code of the response, if one was received.
    #[inline]
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
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

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let mut desc = err.to_string();
        // The top-level message is usually generic ("error sending
        // request"), the cause chain names what actually went wrong.
        let mut source = err.source();
        while let Some(cause) = source {
            desc.push_str(": ");
            desc.push_str(&cause.to_string());
            source = cause.source();
        }
        Self {
            message: desc,
            kind: ErrorKind::Network,
            detail: None,
            status: err.status(),
        }
    }
}

/// HTTP chat provider.
#[derive(Clone, Debug)]
pub struct HttpChatProvider {
    client: Client,
    config: Arc<HttpChatConfig>,
}

impl HttpChatProvider {
    /// Creates a new `HttpChatProvider` with the given configuration.
    #[inline]
    pub fn new(config: HttpChatConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Creates a new `HttpChatProvider` that sends requests with an
    /// existing client.
    #[inline]
    pub fn with_client(client: Client, config: HttpChatConfig) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }
}

impl ChatProvider for HttpChatProvider {
    type Error = Error;

    fn send_request(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, Self::Error>> + Send + 'static
    {
        let payload = proto::create_payload(req);
        let mut builder = self
            .client
            .post(self.config.endpoint.clone())
            .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
            .header(header::ACCEPT, mime::APPLICATION_JSON.as_ref())
            .json(&payload);
        if let Some(user_agent) = &self.config.user_agent {
            builder = builder.header(header::USER_AGENT, user_agent);
        }
        let resp_fut = builder.send();

        async move {
            let resp = resp_fut.await?;
            let status = resp.status();
            let body = resp.text().await?;
            debug!("got a response: {status}, {} bytes", body.len());

            let result = classify_response(status, &body);
            if let Err(err) = &result {
                warn!("request failed ({}): {err}", err.kind());
            }
            result
        }
    }
}
