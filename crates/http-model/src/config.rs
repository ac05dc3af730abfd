use std::error::Error as StdError;
use std::fmt::{self, Debug, Display};

use reqwest::Url;

const CHAT_PATH: &str = "/chat";

/// Error returned when the configuration cannot be built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigError {
    message: String,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for ConfigError {}

/// Builder for [`HttpChatConfig`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct HttpChatConfigBuilder {
    base_url: String,
    user_agent: Option<String>,
}

impl HttpChatConfigBuilder {
    /// Creates a builder with the base address of the chat endpoint.
    ///
    /// Requests are posted to `<base_url>/chat`.
    #[inline]
    pub fn with_base_url<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
            user_agent: None,
        }
    }

    /// Sets a custom `User-Agent` header.
    #[inline]
    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Builds the configuration.
    ///
    /// Fails if the base address is empty or is not an absolute URL.
    pub fn build(self) -> Result<HttpChatConfig, ConfigError> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError {
                message: "base URL of the chat endpoint is empty".to_owned(),
            });
        }

        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), CHAT_PATH);
        let endpoint = Url::parse(&endpoint).map_err(|err| ConfigError {
            message: format!("invalid base URL {base_url:?}: {err}"),
        })?;

        Ok(HttpChatConfig {
            endpoint,
            user_agent: self.user_agent,
        })
    }
}

impl Debug for HttpChatConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpChatConfigBuilder")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Configuration for the HTTP chat provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpChatConfig {
    pub(crate) endpoint: Url,
    pub(crate) user_agent: Option<String>,
}

impl HttpChatConfig {
    /// Returns the full address requests are posted to.
    #[inline]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        let config = HttpChatConfigBuilder::with_base_url("http://localhost:8000")
            .build()
            .unwrap();
        assert_eq!(config.endpoint().as_str(), "http://localhost:8000/chat");

        let config =
            HttpChatConfigBuilder::with_base_url("https://example.com/api/")
                .build()
                .unwrap();
        assert_eq!(config.endpoint().as_str(), "https://example.com/api/chat");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(HttpChatConfigBuilder::with_base_url("").build().is_err());
        assert!(HttpChatConfigBuilder::with_base_url("   ").build().is_err());
        assert!(
            HttpChatConfigBuilder::with_base_url("not a url")
                .build()
                .is_err()
        );
    }
}
