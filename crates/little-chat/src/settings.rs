//! Settings read from the environment at startup.

use std::env;
use std::error::Error;
use std::fmt::{self, Display};

use little_chat_core::ChatOptions;
use little_chat_http_model::{HttpChatConfig, HttpChatConfigBuilder};

/// Base address of the chat endpoint. Required.
pub const BASE_URL_VAR: &str = "LITTLE_CHAT_BASE_URL";

/// Request timeout in milliseconds. Optional.
pub const TIMEOUT_MS_VAR: &str = "LITTLE_CHAT_TIMEOUT_MS";

/// Error returned when the settings are missing or invalid.
///
/// Any of these is fatal, there is no fallback endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingsError {
    message: String,
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for SettingsError {}

/// Everything needed to start a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Where requests are sent.
    pub http: HttpChatConfig,
    /// Request lifecycle options.
    pub options: ChatOptions,
}

impl Settings {
    /// Reads the settings from the process environment.
    #[inline]
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the settings through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SettingsError> {
        let Some(base_url) = lookup(BASE_URL_VAR) else {
            return Err(SettingsError {
                message: format!("{BASE_URL_VAR} environment variable is not set"),
            });
        };
        let http = HttpChatConfigBuilder::with_base_url(base_url)
            .with_user_agent(concat!("little-chat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| SettingsError {
                message: format!("{BASE_URL_VAR}: {err}"),
            })?;

        let options = match lookup(TIMEOUT_MS_VAR) {
            None => ChatOptions::default(),
            Some(value) => match value.trim().parse::<u64>() {
                Ok(timeout_ms) if timeout_ms > 0 => {
                    ChatOptions::with_timeout_ms(timeout_ms)
                }
                _ => {
                    return Err(SettingsError {
                        message: format!(
                            "{TIMEOUT_MS_VAR} must be a positive number of milliseconds, got {value:?}"
                        ),
                    });
                }
            },
        };

        Ok(Self { http, options })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::*;

    fn lookup_in(
        vars: &[(&str, &str)],
    ) -> impl Fn(&str) -> Option<String> + use<> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings =
            Settings::from_lookup(lookup_in(&[(BASE_URL_VAR, "http://localhost:8000")]))
                .unwrap();
        assert_eq!(settings.http.endpoint().as_str(), "http://localhost:8000/chat");
        assert_eq!(settings.options.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_timeout() {
        let settings = Settings::from_lookup(lookup_in(&[
            (BASE_URL_VAR, "http://localhost:8000"),
            (TIMEOUT_MS_VAR, "1500"),
        ]))
        .unwrap();
        assert_eq!(settings.options.timeout, Duration::from_millis(1500));

        for bad in ["", "soon", "-1", "0"] {
            let err = Settings::from_lookup(lookup_in(&[
                (BASE_URL_VAR, "http://localhost:8000"),
                (TIMEOUT_MS_VAR, bad),
            ]))
            .unwrap_err();
            assert!(err.to_string().contains(TIMEOUT_MS_VAR));
        }
    }

    #[test]
    fn test_missing_base_url_is_fatal() {
        let err = Settings::from_lookup(lookup_in(&[])).unwrap_err();
        assert!(err.to_string().contains(BASE_URL_VAR));

        let err = Settings::from_lookup(lookup_in(&[(BASE_URL_VAR, "nope")]))
            .unwrap_err();
        assert!(err.to_string().contains(BASE_URL_VAR));
    }
}
