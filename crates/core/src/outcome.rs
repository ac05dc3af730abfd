//! How a settled request is turned into the assistant message.

use little_chat_model::{ChatProviderError, ErrorKind};

use crate::chat_client::SendRequestResult;

/// Prefix of a rate limit message that carries the server's detail.
pub const RATE_LIMIT_PREFIX: &str = "Rate limit reached!";

/// Shown when the endpoint rate limits without saying anything useful.
pub const RATE_LIMIT_NOTICE: &str =
    "Rate limit reached! Please wait a moment and try again.";

/// Prefix of a message for any other non-success status.
pub const ERROR_PREFIX: &str = "Error:";

/// Prefix of a message for transport-level failures.
pub const NETWORK_ERROR_PREFIX: &str = "Network error:";

/// Shown when the request exceeded its time budget.
pub const TIMEOUT_NOTICE: &str = "Request timed out. Please try again.";

/// The way a request ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    Replied(String),
    Failed {
        kind: ErrorKind,
        message: String,
        detail: Option<String>,
    },
    /// Cancelled by the timer.
    TimedOut,
    /// Cancelled by anything but the timer.
    Aborted,
    /// The request task went away without reporting.
    Lost,
}

impl Outcome {
    /// Returns the text of the assistant message for this outcome.
    ///
    /// The result only depends on the outcome itself.
    pub(crate) fn assistant_text(&self) -> String {
        match self {
            Outcome::Replied(text) => text.clone(),
            Outcome::Failed {
                kind: ErrorKind::RateLimited,
                message,
                detail,
            } => match detail.as_deref().filter(|d| !d.is_empty()) {
                Some(detail) => format!("{RATE_LIMIT_PREFIX} {detail}"),
                None if !message.is_empty() => message.clone(),
                None => RATE_LIMIT_NOTICE.to_owned(),
            },
            Outcome::Failed {
                kind: kind @ ErrorKind::RequestFailed,
                message,
                ..
            } => {
                if message.is_empty() {
                    format!("{ERROR_PREFIX} {kind}")
                } else {
                    format!("{ERROR_PREFIX} {message}")
                }
            }
            Outcome::Failed {
                kind: ErrorKind::Network,
                message,
                ..
            } => format!("{NETWORK_ERROR_PREFIX} {message}"),
            Outcome::TimedOut => TIMEOUT_NOTICE.to_owned(),
            Outcome::Aborted => {
                format!("{NETWORK_ERROR_PREFIX} the request was cancelled")
            }
            Outcome::Lost => {
                format!("{NETWORK_ERROR_PREFIX} the request ended unexpectedly")
            }
        }
    }
}

impl From<SendRequestResult> for Outcome {
    fn from(result: SendRequestResult) -> Self {
        match result {
            Ok(reply) => Outcome::Replied(reply.response),
            Err(err) => Outcome::Failed {
                kind: err.kind(),
                message: err.to_string(),
                detail: err.detail().map(ToOwned::to_owned),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(kind: ErrorKind, message: &str, detail: Option<&str>) -> Outcome {
        Outcome::Failed {
            kind,
            message: message.to_owned(),
            detail: detail.map(ToOwned::to_owned),
        }
    }

    #[test]
    fn test_reply_is_verbatim() {
        let outcome = Outcome::Replied("  Hi there\n".to_owned());
        assert_eq!(outcome.assistant_text(), "  Hi there\n");
    }

    #[test]
    fn test_rate_limited() {
        let outcome =
            failed(ErrorKind::RateLimited, "slow down", Some("slow down"));
        assert_eq!(outcome.assistant_text(), "Rate limit reached! slow down");

        let outcome = failed(ErrorKind::RateLimited, "too many", None);
        assert_eq!(outcome.assistant_text(), "too many");

        let outcome = failed(ErrorKind::RateLimited, "", None);
        assert_eq!(outcome.assistant_text(), RATE_LIMIT_NOTICE);

        let outcome = failed(ErrorKind::RateLimited, "", Some(""));
        assert_eq!(outcome.assistant_text(), RATE_LIMIT_NOTICE);
    }

    #[test]
    fn test_request_failed() {
        let outcome =
            failed(ErrorKind::RequestFailed, "Internal Server Error", None);
        assert_eq!(outcome.assistant_text(), "Error: Internal Server Error");

        let outcome = failed(ErrorKind::RequestFailed, "", None);
        assert_eq!(outcome.assistant_text(), "Error: Request failed");
    }

    #[test]
    fn test_network_and_cancellation() {
        let outcome = failed(ErrorKind::Network, "connection reset", None);
        assert_eq!(outcome.assistant_text(), "Network error: connection reset");

        assert_eq!(Outcome::TimedOut.assistant_text(), TIMEOUT_NOTICE);
        assert!(
            Outcome::Aborted
                .assistant_text()
                .starts_with(NETWORK_ERROR_PREFIX)
        );
        assert!(Outcome::Lost.assistant_text().starts_with(NETWORK_ERROR_PREFIX));
    }
}
