use std::time::Duration;

use little_chat_model::ErrorKind;
use serde::{Deserialize, Serialize};

/// How the provider answers one request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetOutcome {
    /// A successful reply with the given text.
    #[serde(rename = "reply")]
    Reply(String),
    /// A failure of the given kind, with its message and optional
    /// server-supplied detail.
    #[serde(rename = "failure")]
    Failure {
        kind: PresetErrorKind,
        message: String,
        detail: Option<String>,
    },
    /// The request never settles. Only a cancellation ends it.
    #[serde(rename = "hang")]
    Hang,
}

/// Serializable mirror of [`ErrorKind`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PresetErrorKind {
    RateLimited,
    RequestFailed,
    Network,
}

impl From<PresetErrorKind> for ErrorKind {
    #[inline]
    fn from(kind: PresetErrorKind) -> Self {
        match kind {
            PresetErrorKind::RateLimited => ErrorKind::RateLimited,
            PresetErrorKind::RequestFailed => ErrorKind::RequestFailed,
            PresetErrorKind::Network => ErrorKind::Network,
        }
    }
}

/// The preset answer for one request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PresetResponse {
    /// What the request resolves to.
    pub outcome: PresetOutcome,
    /// Simulated latency before the outcome is delivered. Falls back to
    /// the provider-wide delay when unset.
    pub delay: Option<Duration>,
}

impl PresetResponse {
    /// Creates a successful response.
    #[inline]
    pub fn reply<S: Into<String>>(text: S) -> Self {
        Self::with_outcome(PresetOutcome::Reply(text.into()))
    }

    /// Creates a rate limited response.
    #[inline]
    pub fn rate_limited<S: Into<String>>(
        message: S,
        detail: Option<&str>,
    ) -> Self {
        Self::with_outcome(PresetOutcome::Failure {
            kind: PresetErrorKind::RateLimited,
            message: message.into(),
            detail: detail.map(ToOwned::to_owned),
        })
    }

    /// Creates a response that failed with a non-success status.
    #[inline]
    pub fn request_failed<S: Into<String>>(message: S) -> Self {
        Self::with_outcome(PresetOutcome::Failure {
            kind: PresetErrorKind::RequestFailed,
            message: message.into(),
            detail: None,
        })
    }

    /// Creates a transport-level failure.
    #[inline]
    pub fn network_error<S: Into<String>>(message: S) -> Self {
        Self::with_outcome(PresetOutcome::Failure {
            kind: PresetErrorKind::Network,
            message: message.into(),
            detail: None,
        })
    }

    /// Creates a response that never settles.
    #[inline]
    pub fn hang() -> Self {
        Self::with_outcome(PresetOutcome::Hang)
    }

    #[inline]
    fn with_outcome(outcome: PresetOutcome) -> Self {
        Self {
            outcome,
            delay: None,
        }
    }

    /// Sets the latency of this response.
    #[inline]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}
