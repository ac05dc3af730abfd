use std::fmt::{self, Display};

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The endpoint rejected the request for exceeding its rate limit
    /// (HTTP 429).
    RateLimited,
    /// The endpoint answered with any other non-success status.
    RequestFailed,
    /// The request never produced a usable answer: the connection
    /// failed, the body was malformed, or the request was aborted.
    Network,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::RateLimited => write!(f, "Rate limited"),
            ErrorKind::RequestFailed => write!(f, "Request failed"),
            ErrorKind::Network => write!(f, "Network error"),
        }
    }
}
