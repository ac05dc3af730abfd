use little_chat_model::{ChatReply, ErrorKind};
use reqwest::StatusCode;

use crate::Error;
use crate::proto::{ChatResponseBody, RateLimitBody};

/// Maps a received status and body to a reply or a classified error.
///
/// The first matching rule wins:
///
/// - `429` is [`ErrorKind::RateLimited`], carrying the `detail` field of
///   a JSON body when there is one, and the raw body otherwise.
/// - Any other non-2xx is [`ErrorKind::RequestFailed`], carrying the raw
///   body, or the canonical status phrase when the body is empty.
/// - A 2xx body must be a JSON object with a string `response` field,
///   anything else is a malformed response ([`ErrorKind::Network`]).
///
/// The result only depends on the arguments.
pub fn classify_response(
    status: StatusCode,
    body: &str,
) -> Result<ChatReply, Error> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        let detail = serde_json::from_str::<RateLimitBody>(body)
            .ok()
            .and_then(|b| b.detail)
            .filter(|d| !d.is_empty());
        return Err(match detail {
            Some(detail) => Error::new(detail.clone(), ErrorKind::RateLimited)
                .with_detail(detail),
            None => Error::new(body, ErrorKind::RateLimited),
        }
        .with_status(status));
    }

    if !status.is_success() {
        let message = if body.is_empty() {
            status_phrase(status)
        } else {
            body.to_owned()
        };
        return Err(
            Error::new(message, ErrorKind::RequestFailed).with_status(status)
        );
    }

    match serde_json::from_str::<ChatResponseBody>(body) {
        Ok(body) => Ok(body.into()),
        Err(err) => Err(Error::new(
            format!("malformed response: {err}"),
            ErrorKind::Network,
        )
        .with_status(status)),
    }
}

#[inline]
fn status_phrase(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => reason.to_owned(),
        None => status.as_str().to_owned(),
    }
}
