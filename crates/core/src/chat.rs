mod builder;
mod in_flight;
mod runner;
mod state;

use std::error::Error;
use std::fmt;

use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;

use crate::conversation::Conversation;
use crate::outcome::Outcome;
pub use builder::{ChatBuilder, ChatOptions};
use state::ChatState;

/// A handle to a running chat controller.
///
/// The controller owns the conversation and the pending input, and allows
/// at most one request in flight. Every method only enqueues a command
/// for the controller, so none of them block; commands are handled in the
/// order they are sent.
///
/// The controller stops when [`Chat::shutdown`] is called or when the last
/// handle is dropped. A request still in flight at that point is
/// cancelled.
#[derive(Clone)]
pub struct Chat {
    cmd_tx: mpsc::UnboundedSender<Command>,
    shutdown: CancellationToken,
}

impl Chat {
    /// Submits a user input.
    ///
    /// The input is trimmed. If nothing is left, or a request is already
    /// in flight, the call is silently ignored. Otherwise the input is
    /// appended as a user message, the pending input is cleared and a
    /// request is sent. Its outcome is appended as exactly one assistant
    /// message.
    pub fn submit<S: Into<String>>(&self, raw_text: S) {
        self.send(Command::Submit(raw_text.into()));
    }

    /// Replaces the pending input.
    pub fn set_draft<S: Into<String>>(&self, draft: S) {
        self.send(Command::SetDraft(draft.into()));
    }

    /// Submits the pending input, with the same rules as [`Chat::submit`].
    pub fn submit_draft(&self) {
        self.send(Command::SubmitDraft);
    }

    /// Returns a copy of the current state for rendering.
    pub async fn snapshot(&self) -> Result<ChatSnapshot, ChatClosedError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Snapshot(tx))
            .map_err(|_| ChatClosedError)?;
        rx.await.map_err(|_| ChatClosedError)
    }

    /// Stops the controller, cancelling the request in flight if any.
    ///
    /// Commands that have not been handled yet are discarded.
    #[inline]
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    #[inline]
    fn send(&self, cmd: Command) {
        if self.cmd_tx.send(cmd).is_err() {
            warn!("chat has been closed, discard the command");
        }
    }
}

impl fmt::Debug for Chat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chat")
            .field("closed", &self.cmd_tx.is_closed())
            .finish_non_exhaustive()
    }
}

/// A read-only copy of the chat state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatSnapshot {
    /// All messages so far.
    pub conversation: Conversation,
    /// Whether a request is in flight.
    pub in_flight: bool,
    /// The pending input.
    pub draft: String,
}

/// The error returned when the chat controller has stopped.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ChatClosedError;

impl fmt::Debug for ChatClosedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatClosedError").finish()
    }
}

impl fmt::Display for ChatClosedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "the chat has been closed".fmt(f)
    }
}

impl Error for ChatClosedError {}

#[derive(Debug)]
enum Command {
    Submit(String),
    SetDraft(String),
    SubmitDraft,
    Snapshot(oneshot::Sender<ChatSnapshot>),
    RequestFinished { id: u64, outcome: Outcome },
}
