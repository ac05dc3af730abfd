use little_chat_model::{ChatRequest, Role};
use tokio::select;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use super::builder::ChatOptions;
use super::in_flight::InFlight;
use super::{ChatSnapshot, Command};
use crate::chat_client::ChatClient;
use crate::conversation::{Conversation, Message};
use crate::outcome::Outcome;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum ChatStage {
    #[default]
    Idle,
    InFlight {
        id: u64,
    },
}

/// Everything the controller owns. Only the runner task touches it.
pub(super) struct ChatState {
    chat_client: ChatClient,
    options: ChatOptions,
    conversation: Conversation,
    draft: String,
    stage: ChatStage,
    next_request_id: u64,
    mailbox: mpsc::WeakUnboundedSender<Command>,
    lifetime: CancellationToken,

    on_message: Option<Box<dyn Fn(&Message) + Send + Sync>>,
    on_idle: Option<Box<dyn Fn() + Send + Sync>>,
}

impl ChatState {
    pub(super) fn new(
        chat_client: ChatClient,
        options: ChatOptions,
        mailbox: mpsc::WeakUnboundedSender<Command>,
        lifetime: CancellationToken,
        on_message: Option<Box<dyn Fn(&Message) + Send + Sync>>,
        on_idle: Option<Box<dyn Fn() + Send + Sync>>,
    ) -> Self {
        Self {
            chat_client,
            options,
            conversation: Default::default(),
            draft: Default::default(),
            stage: Default::default(),
            next_request_id: 1,
            mailbox,
            lifetime,
            on_message,
            on_idle,
        }
    }

    pub(super) fn handle(&mut self, cmd: Command) {
        match cmd {
            Command::Submit(raw_text) => self.submit(&raw_text),
            Command::SetDraft(draft) => self.draft = draft,
            Command::SubmitDraft => {
                let draft = self.draft.clone();
                self.submit(&draft);
            }
            Command::Snapshot(tx) => {
                tx.send(self.snapshot()).ok();
            }
            Command::RequestFinished { id, outcome } => {
                self.finish_request(id, outcome);
            }
        }
    }

    fn submit(&mut self, raw_text: &str) {
        let text = raw_text.trim();
        if text.is_empty() {
            trace!("ignored an empty input");
            return;
        }
        if let ChatStage::InFlight { id } = self.stage {
            debug!("request {id} is still in flight, dropped the input");
            return;
        }

        let text = text.to_owned();
        self.append(Role::User, text.clone());
        self.draft.clear();

        let id = self.next_request_id;
        self.next_request_id += 1;
        self.stage = ChatStage::InFlight { id };

        let mailbox = self.mailbox.clone();
        let in_flight =
            InFlight::arm(&self.lifetime, self.options.timeout, move |outcome| {
                let Some(mailbox) = mailbox.upgrade() else {
                    debug!("chat has been closed, discard the outcome");
                    return;
                };
                mailbox
                    .send(Command::RequestFinished { id, outcome })
                    .ok();
            });

        let resp_fut = self.chat_client.send_request(ChatRequest::new(text));
        tokio::spawn(
            async move {
                let outcome = select! {
                    biased;

                    result = resp_fut => Outcome::from(result),
                    _ = in_flight.token().cancelled() => {
                        in_flight.cancellation_outcome()
                    }
                };
                in_flight.settle(outcome);
            }
            .instrument(debug_span!("chat request", id)),
        );
    }

    fn finish_request(&mut self, id: u64, outcome: Outcome) {
        if self.stage != (ChatStage::InFlight { id }) {
            warn!("discarded the outcome of unknown request {id}");
            return;
        }

        match &outcome {
            Outcome::Replied(_) => debug!("request {id} succeeded"),
            Outcome::Failed { kind, message, .. } => {
                warn!("request {id} failed ({kind}): {message}");
            }
            Outcome::TimedOut => {
                warn!("request {id} timed out after {:?}", self.options.timeout);
            }
            Outcome::Aborted => warn!("request {id} was cancelled"),
            Outcome::Lost => error!("request {id} was lost"),
        }

        self.append(Role::Assistant, outcome.assistant_text());
        self.stage = ChatStage::Idle;
        if let Some(on_idle) = &self.on_idle {
            on_idle();
        }
    }

    fn append(&mut self, role: Role, text: String) {
        let msg = self.conversation.append(role, text);
        if let Some(on_message) = &self.on_message {
            on_message(msg);
        }
    }

    fn snapshot(&self) -> ChatSnapshot {
        ChatSnapshot {
            conversation: self.conversation.clone(),
            in_flight: self.stage != ChatStage::Idle,
            draft: self.draft.clone(),
        }
    }
}
