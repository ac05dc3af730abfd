//! Core logic of the chat: the conversation store and the controller that
//! drives one request at a time through its lifecycle.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

mod chat;
mod chat_client;
pub mod conversation;
pub mod outcome;

pub use chat::{Chat, ChatBuilder, ChatClosedError, ChatOptions, ChatSnapshot};
pub use little_chat_model::Role;
