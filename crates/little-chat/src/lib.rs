//! An out-of-the-box chat client that talks to an HTTP chat endpoint.
//!
//! The crate includes a CLI tool for using in the terminal. And you can also
//! use it as a library to bring the chat into your own host apps.

#![deny(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

pub mod input;
mod session;
pub mod settings;
pub mod transcript;

pub use session::{Session, SessionBuilder};
pub use settings::{Settings, SettingsError};

/// Re-exports of [`little_chat_core`] crate.
pub mod core {
    pub use little_chat_core::*;
}
