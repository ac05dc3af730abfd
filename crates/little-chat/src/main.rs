//! A terminal chat client built on `little-chat` as a library.

#[macro_use]
extern crate tracing;

use std::io::{IsTerminal as _, Write as _};
use std::process::ExitCode;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use little_chat::core::Role;
use little_chat::core::conversation::Message;
use little_chat::input::run_input_loop;
use little_chat::{SessionBuilder, Settings, transcript};
use tokio::io;
use tokio::select;
use tokio::sync::mpsc;
use tokio::time::sleep;

enum SessionEvent {
    Idle,
    Message(Message),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let session = SessionBuilder::with_settings(settings)
        .on_idle({
            let event_tx = event_tx.clone();
            move || {
                event_tx.send(SessionEvent::Idle).ok();
            }
        })
        .on_message({
            let event_tx = event_tx.clone();
            move |msg| {
                event_tx.send(SessionEvent::Message(msg.clone())).ok();
            }
        })
        .build();

    let colored = std::io::stdout().is_terminal();
    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");

    let stdin = io::BufReader::new(io::stdin());
    let result = run_input_loop(
        stdin,
        &session,
        || {
            print!("> ");
            std::io::stdout().flush().ok();
        },
        async || wait_reply(&mut event_rx, &progress_style, colored).await,
    )
    .await;
    if let Err(err) = result {
        error!("error reading input: {}", err);
    }

    ExitCode::SUCCESS
}

/// Shows a spinner and prints the reply until the session is idle again.
///
/// Returns `false` if the session has gone away.
async fn wait_reply(
    event_rx: &mut mpsc::UnboundedReceiver<SessionEvent>,
    progress_style: &ProgressStyle,
    colored: bool,
) -> bool {
    let mut progress_bar = None;

    loop {
        // Create a new progress bar if it has been finished.
        progress_bar
            .get_or_insert_with(|| {
                let progress_bar = ProgressBar::new_spinner();
                progress_bar.set_style(progress_style.clone());
                progress_bar.set_message("🤔 Waiting for reply...");
                progress_bar
            })
            .inc(1);

        let sleep = sleep(Duration::from_millis(100));
        let event = select! {
            event = event_rx.recv() => {
                let Some(event) = event else {
                    return false;
                };
                event
            },
            _ = sleep => {
                continue;
            }
        };

        // Finish the progress bar before printing anything else.
        if let Some(progress_bar) = &progress_bar {
            progress_bar.finish_and_clear();
        }
        progress_bar = None;

        match event {
            SessionEvent::Message(msg) => {
                // The user already sees what they typed.
                if msg.role() == Role::Assistant {
                    println!("{}", transcript::render(&msg, colored));
                }
            }
            SessionEvent::Idle => {
                return true;
            }
        }
    }
}
