//! Feeding typed lines into a session.

use tokio::io::{self, AsyncBufRead, AsyncBufReadExt};

use crate::Session;

/// Reads lines from `reader` until end of input and sends each one to the
/// session.
///
/// `prompt` is called before every read. After a line has been sent,
/// `wait_reply` is awaited before the next read; returning `false` from it
/// stops the loop. Blank lines are skipped without waiting.
///
/// All lines come from the same buffered reader, so several lines that
/// arrive in one chunk (piped or pasted input) are all delivered.
pub async fn run_input_loop<R>(
    reader: R,
    session: &Session,
    mut prompt: impl FnMut(),
    mut wait_reply: impl AsyncFnMut() -> bool,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        prompt();
        let Some(line) = lines.next_line().await? else {
            return Ok(());
        };
        if !session.send_message(&line) {
            trace!("skipped a blank line");
            continue;
        }
        if !wait_reply().await {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use little_chat_core::Role;
    use little_chat_test_model::{PresetResponse, TestChatProvider};
    use tokio::sync::watch;

    use super::*;
    use crate::SessionBuilder;

    #[tokio::test]
    async fn test_every_line_is_submitted() {
        let mut provider = TestChatProvider::default();
        provider.add_response(PresetResponse::reply("Hi there"));
        provider.add_response(PresetResponse::reply("See you"));

        let (idle_tx, mut idle_rx) = watch::channel(0);
        let session = SessionBuilder::with_provider(provider.clone())
            .on_idle(move || {
                idle_tx.send_modify(|count| *count += 1);
            })
            .build();

        let mut prompts = 0;
        let mut replies = 0;
        run_input_loop(
            &b"Hello\n\n   \nBye\n"[..],
            &session,
            || prompts += 1,
            async || {
                replies += 1;
                idle_rx.wait_for(|c| *c >= replies).await.is_ok()
            },
        )
        .await
        .unwrap();

        let prompts_sent: Vec<_> = provider
            .received_requests()
            .into_iter()
            .map(|r| r.prompt)
            .collect();
        assert_eq!(prompts_sent, ["Hello", "Bye"]);
        // One prompt per line plus the one that hits end of input.
        assert_eq!(prompts, 5);

        let snapshot = session.snapshot().await.unwrap();
        let transcript: Vec<_> = snapshot
            .conversation
            .iter()
            .map(|msg| (msg.role(), msg.text().to_owned()))
            .collect();
        assert_eq!(
            transcript,
            [
                (Role::User, "Hello".to_owned()),
                (Role::Assistant, "Hi there".to_owned()),
                (Role::User, "Bye".to_owned()),
                (Role::Assistant, "See you".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn test_stop_after_reply() {
        let mut provider = TestChatProvider::default();
        provider.add_response(PresetResponse::reply("Hi there"));

        let session = SessionBuilder::with_provider(provider.clone()).build();
        run_input_loop(
            &b"Hello\nBye\n"[..],
            &session,
            || {},
            async || false,
        )
        .await
        .unwrap();

        assert_eq!(provider.request_count(), 1);
    }
}
