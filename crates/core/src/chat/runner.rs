use tokio::select;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::{ChatState, Command};

/// Handles commands one at a time until shutdown or until every [`Chat`]
/// handle is gone.
///
/// [`Chat`]: super::Chat
pub(super) async fn run_chat(
    mut state: ChatState,
    mut cmd_rx: mpsc::UnboundedReceiver<Command>,
    shutdown: CancellationToken,
) {
    debug!("started");
    loop {
        let cmd = select! {
            biased;

            _ = shutdown.cancelled() => {
                break;
            }
            cmd = cmd_rx.recv() => {
                // Requests only hold weak senders, so this ends once the
                // last handle is dropped.
                let Some(cmd) = cmd else {
                    break;
                };
                cmd
            }
        };
        trace!("received command: {cmd:?}");

        let proc_span = trace_span!("proc cmd");
        proc_span.in_scope(|| {
            state.handle(cmd);
            trace!("finished");
        });
    }
    // Aborts the request in flight, if any.
    shutdown.cancel();
    debug!("will terminate");
}
