use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::outcome::Outcome;

type ReportFn = Box<dyn FnOnce(Outcome) + Send + Sync>;

/// The resources held by the request that is currently in flight: its
/// cancellation token and the timer armed on it.
///
/// The outcome is reported exactly once. [`InFlight::settle`] reports the
/// given outcome; dropping the guard without settling (a panicking or
/// aborted request task) reports [`Outcome::Lost`]. Either way the timer
/// is disarmed first.
pub(crate) struct InFlight {
    token: CancellationToken,
    timer: JoinHandle<()>,
    timed_out: Arc<AtomicBool>,
    report: Option<ReportFn>,
}

impl InFlight {
    /// Arms a timer that cancels the request after `budget`.
    ///
    /// The token is a child of `parent`, so cancelling `parent` aborts
    /// the request as well, without it counting as a timeout.
    pub(crate) fn arm(
        parent: &CancellationToken,
        budget: Duration,
        report: impl FnOnce(Outcome) + Send + Sync + 'static,
    ) -> Self {
        let token = parent.child_token();
        let timed_out = Arc::new(AtomicBool::new(false));
        let timer = tokio::spawn({
            let token = token.clone();
            let timed_out = Arc::clone(&timed_out);
            async move {
                sleep(budget).await;
                debug!("request exceeded {budget:?}, cancelling");
                // Must be visible before anyone observes the cancellation.
                timed_out.store(true, Ordering::Release);
                token.cancel();
            }
        });
        Self {
            token,
            timer,
            timed_out,
            report: Some(Box::new(report)),
        }
    }

    #[inline]
    pub(crate) fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Returns the outcome of a cancelled request, telling a timeout
    /// apart from any other cause.
    #[inline]
    pub(crate) fn cancellation_outcome(&self) -> Outcome {
        if self.timed_out.load(Ordering::Acquire) {
            Outcome::TimedOut
        } else {
            Outcome::Aborted
        }
    }

    /// Releases the guard and reports the outcome.
    #[inline]
    pub(crate) fn settle(mut self, outcome: Outcome) {
        self.release(outcome);
    }

    fn release(&mut self, outcome: Outcome) {
        self.timer.abort();
        if let Some(report) = self.report.take() {
            report(outcome);
        }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if self.report.is_some() {
            error!("request ended without an outcome");
        }
        self.release(Outcome::Lost);
    }
}
