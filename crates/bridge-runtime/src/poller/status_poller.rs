//! Periodic presence polling
//!
//! Owns at most one running timer task. Starting while a task is running replaces it, so
//! the tracked handle always belongs to the most recent start. Each tick dispatches its
//! check as a separate task: stopping cancels future ticks, never a check already sent.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, trace};

use super::check::PresenceCheck;

pub struct StatusPoller {
    check: Arc<PresenceCheck>,
    period: Duration,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl StatusPoller {
    pub fn new(check: PresenceCheck, period: Duration) -> Self {
        Self {
            check: Arc::new(check),
            period,
            task: Mutex::new(None),
        }
    }

    /// Start polling. The first check runs one full period after the call.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self) {
        let mut task = self.task.lock();
        if let Some(previous) = task.take() {
            previous.abort();
            debug!(subject = %self.check.subject(), "Replaced running status poller");
        }

        let check = Arc::clone(&self.check);
        let period = self.period;
        *task = Some(tokio::spawn(poll_loop(check, period)));

        debug!(
            subject = %self.check.subject(),
            interval_ms = period.as_millis(),
            "Status poller started"
        );
    }

    /// Stop polling. Calling it while stopped does nothing.
    pub fn stop(&self) {
        if let Some(task) = self.task.lock().take() {
            task.abort();
            debug!(subject = %self.check.subject(), "Status poller stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().take() {
            task.abort();
        }
    }
}

async fn poll_loop(check: Arc<PresenceCheck>, period: Duration) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let check = Arc::clone(&check);
        tokio::spawn(async move {
            match check.run().await {
                Ok(outcome) => trace!(subject = %check.subject(), ?outcome, "Presence check done"),
                Err(e) => error!(subject = %check.subject(), error = %e, "Presence check failed"),
            }
        });
    }
}
