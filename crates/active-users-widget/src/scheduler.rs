//! Recurring poll timer.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, warn};

/// Owns at most one recurring timer.
///
/// The timer runs as a background task that calls `on_tick` every
/// interval; the first tick comes one full interval after [`start`].
///
/// [`start`]: PollScheduler::start
#[derive(Debug, Default)]
pub struct PollScheduler {
    timer: Option<JoinHandle<()>>,
}

impl PollScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer. Callers stop the previous timer first; a timer that
    /// is still armed here is cancelled so two never run at once.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<F>(&mut self, interval: Duration, on_tick: F)
    where
        F: Fn() + Send + 'static,
    {
        if self.timer.is_some() {
            warn!("poll timer re-armed without stop; cancelling previous timer");
            self.stop();
        }
        if interval.is_zero() {
            debug!("zero poll interval, timer not armed");
            return;
        }

        let first_tick = Instant::now() + interval;
        let timer = tokio::spawn(async move {
            let mut ticker = interval_at(first_tick, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                on_tick();
            }
        });
        debug!(interval_ms = interval.as_millis() as u64, "poll timer armed");
        self.timer = Some(timer);
    }

    /// Cancel the armed timer, if any.
    pub fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
            debug!("poll timer stopped");
        }
    }

    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }
}

impl Drop for PollScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
