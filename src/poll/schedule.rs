use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Owned repeating timer.
///
/// The first tick fires one full `period` after arming. Dropping the schedule
/// cancels it; no tick is delivered after `cancel` or drop returns to the
/// runtime.
#[derive(Debug)]
pub struct PollSchedule {
    period: Duration,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl PollSchedule {
    /// Arm a timer calling `on_tick` every `period`.
    ///
    /// Returns `None` for a zero `period`, which has no repeating schedule.
    /// Must be called inside a Tokio runtime.
    pub fn arm<F>(period: Duration, on_tick: F) -> Option<Self>
    where
        F: Fn() + Send + 'static,
    {
        if period.is_zero() {
            return None;
        }

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let first = Instant::now() + period;

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(first, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    () = token.cancelled() => {
                        break;
                    }
                    _ = ticker.tick() => {
                        on_tick();
                    }
                }
            }
        });

        debug!("⏱️ Schedule armed every {}ms", period.as_millis());
        Some(Self {
            period,
            cancel,
            task,
        })
    }

    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.cancel.is_cancelled() && !self.task.is_finished()
    }

    /// Cancel the timer, consuming the handle
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for PollSchedule {
    fn drop(&mut self) {
        self.cancel.cancel();
        self.task.abort();
        debug!("⏱️ Schedule cancelled ({}ms)", self.period.as_millis());
    }
}
