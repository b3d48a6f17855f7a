//! Polling controller: one fetcher, one result state, at most one timer.
//!
//! State machine: `Idle -> Loading -> {Success, Error} -> Loading -> ...`.
//! There is no terminal state; the owner decides when polling stops.

use super::fetch_state::FetchState;
use super::fetcher::Fetcher;
use super::lifecycle::Lifecycle;
use super::schedule::PollSchedule;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// How a controller treats a `load()` issued while another is still in flight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverlapPolicy {
    /// Every load runs; whichever resolves last overwrites the state
    #[default]
    Race,
    /// Every load runs; a completion older than the last applied one is dropped
    LatestIssued,
    /// A load issued while another is in flight returns without fetching
    Coalesce,
}

struct Core<T> {
    name: String,
    fetcher: Arc<dyn Fetcher<Output = T>>,
    state: watch::Sender<FetchState<T>>,
    policy: OverlapPolicy,
    issued: AtomicU64,
    applied: AtomicU64,
    in_flight: AtomicUsize,
}

/// Decrements the in-flight count even when the load future is dropped
struct FlightGuard<'a>(&'a AtomicUsize);

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl<T> Core<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn enter(&self) -> Option<FlightGuard<'_>> {
        if self.policy == OverlapPolicy::Coalesce {
            self.in_flight
                .compare_exchange(0, 1, Ordering::SeqCst, Ordering::SeqCst)
                .ok()?;
        } else {
            self.in_flight.fetch_add(1, Ordering::SeqCst);
        }
        Some(FlightGuard(&self.in_flight))
    }

    async fn load(&self) {
        let Some(_flight) = self.enter() else {
            debug!("⏭️ {}: load skipped, one already in flight", self.name);
            return;
        };

        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(FetchState::mark_loading);
        debug!("🔄 {}: load #{ticket} started", self.name);

        let outcome = self.fetcher.fetch().await;

        if self.policy == OverlapPolicy::LatestIssued
            && self.applied.fetch_max(ticket, Ordering::SeqCst) > ticket
        {
            debug!("🗑️ {}: discarding load #{ticket}, a newer one landed", self.name);
            return;
        }

        match outcome {
            Ok(data) => {
                debug!("✅ {}: load #{ticket} succeeded", self.name);
                self.state.send_modify(|state| state.update(data));
            }
            Err(e) => {
                warn!("❌ {}: load #{ticket} failed - {}", self.name, e);
                self.state.send_modify(|state| state.mark_error(e));
            }
        }
    }
}

/// Stateful, schedulable wrapper around one [`Fetcher`].
///
/// Errors from the fetcher are stored in the state and never propagated.
/// Stopping cancels the schedule only: a load already in flight still lands
/// after `stop()` returns.
pub struct PollingController<T> {
    core: Arc<Core<T>>,
    schedule: Mutex<Option<PollSchedule>>,
}

impl<T> std::fmt::Debug for PollingController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollingController")
            .field("name", &self.core.name)
            .field("policy", &self.core.policy)
            .finish_non_exhaustive()
    }
}

impl<T> PollingController<T>
where
    T: Clone + Send + Sync + 'static,
{
    #[must_use]
    pub fn new<F>(fetcher: F) -> Self
    where
        F: Fetcher<Output = T> + 'static,
    {
        Self::with_policy(fetcher, OverlapPolicy::default())
    }

    #[must_use]
    pub fn with_policy<F>(fetcher: F, policy: OverlapPolicy) -> Self
    where
        F: Fetcher<Output = T> + 'static,
    {
        let (state, _) = watch::channel(FetchState::new());
        Self {
            core: Arc::new(Core {
                name: fetcher.name().to_string(),
                fetcher: Arc::new(fetcher),
                state,
                policy,
                issued: AtomicU64::new(0),
                applied: AtomicU64::new(0),
                in_flight: AtomicUsize::new(0),
            }),
            schedule: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.core.name
    }

    #[must_use]
    pub fn policy(&self) -> OverlapPolicy {
        self.core.policy
    }

    /// Fetch once and record the outcome
    pub async fn load(&self) {
        self.core.load().await;
    }

    /// Explicit user refresh, same as [`PollingController::load`]
    pub async fn reload(&self) {
        self.load().await;
    }

    /// Run one load on the runtime without waiting for it
    pub fn spawn_load(&self) -> JoinHandle<()> {
        let core = Arc::clone(&self.core);
        tokio::spawn(async move { core.load().await })
    }

    /// Cloned current state
    #[must_use]
    pub fn snapshot(&self) -> FetchState<T> {
        self.core.state.borrow().clone()
    }

    /// Receiver observing every state replacement
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.core.state.subscribe()
    }

    /// Loads issued but not yet resolved
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.core.in_flight.load(Ordering::SeqCst)
    }

    /// Whether a repeating timer is armed
    #[must_use]
    pub fn is_polling(&self) -> bool {
        self.lock_schedule()
            .as_ref()
            .is_some_and(PollSchedule::is_active)
    }

    fn lock_schedule(&self) -> MutexGuard<'_, Option<PollSchedule>> {
        self.schedule.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load now and then every `interval`, replacing any armed timer.
    ///
    /// `Duration::ZERO` loads once and arms nothing. Must be called inside a
    /// Tokio runtime.
    pub fn start(&self, interval: Duration) {
        let mut slot = self.lock_schedule();
        if let Some(previous) = slot.take() {
            previous.cancel();
        }

        self.spawn_load();

        let core = Arc::clone(&self.core);
        *slot = PollSchedule::arm(interval, move || {
            let core = Arc::clone(&core);
            tokio::spawn(async move { core.load().await });
        });
        drop(slot);
        debug!("▶️ {}: started ({}ms)", self.core.name, interval.as_millis());
    }

    /// Cancel the timer if armed. Safe to call at any time, any number of times.
    pub fn stop(&self) {
        let previous = self.lock_schedule().take();
        if let Some(schedule) = previous {
            schedule.cancel();
            debug!("⏹️ {}: stopped", self.core.name);
        }
    }
}

impl<T> Lifecycle for PollingController<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn start(&self, interval: Duration) {
        Self::start(self, interval);
    }

    fn stop(&self) {
        Self::stop(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::poll::fetch_state::FetchStatus;
    use crate::poll::fetcher::fetcher_fn;
    use std::sync::atomic::AtomicBool;

    #[tokio::test]
    async fn test_load_success_then_error_keeps_data() {
        let fail = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fail);
        let controller = PollingController::new(fetcher_fn("flaky", move || {
            let fail = flag.load(Ordering::SeqCst);
            async move {
                if fail {
                    Err(Error::HttpStatus {
                        status: 500,
                        body_text: "db down".to_string(),
                    })
                } else {
                    Ok("up".to_string())
                }
            }
        }));
        assert_eq!(controller.snapshot().status, FetchStatus::Idle);

        controller.load().await;
        let state = controller.snapshot();
        assert_eq!(state.status, FetchStatus::Success);
        assert_eq!(state.data.as_deref(), Some("up"));

        fail.store(true, Ordering::SeqCst);
        controller.reload().await;
        let state = controller.snapshot();
        assert_eq!(state.status, FetchStatus::Error);
        assert_eq!(state.data.as_deref(), Some("up"));
        assert_eq!(state.error.and_then(|e| e.status()), Some(500));
        assert_eq!(controller.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_stop_without_start_is_noop() {
        let controller = PollingController::new(fetcher_fn("idle", || async { Ok(1_u8) }));
        controller.stop();
        controller.stop();
        assert!(!controller.is_polling());
        assert_eq!(controller.snapshot().status, FetchStatus::Idle);
    }

    #[tokio::test]
    async fn test_subscribers_see_completion() {
        let controller = PollingController::new(fetcher_fn("seen", || async { Ok(7_u32) }));
        let mut rx = controller.subscribe();
        controller.load().await;
        assert!(rx.has_changed().unwrap());
        let state = rx.borrow_and_update().clone();
        assert_eq!(state.data, Some(7));
        assert_eq!(state.version, 1);
    }
}
