use crate::error::Error;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Snapshot of a controller's result state.
///
/// Starting a load never clears `data`: the previous result stays visible
/// until the new one lands, and a failure keeps it around next to `error`.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub status: FetchStatus,
    pub data: Option<T>,
    pub error: Option<Error>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub version: u64, // Applied completions, success or failure
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FetchState<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            status: FetchStatus::Idle,
            data: None,
            error: None,
            last_updated_at: None,
            version: 0,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status == FetchStatus::Error
    }

    pub fn mark_loading(&mut self) {
        self.status = FetchStatus::Loading;
        self.error = None;
    }

    pub fn update(&mut self, data: T) {
        self.status = FetchStatus::Success;
        self.data = Some(data);
        self.error = None;
        self.last_updated_at = Some(Utc::now());
        self.version += 1;
    }

    pub fn mark_error(&mut self, error: Error) {
        self.status = FetchStatus::Error;
        self.error = Some(error);
        self.version += 1;
    }

    /// Time since the last successful update
    #[must_use]
    pub fn age(&self) -> Option<chrono::Duration> {
        self.last_updated_at.map(|at| Utc::now() - at)
    }
}
