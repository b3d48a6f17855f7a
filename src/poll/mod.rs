pub mod aggregate;
pub mod controller;
pub mod fetch_state;
pub mod fetcher;
pub mod lifecycle;
pub mod schedule;

pub use aggregate::{Aggregate, AggregateBuilder, AggregateResult, AggregatingController};
pub use controller::{OverlapPolicy, PollingController};
pub use fetch_state::{FetchState, FetchStatus};
pub use fetcher::{FnFetcher, Fetcher, fetcher_fn};
pub use lifecycle::{Binding, Lifecycle};
pub use schedule::PollSchedule;
