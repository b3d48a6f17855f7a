//! Polling data controllers for a host, system, network and container
//! monitoring dashboard.
//!
//! Every panel is a [`poll::PollingController`] (one fetcher) or a
//! [`poll::AggregatingController`] (a fail-fast join of several fetchers)
//! around the resource fetchers in [`api`]. Hosts drive them through
//! [`poll::Lifecycle`] and observe results as [`poll::FetchState`] snapshots.

pub mod api;
pub mod config;
pub mod error;
pub mod panels;
pub mod poll;

pub use error::{Error, Result};
