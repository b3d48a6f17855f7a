//! HTTP client and the resource fetchers for each telemetry domain.
//!
//! Fetchers are plain async functions with a fixed verb and path. They
//! forward caller-supplied query parameters unchanged and pass every failure
//! through untouched.

pub mod docker;
pub mod host;
pub mod http;
pub mod monitor;
pub mod network;
pub mod system;

pub use http::{HttpClient, Payload, Query};
