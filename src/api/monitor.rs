use super::http::{HttpClient, Payload, Query};
use crate::error::Result;

pub const TARGETS_PATH: &str = "/monitor/targets";

/// Probe results for every configured HTTP/TCP target, under `targets`, plus
/// an online/offline `summary`
///
/// # Errors
///
/// Any client error, unchanged
pub async fn fetch_monitor_targets(client: &HttpClient) -> Result<Payload> {
    client.get(TARGETS_PATH, &Query::new()).await
}
