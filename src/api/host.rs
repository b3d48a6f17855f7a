use super::http::{HttpClient, Payload, Query};
use crate::error::Result;

pub const OVERVIEW_PATH: &str = "/host/overview";

/// One-shot aggregate of system, disks, processes, sensors, uptime, network,
/// monitor and docker state, assembled by the backend.
///
/// # Errors
///
/// Any client error, unchanged
pub async fn fetch_host_overview(client: &HttpClient) -> Result<Payload> {
    client.get(OVERVIEW_PATH, &Query::new()).await
}
