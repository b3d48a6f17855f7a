use super::http::{HttpClient, Payload, Query};
use crate::error::Result;

pub const OVERVIEW_PATH: &str = "/network/overview";
pub const LAN_DEVICES_PATH: &str = "/network/lan-devices";
pub const SPEEDTEST_PATH: &str = "/network/speedtest";

/// # Errors
///
/// Any client error, unchanged
pub async fn fetch_network_overview(client: &HttpClient) -> Result<Payload> {
    client.get(OVERVIEW_PATH, &Query::new()).await
}

/// Devices are listed under `devices` with a `collected_at` timestamp
///
/// # Errors
///
/// Any client error, unchanged
pub async fn fetch_lan_devices(client: &HttpClient) -> Result<Payload> {
    client.get(LAN_DEVICES_PATH, &Query::new()).await
}

/// Runs a speed test on the backend; slow, the response arrives when the
/// test completes
///
/// # Errors
///
/// Any client error, unchanged
pub async fn run_speedtest(client: &HttpClient) -> Result<Payload> {
    client.get(SPEEDTEST_PATH, &Query::new()).await
}
