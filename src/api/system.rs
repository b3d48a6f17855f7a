use super::http::{HttpClient, Payload, Query};
use crate::error::Result;

pub const SUMMARY_PATH: &str = "/system/summary";
pub const PROCESSES_PATH: &str = "/system/processes";
pub const SENSORS_PATH: &str = "/system/sensors";
pub const UPTIME_PATH: &str = "/system/uptime";
pub const DISKS_PATH: &str = "/system/disks";
pub const FILES_PATH: &str = "/system/files";
pub const EVENTS_PATH: &str = "/system/events";
pub const RESOURCE_TREND_PATH: &str = "/system/resource-trend";
pub const SCHEDULE_PATH: &str = "/system/schedule";
pub const LOGINS_PATH: &str = "/system/security/logins";

/// CPU, memory and main disk summary. Accepts `mount`.
///
/// # Errors
///
/// Any client error, unchanged
pub async fn fetch_system_summary(client: &HttpClient, query: &Query) -> Result<Payload> {
    client.get(SUMMARY_PATH, query).await
}

/// Top processes. Accepts `limit`.
///
/// # Errors
///
/// Any client error, unchanged
pub async fn fetch_system_processes(client: &HttpClient, query: &Query) -> Result<Payload> {
    client.get(PROCESSES_PATH, query).await
}

/// # Errors
///
/// Any client error, unchanged
pub async fn fetch_system_sensors(client: &HttpClient) -> Result<Payload> {
    client.get(SENSORS_PATH, &Query::new()).await
}

/// # Errors
///
/// Any client error, unchanged
pub async fn fetch_system_uptime(client: &HttpClient) -> Result<Payload> {
    client.get(UPTIME_PATH, &Query::new()).await
}

/// # Errors
///
/// Any client error, unchanged
pub async fn fetch_system_disks(client: &HttpClient) -> Result<Payload> {
    client.get(DISKS_PATH, &Query::new()).await
}

/// Directory listing under `entries` with the resolved `base_path`.
/// Accepts `path`.
///
/// # Errors
///
/// Any client error, unchanged
pub async fn fetch_system_files(client: &HttpClient, query: &Query) -> Result<Payload> {
    client.get(FILES_PATH, query).await
}

/// Recent system events under `items`. Accepts `limit`.
///
/// # Errors
///
/// Any client error, unchanged
pub async fn fetch_system_events(client: &HttpClient, query: &Query) -> Result<Payload> {
    client.get(EVENTS_PATH, query).await
}

/// Rolling resource samples under `points`. Accepts `limit`.
///
/// # Errors
///
/// Any client error, unchanged
pub async fn fetch_system_resource_trend(client: &HttpClient, query: &Query) -> Result<Payload> {
    client.get(RESOURCE_TREND_PATH, query).await
}

/// Scheduled jobs under `entries`
///
/// # Errors
///
/// Any client error, unchanged
pub async fn fetch_system_schedule(client: &HttpClient) -> Result<Payload> {
    client.get(SCHEDULE_PATH, &Query::new()).await
}

/// Login history under `records`. Accepts `limit`.
///
/// # Errors
///
/// Any client error, unchanged
pub async fn fetch_system_login_history(client: &HttpClient, query: &Query) -> Result<Payload> {
    client.get(LOGINS_PATH, query).await
}
