use super::http::{HttpClient, Payload, Query};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const OVERVIEW_PATH: &str = "/docker/overview";
pub const SERVICES_PATH: &str = "/docker/services";

/// Health probe settings for a managed service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default = "default_probe_method")]
    pub method: String,
    /// Seconds
    #[serde(default = "default_probe_timeout")]
    pub timeout: f64,
    #[serde(default)]
    pub expect_status: Vec<u16>,
}

fn default_probe_method() -> String {
    "GET".to_string()
}

const fn default_probe_timeout() -> f64 {
    3.0
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            url: None,
            method: default_probe_method(),
            timeout: default_probe_timeout(),
            expect_status: Vec::new(),
        }
    }
}

/// Where to pull extra per-service statistics from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsConfig {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default)]
    pub extra: Map<String, Value>,
}

/// Body of a service create/update request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockerServiceConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatsConfig>,
    #[serde(default)]
    pub require_probe: bool,
    #[serde(default = "default_managed")]
    pub managed: bool,
}

const fn default_managed() -> bool {
    true
}

impl DockerServiceConfig {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            container: None,
            description: None,
            access_url: None,
            icon: None,
            tags: Vec::new(),
            probe: ProbeConfig::default(),
            stats: None,
            require_probe: false,
            managed: default_managed(),
        }
    }
}

fn service_path(slug: &str) -> String {
    format!("{SERVICES_PATH}/{slug}")
}

/// Summary counters plus per-service status
///
/// # Errors
///
/// Any client error, unchanged
pub async fn fetch_docker_overview(client: &HttpClient) -> Result<Payload> {
    client.get(OVERVIEW_PATH, &Query::new()).await
}

/// Configured services as a bare array
///
/// # Errors
///
/// Any client error, unchanged
pub async fn list_docker_services(client: &HttpClient) -> Result<Payload> {
    client.get(SERVICES_PATH, &Query::new()).await
}

/// # Errors
///
/// Any client error, unchanged
pub async fn create_docker_service(
    client: &HttpClient,
    config: &DockerServiceConfig,
) -> Result<Payload> {
    client.post(SERVICES_PATH, config).await
}

/// # Errors
///
/// Any client error, unchanged; an unknown `slug` is an HTTP 404
pub async fn update_docker_service(
    client: &HttpClient,
    slug: &str,
    config: &DockerServiceConfig,
) -> Result<Payload> {
    client.put(&service_path(slug), config).await
}

/// Answers `204` on success
///
/// # Errors
///
/// Any client error, unchanged; an unknown `slug` is an HTTP 404
pub async fn delete_docker_service(client: &HttpClient, slug: &str) -> Result<Payload> {
    client.delete(&service_path(slug)).await
}
