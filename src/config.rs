/**
 * Client configuration and dashboard defaults
 */
use crate::error::{Error, Result};
use reqwest::Url;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, info};

/// Environment variable selecting the backend base address
pub const BASE_URL_ENV: &str = "DASHPOLL_API_BASE_URL";

/// Environment variable overriding the user agent
pub const USER_AGENT_ENV: &str = "DASHPOLL_USER_AGENT";

/// Local development backend
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default user agent - automatically uses the package version
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

// Poll intervals per panel
pub const HOST_OVERVIEW_INTERVAL: Duration = Duration::from_secs(5);
pub const DOCKER_OVERVIEW_INTERVAL: Duration = Duration::from_secs(5);
pub const NETWORK_OVERVIEW_INTERVAL: Duration = Duration::from_secs(5);
pub const LAN_DEVICES_INTERVAL: Duration = Duration::from_secs(15);
pub const MONITOR_TARGETS_INTERVAL: Duration = Duration::from_secs(10);
pub const SYSTEM_OVERVIEW_INTERVAL: Duration = Duration::from_secs(5);
pub const SYSTEM_EVENTS_INTERVAL: Duration = Duration::from_secs(15);
pub const RESOURCE_TREND_INTERVAL: Duration = Duration::from_secs(5);

// Query limits sent to list endpoints
pub const PROCESS_LIMIT: usize = 10;
pub const EVENT_LIMIT: usize = 150;
pub const LOGIN_LIMIT: usize = 50;
pub const TREND_POINT_LIMIT: usize = 120;

/// Validate configuration constants at compile time
const _: () = {
    assert!(!HOST_OVERVIEW_INTERVAL.is_zero(), "HOST_OVERVIEW_INTERVAL must be non-zero");
    assert!(!DOCKER_OVERVIEW_INTERVAL.is_zero(), "DOCKER_OVERVIEW_INTERVAL must be non-zero");
    assert!(!NETWORK_OVERVIEW_INTERVAL.is_zero(), "NETWORK_OVERVIEW_INTERVAL must be non-zero");
    assert!(!LAN_DEVICES_INTERVAL.is_zero(), "LAN_DEVICES_INTERVAL must be non-zero");
    assert!(!MONITOR_TARGETS_INTERVAL.is_zero(), "MONITOR_TARGETS_INTERVAL must be non-zero");
    assert!(!SYSTEM_OVERVIEW_INTERVAL.is_zero(), "SYSTEM_OVERVIEW_INTERVAL must be non-zero");
    assert!(!SYSTEM_EVENTS_INTERVAL.is_zero(), "SYSTEM_EVENTS_INTERVAL must be non-zero");
    assert!(!RESOURCE_TREND_INTERVAL.is_zero(), "RESOURCE_TREND_INTERVAL must be non-zero");
    assert!(PROCESS_LIMIT > 0, "PROCESS_LIMIT must be greater than 0");
    assert!(EVENT_LIMIT > 0, "EVENT_LIMIT must be greater than 0");
    assert!(LOGIN_LIMIT > 0, "LOGIN_LIMIT must be greater than 0");
    assert!(TREND_POINT_LIMIT > 0, "TREND_POINT_LIMIT must be greater than 0");
};

/// Process-wide client configuration, read-only once installed
static GLOBAL: OnceLock<ClientConfig> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Absolute base address without a trailing slash
    pub base_url: String,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Build a config for `base_url` with the default user agent
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if `base_url` is not an absolute http(s) URL
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            user_agent: USER_AGENT.to_string(),
        })
    }

    /// Read the config from the process environment
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the base address is set but invalid
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the config through `lookup`, falling back to defaults for unset
    /// or blank keys
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the base address is set but invalid
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let base_url = match non_blank(BASE_URL_ENV) {
            Some(raw) => normalize_base_url(&raw)?,
            None => DEFAULT_BASE_URL.to_string(),
        };
        let user_agent = non_blank(USER_AGENT_ENV).unwrap_or_else(|| USER_AGENT.to_string());

        debug!("Resolved client config: base_url={base_url}, user_agent={user_agent}");
        Ok(Self {
            base_url,
            user_agent,
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|e| Error::Config(format!("base url `{raw}`: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(Error::Config(format!(
            "base url `{raw}`: unsupported scheme `{other}`"
        ))),
    }
}

/// Install the process-wide config
///
/// # Errors
///
/// Returns `Error::AlreadyInitialized` if a config was installed (or lazily
/// resolved by [`global`]) before
pub fn install(config: ClientConfig) -> Result<()> {
    GLOBAL
        .set(config)
        .map_err(|_| Error::AlreadyInitialized("client config"))?;
    info!("Client config installed");
    Ok(())
}

/// Get the process-wide config, resolving it from the environment on first use
///
/// # Errors
///
/// Returns `Error::Config` if nothing was installed and the environment holds
/// an invalid base address
pub fn global() -> Result<&'static ClientConfig> {
    if let Some(config) = GLOBAL.get() {
        return Ok(config);
    }
    let resolved = ClientConfig::from_env()?;
    Ok(GLOBAL.get_or_init(|| resolved))
}
