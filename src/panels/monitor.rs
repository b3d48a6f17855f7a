use crate::api::monitor::fetch_monitor_targets;
use crate::api::{HttpClient, Payload};
use crate::poll::{PollingController, fetcher_fn};
use serde::Deserialize;
use serde_json::Value;

/// Online/offline counts over all targets
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MonitorSummary {
    pub total: u32,
    pub online: u32,
    pub offline: u32,
    pub avg_latency_ms: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonitorTargets {
    pub summary: MonitorSummary,
    pub targets: Vec<Value>,
}

impl MonitorTargets {
    #[must_use]
    pub fn from_payload(payload: &Payload) -> Self {
        Self {
            summary: payload
                .get("summary")
                .and_then(|summary| MonitorSummary::deserialize(summary).ok())
                .unwrap_or_default(),
            targets: payload.list("targets"),
        }
    }
}

#[must_use]
pub fn monitor_targets(client: &HttpClient) -> PollingController<MonitorTargets> {
    let client = client.clone();
    PollingController::new(fetcher_fn("monitor.targets", move || {
        let client = client.clone();
        async move {
            fetch_monitor_targets(&client)
                .await
                .map(|payload| MonitorTargets::from_payload(&payload))
        }
    }))
}
