use super::resource;
use crate::api::network::{fetch_lan_devices, fetch_network_overview, run_speedtest};
use crate::api::{HttpClient, Payload};
use crate::poll::{FetchState, OverlapPolicy, PollingController, fetcher_fn};
use serde_json::Value;
use tokio::sync::watch;

#[must_use]
pub fn network_overview(client: &HttpClient) -> PollingController<Payload> {
    PollingController::new(resource(client.clone(), "network.overview", |c| async move {
        fetch_network_overview(&c).await
    }))
}

/// Devices seen on the local network
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LanDevices {
    pub devices: Vec<Value>,
    pub collected_at: Option<String>,
}

impl LanDevices {
    #[must_use]
    pub fn from_payload(payload: &Payload) -> Self {
        Self {
            devices: payload.list("devices"),
            collected_at: payload
                .str_field("collected_at")
                .or_else(|| payload.str_field("collectedAt")),
        }
    }
}

#[must_use]
pub fn lan_devices(client: &HttpClient) -> PollingController<LanDevices> {
    let client = client.clone();
    PollingController::new(fetcher_fn("network.lan-devices", move || {
        let client = client.clone();
        async move {
            fetch_lan_devices(&client)
                .await
                .map(|payload| LanDevices::from_payload(&payload))
        }
    }))
}

/// On-demand speed test; at most one run is outstanding at a time
#[derive(Debug)]
pub struct SpeedtestPanel {
    controller: PollingController<Payload>,
}

impl SpeedtestPanel {
    #[must_use]
    pub fn new(client: &HttpClient) -> Self {
        let fetcher = resource(client.clone(), "network.speedtest", |c| async move {
            run_speedtest(&c).await
        });
        Self {
            controller: PollingController::with_policy(fetcher, OverlapPolicy::Coalesce),
        }
    }

    /// Run a test, or return at once if one is already running
    pub async fn run(&self) {
        self.controller.load().await;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.controller.in_flight() > 0
    }

    #[must_use]
    pub fn snapshot(&self) -> FetchState<Payload> {
        self.controller.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FetchState<Payload>> {
        self.controller.subscribe()
    }
}
