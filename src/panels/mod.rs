//! Dashboard panels, each one controller instance over the resource fetchers.
//!
//! Panels are created fresh per consumer; nothing is shared between two
//! instances of the same panel.

pub mod disks;
pub mod docker;
pub mod host;
pub mod monitor;
pub mod network;
pub mod system;

use crate::api::{HttpClient, Payload};
use crate::error::Result;
use crate::poll::{Fetcher, fetcher_fn};
use std::future::Future;

pub use disks::{FileListing, SystemDisksPanel, resolve_parent_path};
pub use docker::{DockerServicesPanel, docker_overview};
pub use host::host_overview;
pub use monitor::{MonitorSummary, MonitorTargets, monitor_targets};
pub use network::{LanDevices, SpeedtestPanel, lan_devices, network_overview};
pub use system::{
    ResourceTrend, SystemEvents, SystemOverview, resource_trend, system_events,
    system_events_with_limits, system_overview,
};

/// Bind a payload fetcher to its own clone of `client`
pub(crate) fn resource<Op, Fut>(
    client: HttpClient,
    name: &'static str,
    op: Op,
) -> impl Fetcher<Output = Payload>
where
    Op: Fn(HttpClient) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Payload>> + Send + 'static,
{
    fetcher_fn(name, move || op(client.clone()))
}
