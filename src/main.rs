use clap::{Parser, ValueEnum};
use dashpoll::api::HttpClient;
use dashpoll::config::{self, ClientConfig};
use dashpoll::panels;
use dashpoll::poll::{Binding, FetchState, FetchStatus, Lifecycle};
use std::fmt::Debug;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Panel {
    Host,
    Docker,
    Network,
    Lan,
    Monitor,
    System,
    Events,
    Trend,
}

impl Panel {
    const fn default_interval(self) -> Duration {
        match self {
            Self::Host => config::HOST_OVERVIEW_INTERVAL,
            Self::Docker => config::DOCKER_OVERVIEW_INTERVAL,
            Self::Network => config::NETWORK_OVERVIEW_INTERVAL,
            Self::Lan => config::LAN_DEVICES_INTERVAL,
            Self::Monitor => config::MONITOR_TARGETS_INTERVAL,
            Self::System => config::SYSTEM_OVERVIEW_INTERVAL,
            Self::Events => config::SYSTEM_EVENTS_INTERVAL,
            Self::Trend => config::RESOURCE_TREND_INTERVAL,
        }
    }
}

/// Poll one dashboard panel and log every state change
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Panel to poll
    #[arg(short, long, value_enum, default_value_t = Panel::Host)]
    panel: Panel,

    /// Backend base address, overrides DASHPOLL_API_BASE_URL
    #[arg(short, long)]
    base_url: Option<String>,

    /// Poll interval in milliseconds; 0 loads once and exits
    #[arg(short, long)]
    interval_ms: Option<u64>,
}

/// Bind `controller` until Ctrl-C (or the first settled state when
/// single-shot), logging each snapshot
async fn watch_panel<L, T>(
    controller: &L,
    mut rx: watch::Receiver<FetchState<T>>,
    interval: Duration,
) -> anyhow::Result<()>
where
    L: Lifecycle + ?Sized,
    T: Debug,
{
    let _binding = Binding::activate(controller, interval);

    loop {
        tokio::select! {
            changed = rx.changed() => {
                changed?;
                let state = rx.borrow_and_update();
                match state.status {
                    FetchStatus::Success => info!("v{} {:?}", state.version, state.data),
                    FetchStatus::Error => warn!(
                        "v{} error: {}",
                        state.version,
                        state.error.as_ref().map_or_else(String::new, ToString::to_string)
                    ),
                    FetchStatus::Idle | FetchStatus::Loading => continue,
                }
                if interval.is_zero() {
                    break;
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal?;
                info!("Interrupted, stopping");
                break;
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let client_config = match args.base_url.as_deref() {
        Some(base_url) => ClientConfig::with_base_url(base_url)?,
        None => ClientConfig::from_env()?,
    };
    config::install(client_config)?;
    let client = HttpClient::from_global()?;
    info!("Polling {:?} from {}", args.panel, client.base_url());

    let interval = args
        .interval_ms
        .map_or_else(|| args.panel.default_interval(), Duration::from_millis);

    match args.panel {
        Panel::Host => {
            let panel = panels::host_overview(&client);
            watch_panel(&panel, panel.subscribe(), interval).await
        }
        Panel::Docker => {
            let panel = panels::docker_overview(&client);
            watch_panel(&panel, panel.subscribe(), interval).await
        }
        Panel::Network => {
            let panel = panels::network_overview(&client);
            watch_panel(&panel, panel.subscribe(), interval).await
        }
        Panel::Lan => {
            let panel = panels::lan_devices(&client);
            watch_panel(&panel, panel.subscribe(), interval).await
        }
        Panel::Monitor => {
            let panel = panels::monitor_targets(&client);
            watch_panel(&panel, panel.subscribe(), interval).await
        }
        Panel::System => {
            let panel = panels::system_overview(&client);
            watch_panel(&panel, panel.subscribe(), interval).await
        }
        Panel::Events => {
            let panel = panels::system_events(&client);
            watch_panel(&panel, panel.subscribe(), interval).await
        }
        Panel::Trend => {
            let panel = panels::resource_trend(&client, config::TREND_POINT_LIMIT);
            watch_panel(&panel, panel.subscribe(), interval).await
        }
    }
}
