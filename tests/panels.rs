mod support;

use dashpoll::api::docker::DockerServiceConfig;
use dashpoll::api::{HttpClient, Payload};
use dashpoll::config::ClientConfig;
use dashpoll::panels::{
    DockerServicesPanel, SpeedtestPanel, SystemDisksPanel, host_overview, lan_devices,
    monitor_targets, resource_trend, system_events_with_limits, system_overview,
};
use dashpoll::poll::FetchStatus;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use support::{Canned, StubServer};

fn client_for(server: &StubServer) -> HttpClient {
    HttpClient::new(&ClientConfig::with_base_url(&server.base_url).unwrap()).unwrap()
}

#[tokio::test]
async fn test_host_overview_single_shot() {
    let server = StubServer::start(|_| Canned::json(json!({"hostname": "atlas"}))).await;
    let controller = host_overview(&client_for(&server));
    let mut rx = controller.subscribe();

    controller.start(Duration::ZERO);
    rx.wait_for(|state| state.status == FetchStatus::Success)
        .await
        .unwrap();

    let state = controller.snapshot();
    assert_eq!(
        state.data.and_then(|p| p.str_field("hostname")),
        Some("atlas".to_string())
    );
    assert!(!controller.is_polling());
    assert_eq!(server.hits("/host/overview"), 1);
}

#[tokio::test]
async fn test_system_events_sends_limits_and_defaults_lists() {
    let server = StubServer::start(|req| match req.path() {
        "/system/events" => Canned::json(json!({"items": [{"id": 1}, {"id": 2}]})),
        "/system/schedule" => Canned::json(json!({"unexpected": true})),
        "/system/security/logins" => Canned::json(json!({"records": [{"user": "root"}]})),
        _ => Canned::text(404, "not found"),
    })
    .await;
    let controller = system_events_with_limits(&client_for(&server), 25, 5);

    controller.load().await;
    let data = controller.snapshot().data.unwrap();
    assert_eq!(data.events.len(), 2);
    assert!(data.schedule.is_empty());
    assert_eq!(data.logins.len(), 1);

    let requests = server.requests();
    let query_of = |path: &str| {
        requests
            .iter()
            .find(|r| r.path() == path)
            .and_then(|r| r.query().map(str::to_string))
    };
    assert_eq!(query_of("/system/events").as_deref(), Some("limit=25"));
    assert_eq!(query_of("/system/security/logins").as_deref(), Some("limit=5"));
    assert_eq!(query_of("/system/schedule"), None);
}

#[tokio::test]
async fn test_system_overview_fails_when_one_member_fails() {
    let server = StubServer::start(|req| match req.path() {
        "/system/sensors" => Canned::text(500, "no sensors"),
        _ => Canned::json(json!({"ok": true})),
    })
    .await;
    let controller = system_overview(&client_for(&server));

    controller.load().await;
    let state = controller.snapshot();
    assert_eq!(state.status, FetchStatus::Error);
    assert!(state.data.is_none());
    assert_eq!(state.error.unwrap().status(), Some(500));

    let processes = server
        .requests()
        .into_iter()
        .find(|r| r.path() == "/system/processes")
        .unwrap();
    assert_eq!(processes.query(), Some("limit=10"));
}

#[tokio::test]
async fn test_lan_devices_accepts_camel_case_timestamp() {
    let server = StubServer::start(|_| {
        Canned::json(json!({
            "devices": [{"ip": "192.168.1.20"}, {"ip": "192.168.1.21"}],
            "collectedAt": "2024-06-01T08:00:00Z"
        }))
    })
    .await;
    let controller = lan_devices(&client_for(&server));

    controller.load().await;
    let data = controller.snapshot().data.unwrap();
    assert_eq!(data.devices.len(), 2);
    assert_eq!(data.collected_at.as_deref(), Some("2024-06-01T08:00:00Z"));
}

#[tokio::test]
async fn test_monitor_targets_reads_summary_and_targets() {
    let server = StubServer::start(|_| {
        Canned::json(json!({
            "summary": {"total": 2, "online": 1, "offline": 1, "avg_latency_ms": 12.5},
            "targets": [
                {"name": "nas", "type": "http", "status": "online", "code": 200},
                {"name": "printer", "type": "tcp", "status": "offline"}
            ]
        }))
    })
    .await;
    let controller = monitor_targets(&client_for(&server));

    controller.load().await;
    let data = controller.snapshot().data.unwrap();
    assert_eq!(data.targets.len(), 2);
    assert_eq!(data.summary.online, 1);
    assert_eq!(data.summary.offline, 1);
    assert_eq!(data.summary.avg_latency_ms, Some(12.5));
    assert_eq!(server.hits("/monitor/targets"), 1);
}

#[tokio::test]
async fn test_monitor_targets_default_to_empty() {
    let server = StubServer::start(|_| Canned::json(json!({"summary": {"total": 0}}))).await;
    let controller = monitor_targets(&client_for(&server));

    controller.load().await;
    let data = controller.snapshot().data.unwrap();
    assert!(data.targets.is_empty());
    assert_eq!(data.summary.total, 0);
}

#[tokio::test]
async fn test_resource_trend_reads_points() {
    let server =
        StubServer::start(|_| Canned::json(json!({"points": [{"cpu": 3.5}, {"cpu": 4.0}]}))).await;
    let controller = resource_trend(&client_for(&server), 60);

    controller.load().await;
    assert_eq!(controller.snapshot().data.unwrap().points.len(), 2);
    assert_eq!(server.requests()[0].query(), Some("limit=60"));
}

#[tokio::test]
async fn test_docker_create_reloads_service_list() {
    let created = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&created);
    let server = StubServer::start(move |req| match (req.method.as_str(), req.path()) {
        ("POST", "/docker/services") => {
            flag.store(true, Ordering::SeqCst);
            Canned::json(json!({"slug": "grafana"}))
        }
        ("GET", "/docker/services") if flag.load(Ordering::SeqCst) => {
            Canned::json(json!([{"slug": "grafana"}]))
        }
        ("GET", "/docker/services") => Canned::json(json!([])),
        _ => Canned::text(404, "not found"),
    })
    .await;
    let panel = DockerServicesPanel::new(&client_for(&server));

    panel.load().await;
    assert!(panel.services().is_empty());

    panel
        .create(&DockerServiceConfig::new("grafana"))
        .await
        .unwrap();
    assert_eq!(panel.services(), vec![json!({"slug": "grafana"})]);
    assert_eq!(server.hits("/docker/services"), 3);

    let post = server
        .requests()
        .into_iter()
        .find(|r| r.method == "POST")
        .unwrap();
    let body: serde_json::Value = serde_json::from_str(&post.body).unwrap();
    assert_eq!(body["name"], "grafana");
}

#[tokio::test]
async fn test_docker_failed_mutation_skips_reload() {
    let server = StubServer::start(|req| match req.method.as_str() {
        "DELETE" => Canned::text(404, "unknown service"),
        _ => Canned::json(json!([{"slug": "grafana"}])),
    })
    .await;
    let panel = DockerServicesPanel::new(&client_for(&server));
    panel.load().await;

    let err = panel.remove("ghost").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(server.hits("/docker/services"), 1);
    assert_eq!(server.hits("/docker/services/ghost"), 1);
    assert_eq!(panel.services().len(), 1);
    assert_eq!(panel.snapshot().status, FetchStatus::Success);
}

#[tokio::test]
async fn test_disks_browse_and_go_parent() {
    let server = StubServer::start(|req| match req.path() {
        "/system/disks" => Canned::json(json!([{"mount": "/"}])),
        "/system/files" => {
            let path = req.query().unwrap_or_default();
            match path {
                "path=%2Fvar%2Flog%2F" => Canned::json(json!({
                    "base_path": "/var/log",
                    "entries": [{"name": "syslog"}]
                })),
                _ => Canned::json(json!({"entries": []})),
            }
        }
        _ => Canned::text(404, "not found"),
    })
    .await;
    let panel = SystemDisksPanel::new(&client_for(&server), "/");
    assert_eq!(panel.current_path(), "/");

    panel.load_disks().await;
    assert_eq!(panel.disks().data.unwrap().items().len(), 1);

    panel.browse("/var/log/").await;
    let listing = panel.files().data.unwrap();
    assert_eq!(listing.path, "/var/log");
    assert_eq!(listing.entries.len(), 1);

    panel.go_parent().await;
    assert_eq!(panel.current_path(), "/var");
    assert_eq!(
        server.requests().last().and_then(|r| r.query().map(str::to_string)),
        Some("path=%2Fvar".to_string())
    );
}

#[tokio::test]
async fn test_disks_go_parent_at_root_is_noop() {
    let server = StubServer::start(|_| Canned::json(json!({"entries": []}))).await;
    let panel = SystemDisksPanel::new(&client_for(&server), "");

    panel.go_parent().await;
    assert!(server.requests().is_empty());
    assert_eq!(panel.files().status, FetchStatus::Idle);
}

#[tokio::test]
async fn test_speedtest_runs_once_at_a_time() {
    let server = StubServer::start(|_| Canned::json(json!({"download_mbps": 940.2}))).await;
    let panel = SpeedtestPanel::new(&client_for(&server));

    tokio::join!(panel.run(), panel.run());
    assert!(!panel.is_running());
    assert_eq!(server.hits("/network/speedtest"), 1);
    assert_eq!(
        panel.snapshot().data.and_then(|p| p.get("download_mbps").cloned()),
        Some(json!(940.2))
    );
    assert!(matches!(panel.snapshot().data, Some(Payload::Json(_))));
}
