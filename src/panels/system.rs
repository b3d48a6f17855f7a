use super::resource;
use crate::api::system::{
    fetch_system_events, fetch_system_login_history, fetch_system_processes,
    fetch_system_resource_trend, fetch_system_schedule, fetch_system_sensors,
    fetch_system_summary, fetch_system_uptime,
};
use crate::api::{HttpClient, Payload, Query};
use crate::config::{EVENT_LIMIT, LOGIN_LIMIT, PROCESS_LIMIT};
use crate::poll::{
    Aggregate, AggregateResult, AggregatingController, PollingController, fetcher_fn,
};
use serde_json::Value;

/// Summary, top processes, sensors and uptime, refreshed together
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemOverview {
    pub summary: Payload,
    pub processes: Payload,
    pub sensors: Payload,
    pub uptime: Payload,
}

impl Aggregate for SystemOverview {
    fn from_members(result: &AggregateResult) -> Self {
        Self {
            summary: result.payload("summary"),
            processes: result.payload("processes"),
            sensors: result.payload("sensors"),
            uptime: result.payload("uptime"),
        }
    }
}

#[must_use]
pub fn system_overview(client: &HttpClient) -> AggregatingController<SystemOverview> {
    let processes = Query::new().with("limit", PROCESS_LIMIT);

    AggregatingController::builder("system.overview")
        .member(
            "summary",
            resource(client.clone(), "system.summary", |c| async move {
                fetch_system_summary(&c, &Query::new()).await
            }),
        )
        .member(
            "processes",
            resource(client.clone(), "system.processes", move |c| {
                let query = processes.clone();
                async move { fetch_system_processes(&c, &query).await }
            }),
        )
        .member(
            "sensors",
            resource(client.clone(), "system.sensors", |c| async move {
                fetch_system_sensors(&c).await
            }),
        )
        .member(
            "uptime",
            resource(client.clone(), "system.uptime", |c| async move {
                fetch_system_uptime(&c).await
            }),
        )
        .build()
}

/// Recent events, scheduled jobs and login history
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemEvents {
    pub events: Vec<Value>,
    pub schedule: Vec<Value>,
    pub logins: Vec<Value>,
}

impl Aggregate for SystemEvents {
    fn from_members(result: &AggregateResult) -> Self {
        Self {
            events: result.list("events", "items"),
            schedule: result.list("schedule", "entries"),
            logins: result.list("logins", "records"),
        }
    }
}

#[must_use]
pub fn system_events(client: &HttpClient) -> AggregatingController<SystemEvents> {
    system_events_with_limits(client, EVENT_LIMIT, LOGIN_LIMIT)
}

#[must_use]
pub fn system_events_with_limits(
    client: &HttpClient,
    event_limit: usize,
    login_limit: usize,
) -> AggregatingController<SystemEvents> {
    let events = Query::new().with("limit", event_limit);
    let logins = Query::new().with("limit", login_limit);

    AggregatingController::builder("system.events")
        .member(
            "events",
            resource(client.clone(), "system.events", move |c| {
                let query = events.clone();
                async move { fetch_system_events(&c, &query).await }
            }),
        )
        .member(
            "schedule",
            resource(client.clone(), "system.schedule", |c| async move {
                fetch_system_schedule(&c).await
            }),
        )
        .member(
            "logins",
            resource(client.clone(), "system.security.logins", move |c| {
                let query = logins.clone();
                async move { fetch_system_login_history(&c, &query).await }
            }),
        )
        .build()
}

/// Rolling CPU/memory samples
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceTrend {
    pub points: Vec<Value>,
}

#[must_use]
pub fn resource_trend(client: &HttpClient, limit: usize) -> PollingController<ResourceTrend> {
    let client = client.clone();
    let query = Query::new().with("limit", limit);
    PollingController::new(fetcher_fn("system.resource-trend", move || {
        let client = client.clone();
        let query = query.clone();
        async move {
            fetch_system_resource_trend(&client, &query)
                .await
                .map(|payload| ResourceTrend {
                    points: payload.list("points"),
                })
        }
    }))
}
