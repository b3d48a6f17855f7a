use super::resource;
use crate::api::host::fetch_host_overview;
use crate::api::{HttpClient, Payload};
use crate::poll::PollingController;

/// Home page overview, polled as one backend-side aggregate
#[must_use]
pub fn host_overview(client: &HttpClient) -> PollingController<Payload> {
    PollingController::new(resource(client.clone(), "host.overview", |c| async move {
        fetch_host_overview(&c).await
    }))
}
