use super::resource;
use crate::api::docker::{
    DockerServiceConfig, create_docker_service, delete_docker_service, fetch_docker_overview,
    list_docker_services, update_docker_service,
};
use crate::api::{HttpClient, Payload};
use crate::error::Result;
use crate::poll::{FetchState, PollingController, fetcher_fn};
use serde_json::Value;
use tokio::sync::watch;
use tracing::info;

#[must_use]
pub fn docker_overview(client: &HttpClient) -> PollingController<Payload> {
    PollingController::new(resource(client.clone(), "docker.overview", |c| async move {
        fetch_docker_overview(&c).await
    }))
}

/// Configured docker services with create/update/remove.
///
/// A successful mutation reloads the list. A failed mutation is returned to
/// the caller and leaves the list as it was.
#[derive(Debug)]
pub struct DockerServicesPanel {
    client: HttpClient,
    controller: PollingController<Vec<Value>>,
}

impl DockerServicesPanel {
    #[must_use]
    pub fn new(client: &HttpClient) -> Self {
        let list_client = client.clone();
        let controller = PollingController::new(fetcher_fn("docker.services", move || {
            let client = list_client.clone();
            async move { list_docker_services(&client).await.map(|p| p.items()) }
        }));
        Self {
            client: client.clone(),
            controller,
        }
    }

    pub async fn load(&self) {
        self.controller.load().await;
    }

    /// # Errors
    ///
    /// The create request's error, unchanged
    pub async fn create(&self, config: &DockerServiceConfig) -> Result<()> {
        create_docker_service(&self.client, config).await?;
        info!("🐳 Service {} created", config.name);
        self.load().await;
        Ok(())
    }

    /// # Errors
    ///
    /// The update request's error, unchanged
    pub async fn update(&self, slug: &str, config: &DockerServiceConfig) -> Result<()> {
        update_docker_service(&self.client, slug, config).await?;
        info!("🐳 Service {slug} updated");
        self.load().await;
        Ok(())
    }

    /// # Errors
    ///
    /// The delete request's error, unchanged
    pub async fn remove(&self, slug: &str) -> Result<()> {
        delete_docker_service(&self.client, slug).await?;
        info!("🐳 Service {slug} removed");
        self.load().await;
        Ok(())
    }

    /// Services from the last successful load, empty before the first one
    #[must_use]
    pub fn services(&self) -> Vec<Value> {
        self.controller.snapshot().data.unwrap_or_default()
    }

    #[must_use]
    pub fn snapshot(&self) -> FetchState<Vec<Value>> {
        self.controller.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FetchState<Vec<Value>>> {
        self.controller.subscribe()
    }
}
