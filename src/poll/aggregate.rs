//! Controller whose single logical fetch is the concurrent join of several
//! named resource fetchers.
//!
//! The join is all-or-nothing: a new snapshot is built only when every member
//! resolved. The first member to fail turns the whole load into an error and
//! the previous snapshot is kept untouched.

use super::controller::{OverlapPolicy, PollingController};
use super::fetch_state::FetchState;
use super::fetcher::Fetcher;
use super::lifecycle::Lifecycle;
use crate::api::Payload;
use crate::error::{Error, Result};
use async_trait::async_trait;
use futures::future::try_join_all;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Member payloads of one complete, successful join, in member order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateResult {
    entries: Vec<(String, Payload)>,
}

impl AggregateResult {
    #[must_use]
    pub const fn from_entries(entries: Vec<(String, Payload)>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn get(&self, member: &str) -> Option<&Payload> {
        self.entries
            .iter()
            .find(|(name, _)| name == member)
            .map(|(_, payload)| payload)
    }

    /// Payload of `member`, or `Payload::Empty` when absent
    #[must_use]
    pub fn payload(&self, member: &str) -> Payload {
        self.get(member).cloned().unwrap_or_default()
    }

    /// Array under `key` in `member`'s payload, empty when missing or malformed
    #[must_use]
    pub fn list(&self, member: &str, key: &str) -> Vec<Value> {
        self.get(member)
            .map(|payload| payload.list(key))
            .unwrap_or_default()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// State assembled from one complete join.
///
/// Implementations must default every field to a neutral value (empty list,
/// `Payload::Empty`, ...) when its member payload is absent or mis-shaped.
pub trait Aggregate: Clone + Send + Sync + 'static {
    fn from_members(result: &AggregateResult) -> Self;
}

struct Member {
    name: String,
    fetcher: Arc<dyn Fetcher<Output = Payload>>,
}

struct JoinFetcher<A> {
    name: String,
    members: Vec<Member>,
    _aggregate: PhantomData<fn() -> A>,
}

#[async_trait]
impl<A: Aggregate> Fetcher for JoinFetcher<A> {
    type Output = A;

    async fn fetch(&self) -> Result<A> {
        let pending = self.members.iter().map(|member| {
            let name = member.name.clone();
            let fetcher = Arc::clone(&member.fetcher);
            async move {
                match fetcher.fetch().await {
                    Ok(payload) => Ok((name, payload)),
                    Err(e) => Err(Error::aggregate(&name, e)),
                }
            }
        });
        let entries = try_join_all(pending).await?;
        Ok(A::from_members(&AggregateResult { entries }))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Collects the members of an [`AggregatingController`]
pub struct AggregateBuilder<A> {
    name: String,
    policy: OverlapPolicy,
    members: Vec<Member>,
    _aggregate: PhantomData<fn() -> A>,
}

impl<A: Aggregate> AggregateBuilder<A> {
    #[must_use]
    pub fn member<F>(mut self, name: impl Into<String>, fetcher: F) -> Self
    where
        F: Fetcher<Output = Payload> + 'static,
    {
        self.members.push(Member {
            name: name.into(),
            fetcher: Arc::new(fetcher),
        });
        self
    }

    #[must_use]
    pub const fn policy(mut self, policy: OverlapPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn build(self) -> AggregatingController<A> {
        let member_names = self.members.iter().map(|m| m.name.clone()).collect();
        let join = JoinFetcher {
            name: self.name,
            members: self.members,
            _aggregate: PhantomData,
        };
        AggregatingController {
            member_names,
            controller: PollingController::with_policy(join, self.policy),
        }
    }
}

/// Polling controller over a fail-fast join of named fetchers
#[derive(Debug)]
pub struct AggregatingController<A> {
    member_names: Vec<String>,
    controller: PollingController<A>,
}

impl<A: Aggregate> AggregatingController<A> {
    #[must_use]
    pub fn builder(name: impl Into<String>) -> AggregateBuilder<A> {
        AggregateBuilder {
            name: name.into(),
            policy: OverlapPolicy::default(),
            members: Vec::new(),
            _aggregate: PhantomData,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.controller.name()
    }

    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.member_names
    }

    /// Fetch every member concurrently and apply the joined result
    pub async fn load(&self) {
        self.controller.load().await;
    }

    pub async fn reload(&self) {
        self.controller.reload().await;
    }

    pub fn spawn_load(&self) -> JoinHandle<()> {
        self.controller.spawn_load()
    }

    #[must_use]
    pub fn snapshot(&self) -> FetchState<A> {
        self.controller.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FetchState<A>> {
        self.controller.subscribe()
    }

    #[must_use]
    pub fn is_polling(&self) -> bool {
        self.controller.is_polling()
    }

    pub fn start(&self, interval: Duration) {
        self.controller.start(interval);
    }

    pub fn stop(&self) {
        self.controller.stop();
    }
}

impl<A: Aggregate> Lifecycle for AggregatingController<A> {
    fn start(&self, interval: Duration) {
        Self::start(self, interval);
    }

    fn stop(&self) {
        Self::stop(self);
    }
}
