use crate::error::Result;
use async_trait::async_trait;
use std::future::Future;

/// One named async read against the backend.
///
/// Implementations perform no retries, caching or error translation.
#[async_trait]
pub trait Fetcher: Send + Sync {
    type Output: Clone + Send + Sync;

    async fn fetch(&self) -> Result<Self::Output>;

    fn name(&self) -> &str;
}

/// Adapter turning an async closure into a [`Fetcher`]
pub struct FnFetcher<F> {
    name: String,
    op: F,
}

impl<F> std::fmt::Debug for FnFetcher<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnFetcher").field("name", &self.name).finish()
    }
}

/// Wrap `op` as a fetcher called `name`
pub fn fetcher_fn<F, Fut, T>(name: impl Into<String>, op: F) -> FnFetcher<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<T>> + Send,
    T: Clone + Send + Sync,
{
    FnFetcher {
        name: name.into(),
        op,
    }
}

#[async_trait]
impl<F, Fut, T> Fetcher for FnFetcher<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<T>> + Send,
    T: Clone + Send + Sync,
{
    type Output = T;

    async fn fetch(&self) -> Result<T> {
        (self.op)().await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
