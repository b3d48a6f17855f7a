//! Thin request/response wrapper around `reqwest` for the monitoring backend.
//!
//! Every call resolves its path against the configured base address, always
//! sends `Content-Type: application/json`, and classifies the response into a
//! [`Payload`] or an [`Error`]. Nothing is retried or cached here.

use crate::config::{self, ClientConfig};
use crate::error::{Error, Result};
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Decoded response body.
///
/// Upstream payloads are loosely typed, so callers get the JSON value as-is,
/// or the raw text when the body is not JSON.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Payload {
    /// `204` or an empty body
    #[default]
    Empty,
    Json(Value),
    /// Non-empty body that failed to parse as JSON
    Text(String),
}

impl Payload {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Field `key` of an object payload
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_json().and_then(|value| value.get(key))
    }

    /// String field `key` of an object payload
    #[must_use]
    pub fn str_field(&self, key: &str) -> Option<String> {
        self.get(key).and_then(Value::as_str).map(str::to_string)
    }

    /// Array under `key`, or an empty list when the payload lacks it
    #[must_use]
    pub fn list(&self, key: &str) -> Vec<Value> {
        self.get(key)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }

    /// The payload itself as a list, or empty when it is not an array
    #[must_use]
    pub fn items(&self) -> Vec<Value> {
        self.as_json()
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }
}

/// Ordered query parameters, serialized as `key=value` pairs in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(Vec<(String, String)>);

impl Query {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.0.push((key.into(), value.to_string()));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }
}

/// Stateless client bound to one base address. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// Create a client for `config`
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the underlying HTTP client cannot be built
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    /// Create a client for the process-wide config
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the config cannot be resolved or the client
    /// cannot be built
    pub fn from_global() -> Result<Self> {
        Self::new(config::global()?)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path`
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Issue one request and classify the response.
    ///
    /// `query` is only sent for `GET`. For every other verb the body is sent
    /// as JSON, `{}` when `body` is `None`, except `DELETE` which has none.
    ///
    /// # Errors
    ///
    /// `Error::Network` when the backend cannot be reached, `Error::HttpStatus`
    /// for non-2xx answers and `Error::Encode` when `body` fails to serialize.
    pub async fn request<B>(
        &self,
        path: &str,
        method: Method,
        body: Option<&B>,
        query: &Query,
    ) -> Result<Payload>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        debug!("{method} {url}");

        let mut builder = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if method == Method::GET {
            if !query.is_empty() {
                builder = builder.query(query.pairs());
            }
        } else if method != Method::DELETE {
            let encoded = match body {
                Some(body) => serde_json::to_vec(body)?,
                None => b"{}".to_vec(),
            };
            builder = builder.body(encoded);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await;
        classify(status, text.ok())
    }

    /// # Errors
    ///
    /// See [`HttpClient::request`]
    pub async fn get(&self, path: &str, query: &Query) -> Result<Payload> {
        self.request::<Value>(path, Method::GET, None, query).await
    }

    /// # Errors
    ///
    /// See [`HttpClient::request`]
    pub async fn post<B>(&self, path: &str, body: &B) -> Result<Payload>
    where
        B: Serialize + ?Sized,
    {
        self.request(path, Method::POST, Some(body), &Query::new())
            .await
    }

    /// # Errors
    ///
    /// See [`HttpClient::request`]
    pub async fn put<B>(&self, path: &str, body: &B) -> Result<Payload>
    where
        B: Serialize + ?Sized,
    {
        self.request(path, Method::PUT, Some(body), &Query::new())
            .await
    }

    /// # Errors
    ///
    /// See [`HttpClient::request`]
    pub async fn delete(&self, path: &str) -> Result<Payload> {
        self.request::<Value>(path, Method::DELETE, None, &Query::new())
            .await
    }
}

/// Map a status and a best-effort body read onto the client contract.
///
/// A body that could not be read counts as empty.
pub(crate) fn classify(status: StatusCode, body: Option<String>) -> Result<Payload> {
    let text = body.unwrap_or_default();

    if !status.is_success() {
        return Err(Error::HttpStatus {
            status: status.as_u16(),
            body_text: text,
        });
    }

    if status == StatusCode::NO_CONTENT || text.is_empty() {
        return Ok(Payload::Empty);
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(value) => Ok(Payload::Json(value)),
        Err(_) => Ok(Payload::Text(text)),
    }
}
