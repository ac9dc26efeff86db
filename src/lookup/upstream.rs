//! Client for the open-data datastore search endpoint.
//!
//! # Responsibilities
//! - Build the search URL (resource id, query, limit)
//! - Issue exactly one GET per lookup, bounded by the configured timeout
//! - Classify transport failures so the handler can pick a status code
//!
//! The upstream answers with a CKAN-style body:
//! `{"success": true, "result": {"records": [...]}}`.

use std::time::Duration;

use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::config::UpstreamConfig;
use crate::lookup::plate::PlateQuery;

/// Failures of the single upstream attempt.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// No complete response within the configured timeout.
    #[error("upstream timed out after {0} seconds")]
    Timeout(u64),

    /// The upstream answered with a non-2xx status.
    #[error("upstream responded with {0}")]
    Status(StatusCode),

    /// The request could not be sent or no response arrived.
    #[error("no response from upstream: {0}")]
    NoResponse(String),

    /// The upstream answered but flagged the query as failed.
    #[error("upstream reported failure")]
    Rejected,

    /// The upstream answered 2xx with a body we could not decode.
    #[error("malformed upstream body: {0}")]
    Malformed(String),
}

/// Errors building the client at startup.
#[derive(Debug, Error)]
pub enum ClientSetupError {
    #[error("invalid upstream URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Body returned by the datastore search action.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    #[serde(default)]
    pub result: Option<SearchResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub records: Vec<Value>,
}

/// Upstream datastore client. Cheap to clone; the connection pool is shared.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    endpoint: Url,
    resource_id: String,
    limit: u32,
    timeout: Duration,
}

impl UpstreamClient {
    /// Create a client from upstream configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, ClientSetupError> {
        let endpoint = Url::parse(&config.base_url)?;
        let timeout = Duration::from_secs(config.timeout_secs);

        let mut builder = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            endpoint,
            resource_id: config.resource_id.clone(),
            limit: config.limit,
            timeout,
        })
    }

    /// The full search URL for a plate.
    pub fn search_url(&self, plate: &PlateQuery) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("resource_id", &self.resource_id)
            .append_pair("q", plate.as_str())
            .append_pair("limit", &self.limit.to_string());
        url
    }

    /// Run the search and return the matching records.
    ///
    /// An empty vector means the upstream succeeded but knows no such plate.
    pub async fn search(&self, plate: &PlateQuery) -> Result<Vec<Value>, UpstreamError> {
        let url = self.search_url(plate);
        tracing::debug!(url = %url, "Querying upstream");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        let payload: SearchResponse = response.json().await.map_err(|e| self.classify(e))?;
        if !payload.success {
            return Err(UpstreamError::Rejected);
        }

        Ok(payload.result.map(|r| r.records).unwrap_or_default())
    }

    fn classify(&self, err: reqwest::Error) -> UpstreamError {
        if err.is_timeout() {
            UpstreamError::Timeout(self.timeout.as_secs())
        } else if err.is_decode() {
            UpstreamError::Malformed(err.to_string())
        } else {
            UpstreamError::NoResponse(err.to_string())
        }
    }
}
