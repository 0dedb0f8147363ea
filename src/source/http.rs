//! HTTP status source for the kube-applier webserver

use super::{FetchError, StatusSource, decode_snapshot};
use crate::models::{Scope, Snapshot};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::StatusCode;
use std::time::Duration;
use url::Url;

/// Default request timeout when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches snapshots from `/api/v1/status[/{namespace}]`
pub struct HttpStatusSource {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpStatusSource {
    /// Create a new HTTP status source
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid API URL: {}", base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("API URL cannot be used as a base: {}", base_url);
        }
        if timeout.is_zero() {
            anyhow::bail!("Request timeout must be greater than zero");
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        tracing::debug!(
            "Created HTTP status source for: {} (timeout {:?})",
            base_url,
            timeout
        );

        Ok(Self { client, base_url })
    }

    /// Resolve the endpoint URL for `scope`
    ///
    /// The namespace is pushed as a single path segment so it is
    /// percent-encoded rather than interpreted.
    pub fn endpoint(&self, scope: &Scope) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["api", "v1", "status"]);
            if let Scope::Namespace(namespace) = scope {
                segments.push(namespace);
            }
        }
        url
    }
}

#[async_trait]
impl StatusSource for HttpStatusSource {
    async fn fetch(&self, scope: &Scope) -> Result<Snapshot, FetchError> {
        let url = self.endpoint(scope);
        tracing::debug!("Fetching Waybill status from: {}", url);

        let resp = self.client.get(url.clone()).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::network(format!("request to {} timed out", url))
            } else {
                FetchError::network(format!("request to {} failed: {}", url, e))
            }
        })?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            if let Scope::Namespace(namespace) = scope {
                return Err(FetchError::not_found(namespace.clone()));
            }
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = match body.trim() {
                "" => status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
                text => text.to_string(),
            };
            tracing::warn!("Status request to {} failed: {}", url, status);
            return Err(FetchError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| FetchError::network(format!("failed to read response body: {}", e)))?;

        let snapshot = decode_snapshot(scope, &body, Utc::now())?;
        tracing::debug!(
            "Fetched {} Waybill(s) for scope {}",
            snapshot.len(),
            scope
        );

        Ok(snapshot)
    }

    fn source_type(&self) -> &'static str {
        "http"
    }

    fn describe(&self) -> String {
        self.base_url.to_string()
    }
}

/// Parse duration string (e.g., "30s", "1m", "5s")
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();
    if let Some(ms) = s.strip_suffix("ms") {
        let ms: u64 = ms.parse().context("Invalid duration")?;
        Ok(Duration::from_millis(ms))
    } else if let Some(secs) = s.strip_suffix('s') {
        let secs: u64 = secs.parse().context("Invalid duration")?;
        Ok(Duration::from_secs(secs))
    } else if let Some(mins) = s.strip_suffix('m') {
        let mins: u64 = mins.parse().context("Invalid duration")?;
        let secs = mins.checked_mul(60).context("Duration too large")?;
        Ok(Duration::from_secs(secs))
    } else if let Some(hours) = s.strip_suffix('h') {
        let hours: u64 = hours.parse().context("Invalid duration")?;
        let secs = hours.checked_mul(3600).context("Duration too large")?;
        Ok(Duration::from_secs(secs))
    } else {
        anyhow::bail!("Invalid duration format: {}", s)
    }
}
