//! HTTP client for the Density occupancy API

use std::time::Duration;

use async_trait::async_trait;
use occupancy_types::{Credential, FetchFailure, Reading};
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};
use crate::source::OccupancySource;

/// Default Density API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.density.io/v2";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Density API client.
///
/// Issues `GET {base}/spaces/{space_id}/count` with a bearer token. One
/// connection pool is shared by every fetch.
pub struct DensityClient {
    client: Client,
    base_url: Url,
    credential: Credential,
}

impl DensityClient {
    /// Create a new Density client
    pub fn new(credential: Credential, base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot be used as a base".into(),
            });
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            credential,
        })
    }

    /// URL of the count endpoint for `space_id`.
    ///
    /// The identifier is appended as a single, percent-encoded path segment.
    pub fn count_url(&self, space_id: &str) -> Result<Url, FetchFailure> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| FetchFailure::Transport(format!("cannot build URL from {}", self.base_url)))?
            .pop_if_empty()
            .extend(["spaces", space_id, "count"]);
        Ok(url)
    }

    async fn fetch_count(&self, token: &str, space_id: &str) -> Result<u64, FetchFailure> {
        let url = self.count_url(space_id)?;
        debug!(space_id, %url, "fetching occupancy count");

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| FetchFailure::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| FetchFailure::Transport(e.to_string()))?;

        extract_count(&body)
    }
}

#[async_trait]
impl OccupancySource for DensityClient {
    async fn fetch(&self, space_id: &str) -> Reading {
        let Some(token) = self.credential.token() else {
            return FetchFailure::MissingToken.into();
        };

        let space_id = space_id.trim();
        if space_id.is_empty() {
            debug!("skipping room without a space id");
            return FetchFailure::EmptySpaceId.into();
        }

        match self.fetch_count(token, space_id).await {
            Ok(count) => {
                debug!(space_id, count, "occupancy count received");
                Reading::Count(count)
            }
            Err(failure) => {
                warn!(space_id, ?failure, "occupancy fetch failed");
                failure.into()
            }
        }
    }
}

/// Pull a non-negative integer `count` out of a response body.
fn extract_count(body: &Value) -> Result<u64, FetchFailure> {
    match body.get("count") {
        Some(value) => value.as_u64().ok_or_else(|| {
            FetchFailure::MalformedResponse(format!(
                "`count` is not a non-negative integer: {}",
                value
            ))
        }),
        None => Err(FetchFailure::MalformedResponse(
            "missing field `count`".to_string(),
        )),
    }
}
