use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error};

use super::types::{ContentStatePayload, SpaceStatesPayload};
use crate::config::RemoteConfig;
use crate::error::ApprovalError;

/// Remote content-state store operations.
///
/// This abstraction enables testing the transition engine without real
/// network calls, while preserving the exact surface the engine uses.
#[async_trait]
pub trait ContentStateApi: Send + Sync {
    /// `GET /content/{page_id}/state`. Read-only; never mutates state.
    async fn fetch_content_state(
        &self,
        page_id: &str,
    ) -> Result<ContentStatePayload, ApprovalError>;

    /// `GET /space/{space_key}/state/settings`. Space admins can
    /// reconfigure state options at any time, so callers fetch fresh per
    /// transition instead of caching.
    async fn fetch_space_states(
        &self,
        space_key: &str,
    ) -> Result<SpaceStatesPayload, ApprovalError>;

    /// `PUT /content/{page_id}/state?status=current` with body `{"id": …}`.
    /// Returns the updated state payload from the remote store.
    async fn put_content_state(
        &self,
        page_id: &str,
        state_id: &str,
    ) -> Result<serde_json::Value, ApprovalError>;
}

/// HTTP client for the content-management platform's REST surface.
///
/// Carries an already-authorized capability (the API token) injected at
/// construction; no authentication logic lives here. Every request runs
/// under the configured timeout, and a timeout classifies as a transport
/// failure.
#[derive(Debug, Clone)]
pub struct ContentStateClient {
    http: reqwest::Client,
    base_url: String,
}

impl ContentStateClient {
    pub fn new(config: &RemoteConfig) -> Result<Self, ApprovalError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.token {
            let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                ApprovalError::Config {
                    message: "remote API token contains invalid header characters".to_string(),
                }
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ContentStateApi for ContentStateClient {
    async fn fetch_content_state(
        &self,
        page_id: &str,
    ) -> Result<ContentStatePayload, ApprovalError> {
        let url = format!("{}/content/{}/state", self.base_url, page_id);
        debug!(page_id, "fetching current content state");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            error!(page_id, status = status.as_u16(), "content state read failed");
            return Err(ApprovalError::RemoteReadFailed {
                status: status.as_u16(),
            });
        }

        response
            .json::<ContentStatePayload>()
            .await
            .map_err(|err| ApprovalError::InvalidResponse {
                message: err.to_string(),
            })
    }

    async fn fetch_space_states(
        &self,
        space_key: &str,
    ) -> Result<SpaceStatesPayload, ApprovalError> {
        let url = format!("{}/space/{}/state/settings", self.base_url, space_key);
        debug!(space_key, "fetching space content state settings");

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(err) => {
                error!(space_key, error = %err, "space state settings request failed");
                return Err(ApprovalError::SpaceStatesUnavailable {
                    message: "request failed".to_string(),
                });
            }
        };

        let status = response.status();
        if !status.is_success() {
            error!(space_key, status = status.as_u16(), "space state settings read failed");
            return Err(ApprovalError::SpaceStatesUnavailable {
                message: format!("http {}", status.as_u16()),
            });
        }

        response
            .json::<SpaceStatesPayload>()
            .await
            .map_err(|err| ApprovalError::SpaceStatesUnavailable {
                message: err.to_string(),
            })
    }

    async fn put_content_state(
        &self,
        page_id: &str,
        state_id: &str,
    ) -> Result<serde_json::Value, ApprovalError> {
        let url = format!("{}/content/{}/state", self.base_url, page_id);
        debug!(page_id, state_id, "writing new content state");

        let response = self
            .http
            .put(&url)
            .query(&[("status", "current")])
            .json(&json!({ "id": state_id }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!(page_id, status = status.as_u16(), "content state write failed");
            return Err(ApprovalError::RemoteWriteFailed {
                status: status.as_u16(),
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|err| ApprovalError::InvalidResponse {
                message: err.to_string(),
            })
    }
}
