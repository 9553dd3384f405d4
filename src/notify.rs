//! Decision reporting to the external automation webhook.
//!
//! Delivery is best-effort by contract: the notifier has no effect on the
//! page's workflow state, and a failed delivery is logged and returned as a
//! typed error that the engine never escalates.

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::WebhookConfig;
use crate::error::ApprovalError;
use crate::workflow::Action;

pub const WEBHOOK_TOKEN_HEADER: &str = "X-Automation-Webhook-Token";

/// Outbound decision sink.
#[async_trait]
pub trait DecisionSink: Send + Sync {
    async fn notify(
        &self,
        action: Action,
        page_id: &str,
        space_key: &str,
    ) -> Result<(), ApprovalError>;
}

/// Posts `{pageId, spaceKey, buttonType}` to a fixed automation endpoint,
/// authenticated with a pre-shared token injected at construction.
pub struct WebhookNotifier {
    http: reqwest::Client,
    url: String,
    token: String,
}

impl WebhookNotifier {
    pub fn new(config: &WebhookConfig) -> Result<Self, ApprovalError> {
        let token = config.token.clone().ok_or_else(|| ApprovalError::Config {
            message: "webhook token is not configured".to_string(),
        })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            url: config.url.clone(),
            token,
        })
    }
}

#[async_trait]
impl DecisionSink for WebhookNotifier {
    async fn notify(
        &self,
        action: Action,
        page_id: &str,
        space_key: &str,
    ) -> Result<(), ApprovalError> {
        let body = json!({
            "pageId": page_id,
            "spaceKey": space_key,
            "buttonType": action.as_str(),
        });

        debug!(page_id, button_type = action.as_str(), "sending decision webhook");

        let response = self
            .http
            .post(&self.url)
            .header(WEBHOOK_TOKEN_HEADER, &self.token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                page_id,
                button_type = action.as_str(),
                status = status.as_u16(),
                "automation webhook rejected the decision report"
            );
            return Err(ApprovalError::NotificationFailed {
                status: status.as_u16(),
            });
        }

        info!(page_id, button_type = action.as_str(), "decision reported to automation webhook");
        Ok(())
    }
}
