use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for the approval workflow core.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApprovalConfig {
    /// Content-management REST API settings
    pub remote: RemoteConfig,
    /// Automation webhook settings
    pub webhook: WebhookConfig,
    /// Observability settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteConfig {
    /// Base URL of the content-management REST API
    pub base_url: String,
    /// Pre-authorized API token (can be set via env var)
    pub token: Option<String>,
    /// Per-request timeout; a timeout classifies as a transport failure
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebhookConfig {
    /// Automation webhook endpoint
    pub url: String,
    /// Pre-shared webhook token. Required at startup: a missing token must
    /// fail configuration loading, never degrade to an unauthenticated call.
    pub token: Option<String>,
    /// Per-request timeout for webhook delivery
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (overridden by RUST_LOG)
    pub log_level: String,
}

impl Default for ApprovalConfig {
    fn default() -> Self {
        Self {
            remote: RemoteConfig {
                base_url: "http://localhost:1990/wiki/rest/api".to_string(),
                token: None, // Will be read from env var
                timeout_seconds: 10,
            },
            webhook: WebhookConfig {
                url: String::new(),
                token: None,
                timeout_seconds: 10,
            },
            observability: ObservabilityConfig {
                log_level: "info".to_string(),
            },
        }
    }
}

impl ApprovalConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration file (content-approval.toml)
    /// 3. Environment variables (prefixed with CONTENT_APPROVAL__)
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&ApprovalConfig::default())?);

        if Path::new("content-approval.toml").exists() {
            builder = builder.add_source(File::with_name("content-approval"));
        }

        builder = builder.add_source(
            Environment::with_prefix("CONTENT_APPROVAL")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let mut approval_config: ApprovalConfig = config
            .try_deserialize()
            .context("invalid content-approval configuration")?;

        // Special handling for the webhook secret - check the legacy env var
        // the automation setup already provisions
        if approval_config.webhook.token.is_none() {
            if let Ok(token) = std::env::var("CFT_WEBHOOK_API_KEY") {
                approval_config.webhook.token = Some(token);
            }
        }

        approval_config.validate()?;
        Ok(approval_config)
    }

    /// Startup validation. The webhook secret and endpoint are required;
    /// surfacing their absence here keeps business logic free of ad-hoc
    /// environment reads.
    pub fn validate(&self) -> Result<()> {
        if self.webhook.token.as_deref().map_or(true, str::is_empty) {
            bail!(
                "webhook token is not configured; set CONTENT_APPROVAL__WEBHOOK__TOKEN or CFT_WEBHOOK_API_KEY"
            );
        }
        if self.webhook.url.is_empty() {
            bail!("webhook url is not configured; set CONTENT_APPROVAL__WEBHOOK__URL");
        }
        if self.remote.base_url.is_empty() {
            bail!("remote base_url is not configured");
        }
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::debug!("loaded environment variables from .env file");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> ApprovalConfig {
        let mut config = ApprovalConfig::default();
        config.webhook.url = "https://automation.example.com/hook".to_string();
        config.webhook.token = Some("secret".to_string());
        config
    }

    #[test]
    fn default_config_fails_validation_without_webhook_token() {
        let err = ApprovalConfig::default().validate().unwrap_err();
        assert!(err.to_string().contains("webhook token"));
    }

    #[test]
    fn empty_webhook_token_is_rejected() {
        let mut config = configured();
        config.webhook.token = Some(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn configured_webhook_passes_validation() {
        assert!(configured().validate().is_ok());
    }
}
