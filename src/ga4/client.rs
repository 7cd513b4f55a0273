use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use super::types::{RunReportRequest, RunReportResponse};
use crate::auth::{AuthError, ServiceAccountAuth, TokenProvider};
use crate::config::Ga4Config;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),
    #[error("runReport request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("runReport returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Read-only access to a GA4 property's reporting data.
#[async_trait]
pub trait ReportClient: Send + Sync {
    async fn run_report(&self, request: &RunReportRequest) -> Result<RunReportResponse, ReportError>;
}

/// [`ReportClient`] backed by the GA4 Data API over HTTPS.
#[derive(Clone)]
pub struct Ga4Client {
    client: Client,
    endpoint: String,
    tokens: Arc<dyn TokenProvider>,
}

impl Ga4Client {
    pub fn new(
        client: Client,
        api_base_url: &str,
        property_id: &str,
        tokens: Arc<dyn TokenProvider>,
    ) -> Self {
        let endpoint = format!(
            "{}/properties/{}:runReport",
            api_base_url.trim_end_matches('/'),
            property_id
        );
        Self {
            client,
            endpoint,
            tokens,
        }
    }

    /// Build the HTTP client and service-account token source from config.
    pub fn from_config(config: &Ga4Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("ga4-dashboard/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build HTTP client for GA4: {e}"))?;

        let auth = ServiceAccountAuth::new(
            config.credentials.as_ref(),
            config.token_uri.clone(),
            client.clone(),
        )?;

        Ok(Self::new(
            client,
            &config.api_base_url,
            &config.property_id,
            Arc::new(auth),
        ))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ReportClient for Ga4Client {
    async fn run_report(&self, request: &RunReportRequest) -> Result<RunReportResponse, ReportError> {
        let token = self.tokens.access_token().await?;

        debug!(endpoint = %self.endpoint, "Running GA4 report");
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReportError::Status { status, body });
        }

        Ok(response.json().await?)
    }
}
