use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::locale::Locale;
use crate::report::AnalyticsReport;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Non-success status; carries the server's `details` text or a
    /// status-based fallback.
    #[error("{message}")]
    Server {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// Fetches reports from a running aggregator endpoint.
#[derive(Clone)]
pub struct DashboardClient {
    client: Client,
    url: String,
    locale: Locale,
}

impl DashboardClient {
    pub fn new(url: impl Into<String>, locale: Locale) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!("ga4-dashboard-cli/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self::with_client(client, url, locale))
    }

    pub fn with_client(client: Client, url: impl Into<String>, locale: Locale) -> Self {
        Self {
            client,
            url: url.into(),
            locale,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch_report(&self) -> Result<AnalyticsReport, FetchError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let details = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| body.get("details").and_then(Value::as_str).map(str::to_string));
            let message = details.unwrap_or_else(|| status_message(self.locale, status.as_u16()));
            return Err(FetchError::Server { status, message });
        }

        Ok(response.json().await?)
    }
}

fn status_message(locale: Locale, status: u16) -> String {
    match locale {
        Locale::Es => format!("El servidor respondió con el estado {status}"),
        Locale::En => format!("Server responded with status {status}"),
    }
}
