//! Credentials for the GA4 Data API.

pub mod service_account;

use async_trait::async_trait;
use thiserror::Error;

pub use service_account::ServiceAccountAuth;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("GA4 service account credentials are not configured")]
    MissingCredentials,
    #[error("failed to sign service account assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
    #[error("token request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("token endpoint returned {status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Supplies bearer tokens for upstream requests.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, AuthError>;
}

/// Fixed token, for tests and for upstreams that take a pre-issued token.
pub struct StaticToken(pub String);

#[async_trait]
impl TokenProvider for StaticToken {
    async fn access_token(&self) -> Result<String, AuthError> {
        Ok(self.0.clone())
    }
}
