use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use super::{AuthError, TokenProvider};
use crate::config::ServiceAccountCredentials;

pub const ANALYTICS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/analytics.readonly";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Upper bound on how long a token is trusted, whatever the endpoint says.
const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(3600);
/// Tokens are refreshed this long before Google says they expire.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

struct SigningIdentity {
    client_email: String,
    key: EncodingKey,
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// Exchanges a signed service-account assertion for an OAuth access token
/// and caches it until shortly before expiry.
#[derive(Clone)]
pub struct ServiceAccountAuth {
    identity: Option<Arc<SigningIdentity>>,
    token_uri: String,
    client: Client,
    cached: Arc<RwLock<Option<CachedToken>>>,
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "TokenResponse::default_expires_in")]
    expires_in: u64,
}

impl TokenResponse {
    const fn default_expires_in() -> u64 {
        3600
    }
}

impl ServiceAccountAuth {
    /// Missing credentials are accepted here and reported on first use; a
    /// private key that is present but not valid PEM is rejected immediately.
    pub fn new(
        credentials: Option<&ServiceAccountCredentials>,
        token_uri: impl Into<String>,
        client: Client,
    ) -> Result<Self, AuthError> {
        let identity = credentials
            .map(|creds| -> Result<_, AuthError> {
                let key = EncodingKey::from_rsa_pem(creds.private_key.as_bytes())?;
                Ok(Arc::new(SigningIdentity {
                    client_email: creds.client_email.clone(),
                    key,
                }))
            })
            .transpose()?;

        Ok(Self {
            identity,
            token_uri: token_uri.into(),
            client,
            cached: Arc::new(RwLock::new(None)),
        })
    }

    fn sign_assertion(&self, identity: &SigningIdentity) -> Result<String, AuthError> {
        let iat = chrono::Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: &identity.client_email,
            scope: ANALYTICS_READONLY_SCOPE,
            aud: &self.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };
        Ok(encode(&Header::new(Algorithm::RS256), &claims, &identity.key)?)
    }

    async fn request_token(&self, identity: &SigningIdentity) -> Result<CachedToken, AuthError> {
        let assertion = self.sign_assertion(identity)?;
        let response = self
            .client
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Rejected { status, body });
        }

        let token: TokenResponse = response.json().await?;
        let lifetime = token_lifetime(token.expires_in);
        Ok(CachedToken {
            value: token.access_token,
            expires_at: Instant::now() + lifetime,
        })
    }
}

fn token_lifetime(expires_in: u64) -> Duration {
    Duration::from_secs(expires_in)
        .min(MAX_TOKEN_LIFETIME)
        .saturating_sub(EXPIRY_MARGIN)
}

#[async_trait]
impl TokenProvider for ServiceAccountAuth {
    async fn access_token(&self) -> Result<String, AuthError> {
        let identity = self
            .identity
            .as_ref()
            .ok_or(AuthError::MissingCredentials)?;

        {
            let guard = self.cached.read().await;
            if let Some(token) = guard.as_ref() {
                if token.expires_at > Instant::now() {
                    return Ok(token.value.clone());
                }
            }
        }

        let mut guard = self.cached.write().await;
        // Another request may have refreshed while we waited for the lock.
        if let Some(token) = guard.as_ref() {
            if token.expires_at > Instant::now() {
                return Ok(token.value.clone());
            }
        }

        debug!(client_email = %identity.client_email, "Requesting GA4 access token");
        let fresh = self.request_token(identity).await?;
        let value = fresh.value.clone();
        *guard = Some(fresh);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_credentials_fail_on_first_use() {
        let auth = ServiceAccountAuth::new(None, "http://127.0.0.1:9/token", Client::new())
            .expect("construction without credentials succeeds");
        let err = auth.access_token().await.unwrap_err();
        assert!(matches!(err, AuthError::MissingCredentials));
    }

    #[test]
    fn token_lifetime_keeps_a_margin_and_a_ceiling() {
        assert_eq!(token_lifetime(3599), Duration::from_secs(3539));
        assert_eq!(token_lifetime(30), Duration::ZERO);
        assert_eq!(token_lifetime(u64::MAX), Duration::from_secs(3540));
    }

    #[test]
    fn malformed_private_key_is_rejected_up_front() {
        let creds = ServiceAccountCredentials {
            client_email: "svc@example.iam.gserviceaccount.com".to_string(),
            private_key: "not a pem".to_string(),
        };
        let result = ServiceAccountAuth::new(Some(&creds), "http://127.0.0.1:9/token", Client::new());
        assert!(matches!(result, Err(AuthError::Signing(_))));
    }
}
