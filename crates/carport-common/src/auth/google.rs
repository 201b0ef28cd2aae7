//! Google ID token verification
//!
//! Calls Google's tokeninfo endpoint over HTTPS and checks the audience
//! against the configured OAuth client ID. Signature and expiry checking is
//! delegated to Google, which answers 4xx for any token it will not vouch
//! for. Provider outages fail closed.

use async_trait::async_trait;
use carport_core::{DomainError, IdentityVerifier, RepoResult, VerifiedIdentity};
use serde::Deserialize;
use std::time::Duration;
use tracing::{instrument, warn};

use crate::config::GoogleConfig;
use crate::error::AppError;

/// Claims subset returned by the tokeninfo endpoint
///
/// tokeninfo serializes every claim as a string, including booleans.
#[derive(Debug, Deserialize)]
struct TokenInfo {
    aud: String,
    sub: String,
    email: String,
    #[serde(default)]
    email_verified: String,
    name: Option<String>,
    picture: Option<String>,
}

/// Identity verifier backed by Google's tokeninfo endpoint
#[derive(Debug, Clone)]
pub struct GoogleTokenVerifier {
    http_client: reqwest::Client,
    client_id: String,
    tokeninfo_url: String,
}

impl GoogleTokenVerifier {
    /// Create a verifier with a bounded request timeout
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed
    pub fn new(config: &GoogleConfig) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.verify_timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            client_id: config.client_id.clone(),
            tokeninfo_url: config.tokeninfo_url.clone(),
        })
    }

    fn check_claims(&self, info: TokenInfo) -> RepoResult<VerifiedIdentity> {
        if info.aud != self.client_id {
            warn!(aud = %info.aud, "ID token issued for a different audience");
            return Err(DomainError::InvalidAssertion);
        }

        // Upserts key on email, so an unverified one is not acceptable
        if info.email_verified != "true" {
            return Err(DomainError::InvalidAssertion);
        }

        Ok(VerifiedIdentity {
            subject_id: info.sub,
            email: info.email,
            name: info.name,
            avatar_url: info.picture,
        })
    }
}

#[async_trait]
impl IdentityVerifier for GoogleTokenVerifier {
    #[instrument(skip(self, assertion))]
    async fn verify(&self, assertion: &str) -> RepoResult<VerifiedIdentity> {
        let response = self
            .http_client
            .get(&self.tokeninfo_url)
            .query(&[("id_token", assertion)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DomainError::IdentityProviderTimeout
                } else {
                    DomainError::IdentityProviderUnavailable(e.to_string())
                }
            })?;

        let status = response.status();

        // Google answers 4xx for malformed, expired, or revoked tokens
        if status.is_client_error() {
            return Err(DomainError::InvalidAssertion);
        }
        if !status.is_success() {
            return Err(DomainError::IdentityProviderUnavailable(format!(
                "tokeninfo returned {status}"
            )));
        }

        let info: TokenInfo = response
            .json()
            .await
            .map_err(|e| DomainError::IdentityProviderUnavailable(e.to_string()))?;

        self.check_claims(info)
    }
}
