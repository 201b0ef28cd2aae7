//! Identity verification port
//!
//! The service layer hands an opaque assertion (a Google ID token in
//! production) to this trait and receives the verified identity claims.
//! The HTTP implementation lives in the common crate; tests substitute
//! an in-memory verifier.

use async_trait::async_trait;

use crate::traits::repositories::RepoResult;

/// Claims extracted from a successfully verified assertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    /// Stable subject identifier at the provider (the `sub` claim)
    pub subject_id: String,
    pub email: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verify an identity assertion and return its claims
    ///
    /// Returns `DomainError::InvalidAssertion` when the assertion is
    /// malformed, expired, or issued for a different audience, and an
    /// upstream error when the provider cannot be reached in time.
    async fn verify(&self, assertion: &str) -> RepoResult<VerifiedIdentity>;
}
