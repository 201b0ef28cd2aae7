//! Service context - dependency container for services
//!
//! Holds the repositories, the identity verifier, and the token signer that
//! services need.

use std::sync::Arc;

use carport_common::auth::JwtService;
use carport_core::traits::{
    IdentityVerifier, InvoiceRepository, RefreshTokenRepository, SequenceRepository,
    UserRepository,
};
use carport_db::PgPool;

/// Default refresh token lifetime in days
const DEFAULT_REFRESH_TTL_DAYS: i64 = 30;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - The identity-assertion verifier
/// - JWT service for access tokens
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    refresh_token_repo: Arc<dyn RefreshTokenRepository>,
    invoice_repo: Arc<dyn InvoiceRepository>,
    sequence_repo: Arc<dyn SequenceRepository>,

    // External identity provider
    identity_verifier: Arc<dyn IdentityVerifier>,

    // Services
    jwt_service: Arc<JwtService>,

    // Policy
    refresh_ttl_days: i64,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        user_repo: Arc<dyn UserRepository>,
        refresh_token_repo: Arc<dyn RefreshTokenRepository>,
        invoice_repo: Arc<dyn InvoiceRepository>,
        sequence_repo: Arc<dyn SequenceRepository>,
        identity_verifier: Arc<dyn IdentityVerifier>,
        jwt_service: Arc<JwtService>,
        refresh_ttl_days: i64,
    ) -> Self {
        Self {
            pool,
            user_repo,
            refresh_token_repo,
            invoice_repo,
            sequence_repo,
            identity_verifier,
            jwt_service,
            refresh_ttl_days,
        }
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the refresh token repository
    pub fn refresh_token_repo(&self) -> &dyn RefreshTokenRepository {
        self.refresh_token_repo.as_ref()
    }

    /// Get the invoice repository
    pub fn invoice_repo(&self) -> &dyn InvoiceRepository {
        self.invoice_repo.as_ref()
    }

    /// Get the sequence repository
    pub fn sequence_repo(&self) -> &dyn SequenceRepository {
        self.sequence_repo.as_ref()
    }

    // === External Services ===

    /// Get the identity verifier
    pub fn identity_verifier(&self) -> &dyn IdentityVerifier {
        self.identity_verifier.as_ref()
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    // === Policy ===

    /// Refresh token lifetime in days
    pub fn refresh_ttl_days(&self) -> i64 {
        self.refresh_ttl_days
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("repositories", &"...")
            .field("refresh_ttl_days", &self.refresh_ttl_days)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    refresh_token_repo: Option<Arc<dyn RefreshTokenRepository>>,
    invoice_repo: Option<Arc<dyn InvoiceRepository>>,
    sequence_repo: Option<Arc<dyn SequenceRepository>>,
    identity_verifier: Option<Arc<dyn IdentityVerifier>>,
    jwt_service: Option<Arc<JwtService>>,
    refresh_ttl_days: Option<i64>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            user_repo: None,
            refresh_token_repo: None,
            invoice_repo: None,
            sequence_repo: None,
            identity_verifier: None,
            jwt_service: None,
            refresh_ttl_days: None,
        }
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn refresh_token_repo(mut self, repo: Arc<dyn RefreshTokenRepository>) -> Self {
        self.refresh_token_repo = Some(repo);
        self
    }

    pub fn invoice_repo(mut self, repo: Arc<dyn InvoiceRepository>) -> Self {
        self.invoice_repo = Some(repo);
        self
    }

    pub fn sequence_repo(mut self, repo: Arc<dyn SequenceRepository>) -> Self {
        self.sequence_repo = Some(repo);
        self
    }

    pub fn identity_verifier(mut self, verifier: Arc<dyn IdentityVerifier>) -> Self {
        self.identity_verifier = Some(verifier);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn refresh_ttl_days(mut self, days: i64) -> Self {
        self.refresh_ttl_days = Some(days);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.pool
                .ok_or_else(|| super::error::ServiceError::validation("pool is required"))?,
            self.user_repo
                .ok_or_else(|| super::error::ServiceError::validation("user_repo is required"))?,
            self.refresh_token_repo.ok_or_else(|| {
                super::error::ServiceError::validation("refresh_token_repo is required")
            })?,
            self.invoice_repo
                .ok_or_else(|| super::error::ServiceError::validation("invoice_repo is required"))?,
            self.sequence_repo
                .ok_or_else(|| super::error::ServiceError::validation("sequence_repo is required"))?,
            self.identity_verifier.ok_or_else(|| {
                super::error::ServiceError::validation("identity_verifier is required")
            })?,
            self.jwt_service
                .ok_or_else(|| super::error::ServiceError::validation("jwt_service is required"))?,
            self.refresh_ttl_days.unwrap_or(DEFAULT_REFRESH_TTL_DAYS),
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
