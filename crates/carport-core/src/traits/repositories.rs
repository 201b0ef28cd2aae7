//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::entities::{Invoice, RefreshToken, User};
use crate::error::DomainError;
use crate::value_objects::UserRole;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Count all users
    async fn count(&self) -> RepoResult<i64>;

    /// Create a new user
    async fn create(&self, user: &User) -> RepoResult<()>;

    /// Update provider linkage and profile fields (google_id, name, avatar_url)
    async fn update_identity(&self, user: &User) -> RepoResult<()>;

    /// Update a user's role
    async fn update_role(&self, id: Uuid, role: UserRole) -> RepoResult<()>;

    /// Activate or deactivate a user
    async fn set_active(&self, id: Uuid, active: bool) -> RepoResult<()>;

    /// List all users, newest first
    async fn list(&self) -> RepoResult<Vec<User>>;
}

// ============================================================================
// Refresh Token Repository
// ============================================================================

#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Persist a newly issued token record
    async fn create(&self, token: &RefreshToken) -> RepoResult<()>;

    /// Find a token record by its secret hash
    async fn find_by_hash(&self, token_hash: &str) -> RepoResult<Option<RefreshToken>>;

    /// Atomically retire the old token and persist its replacement
    ///
    /// Exactly one caller can rotate a given token. The old record must
    /// still be live (not revoked, not expired) at commit time; otherwise
    /// the whole operation fails with `DomainError::RefreshTokenInvalid`
    /// and the replacement is not persisted.
    async fn rotate(&self, old_hash: &str, replacement: &RefreshToken) -> RepoResult<()>;

    /// Revoke a single token; succeeds even if already revoked or unknown
    async fn revoke(&self, token_hash: &str) -> RepoResult<()>;

    /// Revoke every live token belonging to a user, returning how many
    async fn revoke_all_for_user(&self, user_id: Uuid) -> RepoResult<u64>;
}

// ============================================================================
// Sequence Repository
// ============================================================================

#[async_trait]
pub trait SequenceRepository: Send + Sync {
    /// Reserve the next counter value for a partition and day
    ///
    /// Starts at 1 for the first call on a given (partition, day) pair and
    /// increments by exactly one per call, with no gaps or duplicates under
    /// concurrency.
    async fn reserve_next(&self, partition_code: &str, day: NaiveDate) -> RepoResult<i64>;
}

// ============================================================================
// Invoice Repository
// ============================================================================

/// Pagination options for invoice queries
#[derive(Debug, Clone, Default)]
pub struct InvoiceQuery {
    pub limit: i64,
}

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Create a new invoice
    ///
    /// Fails with `DomainError::DuplicateNumber` when the document number
    /// is already taken.
    async fn create(&self, invoice: &Invoice) -> RepoResult<()>;

    /// Find invoice by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Invoice>>;

    /// List invoices, newest first
    async fn list(&self, query: InvoiceQuery) -> RepoResult<Vec<Invoice>>;
}
