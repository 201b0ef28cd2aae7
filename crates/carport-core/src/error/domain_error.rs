//! Domain errors - error types for the domain layer

use thiserror::Error;
use uuid::Uuid;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Invoice not found: {0}")]
    InvoiceNotFound(Uuid),

    // =========================================================================
    // Authentication Errors
    // =========================================================================
    #[error("Identity assertion could not be verified")]
    InvalidAssertion,

    #[error("Refresh token is invalid")]
    RefreshTokenInvalid,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Identity already linked to another account")]
    IdentityAlreadyLinked,

    #[error("Document number already exists: {0}")]
    DuplicateNumber(String),

    // =========================================================================
    // Upstream Errors
    // =========================================================================
    #[error("Identity provider unavailable: {0}")]
    IdentityProviderUnavailable(String),

    #[error("Identity provider timed out")]
    IdentityProviderTimeout,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::InvoiceNotFound(_) => "UNKNOWN_INVOICE",

            // Authentication
            Self::InvalidAssertion => "INVALID_ASSERTION",
            Self::RefreshTokenInvalid => "REFRESH_INVALID",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::IdentityAlreadyLinked => "IDENTITY_ALREADY_LINKED",
            Self::DuplicateNumber(_) => "DUPLICATE_NUMBER",

            // Upstream
            Self::IdentityProviderUnavailable(_) => "UPSTREAM_UNAVAILABLE",
            Self::IdentityProviderTimeout => "UPSTREAM_TIMEOUT",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_) | Self::InvoiceNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }

    /// Check if this error means the caller holds no valid credential
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::InvalidAssertion | Self::RefreshTokenInvalid)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists | Self::IdentityAlreadyLinked | Self::DuplicateNumber(_)
        )
    }

    /// Check if this error came from an unreachable upstream dependency
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::IdentityProviderUnavailable(_) | Self::IdentityProviderTimeout
        )
    }
}
