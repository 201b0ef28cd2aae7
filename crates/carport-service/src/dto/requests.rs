//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and, where inputs need checking,
//! `Validate`.

use carport_core::UserRole;
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// Google sign-in request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GoogleLoginRequest {
    #[validate(length(min = 1, message = "ID token must not be empty"))]
    pub id_token: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token must not be empty"))]
    pub refresh_token: String,
}

/// Logout request (optional refresh token to revoke)
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}

// ============================================================================
// User Administration Requests
// ============================================================================

/// Change a user's role
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserRoleRequest {
    pub role: UserRole,
}

/// Activate or deactivate a user account
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetUserActiveRequest {
    pub active: bool,
}

// ============================================================================
// Invoice Requests
// ============================================================================

/// Create invoice request
///
/// The document number is allocated server-side; clients only name the
/// destination partition.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    /// Destination country code (2-3 letters, case-insensitive)
    pub country_code: String,

    #[validate(length(min = 1, max = 200, message = "Customer name must be 1-200 characters"))]
    pub customer_name: String,

    #[validate(range(min = 0, message = "Amount must not be negative"))]
    pub amount_cents: i64,
}

/// Query parameters for listing invoices
#[derive(Debug, Clone, Deserialize, Default)]
pub struct InvoiceListQuery {
    pub limit: Option<i64>,
}
