//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use carport_core::entities::{Invoice, User};

use super::responses::{InvoiceResponse, UserResponse};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            avatar_url: user.avatar_url.clone(),
            role: user.role,
            active: user.active,
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Invoice Mappers
// ============================================================================

impl From<&Invoice> for InvoiceResponse {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: invoice.id.to_string(),
            number: invoice.number.clone(),
            country_code: invoice.country_code.clone(),
            customer_name: invoice.customer_name.clone(),
            amount_cents: invoice.amount_cents,
            created_by: invoice.created_by.to_string(),
            created_at: invoice.created_at,
        }
    }
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        Self::from(&invoice)
    }
}
