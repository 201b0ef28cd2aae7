//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs
//!
//! All wire field names are camelCase, the format the admin frontend speaks.

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    CreateInvoiceRequest, GoogleLoginRequest, InvoiceListQuery, LogoutRequest,
    RefreshTokenRequest, SetUserActiveRequest, UpdateUserRoleRequest,
};

// Re-export commonly used response types
pub use responses::{
    AuthResponse, HealthChecks, HealthResponse, InvoiceResponse, ReadinessResponse,
    RefreshResponse, SuccessResponse, UserResponse,
};
