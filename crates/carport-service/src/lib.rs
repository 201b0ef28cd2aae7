//! # carport-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use dto::{
    AuthResponse, CreateInvoiceRequest, GoogleLoginRequest, HealthResponse, InvoiceListQuery,
    InvoiceResponse, LogoutRequest, ReadinessResponse, RefreshResponse, RefreshTokenRequest,
    SetUserActiveRequest, SuccessResponse, UpdateUserRoleRequest, UserResponse,
};
pub use services::{
    AuthService, InvoiceService, SequenceService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, UserService,
};
