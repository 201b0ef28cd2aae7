//! User administration handlers
//!
//! Endpoints for listing accounts and changing their role or active flag.

use axum::{
    extract::{Path, State},
    Json,
};
use carport_core::UserRole;
use carport_service::{SetUserActiveRequest, UpdateUserRoleRequest, UserResponse, UserService};
use uuid::Uuid;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

fn parse_user_id(user_id: &str) -> Result<Uuid, ApiError> {
    user_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid user_id format"))
}

/// List all user accounts
///
/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<UserResponse>>> {
    auth.require_any(&[UserRole::SuperAdmin, UserRole::Admin])?;

    let service = UserService::new(state.service_context());
    let users = service.list_users().await?;
    Ok(Json(users))
}

/// Change a user's role
///
/// PATCH /users/{user_id}/role
pub async fn update_user_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateUserRoleRequest>,
) -> ApiResult<Json<UserResponse>> {
    auth.require_any(&[UserRole::SuperAdmin])?;
    let user_id = parse_user_id(&user_id)?;

    let service = UserService::new(state.service_context());
    let response = service.update_role(user_id, request).await?;
    Ok(Json(response))
}

/// Activate or deactivate a user account
///
/// PATCH /users/{user_id}/active
pub async fn set_user_active(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
    ValidatedJson(request): ValidatedJson<SetUserActiveRequest>,
) -> ApiResult<Json<UserResponse>> {
    auth.require_any(&[UserRole::SuperAdmin])?;
    let user_id = parse_user_id(&user_id)?;

    let service = UserService::new(state.service_context());
    let response = service.set_active(user_id, request).await?;
    Ok(Json(response))
}
