//! Authentication handlers
//!
//! Endpoints for Google sign-in, token refresh, logout, and the current user.

use axum::{extract::State, Json};
use carport_service::{
    AuthResponse, AuthService, GoogleLoginRequest, LogoutRequest, RefreshResponse,
    RefreshTokenRequest, SuccessResponse, UserResponse,
};

use crate::extractors::{AuthUser, OptionalAuthUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Sign in with a Google ID token
///
/// POST /auth/google
pub async fn google_login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<GoogleLoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login_with_google(request).await?;
    Ok(Json(response))
}

/// Exchange a refresh token for a rotated pair
///
/// POST /auth/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RefreshTokenRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.refresh(request).await?;
    Ok(Json(response))
}

/// Log out
///
/// POST /auth/logout
///
/// Succeeds with 200 whether or not the caller is authenticated and whether
/// or not the body names a live token.
pub async fn logout(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    body: Option<Json<LogoutRequest>>,
) -> ApiResult<Json<SuccessResponse>> {
    let service = AuthService::new(state.service_context());
    let request = body.map(|b| b.0).unwrap_or_default();
    let user_id = auth.0.map(|a| a.user_id);
    service.logout(user_id, request).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Get the current user
///
/// GET /auth/me
pub async fn current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.current_user(auth.user_id).await?;
    Ok(Json(response))
}
