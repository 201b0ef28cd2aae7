//! User administration service
//!
//! Listing accounts, changing roles, and toggling the active flag.

use carport_core::DomainError;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::{SetUserActiveRequest, UpdateUserRoleRequest, UserResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List all accounts, newest first
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> ServiceResult<Vec<UserResponse>> {
        let users = self.ctx.user_repo().list().await?;
        Ok(users.iter().map(UserResponse::from).collect())
    }

    /// Change an account's role
    #[instrument(skip(self, request))]
    pub async fn update_role(
        &self,
        user_id: Uuid,
        request: UpdateUserRoleRequest,
    ) -> ServiceResult<UserResponse> {
        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        self.ctx.user_repo().update_role(user_id, request.role).await?;
        user.set_role(request.role);

        info!(user_id = %user_id, role = %request.role, "User role updated");

        Ok(UserResponse::from(&user))
    }

    /// Activate or deactivate an account
    ///
    /// Deactivation also revokes every live session so the account cannot
    /// refresh its way back in.
    #[instrument(skip(self, request))]
    pub async fn set_active(
        &self,
        user_id: Uuid,
        request: SetUserActiveRequest,
    ) -> ServiceResult<UserResponse> {
        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        self.ctx.user_repo().set_active(user_id, request.active).await?;
        user.set_active(request.active);

        if request.active {
            info!(user_id = %user_id, "User activated");
        } else {
            let revoked = self
                .ctx
                .refresh_token_repo()
                .revoke_all_for_user(user_id)
                .await?;
            info!(user_id = %user_id, revoked, "User deactivated, sessions revoked");
        }

        Ok(UserResponse::from(&user))
    }
}
