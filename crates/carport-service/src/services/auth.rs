//! Authentication service
//!
//! Handles Google sign-in, token refresh, and logout. Accounts are keyed by
//! email: the identity provider's subject id is linkage metadata rewritten on
//! every login, never a merge key.

use carport_common::auth::{generate_refresh_secret, hash_refresh_secret};
use carport_common::AppError;
use carport_core::entities::{RefreshToken, User};
use carport_core::{DomainError, UserRole, VerifiedIdentity};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{
    AuthResponse, GoogleLoginRequest, LogoutRequest, RefreshResponse, RefreshTokenRequest,
    UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Sign in with a Google ID token
    ///
    /// Verifies the assertion, upserts the account by email, and issues a
    /// fresh access/refresh pair. Each login adds a session alongside any
    /// existing live ones.
    #[instrument(skip(self, request))]
    pub async fn login_with_google(
        &self,
        request: GoogleLoginRequest,
    ) -> ServiceResult<AuthResponse> {
        let identity = self
            .ctx
            .identity_verifier()
            .verify(&request.id_token)
            .await?;

        let user = self.upsert_user(identity).await?;

        let (raw_secret, record) = self.mint_refresh_token(user.id);
        self.ctx.refresh_token_repo().create(&record).await?;

        let access_token = self
            .ctx
            .jwt_service()
            .issue_access_token(user.id, &user.email, user.role)?;

        info!(user_id = %user.id, "User logged in");

        Ok(AuthResponse::new(
            UserResponse::from(&user),
            access_token,
            raw_secret,
            self.ctx.jwt_service().access_token_expiry(),
        ))
    }

    /// Exchange a refresh token for a new access/refresh pair
    ///
    /// The presented token is consumed: rotation happens on every use, and a
    /// token that lost a concurrent rotation race fails exactly like a
    /// revoked one.
    #[instrument(skip(self, request))]
    pub async fn refresh(&self, request: RefreshTokenRequest) -> ServiceResult<RefreshResponse> {
        let presented_hash = hash_refresh_secret(&request.refresh_token);

        let record = self
            .ctx
            .refresh_token_repo()
            .find_by_hash(&presented_hash)
            .await?
            .ok_or(ServiceError::Domain(DomainError::RefreshTokenInvalid))?;

        if !record.is_valid() {
            warn!(user_id = %record.user_id, "Refresh refused: token revoked or expired");
            return Err(DomainError::RefreshTokenInvalid.into());
        }

        let user = self
            .ctx
            .user_repo()
            .find_by_id(record.user_id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %record.user_id, "Refresh refused: owning user no longer exists");
                ServiceError::Domain(DomainError::RefreshTokenInvalid)
            })?;

        if !user.is_active() {
            warn!(user_id = %user.id, "Refresh refused: account deactivated");
            return Err(ServiceError::App(AppError::AccountDisabled));
        }

        // The store's compare-and-swap admits exactly one rotation per token;
        // a concurrent loser surfaces here as RefreshTokenInvalid.
        let (raw_secret, replacement) = self.mint_refresh_token(user.id);
        self.ctx
            .refresh_token_repo()
            .rotate(&presented_hash, &replacement)
            .await?;

        let access_token = self
            .ctx
            .jwt_service()
            .issue_access_token(user.id, &user.email, user.role)?;

        info!(user_id = %user.id, "Tokens rotated");

        Ok(RefreshResponse::new(
            access_token,
            raw_secret,
            self.ctx.jwt_service().access_token_expiry(),
        ))
    }

    /// Log out by revoking the presented token, or every session when an
    /// authenticated caller sends no token
    ///
    /// Unknown and already-revoked tokens are not errors; logout always
    /// succeeds from the caller's perspective.
    #[instrument(skip(self, request))]
    pub async fn logout(&self, user_id: Option<Uuid>, request: LogoutRequest) -> ServiceResult<()> {
        if let Some(raw_secret) = request.refresh_token {
            self.ctx
                .refresh_token_repo()
                .revoke(&hash_refresh_secret(&raw_secret))
                .await?;
            info!("Session revoked");
        } else if let Some(user_id) = user_id {
            let revoked = self
                .ctx
                .refresh_token_repo()
                .revoke_all_for_user(user_id)
                .await?;
            info!(user_id = %user_id, revoked, "All sessions revoked");
        }

        Ok(())
    }

    /// Load the account behind a validated access token
    #[instrument(skip(self))]
    pub async fn current_user(&self, user_id: Uuid) -> ServiceResult<UserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user_id, "Access token subject no longer exists");
                ServiceError::App(AppError::InvalidToken)
            })?;

        if !user.is_active() {
            return Err(ServiceError::App(AppError::AccountDisabled));
        }

        Ok(UserResponse::from(&user))
    }

    /// Find or create the account for a verified identity
    ///
    /// Refuses deactivated accounts before touching them.
    async fn upsert_user(&self, identity: VerifiedIdentity) -> ServiceResult<User> {
        if let Some(mut user) = self.ctx.user_repo().find_by_email(&identity.email).await? {
            if !user.is_active() {
                warn!(user_id = %user.id, "Login refused: account deactivated");
                return Err(ServiceError::App(AppError::AccountDisabled));
            }
            user.link_identity(identity.subject_id, identity.name, identity.avatar_url);
            self.ctx.user_repo().update_identity(&user).await?;
            return Ok(user);
        }

        // Bootstrap rule: the first account in an empty system is promoted
        let role = if self.ctx.user_repo().count().await? == 0 {
            UserRole::SuperAdmin
        } else {
            UserRole::User
        };

        let name = identity
            .name
            .clone()
            .unwrap_or_else(|| identity.email.clone());
        let mut user = User::new(Uuid::new_v4(), identity.email.clone(), name, role);
        user.link_identity(
            identity.subject_id.clone(),
            identity.name.clone(),
            identity.avatar_url.clone(),
        );

        match self.ctx.user_repo().create(&user).await {
            Ok(()) => {
                info!(user_id = %user.id, role = %user.role, "User account created");
                Ok(user)
            }
            // Two first logins can race on the unique email; the loser adopts
            // the row the winner inserted.
            Err(DomainError::EmailAlreadyExists) => {
                let mut user = self
                    .ctx
                    .user_repo()
                    .find_by_email(&identity.email)
                    .await?
                    .ok_or_else(|| {
                        ServiceError::internal("User vanished after unique-email conflict")
                    })?;
                if !user.is_active() {
                    return Err(ServiceError::App(AppError::AccountDisabled));
                }
                user.link_identity(identity.subject_id, identity.name, identity.avatar_url);
                self.ctx.user_repo().update_identity(&user).await?;
                Ok(user)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Generate an opaque secret and its store record
    ///
    /// The raw secret goes to the caller; only the hash is ever persisted.
    fn mint_refresh_token(&self, user_id: Uuid) -> (String, RefreshToken) {
        let raw_secret = generate_refresh_secret();
        let token_hash = hash_refresh_secret(&raw_secret);
        let record = RefreshToken::new(user_id, token_hash, self.ctx.refresh_ttl_days());
        (raw_secret, record)
    }
}
