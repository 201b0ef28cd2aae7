//! Refresh token entity <-> model mapper

use carport_core::entities::RefreshToken;

use crate::models::RefreshTokenModel;

/// Convert RefreshTokenModel to RefreshToken entity
impl From<RefreshTokenModel> for RefreshToken {
    fn from(model: RefreshTokenModel) -> Self {
        RefreshToken {
            id: model.id,
            user_id: model.user_id,
            token_hash: model.token_hash,
            expires_at: model.expires_at,
            revoked_at: model.revoked_at,
            superseded_by: model.superseded_by,
            created_at: model.created_at,
        }
    }
}
