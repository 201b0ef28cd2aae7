//! User entity <-> model mapper

use carport_core::entities::User;
use carport_core::error::DomainError;
use carport_core::value_objects::UserRole;

use crate::models::UserModel;

/// Convert UserModel to User entity
///
/// Fails when the stored role string is not a known role, which means the
/// row was written by something other than this application.
impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        let role = model
            .role
            .parse::<UserRole>()
            .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

        Ok(User {
            id: model.id,
            email: model.email,
            google_id: model.google_id,
            name: model.name,
            avatar_url: model.avatar_url,
            role,
            active: model.active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
