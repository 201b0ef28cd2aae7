//! User entity - represents an admin-backend account

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value_objects::UserRole;

/// User entity representing a staff account
///
/// Accounts are created on first external-identity login. Email is the
/// globally unique merge key; the external subject id is linkage metadata
/// that may be rewritten on later logins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Subject id from the external identity provider (unique when set)
    pub google_id: Option<String>,
    pub name: String,
    pub avatar_url: Option<String>,
    pub role: UserRole,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Uuid, email: String, name: String, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            google_id: None,
            name,
            avatar_url: None,
            role,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the external-identity linkage fields
    ///
    /// Called on every login so the stored subject id, display name and
    /// avatar track what the identity provider currently reports.
    pub fn link_identity(
        &mut self,
        google_id: String,
        name: Option<String>,
        avatar_url: Option<String>,
    ) {
        self.google_id = Some(google_id);
        if let Some(name) = name {
            self.name = name;
        }
        self.avatar_url = avatar_url;
        self.updated_at = Utc::now();
    }

    /// Check if the account can authenticate
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Change the account role
    pub fn set_role(&mut self, role: UserRole) {
        self.role = role;
        self.updated_at = Utc::now();
    }

    /// Activate or deactivate the account
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.updated_at = Utc::now();
    }
}
