//! Refresh token entity - server-side record of an opaque session secret

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Refresh token record
///
/// Only the SHA-256 hash of the bearer secret is ever stored; the raw secret
/// leaves the process exactly once, in the response that issued it. Records
/// move through `issued -> rotated/revoked` or `issued -> expired` and never
/// come back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    /// Hash of the token that replaced this one at rotation
    pub superseded_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Create a new live token record for a user
    pub fn new(user_id: Uuid, token_hash: String, ttl_days: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            expires_at: now + Duration::days(ttl_days),
            revoked_at: None,
            superseded_by: None,
            created_at: now,
        }
    }

    /// Check if token is revoked
    #[inline]
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Check if token is expired
    #[inline]
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Check if token is valid (not revoked and not expired)
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.is_revoked() && !self.is_expired()
    }
}
