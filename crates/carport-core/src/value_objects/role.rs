//! User role value object
//!
//! Roles form a flat set with no implicit hierarchy: every authorization
//! decision is an explicit membership check against an allow-list.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role assigned to a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    SuperAdmin,
    Admin,
    Sales,
    Marketing,
    User,
}

impl UserRole {
    /// All roles, in declaration order
    pub const ALL: [UserRole; 5] = [
        Self::SuperAdmin,
        Self::Admin,
        Self::Sales,
        Self::Marketing,
        Self::User,
    ];

    /// Get the canonical string form stored in the database and in tokens
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::Admin => "ADMIN",
            Self::Sales => "SALES",
            Self::Marketing => "MARKETING",
            Self::User => "USER",
        }
    }

    /// Check membership in an allow-list of roles
    ///
    /// This is the single capability check used by every role-gated route.
    /// No role implies another: SUPER_ADMIN passes only when the list names it.
    #[must_use]
    pub fn is_any_of(self, allowed: &[UserRole]) -> bool {
        allowed.contains(&self)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUPER_ADMIN" => Ok(Self::SuperAdmin),
            "ADMIN" => Ok(Self::Admin),
            "SALES" => Ok(Self::Sales),
            "MARKETING" => Ok(Self::Marketing),
            "USER" => Ok(Self::User),
            _ => Err(RoleParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown role string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct RoleParseError(pub String);
