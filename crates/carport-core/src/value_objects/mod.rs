//! Value objects - immutable types that represent domain concepts

mod role;

pub use role::{RoleParseError, UserRole};
