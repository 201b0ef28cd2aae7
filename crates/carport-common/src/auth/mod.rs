//! Authentication module

mod google;
mod jwt;
mod secret;

pub use google::GoogleTokenVerifier;
pub use jwt::{AccessClaims, JwtService};
pub use secret::{generate_refresh_secret, hash_refresh_secret};
