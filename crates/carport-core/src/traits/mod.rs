//! Traits module - ports implemented by the infrastructure layers

mod identity;
mod repositories;

pub use identity::{IdentityVerifier, VerifiedIdentity};
pub use repositories::{
    InvoiceQuery, InvoiceRepository, RefreshTokenRepository, RepoResult, SequenceRepository,
    UserRepository,
};
