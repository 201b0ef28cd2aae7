//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in
//! carport-core. Each repository handles database operations for a specific
//! domain entity.

mod error;
mod invoice;
mod refresh_token;
mod sequence;
mod user;

pub use invoice::PgInvoiceRepository;
pub use refresh_token::PgRefreshTokenRepository;
pub use sequence::PgSequenceRepository;
pub use user::PgUserRepository;
