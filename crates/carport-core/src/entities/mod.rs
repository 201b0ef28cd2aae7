//! Domain entities - core business objects

mod invoice;
mod refresh_token;
mod user;

pub use invoice::Invoice;
pub use refresh_token::RefreshToken;
pub use user::User;
