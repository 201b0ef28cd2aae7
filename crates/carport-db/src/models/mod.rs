//! Database models

mod invoice;
mod refresh_token;
mod user;

pub use invoice::InvoiceModel;
pub use refresh_token::RefreshTokenModel;
pub use user::UserModel;
