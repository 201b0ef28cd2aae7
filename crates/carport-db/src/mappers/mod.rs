//! Entity <-> model mappers

mod invoice;
mod refresh_token;
mod user;
