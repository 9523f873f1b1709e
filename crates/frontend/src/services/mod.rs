//! API services used by views

pub mod auth;

pub use auth::AuthApiService;
