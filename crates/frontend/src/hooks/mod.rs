//! Custom hooks for the application

pub mod use_login;

pub use use_login::{use_login, LoginState};
