//! Authentication context and session-expiry wiring

pub mod context;
pub mod error_handler;
pub mod error_messages;

pub use context::{use_auth, use_is_authenticated, AuthAction, AuthContext, AuthProvider};
