//! Auth lifecycle events
//!
//! The HTTP layer never touches navigation. When a session becomes unusable
//! the auth manager emits an event and the application shell decides what to
//! do with it (typically redirect to the public entry point).

use std::sync::Arc;

/// Events emitted by the auth manager
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    /// Token refresh failed and the session was wiped
    SessionExpired,
}

/// Handler injected into the auth manager by the application shell
pub type AuthEventHandler = Arc<dyn Fn(AuthEvent) + Send + Sync>;
