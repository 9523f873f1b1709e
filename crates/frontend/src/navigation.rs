//! Route policy for unauthenticated redirects
//!
//! When the session expires the shell forces navigation back to the public
//! entry point, unless the user is already somewhere that does not require
//! a session.

use loopline_client::AuthEvent;

/// Routes reachable without a session. Entries match themselves and their
/// subtree (`/login` also covers `/login/mfa`). The root is always public.
const PUBLIC_ROUTES: &[&str] = &["/login", "/register", "/terms", "/privacy"];

/// Whether the given path is reachable without a session
pub fn is_public_route(path: &str) -> bool {
    if path == "/" || path.is_empty() {
        return true;
    }
    PUBLIC_ROUTES
        .iter()
        .any(|route| path == *route || path.starts_with(&format!("{route}/")))
}

/// React to an auth event from the client
pub fn handle_auth_event(event: AuthEvent) {
    match event {
        AuthEvent::SessionExpired => redirect_to_entry(),
    }
}

/// Force navigation to the application root, unless the current location is
/// already a public route.
pub fn redirect_to_entry() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let path = window.location().pathname().unwrap_or_default();
    if is_public_route(&path) {
        return;
    }
    if let Err(err) = window.location().set_href("/") {
        tracing::warn!(?err, "failed to navigate to entry point");
    }
}
