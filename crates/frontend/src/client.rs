//! Client construction wired to the browser origin

use crate::storage::LocalSessionStore;
use loopline_client::{ApiClient, AuthManager, ClientError};
use std::sync::Arc;

/// Build the app's API client against the current origin, persisting the
/// session in `localStorage`
pub fn create_client() -> Result<ApiClient, ClientError> {
    ApiClient::builder()
        .base_url(base_url())
        .auth_manager(Arc::new(AuthManager::new(Arc::new(LocalSessionStore))))
        .build()
}

/// Get the base URL for API calls
fn base_url() -> String {
    if let Some(window) = web_sys::window() {
        if let Ok(origin) = window.location().origin() {
            return origin;
        }
    }

    // Default to relative URLs
    String::new()
}
