//! Browser-backed session persistence
//!
//! Implements the client's `SessionStore` seam over `localStorage`, so the
//! session survives page reloads. Uses the fixed key names shared with the
//! client crate.

use gloo::storage::{LocalStorage, Storage};
use loopline_client::session::{
    SessionStore, ACCESS_TOKEN_KEY, CACHED_USER_KEY, DEVICE_ID_KEY, REFRESH_TOKEN_KEY,
};

/// `SessionStore` over `window.localStorage`
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalSessionStore;

impl SessionStore for LocalSessionStore {
    fn access_token(&self) -> Option<String> {
        LocalStorage::get(ACCESS_TOKEN_KEY).ok()
    }

    fn refresh_token(&self) -> Option<String> {
        LocalStorage::get(REFRESH_TOKEN_KEY).ok()
    }

    fn device_id(&self) -> Option<String> {
        LocalStorage::get(DEVICE_ID_KEY).ok()
    }

    fn cached_user(&self) -> Option<serde_json::Value> {
        LocalStorage::get(CACHED_USER_KEY).ok()
    }

    fn store_tokens(&self, access: &str, refresh: Option<&str>) {
        if let Err(err) = LocalStorage::set(ACCESS_TOKEN_KEY, access) {
            tracing::warn!(error = %err, "failed to persist access token");
        }
        match refresh {
            Some(refresh) => {
                if let Err(err) = LocalStorage::set(REFRESH_TOKEN_KEY, refresh) {
                    tracing::warn!(error = %err, "failed to persist refresh token");
                }
            }
            None => LocalStorage::delete(REFRESH_TOKEN_KEY),
        }
    }

    fn set_access_token(&self, access: &str) {
        if let Err(err) = LocalStorage::set(ACCESS_TOKEN_KEY, access) {
            tracing::warn!(error = %err, "failed to persist access token");
        }
    }

    fn set_cached_user(&self, user: &serde_json::Value) {
        if let Err(err) = LocalStorage::set(CACHED_USER_KEY, user) {
            tracing::warn!(error = %err, "failed to persist user");
        }
    }

    fn set_device_id(&self, id: &str) {
        if let Err(err) = LocalStorage::set(DEVICE_ID_KEY, id) {
            tracing::warn!(error = %err, "failed to persist device id");
        }
    }

    fn clear(&self) {
        LocalStorage::delete(ACCESS_TOKEN_KEY);
        LocalStorage::delete(REFRESH_TOKEN_KEY);
        LocalStorage::delete(CACHED_USER_KEY);
    }
}
