//! Auth manager: single owner of session state
//!
//! Every read and write of tokens goes through here. The manager is handed
//! to the API client by the caller, so the lifecycle has one owner instead
//! of ambient module-level state.

use crate::events::{AuthEvent, AuthEventHandler};
use crate::session::{SessionStore, MOCK_ACCESS_TOKEN};
use std::sync::{Arc, RwLock};

/// Owns the session store and the auth event signal
pub struct AuthManager {
    store: Arc<dyn SessionStore>,
    event_handler: RwLock<Option<AuthEventHandler>>,
}

impl AuthManager {
    /// Create a manager over the given store
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            event_handler: RwLock::new(None),
        }
    }

    /// Register the handler notified on session-terminating events
    pub fn set_event_handler(&self, handler: AuthEventHandler) {
        *self
            .event_handler
            .write()
            .expect("event handler lock poisoned") = Some(handler);
    }

    /// Remove the event handler
    pub fn clear_event_handler(&self) {
        *self
            .event_handler
            .write()
            .expect("event handler lock poisoned") = None;
    }

    pub fn access_token(&self) -> Option<String> {
        self.store.access_token()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.store.refresh_token()
    }

    pub fn cached_user(&self) -> Option<serde_json::Value> {
        self.store.cached_user()
    }

    /// Whether an access token is currently present
    pub fn session_active(&self) -> bool {
        self.store.access_token().is_some()
    }

    /// Whether the local-testing sentinel token is the active access token
    pub fn has_mock_token(&self) -> bool {
        self.store.access_token().as_deref() == Some(MOCK_ACCESS_TOKEN)
    }

    /// Load the stable device id, generating and persisting one on first use
    pub fn ensure_device_id(&self) -> String {
        if let Some(id) = self.store.device_id() {
            return id;
        }
        let id = uuid::Uuid::new_v4().to_string();
        self.store.set_device_id(&id);
        tracing::debug!(device_id = %id, "generated device id");
        id
    }

    /// Persist a freshly issued session after login
    pub fn store_session(
        &self,
        access: &str,
        refresh: Option<&str>,
        user: Option<&serde_json::Value>,
    ) {
        self.store.store_tokens(access, refresh);
        if let Some(user) = user {
            self.store.set_cached_user(user);
        }
    }

    /// Persist the new access token after a successful refresh
    pub fn apply_refreshed_access(&self, access: &str) {
        self.store.set_access_token(access);
    }

    /// Wipe the session without signalling, e.g. on explicit logout
    pub fn clear_session(&self) {
        self.store.clear();
    }

    /// Wipe the session and notify the shell that it expired
    pub fn expire_session(&self) {
        self.store.clear();
        self.emit(AuthEvent::SessionExpired);
    }

    fn emit(&self, event: AuthEvent) {
        let handler = self
            .event_handler
            .read()
            .expect("event handler lock poisoned");
        if let Some(handler) = handler.as_ref() {
            handler(event);
        }
    }
}
