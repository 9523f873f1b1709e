//! Session model and the storage seam behind it
//!
//! A session is at most one per profile: the access/refresh token pair, the
//! cached user object, and a device id that outlives the tokens. Stores are
//! key-value and durable across reloads; every implementation uses the same
//! fixed key names so the client and the browser shell agree on layout.

use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// Storage key for the access token
pub const ACCESS_TOKEN_KEY: &str = "loopline.access_token";
/// Storage key for the refresh token
pub const REFRESH_TOKEN_KEY: &str = "loopline.refresh_token";
/// Storage key for the cached user object
pub const CACHED_USER_KEY: &str = "loopline.user";
/// Storage key for the device id
pub const DEVICE_ID_KEY: &str = "loopline.device_id";

/// Sentinel access token recognized by the client when running against a
/// local mock backend. While active, the 401 refresh cycle is skipped and
/// failures pass straight through. Not a security boundary.
pub const MOCK_ACCESS_TOKEN: &str = "loopline-mock-token";

/// A complete authenticated session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub device_id: String,
}

/// Persistence seam for session state.
///
/// `clear` removes the access token, refresh token, and cached user as a
/// unit; no partial-clear state is ever observable. The device id survives
/// a clear and is only removed by wiping the underlying storage itself.
pub trait SessionStore: Send + Sync {
    fn access_token(&self) -> Option<String>;
    fn refresh_token(&self) -> Option<String>;
    fn device_id(&self) -> Option<String>;
    fn cached_user(&self) -> Option<serde_json::Value>;

    fn store_tokens(&self, access: &str, refresh: Option<&str>);
    fn set_access_token(&self, access: &str);
    fn set_cached_user(&self, user: &serde_json::Value);
    fn set_device_id(&self, id: &str);

    fn clear(&self);
}

/// In-memory store used in tests and native embedding
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: RwLock<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    access_token: Option<String>,
    refresh_token: Option<String>,
    cached_user: Option<serde_json::Value>,
    device_id: Option<String>,
}

impl SessionStore for MemorySessionStore {
    fn access_token(&self) -> Option<String> {
        self.inner
            .read()
            .expect("session store lock poisoned")
            .access_token
            .clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.inner
            .read()
            .expect("session store lock poisoned")
            .refresh_token
            .clone()
    }

    fn device_id(&self) -> Option<String> {
        self.inner
            .read()
            .expect("session store lock poisoned")
            .device_id
            .clone()
    }

    fn cached_user(&self) -> Option<serde_json::Value> {
        self.inner
            .read()
            .expect("session store lock poisoned")
            .cached_user
            .clone()
    }

    fn store_tokens(&self, access: &str, refresh: Option<&str>) {
        let mut inner = self.inner.write().expect("session store lock poisoned");
        inner.access_token = Some(access.to_string());
        inner.refresh_token = refresh.map(ToString::to_string);
    }

    fn set_access_token(&self, access: &str) {
        let mut inner = self.inner.write().expect("session store lock poisoned");
        inner.access_token = Some(access.to_string());
    }

    fn set_cached_user(&self, user: &serde_json::Value) {
        let mut inner = self.inner.write().expect("session store lock poisoned");
        inner.cached_user = Some(user.clone());
    }

    fn set_device_id(&self, id: &str) {
        let mut inner = self.inner.write().expect("session store lock poisoned");
        inner.device_id = Some(id.to_string());
    }

    fn clear(&self) {
        let mut inner = self.inner.write().expect("session store lock poisoned");
        inner.access_token = None;
        inner.refresh_token = None;
        inner.cached_user = None;
    }
}
