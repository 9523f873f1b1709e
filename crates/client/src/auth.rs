//! Auth endpoint bindings
//!
//! Login, MFA, refresh, and logout. These calls present the device id and
//! refresh token via dedicated headers and are sent directly rather than
//! through the refresh pipeline, so a rejected login can never recurse into
//! another refresh.

use crate::client::{decode, ApiClient};
use crate::error::ClientError;
use reqwest::header;
use serde::{Deserialize, Serialize};

/// Header carrying the stable device id on login and refresh calls
pub const DEVICE_ID_HEADER: &str = "x-device-id";
/// Header presenting the refresh token to the refresh endpoint
pub const REFRESH_TOKEN_HEADER: &str = "x-refresh-token";

/// Body of the identifier/password login call
#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

/// Body of the MFA completion call
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MfaRequest {
    pub user_id: String,
    pub token: String,
}

/// Response of both login calls.
///
/// When `mfa_required` is set the tokens are absent and the caller must
/// complete the MFA step with `user_id` before a session exists.
#[derive(Clone, Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<serde_json::Value>,
    #[serde(rename = "mfaRequired", default)]
    pub mfa_required: bool,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// Response of the refresh endpoint
#[derive(Clone, Debug, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

impl ApiClient {
    /// Log in with a numeric id or email address.
    ///
    /// On success the issued tokens and user are persisted through the auth
    /// manager; when the account requires MFA nothing is persisted yet.
    pub async fn login_identifier(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<LoginResponse, ClientError> {
        let body = LoginRequest {
            identifier: identifier.to_string(),
            password: password.to_string(),
        };
        let response = self
            .raw_post("/auth/login/identifier")
            .header(DEVICE_ID_HEADER, self.auth().ensure_device_id())
            .json(&body)
            .send()
            .await
            .map_err(ClientError::from_send_error)?;
        let login: LoginResponse = decode(response).await?;
        self.remember_login(&login);
        Ok(login)
    }

    /// Complete a login that required a second factor
    pub async fn login_mfa(
        &self,
        user_id: &str,
        token: &str,
    ) -> Result<LoginResponse, ClientError> {
        let body = MfaRequest {
            user_id: user_id.to_string(),
            token: token.to_string(),
        };
        let response = self
            .raw_post("/auth/login/mfa")
            .header(DEVICE_ID_HEADER, self.auth().ensure_device_id())
            .json(&body)
            .send()
            .await
            .map_err(ClientError::from_send_error)?;
        let login: LoginResponse = decode(response).await?;
        self.remember_login(&login);
        Ok(login)
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// Direct send, never routed through `execute`.
    pub(crate) async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<String, ClientError> {
        let response = self
            .raw_post("/auth/refresh")
            .header(REFRESH_TOKEN_HEADER, refresh_token)
            .header(DEVICE_ID_HEADER, self.auth().ensure_device_id())
            .send()
            .await
            .map_err(ClientError::from_send_error)?;
        let refreshed: RefreshResponse = decode(response).await?;
        Ok(refreshed.access_token)
    }

    /// Best-effort logout: tell the backend, then wipe the local session.
    ///
    /// Server or transport failures are logged and ignored; the local
    /// session is cleared either way.
    pub async fn logout(&self) {
        let mut request = self.raw_post("/auth/logout");
        if let Some(token) = self.auth().access_token() {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Err(err) = request.send().await {
            tracing::debug!(error = %err, "logout call failed, ignoring");
        }
        self.auth().clear_session();
    }

    fn remember_login(&self, login: &LoginResponse) {
        if let Some(access) = &login.access_token {
            self.auth()
                .store_session(access, login.refresh_token.as_deref(), login.user.as_ref());
        }
    }
}
