//! Authentication API service
//!
//! Validates form input locally before driving the login flow through the
//! API client. Invalid input never reaches the network; the server remains
//! authoritative for everything that does.

use loopline_client::auth::LoginResponse;
use loopline_client::{classify_identifier, ApiClient, ClientError, IdentifierKind};
use std::rc::Rc;

/// Authentication API service
#[derive(Clone)]
pub struct AuthApiService {
    client: Rc<ApiClient>,
}

impl AuthApiService {
    /// Create a new auth API service over the shared client
    pub fn new(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    /// Log in with a numeric id or email address
    pub async fn login(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<LoginResponse, ClientError> {
        validate_login_input(identifier, password)?;
        self.client
            .login_identifier(identifier.trim(), password)
            .await
    }

    /// Complete a login that required a second factor
    pub async fn complete_mfa(
        &self,
        user_id: &str,
        code: &str,
    ) -> Result<LoginResponse, ClientError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(ClientError::Validation("enter the code from your authenticator".into()));
        }
        self.client.login_mfa(user_id, code).await
    }

    /// Log out and wipe the local session
    pub async fn logout(&self) {
        self.client.logout().await;
    }
}

/// Pre-flight check mirroring the server's login validation
fn validate_login_input(identifier: &str, password: &str) -> Result<(), ClientError> {
    if classify_identifier(identifier) == IdentifierKind::Invalid {
        return Err(ClientError::Validation(
            "enter your account number or email address".into(),
        ));
    }
    if password.is_empty() {
        return Err(ClientError::Validation("enter your password".into()));
    }
    Ok(())
}
