//! Login hook driving the identifier/password and MFA flows

use crate::auth::context::ClientHandle;
use crate::auth::error_messages::login_error_message;
use crate::auth::{use_auth, AuthAction, AuthContext};
use crate::services::AuthApiService;
use yew::prelude::*;

/// Login flow state
#[derive(Clone, Debug, PartialEq)]
pub enum LoginState {
    Idle,
    Processing,
    /// First factor accepted; waiting for the authenticator code
    MfaRequired { user_id: String },
    Error(String),
}

/// Login hook handle
#[derive(Clone)]
pub struct UseLoginHandle {
    service: AuthApiService,
    auth_context: AuthContext,
    state: UseStateHandle<LoginState>,
}

impl UseLoginHandle {
    /// Submit the login form
    pub fn submit(&self, identifier: String, password: String) {
        let service = self.service.clone();
        let auth_context = self.auth_context.clone();
        let state = self.state.clone();

        wasm_bindgen_futures::spawn_local(async move {
            state.set(LoginState::Processing);

            match service.login(&identifier, &password).await {
                Ok(login) if login.mfa_required => match login.user_id {
                    Some(user_id) => state.set(LoginState::MfaRequired { user_id }),
                    None => {
                        state.set(LoginState::Error(
                            "The server asked for MFA but sent no user id.".to_string(),
                        ));
                    }
                },
                Ok(login) => {
                    let user = login.user.unwrap_or_else(|| serde_json::json!({}));
                    auth_context.dispatch(AuthAction::Login(user));
                    state.set(LoginState::Idle);
                }
                Err(err) => state.set(LoginState::Error(login_error_message(&err))),
            }
        });
    }

    /// Submit the authenticator code for the pending MFA challenge
    pub fn complete_mfa(&self, code: String) {
        let LoginState::MfaRequired { user_id } = (*self.state).clone() else {
            return;
        };
        let service = self.service.clone();
        let auth_context = self.auth_context.clone();
        let state = self.state.clone();

        wasm_bindgen_futures::spawn_local(async move {
            state.set(LoginState::Processing);

            match service.complete_mfa(&user_id, &code).await {
                Ok(login) => {
                    let user = login.user.unwrap_or_else(|| serde_json::json!({}));
                    auth_context.dispatch(AuthAction::Login(user));
                    state.set(LoginState::Idle);
                }
                Err(err) => state.set(LoginState::Error(login_error_message(&err))),
            }
        });
    }

    /// Log out and drop the local session
    pub fn logout(&self) {
        let service = self.service.clone();
        let auth_context = self.auth_context.clone();

        wasm_bindgen_futures::spawn_local(async move {
            service.logout().await;
            auth_context.dispatch(AuthAction::Logout);
        });
    }

    /// Get the current state
    pub fn state(&self) -> &LoginState {
        &self.state
    }

    /// Clear any error state
    pub fn clear_error(&self) {
        if matches!(*self.state, LoginState::Error(_)) {
            self.state.set(LoginState::Idle);
        }
    }
}

/// Hook wiring the login flow to the shared client
#[hook]
pub fn use_login(client: &ClientHandle) -> UseLoginHandle {
    let auth_context = use_auth();
    let state = use_state(|| LoginState::Idle);

    UseLoginHandle {
        service: AuthApiService::new(client.0.clone()),
        auth_context,
        state,
    }
}
