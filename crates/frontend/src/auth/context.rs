//! Global authentication context and provider

use crate::auth::error_handler;
use loopline_client::{ApiClient, AuthEvent};
use std::rc::Rc;
use std::sync::Arc;
use yew::prelude::*;

/// Shared handle to the API client, comparable by identity so it can be a
/// component prop
#[derive(Clone)]
pub struct ClientHandle(pub Rc<ApiClient>);

impl PartialEq for ClientHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Authentication state visible to views
#[derive(Clone, Debug, PartialEq)]
pub struct AuthContextData {
    pub user: Option<serde_json::Value>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub session_expired: bool,
}

/// Actions dispatched into the auth reducer
pub enum AuthAction {
    Login(serde_json::Value),
    Logout,
    SetLoading(bool),
    SetError(Option<String>),
    SessionExpired,
}

/// Authentication context
pub type AuthContext = UseReducerHandle<AuthContextData>;

impl Default for AuthContextData {
    fn default() -> Self {
        Self {
            user: None,
            is_loading: true, // Start with loading to check storage
            error: None,
            session_expired: false,
        }
    }
}

impl Reducible for AuthContextData {
    type Action = AuthAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            AuthAction::Login(user) => Rc::new(Self {
                user: Some(user),
                is_loading: false,
                error: None,
                session_expired: false,
            }),
            AuthAction::Logout => Rc::new(Self {
                user: None,
                is_loading: false,
                error: None,
                session_expired: false,
            }),
            AuthAction::SetLoading(is_loading) => Rc::new(Self {
                is_loading,
                ..(*self).clone()
            }),
            AuthAction::SetError(error) => Rc::new(Self {
                error,
                ..(*self).clone()
            }),
            AuthAction::SessionExpired => Rc::new(Self {
                user: None,
                is_loading: false,
                error: Some("Your session has expired. Please log in again.".to_string()),
                session_expired: true,
            }),
        }
    }
}

/// Auth provider props
#[derive(Properties, PartialEq)]
pub struct AuthProviderProps {
    pub client: ClientHandle,
    pub children: Children,
}

/// Auth provider component
#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    let auth_state = use_reducer(AuthContextData::default);

    // Wire the session-expired signal from the client into this provider
    {
        let auth_state = auth_state.clone();
        let client = props.client.clone();
        use_effect_with((), move |_| {
            error_handler::set_session_expired_callback(Rc::new(move || {
                auth_state.dispatch(AuthAction::SessionExpired);
                crate::navigation::redirect_to_entry();
            }));
            client.0.auth().set_event_handler(Arc::new(|event| {
                if event == AuthEvent::SessionExpired {
                    error_handler::notify_session_expired();
                }
            }));

            // Cleanup on unmount
            move || {
                client.0.auth().clear_event_handler();
                error_handler::clear_session_expired_callback();
            }
        });
    }

    // Restore the persisted session on mount
    {
        let auth_state = auth_state.clone();
        let client = props.client.clone();
        use_effect_with((), move |_| {
            if client.0.auth().session_active() {
                if let Some(user) = client.0.auth().cached_user() {
                    auth_state.dispatch(AuthAction::Login(user));
                    return;
                }
            }
            auth_state.dispatch(AuthAction::SetLoading(false));
        });
    }

    html! {
        <ContextProvider<AuthContext> context={auth_state}>
            {props.children.clone()}
        </ContextProvider<AuthContext>>
    }
}

/// Hook to use auth context
#[hook]
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
        .expect("AuthContext not found. Make sure to wrap your component with AuthProvider")
}

/// Hook to check if authenticated
#[hook]
pub fn use_is_authenticated() -> bool {
    let auth = use_auth();
    auth.user.is_some()
}
