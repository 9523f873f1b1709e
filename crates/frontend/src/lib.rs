//! Frontend glue for the Loopline SPA
//!
//! Auth context and provider, `localStorage` session persistence, and the
//! unauthenticated-route redirect policy. Feed, story, and video views live
//! in the app crates and consume this through the Yew context.

pub mod auth;
pub mod client;
pub mod hooks;
pub mod navigation;
pub mod services;
pub mod storage;

pub use auth::context::{AuthContext, AuthProvider, ClientHandle};
pub use auth::{use_auth, use_is_authenticated};
pub use client::create_client;
pub use hooks::{use_login, LoginState};
pub use services::AuthApiService;
pub use storage::LocalSessionStore;

/// Route tracing output to the browser console
pub fn init_logging() {
    use tracing_subscriber::prelude::*;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(tracing_web::MakeWebConsoleWriter::new());
    tracing_subscriber::registry().with(fmt_layer).init();
}
