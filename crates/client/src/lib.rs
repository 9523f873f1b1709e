//! Loopline API client
//!
//! The authenticated HTTP layer of the Loopline single-page application:
//! bearer-token attachment, transparent 401 refresh-and-retry, session
//! persistence, and the pure login-identifier classifier. View code lives
//! in `loopline-frontend`; the backend REST API is an external collaborator.

pub mod auth;
pub mod client;
pub mod error;
pub mod events;
pub mod identifier;
pub mod manager;
pub mod session;

pub use client::{ApiClient, ApiClientBuilder, ApiRequest};
pub use error::ClientError;
pub use events::{AuthEvent, AuthEventHandler};
pub use identifier::{classify_identifier, IdentifierKind};
pub use manager::AuthManager;
pub use session::{MemorySessionStore, Session, SessionStore, MOCK_ACCESS_TOKEN};

pub use reqwest::Method;
