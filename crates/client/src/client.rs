//! Loopline API client
//!
//! Wraps outbound calls to the backend, attaches the bearer token, and
//! recovers once from access-token expiry with a refresh-and-retry cycle.
//!
//! Requests are described by [`ApiRequest`] and rebuilt per attempt, so the
//! retry state is structural rather than a flag mutated on a shared request:
//! the retry path never re-enters the 401 arm, which bounds every original
//! request to at most one refresh. Concurrent requests each run their own
//! cycle; simultaneous refreshes are not coalesced and the backend must
//! tolerate them.

use crate::error::ClientError;
use crate::manager::AuthManager;
use crate::session::MemorySessionStore;
use reqwest::{header, Client, ClientBuilder, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Outbound request descriptor
#[derive(Clone, Debug)]
pub struct ApiRequest {
    method: Method,
    path: String,
    body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Describe a request against the given path
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    /// Attach a JSON body
    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// HTTP client for the Loopline backend
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth: Arc<AuthManager>,
}

impl ApiClient {
    /// Create a client with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a client builder
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The auth manager this client reads tokens from
    pub fn auth(&self) -> &Arc<AuthManager> {
        &self.auth
    }

    /// Describe a request against this client's base URL
    pub fn request(&self, method: Method, path: &str) -> ApiRequest {
        ApiRequest::new(method, path)
    }

    /// GET a JSON resource through the authenticated pipeline
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.execute(self.request(Method::GET, path)).await
    }

    /// POST a JSON body through the authenticated pipeline
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let request = self.request(Method::POST, path).json(body)?;
        self.execute(request).await
    }

    /// PUT a JSON body through the authenticated pipeline
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let request = self.request(Method::PUT, path).json(body)?;
        self.execute(request).await
    }

    /// DELETE a resource through the authenticated pipeline
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.execute(self.request(Method::DELETE, path)).await
    }

    /// Execute a request, recovering once from access-token expiry.
    ///
    /// A 401 on the first attempt triggers a refresh call and a single
    /// resubmission with the new token; the caller only observes the final
    /// outcome. A 401 on the resubmission, a missing refresh token, or an
    /// active mock sentinel token all propagate without another refresh.
    pub async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        let token = self.auth.access_token();
        let response = self.send_attempt(&request, token.as_deref()).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return decode(response).await;
        }

        if self.auth.has_mock_token() {
            // Local mock backend in play: no refresh cycle, surface the 401.
            return Err(read_error(response).await);
        }

        let Some(refresh_token) = self.auth.refresh_token() else {
            return Err(read_error(response).await);
        };

        match self.refresh_access_token(&refresh_token).await {
            Ok(new_access) => {
                self.auth.apply_refreshed_access(&new_access);
                tracing::debug!(path = %request.path, "access token refreshed, retrying");
                let retried = self.send_attempt(&request, Some(&new_access)).await?;
                decode(retried).await
            }
            Err(err) => {
                tracing::warn!(error = %err, "token refresh failed, expiring session");
                self.auth.expire_session();
                Err(err)
            }
        }
    }

    fn build_attempt(&self, request: &ApiRequest, bearer: Option<&str>) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.client.request(request.method.clone(), url);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        builder
    }

    async fn send_attempt(
        &self,
        request: &ApiRequest,
        bearer: Option<&str>,
    ) -> Result<reqwest::Response, ClientError> {
        self.build_attempt(request, bearer)
            .send()
            .await
            .map_err(ClientError::from_send_error)
    }

    /// A raw request builder that bypasses the refresh pipeline, used by the
    /// auth endpoints themselves.
    pub(crate) fn raw_post(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.post(url)
    }
}

/// Decode a successful response body or classify the failure
pub(crate) async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        let body = response
            .text()
            .await
            .map_err(ClientError::from_send_error)?;
        Ok(serde_json::from_str(&body)?)
    } else {
        Err(read_error(response).await)
    }
}

/// Turn an error response into a `ClientError`, preserving the body text
pub(crate) async fn read_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let message = response.text().await.unwrap_or_else(|_| status.to_string());
    ClientError::from_status(status, message)
}

/// Builder for [`ApiClient`]
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    auth: Option<Arc<AuthManager>>,
}

impl ApiClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the per-request timeout (native targets only)
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Inject the auth manager the client reads tokens from
    pub fn auth_manager(mut self, auth: Arc<AuthManager>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ApiClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut client_builder = ClientBuilder::new();

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }
        #[cfg(target_arch = "wasm32")]
        let _ = self.timeout; // Timeouts not supported on WASM

        client_builder = client_builder.user_agent(
            self.user_agent
                .unwrap_or_else(|| "loopline-client/0.1.0".to_string()),
        );

        let client = client_builder
            .build()
            .map_err(|err| ClientError::Configuration(err.to_string()))?;

        let auth = self
            .auth
            .unwrap_or_else(|| Arc::new(AuthManager::new(Arc::new(MemorySessionStore::default()))));

        Ok(ApiClient {
            client,
            base_url,
            auth,
        })
    }
}
