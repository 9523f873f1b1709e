//! Integration tests for the Loopline API client

use loopline_client::{
    ApiClient, AuthEvent, AuthManager, ClientError, MemorySessionStore, SessionStore,
    MOCK_ACCESS_TOKEN,
};
use serde_json::json;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_with_session(
    server: &MockServer,
    access: &str,
    refresh: Option<&str>,
) -> (ApiClient, Arc<MemorySessionStore>) {
    let store = Arc::new(MemorySessionStore::default());
    store.store_tokens(access, refresh);
    let auth = Arc::new(AuthManager::new(store.clone() as Arc<dyn SessionStore>));
    let client = ApiClient::builder()
        .base_url(server.uri())
        .auth_manager(auth)
        .build()
        .unwrap();
    (client, store)
}

#[tokio::test]
async fn builder_requires_base_url() {
    let result = ApiClient::builder().build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn builder_strips_trailing_slash() {
    let client = ApiClient::new("http://localhost:8080/").unwrap();
    assert_eq!(client.base_url(), "http://localhost:8080");
}

#[tokio::test]
async fn bearer_token_is_attached_when_present() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"posts": []})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = client_with_session(&server, "A1", None);
    let feed: serde_json::Value = client.get("/feed").await.unwrap();
    assert_eq!(feed["posts"], json!([]));
}

#[tokio::test]
async fn unauthenticated_request_proceeds_without_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/terms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"version": 3})))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).unwrap();
    let terms: serde_json::Value = client.get("/terms").await.unwrap();
    assert_eq!(terms["version"], 3);
}

#[tokio::test]
async fn refresh_and_retry_is_invisible_to_the_caller() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(header("x-refresh-token", "R1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "A2"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .and(header("authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"posts": [1, 2]})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = client_with_session(&server, "A1", Some("R1"));
    let feed: serde_json::Value = client.get("/feed").await.unwrap();

    // The caller sees the post-retry outcome; the 401 never surfaced.
    assert_eq!(feed["posts"], json!([1, 2]));
    assert_eq!(store.access_token().as_deref(), Some("A2"));
}

#[tokio::test]
async fn second_unauthorized_propagates_without_another_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(401).set_body_string("still expired"))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "A2"})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = client_with_session(&server, "A1", Some("R1"));
    let result: Result<serde_json::Value, _> = client.get("/feed").await;

    assert!(matches!(result, Err(ClientError::AuthenticationFailed(_))));
    // The refreshed token was still persisted before the retry failed.
    assert_eq!(store.access_token().as_deref(), Some("A2"));
}

#[tokio::test]
async fn missing_refresh_token_propagates_the_original_401() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "A2"})))
        .expect(0)
        .mount(&server)
        .await;

    let (client, store) = client_with_session(&server, "A1", None);
    let result: Result<serde_json::Value, _> = client.get("/feed").await;

    assert!(matches!(result, Err(ClientError::AuthenticationFailed(_))));
    assert_eq!(store.access_token().as_deref(), Some("A1"));
}

#[tokio::test]
async fn failed_refresh_wipes_the_session_and_signals_expiry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_string("refresh revoked"))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = client_with_session(&server, "A1", Some("R1"));
    store.set_cached_user(&json!({"id": "u1"}));

    let seen: Arc<Mutex<Vec<AuthEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    client
        .auth()
        .set_event_handler(Arc::new(move |event| sink.lock().unwrap().push(event)));

    let result: Result<serde_json::Value, _> = client.get("/feed").await;

    assert!(matches!(result, Err(ClientError::AuthenticationFailed(_))));
    // Access token, refresh token, and cached user go together.
    assert_eq!(store.access_token(), None);
    assert_eq!(store.refresh_token(), None);
    assert_eq!(store.cached_user(), None);
    assert_eq!(*seen.lock().unwrap(), vec![AuthEvent::SessionExpired]);
}

#[tokio::test]
async fn mock_sentinel_token_skips_the_refresh_cycle() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(401).set_body_string("nope"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "A2"})))
        .expect(0)
        .mount(&server)
        .await;

    let (client, store) = client_with_session(&server, MOCK_ACCESS_TOKEN, Some("R1"));
    let result: Result<serde_json::Value, _> = client.get("/feed").await;

    assert!(matches!(result, Err(ClientError::AuthenticationFailed(_))));
    assert_eq!(store.access_token().as_deref(), Some(MOCK_ACCESS_TOKEN));
    assert_eq!(store.refresh_token().as_deref(), Some("R1"));
}

#[tokio::test]
async fn non_401_errors_pass_through_with_server_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database on fire"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/stories/9"))
        .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
        .mount(&server)
        .await;

    let (client, _store) = client_with_session(&server, "A1", Some("R1"));

    let result: Result<serde_json::Value, _> = client.get("/feed").await;
    match result {
        Err(ClientError::Server { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "database on fire");
        }
        other => panic!("expected server error, got {other:?}"),
    }

    let result: Result<serde_json::Value, _> = client.get("/stories/9").await;
    assert!(matches!(result, Err(ClientError::NotFound(_))));
}

#[tokio::test]
async fn unreachable_server_is_reported_as_no_response() {
    // Nothing listens on the discard port.
    let client = ApiClient::new("http://127.0.0.1:9").unwrap();
    let result: Result<serde_json::Value, _> = client.get("/feed").await;
    assert!(matches!(result, Err(ClientError::NoResponse(_))));
}

#[tokio::test]
async fn login_persists_tokens_and_user() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login/identifier"))
        .and(header("x-device-id", "D1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A1",
            "refresh_token": "R1",
            "user": {"id": "u1", "name": "maya"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"posts": []})))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::default());
    store.set_device_id("D1");
    let auth = Arc::new(AuthManager::new(store.clone() as Arc<dyn SessionStore>));
    let client = ApiClient::builder()
        .base_url(server.uri())
        .auth_manager(auth)
        .build()
        .unwrap();

    let login = client.login_identifier("12345", "hunter2").await.unwrap();
    assert!(!login.mfa_required);
    assert_eq!(store.access_token().as_deref(), Some("A1"));
    assert_eq!(store.refresh_token().as_deref(), Some("R1"));
    assert_eq!(store.cached_user(), Some(json!({"id": "u1", "name": "maya"})));

    let _: serde_json::Value = client.get("/feed").await.unwrap();
}

#[tokio::test]
async fn mfa_challenge_defers_session_creation() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login/identifier"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "mfaRequired": true,
            "userId": "u9"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/login/mfa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A1",
            "refresh_token": "R1",
            "user": {"id": "u9"}
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).unwrap();

    let challenge = client.login_identifier("a@b.co", "hunter2").await.unwrap();
    assert!(challenge.mfa_required);
    assert_eq!(challenge.user_id.as_deref(), Some("u9"));
    assert!(!client.auth().session_active());

    let login = client.login_mfa("u9", "000000").await.unwrap();
    assert!(!login.mfa_required);
    assert_eq!(client.auth().access_token().as_deref(), Some("A1"));
}

#[tokio::test]
async fn logout_is_best_effort_and_clears_locally() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .and(header("authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("busy"))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = client_with_session(&server, "A1", Some("R1"));
    client.logout().await;

    assert_eq!(store.access_token(), None);
    assert_eq!(store.refresh_token(), None);
}

#[tokio::test]
async fn logout_survives_an_unreachable_server() {
    let store = Arc::new(MemorySessionStore::default());
    store.store_tokens("A1", Some("R1"));
    let auth = Arc::new(AuthManager::new(store.clone() as Arc<dyn SessionStore>));
    let client = ApiClient::builder()
        .base_url("http://127.0.0.1:9")
        .auth_manager(auth)
        .build()
        .unwrap();

    client.logout().await;
    assert_eq!(store.access_token(), None);
}
