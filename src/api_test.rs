use axum::http::header::COOKIE;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::config::{DEFAULT_PORT, HttpTimeouts};

fn config_for(endpoint: &str) -> AppConfig {
    AppConfig {
        server_endpoint: endpoint.trim_end_matches('/').to_owned(),
        port: DEFAULT_PORT,
        timeouts: HttpTimeouts { request_secs: Some(5), connect_secs: 2 },
    }
}

fn api_for(server: &MockServer) -> HttpAuthApi {
    HttpAuthApi::new(&config_for(&server.uri())).unwrap()
}

fn credentials() -> LoginCredentials {
    LoginCredentials { email: "ada@example.com".into(), password: "secret".into() }
}

fn browser_cookies() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, HeaderValue::from_static("theme=dark"));
    headers
}

fn user_json() -> serde_json::Value {
    serde_json::json!({
        "_id": "62a1f0c2e4b0a1b2c3d4e5f6",
        "email": "ada@example.com",
        "name": "Ada",
        "createdAt": "2022-06-09T12:00:00.000Z",
        "updatedAt": "2022-06-09T12:00:00.000Z",
        "__v": 0,
        "session": "62a1f0c2e4b0a1b2c3d4e5f7",
        "iat": 1_654_776_000,
        "exp": 1_654_776_900
    })
}

// =============================================================================
// create_session
// =============================================================================

#[tokio::test]
async fn create_session_posts_credentials_and_relays_cookies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/sessions"))
        .and(header("cookie", "theme=dark"))
        .and(body_json(serde_json::json!({ "email": "ada@example.com", "password": "secret" })))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("set-cookie", "accessToken=a1; Path=/; HttpOnly")
                .append_header("set-cookie", "refreshToken=r1; Path=/; HttpOnly")
                .set_body_json(serde_json::json!({ "accessToken": "a1", "refreshToken": "r1" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let cookies = api_for(&server)
        .create_session(&credentials(), &browser_cookies())
        .await
        .unwrap();

    assert_eq!(cookies.len(), 2);
    assert_eq!(cookies[0], "accessToken=a1; Path=/; HttpOnly");
    assert_eq!(cookies[1], "refreshToken=r1; Path=/; HttpOnly");
}

#[tokio::test]
async fn create_session_unauthorized_reports_status_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/sessions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid email or password"))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .create_session(&credentials(), &HeaderMap::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Status { status: 401 }));
    assert_eq!(err.to_string(), "Request failed with status code 401");
}

#[tokio::test]
async fn create_session_unreachable_backend_is_network_error() {
    let api = HttpAuthApi::new(&config_for("http://127.0.0.1:9")).unwrap();

    let err = api.create_session(&credentials(), &HeaderMap::new()).await.unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(err.to_string(), "Network Error");
}

#[tokio::test]
async fn slow_backend_is_awaited_when_no_request_timeout_is_set() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/sessions"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(1500)))
        .mount(&server)
        .await;

    let mut config = config_for(&server.uri());
    config.timeouts.request_secs = None;
    let api = HttpAuthApi::new(&config).unwrap();

    assert!(api.create_session(&credentials(), &HeaderMap::new()).await.is_ok());
}

#[tokio::test]
async fn configured_request_timeout_surfaces_as_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/sessions"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(1500)))
        .mount(&server)
        .await;

    let mut config = config_for(&server.uri());
    config.timeouts.request_secs = Some(1);
    let api = HttpAuthApi::new(&config).unwrap();

    let err = api.create_session(&credentials(), &HeaderMap::new()).await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}

// =============================================================================
// create_user
// =============================================================================

#[tokio::test]
async fn create_user_sends_confirmation_as_is() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/users"))
        .and(body_json(serde_json::json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "secret1",
            "passwordConfirmation": "secret1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .expect(1)
        .mount(&server)
        .await;

    let request = RegistrationRequest {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        password: "secret1".into(),
        password_confirmation: "secret1".into(),
    };
    api_for(&server).create_user(&request).await.unwrap();
}

#[tokio::test]
async fn create_user_conflict_collapses_to_status_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(409).set_body_string("Account already exists"))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .create_user(&RegistrationRequest::default())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Request failed with status code 409");
}

// =============================================================================
// current_user
// =============================================================================

#[tokio::test]
async fn current_user_returns_user_and_forwards_cookies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/me"))
        .and(header("cookie", "theme=dark"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .expect(1)
        .mount(&server)
        .await;

    let user = api_for(&server)
        .current_user(&browser_cookies())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(user.name, "Ada");
    assert_eq!(user.id, "62a1f0c2e4b0a1b2c3d4e5f6");
    assert_eq!(user.exp, 1_654_776_900);
}

#[tokio::test]
async fn current_user_non_success_means_no_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/me"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let user = api_for(&server).current_user(&HeaderMap::new()).await.unwrap();

    assert!(user.is_none());
}

#[tokio::test]
async fn current_user_null_body_means_no_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/me"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let user = api_for(&server).current_user(&HeaderMap::new()).await.unwrap();

    assert!(user.is_none());
}

#[tokio::test]
async fn current_user_transport_failure_is_an_error() {
    let api = HttpAuthApi::new(&config_for("http://127.0.0.1:9")).unwrap();

    let err = api.current_user(&HeaderMap::new()).await.unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
}
