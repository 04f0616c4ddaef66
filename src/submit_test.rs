use axum::http::header::COOKIE;

use super::*;
use crate::test_support::{Call, StubApi};

fn credentials() -> LoginCredentials {
    LoginCredentials { email: "ada@example.com".into(), password: "secret".into() }
}

fn registration() -> RegistrationRequest {
    RegistrationRequest {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        password: "secret1".into(),
        password_confirmation: "secret1".into(),
    }
}

#[tokio::test]
async fn login_success_redirects_home_with_relayed_cookies() {
    let api = StubApi { set_cookies: vec!["accessToken=a1; Path=/"], ..StubApi::default() };
    let mut forwarded = HeaderMap::new();
    forwarded.insert(COOKIE, HeaderValue::from_static("theme=dark"));

    let outcome = submit_login(&api, credentials(), &forwarded).await;

    assert_eq!(
        outcome,
        Outcome::Redirect {
            location: HOME_ROUTE,
            set_cookies: vec![HeaderValue::from_static("accessToken=a1; Path=/")],
        }
    );
    assert_eq!(
        api.calls(),
        vec![Call::CreateSession { credentials: credentials(), cookie: Some("theme=dark".into()) }]
    );
}

#[tokio::test]
async fn login_failure_stores_message() {
    let api = StubApi { session_status: Some(401), ..StubApi::default() };

    let outcome = submit_login(&api, credentials(), &HeaderMap::new()).await;

    assert_eq!(outcome, Outcome::Failed("Request failed with status code 401".into()));
    assert_eq!(api.calls().len(), 1);
}

#[tokio::test]
async fn registration_success_redirects_without_cookies() {
    let api = StubApi::default();

    let outcome = submit_registration(&api, registration()).await;

    assert_eq!(outcome, Outcome::Redirect { location: HOME_ROUTE, set_cookies: Vec::new() });
    assert_eq!(api.calls(), vec![Call::CreateUser(registration())]);
}

#[tokio::test]
async fn registration_failure_is_not_classified() {
    for status in [400, 409, 500, 502] {
        let api = StubApi { user_status: Some(status), ..StubApi::default() };
        let outcome = submit_registration(&api, registration()).await;
        assert_eq!(outcome, Outcome::Failed(format!("Request failed with status code {status}")));
    }
}
