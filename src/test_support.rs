//! In-memory `AuthApi` used by handler and route tests.

use std::sync::Mutex;

use async_trait::async_trait;
use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use time::OffsetDateTime;

use crate::api::{ApiError, AuthApi};
use crate::schema::{LoginCredentials, RegistrationRequest};
use crate::session::SessionUser;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateSession { credentials: LoginCredentials, cookie: Option<String> },
    CreateUser(RegistrationRequest),
    CurrentUser { cookie: Option<String> },
}

/// Scripted backend. `None` statuses mean success.
#[derive(Debug, Default)]
pub struct StubApi {
    pub session_status: Option<u16>,
    pub user_status: Option<u16>,
    pub set_cookies: Vec<&'static str>,
    pub current: Option<SessionUser>,
    pub me_undecodable: bool,
    pub calls: Mutex<Vec<Call>>,
}

impl StubApi {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn cookie_of(headers: &HeaderMap) -> Option<String> {
    headers.get(COOKIE).and_then(|v| v.to_str().ok()).map(str::to_owned)
}

#[async_trait]
impl AuthApi for StubApi {
    async fn create_session(
        &self,
        credentials: &LoginCredentials,
        forwarded: &HeaderMap,
    ) -> Result<Vec<HeaderValue>, ApiError> {
        self.record(Call::CreateSession { credentials: credentials.clone(), cookie: cookie_of(forwarded) });
        match self.session_status {
            Some(status) => Err(ApiError::Status { status }),
            None => Ok(self.set_cookies.iter().copied().map(HeaderValue::from_static).collect()),
        }
    }

    async fn create_user(&self, request: &RegistrationRequest) -> Result<(), ApiError> {
        self.record(Call::CreateUser(request.clone()));
        match self.user_status {
            Some(status) => Err(ApiError::Status { status }),
            None => Ok(()),
        }
    }

    async fn current_user(&self, forwarded: &HeaderMap) -> Result<Option<SessionUser>, ApiError> {
        self.record(Call::CurrentUser { cookie: cookie_of(forwarded) });
        if self.me_undecodable {
            return Err(ApiError::Decode("expected value at line 1 column 1".into()));
        }
        Ok(self.current.clone())
    }
}

pub fn user_named(name: &str) -> SessionUser {
    SessionUser {
        id: "62a1f0c2e4b0a1b2c3d4e5f6".into(),
        email: format!("{}@example.com", name.to_ascii_lowercase()),
        name: name.into(),
        created_at: Some(OffsetDateTime::UNIX_EPOCH),
        updated_at: Some(OffsetDateTime::UNIX_EPOCH),
        version: 0,
        session: "62a1f0c2e4b0a1b2c3d4e5f7".into(),
        iat: 0,
        exp: 900,
    }
}
