//! Backend session API client.
//!
//! ARCHITECTURE
//! ============
//! `AuthApi` is the seam between page handlers and the network. The real
//! implementation, `HttpAuthApi`, is a thin reqwest wrapper around the three
//! backend endpoints; route tests swap in a stub.
//!
//! ERROR HANDLING
//! ==============
//! Failures are not classified: a 409 for a duplicate email and a refused
//! connection both end up as one message string on the form. The `Display`
//! text of `ApiError` is that message.

use std::time::Duration;

use async_trait::async_trait;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue};

use crate::config::AppConfig;
use crate::schema::{LoginCredentials, RegistrationRequest};
use crate::session::{self, SessionUser};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a non-2xx status.
    #[error("Request failed with status code {status}")]
    Status { status: u16 },

    /// The request never produced a response (DNS, refused, timed out).
    #[error("Network Error")]
    Network(#[source] reqwest::Error),

    /// A 2xx body could not be decoded.
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// Calls issued against the backend on behalf of the browser.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /api/sessions` in credential mode: browser cookies go out and
    /// the returned `Set-Cookie` values come back for relaying.
    async fn create_session(
        &self,
        credentials: &LoginCredentials,
        forwarded: &HeaderMap,
    ) -> Result<Vec<HeaderValue>, ApiError>;

    /// `POST /api/users`. No cookies are sent or relayed.
    async fn create_user(&self, request: &RegistrationRequest) -> Result<(), ApiError>;

    /// `GET /api/me` with the browser's credentials.
    async fn current_user(&self, forwarded: &HeaderMap) -> Result<Option<SessionUser>, ApiError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

pub struct HttpAuthApi {
    http: reqwest::Client,
    sessions_url: String,
    users_url: String,
    me_url: String,
}

impl HttpAuthApi {
    /// Build a client for the endpoints under `config.server_endpoint`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::HttpClientBuild` if the TLS backend cannot initialise.
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let mut builder =
            reqwest::Client::builder().connect_timeout(Duration::from_secs(config.timeouts.connect_secs));
        if let Some(secs) = config.timeouts.request_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, sessions_url: config.sessions_url(), users_url: config.users_url(), me_url: config.me_url() })
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn create_session(
        &self,
        credentials: &LoginCredentials,
        forwarded: &HeaderMap,
    ) -> Result<Vec<HeaderValue>, ApiError> {
        let response = self
            .http
            .post(&self.sessions_url)
            .headers(forwarded.clone())
            .json(credentials)
            .send()
            .await
            .map_err(ApiError::Network)?;

        let response = ensure_success(response)?;
        Ok(set_cookies(response.headers()))
    }

    async fn create_user(&self, request: &RegistrationRequest) -> Result<(), ApiError> {
        let response = self
            .http
            .post(&self.users_url)
            .json(request)
            .send()
            .await
            .map_err(ApiError::Network)?;

        ensure_success(response).map(|_| ())
    }

    async fn current_user(&self, forwarded: &HeaderMap) -> Result<Option<SessionUser>, ApiError> {
        session::fetch_current_user(&self.http, &self.me_url, forwarded).await
    }
}

fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status { status: status.as_u16() })
    }
}

fn set_cookies(headers: &HeaderMap) -> Vec<HeaderValue> {
    headers.get_all(SET_COOKIE).iter().cloned().collect()
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
