//! Submission handlers for the login and registration forms.
//!
//! Both handlers take an already-validated value, make exactly one backend
//! call, and reduce the result to an `Outcome`. There is no retry and no
//! distinction between kinds of failure.

use axum::http::{HeaderMap, HeaderValue};

use crate::api::AuthApi;
use crate::schema::{LoginCredentials, RegistrationRequest};

/// Where a successful submission sends the browser.
pub const HOME_ROUTE: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Navigate to `location`, setting any relayed cookies on the way.
    Redirect { location: &'static str, set_cookies: Vec<HeaderValue> },
    /// Show `message` above the form and keep the entered values.
    Failed(String),
}

/// Create a session. Browser cookies are forwarded and the backend's
/// `Set-Cookie` headers are relayed on the redirect.
pub async fn submit_login(api: &dyn AuthApi, credentials: LoginCredentials, forwarded: &HeaderMap) -> Outcome {
    match api.create_session(&credentials, forwarded).await {
        Ok(set_cookies) => Outcome::Redirect { location: HOME_ROUTE, set_cookies },
        Err(e) => {
            tracing::warn!(error = ?e, "login submission failed");
            Outcome::Failed(e.to_string())
        }
    }
}

/// Create a user. No credentials travel either way.
pub async fn submit_registration(api: &dyn AuthApi, request: RegistrationRequest) -> Outcome {
    match api.create_user(&request).await {
        Ok(()) => Outcome::Redirect { location: HOME_ROUTE, set_cookies: Vec::new() },
        Err(e) => {
            tracing::warn!(error = ?e, "registration submission failed");
            Outcome::Failed(e.to_string())
        }
    }
}

#[cfg(test)]
#[path = "submit_test.rs"]
mod tests;
