//! Current-user lookup against the backend `/api/me` endpoint.
//!
//! SYSTEM CONTEXT
//! ==============
//! The home page calls `fetch_current_user` while assembling the response,
//! forwarding the browser's cookies, so the first paint already shows the
//! right greeting. The same call backs `/session/me`, which the page script
//! polls to revalidate; `SessionCache` carries the server-provided seed into
//! the render.
//!
//! ERROR HANDLING
//! ==============
//! "Not logged in" is not an error: any non-2xx answer, an empty body, or a
//! JSON `null` all mean no active session. Only transport failures and
//! undecodable bodies surface as `ApiError`.

use axum::http::HeaderMap;
use axum::http::header::{AUTHORIZATION, COOKIE};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::api::ApiError;

/// Snapshot of the server-side session user. Read-only to this client.
///
/// Only `name` is rendered, so it is the only field a payload must carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    pub name: String,
    #[serde(rename = "createdAt", default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(rename = "updatedAt", default, with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
    /// Document version marker.
    #[serde(rename = "__v", default)]
    pub version: i64,
    /// Session identifier the token was minted for.
    #[serde(default)]
    pub session: String,
    /// Issued-at, seconds since the epoch.
    #[serde(default)]
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    #[serde(default)]
    pub exp: i64,
}

/// Copy the credential-bearing headers (cookies, bearer tokens) from an
/// incoming request. Host and hop-by-hop headers are never forwarded.
#[must_use]
pub fn forward_headers(incoming: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::new();
    for name in [COOKIE, AUTHORIZATION] {
        for value in incoming.get_all(&name) {
            out.append(name.clone(), value.clone());
        }
    }
    out
}

/// `GET url` with `forwarded` headers, returning the session user if any.
///
/// # Errors
///
/// Returns `ApiError::Network` on transport failure and `ApiError::Decode`
/// when a 2xx body is neither empty, `null`, nor a user object.
pub async fn fetch_current_user(
    http: &reqwest::Client,
    url: &str,
    forwarded: &HeaderMap,
) -> Result<Option<SessionUser>, ApiError> {
    let response = http
        .get(url)
        .headers(forwarded.clone())
        .send()
        .await
        .map_err(ApiError::Network)?;

    let status = response.status();
    if !status.is_success() {
        tracing::debug!(status = status.as_u16(), "no active session");
        return Ok(None);
    }

    let body = response.bytes().await.map_err(ApiError::Network)?;
    parse_user(&body)
}

fn parse_user(body: &[u8]) -> Result<Option<SessionUser>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice::<Option<SessionUser>>(body).map_err(|e| ApiError::Decode(e.to_string()))
}

// =============================================================================
// SEEDED CACHE
// =============================================================================

/// Current-user value seeded from the server-side fetch. The page script
/// replaces the rendered greeting once `/session/me` answers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionCache {
    data: Option<SessionUser>,
}

impl SessionCache {
    #[must_use]
    pub fn seeded(fallback: Option<SessionUser>) -> Self {
        Self { data: fallback }
    }

    #[must_use]
    pub fn data(&self) -> Option<&SessionUser> {
        self.data.as_ref()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
