//! Home page and the current-user JSON endpoint.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, Json};

use crate::pages;
use crate::session::{self, SessionCache, SessionUser};
use crate::state::AppState;

/// `GET /`: fetch the session once, then render with it as the seed.
pub async fn home(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let forwarded = session::forward_headers(&headers);
    let fallback = match state.api.current_user(&forwarded).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = ?e, "session fetch failed, rendering logged-out view");
            None
        }
    };
    Html(pages::home::render(&SessionCache::seeded(fallback)))
}

/// `GET /session/me`: current user or `null`.
pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<Option<SessionUser>>, StatusCode> {
    let forwarded = session::forward_headers(&headers);
    state.api.current_user(&forwarded).await.map(Json).map_err(|e| {
        tracing::warn!(error = ?e, "session revalidation failed");
        StatusCode::BAD_GATEWAY
    })
}
