//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser only ever talks to this router. Page routes render HTML and
//! accept form posts; `/session/me` is the JSON endpoint the home page uses
//! to revalidate the greeting. Every backend call goes through `AppState.api`.

pub mod auth;
pub mod home;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::home))
        .route("/auth/login", get(auth::login_form).post(auth::login_submit))
        .route("/auth/register", get(auth::register_form).post(auth::register_submit))
        .route("/session/me", get(home::me))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
