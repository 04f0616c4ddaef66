//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! only carries the backend client; form and error state live in the
//! handler that renders them and die with the request.

use std::sync::Arc;

use crate::api::AuthApi;

/// Clone is required by Axum; the backend client is shared behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn AuthApi>,
}

impl AppState {
    #[must_use]
    pub fn new(api: Arc<dyn AuthApi>) -> Self {
        Self { api }
    }
}
