//! Server-rendered login, registration and home pages backed by a remote
//! session API.
//!
//! The browser talks only to the axum router in [`routes`]. Form posts are
//! validated by [`schema`] through a [`form::FormController`], submitted by
//! [`submit`] over the [`api::AuthApi`] seam, and the current user is read
//! per request by [`session`].

pub mod api;
pub mod config;
pub mod form;
pub mod pages;
pub mod routes;
pub mod schema;
pub mod session;
pub mod state;
pub mod submit;
#[cfg(test)]
mod test_support;
