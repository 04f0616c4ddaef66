//! Login and registration routes.
//!
//! `GET` renders an empty form. `POST` binds the posted fields by name to a
//! `FormController`, which only reaches the submission handler when the
//! schema passes. Rejections and backend failures both re-render the form
//! with the entered values; success is a `303` to the home route.

use axum::Form;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::SET_COOKIE;
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::form::{FormController, Submission};
use crate::pages;
use crate::schema::{LoginCredentials, RegistrationRequest};
use crate::session;
use crate::state::AppState;
use crate::submit::{self, Outcome};

/// `GET /auth/login`
pub async fn login_form() -> Html<String> {
    Html(pages::login::render(&FormController::new(), None))
}

/// `POST /auth/login`: validate, create a session, relay its cookies.
pub async fn login_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    let forwarded = session::forward_headers(&headers);
    let mut form = FormController::<LoginCredentials>::bind(fields);

    let submission = form
        .submit(|credentials| async move { submit::submit_login(state.api.as_ref(), credentials, &forwarded).await })
        .await;

    match submission {
        Submission::Invalid => Html(pages::login::render(&form, None)).into_response(),
        Submission::Handled(Outcome::Failed(message)) => {
            Html(pages::login::render(&form, Some(message.as_str()))).into_response()
        }
        Submission::Handled(Outcome::Redirect { location, set_cookies }) => redirect(location, set_cookies),
    }
}

/// `GET /auth/register`
pub async fn register_form() -> Html<String> {
    Html(pages::register::render(&FormController::new(), None))
}

/// `POST /auth/register`: validate and create the user.
pub async fn register_submit(State(state): State<AppState>, Form(fields): Form<Vec<(String, String)>>) -> Response {
    let mut form = FormController::<RegistrationRequest>::bind(fields);

    let submission = form
        .submit(|request| async move { submit::submit_registration(state.api.as_ref(), request).await })
        .await;

    match submission {
        Submission::Invalid => Html(pages::register::render(&form, None)).into_response(),
        Submission::Handled(Outcome::Failed(message)) => {
            Html(pages::register::render(&form, Some(message.as_str()))).into_response()
        }
        Submission::Handled(Outcome::Redirect { location, set_cookies }) => redirect(location, set_cookies),
    }
}

fn redirect(location: &str, set_cookies: Vec<axum::http::HeaderValue>) -> Response {
    let mut response = Redirect::to(location).into_response();
    for cookie in set_cookies {
        response.headers_mut().append(SET_COOKIE, cookie);
    }
    response
}
