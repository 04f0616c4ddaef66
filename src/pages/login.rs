//! Login page.

use super::{FieldSpec, form_page};
use crate::form::FormController;
use crate::schema::LoginCredentials;

pub const ACTION: &str = "/auth/login";

const FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "email", label: "Email", kind: "email", placeholder: "Emails" },
    FieldSpec { name: "password", label: "Password", kind: "password", placeholder: "Password" },
];

pub fn render(form: &FormController<LoginCredentials>, login_error: Option<&str>) -> String {
    form_page("Login", ACTION, FIELDS, form, login_error)
}
