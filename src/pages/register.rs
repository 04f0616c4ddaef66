//! Registration page.

use super::{FieldSpec, form_page};
use crate::form::FormController;
use crate::schema::RegistrationRequest;

pub const ACTION: &str = "/auth/register";

const FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "name", label: "Name", kind: "text", placeholder: "Name" },
    FieldSpec { name: "email", label: "Email", kind: "email", placeholder: "Emails" },
    FieldSpec { name: "password", label: "Password", kind: "password", placeholder: "Password" },
    FieldSpec {
        name: "passwordConfirmation",
        label: "Confirm Password",
        kind: "password",
        placeholder: "Confirm Password",
    },
];

pub fn render(form: &FormController<RegistrationRequest>, register_error: Option<&str>) -> String {
    form_page("Register", ACTION, FIELDS, form, register_error)
}
