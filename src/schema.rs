//! Declarative validation rules for the login and registration forms.
//!
//! DESIGN
//! ======
//! Each form is a plain struct deriving `validator::Validate`. Field names on
//! the wire (form posts and backend JSON) are the camelCase names the backend
//! expects. `validate` turns the derive's error tree into `FieldErrors`: one
//! message per field, picked by rule precedence so that the first rule in
//! declaration order wins when several fail at once.
//!
//! Validation never panics on user input. Values are not trimmed or
//! otherwise rewritten, so the normalized value equals the candidate.

use std::borrow::Cow;
use std::collections::BTreeMap;

use regex::Regex;
use serde::Serialize;
use validator::{Validate, ValidationError, ValidationErrors};

// =============================================================================
// FIELD ERRORS
// =============================================================================

/// Per-field validation messages, keyed by wire field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

// =============================================================================
// SCHEMA TRAIT
// =============================================================================

/// A form whose fields are plain strings bound by wire name.
pub trait FormSchema: Validate + Clone + Default {
    /// Declared fields, in render order.
    const FIELDS: &'static [&'static str];

    fn field(&self, name: &str) -> Option<&str>;

    fn field_mut(&mut self, name: &str) -> Option<&mut String>;
}

/// Run the schema against `input`.
///
/// Returns the normalized value, or the first failing rule's message for
/// every field that failed. The cross-field password rule is checked even
/// when other fields already failed.
///
/// # Errors
///
/// Returns `FieldErrors` with at least one entry when any rule fails.
pub fn validate<S: FormSchema>(input: &S) -> Result<S, FieldErrors> {
    match input.validate() {
        Ok(()) => Ok(input.clone()),
        Err(errors) => Err(collect_field_errors::<S>(&errors)),
    }
}

fn collect_field_errors<S: FormSchema>(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    for (key, list) in errors.field_errors() {
        let Some(field) = wire_field::<S>(&key) else {
            continue;
        };
        if let Some(message) = first_message(list) {
            out.insert(field, message);
        }
    }
    out
}

/// Resolve a validator error key (Rust ident or serde name) to a declared wire name.
fn wire_field<S: FormSchema>(key: &str) -> Option<&'static str> {
    let squashed: String = key.chars().filter(|c| *c != '_').collect();
    S::FIELDS
        .iter()
        .copied()
        .find(|field| *field == key || field.eq_ignore_ascii_case(&squashed))
}

/// Precedence mirrors declaration order: format, then presence/length, then cross-field.
fn rule_rank(code: &str) -> u8 {
    match code {
        "email" => 0,
        "length" => 1,
        "must_match" => 2,
        _ => 3,
    }
}

fn first_message(list: &[ValidationError]) -> Option<String> {
    list.iter()
        .min_by_key(|e| rule_rank(&e.code))
        .map(|e| e.message.as_ref().map_or_else(|| e.code.to_string(), ToString::to_string))
}

// =============================================================================
// RULES
// =============================================================================

/// Shape of an acceptable address. The local part must also not start with
/// a dot or contain `..`, which `email_format` checks separately.
const EMAIL_PATTERN: &str = r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$";

pub const PASSWORD_MIN_LEN: usize = 6;

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Email format: dotted domain with an alphabetic TLD of two or more letters.
fn email_format(value: &str) -> Result<(), ValidationError> {
    let valid = !value.starts_with('.')
        && !value.contains("..")
        && Regex::new(EMAIL_PATTERN).is_ok_and(|re| re.is_match(value));
    if valid { Ok(()) } else { Err(rule_error("email", "Not a Valid Email")) }
}

/// Minimum password length, counted in UTF-16 code units.
fn password_min_length(value: &str) -> Result<(), ValidationError> {
    if value.encode_utf16().count() >= PASSWORD_MIN_LEN {
        Ok(())
    } else {
        Err(rule_error("length", "Password to short - should be 6 chars minimum"))
    }
}

// =============================================================================
// LOGIN
// =============================================================================

/// Login form: both fields must be non-empty. No email format check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Validate)]
pub struct LoginCredentials {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl FormSchema for LoginCredentials {
    const FIELDS: &'static [&'static str] = &["email", "password"];

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "email" => Some(&self.email),
            "password" => Some(&self.password),
            _ => None,
        }
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "email" => Some(&mut self.email),
            "password" => Some(&mut self.password),
            _ => None,
        }
    }
}

// =============================================================================
// REGISTRATION
// =============================================================================

/// Registration form. `passwordConfirmation` is sent to the backend as-is.
///
/// An empty email fails the format rule before the presence rule, and an
/// empty password fails the minimum length, so those are the messages shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Validate)]
pub struct RegistrationRequest {
    #[validate(length(min = 1, message = "Name should not be empty"))]
    pub name: String,
    #[validate(custom(function = "email_format"), length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(custom(function = "password_min_length"))]
    pub password: String,
    #[serde(rename = "passwordConfirmation")]
    #[validate(
        length(min = 1, message = "Confirm password is required"),
        must_match(other = "password", message = "Password do not match")
    )]
    pub password_confirmation: String,
}

impl FormSchema for RegistrationRequest {
    const FIELDS: &'static [&'static str] = &["name", "email", "password", "passwordConfirmation"];

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "email" => Some(&self.email),
            "password" => Some(&self.password),
            "passwordConfirmation" => Some(&self.password_confirmation),
            _ => None,
        }
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "name" => Some(&mut self.name),
            "email" => Some(&mut self.email),
            "password" => Some(&mut self.password),
            "passwordConfirmation" => Some(&mut self.password_confirmation),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "schema_test.rs"]
mod tests;
