//! Form controller: binds field values to a schema and gates submission.
//!
//! SYSTEM CONTEXT
//! ==============
//! One controller is built per form post and the posted pairs are bound by
//! field name. It owns the field values and the current `FieldErrors`;
//! nothing is shared between forms or requests. `submit` is the only path to
//! a submission handler, so a form that fails validation can never reach the
//! network. Every submit regenerates the errors, so a field that now passes
//! loses its message.

use std::future::Future;

use crate::schema::{self, FieldErrors, FormSchema};

/// Result of a submit attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum Submission<T> {
    /// Validation failed; the handler was not called.
    Invalid,
    /// Validation passed and the handler ran to completion.
    Handled(T),
}

#[derive(Debug, Clone, Default)]
pub struct FormController<S: FormSchema> {
    values: S,
    errors: FieldErrors,
}

impl<S: FormSchema> FormController<S> {
    #[must_use]
    pub fn new() -> Self {
        Self { values: S::default(), errors: FieldErrors::new() }
    }

    /// Build a controller from posted `(name, value)` pairs. Undeclared names
    /// are ignored; a repeated name keeps its last value.
    #[must_use]
    pub fn bind<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut form = Self::new();
        for (name, value) in pairs {
            if !form.set_field(name.as_ref(), value) {
                tracing::debug!(field = name.as_ref(), "ignoring undeclared form field");
            }
        }
        form
    }

    /// Bind `value` to the named field. Returns `false` for undeclared names.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        let Some(slot) = self.values.field_mut(name) else {
            return false;
        };
        *slot = value.into();
        true
    }

    #[must_use]
    pub fn values(&self) -> &S {
        &self.values
    }

    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    #[must_use]
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field)
    }

    /// Validate the live values and, only if they pass, hand the normalized
    /// value to `handler`.
    pub async fn submit<F, Fut, T>(&mut self, handler: F) -> Submission<T>
    where
        F: FnOnce(S) -> Fut,
        Fut: Future<Output = T>,
    {
        match schema::validate(&self.values) {
            Ok(normalized) => {
                self.errors.clear();
                Submission::Handled(handler(normalized).await)
            }
            Err(errors) => {
                tracing::debug!(fields = ?errors.fields().collect::<Vec<_>>(), "form rejected by schema");
                self.errors = errors;
                Submission::Invalid
            }
        }
    }
}

#[cfg(test)]
#[path = "form_test.rs"]
mod tests;
