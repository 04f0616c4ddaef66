//! Server-rendered pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages are leptos views rendered to a string per request; there is no
//! hydration bundle. Forms post back to the route that rendered them, and
//! the route re-renders the same page with field and page-level errors
//! when a submission does not go through.

pub mod home;
pub mod login;
pub mod register;

use leptos::prelude::*;
use leptos::tachys::view::RenderHtml;

use crate::form::FormController;
use crate::schema::FormSchema;

/// Static description of one input on a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire name; also the element id.
    pub name: &'static str,
    pub label: &'static str,
    pub kind: &'static str,
    pub placeholder: &'static str,
}

/// Wrap `body` in the HTML document shell and render it.
pub fn document(title: &'static str, body: impl IntoView + 'static) -> String {
    let html = view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <title>{title}</title>
            </head>
            <body>{body}</body>
        </html>
    };
    html.to_html()
}

/// Render a schema-bound form: page error on top, one block per field with
/// its current value and message, then the submit button.
pub fn form_page<S: FormSchema>(
    title: &'static str,
    action: &'static str,
    fields: &'static [FieldSpec],
    form: &FormController<S>,
    page_error: Option<&str>,
) -> String {
    let page_error = page_error.map(str::to_owned);
    let rows = fields
        .iter()
        .map(|spec| {
            let value = form.values().field(spec.name).unwrap_or_default().to_owned();
            let error = form.error(spec.name).map(str::to_owned);
            view! { <FormField spec=*spec value=value error=error/> }
        })
        .collect::<Vec<_>>();

    document(
        title,
        view! {
            <p class="page-error">{page_error}</p>
            <form method="post" action=action>
                {rows}
                <button type="submit">"Submit"</button>
            </form>
        },
    )
}

#[component]
fn FormField(spec: FieldSpec, value: String, error: Option<String>) -> impl IntoView {
    view! {
        <div class="form-element">
            <label for={spec.name}>{spec.label}</label>
            <input
                id={spec.name}
                name={spec.name}
                type={spec.kind}
                placeholder={spec.placeholder}
                value=value
            />
            <p class="field-error">{error}</p>
        </div>
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
