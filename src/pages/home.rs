//! Home page: greets the current user or asks them to log in.
//!
//! The greeting is rendered from the server-side session fetch, so first
//! paint needs no extra round trip. A small script then revalidates against
//! `/session/me` on load and whenever the window regains focus, swapping the
//! text only when the answer differs. A failed revalidation leaves the
//! greeting as it was; only a `null` answer switches to the logged-out text.

use leptos::prelude::*;

use super::document;
use crate::session::{SessionCache, SessionUser};

pub const LOGGED_OUT_TEXT: &str = "Please Login";

const REVALIDATE_SCRIPT: &str = r#"(function () {
  var el = document.getElementById("greeting");
  function render(user) {
    var text = user ? "Welcome " + user.name : "Please Login";
    if (el.textContent !== text) {
      el.textContent = text;
      el.className = user ? "" : "container";
    }
  }
  function revalidate() {
    fetch("/session/me", { credentials: "same-origin", headers: { Accept: "application/json" } })
      .then(function (res) {
        if (!res.ok) throw new Error("session revalidation failed: " + res.status);
        return res.json();
      })
      .then(render)
      .catch(function () {});
  }
  window.addEventListener("load", revalidate);
  window.addEventListener("focus", revalidate);
})();"#;

#[must_use]
pub fn greeting(user: Option<&SessionUser>) -> String {
    match user {
        Some(user) => format!("Welcome {}", user.name),
        None => LOGGED_OUT_TEXT.to_owned(),
    }
}

pub fn render(cache: &SessionCache) -> String {
    let user = cache.data();
    let class = if user.is_some() { "" } else { "container" };
    let text = greeting(user);

    document(
        "Home",
        view! {
            <div id="greeting" class=class>{text}</div>
            <script inner_html=REVALIDATE_SCRIPT></script>
        },
    )
}
