//! Canned pages for the scenarios and tests.
//!
//! All markup here is fictional. Each function returns a fresh document, so
//! a recording made on one page can be replayed on another.

use reprise_contracts::event::ElementSnapshot;

use crate::document::Document;

pub const SUBMIT_BUTTON: &str = "#submit-btn";
pub const USERNAME_FIELD: &str = "[name=\"username\"]";
pub const PASSWORD_FIELD: &str = "[name=\"password\"]";
pub const REMEMBER_ME: &str = "[data-action=\"remember-me\"]";

/// A small login form.
///
/// ```text
/// FORM#login-form
///   H1.title
///   INPUT[name=username][type=text]
///   INPUT[name=password][type=password]
///   INPUT.check[data-action=remember-me][type=checkbox]
///   BUTTON#submit-btn.btn.primary
///   A.link.forgot
/// ```
pub fn login_page() -> Document {
    Document::from_elements(login_elements())
}

/// The login form after a redesign that dropped `#submit-btn`.
pub fn login_page_without_submit() -> Document {
    Document::from_elements(
        login_elements()
            .into_iter()
            .filter(|el| el.id.as_deref() != Some("submit-btn")),
    )
}

fn login_elements() -> Vec<ElementSnapshot> {
    vec![
        ElementSnapshot::new("form").with_id("login-form"),
        ElementSnapshot::new("h1").with_class("title"),
        ElementSnapshot::new("input")
            .with_name("username")
            .with_input_type("text")
            .with_value(""),
        ElementSnapshot::new("input")
            .with_name("password")
            .with_input_type("password")
            .with_value(""),
        ElementSnapshot::new("input")
            .with_class("check")
            .with_attribute("data-action", "remember-me")
            .with_input_type("checkbox"),
        ElementSnapshot::new("button")
            .with_id("submit-btn")
            .with_class("btn primary"),
        ElementSnapshot::new("a").with_class("link forgot"),
    ]
}
