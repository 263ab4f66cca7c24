//! Selector derivation.
//!
//! Every recorded action carries a selector computed from the target's
//! observable attributes at record time. Derivation is a pure function of
//! the `ElementSnapshot` and evaluates a fixed priority order:
//!
//!   1. intent attribute   → `[data-action="save"]`
//!   2. id                 → `#submit-btn`
//!   3. name               → `[name="username"]`
//!   4. first class token  → `.primary`
//!   5. lower-cased tag    → `button`
//!
//! Empty values count as absent. Exactly one selector is produced.

use reprise_contracts::{config::DEFAULT_INTENT_ATTRIBUTE, event::ElementSnapshot};

/// The selector derivation policy, parameterized by the intent attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorPolicy {
    intent_attribute: String,
}

impl SelectorPolicy {
    pub fn new(intent_attribute: impl Into<String>) -> Self {
        Self {
            intent_attribute: intent_attribute.into(),
        }
    }

    pub fn intent_attribute(&self) -> &str {
        &self.intent_attribute
    }

    /// Derive the selector for `element`.
    ///
    /// The result is non-empty as long as `element.tag_name` is; the
    /// recorder rejects tagless targets before calling this.
    pub fn derive(&self, element: &ElementSnapshot) -> String {
        if let Some(intent) = present(element.attribute(&self.intent_attribute)) {
            return attribute_selector(&self.intent_attribute, intent);
        }
        if let Some(id) = present(element.id.as_deref()) {
            return format!("#{id}");
        }
        if let Some(name) = present(element.name.as_deref()) {
            return attribute_selector("name", name);
        }
        if let Some(class) = element.first_class() {
            return format!(".{class}");
        }
        element.tag_name.to_lowercase()
    }
}

impl Default for SelectorPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_INTENT_ATTRIBUTE)
    }
}

/// Render `[key="value"]`, escaping `\` and `"` inside the value.
pub fn attribute_selector(key: &str, value: &str) -> String {
    let mut out = String::with_capacity(key.len() + value.len() + 5);
    out.push('[');
    out.push_str(key);
    out.push_str("=\"");
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push_str("\"]");
    out
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
