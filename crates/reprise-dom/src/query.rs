//! The selector subset the reference document understands.
//!
//! Exactly the shapes the recorder derives, plus nothing else:
//!
//!   `#id`   `.class`   `[attr="value"]`   `tag`
//!
//! Attribute values may be quoted with `"` and use backslash escapes, which
//! is how `SelectorPolicy` writes them. Tag matching ignores case.

use reprise_contracts::{
    error::{RepriseError, RepriseResult},
    event::ElementSnapshot,
};

/// A parsed simple selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(String),
    Class(String),
    Attribute { name: String, value: String },
    Tag(String),
}

impl Selector {
    pub fn parse(input: &str) -> RepriseResult<Self> {
        let input = input.trim();
        if let Some(id) = input.strip_prefix('#') {
            return non_empty(id, input).map(|id| Selector::Id(id.to_string()));
        }
        if let Some(class) = input.strip_prefix('.') {
            return non_empty(class, input).map(|c| Selector::Class(c.to_string()));
        }
        if input.starts_with('[') {
            return parse_attribute(input);
        }
        if !input.is_empty() && input.chars().all(is_tag_char) {
            return Ok(Selector::Tag(input.to_ascii_lowercase()));
        }
        Err(unsupported(input, "not a simple selector"))
    }

    pub fn matches(&self, element: &ElementSnapshot) -> bool {
        match self {
            Selector::Id(id) => element.id.as_deref() == Some(id.as_str()),
            Selector::Class(class) => element
                .class_name
                .as_deref()
                .is_some_and(|list| list.split_whitespace().any(|c| c == class)),
            Selector::Attribute { name, value } => {
                attribute_value(element, name) == Some(value.as_str())
            }
            Selector::Tag(tag) => element.tag_name.eq_ignore_ascii_case(tag),
        }
    }
}

/// Characters allowed in a bare tag selector. Matches the attribute-name
/// set the config loader accepts, so `_` and `:` tags resolve too.
fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':')
}

/// Resolve `name` the way a DOM `getAttribute` would.
fn attribute_value<'a>(element: &'a ElementSnapshot, name: &str) -> Option<&'a str> {
    match name {
        "id" => element.id.as_deref(),
        "name" => element.name.as_deref(),
        "class" => element.class_name.as_deref(),
        "type" => element.input_type.as_deref(),
        other => element.attribute(other),
    }
}

fn parse_attribute(input: &str) -> RepriseResult<Selector> {
    let inner = input
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| unsupported(input, "unterminated attribute selector"))?;

    let (name, raw_value) = inner
        .split_once('=')
        .ok_or_else(|| unsupported(input, "attribute selector without a value"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(unsupported(input, "attribute selector without a name"));
    }

    let raw_value = raw_value.trim();
    let value = match raw_value.strip_prefix('"') {
        Some(quoted) => unquote(quoted).ok_or_else(|| unsupported(input, "bad quoting"))?,
        None => raw_value.to_string(),
    };

    Ok(Selector::Attribute {
        name: name.to_string(),
        value,
    })
}

/// Read up to the closing quote, resolving backslash escapes. The closing
/// quote must be the last character.
fn unquote(quoted: &str) -> Option<String> {
    let mut out = String::with_capacity(quoted.len());
    let mut chars = quoted.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push(chars.next()?),
            '"' => return chars.as_str().is_empty().then_some(out),
            other => out.push(other),
        }
    }
    None
}

fn non_empty<'a>(rest: &'a str, input: &str) -> RepriseResult<&'a str> {
    if rest.is_empty() {
        Err(unsupported(input, "empty name"))
    } else {
        Ok(rest)
    }
}

fn unsupported(selector: &str, why: &str) -> RepriseError {
    RepriseError::Host {
        reason: format!("unsupported selector '{selector}': {why}"),
    }
}

#[cfg(test)]
mod tests {
    use reprise_core::selector::attribute_selector;

    use super::*;

    fn button() -> ElementSnapshot {
        ElementSnapshot::new("BUTTON")
            .with_id("submit-btn")
            .with_class("btn primary")
            .with_attribute("data-action", "log in")
    }

    #[test]
    fn parses_each_shape() {
        assert_eq!(Selector::parse("#a").unwrap(), Selector::Id("a".into()));
        assert_eq!(Selector::parse(".b").unwrap(), Selector::Class("b".into()));
        assert_eq!(Selector::parse("DIV").unwrap(), Selector::Tag("div".into()));
        assert_eq!(Selector::parse("x_el").unwrap(), Selector::Tag("x_el".into()));
        assert_eq!(
            Selector::parse("svg:rect").unwrap(),
            Selector::Tag("svg:rect".into())
        );
        assert_eq!(
            Selector::parse("[name=\"user\"]").unwrap(),
            Selector::Attribute {
                name: "name".into(),
                value: "user".into()
            }
        );
    }

    #[test]
    fn rejects_what_it_does_not_understand() {
        for bad in ["", "#", ".", "div > p", "[name=\"x]", "[=\"x\"]", "[name]"] {
            assert!(Selector::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn matches_id_class_tag_and_attribute() {
        let el = button();
        assert!(Selector::parse("#submit-btn").unwrap().matches(&el));
        assert!(Selector::parse(".primary").unwrap().matches(&el));
        assert!(Selector::parse("button").unwrap().matches(&el));
        assert!(Selector::parse("svg:rect")
            .unwrap()
            .matches(&ElementSnapshot::new("SVG:RECT")));
        assert!(Selector::parse("[data-action=\"log in\"]").unwrap().matches(&el));
        assert!(!Selector::parse(".prim").unwrap().matches(&el));
        assert!(!Selector::parse("#other").unwrap().matches(&el));
    }

    #[test]
    fn escaped_values_match_what_the_policy_writes() {
        let value = r#"say "hi" \ bye"#;
        let el = ElementSnapshot::new("INPUT").with_name(value);
        let selector = attribute_selector("name", value);
        assert!(Selector::parse(&selector).unwrap().matches(&el));
    }
}
