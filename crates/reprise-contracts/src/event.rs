//! Raw host events and element snapshots.
//!
//! These are the inbound shapes the recorder consumes. Every field a host
//! might fail to populate is optional: a partially-initialized event is
//! representable, and it is the recorder's job to skip it gracefully.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::action::{CLICK, INPUT};

/// The event kinds the recorder subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Click,
    Input,
}

impl EventKind {
    /// Every kind the recorder listens for, in subscription order.
    pub const ALL: [EventKind; 2] = [EventKind::Click, EventKind::Input];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Click => CLICK,
            EventKind::Input => INPUT,
        }
    }

    /// Parse a host event type string. Unknown types yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            CLICK => Some(EventKind::Click),
            INPUT => Some(EventKind::Input),
            _ => None,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The observable attributes of an element at the moment an event fired.
///
/// Selector derivation is a pure function of this snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSnapshot {
    /// Tag name as the host reports it (HTML hosts report upper case).
    pub tag_name: String,
    pub id: Option<String>,
    pub name: Option<String>,
    /// Raw, whitespace-separated class list.
    pub class_name: Option<String>,
    /// Every other attribute, including intent attributes like `data-action`.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Current control value, for form controls.
    pub value: Option<String>,
    /// Control type (`text`, `password`, `email`, …), for form controls.
    pub input_type: Option<String>,
}

impl ElementSnapshot {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_input_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = Some(input_type.into());
        self
    }

    /// Look up an attribute from the free-form attribute map.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// The first class token, if the class list has any.
    pub fn first_class(&self) -> Option<&str> {
        self.class_name
            .as_deref()
            .and_then(|classes| classes.split_whitespace().next())
    }
}

/// An event as delivered by the host's dispatch mechanism.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Host event type string (`"click"`, `"input"`, …).
    pub kind: String,
    /// The element the event was dispatched to, if the host provided one.
    pub target: Option<ElementSnapshot>,
    pub client_x: Option<f64>,
    pub client_y: Option<f64>,
}

impl RawEvent {
    /// A click on `target` at client coordinates `(x, y)`.
    pub fn click(target: ElementSnapshot, x: f64, y: f64) -> Self {
        Self {
            kind: CLICK.to_string(),
            target: Some(target),
            client_x: Some(x),
            client_y: Some(y),
        }
    }

    /// An input notification from `target`; the new value lives on the snapshot.
    pub fn input(target: ElementSnapshot) -> Self {
        Self {
            kind: INPUT.to_string(),
            target: Some(target),
            client_x: None,
            client_y: None,
        }
    }
}
