//! Recorded actions.
//!
//! An `Action` is one observed interaction with enough data to replay it.
//! Actions are immutable once recorded; the recorder appends them to its log
//! and hands callers copies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tag value for click actions.
pub const CLICK: &str = "click";

/// Tag value for input actions.
pub const INPUT: &str = "input";

/// Client-area coordinates of a click.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

impl Coordinates {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The action kinds the recorder produces and the executor understands.
///
/// Serialized with an inline `type` tag:
/// ```json
/// {"type": "click", "coordinates": {"x": 100.0, "y": 200.0}, "element": "BUTTON"}
/// {"type": "input", "value": "alice", "inputType": "text"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ActionKind {
    Click {
        coordinates: Coordinates,
        /// Tag name of the target as the host reported it (e.g. `BUTTON`).
        element: String,
    },
    Input {
        value: String,
        #[serde(rename = "inputType")]
        input_type: String,
    },
}

/// Variant payload of an action.
///
/// Logs imported from elsewhere may carry tags this crate does not know.
/// Those are kept verbatim in `Other` so they survive export/import, and are
/// rejected only when someone tries to execute them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionPayload {
    Known(ActionKind),
    Other {
        #[serde(rename = "type")]
        action_type: String,
        #[serde(flatten)]
        fields: serde_json::Map<String, serde_json::Value>,
    },
}

/// One recorded unit of user interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Locator computed at record time. Never empty.
    pub selector: String,

    /// Capture time, serialized as epoch milliseconds. Display and ordering
    /// only; replay timing never reads it.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,

    #[serde(flatten)]
    pub payload: ActionPayload,
}

impl Action {
    /// Build a click action stamped with the current time.
    pub fn click(
        selector: impl Into<String>,
        coordinates: Coordinates,
        element: impl Into<String>,
    ) -> Self {
        Self {
            selector: selector.into(),
            timestamp: capture_timestamp(),
            payload: ActionPayload::Known(ActionKind::Click {
                coordinates,
                element: element.into(),
            }),
        }
    }

    /// Build an input action stamped with the current time.
    pub fn input(
        selector: impl Into<String>,
        value: impl Into<String>,
        input_type: impl Into<String>,
    ) -> Self {
        Self {
            selector: selector.into(),
            timestamp: capture_timestamp(),
            payload: ActionPayload::Known(ActionKind::Input {
                value: value.into(),
                input_type: input_type.into(),
            }),
        }
    }

    /// The `type` tag as it appears on the wire.
    pub fn action_type(&self) -> &str {
        match &self.payload {
            ActionPayload::Known(ActionKind::Click { .. }) => CLICK,
            ActionPayload::Known(ActionKind::Input { .. }) => INPUT,
            ActionPayload::Other { action_type, .. } => action_type,
        }
    }

    /// The known kind, or `None` for tags this crate does not understand.
    pub fn kind(&self) -> Option<&ActionKind> {
        match &self.payload {
            ActionPayload::Known(kind) => Some(kind),
            ActionPayload::Other { .. } => None,
        }
    }
}

/// Current wall-clock time truncated to whole milliseconds.
///
/// The log format stores epoch milliseconds, so anything finer would be lost
/// on export and break round-trip equality.
pub fn capture_timestamp() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}
