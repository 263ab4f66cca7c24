//! Raw event → `Action` conversion.

use reprise_contracts::{
    action::{Action, Coordinates},
    error::{RepriseError, RepriseResult},
    event::{EventKind, RawEvent},
};

use crate::selector::SelectorPolicy;

/// `inputType` recorded when the host reports no control type.
pub const DEFAULT_INPUT_TYPE: &str = "text";

/// Build the `Action` a raw event describes.
///
/// Returns `Ok(None)` for event kinds the recorder does not capture, and
/// `MalformedEvent` when the event lacks data the action needs.
pub fn action_from_event(
    event: &RawEvent,
    selectors: &SelectorPolicy,
) -> RepriseResult<Option<Action>> {
    let Some(kind) = EventKind::parse(&event.kind) else {
        return Ok(None);
    };

    let target = event
        .target
        .as_ref()
        .ok_or_else(|| malformed(kind, "event has no target"))?;
    if target.tag_name.trim().is_empty() {
        return Err(malformed(kind, "target has no tag name"));
    }
    let selector = selectors.derive(target);

    let action = match kind {
        EventKind::Click => {
            let (x, y) = event
                .client_x
                .zip(event.client_y)
                .ok_or_else(|| malformed(kind, "missing client coordinates"))?;
            if !x.is_finite() || !y.is_finite() {
                return Err(malformed(kind, "client coordinates are not finite"));
            }
            Action::click(selector, Coordinates::new(x, y), target.tag_name.clone())
        }
        EventKind::Input => {
            let value = target
                .value
                .clone()
                .ok_or_else(|| malformed(kind, "target has no value"))?;
            let input_type = target
                .input_type
                .as_deref()
                .filter(|t| !t.is_empty())
                .unwrap_or(DEFAULT_INPUT_TYPE);
            Action::input(selector, value, input_type)
        }
    };

    Ok(Some(action))
}

fn malformed(kind: EventKind, detail: &str) -> RepriseError {
    RepriseError::MalformedEvent {
        reason: format!("{kind} {detail}"),
    }
}
