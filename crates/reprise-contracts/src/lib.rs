//! # reprise-contracts
//!
//! Shared types, schemas, and contracts for the Reprise interaction recorder.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate, only data definitions, configuration, and error types.

pub mod action;
pub mod config;
pub mod error;
pub mod event;
pub mod session;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use action::{Action, ActionKind, ActionPayload, Coordinates};
    use config::{RecorderConfig, RestartPolicy};
    use error::RepriseError;
    use event::{ElementSnapshot, EventKind};
    use session::RecordingId;

    // ── Action wire shape ────────────────────────────────────────────────────

    #[test]
    fn click_action_serializes_with_inline_type_tag() {
        let action = Action::click("#submit-btn", Coordinates::new(100.0, 200.0), "BUTTON");
        let value = serde_json::to_value(&action).unwrap();

        assert_eq!(value["type"], "click");
        assert_eq!(value["selector"], "#submit-btn");
        assert_eq!(value["coordinates"]["x"], 100.0);
        assert_eq!(value["coordinates"]["y"], 200.0);
        assert_eq!(value["element"], "BUTTON");
        assert_eq!(value["timestamp"], action.timestamp.timestamp_millis());
    }

    #[test]
    fn input_action_uses_camel_case_input_type() {
        let action = Action::input("[name=\"username\"]", "alice", "text");
        let value = serde_json::to_value(&action).unwrap();

        assert_eq!(value["type"], "input");
        assert_eq!(value["value"], "alice");
        assert_eq!(value["inputType"], "text");
        assert!(value.get("input_type").is_none());
    }

    #[test]
    fn action_parses_integer_coordinates_and_millisecond_timestamp() {
        let raw = json!({
            "type": "click",
            "selector": "#go",
            "timestamp": 1_700_000_000_123_i64,
            "coordinates": { "x": 100, "y": 200 },
            "element": "BUTTON"
        });
        let action: Action = serde_json::from_value(raw).unwrap();

        assert_eq!(action.timestamp.timestamp_millis(), 1_700_000_000_123);
        match action.kind() {
            Some(ActionKind::Click { coordinates, element }) => {
                assert_eq!(*coordinates, Coordinates::new(100.0, 200.0));
                assert_eq!(element, "BUTTON");
            }
            other => panic!("expected click, got {:?}", other),
        }
    }

    #[test]
    fn unknown_action_type_is_preserved_as_other() {
        let raw = json!({
            "type": "scroll",
            "selector": "main",
            "timestamp": 1_700_000_000_000_i64,
            "deltaY": 120
        });
        let action: Action = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(action.action_type(), "scroll");
        assert!(action.kind().is_none());
        match &action.payload {
            ActionPayload::Other { fields, .. } => assert_eq!(fields["deltaY"], 120),
            other => panic!("expected Other, got {:?}", other),
        }

        // And it writes back out unchanged.
        assert_eq!(serde_json::to_value(&action).unwrap(), raw);
    }

    #[test]
    fn captured_timestamps_have_no_sub_millisecond_part() {
        let action = Action::input("#q", "x", "search");
        assert_eq!(action.timestamp.timestamp_subsec_nanos() % 1_000_000, 0);
    }

    // ── Element snapshots ────────────────────────────────────────────────────

    #[test]
    fn first_class_skips_leading_whitespace() {
        let el = ElementSnapshot::new("DIV").with_class("  card  primary");
        assert_eq!(el.first_class(), Some("card"));

        let blank = ElementSnapshot::new("DIV").with_class("   ");
        assert_eq!(blank.first_class(), None);
    }

    #[test]
    fn event_kind_parses_only_known_types() {
        assert_eq!(EventKind::parse("click"), Some(EventKind::Click));
        assert_eq!(EventKind::parse("input"), Some(EventKind::Input));
        assert_eq!(EventKind::parse("keydown"), None);
    }

    // ── Config ───────────────────────────────────────────────────────────────

    #[test]
    fn config_defaults_match_classic_recorder() {
        let config = RecorderConfig::default();
        assert_eq!(config.intent_attribute, "data-action");
        assert_eq!(config.playback_delay_ms, 1000);
        assert_eq!(config.restart, RestartPolicy::Discard);
        assert!(config.pretty_export);
    }

    // ── RecordingId ──────────────────────────────────────────────────────────

    #[test]
    fn recording_id_new_produces_unique_values() {
        let unique: std::collections::HashSet<RecordingId> =
            (0..100).map(|_| RecordingId::new()).collect();
        assert_eq!(unique.len(), 100);
    }

    // ── RepriseError display messages ────────────────────────────────────────

    #[test]
    fn error_element_not_found_display() {
        let err = RepriseError::ElementNotFound {
            selector: "#missing".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("element not found"));
        assert!(msg.contains("#missing"));
    }

    #[test]
    fn error_unsupported_action_type_display() {
        let err = RepriseError::UnsupportedActionType {
            action_type: "scroll".to_string(),
        };
        assert!(err.to_string().contains("'scroll'"));
    }

    #[test]
    fn error_deserialization_display() {
        let err = RepriseError::Deserialization {
            reason: "expected value at line 1 column 1".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("failed to deserialize action log"));
        assert!(msg.contains("line 1 column 1"));
    }
}
