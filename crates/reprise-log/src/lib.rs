//! # reprise-log
//!
//! JSON export and import of Reprise action logs.
//!
//! ## Overview
//!
//! [`JsonActionCodec`] implements the
//! [`ActionCodec`](reprise_core::traits::ActionCodec) trait. Exports are a
//! versioned envelope carrying a SHA-256 fingerprint of the actions; imports
//! accept that envelope or the minimal bare array. Every import is schema
//! validated and all-or-nothing.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use reprise_log::JsonActionCodec;
//!
//! let recorder = Recorder::new(surface, Box::new(JsonActionCodec::new()), config);
//! let text = recorder.export_actions()?;
//! other.import_actions(&text)?;
//! ```

pub mod codec;
pub mod envelope;
pub mod fingerprint;
pub mod schema;

pub use codec::JsonActionCodec;
pub use envelope::{LogEnvelope, FORMAT_VERSION};
pub use fingerprint::{fingerprint, verify_fingerprint};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde_json::json;

    use reprise_contracts::{
        action::{Action, ActionPayload, Coordinates},
        error::RepriseError,
        session::RecordingId,
    };
    use reprise_core::traits::{ActionCodec, EncodeContext};

    use super::{JsonActionCodec, FORMAT_VERSION};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn sample_log() -> Vec<Action> {
        vec![
            Action::click("#submit-btn", Coordinates::new(100.0, 200.0), "BUTTON"),
            Action::input("[name=\"username\"]", "alice", "text"),
        ]
    }

    fn ctx() -> EncodeContext {
        EncodeContext {
            recording_id: Some(RecordingId::new()),
            pretty: true,
        }
    }

    fn deser_reason(result: Result<Vec<Action>, RepriseError>) -> String {
        match result {
            Err(RepriseError::Deserialization { reason }) => reason,
            other => panic!("expected Deserialization, got {:?}", other),
        }
    }

    // ── Tests ─────────────────────────────────────────────────────────────────

    /// encode → decode reproduces the log field for field.
    #[test]
    fn test_round_trip() {
        let codec = JsonActionCodec::new();
        let log = sample_log();

        let text = codec.encode(&log, &ctx()).unwrap();
        let back = codec.decode(&text).unwrap();

        assert_eq!(back, log);
    }

    /// The envelope carries version, session, and fingerprint.
    #[test]
    fn test_envelope_fields() {
        let codec = JsonActionCodec::new();
        let ctx = ctx();
        let text = codec.encode(&sample_log(), &ctx).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["version"], FORMAT_VERSION);
        assert_eq!(
            value["recording_id"],
            ctx.recording_id.unwrap().0.to_string()
        );
        assert_eq!(value["fingerprint"].as_str().unwrap().len(), 64);
        assert_eq!(value["actions"].as_array().unwrap().len(), 2);
        assert_eq!(value["actions"][0]["type"], "click");
    }

    /// Compact output has no newlines.
    #[test]
    fn test_compact_encoding() {
        let codec = JsonActionCodec::new();
        let text = codec
            .encode(&sample_log(), &EncodeContext::default())
            .unwrap();
        assert!(!text.contains('\n'));
        assert!(!text.contains("recording_id"));
    }

    /// The minimal bare-array format imports.
    #[test]
    fn test_bare_array_imports() {
        let text = json!([
            {
                "type": "click",
                "selector": "#submit-btn",
                "timestamp": 1_700_000_000_000_i64,
                "coordinates": { "x": 100, "y": 200 },
                "element": "BUTTON"
            },
            {
                "type": "input",
                "selector": "[name=\"username\"]",
                "timestamp": 1_700_000_000_500_i64,
                "value": "alice",
                "inputType": "text"
            }
        ])
        .to_string();

        let actions = JsonActionCodec::new().decode(&text).unwrap();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].selector, "#submit-btn");
        assert_eq!(actions[1].action_type(), "input");
    }

    /// An envelope without a fingerprint is accepted.
    #[test]
    fn test_envelope_without_fingerprint() {
        let text = json!({ "version": 1, "actions": [] }).to_string();
        assert!(JsonActionCodec::new().decode(&text).unwrap().is_empty());
    }

    /// Garbage input is a Deserialization error.
    #[test]
    fn test_not_json() {
        let reason = deser_reason(JsonActionCodec::new().decode("not json"));
        assert!(reason.contains("not valid JSON"));
    }

    /// Editing an action after export breaks the fingerprint.
    #[test]
    fn test_fingerprint_mismatch() {
        let codec = JsonActionCodec::new();
        let text = codec.encode(&sample_log(), &ctx()).unwrap();
        let tampered = text.replace("alice", "mallory");

        let reason = deser_reason(codec.decode(&tampered));
        assert!(reason.contains("fingerprint"));
    }

    /// Envelopes from a newer format are refused.
    #[test]
    fn test_future_version_rejected() {
        let text = json!({ "version": FORMAT_VERSION + 1, "actions": [] }).to_string();
        let reason = deser_reason(JsonActionCodec::new().decode(&text));
        assert!(reason.contains("newer than the supported version"));
    }

    /// Unknown action types survive a full encode/decode cycle.
    #[test]
    fn test_unknown_type_preserved() {
        let text = json!([
            { "type": "hover", "selector": ".menu", "timestamp": 5, "durationMs": 300 }
        ])
        .to_string();
        let codec = JsonActionCodec::new();
        let actions = codec.decode(&text).unwrap();
        assert!(matches!(actions[0].payload, ActionPayload::Other { .. }));

        let again = codec
            .decode(&codec.encode(&actions, &ctx()).unwrap())
            .unwrap();
        assert_eq!(again, actions);
    }

    /// A known type with the wrong fields is not reinterpreted as unknown.
    #[test]
    fn test_malformed_known_type_rejected() {
        let text = json!([
            { "type": "input", "selector": "#q", "timestamp": 5, "value": 42, "inputType": "text" }
        ])
        .to_string();
        let reason = deser_reason(JsonActionCodec::new().decode(&text));
        assert!(reason.contains("/0/value"), "got: {reason}");
    }
}
