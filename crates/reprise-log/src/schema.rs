//! Structural validation of serialized action logs.
//!
//! Serde alone would reject a bad log, but an untagged payload turns "a
//! click with no coordinates" into an unknown-type action, and its errors
//! do not say where in the array the problem was. Running JSON Schema first
//! gives every violation with its instance path, and keeps malformed known
//! kinds from slipping through as unknown ones.

use serde_json::{json, Value};
use tracing::warn;

use reprise_contracts::error::{RepriseError, RepriseResult};

/// At most this many violations are quoted in one error message.
const MAX_REPORTED_VIOLATIONS: usize = 5;

/// Schema for a single action object.
pub fn action_schema() -> Value {
    json!({
        "type": "object",
        "required": ["type", "selector", "timestamp"],
        "properties": {
            "type": { "type": "string", "minLength": 1 },
            "selector": { "type": "string", "minLength": 1 },
            "timestamp": { "type": "integer" }
        },
        "allOf": [
            {
                "if": { "properties": { "type": { "const": "click" } } },
                "then": {
                    "required": ["coordinates", "element"],
                    "properties": {
                        "coordinates": {
                            "type": "object",
                            "required": ["x", "y"],
                            "properties": {
                                "x": { "type": "number" },
                                "y": { "type": "number" }
                            }
                        },
                        "element": { "type": "string" }
                    }
                }
            },
            {
                "if": { "properties": { "type": { "const": "input" } } },
                "then": {
                    "required": ["value", "inputType"],
                    "properties": {
                        "value": { "type": "string" },
                        "inputType": { "type": "string" }
                    }
                }
            }
        ]
    })
}

/// Schema for the minimal format: a bare array of actions.
pub fn action_array_schema() -> Value {
    json!({
        "type": "array",
        "items": action_schema()
    })
}

/// Schema for the versioned envelope.
pub fn envelope_schema() -> Value {
    json!({
        "type": "object",
        "required": ["version", "actions"],
        "properties": {
            "version": { "type": "integer", "minimum": 1 },
            "recording_id": { "type": ["string", "null"] },
            "fingerprint": { "type": ["string", "null"] },
            "actions": action_array_schema()
        }
    })
}

/// Validate a parsed document against whichever schema its shape calls for.
///
/// Arrays are checked as the minimal format, objects as an envelope.
/// Anything else is rejected outright.
pub fn validate_document(document: &Value) -> RepriseResult<()> {
    let schema = match document {
        Value::Array(_) => action_array_schema(),
        Value::Object(_) => envelope_schema(),
        _ => {
            return Err(RepriseError::Deserialization {
                reason: "expected a JSON array of actions or a log envelope object".to_string(),
            })
        }
    };

    let validator =
        jsonschema::validator_for(&schema).map_err(|e| RepriseError::Deserialization {
            reason: format!("invalid action log schema: {e}"),
        })?;

    let violations: Vec<String> = validator
        .iter_errors(document)
        .map(|error| format!("at '{}': {}", error.instance_path, error))
        .collect();

    if violations.is_empty() {
        return Ok(());
    }

    for message in &violations {
        warn!(%message, "action log schema violation");
    }
    let mut reason = violations
        .iter()
        .take(MAX_REPORTED_VIOLATIONS)
        .cloned()
        .collect::<Vec<_>>()
        .join("; ");
    if violations.len() > MAX_REPORTED_VIOLATIONS {
        reason.push_str(&format!(
            "; and {} more",
            violations.len() - MAX_REPORTED_VIOLATIONS
        ));
    }
    Err(RepriseError::Deserialization { reason })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(result: RepriseResult<()>) -> String {
        match result {
            Err(RepriseError::Deserialization { reason }) => reason,
            other => panic!("expected Deserialization, got {:?}", other),
        }
    }

    #[test]
    fn well_formed_array_passes() {
        let doc = json!([
            {
                "type": "click",
                "selector": "#go",
                "timestamp": 1,
                "coordinates": { "x": 1, "y": 2 },
                "element": "BUTTON"
            },
            {
                "type": "input",
                "selector": "[name=\"q\"]",
                "timestamp": 2,
                "value": "rust",
                "inputType": "search"
            },
            { "type": "scroll", "selector": "main", "timestamp": 3 }
        ]);
        validate_document(&doc).unwrap();
    }

    #[test]
    fn click_without_coordinates_names_the_index() {
        let doc = json!([
            { "type": "click", "selector": "#go", "timestamp": 1, "element": "A" }
        ]);
        let reason = reason(validate_document(&doc));
        assert!(reason.contains("/0"), "got: {reason}");
        assert!(reason.contains("coordinates"), "got: {reason}");
    }

    #[test]
    fn empty_selector_is_rejected() {
        let doc = json!([
            { "type": "input", "selector": "", "timestamp": 1, "value": "", "inputType": "text" }
        ]);
        let reason = reason(validate_document(&doc));
        assert!(reason.contains("/0/selector"), "got: {reason}");
    }

    #[test]
    fn scalar_documents_are_rejected() {
        let reason = reason(validate_document(&json!("hello")));
        assert!(reason.contains("expected a JSON array"));
    }

    #[test]
    fn envelope_requires_version() {
        let reason = reason(validate_document(&json!({ "actions": [] })));
        assert!(reason.contains("version"), "got: {reason}");
    }

    #[test]
    fn long_violation_lists_are_truncated() {
        let bad: Vec<Value> = (0..8).map(|_| json!({ "type": "click" })).collect();
        let reason = reason(validate_document(&Value::Array(bad)));
        assert!(reason.contains("more"), "got: {reason}");
    }
}
