//! JSON implementation of `ActionCodec`.
//!
//! `JsonActionCodec` writes the versioned envelope and reads both the
//! envelope and the minimal bare-array format. Decoding runs in stages and
//! returns nothing until every stage has passed:
//!
//!   1. parse as JSON
//!   2. validate structure against the JSON Schema for its shape
//!   3. check the envelope version
//!   4. deserialize into `Action`s
//!   5. check the fingerprint, if one is present

use serde_json::Value;
use tracing::{debug, warn};

use reprise_contracts::{
    action::Action,
    error::{RepriseError, RepriseResult},
};
use reprise_core::traits::{ActionCodec, EncodeContext};

use crate::{
    envelope::{LogEnvelope, FORMAT_VERSION},
    fingerprint::{fingerprint, verify_fingerprint},
    schema::validate_document,
};

/// The JSON action log codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonActionCodec;

impl JsonActionCodec {
    pub fn new() -> Self {
        Self
    }
}

impl ActionCodec for JsonActionCodec {
    fn encode(&self, actions: &[Action], ctx: &EncodeContext) -> RepriseResult<String> {
        let envelope = LogEnvelope {
            version: FORMAT_VERSION,
            recording_id: ctx.recording_id,
            fingerprint: Some(fingerprint(actions)?),
            actions: actions.to_vec(),
        };

        let rendered = if ctx.pretty {
            serde_json::to_string_pretty(&envelope)
        } else {
            serde_json::to_string(&envelope)
        };
        let text = rendered.map_err(|e| RepriseError::Serialization {
            reason: e.to_string(),
        })?;

        debug!(actions = actions.len(), bytes = text.len(), "action log encoded");
        Ok(text)
    }

    fn decode(&self, input: &str) -> RepriseResult<Vec<Action>> {
        let document: Value =
            serde_json::from_str(input).map_err(|e| deser(format!("not valid JSON: {e}")))?;
        validate_document(&document)?;

        let actions = match document {
            Value::Array(_) => serde_json::from_value::<Vec<Action>>(document)
                .map_err(|e| deser(e.to_string()))?,
            other => decode_envelope(other)?,
        };

        debug!(actions = actions.len(), "action log decoded");
        Ok(actions)
    }
}

fn decode_envelope(document: Value) -> RepriseResult<Vec<Action>> {
    let envelope: LogEnvelope =
        serde_json::from_value(document).map_err(|e| deser(e.to_string()))?;

    if envelope.version > FORMAT_VERSION {
        return Err(deser(format!(
            "log format version {} is newer than the supported version {}",
            envelope.version, FORMAT_VERSION
        )));
    }

    if let Some(expected) = &envelope.fingerprint {
        if !verify_fingerprint(&envelope.actions, expected)? {
            warn!(
                recording_id = ?envelope.recording_id,
                %expected,
                "action log fingerprint mismatch"
            );
            return Err(deser("fingerprint does not match the actions".to_string()));
        }
    }

    Ok(envelope.actions)
}

fn deser(reason: String) -> RepriseError {
    RepriseError::Deserialization { reason }
}
