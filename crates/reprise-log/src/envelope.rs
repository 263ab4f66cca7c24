//! The versioned export envelope.
//!
//! The minimal log format is a bare JSON array of actions. Exports wrap that
//! array with a format version, the originating session, and a fingerprint
//! so that future readers can tell what they are looking at.

use serde::{Deserialize, Serialize};

use reprise_contracts::{action::Action, session::RecordingId};

/// The envelope version this crate writes and the highest it reads.
pub const FORMAT_VERSION: u32 = 1;

/// A serialized action log with metadata.
///
/// ```json
/// {
///   "version": 1,
///   "recording_id": "6f1c…",
///   "fingerprint": "9b2e…",
///   "actions": [ … ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEnvelope {
    pub version: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording_id: Option<RecordingId>,

    /// SHA-256 (hex) over the canonical JSON of `actions`. Optional on
    /// import; when present it must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,

    pub actions: Vec<Action>,
}
