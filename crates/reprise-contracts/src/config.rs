//! Recorder configuration.
//!
//! Defaults reproduce the classic recorder: `data-action` as the intent
//! attribute, one second between playback steps, and discard-and-restart on
//! a second `start_recording`.

use serde::{Deserialize, Serialize};

/// Default attribute consulted first by selector derivation.
pub const DEFAULT_INTENT_ATTRIBUTE: &str = "data-action";

/// Default offset between consecutive playback steps.
pub const DEFAULT_PLAYBACK_DELAY_MS: u64 = 1000;

/// What `start_recording` does when the recorder is already recording.
///
/// Expressed in TOML as a kebab-case string:
/// ```toml
/// restart = "discard"
/// restart = "reject"
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RestartPolicy {
    /// Drop the current log and start a fresh session.
    #[default]
    Discard,
    /// Refuse with `RepriseError::AlreadyRecording`.
    Reject,
}

/// Tunables for a `Recorder`.
///
/// Every field has a default, so an empty TOML table is a valid config.
/// Unknown keys are rejected to surface typos early.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecorderConfig {
    /// Attribute that names an element's intent; highest selector priority.
    pub intent_attribute: String,

    /// Offset between playback steps when the caller does not pass one.
    pub playback_delay_ms: u64,

    pub restart: RestartPolicy,

    /// Pretty-print exported logs.
    pub pretty_export: bool,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            intent_attribute: DEFAULT_INTENT_ATTRIBUTE.to_string(),
            playback_delay_ms: DEFAULT_PLAYBACK_DELAY_MS,
            restart: RestartPolicy::Discard,
            pretty_export: true,
        }
    }
}
