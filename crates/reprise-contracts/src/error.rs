//! Error types for the Reprise recorder.
//!
//! Every fallible operation in the workspace returns `RepriseResult<T>`.
//! None of these errors is fatal to a session: recording and playback both
//! recover locally and keep going.

use thiserror::Error;

/// The unified error type for the Reprise recorder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepriseError {
    /// The action's selector resolved to zero elements at playback time.
    #[error("element not found: {selector}")]
    ElementNotFound { selector: String },

    /// The action's `type` tag is outside the set the executor understands.
    #[error("unsupported action type '{action_type}'")]
    UnsupportedActionType { action_type: String },

    /// An imported action log could not be parsed or validated.
    ///
    /// The recorder's existing log is never touched when this is returned.
    #[error("failed to deserialize action log: {reason}")]
    Deserialization { reason: String },

    /// The action log could not be rendered to JSON.
    #[error("failed to serialize action log: {reason}")]
    Serialization { reason: String },

    /// A raw host event was missing data needed to build an action.
    #[error("malformed event: {reason}")]
    MalformedEvent { reason: String },

    /// `start_recording` was called while already recording and the
    /// configured restart policy is `reject`.
    #[error("recorder is already recording")]
    AlreadyRecording,

    /// The host environment refused or failed an operation on an element.
    #[error("host operation failed: {reason}")]
    Host { reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// Playback was requested outside of an async runtime.
    #[error("no async runtime available to schedule playback")]
    RuntimeUnavailable,

    /// The playback task terminated without producing a report.
    #[error("playback aborted: {reason}")]
    PlaybackAborted { reason: String },
}

/// Convenience alias used throughout the Reprise crates.
pub type RepriseResult<T> = Result<T, RepriseError>;
