//! TOML loading for `RecorderConfig`.
//!
//! The file layout is a single `[recorder]` table:
//!
//! ```toml
//! [recorder]
//! intent_attribute = "data-action"
//! playback_delay_ms = 1000
//! restart = "discard"
//! pretty_export = true
//! ```
//!
//! Loading is parse → validate. Both failures surface as
//! `RepriseError::ConfigError`.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use reprise_contracts::{
    config::RecorderConfig,
    error::{RepriseError, RepriseResult},
};

/// Upper bound on the playback delay: one hour per step.
pub const MAX_PLAYBACK_DELAY_MS: u64 = 60 * 60 * 1000;

/// The top-level structure deserialized from a TOML config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    recorder: RecorderConfig,
}

/// Parse `s` as TOML and return a validated `RecorderConfig`.
pub fn from_toml_str(s: &str) -> RepriseResult<RecorderConfig> {
    let file: ConfigFile = toml::from_str(s).map_err(|e| RepriseError::ConfigError {
        reason: format!("failed to parse recorder TOML: {}", e),
    })?;
    validate(&file.recorder)?;
    debug!(
        intent_attribute = %file.recorder.intent_attribute,
        playback_delay_ms = file.recorder.playback_delay_ms,
        restart = ?file.recorder.restart,
        "recorder config loaded"
    );
    Ok(file.recorder)
}

/// Read the file at `path` and parse it as recorder configuration.
pub fn from_file(path: &Path) -> RepriseResult<RecorderConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| RepriseError::ConfigError {
        reason: format!("failed to read config file '{}': {}", path.display(), e),
    })?;
    from_toml_str(&contents)
}

/// A copy of `config` with `playback_delay_ms` replaced, validated the same
/// way as a loaded file.
pub fn with_playback_delay(
    config: &RecorderConfig,
    delay_ms: u64,
) -> RepriseResult<RecorderConfig> {
    let overridden = RecorderConfig {
        playback_delay_ms: delay_ms,
        ..config.clone()
    };
    validate(&overridden)?;
    Ok(overridden)
}

/// Check the values serde cannot.
///
/// The intent attribute ends up verbatim inside `[attr="…"]` selectors, so
/// it is restricted to the characters an attribute name may contain.
pub fn validate(config: &RecorderConfig) -> RepriseResult<()> {
    let attr = &config.intent_attribute;
    if attr.is_empty() {
        return Err(RepriseError::ConfigError {
            reason: "intent_attribute must not be empty".to_string(),
        });
    }
    if !attr
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':')
    {
        return Err(RepriseError::ConfigError {
            reason: format!("intent_attribute '{}' is not a valid attribute name", attr),
        });
    }
    if config.playback_delay_ms > MAX_PLAYBACK_DELAY_MS {
        return Err(RepriseError::ConfigError {
            reason: format!(
                "playback_delay_ms {} exceeds the maximum of {}",
                config.playback_delay_ms, MAX_PLAYBACK_DELAY_MS
            ),
        });
    }
    Ok(())
}
