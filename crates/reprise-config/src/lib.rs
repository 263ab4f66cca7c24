//! # reprise-config
//!
//! TOML-driven configuration for the Reprise recorder.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//!
//! let config = reprise_config::from_file(Path::new("config/recorder.toml"))?;
//! // Pass `config` to `reprise_core::Recorder::new(...)`.
//! ```
//!
//! Missing keys fall back to `RecorderConfig::default()`; unknown keys are
//! rejected.

pub mod loader;

pub use loader::{from_file, from_toml_str, validate, with_playback_delay};

// ── Tests ─────────────────────────────────────────────────────────────────────
