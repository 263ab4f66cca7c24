//! # reprise-core
//!
//! The interaction recorder.
//!
//! This crate provides:
//! - The host-facing traits (`EventSurface`, `EventListener`, `Environment`,
//!   `ActionCodec`)
//! - Selector derivation (`SelectorPolicy`)
//! - The `Recorder` state machine that turns host events into an action log
//! - Scheduled, cancellable playback of that log
//!
//! ## Usage
//!
//! ```rust,ignore
//! use reprise_core::Recorder;
//!
//! let recorder = Recorder::new(surface, Box::new(codec), RecorderConfig::default());
//! recorder.start_recording()?;
//! // ... host dispatches clicks and inputs ...
//! let log = recorder.stop_recording();
//! let report = recorder.playback_default(env)?.wait().await?;
//! ```

pub mod capture;
pub mod playback;
pub mod recorder;
pub mod selector;
pub mod traits;

pub use playback::{PlaybackHandle, PlaybackReport, StepOutcome, StepReport};
pub use recorder::Recorder;
pub use selector::SelectorPolicy;
