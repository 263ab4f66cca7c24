//! Scripted end-to-end sessions on the login fixture.
//!
//! Each scenario wires a real `Recorder` and `JsonActionCodec` to reference
//! documents and returns everything it observed, so the demo can print it
//! and the integration tests can assert on it.

pub mod missing_element;
pub mod record_and_replay;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use reprise_contracts::{action::Action, config::RecorderConfig, error::RepriseResult};
use reprise_core::{PlaybackReport, Recorder};
use reprise_log::JsonActionCodec;

use crate::{
    document::{Activity, Document},
    fixtures::{SUBMIT_BUTTON, USERNAME_FIELD},
};

/// What a scenario recorded, exported, and replayed.
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub name: &'static str,
    pub recorded: Vec<Action>,
    pub exported: String,
    pub report: PlaybackReport,
    /// Activity on the page the log was replayed against.
    pub replay_journal: Vec<Activity>,
}

/// A recorder observing `page`, using the JSON codec.
pub fn recorder_for(page: &Arc<Document>, config: &RecorderConfig) -> Recorder {
    Recorder::new(page.clone(), Box::new(JsonActionCodec::new()), config.clone())
}

/// Record the canonical login session on `page`: click the submit button at
/// (100, 200), then type `alice` as the username.
///
/// Returns the finished log and its export.
pub fn record_login_session(
    page: &Arc<Document>,
    config: &RecorderConfig,
) -> RepriseResult<(Vec<Action>, String)> {
    let recorder = recorder_for(page, config);
    recorder.start_recording()?;
    page.user_click(SUBMIT_BUTTON, 100.0, 200.0)?;
    page.user_type(USERNAME_FIELD, "alice")?;
    let actions = recorder.stop_recording();
    let exported = recorder.export_actions()?;
    info!(actions = actions.len(), bytes = exported.len(), "login session recorded");
    Ok((actions, exported))
}

/// Import `serialized` into a fresh recorder and replay it against `page`.
pub async fn replay_log(
    page: &Arc<Document>,
    serialized: &str,
    config: &RecorderConfig,
    delay: Duration,
) -> RepriseResult<PlaybackReport> {
    let recorder = recorder_for(page, config);
    recorder.import_actions(serialized)?;
    let handle = recorder.playback(page.clone(), delay)?;
    handle.wait().await
}
