//! Scenario: record on one copy of the login page, replay on another.
//!
//! 1. A user clicks Submit and types a username while recording.
//! 2. The log is exported to JSON.
//! 3. A second recorder imports that JSON and replays it onto a fresh page.
//! 4. Both steps execute; the fresh page ends up with the typed username.

use std::sync::Arc;
use std::time::Duration;

use reprise_contracts::{config::RecorderConfig, error::RepriseResult};

use super::{record_login_session, replay_log, ScenarioOutcome};
use crate::fixtures::login_page;

pub const NAME: &str = "record-and-replay";

pub async fn run(config: &RecorderConfig, delay: Duration) -> RepriseResult<ScenarioOutcome> {
    let original = Arc::new(login_page());
    let (recorded, exported) = record_login_session(&original, config)?;

    let fresh = Arc::new(login_page());
    let report = replay_log(&fresh, &exported, config, delay).await?;

    Ok(ScenarioOutcome {
        name: NAME,
        recorded,
        exported,
        report,
        replay_journal: fresh.journal(),
    })
}
