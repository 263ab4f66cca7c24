//! Scenario: replay against a page that lost an element.
//!
//! The login session is recorded as usual, then replayed onto the
//! redesigned page that no longer has `#submit-btn`. The click step is
//! skipped with `ElementNotFound` and playback carries on: the username is
//! still filled in.

use std::sync::Arc;
use std::time::Duration;

use reprise_contracts::{config::RecorderConfig, error::RepriseResult};

use super::{record_login_session, replay_log, ScenarioOutcome};
use crate::fixtures::{login_page, login_page_without_submit};

pub const NAME: &str = "missing-element";

pub async fn run(config: &RecorderConfig, delay: Duration) -> RepriseResult<ScenarioOutcome> {
    let original = Arc::new(login_page());
    let (recorded, exported) = record_login_session(&original, config)?;

    let redesigned = Arc::new(login_page_without_submit());
    let report = replay_log(&redesigned, &exported, config, delay).await?;

    Ok(ScenarioOutcome {
        name: NAME,
        recorded,
        exported,
        report,
        replay_journal: redesigned.journal(),
    })
}
