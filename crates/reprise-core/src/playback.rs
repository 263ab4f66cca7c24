//! Scheduled, cancellable replay of an action log.
//!
//! Playback runs as one async task over its own copy of the log. Step *i*
//! fires at `start + i * delay`, where `start` is the instant `spawn_playback`
//! was called. Deadlines are absolute, so a slow step never pushes later
//! steps back by more than its own overrun.
//!
//! Each step waits on exactly one suspension point: its deadline raced
//! against the cancellation token. Once the token fires, no further step
//! executes; the remaining steps are reported as cancelled.
//!
//! A deadline too far out to represent never comes due; only cancellation
//! ends that wait.
//!
//! Step failures (`ElementNotFound`, `UnsupportedActionType`, host errors)
//! are logged and recorded in the report. They never stop the run.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use reprise_contracts::{
    action::{Action, ActionKind},
    error::{RepriseError, RepriseResult},
};

use crate::traits::Environment;

// ── Single-step execution ─────────────────────────────────────────────────────

/// Execute one action against `env`.
///
/// Resolves the selector first. A missing element yields `ElementNotFound`;
/// a tag the executor does not understand yields `UnsupportedActionType`.
/// Both are logged here so callers can simply move on.
pub fn execute_action(env: &dyn Environment, action: &Action) -> RepriseResult<()> {
    let Some(element) = env.query_selector(&action.selector) else {
        error!(selector = %action.selector, "element not found");
        return Err(RepriseError::ElementNotFound {
            selector: action.selector.clone(),
        });
    };

    let result = match action.kind() {
        Some(ActionKind::Click { .. }) => env.click(element),
        Some(ActionKind::Input { value, .. }) => env
            .set_value(element, value)
            .and_then(|()| env.dispatch_input(element)),
        None => {
            let action_type = action.action_type().to_string();
            warn!(selector = %action.selector, %action_type, "unsupported action type");
            return Err(RepriseError::UnsupportedActionType { action_type });
        }
    };

    match &result {
        Ok(()) => info!(
            selector = %action.selector,
            action_type = action.action_type(),
            "action executed"
        ),
        Err(e) => warn!(selector = %action.selector, error = %e, "host rejected action"),
    }
    result
}

/// Offset from playback start at which each of `len` steps fires.
pub fn schedule_offsets(len: usize, delay: Duration) -> Vec<Duration> {
    (0..len).map(|index| step_offset(index, delay)).collect()
}

fn step_offset(index: usize, delay: Duration) -> Duration {
    let factor = u32::try_from(index).unwrap_or(u32::MAX);
    delay.saturating_mul(factor)
}

// ── Reports ───────────────────────────────────────────────────────────────────

/// What happened to one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Executed,
    /// The step failed and was skipped; playback moved on.
    Skipped(RepriseError),
    /// Cancellation fired before the step's deadline.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub index: usize,
    pub selector: String,
    pub action_type: String,
    /// Scheduled offset from playback start.
    pub offset: Duration,
    pub outcome: StepOutcome,
}

/// Per-step outcomes of a playback run, in log order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackReport {
    pub steps: Vec<StepReport>,
}

impl PlaybackReport {
    pub fn executed(&self) -> usize {
        self.count(|o| matches!(o, StepOutcome::Executed))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, StepOutcome::Skipped(_)))
    }

    pub fn cancelled(&self) -> usize {
        self.count(|o| matches!(o, StepOutcome::Cancelled))
    }

    /// True when no step was cancelled.
    pub fn ran_to_completion(&self) -> bool {
        self.cancelled() == 0
    }

    fn count(&self, pred: impl Fn(&StepOutcome) -> bool) -> usize {
        self.steps.iter().filter(|s| pred(&s.outcome)).count()
    }
}

// ── Handle ────────────────────────────────────────────────────────────────────

/// A running playback.
///
/// Dropping the handle does not stop playback; call `cancel()` for that.
pub struct PlaybackHandle {
    cancel: CancellationToken,
    task: JoinHandle<PlaybackReport>,
    total_steps: usize,
}

impl PlaybackHandle {
    /// Prevent every step that has not fired yet from executing.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// A clone of the token, for cancelling from elsewhere.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the last step to run (or be cancelled).
    pub async fn wait(self) -> RepriseResult<PlaybackReport> {
        self.task.await.map_err(|e| RepriseError::PlaybackAborted {
            reason: e.to_string(),
        })
    }
}

// ── Scheduling ────────────────────────────────────────────────────────────────

/// Start replaying `actions` against `env`, one step every `delay`.
///
/// Returns as soon as the task is spawned. Must be called from within a
/// tokio runtime; otherwise returns `RuntimeUnavailable`.
pub fn spawn_playback(
    actions: Vec<Action>,
    env: Arc<dyn Environment>,
    delay: Duration,
) -> RepriseResult<PlaybackHandle> {
    let runtime = tokio::runtime::Handle::try_current()
        .map_err(|_| RepriseError::RuntimeUnavailable)?;

    let start = Instant::now();
    let cancel = CancellationToken::new();
    let total_steps = actions.len();

    info!(
        steps = total_steps,
        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
        "playback scheduled"
    );

    let task = runtime.spawn(run_playback(actions, env, delay, start, cancel.clone()));

    Ok(PlaybackHandle {
        cancel,
        task,
        total_steps,
    })
}

async fn run_playback(
    actions: Vec<Action>,
    env: Arc<dyn Environment>,
    delay: Duration,
    start: Instant,
    cancel: CancellationToken,
) -> PlaybackReport {
    let mut report = PlaybackReport {
        steps: Vec::with_capacity(actions.len()),
    };

    let offsets = schedule_offsets(actions.len(), delay);
    for (index, (action, offset)) in actions.into_iter().zip(offsets).enumerate() {
        let fired = if cancel.is_cancelled() {
            false
        } else {
            match start.checked_add(offset) {
                Some(deadline) => tokio::select! {
                    biased;
                    _ = cancel.cancelled() => false,
                    _ = tokio::time::sleep_until(deadline) => true,
                },
                // No representable instant: the step can never come due.
                None => {
                    warn!(index, ?offset, "step deadline out of range, waiting for cancel");
                    cancel.cancelled().await;
                    false
                }
            }
        };

        let outcome = if fired {
            debug!(index, selector = %action.selector, "playback step firing");
            match execute_action(env.as_ref(), &action) {
                Ok(()) => StepOutcome::Executed,
                Err(e) => StepOutcome::Skipped(e),
            }
        } else {
            StepOutcome::Cancelled
        };

        report.steps.push(StepReport {
            index,
            action_type: action.action_type().to_string(),
            selector: action.selector,
            offset,
            outcome,
        });
    }

    info!(
        executed = report.executed(),
        skipped = report.skipped(),
        cancelled = report.cancelled(),
        "playback finished"
    );
    report
}

// ── Tests ────────────────────────────────────────────────────────────────────
