//! The interaction recorder.
//!
//! A `Recorder` is always either `Idle` or `Recording`:
//!
//!   Idle ──start_recording()──▶ Recording ──stop_recording()──▶ Idle
//!
//! While recording it is subscribed to `click` and `input` on its injected
//! `EventSurface`, and every event the surface delivers is turned into an
//! `Action` and appended to the log, in delivery order. Events that arrive
//! while idle are dropped.
//!
//! The log belongs to the recorder alone. Callers get copies (`actions`,
//! `stop_recording`, `export_actions`) and may replace it wholesale with
//! `import_actions`, but nothing outside can mutate it in place.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, info, warn};

use reprise_contracts::{
    action::Action,
    config::{RecorderConfig, RestartPolicy},
    error::{RepriseError, RepriseResult},
    event::{EventKind, RawEvent},
    session::{RecorderState, RecordingId},
};

use crate::{
    capture::action_from_event,
    playback::{self, PlaybackHandle},
    selector::SelectorPolicy,
    traits::{ActionCodec, EncodeContext, Environment, EventListener, EventSurface, ListenerId},
};

// ── Internal state ────────────────────────────────────────────────────────────

#[derive(Default)]
struct Session {
    state: RecorderState,
    recording_id: Option<RecordingId>,
    actions: Vec<Action>,
}

/// The part of the recorder the event surface holds on to.
///
/// Keeping it separate from `Recorder` means the surface never owns the
/// recorder (and through it, the surface itself).
struct Capture {
    selectors: SelectorPolicy,
    session: Mutex<Session>,
}

impl Capture {
    /// Lock the session, recovering from poisoning.
    ///
    /// Every mutation under this lock is a single push or assignment, so a
    /// panic elsewhere cannot leave the session half-updated.
    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn handle_event(&self, event: &RawEvent) {
        let mut session = self.lock();
        if session.state != RecorderState::Recording {
            debug!(kind = %event.kind, "event ignored while idle");
            return;
        }

        match action_from_event(event, &self.selectors) {
            Ok(Some(action)) => {
                debug!(
                    recording_id = ?session.recording_id,
                    action_type = action.action_type(),
                    selector = %action.selector,
                    index = session.actions.len(),
                    "recorded action"
                );
                session.actions.push(action);
            }
            Ok(None) => {
                debug!(kind = %event.kind, "event kind not captured");
            }
            Err(e) => {
                warn!(error = %e, kind = %event.kind, "skipping event");
            }
        }
    }
}

impl EventListener for Capture {
    fn on_event(&self, event: &RawEvent) {
        self.handle_event(event);
    }
}

// ── Public recorder ───────────────────────────────────────────────────────────

/// Records interactions from an event surface and replays them.
///
/// Construct one recorder per independent log. Several recorders may share
/// a surface without interfering with each other.
pub struct Recorder {
    surface: Arc<dyn EventSurface>,
    codec: Box<dyn ActionCodec>,
    config: RecorderConfig,
    capture: Arc<Capture>,
    subscriptions: Mutex<Vec<ListenerId>>,
}

impl Recorder {
    pub fn new(
        surface: Arc<dyn EventSurface>,
        codec: Box<dyn ActionCodec>,
        config: RecorderConfig,
    ) -> Self {
        let capture = Capture {
            selectors: SelectorPolicy::new(config.intent_attribute.clone()),
            session: Mutex::new(Session::default()),
        };
        Self {
            surface,
            codec,
            config,
            capture: Arc::new(capture),
            subscriptions: Mutex::new(Vec::new()),
        }
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    pub fn state(&self) -> RecorderState {
        self.capture.lock().state
    }

    pub fn is_recording(&self) -> bool {
        self.state() == RecorderState::Recording
    }

    /// Id of the current (or most recent) recording session.
    pub fn recording_id(&self) -> Option<RecordingId> {
        self.capture.lock().recording_id
    }

    /// A snapshot of the current log.
    pub fn actions(&self) -> Vec<Action> {
        self.capture.lock().actions.clone()
    }

    /// Begin a new recording with an empty log.
    ///
    /// The previous log is discarded; export it first if it matters. When
    /// already recording, behavior follows `RecorderConfig::restart`:
    /// `discard` starts over with a fresh log and id (listeners stay
    /// attached once), `reject` returns `AlreadyRecording`.
    pub fn start_recording(&self) -> RepriseResult<()> {
        let mut subscriptions = self.lock_subscriptions();
        {
            let mut session = self.capture.lock();
            if session.state == RecorderState::Recording {
                match self.config.restart {
                    RestartPolicy::Reject => {
                        warn!(
                            recording_id = ?session.recording_id,
                            "start rejected: already recording"
                        );
                        return Err(RepriseError::AlreadyRecording);
                    }
                    RestartPolicy::Discard => {
                        let recording_id = RecordingId::new();
                        warn!(
                            previous = ?session.recording_id,
                            %recording_id,
                            discarded = session.actions.len(),
                            "recording restarted, previous log discarded"
                        );
                        session.actions = Vec::new();
                        session.recording_id = Some(recording_id);
                        return Ok(());
                    }
                }
            }
        }

        for kind in EventKind::ALL {
            let listener: Arc<dyn EventListener> = self.capture.clone();
            subscriptions.push(self.surface.add_listener(kind, listener));
        }

        let recording_id = RecordingId::new();
        let mut session = self.capture.lock();
        session.actions = Vec::new();
        session.recording_id = Some(recording_id);
        session.state = RecorderState::Recording;
        info!(%recording_id, "recording started");
        Ok(())
    }

    /// Stop recording and return the finished log.
    ///
    /// While idle this is a no-op that returns the current log unchanged.
    pub fn stop_recording(&self) -> Vec<Action> {
        let mut subscriptions = self.lock_subscriptions();
        let actions = {
            let mut session = self.capture.lock();
            if session.state == RecorderState::Idle {
                debug!("stop requested while idle");
                return session.actions.clone();
            }
            session.state = RecorderState::Idle;
            info!(
                recording_id = ?session.recording_id,
                action_count = session.actions.len(),
                "recording stopped"
            );
            session.actions.clone()
        };

        for id in subscriptions.drain(..) {
            self.surface.remove_listener(id);
        }
        actions
    }

    /// Feed one host event to the recorder.
    ///
    /// This is exactly what the surface listeners call. It never fails:
    /// idle-state events are dropped and malformed events are logged and
    /// skipped.
    pub fn handle_event(&self, event: &RawEvent) {
        self.capture.handle_event(event);
    }

    /// Execute a single action against `env`. Failures are logged and
    /// returned, never panicked.
    pub fn execute_action(&self, env: &dyn Environment, action: &Action) -> RepriseResult<()> {
        playback::execute_action(env, action)
    }

    /// Replay a copy of the current log, step *i* at `i * delay` from now.
    pub fn playback(
        &self,
        env: Arc<dyn Environment>,
        delay: Duration,
    ) -> RepriseResult<PlaybackHandle> {
        playback::spawn_playback(self.actions(), env, delay)
    }

    /// `playback` with the configured delay.
    pub fn playback_default(&self, env: Arc<dyn Environment>) -> RepriseResult<PlaybackHandle> {
        self.playback(env, Duration::from_millis(self.config.playback_delay_ms))
    }

    /// Serialize the current log.
    pub fn export_actions(&self) -> RepriseResult<String> {
        let (actions, recording_id) = {
            let session = self.capture.lock();
            (session.actions.clone(), session.recording_id)
        };
        let ctx = EncodeContext {
            recording_id,
            pretty: self.config.pretty_export,
        };
        self.codec.encode(&actions, &ctx)
    }

    /// Replace the current log with a serialized one.
    ///
    /// The input is decoded completely before anything is touched; on
    /// failure the existing log is left exactly as it was.
    pub fn import_actions(&self, serialized: &str) -> RepriseResult<()> {
        let actions = match self.codec.decode(serialized) {
            Ok(actions) => actions,
            Err(e) => {
                warn!(error = %e, "import failed, keeping existing log");
                return Err(e);
            }
        };

        let mut session = self.capture.lock();
        info!(
            imported = actions.len(),
            replaced = session.actions.len(),
            "action log imported"
        );
        session.actions = actions;
        Ok(())
    }

    fn lock_subscriptions(&self) -> MutexGuard<'_, Vec<ListenerId>> {
        self.subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        for id in self.lock_subscriptions().drain(..) {
            self.surface.remove_listener(id);
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
