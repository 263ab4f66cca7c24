//! Host-facing trait definitions.
//!
//! The recorder never reaches for a global host. Everything it touches is
//! injected through one of these traits:
//!
//! - `EventSurface`: where user interactions are dispatched from
//! - `EventListener`: what the surface calls back into
//! - `Environment`: the live element tree playback acts on
//! - `ActionCodec`: the textual form of an action log
//!
//! All traits are `Send + Sync` so a recorder can be shared with the surface
//! and a playback task can own its environment.

use std::sync::Arc;

use reprise_contracts::{
    action::Action,
    error::RepriseResult,
    event::{EventKind, RawEvent},
    session::RecordingId,
};

/// Opaque token returned by `EventSurface::add_listener`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Opaque reference to an element inside an `Environment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle(pub usize);

/// Receives events from an `EventSurface`.
///
/// Implementations are called from inside the host's dispatch cycle and
/// must not panic: a failure here would take down unrelated listeners
/// sharing the same dispatch.
pub trait EventListener: Send + Sync {
    fn on_event(&self, event: &RawEvent);
}

/// A shared top-level event target (e.g. a document).
pub trait EventSurface: Send + Sync {
    /// Subscribe `listener` to every event of `kind`.
    fn add_listener(&self, kind: EventKind, listener: Arc<dyn EventListener>) -> ListenerId;

    /// Unsubscribe. Returns false if `id` was not registered.
    fn remove_listener(&self, id: ListenerId) -> bool;
}

/// The live element tree that playback acts on.
pub trait Environment: Send + Sync {
    /// Resolve `selector` to the first matching element, if any.
    fn query_selector(&self, selector: &str) -> Option<ElementHandle>;

    /// Invoke the element's click behavior.
    fn click(&self, element: ElementHandle) -> RepriseResult<()>;

    /// Overwrite the element's current value without notifying anyone.
    fn set_value(&self, element: ElementHandle, value: &str) -> RepriseResult<()>;

    /// Announce a value change so dependent listeners observe it.
    fn dispatch_input(&self, element: ElementHandle) -> RepriseResult<()>;
}

/// Encoding options passed to `ActionCodec::encode`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodeContext {
    /// The session the actions came from, if any.
    pub recording_id: Option<RecordingId>,
    pub pretty: bool,
}

/// Converts an action log to and from text.
///
/// `decode(encode(log))` must reproduce a log equal to `log`. `decode` must
/// be all-or-nothing: on error it returns no partial result.
pub trait ActionCodec: Send + Sync {
    fn encode(&self, actions: &[Action], ctx: &EncodeContext) -> RepriseResult<String>;

    fn decode(&self, input: &str) -> RepriseResult<Vec<Action>>;
}
