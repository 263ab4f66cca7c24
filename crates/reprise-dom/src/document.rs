//! An in-memory document: element list, listener registry, and journal.
//!
//! `Document` plays both host roles at once. As an `EventSurface` it hands
//! user gestures to whoever subscribed; as an `Environment` it lets playback
//! find elements and act on them. Elements are kept in document order, so
//! `query_selector` returns the first match the way a browser does.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex, MutexGuard, PoisonError,
};

use tracing::{debug, warn};

use reprise_contracts::{
    error::{RepriseError, RepriseResult},
    event::{ElementSnapshot, EventKind, RawEvent},
};
use reprise_core::traits::{ElementHandle, Environment, EventListener, EventSurface, ListenerId};

use crate::query::Selector;

/// Something that happened to the document, in the order it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum Activity {
    /// A click event was dispatched to the element.
    Clicked { element: ElementHandle, x: f64, y: f64 },
    /// The element's value was overwritten.
    ValueSet { element: ElementHandle, value: String },
    /// An input event was dispatched to the element.
    InputDispatched { element: ElementHandle },
}

struct Registration {
    id: ListenerId,
    kind: EventKind,
    listener: Arc<dyn EventListener>,
}

#[derive(Default)]
struct Inner {
    elements: Vec<ElementSnapshot>,
    listeners: Vec<Registration>,
    journal: Vec<Activity>,
}

#[derive(Default)]
pub struct Document {
    inner: Mutex<Inner>,
    next_listener: AtomicU64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element at the end of the document. Tag names are stored
    /// upper case.
    pub fn append(&self, mut element: ElementSnapshot) -> ElementHandle {
        element.tag_name = element.tag_name.to_ascii_uppercase();
        let mut inner = self.lock();
        inner.elements.push(element);
        ElementHandle(inner.elements.len() - 1)
    }

    /// A document holding `elements` in the given order.
    pub fn from_elements(elements: impl IntoIterator<Item = ElementSnapshot>) -> Self {
        let doc = Self::new();
        for element in elements {
            doc.append(element);
        }
        doc
    }

    /// Builder-style `append`.
    pub fn with(self, element: ElementSnapshot) -> Self {
        self.append(element);
        self
    }

    /// Current state of one element.
    pub fn element(&self, handle: ElementHandle) -> Option<ElementSnapshot> {
        self.lock().elements.get(handle.0).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current value of the first element matching `selector`.
    pub fn value_of(&self, selector: &str) -> Option<String> {
        let handle = self.query_selector(selector)?;
        self.element(handle).and_then(|el| el.value)
    }

    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    /// Everything that has happened so far.
    pub fn journal(&self) -> Vec<Activity> {
        self.lock().journal.clone()
    }

    pub fn clear_journal(&self) {
        self.lock().journal.clear();
    }

    // ── User gestures ────────────────────────────────────────────────────────

    /// A user clicks the first element matching `selector` at `(x, y)`.
    pub fn user_click(&self, selector: &str, x: f64, y: f64) -> RepriseResult<()> {
        let element = self.resolve(selector)?;
        self.fire_click(element, x, y)
    }

    /// A user types `text` into the first element matching `selector`,
    /// replacing its value.
    pub fn user_type(&self, selector: &str, text: &str) -> RepriseResult<()> {
        let element = self.resolve(selector)?;
        self.set_value(element, text)?;
        self.dispatch_input(element)
    }

    // ── Internals ────────────────────────────────────────────────────────────

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn resolve(&self, selector: &str) -> RepriseResult<ElementHandle> {
        self.query_selector(selector)
            .ok_or_else(|| RepriseError::ElementNotFound {
                selector: selector.to_string(),
            })
    }

    fn snapshot(&self, element: ElementHandle) -> RepriseResult<ElementSnapshot> {
        self.element(element).ok_or_else(|| RepriseError::Host {
            reason: format!("no element with handle {}", element.0),
        })
    }

    fn fire_click(&self, element: ElementHandle, x: f64, y: f64) -> RepriseResult<()> {
        let target = self.snapshot(element)?;
        self.lock().journal.push(Activity::Clicked { element, x, y });
        self.dispatch(&RawEvent::click(target, x, y));
        Ok(())
    }

    /// Deliver `event` to every listener registered for its kind.
    ///
    /// The registry is copied out before any listener runs, so listeners may
    /// call back into the document (or unsubscribe) without deadlocking.
    fn dispatch(&self, event: &RawEvent) {
        let targets: Vec<Arc<dyn EventListener>> = self
            .lock()
            .listeners
            .iter()
            .filter(|r| r.kind.as_str() == event.kind)
            .map(|r| r.listener.clone())
            .collect();

        debug!(kind = %event.kind, listeners = targets.len(), "dispatching event");
        for listener in targets {
            listener.on_event(event);
        }
    }
}

impl EventSurface for Document {
    fn add_listener(&self, kind: EventKind, listener: Arc<dyn EventListener>) -> ListenerId {
        let id = ListenerId(self.next_listener.fetch_add(1, Ordering::Relaxed));
        self.lock().listeners.push(Registration { id, kind, listener });
        debug!(listener = id.0, %kind, "listener added");
        id
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        let mut inner = self.lock();
        let before = inner.listeners.len();
        inner.listeners.retain(|r| r.id != id);
        before != inner.listeners.len()
    }
}

impl Environment for Document {
    fn query_selector(&self, selector: &str) -> Option<ElementHandle> {
        let parsed = match Selector::parse(selector) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "cannot query selector");
                return None;
            }
        };
        self.lock()
            .elements
            .iter()
            .position(|el| parsed.matches(el))
            .map(ElementHandle)
    }

    /// Programmatic clicks report `(0, 0)` as their position.
    fn click(&self, element: ElementHandle) -> RepriseResult<()> {
        self.fire_click(element, 0.0, 0.0)
    }

    fn set_value(&self, element: ElementHandle, value: &str) -> RepriseResult<()> {
        let mut inner = self.lock();
        let target = inner
            .elements
            .get_mut(element.0)
            .ok_or_else(|| RepriseError::Host {
                reason: format!("no element with handle {}", element.0),
            })?;
        target.value = Some(value.to_string());
        inner.journal.push(Activity::ValueSet {
            element,
            value: value.to_string(),
        });
        Ok(())
    }

    fn dispatch_input(&self, element: ElementHandle) -> RepriseResult<()> {
        let target = self.snapshot(element)?;
        self.lock().journal.push(Activity::InputDispatched { element });
        self.dispatch(&RawEvent::input(target));
        Ok(())
    }
}
