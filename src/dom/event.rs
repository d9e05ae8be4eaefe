//! Event kinds and the dispatch walk.

use std::cell::Cell;
use std::rc::Rc;

use crate::dom::Element;

pub(crate) type Listener = Rc<dyn Fn(&Event)>;

/// The event kinds the widgets react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventKind {
    Click,
    PointerEnter,
    PointerLeave,
}

impl EventKind {
    /// Whether events of this kind propagate to ancestor elements.
    pub fn bubbles(self) -> bool {
        matches!(self, EventKind::Click)
    }
}

/// A dispatched event, handed to every listener on the propagation path.
pub struct Event {
    kind: EventKind,
    target: Element,
    stopped: Cell<bool>,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The element the event was dispatched on, regardless of which
    /// element's listener is currently running.
    pub fn target(&self) -> &Element {
        &self.target
    }

    /// Stop the walk after the current element's listeners finish.
    ///
    /// Remaining listeners on the same element still run; ancestors
    /// (including document-level listeners) never see the event.
    pub fn stop_propagation(&self) {
        self.stopped.set(true);
    }

    pub fn propagation_stopped(&self) -> bool {
        self.stopped.get()
    }
}

/// Run the listeners for `kind` along the propagation path of `target`.
///
/// The path and each element's listener list are snapshotted before any
/// listener runs, so listeners may freely mutate the document, register
/// further listeners or dispatch nested events.
pub(crate) fn dispatch(target: &Element, kind: EventKind) {
    let path = if kind.bubbles() {
        target.bubble_path()
    } else {
        vec![target.clone()]
    };

    let event = Event {
        kind,
        target: target.clone(),
        stopped: Cell::new(false),
    };

    for element in path {
        for listener in element.listeners_for(kind) {
            listener(&event);
        }
        if event.propagation_stopped() {
            break;
        }
    }
}
