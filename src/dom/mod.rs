//! Headless document model backing the page widgets.
//!
//! This is not a browser DOM; it holds exactly what the widgets consume:
//! - an element tree with ids, classes, styles and attributes
//! - click bubbling with stop-propagation, non-bubbling pointer events
//! - a virtual clock for fades and zero-delay ticks
//! - window-level scroll state with listeners
//!
//! Everything is single-threaded behind `Rc<RefCell<..>>`. [`Document`]
//! and [`Element`] are cheap handles sharing one tree.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use thiserror::Error;

use crate::dom::event::{dispatch, Event, EventKind, Listener};
use crate::dom::timeline::Timeline;

pub mod event;
pub(crate) mod timeline;

/// Error returned when a widget cannot find a required element at mount
/// time. Page assemblers treat this as "skip the widget", never a crash.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MountError {
    #[error("required element #{0} is missing")]
    MissingId(String),
    #[error("no element with class .{0} was found")]
    MissingClass(String),
    #[error("no elements with a {0} attribute were found")]
    MissingAttr(String),
}

/// Element lookup capability.
///
/// Implemented by [`Document`] (whole tree) and [`Element`] (its own
/// subtree). Widgets mount against this interface, so tests can hand them
/// any tree they like.
pub trait ElementLocator {
    /// The first attached element carrying `id`, in tree order.
    fn by_id(&self, id: &str) -> Option<Element>;

    /// All attached elements carrying `class`, in tree order.
    fn by_class(&self, class: &str) -> Vec<Element>;

    /// The first attached element carrying `class`, if any.
    fn first_of_class(&self, class: &str) -> Option<Element> {
        self.by_class(class).into_iter().next()
    }

    /// [`by_id`](ElementLocator::by_id) that reports the missing id as a
    /// [`MountError`].
    fn require(&self, id: &str) -> Result<Element, MountError> {
        self.by_id(id)
            .ok_or_else(|| MountError::MissingId(id.to_owned()))
    }
}

pub(crate) type NodeId = usize;

struct NodeData {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    attrs: BTreeMap<String, String>,
    html: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    listeners: BTreeMap<EventKind, Vec<Listener>>,
}

impl NodeData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_owned(),
            id: None,
            classes: Vec::new(),
            styles: BTreeMap::new(),
            attrs: BTreeMap::new(),
            html: String::new(),
            parent: None,
            children: Vec::new(),
            listeners: BTreeMap::new(),
        }
    }
}

pub(crate) struct DocInner {
    nodes: Vec<NodeData>,
    scroll_y: f64,
    scroll_listeners: Vec<Rc<dyn Fn(f64)>>,
    timeline: Timeline,
}

impl DocInner {
    /// Nodes below `node` in preorder, excluding `node` itself.
    fn descendants_of(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[node].children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.nodes[current].children.iter().rev().copied());
        }
        out
    }
}

const ROOT: NodeId = 0;

/// Owner handle for one element tree plus its scroll state and clock.
#[derive(Clone)]
pub struct Document {
    inner: Rc<RefCell<DocInner>>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(DocInner {
                nodes: vec![NodeData::new("document")],
                scroll_y: 0.0,
                scroll_listeners: Vec::new(),
                timeline: Timeline::default(),
            })),
        }
    }

    /// The document pseudo-element. Bubbling clicks end here, so listeners
    /// registered on it see every click that was not stopped earlier.
    pub fn root(&self) -> Element {
        Element {
            doc: Rc::clone(&self.inner),
            node: ROOT,
        }
    }

    /// Create a detached element. It only becomes findable through a
    /// locator once appended somewhere under the root.
    pub fn create(&self, tag: &str) -> Element {
        let node = {
            let mut inner = self.inner.borrow_mut();
            inner.nodes.push(NodeData::new(tag));
            inner.nodes.len() - 1
        };
        Element {
            doc: Rc::clone(&self.inner),
            node,
        }
    }

    /// Move the clock forward and run every action that becomes due, in
    /// due-then-schedule order. Actions scheduled while draining (such as
    /// zero-delay ticks queued by a fade callback) run in the same call
    /// once they are due.
    pub fn advance(&self, dt: Duration) {
        self.inner.borrow_mut().timeline.tick(dt);
        loop {
            let next = self.inner.borrow_mut().timeline.pop_due();
            match next {
                Some(action) => action(),
                None => break,
            }
        }
    }

    /// Schedule a one-shot action `delay` from now. A zero delay models
    /// `setTimeout(.., 0)`: the action runs on the next [`advance`], never
    /// inside the current handler.
    ///
    /// [`advance`]: Document::advance
    pub fn defer(&self, delay: Duration, action: impl FnOnce() + 'static) {
        self.inner
            .borrow_mut()
            .timeline
            .schedule(delay, Box::new(action));
    }

    /// Actions still waiting on the clock.
    pub fn pending_actions(&self) -> usize {
        self.inner.borrow().timeline.pending()
    }

    pub fn on_scroll(&self, listener: impl Fn(f64) + 'static) {
        self.inner.borrow_mut().scroll_listeners.push(Rc::new(listener));
    }

    /// Set the vertical scroll offset and run the scroll listeners.
    pub fn scroll_to(&self, y: f64) {
        let listeners = {
            let mut inner = self.inner.borrow_mut();
            inner.scroll_y = y;
            inner.scroll_listeners.clone()
        };
        for listener in listeners {
            listener(y);
        }
    }

    pub fn scroll_y(&self) -> f64 {
        self.inner.borrow().scroll_y
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementLocator for Document {
    fn by_id(&self, id: &str) -> Option<Element> {
        element_by_id(&self.inner, ROOT, id)
    }

    fn by_class(&self, class: &str) -> Vec<Element> {
        elements_with_class(&self.inner, ROOT, class)
    }
}

/// Handle to one element. Clones refer to the same node.
#[derive(Clone)]
pub struct Element {
    doc: Rc<RefCell<DocInner>>,
    node: NodeId,
}

impl Element {
    /// The document this element belongs to.
    pub fn document(&self) -> Document {
        Document {
            inner: Rc::clone(&self.doc),
        }
    }

    pub fn tag(&self) -> String {
        self.doc.borrow().nodes[self.node].tag.clone()
    }

    pub fn id(&self) -> Option<String> {
        self.doc.borrow().nodes[self.node].id.clone()
    }

    pub fn set_id(&self, id: &str) {
        self.doc.borrow_mut().nodes[self.node].id = Some(id.to_owned());
    }

    /// Append `child` under this element, detaching it from any previous
    /// parent first.
    pub fn append(&self, child: &Element) {
        let mut inner = self.doc.borrow_mut();
        if let Some(old_parent) = inner.nodes[child.node].parent {
            inner.nodes[old_parent].children.retain(|&c| c != child.node);
        }
        inner.nodes[child.node].parent = Some(self.node);
        inner.nodes[self.node].children.push(child.node);
    }

    pub fn parent(&self) -> Option<Element> {
        let parent = self.doc.borrow().nodes[self.node].parent?;
        Some(Element {
            doc: Rc::clone(&self.doc),
            node: parent,
        })
    }

    /// All elements below this one, in tree order.
    pub fn descendants(&self) -> Vec<Element> {
        let inner = self.doc.borrow();
        inner
            .descendants_of(self.node)
            .into_iter()
            .map(|node| Element {
                doc: Rc::clone(&self.doc),
                node,
            })
            .collect()
    }

    pub fn add_class(&self, class: &str) {
        let mut inner = self.doc.borrow_mut();
        let classes = &mut inner.nodes[self.node].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_owned());
        }
    }

    pub fn remove_class(&self, class: &str) {
        self.doc.borrow_mut().nodes[self.node]
            .classes
            .retain(|c| c != class);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.doc.borrow().nodes[self.node]
            .classes
            .iter()
            .any(|c| c == class)
    }

    pub fn style(&self, name: &str) -> Option<String> {
        self.doc.borrow().nodes[self.node].styles.get(name).cloned()
    }

    pub fn set_style(&self, name: &str, value: &str) {
        self.doc.borrow_mut().nodes[self.node]
            .styles
            .insert(name.to_owned(), value.to_owned());
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.doc.borrow().nodes[self.node].attrs.get(name).cloned()
    }

    pub fn set_attr(&self, name: &str, value: &str) {
        self.doc.borrow_mut().nodes[self.node]
            .attrs
            .insert(name.to_owned(), value.to_owned());
    }

    /// The `value` attribute, the model's stand-in for an input's value.
    pub fn value(&self) -> Option<String> {
        self.attr("value")
    }

    pub fn set_value(&self, value: &str) {
        self.set_attr("value", value);
    }

    /// Inner content, opaque to this crate.
    pub fn html(&self) -> String {
        self.doc.borrow().nodes[self.node].html.clone()
    }

    /// Replace the inner content verbatim.
    pub fn set_html(&self, html: &str) {
        self.doc.borrow_mut().nodes[self.node].html = html.to_owned();
    }

    pub fn hide(&self) {
        self.set_style("display", "none");
    }

    pub fn show(&self) {
        self.set_style("display", "block");
    }

    pub fn is_visible(&self) -> bool {
        self.style("display").as_deref() != Some("none")
    }

    /// Become visible immediately; the opacity ramp itself is not
    /// observable state, so the duration only exists for call-site
    /// symmetry with [`fade_out`](Element::fade_out).
    pub fn fade_in(&self, _duration: Duration) {
        self.show();
    }

    /// Stay visible for `duration`, then hide and run `on_complete`.
    ///
    /// Overlapping fades all complete; completion order follows the
    /// timeline's due-then-schedule order.
    pub fn fade_out(&self, duration: Duration, on_complete: impl FnOnce() + 'static) {
        let element = self.clone();
        self.document().defer(duration, move || {
            element.hide();
            on_complete();
        });
    }

    /// Register a listener. Listeners on one element run in registration
    /// order and are never deregistered.
    pub fn on(&self, kind: EventKind, listener: impl Fn(&Event) + 'static) {
        self.doc.borrow_mut().nodes[self.node]
            .listeners
            .entry(kind)
            .or_default()
            .push(Rc::new(listener));
    }

    /// Dispatch an event with this element as the target.
    pub fn dispatch(&self, kind: EventKind) {
        dispatch(self, kind);
    }

    pub fn click(&self) {
        self.dispatch(EventKind::Click);
    }

    pub fn pointer_enter(&self) {
        self.dispatch(EventKind::PointerEnter);
    }

    pub fn pointer_leave(&self) {
        self.dispatch(EventKind::PointerLeave);
    }

    /// Target-to-root propagation path, snapshotted before dispatch.
    pub(crate) fn bubble_path(&self) -> Vec<Element> {
        let inner = self.doc.borrow();
        let mut path = vec![self.clone()];
        let mut current = self.node;
        while let Some(parent) = inner.nodes[current].parent {
            path.push(Element {
                doc: Rc::clone(&self.doc),
                node: parent,
            });
            current = parent;
        }
        path
    }

    pub(crate) fn listeners_for(&self, kind: EventKind) -> Vec<Listener> {
        self.doc.borrow().nodes[self.node]
            .listeners
            .get(&kind)
            .cloned()
            .unwrap_or_default()
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.doc, &other.doc) && self.node == other.node
    }
}

impl Eq for Element {}

impl ElementLocator for Element {
    fn by_id(&self, id: &str) -> Option<Element> {
        element_by_id(&self.doc, self.node, id)
    }

    fn by_class(&self, class: &str) -> Vec<Element> {
        elements_with_class(&self.doc, self.node, class)
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Ok(inner) = self.doc.try_borrow() else {
            return write!(f, "<element {}>", self.node);
        };
        let node = &inner.nodes[self.node];
        write!(f, "<{}", node.tag)?;
        if let Some(id) = &node.id {
            write!(f, "#{id}")?;
        }
        for class in &node.classes {
            write!(f, ".{class}")?;
        }
        write!(f, ">")
    }
}

fn element_by_id(doc: &Rc<RefCell<DocInner>>, start: NodeId, id: &str) -> Option<Element> {
    let inner = doc.borrow();
    inner
        .descendants_of(start)
        .into_iter()
        .find(|&node| inner.nodes[node].id.as_deref() == Some(id))
        .map(|node| Element {
            doc: Rc::clone(doc),
            node,
        })
}

fn elements_with_class(doc: &Rc<RefCell<DocInner>>, start: NodeId, class: &str) -> Vec<Element> {
    let inner = doc.borrow();
    inner
        .descendants_of(start)
        .into_iter()
        .filter(|&node| inner.nodes[node].classes.iter().any(|c| c == class))
        .map(|node| Element {
            doc: Rc::clone(doc),
            node,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn attach(doc: &Document, tag: &str, id: &str) -> Element {
        let element = doc.create(tag);
        element.set_id(id);
        doc.root().append(&element);
        element
    }

    #[test]
    fn click_bubbles_from_target_to_root() {
        let doc = Document::new();
        let outer = attach(&doc, "div", "outer");
        let inner = doc.create("div");
        inner.set_id("inner");
        outer.append(&inner);

        let log = Rc::new(RefCell::new(Vec::new()));
        for (element, label) in [(&inner, "inner"), (&outer, "outer"), (&doc.root(), "document")] {
            let log = Rc::clone(&log);
            element.on(EventKind::Click, move |_| log.borrow_mut().push(label));
        }

        inner.click();
        assert_eq!(*log.borrow(), vec!["inner", "outer", "document"]);
    }

    #[test]
    fn stop_propagation_spares_same_node_listeners() {
        let doc = Document::new();
        let child = attach(&doc, "div", "child");

        let log = Rc::new(RefCell::new(Vec::new()));
        child.on(EventKind::Click, {
            let log = Rc::clone(&log);
            move |event| {
                event.stop_propagation();
                log.borrow_mut().push("first");
            }
        });
        child.on(EventKind::Click, {
            let log = Rc::clone(&log);
            move |_| log.borrow_mut().push("second")
        });
        doc.root().on(EventKind::Click, {
            let log = Rc::clone(&log);
            move |_| log.borrow_mut().push("document")
        });

        child.click();
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn pointer_events_do_not_bubble() {
        let doc = Document::new();
        let child = attach(&doc, "div", "child");

        let reached_root = Rc::new(RefCell::new(false));
        doc.root().on(EventKind::PointerEnter, {
            let reached_root = Rc::clone(&reached_root);
            move |_| *reached_root.borrow_mut() = true
        });

        child.pointer_enter();
        assert!(!*reached_root.borrow());
    }

    #[test]
    fn event_target_is_the_dispatch_origin() {
        let doc = Document::new();
        let outer = attach(&doc, "div", "outer");
        let inner = doc.create("span");
        outer.append(&inner);

        let seen = Rc::new(RefCell::new(None));
        outer.on(EventKind::Click, {
            let seen = Rc::clone(&seen);
            move |event| *seen.borrow_mut() = Some(event.target().clone())
        });

        inner.click();
        assert_eq!(seen.borrow().as_ref(), Some(&inner));
    }

    #[test]
    fn locator_sees_attached_elements_only() {
        let doc = Document::new();
        let attached = attach(&doc, "div", "attached");
        attached.add_class("card");

        let detached = doc.create("div");
        detached.set_id("detached");
        detached.add_class("card");

        assert_eq!(doc.by_id("attached"), Some(attached.clone()));
        assert_eq!(doc.by_id("detached"), None);
        assert_eq!(doc.by_class("card"), vec![attached]);
    }

    #[test]
    fn element_locator_is_scoped_to_the_subtree() {
        let doc = Document::new();
        let left = attach(&doc, "div", "left");
        let right = attach(&doc, "div", "right");

        let inside = doc.create("i");
        inside.add_class("icon");
        left.append(&inside);

        assert_eq!(left.first_of_class("icon"), Some(inside));
        assert!(right.first_of_class("icon").is_none());
        // the subtree excludes the element itself
        left.add_class("icon");
        assert_eq!(left.by_class("icon").len(), 1);
    }

    #[test]
    fn require_names_the_missing_id() {
        let doc = Document::new();
        assert_eq!(
            doc.require("nope"),
            Err(MountError::MissingId("nope".to_owned()))
        );
    }

    #[test]
    fn fade_out_hides_only_after_the_duration() {
        let doc = Document::new();
        let panel = attach(&doc, "div", "panel");

        let completed = Rc::new(RefCell::new(false));
        panel.fade_out(Duration::from_millis(100), {
            let completed = Rc::clone(&completed);
            move || *completed.borrow_mut() = true
        });

        doc.advance(Duration::from_millis(50));
        assert!(panel.is_visible());
        assert!(!*completed.borrow());

        doc.advance(Duration::from_millis(50));
        assert!(!panel.is_visible());
        assert!(*completed.borrow());
    }

    #[test]
    fn zero_delay_defer_waits_for_the_next_advance() {
        let doc = Document::new();
        let ran = Rc::new(RefCell::new(false));
        doc.defer(Duration::ZERO, {
            let ran = Rc::clone(&ran);
            move || *ran.borrow_mut() = true
        });

        assert!(!*ran.borrow());
        doc.advance(Duration::ZERO);
        assert!(*ran.borrow());
    }

    #[test]
    fn scroll_to_updates_offset_and_notifies() {
        let doc = Document::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        doc.on_scroll({
            let seen = Rc::clone(&seen);
            move |y| seen.borrow_mut().push(y)
        });

        doc.scroll_to(75.0);
        doc.scroll_to(10.0);

        assert_eq!(doc.scroll_y(), 10.0);
        assert_eq!(*seen.borrow(), vec![75.0, 10.0]);
    }

    #[test]
    fn append_reparents_an_element() {
        let doc = Document::new();
        let first = attach(&doc, "div", "first");
        let second = attach(&doc, "div", "second");
        let child = doc.create("span");
        child.set_id("child");

        first.append(&child);
        assert_eq!(first.descendants().len(), 1);

        second.append(&child);
        assert!(first.descendants().is_empty());
        assert_eq!(child.parent(), Some(second));
    }
}
