//! In-memory host with a virtual clock
//!
//! Elements live in an arena addressed by [`NodeId`]. Nothing runs on its
//! own: queued animation frames run on [`HeadlessHost::run_animation_frame`]
//! and timers fire as [`HeadlessHost::advance`] moves the clock forward.
//! Useful for tests and for rendering loader markup without a browser.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::error::{LoaderError, LoaderResult};
use crate::host::Host;

/// Handle to an element owned by a [`HeadlessHost`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

const BODY: NodeId = NodeId(0);

/// Upper bound for [`HeadlessHost::flush_animation_frames`]
const MAX_FLUSHED_FRAMES: usize = 64;

#[derive(Debug, Default)]
struct Element {
    tag: &'static str,
    class: String,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

struct PendingTimeout {
    due: u64,
    seq: u64,
    callback: Box<dyn FnOnce()>,
}

struct Repeating {
    period: u64,
    next_due: u64,
    // taken out while the callback runs
    callback: Option<Box<dyn FnMut()>>,
}

enum Due {
    Timeout(u64),
    Interval(u64),
}

struct Inner {
    elements: Vec<Element>,
    now: u64,
    next_seq: u64,
    frames: Vec<Box<dyn FnOnce()>>,
    timeouts: Vec<PendingTimeout>,
    intervals: BTreeMap<u64, Repeating>,
}

impl Inner {
    fn element(&self, node: NodeId) -> LoaderResult<&Element> {
        self.elements
            .get(node.0)
            .ok_or_else(|| LoaderError::dom(format!("unknown node {}", node.0)))
    }

    fn element_mut(&mut self, node: NodeId) -> LoaderResult<&mut Element> {
        self.elements
            .get_mut(node.0)
            .ok_or_else(|| LoaderError::dom(format!("unknown node {}", node.0)))
    }

    fn seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn unlink(&mut self, node: NodeId) {
        let Some(parent) = self.elements.get_mut(node.0).and_then(|e| e.parent.take()) else {
            return;
        };
        if let Some(parent) = self.elements.get_mut(parent.0) {
            parent.children.retain(|child| *child != node);
        }
    }

    /// Earliest timer due no later than `limit`
    fn next_due(&self, limit: u64) -> Option<(u64, Due)> {
        let timeout = self
            .timeouts
            .iter()
            .filter(|t| t.due <= limit)
            .min_by_key(|t| (t.due, t.seq))
            .map(|t| (t.due, t.seq));
        let interval = self
            .intervals
            .iter()
            .filter(|(_, r)| r.next_due <= limit && r.callback.is_some())
            .min_by_key(|(id, r)| (r.next_due, **id))
            .map(|(id, r)| (r.next_due, *id));

        match (timeout, interval) {
            (Some((t_due, seq)), Some((i_due, _))) if t_due <= i_due => {
                Some((t_due, Due::Timeout(seq)))
            }
            (_, Some((i_due, id))) => Some((i_due, Due::Interval(id))),
            (Some((t_due, seq)), None) => Some((t_due, Due::Timeout(seq))),
            (None, None) => None,
        }
    }
}

/// A [`Host`] that renders into memory and only moves time when told to
#[derive(Clone)]
pub struct HeadlessHost {
    inner: Rc<RefCell<Inner>>,
}

/// Repeating timer of a [`HeadlessHost`]; dropping it cancels the timer
pub struct HeadlessInterval {
    id: u64,
    host: Weak<RefCell<Inner>>,
}

impl Drop for HeadlessInterval {
    fn drop(&mut self) {
        if let Some(inner) = self.host.upgrade() {
            let removed = inner
                .try_borrow_mut()
                .ok()
                .and_then(|mut inner| inner.intervals.remove(&self.id));
            drop(removed);
        }
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HeadlessHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("HeadlessHost")
            .field("elements", &inner.elements.len())
            .field("now", &inner.now)
            .field("frames", &inner.frames.len())
            .field("timeouts", &inner.timeouts.len())
            .field("intervals", &inner.intervals.len())
            .finish()
    }
}

impl HeadlessHost {
    /// Create a host holding an empty `body`
    #[must_use]
    pub fn new() -> Self {
        let body = Element {
            tag: "body",
            ..Element::default()
        };
        Self {
            inner: Rc::new(RefCell::new(Inner {
                elements: vec![body],
                now: 0,
                next_seq: 0,
                frames: Vec::new(),
                timeouts: Vec::new(),
                intervals: BTreeMap::new(),
            })),
        }
    }

    #[must_use]
    pub const fn body(&self) -> NodeId {
        BODY
    }

    /// Virtual time in milliseconds
    pub fn now(&self) -> u64 {
        self.inner.borrow().now
    }

    pub fn pending_frames(&self) -> usize {
        self.inner.borrow().frames.len()
    }

    pub fn pending_timeouts(&self) -> usize {
        self.inner.borrow().timeouts.len()
    }

    pub fn active_intervals(&self) -> usize {
        self.inner.borrow().intervals.len()
    }

    /// Run the callbacks queued for the next frame and return how many ran.
    ///
    /// Callbacks requesting another frame are queued for the following one.
    pub fn run_animation_frame(&self) -> usize {
        let frame = std::mem::take(&mut self.inner.borrow_mut().frames);
        let count = frame.len();
        for callback in frame {
            callback();
        }
        count
    }

    /// Run frames until none are queued
    pub fn flush_animation_frames(&self) -> usize {
        let mut total = 0;
        for _ in 0..MAX_FLUSHED_FRAMES {
            let ran = self.run_animation_frame();
            if ran == 0 {
                break;
            }
            total += ran;
        }
        total
    }

    /// Move the clock forward, firing every timer that falls due on the way
    pub fn advance(&self, millis: u64) {
        let target = self.now() + millis;
        loop {
            let next = self.inner.borrow().next_due(target);
            match next {
                Some((due, Due::Timeout(seq))) => {
                    let callback = {
                        let mut inner = self.inner.borrow_mut();
                        inner.now = due;
                        let index = inner.timeouts.iter().position(|t| t.seq == seq);
                        index.map(|index| inner.timeouts.remove(index).callback)
                    };
                    if let Some(callback) = callback {
                        callback();
                    }
                }
                Some((due, Due::Interval(id))) => {
                    let callback = {
                        let mut inner = self.inner.borrow_mut();
                        inner.now = due;
                        inner.intervals.get_mut(&id).and_then(|repeating| {
                            repeating.next_due += repeating.period;
                            repeating.callback.take()
                        })
                    };
                    let Some(mut callback) = callback else {
                        continue;
                    };
                    callback();
                    let cancelled = {
                        let mut inner = self.inner.borrow_mut();
                        match inner.intervals.get_mut(&id) {
                            Some(repeating) => {
                                repeating.callback = Some(callback);
                                None
                            }
                            None => Some(callback),
                        }
                    };
                    drop(cancelled);
                }
                None => break,
            }
        }
        self.inner.borrow_mut().now = target;
    }

    /// First element at or below `root` (depth-first) whose class list contains `class`
    pub fn find_by_class(&self, root: NodeId, class: &str) -> Option<NodeId> {
        self.find_all_by_class(root, class).into_iter().next()
    }

    pub fn find_all_by_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        let inner = self.inner.borrow();
        let mut found = Vec::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            let Ok(element) = inner.element(node) else {
                continue;
            };
            if element.class.split_whitespace().any(|c| c == class) {
                found.push(node);
            }
            stack.extend(element.children.iter().rev());
        }
        found
    }

    pub fn class_name(&self, node: NodeId) -> String {
        self.read(node, |e| e.class.clone()).unwrap_or_default()
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.read(node, |e| e.attributes.get(name).cloned()).flatten()
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.read(node, |e| e.style.get(property).cloned()).flatten()
    }

    pub fn text(&self, node: NodeId) -> String {
        self.read(node, |e| e.text.clone()).unwrap_or_default()
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.read(node, |e| e.children.clone()).unwrap_or_default()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.read(node, |e| e.parent).flatten()
    }

    /// Serialize the subtree rooted at `node` as HTML
    pub fn to_html(&self, node: NodeId) -> String {
        let inner = self.inner.borrow();
        let mut html = String::new();
        write_html(&inner, node, &mut html);
        html
    }

    fn read<T>(&self, node: NodeId, f: impl FnOnce(&Element) -> T) -> Option<T> {
        self.inner.borrow().element(node).ok().map(f)
    }
}

fn write_html(inner: &Inner, node: NodeId, out: &mut String) {
    let Ok(element) = inner.element(node) else {
        return;
    };
    out.push('<');
    out.push_str(element.tag);
    if !element.class.is_empty() {
        push_attribute(out, "class", &element.class);
    }
    for (name, value) in &element.attributes {
        push_attribute(out, name, value);
    }
    if !element.style.is_empty() {
        let style = element
            .style
            .iter()
            .map(|(property, value)| format!("{property}: {value}"))
            .collect::<Vec<_>>()
            .join("; ");
        push_attribute(out, "style", &style);
    }
    out.push('>');
    out.push_str(&escape(&element.text));
    for child in &element.children {
        write_html(inner, *child, out);
    }
    out.push_str("</");
    out.push_str(element.tag);
    out.push('>');
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value).replace('"', "&quot;"));
    out.push('"');
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl Host for HeadlessHost {
    type Node = NodeId;
    type Interval = HeadlessInterval;

    fn create_element(&self, class: &str) -> LoaderResult<NodeId> {
        let mut inner = self.inner.borrow_mut();
        let node = NodeId(inner.elements.len());
        inner.elements.push(Element {
            tag: "div",
            class: class.to_string(),
            ..Element::default()
        });
        Ok(node)
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) -> LoaderResult<()> {
        self.inner
            .borrow_mut()
            .element_mut(*node)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) -> LoaderResult<()> {
        self.inner
            .borrow_mut()
            .element_mut(*node)?
            .style
            .insert(property.to_string(), value.to_string());
        Ok(())
    }

    fn set_text(&self, node: &NodeId, text: &str) -> LoaderResult<()> {
        text.clone_into(&mut self.inner.borrow_mut().element_mut(*node)?.text);
        Ok(())
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> LoaderResult<()> {
        if parent == child {
            return Err(LoaderError::dom("cannot append a node to itself"));
        }
        let mut inner = self.inner.borrow_mut();
        inner.element(*parent)?;
        inner.element(*child)?;
        inner.unlink(*child);
        inner.element_mut(*child)?.parent = Some(*parent);
        inner.element_mut(*parent)?.children.push(*child);
        Ok(())
    }

    fn detach(&self, node: &NodeId) {
        self.inner.borrow_mut().unlink(*node);
    }

    fn is_attached(&self, node: &NodeId) -> bool {
        self.parent(*node).is_some()
    }

    fn default_container(&self) -> LoaderResult<NodeId> {
        Ok(BODY)
    }

    fn request_animation_frame<F>(&self, f: F)
    where
        F: FnOnce() + 'static,
    {
        self.inner.borrow_mut().frames.push(Box::new(f));
    }

    fn set_timeout<F>(&self, millis: u32, f: F)
    where
        F: FnOnce() + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let seq = inner.seq();
        let due = inner.now + u64::from(millis);
        inner.timeouts.push(PendingTimeout {
            due,
            seq,
            callback: Box::new(f),
        });
    }

    fn set_interval<F>(&self, millis: u32, f: F) -> HeadlessInterval
    where
        F: FnMut() + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.seq();
        let period = u64::from(millis).max(1);
        let next_due = inner.now + period;
        inner.intervals.insert(
            id,
            Repeating {
                period,
                next_due,
                callback: Some(Box::new(f)),
            },
        );
        HeadlessInterval {
            id,
            host: Rc::downgrade(&self.inner),
        }
    }
}
