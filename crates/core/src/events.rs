//! Lifecycle events and their subscribers

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::options::Config;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoaderEvent {
    Show,
    Hide,
    Update,
}

impl LoaderEvent {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Show => "show",
            Self::Hide => "hide",
            Self::Update => "update",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "show" => Some(Self::Show),
            "hide" => Some(Self::Hide),
            "update" => Some(Self::Update),
            _ => None,
        }
    }
}

impl fmt::Display for LoaderEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Subscriber callback. `update` passes the merged configuration, the
/// other events pass `None`. Identity is the `Rc` allocation, so keep a
/// clone around to unsubscribe later.
pub type Listener = Rc<dyn Fn(Option<&Config>)>;

/// Wrap a closure as a [`Listener`]
pub fn listener(f: impl Fn(Option<&Config>) + 'static) -> Listener {
    Rc::new(f)
}

/// Ordered subscriber lists keyed by event
#[derive(Default)]
pub struct EventNotifier {
    listeners: HashMap<LoaderEvent, Vec<Listener>>,
}

impl fmt::Debug for EventNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<_, _> = self
            .listeners
            .iter()
            .map(|(event, list)| (event.name(), list.len()))
            .collect();
        f.debug_struct("EventNotifier")
            .field("listeners", &counts)
            .finish()
    }
}

impl EventNotifier {
    pub fn on(&mut self, event: LoaderEvent, listener: Listener) {
        self.listeners.entry(event).or_default().push(listener);
    }

    /// Remove every registration of `listener` under `event`
    pub fn off(&mut self, event: LoaderEvent, listener: &Listener) {
        if let Some(list) = self.listeners.get_mut(&event) {
            list.retain(|registered| !Rc::ptr_eq(registered, listener));
        }
    }

    /// Snapshot of the subscribers for `event`, in registration order.
    ///
    /// Emitting from a snapshot lets listeners subscribe or unsubscribe
    /// while an emit is in progress without affecting that emit.
    pub fn listeners(&self, event: LoaderEvent) -> Vec<Listener> {
        self.listeners.get(&event).cloned().unwrap_or_default()
    }

    pub fn listener_count(&self, event: LoaderEvent) -> usize {
        self.listeners.get(&event).map_or(0, Vec::len)
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recorder(log: &Rc<RefCell<Vec<String>>>, tag: &'static str) -> Listener {
        let log = log.clone();
        listener(move |payload| {
            let suffix = payload.map(|c| format!(":{}", c.variant)).unwrap_or_default();
            log.borrow_mut().push(format!("{tag}{suffix}"));
        })
    }

    fn emit(events: &EventNotifier, event: LoaderEvent, payload: Option<&Config>) {
        for listener in events.listeners(event) {
            listener(payload);
        }
    }

    #[test]
    fn test_listeners_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut events = EventNotifier::default();
        events.on(LoaderEvent::Show, recorder(&log, "a"));
        events.on(LoaderEvent::Show, recorder(&log, "b"));
        events.on(LoaderEvent::Hide, recorder(&log, "hidden"));

        emit(&events, LoaderEvent::Show, None);
        assert_eq!(*log.borrow(), ["a", "b"]);
    }

    #[test]
    fn test_update_payload_is_passed_through() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut events = EventNotifier::default();
        events.on(LoaderEvent::Update, recorder(&log, "update"));

        emit(&events, LoaderEvent::Update, Some(&Config::default()));
        assert_eq!(*log.borrow(), ["update:spinner"]);
    }

    #[test]
    fn test_off_removes_every_registration_of_that_listener() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut events = EventNotifier::default();
        let twice = recorder(&log, "twice");
        let other = recorder(&log, "other");
        events.on(LoaderEvent::Show, twice.clone());
        events.on(LoaderEvent::Show, other);
        events.on(LoaderEvent::Show, twice.clone());
        events.on(LoaderEvent::Hide, twice.clone());

        events.off(LoaderEvent::Show, &twice);
        assert_eq!(events.listener_count(LoaderEvent::Show), 1);
        assert_eq!(events.listener_count(LoaderEvent::Hide), 1);

        emit(&events, LoaderEvent::Show, None);
        assert_eq!(*log.borrow(), ["other"]);
    }

    #[test]
    fn test_off_without_registration_is_a_no_op() {
        let mut events = EventNotifier::default();
        events.off(LoaderEvent::Update, &listener(|_| {}));
        assert_eq!(events.listener_count(LoaderEvent::Update), 0);
    }

    #[test]
    fn test_event_names() {
        for event in [LoaderEvent::Show, LoaderEvent::Hide, LoaderEvent::Update] {
            assert_eq!(LoaderEvent::from_name(event.name()), Some(event));
        }
        assert_eq!(LoaderEvent::from_name("destroy"), None);
    }
}
