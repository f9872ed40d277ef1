#![forbid(unsafe_code)]

//! Lifecycle notifications and their subscribers.

/// Lifecycle milestones surfaced to application code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuEvent {
    /// All listeners have been requested from the host.
    EventsBound,
    /// Setup finished; the menu is ready for clicks.
    Initialized,
}

impl MenuEvent {
    /// Event name as seen by JavaScript callers.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EventsBound => "eventsBound",
            Self::Initialized => "initialized",
        }
    }
}

/// Handle returned by [`Observers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&MenuEvent)>;

/// Ordered list of notification callbacks.
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Callback)>,
}

impl core::fmt::Debug for Observers {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.entries.len())
            .finish()
    }
}

impl Observers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback; it runs for every later [`emit`](Self::emit).
    pub fn subscribe(&mut self, callback: impl FnMut(&MenuEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns `false` if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(sid, _)| *sid != id);
        self.entries.len() != before
    }

    /// Call every subscriber in registration order.
    pub fn emit(&mut self, event: MenuEvent) {
        #[cfg(feature = "tracing")]
        tracing::debug!(event = event.as_str(), subscribers = self.entries.len(), "menu event");
        for (_, callback) in &mut self.entries {
            callback(&event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn emit_reaches_subscribers_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut obs = Observers::new();
        let a = Rc::clone(&seen);
        obs.subscribe(move |e| a.borrow_mut().push(("a", *e)));
        let b = Rc::clone(&seen);
        obs.subscribe(move |e| b.borrow_mut().push(("b", *e)));

        obs.emit(MenuEvent::EventsBound);
        assert_eq!(
            *seen.borrow(),
            vec![("a", MenuEvent::EventsBound), ("b", MenuEvent::EventsBound)]
        );
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let count = Rc::new(RefCell::new(0));
        let mut obs = Observers::new();
        let c = Rc::clone(&count);
        let id = obs.subscribe(move |_| *c.borrow_mut() += 1);

        obs.emit(MenuEvent::Initialized);
        assert!(obs.unsubscribe(id));
        assert!(!obs.unsubscribe(id));
        obs.emit(MenuEvent::Initialized);

        assert_eq!(*count.borrow(), 1);
        assert!(obs.is_empty());
    }

    #[test]
    fn event_names() {
        assert_eq!(MenuEvent::EventsBound.as_str(), "eventsBound");
        assert_eq!(MenuEvent::Initialized.as_str(), "initialized");
    }
}
