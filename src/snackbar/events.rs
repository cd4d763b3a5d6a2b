//! Lifecycle notifications and observer registration.

use super::types::CloseReason;
use std::fmt;
use std::sync::Arc;

/// A lifecycle notification.
///
/// One open/close cycle always produces `Opening`, then `Opened` (unless the
/// bar was closed before its first frame), then `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// `open()` was accepted. Fired before the frame-gated transition.
    Opening,
    /// The bar became fully visible.
    Opened,
    /// The bar closed.
    Closed {
        /// Why it closed.
        reason: CloseReason,
    },
}

impl Event {
    /// Name of the notification: `"opening"`, `"opened"` or `"closed"`.
    pub fn name(&self) -> &'static str {
        match self {
            Event::Opening => "opening",
            Event::Opened => "opened",
            Event::Closed { .. } => "closed",
        }
    }
}

/// Handle returned by [`Model::subscribe`](super::Model::subscribe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Callback invoked for every event.
pub type Observer = Arc<dyn Fn(&Event) + Send + Sync>;

#[derive(Clone, Default)]
pub(crate) struct Observers {
    next: u64,
    entries: Vec<(SubscriptionId, Observer)>,
}

impl Observers {
    pub(crate) fn subscribe(&mut self, observer: Observer) -> SubscriptionId {
        self.next += 1;
        let id = SubscriptionId(self.next);
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn emit(&self, event: &Event) {
        for (_, observer) in &self.entries {
            observer(event);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::Opening.name(), "opening");
        assert_eq!(Event::Opened.name(), "opened");
        assert_eq!(
            Event::Closed {
                reason: CloseReason::Action
            }
            .name(),
            "closed"
        );
    }

    #[test]
    fn test_observers_run_in_registration_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut observers = Observers::default();

        for n in 1..=3 {
            let seen = Arc::clone(&seen);
            observers.subscribe(Arc::new(move |_: &Event| {
                seen.lock().unwrap().push(n);
            }));
        }
        observers.emit(&Event::Opening);

        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_unsubscribe_removes_only_that_observer() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut observers = Observers::default();

        let first = {
            let seen = Arc::clone(&seen);
            observers.subscribe(Arc::new(move |e: &Event| {
                seen.lock().unwrap().push(("first", *e));
            }))
        };
        {
            let seen = Arc::clone(&seen);
            observers.subscribe(Arc::new(move |e: &Event| {
                seen.lock().unwrap().push(("second", *e));
            }));
        }

        assert!(observers.unsubscribe(first));
        assert!(!observers.unsubscribe(first));
        assert_eq!(observers.len(), 1);

        observers.emit(&Event::Opened);
        assert_eq!(*seen.lock().unwrap(), vec![("second", Event::Opened)]);
    }
}
