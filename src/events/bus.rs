//! Observer registry for public events.

use super::event::{EventType, GameEvent};

/// Identifies a registered listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u32);

type Listener = Box<dyn FnMut(&GameEvent) + Send>;

/// Ordered list of event listeners.
///
/// Listeners are called synchronously, in registration order, for every
/// published event.
///
/// ## Example
///
/// ```
/// use robopower::core::PlayerId;
/// use robopower::events::{EventBus, EventKind, GameEvent};
/// use std::sync::{Arc, Mutex};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let mut bus = EventBus::new();
///
/// let sink = Arc::clone(&seen);
/// bus.subscribe(move |event| sink.lock().unwrap().push(event.turn));
///
/// bus.publish(&GameEvent::new(1, PlayerId::new(0), EventKind::StartTurn));
/// assert_eq!(*seen.lock().unwrap(), vec![1]);
/// ```
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u32,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for every event.
    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + Send + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Register `listener` for events of one type only.
    pub fn subscribe_to(
        &mut self,
        event_type: EventType,
        mut listener: impl FnMut(&GameEvent) + Send + 'static,
    ) -> ListenerId {
        self.subscribe(move |event| {
            if event.is(event_type) {
                listener(event);
            }
        })
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Deliver `event` to every listener.
    pub fn publish(&mut self, event: &GameEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
