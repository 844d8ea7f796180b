//! Event emission
//!
//! Each scroll region owns an [`EventEmitter`] by composition. Listeners are
//! registered per event type and removed through the [`ListenerId`] returned
//! at registration.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    /// Pointer travel crossed the intentional-drag threshold
    pub const DRAG_THRESHOLD: EventType = 6;
    /// A drag session was discarded without producing momentum
    pub const DRAG_CANCEL: EventType = 7;
    /// Momentum glide finished at its resting position
    pub const SCROLL_END: EventType = 31;
}

/// An event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub data: EventData,
    /// Host clock time in seconds, 0 when not known
    pub timestamp: f64,
    pub propagation_stopped: bool,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    /// Resting scroll position, positive when scrolled down/right
    ScrollEnd {
        x: f32,
        y: f32,
    },
    None,
}

impl Event {
    pub fn new(event_type: EventType, data: EventData) -> Self {
        Self {
            event_type,
            data,
            timestamp: 0.0,
            propagation_stopped: false,
        }
    }

    pub fn at(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

new_key_type! {
    /// Handle returned by [`EventEmitter::on`], used to detach a listener
    pub struct ListenerId;
}

/// Event handler function type
pub type EventHandler = Box<dyn Fn(&Event) + Send + Sync>;

struct Listener {
    event_type: EventType,
    handler: EventHandler,
}

/// Dispatches named events to registered listeners
pub struct EventEmitter {
    listeners: SlotMap<ListenerId, Listener>,
    by_type: FxHashMap<EventType, SmallVec<[ListenerId; 2]>>,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self {
            listeners: SlotMap::with_key(),
            by_type: FxHashMap::default(),
        }
    }

    /// Register a listener for an event type
    pub fn on<F>(&mut self, event_type: EventType, handler: F) -> ListenerId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let id = self.listeners.insert(Listener {
            event_type,
            handler: Box::new(handler),
        });
        self.by_type.entry(event_type).or_default().push(id);
        id
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let Some(listener) = self.listeners.remove(id) else {
            return false;
        };
        if let Some(ids) = self.by_type.get_mut(&listener.event_type) {
            ids.retain(|existing| *existing != id);
            if ids.is_empty() {
                self.by_type.remove(&listener.event_type);
            }
        }
        true
    }

    /// Remove every listener
    pub fn clear(&mut self) {
        self.listeners.clear();
        self.by_type.clear();
    }

    /// Fire an event to its listeners in registration order.
    ///
    /// Returns the number of listeners invoked.
    pub fn fire(&self, event: &mut Event) -> usize {
        let Some(ids) = self.by_type.get(&event.event_type) else {
            return 0;
        };

        let mut invoked = 0;
        for id in ids {
            if event.propagation_stopped {
                break;
            }
            if let Some(listener) = self.listeners.get(*id) {
                (listener.handler)(event);
                invoked += 1;
            }
        }
        tracing::trace!(event_type = event.event_type, invoked, "event fired");
        invoked
    }

    /// Number of listeners for an event type
    pub fn listener_count(&self, event_type: EventType) -> usize {
        self.by_type.get(&event_type).map_or(0, |ids| ids.len())
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl Default for EventEmitter {
    fn default() -> Self {
        Self::new()
    }
}
