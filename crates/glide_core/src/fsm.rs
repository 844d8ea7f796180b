//! State Machine Runtime
//!
//! Flat state machines where the state type itself encodes its transition
//! table through [`StateTransitions`]. [`StateMachine`] wraps a state with a
//! bounded transition history for debugging.

use std::fmt::Debug;
use std::hash::Hash;

use smallvec::SmallVec;

use crate::events::EventType;

/// Trait for state enums that map events to transitions
///
/// # Example
///
/// ```rust
/// use glide_core::events::event_types::*;
/// use glide_core::fsm::StateTransitions;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Press {
///     Up,
///     Down,
/// }
///
/// impl StateTransitions for Press {
///     fn on_event(&self, event: u32) -> Option<Self> {
///         match (self, event) {
///             (Press::Up, POINTER_DOWN) => Some(Press::Down),
///             (Press::Down, POINTER_UP) => Some(Press::Up),
///             _ => None,
///         }
///     }
/// }
///
/// assert_eq!(Press::Up.on_event(POINTER_DOWN), Some(Press::Down));
/// assert_eq!(Press::Up.on_event(POINTER_UP), None);
/// ```
pub trait StateTransitions: Clone + Copy + PartialEq + Eq + Hash + Debug + 'static {
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;
}

/// Default number of transitions kept in the history
const HISTORY_LIMIT: usize = 16;

/// A state machine instance over a [`StateTransitions`] state type
#[derive(Debug, Clone)]
pub struct StateMachine<S: StateTransitions> {
    current: S,
    history: SmallVec<[(S, EventType, S); 4]>,
    history_limit: usize,
}

impl<S: StateTransitions> StateMachine<S> {
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            history: SmallVec::new(),
            history_limit: HISTORY_LIMIT,
        }
    }

    /// Set how many transitions the history retains (0 disables it)
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self.history.truncate(limit);
        self
    }

    /// Get the current state
    pub fn current(&self) -> S {
        self.current
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current == state
    }

    /// Check if an event would trigger a transition from the current state
    pub fn can_send(&self, event: EventType) -> bool {
        self.current.on_event(event).is_some()
    }

    /// Send an event, returning the new state if a transition happened
    pub fn send(&mut self, event: EventType) -> Option<S> {
        let from = self.current;
        let to = from.on_event(event)?;
        self.current = to;

        if self.history_limit > 0 {
            if self.history.len() == self.history_limit {
                self.history.remove(0);
            }
            self.history.push((from, event, to));
        }
        tracing::trace!(?from, event, ?to, "state transition");
        Some(to)
    }

    /// Force a state, bypassing the transition table
    pub fn reset(&mut self, state: S) {
        self.current = state;
    }

    /// Get transition history, oldest first
    pub fn history(&self) -> &[(S, EventType, S)] {
        &self.history
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl<S: StateTransitions + Default> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
