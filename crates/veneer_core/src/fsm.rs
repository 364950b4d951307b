//! Typed state transitions
//!
//! Widget interaction states are plain enums that map `(state, event)` pairs
//! to the next state:
//!
//! ```rust
//! use veneer_core::fsm::StateTransitions;
//!
//! const PRESS: u32 = 1;
//! const RELEASE: u32 = 2;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
//! enum Knob {
//!     #[default]
//!     Idle,
//!     Held,
//! }
//!
//! impl StateTransitions for Knob {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (Knob::Idle, PRESS) => Some(Knob::Held),
//!             (Knob::Held, RELEASE) => Some(Knob::Idle),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut knob = Knob::default();
//! assert!(knob.send(PRESS));
//! assert_eq!(knob, Knob::Held);
//! assert!(!knob.send(PRESS));
//! ```

use std::hash::Hash;

/// Identifier for an event that drives a state transition
pub type EventId = u32;

/// Trait for state types that handle event transitions
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventId) -> Option<Self>;

    /// Apply an event in place
    ///
    /// Returns true if the state changed.
    fn send(&mut self, event: EventId) -> bool {
        match self.on_event(event) {
            Some(next) if next != *self => {
                tracing::trace!(from = ?*self, to = ?next, event, "state transition");
                *self = next;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POINTER_DOWN: EventId = 1;
    const POINTER_UP: EventId = 2;
    const NOOP: EventId = 3;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Press {
        Idle,
        Pressed,
    }

    impl StateTransitions for Press {
        fn on_event(&self, event: EventId) -> Option<Self> {
            match (self, event) {
                (Press::Idle, POINTER_DOWN) => Some(Press::Pressed),
                (Press::Pressed, POINTER_UP) => Some(Press::Idle),
                (_, NOOP) => Some(*self),
                _ => None,
            }
        }
    }

    #[test]
    fn test_send_transitions() {
        let mut state = Press::Idle;

        assert!(state.send(POINTER_DOWN));
        assert_eq!(state, Press::Pressed);

        // Not valid while pressed
        assert!(!state.send(POINTER_DOWN));
        assert_eq!(state, Press::Pressed);

        assert!(state.send(POINTER_UP));
        assert_eq!(state, Press::Idle);
    }

    #[test]
    fn test_self_transition_is_not_a_change() {
        let mut state = Press::Idle;
        assert!(!state.send(NOOP));
        assert_eq!(state, Press::Idle);
    }
}
