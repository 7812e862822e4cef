//! Finite state machines for widget lifecycles
//!
//! Widgets describe their lifecycle as a small `Copy` enum and a transition
//! table keyed by `u32` event constants. Returning `None` from
//! [`StateTransitions::on_event`] means the event is not valid in the current
//! state and must be ignored by the caller.
//!
//! # Example
//!
//! ```rust
//! use sheet_core::StateTransitions;
//!
//! const PRESS: u32 = 1;
//! const RELEASE: u32 = 2;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
//! enum Press {
//!     #[default]
//!     Idle,
//!     Pressed,
//! }
//!
//! impl StateTransitions for Press {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (Press::Idle, PRESS) => Some(Press::Pressed),
//!             (Press::Pressed, RELEASE) => Some(Press::Idle),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! assert_eq!(Press::Idle.on_event(PRESS), Some(Press::Pressed));
//! assert_eq!(Press::Idle.on_event(RELEASE), None);
//! ```

use std::hash::Hash;

/// Transition table for a widget state enum
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: u32) -> Option<Self>;

    /// Apply an event in place, returning whether the state changed
    fn apply(&mut self, event: u32) -> bool {
        match self.on_event(event) {
            Some(next) => {
                *self = next;
                true
            }
            None => false,
        }
    }
}
