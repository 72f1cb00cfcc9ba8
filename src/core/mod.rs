//! Core state machine types and logic.
//!
//! This module contains the pure functional core of the state machine:
//! - State definitions via the `State` trait and dotted state paths
//! - Guard predicates for transition control
//! - Immutable history tracking
//!
//! All logic in this module is pure (no side effects).

mod guard;
mod history;
mod state;

pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use state::{ancestors, in_state, State, ROOT};

/// An input the machine can react to.
///
/// The kind is the key a transition is registered under, e.g. `"PURCHASE"`.
pub trait Input {
    fn kind(&self) -> &'static str;
}
