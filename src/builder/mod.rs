//! Builder API for ergonomic state machine construction.
//!
//! Fluent builders and a macro for creating machines with minimal
//! boilerplate while keeping the transition table type safe.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
pub use transition::TransitionBuilder;

use crate::core::State;
use crate::machine::{Transition, Trigger};

/// Unguarded transition on `kind` that moves to `target` and leaves the
/// context untouched.
///
/// # Example
///
/// ```
/// use tradewinds::builder::navigation;
/// use tradewinds::machine::Transition;
/// use tradewinds::state_enum;
///
/// state_enum! {
///     enum Deck {
///         Bow,
///         Stern,
///     }
/// }
///
/// let transition: Transition<Deck, (), (), ()> = navigation("Bow", "WALK", Deck::Stern);
/// assert_eq!(transition.target, Some(Deck::Stern));
/// ```
pub fn navigation<S: State, C, E, Env>(
    source: &'static str,
    kind: &'static str,
    target: S,
) -> Transition<S, C, E, Env> {
    Transition {
        source,
        trigger: Trigger::On(kind),
        target: Some(target),
        guard: None,
        action: None,
    }
}
