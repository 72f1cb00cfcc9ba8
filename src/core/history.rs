//! State transition history tracking.
//!
//! Provides immutable tracking of state machine transitions over time.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of a single state change.
///
/// # Example
///
/// ```rust
/// use tradewinds::core::{State, StateTransition};
/// use serde::{Deserialize, Serialize};
/// use chrono::Utc;
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Berth {
///     Empty,
///     Occupied,
/// }
///
/// impl State for Berth {
///     fn name(&self) -> &str {
///         match self {
///             Self::Empty => "empty",
///             Self::Occupied => "occupied",
///         }
///     }
/// }
///
/// let transition = StateTransition {
///     from: Berth::Empty,
///     to: Berth::Occupied,
///     trigger: "DOCK".to_string(),
///     timestamp: Utc::now(),
///     sequence: 1,
/// };
/// assert_eq!(transition.trigger, "DOCK");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// Input kind that caused the change, or `always` for settlement
    pub trigger: String,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
    /// Ordinal of the input that produced this change
    pub sequence: u64,
}

/// Ordered history of state transitions.
///
/// `record` returns a new history with the transition appended; the original
/// is left untouched.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the initial state followed by the `to` state of each
    /// transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Get all transitions.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }
}
