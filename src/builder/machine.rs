//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{Input, State};
use crate::machine::{StateMachine, Transition};

/// Builder for constructing state machines with a fluent API.
pub struct StateMachineBuilder<S: State + 'static, C, E, Env> {
    initial: Option<S>,
    transitions: Vec<Transition<S, C, E, Env>>,
    settle_limit: Option<usize>,
}

impl<S, C, E, Env> StateMachineBuilder<S, C, E, Env>
where
    S: State + 'static,
    C: Clone + 'static,
    E: Input + 'static,
    Env: 'static,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            transitions: Vec::new(),
            settle_limit: None,
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<S, C, E, Env>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<S, C, E, Env>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: Vec<Transition<S, C, E, Env>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Cap on chained always-transitions per input.
    pub fn settle_limit(mut self, limit: usize) -> Self {
        self.settle_limit = Some(limit);
        self
    }

    /// Build the state machine.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<StateMachine<S, C, E, Env>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.transitions.is_empty() {
            return Err(BuildError::NoTransitions);
        }

        let mut machine = StateMachine::new(initial);
        if let Some(limit) = self.settle_limit {
            machine.set_settle_limit(limit);
        }
        for transition in self.transitions {
            machine.add_transition(transition);
        }

        Ok(machine)
    }
}

impl<S, C, E, Env> Default for StateMachineBuilder<S, C, E, Env>
where
    S: State + 'static,
    C: Clone + 'static,
    E: Input + 'static,
    Env: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
