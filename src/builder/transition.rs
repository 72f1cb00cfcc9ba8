//! Builder for constructing state transitions.

use crate::builder::error::BuildError;
use crate::core::{Guard, State};
use crate::machine::{Transition, TransitionAction, Trigger};
use std::sync::Arc;

/// Builder for constructing transitions with a fluent API.
pub struct TransitionBuilder<S: State, C, E, Env> {
    source: Option<&'static str>,
    trigger: Option<Trigger>,
    target: Option<S>,
    guard: Option<Guard<C, E>>,
    action: Option<TransitionAction<C, E, Env>>,
}

impl<S: State + 'static, C: 'static, E: 'static, Env: 'static> TransitionBuilder<S, C, E, Env> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            source: None,
            trigger: None,
            target: None,
            guard: None,
            action: None,
        }
    }

    /// Set the source state path (required).
    pub fn from(mut self, path: &'static str) -> Self {
        self.source = Some(path);
        self
    }

    /// React to inputs of the given kind.
    pub fn on(mut self, kind: &'static str) -> Self {
        self.trigger = Some(Trigger::On(kind));
        self
    }

    /// Fire during settlement instead of on an input.
    pub fn always(mut self) -> Self {
        self.trigger = Some(Trigger::Always);
        self
    }

    /// Set the target state. Without one the transition is internal.
    pub fn to(mut self, state: S) -> Self {
        self.target = Some(state);
        self
    }

    /// Add a guard predicate (optional).
    pub fn guard(mut self, guard: Guard<C, E>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&C, &E) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Set the context update run when the transition fires (optional).
    pub fn action<F>(mut self, update: F) -> Self
    where
        F: Fn(&C, &E, &mut Env) -> C + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(update));
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition<S, C, E, Env>, BuildError> {
        let source = self.source.ok_or(BuildError::MissingSource)?;
        let trigger = self.trigger.ok_or(BuildError::MissingTrigger)?;

        if trigger == Trigger::Always && self.guard.is_none() && self.target.is_none() {
            return Err(BuildError::UnguardedAlways {
                source_path: source.to_string(),
            });
        }

        Ok(Transition {
            source,
            trigger,
            target: self.target,
            guard: self.guard,
            action: self.action,
        })
    }
}

impl<S: State + 'static, C: 'static, E: 'static, Env: 'static> Default
    for TransitionBuilder<S, C, E, Env>
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum Hatch {
        Shut,
        Open,
    }

    impl State for Hatch {
        fn name(&self) -> &str {
            match self {
                Self::Shut => "shut",
                Self::Open => "open",
            }
        }
    }

    type Builder = TransitionBuilder<Hatch, i32, (), ()>;

    #[test]
    fn builder_requires_source() {
        let result = Builder::new().on("OPEN").build();
        assert_eq!(result.unwrap_err(), BuildError::MissingSource);
    }

    #[test]
    fn builder_requires_trigger() {
        let result = Builder::new().from("shut").to(Hatch::Open).build();
        assert_eq!(result.unwrap_err(), BuildError::MissingTrigger);
    }

    #[test]
    fn unguarded_internal_always_is_rejected() {
        let result = Builder::new().from("shut").always().build();
        assert!(matches!(result, Err(BuildError::UnguardedAlways { .. })));

        let guarded = Builder::new().from("shut").always().when(|c, _| *c > 0).build();
        assert!(guarded.is_ok());
    }

    #[test]
    fn transition_builder_with_guard_and_action() {
        let transition = Builder::new()
            .from("shut")
            .on("OPEN")
            .to(Hatch::Open)
            .when(|pressure: &i32, _: &()| *pressure < 5)
            .action(|pressure: &i32, _: &(), _: &mut ()| pressure - 1)
            .build()
            .unwrap();

        assert!(transition.can_execute("shut", &2, &()));
        assert!(!transition.can_execute("shut", &7, &()));
        assert_eq!(transition.apply(&2, &(), &mut ()), 1);
        assert_eq!(transition.target, Some(Hatch::Open));
    }

    #[test]
    fn transition_without_target_is_internal() {
        let transition = Builder::new().from("open").on("VENT").build().unwrap();
        assert!(transition.is_internal());
    }
}
