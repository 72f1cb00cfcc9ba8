//! Transition table entries.

use crate::core::{in_state, Guard, State};
use std::fmt;
use std::sync::Arc;

/// What a transition reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Trigger {
    /// An input of the given kind
    On(&'static str),
    /// Evaluated during settlement after every handled input
    Always,
}

impl Trigger {
    pub fn label(&self) -> &'static str {
        match self {
            Self::On(kind) => kind,
            Self::Always => "always",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pure context update run when a transition fires.
///
/// Receives the pre-transition context, the input being processed and the
/// machine environment, and returns the next context.
pub type TransitionAction<C, E, Env> = Arc<dyn Fn(&C, &E, &mut Env) -> C + Send + Sync>;

/// A guarded transition out of every state under `source`.
///
/// A transition without a target is internal: it updates the context but
/// leaves the machine where it is.
pub struct Transition<S: State, C, E, Env> {
    pub source: &'static str,
    pub trigger: Trigger,
    pub target: Option<S>,
    pub guard: Option<Guard<C, E>>,
    pub action: Option<TransitionAction<C, E, Env>>,
}

impl<S: State, C: Clone, E, Env> Transition<S, C, E, Env> {
    /// Check if this transition can fire from `path` (pure).
    pub fn can_execute(&self, path: &str, context: &C, input: &E) -> bool {
        in_state(path, self.source) && self.guard_passes(context, input)
    }

    pub(crate) fn guard_passes(&self, context: &C, input: &E) -> bool {
        self.guard.as_ref().map_or(true, |g| g.check(context, input))
    }

    pub fn is_internal(&self) -> bool {
        self.target.is_none()
    }

    /// Produce the next context. Transitions without an action keep it as is.
    pub fn apply(&self, context: &C, input: &E, env: &mut Env) -> C {
        match &self.action {
            Some(action) => action(context, input, env),
            None => context.clone(),
        }
    }
}

impl<S: State, C, E, Env> Clone for Transition<S, C, E, Env> {
    fn clone(&self) -> Self {
        Self {
            source: self.source,
            trigger: self.trigger,
            target: self.target.clone(),
            guard: self.guard.clone(),
            action: self.action.clone(),
        }
    }
}

impl<S: State, C, E, Env> fmt::Debug for Transition<S, C, E, Env> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("source", &self.source)
            .field("trigger", &self.trigger)
            .field("target", &self.target)
            .field("guarded", &self.guard.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum Gate {
        Closed,
        Open,
    }

    impl State for Gate {
        fn name(&self) -> &str {
            match self {
                Self::Closed => "closed",
                Self::Open => "open",
            }
        }
    }

    fn open_gate(guard: Option<Guard<u32, ()>>) -> Transition<Gate, u32, (), ()> {
        Transition {
            source: "closed",
            trigger: Trigger::On("OPEN"),
            target: Some(Gate::Open),
            guard,
            action: Some(Arc::new(|toll: &u32, _: &(), _: &mut ()| toll + 1)),
        }
    }

    #[test]
    fn can_execute_matches_source_state() {
        let transition = open_gate(None);
        assert!(transition.can_execute("closed", &0, &()));
        assert!(!transition.can_execute("open", &0, &()));
    }

    #[test]
    fn can_execute_respects_guard() {
        let transition = open_gate(Some(Guard::new(|toll: &u32, _: &()| *toll >= 3)));
        assert!(transition.can_execute("closed", &3, &()));
        assert!(!transition.can_execute("closed", &2, &()));
    }

    #[test]
    fn apply_runs_action_or_keeps_context() {
        let transition = open_gate(None);
        assert_eq!(transition.apply(&4, &(), &mut ()), 5);

        let passive: Transition<Gate, u32, (), ()> = Transition {
            action: None,
            ..open_gate(None)
        };
        assert_eq!(passive.apply(&4, &(), &mut ()), 4);
    }

    #[test]
    fn trigger_labels() {
        assert_eq!(Trigger::On("OPEN").label(), "OPEN");
        assert_eq!(Trigger::Always.to_string(), "always");
    }
}
