//! Hierarchical state machine that dispatches inputs through a transition table.

use crate::core::{ancestors, Input, State, StateHistory, StateTransition};
use crate::machine::transition::{Transition, Trigger};
use chrono::Utc;
use std::collections::BTreeMap;

/// Upper bound on chained `always` transitions per input.
pub const DEFAULT_SETTLE_LIMIT: usize = 32;

/// Result of dispatching a single input
#[derive(Clone, Debug, PartialEq)]
pub enum StepResult<S: State> {
    /// Moved to a different state
    Transitioned { from: S, to: S },

    /// Handled without leaving the state (internal transitions only)
    Stayed(S),

    /// No transition accepted the input; nothing changed
    Ignored { state: S, input: &'static str },
}

impl<S: State> StepResult<S> {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored { .. })
    }

    /// State the machine is in after the input.
    pub fn state(&self) -> &S {
        match self {
            Self::Transitioned { to, .. } => to,
            Self::Stayed(state) => state,
            Self::Ignored { state, .. } => state,
        }
    }
}

/// One transition that fired while processing an input.
#[derive(Clone, Debug, PartialEq)]
pub struct Fired<S: State> {
    pub from: S,
    pub to: S,
    pub trigger: Trigger,
    pub internal: bool,
}

/// Pure outcome of [`StateMachine::step`], applied with [`StateMachine::apply`].
#[derive(Clone, Debug)]
pub enum Step<S: State, C> {
    Ignored {
        state: S,
        input: &'static str,
    },
    Handled {
        from: S,
        to: S,
        context: C,
        fired: Vec<Fired<S>>,
    },
}

impl<S: State, C> Step<S, C> {
    pub fn into_context(self) -> Option<C> {
        match self {
            Self::Handled { context, .. } => Some(context),
            Self::Ignored { .. } => None,
        }
    }

    pub fn fired(&self) -> &[Fired<S>] {
        match self {
            Self::Handled { fired, .. } => fired,
            Self::Ignored { .. } => &[],
        }
    }
}

type Table<S, C, E, Env> = BTreeMap<(String, Trigger), Vec<Transition<S, C, E, Env>>>;

/// State machine over a context `C`, driven by inputs `E`.
///
/// Transitions are looked up by (state path, trigger), leaf path first and
/// then each ancestor up to the root. Within one path, transitions are tried
/// in declaration order and the first passing guard wins.
pub struct StateMachine<S: State + 'static, C, E, Env> {
    initial: S,
    current: S,
    table: Table<S, C, E, Env>,
    history: StateHistory<S>,
    sequence: u64,
    settle_limit: usize,
}

impl<S: State + 'static, C: Clone, E: Input, Env> StateMachine<S, C, E, Env> {
    /// Create a new state machine in the initial state
    pub fn new(initial: S) -> Self {
        Self {
            current: initial.clone(),
            initial,
            table: BTreeMap::new(),
            history: StateHistory::new(),
            sequence: 0,
            settle_limit: DEFAULT_SETTLE_LIMIT,
        }
    }

    /// Add a transition to the machine
    pub fn add_transition(&mut self, transition: Transition<S, C, E, Env>) {
        self.table
            .entry((transition.source.to_string(), transition.trigger))
            .or_default()
            .push(transition);
    }

    pub fn set_settle_limit(&mut self, limit: usize) {
        self.settle_limit = limit;
    }

    /// Get current state (pure)
    pub fn current_state(&self) -> &S {
        &self.current
    }

    pub fn initial_state(&self) -> &S {
        &self.initial
    }

    /// Check if machine is in a final state (pure)
    pub fn is_final(&self) -> bool {
        self.current.is_final()
    }

    /// Get state history (pure)
    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    /// Transitions declared on exactly `source` for `trigger`, in order.
    pub fn transitions_for(&self, source: &str, trigger: Trigger) -> &[Transition<S, C, E, Env>] {
        self.table
            .get(&(source.to_string(), trigger))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of declared transitions.
    pub fn len(&self) -> usize {
        self.table.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Find the transition that handles `trigger` in `state` (pure).
    pub fn resolve(
        &self,
        state: &S,
        trigger: Trigger,
        context: &C,
        input: &E,
    ) -> Option<&Transition<S, C, E, Env>> {
        let path = state.path();
        let found = ancestors(&path).find_map(|scope| {
            self.table
                .get(&(scope.to_string(), trigger))
                .and_then(|candidates| candidates.iter().find(|t| t.guard_passes(context, input)))
        });
        found
    }

    /// Compute the effect of `input` without touching the machine.
    ///
    /// Guards see `context` as it was before the input. After the triggered
    /// transition, `always` transitions are chained until none fires.
    pub fn step(&self, context: &C, input: &E, env: &mut Env) -> Step<S, C> {
        let from = self.current.clone();
        let trigger = Trigger::On(input.kind());

        let Some(transition) = self.resolve(&from, trigger, context, input) else {
            return Step::Ignored {
                state: from,
                input: input.kind(),
            };
        };

        let mut fired = Vec::new();
        let (state, context) = self.fire(transition, &from, context, input, env, &mut fired);
        let (to, context) = self.settle(state, context, input, env, &mut fired);

        Step::Handled {
            from,
            to,
            context,
            fired,
        }
    }

    /// Apply the result from step() to update machine state.
    pub fn apply(&mut self, step: &Step<S, C>) -> StepResult<S> {
        let (from, to, fired) = match step {
            Step::Ignored { state, input } => {
                log::debug!("ignored {} in {}", input, state.path());
                return StepResult::Ignored {
                    state: state.clone(),
                    input: *input,
                };
            }
            Step::Handled { from, to, fired, .. } => (from, to, fired),
        };

        self.sequence += 1;
        for change in fired.iter().filter(|f| !f.internal) {
            self.history = self.history.record(StateTransition {
                from: change.from.clone(),
                to: change.to.clone(),
                trigger: change.trigger.label().to_string(),
                timestamp: Utc::now(),
                sequence: self.sequence,
            });
        }
        self.current = to.clone();

        if from == to {
            StepResult::Stayed(to.clone())
        } else {
            StepResult::Transitioned {
                from: from.clone(),
                to: to.clone(),
            }
        }
    }

    /// Step and apply in one go, returning the next context when handled.
    pub fn dispatch(&mut self, context: &C, input: &E, env: &mut Env) -> (StepResult<S>, Option<C>) {
        let step = self.step(context, input, env);
        let result = self.apply(&step);
        (result, step.into_context())
    }

    fn fire(
        &self,
        transition: &Transition<S, C, E, Env>,
        from: &S,
        context: &C,
        input: &E,
        env: &mut Env,
        fired: &mut Vec<Fired<S>>,
    ) -> (S, C) {
        let to = transition.target.clone().unwrap_or_else(|| from.clone());
        log::trace!(
            "{} --{}--> {}",
            from.path(),
            transition.trigger,
            to.path()
        );
        let next = transition.apply(context, input, env);
        fired.push(Fired {
            from: from.clone(),
            to: to.clone(),
            trigger: transition.trigger,
            internal: transition.is_internal(),
        });
        (to, next)
    }

    fn settle(
        &self,
        mut state: S,
        mut context: C,
        input: &E,
        env: &mut Env,
        fired: &mut Vec<Fired<S>>,
    ) -> (S, C) {
        for _ in 0..self.settle_limit {
            let Some(transition) = self.resolve(&state, Trigger::Always, &context, input) else {
                return (state, context);
            };
            let (next_state, next_context) = self.fire(transition, &state, &context, input, env, fired);
            state = next_state;
            context = next_context;
        }
        log::warn!(
            "settlement stopped after {} always-transitions in {}",
            self.settle_limit,
            state.path()
        );
        (state, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Guard;
    use serde::{Deserialize, Serialize};
    use std::sync::Arc;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum Harbor {
        Idle,
        Loading(Bay),
        Sailing,
    }

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum Bay {
        Open,
        Full,
    }

    impl State for Harbor {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "idle",
                Self::Loading(Bay::Open) => "open",
                Self::Loading(Bay::Full) => "full",
                Self::Sailing => "sailing",
            }
        }

        fn path(&self) -> String {
            match self {
                Self::Loading(_) => format!("loading.{}", self.name()),
                _ => self.name().to_string(),
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Order {
        Load(u32),
        Cancel,
        Sail,
    }

    impl Input for Order {
        fn kind(&self) -> &'static str {
            match self {
                Self::Load(_) => "LOAD",
                Self::Cancel => "CANCEL",
                Self::Sail => "SAIL",
            }
        }
    }

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Cargo {
        crates: u32,
        ticks: u32,
    }

    type Machine = StateMachine<Harbor, Cargo, Order, ()>;

    fn to(source: &'static str, trigger: Trigger, target: Harbor) -> Transition<Harbor, Cargo, Order, ()> {
        Transition {
            source,
            trigger,
            target: Some(target),
            guard: None,
            action: None,
        }
    }

    fn harbor() -> Machine {
        let mut machine = StateMachine::new(Harbor::Idle);
        machine.add_transition(to("idle", Trigger::On("LOAD"), Harbor::Loading(Bay::Open)));
        machine.add_transition(Transition {
            guard: Some(Guard::new(|c: &Cargo, o: &Order| match o {
                Order::Load(n) => c.crates + n <= 10,
                _ => false,
            })),
            action: Some(Arc::new(|c: &Cargo, o: &Order, _: &mut ()| match o {
                Order::Load(n) => Cargo {
                    crates: c.crates + n,
                    ..c.clone()
                },
                _ => c.clone(),
            })),
            ..to("loading.open", Trigger::On("LOAD"), Harbor::Loading(Bay::Open))
        });
        machine.add_transition(to("loading", Trigger::On("LOAD"), Harbor::Loading(Bay::Full)));
        machine.add_transition(to("loading", Trigger::On("CANCEL"), Harbor::Idle));
        machine.add_transition(to("loading.full", Trigger::On("SAIL"), Harbor::Sailing));
        machine.add_transition(Transition {
            guard: Some(Guard::new(|c: &Cargo, _: &Order| c.crates == 10)),
            ..to("loading.open", Trigger::Always, Harbor::Loading(Bay::Full))
        });
        machine.add_transition(Transition {
            guard: Some(Guard::new(|c: &Cargo, _: &Order| c.ticks == 0)),
            action: Some(Arc::new(|c: &Cargo, _: &Order, _: &mut ()| Cargo {
                ticks: c.ticks + 1,
                ..c.clone()
            })),
            ..Transition {
                source: "",
                trigger: Trigger::Always,
                target: None,
                guard: None,
                action: None,
            }
        });
        machine
    }

    #[test]
    fn unknown_input_is_ignored() {
        let mut machine = harbor();
        let (result, context) = machine.dispatch(&Cargo::default(), &Order::Sail, &mut ());

        assert!(result.is_ignored());
        assert!(context.is_none());
        assert_eq!(machine.current_state(), &Harbor::Idle);
        assert!(machine.history().transitions().is_empty());
    }

    #[test]
    fn leaf_transition_wins_over_ancestor() {
        let mut machine = harbor();
        let cargo = Cargo::default();
        let (_, cargo) = machine.dispatch(&cargo, &Order::Load(0), &mut ());
        let (result, cargo) = machine.dispatch(&cargo.unwrap(), &Order::Load(4), &mut ());

        assert_eq!(result, StepResult::Stayed(Harbor::Loading(Bay::Open)));
        assert_eq!(cargo.unwrap().crates, 4);
    }

    #[test]
    fn failing_guard_falls_through_to_ancestor() {
        let mut machine = harbor();
        let (_, cargo) = machine.dispatch(&Cargo::default(), &Order::Load(0), &mut ());
        let (result, cargo) = machine.dispatch(&cargo.unwrap(), &Order::Load(11), &mut ());

        assert_eq!(result.state(), &Harbor::Loading(Bay::Full));
        assert_eq!(cargo.unwrap().crates, 0);
    }

    #[test]
    fn always_transitions_settle_after_input() {
        let mut machine = harbor();
        let (_, cargo) = machine.dispatch(&Cargo::default(), &Order::Load(0), &mut ());
        let (result, cargo) = machine.dispatch(&cargo.unwrap(), &Order::Load(10), &mut ());

        assert_eq!(
            result,
            StepResult::Transitioned {
                from: Harbor::Loading(Bay::Open),
                to: Harbor::Loading(Bay::Full),
            }
        );
        assert_eq!(cargo.unwrap().crates, 10);
    }

    #[test]
    fn root_always_fires_once_per_settlement() {
        let mut machine = harbor();
        let (_, cargo) = machine.dispatch(&Cargo::default(), &Order::Load(0), &mut ());
        let cargo = cargo.unwrap();
        assert_eq!(cargo.ticks, 1);

        let (_, cargo) = machine.dispatch(&cargo, &Order::Cancel, &mut ());
        assert_eq!(cargo.unwrap().ticks, 1);
    }

    #[test]
    fn step_is_pure_until_applied() {
        let machine = harbor();
        let step = machine.step(&Cargo::default(), &Order::Load(0), &mut ());

        assert!(matches!(step, Step::Handled { .. }));
        assert_eq!(machine.current_state(), &Harbor::Idle);
    }

    #[test]
    fn history_records_external_changes_only() {
        let mut machine = harbor();
        let (_, cargo) = machine.dispatch(&Cargo::default(), &Order::Load(0), &mut ());
        let (_, cargo) = machine.dispatch(&cargo.unwrap(), &Order::Load(10), &mut ());
        machine.dispatch(&cargo.unwrap(), &Order::Sail, &mut ());

        let path: Vec<_> = machine.history().get_path().into_iter().cloned().collect();
        assert_eq!(
            path,
            vec![
                Harbor::Idle,
                Harbor::Loading(Bay::Open),
                Harbor::Loading(Bay::Open),
                Harbor::Loading(Bay::Full),
                Harbor::Sailing,
            ]
        );
    }

    #[test]
    fn settle_limit_stops_runaway_chains() {
        let mut machine: Machine = StateMachine::new(Harbor::Idle);
        machine.set_settle_limit(3);
        machine.add_transition(to("idle", Trigger::On("SAIL"), Harbor::Sailing));
        machine.add_transition(to("sailing", Trigger::Always, Harbor::Idle));
        machine.add_transition(to("idle", Trigger::Always, Harbor::Sailing));

        let step = machine.step(&Cargo::default(), &Order::Sail, &mut ());
        assert_eq!(step.fired().len(), 4);
    }
}
