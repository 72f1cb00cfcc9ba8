//! Transition tables and the step/settle engine.
//!
//! A machine is a table of transitions keyed by (state path, trigger). Inputs
//! are resolved against the current state's path and then each ancestor, so a
//! transition declared on a compound state applies to everything beneath it.
//!
//! # Key Concepts
//!
//! - **Transitions**: guarded, optionally targeted, with a pure context update
//! - **Settlement**: `always` transitions chained after every handled input
//! - **Environment**: a mutable value handed to updates, e.g. a seeded RNG
//!
//! `step` is pure with respect to the machine; `apply` commits its outcome.

mod machine;
mod transition;

pub use machine::{Fired, StateMachine, Step, StepResult, DEFAULT_SETTLE_LIMIT};
pub use transition::{Transition, TransitionAction, Trigger};
