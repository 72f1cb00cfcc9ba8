//! Build errors for state machine and transition builders.

use thiserror::Error;

/// Errors that can occur when building state machines and transitions.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No transitions defined. Add at least one transition")]
    NoTransitions,

    #[error("Transition source state not specified. Call .from(path)")]
    MissingSource,

    #[error("Transition trigger not specified. Call .on(kind) or .always()")]
    MissingTrigger,

    #[error("Always-transition on '{source_path}' has no guard and no target; it would never settle")]
    UnguardedAlways { source_path: String },
}
