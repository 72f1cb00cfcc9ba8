//! Tradewinds: a turn-based merchant trading game on a pure state machine
//!
//! The engine follows a "pure core, imperative shell" layout. Transitions
//! are guarded, pure updates of an immutable [`GameContext`]; the only
//! side effects are the seeded random source handed to those updates and
//! the [`Game`] session that commits their results.
//!
//! # Core Concepts
//!
//! - **State**: hierarchical state trees addressed by dotted paths
//! - **Machine**: a (path, trigger) table with leaf-first resolution and
//!   settling `always` transitions
//! - **Rules**: accumulated validation of player requests
//! - **Snapshot**: a serializable view of a session for renderers
//!
//! # Example
//!
//! ```rust
//! use tradewinds::{Command, Game};
//! use tradewinds::economy::{Good, Port};
//! use tradewinds::game::TradeAction;
//!
//! let mut game = Game::with_seed(7).unwrap();
//! game.send(&Command::StartGame { settings: None });
//! assert_eq!(game.state_path(), "gameScreen.idle");
//!
//! game.send(&Command::GoToMarket);
//! game.send(&Command::PickAction { action: TradeAction::Buy });
//! game.send(&Command::PickGood { good: Good::Tea });
//! game.send(&Command::SelectQuantity { quantity: 1 });
//! game.send(&Command::Purchase { good: Good::Tea, quantity: 1 });
//! assert_eq!(game.context().ship.held(Good::Tea), 1);
//!
//! let snapshot = game.snapshot();
//! assert_eq!(snapshot.context.current_port, Port::HongKong);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod economy;
pub mod enforcement;
pub mod events;
pub mod game;
pub mod machine;
pub mod snapshot;
pub mod transaction;
pub mod ui;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder, TransitionBuilder};
pub use config::Settings;
pub use core::{Guard, Input, State, StateHistory, StateTransition};
pub use game::{Command, Game, GameContext, GameState};
pub use machine::{StateMachine, StepResult};
pub use snapshot::{Snapshot, SnapshotError};
pub use transaction::Transaction;
