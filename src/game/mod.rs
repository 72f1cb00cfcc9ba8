//! The trading game built on the generic machine.
//!
//! [`Game`] owns the machine, the authoritative [`GameContext`] and a seeded
//! random source. Everything else here is the pieces it is made from: the
//! state tree, player commands, the transition table and the pure updates
//! its transitions run.

pub mod command;
pub mod context;
pub mod engine;
pub mod pirates;
pub mod state;
pub mod table;
pub mod updates;

pub use command::{Command, TradeAction};
pub use context::{GameContext, GameOutcome, GuardFleet, MarketReport, PirateThreat, Ship};
pub use engine::Game;
pub use pirates::Tactic;
pub use state::{paths, GameScreen, GameState, MarketStep, PortStep, ShipyardStep, TradeStep};
pub use table::{game_machine, GameMachine, GameRng};
