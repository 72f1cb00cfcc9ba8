//! The `Game` driver: one machine, one context, one random source.

use crate::builder::BuildError;
use crate::config::Settings;
use crate::core::{State, StateHistory};
use crate::game::command::Command;
use crate::game::context::GameContext;
use crate::game::state::GameState;
use crate::game::table::{game_machine, GameMachine, GameRng};
use crate::machine::StepResult;
use crate::snapshot::Snapshot;
use rand::{Rng, SeedableRng};

/// A running game.
///
/// Commands are applied one at a time. Each handled command replaces the
/// context with the one its transitions produced; ignored commands leave the
/// game exactly as it was.
///
/// ```
/// use tradewinds::game::{Command, Game, GameState};
///
/// let mut game = Game::with_seed(7).unwrap();
/// game.send(&Command::StartGame { settings: None });
/// assert_eq!(game.state(), &GameState::idle());
/// ```
pub struct Game {
    machine: GameMachine,
    context: GameContext,
    rng: GameRng,
    revision: u64,
}

impl Game {
    /// A new game with a random seed.
    pub fn new() -> Result<Self, BuildError> {
        Self::with_seed(rand::thread_rng().gen())
    }

    /// A new game whose every roll is determined by `seed`.
    pub fn with_seed(seed: u64) -> Result<Self, BuildError> {
        let mut rng = GameRng::seed_from_u64(seed);
        let context = GameContext::new(&mut rng, Settings::default());
        Self::assemble(rng, context)
    }

    /// Start from the intro screen with a prepared context.
    pub fn with_context(seed: u64, context: GameContext) -> Result<Self, BuildError> {
        Self::assemble(GameRng::seed_from_u64(seed), context)
    }

    fn assemble(rng: GameRng, context: GameContext) -> Result<Self, BuildError> {
        Ok(Self {
            machine: game_machine()?,
            context,
            rng,
            revision: 0,
        })
    }

    /// Dispatch one command and settle.
    pub fn send(&mut self, command: &Command) -> StepResult<GameState> {
        let mut base = self.context.clone();
        base.messages.clear();

        let (result, next) = self.machine.dispatch(&base, command, &mut self.rng);
        if let Some(next) = next {
            self.context = next;
            self.revision += 1;
        }
        result
    }

    /// Dispatch several commands in order.
    pub fn send_all<'a, I>(&mut self, commands: I) -> Vec<StepResult<GameState>>
    where
        I: IntoIterator<Item = &'a Command>,
    {
        commands.into_iter().map(|command| self.send(command)).collect()
    }

    pub fn context(&self) -> &GameContext {
        &self.context
    }

    pub fn state(&self) -> &GameState {
        self.machine.current_state()
    }

    pub fn state_path(&self) -> String {
        self.state().path()
    }

    pub fn messages(&self) -> &[Vec<String>] {
        &self.context.messages
    }

    pub fn history(&self) -> &StateHistory<GameState> {
        self.machine.history()
    }

    /// Number of handled commands so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_over(&self) -> bool {
        self.machine.is_final()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.state(), &self.context, self.revision)
    }
}
