//! Read-only views of a game for renderers.
//!
//! A snapshot bundles the current state path, the full context and the
//! messages produced by the last command. It can be encoded as JSON or as
//! bincode; it is not a save-game and a game can't be resumed from one.

use crate::core::State;
use crate::game::{GameContext, GameState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::SnapshotError;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    pub game_id: Uuid,

    pub taken_at: DateTime<Utc>,

    /// Number of handled commands when the snapshot was taken
    pub revision: u64,

    pub state: GameState,

    /// Dotted path of `state`, e.g. `gameScreen.at_port.traveling`
    pub state_path: String,

    pub context: GameContext,
}

impl Snapshot {
    pub fn capture(state: &GameState, context: &GameContext, revision: u64) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4(),
            game_id: context.game_id,
            taken_at: Utc::now(),
            revision,
            state: *state,
            state_path: state.path(),
            context: context.clone(),
        }
    }

    /// Message batches pending display.
    pub fn messages(&self) -> &[Vec<String>] {
        &self.context.messages
    }

    pub fn is_final(&self) -> bool {
        self.state.is_final()
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self =
            serde_json::from_str(json).map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self =
            bincode::deserialize(bytes).map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()
    }

    fn check_version(self) -> Result<Self, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economy::Port;
    use crate::game::{Command, Game};

    fn voyage() -> Game {
        let mut game = Game::with_seed(12).unwrap();
        game.send(&Command::StartGame { settings: None });
        game.send(&Command::GoToPort);
        game.send(&Command::TravelTo {
            destination: Port::Manila,
        });
        game
    }

    #[test]
    fn capture_reflects_the_game() {
        let game = voyage();
        let snapshot = game.snapshot();

        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.game_id, game.context().game_id);
        assert_eq!(snapshot.revision, 3);
        assert_eq!(snapshot.state_path, game.state_path());
        assert_eq!(snapshot.messages(), game.messages());
        assert!(snapshot.state_path.starts_with("gameScreen.at_port"));
    }

    #[test]
    fn json_encoding_is_lossless() {
        let snapshot = voyage().snapshot();
        let json = snapshot.to_json().unwrap();
        assert_eq!(Snapshot::from_json(&json).unwrap(), snapshot);
    }

    #[test]
    fn bincode_encoding_is_lossless() {
        let snapshot = voyage().snapshot();
        let bytes = snapshot.to_bytes().unwrap();
        assert_eq!(Snapshot::from_bytes(&bytes).unwrap(), snapshot);
    }

    #[test]
    fn json_exposes_state_path_and_context() {
        let mut game = Game::with_seed(1).unwrap();
        game.send(&Command::StartGame { settings: None });
        let value: serde_json::Value = serde_json::from_str(&game.snapshot().to_json().unwrap()).unwrap();

        assert_eq!(value["state_path"], "gameScreen.idle");
        assert_eq!(value["context"]["current_port"], "Hong Kong");
        assert_eq!(value["context"]["settings"]["extendedGame"], false);
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let mut snapshot = Game::with_seed(1).unwrap().snapshot();
        snapshot.version = 99;
        let json = serde_json::to_string(&snapshot).unwrap();

        match Snapshot::from_json(&json) {
            Err(SnapshotError::UnsupportedVersion { found, supported }) => {
                assert_eq!(found, 99);
                assert_eq!(supported, SNAPSHOT_VERSION);
            }
            other => panic!("expected version error, got {other:?}"),
        }
    }

    #[test]
    fn garbage_fails_to_decode() {
        assert!(matches!(
            Snapshot::from_json("{not json"),
            Err(SnapshotError::DeserializationFailed(_))
        ));
        assert!(matches!(
            Snapshot::from_bytes(&[1, 2, 3]),
            Err(SnapshotError::DeserializationFailed(_))
        ));
    }

    #[test]
    fn final_state_is_reported() {
        let mut snapshot = Game::with_seed(1).unwrap().snapshot();
        assert!(!snapshot.is_final());
        snapshot.state = GameState::ScoringScreen;
        assert!(snapshot.is_final());
    }
}
