//! Game configuration: player-facing settings and the numeric policy.

use serde::{Deserialize, Serialize};

/// Length of a standard game in days.
pub const GOAL_DAYS: u32 = 100;
/// Score multiplier lost per day played past [`GOAL_DAYS`] in extended mode.
pub const EXTENDED_GAME_PENALTY: f64 = 0.01;

pub const STARTING_DAY: u32 = 1;
pub const STARTING_BALANCE: i64 = 1_000;
pub const STARTING_REPUTATION: i32 = 50;
pub const STARTING_SPEED: u32 = 500;
pub const STARTING_CAPACITY: u32 = 100;

/// Balance at or below which the captain is bankrupt.
pub const BANKRUPTCY_THRESHOLD: i64 = -1_000;

pub const PRICE_UPDATE_INTERVAL: i32 = 7;
pub const TREND_UPDATE_INTERVAL: i32 = 30;

pub const MIN_TRAVEL_DAYS: u32 = 3;
pub const REPAIR_COST_PER_UNIT: i64 = 57;
/// Share of capacity that event windfalls may load beyond the hold limit.
pub const OVERLOAD_TOLERANCE: f64 = 0.1;

pub const MAX_GUARD_SHIPS: u32 = 5;
pub const MAX_GUARD_QUALITY: u32 = 5;
pub const GUARD_SHIP_COST: i64 = 800;
pub const GUARD_UPGRADE_COST_PER_SHIP: i64 = 400;
/// Daily upkeep per ship per quality level.
pub const GUARD_UPKEEP: i64 = 5;

pub const CAPACITY_UPGRADE_STEP: u32 = 25;
pub const MAX_CAPACITY: u32 = 400;
pub const SPEED_UPGRADE_STEP: u32 = 100;
pub const MAX_SPEED: u32 = 1_500;

pub const INTELLIGENCE_COST: i64 = 250;

/// Input widget the renderer should use. Has no effect on game logic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Controls {
    #[default]
    Keyboard,
    Arrows,
}

/// Settings accepted by `START_GAME`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Play past the horizon at a scoring penalty.
    pub extended_game: bool,
    pub disable_animations: bool,
    pub controls: Controls,
}

impl Settings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
