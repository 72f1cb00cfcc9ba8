//! The authoritative game record.

use crate::config::{
    Settings, BANKRUPTCY_THRESHOLD, PRICE_UPDATE_INTERVAL, STARTING_BALANCE, STARTING_CAPACITY, STARTING_DAY,
    STARTING_REPUTATION, STARTING_SPEED, TREND_UPDATE_INTERVAL,
};
use crate::economy::{generate_prices, generate_trends, Good, Port, Prices, Trend, Trends};
use crate::events::EventId;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    /// Hull condition in percent, `0..=100`.
    pub health: u32,
    pub speed: u32,
    pub capacity: u32,
    pub hold: BTreeMap<Good, u32>,
}

impl Ship {
    pub fn held(&self, good: Good) -> u32 {
        self.hold.get(&good).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.hold.values().all(|qty| *qty == 0)
    }
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            health: 100,
            speed: STARTING_SPEED,
            capacity: STARTING_CAPACITY,
            hold: BTreeMap::new(),
        }
    }
}

/// Escort ships on the captain's payroll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardFleet {
    pub ships: u32,
    /// Shared quality level of every escort, `1..=MAX_GUARD_QUALITY`.
    pub quality: u32,
    /// Day up to which upkeep has been paid.
    pub last_maintenance_day: u32,
}

impl Default for GuardFleet {
    fn default() -> Self {
        Self {
            ships: 0,
            quality: 1,
            last_maintenance_day: STARTING_DAY,
        }
    }
}

/// A purchased view of another port's trends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketReport {
    /// Day the report was bought.
    pub day: u32,
    pub trends: BTreeMap<Good, Trend>,
}

/// Pirate squadron blocking the current voyage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PirateThreat {
    pub ships: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Retired,
    Bankrupt,
    Shipwrecked,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameContext {
    pub game_id: Uuid,
    pub current_port: Port,
    /// Set only while a voyage is underway.
    pub destination: Option<Port>,
    pub day: u32,
    pub balance: i64,
    pub ship: Ship,
    pub guard_fleet: GuardFleet,
    pub prices: Prices,
    pub trends: Trends,
    /// Days left until prices are regenerated.
    pub next_price_update: i32,
    /// Days left until trends are regenerated.
    pub next_trend_update: i32,
    pub reputation: i32,
    pub market_intelligence: BTreeMap<Port, MarketReport>,
    pub current_event: Option<EventId>,
    pub pirates: Option<PirateThreat>,
    pub good: Option<Good>,
    pub quantity: Option<u32>,
    /// Message batches produced by the last handled command.
    pub messages: Vec<Vec<String>>,
    pub can_retire: bool,
    pub outcome: Option<GameOutcome>,
    pub final_score: Option<i64>,
    pub settings: Settings,
}

impl GameContext {
    /// A fresh run in the home port with newly rolled trends and prices.
    pub fn new<R: Rng + ?Sized>(rng: &mut R, settings: Settings) -> Self {
        let game_id = uuid::Builder::from_random_bytes(rng.gen()).into_uuid();
        let trends = generate_trends(rng);
        let prices = generate_prices(&trends, rng);

        Self {
            game_id,
            current_port: Port::HOME,
            destination: None,
            day: STARTING_DAY,
            balance: STARTING_BALANCE,
            ship: Ship::default(),
            guard_fleet: GuardFleet::default(),
            prices,
            trends,
            next_price_update: PRICE_UPDATE_INTERVAL,
            next_trend_update: TREND_UPDATE_INTERVAL,
            reputation: STARTING_REPUTATION,
            market_intelligence: BTreeMap::new(),
            current_event: None,
            pirates: None,
            good: None,
            quantity: None,
            messages: Vec::new(),
            can_retire: false,
            outcome: None,
            final_score: None,
            settings,
        }
    }

    /// Append one message batch.
    pub fn with_message<I, T>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.push_message(lines);
        self
    }

    pub fn push_message<I, T>(&mut self, lines: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let batch: Vec<String> = lines.into_iter().map(Into::into).collect();
        if !batch.is_empty() {
            self.messages.push(batch);
        }
    }

    pub fn is_bankrupt(&self) -> bool {
        self.outcome == Some(GameOutcome::Bankrupt) || self.balance <= BANKRUPTCY_THRESHOLD
    }

    /// Clear the fields that only live for the duration of one action.
    pub fn clear_transients(&mut self) {
        self.destination = None;
        self.current_event = None;
        self.pirates = None;
        self.good = None;
        self.quantity = None;
    }
}
