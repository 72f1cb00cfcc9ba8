//! Pure economic rules.
//!
//! Nothing in here holds state. Every function is either a deterministic
//! calculation over a context, or draws from a caller-supplied random source.

mod goods;
mod ports;

pub use goods::Good;
pub use ports::Port;

use crate::config::{
    CAPACITY_UPGRADE_STEP, EXTENDED_GAME_PENALTY, GOAL_DAYS, GUARD_SHIP_COST, GUARD_UPGRADE_COST_PER_SHIP,
    GUARD_UPKEEP, MAX_CAPACITY, MAX_GUARD_QUALITY, MAX_GUARD_SHIPS, MAX_SPEED, MIN_TRAVEL_DAYS,
    OVERLOAD_TOLERANCE, REPAIR_COST_PER_UNIT, SPEED_UPGRADE_STEP,
};
use crate::events::EventCategory;
use crate::game::{GameContext, GuardFleet, Ship};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Direction a price is drifting in at one port.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl Trend {
    pub const ALL: [Trend; 3] = [Trend::Increasing, Trend::Decreasing, Trend::Stable];

    /// Multiplier applied to the base price when prices are regenerated.
    pub const fn factor(self) -> f64 {
        match self {
            Self::Increasing => 1.1,
            Self::Decreasing => 0.9,
            Self::Stable => 1.0,
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
        })
    }
}

pub type Prices = BTreeMap<Port, BTreeMap<Good, i64>>;
pub type Trends = BTreeMap<Port, BTreeMap<Good, Trend>>;

/// Ship improvements sold at the shipyard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpgradeKind {
    Capacity,
    Speed,
}

impl UpgradeKind {
    pub const fn step(self) -> u32 {
        match self {
            Self::Capacity => CAPACITY_UPGRADE_STEP,
            Self::Speed => SPEED_UPGRADE_STEP,
        }
    }

    pub const fn cap(self) -> u32 {
        match self {
            Self::Capacity => MAX_CAPACITY,
            Self::Speed => MAX_SPEED,
        }
    }

    /// The ship attribute this upgrade raises.
    pub fn current(self, ship: &Ship) -> u32 {
        match self {
            Self::Capacity => ship.capacity,
            Self::Speed => ship.speed,
        }
    }
}

impl fmt::Display for UpgradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Capacity => "capacity",
            Self::Speed => "speed",
        })
    }
}

/// Days needed to sail between two ports. Never less than three.
pub fn travel_time(from: Port, to: Port, ship_speed: u32) -> u32 {
    let distance = f64::from(from.distance_to(to));
    let speed = f64::from(ship_speed.max(1));
    let days = (3.0 + (distance / 500.0) * (1000.0 / speed)).ceil();
    (days as u32).max(MIN_TRAVEL_DAYS)
}

/// Assign every (port, good) pair a trend, each label with equal odds.
pub fn generate_trends<R: Rng + ?Sized>(rng: &mut R) -> Trends {
    Port::ALL
        .into_iter()
        .map(|port| {
            let row = Good::ALL
                .into_iter()
                .map(|good| (good, Trend::ALL[rng.gen_range(0..Trend::ALL.len())]))
                .collect();
            (port, row)
        })
        .collect()
}

/// Regenerate every price from its base price, trend and a volatility swing.
pub fn generate_prices<R: Rng + ?Sized>(trends: &Trends, rng: &mut R) -> Prices {
    Port::ALL
        .into_iter()
        .map(|port| {
            let row = Good::ALL
                .into_iter()
                .map(|good| {
                    let trend = trends
                        .get(&port)
                        .and_then(|row| row.get(&good))
                        .copied()
                        .unwrap_or(Trend::Stable);
                    let swing = 1.0 + (rng.gen::<f64>() - 0.5) * 2.0 * good.volatility();
                    let price = (port.base_price(good) as f64 * trend.factor() * swing).round() as i64;
                    (good, price.max(1))
                })
                .collect();
            (port, row)
        })
        .collect()
}

/// Unit price of `good` at `port`, or 0 when the market does not list it.
pub fn price_of(prices: &Prices, port: Port, good: Good) -> i64 {
    prices
        .get(&port)
        .and_then(|row| row.get(&good))
        .copied()
        .unwrap_or(0)
}

/// Total price of a trade. Every buy and sell goes through this.
pub fn calculate_price(prices: &Prices, port: Port, good: Good, quantity: u32) -> i64 {
    price_of(prices, port, good) * i64::from(quantity)
}

/// Units currently in the hold.
pub fn cargo(ship: &Ship) -> u32 {
    ship.hold.values().sum()
}

/// Free room in the hold. Negative while carrying an event overload.
pub fn available_storage(ship: &Ship) -> i64 {
    i64::from(ship.capacity) - i64::from(cargo(ship))
}

/// Absolute ceiling on cargo, including the overload tolerance.
pub fn overload_limit(ship: &Ship) -> u32 {
    ship.capacity + (f64::from(ship.capacity) * OVERLOAD_TOLERANCE).floor() as u32
}

pub fn cost_for_repair(damage: u32) -> i64 {
    i64::from(damage) * REPAIR_COST_PER_UNIT
}

/// Hull points a payment buys, rounded down.
pub fn repair_for_cost(price: i64) -> u32 {
    if price <= 0 {
        return 0;
    }
    u32::try_from(price / REPAIR_COST_PER_UNIT).unwrap_or(u32::MAX)
}

pub fn guard_hire_cost(quality: u32, amount: u32) -> i64 {
    i64::from(amount) * GUARD_SHIP_COST * i64::from(quality)
}

/// Cost of raising every escort by one quality level.
pub fn guard_upgrade_cost(fleet: &GuardFleet) -> i64 {
    i64::from(fleet.ships) * GUARD_UPGRADE_COST_PER_SHIP * i64::from(fleet.quality)
}

/// Upkeep owed for the days since the fleet was last paid.
pub fn guard_maintenance_cost(fleet: &GuardFleet, day: u32) -> i64 {
    let days = day.saturating_sub(fleet.last_maintenance_day);
    i64::from(fleet.ships) * i64::from(fleet.quality) * GUARD_UPKEEP * i64::from(days)
}

pub fn upgrade_cost(kind: UpgradeKind, ship: &Ship) -> i64 {
    match kind {
        UpgradeKind::Capacity => 25 * i64::from(ship.capacity),
        UpgradeKind::Speed => 4 * i64::from(ship.speed),
    }
}

/// Chance that a base probability fires given the current context.
///
/// Weather and discoveries grow more likely as the season wears on, market
/// shocks follow the captain's wealth, and encounters prey on damaged hulls.
pub fn event_chance(category: EventCategory, base_chance: f64, context: &GameContext) -> f64 {
    let scale = match category {
        EventCategory::Weather | EventCategory::Discovery => {
            f64::from(context.day) / f64::from(GOAL_DAYS)
        }
        EventCategory::Market => context.balance as f64 / 10_000.0,
        EventCategory::Encounter => 1.0 - f64::from(context.ship.health) / 100.0,
    };
    (base_chance * scale).clamp(0.0, 1.0)
}

/// Chance that pirates intercept the next voyage.
pub fn pirate_attack_chance(context: &GameContext) -> f64 {
    let season = 0.08 + 0.12 * f64::from(context.day.min(GOAL_DAYS)) / f64::from(GOAL_DAYS);
    let fleet = &context.guard_fleet;
    let deterrence = f64::from(fleet.ships * fleet.quality) / f64::from(MAX_GUARD_SHIPS * MAX_GUARD_QUALITY);
    (season * (1.0 - 0.8 * deterrence)).clamp(0.0, 1.0)
}

/// Balance plus the hold valued at the current port's prices.
pub fn net_cash(context: &GameContext) -> i64 {
    let cargo_value: i64 = context
        .ship
        .hold
        .iter()
        .map(|(good, qty)| calculate_price(&context.prices, context.current_port, *good, *qty))
        .sum();
    context.balance + cargo_value
}

/// End-of-game score. Bankrupt runs always score zero.
pub fn score(context: &GameContext) -> i64 {
    if context.is_bankrupt() {
        return 0;
    }

    let capacity = f64::from(context.ship.capacity);
    let speed = f64::from(context.ship.speed);
    let health = f64::from(context.ship.health);
    let wear = (capacity * 10.0 * (1.0 - health / 100.0)).floor();
    let base = ((net_cash(context) as f64) / 100.0).round()
        + 800.0 * (capacity + 1.0).log10()
        + 1200.0 * (speed + 1.0).log10()
        - wear;
    let base = base.floor();

    if !context.settings.extended_game {
        return base as i64;
    }
    let overrun = f64::from(context.day.saturating_sub(GOAL_DAYS));
    let factor = (1.0 - overrun * EXTENDED_GAME_PENALTY).max(0.0);
    (base * factor).floor() as i64
}
