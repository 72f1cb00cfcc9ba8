//! Requests handed to rule checks.
//!
//! Each request is a small owned snapshot of the numbers one rule set needs,
//! taken from the pre-transition context.

use crate::config::INTELLIGENCE_COST;
use crate::economy::{available_storage, guard_hire_cost, guard_upgrade_cost, price_of, upgrade_cost, Good, Port, UpgradeKind};
use crate::game::GameContext;

#[derive(Clone, Debug, PartialEq)]
pub struct PurchaseRequest {
    pub good: Good,
    pub quantity: i64,
    pub cost: i64,
    pub balance: i64,
    pub storage: i64,
}

impl PurchaseRequest {
    pub fn new(context: &GameContext, good: Good, quantity: i64) -> Self {
        let unit = price_of(&context.prices, context.current_port, good);
        Self {
            good,
            quantity,
            cost: unit.saturating_mul(quantity),
            balance: context.balance,
            storage: available_storage(&context.ship),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SaleRequest {
    pub good: Good,
    pub quantity: i64,
    pub held: u32,
}

impl SaleRequest {
    pub fn new(context: &GameContext, good: Good, quantity: i64) -> Self {
        Self {
            good,
            quantity,
            held: context.ship.held(good),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RepairRequest {
    pub cash: i64,
    pub balance: i64,
    pub health: u32,
}

impl RepairRequest {
    pub fn new(context: &GameContext, cash: i64) -> Self {
        Self {
            cash,
            balance: context.balance,
            health: context.ship.health,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpgradeRequest {
    pub kind: UpgradeKind,
    pub current: u32,
    pub cost: i64,
    pub balance: i64,
}

impl UpgradeRequest {
    pub fn new(context: &GameContext, kind: UpgradeKind) -> Self {
        Self {
            kind,
            current: kind.current(&context.ship),
            cost: upgrade_cost(kind, &context.ship),
            balance: context.balance,
        }
    }
}

/// Hiring, upgrading or dismissing escorts.
#[derive(Clone, Debug, PartialEq)]
pub struct FleetRequest {
    pub amount: i64,
    pub ships: u32,
    pub quality: u32,
    pub cost: i64,
    pub balance: i64,
}

impl FleetRequest {
    pub fn hire(context: &GameContext, amount: i64) -> Self {
        let fleet = &context.guard_fleet;
        let hired = u32::try_from(amount).unwrap_or(0);
        Self {
            amount,
            ships: fleet.ships,
            quality: fleet.quality,
            cost: guard_hire_cost(fleet.quality, hired),
            balance: context.balance,
        }
    }

    pub fn upgrade(context: &GameContext) -> Self {
        let fleet = &context.guard_fleet;
        Self {
            amount: 0,
            ships: fleet.ships,
            quality: fleet.quality,
            cost: guard_upgrade_cost(fleet),
            balance: context.balance,
        }
    }

    pub fn dismiss(context: &GameContext, amount: i64) -> Self {
        let fleet = &context.guard_fleet;
        Self {
            amount,
            ships: fleet.ships,
            quality: fleet.quality,
            cost: 0,
            balance: context.balance,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IntelligenceRequest {
    pub port: Port,
    pub current_port: Port,
    pub cost: i64,
    pub balance: i64,
}

impl IntelligenceRequest {
    pub fn new(context: &GameContext, port: Port) -> Self {
        Self {
            port,
            current_port: context.current_port,
            cost: INTELLIGENCE_COST,
            balance: context.balance,
        }
    }
}
