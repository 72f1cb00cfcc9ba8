//! The rule sets guarding every trading and shipyard command.

use crate::config::{MAX_GUARD_QUALITY, MAX_GUARD_SHIPS, REPAIR_COST_PER_UNIT};
use crate::economy::repair_for_cost;
use crate::enforcement::builder::RulesBuilder;
use crate::enforcement::requests::{
    FleetRequest, IntelligenceRequest, PurchaseRequest, RepairRequest, SaleRequest, UpgradeRequest,
};
use crate::enforcement::rules::Rules;
use crate::enforcement::violations::Violation;

fn funds<R: 'static>(
    builder: RulesBuilder<R>,
    cost: fn(&R) -> i64,
    balance: fn(&R) -> i64,
) -> RulesBuilder<R> {
    builder.require_pred(
        move |r| cost(r) <= balance(r),
        move |r| Violation::InsufficientFunds {
            needed: cost(r),
            available: balance(r),
        },
    )
}

pub fn purchase_rules() -> Rules<PurchaseRequest> {
    let builder = RulesBuilder::new().require_pred(|r: &PurchaseRequest| r.quantity > 0, |_| Violation::InvalidQuantity);
    funds(builder, |r| r.cost, |r| r.balance)
        .require_pred(
            |r| r.quantity <= r.storage,
            |r| Violation::InsufficientStorage {
                needed: r.quantity,
                available: r.storage.max(0),
            },
        )
        .build()
}

pub fn sale_rules() -> Rules<SaleRequest> {
    RulesBuilder::new()
        .require_pred(|r: &SaleRequest| r.quantity > 0, |_| Violation::InvalidQuantity)
        .require_pred(
            |r| r.quantity <= i64::from(r.held),
            |r| Violation::InsufficientGoods {
                good: r.good,
                held: r.held,
            },
        )
        .build()
}

pub fn repair_rules() -> Rules<RepairRequest> {
    let builder = RulesBuilder::new()
        .require_pred(|r: &RepairRequest| r.cash > 0, |_| Violation::InvalidAmount)
        .require_pred(|r| r.health < 100, |_| Violation::NothingToRepair)
        .require_pred(
            |r| r.cash <= 0 || repair_for_cost(r.cash) > 0,
            |_| Violation::RepairTooSmall {
                unit_cost: REPAIR_COST_PER_UNIT,
            },
        );
    funds(builder, |r| r.cash, |r| r.balance).build()
}

pub fn upgrade_rules() -> Rules<UpgradeRequest> {
    let builder = RulesBuilder::new().require_pred(
        |r: &UpgradeRequest| r.current < r.kind.cap(),
        |r| Violation::UpgradeMaxed { kind: r.kind },
    );
    funds(builder, |r| r.cost, |r| r.balance).build()
}

pub fn hire_rules() -> Rules<FleetRequest> {
    let builder = RulesBuilder::new()
        .require_pred(|r: &FleetRequest| r.amount > 0, |_| Violation::InvalidQuantity)
        .require_pred(
            |r| r.amount <= i64::from(MAX_GUARD_SHIPS.saturating_sub(r.ships)),
            |_| Violation::FleetFull { max: MAX_GUARD_SHIPS },
        );
    funds(builder, |r| r.cost, |r| r.balance).build()
}

pub fn fleet_upgrade_rules() -> Rules<FleetRequest> {
    let builder = RulesBuilder::new()
        .require_pred(|r: &FleetRequest| r.ships > 0, |_| Violation::NoGuards)
        .require_pred(|r| r.quality < MAX_GUARD_QUALITY, |_| Violation::GuardsMaxQuality);
    funds(builder, |r| r.cost, |r| r.balance).build()
}

pub fn dismiss_rules() -> Rules<FleetRequest> {
    RulesBuilder::new()
        .require_pred(|r: &FleetRequest| r.amount > 0, |_| Violation::InvalidQuantity)
        .require_pred(
            |r| r.amount <= i64::from(r.ships),
            |r| Violation::TooFewGuards { ships: r.ships },
        )
        .build()
}

pub fn intelligence_rules() -> Rules<IntelligenceRequest> {
    let builder = RulesBuilder::new().require_pred(
        |r: &IntelligenceRequest| r.port != r.current_port,
        |_| Violation::SamePort,
    );
    funds(builder, |r| r.cost, |r| r.balance).build()
}
