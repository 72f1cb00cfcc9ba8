//! Pure context updates run by the game's transitions.
//!
//! Every function takes the pre-transition context and returns the next one.
//! Rule checks happen in guards before any of these run.

use crate::config::{Settings, GOAL_DAYS, PRICE_UPDATE_INTERVAL, TREND_UPDATE_INTERVAL};
use crate::economy::{
    calculate_price, cost_for_repair, generate_prices, generate_trends, guard_hire_cost, guard_maintenance_cost,
    guard_upgrade_cost, price_of, repair_for_cost, score, travel_time, upgrade_cost, available_storage, Good, Port,
    UpgradeKind,
};
use crate::enforcement::Violation;
use crate::events::{select_event, template};
use crate::game::context::{GameContext, GameOutcome, MarketReport};
use crate::game::pirates::roll_pirates;
use rand::Rng;

fn units(quantity: i64) -> u32 {
    u32::try_from(quantity.max(0)).unwrap_or(u32::MAX)
}

/// Report every violated rule in a single message batch.
pub fn reject(context: &GameContext, violations: &[Violation]) -> GameContext {
    log::debug!("command rejected: {:?}", violations);
    context
        .clone()
        .with_message(violations.iter().map(ToString::to_string))
}

pub fn notice(context: &GameContext, line: impl Into<String>) -> GameContext {
    context.clone().with_message([line.into()])
}

pub fn start_game(context: &GameContext, settings: Option<&Settings>) -> GameContext {
    let mut next = context.clone();
    if let Some(settings) = settings {
        next.settings = settings.clone();
    }
    log::info!(
        "game {} started (extended: {})",
        next.game_id,
        next.settings.extended_game
    );
    let season = if next.settings.extended_game {
        "Trade as long as you like, but every day past the season costs you.".to_string()
    } else {
        format!("You have {GOAL_DAYS} days to make your fortune.")
    };
    let port = next.current_port;
    next.with_message([format!("Welcome to {port}, captain."), season])
}

/// Set sail: roll for pirates and, if the sea is clear of them, the catalog.
pub fn depart<R: Rng + ?Sized>(context: &GameContext, destination: Port, rng: &mut R) -> GameContext {
    let mut next = context.clone();
    next.destination = Some(destination);
    next.current_event = None;
    next.pirates = roll_pirates(&next, rng);

    if let Some(threat) = next.pirates {
        return next.with_message([
            format!("{} pirate ships are closing in!", threat.ships),
            "Fight, flee, or offer tribute?".to_string(),
        ]);
    }

    let event = select_event(&next, rng);
    next.current_event = event;
    match event {
        Some(id) => next.with_message(template(id).announcement()),
        None => next,
    }
}

/// Resolve the pending event. `None` if `choice` doesn't fit the event.
pub fn resolve_event(context: &GameContext, choice: Option<usize>) -> Option<GameContext> {
    let mut next = match context.current_event {
        Some(id) => template(id).resolve(context, choice)?,
        None => context.clone(),
    };
    next.current_event = None;
    Some(next)
}

/// Land at the destination, or founder if the hull gave out on the way.
pub fn arrive(context: &GameContext) -> GameContext {
    let mut next = context.clone();
    let Some(destination) = context.destination else {
        return next;
    };

    if context.ship.health == 0 {
        log::info!("ship lost at sea en route to {}", destination);
        next.clear_transients();
        return next.with_message(["Your ship has been lost at sea."]);
    }

    let days = travel_time(context.current_port, destination, context.ship.speed);
    let mut arrival = context.day + days;
    if !context.settings.extended_game {
        arrival = arrival.min(GOAL_DAYS.max(context.day));
    }
    let elapsed = arrival - context.day;
    let elapsed_countdown = i32::try_from(elapsed).unwrap_or(i32::MAX);

    let upkeep = guard_maintenance_cost(&context.guard_fleet, arrival);
    next.balance -= upkeep;
    next.guard_fleet.last_maintenance_day = arrival;
    next.day = arrival;
    next.next_price_update = next.next_price_update.saturating_sub(elapsed_countdown);
    next.next_trend_update = next.next_trend_update.saturating_sub(elapsed_countdown);
    next.current_port = destination;
    next.clear_transients();

    log::info!("arrived at {} on day {}", destination, arrival);
    let mut lines = vec![format!("You arrived in {destination} after {elapsed} days.")];
    if upkeep > 0 {
        lines.push(format!("Your guard fleet cost {upkeep} in upkeep."));
    }
    next.with_message(lines)
}

pub fn regenerate_prices<R: Rng + ?Sized>(context: &GameContext, rng: &mut R) -> GameContext {
    let mut next = context.clone();
    next.prices = generate_prices(&context.trends, rng);
    next.next_price_update = PRICE_UPDATE_INTERVAL;
    log::debug!("prices regenerated on day {}", context.day);
    next.with_message(["Market prices have been updated."])
}

pub fn regenerate_trends<R: Rng + ?Sized>(context: &GameContext, rng: &mut R) -> GameContext {
    let mut next = context.clone();
    next.trends = generate_trends(rng);
    next.next_trend_update = TREND_UPDATE_INTERVAL;
    log::debug!("trends regenerated on day {}", context.day);
    next
}

pub fn allow_retirement(context: &GameContext) -> GameContext {
    let mut next = context.clone();
    next.can_retire = true;
    next.with_message(["The season is over. You may now retire."])
}

/// End the run with `outcome` and record the final score.
pub fn finish(context: &GameContext, outcome: GameOutcome) -> GameContext {
    let mut next = context.clone();
    next.outcome = Some(outcome);
    next.clear_transients();
    let final_score = score(&next);
    next.final_score = Some(final_score);
    log::info!("game {} ended: {:?}, score {}", next.game_id, outcome, final_score);

    let headline = match outcome {
        GameOutcome::Retired => "You retired from the sea.",
        GameOutcome::Bankrupt => "You have gone bankrupt.",
        GameOutcome::Shipwrecked => "Your ship went down with all hands.",
    };
    next.with_message([headline.to_string(), format!("Final score: {final_score}")])
}

pub fn select_good_to_buy(context: &GameContext, good: Good) -> GameContext {
    let mut next = context.clone();
    next.good = Some(good);
    next.quantity = None;
    let unit = price_of(&context.prices, context.current_port, good);
    let affordable = if unit > 0 { (context.balance / unit).max(0) } else { 0 };
    let room = available_storage(&context.ship).max(0);
    next.with_message([format!(
        "{good} costs {unit}. You can afford {affordable} and have room for {room}."
    )])
}

pub fn select_good_to_sell(context: &GameContext, good: Good) -> GameContext {
    let mut next = context.clone();
    next.good = Some(good);
    next.quantity = None;
    let unit = price_of(&context.prices, context.current_port, good);
    let held = context.ship.held(good);
    next.with_message([format!("{good} sells for {unit}. You have {held}.")])
}

pub fn select_quantity(context: &GameContext, quantity: i64) -> GameContext {
    let mut next = context.clone();
    next.quantity = Some(units(quantity));
    next
}

pub fn purchase(context: &GameContext, good: Good, quantity: i64) -> GameContext {
    let mut next = context.clone();
    let qty = units(quantity);
    let cost = calculate_price(&context.prices, context.current_port, good, qty);
    next.balance -= cost;
    *next.ship.hold.entry(good).or_insert(0) += qty;
    next.good = None;
    next.quantity = None;
    next.with_message([format!("You bought {qty} {good} for {cost}.")])
}

pub fn sell(context: &GameContext, good: Good, quantity: i64) -> GameContext {
    let mut next = context.clone();
    let qty = units(quantity).min(context.ship.held(good));
    let revenue = calculate_price(&context.prices, context.current_port, good, qty);
    next.balance += revenue;
    if let Some(held) = next.ship.hold.get_mut(&good) {
        *held -= qty;
    }
    next.ship.hold.retain(|_, held| *held > 0);
    next.good = None;
    next.quantity = None;
    next.with_message([format!("You sold {qty} {good} for {revenue}.")])
}

pub fn sell_all(context: &GameContext) -> GameContext {
    let mut next = context.clone();
    let revenue: i64 = context
        .ship
        .hold
        .iter()
        .map(|(good, qty)| calculate_price(&context.prices, context.current_port, *good, *qty))
        .sum();
    next.balance += revenue;
    next.ship.hold.clear();
    next.with_message([format!("You sold your entire cargo for {revenue}.")])
}

pub fn buy_intelligence(context: &GameContext, port: Port, cost: i64) -> GameContext {
    let mut next = context.clone();
    let trends = context.trends.get(&port).cloned().unwrap_or_default();
    let mut lines = vec![format!("Market report for {port}:")];
    lines.extend(trends.iter().map(|(good, trend)| format!("{good}: {trend}")));

    next.balance -= cost;
    next.market_intelligence.insert(
        port,
        MarketReport {
            day: context.day,
            trends,
        },
    );
    next.with_message(lines)
}

pub fn repair(context: &GameContext, cash: i64) -> GameContext {
    let mut next = context.clone();
    let damage = 100u32.saturating_sub(context.ship.health);
    let repaired = damage.min(repair_for_cost(cash));
    let cost = cost_for_repair(repaired);
    next.balance -= cost;
    next.ship.health += repaired;
    next.with_message([format!("Repaired {repaired}% of the hull for {cost}.")])
}

pub fn upgrade_ship(context: &GameContext, kind: UpgradeKind) -> GameContext {
    let mut next = context.clone();
    let cost = upgrade_cost(kind, &context.ship);
    next.balance -= cost;
    let raised = (kind.current(&context.ship) + kind.step()).min(kind.cap());
    match kind {
        UpgradeKind::Capacity => next.ship.capacity = raised,
        UpgradeKind::Speed => next.ship.speed = raised,
    }
    next.with_message([format!("Your ship's {kind} is now {raised}. The work cost {cost}.")])
}

pub fn hire_guards(context: &GameContext, amount: i64) -> GameContext {
    let mut next = context.clone();
    let hired = units(amount);
    let cost = guard_hire_cost(context.guard_fleet.quality, hired);
    next.balance -= cost;
    if context.guard_fleet.ships == 0 {
        next.guard_fleet.last_maintenance_day = context.day;
    }
    next.guard_fleet.ships += hired;
    next.with_message([format!("You hired {hired} guard ships for {cost}.")])
}

pub fn upgrade_guards(context: &GameContext) -> GameContext {
    let mut next = context.clone();
    let cost = guard_upgrade_cost(&context.guard_fleet);
    next.balance -= cost;
    next.guard_fleet.quality += 1;
    let quality = next.guard_fleet.quality;
    next.with_message([format!(
        "Your guard ships are now quality {quality}. The refit cost {cost}."
    )])
}

pub fn dismiss_guards(context: &GameContext, amount: i64) -> GameContext {
    let mut next = context.clone();
    let dismissed = units(amount).min(context.guard_fleet.ships);
    next.guard_fleet.ships -= dismissed;
    if next.guard_fleet.ships == 0 {
        next.guard_fleet.quality = 1;
    }
    next.with_message([format!("You dismissed {dismissed} guard ships.")])
}

pub fn restart<R: Rng + ?Sized>(context: &GameContext, rng: &mut R) -> GameContext {
    GameContext::new(rng, context.settings.clone())
}
