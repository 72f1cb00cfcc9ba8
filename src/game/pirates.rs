//! Pirate interceptions and how they play out.

use crate::economy::pirate_attack_chance;
use crate::game::context::{GameContext, PirateThreat};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Loot taken per pirate ship after a won fight.
pub const LOOT_PER_SHIP: i64 = 150;
/// Hull damage per pirate ship after a lost fight.
pub const FIGHT_DAMAGE_PER_SHIP: u32 = 15;
/// Hull damage per pirate ship when an escape fails.
pub const FLEE_DAMAGE_PER_SHIP: u32 = 10;
/// Smallest tribute the pirates accept.
pub const MIN_TRIBUTE: i64 = 100;

/// The captain's answer to a pirate squadron.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tactic {
    Fight,
    Flee,
    Offer,
}

/// Roll for an interception on the coming voyage.
pub fn roll_pirates<R: Rng + ?Sized>(context: &GameContext, rng: &mut R) -> Option<PirateThreat> {
    if rng.gen::<f64>() < pirate_attack_chance(context) {
        Some(PirateThreat {
            ships: rng.gen_range(1..=4),
        })
    } else {
        None
    }
}

pub fn fight_chance(context: &GameContext, threat: PirateThreat) -> f64 {
    let fleet = &context.guard_fleet;
    let strength = 1.0 + f64::from(fleet.ships * fleet.quality);
    (strength / (strength + 1.5 * f64::from(threat.ships))).clamp(0.05, 0.95)
}

pub fn flee_chance(context: &GameContext, threat: PirateThreat) -> f64 {
    let speed = f64::from(context.ship.speed);
    speed / (speed + 400.0 * f64::from(threat.ships))
}

pub fn tribute(context: &GameContext) -> i64 {
    (context.balance / 5).max(MIN_TRIBUTE)
}

/// Settle the pending encounter. The threat is cleared either way.
pub fn resolve<R: Rng + ?Sized>(context: &GameContext, tactic: Tactic, rng: &mut R) -> GameContext {
    let Some(threat) = context.pirates else {
        return context.clone();
    };
    let mut next = context.clone();
    next.pirates = None;

    let lines = match tactic {
        Tactic::Fight => fight(&mut next, threat, rng),
        Tactic::Flee => flee(&mut next, threat, rng),
        Tactic::Offer => offer(&mut next),
    };
    log::info!("pirate encounter resolved by {:?}", tactic);
    next.with_message(lines)
}

fn fight<R: Rng + ?Sized>(next: &mut GameContext, threat: PirateThreat, rng: &mut R) -> Vec<String> {
    if rng.gen::<f64>() < fight_chance(next, threat) {
        let loot = LOOT_PER_SHIP * i64::from(threat.ships);
        next.balance += loot;
        next.reputation += 5;
        let mut lines = vec![format!("You drove off the pirates and took {loot} in plunder.")];
        if next.guard_fleet.ships > 0 && rng.gen::<f64>() < 0.3 {
            next.guard_fleet.ships -= 1;
            if next.guard_fleet.ships == 0 {
                next.guard_fleet.quality = 1;
            }
            lines.push("One of your guard ships was sunk in the battle.".to_string());
        }
        lines
    } else {
        let damage = FIGHT_DAMAGE_PER_SHIP * threat.ships;
        next.ship.health = next.ship.health.saturating_sub(damage);
        for qty in next.ship.hold.values_mut() {
            *qty -= *qty / 2;
        }
        next.ship.hold.retain(|_, qty| *qty > 0);
        next.reputation -= 2;
        vec![format!(
            "The pirates overpowered you, seized half your cargo and left the hull {damage}% weaker."
        )]
    }
}

fn flee<R: Rng + ?Sized>(next: &mut GameContext, threat: PirateThreat, rng: &mut R) -> Vec<String> {
    if rng.gen::<f64>() < flee_chance(next, threat) {
        vec!["You outran the pirates.".to_string()]
    } else {
        let damage = FLEE_DAMAGE_PER_SHIP * threat.ships;
        next.ship.health = next.ship.health.saturating_sub(damage);
        vec![format!("The pirates caught you as you fled. Hull damaged by {damage}%.")]
    }
}

fn offer(next: &mut GameContext) -> Vec<String> {
    let demand = tribute(next);
    if next.balance >= demand {
        next.balance -= demand;
        next.reputation -= 3;
        vec![format!("You paid {demand} and the pirates let you pass.")]
    } else {
        next.ship.hold.clear();
        next.ship.health = next.ship.health.saturating_sub(FLEE_DAMAGE_PER_SHIP);
        vec!["You couldn't pay, so the pirates took all of your cargo.".to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::economy::Good;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn encounter(ships: u32) -> GameContext {
        let mut ctx = GameContext::new(&mut ChaCha20Rng::seed_from_u64(21), Settings::default());
        ctx.pirates = Some(PirateThreat { ships });
        ctx.ship.hold.insert(Good::Silk, 9);
        ctx
    }

    fn lucky() -> StepRng {
        StepRng::new(0, 0)
    }

    fn unlucky() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    #[test]
    fn escorts_improve_fight_odds() {
        let mut ctx = encounter(2);
        let alone = fight_chance(&ctx, PirateThreat { ships: 2 });
        ctx.guard_fleet.ships = 3;
        ctx.guard_fleet.quality = 2;
        let escorted = fight_chance(&ctx, PirateThreat { ships: 2 });
        assert!(escorted > alone);
        assert!((alone - 0.25).abs() < 1e-9);
    }

    #[test]
    fn full_escort_never_guarantees_victory() {
        let mut ctx = encounter(4);
        ctx.guard_fleet.ships = 5;
        ctx.guard_fleet.quality = 5;
        let chance = fight_chance(&ctx, PirateThreat { ships: 1 });
        assert!((chance - 26.0 / 27.5).abs() < 1e-9);
        assert!(chance <= 0.95);
    }

    #[test]
    fn won_fight_pays_loot() {
        let ctx = encounter(2);
        let next = resolve(&ctx, Tactic::Fight, &mut lucky());
        assert_eq!(next.balance, ctx.balance + 300);
        assert_eq!(next.reputation, ctx.reputation + 5);
        assert_eq!(next.pirates, None);
    }

    #[test]
    fn losing_the_last_escort_resets_its_quality() {
        let mut ctx = encounter(1);
        ctx.guard_fleet.ships = 1;
        ctx.guard_fleet.quality = 3;
        let next = resolve(&ctx, Tactic::Fight, &mut lucky());
        assert_eq!(next.guard_fleet.ships, 0);
        assert_eq!(next.guard_fleet.quality, 1);
    }

    #[test]
    fn lost_fight_costs_hull_and_cargo() {
        let ctx = encounter(2);
        let next = resolve(&ctx, Tactic::Fight, &mut unlucky());
        assert_eq!(next.ship.health, 70);
        assert_eq!(next.ship.held(Good::Silk), 5);
        assert_eq!(next.reputation, ctx.reputation - 2);
    }

    #[test]
    fn flee_outcomes() {
        let ctx = encounter(3);
        let escaped = resolve(&ctx, Tactic::Flee, &mut lucky());
        assert_eq!(escaped.ship.health, 100);

        let caught = resolve(&ctx, Tactic::Flee, &mut unlucky());
        assert_eq!(caught.ship.health, 70);
        assert_eq!(caught.ship.held(Good::Silk), 9);
    }

    #[test]
    fn tribute_is_a_fifth_of_balance_with_a_floor() {
        let mut ctx = encounter(1);
        ctx.balance = 5_000;
        assert_eq!(tribute(&ctx), 1_000);
        ctx.balance = 200;
        assert_eq!(tribute(&ctx), MIN_TRIBUTE);
    }

    #[test]
    fn offer_pays_or_loses_cargo() {
        let ctx = encounter(1);
        let paid = resolve(&ctx, Tactic::Offer, &mut lucky());
        assert_eq!(paid.balance, 800);
        assert_eq!(paid.ship.held(Good::Silk), 9);

        let mut broke = encounter(1);
        broke.balance = 40;
        let robbed = resolve(&broke, Tactic::Offer, &mut lucky());
        assert_eq!(robbed.balance, 40);
        assert!(robbed.ship.is_empty());
        assert_eq!(robbed.ship.health, 90);
    }

    #[test]
    fn no_threat_means_no_change() {
        let mut ctx = encounter(1);
        ctx.pirates = None;
        assert_eq!(resolve(&ctx, Tactic::Fight, &mut lucky()), ctx);
    }

    #[test]
    fn roll_respects_attack_chance() {
        let ctx = encounter(1);
        assert!(roll_pirates(&ctx, &mut unlucky()).is_none());
        let threat = roll_pirates(&ctx, &mut lucky()).unwrap();
        assert!((1..=4).contains(&threat.ships));
    }
}
