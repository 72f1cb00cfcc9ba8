//! The voyage event catalog.
//!
//! Templates are checked in catalog order on every departure. Each one gets a
//! single uniform draw and the first whose scaled chance beats its draw fires.
//! Effects are plain functions over the context and only run when the event
//! is resolved.

use crate::economy::{cargo, event_chance, overload_limit, Good, Trend};
use crate::game::GameContext;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventCategory {
    Weather,
    Market,
    Discovery,
    Encounter,
}

/// Catalog entries, in catalog order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventId {
    Typhoon,
    FairWinds,
    SilkBoom,
    TeaGlut,
    CustomsInspection,
    FloatingCargo,
    SunkenChest,
    Castaways,
    HullLeak,
    MutinousCrew,
}

pub type EventEffect = fn(&GameContext) -> GameContext;

#[derive(Debug)]
pub struct EventChoice {
    pub label: &'static str,
    pub effect: EventEffect,
}

#[derive(Debug)]
pub struct EventTemplate {
    pub id: EventId,
    pub category: EventCategory,
    pub title: &'static str,
    pub description: &'static str,
    pub base_chance: f64,
    /// Applied on acknowledgement. Choice events leave this empty.
    pub effect: Option<EventEffect>,
    pub choices: &'static [EventChoice],
}

impl EventTemplate {
    /// Chance of this event on the coming voyage, in `[0, 1]`.
    pub fn chance(&self, context: &GameContext) -> f64 {
        event_chance(self.category, self.base_chance, context)
    }

    pub fn has_choices(&self) -> bool {
        !self.choices.is_empty()
    }

    /// Apply the event's outcome. Returns `None` if `choice` does not fit
    /// the template.
    pub fn resolve(&self, context: &GameContext, choice: Option<usize>) -> Option<GameContext> {
        match (choice, self.effect) {
            (None, Some(effect)) => Some(effect(context)),
            (None, None) if !self.has_choices() => Some(context.clone()),
            (Some(index), _) => self.choices.get(index).map(|choice| (choice.effect)(context)),
            _ => None,
        }
    }

    /// Lines shown when the event interrupts a voyage.
    pub fn announcement(&self) -> Vec<String> {
        let mut lines = vec![self.title.to_string(), self.description.to_string()];
        lines.extend(
            self.choices
                .iter()
                .enumerate()
                .map(|(index, choice)| format!("{}) {}", index + 1, choice.label)),
        );
        lines
    }
}

pub static CATALOG: [EventTemplate; 10] = [
    EventTemplate {
        id: EventId::Typhoon,
        category: EventCategory::Weather,
        title: "Typhoon!",
        description: "A typhoon batters your ship on the open sea.",
        base_chance: 0.20,
        effect: Some(typhoon),
        choices: &[],
    },
    EventTemplate {
        id: EventId::FairWinds,
        category: EventCategory::Weather,
        title: "Fair winds",
        description: "Calm seas give the crew time to patch the hull.",
        base_chance: 0.15,
        effect: Some(fair_winds),
        choices: &[],
    },
    EventTemplate {
        id: EventId::SilkBoom,
        category: EventCategory::Market,
        title: "Silk boom",
        description: "Word arrives of a fashion craze at your destination.",
        base_chance: 0.06,
        effect: Some(silk_boom),
        choices: &[],
    },
    EventTemplate {
        id: EventId::TeaGlut,
        category: EventCategory::Market,
        title: "Tea glut",
        description: "A bumper harvest floods your destination with tea.",
        base_chance: 0.06,
        effect: Some(tea_glut),
        choices: &[],
    },
    EventTemplate {
        id: EventId::CustomsInspection,
        category: EventCategory::Market,
        title: "Customs inspection",
        description: "A revenue cutter stops you and levies a fee.",
        base_chance: 0.04,
        effect: Some(customs_inspection),
        choices: &[],
    },
    EventTemplate {
        id: EventId::FloatingCargo,
        category: EventCategory::Discovery,
        title: "Floating cargo",
        description: "Your lookout spots crates of spices bobbing in the water.",
        base_chance: 0.12,
        effect: Some(floating_cargo),
        choices: &[],
    },
    EventTemplate {
        id: EventId::SunkenChest,
        category: EventCategory::Discovery,
        title: "Sunken chest",
        description: "Divers bring up a chest of silver from a wreck.",
        base_chance: 0.08,
        effect: Some(sunken_chest),
        choices: &[],
    },
    EventTemplate {
        id: EventId::Castaways,
        category: EventCategory::Discovery,
        title: "Castaways",
        description: "Sailors wave from a raft. Taking them aboard costs supplies.",
        base_chance: 0.10,
        effect: None,
        choices: &[
            EventChoice {
                label: "Rescue them",
                effect: rescue_castaways,
            },
            EventChoice {
                label: "Sail on",
                effect: ignore_castaways,
            },
        ],
    },
    EventTemplate {
        id: EventId::HullLeak,
        category: EventCategory::Encounter,
        title: "Hull leak",
        description: "Worn planks give way below the waterline.",
        base_chance: 0.5,
        effect: Some(hull_leak),
        choices: &[],
    },
    EventTemplate {
        id: EventId::MutinousCrew,
        category: EventCategory::Encounter,
        title: "Mutinous crew",
        description: "The crew grumbles about the state of the ship and demands a bonus.",
        base_chance: 0.3,
        effect: None,
        choices: &[
            EventChoice {
                label: "Pay the bonus",
                effect: pay_crew,
            },
            EventChoice {
                label: "Stand firm",
                effect: stand_firm,
            },
        ],
    },
];

pub fn template(id: EventId) -> &'static EventTemplate {
    &CATALOG[id as usize]
}

/// Roll the catalog for the coming voyage.
pub fn select_event<R: Rng + ?Sized>(context: &GameContext, rng: &mut R) -> Option<EventId> {
    CATALOG
        .iter()
        .find(|template| template.chance(context) > rng.gen::<f64>())
        .map(|template| template.id)
}

fn typhoon(context: &GameContext) -> GameContext {
    let mut next = context.clone();
    next.ship.health = next.ship.health.saturating_sub(15);
    next.with_message(["The storm tore through the rigging. Hull damaged by 15%."])
}

fn fair_winds(context: &GameContext) -> GameContext {
    let mut next = context.clone();
    next.ship.health = (next.ship.health + 5).min(100);
    next.with_message(["Repairs at sea restored 5% of the hull."])
}

fn set_destination_trends(context: &GameContext, goods: &[Good], trend: Trend) -> GameContext {
    let mut next = context.clone();
    let port = context.destination.unwrap_or(context.current_port);
    let row = next.trends.entry(port).or_default();
    for good in goods {
        row.insert(*good, trend);
    }
    next
}

fn silk_boom(context: &GameContext) -> GameContext {
    let port = context.destination.unwrap_or(context.current_port);
    set_destination_trends(context, &[Good::Silk, Good::Porcelain], Trend::Increasing)
        .with_message([format!("Silk and porcelain prices are rising in {port}.")])
}

fn tea_glut(context: &GameContext) -> GameContext {
    let port = context.destination.unwrap_or(context.current_port);
    set_destination_trends(context, &[Good::Tea], Trend::Decreasing)
        .with_message([format!("Tea prices are falling in {port}.")])
}

fn customs_inspection(context: &GameContext) -> GameContext {
    let mut next = context.clone();
    let fee = (context.balance / 20).max(0);
    next.balance -= fee;
    next.with_message([format!("Customs took {fee} in fees.")])
}

fn floating_cargo(context: &GameContext) -> GameContext {
    let mut next = context.clone();
    let room = overload_limit(&context.ship).saturating_sub(cargo(&context.ship));
    let salvaged = room.min(5);
    if salvaged == 0 {
        return next.with_message(["The hold is too full to take anything aboard."]);
    }
    *next.ship.hold.entry(Good::Spices).or_insert(0) += salvaged;
    next.with_message([format!("You hauled {salvaged} crates of Spices aboard.")])
}

fn sunken_chest(context: &GameContext) -> GameContext {
    let mut next = context.clone();
    next.balance += 250;
    next.with_message(["The chest held 250 in silver."])
}

fn rescue_castaways(context: &GameContext) -> GameContext {
    let mut next = context.clone();
    next.reputation += 10;
    next.balance -= 50;
    next.with_message(["The castaways spread word of your kindness."])
}

fn ignore_castaways(context: &GameContext) -> GameContext {
    let mut next = context.clone();
    next.reputation -= 5;
    next.with_message(["Your crew watches the raft fall astern in silence."])
}

fn hull_leak(context: &GameContext) -> GameContext {
    let mut next = context.clone();
    next.ship.health = next.ship.health.saturating_sub(5);
    next.with_message(["The pumps held, but the hull took 5% damage."])
}

fn pay_crew(context: &GameContext) -> GameContext {
    let mut next = context.clone();
    next.balance -= 200;
    next.with_message(["You paid the crew 200 and order returns."])
}

fn stand_firm(context: &GameContext) -> GameContext {
    let mut next = context.clone();
    next.reputation -= 5;
    next.ship.health = next.ship.health.saturating_sub(5);
    next.with_message(["The crew works sullenly and the ship suffers for it."])
}
