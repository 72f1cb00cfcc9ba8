//! The game's transition table.
//!
//! Transitions are grouped by screen. Guards on the same (path, trigger) are
//! tried in declaration order, so each group lists its specific cases first
//! and its fallback last.

use crate::builder::{navigation, BuildError, StateMachineBuilder, TransitionBuilder};
use crate::config::{BANKRUPTCY_THRESHOLD, GOAL_DAYS, INTELLIGENCE_COST};
use crate::enforcement::{
    dismiss_rules, fleet_upgrade_rules, hire_rules, intelligence_rules, purchase_rules, repair_rules, sale_rules,
    upgrade_rules, FleetRequest, IntelligenceRequest, PurchaseRequest, RepairRequest, Rules, SaleRequest,
    UpgradeRequest, Violation,
};
use crate::events::template;
use crate::game::command::{kind, Command, TradeAction};
use crate::game::context::{GameContext, GameOutcome};
use crate::game::pirates::{self, Tactic};
use crate::game::state::{paths, GameState, MarketStep, PortStep, ShipyardStep, TradeStep};
use crate::game::updates;
use crate::machine::{StateMachine, Transition};
use rand_chacha::ChaCha20Rng;
use std::sync::Arc;

/// Random source threaded through every transition.
pub type GameRng = ChaCha20Rng;
pub type GameMachine = StateMachine<GameState, GameContext, Command, GameRng>;

type GameTransition = Transition<GameState, GameContext, Command, GameRng>;
type Edge = TransitionBuilder<GameState, GameContext, Command, GameRng>;

fn edge(source: &'static str) -> Edge {
    TransitionBuilder::new().from(source)
}

/// Build the full game machine, starting on the intro screen.
pub fn game_machine() -> Result<GameMachine, BuildError> {
    let mut transitions = screens()?;
    transitions.extend(voyage()?);
    transitions.extend(market()?);
    transitions.extend(shipyard()?);
    transitions.extend(endgame()?);

    StateMachineBuilder::new()
        .initial(GameState::IntroScreen)
        .transitions(transitions)
        .build()
}

/// A command gated by a rule set.
///
/// When every rule passes, `apply` runs and the machine moves to `accepted`.
/// Otherwise all violations are reported and the machine moves to
/// `rejected`. `None` targets keep the current state.
fn checked<R: 'static>(
    source: &'static str,
    on: &'static str,
    rules: Rules<R>,
    request: fn(&GameContext, &Command) -> Option<R>,
    accepted: Option<GameState>,
    rejected: Option<GameState>,
    apply: fn(&GameContext, &Command) -> GameContext,
) -> Result<[GameTransition; 2], BuildError> {
    let rules = Arc::new(rules);
    let permits = Arc::clone(&rules);

    let mut accept = edge(source)
        .on(on)
        .when(move |ctx, cmd| request(ctx, cmd).map_or(false, |r| permits.permits(&r)))
        .action(move |ctx, cmd, _| apply(ctx, cmd));
    if let Some(target) = accepted {
        accept = accept.to(target);
    }

    let mut reject = edge(source).on(on).action(move |ctx, cmd, _| {
        let violations = request(ctx, cmd)
            .map(|r| rules.violations(&r))
            .unwrap_or_default();
        updates::reject(ctx, &violations)
    });
    if let Some(target) = rejected {
        reject = reject.to(target);
    }

    Ok([accept.build()?, reject.build()?])
}

fn screens() -> Result<Vec<GameTransition>, BuildError> {
    Ok(vec![
        edge(paths::INTRO)
            .on(kind::START_GAME)
            .to(GameState::idle())
            .action(|ctx, cmd, _| match cmd {
                Command::StartGame { settings } => updates::start_game(ctx, settings.as_ref()),
                _ => ctx.clone(),
            })
            .build()?,
        navigation(paths::INTRO, kind::SHOW_HELP, GameState::HelpScreen),
        navigation(paths::HELP, kind::HIDE_HELP, GameState::IntroScreen),
        navigation(
            paths::IDLE,
            kind::GO_TO_PORT,
            GameState::port(PortStep::PickDestination),
        ),
        navigation(
            paths::IDLE,
            kind::GO_TO_MARKET,
            GameState::market(MarketStep::ChooseAction),
        ),
        navigation(
            paths::IDLE,
            kind::GO_TO_SHIPYARD,
            GameState::shipyard(ShipyardStep::Idle),
        ),
        navigation(paths::IDLE, kind::GO_TO_RETIREMENT, GameState::retirement()),
    ])
}

fn voyage() -> Result<Vec<GameTransition>, BuildError> {
    let traveling = GameState::port(PortStep::Traveling);

    let mut transitions = vec![
        edge(paths::PICK_DESTINATION)
            .on(kind::TRAVEL_TO)
            .when(|ctx, cmd| matches!(cmd, Command::TravelTo { destination } if *destination == ctx.current_port))
            .action(|ctx, _, _| updates::notice(ctx, Violation::SamePort.to_string()))
            .build()?,
        edge(paths::PICK_DESTINATION)
            .on(kind::TRAVEL_TO)
            .when(|ctx, _| !ctx.settings.extended_game && ctx.day >= GOAL_DAYS)
            .to(GameState::idle())
            .action(|ctx, _, _| {
                updates::notice(ctx, "The trading season is over. It is time to retire.")
            })
            .build()?,
        edge(paths::PICK_DESTINATION)
            .on(kind::TRAVEL_TO)
            .to(GameState::port(PortStep::CheckEvent))
            .action(|ctx, cmd, rng| match cmd {
                Command::TravelTo { destination } => updates::depart(ctx, *destination, rng),
                _ => ctx.clone(),
            })
            .build()?,
        navigation(paths::PICK_DESTINATION, kind::CANCEL, GameState::idle()),
        edge(paths::CHECK_EVENT)
            .always()
            .when(|ctx, _| ctx.pirates.is_some())
            .to(GameState::port(PortStep::PirateEncounter))
            .build()?,
        edge(paths::CHECK_EVENT)
            .always()
            .when(|ctx, _| ctx.current_event.is_some())
            .to(GameState::port(PortStep::EventOccurred))
            .build()?,
        edge(paths::CHECK_EVENT)
            .always()
            .to(traveling)
            .action(|ctx, _, _| updates::arrive(ctx))
            .build()?,
        edge(paths::EVENT_OCCURRED)
            .on(kind::MSG_ACK)
            .when(|ctx, _| updates::resolve_event(ctx, None).is_some())
            .to(traveling)
            .action(|ctx, _, _| {
                updates::resolve_event(ctx, None)
                    .map(|next| updates::arrive(&next))
                    .unwrap_or_else(|| ctx.clone())
            })
            .build()?,
        edge(paths::EVENT_OCCURRED)
            .on(kind::MSG_ACK)
            .action(|ctx, _, _| updates::notice(ctx, "Choose how to respond."))
            .build()?,
        edge(paths::EVENT_OCCURRED)
            .on(kind::RESOLVE_EVENT)
            .when(|ctx, cmd| match cmd {
                Command::ResolveEvent { choice } => {
                    ctx.current_event.map_or(false, |id| template(id).has_choices())
                        && updates::resolve_event(ctx, Some(*choice)).is_some()
                }
                _ => false,
            })
            .to(traveling)
            .action(|ctx, cmd, _| match cmd {
                Command::ResolveEvent { choice } => updates::resolve_event(ctx, Some(*choice))
                    .map(|next| updates::arrive(&next))
                    .unwrap_or_else(|| ctx.clone()),
                _ => ctx.clone(),
            })
            .build()?,
        edge(paths::EVENT_OCCURRED)
            .on(kind::RESOLVE_EVENT)
            .action(|ctx, _, _| updates::notice(ctx, "That isn't one of the options."))
            .build()?,
        navigation(paths::TRAVELING, kind::MSG_ACK, GameState::idle()),
    ];

    let tactics = [
        (kind::PIRATES_ENCOUNTER_FIGHT, Tactic::Fight),
        (kind::PIRATES_ENCOUNTER_FLEE, Tactic::Flee),
        (kind::PIRATES_ENCOUNTER_OFFER, Tactic::Offer),
    ];
    for (on, tactic) in tactics {
        transitions.push(
            edge(paths::PIRATE_ENCOUNTER)
                .on(on)
                .to(traveling)
                .action(move |ctx, _, rng| updates::arrive(&pirates::resolve(ctx, tactic, rng)))
                .build()?,
        );
    }

    Ok(transitions)
}

fn clear_trade(context: &GameContext) -> GameContext {
    let mut next = context.clone();
    next.good = None;
    next.quantity = None;
    next
}

fn market() -> Result<Vec<GameTransition>, BuildError> {
    let choose = GameState::market(MarketStep::ChooseAction);

    let mut transitions = vec![
        edge(paths::CHOOSE_ACTION)
            .on(kind::PICK_ACTION)
            .when(|_, cmd| matches!(cmd, Command::PickAction { action: TradeAction::Buy }))
            .to(GameState::buying(TradeStep::PickGood))
            .action(|ctx, _, _| clear_trade(ctx))
            .build()?,
        edge(paths::CHOOSE_ACTION)
            .on(kind::PICK_ACTION)
            .when(|ctx, cmd| {
                matches!(cmd, Command::PickAction { action: TradeAction::Sell }) && !ctx.ship.is_empty()
            })
            .to(GameState::selling(TradeStep::PickGood))
            .action(|ctx, _, _| clear_trade(ctx))
            .build()?,
        edge(paths::CHOOSE_ACTION)
            .on(kind::PICK_ACTION)
            .action(|ctx, _, _| updates::reject(ctx, &[Violation::EmptyHold]))
            .build()?,
        edge(paths::CHOOSE_ACTION)
            .on(kind::SELL_ALL)
            .when(|ctx, _| !ctx.ship.is_empty())
            .action(|ctx, _, _| updates::sell_all(ctx))
            .build()?,
        edge(paths::CHOOSE_ACTION)
            .on(kind::SELL_ALL)
            .action(|ctx, _, _| updates::reject(ctx, &[Violation::EmptyHold]))
            .build()?,
        navigation(paths::CHOOSE_ACTION, kind::CANCEL, GameState::idle()),
        edge(paths::BUY_PICK_GOOD)
            .on(kind::PICK_GOOD)
            .to(GameState::buying(TradeStep::SelectQuantity))
            .action(|ctx, cmd, _| match cmd {
                Command::PickGood { good } => updates::select_good_to_buy(ctx, *good),
                _ => ctx.clone(),
            })
            .build()?,
        edge(paths::SELL_PICK_GOOD)
            .on(kind::PICK_GOOD)
            .to(GameState::selling(TradeStep::SelectQuantity))
            .action(|ctx, cmd, _| match cmd {
                Command::PickGood { good } => updates::select_good_to_sell(ctx, *good),
                _ => ctx.clone(),
            })
            .build()?,
    ];

    for (source, commit) in [
        (paths::BUY_SELECT_QUANTITY, GameState::buying(TradeStep::Commit)),
        (paths::SELL_SELECT_QUANTITY, GameState::selling(TradeStep::Commit)),
    ] {
        transitions.push(
            edge(source)
                .on(kind::SELECT_QUANTITY)
                .when(|_, cmd| matches!(cmd, Command::SelectQuantity { quantity } if *quantity > 0))
                .to(commit)
                .action(|ctx, cmd, _| match cmd {
                    Command::SelectQuantity { quantity } => updates::select_quantity(ctx, *quantity),
                    _ => ctx.clone(),
                })
                .build()?,
        );
        transitions.push(
            edge(source)
                .on(kind::SELECT_QUANTITY)
                .action(|ctx, _, _| updates::reject(ctx, &[Violation::InvalidQuantity]))
                .build()?,
        );
    }

    transitions.extend(checked(
        paths::CHOOSE_ACTION,
        kind::BUY_INTELLIGENCE,
        intelligence_rules(),
        |ctx, cmd| match cmd {
            Command::BuyIntelligence { port } => Some(IntelligenceRequest::new(ctx, *port)),
            _ => None,
        },
        None,
        None,
        |ctx, cmd| match cmd {
            Command::BuyIntelligence { port } => updates::buy_intelligence(ctx, *port, INTELLIGENCE_COST),
            _ => ctx.clone(),
        },
    )?);
    transitions.extend(checked(
        paths::BUY_ACTION,
        kind::PURCHASE,
        purchase_rules(),
        |ctx, cmd| match cmd {
            Command::Purchase { good, quantity } => Some(PurchaseRequest::new(ctx, *good, *quantity)),
            _ => None,
        },
        Some(choose),
        Some(GameState::buying(TradeStep::PickGood)),
        |ctx, cmd| match cmd {
            Command::Purchase { good, quantity } => updates::purchase(ctx, *good, *quantity),
            _ => ctx.clone(),
        },
    )?);
    transitions.extend(checked(
        paths::SELL_ACTION,
        kind::SELL,
        sale_rules(),
        |ctx, cmd| match cmd {
            Command::Sell { good, quantity } => Some(SaleRequest::new(ctx, *good, *quantity)),
            _ => None,
        },
        Some(choose),
        Some(GameState::selling(TradeStep::PickGood)),
        |ctx, cmd| match cmd {
            Command::Sell { good, quantity } => updates::sell(ctx, *good, *quantity),
            _ => ctx.clone(),
        },
    )?);

    for source in [paths::BUY_ACTION, paths::SELL_ACTION] {
        transitions.push(
            edge(source)
                .on(kind::CANCEL)
                .to(choose)
                .action(|ctx, _, _| clear_trade(ctx))
                .build()?,
        );
    }

    Ok(transitions)
}

fn shipyard() -> Result<Vec<GameTransition>, BuildError> {
    let mut transitions = Vec::new();

    transitions.extend(checked(
        paths::SHIPYARD_IDLE,
        kind::REPAIR,
        repair_rules(),
        |ctx, cmd| match cmd {
            Command::Repair { cash } => Some(RepairRequest::new(ctx, *cash)),
            _ => None,
        },
        Some(GameState::shipyard(ShipyardStep::RepairsCompleted)),
        None,
        |ctx, cmd| match cmd {
            Command::Repair { cash } => updates::repair(ctx, *cash),
            _ => ctx.clone(),
        },
    )?);
    transitions.extend(checked(
        paths::SHIPYARD_IDLE,
        kind::UPGRADE_SHIP,
        upgrade_rules(),
        |ctx, cmd| match cmd {
            Command::UpgradeShip { upgrade_type } => Some(UpgradeRequest::new(ctx, *upgrade_type)),
            _ => None,
        },
        None,
        None,
        |ctx, cmd| match cmd {
            Command::UpgradeShip { upgrade_type } => updates::upgrade_ship(ctx, *upgrade_type),
            _ => ctx.clone(),
        },
    )?);
    transitions.extend(checked(
        paths::SHIPYARD_IDLE,
        kind::HIRE_PERMANENT_GUARDS,
        hire_rules(),
        |ctx, cmd| match cmd {
            Command::HirePermanentGuards { amount } => Some(FleetRequest::hire(ctx, *amount)),
            _ => None,
        },
        None,
        None,
        |ctx, cmd| match cmd {
            Command::HirePermanentGuards { amount } => updates::hire_guards(ctx, *amount),
            _ => ctx.clone(),
        },
    )?);
    transitions.extend(checked(
        paths::SHIPYARD_IDLE,
        kind::UPGRADE_GUARDS,
        fleet_upgrade_rules(),
        |ctx, _| Some(FleetRequest::upgrade(ctx)),
        None,
        None,
        |ctx, _| updates::upgrade_guards(ctx),
    )?);
    transitions.extend(checked(
        paths::SHIPYARD_IDLE,
        kind::DISMISS_GUARDS,
        dismiss_rules(),
        |ctx, cmd| match cmd {
            Command::DismissGuards { amount } => Some(FleetRequest::dismiss(ctx, *amount)),
            _ => None,
        },
        None,
        None,
        |ctx, cmd| match cmd {
            Command::DismissGuards { amount } => updates::dismiss_guards(ctx, *amount),
            _ => ctx.clone(),
        },
    )?);

    transitions.push(navigation(paths::SHIPYARD_IDLE, kind::CANCEL, GameState::idle()));
    transitions.push(navigation(
        paths::REPAIRS_COMPLETED,
        kind::MSG_ACK,
        GameState::shipyard(ShipyardStep::Idle),
    ));

    Ok(transitions)
}

fn endgame() -> Result<Vec<GameTransition>, BuildError> {
    Ok(vec![
        edge(paths::AT_RETIREMENT)
            .on(kind::RETIRE)
            .when(|ctx, _| ctx.can_retire)
            .to(GameState::ScoringScreen)
            .action(|ctx, _, _| updates::finish(ctx, GameOutcome::Retired))
            .build()?,
        navigation(paths::AT_RETIREMENT, kind::CANCEL, GameState::idle()),
        edge(paths::GAME)
            .on(kind::RETIRE)
            .to(GameState::idle())
            .action(|ctx, _, _| {
                updates::notice(
                    ctx,
                    format!("You can't retire before the season ends on day {GOAL_DAYS}."),
                )
            })
            .build()?,
        edge(paths::GAME)
            .on(kind::DECLARE_BANKRUPTCY)
            .when(|ctx, _| ctx.balance < 0)
            .to(GameState::ScoringScreen)
            .action(|ctx, _, _| updates::finish(ctx, GameOutcome::Bankrupt))
            .build()?,
        edge(paths::GAME)
            .on(kind::DECLARE_BANKRUPTCY)
            .action(|ctx, _, _| updates::notice(ctx, "You aren't in debt, so you can't declare bankruptcy."))
            .build()?,
        edge(paths::GAME)
            .always()
            .when(|ctx, _| ctx.ship.health == 0)
            .to(GameState::ScoringScreen)
            .action(|ctx, _, _| updates::finish(ctx, GameOutcome::Shipwrecked))
            .build()?,
        edge(paths::GAME)
            .always()
            .when(|ctx, _| ctx.balance <= BANKRUPTCY_THRESHOLD)
            .to(GameState::ScoringScreen)
            .action(|ctx, _, _| updates::finish(ctx, GameOutcome::Bankrupt))
            .build()?,
        edge(paths::GAME)
            .always()
            .when(|ctx, _| ctx.day >= GOAL_DAYS && !ctx.can_retire)
            .action(|ctx, _, _| updates::allow_retirement(ctx))
            .build()?,
        edge(paths::GAME)
            .always()
            .when(|ctx, _| ctx.next_price_update <= 0)
            .action(|ctx, _, rng| updates::regenerate_prices(ctx, rng))
            .build()?,
        edge(paths::GAME)
            .always()
            .when(|ctx, _| ctx.next_trend_update <= 0)
            .action(|ctx, _, rng| updates::regenerate_trends(ctx, rng))
            .build()?,
        edge(paths::SCORING)
            .on(kind::RESTART_GAME)
            .to(GameState::IntroScreen)
            .action(|ctx, _, rng| updates::restart(ctx, rng))
            .build()?,
    ])
}
