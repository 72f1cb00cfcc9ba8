//! Property-based tests for the machine core and the game built on it.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs and command sequences.

use chrono::Utc;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tradewinds::config::{Settings, BANKRUPTCY_THRESHOLD, GOAL_DAYS, PRICE_UPDATE_INTERVAL};
use tradewinds::core::{Guard, State, StateHistory, StateTransition};
use tradewinds::economy::{
    cargo, cost_for_repair, overload_limit, repair_for_cost, score, travel_time, Good, Port, UpgradeKind,
};
use tradewinds::game::{Command, Game, GameContext, GameState, TradeAction, TradeStep};
use tradewinds::state_enum;

state_enum! {
    enum Tack {
        Anchored,
        Beating,
        Running,
        Wrecked,
    }
    final: [Wrecked]
    error: [Wrecked]
}

prop_compose! {
    fn arbitrary_tack()(variant in 0..4u8) -> Tack {
        match variant {
            0 => Tack::Anchored,
            1 => Tack::Beating,
            2 => Tack::Running,
            _ => Tack::Wrecked,
        }
    }
}

fn arbitrary_port() -> impl Strategy<Value = Port> {
    (0..Port::ALL.len()).prop_map(|i| Port::ALL[i])
}

fn arbitrary_good() -> impl Strategy<Value = Good> {
    (0..Good::ALL.len()).prop_map(|i| Good::ALL[i])
}

fn arbitrary_command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::StartGame { settings: None }),
        Just(Command::GoToPort),
        Just(Command::GoToMarket),
        Just(Command::GoToShipyard),
        Just(Command::GoToRetirement),
        arbitrary_port().prop_map(|destination| Command::TravelTo { destination }),
        Just(Command::MsgAck),
        Just(Command::Cancel),
        Just(Command::PickAction {
            action: TradeAction::Buy
        }),
        Just(Command::PickAction {
            action: TradeAction::Sell
        }),
        arbitrary_good().prop_map(|good| Command::PickGood { good }),
        (-5i64..150).prop_map(|quantity| Command::SelectQuantity { quantity }),
        (arbitrary_good(), -5i64..150).prop_map(|(good, quantity)| Command::Purchase { good, quantity }),
        (arbitrary_good(), -5i64..150).prop_map(|(good, quantity)| Command::Sell { good, quantity }),
        Just(Command::SellAll),
        (-100i64..3_000).prop_map(|cash| Command::Repair { cash }),
        Just(Command::UpgradeShip {
            upgrade_type: UpgradeKind::Capacity
        }),
        Just(Command::UpgradeShip {
            upgrade_type: UpgradeKind::Speed
        }),
        (-1i64..4).prop_map(|amount| Command::HirePermanentGuards { amount }),
        Just(Command::UpgradeGuards),
        (-1i64..4).prop_map(|amount| Command::DismissGuards { amount }),
        Just(Command::PiratesEncounterFight),
        Just(Command::PiratesEncounterFlee),
        Just(Command::PiratesEncounterOffer),
        (0usize..3).prop_map(|choice| Command::ResolveEvent { choice }),
        Just(Command::Retire),
        Just(Command::DeclareBankruptcy),
        Just(Command::RestartGame),
    ]
}

fn fresh_context(seed: u64) -> GameContext {
    GameContext::new(&mut ChaCha20Rng::seed_from_u64(seed), Settings::default())
}

/// Day a voyage from `before` should land on, if it completed.
fn expected_arrival(before: &GameContext, command: &Command) -> Option<u32> {
    let destination = before.destination.or(match command {
        Command::TravelTo { destination } => Some(*destination),
        _ => None,
    })?;
    let days = travel_time(before.current_port, destination, before.ship.speed);
    let arrival = before.day + days;
    if before.settings.extended_game {
        Some(arrival)
    } else {
        Some(arrival.min(GOAL_DAYS.max(before.day)))
    }
}

proptest! {
    #[test]
    fn guard_is_deterministic(state in arbitrary_tack()) {
        let guard: Guard<Tack, ()> = Guard::new(|s: &Tack, _: &()| !s.is_final());
        prop_assert_eq!(guard.check(&state, &()), guard.check(&state, &()));
    }

    #[test]
    fn history_preserves_order(
        transitions in prop::collection::vec(arbitrary_tack(), 1..10)
    ) {
        let mut history = StateHistory::new();
        let mut expected_path = vec![Tack::Anchored];

        for (i, to_state) in transitions.iter().enumerate() {
            let from_state = if i == 0 { Tack::Anchored } else { transitions[i - 1] };

            history = history.record(StateTransition {
                from: from_state,
                to: *to_state,
                trigger: "TACK".to_string(),
                timestamp: Utc::now(),
                sequence: i as u64,
            });
            expected_path.push(*to_state);
        }

        let path = history.get_path();
        prop_assert_eq!(path.len(), expected_path.len());
        for (state, expected) in path.iter().zip(&expected_path) {
            prop_assert_eq!(*state, expected);
        }
    }

    #[test]
    fn repair_never_overcharges(cash in 0i64..1_000_000) {
        prop_assert!(cost_for_repair(repair_for_cost(cash)) <= cash);
    }

    #[test]
    fn travel_takes_at_least_three_days(
        from in arbitrary_port(),
        to in arbitrary_port(),
        speed in 0u32..5_000,
    ) {
        prop_assert!(travel_time(from, to, speed) >= 3);
    }

    #[test]
    fn score_is_deterministic(seed in any::<u64>(), balance in -5_000i64..50_000) {
        let mut context = fresh_context(seed);
        context.balance = balance;

        prop_assert_eq!(score(&context), score(&context));
        if balance <= BANKRUPTCY_THRESHOLD {
            prop_assert_eq!(score(&context), 0);
        }
    }

    #[test]
    fn command_sequences_keep_invariants(
        seed in any::<u64>(),
        commands in prop::collection::vec(arbitrary_command(), 1..80),
    ) {
        let mut game = Game::with_seed(seed).unwrap();

        for command in &commands {
            let before = game.context().clone();
            let result = game.send(command);
            let after = game.context();

            prop_assert!(cargo(&after.ship) <= overload_limit(&after.ship));
            prop_assert!(after.ship.health <= 100);

            if result.is_ignored() {
                prop_assert_eq!(after, &before);
                continue;
            }
            if matches!(game.state(), GameState::IntroScreen) {
                continue;
            }

            prop_assert!(after.day >= before.day);
            if after.day != before.day {
                prop_assert_eq!(Some(after.day), expected_arrival(&before, command));
            }
        }
    }

    #[test]
    fn rejected_purchase_changes_nothing(
        seed in any::<u64>(),
        good in arbitrary_good(),
        quantity in 1i64..300,
        balance in 0i64..2_000,
    ) {
        let mut context = fresh_context(seed);
        context.balance = balance;
        let mut game = Game::with_context(seed, context).unwrap();
        game.send_all(&[
            Command::StartGame { settings: None },
            Command::GoToMarket,
            Command::PickAction { action: TradeAction::Buy },
            Command::PickGood { good },
            Command::SelectQuantity { quantity },
        ]);
        let before = game.context().clone();

        game.send(&Command::Purchase { good, quantity });

        if game.state() == &GameState::buying(TradeStep::PickGood) {
            prop_assert_eq!(game.context().balance, before.balance);
            prop_assert_eq!(&game.context().ship.hold, &before.ship.hold);
            prop_assert!(!game.messages().is_empty());
        } else {
            prop_assert!(game.context().balance < before.balance);
            prop_assert_eq!(game.context().ship.held(good), before.ship.held(good) + quantity as u32);
        }
    }

    #[test]
    fn due_prices_regenerate_exactly_once(seed in any::<u64>(), overdue in -10i32..=0) {
        let mut context = fresh_context(seed);
        context.next_price_update = overdue;
        let mut game = Game::with_context(seed, context).unwrap();

        game.send(&Command::StartGame { settings: None });

        let notices = game
            .messages()
            .iter()
            .filter(|batch| batch.iter().any(|line| line == "Market prices have been updated."))
            .count();
        prop_assert_eq!(notices, 1);
        prop_assert_eq!(game.context().next_price_update, PRICE_UPDATE_INTERVAL);
    }

    #[test]
    fn pending_prices_are_left_alone(seed in any::<u64>(), remaining in 1i32..=PRICE_UPDATE_INTERVAL) {
        let mut context = fresh_context(seed);
        context.next_price_update = remaining;
        let prices = context.prices.clone();
        let mut game = Game::with_context(seed, context).unwrap();

        game.send(&Command::StartGame { settings: None });

        prop_assert_eq!(&game.context().prices, &prices);
        prop_assert_eq!(game.context().next_price_update, remaining);
    }
}
