//! Scripted Voyage
//!
//! Plays a short trading run against the game machine and prints what a
//! renderer would see after every command.
//!
//! Key concepts:
//! - Assembling trades with `Transaction` before sending them
//! - Tracking sub-screens with the UI navigation machines
//! - Answering pirates and events as they come up
//! - Snapshots as the renderer's view of the game
//!
//! Run with: RUST_LOG=debug cargo run --example scripted_voyage -- [seed]

use std::error::Error;
use tradewinds::economy::{Good, Port};
use tradewinds::events::template;
use tradewinds::game::{Command, Game, GameState, PortStep, TradeAction};
use tradewinds::transaction::{Transaction, TransactionKind};
use tradewinds::ui::{market_screens, MarketInput};

fn show(game: &Game, command: &Command) {
    println!("> {:?}", command);
    println!("  [{}] day {} balance {}", game.state_path(), game.context().day, game.context().balance);
    for batch in game.messages() {
        for line in batch {
            println!("    {line}");
        }
    }
}

fn send(game: &mut Game, command: Command) {
    game.send(&command);
    show(game, &command);
}

/// Answer whatever the sea throws at us until the ship is in port.
fn weather_the_voyage(game: &mut Game) {
    loop {
        let state = *game.state();
        let reply = if state == GameState::port(PortStep::PirateEncounter) {
            Command::PiratesEncounterFight
        } else if state == GameState::port(PortStep::EventOccurred) {
            match game.context().current_event.map(template) {
                Some(event) if event.has_choices() => Command::ResolveEvent { choice: 0 },
                _ => Command::MsgAck,
            }
        } else if state == GameState::port(PortStep::Traveling) {
            Command::MsgAck
        } else {
            return;
        };
        send(game, reply);
    }
}

fn trade(game: &mut Game, kind: TransactionKind, good: Good, quantity: u32) {
    let pick = match kind {
        TransactionKind::Buy => TradeAction::Buy,
        _ => TradeAction::Sell,
    };
    let transaction = Transaction::begin(kind).with_good(good).with_quantity(quantity);

    send(game, Command::PickAction { action: pick });
    send(game, Command::PickGood { good });
    send(game, Command::SelectQuantity { quantity: i64::from(quantity) });
    if let Some(command) = transaction.finalize() {
        send(game, command);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(2024);

    println!("=== Scripted Voyage (seed {seed}) ===\n");

    let mut game = Game::with_seed(seed)?;
    let mut screens = market_screens()?;

    send(&mut game, Command::StartGame { settings: None });

    send(&mut game, Command::GoToMarket);
    screens.send(&MarketInput::Buy);
    trade(&mut game, TransactionKind::Buy, Good::Tea, 10);
    screens.send(&MarketInput::Back);
    send(&mut game, Command::Cancel);

    for destination in [Port::Shanghai, Port::HongKong] {
        if game.is_over() {
            break;
        }
        send(&mut game, Command::GoToPort);
        send(&mut game, Command::TravelTo { destination });
        weather_the_voyage(&mut game);
    }

    if !game.is_over() {
        send(&mut game, Command::GoToMarket);
        screens.send(&MarketInput::Sell);
        let held = game.context().ship.held(Good::Tea);
        if held > 0 {
            trade(&mut game, TransactionKind::Sell, Good::Tea, held);
        }
        send(&mut game, Command::Cancel);
    }

    println!("\nMarket screens visited: {}", screens.history().transitions().len());

    let snapshot = game.snapshot();
    println!("\nFinal snapshot ({} bytes as bincode):", snapshot.to_bytes()?.len());
    println!("{}", snapshot.to_json()?);

    println!("\n=== Example Complete ===");
    Ok(())
}
