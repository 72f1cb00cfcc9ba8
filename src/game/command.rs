//! Player commands.

use crate::config::Settings;
use crate::core::Input;
use crate::economy::{Good, Port, UpgradeKind};
use serde::{Deserialize, Serialize};

/// Trade direction chosen on the market menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeAction {
    Buy,
    Sell,
}

/// Everything a player can ask the game to do.
///
/// On the wire a command is a JSON object tagged by `type`:
///
/// ```
/// use tradewinds::economy::Good;
/// use tradewinds::game::Command;
///
/// let cmd: Command = serde_json::from_str(r#"{"type":"PURCHASE","good":"Tea","quantity":5}"#).unwrap();
/// assert_eq!(cmd, Command::Purchase { good: Good::Tea, quantity: 5 });
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    StartGame {
        #[serde(default)]
        settings: Option<Settings>,
    },
    ShowHelp,
    HideHelp,
    GoToPort,
    GoToMarket,
    GoToShipyard,
    GoToRetirement,
    TravelTo {
        destination: Port,
    },
    MsgAck,
    Cancel,
    PickAction {
        action: TradeAction,
    },
    PickGood {
        good: Good,
    },
    SelectQuantity {
        quantity: i64,
    },
    Purchase {
        good: Good,
        quantity: i64,
    },
    Sell {
        good: Good,
        quantity: i64,
    },
    SellAll,
    BuyIntelligence {
        port: Port,
    },
    Repair {
        cash: i64,
    },
    UpgradeShip {
        #[serde(rename = "upgradeType")]
        upgrade_type: UpgradeKind,
    },
    HirePermanentGuards {
        amount: i64,
    },
    UpgradeGuards,
    DismissGuards {
        amount: i64,
    },
    Retire,
    DeclareBankruptcy,
    RestartGame,
    PiratesEncounterFight,
    PiratesEncounterFlee,
    PiratesEncounterOffer,
    ResolveEvent {
        choice: usize,
    },
}

/// Trigger names, one per [`Command`] variant.
pub mod kind {
    pub const START_GAME: &str = "START_GAME";
    pub const SHOW_HELP: &str = "SHOW_HELP";
    pub const HIDE_HELP: &str = "HIDE_HELP";
    pub const GO_TO_PORT: &str = "GO_TO_PORT";
    pub const GO_TO_MARKET: &str = "GO_TO_MARKET";
    pub const GO_TO_SHIPYARD: &str = "GO_TO_SHIPYARD";
    pub const GO_TO_RETIREMENT: &str = "GO_TO_RETIREMENT";
    pub const TRAVEL_TO: &str = "TRAVEL_TO";
    pub const MSG_ACK: &str = "MSG_ACK";
    pub const CANCEL: &str = "CANCEL";
    pub const PICK_ACTION: &str = "PICK_ACTION";
    pub const PICK_GOOD: &str = "PICK_GOOD";
    pub const SELECT_QUANTITY: &str = "SELECT_QUANTITY";
    pub const PURCHASE: &str = "PURCHASE";
    pub const SELL: &str = "SELL";
    pub const SELL_ALL: &str = "SELL_ALL";
    pub const BUY_INTELLIGENCE: &str = "BUY_INTELLIGENCE";
    pub const REPAIR: &str = "REPAIR";
    pub const UPGRADE_SHIP: &str = "UPGRADE_SHIP";
    pub const HIRE_PERMANENT_GUARDS: &str = "HIRE_PERMANENT_GUARDS";
    pub const UPGRADE_GUARDS: &str = "UPGRADE_GUARDS";
    pub const DISMISS_GUARDS: &str = "DISMISS_GUARDS";
    pub const RETIRE: &str = "RETIRE";
    pub const DECLARE_BANKRUPTCY: &str = "DECLARE_BANKRUPTCY";
    pub const RESTART_GAME: &str = "RESTART_GAME";
    pub const PIRATES_ENCOUNTER_FIGHT: &str = "PIRATES_ENCOUNTER_FIGHT";
    pub const PIRATES_ENCOUNTER_FLEE: &str = "PIRATES_ENCOUNTER_FLEE";
    pub const PIRATES_ENCOUNTER_OFFER: &str = "PIRATES_ENCOUNTER_OFFER";
    pub const RESOLVE_EVENT: &str = "RESOLVE_EVENT";
}

impl Input for Command {
    fn kind(&self) -> &'static str {
        match self {
            Self::StartGame { .. } => kind::START_GAME,
            Self::ShowHelp => kind::SHOW_HELP,
            Self::HideHelp => kind::HIDE_HELP,
            Self::GoToPort => kind::GO_TO_PORT,
            Self::GoToMarket => kind::GO_TO_MARKET,
            Self::GoToShipyard => kind::GO_TO_SHIPYARD,
            Self::GoToRetirement => kind::GO_TO_RETIREMENT,
            Self::TravelTo { .. } => kind::TRAVEL_TO,
            Self::MsgAck => kind::MSG_ACK,
            Self::Cancel => kind::CANCEL,
            Self::PickAction { .. } => kind::PICK_ACTION,
            Self::PickGood { .. } => kind::PICK_GOOD,
            Self::SelectQuantity { .. } => kind::SELECT_QUANTITY,
            Self::Purchase { .. } => kind::PURCHASE,
            Self::Sell { .. } => kind::SELL,
            Self::SellAll => kind::SELL_ALL,
            Self::BuyIntelligence { .. } => kind::BUY_INTELLIGENCE,
            Self::Repair { .. } => kind::REPAIR,
            Self::UpgradeShip { .. } => kind::UPGRADE_SHIP,
            Self::HirePermanentGuards { .. } => kind::HIRE_PERMANENT_GUARDS,
            Self::UpgradeGuards => kind::UPGRADE_GUARDS,
            Self::DismissGuards { .. } => kind::DISMISS_GUARDS,
            Self::Retire => kind::RETIRE,
            Self::DeclareBankruptcy => kind::DECLARE_BANKRUPTCY,
            Self::RestartGame => kind::RESTART_GAME,
            Self::PiratesEncounterFight => kind::PIRATES_ENCOUNTER_FIGHT,
            Self::PiratesEncounterFlee => kind::PIRATES_ENCOUNTER_FLEE,
            Self::PiratesEncounterOffer => kind::PIRATES_ENCOUNTER_OFFER,
            Self::ResolveEvent { .. } => kind::RESOLVE_EVENT,
        }
    }
}
