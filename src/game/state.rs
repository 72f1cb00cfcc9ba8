//! The game's state tree.
//!
//! Screens nest as tagged variants. Each value renders to a dotted path such
//! as `gameScreen.at_market.buyAction.pickGood`, which the transition table
//! resolves leaf first.

use crate::core::State;
use serde::{Deserialize, Serialize};

/// Dotted paths of every state and compound state in the tree.
pub mod paths {
    pub const INTRO: &str = "introScreen";
    pub const HELP: &str = "helpScreen";
    pub const SCORING: &str = "scoringScreen";

    pub const GAME: &str = "gameScreen";
    pub const IDLE: &str = "gameScreen.idle";

    pub const AT_PORT: &str = "gameScreen.at_port";
    pub const PICK_DESTINATION: &str = "gameScreen.at_port.pickDestination";
    pub const CHECK_EVENT: &str = "gameScreen.at_port.checkEvent";
    pub const EVENT_OCCURRED: &str = "gameScreen.at_port.eventOccurred";
    pub const PIRATE_ENCOUNTER: &str = "gameScreen.at_port.pirateEncounter";
    pub const TRAVELING: &str = "gameScreen.at_port.traveling";

    pub const AT_MARKET: &str = "gameScreen.at_market";
    pub const CHOOSE_ACTION: &str = "gameScreen.at_market.chooseAction";
    pub const BUY_ACTION: &str = "gameScreen.at_market.buyAction";
    pub const BUY_PICK_GOOD: &str = "gameScreen.at_market.buyAction.pickGood";
    pub const BUY_SELECT_QUANTITY: &str = "gameScreen.at_market.buyAction.selectQuantity";
    pub const BUY_COMMIT: &str = "gameScreen.at_market.buyAction.commit";
    pub const SELL_ACTION: &str = "gameScreen.at_market.sellAction";
    pub const SELL_PICK_GOOD: &str = "gameScreen.at_market.sellAction.pickGood";
    pub const SELL_SELECT_QUANTITY: &str = "gameScreen.at_market.sellAction.selectQuantity";
    pub const SELL_COMMIT: &str = "gameScreen.at_market.sellAction.commit";

    pub const AT_SHIPYARD: &str = "gameScreen.at_shipyard";
    pub const SHIPYARD_IDLE: &str = "gameScreen.at_shipyard.idle";
    pub const REPAIRS_COMPLETED: &str = "gameScreen.at_shipyard.repairsCompleted";

    pub const AT_RETIREMENT: &str = "gameScreen.at_retirement";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    IntroScreen,
    HelpScreen,
    GameScreen(GameScreen),
    ScoringScreen,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameScreen {
    Idle,
    AtPort(PortStep),
    AtMarket(MarketStep),
    AtShipyard(ShipyardStep),
    AtRetirement,
}

/// Voyage flow, from choosing a destination to landing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortStep {
    PickDestination,
    /// Transient; always settles into one of the next three.
    CheckEvent,
    EventOccurred,
    PirateEncounter,
    Traveling,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketStep {
    ChooseAction,
    BuyAction(TradeStep),
    SellAction(TradeStep),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeStep {
    PickGood,
    SelectQuantity,
    Commit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipyardStep {
    Idle,
    RepairsCompleted,
}

impl GameState {
    pub const fn idle() -> Self {
        Self::GameScreen(GameScreen::Idle)
    }

    pub const fn port(step: PortStep) -> Self {
        Self::GameScreen(GameScreen::AtPort(step))
    }

    pub const fn market(step: MarketStep) -> Self {
        Self::GameScreen(GameScreen::AtMarket(step))
    }

    pub const fn buying(step: TradeStep) -> Self {
        Self::market(MarketStep::BuyAction(step))
    }

    pub const fn selling(step: TradeStep) -> Self {
        Self::market(MarketStep::SellAction(step))
    }

    pub const fn shipyard(step: ShipyardStep) -> Self {
        Self::GameScreen(GameScreen::AtShipyard(step))
    }

    pub const fn retirement() -> Self {
        Self::GameScreen(GameScreen::AtRetirement)
    }

    /// Path segments from the top of the tree down to the leaf.
    pub fn segments(&self) -> Vec<&'static str> {
        let screen = match self {
            Self::IntroScreen => return vec!["introScreen"],
            Self::HelpScreen => return vec!["helpScreen"],
            Self::ScoringScreen => return vec!["scoringScreen"],
            Self::GameScreen(screen) => screen,
        };

        let mut segments = vec!["gameScreen"];
        match screen {
            GameScreen::Idle => segments.push("idle"),
            GameScreen::AtRetirement => segments.push("at_retirement"),
            GameScreen::AtPort(step) => {
                segments.push("at_port");
                segments.push(match step {
                    PortStep::PickDestination => "pickDestination",
                    PortStep::CheckEvent => "checkEvent",
                    PortStep::EventOccurred => "eventOccurred",
                    PortStep::PirateEncounter => "pirateEncounter",
                    PortStep::Traveling => "traveling",
                });
            }
            GameScreen::AtMarket(step) => {
                segments.push("at_market");
                let trade = match step {
                    MarketStep::ChooseAction => {
                        segments.push("chooseAction");
                        return segments;
                    }
                    MarketStep::BuyAction(trade) => {
                        segments.push("buyAction");
                        trade
                    }
                    MarketStep::SellAction(trade) => {
                        segments.push("sellAction");
                        trade
                    }
                };
                segments.push(match trade {
                    TradeStep::PickGood => "pickGood",
                    TradeStep::SelectQuantity => "selectQuantity",
                    TradeStep::Commit => "commit",
                });
            }
            GameScreen::AtShipyard(step) => {
                segments.push("at_shipyard");
                segments.push(match step {
                    ShipyardStep::Idle => "idle",
                    ShipyardStep::RepairsCompleted => "repairsCompleted",
                });
            }
        }
        segments
    }
}

impl State for GameState {
    fn name(&self) -> &str {
        self.segments().last().copied().unwrap_or_default()
    }

    fn path(&self) -> String {
        self.segments().join(".")
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::ScoringScreen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::in_state;

    #[test]
    fn path_constants_match_the_tree() {
        let cases = [
            (GameState::IntroScreen, paths::INTRO),
            (GameState::HelpScreen, paths::HELP),
            (GameState::ScoringScreen, paths::SCORING),
            (GameState::idle(), paths::IDLE),
            (GameState::port(PortStep::PickDestination), paths::PICK_DESTINATION),
            (GameState::port(PortStep::CheckEvent), paths::CHECK_EVENT),
            (GameState::port(PortStep::EventOccurred), paths::EVENT_OCCURRED),
            (GameState::port(PortStep::PirateEncounter), paths::PIRATE_ENCOUNTER),
            (GameState::port(PortStep::Traveling), paths::TRAVELING),
            (GameState::market(MarketStep::ChooseAction), paths::CHOOSE_ACTION),
            (GameState::buying(TradeStep::PickGood), paths::BUY_PICK_GOOD),
            (GameState::buying(TradeStep::SelectQuantity), paths::BUY_SELECT_QUANTITY),
            (GameState::buying(TradeStep::Commit), paths::BUY_COMMIT),
            (GameState::selling(TradeStep::PickGood), paths::SELL_PICK_GOOD),
            (GameState::selling(TradeStep::SelectQuantity), paths::SELL_SELECT_QUANTITY),
            (GameState::selling(TradeStep::Commit), paths::SELL_COMMIT),
            (GameState::shipyard(ShipyardStep::Idle), paths::SHIPYARD_IDLE),
            (GameState::shipyard(ShipyardStep::RepairsCompleted), paths::REPAIRS_COMPLETED),
            (GameState::retirement(), paths::AT_RETIREMENT),
        ];

        for (state, path) in cases {
            assert_eq!(state.path(), path);
        }
    }

    #[test]
    fn name_is_the_leaf_segment() {
        assert_eq!(GameState::buying(TradeStep::Commit).name(), "commit");
        assert_eq!(GameState::shipyard(ShipyardStep::Idle).name(), "idle");
        assert_eq!(GameState::IntroScreen.name(), "introScreen");
    }

    #[test]
    fn nested_states_sit_under_their_screens() {
        let state = GameState::selling(TradeStep::SelectQuantity).path();
        assert!(in_state(&state, paths::SELL_ACTION));
        assert!(in_state(&state, paths::AT_MARKET));
        assert!(in_state(&state, paths::GAME));
        assert!(!in_state(&state, paths::BUY_ACTION));
    }

    #[test]
    fn only_scoring_is_final() {
        assert!(GameState::ScoringScreen.is_final());
        assert!(!GameState::idle().is_final());
        assert!(!GameState::IntroScreen.is_final());
    }
}
