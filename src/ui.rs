//! Navigation machines for the market and shipyard sub-screens.
//!
//! These only track which screen is showing. They carry no context and their
//! transitions have no guards or actions.

use crate::builder::{navigation, BuildError, StateMachineBuilder};
use crate::core::{Input, State, StateHistory};
use crate::machine::{StateMachine, StepResult};
use crate::state_enum;

state_enum! {
    pub enum MarketView {
        Menu,
        Buying,
        Selling,
        Intelligence,
    }
}

state_enum! {
    pub enum ShipyardView {
        Menu,
        Repairing,
        Upgrading,
        Fleet,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarketInput {
    Buy,
    Sell,
    Intelligence,
    Back,
}

impl Input for MarketInput {
    fn kind(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
            Self::Intelligence => "INTELLIGENCE",
            Self::Back => "BACK",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShipyardInput {
    Repair,
    Upgrade,
    Fleet,
    Back,
}

impl Input for ShipyardInput {
    fn kind(&self) -> &'static str {
        match self {
            Self::Repair => "REPAIR",
            Self::Upgrade => "UPGRADE",
            Self::Fleet => "FLEET",
            Self::Back => "BACK",
        }
    }
}

/// A context-free screen machine.
pub struct Screens<S: State + 'static, I> {
    machine: StateMachine<S, (), I, ()>,
}

impl<S: State + 'static, I: Input> Screens<S, I> {
    pub fn send(&mut self, input: &I) -> StepResult<S> {
        self.machine.dispatch(&(), input, &mut ()).0
    }

    pub fn current(&self) -> &S {
        self.machine.current_state()
    }

    pub fn history(&self) -> &StateHistory<S> {
        self.machine.history()
    }
}

pub type MarketScreens = Screens<MarketView, MarketInput>;
pub type ShipyardScreens = Screens<ShipyardView, ShipyardInput>;

pub fn market_screens() -> Result<MarketScreens, BuildError> {
    let machine = StateMachineBuilder::new()
        .initial(MarketView::Menu)
        .add_transition(navigation("Menu", "BUY", MarketView::Buying))
        .add_transition(navigation("Menu", "SELL", MarketView::Selling))
        .add_transition(navigation("Menu", "INTELLIGENCE", MarketView::Intelligence))
        .add_transition(navigation("Buying", "BACK", MarketView::Menu))
        .add_transition(navigation("Selling", "BACK", MarketView::Menu))
        .add_transition(navigation("Intelligence", "BACK", MarketView::Menu))
        .build()?;
    Ok(Screens { machine })
}

pub fn shipyard_screens() -> Result<ShipyardScreens, BuildError> {
    let machine = StateMachineBuilder::new()
        .initial(ShipyardView::Menu)
        .add_transition(navigation("Menu", "REPAIR", ShipyardView::Repairing))
        .add_transition(navigation("Menu", "UPGRADE", ShipyardView::Upgrading))
        .add_transition(navigation("Menu", "FLEET", ShipyardView::Fleet))
        .add_transition(navigation("Repairing", "BACK", ShipyardView::Menu))
        .add_transition(navigation("Upgrading", "BACK", ShipyardView::Menu))
        .add_transition(navigation("Fleet", "BACK", ShipyardView::Menu))
        .build()?;
    Ok(Screens { machine })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn market_menu_opens_each_screen() {
        for (input, view) in [
            (MarketInput::Buy, MarketView::Buying),
            (MarketInput::Sell, MarketView::Selling),
            (MarketInput::Intelligence, MarketView::Intelligence),
        ] {
            let mut screens = market_screens().unwrap();
            assert_eq!(
                screens.send(&input),
                StepResult::Transitioned {
                    from: MarketView::Menu,
                    to: view
                }
            );
            screens.send(&MarketInput::Back);
            assert_eq!(screens.current(), &MarketView::Menu);
        }
    }

    #[test]
    fn market_screens_ignore_lateral_moves() {
        let mut screens = market_screens().unwrap();
        screens.send(&MarketInput::Buy);
        assert!(screens.send(&MarketInput::Sell).is_ignored());
        assert_eq!(screens.current(), &MarketView::Buying);
    }

    #[test]
    fn back_on_menu_is_ignored() {
        let mut screens = shipyard_screens().unwrap();
        assert!(screens.send(&ShipyardInput::Back).is_ignored());
        assert!(screens.history().transitions().is_empty());
    }

    #[test]
    fn shipyard_navigation_is_recorded() {
        let mut screens = shipyard_screens().unwrap();
        screens.send(&ShipyardInput::Fleet);
        screens.send(&ShipyardInput::Back);
        screens.send(&ShipyardInput::Repair);

        let path: Vec<_> = screens.history().get_path().into_iter().copied().collect();
        assert_eq!(
            path,
            vec![
                ShipyardView::Menu,
                ShipyardView::Fleet,
                ShipyardView::Menu,
                ShipyardView::Repairing
            ]
        );
    }
}
