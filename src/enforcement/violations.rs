//! Rule violations and their player-facing messages.

use crate::economy::{Good, UpgradeKind};
use thiserror::Error;

/// A domain rule that rejected a command.
///
/// The `Display` form is the message shown to the player.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Violation {
    #[error("Invalid quantity")]
    InvalidQuantity,

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("You don't have enough money. You need {needed} but only have {available}.")]
    InsufficientFunds { needed: i64, available: i64 },

    #[error("You don't have enough storage room. You need {needed} but only have {available}.")]
    InsufficientStorage { needed: i64, available: i64 },

    #[error("You don't have enough {good}. You only have {held}.")]
    InsufficientGoods { good: Good, held: u32 },

    #[error("You have nothing to sell.")]
    EmptyHold,

    #[error("Your ship doesn't need any repairs.")]
    NothingToRepair,

    #[error("That isn't enough to repair anything. Repairs cost {unit_cost} per point.")]
    RepairTooSmall { unit_cost: i64 },

    #[error("Your ship's {kind} is already at its maximum.")]
    UpgradeMaxed { kind: UpgradeKind },

    #[error("Your fleet can't grow beyond {max} guard ships.")]
    FleetFull { max: u32 },

    #[error("You don't have any guard ships.")]
    NoGuards,

    #[error("Your guard ships are already at maximum quality.")]
    GuardsMaxQuality,

    #[error("You only have {ships} guard ships.")]
    TooFewGuards { ships: u32 },

    #[error("You are already in this port.")]
    SamePort,
}

/// Broad class of a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    InsufficientFunds,
    InsufficientResource,
    InvalidInput,
}

impl Violation {
    pub fn kind(&self) -> ViolationKind {
        match self {
            Self::InsufficientFunds { .. } => ViolationKind::InsufficientFunds,
            Self::InsufficientStorage { .. }
            | Self::InsufficientGoods { .. }
            | Self::EmptyHold
            | Self::NoGuards
            | Self::TooFewGuards { .. } => ViolationKind::InsufficientResource,
            Self::InvalidQuantity
            | Self::InvalidAmount
            | Self::NothingToRepair
            | Self::RepairTooSmall { .. }
            | Self::UpgradeMaxed { .. }
            | Self::FleetFull { .. }
            | Self::GuardsMaxQuality
            | Self::SamePort => ViolationKind::InvalidInput,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_player_facing() {
        assert_eq!(Violation::InvalidQuantity.to_string(), "Invalid quantity");
        assert_eq!(
            Violation::InsufficientFunds {
                needed: 150,
                available: 90
            }
            .to_string(),
            "You don't have enough money. You need 150 but only have 90."
        );
        assert_eq!(
            Violation::InsufficientGoods {
                good: Good::Jade,
                held: 2
            }
            .to_string(),
            "You don't have enough Jade. You only have 2."
        );
        assert_eq!(
            Violation::UpgradeMaxed {
                kind: UpgradeKind::Speed
            }
            .to_string(),
            "Your ship's speed is already at its maximum."
        );
    }

    #[test]
    fn violations_are_classified() {
        assert_eq!(
            Violation::InsufficientFunds {
                needed: 1,
                available: 0
            }
            .kind(),
            ViolationKind::InsufficientFunds
        );
        assert_eq!(Violation::EmptyHold.kind(), ViolationKind::InsufficientResource);
        assert_eq!(Violation::InvalidQuantity.kind(), ViolationKind::InvalidInput);
    }
}
