//! The trade a player is assembling across several inputs.
//!
//! A `Transaction` is a value: each method consumes it and returns the next
//! one. It never reads or writes the game context. Once it is ready,
//! [`Transaction::finalize`] produces the command to send to the game.

use crate::economy::{Good, Port};
use crate::game::Command;
use crate::state_enum;

state_enum! {
    /// How far the transaction has progressed.
    pub enum TransactionStep {
        Idle,
        PickingGood,
        SelectingQuantity,
        Ready,
    }
    final: [Ready]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionKind {
    Buy,
    Sell,
    Intelligence,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    step: TransactionStep,
    kind: Option<TransactionKind>,
    good: Option<Good>,
    quantity: Option<u32>,
    intelligence_port: Option<Port>,
}

impl Transaction {
    pub fn new() -> Self {
        Self {
            step: TransactionStep::Idle,
            kind: None,
            good: None,
            quantity: None,
            intelligence_port: None,
        }
    }

    pub fn step(&self) -> TransactionStep {
        self.step
    }

    pub fn kind(&self) -> Option<TransactionKind> {
        self.kind
    }

    pub fn good(&self) -> Option<Good> {
        self.good
    }

    pub fn quantity(&self) -> Option<u32> {
        self.quantity
    }

    pub fn intelligence_port(&self) -> Option<Port> {
        self.intelligence_port
    }

    /// Start a new trade, discarding anything in progress.
    pub fn begin(kind: TransactionKind) -> Self {
        Self {
            step: TransactionStep::PickingGood,
            kind: Some(kind),
            ..Self::new()
        }
    }

    /// Choose the good to trade. Ignored outside of a buy or sell.
    pub fn with_good(self, good: Good) -> Self {
        match (self.step, self.kind) {
            (TransactionStep::PickingGood, Some(TransactionKind::Buy | TransactionKind::Sell)) => Self {
                step: TransactionStep::SelectingQuantity,
                good: Some(good),
                ..self
            },
            _ => self,
        }
    }

    /// Choose the quantity. Zero keeps the transaction waiting.
    pub fn with_quantity(self, quantity: u32) -> Self {
        if self.step != TransactionStep::SelectingQuantity || quantity == 0 {
            return self;
        }
        Self {
            step: TransactionStep::Ready,
            quantity: Some(quantity),
            ..self
        }
    }

    /// Choose the port to buy a market report for.
    pub fn with_port(self, port: Port) -> Self {
        match (self.step, self.kind) {
            (TransactionStep::PickingGood, Some(TransactionKind::Intelligence)) => Self {
                step: TransactionStep::Ready,
                intelligence_port: Some(port),
                ..self
            },
            _ => self,
        }
    }

    /// Return to the idle step.
    pub fn reset(self) -> Self {
        Self::new()
    }

    /// The command this transaction amounts to, once it is ready.
    pub fn finalize(&self) -> Option<Command> {
        if self.step != TransactionStep::Ready {
            return None;
        }
        match self.kind? {
            TransactionKind::Buy => Some(Command::Purchase {
                good: self.good?,
                quantity: i64::from(self.quantity?),
            }),
            TransactionKind::Sell => Some(Command::Sell {
                good: self.good?,
                quantity: i64::from(self.quantity?),
            }),
            TransactionKind::Intelligence => Some(Command::BuyIntelligence {
                port: self.intelligence_port?,
            }),
        }
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}
