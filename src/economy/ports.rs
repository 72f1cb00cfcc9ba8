//! The port catalog and its fixed distance table.

use super::goods::Good;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Port {
    #[serde(rename = "Hong Kong")]
    HongKong,
    Shanghai,
    Nagasaki,
    Singapore,
    Manila,
    Bangkok,
}

// Nautical miles, indexed by `Port::index`. Symmetric with a zero diagonal.
const DISTANCES: [[u32; 6]; 6] = [
    [0, 1300, 1900, 2600, 1100, 2400],
    [1300, 0, 850, 3800, 2300, 3500],
    [1900, 850, 0, 4300, 2600, 4000],
    [2600, 3800, 4300, 0, 2400, 1400],
    [1100, 2300, 2600, 2400, 0, 2200],
    [2400, 3500, 4000, 1400, 2200, 0],
];

// Columns follow `Good::ALL`.
const BASE_PRICES: [[i64; 5]; 6] = [
    [45, 140, 100, 70, 260],
    [30, 110, 120, 85, 300],
    [55, 160, 80, 95, 240],
    [60, 170, 130, 40, 320],
    [50, 150, 115, 55, 280],
    [40, 165, 125, 50, 230],
];

impl Port {
    pub const ALL: [Port; 6] = [
        Port::HongKong,
        Port::Shanghai,
        Port::Nagasaki,
        Port::Singapore,
        Port::Manila,
        Port::Bangkok,
    ];

    /// Home port of every new game.
    pub const HOME: Port = Port::HongKong;

    pub const fn name(self) -> &'static str {
        match self {
            Self::HongKong => "Hong Kong",
            Self::Shanghai => "Shanghai",
            Self::Nagasaki => "Nagasaki",
            Self::Singapore => "Singapore",
            Self::Manila => "Manila",
            Self::Bangkok => "Bangkok",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }

    pub const fn distance_to(self, other: Port) -> u32 {
        DISTANCES[self.index()][other.index()]
    }

    /// Price of `good` here before trend and volatility are applied.
    pub fn base_price(self, good: Good) -> i64 {
        BASE_PRICES[self.index()][good as usize]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|port| port.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
