//! Tradable commodities.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Good {
    Tea,
    Silk,
    Porcelain,
    Spices,
    Jade,
}

impl Good {
    pub const ALL: [Good; 5] = [Good::Tea, Good::Silk, Good::Porcelain, Good::Spices, Good::Jade];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Tea => "Tea",
            Self::Silk => "Silk",
            Self::Porcelain => "Porcelain",
            Self::Spices => "Spices",
            Self::Jade => "Jade",
        }
    }

    /// Maximum relative swing of a regenerated price around its trend value.
    pub const fn volatility(self) -> f64 {
        match self {
            Self::Tea => 0.10,
            Self::Silk => 0.15,
            Self::Porcelain => 0.12,
            Self::Spices => 0.20,
            Self::Jade => 0.25,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|good| good.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Good {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for good in Good::ALL {
            assert_eq!(Good::from_name(good.name()), Some(good));
        }
        assert_eq!(Good::from_name(" tea "), Some(Good::Tea));
        assert_eq!(Good::from_name("Opium"), None);
    }

    #[test]
    fn volatility_is_a_fraction() {
        for good in Good::ALL {
            assert!(good.volatility() > 0.0 && good.volatility() < 1.0);
        }
    }
}
