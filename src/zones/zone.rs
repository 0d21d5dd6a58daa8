//! The zone enumeration.

use serde::{Deserialize, Serialize};

use crate::core::error::ZoneParseError;

/// A named area of one player's field.
///
/// Order matters inside Castle (the deck) and Hand; other zones keep
/// insertion order but the rules don't depend on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Zone {
    /// The deck.
    Castle,
    Defense,
    Attack,
    Cemetery,
    Exile,
    Removal,
    /// Weapons and totems.
    Support,
    Hand,
    GoldsPaid,
    UnpaidGold,
    Auxiliary,
}

impl Zone {
    /// Number of zones.
    pub const COUNT: usize = 11;

    /// Every zone, in index order.
    pub const ALL: [Zone; Zone::COUNT] = [
        Zone::Castle,
        Zone::Defense,
        Zone::Attack,
        Zone::Cemetery,
        Zone::Exile,
        Zone::Removal,
        Zone::Support,
        Zone::Hand,
        Zone::GoldsPaid,
        Zone::UnpaidGold,
        Zone::Auxiliary,
    ];

    /// Zones where a bearer can stand.
    pub const BEARER_ZONES: [Zone; 2] = [Zone::Defense, Zone::Attack];

    /// Dense index, stable for the life of the crate.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Zone::Castle => 0,
            Zone::Defense => 1,
            Zone::Attack => 2,
            Zone::Cemetery => 3,
            Zone::Exile => 4,
            Zone::Removal => 5,
            Zone::Support => 6,
            Zone::Hand => 7,
            Zone::GoldsPaid => 8,
            Zone::UnpaidGold => 9,
            Zone::Auxiliary => 10,
        }
    }

    /// Canonical wire name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Zone::Castle => "Castle",
            Zone::Defense => "Defense",
            Zone::Attack => "Attack",
            Zone::Cemetery => "Cemetery",
            Zone::Exile => "Exile",
            Zone::Removal => "Removal",
            Zone::Support => "Support",
            Zone::Hand => "Hand",
            Zone::GoldsPaid => "GoldsPaid",
            Zone::UnpaidGold => "UnpaidGold",
            Zone::Auxiliary => "Auxiliary",
        }
    }

    /// Moving a card here takes it out of play, so its relations are torn down.
    #[must_use]
    pub const fn leaves_play(self) -> bool {
        matches!(
            self,
            Zone::Castle | Zone::Cemetery | Zone::Exile | Zone::Removal | Zone::Hand
        )
    }

    /// Can a bearer stand here?
    #[must_use]
    pub const fn holds_bearers(self) -> bool {
        matches!(self, Zone::Defense | Zone::Attack)
    }

    /// Can a weapon stand here?
    #[must_use]
    pub const fn holds_weapons(self) -> bool {
        matches!(self, Zone::Support)
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Zone {
    type Err = ZoneParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Zone::ALL
            .iter()
            .copied()
            .find(|z| z.name() == s)
            .ok_or_else(|| ZoneParseError(s.to_string()))
    }
}
