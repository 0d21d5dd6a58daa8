//! Per-player zone store ("match").
//!
//! `ZoneStore` maps every `Zone` to an ordered card sequence. Each sequence
//! is an `im::Vector`, so cloning a whole store is O(zones) and a clone
//! shares structure with the original until one of them is modified. Rules
//! operations lean on this: they clone the incoming store, edit the clone
//! and hand it back, leaving the caller's snapshot untouched.
//!
//! On the wire a store is a map from zone name to card list; missing zones
//! deserialize as empty.
//!
//! ## Usage
//!
//! ```
//! use castle_duel::zones::{Zone, ZoneStore};
//! use castle_duel::cards::Card;
//! use castle_duel::core::{InstanceId, PlayerId};
//!
//! let owner = PlayerId::random();
//! let mut store = ZoneStore::new();
//! store.push(Zone::Castle, Card::new("a", InstanceId(1), owner, "Ally"));
//! store.push(Zone::Castle, Card::new("a", InstanceId(2), owner, "Ally"));
//!
//! assert_eq!(store.len(Zone::Castle), 2);
//! assert_eq!(store.locate(InstanceId(2)), Some((Zone::Castle, 1)));
//! ```

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use super::zone::Zone;
use crate::cards::Card;
use crate::core::ids::InstanceId;

/// Wire form of a store.
type StoreMap = OrdMap<Zone, Vector<Card>>;

/// One player's zones.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OrdMap<Zone, Vector<Card>>", into = "OrdMap<Zone, Vector<Card>>")]
pub struct ZoneStore {
    zones: [Vector<Card>; Zone::COUNT],
}

impl Default for ZoneStore {
    fn default() -> Self {
        Self {
            zones: std::array::from_fn(|_| Vector::new()),
        }
    }
}

impl From<StoreMap> for ZoneStore {
    fn from(map: StoreMap) -> Self {
        let mut store = Self::default();
        for (zone, cards) in map {
            store.zones[zone.index()] = cards;
        }
        store
    }
}

impl From<ZoneStore> for StoreMap {
    fn from(store: ZoneStore) -> Self {
        Zone::ALL
            .iter()
            .map(|&z| (z, store.zones[z.index()].clone()))
            .collect()
    }
}

impl ZoneStore {
    /// Create a store with every zone empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cards in a zone, in order.
    #[must_use]
    pub fn zone(&self, zone: Zone) -> &Vector<Card> {
        &self.zones[zone.index()]
    }

    /// Mutable access to a zone's sequence.
    pub fn zone_mut(&mut self, zone: Zone) -> &mut Vector<Card> {
        &mut self.zones[zone.index()]
    }

    /// Replace a zone's sequence wholesale.
    pub fn set_zone(&mut self, zone: Zone, cards: Vector<Card>) {
        self.zones[zone.index()] = cards;
    }

    /// Number of cards in a zone.
    #[must_use]
    pub fn len(&self, zone: Zone) -> usize {
        self.zone(zone).len()
    }

    /// Is a zone empty?
    #[must_use]
    pub fn is_empty(&self, zone: Zone) -> bool {
        self.zone(zone).is_empty()
    }

    /// Total cards across all zones.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.zones.iter().map(Vector::len).sum()
    }

    /// Card at `position` of `zone`.
    #[must_use]
    pub fn get(&self, zone: Zone, position: usize) -> Option<&Card> {
        self.zone(zone).get(position)
    }

    /// Remove and return the card at `position` of `zone`.
    ///
    /// Removal is positional: two copies of the same catalog card are
    /// different slots.
    pub fn remove_at(&mut self, zone: Zone, position: usize) -> Option<Card> {
        let cards = self.zone_mut(zone);
        if position < cards.len() {
            Some(cards.remove(position))
        } else {
            None
        }
    }

    /// Append a card to the end of a zone.
    pub fn push(&mut self, zone: Zone, card: Card) {
        self.zone_mut(zone).push_back(card);
    }

    /// Take up to `n` cards from the front of a zone, preserving order.
    pub fn take_front(&mut self, zone: Zone, n: usize) -> Vector<Card> {
        let cards = self.zone_mut(zone);
        let n = n.min(cards.len());
        let rest = cards.split_off(n);
        std::mem::replace(cards, rest)
    }

    /// Find a card instance anywhere in the store.
    #[must_use]
    pub fn locate(&self, idx: InstanceId) -> Option<(Zone, usize)> {
        self.locate_in(&Zone::ALL, idx)
    }

    /// Find a card instance in one of the given zones.
    #[must_use]
    pub fn locate_in(&self, zones: &[Zone], idx: InstanceId) -> Option<(Zone, usize)> {
        zones.iter().find_map(|&zone| {
            self.zone(zone)
                .iter()
                .position(|c| c.idx == idx)
                .map(|pos| (zone, pos))
        })
    }

    /// Look up a card instance anywhere in the store.
    #[must_use]
    pub fn card(&self, idx: InstanceId) -> Option<&Card> {
        let (zone, pos) = self.locate(idx)?;
        self.get(zone, pos)
    }

    /// Is this instance anywhere in the store?
    #[must_use]
    pub fn contains(&self, idx: InstanceId) -> bool {
        self.locate(idx).is_some()
    }

    /// Apply `f` to the card with `idx` if it is in one of `zones`.
    ///
    /// Returns whether the card was found.
    pub fn update_in<F>(&mut self, zones: &[Zone], idx: InstanceId, f: F) -> bool
    where
        F: FnOnce(&mut Card),
    {
        let Some((zone, pos)) = self.locate_in(zones, idx) else {
            return false;
        };
        match self.zone_mut(zone).get_mut(pos) {
            Some(card) => {
                f(card);
                true
            }
            None => false,
        }
    }

    /// Iterate over every card with its zone.
    pub fn iter(&self) -> impl Iterator<Item = (Zone, &Card)> + '_ {
        Zone::ALL
            .iter()
            .flat_map(move |&zone| self.zone(zone).iter().map(move |c| (zone, c)))
    }

    /// Empty every zone.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
