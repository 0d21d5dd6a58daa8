//! The two stores a session reasons about.
//!
//! A `Table` groups the local player's authoritative store with the local
//! best-known copy of the opponent's store. Rules operations take a
//! `&Table` and return a new one; neither store is ever reached through
//! ambient state.

use super::store::ZoneStore;
use super::zone::Zone;
use crate::cards::Card;
use crate::core::ids::InstanceId;
use crate::core::player::Side;

/// Where a card instance currently sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardRef {
    pub side: Side,
    pub zone: Zone,
    pub position: usize,
}

/// Which stores an operation modified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Touched {
    pub local: bool,
    pub mirror: bool,
}

impl Touched {
    /// Nothing touched.
    #[must_use]
    pub const fn none() -> Self {
        Self { local: false, mirror: false }
    }

    /// Record a modification of `side`.
    pub fn mark(&mut self, side: Side) {
        match side {
            Side::Local => self.local = true,
            Side::Mirror => self.mirror = true,
        }
    }

    /// Union of two records.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            local: self.local || other.local,
            mirror: self.mirror || other.mirror,
        }
    }

    /// Was anything touched?
    #[must_use]
    pub const fn any(self) -> bool {
        self.local || self.mirror
    }
}

/// Local store plus opponent mirror.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    /// Authoritative store of the local player.
    pub local: ZoneStore,
    /// Best-known copy of the opponent's store.
    pub mirror: ZoneStore,
}

impl Table {
    /// Create a table from two stores.
    #[must_use]
    pub fn new(local: ZoneStore, mirror: ZoneStore) -> Self {
        Self { local, mirror }
    }

    /// One of the two stores.
    #[must_use]
    pub fn side(&self, side: Side) -> &ZoneStore {
        match side {
            Side::Local => &self.local,
            Side::Mirror => &self.mirror,
        }
    }

    /// Mutable access to one of the two stores.
    pub fn side_mut(&mut self, side: Side) -> &mut ZoneStore {
        match side {
            Side::Local => &mut self.local,
            Side::Mirror => &mut self.mirror,
        }
    }

    /// Find an instance in the given zones, local store first.
    #[must_use]
    pub fn locate_in(&self, zones: &[Zone], idx: InstanceId) -> Option<CardRef> {
        [Side::Local, Side::Mirror].into_iter().find_map(|side| {
            self.side(side)
                .locate_in(zones, idx)
                .map(|(zone, position)| CardRef { side, zone, position })
        })
    }

    /// Find an instance anywhere on the table.
    #[must_use]
    pub fn locate(&self, idx: InstanceId) -> Option<CardRef> {
        self.locate_in(&Zone::ALL, idx)
    }

    /// The card a reference points at.
    #[must_use]
    pub fn get(&self, at: CardRef) -> Option<&Card> {
        self.side(at.side).get(at.zone, at.position)
    }

    /// Apply `f` to the instance if it is in one of `zones` on either side.
    pub fn update_in<F>(&mut self, zones: &[Zone], idx: InstanceId, f: F) -> bool
    where
        F: FnOnce(&mut Card),
    {
        match self.locate_in(zones, idx) {
            Some(at) => self.side_mut(at.side).update_in(&[at.zone], idx, f),
            None => false,
        }
    }

    /// Iterate over every card on the table with its side and zone.
    pub fn iter(&self) -> impl Iterator<Item = (Side, Zone, &Card)> + '_ {
        self.local
            .iter()
            .map(|(z, c)| (Side::Local, z, c))
            .chain(self.mirror.iter().map(|(z, c)| (Side::Mirror, z, c)))
    }
}
