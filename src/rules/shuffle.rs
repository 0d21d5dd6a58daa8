//! Shuffle engine.
//!
//! Uniform Fisher-Yates permutation through `GameRng`. Only the Castle is
//! shuffled by the rules, after something is put into it; each store's
//! Castle is shuffled by its own draw from the RNG, so two decks touched by
//! the same move end up uncorrelated.

use im::Vector;

use crate::core::error::RulesError;
use crate::core::rng::GameRng;
use crate::zones::{Zone, ZoneStore};

/// Random permutation of `seq`.
#[must_use]
pub fn shuffled<T: Clone>(seq: &Vector<T>, rng: &mut GameRng) -> Vector<T> {
    rng.shuffled(seq)
}

/// Random permutation of `seq` from a one-off RNG.
///
/// With a seed the permutation is reproducible; without one it is seeded
/// from OS entropy.
#[must_use]
pub fn shuffled_seeded<T: Clone>(seq: &Vector<T>, seed: Option<u64>) -> Vector<T> {
    GameRng::from_seed_opt(seed).shuffled(seq)
}

/// Shuffle one zone of a store.
///
/// An empty zone is reported as `EmptySource` and the store is unchanged.
pub fn shuffle_zone(store: &ZoneStore, zone: Zone, rng: &mut GameRng) -> Result<ZoneStore, RulesError> {
    if store.is_empty(zone) {
        return Err(RulesError::EmptySource(zone));
    }
    let mut next = store.clone();
    next.set_zone(zone, rng.shuffled(store.zone(zone)));
    Ok(next)
}
