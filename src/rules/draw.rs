//! Draw engine.
//!
//! Moves cards from the front of a source zone to the end of a
//! destination zone of the same store. Drawing (Castle to Hand) and
//! throwing (Castle to Cemetery) are both this operation.

use crate::core::error::RulesError;
use crate::zones::{Zone, ZoneStore};

/// Result of a draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Drawn {
    /// The store after the draw.
    pub store: ZoneStore,
    /// Cards actually moved (may be fewer than asked for).
    pub count: usize,
}

/// Move up to `n` cards from the front of `source` to the end of `dest`.
///
/// - empty `source`: `EmptySource`, nothing changes
/// - `n` above what `source` holds: clamps to the available count
/// - relative order is preserved on both sides
pub fn draw(store: &ZoneStore, n: usize, source: Zone, dest: Zone) -> Result<Drawn, RulesError> {
    if source == dest {
        return Err(RulesError::SameZone(dest));
    }
    if store.is_empty(source) {
        return Err(RulesError::EmptySource(source));
    }

    let mut next = store.clone();
    let taken = next.take_front(source, n);
    let count = taken.len();
    next.zone_mut(dest).append(taken);

    Ok(Drawn { store: next, count })
}
