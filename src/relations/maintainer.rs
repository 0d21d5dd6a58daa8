//! Relation maintainer.
//!
//! All functions work on a `Table` so a link can span the local store and
//! the mirror (a player may arm an opposing ally). Each returns which
//! stores it modified so the caller knows whether the mirror must be
//! broadcast.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::cards::{Arms, Card};
use crate::core::error::RulesError;
use crate::core::ids::InstanceId;
use crate::core::player::Side;
use crate::zones::{Table, Touched, Zone};

/// Attach `weapon` (in Support) to `bearer` (in Defense or Attack).
///
/// Either card may be on either side. A weapon already carried by another
/// bearer is taken off it first.
pub fn attach(table: &mut Table, weapon: InstanceId, bearer: InstanceId) -> Result<Touched, RulesError> {
    let weapon_at = table
        .locate_in(&[Zone::Support], weapon)
        .ok_or(RulesError::NotAWeapon(weapon))?;
    let bearer_at = table
        .locate_in(&Zone::BEARER_ZONES, bearer)
        .ok_or(RulesError::NotABearer(bearer))?;

    let mut touched = Touched::none();

    let previous = table.get(weapon_at).and_then(|c| c.bearer);
    if let Some(old) = previous.filter(|&old| old != bearer) {
        if let Some(old_at) = table.locate_in(&Zone::BEARER_ZONES, old) {
            table.side_mut(old_at.side).update_in(&[old_at.zone], old, |c| {
                c.remove_arm(weapon);
            });
            touched.mark(old_at.side);
        }
    }

    table
        .side_mut(weapon_at.side)
        .update_in(&[weapon_at.zone], weapon, |c| c.bearer = Some(bearer));
    touched.mark(weapon_at.side);

    table
        .side_mut(bearer_at.side)
        .update_in(&[bearer_at.zone], bearer, |c| c.add_arm(weapon));
    touched.mark(bearer_at.side);

    debug!(weapon = weapon.0, bearer = bearer.0, "weapon attached");
    Ok(touched)
}

/// Clear every relation `card` takes part in.
///
/// `card` is held by value (it may already be off the table); its
/// counterparts are edited where they stand.
pub fn detach_card(table: &mut Table, card: &mut Card) -> Touched {
    let idx = card.idx;
    let mut touched = Touched::none();

    for weapon in std::mem::take(&mut card.arms) {
        if let Some(at) = table.locate(weapon) {
            let mut changed = false;
            table.side_mut(at.side).update_in(&[at.zone], weapon, |c| {
                if c.bearer == Some(idx) {
                    c.bearer = None;
                    changed = true;
                }
            });
            if changed {
                touched.mark(at.side);
            }
        }
    }

    if let Some(bearer) = card.bearer.take() {
        if let Some(at) = table.locate(bearer) {
            let mut changed = false;
            table.side_mut(at.side).update_in(&[at.zone], bearer, |c| {
                changed = c.remove_arm(idx);
            });
            if changed {
                touched.mark(at.side);
            }
        }
    }

    touched
}

/// Clear every relation of the card with `idx`, wherever it is.
///
/// Idempotent: a card without relations, or one not on the table, is left
/// alone and nothing is reported touched.
pub fn detach_all(table: &mut Table, idx: InstanceId) -> Touched {
    let Some(at) = table.locate(idx) else {
        return Touched::none();
    };
    let Some(mut card) = table.get(at).cloned() else {
        return Touched::none();
    };
    if !card.has_relations() {
        return Touched::none();
    }

    let mut touched = detach_card(table, &mut card);
    table
        .side_mut(at.side)
        .update_in(&[at.zone], idx, Card::clear_relations);
    touched.mark(at.side);
    touched
}

/// Detach an in-flight weapon from its bearer.
///
/// The bearer is looked up in Defense/Attack of whichever store holds it.
pub fn unlink_weapon(table: &mut Table, weapon: &mut Card) -> Touched {
    let mut touched = Touched::none();
    let Some(bearer) = weapon.bearer.take() else {
        return touched;
    };

    if let Some(at) = table.locate_in(&Zone::BEARER_ZONES, bearer) {
        let mut changed = false;
        table.side_mut(at.side).update_in(&[at.zone], bearer, |c| {
            changed = c.remove_arm(weapon.idx);
        });
        if changed {
            touched.mark(at.side);
        }
    }
    touched
}

/// Take an in-flight bearer's weapons off the table.
///
/// Each weapon still pointing back at the bearer is removed from the
/// Support zone that holds it, with its `bearer` cleared, and handed back
/// with the side it was taken from. The bearer's `arms` end up empty.
pub fn unlink_bearer(table: &mut Table, bearer: &mut Card) -> (Vec<(Side, Card)>, Touched) {
    let idx = bearer.idx;
    let mut released = Vec::new();
    let mut touched = Touched::none();

    for weapon in std::mem::take(&mut bearer.arms) {
        let Some(at) = table.locate_in(&[Zone::Support], weapon) else {
            continue;
        };
        if table.get(at).map_or(true, |c| c.bearer != Some(idx)) {
            continue;
        }
        if let Some(mut card) = table.side_mut(at.side).remove_at(at.zone, at.position) {
            card.bearer = None;
            touched.mark(at.side);
            released.push((at.side, card));
        }
    }

    (released, touched)
}

/// Restore bearer/weapon duality across the table.
///
/// - a weapon's `bearer` must name a card standing in Defense/Attack
/// - a bearer's `arms` must list exactly the Support cards naming it
/// - cards outside those zones carry no relation fields
///
/// The weapon side is authoritative: it is single-valued, so a bearer
/// missing a weapon that names it gets it added. Returns the number of
/// cards rewritten.
pub fn repair(table: &mut Table) -> usize {
    let bearers: FxHashSet<InstanceId> = table
        .iter()
        .filter(|(_, zone, _)| zone.holds_bearers())
        .map(|(_, _, c)| c.idx)
        .collect();

    let mut links: FxHashMap<InstanceId, InstanceId> = FxHashMap::default();
    let mut arms_of: FxHashMap<InstanceId, Vec<InstanceId>> = FxHashMap::default();
    for (_, zone, card) in table.iter() {
        if !zone.holds_weapons() {
            continue;
        }
        if let Some(bearer) = card.bearer.filter(|b| bearers.contains(b)) {
            links.insert(card.idx, bearer);
            arms_of.entry(bearer).or_default().push(card.idx);
        }
    }

    let mut repaired = 0;
    for side in [Side::Local, Side::Mirror] {
        let store = table.side_mut(side);
        for zone in Zone::ALL {
            for pos in 0..store.len(zone) {
                let (arms, bearer) = match store.get(zone, pos) {
                    Some(card) => {
                        let expected = expected_relations(card, zone, &links, &arms_of);
                        if card.arms == expected.0 && card.bearer == expected.1 {
                            continue;
                        }
                        expected
                    }
                    None => continue,
                };
                if let Some(card) = store.zone_mut(zone).get_mut(pos) {
                    card.arms = arms;
                    card.bearer = bearer;
                    repaired += 1;
                }
            }
        }
    }

    if repaired > 0 {
        debug!(repaired, "repaired bearer/weapon links");
    }
    repaired
}

fn expected_relations(
    card: &Card,
    zone: Zone,
    links: &FxHashMap<InstanceId, InstanceId>,
    arms_of: &FxHashMap<InstanceId, Vec<InstanceId>>,
) -> (Arms, Option<InstanceId>) {
    let bearer = if zone.holds_weapons() {
        links.get(&card.idx).copied()
    } else {
        None
    };

    let mut arms = Arms::new();
    if zone.holds_bearers() {
        let wanted = arms_of.get(&card.idx).map_or(&[][..], Vec::as_slice);
        // Keep the existing order, then append links only the weapon knew about
        for w in card.arms.iter().chain(wanted.iter()) {
            if wanted.contains(w) && !arms.contains(w) {
                arms.push(*w);
            }
        }
    }

    (arms, bearer)
}
