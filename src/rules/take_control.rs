//! Take-control protocol.
//!
//! The local player claims a card listed in the opponent mirror: it leaves
//! the mirror, lands in the same zone of the local store, and its owner
//! becomes the local player. Any bearer/weapon link it had is cut on both
//! stores, since the link may have crossed the boundary before the claim.
//!
//! The mirror always changes, so the caller must always broadcast it.

use tracing::trace;

use super::audit::AuditEvent;
use super::outcome::Outcome;
use crate::core::error::RulesError;
use crate::core::player::Identities;
use crate::relations;
use crate::zones::{Table, Zone};

/// Claim the card at `position` of the mirror's `zone`.
///
/// Any card there is claimable whatever its current owner. An empty slot is
/// a `StaleReference`.
pub fn take_control(table: &Table, ids: &Identities, zone: Zone, position: usize) -> Result<Outcome, RulesError> {
    let mut next = table.clone();
    let mut card = next
        .mirror
        .remove_at(zone, position)
        .ok_or(RulesError::StaleReference { zone, position })?;

    let cut = relations::detach_card(&mut next, &mut card);
    trace!(idx = card.idx.0, ?cut, "claimed card detached");

    card.owner = ids.local;
    let audit = vec![AuditEvent::took_control(&card.name, zone)];
    next.local.push(zone, card);

    relations::repair(&mut next);
    Ok(Outcome::diffed(table, next, audit))
}
