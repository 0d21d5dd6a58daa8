//! Card mover.
//!
//! Relocates one card of the local store to another zone. When the
//! destination takes the card out of play (Castle, Cemetery, Exile,
//! Removal, Hand) its relations are torn down first:
//!
//! - a bearer drops its weapons, and each weapon follows it to the same
//!   destination zone in the store of the weapon's owner
//! - a weapon is taken off its bearer, wherever that bearer stands
//!
//! Cards leaving play land in their owner's store; cards staying in play
//! stay with the acting player. A Castle that receives anything is
//! shuffled afterwards.

use tracing::trace;

use super::audit::AuditEvent;
use super::outcome::Outcome;
use crate::core::error::RulesError;
use crate::core::player::{Identities, Side};
use crate::core::rng::GameRng;
use crate::relations;
use crate::zones::{Table, Zone};

/// A relocation gesture: the card at `position` of `from` on `side`,
/// dropped on `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRequest {
    pub side: Side,
    pub from: Zone,
    pub position: usize,
    pub to: Zone,
}

impl MoveRequest {
    /// Move a card of the local store.
    #[must_use]
    pub const fn local(from: Zone, position: usize, to: Zone) -> Self {
        Self {
            side: Side::Local,
            from,
            position,
            to,
        }
    }
}

/// Relocate a card.
///
/// Rejections, all leaving the table untouched:
/// - `AuthorityViolation`: the card is on the mirror side (use take-control)
/// - `SameZone`: `from == to`
/// - `StaleReference`: nothing at `position` any more
pub fn move_card(
    table: &Table,
    ids: &Identities,
    request: MoveRequest,
    rng: &mut GameRng,
) -> Result<Outcome, RulesError> {
    let MoveRequest { side, from, position, to } = request;

    if side == Side::Mirror {
        return Err(RulesError::AuthorityViolation(from));
    }
    if from == to {
        return Err(RulesError::SameZone(to));
    }

    let mut next = table.clone();
    let mut card = next
        .local
        .remove_at(from, position)
        .ok_or(RulesError::StaleReference { zone: from, position })?;

    let mut audit = Vec::new();
    let mut castle_sides = Vec::new();

    if to.leaves_play() {
        let (released, _) = relations::unlink_bearer(&mut next, &mut card);
        for (_, weapon) in released {
            let dest = ids.side_of(weapon.owner);
            trace!(weapon = weapon.idx.0, ?dest, "weapon follows its bearer");
            audit.push(AuditEvent::moved(&weapon.name, Zone::Support, to, dest == Side::Mirror));
            next.side_mut(dest).push(to, weapon);
            castle_sides.push(dest);
        }
        relations::unlink_weapon(&mut next, &mut card);
    }

    let dest = if to.leaves_play() {
        ids.side_of(card.owner)
    } else {
        Side::Local
    };
    audit.push(AuditEvent::moved(&card.name, from, to, dest == Side::Mirror));
    next.side_mut(dest).push(to, card);
    castle_sides.push(dest);

    if to == Zone::Castle {
        for side in [Side::Local, Side::Mirror] {
            if !castle_sides.contains(&side) {
                continue;
            }
            let store = next.side_mut(side);
            // The opponent's deck gets its own stream
            let deck = match side {
                Side::Local => rng.shuffled(store.zone(Zone::Castle)),
                Side::Mirror => rng.fork().shuffled(store.zone(Zone::Castle)),
            };
            store.set_zone(Zone::Castle, deck);
        }
    }

    relations::repair(&mut next);
    Ok(Outcome::diffed(table, next, audit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;
    use crate::core::ids::InstanceId;
    use crate::core::player::PlayerId;
    use crate::zones::ZoneStore;

    fn ids() -> Identities {
        Identities::new(PlayerId::random(), PlayerId::random())
    }

    fn card(idx: u32, owner: PlayerId) -> Card {
        Card::new(format!("cat{}", idx), InstanceId(idx), owner, format!("Card {}", idx))
    }

    fn idxs(store: &ZoneStore, zone: Zone) -> Vec<u32> {
        store.zone(zone).iter().map(|c| c.idx.0).collect()
    }

    #[test]
    fn test_plain_move() {
        let ids = ids();
        let mut table = Table::default();
        table.local.push(Zone::Hand, card(1, ids.local));
        let mut rng = GameRng::new(1);

        let out = move_card(&table, &ids, MoveRequest::local(Zone::Hand, 0, Zone::Defense), &mut rng).unwrap();

        assert_eq!(idxs(&out.table.local, Zone::Defense), vec![1]);
        assert!(out.table.local.is_empty(Zone::Hand));
        assert!(out.touched.local);
        assert!(!out.mirror_changed());
        assert_eq!(out.audit.len(), 1);
        // Input snapshot untouched
        assert_eq!(table.local.len(Zone::Hand), 1);
    }

    #[test]
    fn test_rejections() {
        let ids = ids();
        let mut table = Table::default();
        table.local.push(Zone::Hand, card(1, ids.local));
        table.mirror.push(Zone::Defense, card(2, ids.remote));
        let mut rng = GameRng::new(1);

        assert_eq!(
            move_card(&table, &ids, MoveRequest::local(Zone::Hand, 0, Zone::Hand), &mut rng).unwrap_err(),
            RulesError::SameZone(Zone::Hand)
        );
        assert_eq!(
            move_card(&table, &ids, MoveRequest::local(Zone::Hand, 4, Zone::Exile), &mut rng).unwrap_err(),
            RulesError::StaleReference { zone: Zone::Hand, position: 4 }
        );
        let foreign = MoveRequest {
            side: Side::Mirror,
            from: Zone::Defense,
            position: 0,
            to: Zone::Cemetery,
        };
        assert_eq!(
            move_card(&table, &ids, foreign, &mut rng).unwrap_err(),
            RulesError::AuthorityViolation(Zone::Defense)
        );
    }

    #[test]
    fn test_bearer_to_cemetery_takes_weapon_along() {
        let ids = ids();
        let mut table = Table::default();
        table.local.push(Zone::Defense, card(1, ids.local));
        table.local.push(Zone::Support, card(2, ids.local));
        relations::attach(&mut table, InstanceId(2), InstanceId(1)).unwrap();
        let mut rng = GameRng::new(1);

        let out = move_card(&table, &ids, MoveRequest::local(Zone::Defense, 0, Zone::Cemetery), &mut rng).unwrap();
        let local = &out.table.local;

        assert!(local.is_empty(Zone::Defense));
        assert!(local.is_empty(Zone::Support));
        assert_eq!(idxs(local, Zone::Cemetery), vec![2, 1]);
        assert!(local.zone(Zone::Cemetery).iter().all(|c| !c.has_relations()));
        assert_eq!(out.audit.len(), 2);
    }

    #[test]
    fn test_foreign_weapon_returns_to_its_owner() {
        let ids = ids();
        let mut table = Table::default();
        table.local.push(Zone::Attack, card(1, ids.local));
        // Opponent's weapon lent to our ally, sitting in our Support
        table.local.push(Zone::Support, card(2, ids.remote));
        relations::attach(&mut table, InstanceId(2), InstanceId(1)).unwrap();
        let mut rng = GameRng::new(1);

        let out = move_card(&table, &ids, MoveRequest::local(Zone::Attack, 0, Zone::Exile), &mut rng).unwrap();

        assert_eq!(idxs(&out.table.local, Zone::Exile), vec![1]);
        assert_eq!(idxs(&out.table.mirror, Zone::Exile), vec![2]);
        assert!(out.mirror_changed());
        assert!(out.audit[0].text.ends_with("(opponent)"));
    }

    #[test]
    fn test_weapon_leaving_play_frees_bearer_in_mirror() {
        let ids = ids();
        let mut table = Table::default();
        table.mirror.push(Zone::Defense, card(1, ids.remote));
        table.local.push(Zone::Support, card(2, ids.local));
        relations::attach(&mut table, InstanceId(2), InstanceId(1)).unwrap();
        let mut rng = GameRng::new(1);

        let out = move_card(&table, &ids, MoveRequest::local(Zone::Support, 0, Zone::Hand), &mut rng).unwrap();

        assert_eq!(idxs(&out.table.local, Zone::Hand), vec![2]);
        assert!(!out.table.mirror.card(InstanceId(1)).unwrap().is_bearer());
        assert!(out.mirror_changed());
    }

    #[test]
    fn test_controlled_card_stays_local_in_play() {
        let ids = ids();
        let mut table = Table::default();
        table.local.push(Zone::Defense, card(1, ids.remote));
        let mut rng = GameRng::new(1);

        let out = move_card(&table, &ids, MoveRequest::local(Zone::Defense, 0, Zone::Attack), &mut rng).unwrap();
        assert_eq!(idxs(&out.table.local, Zone::Attack), vec![1]);
        assert!(!out.mirror_changed());

        let out = move_card(&out.table, &ids, MoveRequest::local(Zone::Attack, 0, Zone::Cemetery), &mut rng).unwrap();
        assert_eq!(idxs(&out.table.mirror, Zone::Cemetery), vec![1]);
        assert!(out.table.local.is_empty(Zone::Cemetery));
    }

    #[test]
    fn test_move_into_castle_shuffles() {
        let ids = ids();
        let mut table = Table::default();
        for i in 0..12 {
            table.local.push(Zone::Castle, card(i, ids.local));
        }
        table.local.push(Zone::Hand, card(99, ids.local));
        let mut rng = GameRng::new(7);

        let out = move_card(&table, &ids, MoveRequest::local(Zone::Hand, 0, Zone::Castle), &mut rng).unwrap();

        let mut after = idxs(&out.table.local, Zone::Castle);
        let mut expected: Vec<u32> = (0..12).collect();
        expected.push(99);
        assert_ne!(after, expected);
        after.sort_unstable();
        expected.sort_unstable();
        assert_eq!(after, expected);
        assert!(out.audit[0].text.starts_with("Moving and shuffling"));
    }

    #[test]
    fn test_bearer_with_lent_weapon_into_castle_shuffles_both_decks() {
        let ids = ids();
        let mut table = Table::default();
        for i in 0..12 {
            table.local.push(Zone::Castle, card(i, ids.local));
            table.mirror.push(Zone::Castle, card(100 + i, ids.remote));
        }
        table.local.push(Zone::Defense, card(50, ids.local));
        table.local.push(Zone::Support, card(150, ids.remote));
        relations::attach(&mut table, InstanceId(150), InstanceId(50)).unwrap();
        let mut rng = GameRng::new(21);

        let out = move_card(&table, &ids, MoveRequest::local(Zone::Defense, 0, Zone::Castle), &mut rng).unwrap();

        let mut local: Vec<u32> = (0..12).collect();
        local.push(50);
        let mut mirror: Vec<u32> = (100..112).collect();
        mirror.push(150);
        let mut local_after = idxs(&out.table.local, Zone::Castle);
        let mut mirror_after = idxs(&out.table.mirror, Zone::Castle);
        assert_ne!(mirror_after, mirror);
        local_after.sort_unstable();
        mirror_after.sort_unstable();
        assert_eq!(local_after, local);
        assert_eq!(mirror_after, mirror);

        assert!(out.table.local.is_empty(Zone::Defense));
        assert!(out.table.local.is_empty(Zone::Support));
        assert!(out.table.iter().all(|(_, _, c)| !c.has_relations()));
        assert!(out.mirror_changed());
        assert_eq!(out.audit.len(), 2);
        assert!(out.audit[0].text.starts_with("Moving and shuffling"));
        assert!(out.audit[0].text.ends_with(" (opponent)"));
        assert!(!out.audit[1].text.ends_with(" (opponent)"));
    }

    #[test]
    fn test_moving_weapon_out_of_support_in_play_drops_link() {
        let ids = ids();
        let mut table = Table::default();
        table.local.push(Zone::Defense, card(1, ids.local));
        table.local.push(Zone::Support, card(2, ids.local));
        relations::attach(&mut table, InstanceId(2), InstanceId(1)).unwrap();
        let mut rng = GameRng::new(1);

        let out = move_card(&table, &ids, MoveRequest::local(Zone::Support, 0, Zone::Auxiliary), &mut rng).unwrap();

        assert!(!out.table.local.card(InstanceId(1)).unwrap().is_bearer());
        assert!(!out.table.local.card(InstanceId(2)).unwrap().is_weapon());
    }

    #[test]
    fn test_bearer_moving_between_lanes_keeps_weapons() {
        let ids = ids();
        let mut table = Table::default();
        table.local.push(Zone::Defense, card(1, ids.local));
        table.local.push(Zone::Support, card(2, ids.local));
        relations::attach(&mut table, InstanceId(2), InstanceId(1)).unwrap();
        let mut rng = GameRng::new(1);

        let out = move_card(&table, &ids, MoveRequest::local(Zone::Defense, 0, Zone::Attack), &mut rng).unwrap();

        assert!(out.table.local.card(InstanceId(1)).unwrap().carries(InstanceId(2)));
        assert_eq!(out.table.local.card(InstanceId(2)).unwrap().bearer, Some(InstanceId(1)));
    }
}
