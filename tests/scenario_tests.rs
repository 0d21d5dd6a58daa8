//! Table rules integration tests.
//!
//! Each test drives the rules functions directly against a hand-built
//! table, the way a session would.

use castle_duel::core::{GameRng, Identities, InstanceAllocator, InstanceId, PlayerId, RulesError};
use castle_duel::rules::{draw, move_card, take_control, MoveRequest};
use castle_duel::zones::{Table, Zone, ZoneStore};
use castle_duel::{relations, Card};
use pretty_assertions::assert_eq;

fn ids() -> Identities {
    Identities::new(PlayerId::random(), PlayerId::random())
}

fn card(idx: u32, owner: PlayerId, name: &str) -> Card {
    Card::new(name.to_lowercase(), InstanceId(idx), owner, name)
}

fn idxs(store: &ZoneStore, zone: Zone) -> Vec<u32> {
    store.zone(zone).iter().map(|c| c.idx.0).collect()
}

/// A bearer sent to the Cemetery takes its weapon along.
#[test]
fn test_bearer_to_cemetery() {
    let ids = ids();
    let mut table = Table::default();
    table.local.push(Zone::Defense, card(1, ids.local, "Knight"));
    table.local.push(Zone::Support, card(2, ids.local, "Sword"));
    relations::attach(&mut table, InstanceId(2), InstanceId(1)).unwrap();
    let mut rng = GameRng::new(11);

    let out = move_card(&table, &ids, MoveRequest::local(Zone::Defense, 0, Zone::Cemetery), &mut rng).unwrap();
    let local = &out.table.local;

    assert!(local.is_empty(Zone::Defense));
    assert!(local.is_empty(Zone::Support));
    let mut cemetery = idxs(local, Zone::Cemetery);
    cemetery.sort_unstable();
    assert_eq!(cemetery, vec![1, 2]);
    assert_eq!(local.card(InstanceId(2)).unwrap().bearer, None);
    assert!(local.card(InstanceId(1)).unwrap().arms.is_empty());
    assert!(!out.mirror_changed());
}

/// Drawing three of ten takes the front three in order.
#[test]
fn test_draw_three() {
    let owner = PlayerId::random();
    let mut alloc = InstanceAllocator::new();
    let mut store = ZoneStore::new();
    for i in 0..10 {
        store.push(Zone::Castle, Card::new("c", alloc.next_id().unwrap(), owner, format!("Card {}", i)));
    }
    let before = idxs(&store, Zone::Castle);

    let drawn = draw(&store, 3, Zone::Castle, Zone::Hand).unwrap();

    assert_eq!(idxs(&drawn.store, Zone::Hand), before[..3].to_vec());
    assert_eq!(idxs(&drawn.store, Zone::Castle), before[3..].to_vec());
}

/// Drawing from an empty Castle changes nothing.
#[test]
fn test_draw_from_empty_castle() {
    let store = ZoneStore::new();
    assert_eq!(
        draw(&store, 1, Zone::Castle, Zone::Hand),
        Err(RulesError::EmptySource(Zone::Castle))
    );
}

/// Claiming an opponent weapon cuts its link to the opponent's bearer.
#[test]
fn test_take_control_of_armed_weapon() {
    let ids = ids();
    let mut table = Table::default();
    table.mirror.push(Zone::Defense, card(10, ids.remote, "Orc"));
    table.mirror.push(Zone::Support, card(11, ids.remote, "Club"));
    relations::attach(&mut table, InstanceId(11), InstanceId(10)).unwrap();

    let out = take_control(&table, &ids, Zone::Support, 0).unwrap();

    assert!(out.table.mirror.is_empty(Zone::Support));
    assert_eq!(idxs(&out.table.local, Zone::Support), vec![11]);
    let claimed = out.table.local.card(InstanceId(11)).unwrap();
    assert_eq!(claimed.owner, ids.local);
    assert_eq!(claimed.bearer, None);
    assert!(!out.table.mirror.card(InstanceId(10)).unwrap().carries(InstanceId(11)));
    assert!(out.mirror_changed());
}

/// Whatever goes into the Castle, the Castle stays a permutation of its cards.
#[test]
fn test_castle_insert_is_permutation() {
    let ids = ids();
    let mut rng = GameRng::new(99);
    for from in [Zone::Hand, Zone::Defense, Zone::Cemetery, Zone::Auxiliary] {
        let mut table = Table::default();
        for i in 0..8 {
            table.local.push(Zone::Castle, card(i, ids.local, "Deck"));
        }
        table.local.push(from, card(50, ids.local, "X"));

        let out = move_card(&table, &ids, MoveRequest::local(from, 0, Zone::Castle), &mut rng).unwrap();

        let mut castle = idxs(&out.table.local, Zone::Castle);
        castle.sort_unstable();
        let mut expected: Vec<u32> = (0..8).collect();
        expected.push(50);
        assert_eq!(castle, expected);
        assert!(out.table.local.is_empty(from));
    }
}

/// A to B and back to A leaves the card in A.
#[test]
fn test_round_trip_returns_card() {
    let ids = ids();
    let mut rng = GameRng::new(5);
    let origins = [Zone::Hand, Zone::Defense, Zone::Attack, Zone::Support, Zone::GoldsPaid];
    let targets = [Zone::Cemetery, Zone::Exile, Zone::Removal, Zone::Auxiliary, Zone::UnpaidGold];

    for from in origins {
        for to in targets {
            let mut table = Table::default();
            table.local.push(from, card(1, ids.local, "A"));
            table.local.push(from, card(2, ids.local, "B"));

            let there = move_card(&table, &ids, MoveRequest::local(from, 0, to), &mut rng).unwrap();
            let back_pos = there.table.local.len(to) - 1;
            let back = move_card(&there.table, &ids, MoveRequest::local(to, back_pos, from), &mut rng).unwrap();

            let mut ids_in_from = idxs(&back.table.local, from);
            ids_in_from.sort_unstable();
            assert_eq!(ids_in_from, vec![1, 2], "{} -> {} -> {}", from, to, from);
        }
    }
}

/// A controlled card leaving play goes back to its owner's pile.
#[test]
fn test_controlled_card_returns_to_owner_pile() {
    let ids = ids();
    let mut table = Table::default();
    table.local.push(Zone::Attack, card(7, ids.remote, "Borrowed"));
    let mut rng = GameRng::new(1);

    let out = move_card(&table, &ids, MoveRequest::local(Zone::Attack, 0, Zone::Hand), &mut rng).unwrap();

    assert!(out.table.local.is_empty(Zone::Hand));
    assert_eq!(idxs(&out.table.mirror, Zone::Hand), vec![7]);
    assert_eq!(out.table.mirror.card(InstanceId(7)).unwrap().owner, ids.remote);
    assert_eq!(out.audit[0].text, "Moving \"Borrowed\" from \"Attack\" to \"Hand\" (opponent)");
}
