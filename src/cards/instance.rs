//! Card instances - runtime card state.
//!
//! `Card` represents one physical card in a match. It is a plain value:
//! stores hold cards by value and replace them on update.
//!
//! ## Ownership vs location
//!
//! `owner` says who decides the card's fate, not which store currently
//! holds it. A weapon lent to an opposing ally can sit in one store while
//! being owned by the other player. Relocation routes on `owner`.
//!
//! ## Relations
//!
//! - `arms` is non-empty only on a bearer (an ally in Defense/Attack).
//! - `bearer` is set only on a weapon (a card in Support).
//!
//! Both sides of a link are maintained by `relations`; never edit one side
//! without the other outside that module.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::ids::{CardId, InstanceId};
use crate::core::player::PlayerId;

/// Weapon instance IDs attached to a bearer.
/// SmallVec keeps the common case (0-2 weapons) off the heap.
pub type Arms = SmallVec<[InstanceId; 2]>;

fn is_false(flag: &bool) -> bool {
    !*flag
}

fn no_arms(arms: &Arms) -> bool {
    arms.is_empty()
}

/// A card instance on the table.
///
/// Serialized with the wire field names of the broadcast payload
/// (`idx`, `armsId`, `bearerId`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Catalog identity. Repeats across copies.
    pub id: CardId,

    /// Instance identity, unique within the match.
    pub idx: InstanceId,

    /// Player who controls this card's fate.
    pub owner: PlayerId,

    /// Display name.
    pub name: String,

    /// Image URL.
    #[serde(default)]
    pub image: String,

    /// Attached weapons (bearer side of the relation).
    #[serde(rename = "armsId", default, skip_serializing_if = "no_arms")]
    pub arms: Arms,

    /// Carrying ally (weapon side of the relation).
    #[serde(rename = "bearerId", default, skip_serializing_if = "Option::is_none")]
    pub bearer: Option<InstanceId>,

    /// Transient highlight, UI only.
    #[serde(default, skip_serializing_if = "is_false")]
    pub vibrate: bool,
}

impl Card {
    /// Create a card with no relations.
    pub fn new(id: impl Into<String>, idx: InstanceId, owner: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id: CardId::new(id),
            idx,
            owner,
            name: name.into(),
            image: String::new(),
            arms: Arms::new(),
            bearer: None,
            vibrate: false,
        }
    }

    /// Set the image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Does this card carry at least one weapon?
    #[must_use]
    pub fn is_bearer(&self) -> bool {
        !self.arms.is_empty()
    }

    /// Is this card attached to a bearer?
    #[must_use]
    pub fn is_weapon(&self) -> bool {
        self.bearer.is_some()
    }

    /// Does this card take part in any relation?
    #[must_use]
    pub fn has_relations(&self) -> bool {
        self.is_bearer() || self.is_weapon()
    }

    /// Does this bearer carry `weapon`?
    #[must_use]
    pub fn carries(&self, weapon: InstanceId) -> bool {
        self.arms.contains(&weapon)
    }

    /// Add a weapon to this bearer's arms (no duplicates).
    pub(crate) fn add_arm(&mut self, weapon: InstanceId) {
        if !self.carries(weapon) {
            self.arms.push(weapon);
        }
    }

    /// Remove a weapon from this bearer's arms. Returns whether it was present.
    pub(crate) fn remove_arm(&mut self, weapon: InstanceId) -> bool {
        let before = self.arms.len();
        self.arms.retain(|w| *w != weapon);
        self.arms.len() != before
    }

    /// Drop both relation fields on this card only.
    pub(crate) fn clear_relations(&mut self) {
        self.arms.clear();
        self.bearer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(idx: u32) -> Card {
        Card::new("61a0", InstanceId(idx), PlayerId::random(), "Ally")
    }

    #[test]
    fn test_new_card_has_no_relations() {
        let c = card(1);
        assert!(!c.is_bearer());
        assert!(!c.is_weapon());
        assert!(!c.has_relations());
        assert!(!c.vibrate);
    }

    #[test]
    fn test_arms_no_duplicates() {
        let mut c = card(1);
        c.add_arm(InstanceId(5));
        c.add_arm(InstanceId(5));
        c.add_arm(InstanceId(6));

        assert_eq!(c.arms.as_slice(), &[InstanceId(5), InstanceId(6)]);
        assert!(c.remove_arm(InstanceId(5)));
        assert!(!c.remove_arm(InstanceId(5)));
        assert!(c.carries(InstanceId(6)));
    }

    #[test]
    fn test_wire_field_names() {
        let mut c = card(3);
        c.add_arm(InstanceId(9));
        let json = serde_json::to_value(&c).unwrap();

        assert_eq!(json["idx"], 3);
        assert_eq!(json["armsId"], serde_json::json!([9]));
        assert!(json.get("bearerId").is_none());
        assert!(json.get("vibrate").is_none());
    }

    #[test]
    fn test_missing_optional_fields_deserialize() {
        let owner = PlayerId::random();
        let json = serde_json::json!({
            "id": "abc",
            "idx": 4,
            "owner": owner,
            "name": "Sword",
            "bearerId": 1
        });

        let c: Card = serde_json::from_value(json).unwrap();
        assert_eq!(c.bearer, Some(InstanceId(1)));
        assert!(c.arms.is_empty());
        assert_eq!(c.image, "");
    }
}
