//! Card and match identification.
//!
//! Two identities coexist on every card:
//! - `CardId`: the catalog identity. Several instances may share it
//!   (three copies of the same ally in one deck).
//! - `InstanceId`: the per-session instance identity (`idx`). Unique within a
//!   match; it is what relations and lookups key on.
//!
//! ## Usage
//!
//! ```
//! use castle_duel::core::{InstanceAllocator, InstanceId};
//!
//! let mut alloc = InstanceAllocator::new();
//! assert_eq!(alloc.next_id(), Some(InstanceId(0)));
//! assert_eq!(alloc.next_id(), Some(InstanceId(1)));
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::player::Identities;

/// Unique identifier for a card instance within one match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for InstanceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance({})", self.0)
    }
}

/// Hands out instance IDs in increasing order from a half-open range.
///
/// The two peers of a match never share a counter. `for_player` splits the
/// ID space in two by comparing the player IDs, so each peer numbers its
/// own cards from a range the other never touches.
#[derive(Clone, Debug)]
pub struct InstanceAllocator {
    next: u32,
    end: u32,
}

impl Default for InstanceAllocator {
    fn default() -> Self {
        Self { next: 0, end: u32::MAX }
    }
}

impl InstanceAllocator {
    /// First ID of the upper namespace.
    pub const SPLIT: u32 = 1 << 31;

    /// Create an allocator over the whole ID space, starting at 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an allocator starting at `first`.
    #[must_use]
    pub fn starting_at(first: u32) -> Self {
        Self { next: first, end: u32::MAX }
    }

    /// Allocator for the cards of `ids.local`.
    ///
    /// The player with the smaller ID gets `0..SPLIT`, the other
    /// `SPLIT..u32::MAX`. Both peers reach the same split on their own.
    #[must_use]
    pub fn for_player(ids: &Identities) -> Self {
        if ids.local <= ids.remote {
            Self { next: 0, end: Self::SPLIT }
        } else {
            Self { next: Self::SPLIT, end: u32::MAX }
        }
    }

    /// Allocate the next instance ID, or `None` once the range is used up.
    pub fn next_id(&mut self) -> Option<InstanceId> {
        if self.next >= self.end {
            return None;
        }
        let id = InstanceId(self.next);
        self.next += 1;
        Some(id)
    }

    /// IDs left in the range.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.end.saturating_sub(self.next)
    }
}

/// Catalog identity of a card (shared by every copy).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a catalog ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw ID.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a paired match, shared by both peers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub Uuid);

impl MatchId {
    /// Generate a fresh random match ID.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
