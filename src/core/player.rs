//! Player identification and the local/mirror split.
//!
//! ## PlayerId
//!
//! Opaque player identity. A card's `owner` holds one of these.
//!
//! ## Side
//!
//! Which of the two stores held by a session an operation addresses:
//! the authoritative local store, or the mirror of the opponent.
//!
//! ## Identities
//!
//! The (local, remote) pair of a paired session. Routing by owner always
//! goes through `Identities::side_of`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Create a player ID from a UUID.
    #[must_use]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh random player ID.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One of the two stores a session holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The local player's authoritative store.
    Local,
    /// Best-known copy of the opponent's store.
    Mirror,
}

impl Side {
    /// The other side.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Side::Local => Side::Mirror,
            Side::Mirror => Side::Local,
        }
    }
}

/// The two identities of a paired session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identities {
    /// The player this session acts for.
    pub local: PlayerId,
    /// The opponent.
    pub remote: PlayerId,
}

impl Identities {
    /// Create an identity pair.
    #[must_use]
    pub const fn new(local: PlayerId, remote: PlayerId) -> Self {
        Self { local, remote }
    }

    /// Store a card owned by `owner` belongs in.
    ///
    /// Anything not owned by the local player is routed to the mirror.
    #[must_use]
    pub fn side_of(&self, owner: PlayerId) -> Side {
        if owner == self.local {
            Side::Local
        } else {
            Side::Mirror
        }
    }

    /// Identity that owns the given side.
    #[must_use]
    pub const fn player_of(&self, side: Side) -> PlayerId {
        match side {
            Side::Local => self.local,
            Side::Mirror => self.remote,
        }
    }

    /// The same pair seen from the opponent's seat.
    #[must_use]
    pub const fn swapped(&self) -> Self {
        Self {
            local: self.remote,
            remote: self.local,
        }
    }
}
