//! # castle-duel
//!
//! Table state and synchronization for a two-player card game.
//!
//! Each player has the same eleven zones, each an ordered sequence of card
//! instances. A session holds its own store and a mirror of the
//! opponent's, moves cards between zones while keeping weapon/bearer links
//! consistent, and keeps both peers aligned with full-state broadcasts.
//!
//! ## Design Principles
//!
//! 1. **Snapshots**: Stores are `im` persistent collections. Rules take a
//!    `&Table` and return a new one, so cloning is O(1) and a rejected
//!    operation leaves nothing behind.
//!
//! 2. **Owner routing**: A card's `owner` decides which store it lands in
//!    when it leaves play, not the store it was dragged from.
//!
//! 3. **Best-effort sync**: Broadcasts are fire-and-forget. The last one to
//!    arrive wins.
//!
//! ## Modules
//!
//! - `core`: Identities, RNG, configuration, errors
//! - `cards`: Card instances and relation fields
//! - `zones`: Zone enum, zone store, table
//! - `relations`: Bearer/weapon link upkeep
//! - `rules`: Card mover, shuffle, draw, take-control
//! - `sync`: Wire messages and the channel contract
//! - `session`: The per-player session and its UI collaborators

pub mod core;
pub mod cards;
pub mod zones;
pub mod relations;
pub mod rules;
pub mod sync;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    CardId, InstanceId, InstanceAllocator, MatchId,
    Identities, PlayerId, Side,
    GameRng, MatchConfig,
    ConfigError, RulesError, SyncError, ZoneParseError,
};

pub use crate::cards::{Arms, Card};

pub use crate::zones::{CardRef, Table, Touched, Zone, ZoneStore};

pub use crate::rules::{AuditEvent, MoveRequest, Outcome};

pub use crate::sync::{LocalChannel, StorePayload, SyncChannel, SyncEvent, SyncMessage};

pub use crate::session::{Presenter, Prompt, RecordingPresenter, Session};
