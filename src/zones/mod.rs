//! Zone system for card locations.
//!
//! Zones are a **closed set**: every player has the same eleven zones, so
//! they are an enum matched exhaustively rather than string keys.
//!
//! ## Key Types
//!
//! - `Zone`: one named area of a player's field
//! - `ZoneStore`: one player's zones, each an ordered card sequence
//! - `Table`: the local store plus the mirror of the opponent's store

pub mod zone;
pub mod store;
pub mod table;

pub use zone::Zone;
pub use store::ZoneStore;
pub use table::{CardRef, Table, Touched};
