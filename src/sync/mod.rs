//! Peer synchronization.
//!
//! Each peer owns its store and mirrors the other's. They stay aligned by
//! full-state broadcasts over a duplex channel; there is no versioning and
//! no retry, so the last broadcast to arrive wins.
//!
//! ## Key Types
//!
//! - `SyncMessage`: what travels between peers
//! - `SyncChannel`: the transport contract the session depends on
//! - `LocalChannel`: in-process duplex transport (tests, hot-seat play)

pub mod protocol;
pub mod channel;

pub use protocol::{StorePayload, SyncEvent, SyncMessage};
pub use channel::{Ack, LocalChannel, SyncChannel};
