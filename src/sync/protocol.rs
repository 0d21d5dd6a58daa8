//! Messages exchanged between the two peers of a match.
//!
//! Frames are JSON, `{"type": ..., "payload": ...}`. Store payloads carry
//! the match ID and one side's complete zone store:
//! `{"matchId": "...", "match": {"Castle": [...], ...}}`.

use serde::{Deserialize, Serialize};

use crate::core::error::SyncError;
use crate::core::ids::MatchId;
use crate::zones::ZoneStore;

/// A complete zone store for one side of a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorePayload {
    pub match_id: MatchId,
    #[serde(rename = "match")]
    pub store: ZoneStore,
}

/// Named events of the sync protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyncEvent {
    MatchUpdated,
    OpponentMatchUpdated,
    CastleRevealed,
}

impl SyncEvent {
    /// Event name on the wire.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            SyncEvent::MatchUpdated => "update-match",
            SyncEvent::OpponentMatchUpdated => "update-match-opponent",
            SyncEvent::CastleRevealed => "show-castle-to-opponent",
        }
    }
}

/// A message between peers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum SyncMessage {
    /// The sender's own store. The receiver replaces its mirror.
    MatchUpdated(StorePayload),

    /// The receiver's store as the sender changed it (take-control, a
    /// weapon returned to its owner). The receiver replaces its local store.
    OpponentMatchUpdated(StorePayload),

    /// The sender shows its Castle. No store attached.
    CastleRevealed {
        #[serde(rename = "matchId")]
        match_id: MatchId,
    },
}

impl SyncMessage {
    /// Which protocol event this is.
    #[must_use]
    pub fn event(&self) -> SyncEvent {
        match self {
            SyncMessage::MatchUpdated(_) => SyncEvent::MatchUpdated,
            SyncMessage::OpponentMatchUpdated(_) => SyncEvent::OpponentMatchUpdated,
            SyncMessage::CastleRevealed { .. } => SyncEvent::CastleRevealed,
        }
    }

    /// Match this message belongs to.
    #[must_use]
    pub fn match_id(&self) -> MatchId {
        match self {
            SyncMessage::MatchUpdated(p) | SyncMessage::OpponentMatchUpdated(p) => p.match_id,
            SyncMessage::CastleRevealed { match_id } => *match_id,
        }
    }

    /// Encode as a JSON frame.
    pub fn to_frame(&self) -> Result<String, SyncError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a JSON frame.
    pub fn from_frame(frame: &str) -> Result<Self, SyncError> {
        Ok(serde_json::from_str(frame)?)
    }
}
