//! Error types.
//!
//! None of these are fatal. The session turns each `RulesError` into either
//! a silent no-op or a user-visible warning (see `RulesError::is_silent`).

use thiserror::Error;

use super::ids::{InstanceId, MatchId};
use crate::zones::Zone;

/// Why a rules operation made no change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    /// Source and destination zone are the same.
    #[error("card is already in {0}")]
    SameZone(Zone),

    /// The referenced slot no longer holds a card (lost a race to another move).
    #[error("no card at position {position} of {zone}")]
    StaleReference { zone: Zone, position: usize },

    /// The acting session does not control the slot it tried to move.
    #[error("cannot move a card out of the opponent's {0}")]
    AuthorityViolation(Zone),

    /// Draw, throw or shuffle against an empty zone.
    #[error("there are no cards in {0}")]
    EmptySource(Zone),

    /// Weapon assignment with no ally in Defense or Attack on either side.
    #[error("there must be allies in Defense or Attack to assign a weapon")]
    NoBearerAvailable,

    /// The card asked to act as a weapon is not in Support.
    #[error("{0} is not in Support")]
    NotAWeapon(InstanceId),

    /// The card asked to act as a bearer is not in Defense or Attack.
    #[error("{0} is not in Defense or Attack")]
    NotABearer(InstanceId),
}

impl RulesError {
    /// Errors that are swallowed without telling the player.
    ///
    /// Stale drags and authority violations are UI races, not user mistakes.
    #[must_use]
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            RulesError::SameZone(_)
                | RulesError::StaleReference { .. }
                | RulesError::AuthorityViolation(_)
        )
    }
}

/// Zone name not in the closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown zone name: {0:?}")]
pub struct ZoneParseError(pub String);

/// Failures at the sync boundary.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("frame codec: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("message for match {got} received in match {expected}")]
    WrongMatch { expected: MatchId, got: MatchId },
}

/// Invalid match configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("hand size must be at least 1")]
    ZeroHandSize,
}
