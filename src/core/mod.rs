//! Core table types: identities, sides, RNG, configuration, errors.
//!
//! Everything here is independent of the zone layout and of the rules;
//! the higher modules build on these types.

pub mod ids;
pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use ids::{CardId, InstanceId, InstanceAllocator, MatchId};
pub use player::{Identities, PlayerId, Side};
pub use rng::GameRng;
pub use config::MatchConfig;
pub use error::{ConfigError, RulesError, SyncError, ZoneParseError};
