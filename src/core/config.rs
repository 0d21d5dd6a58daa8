//! Match configuration.
//!
//! The host application builds a `MatchConfig` (or loads it from JSON) when
//! two players pair. All fields have defaults, so `{}` is a valid config.
//!
//! ```
//! use castle_duel::core::MatchConfig;
//!
//! let config = MatchConfig::new().with_seed(7).with_hand_size(5);
//! assert_eq!(config.hand_size, 5);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Default number of cards taken by "draw hand".
pub const DEFAULT_HAND_SIZE: usize = 8;

/// Per-match settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Cards drawn by "draw hand".
    pub hand_size: usize,

    /// Shuffle seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Also broadcast the local store after every local change, so the
    /// opponent's mirror follows without waiting for a periodic sync.
    pub broadcast_local_changes: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            hand_size: DEFAULT_HAND_SIZE,
            seed: None,
            broadcast_local_changes: true,
        }
    }
}

impl MatchConfig {
    /// Create a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from JSON and validate.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the hand size.
    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Fix the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Toggle broadcasting of local changes.
    #[must_use]
    pub fn with_broadcast_local_changes(mut self, enabled: bool) -> Self {
        self.broadcast_local_changes = enabled;
        self
    }

    /// Check the config is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hand_size == 0 {
            return Err(ConfigError::ZeroHandSize);
        }
        Ok(())
    }
}
