//! Audit lines for the match transcript.
//!
//! Every state-changing operation produces one or more of these. They are
//! handed to the chat collaborator and play no role in authority decisions.

use serde::{Deserialize, Serialize};

use crate::zones::Zone;

/// One line of the action transcript.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEvent {
    /// Human-readable description.
    pub text: String,

    /// Rendered as an action rather than a chat message.
    pub is_action: bool,
}

impl AuditEvent {
    /// An action line.
    pub fn action(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_action: true,
        }
    }

    /// A card changed zones.
    #[must_use]
    pub fn moved(name: &str, from: Zone, to: Zone, to_mirror: bool) -> Self {
        let verb = if to == Zone::Castle { "Moving and shuffling" } else { "Moving" };
        let suffix = if to_mirror { " (opponent)" } else { "" };
        Self::action(format!("{} \"{}\" from \"{}\" to \"{}\"{}", verb, name, from, to, suffix))
    }

    #[must_use]
    pub fn drew(count: usize) -> Self {
        Self::action(format!("Drawing {} card(s)", count))
    }

    #[must_use]
    pub fn loaded(count: usize) -> Self {
        Self::action(format!("Loading {} card(s) into \"{}\"", count, Zone::Castle))
    }

    #[must_use]
    pub fn threw(count: usize) -> Self {
        Self::action(format!(
            "Throwing {} card(s) from \"{}\" to \"{}\"",
            count,
            Zone::Castle,
            Zone::Cemetery
        ))
    }

    #[must_use]
    pub fn shuffled(zone: Zone) -> Self {
        Self::action(format!("Shuffling \"{}\"", zone))
    }

    #[must_use]
    pub fn revealed(zone: Zone) -> Self {
        Self::action(format!("Showing \"{}\" to the opponent", zone))
    }

    #[must_use]
    pub fn took_control(name: &str, zone: Zone) -> Self {
        Self::action(format!("Taking control of \"{}\" from opponent \"{}\"", name, zone))
    }

    #[must_use]
    pub fn assigned(weapon: &str, bearer: &str) -> Self {
        Self::action(format!("Assigning \"{}\" to \"{}\"", weapon, bearer))
    }

    #[must_use]
    pub fn viewing(zone: Zone, opponent: bool) -> Self {
        if opponent {
            Self::action(format!("Viewing opponent \"{}\"", zone))
        } else {
            Self::action(format!("Viewing my \"{}\"", zone))
        }
    }
}
