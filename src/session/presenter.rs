//! UI-side collaborators of a session.
//!
//! The session never renders. It hands audit lines, warnings and modal
//! contexts to a `Presenter` and lets the UI decide what to show.

use im::Vector;

use crate::cards::Card;
use crate::core::ids::InstanceId;
use crate::core::player::Side;
use crate::rules::AuditEvent;
use crate::zones::{CardRef, Zone};

/// A modal context the UI is asked to present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Prompt {
    /// Show the contents of a zone.
    ViewZone {
        side: Side,
        zone: Zone,
        cards: Vector<Card>,
    },

    /// Let the player pick `count` cards of a local zone.
    SelectCards {
        zone: Zone,
        count: usize,
        cards: Vector<Card>,
    },

    /// Ask how many cards to throw from the Castle.
    ThrowCards { available: usize },

    /// Let the player pick a bearer for the weapon at `position` of Support.
    AssignWeapon {
        position: usize,
        weapon: InstanceId,
        name: String,
        bearers: Vec<CardRef>,
    },

    /// Confirm claiming the mirror card at `position` of `zone`.
    TakeControl {
        zone: Zone,
        position: usize,
        weapon: bool,
        name: String,
    },

    /// The opponent revealed their Castle.
    RevealedCastle { cards: Vector<Card> },
}

/// Receives everything a session wants the player to see.
pub trait Presenter {
    /// Append a line to the match transcript.
    fn audit(&mut self, event: &AuditEvent);

    /// Show a non-blocking warning.
    fn warn(&mut self, message: &str);

    /// Open a modal context.
    fn present(&mut self, prompt: Prompt);
}

/// Presenter that keeps everything it is given.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordingPresenter {
    pub audit: Vec<AuditEvent>,
    pub warnings: Vec<String>,
    pub prompts: Vec<Prompt>,
}

impl RecordingPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Transcript texts in order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.audit.iter().map(|e| e.text.as_str()).collect()
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.audit.clear();
        self.warnings.clear();
        self.prompts.clear();
    }
}

impl Presenter for RecordingPresenter {
    fn audit(&mut self, event: &AuditEvent) {
        self.audit.push(event.clone());
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_owned());
    }

    fn present(&mut self, prompt: Prompt) {
        self.prompts.push(prompt);
    }
}
