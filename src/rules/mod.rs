//! Table rules: relocation, shuffling, drawing, taking control.
//!
//! Every operation is a pure function from a snapshot to a new snapshot:
//! it takes the current `Table` (or a single `ZoneStore`) by reference and
//! returns a fresh value, or a `RulesError` explaining why nothing changed.
//! The caller decides what to swap in and what to broadcast.
//!
//! ## Operations
//!
//! - `move_card`: the Card Mover (relation cleanup, owner routing, Castle shuffle)
//! - `shuffle_zone` / `shuffled`: the Shuffle Engine
//! - `draw`: the Draw Engine (front of source to end of destination)
//! - `take_control`: claim a card out of the opponent mirror

pub mod audit;
pub mod outcome;
pub mod shuffle;
pub mod draw;
pub mod mover;
pub mod take_control;

pub use audit::AuditEvent;
pub use outcome::Outcome;
pub use shuffle::{shuffle_zone, shuffled, shuffled_seeded};
pub use draw::{draw, Drawn};
pub use mover::{move_card, MoveRequest};
pub use take_control::take_control;
