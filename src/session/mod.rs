//! One player's side of a match.
//!
//! A `Session` owns the table (local store plus opponent mirror), the
//! identities of both players and the RNG. It runs the rules, swaps in
//! their results, reports to the UI through a `Presenter`, and keeps the
//! peer aligned over a `SyncChannel`.
//!
//! Processing is run-to-completion: each gesture or inbound message is
//! fully applied before the next one is looked at.

pub mod peer;
pub mod presenter;

pub use peer::Session;
pub use presenter::{Presenter, Prompt, RecordingPresenter};
