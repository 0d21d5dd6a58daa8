//! Card instances.
//!
//! ## Key Types
//!
//! - `Card`: one physical card on the table. Carries its catalog identity,
//!   its instance identity, its owner and the bearer/weapon relation fields.
//!
//! Catalog data (types, races, editions) lives outside this crate; a card
//! only keeps the name and image needed to describe it in audit lines.

pub mod instance;

pub use instance::{Arms, Card};
