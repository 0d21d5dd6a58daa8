//! Bearer/weapon relation upkeep.
//!
//! A bearer (ally in Defense or Attack) lists its weapons in `arms`; each
//! weapon (card in Support) names its single bearer in `bearer`. The two
//! sides must agree, across both stores of a table.
//!
//! - `attach` / `detach_all`: the two relation edits
//! - `unlink_weapon` / `unlink_bearer`: pieces used by the mover while a card
//!   is in flight
//! - `repair`: the invariant check run after every rules step; it fixes
//!   dangling or one-sided links in place and reports how many it fixed

pub mod maintainer;

pub use maintainer::{attach, detach_all, detach_card, repair, unlink_bearer, unlink_weapon};
