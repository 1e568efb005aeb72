//! Shared data model for athletes and their cards.
//!
//! These types mirror what the node stores. Nothing in this crate mutates
//! them directly; the jobs only read them and request mints.

mod types;
mod units;

pub use types::*;
pub use units::*;
