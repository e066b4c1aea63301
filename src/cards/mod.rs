//! Card catalog and card collections.
//!
//! ## Key Types
//!
//! - `Card`: One of the 22 card kinds, with strength, spy count and deck multiplicity
//! - `CardCounts`: Multiset of cards keyed by kind
//! - `CardList`: Inline list of cards, used for per-player duel piles
//!
//! ## Special Cards
//!
//! Two kinds have no strength. Counteract voids a whole duel round; Trap
//! captures it. Both ignore strength comparisons during a duel.

pub mod catalog;
pub mod counts;

pub use catalog::{Card, CardList, DECK_SIZE};
pub use counts::CardCounts;
