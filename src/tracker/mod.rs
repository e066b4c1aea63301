//! Hidden-information tracking.
//!
//! Each seat owns a `CardTracker` that the game keeps up to date. Strategies
//! read it through their `PlayerView` to reason about unseen cards.

pub mod card_tracker;

pub use card_tracker::CardTracker;
