//! Card zones shared by all players.
//!
//! Hands are private to each player and live with the game; the deck's draw
//! and discard piles are the only shared zones.
//!
//! ## Key Types
//!
//! - `Deck`: Draw pile plus discard pile, with reshuffle-on-exhaustion
//! - `Draw`: A drawn card and the discard pile it reshuffled, if any

pub mod deck;

pub use deck::{Deck, Draw};
