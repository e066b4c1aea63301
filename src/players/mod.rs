//! Player strategies.
//!
//! ## Key Types
//!
//! - `Player`: Complete strategy (discard, spy, duel) plus optional callbacks
//! - `PlayerFactory`: Creates a fresh `Player` for each seat of each game
//! - `OptionalDiscard` / `OptionalSpy` / `OptionalDuel`: Partial strategies
//!   combined by `CompositePlayer`
//! - `InOrderPlayer`, `RandomPlayer`: Baseline strategies

pub mod strategy;
pub mod baseline;

pub use strategy::{
    CompositePlayer, FnFactory, OptionalDiscard, OptionalDuel, OptionalSpy, Player, PlayerFactory, Seat,
};
pub use baseline::{InOrderPlayer, RandomPlayer};
