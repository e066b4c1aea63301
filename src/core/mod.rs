//! Core engine types: players, RNG, configuration, errors.
//!
//! These are shared by every other module and carry no game rules of their own.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use config::{GameConfig, MIN_PLAYERS, MAX_PLAYERS};
pub use error::{Decision, GameError, InvalidChoice, Result};
