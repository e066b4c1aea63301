//! # robopower
//!
//! A multiplayer card-dueling engine for pitting automated strategies
//! against each other.
//!
//! Two to ten players start with six cards from a 99-card deck. On each turn
//! the up player draws and discards (a discarded spy steals cards from other
//! players), then every player still holding cards duels. A player with no
//! cards left is eliminated; the last one standing wins.
//!
//! ## Design Principles
//!
//! 1. **N-Player First**: Every API takes `player_count` as context. No
//!    convenience methods that assume 2 players.
//!
//! 2. **Deterministic**: All randomness flows from one seed through
//!    forkable `GameRng` streams, so a game can be replayed exactly.
//!
//! 3. **Public vs Private**: Strategies see the public `GameState`, their own
//!    hand, and their own `CardTracker` through a `PlayerView`, nothing else.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, configuration, errors
//! - `cards`: The card catalog and card multisets
//! - `zones`: Draw and discard piles
//! - `duel`: Duel round resolution
//! - `events`: Public events and listeners
//! - `tracker`: Hidden-information tracking per player
//! - `players`: Strategy traits and baseline strategies
//! - `game`: Game state, player views, and the turn engine

pub mod core;
pub mod cards;
pub mod zones;
pub mod duel;
pub mod events;
pub mod tracker;
pub mod players;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    Decision, GameConfig, GameError, GameRng, InvalidChoice, PlayerId, PlayerMap, Result,
    MAX_PLAYERS, MIN_PLAYERS,
};

pub use crate::cards::{Card, CardCounts, CardList, DECK_SIZE};

pub use crate::zones::{Deck, Draw};

pub use crate::duel::{
    resolve_round, run_duel, CardSupplier, DuelResult, DuelRound, PlayedCard, RoundOutcome,
    ScriptedSupplier,
};

pub use crate::events::{EventBus, EventKind, EventType, GameEvent, ListenerId};

pub use crate::tracker::CardTracker;

pub use crate::players::{
    CompositePlayer, FnFactory, InOrderPlayer, OptionalDiscard, OptionalDuel, OptionalSpy, Player,
    PlayerFactory, RandomPlayer, Seat,
};

pub use crate::game::{Game, GameBuilder, GameResult, GameState, GameSummary, PlayerState, PlayerView};
