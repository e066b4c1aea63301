//! Duel resolution.
//!
//! A duel is a sequence of rounds. In each round every involved player
//! commits one card; the round either settles the duel or narrows it to a
//! subset of players for another round (a "double duel").
//!
//! ## Round rules
//!
//! - Any Counteract: every card in play is discarded.
//! - Exactly one Trap: its player captures every other card in play.
//! - Two or more Traps: those players duel again, and from then on the
//!   highest card captures everything in play.
//! - Otherwise the unique lowest card loses (or, after tied Traps, the unique
//!   highest card wins). Ties duel again among the tied players.
//!
//! ## Key Types
//!
//! - `DuelRound` / `RoundOutcome`: One round and how it was decided
//! - `DuelResult`: Every round plus each card's destination
//! - `CardSupplier`: Where each round's cards come from
//! - `ScriptedSupplier`: Predetermined cards, for tests and simulation

pub mod round;
pub mod resolver;

pub use round::{DuelResult, DuelRound, RoundOutcome};
pub use resolver::{resolve_round, run_duel, CardSupplier, PlayedCard, ScriptedSupplier};
