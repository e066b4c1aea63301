//! Terminal game outcomes.

use im::Vector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

use crate::core::{PlayerId, PlayerMap};
use crate::events::GameEvent;

/// How a game ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// A single player is left holding cards.
    Winner(PlayerId),

    /// The last players were eliminated together.
    Tied(BTreeSet<PlayerId>),

    /// The turn cap was reached first.
    Unfinished,
}

impl GameResult {
    /// The unique winner, if there is one.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameResult::Winner(player) => Some(*player),
            _ => None,
        }
    }

    /// Every player sharing first place; empty for an unfinished game.
    #[must_use]
    pub fn winners(&self) -> BTreeSet<PlayerId> {
        match self {
            GameResult::Winner(player) => [*player].into_iter().collect(),
            GameResult::Tied(players) => players.clone(),
            GameResult::Unfinished => BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn is_decisive(&self) -> bool {
        matches!(self, GameResult::Winner(_))
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        !matches!(self, GameResult::Unfinished)
    }
}

/// Everything a harness needs from a completed game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameSummary {
    pub result: GameResult,

    /// Turns played.
    pub turns: u32,

    /// Finishing place per player: 1 for the winner (or every tied player),
    /// then by reverse elimination order. Players eliminated by the same
    /// event share a place. `None` for an unfinished game.
    pub placements: Option<PlayerMap<usize>>,

    /// Wall time spent inside each player's strategy code.
    pub strategy_time: PlayerMap<Duration>,

    /// Display name of each seat's strategy.
    pub player_names: PlayerMap<String>,

    /// The complete event log.
    pub events: Vector<GameEvent>,
}

impl GameSummary {
    /// Finishing place of `player`, if the game finished.
    #[must_use]
    pub fn place(&self, player: PlayerId) -> Option<usize> {
        self.placements.as_ref().and_then(|places| places.get(player).copied())
    }
}
