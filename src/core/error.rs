//! Error types.
//!
//! Every error aborts only the game it occurs in. Errors caused by a player
//! carry that player's index so a harness can attribute them; invalid moves
//! (`InvalidChoice`) are kept distinct from failures inside strategy logic
//! (`Strategy`).

use super::player::PlayerId;

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, GameError>;

/// The kind of decision a strategy was asked to make.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Choosing a card to discard at the start of a turn.
    Discard,
    /// Choosing a player to steal from.
    Spy,
    /// Choosing a card to play in a duel round.
    Duel,
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Decision::Discard => "discard",
            Decision::Spy => "spy",
            Decision::Duel => "duel",
        };
        f.write_str(name)
    }
}

/// An illegal move returned by a strategy.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidChoice {
    #[error("discard index {index} with {hand_size} cards in hand")]
    Discard { index: usize, hand_size: usize },

    #[error("duel index {index} with {hand_size} cards in hand")]
    Duel { index: usize, hand_size: usize },

    #[error("cannot spy on self")]
    SpySelf,

    #[error("spy target {target} out of range for {player_count} players")]
    SpyOutOfRange { target: PlayerId, player_count: usize },

    #[error("spy target {target} has no cards in hand")]
    SpyEmptyHand { target: PlayerId },
}

impl InvalidChoice {
    /// The decision the illegal move was made for.
    #[must_use]
    pub fn decision(&self) -> Decision {
        match self {
            InvalidChoice::Discard { .. } => Decision::Discard,
            InvalidChoice::Duel { .. } => Decision::Duel,
            InvalidChoice::SpySelf
            | InvalidChoice::SpyOutOfRange { .. }
            | InvalidChoice::SpyEmptyHand { .. } => Decision::Spy,
        }
    }
}

/// Errors that abort a game.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("no cards left in the draw or discard piles")]
    DeckExhausted,

    #[error("invalid {} choice by {player}: {choice}", choice.decision())]
    InvalidChoice { player: PlayerId, choice: InvalidChoice },

    #[error("{decision} strategy for {player} failed: {source}")]
    Strategy {
        player: PlayerId,
        decision: Decision,
        #[source]
        source: anyhow::Error,
    },

    #[error("game has already been run")]
    AlreadyRun,

    #[error("player count must be between {min} and {max}; was {count}")]
    InvalidPlayerCount { count: usize, min: usize, max: usize },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: &'static str },

    #[error("a duel needs at least two players; was given {count}")]
    TooFewDuelists { count: usize },
}

impl GameError {
    /// The player responsible for this error, if it is attributable to one.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            GameError::InvalidChoice { player, .. } | GameError::Strategy { player, .. } => {
                Some(*player)
            }
            _ => None,
        }
    }

    /// The decision during which a player caused this error.
    #[must_use]
    pub fn decision(&self) -> Option<Decision> {
        match self {
            GameError::InvalidChoice { choice, .. } => Some(choice.decision()),
            GameError::Strategy { decision, .. } => Some(*decision),
            _ => None,
        }
    }

    /// Whether a player made an illegal move.
    #[must_use]
    pub fn is_invalid_choice(&self) -> bool {
        matches!(self, GameError::InvalidChoice { .. })
    }

    /// Whether a player's strategy logic itself failed.
    #[must_use]
    pub fn is_strategy_fault(&self) -> bool {
        matches!(self, GameError::Strategy { .. })
    }
}
