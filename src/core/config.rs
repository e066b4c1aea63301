//! Game configuration.
//!
//! Table-size bounds are fixed; everything else is tunable per game through
//! `GameConfig`'s builder methods.

use serde::{Deserialize, Serialize};

/// Minimum number of players in a game.
pub const MIN_PLAYERS: usize = 2;

/// Maximum number of players in a game.
pub const MAX_PLAYERS: usize = 10;

/// Game configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Cards dealt to each player before the first turn.
    pub starting_hand_size: usize,

    /// Turn cap. When reached the game ends as unfinished.
    /// `None` runs until a winner or tie.
    pub max_turns: Option<u32>,

    /// Seed for the game RNG (deck shuffles, spy steals, strategy streams).
    pub seed: u64,

    /// Collect each duel round's card choices in parallel.
    pub concurrent_duel_choices: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_hand_size: 6,
            max_turns: None,
            seed: 42,
            concurrent_duel_choices: false,
        }
    }
}

impl GameConfig {
    /// Set the number of cards dealt to each player.
    #[must_use]
    pub fn with_starting_hand_size(mut self, cards: usize) -> Self {
        self.starting_hand_size = cards;
        self
    }

    /// Stop the game after `turns` turns.
    #[must_use]
    pub fn with_max_turns(mut self, turns: u32) -> Self {
        self.max_turns = Some(turns);
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enable or disable parallel collection of duel choices.
    #[must_use]
    pub fn with_concurrent_duel_choices(mut self, concurrent: bool) -> Self {
        self.concurrent_duel_choices = concurrent;
        self
    }

    /// Whether `turn_count` turns have exhausted the turn cap.
    #[must_use]
    pub fn turn_cap_reached(&self, turn_count: u32) -> bool {
        self.max_turns.is_some_and(|max| turn_count >= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.starting_hand_size, 6);
        assert_eq!(config.max_turns, None);
        assert!(!config.concurrent_duel_choices);
        assert!(!config.turn_cap_reached(1_000_000));
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::default()
            .with_starting_hand_size(4)
            .with_max_turns(10)
            .with_seed(7)
            .with_concurrent_duel_choices(true);

        assert_eq!(config.starting_hand_size, 4);
        assert_eq!(config.seed, 7);
        assert!(config.concurrent_duel_choices);
        assert!(!config.turn_cap_reached(9));
        assert!(config.turn_cap_reached(10));
    }

    #[test]
    fn test_serde() {
        let config = GameConfig::default().with_max_turns(50);
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
