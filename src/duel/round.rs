//! Duel records: individual rounds and the settled result of a whole duel.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::cards::{Card, CardList};
use crate::core::PlayerId;

/// Outcome of a single duel round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Only strength cards were played and a unique card decided the round.
    ///
    /// Normally `losers` holds the single lowest card. When resolving a tie of
    /// Traps the highest card wins instead, so `winners` holds the single
    /// highest card and every other card is a loser.
    LowestLost {
        losers: BTreeMap<PlayerId, Card>,
        winners: BTreeMap<PlayerId, Card>,
    },

    /// At least one Counteract was played; everything in play is discarded.
    Counteracted { counteracters: BTreeSet<PlayerId> },

    /// Exactly one Trap was played; its player captures everything in play.
    Trapped { trapper: PlayerId },

    /// A tie, or several Traps. Another round is played among `duelers`.
    ///
    /// `trapping` is true only when this round's recursion was caused by Traps.
    DoubleDuel {
        trapping: bool,
        duelers: BTreeMap<PlayerId, Card>,
    },
}

impl RoundOutcome {
    /// Whether another round follows this one.
    #[must_use]
    pub fn is_double_duel(&self) -> bool {
        matches!(self, RoundOutcome::DoubleDuel { .. })
    }
}

/// One round of a duel: the card each involved player committed, and the outcome.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelRound {
    /// Card played by each involved player.
    pub played: BTreeMap<PlayerId, Card>,

    /// Subset of `played` that was drawn from the deck rather than a hand.
    pub drawn: BTreeMap<PlayerId, Card>,

    pub outcome: RoundOutcome,
}

impl DuelRound {
    /// Players involved in this round.
    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.played.keys().copied()
    }
}

/// Complete record of a duel and where its cards end up.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelResult {
    /// Rounds in play order. Every round but the last is a double duel.
    pub rounds: Vec<DuelRound>,

    /// Cards going to the discard pile, by the player who played them.
    pub discarded: BTreeMap<PlayerId, CardList>,

    /// Cards returning to the hand of the player who played them.
    pub retained: BTreeMap<PlayerId, CardList>,

    /// Captured cards: trapper -> (victim -> cards).
    pub trapped: BTreeMap<PlayerId, BTreeMap<PlayerId, CardList>>,

    /// Cards played straight from the deck, by player. These also appear in
    /// one of the maps above.
    pub drawn: BTreeMap<PlayerId, CardList>,
}

impl DuelResult {
    /// Players who took part in the first round.
    #[must_use]
    pub fn participants(&self) -> BTreeSet<PlayerId> {
        self.rounds
            .first()
            .map(|round| round.players().collect())
            .unwrap_or_default()
    }

    /// The player who captured cards, if any.
    #[must_use]
    pub fn trapper(&self) -> Option<PlayerId> {
        self.trapped.keys().next().copied()
    }

    /// Total cards committed over all rounds.
    #[must_use]
    pub fn committed_count(&self) -> usize {
        self.rounds.iter().map(|round| round.played.len()).sum()
    }

    /// Total cards discarded, retained, or captured.
    #[must_use]
    pub fn settled_count(&self) -> usize {
        let discarded: usize = self.discarded.values().map(|cards| cards.len()).sum();
        let retained: usize = self.retained.values().map(|cards| cards.len()).sum();
        let trapped: usize = self
            .trapped
            .values()
            .flat_map(|by_victim| by_victim.values())
            .map(|cards| cards.len())
            .sum();
        discarded + retained + trapped
    }

    /// Every committed card has exactly one destination.
    #[must_use]
    pub fn is_conserved(&self) -> bool {
        self.committed_count() == self.settled_count()
    }

    /// Well-formed round sequence: non-empty, only the last round is final.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        match self.rounds.split_last() {
            Some((last, earlier)) => {
                !last.outcome.is_double_duel()
                    && earlier.iter().all(|round| round.outcome.is_double_duel())
                    && self.rounds.iter().all(|round| round.played.len() >= 2)
            }
            None => false,
        }
    }

    /// Cards each player gets into their hand: retained plus captured.
    #[must_use]
    pub fn returned_to_hands(&self) -> BTreeMap<PlayerId, CardList> {
        let mut returned = self.retained.clone();
        for (&trapper, by_victim) in &self.trapped {
            returned
                .entry(trapper)
                .or_default()
                .extend(by_victim.values().flatten().copied());
        }
        returned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn p(id: u8) -> PlayerId {
        PlayerId::new(id)
    }

    fn captured_result() -> DuelResult {
        let played: BTreeMap<_, _> = [(p(0), Card::Trap), (p(1), Card::Ram)].into_iter().collect();
        DuelResult {
            rounds: vec![DuelRound {
                played,
                drawn: BTreeMap::new(),
                outcome: RoundOutcome::Trapped { trapper: p(0) },
            }],
            discarded: [(p(0), smallvec![Card::Trap])].into_iter().collect(),
            retained: BTreeMap::new(),
            trapped: [(p(0), [(p(1), smallvec![Card::Ram])].into_iter().collect())]
                .into_iter()
                .collect(),
            drawn: BTreeMap::new(),
        }
    }

    #[test]
    fn test_counts_and_conservation() {
        let result = captured_result();
        assert_eq!(result.committed_count(), 2);
        assert_eq!(result.settled_count(), 2);
        assert!(result.is_conserved());
        assert!(result.is_well_formed());
        assert_eq!(result.trapper(), Some(p(0)));
        assert_eq!(result.participants(), [p(0), p(1)].into_iter().collect());
    }

    #[test]
    fn test_returned_to_hands_includes_captures() {
        let result = captured_result();
        let returned = result.returned_to_hands();
        assert_eq!(returned.len(), 1);
        assert_eq!(returned[&p(0)].as_slice(), &[Card::Ram]);
    }

    #[test]
    fn test_empty_result_is_not_well_formed() {
        assert!(!DuelResult::default().is_well_formed());
    }
}
