//! Duel resolution.
//!
//! `resolve_round` decides a single round from the cards on the table.
//! `run_duel` drives rounds until one of them is final, pulling each round's
//! cards from a [`CardSupplier`] and tracking where every committed card goes.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::cards::{Card, CardList};
use crate::core::{GameError, PlayerId, Result};

use super::round::{DuelResult, DuelRound, RoundOutcome};

/// A card committed to a duel round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayedCard {
    pub card: Card,
    /// Whether the card came straight from the deck instead of a hand.
    pub drawn: bool,
}

impl PlayedCard {
    #[must_use]
    pub fn from_hand(card: Card) -> Self {
        Self { card, drawn: false }
    }

    #[must_use]
    pub fn from_deck(card: Card) -> Self {
        Self { card, drawn: true }
    }
}

/// Source of the cards played in each round of a duel.
///
/// A duel can last several rounds, so the cards cannot be given up front.
pub trait CardSupplier {
    /// Cards for the next round, one for each player in `involved`.
    fn next_cards(
        &mut self,
        involved: &BTreeSet<PlayerId>,
        previous_rounds: &[DuelRound],
    ) -> Result<BTreeMap<PlayerId, PlayedCard>>;

    /// Called once a round has been resolved, before the next one is requested.
    fn round_resolved(&mut self, _round: &DuelRound) {}
}

/// Supplies predetermined cards, one per player per round.
///
/// Useful for tests and for strategies simulating a duel. Running out of
/// cards for an involved player fails with [`GameError::DeckExhausted`].
#[derive(Clone, Debug, Default)]
pub struct ScriptedSupplier {
    cards: BTreeMap<PlayerId, VecDeque<Card>>,
}

impl ScriptedSupplier {
    /// Player `i` plays `lists[i]` in order.
    #[must_use]
    pub fn from_lists(lists: Vec<Vec<Card>>) -> Self {
        let cards = lists
            .into_iter()
            .enumerate()
            .map(|(i, list)| (PlayerId(i as u8), list.into()))
            .collect();
        Self { cards }
    }

    /// Script the cards `player` will play.
    #[must_use]
    pub fn with_player(mut self, player: PlayerId, cards: Vec<Card>) -> Self {
        self.cards.insert(player, cards.into());
        self
    }

    /// Players with a script.
    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.cards.keys().copied()
    }
}

impl CardSupplier for ScriptedSupplier {
    fn next_cards(
        &mut self,
        involved: &BTreeSet<PlayerId>,
        _previous_rounds: &[DuelRound],
    ) -> Result<BTreeMap<PlayerId, PlayedCard>> {
        involved
            .iter()
            .map(|&player| {
                self.cards
                    .get_mut(&player)
                    .and_then(VecDeque::pop_front)
                    .map(|card| (player, PlayedCard::from_hand(card)))
                    .ok_or(GameError::DeckExhausted)
            })
            .collect()
    }
}

/// Decide the outcome of one round.
///
/// `trapping` is set when an earlier round of the same duel was a tie of
/// Traps; the highest card then wins instead of the lowest losing.
#[must_use]
pub fn resolve_round(played: &BTreeMap<PlayerId, Card>, trapping: bool) -> RoundOutcome {
    let counteracters: BTreeSet<PlayerId> = players_where(played, |card| card.is_counteract());
    if !counteracters.is_empty() {
        return RoundOutcome::Counteracted { counteracters };
    }

    let trappers = players_where(played, |card| card.is_trap());
    if trappers.len() > 1 {
        return RoundOutcome::DoubleDuel {
            trapping: true,
            duelers: select(played, &trappers),
        };
    }
    if let Some(&trapper) = trappers.first() {
        return RoundOutcome::Trapped { trapper };
    }

    let target = if trapping {
        played.values().map(|card| card.duel_strength()).max()
    } else {
        played.values().map(|card| card.duel_strength()).min()
    };
    let decisive = players_where(played, |card| Some(card.duel_strength()) == target);

    if decisive.len() != 1 {
        return RoundOutcome::DoubleDuel {
            trapping: false,
            duelers: select(played, &decisive),
        };
    }

    let others: BTreeSet<PlayerId> = played.keys().copied().filter(|p| !decisive.contains(p)).collect();
    if trapping {
        RoundOutcome::LowestLost {
            losers: select(played, &others),
            winners: select(played, &decisive),
        }
    } else {
        RoundOutcome::LowestLost {
            losers: select(played, &decisive),
            winners: select(played, &others),
        }
    }
}

/// Run a duel among `players`, requesting cards from `supplier` each round.
///
/// Fails with [`GameError::TooFewDuelists`] if fewer than two players are given.
pub fn run_duel<S>(supplier: &mut S, players: impl IntoIterator<Item = PlayerId>) -> Result<DuelResult>
where
    S: CardSupplier + ?Sized,
{
    let mut involved: BTreeSet<PlayerId> = players.into_iter().collect();
    if involved.len() < 2 {
        return Err(GameError::TooFewDuelists { count: involved.len() });
    }

    let mut rounds: Vec<DuelRound> = Vec::new();
    // cards committed and still at stake
    let mut in_play: BTreeMap<PlayerId, CardList> = BTreeMap::new();
    // cards of players who dropped out of a tie, already safe
    let mut retained: BTreeMap<PlayerId, CardList> = BTreeMap::new();
    let mut drawn: BTreeMap<PlayerId, CardList> = BTreeMap::new();
    let mut trapping = false;

    loop {
        let plays = supplier.next_cards(&involved, &rounds)?;
        debug_assert!(plays.keys().eq(involved.iter()), "supplier must play for every involved player");

        let mut played = BTreeMap::new();
        let mut round_drawn = BTreeMap::new();
        for (player, play) in plays {
            in_play.entry(player).or_default().push(play.card);
            if play.drawn {
                drawn.entry(player).or_default().push(play.card);
                round_drawn.insert(player, play.card);
            }
            played.insert(player, play.card);
        }

        let outcome = resolve_round(&played, trapping);
        tracing::trace!(round = rounds.len() + 1, ?played, ?outcome, "duel round resolved");
        let round = DuelRound { played, drawn: round_drawn, outcome };
        supplier.round_resolved(&round);

        let settled = match &round.outcome {
            RoundOutcome::Counteracted { .. } => Some(Settled {
                discarded: std::mem::take(&mut in_play),
                retained: std::mem::take(&mut retained),
                trapped: BTreeMap::new(),
            }),
            RoundOutcome::Trapped { trapper } => Some(capture(*trapper, &mut in_play, &mut retained)),
            RoundOutcome::LowestLost { winners, .. } if trapping => {
                let Some(&winner) = winners.keys().next() else {
                    unreachable!("a trapping round is only won by a unique card");
                };
                Some(capture(winner, &mut in_play, &mut retained))
            }
            RoundOutcome::LowestLost { losers, .. } => {
                let mut discarded = BTreeMap::new();
                for (player, cards) in std::mem::take(&mut in_play) {
                    if losers.contains_key(&player) {
                        discarded.insert(player, cards);
                    } else {
                        retained.entry(player).or_default().extend(cards);
                    }
                }
                Some(Settled {
                    discarded,
                    retained: std::mem::take(&mut retained),
                    trapped: BTreeMap::new(),
                })
            }
            RoundOutcome::DoubleDuel { trapping: traps_tied, duelers } => {
                if trapping || *traps_tied {
                    // everything stays at stake for whoever wins the Traps
                    trapping = true;
                } else {
                    let dropped: Vec<PlayerId> = involved
                        .iter()
                        .copied()
                        .filter(|player| !duelers.contains_key(player))
                        .collect();
                    for player in dropped {
                        if let Some(cards) = in_play.remove(&player) {
                            retained.entry(player).or_default().extend(cards);
                        }
                    }
                }
                involved = duelers.keys().copied().collect();
                None
            }
        };

        rounds.push(round);

        if let Some(settled) = settled {
            let result = DuelResult {
                rounds,
                discarded: settled.discarded,
                retained: settled.retained,
                trapped: settled.trapped,
                drawn,
            };
            debug_assert!(result.is_conserved());
            debug_assert!(result.is_well_formed());
            return Ok(result);
        }
    }
}

/// Final destinations of the cards in a duel.
struct Settled {
    discarded: BTreeMap<PlayerId, CardList>,
    retained: BTreeMap<PlayerId, CardList>,
    trapped: BTreeMap<PlayerId, BTreeMap<PlayerId, CardList>>,
}

/// `trapper` captures everything in play: its Traps are discarded, its other
/// cards go back to its hand, and every other player's cards become its own.
fn capture(
    trapper: PlayerId,
    in_play: &mut BTreeMap<PlayerId, CardList>,
    retained: &mut BTreeMap<PlayerId, CardList>,
) -> Settled {
    let mut in_play = std::mem::take(in_play);
    let mut retained = std::mem::take(retained);

    let own = in_play.remove(&trapper).unwrap_or_default();
    let (traps, kept): (CardList, CardList) = own.into_iter().partition(|card| card.is_trap());

    let mut discarded = BTreeMap::new();
    if !traps.is_empty() {
        discarded.insert(trapper, traps);
    }
    if !kept.is_empty() {
        retained.entry(trapper).or_default().extend(kept);
    }

    let mut trapped = BTreeMap::new();
    if !in_play.is_empty() {
        trapped.insert(trapper, in_play);
    }

    Settled { discarded, retained, trapped }
}

fn players_where(played: &BTreeMap<PlayerId, Card>, predicate: impl Fn(Card) -> bool) -> BTreeSet<PlayerId> {
    played
        .iter()
        .filter(|(_, &card)| predicate(card))
        .map(|(&player, _)| player)
        .collect()
}

fn select(played: &BTreeMap<PlayerId, Card>, players: &BTreeSet<PlayerId>) -> BTreeMap<PlayerId, Card> {
    played
        .iter()
        .filter(|(player, _)| players.contains(*player))
        .map(|(&player, &card)| (player, card))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn played(cards: &[(u8, Card)]) -> BTreeMap<PlayerId, Card> {
        cards.iter().map(|&(p, c)| (PlayerId::new(p), c)).collect()
    }

    fn ids(players: &[u8]) -> BTreeSet<PlayerId> {
        players.iter().copied().map(PlayerId::new).collect()
    }

    #[test]
    fn test_lowest_card_loses() {
        let outcome = resolve_round(&played(&[(0, Card::RoboStriker), (1, Card::Buzzy)]), false);
        assert_eq!(
            outcome,
            RoundOutcome::LowestLost {
                losers: played(&[(1, Card::Buzzy)]),
                winners: played(&[(0, Card::RoboStriker)]),
            }
        );
    }

    #[test]
    fn test_tied_lowest_is_double_duel() {
        let outcome = resolve_round(
            &played(&[(0, Card::Crusher), (1, Card::Brainiac), (2, Card::UnBeat)]),
            false,
        );
        assert_eq!(
            outcome,
            RoundOutcome::DoubleDuel {
                trapping: false,
                duelers: played(&[(0, Card::Crusher), (1, Card::Brainiac)]),
            }
        );
    }

    #[test]
    fn test_counteract_beats_trap() {
        let outcome = resolve_round(&played(&[(0, Card::Trap), (1, Card::Counteract), (2, Card::Wind)]), false);
        assert_eq!(outcome, RoundOutcome::Counteracted { counteracters: ids(&[1]) });
    }

    #[test]
    fn test_single_trap() {
        let outcome = resolve_round(&played(&[(0, Card::Ram), (1, Card::Trap)]), true);
        assert_eq!(outcome, RoundOutcome::Trapped { trapper: PlayerId::new(1) });
    }

    #[test]
    fn test_multiple_traps_double_duel() {
        let outcome = resolve_round(&played(&[(0, Card::Trap), (1, Card::Trap), (2, Card::Zip)]), false);
        assert_eq!(
            outcome,
            RoundOutcome::DoubleDuel {
                trapping: true,
                duelers: played(&[(0, Card::Trap), (1, Card::Trap)]),
            }
        );
    }

    #[test]
    fn test_trapping_round_goes_to_highest() {
        let outcome = resolve_round(&played(&[(0, Card::Wind), (1, Card::Slice), (2, Card::Wind)]), true);
        assert_eq!(
            outcome,
            RoundOutcome::LowestLost {
                losers: played(&[(0, Card::Wind), (2, Card::Wind)]),
                winners: played(&[(1, Card::Slice)]),
            }
        );

        let tied = resolve_round(&played(&[(0, Card::Slice), (1, Card::Slice), (2, Card::Wind)]), true);
        assert!(matches!(tied, RoundOutcome::DoubleDuel { trapping: false, ref duelers } if duelers.len() == 2));
    }

    #[test]
    fn test_scripted_supplier_runs_out() {
        let mut supplier = ScriptedSupplier::from_lists(vec![vec![Card::Wind], vec![Card::Ram]]);
        let err = run_duel(&mut supplier, PlayerId::all(2)).unwrap_err();
        assert!(matches!(err, GameError::DeckExhausted));
    }

    #[test]
    fn test_duel_needs_two_players() {
        let mut supplier = ScriptedSupplier::from_lists(vec![vec![Card::Wind], vec![Card::Ram]]);

        for players in [vec![], vec![PlayerId::new(0)]] {
            let err = run_duel(&mut supplier, players.clone()).unwrap_err();
            assert!(matches!(err, GameError::TooFewDuelists { count } if count == players.len()));
        }
        // no cards were requested, so the script is intact
        assert!(run_duel(&mut supplier, PlayerId::all(2)).is_ok());
    }
}
