//! Per-player bookkeeping of which opponent cards are known.
//!
//! A tracker follows the public event stream (plus two private callbacks for
//! steals involving its own player) and records, for each opponent, cards
//! that are provably in that opponent's hand. Everything else that is not in
//! the observer's hand or the discard pile is "unaccounted for": it is in the
//! draw pile or in some opponent's hand unknown to the observer.
//!
//! Some compound inferences are deliberately not made. For example when a
//! player with two known cards has one stolen and then plays the other, the
//! stolen card could be deduced but is not.

use std::sync::OnceLock;

use crate::cards::{Card, CardCounts};
use crate::core::{PlayerId, PlayerMap};
use crate::duel::DuelResult;
use crate::events::{EventKind, GameEvent};
use crate::game::GameState;

/// Known cards in opponents' hands, from one player's point of view.
#[derive(Debug)]
pub struct CardTracker {
    observer: PlayerId,
    /// Known cards per player, in the order they became known. The
    /// observer's own entry is always empty.
    known: PlayerMap<Vec<Card>>,
    /// Full deck minus every known card; rebuilt lazily after knowledge changes.
    unknown_base: OnceLock<CardCounts>,
}

impl CardTracker {
    /// A tracker for `observer` in a game of `player_count` players, knowing nothing.
    #[must_use]
    pub fn new(observer: PlayerId, player_count: usize) -> Self {
        Self {
            observer,
            known: PlayerMap::with_default(player_count),
            unknown_base: OnceLock::new(),
        }
    }

    /// The player this tracker belongs to.
    #[must_use]
    pub fn observer(&self) -> PlayerId {
        self.observer
    }

    /// Cards known to be in `player`'s hand.
    #[must_use]
    pub fn known_cards(&self, player: PlayerId) -> &[Card] {
        self.known.get(player).map_or(&[][..], Vec::as_slice)
    }

    /// Known cards for every player.
    #[must_use]
    pub fn known(&self) -> &PlayerMap<Vec<Card>> {
        &self.known
    }

    /// Update from a public event.
    ///
    /// `state` and `hand` (the observer's current hand) must reflect the game
    /// at the moment the event was emitted.
    pub fn observe(&mut self, event: &GameEvent, state: &GameState, hand: &[Card]) {
        match &event.kind {
            EventKind::Discard { card } => {
                if event.up_player != self.observer {
                    self.forget(event.up_player, *card);
                }
            }
            EventKind::Duel(result) => self.observe_duel(result),
            EventKind::Spied { target, remaining } => {
                self.observe_spy(event.up_player, *target, *remaining);
            }
            EventKind::Reshuffled { previous_discard } => {
                self.observe_reshuffle(previous_discard, state, hand);
            }
            _ => {}
        }
    }

    /// The observer stole `card` from `from`.
    pub fn on_receive_stolen_card(&mut self, card: Card, from: PlayerId) {
        self.forget(from, card);
    }

    /// `by` stole `card` from the observer.
    pub fn on_card_stolen(&mut self, card: Card, by: PlayerId) {
        self.learn(by, card);
    }

    /// Cards neither in `hand`, in `discard_pile`, nor known to be in an
    /// opponent's hand.
    #[must_use]
    pub fn unaccounted(&self, hand: &[Card], discard_pile: &[Card]) -> CardCounts {
        let mut unknown = *self.unknown_base.get_or_init(|| {
            let mut base = CardCounts::full_deck();
            for cards in self.known.values() {
                base.remove_all(cards);
            }
            base
        });
        unknown.remove_all(hand);
        unknown.remove_all(discard_pile);
        unknown
    }

    /// Unaccounted copies of `card`.
    #[must_use]
    pub fn count_unaccounted(&self, card: Card, hand: &[Card], discard_pile: &[Card]) -> usize {
        self.unaccounted(hand, discard_pile).count(card)
    }

    /// Unaccounted cards matching `predicate`.
    #[must_use]
    pub fn count_unaccounted_matching(
        &self,
        predicate: impl Fn(Card) -> bool,
        hand: &[Card],
        discard_pile: &[Card],
    ) -> usize {
        self.unaccounted(hand, discard_pile).count_matching(predicate)
    }

    fn observe_duel(&mut self, result: &DuelResult) {
        for (&player, discarded) in &result.discarded {
            if player != self.observer {
                for &card in discarded {
                    self.forget(player, card);
                }
            }
        }

        // retained cards may already be known; only add copies beyond those
        for (&player, retained) in &result.retained {
            if player == self.observer {
                continue;
            }
            let retained: CardCounts = retained.iter().collect();
            for (card, count) in retained.iter() {
                let known = self.known_cards(player).iter().filter(|&&c| c == card).count();
                for _ in known..count {
                    self.learn(player, card);
                }
            }
        }

        for (&trapper, by_victim) in &result.trapped {
            for (&victim, cards) in by_victim {
                for &card in cards {
                    if victim != self.observer {
                        self.forget(victim, card);
                    }
                    if trapper != self.observer {
                        self.learn(trapper, card);
                    }
                }
            }
        }
    }

    fn observe_spy(&mut self, thief: PlayerId, victim: PlayerId, remaining: usize) {
        // steals involving the observer arrive through the direct callbacks
        if thief == self.observer || victim == self.observer {
            return;
        }

        // the victim's last card was stolen; if we knew it, so does the thief now
        if remaining == 0 {
            if let Some(&card) = self.known_cards(victim).first() {
                self.learn(thief, card);
            }
        }

        // any of the victim's cards could have been taken
        if let Some(cards) = self.known.get_mut(victim) {
            if !cards.is_empty() {
                cards.clear();
                self.invalidate();
            }
        }
    }

    /// With a single opponent left, the reshuffle reveals their whole hand:
    /// every card not in our hand, in the old discard pile, or in play.
    fn observe_reshuffle(&mut self, previous_discard: &[Card], state: &GameState, hand: &[Card]) {
        let mut opponents = state.active_players().filter(|&p| p != self.observer);
        let (Some(opponent), None) = (opponents.next(), opponents.next()) else {
            return;
        };

        let mut remaining = CardCounts::full_deck();
        remaining.remove_all(previous_discard);
        remaining.remove_all(hand);
        for player in PlayerId::all(state.player_count()) {
            remaining.remove_all(state.committed(player));
        }

        if let Some(known) = self.known.get_mut(opponent) {
            *known = remaining.to_vec();
        }
        self.invalidate();
    }

    fn learn(&mut self, player: PlayerId, card: Card) {
        if let Some(cards) = self.known.get_mut(player) {
            cards.push(card);
            self.invalidate();
        }
    }

    fn forget(&mut self, player: PlayerId, card: Card) {
        if let Some(cards) = self.known.get_mut(player) {
            if let Some(pos) = cards.iter().position(|&c| c == card) {
                cards.remove(pos);
                self.invalidate();
            }
        }
    }

    fn invalidate(&mut self) {
        self.unknown_base.take();
    }
}
