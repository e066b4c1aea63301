//! A single player's view of the game.

use crate::cards::{Card, CardCounts, CardList};
use crate::core::PlayerId;
use crate::tracker::CardTracker;
use crate::zones::Deck;

use super::state::GameState;

/// Private state of one seat: its hand and its card tracker.
#[derive(Debug)]
pub struct PlayerState {
    /// Cards in hand. New cards are always appended.
    pub(crate) hand: Vec<Card>,
    pub(crate) tracker: CardTracker,
}

impl PlayerState {
    #[must_use]
    pub fn new(player: PlayerId, player_count: usize) -> Self {
        Self {
            hand: Vec::new(),
            tracker: CardTracker::new(player, player_count),
        }
    }

    #[must_use]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    #[must_use]
    pub fn tracker(&self) -> &CardTracker {
        &self.tracker
    }
}

/// What a strategy may see: the public state, the deck's public piles, and
/// its own hand and tracker.
#[derive(Clone, Copy, Debug)]
pub struct PlayerView<'a> {
    player: PlayerId,
    state: &'a GameState,
    deck: &'a Deck,
    seat: &'a PlayerState,
}

impl<'a> PlayerView<'a> {
    #[must_use]
    pub fn new(player: PlayerId, state: &'a GameState, deck: &'a Deck, seat: &'a PlayerState) -> Self {
        Self { player, state, deck, seat }
    }

    /// The player this view belongs to.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    #[must_use]
    pub fn state(&self) -> &'a GameState {
        self.state
    }

    /// Own hand, excluding cards committed to the current duel.
    #[must_use]
    pub fn hand(&self) -> &'a [Card] {
        &self.seat.hand
    }

    /// Own cards committed to the current duel, including the round being played.
    #[must_use]
    pub fn committed(&self) -> CardList {
        self.state.committed(self.player).copied().collect()
    }

    #[must_use]
    pub fn tracker(&self) -> &'a CardTracker {
        &self.seat.tracker
    }

    /// The discard pile, oldest first.
    #[must_use]
    pub fn discard_pile(&self) -> &'a [Card] {
        self.deck.discard_pile()
    }

    #[must_use]
    pub fn draw_pile_size(&self) -> usize {
        self.deck.draw_pile_size()
    }

    /// Other players still in the game, in seat order.
    pub fn opponents(&self) -> impl Iterator<Item = PlayerId> + 'a {
        let me = self.player;
        self.state.active_players().filter(move |&p| p != me)
    }

    /// Cards known to be in `player`'s hand.
    #[must_use]
    pub fn known_cards(&self, player: PlayerId) -> &'a [Card] {
        self.tracker().known_cards(player)
    }

    /// Cards not in own hand, not discarded, and not known to be in an
    /// opponent's hand.
    #[must_use]
    pub fn unaccounted(&self) -> CardCounts {
        self.tracker().unaccounted(self.hand(), self.discard_pile())
    }

    /// Unaccounted copies of `card`.
    #[must_use]
    pub fn count_unaccounted(&self, card: Card) -> usize {
        self.tracker().count_unaccounted(card, self.hand(), self.discard_pile())
    }

    /// Unaccounted cards matching `predicate`.
    #[must_use]
    pub fn count_unaccounted_matching(&self, predicate: impl Fn(Card) -> bool) -> usize {
        self.tracker()
            .count_unaccounted_matching(predicate, self.hand(), self.discard_pile())
    }

    /// Copies of `card` whose location is known.
    #[must_use]
    pub fn count_accounted(&self, card: Card) -> usize {
        usize::from(card.multiplicity()).saturating_sub(self.count_unaccounted(card))
    }
}
