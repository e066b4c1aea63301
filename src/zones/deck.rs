//! Draw and discard piles.
//!
//! The draw pile is popped from its end; the discard pile grows at its end.
//! When the draw pile runs out the discard pile is shuffled into it.

use serde::Serialize;

use crate::cards::Card;
use crate::core::{GameError, GameRng, Result};

/// A card drawn from the deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Draw {
    /// The drawn card.
    pub card: Card,

    /// The discard pile as it was before being reshuffled into the draw pile,
    /// if the draw triggered a reshuffle.
    pub reshuffled: Option<Vec<Card>>,
}

/// Manages the draw and discard piles of a game.
#[derive(Debug)]
pub struct Deck {
    draw_pile: Vec<Card>,
    discard_pile: Vec<Card>,
    rng: GameRng,
}

impl Deck {
    /// A full, shuffled deck with an empty discard pile.
    #[must_use]
    pub fn new(mut rng: GameRng) -> Self {
        let mut draw_pile = Card::full_deck();
        rng.shuffle(&mut draw_pile);
        Self::from_piles(draw_pile, Vec::new(), rng)
    }

    /// A deck with the given piles. The last card of `draw_pile` is drawn first.
    #[must_use]
    pub fn from_piles(draw_pile: Vec<Card>, discard_pile: Vec<Card>, rng: GameRng) -> Self {
        Self { draw_pile, discard_pile, rng }
    }

    /// Draw the top card.
    ///
    /// If the draw pile is empty the discard pile is shuffled into it first.
    /// Fails with [`GameError::DeckExhausted`] if both piles are empty.
    pub fn draw(&mut self) -> Result<Draw> {
        let reshuffled = if self.draw_pile.is_empty() {
            if self.discard_pile.is_empty() {
                return Err(GameError::DeckExhausted);
            }
            Some(self.reshuffle())
        } else {
            None
        };

        let card = self.draw_pile.pop().ok_or(GameError::DeckExhausted)?;
        Ok(Draw { card, reshuffled })
    }

    /// Put `card` on top of the discard pile.
    pub fn discard(&mut self, card: Card) {
        self.discard_pile.push(card);
    }

    /// Put every card in `cards` on top of the discard pile, in order.
    pub fn discard_all(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.discard_pile.extend(cards);
    }

    #[must_use]
    pub fn draw_pile_size(&self) -> usize {
        self.draw_pile.len()
    }

    /// The discard pile, oldest first.
    #[must_use]
    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    #[must_use]
    pub fn discard_pile_size(&self) -> usize {
        self.discard_pile.len()
    }

    /// Move the shuffled discard pile into the draw pile, returning its
    /// pre-shuffle contents.
    fn reshuffle(&mut self) -> Vec<Card> {
        let previous = std::mem::take(&mut self.discard_pile);
        let mut shuffled = previous.clone();
        self.rng.shuffle(&mut shuffled);
        self.draw_pile.extend(shuffled);
        tracing::debug!(cards = previous.len(), "discard pile reshuffled into draw pile");
        previous
    }
}
