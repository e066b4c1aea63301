//! Fixed-size card multiset.

use serde::{Deserialize, Serialize};

use super::catalog::Card;

/// A multiset of cards stored as one counter per card kind.
///
/// Removing a card that is not present is a no-op, so subtracting one
/// collection from another never underflows.
///
/// ## Example
///
/// ```
/// use robopower::cards::{Card, CardCounts};
///
/// let mut counts = CardCounts::full_deck();
/// assert_eq!(counts.count(Card::Trap), 10);
///
/// counts.remove(Card::Trap);
/// assert_eq!(counts.count(Card::Trap), 9);
/// assert_eq!(counts.total(), 98);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardCounts {
    counts: [u8; Card::COUNT],
}

impl CardCounts {
    /// An empty multiset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every card in a full deck.
    #[must_use]
    pub fn full_deck() -> Self {
        let mut counts = [0; Card::COUNT];
        for card in Card::ALL {
            counts[card.index()] = card.multiplicity();
        }
        Self { counts }
    }

    /// Add one copy of `card`.
    pub fn add(&mut self, card: Card) {
        self.counts[card.index()] = self.counts[card.index()].saturating_add(1);
    }

    /// Remove one copy of `card`. Returns false if none was present.
    pub fn remove(&mut self, card: Card) -> bool {
        let slot = &mut self.counts[card.index()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    /// Remove one copy of each card in `cards`.
    pub fn remove_all<'a>(&mut self, cards: impl IntoIterator<Item = &'a Card>) {
        for &card in cards {
            self.remove(card);
        }
    }

    /// Copies of `card` present.
    #[must_use]
    pub fn count(&self, card: Card) -> usize {
        usize::from(self.counts[card.index()])
    }

    /// Copies of all cards matching `predicate`.
    #[must_use]
    pub fn count_matching(&self, predicate: impl Fn(Card) -> bool) -> usize {
        self.iter()
            .filter(|&(card, _)| predicate(card))
            .map(|(_, count)| count)
            .sum()
    }

    /// Total number of cards.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().map(|&c| usize::from(c)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Iterate over (card, count) pairs with a non-zero count, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (Card, usize)> + '_ {
        Card::ALL
            .iter()
            .map(|&card| (card, self.count(card)))
            .filter(|&(_, count)| count > 0)
    }

    /// Expand into a list with each card repeated by its count, in catalog order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Card> {
        self.iter()
            .flat_map(|(card, count)| std::iter::repeat(card).take(count))
            .collect()
    }
}

impl Extend<Card> for CardCounts {
    fn extend<I: IntoIterator<Item = Card>>(&mut self, iter: I) {
        for card in iter {
            self.add(card);
        }
    }
}

impl<'a> Extend<&'a Card> for CardCounts {
    fn extend<I: IntoIterator<Item = &'a Card>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl FromIterator<Card> for CardCounts {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut counts = Self::new();
        counts.extend(iter);
        counts
    }
}

impl<'a> FromIterator<&'a Card> for CardCounts {
    fn from_iter<I: IntoIterator<Item = &'a Card>>(iter: I) -> Self {
        iter.into_iter().copied().collect()
    }
}
