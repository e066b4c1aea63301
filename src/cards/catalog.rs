//! The card catalog - every card kind and its static attributes.
//!
//! The catalog is a fixed table. Derived values (ranks, stronger/weaker
//! counts) are computed at compile time from the table, so lookups are plain
//! array reads.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A small list of cards, as played by one player during a duel.
pub type CardList = SmallVec<[Card; 4]>;

/// Total number of cards in a full deck.
pub const DECK_SIZE: usize = deck_size();

/// A kind of card.
///
/// The derived `Ord` is catalog order, which is not strength order; use
/// [`Card::rank`] or [`Card::duel_strength`] to compare cards by value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Card {
    Counteract,
    Trap,
    SpyMaster,
    Spy,
    Buzzy,
    Wind,
    Shock,
    Rock,
    Lightor,
    Zip,
    Hairy,
    Grapple,
    Brainy,
    Blade,
    Alx,
    Brainiac,
    Crusher,
    Ram,
    Slice,
    UnBeat,
    Copy,
    RoboStriker,
}

/// Static attributes of a card kind.
struct Entry {
    name: &'static str,
    strength: Option<u32>,
    spy_count: u8,
    multiplicity: u8,
}

const fn entry(name: &'static str, strength: Option<u32>, spy_count: u8, multiplicity: u8) -> Entry {
    Entry { name, strength, spy_count, multiplicity }
}

const CATALOG: [Entry; Card::COUNT] = [
    entry("Counteract", None, 0, 3),
    entry("Trap", None, 0, 10),
    entry("Spy Master", Some(1), 2, 1),
    entry("Spy", Some(3), 1, 4),
    entry("Buzzy", Some(10), 0, 6),
    entry("Wind", Some(25), 0, 7),
    entry("Shock", Some(30), 0, 7),
    entry("Rock", Some(35), 0, 7),
    entry("Lightor", Some(40), 0, 8),
    entry("Zip", Some(50), 0, 4),
    entry("Hairy", Some(51), 0, 6),
    entry("Grapple", Some(60), 0, 8),
    entry("Brainy", Some(65), 0, 4),
    entry("Blade", Some(70), 0, 3),
    entry("Alx", Some(75), 0, 3),
    entry("Brainiac", Some(85), 0, 3),
    entry("Crusher", Some(85), 0, 3),
    entry("Ram", Some(120), 0, 4),
    entry("Slice", Some(160), 0, 3),
    entry("Un-Beat", Some(200), 0, 2),
    entry("Copy", Some(205), 0, 2),
    entry("Robo Striker", Some(210), 0, 1),
];

const fn deck_size() -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < Card::COUNT {
        total += CATALOG[i].multiplicity as usize;
        i += 1;
    }
    total
}

const _: () = assert!(deck_size() == 99);

/// Number of card kinds with a strength strictly below each kind's strength.
const STRENGTH_RANKS: [Option<u8>; Card::COUNT] = {
    let mut ranks = [None; Card::COUNT];
    let mut i = 0;
    while i < Card::COUNT {
        if let Some(strength) = CATALOG[i].strength {
            let mut below = 0u8;
            let mut j = 0;
            while j < Card::COUNT {
                if let Some(other) = CATALOG[j].strength {
                    if other < strength {
                        below += 1;
                    }
                }
                j += 1;
            }
            ranks[i] = Some(below);
        }
        i += 1;
    }
    ranks
};

const MAX_STRENGTH_RANK: u8 = {
    let mut max = 0;
    let mut i = 0;
    while i < Card::COUNT {
        if let Some(rank) = STRENGTH_RANKS[i] {
            if rank > max {
                max = rank;
            }
        }
        i += 1;
    }
    max
};

/// How a strength-bearing card's multiplicities are summed against another's.
#[derive(Clone, Copy)]
enum Relation {
    Stronger,
    StrongerOrEqual,
    Weaker,
    WeakerOrEqual,
}

const fn count_by(relation: Relation) -> [Option<u8>; Card::COUNT] {
    let mut counts = [None; Card::COUNT];
    let mut i = 0;
    while i < Card::COUNT {
        if let Some(strength) = CATALOG[i].strength {
            let mut total = 0u8;
            let mut j = 0;
            while j < Card::COUNT {
                if let Some(other) = CATALOG[j].strength {
                    let counted = match relation {
                        Relation::Stronger => other > strength,
                        Relation::StrongerOrEqual => other >= strength,
                        Relation::Weaker => other < strength,
                        Relation::WeakerOrEqual => other <= strength,
                    };
                    if counted {
                        total += CATALOG[j].multiplicity;
                    }
                }
                j += 1;
            }
            counts[i] = Some(total);
        }
        i += 1;
    }
    counts
}

const COUNT_STRONGER: [Option<u8>; Card::COUNT] = count_by(Relation::Stronger);
const COUNT_STRONGER_OR_EQUAL: [Option<u8>; Card::COUNT] = count_by(Relation::StrongerOrEqual);
const COUNT_WEAKER: [Option<u8>; Card::COUNT] = count_by(Relation::Weaker);
const COUNT_WEAKER_OR_EQUAL: [Option<u8>; Card::COUNT] = count_by(Relation::WeakerOrEqual);

fn widen(value: Option<u8>) -> Option<usize> {
    value.map(usize::from)
}

impl Card {
    /// Number of card kinds.
    pub const COUNT: usize = 22;

    /// Every card kind, in catalog order.
    pub const ALL: [Card; Card::COUNT] = [
        Card::Counteract,
        Card::Trap,
        Card::SpyMaster,
        Card::Spy,
        Card::Buzzy,
        Card::Wind,
        Card::Shock,
        Card::Rock,
        Card::Lightor,
        Card::Zip,
        Card::Hairy,
        Card::Grapple,
        Card::Brainy,
        Card::Blade,
        Card::Alx,
        Card::Brainiac,
        Card::Crusher,
        Card::Ram,
        Card::Slice,
        Card::UnBeat,
        Card::Copy,
        Card::RoboStriker,
    ];

    fn entry(self) -> &'static Entry {
        &CATALOG[self.index()]
    }

    /// Position of this kind in catalog order.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Human-readable name, without strength.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.entry().name
    }

    /// Dueling strength; `None` for Trap and Counteract.
    #[must_use]
    pub fn strength(self) -> Option<u32> {
        self.entry().strength
    }

    /// Strength used when comparing cards in a duel round, with strengthless
    /// cards counted as the weakest.
    #[must_use]
    pub fn duel_strength(self) -> u32 {
        self.strength().unwrap_or(0)
    }

    /// Number of cards the discarding player steals when this card is discarded.
    #[must_use]
    pub fn spy_count(self) -> u8 {
        self.entry().spy_count
    }

    /// Copies of this card in a full deck.
    #[must_use]
    pub fn multiplicity(self) -> u8 {
        self.entry().multiplicity
    }

    /// Whether this is the neutralizer (Counteract), which voids a duel round.
    #[must_use]
    pub fn is_counteract(self) -> bool {
        self == Card::Counteract
    }

    /// Whether this is the snare (Trap), which captures a duel round.
    #[must_use]
    pub fn is_trap(self) -> bool {
        self == Card::Trap
    }

    /// A regular unit: has a strength and no spy ability.
    #[must_use]
    pub fn is_normal(self) -> bool {
        self.strength().is_some() && self.spy_count() == 0
    }

    /// Anything but Trap and Counteract.
    #[must_use]
    pub fn is_normal_or_spy(self) -> bool {
        self.strength().is_some()
    }

    /// Number of distinct strengths strictly below this card's; `None` for
    /// strengthless cards.
    ///
    /// ```
    /// use robopower::cards::Card;
    ///
    /// assert_eq!(Card::SpyMaster.strength_rank(), Some(0));
    /// assert_eq!(Card::Brainiac.strength_rank(), Card::Crusher.strength_rank());
    /// assert_eq!(Card::Trap.strength_rank(), None);
    /// ```
    #[must_use]
    pub fn strength_rank(self) -> Option<usize> {
        widen(STRENGTH_RANKS[self.index()])
    }

    /// Total value ordering: strength rank for normal cards, Trap one above
    /// the strongest card and Counteract above Trap.
    #[must_use]
    pub fn rank(self) -> usize {
        let top = usize::from(MAX_STRENGTH_RANK);
        match self {
            Card::Counteract => top + 2,
            Card::Trap => top + 1,
            _ => self.strength_rank().unwrap_or_default(),
        }
    }

    /// Copies in the deck of cards strictly stronger than this one.
    #[must_use]
    pub fn count_stronger(self) -> Option<usize> {
        widen(COUNT_STRONGER[self.index()])
    }

    /// Copies in the deck of cards at least as strong as this one, including
    /// this card's own copies.
    #[must_use]
    pub fn count_stronger_or_equal(self) -> Option<usize> {
        widen(COUNT_STRONGER_OR_EQUAL[self.index()])
    }

    /// Copies in the deck of cards strictly weaker than this one.
    #[must_use]
    pub fn count_weaker(self) -> Option<usize> {
        widen(COUNT_WEAKER[self.index()])
    }

    /// Copies in the deck of cards at most as strong as this one.
    #[must_use]
    pub fn count_weaker_or_equal(self) -> Option<usize> {
        widen(COUNT_WEAKER_OR_EQUAL[self.index()])
    }

    /// An unshuffled full deck: every kind repeated by its multiplicity.
    #[must_use]
    pub fn full_deck() -> Vec<Card> {
        Card::ALL
            .iter()
            .flat_map(|&card| std::iter::repeat(card).take(usize::from(card.multiplicity())))
            .collect()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.strength() {
            Some(strength) => write!(f, "{} [{}]", self.name(), strength),
            None => f.write_str(self.name()),
        }
    }
}
