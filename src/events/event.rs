//! Public game events.
//!
//! Every event is stamped with the turn count and the player whose turn it
//! was when it was emitted. Events only describe what every player at the
//! table can see: a discarded card is public, a drawn or stolen card is not.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::PlayerId;
use crate::duel::{DuelResult, DuelRound};

/// What happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// The up player's turn begins, before they draw.
    StartTurn,

    /// The up player's turn ends, after the duel.
    EndTurn,

    /// The up player drew their card for the turn.
    Draw,

    /// The up player discarded `card` for the turn.
    Discard { card: Card },

    /// The up player stole a card from `target`, who has `remaining` cards left.
    Spied { target: PlayerId, remaining: usize },

    /// `player` has no cards left and is out of the game.
    Eliminated { player: PlayerId },

    /// The draw pile ran out and `previous_discard` was shuffled into it.
    Reshuffled { previous_discard: Vec<Card> },

    /// A round of the current duel was resolved.
    DuelRound(DuelRound),

    /// The duel for the turn finished.
    Duel(DuelResult),
}

/// Identifies an [`EventKind`] variant without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    StartTurn,
    EndTurn,
    Draw,
    Discard,
    Spied,
    Eliminated,
    Reshuffled,
    DuelRound,
    Duel,
}

impl EventKind {
    /// The variant of this event.
    #[must_use]
    pub fn event_type(&self) -> EventType {
        match self {
            EventKind::StartTurn => EventType::StartTurn,
            EventKind::EndTurn => EventType::EndTurn,
            EventKind::Draw => EventType::Draw,
            EventKind::Discard { .. } => EventType::Discard,
            EventKind::Spied { .. } => EventType::Spied,
            EventKind::Eliminated { .. } => EventType::Eliminated,
            EventKind::Reshuffled { .. } => EventType::Reshuffled,
            EventKind::DuelRound(_) => EventType::DuelRound,
            EventKind::Duel(_) => EventType::Duel,
        }
    }
}

/// A public game event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Turn count at emission; 0 before the first turn.
    pub turn: u32,

    /// Player whose turn it was at emission.
    pub up_player: PlayerId,

    pub kind: EventKind,
}

impl GameEvent {
    #[must_use]
    pub fn new(turn: u32, up_player: PlayerId, kind: EventKind) -> Self {
        Self { turn, up_player, kind }
    }

    /// The variant of this event.
    #[must_use]
    pub fn event_type(&self) -> EventType {
        self.kind.event_type()
    }

    /// Whether this event is of type `event_type`.
    #[must_use]
    pub fn is(&self, event_type: EventType) -> bool {
        self.event_type() == event_type
    }
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[turn {}, {}] ", self.turn, self.up_player)?;
        match &self.kind {
            EventKind::StartTurn => f.write_str("start turn"),
            EventKind::EndTurn => f.write_str("end turn"),
            EventKind::Draw => f.write_str("draw"),
            EventKind::Discard { card } => write!(f, "discard {card}"),
            EventKind::Spied { target, remaining } => {
                write!(f, "spied {target} ({remaining} cards left)")
            }
            EventKind::Eliminated { player } => write!(f, "{player} eliminated"),
            EventKind::Reshuffled { previous_discard } => {
                write!(f, "reshuffled {} discarded cards", previous_discard.len())
            }
            EventKind::DuelRound(round) => write!(f, "duel round {:?}", round.outcome),
            EventKind::Duel(result) => write!(f, "duel over after {} rounds", result.rounds.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type() {
        let event = GameEvent::new(3, PlayerId::new(1), EventKind::Discard { card: Card::Spy });
        assert_eq!(event.event_type(), EventType::Discard);
        assert!(event.is(EventType::Discard));
        assert!(!event.is(EventType::Draw));
    }

    #[test]
    fn test_display() {
        let event = GameEvent::new(
            2,
            PlayerId::new(0),
            EventKind::Spied { target: PlayerId::new(1), remaining: 4 },
        );
        assert_eq!(event.to_string(), "[turn 2, Player 0] spied Player 1 (4 cards left)");
    }

    #[test]
    fn test_serde() {
        let event = GameEvent::new(1, PlayerId::new(0), EventKind::Eliminated { player: PlayerId::new(2) });
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
