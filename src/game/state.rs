//! Public game state.
//!
//! Everything here is visible to every player. It is mutated only by the
//! game engine; strategies receive it by shared reference.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardList};
use crate::core::{PlayerId, PlayerMap};
use crate::events::{EventType, GameEvent};

/// Public state of a game in progress.
///
/// The event log is an `im::Vector`, so [`GameState::event_log`] is an O(1)
/// snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    player_count: usize,

    /// Turns started so far; 0 during the initial deal.
    turn: u32,

    /// Player whose turn it is.
    up_player: PlayerId,

    /// Cards in each hand, excluding cards committed to the current duel.
    hand_sizes: PlayerMap<usize>,

    /// Cards each player committed in the resolved rounds of the current duel.
    in_play: PlayerMap<CardList>,

    /// Cards committed to the round being played, hidden until it resolves.
    #[serde(skip)]
    pending: Vec<(PlayerId, Card)>,

    /// Players not yet eliminated.
    active_count: usize,

    events: Vector<GameEvent>,
}

impl GameState {
    /// State before the deal: no cards in hand, every player counted active.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            turn: 0,
            up_player: PlayerId::new(0),
            hand_sizes: PlayerMap::with_value(player_count, 0),
            in_play: PlayerMap::with_default(player_count),
            pending: Vec::new(),
            active_count: player_count,
            events: Vector::new(),
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Turns started so far; 0 before the first turn.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Player whose turn it is.
    #[must_use]
    pub fn up_player(&self) -> PlayerId {
        self.up_player
    }

    /// Cards held by `player`, including cards committed to the current duel.
    #[must_use]
    pub fn hand_size(&self, player: PlayerId) -> usize {
        self.hand_sizes[player] + self.in_play_count(player)
    }

    /// Hand sizes excluding cards committed to the current duel.
    #[must_use]
    pub fn hand_sizes(&self) -> &PlayerMap<usize> {
        &self.hand_sizes
    }

    /// Cards committed in the resolved rounds of the current duel, by player.
    /// Cards of the round being played are not shown until it resolves.
    /// Empty between duels.
    #[must_use]
    pub fn in_play(&self) -> &PlayerMap<CardList> {
        &self.in_play
    }

    /// Number of cards `player` has committed to the current duel, including
    /// the round being played.
    #[must_use]
    pub fn in_play_count(&self, player: PlayerId) -> usize {
        self.in_play[player].len() + self.pending.iter().filter(|(p, _)| *p == player).count()
    }

    /// Every card `player` has committed to the current duel, including the
    /// hidden cards of the round being played.
    pub(crate) fn committed(&self, player: PlayerId) -> impl Iterator<Item = &Card> + '_ {
        self.in_play[player].iter().chain(
            self.pending
                .iter()
                .filter(move |(p, _)| *p == player)
                .map(|(_, card)| card),
        )
    }

    /// Whether `player` still holds any card, in hand or in play.
    #[must_use]
    pub fn is_active(&self, player: PlayerId) -> bool {
        self.hand_size(player) > 0
    }

    /// Number of players not yet eliminated.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// Players still holding cards, in seat order.
    pub fn active_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        PlayerId::all(self.player_count).filter(|&p| self.is_active(p))
    }

    /// The next active player after the up player, wrapping around the table.
    #[must_use]
    pub fn next_player(&self) -> Option<PlayerId> {
        let mut player = self.up_player;
        for _ in 0..self.player_count {
            player = player.next(self.player_count);
            if self.is_active(player) {
                return Some(player);
            }
        }
        None
    }

    /// Turns until `player` is up; 0 if it is their turn. `None` if they are out.
    #[must_use]
    pub fn turns_until_up(&self, player: PlayerId) -> Option<usize> {
        if !self.is_active(player) {
            return None;
        }
        let mut turns = 0;
        let mut current = self.up_player;
        while current != player {
            current = current.next(self.player_count);
            if self.is_active(current) {
                turns += 1;
            }
        }
        Some(turns)
    }

    /// Every event so far, in emission order.
    #[must_use]
    pub fn events(&self) -> &Vector<GameEvent> {
        &self.events
    }

    /// O(1) snapshot of the event log.
    #[must_use]
    pub fn event_log(&self) -> Vector<GameEvent> {
        self.events.clone()
    }

    /// Number of logged events of type `event_type`.
    #[must_use]
    pub fn count_events(&self, event_type: EventType) -> usize {
        self.events.iter().filter(|e| e.is(event_type)).count()
    }

    pub(crate) fn start_turn(&mut self) {
        self.turn += 1;
    }

    pub(crate) fn set_up_player(&mut self, player: PlayerId) {
        self.up_player = player;
    }

    pub(crate) fn set_hand_size(&mut self, player: PlayerId, size: usize) {
        self.hand_sizes[player] = size;
    }

    /// Commit `card` to the round being played. It stays hidden until [`GameState::reveal`].
    pub(crate) fn commit(&mut self, player: PlayerId, card: Card) {
        self.pending.push((player, card));
    }

    /// The round resolved: its cards become public.
    pub(crate) fn reveal(&mut self) {
        for (player, card) in self.pending.drain(..) {
            self.in_play[player].push(card);
        }
    }

    pub(crate) fn clear_in_play(&mut self) {
        self.pending.clear();
        for (_, cards) in self.in_play.iter_mut() {
            cards.clear();
        }
    }

    pub(crate) fn eliminate(&mut self) {
        self.active_count = self.active_count.saturating_sub(1);
    }

    pub(crate) fn record(&mut self, event: GameEvent) {
        self.events.push_back(event);
    }
}
