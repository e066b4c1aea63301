//! The game engine: turn loop, duel orchestration, and event fan-out.
//!
//! A turn is: draw, discard (plus one steal per spy on the discarded card),
//! then a duel among every player still holding cards. Eliminations can end
//! the game after a steal or after the duel.
//!
//! Every public event goes, in order, to the event log, each seat's card
//! tracker, each strategy's `on_event` callback, and finally the listeners
//! registered on the game's [`EventBus`].

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::cards::Card;
use crate::core::{
    Decision, GameConfig, GameError, GameRng, InvalidChoice, PlayerId, PlayerMap, Result, MAX_PLAYERS,
    MIN_PLAYERS,
};
use crate::duel::{run_duel, CardSupplier, DuelRound, PlayedCard};
use crate::events::{EventBus, EventKind, EventType, GameEvent, ListenerId};
use crate::players::{Player, PlayerFactory, Seat};
use crate::zones::Deck;

use super::result::{GameResult, GameSummary};
use super::state::GameState;
use super::view::{PlayerState, PlayerView};

/// A single game between 2 and 10 players.
///
/// Built with [`GameBuilder`] and played to completion with [`Game::run`].
/// A game can only be run once.
///
/// ## Example
///
/// ```
/// use robopower::core::GameConfig;
/// use robopower::game::GameBuilder;
/// use robopower::players::{InOrderPlayer, RandomPlayer};
///
/// let mut game = GameBuilder::new()
///     .config(GameConfig::default().with_seed(7))
///     .factory(InOrderPlayer)
///     .factory(RandomPlayer::factory())
///     .build()
///     .unwrap();
///
/// let summary = game.run().unwrap();
/// assert!(summary.result.is_finished());
/// ```
pub struct Game {
    config: GameConfig,
    state: GameState,
    deck: Deck,
    /// Game-level stream, used for steals.
    rng: GameRng,
    seats: PlayerMap<PlayerState>,
    players: PlayerMap<Box<dyn Player>>,
    names: PlayerMap<String>,
    bus: EventBus,
    strategy_time: PlayerMap<Duration>,
    /// Players eliminated together, in elimination order.
    eliminations: Vec<BTreeSet<PlayerId>>,
    /// Cards in the deck when the game was built.
    total_cards: usize,
    started: bool,
}

impl Game {
    /// A game seating one player from each factory, in order.
    pub fn new(factories: &[Arc<dyn PlayerFactory>], config: GameConfig) -> Result<Self> {
        factories
            .iter()
            .fold(GameBuilder::new().config(config), |builder, factory| {
                builder.shared_factory(Arc::clone(factory))
            })
            .build()
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Private state of `player`'s seat.
    #[must_use]
    pub fn seat(&self, player: PlayerId) -> &PlayerState {
        &self.seats[player]
    }

    #[must_use]
    pub fn player_names(&self) -> &PlayerMap<String> {
        &self.names
    }

    /// Register a listener for every public event.
    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + Send + 'static) -> ListenerId {
        self.bus.subscribe(listener)
    }

    /// Register a listener for one type of event.
    pub fn subscribe_to(
        &mut self,
        event_type: EventType,
        listener: impl FnMut(&GameEvent) + Send + 'static,
    ) -> ListenerId {
        self.bus.subscribe_to(event_type, listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Deal and play until a winner, a tie, or the turn cap.
    ///
    /// Fails with [`GameError::AlreadyRun`] on a second call. Any other error
    /// aborts the game; the state is left as it was at the failure.
    pub fn run(&mut self) -> Result<GameSummary> {
        if self.started {
            return Err(GameError::AlreadyRun);
        }
        self.started = true;

        tracing::debug!(
            players = self.state.player_count(),
            seed = self.rng.seed(),
            "starting game"
        );

        match self.play() {
            Ok(result) => {
                tracing::debug!(?result, turns = self.state.turn(), "game finished");
                Ok(self.summarize(result))
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    player = ?err.player(),
                    turn = self.state.turn(),
                    "game aborted"
                );
                Err(err)
            }
        }
    }

    fn play(&mut self) -> Result<GameResult> {
        self.deal()?;

        loop {
            if self.config.turn_cap_reached(self.state.turn()) {
                return Ok(GameResult::Unfinished);
            }

            self.state.start_turn();
            self.emit(EventKind::StartTurn);
            debug_assert!(self.state.is_active(self.state.up_player()), "up player must hold cards");
            self.check_invariants();

            self.draw()?;
            if let Some(result) = self.discard()? {
                return Ok(result);
            }
            if let Some(result) = self.duel()? {
                return Ok(result);
            }

            self.emit(EventKind::EndTurn);
            if let Some(next) = self.state.next_player() {
                self.state.set_up_player(next);
            }
        }
    }

    /// Deal the starting hands round-robin. Silent: no events, no callbacks.
    fn deal(&mut self) -> Result<()> {
        for _ in 0..self.config.starting_hand_size {
            for player in PlayerId::all(self.state.player_count()) {
                let draw = self.deck.draw()?;
                debug_assert!(draw.reshuffled.is_none(), "nothing to reshuffle during the deal");
                self.seats[player].hand.push(draw.card);
                self.sync_hand(player);
            }
        }
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let up = self.state.up_player();
        let card = self.draw_card()?;
        self.seats[up].hand.push(card);
        self.sync_hand(up);
        self.notify(up, |player, view| player.on_draw(view, card));
        self.emit(EventKind::Draw);
        self.check_invariants();
        Ok(())
    }

    fn discard(&mut self) -> Result<Option<GameResult>> {
        let up = self.state.up_player();
        let index = self.decide(up, Decision::Discard, |player, view| player.discard(view))?;

        let hand_size = self.seats[up].hand.len();
        if index >= hand_size {
            return Err(GameError::InvalidChoice {
                player: up,
                choice: InvalidChoice::Discard { index, hand_size },
            });
        }
        let card = self.seats[up].hand.remove(index);
        self.sync_hand(up);
        self.deck.discard(card);
        self.emit(EventKind::Discard { card });
        self.check_invariants();

        for _ in 0..card.spy_count() {
            if let Some(result) = self.spy()? {
                return Ok(Some(result));
            }
        }
        Ok(None)
    }

    fn spy(&mut self) -> Result<Option<GameResult>> {
        let up = self.state.up_player();
        let target = self.decide(up, Decision::Spy, |player, view| player.spy(view))?;

        let player_count = self.state.player_count();
        let invalid = if target == up {
            Some(InvalidChoice::SpySelf)
        } else if target.index() >= player_count {
            Some(InvalidChoice::SpyOutOfRange { target, player_count })
        } else if self.seats[target].hand.is_empty() {
            Some(InvalidChoice::SpyEmptyHand { target })
        } else {
            None
        };
        if let Some(choice) = invalid {
            return Err(GameError::InvalidChoice { player: up, choice });
        }

        let index = self.rng.gen_index(self.seats[target].hand.len());
        let card = self.seats[target].hand.remove(index);
        self.sync_hand(target);
        self.seats[target].tracker.on_card_stolen(card, up);
        self.notify(target, |player, view| player.on_card_stolen(view, card, up));

        self.seats[up].hand.push(card);
        self.sync_hand(up);
        self.seats[up].tracker.on_receive_stolen_card(card, target);
        self.notify(up, |player, view| player.on_receive_stolen_card(view, card, target));

        let remaining = self.seats[target].hand.len();
        self.emit(EventKind::Spied { target, remaining });

        if remaining == 0 {
            self.eliminate([target].into_iter().collect());
            if self.state.active_count() == 1 {
                return Ok(Some(GameResult::Winner(up)));
            }
        }
        self.check_invariants();
        Ok(None)
    }

    fn duel(&mut self) -> Result<Option<GameResult>> {
        let involved: BTreeSet<PlayerId> = self.state.active_players().collect();
        if involved.len() < 2 {
            return Ok(None);
        }

        let result = run_duel(&mut SeatSupplier { game: self }, involved.iter().copied())?;

        self.state.clear_in_play();
        for cards in result.discarded.values() {
            self.deck.discard_all(cards.iter().copied());
        }
        for (player, cards) in result.returned_to_hands() {
            self.seats[player].hand.extend(cards);
        }
        for &player in &involved {
            self.sync_hand(player);
        }
        self.emit(EventKind::Duel(result));

        let eliminated: BTreeSet<PlayerId> = involved
            .iter()
            .copied()
            .filter(|&player| !self.state.is_active(player))
            .collect();
        if !eliminated.is_empty() {
            self.eliminate(eliminated);
        }
        self.check_invariants();

        Ok(match self.state.active_count() {
            0 => Some(GameResult::Tied(involved)),
            1 => self.state.active_players().next().map(GameResult::Winner),
            _ => None,
        })
    }

    fn eliminate(&mut self, players: BTreeSet<PlayerId>) {
        for &player in &players {
            tracing::debug!(%player, turn = self.state.turn(), "player eliminated");
            self.state.eliminate();
            self.emit(EventKind::Eliminated { player });
        }
        self.eliminations.push(players);
    }

    /// Draw a card, announcing a reshuffle if the draw caused one.
    fn draw_card(&mut self) -> Result<Card> {
        let draw = self.deck.draw()?;
        if let Some(previous_discard) = draw.reshuffled {
            self.emit(EventKind::Reshuffled { previous_discard });
        }
        Ok(draw.card)
    }

    /// Move `card` into `player`'s stake in the current round, hidden until
    /// the round resolves.
    fn commit(&mut self, player: PlayerId, card: Card) {
        self.state.commit(player, card);
        self.sync_hand(player);
    }

    fn sync_hand(&mut self, player: PlayerId) {
        self.state.set_hand_size(player, self.seats[player].hand.len());
    }

    fn emit(&mut self, kind: EventKind) {
        let event = GameEvent::new(self.state.turn(), self.state.up_player(), kind);
        tracing::trace!(%event, "event emitted");
        self.state.record(event.clone());

        for (_, seat) in self.seats.iter_mut() {
            seat.tracker.observe(&event, &self.state, &seat.hand);
        }
        for (player, strategy) in self.players.iter_mut() {
            let view = PlayerView::new(player, &self.state, &self.deck, &self.seats[player]);
            timed(&mut self.strategy_time[player], || strategy.on_event(&view, &event));
        }
        self.bus.publish(&event);
    }

    /// Deliver a private callback to `player`.
    fn notify(&mut self, player: PlayerId, callback: impl FnOnce(&mut dyn Player, &PlayerView<'_>)) {
        let view = PlayerView::new(player, &self.state, &self.deck, &self.seats[player]);
        let strategy = self.players[player].as_mut();
        timed(&mut self.strategy_time[player], || callback(strategy, &view));
    }

    /// Ask `player` for a decision, attributing any failure to them.
    fn decide<T>(
        &mut self,
        player: PlayerId,
        decision: Decision,
        ask: impl FnOnce(&mut dyn Player, &PlayerView<'_>) -> anyhow::Result<T>,
    ) -> Result<T> {
        let view = PlayerView::new(player, &self.state, &self.deck, &self.seats[player]);
        let strategy = self.players[player].as_mut();
        timed(&mut self.strategy_time[player], || ask(strategy, &view))
            .map_err(|source| GameError::Strategy { player, decision, source })
    }

    fn summarize(&self, result: GameResult) -> GameSummary {
        GameSummary {
            placements: self.placements(&result),
            result,
            turns: self.state.turn(),
            strategy_time: self.strategy_time.clone(),
            player_names: self.names.clone(),
            events: self.state.event_log(),
        }
    }

    /// Competition ranking: one plus the number of players who finished
    /// strictly ahead.
    fn placements(&self, result: &GameResult) -> Option<PlayerMap<usize>> {
        let top = match result {
            GameResult::Unfinished => return None,
            finished => finished.winners(),
        };

        let mut places = PlayerMap::with_value(self.state.player_count(), 0);
        for &player in &top {
            places[player] = 1;
        }
        let mut ahead = top.len();
        for group in self.eliminations.iter().rev() {
            let group: Vec<PlayerId> = group.iter().copied().filter(|p| !top.contains(p)).collect();
            for &player in &group {
                places[player] = ahead + 1;
            }
            ahead += group.len();
        }
        Some(places)
    }

    fn check_invariants(&self) {
        if !cfg!(debug_assertions) {
            return;
        }

        let in_hands: usize = self.seats.values().iter().map(|seat| seat.hand.len()).sum();
        let in_play: usize = PlayerId::all(self.state.player_count())
            .map(|player| self.state.in_play_count(player))
            .sum();
        debug_assert_eq!(
            self.deck.draw_pile_size() + self.deck.discard_pile_size() + in_hands + in_play,
            self.total_cards,
            "cards must be conserved"
        );
        for (player, seat) in self.seats.iter() {
            debug_assert_eq!(self.state.hand_sizes()[player], seat.hand.len());
        }

        let turn = self.state.turn() as usize;
        debug_assert_eq!(self.state.count_events(EventType::StartTurn), turn);
        debug_assert_eq!(self.state.count_events(EventType::EndTurn), turn.saturating_sub(1));

        debug_assert_eq!(self.state.active_count(), self.state.active_players().count());
        debug_assert_eq!(
            self.state.active_count() + self.state.count_events(EventType::Eliminated),
            self.state.player_count()
        );
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("config", &self.config)
            .field("players", &self.names)
            .field("turn", &self.state.turn())
            .field("active_count", &self.state.active_count())
            .field("started", &self.started)
            .finish_non_exhaustive()
    }
}

fn timed<T>(elapsed: &mut Duration, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let value = f();
    *elapsed += start.elapsed();
    value
}

/// Feeds a duel from the seats: empty hands draw from the deck, single
/// cards are played automatically, and everyone else is asked.
struct SeatSupplier<'g> {
    game: &'g mut Game,
}

impl SeatSupplier<'_> {
    /// Ask each of `choosers` for a duel card, in parallel if configured.
    ///
    /// Every choice is collected before any card leaves a hand, so both modes
    /// show the strategies the same state.
    fn choices(
        &mut self,
        choosers: &[PlayerId],
        involved: &BTreeSet<PlayerId>,
        previous_rounds: &[DuelRound],
    ) -> Vec<(PlayerId, anyhow::Result<usize>)> {
        let Game { config, state, deck, seats, players, strategy_time, .. } = &mut *self.game;
        let (state, deck, seats) = (&*state, &*deck, &*seats);

        if config.concurrent_duel_choices && choosers.len() > 1 {
            players
                .values_mut()
                .par_iter_mut()
                .zip(strategy_time.values_mut().par_iter_mut())
                .enumerate()
                .filter(|(index, _)| choosers.contains(&PlayerId::new(*index as u8)))
                .map(|(index, (strategy, elapsed))| {
                    let player = PlayerId::new(index as u8);
                    let view = PlayerView::new(player, state, deck, &seats[player]);
                    let choice = timed(elapsed, || strategy.duel(&view, involved, previous_rounds));
                    (player, choice)
                })
                .collect()
        } else {
            choosers
                .iter()
                .map(|&player| {
                    let view = PlayerView::new(player, state, deck, &seats[player]);
                    let strategy = &mut players[player];
                    let choice = timed(&mut strategy_time[player], || {
                        strategy.duel(&view, involved, previous_rounds)
                    });
                    (player, choice)
                })
                .collect()
        }
    }
}

impl CardSupplier for SeatSupplier<'_> {
    fn next_cards(
        &mut self,
        involved: &BTreeSet<PlayerId>,
        previous_rounds: &[DuelRound],
    ) -> Result<BTreeMap<PlayerId, PlayedCard>> {
        let choosers: Vec<PlayerId> = involved
            .iter()
            .copied()
            .filter(|&player| self.game.seats[player].hand.len() > 1)
            .collect();

        // nothing is committed until every choice for the round is in
        let mut chosen = BTreeMap::new();
        for (player, choice) in self.choices(&choosers, involved, previous_rounds) {
            let index = choice.map_err(|source| GameError::Strategy {
                player,
                decision: Decision::Duel,
                source,
            })?;
            let hand_size = self.game.seats[player].hand.len();
            if index >= hand_size {
                return Err(GameError::InvalidChoice {
                    player,
                    choice: InvalidChoice::Duel { index, hand_size },
                });
            }
            chosen.insert(player, index);
        }

        let mut plays = BTreeMap::new();
        for &player in involved {
            let play = if let Some(&index) = chosen.get(&player) {
                PlayedCard::from_hand(self.game.seats[player].hand.remove(index))
            } else if self.game.seats[player].hand.is_empty() {
                PlayedCard::from_deck(self.game.draw_card()?)
            } else {
                PlayedCard::from_hand(self.game.seats[player].hand.remove(0))
            };
            self.game.commit(player, play.card);
            plays.insert(player, play);
        }

        Ok(plays)
    }

    fn round_resolved(&mut self, round: &DuelRound) {
        self.game.state.reveal();
        self.game.emit(EventKind::DuelRound(round.clone()));
    }
}

/// Builder for [`Game`].
///
/// Seats are filled in the order players and factories are added.
pub struct GameBuilder {
    config: GameConfig,
    seats: Vec<SeatSpec>,
    rng: Option<GameRng>,
    deck: Option<Deck>,
    bus: EventBus,
}

enum SeatSpec {
    Factory(Arc<dyn PlayerFactory>),
    Player { name: String, player: Box<dyn Player> },
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            seats: Vec::new(),
            rng: None,
            deck: None,
            bus: EventBus::new(),
        }
    }

    #[must_use]
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Seat a player created by `factory`.
    #[must_use]
    pub fn factory(self, factory: impl PlayerFactory + 'static) -> Self {
        self.shared_factory(Arc::new(factory))
    }

    /// Seat a player created by a factory shared with other games.
    #[must_use]
    pub fn shared_factory(mut self, factory: Arc<dyn PlayerFactory>) -> Self {
        self.seats.push(SeatSpec::Factory(factory));
        self
    }

    /// Seat an already constructed player.
    #[must_use]
    pub fn player(mut self, name: impl Into<String>, player: impl Player + 'static) -> Self {
        self.seats.push(SeatSpec::Player {
            name: name.into(),
            player: Box::new(player),
        });
        self
    }

    /// Use `rng` for the game instead of one seeded from the config.
    #[must_use]
    pub fn rng(mut self, rng: GameRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Use `deck` instead of a freshly shuffled one.
    #[must_use]
    pub fn deck(mut self, deck: Deck) -> Self {
        self.deck = Some(deck);
        self
    }

    /// Register an event listener before the game starts.
    #[must_use]
    pub fn listener(mut self, listener: impl FnMut(&GameEvent) + Send + 'static) -> Self {
        self.bus.subscribe(listener);
        self
    }

    pub fn build(self) -> Result<Game> {
        let player_count = self.seats.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
            return Err(GameError::InvalidPlayerCount {
                count: player_count,
                min: MIN_PLAYERS,
                max: MAX_PLAYERS,
            });
        }
        if self.config.starting_hand_size == 0 {
            return Err(GameError::InvalidConfig {
                reason: "starting hand size must be at least 1",
            });
        }

        let mut rng = self.rng.unwrap_or_else(|| GameRng::new(self.config.seed));
        let deck = match self.deck {
            Some(deck) => deck,
            None => Deck::new(rng.fork()),
        };

        let mut names = Vec::with_capacity(player_count);
        let mut players = Vec::with_capacity(player_count);
        for (player, spec) in PlayerId::all(player_count).zip(self.seats) {
            match spec {
                SeatSpec::Factory(factory) => {
                    let seat = Seat { player, player_count, rng: rng.fork() };
                    names.push(factory.name());
                    players.push(factory.create(seat));
                }
                SeatSpec::Player { name, player } => {
                    names.push(name);
                    players.push(player);
                }
            }
        }

        Ok(Game {
            total_cards: deck.draw_pile_size() + deck.discard_pile_size(),
            state: GameState::new(player_count),
            seats: PlayerMap::new(player_count, |player| PlayerState::new(player, player_count)),
            players: PlayerMap::from_vec(players),
            names: PlayerMap::from_vec(names),
            strategy_time: PlayerMap::with_value(player_count, Duration::ZERO),
            eliminations: Vec::new(),
            config: self.config,
            deck,
            rng,
            bus: self.bus,
            started: false,
        })
    }
}

impl std::fmt::Debug for GameBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameBuilder")
            .field("config", &self.config)
            .field("seats", &self.seats.len())
            .finish_non_exhaustive()
    }
}
