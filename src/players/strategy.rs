//! The strategy contract between the engine and its players.
//!
//! A strategy makes three kinds of decisions: which card to discard, whom to
//! spy on, and which card to play in a duel round. It sees the game only
//! through a [`PlayerView`] and never mutates shared state.
//!
//! Decision methods return `anyhow::Result`; an `Err` aborts the game as a
//! strategy fault attributed to the player. A returned index that is out of
//! range aborts it as an invalid choice instead.

use std::collections::BTreeSet;

use crate::cards::Card;
use crate::core::{GameRng, PlayerId};
use crate::duel::DuelRound;
use crate::events::GameEvent;
use crate::game::PlayerView;

/// A complete strategy for one seat.
pub trait Player: Send {
    /// Index into the hand of the card to discard at the start of the turn.
    ///
    /// If the discarded card is a spy, [`Player::spy`] is called once per
    /// steal it grants.
    fn discard(&mut self, view: &PlayerView<'_>) -> anyhow::Result<usize>;

    /// Player to steal a random card from. Must be another player who still
    /// has cards in hand.
    fn spy(&mut self, view: &PlayerView<'_>) -> anyhow::Result<PlayerId>;

    /// Index into the hand of the card to play in a duel round among
    /// `involved`, after `previous_rounds` of the same duel.
    ///
    /// Not called when the hand holds a single card (it is played
    /// automatically) or no cards (one is drawn from the deck instead).
    fn duel(
        &mut self,
        view: &PlayerView<'_>,
        involved: &BTreeSet<PlayerId>,
        previous_rounds: &[DuelRound],
    ) -> anyhow::Result<usize>;

    /// A public event was emitted. `view` reflects the game after the event.
    fn on_event(&mut self, _view: &PlayerView<'_>, _event: &GameEvent) {}

    /// `card` was drawn into the hand at the start of this player's turn.
    fn on_draw(&mut self, _view: &PlayerView<'_>, _card: Card) {}

    /// `by` stole `card` from this player.
    fn on_card_stolen(&mut self, _view: &PlayerView<'_>, _card: Card, _by: PlayerId) {}

    /// This player stole `card` from `from`.
    fn on_receive_stolen_card(&mut self, _view: &PlayerView<'_>, _card: Card, _from: PlayerId) {}
}

impl<P: Player + ?Sized> Player for Box<P> {
    fn discard(&mut self, view: &PlayerView<'_>) -> anyhow::Result<usize> {
        (**self).discard(view)
    }

    fn spy(&mut self, view: &PlayerView<'_>) -> anyhow::Result<PlayerId> {
        (**self).spy(view)
    }

    fn duel(
        &mut self,
        view: &PlayerView<'_>,
        involved: &BTreeSet<PlayerId>,
        previous_rounds: &[DuelRound],
    ) -> anyhow::Result<usize> {
        (**self).duel(view, involved, previous_rounds)
    }

    fn on_event(&mut self, view: &PlayerView<'_>, event: &GameEvent) {
        (**self).on_event(view, event);
    }

    fn on_draw(&mut self, view: &PlayerView<'_>, card: Card) {
        (**self).on_draw(view, card);
    }

    fn on_card_stolen(&mut self, view: &PlayerView<'_>, card: Card, by: PlayerId) {
        (**self).on_card_stolen(view, card, by);
    }

    fn on_receive_stolen_card(&mut self, view: &PlayerView<'_>, card: Card, from: PlayerId) {
        (**self).on_receive_stolen_card(view, card, from);
    }
}

/// What a factory knows about the seat it is creating a player for.
#[derive(Debug)]
pub struct Seat {
    pub player: PlayerId,
    pub player_count: usize,
    /// Independent random stream for this seat.
    pub rng: GameRng,
}

/// Creates a fresh [`Player`] for each game.
pub trait PlayerFactory: Send + Sync {
    /// Display name for players from this factory.
    fn name(&self) -> String {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full).to_string()
    }

    fn create(&self, seat: Seat) -> Box<dyn Player>;
}

/// Factory built from a name and a constructor function.
pub struct FnFactory<F> {
    name: String,
    create: F,
}

impl<F> FnFactory<F>
where
    F: Fn(Seat) -> Box<dyn Player> + Send + Sync,
{
    #[must_use]
    pub fn new(name: impl Into<String>, create: F) -> Self {
        Self { name: name.into(), create }
    }
}

impl<F> PlayerFactory for FnFactory<F>
where
    F: Fn(Seat) -> Box<dyn Player> + Send + Sync,
{
    fn name(&self) -> String {
        self.name.clone()
    }

    fn create(&self, seat: Seat) -> Box<dyn Player> {
        (self.create)(seat)
    }
}

/// A discard strategy that may decline to decide.
pub trait OptionalDiscard: Send {
    fn discard(&mut self, view: &PlayerView<'_>) -> anyhow::Result<Option<usize>>;
}

/// A spy strategy that may decline to decide.
pub trait OptionalSpy: Send {
    fn spy(&mut self, view: &PlayerView<'_>) -> anyhow::Result<Option<PlayerId>>;
}

/// A duel strategy that may decline to decide.
pub trait OptionalDuel: Send {
    fn duel(
        &mut self,
        view: &PlayerView<'_>,
        involved: &BTreeSet<PlayerId>,
        previous_rounds: &[DuelRound],
    ) -> anyhow::Result<Option<usize>>;
}

/// A player assembled from optional strategies.
///
/// Each decision goes to the optional strategies for it in the order they
/// were added; the first answer wins. If none answers, the fallback player
/// decides, and without a fallback the decision fails.
///
/// ## Example
///
/// ```
/// use robopower::game::PlayerView;
/// use robopower::players::{CompositePlayer, InOrderPlayer, OptionalDiscard};
///
/// /// Throw away a spy whenever we hold one.
/// struct DiscardSpies;
///
/// impl OptionalDiscard for DiscardSpies {
///     fn discard(&mut self, view: &PlayerView<'_>) -> anyhow::Result<Option<usize>> {
///         Ok(view.hand().iter().position(|card| card.spy_count() > 0))
///     }
/// }
///
/// let player = CompositePlayer::new()
///     .with_discard(DiscardSpies)
///     .with_fallback(InOrderPlayer);
/// ```
#[derive(Default)]
pub struct CompositePlayer {
    discard: Vec<Box<dyn OptionalDiscard>>,
    spy: Vec<Box<dyn OptionalSpy>>,
    duel: Vec<Box<dyn OptionalDuel>>,
    fallback: Option<Box<dyn Player>>,
}

impl CompositePlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_discard(mut self, strategy: impl OptionalDiscard + 'static) -> Self {
        self.discard.push(Box::new(strategy));
        self
    }

    #[must_use]
    pub fn with_spy(mut self, strategy: impl OptionalSpy + 'static) -> Self {
        self.spy.push(Box::new(strategy));
        self
    }

    #[must_use]
    pub fn with_duel(mut self, strategy: impl OptionalDuel + 'static) -> Self {
        self.duel.push(Box::new(strategy));
        self
    }

    /// Player consulted when no optional strategy answers. It also receives
    /// every callback.
    #[must_use]
    pub fn with_fallback(mut self, player: impl Player + 'static) -> Self {
        self.fallback = Some(Box::new(player));
        self
    }
}

impl Player for CompositePlayer {
    fn discard(&mut self, view: &PlayerView<'_>) -> anyhow::Result<usize> {
        for strategy in &mut self.discard {
            if let Some(index) = strategy.discard(view)? {
                return Ok(index);
            }
        }
        match &mut self.fallback {
            Some(player) => player.discard(view),
            None => anyhow::bail!("no discard strategy provided a result"),
        }
    }

    fn spy(&mut self, view: &PlayerView<'_>) -> anyhow::Result<PlayerId> {
        for strategy in &mut self.spy {
            if let Some(target) = strategy.spy(view)? {
                return Ok(target);
            }
        }
        match &mut self.fallback {
            Some(player) => player.spy(view),
            None => anyhow::bail!("no spy strategy provided a result"),
        }
    }

    fn duel(
        &mut self,
        view: &PlayerView<'_>,
        involved: &BTreeSet<PlayerId>,
        previous_rounds: &[DuelRound],
    ) -> anyhow::Result<usize> {
        for strategy in &mut self.duel {
            if let Some(index) = strategy.duel(view, involved, previous_rounds)? {
                return Ok(index);
            }
        }
        match &mut self.fallback {
            Some(player) => player.duel(view, involved, previous_rounds),
            None => anyhow::bail!("no duel strategy provided a result"),
        }
    }

    fn on_event(&mut self, view: &PlayerView<'_>, event: &GameEvent) {
        if let Some(player) = &mut self.fallback {
            player.on_event(view, event);
        }
    }

    fn on_draw(&mut self, view: &PlayerView<'_>, card: Card) {
        if let Some(player) = &mut self.fallback {
            player.on_draw(view, card);
        }
    }

    fn on_card_stolen(&mut self, view: &PlayerView<'_>, card: Card, by: PlayerId) {
        if let Some(player) = &mut self.fallback {
            player.on_card_stolen(view, card, by);
        }
    }

    fn on_receive_stolen_card(&mut self, view: &PlayerView<'_>, card: Card, from: PlayerId) {
        if let Some(player) = &mut self.fallback {
            player.on_receive_stolen_card(view, card, from);
        }
    }
}
