//! Baseline strategies, for tests and as reference opponents.

use std::collections::BTreeSet;

use anyhow::Context;

use crate::core::{GameRng, PlayerId};
use crate::duel::DuelRound;
use crate::game::PlayerView;

use super::strategy::{FnFactory, Player, PlayerFactory, Seat};

/// Always discards and duels with the first card in hand, and spies on the
/// lowest-indexed opponent still in the game.
#[derive(Clone, Copy, Debug, Default)]
pub struct InOrderPlayer;

impl Player for InOrderPlayer {
    fn discard(&mut self, _view: &PlayerView<'_>) -> anyhow::Result<usize> {
        Ok(0)
    }

    fn spy(&mut self, view: &PlayerView<'_>) -> anyhow::Result<PlayerId> {
        view.opponents().next().context("no opponent left to spy on")
    }

    fn duel(
        &mut self,
        _view: &PlayerView<'_>,
        _involved: &BTreeSet<PlayerId>,
        _previous_rounds: &[DuelRound],
    ) -> anyhow::Result<usize> {
        Ok(0)
    }
}

impl PlayerFactory for InOrderPlayer {
    fn create(&self, _seat: Seat) -> Box<dyn Player> {
        Box::new(InOrderPlayer)
    }
}

/// Makes every decision uniformly at random from its own RNG stream.
#[derive(Debug)]
pub struct RandomPlayer {
    rng: GameRng,
}

impl RandomPlayer {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }

    /// Factory handing each seat its own forked stream.
    #[must_use]
    pub fn factory() -> impl PlayerFactory {
        FnFactory::new("RandomPlayer", |seat: Seat| -> Box<dyn Player> {
            Box::new(RandomPlayer::new(seat.rng))
        })
    }

    fn pick_card(&mut self, view: &PlayerView<'_>) -> anyhow::Result<usize> {
        let hand_size = view.hand().len();
        anyhow::ensure!(hand_size > 0, "asked to choose from an empty hand");
        Ok(self.rng.gen_index(hand_size))
    }
}

impl Player for RandomPlayer {
    fn discard(&mut self, view: &PlayerView<'_>) -> anyhow::Result<usize> {
        self.pick_card(view)
    }

    fn spy(&mut self, view: &PlayerView<'_>) -> anyhow::Result<PlayerId> {
        let opponents: Vec<PlayerId> = view.opponents().collect();
        self.rng
            .choose(&opponents)
            .copied()
            .context("no opponent left to spy on")
    }

    fn duel(
        &mut self,
        view: &PlayerView<'_>,
        _involved: &BTreeSet<PlayerId>,
        _previous_rounds: &[DuelRound],
    ) -> anyhow::Result<usize> {
        self.pick_card(view)
    }
}
