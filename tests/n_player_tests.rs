//! N-player capability verification tests.
//!
//! These tests verify that the engine has no hidden 2-player assumptions
//! and works for every supported table size.

use std::sync::Arc;

use proptest::prelude::*;
use rayon::prelude::*;
use robopower::core::{GameConfig, PlayerId, MAX_PLAYERS, MIN_PLAYERS};
use robopower::events::{EventKind, EventType};
use robopower::game::{Game, GameResult, GameSummary};
use robopower::players::{InOrderPlayer, PlayerFactory, RandomPlayer};

fn random_factories(count: usize) -> Vec<Arc<dyn PlayerFactory>> {
    (0..count)
        .map(|_| Arc::new(RandomPlayer::factory()) as Arc<dyn PlayerFactory>)
        .collect()
}

fn play(player_count: usize, seed: u64) -> GameSummary {
    let mut game = Game::new(&random_factories(player_count), GameConfig::default().with_seed(seed)).unwrap();
    game.run().unwrap()
}

/// Every table size plays to a winner or a tie.
#[test]
fn test_all_table_sizes_finish() {
    for player_count in MIN_PLAYERS..=MAX_PLAYERS {
        for seed in 0..3 {
            let summary = play(player_count, seed);
            assert!(summary.result.is_finished(), "{player_count} players, seed {seed}");
            assert_eq!(summary.strategy_time.player_count(), player_count);
            assert_eq!(summary.player_names.player_count(), player_count);
        }
    }
}

/// Everyone but the winners is eliminated exactly once.
#[test]
fn test_eliminations_account_for_every_player() {
    for player_count in [3, 6, 10] {
        let summary = play(player_count, 17);
        let eliminated: Vec<PlayerId> = summary
            .events
            .iter()
            .filter_map(|event| match event.kind {
                EventKind::Eliminated { player } => Some(player),
                _ => None,
            })
            .collect();

        let mut unique = eliminated.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), eliminated.len());

        match &summary.result {
            GameResult::Winner(winner) => {
                assert_eq!(eliminated.len(), player_count - 1);
                assert!(!eliminated.contains(winner));
            }
            GameResult::Tied(players) => {
                assert_eq!(eliminated.len(), player_count);
                assert!(players.iter().all(|player| eliminated.contains(player)));
            }
            GameResult::Unfinished => panic!("uncapped game did not finish"),
        }
    }
}

/// Places are 1-based, the top place is shared only by a tie, and later
/// eliminations place better.
#[test]
fn test_placements() {
    for seed in 0..10 {
        let player_count = 5;
        let summary = play(player_count, seed);
        let places = summary.placements.as_ref().unwrap();

        for (player, &place) in places.iter() {
            assert!((1..=player_count).contains(&place), "{player} placed {place}");
        }
        let firsts = places.values().iter().filter(|&&place| place == 1).count();
        assert_eq!(firsts, summary.result.winners().len());

        let order: Vec<PlayerId> = summary
            .events
            .iter()
            .filter_map(|event| match event.kind {
                EventKind::Eliminated { player } => Some(player),
                _ => None,
            })
            .collect();
        for pair in order.windows(2) {
            assert!(places[pair[0]] >= places[pair[1]]);
        }
    }
}

/// Turns are announced once each, in order, by an active player.
#[test]
fn test_turn_structure() {
    let summary = play(7, 4);

    let starts = summary.events.iter().filter(|event| event.is(EventType::StartTurn)).count();
    let ends = summary.events.iter().filter(|event| event.is(EventType::EndTurn)).count();
    assert_eq!(starts, summary.turns as usize);
    assert_eq!(ends, starts - 1);

    let mut last_turn = 0;
    for event in &summary.events {
        assert!(event.turn >= last_turn);
        last_turn = event.turn;
    }
}

/// Every turn has a duel with at least two players unless a steal ended the game.
#[test]
fn test_every_completed_turn_has_a_duel() {
    let summary = play(4, 21);
    let duels = summary.events.iter().filter(|event| event.is(EventType::Duel)).count();
    let ends = summary.events.iter().filter(|event| event.is(EventType::EndTurn)).count();
    assert!(duels >= ends);

    for event in &summary.events {
        if let EventKind::Duel(result) = &event.kind {
            assert!(result.participants().len() >= 2);
            assert!(result.is_conserved());
        }
    }
}

#[test]
fn test_in_order_players_at_full_table() {
    let factories: Vec<Arc<dyn PlayerFactory>> = (0..MAX_PLAYERS)
        .map(|_| Arc::new(InOrderPlayer) as Arc<dyn PlayerFactory>)
        .collect();
    let mut game = Game::new(&factories, GameConfig::default()).unwrap();
    let summary = game.run().unwrap();

    assert!(summary.result.is_finished());
    assert_eq!(summary.player_names[PlayerId::new(9)], "InOrderPlayer");
}

#[test]
fn test_game_is_send() {
    fn assert_send<T: Send>() {}
    assert_send::<Game>();
    assert_send::<GameSummary>();
}

/// Independent games can run in parallel, sharing only their factories.
#[test]
fn test_parallel_games_match_sequential() {
    let factories = random_factories(4);
    let run = |seed: u64| {
        let mut game = Game::new(&factories, GameConfig::default().with_seed(seed)).unwrap();
        game.run().unwrap()
    };

    let parallel: Vec<GameSummary> = (0..16u64).into_par_iter().map(run).collect();
    for (seed, summary) in parallel.iter().enumerate() {
        let sequential = run(seed as u64);
        assert_eq!(summary.result, sequential.result);
        assert_eq!(summary.events, sequential.events);
    }
}

/// A turn cap stops the game exactly there.
#[test]
fn test_turn_cap() {
    let mut game = Game::new(&random_factories(6), GameConfig::default().with_max_turns(3)).unwrap();
    let summary = game.run().unwrap();

    if summary.result == GameResult::Unfinished {
        assert_eq!(summary.turns, 3);
        assert!(summary.placements.is_none());
    } else {
        assert!(summary.turns <= 3);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_any_seed_and_size_finishes(seed in any::<u64>(), player_count in MIN_PLAYERS..=MAX_PLAYERS) {
        let summary = play(player_count, seed);
        prop_assert!(summary.result.is_finished());
        prop_assert_eq!(summary.placements.map(|places| places.player_count()), Some(player_count));
    }
}
