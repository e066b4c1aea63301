//! Duel resolution tests.
//!
//! Each scenario scripts the cards every player commits, round by round, and
//! checks the full `DuelResult`: the rounds and where every card ends up.

use std::collections::BTreeMap;

use proptest::prelude::*;
use robopower::cards::{Card, CardList};
use robopower::core::PlayerId;
use robopower::duel::{run_duel, DuelResult, DuelRound, RoundOutcome, ScriptedSupplier};

fn p(id: u8) -> PlayerId {
    PlayerId::new(id)
}

fn cards(list: &[Card]) -> CardList {
    list.iter().copied().collect()
}

fn piles(entries: &[(u8, &[Card])]) -> BTreeMap<PlayerId, CardList> {
    entries.iter().map(|&(player, list)| (p(player), cards(list))).collect()
}

fn played(entries: &[(u8, Card)]) -> BTreeMap<PlayerId, Card> {
    entries.iter().map(|&(player, card)| (p(player), card)).collect()
}

/// Run a duel among every scripted player.
fn duel(lists: &[&[Card]]) -> DuelResult {
    let mut supplier = ScriptedSupplier::from_lists(lists.iter().map(|list| list.to_vec()).collect());
    let result = run_duel(&mut supplier, PlayerId::all(lists.len())).unwrap();

    let committed: usize = result.rounds.iter().map(|round| round.played.len()).sum();
    assert_eq!(committed, result.settled_count(), "every committed card must be settled");
    assert!(result.is_well_formed());
    result
}

/// Rounds where each player in a round plays the card at that round's index
/// of their list, if they have one.
fn rounds(lists: &[&[Card]], outcomes: Vec<RoundOutcome>) -> Vec<DuelRound> {
    outcomes
        .into_iter()
        .enumerate()
        .map(|(round, outcome)| DuelRound {
            played: lists
                .iter()
                .enumerate()
                .filter_map(|(player, list)| list.get(round).map(|&card| (p(player as u8), card)))
                .collect(),
            drawn: BTreeMap::new(),
            outcome,
        })
        .collect()
}

#[test]
fn test_higher_card_wins_one_on_one() {
    let lists: &[&[Card]] = &[&[Card::RoboStriker], &[Card::Buzzy]];
    let result = duel(lists);

    assert_eq!(
        result,
        DuelResult {
            rounds: rounds(
                lists,
                vec![RoundOutcome::LowestLost {
                    losers: played(&[(1, Card::Buzzy)]),
                    winners: played(&[(0, Card::RoboStriker)]),
                }],
            ),
            discarded: piles(&[(1, &[Card::Buzzy])]),
            retained: piles(&[(0, &[Card::RoboStriker])]),
            trapped: BTreeMap::new(),
            drawn: BTreeMap::new(),
        }
    );
}

#[test]
fn test_lowest_card_loses_in_group_battle() {
    let lists: &[&[Card]] = &[&[Card::UnBeat], &[Card::Buzzy], &[Card::UnBeat], &[Card::Alx]];
    let result = duel(lists);

    assert_eq!(result.discarded, piles(&[(1, &[Card::Buzzy])]));
    assert_eq!(
        result.retained,
        piles(&[(0, &[Card::UnBeat]), (2, &[Card::UnBeat]), (3, &[Card::Alx])])
    );
    assert!(result.trapped.is_empty());
    assert_eq!(
        result.rounds,
        rounds(
            lists,
            vec![RoundOutcome::LowestLost {
                losers: played(&[(1, Card::Buzzy)]),
                winners: played(&[(0, Card::UnBeat), (2, Card::UnBeat), (3, Card::Alx)]),
            }],
        )
    );
}

#[test]
fn test_counteract_discards_everything() {
    let lists: &[&[Card]] = &[&[Card::UnBeat], &[Card::Buzzy], &[Card::UnBeat], &[Card::Counteract]];
    let result = duel(lists);

    assert_eq!(
        result.discarded,
        piles(&[
            (0, &[Card::UnBeat]),
            (1, &[Card::Buzzy]),
            (2, &[Card::UnBeat]),
            (3, &[Card::Counteract]),
        ])
    );
    assert!(result.retained.is_empty());
    assert!(result.trapped.is_empty());
    assert_eq!(
        result.rounds[0].outcome,
        RoundOutcome::Counteracted { counteracters: [p(3)].into_iter().collect() }
    );
}

#[test]
fn test_multiple_counteracts() {
    let lists: &[&[Card]] = &[&[Card::UnBeat], &[Card::Buzzy], &[Card::Counteract], &[Card::Counteract]];
    let result = duel(lists);

    assert_eq!(result.discarded.len(), 4);
    assert_eq!(
        result.rounds[0].outcome,
        RoundOutcome::Counteracted { counteracters: [p(2), p(3)].into_iter().collect() }
    );
}

#[test]
fn test_single_trap_captures_round() {
    let lists: &[&[Card]] = &[&[Card::UnBeat], &[Card::Buzzy], &[Card::UnBeat], &[Card::Trap]];
    let result = duel(lists);

    assert_eq!(result.discarded, piles(&[(3, &[Card::Trap])]));
    assert!(result.retained.is_empty());
    assert_eq!(result.trapped.len(), 1);
    assert_eq!(
        result.trapped[&p(3)],
        piles(&[(0, &[Card::UnBeat]), (1, &[Card::Buzzy]), (2, &[Card::UnBeat])])
    );
    assert_eq!(result.rounds[0].outcome, RoundOutcome::Trapped { trapper: p(3) });
    assert_eq!(result.trapper(), Some(p(3)));
}

#[test]
fn test_counteract_beats_trap() {
    let lists: &[&[Card]] = &[&[Card::UnBeat], &[Card::Buzzy], &[Card::Counteract], &[Card::Trap]];
    let result = duel(lists);

    assert_eq!(result.discarded.len(), 4);
    assert!(result.trapped.is_empty());
    assert_eq!(
        result.rounds[0].outcome,
        RoundOutcome::Counteracted { counteracters: [p(2)].into_iter().collect() }
    );
}

#[test]
fn test_double_duel_with_regular_cards() {
    let lists: &[&[Card]] = &[
        &[Card::Crusher, Card::RoboStriker],
        &[Card::Brainiac, Card::Wind],
        &[Card::UnBeat],
    ];
    let result = duel(lists);

    assert_eq!(
        result.rounds,
        rounds(
            lists,
            vec![
                RoundOutcome::DoubleDuel {
                    trapping: false,
                    duelers: played(&[(0, Card::Crusher), (1, Card::Brainiac)]),
                },
                RoundOutcome::LowestLost {
                    losers: played(&[(1, Card::Wind)]),
                    winners: played(&[(0, Card::RoboStriker)]),
                },
            ],
        )
    );
    assert_eq!(
        result.retained,
        piles(&[(0, &[Card::Crusher, Card::RoboStriker]), (2, &[Card::UnBeat])])
    );
    assert_eq!(result.discarded, piles(&[(1, &[Card::Brainiac, Card::Wind])]));
}

#[test]
fn test_double_duel_is_counteracted() {
    let lists: &[&[Card]] = &[
        &[Card::Crusher, Card::RoboStriker],
        &[Card::Brainiac, Card::Counteract],
        &[Card::UnBeat],
    ];
    let result = duel(lists);

    // the player who dropped out of the tie keeps their card
    assert_eq!(result.retained, piles(&[(2, &[Card::UnBeat])]));
    assert_eq!(
        result.discarded,
        piles(&[
            (0, &[Card::Crusher, Card::RoboStriker]),
            (1, &[Card::Brainiac, Card::Counteract]),
        ])
    );
    assert_eq!(
        result.rounds[1].outcome,
        RoundOutcome::Counteracted { counteracters: [p(1)].into_iter().collect() }
    );
}

#[test]
fn test_double_duel_is_trapped() {
    let lists: &[&[Card]] = &[
        &[Card::Crusher, Card::RoboStriker],
        &[Card::Brainiac, Card::Trap],
        &[Card::UnBeat],
    ];
    let result = duel(lists);

    assert_eq!(result.retained, piles(&[(1, &[Card::Brainiac]), (2, &[Card::UnBeat])]));
    assert_eq!(result.discarded, piles(&[(1, &[Card::Trap])]));
    assert_eq!(
        result.trapped[&p(1)],
        piles(&[(0, &[Card::Crusher, Card::RoboStriker])])
    );
    assert_eq!(result.rounds[1].outcome, RoundOutcome::Trapped { trapper: p(1) });
}

#[test]
fn test_three_way_double_duel_without_traps() {
    let lists: &[&[Card]] = &[
        &[Card::Crusher, Card::UnBeat],
        &[Card::Brainiac, Card::Buzzy],
        &[Card::Crusher, Card::UnBeat],
    ];
    let result = duel(lists);

    assert_eq!(
        result.rounds,
        rounds(
            lists,
            vec![
                RoundOutcome::DoubleDuel {
                    trapping: false,
                    duelers: played(&[(0, Card::Crusher), (1, Card::Brainiac), (2, Card::Crusher)]),
                },
                RoundOutcome::LowestLost {
                    losers: played(&[(1, Card::Buzzy)]),
                    winners: played(&[(0, Card::UnBeat), (2, Card::UnBeat)]),
                },
            ],
        )
    );
    assert_eq!(
        result.retained,
        piles(&[(0, &[Card::Crusher, Card::UnBeat]), (2, &[Card::Crusher, Card::UnBeat])])
    );
    assert_eq!(result.discarded, piles(&[(1, &[Card::Brainiac, Card::Buzzy])]));
}

#[test]
fn test_three_way_trapping_duel_goes_to_highest_card() {
    let lists: &[&[Card]] = &[
        &[Card::Trap, Card::RoboStriker],
        &[Card::Trap, Card::Buzzy],
        &[Card::Trap, Card::Buzzy],
        &[Card::Wind],
    ];
    let result = duel(lists);

    assert_eq!(
        result.rounds,
        rounds(
            lists,
            vec![
                RoundOutcome::DoubleDuel {
                    trapping: true,
                    duelers: played(&[(0, Card::Trap), (1, Card::Trap), (2, Card::Trap)]),
                },
                RoundOutcome::LowestLost {
                    losers: played(&[(1, Card::Buzzy), (2, Card::Buzzy)]),
                    winners: played(&[(0, Card::RoboStriker)]),
                },
            ],
        )
    );
    assert_eq!(result.retained, piles(&[(0, &[Card::RoboStriker])]));
    assert_eq!(result.discarded, piles(&[(0, &[Card::Trap])]));
    // the bystander's Wind stays at stake through the trapping rounds
    assert_eq!(
        result.trapped[&p(0)],
        piles(&[
            (1, &[Card::Trap, Card::Buzzy]),
            (2, &[Card::Trap, Card::Buzzy]),
            (3, &[Card::Wind]),
        ])
    );
}

#[test]
fn test_four_round_trapping_duel() {
    let lists: &[&[Card]] = &[
        &[Card::Trap, Card::Brainiac, Card::Trap, Card::RoboStriker],
        &[Card::Trap, Card::Crusher, Card::Trap, Card::Buzzy],
    ];
    let result = duel(lists);

    assert_eq!(
        result.rounds,
        rounds(
            lists,
            vec![
                RoundOutcome::DoubleDuel {
                    trapping: true,
                    duelers: played(&[(0, Card::Trap), (1, Card::Trap)]),
                },
                RoundOutcome::DoubleDuel {
                    trapping: false,
                    duelers: played(&[(0, Card::Brainiac), (1, Card::Crusher)]),
                },
                RoundOutcome::DoubleDuel {
                    trapping: true,
                    duelers: played(&[(0, Card::Trap), (1, Card::Trap)]),
                },
                RoundOutcome::LowestLost {
                    losers: played(&[(1, Card::Buzzy)]),
                    winners: played(&[(0, Card::RoboStriker)]),
                },
            ],
        )
    );
    assert_eq!(result.retained, piles(&[(0, &[Card::Brainiac, Card::RoboStriker])]));
    assert_eq!(result.discarded, piles(&[(0, &[Card::Trap, Card::Trap])]));
    assert_eq!(
        result.trapped[&p(0)],
        piles(&[(1, &[Card::Trap, Card::Crusher, Card::Trap, Card::Buzzy])])
    );
}

#[test]
fn test_three_way_tie_among_four_recurses() {
    let lists: &[&[Card]] = &[
        &[Card::Wind, Card::Slice],
        &[Card::Wind, Card::Ram],
        &[Card::Wind, Card::Zip],
        &[Card::RoboStriker],
    ];
    let result = duel(lists);

    assert_eq!(result.rounds.len(), 2);
    assert_eq!(result.rounds[1].players().collect::<Vec<_>>(), vec![p(0), p(1), p(2)]);
    assert_eq!(result.discarded, piles(&[(2, &[Card::Wind, Card::Zip])]));
    assert_eq!(result.retained[&p(3)].as_slice(), &[Card::RoboStriker]);
    assert_eq!(result.retained[&p(0)].as_slice(), &[Card::Wind, Card::Slice]);
}

#[test]
fn test_returned_to_hands_merges_retained_and_captured() {
    let result = duel(&[
        &[Card::Crusher, Card::RoboStriker],
        &[Card::Brainiac, Card::Trap],
        &[Card::UnBeat],
    ]);
    let returned = result.returned_to_hands();

    assert_eq!(returned[&p(1)].as_slice(), &[Card::Brainiac, Card::Crusher, Card::RoboStriker]);
    assert_eq!(returned[&p(2)].as_slice(), &[Card::UnBeat]);
    assert!(!returned.contains_key(&p(0)));
}

fn any_card() -> impl Strategy<Value = Card> {
    prop::sample::select(Card::ALL.to_vec())
}

proptest! {
    /// With enough cards scripted that no player runs out, every duel settles
    /// each committed card exactly once, and replaying it gives the same result.
    #[test]
    fn prop_duel_conserves_and_is_deterministic(
        lists in prop::collection::vec(prop::collection::vec(any_card(), 40), 2..6)
    ) {
        let run = || {
            let mut supplier = ScriptedSupplier::from_lists(lists.clone());
            run_duel(&mut supplier, PlayerId::all(lists.len()))
        };

        // identical scripts can tie forever; only check duels that end
        if let Ok(result) = run() {
            prop_assert!(result.is_conserved());
            prop_assert!(result.is_well_formed());
            prop_assert_eq!(run().ok(), Some(result));
        }
    }

    #[test]
    fn prop_first_round_involves_everyone(
        lists in prop::collection::vec(prop::collection::vec(any_card(), 40), 2..6)
    ) {
        let mut supplier = ScriptedSupplier::from_lists(lists.clone());
        if let Ok(result) = run_duel(&mut supplier, PlayerId::all(lists.len())) {
            prop_assert_eq!(result.participants().len(), lists.len());
            for pair in result.rounds.windows(2) {
                let narrowed = pair[1].players().all(|player| pair[0].played.contains_key(&player));
                prop_assert!(narrowed);
            }
        }
    }
}
