//! Property tests for the table invariants.
//!
//! Random seeds and random tap sequences drive sessions of every variant.
//! After each operation the deck must still be partitioned, the selection
//! must be a subset of the table, and the table must satisfy its
//! variant's policy.

use proptest::prelude::*;

use shapelogic::cards::{generate_deck, Card};
use shapelogic::core::{GameRng, TablePolicy, Variant};
use shapelogic::rules::{find_group, GroupPredicate};
use shapelogic::session::GameSession;

fn variant_strategy() -> impl Strategy<Value = Variant> {
    prop_oneof![
        Just(Variant::Classic),
        Just(Variant::Extended),
        Just(Variant::FourState),
        Just(Variant::Projective),
    ]
}

/// What a tap sequence does at one step.
#[derive(Clone, Debug)]
enum Step {
    /// Tap the table card at this index, modulo the table size.
    Tap(usize),
    /// Play the first valid group on the table.
    PlayGroup,
    /// Ask for an extra batch.
    MoreCards,
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        6 => any::<usize>().prop_map(Step::Tap),
        2 => Just(Step::PlayGroup),
        1 => Just(Step::MoreCards),
    ]
}

fn apply(session: &mut GameSession, step: &Step) {
    match *step {
        Step::Tap(index) => {
            let table = session.table_ids();
            if !table.is_empty() {
                session.select_card(table[index % table.len()]);
            }
        }
        Step::PlayGroup => {
            // Start from a clean selection so the group commits
            for id in session.selected_card_ids().to_vec() {
                session.select_card(id);
            }
            if let Some(group) = session.find_valid_group() {
                for id in group {
                    session.select_card(id);
                }
            }
        }
        Step::MoreCards => {
            session.request_more_cards();
        }
    }
}

fn check_invariants(session: &GameSession) -> Result<(), TestCaseError> {
    let manager = session.table_manager();
    prop_assert!(manager.is_partitioned());

    for id in session.selected_card_ids() {
        prop_assert!(manager.is_on_table(*id), "selected {} is not on the table", id);
    }

    let table = session.table_ids().len();
    match session.config().table_policy {
        TablePolicy::Replenish { floor, .. } => {
            if session.draw_pile_count() > 0 {
                prop_assert!(table >= floor);
                prop_assert!(manager.has_valid_group());
            }
        }
        TablePolicy::FixedSize { target } => {
            if session.draw_pile_count() > 0 {
                prop_assert_eq!(table, target);
            }
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_invariants_hold_under_random_play(
        variant in variant_strategy(),
        seed in any::<u64>(),
        steps in prop::collection::vec(step_strategy(), 0..80),
    ) {
        let mut session = GameSession::new(variant, seed);
        check_invariants(&session)?;

        let mut last_score = session.score();
        for step in &steps {
            apply(&mut session, step);
            check_invariants(&session)?;

            prop_assert!(session.score() >= last_score);
            last_score = session.score();
        }
    }

    #[test]
    fn prop_projective_seven_cards_hold_a_group(
        indices in proptest::sample::subsequence((0..63usize).collect::<Vec<_>>(), 7),
    ) {
        let config = Variant::Projective.config();
        let predicate = GroupPredicate::for_config(&config);
        let deck = generate_deck(&config);

        let table: Vec<&Card> = indices.iter().map(|&i| &deck[i]).collect();
        let group = find_group(&predicate, &table);
        prop_assert!(group.is_some());
    }

    #[test]
    fn prop_projective_games_clear_the_table(seed in any::<u64>()) {
        let mut session = GameSession::new(Variant::Projective, seed);

        while let Some(group) = session.find_valid_group() {
            for id in group {
                session.select_card(id);
            }
            check_invariants(&session)?;
        }

        prop_assert!(session.is_over());
        prop_assert!(session.table_ids().is_empty());
        prop_assert_eq!(session.collected().len(), 63);
    }

    #[test]
    fn prop_same_seed_same_deal(variant in variant_strategy(), seed in any::<u64>()) {
        let a = GameSession::new(variant, seed);
        let b = GameSession::new(variant, seed);
        prop_assert_eq!(a.table_ids(), b.table_ids());
        prop_assert_eq!(a.draw_pile_count(), b.draw_pile_count());
    }
}

/// Scatter deals place cards anywhere but keep every invariant.
#[test]
fn test_scatter_deals_keep_invariants() {
    let config = Variant::Classic.config().with_scatter_deals(true);
    let mut session = shapelogic::session::SessionBuilder::from_config(config)
        .random_source(GameRng::new(8))
        .build()
        .unwrap();

    while let Some(group) = session.find_valid_group() {
        for id in group {
            session.select_card(id);
        }
        assert!(session.table_manager().is_partitioned());
    }
    assert!(session.is_over());
}
