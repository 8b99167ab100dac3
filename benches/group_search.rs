use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use shapelogic::cards::{generate_deck, Card};
use shapelogic::core::{GameRng, Variant};
use shapelogic::rules::{find_group, GroupPredicate};
use shapelogic::session::GameSession;

/// Search shuffled tables of the usual sizes.
fn benchmark_find_group(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_group");

    for variant in [Variant::Classic, Variant::Extended, Variant::FourState] {
        let config = variant.config();
        let predicate = GroupPredicate::for_config(&config);
        let mut deck = generate_deck(&config);
        GameRng::new(7).shuffle(&mut deck);

        for size in [12, 15, 21] {
            let table: Vec<&Card> = deck.iter().take(size).collect();
            group.bench_with_input(BenchmarkId::new(variant.name(), size), &table, |b, table| {
                b.iter(|| find_group(black_box(&predicate), black_box(table)))
            });
        }
    }
    group.finish();
}

fn benchmark_projective_search(c: &mut Criterion) {
    let config = Variant::Projective.config();
    let predicate = GroupPredicate::for_config(&config);
    let deck = generate_deck(&config);
    // Numbers 1, 2, 4, 8, 16, 32 are independent; 63 closes the only group
    let table: Vec<&Card> = [0, 1, 3, 7, 15, 31, 62].iter().map(|&i| &deck[i]).collect();

    c.bench_function("find_group_projective_worst_case", |b| {
        b.iter(|| find_group(black_box(&predicate), black_box(&table)))
    });
}

fn benchmark_full_game(c: &mut Criterion) {
    c.bench_function("classic_full_game", |b| {
        b.iter(|| {
            let mut session = GameSession::new(Variant::Classic, black_box(12345));
            while let Some(cards) = session.find_valid_group() {
                for card in cards {
                    session.select_card(card);
                }
            }
            session.score()
        })
    });
}

criterion_group!(benches, benchmark_find_group, benchmark_projective_search, benchmark_full_game);
criterion_main!(benches);
