use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use tethari::game_state::game_state::GameState;
use tethari::search::board_scoring::{BoardScorer, MaterialScorer, StandardScorer};
use tethari::search::minimax::{search_best_move, SearchConfig};
use tethari::utils::notation::{parse_move_token, tokenize_moves};

const OPENING_LINE: &str = "1. b2-b3 b5-b4 2. d2-c4 b6-b5";

fn after_opening() -> GameState {
    let mut game = GameState::new_game();
    for token in tokenize_moves(OPENING_LINE) {
        let mv = parse_move_token(token).expect("benchmark move should parse");
        game.execute_move(mv).expect("benchmark move should be legal");
    }
    game
}

fn bench_depths<S: BoardScorer>(c: &mut Criterion, label: &str, scorer: &S) {
    let mut group = c.benchmark_group(format!("search_{label}"));
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(10);

    for (name, game) in [("start", GameState::new_game()), ("opening", after_opening())] {
        for depth in 1..=3u8 {
            let config = SearchConfig {
                depth,
                movetime_ms: None,
            };
            group.bench_with_input(
                BenchmarkId::new(name, depth),
                &config,
                |b, config| {
                    let mut rng = StdRng::seed_from_u64(7);
                    b.iter(|| {
                        let result = search_best_move(black_box(&game), scorer, *config, &mut rng);
                        black_box(result.nodes)
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    bench_depths(c, "standard", &StandardScorer);
    bench_depths(c, "material", &MaterialScorer);
}

fn bench_evaluation(c: &mut Criterion) {
    let game = after_opening();
    c.bench_function("evaluate_standard", |b| {
        b.iter(|| black_box(StandardScorer.score(black_box(&game))))
    });
}

criterion_group!(search_benches, bench_search, bench_evaluation);
criterion_main!(search_benches);
