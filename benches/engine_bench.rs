//! Engine benchmarks
//!
//! Move generation, classification, evaluation and search using Criterion.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use duel_chess::evaluation::evaluate;
use duel_chess::{Color, Game, Legality, SearchEngine};

fn bench_move_generation_starting(c: &mut Criterion) {
    let game = Game::new();

    c.bench_function("all_moves_starting_position", |b| {
        b.iter(|| black_box(game.board().all_moves(Color::White)))
    });
}

fn bench_legal_moves_starting(c: &mut Criterion) {
    let game = Game::new().with_legality(Legality::Strict);

    c.bench_function("legal_moves_starting_position", |b| {
        b.iter(|| black_box(game.candidate_moves()))
    });
}

fn bench_apply_move(c: &mut Criterion) {
    let game = Game::new();
    let mv = game.board().all_moves(Color::White)[0];

    c.bench_function("apply_move_with_classification", |b| {
        b.iter(|| {
            let mut child = game.clone();
            black_box(child.apply_move(mv).is_ok())
        })
    });
}

fn bench_evaluate_starting(c: &mut Criterion) {
    let game = Game::new();

    c.bench_function("evaluate_starting_position", |b| {
        b.iter(|| black_box(evaluate(&game, Color::White)))
    });
}

fn bench_search_depth_2(c: &mut Criterion) {
    let game = Game::new();

    let mut group = c.benchmark_group("search");
    group.sample_size(10);
    group.bench_function("best_move_depth_2", |b| {
        b.iter(|| {
            let mut engine = SearchEngine::new(Color::White, 2);
            black_box(engine.best_move(&game))
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_move_generation_starting,
    bench_legal_moves_starting,
    bench_apply_move,
    bench_evaluate_starting,
    bench_search_depth_2,
);
criterion_main!(benches);
