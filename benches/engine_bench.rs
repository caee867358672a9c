use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

use islander::board::{Board, Position};
use islander::eval::{score_board, ScoringMode};
use islander::game::{generate_choices, GameState};
use islander::search::{run, SearchConfig, SearchVariant};

/// A 9x9 board with two islands, filled by replaying a seeded schedule.
fn played_board() -> Board {
    let mut board = Board::new(9, 9);
    let west: Vec<Position> = (0..3)
        .flat_map(|c| (2..6).map(move |r| Position::new(c, r)))
        .collect();
    let east: Vec<Position> = (5..9)
        .flat_map(|c| (0..3).map(move |r| Position::new(c, r)))
        .collect();
    board.register_island(&west).unwrap();
    board.register_island(&east).unwrap();

    let schedule = generate_choices(17, 40, 2, 9, 9).unwrap();
    let mut state = GameState::new(board, schedule, ScoringMode::Lenient).unwrap();
    while !state.has_ended() {
        state.choose_option(0).unwrap();
    }
    state.board().clone()
}

fn search_root(seed: u64, turns: usize) -> GameState {
    let mut board = Board::new(9, 9);
    board
        .register_island(&[
            Position::new(3, 3),
            Position::new(4, 3),
            Position::new(3, 4),
            Position::new(4, 4),
        ])
        .unwrap();
    let schedule = generate_choices(seed, turns, 2, 9, 9).unwrap();
    GameState::new(board, schedule, ScoringMode::Lenient).unwrap()
}

fn bench_score_lenient(c: &mut Criterion) {
    let board = played_board();
    c.bench_function("score_board_lenient_9x9", |b| {
        b.iter(|| score_board(black_box(&board), ScoringMode::Lenient))
    });
}

fn bench_score_strict(c: &mut Criterion) {
    let board = played_board();
    c.bench_function("score_board_strict_9x9", |b| {
        b.iter(|| score_board(black_box(&board), ScoringMode::Strict))
    });
}

fn bench_state_successor(c: &mut Criterion) {
    let root = search_root(3, 10);
    c.bench_function("game_state_successor", |b| {
        b.iter(|| black_box(&root).successor(1).unwrap())
    });
}

fn bench_exhaustive_8_turns(c: &mut Criterion) {
    let root = search_root(5, 8);
    let config = SearchConfig::default();
    let mut group = c.benchmark_group("search");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(10);
    group.bench_function("exhaustive_8x2", |b| {
        b.iter(|| run(black_box(&root), &config).unwrap())
    });
    group.finish();
}

fn bench_pruned_12_turns(c: &mut Criterion) {
    let root = search_root(5, 12);
    let sequential = SearchConfig {
        variant: SearchVariant::Pruned,
        ..SearchConfig::default()
    };
    let parallel = SearchConfig {
        parallel: true,
        ..sequential.clone()
    };
    let mut group = c.benchmark_group("search_pruned");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(10);
    group.bench_function("pruned_12x2", |b| {
        b.iter(|| run(black_box(&root), &sequential).unwrap())
    });
    group.bench_function("pruned_12x2_parallel", |b| {
        b.iter(|| run(black_box(&root), &parallel).unwrap())
    });
    group.finish();
}

fn bench_board_clone(c: &mut Criterion) {
    let board = played_board();
    c.bench_function("board_clone", |b| b.iter(|| black_box(&board).clone()));
}

criterion_group!(
    benches,
    bench_score_lenient,
    bench_score_strict,
    bench_state_successor,
    bench_exhaustive_8_turns,
    bench_pruned_12_turns,
    bench_board_clone,
);
criterion_main!(benches);
