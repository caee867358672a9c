//! Library-level checks of the search against brute-force enumeration.
//!
//! Schedules are generated from fixed seeds, so every case here is
//! reproducible.

use islander::board::{Board, BoardError, Position, Terrain, MAX_ISLANDS};
use islander::eval::{score_board, ScoringMode};
use islander::game::{generate_choices, GameState};
use islander::search::{replay, run, SearchConfig, SearchVariant};

fn root(seed: u64, cols: usize, rows: usize, turns: usize, choices: usize) -> GameState {
    let schedule = generate_choices(seed, turns, choices, cols, rows).unwrap();
    GameState::new(Board::new(cols, rows), schedule, ScoringMode::Lenient).unwrap()
}

/// Every path of `turns` choices in lexicographic order.
fn all_paths(turns: usize, choices: usize) -> Vec<Vec<usize>> {
    let total = choices.pow(turns as u32);
    (0..total)
        .map(|mut n| {
            let mut path = vec![0; turns];
            for slot in path.iter_mut().rev() {
                *slot = n % choices;
                n /= choices;
            }
            path
        })
        .collect()
}

/// Best score and the first path reaching it.
fn brute_force(root: &GameState) -> (i32, Vec<usize>) {
    let mut best: Option<(i32, Vec<usize>)> = None;
    for path in all_paths(root.turn_limit(), root.choice_count()) {
        let score = replay(root, &path).unwrap().score();
        if best.as_ref().map_or(true, |(b, _)| score > *b) {
            best = Some((score, path));
        }
    }
    best.unwrap()
}

/// Best score and first path among paths whose score never goes negative
/// and never drops from one turn to the next; (0, []) if there are none.
fn brute_force_non_decreasing(root: &GameState) -> (i32, Vec<usize>) {
    let mut best: Option<(i32, Vec<usize>)> = None;
    'paths: for path in all_paths(root.turn_limit(), root.choice_count()) {
        let mut state = root.clone();
        for &i in path.iter() {
            let previous = state.score();
            state.choose_option(i).unwrap();
            if state.score() < 0 || state.score() < previous {
                continue 'paths;
            }
        }
        if best.as_ref().map_or(true, |(b, _)| state.score() > *b) {
            best = Some((state.score(), path));
        }
    }
    best.unwrap_or((0, Vec::new()))
}

fn pruned() -> SearchConfig {
    SearchConfig {
        variant: SearchVariant::Pruned,
        ..SearchConfig::default()
    }
}

#[test]
fn single_cell_board() {
    let schedule = generate_choices(0, 1, 1, 1, 1).unwrap();
    let state = GameState::new(Board::new(1, 1), schedule, ScoringMode::Lenient).unwrap();
    let result = run(&state, &SearchConfig::default()).unwrap();
    assert_eq!(result.path, vec![0]);
    let last = replay(&state, &result.path).unwrap();
    assert_eq!(result.score, last.score());
    assert!(last.has_ended());
}

#[test]
fn exhaustive_matches_brute_force() {
    for seed in 0..6 {
        let state = root(seed, 3, 3, 4, 2);
        let (score, path) = brute_force(&state);
        let result = run(&state, &SearchConfig::default()).unwrap();
        assert_eq!(result.score, score, "seed {}", seed);
        assert_eq!(result.path, path, "seed {}", seed);
        assert_eq!(result.nodes, 2 + 4 + 8 + 16);
    }
}

#[test]
fn pruned_never_beats_exhaustive() {
    for seed in 0..8 {
        let state = root(seed, 4, 4, 5, 2);
        let full = run(&state, &SearchConfig::default()).unwrap();
        let cut = run(&state, &pruned()).unwrap();
        assert!(cut.score <= full.score, "seed {}", seed);
        assert!(cut.nodes <= full.nodes, "seed {}", seed);
        if !cut.path.is_empty() {
            assert_eq!(replay(&state, &cut.path).unwrap().score(), cut.score);
        }
    }
}

#[test]
fn pruned_finds_best_non_decreasing_path() {
    for seed in 0..30 {
        let state = root(seed, 4, 4, 5, 2);
        let (score, path) = brute_force_non_decreasing(&state);
        let result = run(&state, &pruned()).unwrap();
        assert_eq!(result.score, score, "seed {}", seed);
        assert_eq!(result.path, path, "seed {}", seed);
    }
}

#[test]
fn depth_limited_never_beats_pruned() {
    let config = SearchConfig {
        variant: SearchVariant::DepthLimited {
            depth: 2,
            pct_to_prune: 0.5,
        },
        ..SearchConfig::default()
    };
    for seed in 0..8 {
        let state = root(seed, 4, 4, 6, 2);
        let cut = run(&state, &pruned()).unwrap();
        let culled = run(&state, &config).unwrap();
        assert!(culled.score <= cut.score, "seed {}", seed);
    }
}

#[test]
fn parallel_search_is_deterministic() {
    let state = root(42, 5, 5, 6, 3);
    let config = SearchConfig {
        parallel: true,
        ..pruned()
    };
    let first = run(&state, &config).unwrap();
    let second = run(&state, &config).unwrap();
    let sequential = run(&state, &pruned()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.path, sequential.path);
    assert_eq!(first.score, sequential.score);
}

#[test]
fn strict_search_scores_replayed_board() {
    let mut board = Board::new(4, 4);
    board
        .register_island(&[
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(0, 1),
            Position::new(1, 1),
        ])
        .unwrap();
    let schedule = generate_choices(9, 5, 2, 4, 4).unwrap();
    let state = GameState::new(board, schedule, ScoringMode::Strict).unwrap();
    let result = run(&state, &SearchConfig::default()).unwrap();
    let last = replay(&state, &result.path).unwrap();
    assert_eq!(result.score, last.score());
    assert_eq!(result.score, score_board(last.board(), ScoringMode::Strict));
}

#[test]
fn failed_island_registration_leaves_board_untouched() {
    let mut board = Board::new(5, 5);
    board.register_island(&[Position::new(0, 0)]).unwrap();
    board.assign(Position::new(4, 4), Terrain::Forest).unwrap();
    let before = board.clone();

    // Second island would touch the first at (1,0).
    let err = board
        .register_island(&[Position::new(1, 0), Position::new(2, 0)])
        .unwrap_err();
    assert!(matches!(err, BoardError::AdjacentIsland { .. }));
    assert_eq!(board, before);
    assert_eq!(board.islands().len(), 1);
    assert!(!board.cell(Position::new(2, 0)).unwrap().is_on_island());
}

#[test]
fn corner_contact_and_fourth_island_rejected() {
    let mut board = Board::new(6, 6);
    board.register_island(&[Position::new(0, 0)]).unwrap();
    let before = board.clone();
    assert!(matches!(
        board.register_island(&[Position::new(1, 1)]),
        Err(BoardError::AdjacentIsland { .. })
    ));
    assert_eq!(board, before);

    board.register_island(&[Position::new(2, 2)]).unwrap();
    board.register_island(&[Position::new(5, 5)]).unwrap();
    let before = board.clone();
    assert_eq!(
        board.register_island(&[Position::new(5, 0)]),
        Err(BoardError::IslandsFull { limit: MAX_ISLANDS })
    );
    assert_eq!(board, before);
    assert!(!board.cell(Position::new(5, 0)).unwrap().is_on_island());
}

#[test]
fn searching_does_not_mutate_root() {
    let state = root(3, 3, 3, 3, 2);
    let before = state.clone();
    run(&state, &SearchConfig::default()).unwrap();
    assert_eq!(state, before);
    assert_eq!(state.board().occupied_count(), 0);
}
