//! Full search sessions.
//!
//! Builds a board, registers its islands, generates the option schedule
//! from a seed, searches it and replays the winning path to produce a
//! report for the command-line front end.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Position};
use crate::eval::{score_breakdown, ScoringMode, TileScore};
use crate::game::{generate_choices, GameError, GameState, Schedule};
use crate::search::{self, SearchConfig, SearchResult};

/// Configuration for one session. Every field has a default, so a JSON
/// config only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub cols: usize,
    pub rows: usize,
    pub turn_limit: usize,
    pub choice_count: usize,
    pub seed: u64,
    /// Islands registered before the first turn, in order.
    pub islands: Vec<Vec<Position>>,
    pub scoring: ScoringMode,
    pub search: SearchConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            cols: 9,
            rows: 9,
            turn_limit: 10,
            choice_count: 2,
            seed: 0,
            islands: Vec::new(),
            scoring: ScoringMode::Lenient,
            search: SearchConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Reads a JSON config file.
    pub fn load(path: &Path) -> Result<SessionConfig, GameError> {
        let text = fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        log::debug!("loaded session config from {}", path.display());
        Ok(config)
    }
}

/// Everything a front end needs to show the result of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub seed: u64,
    pub schedule: Schedule,
    pub search: SearchResult,
    /// Final board after replaying the winning path, one string per row.
    pub board: Vec<String>,
    /// Score of the replayed board in the session's scoring mode.
    pub final_score: i32,
    pub tiles: Vec<TileScore>,
    pub elapsed_ms: u64,
}

/// Builds the session's starting state.
pub fn initial_state(config: &SessionConfig) -> Result<GameState, GameError> {
    let mut board = Board::try_new(config.cols, config.rows)?;
    for island in config.islands.iter() {
        board.register_island(island)?;
    }
    let schedule = generate_choices(
        config.seed,
        config.turn_limit,
        config.choice_count,
        config.cols,
        config.rows,
    )?;
    GameState::new(board, schedule, config.scoring)
}

/// Runs a complete session.
pub fn run_session(config: &SessionConfig) -> Result<SessionReport, GameError> {
    let start = Instant::now();
    let root = initial_state(config)?;
    log::info!(
        "session: {}x{} board, {} turns x {} options, seed {}, {} islands",
        config.cols,
        config.rows,
        config.turn_limit,
        config.choice_count,
        config.seed,
        config.islands.len()
    );

    let result = search::run(&root, &config.search)?;
    let last = search::replay(&root, &result.path)?;

    Ok(SessionReport {
        seed: config.seed,
        schedule: root.schedule().clone(),
        board: last
            .board()
            .render_rows()
            .into_iter()
            .map(|row| row.into_iter().collect())
            .collect(),
        final_score: last.score(),
        tiles: score_breakdown(last.board(), config.scoring),
        search: result,
        elapsed_ms: start.elapsed().as_millis() as u64,
    })
}

/// Writes a report as a single JSON line.
pub fn write_json<W: Write>(report: &SessionReport, out: &mut W) -> Result<(), GameError> {
    serde_json::to_writer(&mut *out, report)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
