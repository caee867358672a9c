//! Turn-based game sessions.
//!
//! A session pairs a board with a fixed schedule of per-turn options. Each
//! turn the player picks one option by index and its terrain is placed.

pub mod choices;
pub mod state;

pub use choices::{check_capacity, generate_choices, generate_choices_with, Choice, Schedule};
pub use state::GameState;

use crate::board::BoardError;

/// Errors raised by session setup, turn play and search.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error(
        "impossible configuration: {cells} cells cannot supply {turn_limit} turns of {choice_count} options"
    )]
    ImpossibleConfiguration {
        cells: usize,
        turn_limit: usize,
        choice_count: usize,
    },

    #[error("malformed schedule: turn {turn} offers {offered} options, expected {expected}")]
    MalformedSchedule {
        turn: usize,
        offered: usize,
        expected: usize,
    },

    #[error("choice index {index} outside 0..{choice_count}")]
    InvalidChoiceIndex { index: usize, choice_count: usize },

    #[error("game already ended after {turn_limit} turns")]
    GameAlreadyEnded { turn_limit: usize },

    #[error("invalid search config: {0}")]
    InvalidSearchConfig(String),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}
