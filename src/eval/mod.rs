//! Board scoring.
//!
//! Scores a board as the sum of per-tile contributions, each tile following
//! the rule for its terrain. See `scoring` for the rules and constants.

pub mod scoring;

pub use scoring::{score_board, score_breakdown, score_cell, Scorer, ScoringMode, TileScore};
