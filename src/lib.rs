//! Islander engine library.
//!
//! Exposes the board model, the scoring rules, game sessions and the
//! turn-choice search for use by integration tests and the binary entry
//! point.

pub mod board;
pub mod eval;
pub mod game;
pub mod search;
pub mod session;
