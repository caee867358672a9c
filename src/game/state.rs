//! Game state: a board, the turn counter and the cached score.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::choices::{check_capacity, Choice, Schedule};
use super::GameError;
use crate::board::Board;
use crate::eval::ScoringMode;

/// A snapshot of a game between turns.
///
/// The schedule is shared by every state derived from the same root.
/// Equality and hashing look only at the turn counter and the board, so
/// states reached through different choices but holding the same board
/// are interchangeable.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    turns_passed: usize,
    score: i32,
    schedule: Arc<Schedule>,
    mode: ScoringMode,
}

impl GameState {
    /// Starts a game on `board` with the given schedule.
    pub fn new(board: Board, schedule: Schedule, mode: ScoringMode) -> Result<Self, GameError> {
        check_capacity(
            board.cols(),
            board.rows(),
            schedule.turn_limit(),
            schedule.choice_count(),
        )?;
        let score = board.score(mode);
        Ok(GameState {
            board,
            turns_passed: 0,
            score,
            schedule: Arc::new(schedule),
            mode,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turns_passed(&self) -> usize {
        self.turns_passed
    }

    /// Board score after the last turn, in the session's scoring mode.
    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn turn_limit(&self) -> usize {
        self.schedule.turn_limit()
    }

    pub fn choice_count(&self) -> usize {
        self.schedule.choice_count()
    }

    pub fn has_ended(&self) -> bool {
        self.turns_passed >= self.schedule.turn_limit()
    }

    /// Options for the current turn, or None once the game has ended.
    pub fn current_choices(&self) -> Option<&[Choice]> {
        self.schedule.turn(self.turns_passed)
    }

    /// Plays option `index` of the current turn.
    pub fn choose_option(&mut self, index: usize) -> Result<(), GameError> {
        let choice = *self
            .current_choices()
            .ok_or(GameError::GameAlreadyEnded {
                turn_limit: self.turn_limit(),
            })?
            .get(index)
            .ok_or(GameError::InvalidChoiceIndex {
                index,
                choice_count: self.choice_count(),
            })?;
        self.board.assign(choice.position, choice.terrain)?;
        self.turns_passed += 1;
        self.score = self.board.score(self.mode);
        Ok(())
    }

    /// Returns a copy of this state with option `index` played.
    pub fn successor(&self, index: usize) -> Result<GameState, GameError> {
        let mut next = self.clone();
        next.choose_option(index)?;
        Ok(next)
    }
}

impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.turns_passed == other.turns_passed && self.board == other.board
    }
}

impl Eq for GameState {}

impl Hash for GameState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.turns_passed.hash(state);
        self.board.hash(state);
    }
}
