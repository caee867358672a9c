//! Per-turn option schedules.
//!
//! A schedule lists, for every turn, the options the player may choose
//! from. Generated schedules never repeat a position, so every option in
//! the game can be placed regardless of which ones were picked earlier.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use super::GameError;
use crate::board::{Grid, Position, Terrain, PLACEABLE_TERRAINS};

/// One option: place `terrain` at `position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Choice {
    pub terrain: Terrain,
    pub position: Position,
}

/// The full set of options for every turn of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    choice_count: usize,
    turns: Vec<Vec<Choice>>,
}

impl Schedule {
    /// Builds a schedule, checking that every turn offers `choice_count`
    /// options.
    pub fn new(choice_count: usize, turns: Vec<Vec<Choice>>) -> Result<Self, GameError> {
        if choice_count == 0 {
            return Err(GameError::ImpossibleConfiguration {
                cells: 0,
                turn_limit: turns.len(),
                choice_count,
            });
        }
        if let Some((turn, options)) = turns
            .iter()
            .enumerate()
            .find(|(_, t)| t.len() != choice_count)
        {
            return Err(GameError::MalformedSchedule {
                turn,
                offered: options.len(),
                expected: choice_count,
            });
        }
        Ok(Schedule {
            choice_count,
            turns,
        })
    }

    /// Number of turns in the game.
    pub fn turn_limit(&self) -> usize {
        self.turns.len()
    }

    pub fn choice_count(&self) -> usize {
        self.choice_count
    }

    /// The options offered on turn `turn`, if the game lasts that long.
    pub fn turn(&self, turn: usize) -> Option<&[Choice]> {
        self.turns.get(turn).map(|t| t.as_slice())
    }

    pub fn turns(&self) -> &[Vec<Choice>] {
        &self.turns
    }
}

/// Fails unless a `cols x rows` board has at least one distinct cell for
/// every option of every turn. Oversized boards fail with `BoardTooLarge`
/// before anything is allocated.
pub fn check_capacity(
    cols: usize,
    rows: usize,
    turn_limit: usize,
    choice_count: usize,
) -> Result<(), GameError> {
    let cells = Grid::checked_len(cols, rows)?;
    if choice_count == 0 || cells < turn_limit.saturating_mul(choice_count) {
        log::warn!(
            "rejecting {}x{} board for {} turns of {} options",
            cols,
            rows,
            turn_limit,
            choice_count
        );
        return Err(GameError::ImpossibleConfiguration {
            cells,
            turn_limit,
            choice_count,
        });
    }
    Ok(())
}

/// Generates a schedule from a seed. The same seed always yields the same
/// schedule.
pub fn generate_choices(
    seed: u64,
    turn_limit: usize,
    choice_count: usize,
    cols: usize,
    rows: usize,
) -> Result<Schedule, GameError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    generate_choices_with(&mut rng, turn_limit, choice_count, cols, rows)
}

/// Generates a schedule from an explicit random stream.
///
/// Positions are drawn without replacement from a shuffled list of every
/// board cell; terrains are drawn uniformly from the placeable kinds.
pub fn generate_choices_with<R: Rng>(
    rng: &mut R,
    turn_limit: usize,
    choice_count: usize,
    cols: usize,
    rows: usize,
) -> Result<Schedule, GameError> {
    check_capacity(cols, rows, turn_limit, choice_count)?;

    let mut positions: Vec<Position> = (0..rows)
        .flat_map(|r| (0..cols).map(move |c| Position::new(c, r)))
        .collect();
    positions.shuffle(rng);

    let turns = positions
        .chunks(choice_count)
        .take(turn_limit)
        .map(|chunk| {
            chunk
                .iter()
                .map(|&position| Choice {
                    terrain: PLACEABLE_TERRAINS[rng.gen_range(0..PLACEABLE_TERRAINS.len())],
                    position,
                })
                .collect()
        })
        .collect();

    Schedule::new(choice_count, turns)
}
