//! Grid coordinates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A (column, row) coordinate on the board. Column grows to the right,
/// row grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub col: usize,
    pub row: usize,
}

impl Position {
    pub const fn new(col: usize, row: usize) -> Self {
        Position { col, row }
    }

    /// Manhattan distance between two positions.
    pub fn manhattan(self, other: Position) -> usize {
        self.col.abs_diff(other.col) + self.row.abs_diff(other.row)
    }

    /// Applies a signed offset, returning None if either coordinate leaves
    /// `[0, cols) x [0, rows)`.
    pub fn offset(self, dc: isize, dr: isize, cols: usize, rows: usize) -> Option<Position> {
        let col = self.col.checked_add_signed(dc)?;
        let row = self.row.checked_add_signed(dr)?;
        if col < cols && row < rows {
            Some(Position { col, row })
        } else {
            None
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.col, self.row)
    }
}

/// Error returned when a position string is not of the form `col,row`.
#[derive(Debug, thiserror::Error)]
#[error("invalid position '{0}': expected 'col,row'")]
pub struct ParsePositionError(String);

impl FromStr for Position {
    type Err = ParsePositionError;

    /// Parses `"c,r"`, tolerating surrounding whitespace and parentheses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let (c, r) = trimmed
            .split_once(',')
            .ok_or_else(|| ParsePositionError(s.to_string()))?;
        let col = c.trim().parse().map_err(|_| ParsePositionError(s.to_string()))?;
        let row = r.trim().parse().map_err(|_| ParsePositionError(s.to_string()))?;
        Ok(Position { col, row })
    }
}
