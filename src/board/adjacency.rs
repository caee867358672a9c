//! Adjacency relations for a rectangular board.
//!
//! Every cell gets four precomputed lists: touching (orthogonal), corners
//! (diagonal), same column and same row. "Near" is touching followed by
//! corners. The relations are built once per board size and shared,
//! read-only, by every board cloned from it.

use super::position::Position;
use super::BoardError;

/// Orthogonal offsets, in (dcol, drow) order: right, left, down, up.
pub const TOUCHING_OFFSETS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Diagonal offsets, in (dcol, drow) order.
pub const CORNER_OFFSETS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Largest board accepted by `Grid::try_build`. Every cell stores its whole
/// row and column, so grid memory grows as `cells * (cols + rows)`.
pub const MAX_CELLS: usize = 1 << 14;

/// The precomputed spatial relations of one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyInfo {
    /// In-bounds orthogonal neighbours (at most 4).
    pub touching: Vec<Position>,
    /// In-bounds diagonal neighbours (at most 4).
    pub corners: Vec<Position>,
    /// Every other cell in this column, ordered by row.
    pub column: Vec<Position>,
    /// Every other cell in this row, ordered by column.
    pub row: Vec<Position>,
}

impl AdjacencyInfo {
    /// Touching followed by corner neighbours.
    pub fn near(&self) -> impl Iterator<Item = Position> + '_ {
        self.touching.iter().chain(self.corners.iter()).copied()
    }

    /// Returns true if `pos` is touching or diagonal to this cell.
    pub fn is_near(&self, pos: Position) -> bool {
        self.touching.contains(&pos) || self.corners.contains(&pos)
    }
}

/// Board dimensions plus the adjacency relations of every cell.
///
/// Cells are indexed row-major: `row * cols + col`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    info: Vec<AdjacencyInfo>,
}

impl Grid {
    /// Number of cells in a `cols x rows` grid, or an error if it overflows
    /// or exceeds `MAX_CELLS`.
    pub fn checked_len(cols: usize, rows: usize) -> Result<usize, BoardError> {
        match cols.checked_mul(rows) {
            Some(n) if n <= MAX_CELLS => Ok(n),
            _ => Err(BoardError::BoardTooLarge {
                cols,
                rows,
                max_cells: MAX_CELLS,
            }),
        }
    }

    /// Like `build`, but rejects oversized dimensions before allocating.
    pub fn try_build(cols: usize, rows: usize) -> Result<Self, BoardError> {
        Grid::checked_len(cols, rows)?;
        Ok(Grid::build(cols, rows))
    }

    /// Builds a `cols x rows` grid and precomputes all adjacency lists.
    /// Dimensions from untrusted input should go through `try_build`.
    pub fn build(cols: usize, rows: usize) -> Self {
        let mut info = Vec::with_capacity(cols * rows);
        for row in 0..rows {
            for col in 0..cols {
                info.push(adjacency_for(Position::new(col, row), cols, rows));
            }
        }
        Grid { cols, rows, info }
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.info.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.info.is_empty()
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.col < self.cols && pos.row < self.rows
    }

    /// Returns the row-major index of `pos`.
    pub fn index(&self, pos: Position) -> Result<usize, BoardError> {
        if self.contains(pos) {
            Ok(self.index_unchecked(pos))
        } else {
            Err(BoardError::PositionOutOfBounds {
                pos,
                cols: self.cols,
                rows: self.rows,
            })
        }
    }

    #[inline]
    pub(crate) fn index_unchecked(&self, pos: Position) -> usize {
        pos.row * self.cols + pos.col
    }

    /// Inverse of `index`.
    #[inline]
    pub fn position(&self, idx: usize) -> Position {
        Position::new(idx % self.cols, idx / self.cols)
    }

    /// Adjacency information for the cell at `pos`.
    pub fn info(&self, pos: Position) -> Result<&AdjacencyInfo, BoardError> {
        self.index(pos).map(|i| &self.info[i])
    }

    #[inline]
    pub(crate) fn info_at(&self, idx: usize) -> &AdjacencyInfo {
        &self.info[idx]
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.len()).map(move |i| self.position(i))
    }
}

fn adjacency_for(pos: Position, cols: usize, rows: usize) -> AdjacencyInfo {
    let touching = TOUCHING_OFFSETS
        .iter()
        .filter_map(|&(dc, dr)| pos.offset(dc, dr, cols, rows))
        .collect();
    let corners = CORNER_OFFSETS
        .iter()
        .filter_map(|&(dc, dr)| pos.offset(dc, dr, cols, rows))
        .collect();
    let column = (0..rows)
        .filter(|&r| r != pos.row)
        .map(|r| Position::new(pos.col, r))
        .collect();
    let row = (0..cols)
        .filter(|&c| c != pos.col)
        .map(|c| Position::new(c, pos.row))
        .collect();
    AdjacencyInfo {
        touching,
        corners,
        column,
        row,
    }
}
