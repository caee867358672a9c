//! Board representation.
//!
//! A board is a row-major arena of `Cell`s plus shared, reference-counted
//! handles to the adjacency grid and the island registry. Cloning a board
//! copies only the cell arena; the grid is never copied and the registry is
//! copied on write, when a clone registers a new island.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::adjacency::Grid;
use super::cell::Cell;
use super::island::IslandRegistry;
use super::position::Position;
use super::terrain::Terrain;
use super::BoardError;

#[derive(Debug, Clone)]
pub struct Board {
    grid: Arc<Grid>,
    cells: Vec<Cell>,
    islands: Arc<IslandRegistry>,
}

impl Board {
    /// Creates an empty `cols x rows` board.
    pub fn new(cols: usize, rows: usize) -> Self {
        Board::with_grid(Arc::new(Grid::build(cols, rows)))
    }

    /// Creates an empty board, rejecting dimensions above `MAX_CELLS`.
    pub fn try_new(cols: usize, rows: usize) -> Result<Self, BoardError> {
        Ok(Board::with_grid(Arc::new(Grid::try_build(cols, rows)?)))
    }

    /// Creates an empty board over an existing grid.
    pub fn with_grid(grid: Arc<Grid>) -> Self {
        let n = grid.len();
        Board {
            grid,
            cells: vec![Cell::EMPTY; n],
            islands: Arc::new(IslandRegistry::new(n)),
        }
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn islands(&self) -> &IslandRegistry {
        &self.islands
    }

    /// Returns the cell at `pos`.
    pub fn cell(&self, pos: Position) -> Result<&Cell, BoardError> {
        self.grid.index(pos).map(|i| &self.cells[i])
    }

    #[inline]
    pub(crate) fn cell_at(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Places `terrain` at `pos`. Each cell accepts exactly one non-Empty
    /// terrain over its lifetime.
    pub fn assign(&mut self, pos: Position, terrain: Terrain) -> Result<(), BoardError> {
        let idx = self.grid.index(pos)?;
        let cell = &mut self.cells[idx];
        let existing = cell.terrain();
        if cell.assign(terrain) {
            Ok(())
        } else {
            Err(BoardError::InvalidAssignment {
                pos,
                terrain,
                existing,
            })
        }
    }

    /// Registers a new island. On error nothing is changed.
    pub fn register_island(&mut self, positions: &[Position]) -> Result<usize, BoardError> {
        let plan = self.islands.plan(&self.grid, positions)?;
        let id = Arc::make_mut(&mut self.islands).commit(&plan);
        for &idx in plan.indices.iter() {
            self.cells[idx].mark_island();
        }
        for &idx in plan.shore.iter() {
            self.cells[idx].mark_shore();
        }
        Ok(id)
    }

    /// Every position on the island containing `pos`, or an empty slice if
    /// `pos` is not on an island.
    pub fn positions_on_same_island(&self, pos: Position) -> Result<&[Position], BoardError> {
        let idx = self.grid.index(pos)?;
        Ok(self
            .islands
            .island_of(idx)
            .map_or(&[][..], |id| self.islands.members(id)))
    }

    /// Positions with no terrain yet, row-major.
    pub fn vacant_positions(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_occupied())
            .map(|(i, _)| self.grid.position(i))
            .collect()
    }

    /// Number of cells holding a terrain.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }

    /// Terrain symbols, one inner vector per row.
    pub fn render_rows(&self) -> Vec<Vec<char>> {
        self.cells
            .chunks(self.cols().max(1))
            .map(|row| row.iter().map(|c| c.terrain().symbol()).collect())
            .collect()
    }
}

impl fmt::Display for Board {
    /// One line per row; island cells are bracketed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols().max(1)) {
            for cell in row {
                let sym = cell.terrain().symbol();
                if cell.is_on_island() {
                    write!(f, "[{}]", sym)?;
                } else {
                    write!(f, " {} ", sym)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// Equality and hashing cover dimensions, cell contents and the island
// partition. Two boards reached by different placement orders compare equal.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.cols() == other.cols()
            && self.rows() == other.rows()
            && self.cells == other.cells
            && (Arc::ptr_eq(&self.islands, &other.islands) || self.islands == other.islands)
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cols().hash(state);
        self.rows().hash(state);
        self.cells.hash(state);
        self.islands.hash(state);
    }
}
