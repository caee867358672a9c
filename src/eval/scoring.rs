//! Per-tile scoring rules.
//!
//! Each terrain has one rule, dispatched by `match`. Rules read the
//! precomputed adjacency lists of the grid, the terrain of neighbouring
//! cells and island membership; none of them mutates the board.
//!
//! Validity is resolved once per scoring call into a table, either copied
//! from the lenient per-cell flags or recomputed strictly from terrain and
//! island membership. Invalid tiles score a flat penalty, and invalid
//! neighbours are ignored by the rules that count neighbours.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardError, Position, Terrain, TERRAIN_COUNT};

pub const INVALID_PENALTY: i32 = -5;
pub const HOUSES_REWARD_PER_KIND: i32 = 2;
pub const CHURCHES_REWARD_PER_NEAR_HOUSES: i32 = 2;
pub const CHURCHES_BONUS_PER_ISLAND_HOUSES: i32 = 1;
pub const FOREST_REWARD: i32 = 2;
pub const MOUNTAIN_REWARD_PER_FOREST: i32 = 2;
pub const BEACH_REWARD: i32 = 2;
pub const WAVES_REWARD: i32 = 2;

/// How tile validity is determined while scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// Trust the per-cell flags maintained on every mutation. Land that is
    /// not on an island yet is tolerated.
    #[default]
    Lenient,
    /// Recompute every cell's validity from terrain and island membership.
    Strict,
}

/// A scoring pass over one board in one mode.
pub struct Scorer<'a> {
    board: &'a Board,
    valid: Vec<bool>,
}

impl<'a> Scorer<'a> {
    pub fn new(board: &'a Board, mode: ScoringMode) -> Self {
        let valid = match mode {
            ScoringMode::Lenient => board.cells().iter().map(|c| c.is_valid()).collect(),
            ScoringMode::Strict => board.cells().iter().map(|c| c.is_valid_strict()).collect(),
        };
        Scorer { board, valid }
    }

    #[inline]
    fn terrain_at(&self, pos: Position) -> Terrain {
        self.board
            .cell_at(self.board.grid().index_unchecked(pos))
            .terrain()
    }

    #[inline]
    fn valid_at(&self, pos: Position) -> bool {
        self.valid[self.board.grid().index_unchecked(pos)]
    }

    /// Returns true if the neighbour holds `terrain` and is valid.
    #[inline]
    fn is_valid_kind(&self, pos: Position, terrain: Terrain) -> bool {
        self.terrain_at(pos) == terrain && self.valid_at(pos)
    }

    /// Scores the tile at row-major index `idx`.
    pub fn score_index(&self, idx: usize) -> i32 {
        let cell = self.board.cell_at(idx);
        if !cell.is_occupied() {
            return 0;
        }
        if !self.valid[idx] {
            return INVALID_PENALTY;
        }
        let pos = self.board.grid().position(idx);
        match cell.terrain() {
            Terrain::Empty => 0,
            Terrain::Houses => self.houses(idx),
            Terrain::Churches => self.churches(idx, pos),
            Terrain::Forest => self.forest(idx),
            Terrain::Mountain => self.mountain(idx),
            Terrain::Beach => {
                if cell.is_on_shore() {
                    BEACH_REWARD
                } else {
                    0
                }
            }
            Terrain::Boats => self.boats(idx, pos),
            Terrain::Waves => self.waves(idx),
        }
    }

    /// Sum of every occupied tile's score.
    pub fn total(&self) -> i32 {
        (0..self.valid.len())
            .filter(|&i| self.board.cell_at(i).is_occupied())
            .map(|i| self.score_index(i))
            .sum()
    }

    /// Reward per distinct valid kind in the near set, other than Houses.
    fn houses(&self, idx: usize) -> i32 {
        let mut seen = [false; TERRAIN_COUNT];
        for n in self.board.grid().info_at(idx).near() {
            let t = self.terrain_at(n);
            if t != Terrain::Empty && t != Terrain::Houses && self.valid_at(n) {
                seen[t as usize] = true;
            }
        }
        HOUSES_REWARD_PER_KIND * seen.iter().filter(|s| **s).count() as i32
    }

    /// Reward per near Houses plus a bonus for every further Houses on the
    /// same island. A second church on the island cancels the whole score.
    fn churches(&self, idx: usize, pos: Position) -> i32 {
        let info = self.board.grid().info_at(idx);
        let mut score = CHURCHES_REWARD_PER_NEAR_HOUSES
            * info
                .near()
                .filter(|&n| self.is_valid_kind(n, Terrain::Houses))
                .count() as i32;

        let island = self
            .board
            .islands()
            .island_of(idx)
            .map_or(&[][..], |id| self.board.islands().members(id));
        if island
            .iter()
            .any(|&m| m != pos && self.terrain_at(m) == Terrain::Churches)
        {
            return 0;
        }
        for &m in island {
            if m != pos && !info.is_near(m) && self.is_valid_kind(m, Terrain::Houses) {
                score += CHURCHES_BONUS_PER_ISLAND_HOUSES;
            }
        }
        score
    }

    /// Binary bonus for an orthogonally touching valid Forest.
    fn forest(&self, idx: usize) -> i32 {
        let touching = &self.board.grid().info_at(idx).touching;
        if touching.iter().any(|&n| self.is_valid_kind(n, Terrain::Forest)) {
            FOREST_REWARD
        } else {
            0
        }
    }

    fn mountain(&self, idx: usize) -> i32 {
        MOUNTAIN_REWARD_PER_FOREST
            * self
                .board
                .grid()
                .info_at(idx)
                .near()
                .filter(|&n| self.is_valid_kind(n, Terrain::Forest))
                .count() as i32
    }

    /// Manhattan distance to the first land or island cell found by a
    /// breadth-first search over touching, valid cells. Falls back to the
    /// larger board dimension when nothing is reachable.
    fn boats(&self, idx: usize, pos: Position) -> i32 {
        let grid = self.board.grid();
        let mut visited = vec![false; self.valid.len()];
        let mut queue = VecDeque::new();
        visited[idx] = true;
        queue.push_back(idx);

        while let Some(cur) = queue.pop_front() {
            let cell = self.board.cell_at(cur);
            if cur != idx && (cell.terrain().is_land() || cell.is_on_island()) {
                return grid.position(cur).manhattan(pos) as i32;
            }
            for n in grid.info_at(cur).touching.iter() {
                let ni = grid.index_unchecked(*n);
                if !visited[ni] && self.valid[ni] {
                    visited[ni] = true;
                    queue.push_back(ni);
                }
            }
        }
        grid.cols().max(grid.rows()) as i32
    }

    /// Rewarded only when no other Waves shares the row or column.
    fn waves(&self, idx: usize) -> i32 {
        let info = self.board.grid().info_at(idx);
        let crowded = info
            .row
            .iter()
            .chain(info.column.iter())
            .any(|&n| self.terrain_at(n) == Terrain::Waves);
        if crowded {
            0
        } else {
            WAVES_REWARD
        }
    }
}

/// Scores the single tile at `pos`.
pub fn score_cell(board: &Board, pos: Position, mode: ScoringMode) -> Result<i32, BoardError> {
    let idx = board.grid().index(pos)?;
    Ok(Scorer::new(board, mode).score_index(idx))
}

/// Scores the whole board: the sum over all occupied tiles.
pub fn score_board(board: &Board, mode: ScoringMode) -> i32 {
    Scorer::new(board, mode).total()
}

/// One occupied tile's contribution to the board score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileScore {
    pub position: Position,
    pub terrain: Terrain,
    pub score: i32,
}

/// Per-tile scores for every occupied cell, row-major.
pub fn score_breakdown(board: &Board, mode: ScoringMode) -> Vec<TileScore> {
    let scorer = Scorer::new(board, mode);
    (0..board.cells().len())
        .filter(|&i| board.cell_at(i).is_occupied())
        .map(|i| TileScore {
            position: board.grid().position(i),
            terrain: board.cell_at(i).terrain(),
            score: scorer.score_index(i),
        })
        .collect()
}

impl Board {
    /// Board score in the given mode.
    pub fn score(&self, mode: ScoringMode) -> i32 {
        score_board(self, mode)
    }
}
