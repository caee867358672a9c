//! Board representation.
//!
//! Contains the grid and its adjacency relations, terrain kinds, per-cell
//! state, the island registry and the board that ties them together.

pub mod adjacency;
pub mod cell;
pub mod island;
pub mod position;
pub mod state;
pub mod terrain;

pub use adjacency::{AdjacencyInfo, Grid, CORNER_OFFSETS, MAX_CELLS, TOUCHING_OFFSETS};
pub use cell::Cell;
pub use island::{IslandRegistry, MAX_ISLANDS};
pub use position::{ParsePositionError, Position};
pub use state::Board;
pub use terrain::{Terrain, TerrainClass, PLACEABLE_TERRAINS, TERRAIN_COUNT};

/// Errors raised by board mutation and lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("cannot assign {terrain:?} at {pos}: cell holds {existing:?}")]
    InvalidAssignment {
        pos: Position,
        terrain: Terrain,
        existing: Terrain,
    },

    #[error("position {pos} outside {cols}x{rows} board")]
    PositionOutOfBounds {
        pos: Position,
        cols: usize,
        rows: usize,
    },

    #[error("position {pos} already belongs to island {island}")]
    Overlap { pos: Position, island: usize },

    #[error("island is not connected: {pos} cannot be reached from the other cells")]
    Disconnected { pos: Position },

    #[error("position {pos} touches {neighbour} on island {island}")]
    AdjacentIsland {
        pos: Position,
        neighbour: Position,
        island: usize,
    },

    #[error("island has no cells")]
    EmptyIsland,

    #[error("all {limit} islands have been drawn")]
    IslandsFull { limit: usize },

    #[error("{cols}x{rows} board exceeds {max_cells} cells")]
    BoardTooLarge {
        cols: usize,
        rows: usize,
        max_cells: usize,
    },
}
