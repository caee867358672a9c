//! Island registry.
//!
//! Islands are disjoint, orthogonally connected groups of cells that never
//! touch one another, not even at a corner. A board holds at most
//! `MAX_ISLANDS` of them. Registration is split into a validating `plan`
//! step that reads only, and a `commit` step that cannot fail, so a
//! rejected island leaves the board exactly as it was.

use std::collections::VecDeque;
use std::hash::{Hash, Hasher};

use super::adjacency::Grid;
use super::position::Position;
use super::BoardError;

/// Number of islands a board can hold.
pub const MAX_ISLANDS: usize = 3;

/// The set of registered islands and the island id of every cell.
///
/// Equality and hashing compare the partition of cells into islands, not
/// island ids, so registration order does not matter.
#[derive(Debug, Clone, Default)]
pub struct IslandRegistry {
    islands: Vec<Vec<Position>>,
    membership: Vec<Option<usize>>,
    /// Sorted cell indices of each island, in sorted order.
    partition: Vec<Vec<usize>>,
}

/// A validated island, ready to be committed.
#[derive(Debug, Clone)]
pub(crate) struct IslandPlan {
    pub members: Vec<Position>,
    pub indices: Vec<usize>,
    /// Cells touching the island but not part of it.
    pub shore: Vec<usize>,
}

impl IslandRegistry {
    /// Creates an empty registry for a board with `cells` cells.
    pub fn new(cells: usize) -> Self {
        IslandRegistry {
            islands: Vec::new(),
            membership: vec![None; cells],
            partition: Vec::new(),
        }
    }

    /// Number of registered islands.
    pub fn len(&self) -> usize {
        self.islands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.islands.is_empty()
    }

    /// The island id of the cell at `idx`, if it belongs to one.
    #[inline]
    pub fn island_of(&self, idx: usize) -> Option<usize> {
        self.membership.get(idx).copied().flatten()
    }

    /// Members of island `id`, in registration order.
    pub fn members(&self, id: usize) -> &[Position] {
        self.islands.get(id).map_or(&[], |m| m.as_slice())
    }

    /// Iterates over all islands.
    pub fn iter(&self) -> impl Iterator<Item = &[Position]> {
        self.islands.iter().map(|m| m.as_slice())
    }

    /// Checks a candidate island against the registry without mutating.
    ///
    /// Rejects a full registry, out-of-bounds cells, empty input, cells
    /// already on an island, disconnected shapes and shapes touching another
    /// island orthogonally or diagonally.
    pub(crate) fn plan(&self, grid: &Grid, positions: &[Position]) -> Result<IslandPlan, BoardError> {
        if self.islands.len() >= MAX_ISLANDS {
            return Err(BoardError::IslandsFull { limit: MAX_ISLANDS });
        }

        let mut in_set = vec![false; grid.len()];
        let mut members = Vec::with_capacity(positions.len());
        let mut indices = Vec::with_capacity(positions.len());

        for &pos in positions {
            let idx = grid.index(pos)?;
            if in_set[idx] {
                continue;
            }
            in_set[idx] = true;
            members.push(pos);
            indices.push(idx);
        }

        if indices.is_empty() {
            return Err(BoardError::EmptyIsland);
        }

        for (&pos, &idx) in members.iter().zip(indices.iter()) {
            if let Some(existing) = self.island_of(idx) {
                return Err(BoardError::Overlap { pos, island: existing });
            }
        }

        // Flood fill from the first member through members only.
        let mut seen = vec![false; grid.len()];
        let mut queue = VecDeque::with_capacity(indices.len());
        seen[indices[0]] = true;
        queue.push_back(indices[0]);
        let mut reached = 1;
        while let Some(cur) = queue.pop_front() {
            for n in grid.info_at(cur).touching.iter() {
                let ni = grid.index_unchecked(*n);
                if in_set[ni] && !seen[ni] {
                    seen[ni] = true;
                    reached += 1;
                    queue.push_back(ni);
                }
            }
        }
        if reached != indices.len() {
            let pos = indices
                .iter()
                .find(|&&i| !seen[i])
                .map(|&i| grid.position(i))
                .unwrap_or(members[0]);
            return Err(BoardError::Disconnected { pos });
        }

        let mut shore = Vec::new();
        let mut is_shore = vec![false; grid.len()];
        for (&pos, &idx) in members.iter().zip(indices.iter()) {
            let info = grid.info_at(idx);
            for n in info.near() {
                let ni = grid.index_unchecked(n);
                if in_set[ni] {
                    continue;
                }
                if let Some(other) = self.island_of(ni) {
                    return Err(BoardError::AdjacentIsland {
                        pos,
                        neighbour: n,
                        island: other,
                    });
                }
            }
            // The shore is orthogonal only.
            for n in info.touching.iter() {
                let ni = grid.index_unchecked(*n);
                if !in_set[ni] && !is_shore[ni] {
                    is_shore[ni] = true;
                    shore.push(ni);
                }
            }
        }

        Ok(IslandPlan {
            members,
            indices,
            shore,
        })
    }

    /// Records a validated island and returns its id.
    pub(crate) fn commit(&mut self, plan: &IslandPlan) -> usize {
        let id = self.islands.len();
        for &idx in plan.indices.iter() {
            self.membership[idx] = Some(id);
        }
        self.islands.push(plan.members.clone());

        let mut cells = plan.indices.clone();
        cells.sort_unstable();
        let at = self.partition.binary_search(&cells).unwrap_or_else(|i| i);
        self.partition.insert(at, cells);
        id
    }
}

impl PartialEq for IslandRegistry {
    fn eq(&self, other: &Self) -> bool {
        self.partition == other.partition
    }
}

impl Eq for IslandRegistry {}

impl Hash for IslandRegistry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.partition.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(c: usize, r: usize) -> Position {
        Position::new(c, r)
    }

    #[test]
    fn plan_collects_shore() {
        let grid = Grid::build(3, 3);
        let reg = IslandRegistry::new(grid.len());
        let plan = reg.plan(&grid, &[p(1, 1)]).unwrap();
        assert_eq!(plan.indices, vec![4]);
        let mut shore = plan.shore.clone();
        shore.sort();
        assert_eq!(shore, vec![1, 3, 5, 7]);
    }

    #[test]
    fn duplicates_collapse() {
        let grid = Grid::build(3, 3);
        let reg = IslandRegistry::new(grid.len());
        let plan = reg.plan(&grid, &[p(0, 0), p(0, 0), p(1, 0)]).unwrap();
        assert_eq!(plan.members, vec![p(0, 0), p(1, 0)]);
    }

    #[test]
    fn diagonal_only_is_disconnected() {
        let grid = Grid::build(3, 3);
        let reg = IslandRegistry::new(grid.len());
        let err = reg.plan(&grid, &[p(0, 0), p(1, 1)]).unwrap_err();
        assert!(matches!(err, BoardError::Disconnected { pos } if pos == p(1, 1)));
    }

    #[test]
    fn overlap_and_adjacency_rejected() {
        let grid = Grid::build(4, 4);
        let mut reg = IslandRegistry::new(grid.len());
        let plan = reg.plan(&grid, &[p(0, 0), p(1, 0)]).unwrap();
        assert_eq!(reg.commit(&plan), 0);

        assert!(matches!(
            reg.plan(&grid, &[p(1, 0), p(2, 0)]),
            Err(BoardError::Overlap { island: 0, .. })
        ));
        assert!(matches!(
            reg.plan(&grid, &[p(2, 0), p(3, 0)]),
            Err(BoardError::AdjacentIsland { island: 0, .. })
        ));
        // Corner contact counts as touching.
        assert!(matches!(
            reg.plan(&grid, &[p(2, 1), p(3, 1)]),
            Err(BoardError::AdjacentIsland { pos, neighbour, island: 0 })
                if pos == p(2, 1) && neighbour == p(1, 0)
        ));
        assert!(reg.plan(&grid, &[p(3, 0), p(3, 1)]).is_ok());
    }

    #[test]
    fn fourth_island_rejected() {
        let grid = Grid::build(5, 5);
        let mut reg = IslandRegistry::new(grid.len());
        for island in [[p(0, 0)], [p(4, 0)], [p(0, 4)]] {
            let plan = reg.plan(&grid, &island).unwrap();
            reg.commit(&plan);
        }
        assert_eq!(reg.len(), MAX_ISLANDS);
        assert_eq!(
            reg.plan(&grid, &[p(4, 4)]).unwrap_err(),
            BoardError::IslandsFull { limit: MAX_ISLANDS }
        );
    }

    #[test]
    fn registration_order_does_not_affect_equality() {
        let grid = Grid::build(5, 5);
        let west = [p(0, 0), p(0, 1)];
        let east = [p(4, 4), p(3, 4)];

        let mut a = IslandRegistry::new(grid.len());
        let plan = a.plan(&grid, &west).unwrap();
        a.commit(&plan);
        let plan = a.plan(&grid, &east).unwrap();
        a.commit(&plan);

        let mut b = IslandRegistry::new(grid.len());
        let plan = b.plan(&grid, &[p(3, 4), p(4, 4)]).unwrap();
        b.commit(&plan);
        let plan = b.plan(&grid, &[p(0, 1), p(0, 0)]).unwrap();
        b.commit(&plan);

        assert_eq!(a.island_of(0), Some(0));
        assert_eq!(b.island_of(0), Some(1));
        assert_eq!(a, b);

        let mut c = IslandRegistry::new(grid.len());
        let plan = c.plan(&grid, &west).unwrap();
        c.commit(&plan);
        assert_ne!(a, c);
    }

    #[test]
    fn empty_and_out_of_bounds_rejected() {
        let grid = Grid::build(2, 2);
        let reg = IslandRegistry::new(grid.len());
        assert!(matches!(reg.plan(&grid, &[]), Err(BoardError::EmptyIsland)));
        assert!(matches!(
            reg.plan(&grid, &[p(0, 0), p(2, 0)]),
            Err(BoardError::PositionOutOfBounds { .. })
        ));
    }
}
