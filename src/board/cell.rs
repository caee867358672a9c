//! Per-cell tile state.

use super::terrain::{Terrain, TerrainClass};

/// One board cell: its terrain plus island and shore membership.
///
/// Terrain is written at most once. The island and shore flags are only
/// ever raised, by island registration. `valid` is the lenient validity
/// flag, refreshed on every mutation so lenient scoring never needs a
/// full-board pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    terrain: Terrain,
    on_island: bool,
    on_shore: bool,
    valid: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Cell::EMPTY
    }
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        terrain: Terrain::Empty,
        on_island: false,
        on_shore: false,
        valid: true,
    };

    #[inline]
    pub fn terrain(&self) -> Terrain {
        self.terrain
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.terrain != Terrain::Empty
    }

    #[inline]
    pub fn is_on_island(&self) -> bool {
        self.on_island
    }

    #[inline]
    pub fn is_on_shore(&self) -> bool {
        self.on_shore
    }

    /// The incrementally maintained (lenient) validity flag.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Places a terrain. Returns false, leaving the cell untouched, if the
    /// terrain is Empty or the cell is already occupied.
    pub fn assign(&mut self, terrain: Terrain) -> bool {
        if terrain == Terrain::Empty || self.is_occupied() {
            return false;
        }
        self.terrain = terrain;
        self.refresh_validity();
        true
    }

    pub fn mark_island(&mut self) {
        self.on_island = true;
        self.refresh_validity();
    }

    pub fn mark_shore(&mut self) {
        self.on_shore = true;
        self.refresh_validity();
    }

    /// Lenient rule: sea and beach may not sit on an island. Land off an
    /// island is tolerated because its island may not be drawn yet.
    fn refresh_validity(&mut self) {
        self.valid = match self.terrain.class() {
            TerrainClass::Sea | TerrainClass::Shore => !self.on_island,
            TerrainClass::Land | TerrainClass::None => true,
        };
    }

    /// Strict rule, computed from terrain and island membership alone.
    pub fn is_valid_strict(&self) -> bool {
        match self.terrain.class() {
            TerrainClass::None => true,
            TerrainClass::Land => self.on_island,
            TerrainClass::Sea | TerrainClass::Shore => !self.on_island,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_once_only() {
        let mut cell = Cell::EMPTY;
        assert!(cell.assign(Terrain::Forest));
        assert!(!cell.assign(Terrain::Forest));
        assert!(!cell.assign(Terrain::Waves));
        assert_eq!(cell.terrain(), Terrain::Forest);
    }

    #[test]
    fn assign_empty_rejected() {
        let mut cell = Cell::EMPTY;
        assert!(!cell.assign(Terrain::Empty));
        assert!(!cell.is_occupied());
    }

    #[test]
    fn sea_on_island_is_invalid_in_both_modes() {
        let mut cell = Cell::EMPTY;
        cell.assign(Terrain::Boats);
        assert!(cell.is_valid());
        cell.mark_island();
        assert!(!cell.is_valid());
        assert!(!cell.is_valid_strict());
    }

    #[test]
    fn land_off_island_only_invalid_strictly() {
        let mut cell = Cell::EMPTY;
        cell.assign(Terrain::Houses);
        assert!(cell.is_valid());
        assert!(!cell.is_valid_strict());
        cell.mark_island();
        assert!(cell.is_valid_strict());
    }

    #[test]
    fn beach_on_shore_is_valid() {
        let mut cell = Cell::EMPTY;
        cell.mark_shore();
        cell.assign(Terrain::Beach);
        assert!(cell.is_valid());
        assert!(cell.is_valid_strict());
        assert!(cell.is_on_shore());
    }
}
