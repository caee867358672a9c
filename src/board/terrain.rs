//! Terrain kinds and their placement classes.
//!
//! Every terrain belongs to exactly one class: land must end up on an
//! island, sea must stay off islands, and beach belongs on the shore
//! around an island.

use serde::{Deserialize, Serialize};

/// The kind of tile occupying a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Terrain {
    #[default]
    Empty,
    Houses,
    Churches,
    Forest,
    Mountain,
    Boats,
    Waves,
    Beach,
}

/// Number of terrain kinds, including Empty.
pub const TERRAIN_COUNT: usize = 8;

/// The seven kinds a player can place, in declaration order.
pub const PLACEABLE_TERRAINS: [Terrain; TERRAIN_COUNT - 1] = [
    Terrain::Houses,
    Terrain::Churches,
    Terrain::Forest,
    Terrain::Mountain,
    Terrain::Boats,
    Terrain::Waves,
    Terrain::Beach,
];

/// Placement class of a terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerrainClass {
    None,
    Land,
    Sea,
    Shore,
}

impl Terrain {
    pub const fn class(self) -> TerrainClass {
        match self {
            Terrain::Empty => TerrainClass::None,
            Terrain::Houses | Terrain::Churches | Terrain::Forest | Terrain::Mountain => {
                TerrainClass::Land
            }
            Terrain::Boats | Terrain::Waves => TerrainClass::Sea,
            Terrain::Beach => TerrainClass::Shore,
        }
    }

    #[inline]
    pub const fn is_land(self) -> bool {
        matches!(self.class(), TerrainClass::Land)
    }

    #[inline]
    pub const fn is_sea(self) -> bool {
        matches!(self.class(), TerrainClass::Sea)
    }

    #[inline]
    pub const fn is_shore(self) -> bool {
        matches!(self.class(), TerrainClass::Shore)
    }

    /// Returns the single-character board symbol.
    pub const fn symbol(self) -> char {
        match self {
            Terrain::Empty => '.',
            Terrain::Houses => 'H',
            Terrain::Churches => 'C',
            Terrain::Forest => 'F',
            Terrain::Mountain => 'M',
            Terrain::Boats => 'B',
            Terrain::Waves => 'W',
            Terrain::Beach => 'S',
        }
    }

    /// Parses a terrain from its board symbol (case-insensitive).
    pub fn from_symbol(c: char) -> Option<Terrain> {
        match c.to_ascii_uppercase() {
            '.' => Some(Terrain::Empty),
            'H' => Some(Terrain::Houses),
            'C' => Some(Terrain::Churches),
            'F' => Some(Terrain::Forest),
            'M' => Some(Terrain::Mountain),
            'B' => Some(Terrain::Boats),
            'W' => Some(Terrain::Waves),
            'S' => Some(Terrain::Beach),
            _ => None,
        }
    }
}
