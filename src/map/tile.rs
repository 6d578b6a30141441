//! Map tiles (regions) and their static attributes.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Region identifier: the index of a tile in the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RegionId(pub u16);

impl RegionId {
    /// Create a new region ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the tile index this ID refers to.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Region({})", self.0)
    }
}

/// Terrain kind of a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Farmland,
    Forest,
    Hill,
    Lake,
    Sea,
    Swamp,
    Mountain,
}

impl std::fmt::Display for Terrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// Markers printed on a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Cavern,
    /// The region starts the game occupied by a neutral lost tribe.
    LostTribe,
    MagicSource,
    Mine,
}

/// A single region of the map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Terrain kind.
    pub terrain: Terrain,

    /// Whether the region lies on the map border.
    ///
    /// A race with no active regions may only enter the map here.
    #[serde(default)]
    pub is_border: bool,

    /// Symbols printed on the region. Never contains duplicates.
    #[serde(default)]
    pub symbols: SmallVec<[Symbol; 2]>,
}

impl Tile {
    /// Create a tile without symbols.
    #[must_use]
    pub fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            is_border: false,
            symbols: SmallVec::new(),
        }
    }

    /// Mark the tile as lying on the map border.
    #[must_use]
    pub fn at_border(mut self) -> Self {
        self.is_border = true;
        self
    }

    /// Add a symbol. Adding a symbol twice has no effect.
    #[must_use]
    pub fn with_symbol(mut self, symbol: Symbol) -> Self {
        if !self.symbols.contains(&symbol) {
            self.symbols.push(symbol);
        }
        self
    }

    /// Check whether the tile carries a symbol.
    #[must_use]
    pub fn has_symbol(&self, symbol: Symbol) -> bool {
        self.symbols.contains(&symbol)
    }

    /// Check whether the tile starts the game with a lost tribe.
    #[must_use]
    pub fn has_lost_tribe(&self) -> bool {
        self.has_symbol(Symbol::LostTribe)
    }
}
