//! Region adjacency graph.
//!
//! ## Invariants
//!
//! A constructed `Map` always satisfies:
//! - at least one tile
//! - every border references two distinct, existing tiles
//! - no border is listed twice (in either direction)
//! - the graph is connected
//!
//! Adjacency is symmetric: if B is adjacent to A then A is adjacent to B.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::tile::{RegionId, Tile};

/// Structural problems detected while building a map.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("the map has no tiles")]
    Empty,
    #[error("border ({a}, {b}) references a non-existing tile (the map has {n_tiles} tiles)")]
    BorderOutOfRange { a: u16, b: u16, n_tiles: usize },
    #[error("border ({0}, {0}): a tile can't border itself")]
    SelfBorder(u16),
    #[error("border ({a}, {b}) is listed more than once")]
    DuplicateBorder { a: u16, b: u16 },
    #[error("the map is disconnected: {unreachable} can't be reached from region 0")]
    Disconnected { unreachable: RegionId },
}

/// Raw map description, as found in asset files.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MapSpec {
    /// Tiles, indexed by `RegionId`.
    pub tiles: Vec<Tile>,
    /// Undirected borders between tiles.
    pub borders: Vec<(u16, u16)>,
}

/// Immutable, validated game map.
///
/// Deserializing a `Map` runs the same validation as [`Map::new`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MapSpec", into = "MapSpec")]
pub struct Map {
    tiles: Vec<Tile>,
    borders: Vec<(u16, u16)>,
    adjacency: Vec<FxHashSet<RegionId>>,
}

impl Map {
    /// Build a map from tiles and undirected borders.
    ///
    /// # Errors
    ///
    /// Returns a [`MapError`] if the borders are malformed or the resulting
    /// graph is disconnected.
    pub fn new(tiles: Vec<Tile>, borders: Vec<(u16, u16)>) -> Result<Self, MapError> {
        if tiles.is_empty() {
            return Err(MapError::Empty);
        }

        let n_tiles = tiles.len();
        let mut adjacency = vec![FxHashSet::default(); n_tiles];

        for &(a, b) in &borders {
            if usize::from(a.max(b)) >= n_tiles {
                return Err(MapError::BorderOutOfRange { a, b, n_tiles });
            }
            if a == b {
                return Err(MapError::SelfBorder(a));
            }
            if !adjacency[usize::from(a)].insert(RegionId(b)) {
                return Err(MapError::DuplicateBorder { a, b });
            }
            adjacency[usize::from(b)].insert(RegionId(a));
        }

        let map = Self {
            tiles,
            borders,
            adjacency,
        };

        if let Some(unreachable) = map.first_unreachable() {
            return Err(MapError::Disconnected { unreachable });
        }

        Ok(map)
    }

    /// Breadth-first search from region 0.
    fn first_unreachable(&self) -> Option<RegionId> {
        let mut seen = vec![false; self.tiles.len()];
        let mut queue = VecDeque::from([RegionId(0)]);
        seen[0] = true;

        while let Some(region) = queue.pop_front() {
            for &next in &self.adjacency[region.index()] {
                if !seen[next.index()] {
                    seen[next.index()] = true;
                    queue.push_back(next);
                }
            }
        }

        seen.iter()
            .position(|&reached| !reached)
            .and_then(|index| u16::try_from(index).ok())
            .map(RegionId)
    }

    /// All tiles, in `RegionId` order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Get a tile, or `None` if the region is out of range.
    #[must_use]
    pub fn tile(&self, region: RegionId) -> Option<&Tile> {
        self.tiles.get(region.index())
    }

    /// Number of regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always `false`: an empty map can't be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Check whether a region exists on this map.
    #[must_use]
    pub fn contains(&self, region: RegionId) -> bool {
        region.index() < self.tiles.len()
    }

    /// Iterate over all region IDs.
    pub fn regions(&self) -> impl Iterator<Item = RegionId> {
        (0..self.tiles.len() as u16).map(RegionId)
    }

    /// Check whether a region is a valid first point of entry.
    ///
    /// Out-of-range regions are never at the border.
    #[must_use]
    pub fn is_border(&self, region: RegionId) -> bool {
        self.tile(region).is_some_and(|tile| tile.is_border)
    }

    /// Regions sharing a border with `region`.
    ///
    /// # Panics
    ///
    /// Panics if `region` is out of range. Use [`Map::contains`] first for
    /// untrusted input.
    #[must_use]
    pub fn adjacent(&self, region: RegionId) -> &FxHashSet<RegionId> {
        &self.adjacency[region.index()]
    }

    /// Check whether two regions share a border.
    #[must_use]
    pub fn is_adjacent(&self, a: RegionId, b: RegionId) -> bool {
        self.adjacency
            .get(a.index())
            .is_some_and(|neighbours| neighbours.contains(&b))
    }

    /// The undirected borders this map was built from.
    #[must_use]
    pub fn borders(&self) -> &[(u16, u16)] {
        &self.borders
    }
}

impl TryFrom<MapSpec> for Map {
    type Error = MapError;

    fn try_from(spec: MapSpec) -> Result<Self, Self::Error> {
        Self::new(spec.tiles, spec.borders)
    }
}

impl From<Map> for MapSpec {
    fn from(map: Map) -> Self {
        Self {
            tiles: map.tiles,
            borders: map.borders,
        }
    }
}
