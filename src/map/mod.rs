//! Immutable game map: regions and their borders.
//!
//! The map is built once from asset data and never mutated. Runtime facts
//! about regions (ownership, remaining lost tribes) live in `GameState`.

pub mod graph;
pub mod tile;

pub use graph::{Map, MapError};
pub use tile::{RegionId, Symbol, Terrain, Tile};
