//! Tile system: definitions and the catalog.
//!
//! ## Key Types
//!
//! - `Tile`: Immutable `{id, rank, category}` value
//! - `Rank`: Face value in `1..=9`
//! - `Category`: Bamboo, Character or Dots
//! - `TileCatalog`: Lookup by slot or id

pub mod catalog;
pub mod definition;

pub use catalog::TileCatalog;
pub use definition::{Category, Rank, Tile, TileId};
