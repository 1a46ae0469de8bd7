//! Tile catalog.
//!
//! The `TileCatalog` stores every tile the game can deal. The standard
//! catalog has all three categories at all nine ranks. Partial catalogs can
//! be assembled by hand, which is how missing-artwork packaging defects are
//! reproduced in tests.

use rustc_hash::FxHashMap;

use super::definition::{Category, Rank, Tile, TileId};
use crate::core::EngineError;

/// Registry of tiles, keyed by id and by `(category, rank)` slot.
///
/// ## Example
///
/// ```
/// use mahjong_bridge::tiles::{Category, Rank, TileCatalog};
///
/// let catalog = TileCatalog::standard();
/// let tile = catalog.tile(Category::Bamboo, Rank::new(3).unwrap()).unwrap();
/// assert_eq!(tile.artwork_key(), "ari 3");
/// ```
#[derive(Clone, Debug, Default)]
pub struct TileCatalog {
    tiles: FxHashMap<TileId, Tile>,
    slots: FxHashMap<(Category, Rank), TileId>,
    next_id: u32,
}

impl TileCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with every category at every rank.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for category in Category::ALL {
            for rank in Rank::all() {
                catalog.insert_slot(category, rank);
            }
        }
        catalog
    }

    /// Register a tile for a slot, assigning the next id.
    pub fn register(&mut self, category: Category, rank: Rank) -> Result<TileId, EngineError> {
        if self.slots.contains_key(&(category, rank)) {
            return Err(EngineError::DuplicateTile { category, rank });
        }
        Ok(self.insert_slot(category, rank))
    }

    // Caller guarantees the slot is free.
    fn insert_slot(&mut self, category: Category, rank: Rank) -> TileId {
        let id = TileId::new(self.next_id);
        self.next_id += 1;

        self.tiles.insert(id, Tile::new(id, rank, category));
        self.slots.insert((category, rank), id);
        id
    }

    /// Categories in catalog order.
    #[must_use]
    pub fn all_categories(&self) -> &'static [Category] {
        &Category::ALL
    }

    /// Tiles of one category, sorted by rank.
    #[must_use]
    pub fn tiles_for(&self, category: Category) -> Vec<Tile> {
        let mut tiles: Vec<Tile> = self
            .tiles
            .values()
            .filter(|t| t.category == category)
            .copied()
            .collect();
        tiles.sort_by_key(|t| t.rank);
        tiles
    }

    /// Look up the tile in a slot.
    #[must_use]
    pub fn tile(&self, category: Category, rank: Rank) -> Option<Tile> {
        self.slots
            .get(&(category, rank))
            .and_then(|id| self.tiles.get(id))
            .copied()
    }

    /// Look up a tile by id.
    #[must_use]
    pub fn get(&self, id: TileId) -> Option<Tile> {
        self.tiles.get(&id).copied()
    }

    /// Number of registered tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterate over all tiles in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Number of distinct `(rank, left category, right category)` triples
    /// this catalog can supply. This caps the pairs in one round.
    #[must_use]
    pub fn distinct_pair_capacity(&self) -> usize {
        Rank::all()
            .map(|rank| {
                let k = Category::ALL
                    .iter()
                    .filter(|c| self.slots.contains_key(&(**c, rank)))
                    .count();
                k * k.saturating_sub(1)
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank(v: u8) -> Rank {
        Rank::new(v).unwrap()
    }

    #[test]
    fn test_standard_catalog() {
        let catalog = TileCatalog::standard();

        assert_eq!(catalog.len(), 27);
        assert_eq!(catalog.all_categories(), &Category::ALL);
        for category in Category::ALL {
            let tiles = catalog.tiles_for(category);
            assert_eq!(tiles.len(), 9);
            let ranks: Vec<u8> = tiles.iter().map(|t| t.rank.value()).collect();
            assert_eq!(ranks, (1..=9).collect::<Vec<_>>());
        }
        assert_eq!(catalog.distinct_pair_capacity(), 54);
    }

    #[test]
    fn test_lookup_by_slot_and_id() {
        let catalog = TileCatalog::standard();

        let tile = catalog.tile(Category::Character, rank(7)).unwrap();
        assert_eq!(tile.category, Category::Character);
        assert_eq!(tile.rank, rank(7));
        assert_eq!(catalog.get(tile.id), Some(tile));
        assert_eq!(catalog.get(TileId::new(999)), None);
    }

    #[test]
    fn test_duplicate_slot_rejected() {
        let mut catalog = TileCatalog::new();
        catalog.register(Category::Dots, rank(1)).unwrap();

        let err = catalog.register(Category::Dots, rank(1)).unwrap_err();
        assert_eq!(
            err,
            EngineError::DuplicateTile {
                category: Category::Dots,
                rank: rank(1)
            }
        );
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_standard_ids_are_dense() {
        let mut catalog = TileCatalog::standard();
        let mut ids: Vec<u32> = catalog.iter().map(|t| t.id.raw()).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..27).collect::<Vec<_>>());

        assert!(catalog.register(Category::Bamboo, rank(9)).is_err());
        assert_eq!(catalog.len(), 27);
    }

    #[test]
    fn test_partial_catalog_capacity() {
        let mut catalog = TileCatalog::new();
        catalog.register(Category::Bamboo, rank(2)).unwrap();
        catalog.register(Category::Dots, rank(2)).unwrap();
        catalog.register(Category::Dots, rank(5)).unwrap();

        assert!(catalog.tile(Category::Character, rank(2)).is_none());
        // Only rank 2 has two categories: Bamboo->Dots and Dots->Bamboo.
        assert_eq!(catalog.distinct_pair_capacity(), 2);
    }
}
