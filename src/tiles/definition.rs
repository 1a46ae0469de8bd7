//! Tile definitions - immutable tile values.
//!
//! A `Tile` is a small `Copy` value naming one catalog entry: its id, rank
//! and category. Rounds hold these values; nothing ever mutates them.

use serde::{Deserialize, Serialize};

/// Identifier of a catalog tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl TileId {
    /// Create a new tile ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// Numeric face value of a tile, always in `1..=9`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rank(u8);

impl Rank {
    /// Lowest rank.
    pub const MIN: Rank = Rank(1);
    /// Highest rank.
    pub const MAX: Rank = Rank(9);

    /// Create a rank, or `None` outside `1..=9`.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN.0 && value <= Self::MAX.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Get the raw value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Iterate over every rank in ascending order.
    pub fn all() -> impl Iterator<Item = Rank> {
        (Self::MIN.0..=Self::MAX.0).map(Rank)
    }
}

impl TryFrom<u8> for Rank {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rank::new(value).ok_or_else(|| format!("rank {value} outside 1..=9"))
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> u8 {
        rank.0
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tile suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Bamboo,
    Character,
    Dots,
}

impl Category {
    /// Every category, in catalog order.
    pub const ALL: [Category; 3] = [Category::Bamboo, Category::Character, Category::Dots];

    /// Prefix of the artwork asset names for this category.
    #[must_use]
    pub const fn artwork_prefix(self) -> &'static str {
        match self {
            Category::Bamboo => "ari",
            Category::Character => "bri",
            Category::Dots => "cri",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Category::Bamboo => "Bamboo",
            Category::Character => "Character",
            Category::Dots => "Dots",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// One catalog tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub rank: Rank,
    pub category: Category,
}

impl Tile {
    /// Create a tile value.
    #[must_use]
    pub const fn new(id: TileId, rank: Rank, category: Category) -> Self {
        Self { id, rank, category }
    }

    /// Name of the artwork asset for this tile, e.g. `"ari 3"`.
    #[must_use]
    pub fn artwork_key(&self) -> String {
        format!("{} {}", self.category.artwork_prefix(), self.rank)
    }

    /// Two tiles match when their ranks agree. Category never matters.
    #[must_use]
    pub fn matches(&self, other: &Tile) -> bool {
        self.rank == other.rank
    }
}
