//! A single dealt round.

use serde::{Deserialize, Serialize};

use crate::core::EngineError;
use crate::ledger::Connection;
use crate::tiles::Tile;

/// Generation number of a round. Strictly increases per generator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoundId(pub u64);

impl std::fmt::Display for RoundId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Round({})", self.0)
    }
}

/// Column of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// A tile slot on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TilePosition {
    pub side: Side,
    pub index: usize,
}

impl TilePosition {
    #[must_use]
    pub const fn left(index: usize) -> Self {
        Self {
            side: Side::Left,
            index,
        }
    }

    #[must_use]
    pub const fn right(index: usize) -> Self {
        Self {
            side: Side::Right,
            index,
        }
    }

    /// Every position on a board with `pair_count` rows, left column first.
    pub fn all(pair_count: usize) -> impl Iterator<Item = TilePosition> {
        (0..pair_count)
            .map(TilePosition::left)
            .chain((0..pair_count).map(TilePosition::right))
    }
}

/// Left and right tile columns for one round.
///
/// For every left tile there is a right tile of equal rank, and the ranks of
/// the two columns form the same multiset. Positions do not line up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RoundColumns")]
pub struct Round {
    id: RoundId,
    left: Vec<Tile>,
    right: Vec<Tile>,
}

/// Unchecked wire form of a `Round`.
#[derive(Deserialize)]
struct RoundColumns {
    id: RoundId,
    left: Vec<Tile>,
    right: Vec<Tile>,
}

impl TryFrom<RoundColumns> for Round {
    type Error = EngineError;

    fn try_from(columns: RoundColumns) -> Result<Self, Self::Error> {
        Round::from_tiles(columns.id, columns.left, columns.right)
    }
}

impl Round {
    /// Build a round from explicit columns.
    ///
    /// Fails if the columns differ in length or their ranks cannot be
    /// matched one-to-one.
    pub fn from_tiles(id: RoundId, left: Vec<Tile>, right: Vec<Tile>) -> Result<Self, EngineError> {
        if left.len() != right.len() {
            return Err(EngineError::ColumnLengthMismatch {
                left: left.len(),
                right: right.len(),
            });
        }

        let mut left_ranks: Vec<_> = left.iter().map(|t| t.rank).collect();
        let mut right_ranks: Vec<_> = right.iter().map(|t| t.rank).collect();
        left_ranks.sort_unstable();
        right_ranks.sort_unstable();
        if left_ranks != right_ranks {
            return Err(EngineError::NoRankBijection);
        }

        Ok(Self { id, left, right })
    }

    /// Generation number.
    #[must_use]
    pub fn id(&self) -> RoundId {
        self.id
    }

    /// Number of rows (N).
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.left.len()
    }

    /// Left column in deal order.
    #[must_use]
    pub fn left(&self) -> &[Tile] {
        &self.left
    }

    /// Right column, shuffled.
    #[must_use]
    pub fn right(&self) -> &[Tile] {
        &self.right
    }

    /// Tile at a board position.
    #[must_use]
    pub fn tile_at(&self, position: TilePosition) -> Option<&Tile> {
        match position.side {
            Side::Left => self.left.get(position.index),
            Side::Right => self.right.get(position.index),
        }
    }

    /// Whether `left[l]` and `right[r]` share a rank. `None` if out of range.
    #[must_use]
    pub fn is_match(&self, left: usize, right: usize) -> Option<bool> {
        let l = self.left.get(left)?;
        let r = self.right.get(right)?;
        Some(l.matches(r))
    }

    /// One perfect matching, one connection per left tile in left order.
    ///
    /// When ranks repeat, earlier left tiles take earlier right tiles.
    #[must_use]
    pub fn solution(&self) -> Vec<Connection> {
        let mut used = vec![false; self.right.len()];
        let mut out = Vec::with_capacity(self.left.len());

        for (l, tile) in self.left.iter().enumerate() {
            let found = self
                .right
                .iter()
                .enumerate()
                .find(|(r, candidate)| !used[*r] && candidate.matches(tile))
                .map(|(r, _)| r);
            if let Some(r) = found {
                used[r] = true;
                out.push(Connection::new(l, r));
            }
        }
        out
    }
}
