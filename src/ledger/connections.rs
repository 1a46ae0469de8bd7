//! Connection ledger.
//!
//! Holds the connections the player has drawn in the current round. The
//! ledger is a strict partial matching: each left index and each right index
//! appears in at most one connection. Two parallel maps keep both directions
//! O(1); a separate vector keeps creation order for rendering.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A line from `left[left]` to `right[right]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    pub left: usize,
    pub right: usize,
}

impl Connection {
    #[must_use]
    pub const fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }
}

/// Why a connect or disconnect was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectRejection {
    /// An index is outside `[0, N)`.
    OutOfRange,
    /// The left tile already has a connection.
    LeftTaken,
    /// The right tile already has a connection.
    RightTaken,
    /// The ledger was finalized by verification.
    Finalized,
    /// Nothing to disconnect.
    NotConnected,
}

/// Connections for one round of `pair_count` rows.
#[derive(Clone, Debug, Default)]
pub struct ConnectionLedger {
    pair_count: usize,
    by_left: FxHashMap<usize, usize>,
    by_right: FxHashMap<usize, usize>,
    order: Vec<Connection>,
    finalized: bool,
}

impl ConnectionLedger {
    /// Create an empty ledger for a board of `pair_count` rows.
    #[must_use]
    pub fn new(pair_count: usize) -> Self {
        Self {
            pair_count,
            ..Self::default()
        }
    }

    /// Rows on the board this ledger belongs to.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    /// Add a connection.
    pub fn connect(&mut self, left: usize, right: usize) -> Result<Connection, ConnectRejection> {
        if self.finalized {
            return Err(ConnectRejection::Finalized);
        }
        if left >= self.pair_count || right >= self.pair_count {
            return Err(ConnectRejection::OutOfRange);
        }
        if self.by_left.contains_key(&left) {
            return Err(ConnectRejection::LeftTaken);
        }
        if self.by_right.contains_key(&right) {
            return Err(ConnectRejection::RightTaken);
        }

        let connection = Connection::new(left, right);
        self.by_left.insert(left, right);
        self.by_right.insert(right, left);
        self.order.push(connection);
        Ok(connection)
    }

    /// Remove the connection starting at `left`.
    pub fn disconnect_left(&mut self, left: usize) -> Result<Connection, ConnectRejection> {
        if self.finalized {
            return Err(ConnectRejection::Finalized);
        }
        let right = self
            .by_left
            .remove(&left)
            .ok_or(ConnectRejection::NotConnected)?;
        self.by_right.remove(&right);
        self.order.retain(|c| c.left != left);
        Ok(Connection::new(left, right))
    }

    /// Drop every connection and accept writes again.
    pub fn clear(&mut self) {
        self.by_left.clear();
        self.by_right.clear();
        self.order.clear();
        self.finalized = false;
    }

    /// Refuse further writes until `clear`.
    pub fn finalize(&mut self) {
        self.finalized = true;
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    #[must_use]
    pub fn is_left_connected(&self, left: usize) -> bool {
        self.by_left.contains_key(&left)
    }

    #[must_use]
    pub fn is_right_connected(&self, right: usize) -> bool {
        self.by_right.contains_key(&right)
    }

    /// Right partner of a left tile.
    #[must_use]
    pub fn partner_of_left(&self, left: usize) -> Option<usize> {
        self.by_left.get(&left).copied()
    }

    /// Left partner of a right tile.
    #[must_use]
    pub fn partner_of_right(&self, right: usize) -> Option<usize> {
        self.by_right.get(&right).copied()
    }

    /// Connections in creation order.
    #[must_use]
    pub fn connections(&self) -> &[Connection] {
        &self.order
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Every row is connected.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.pair_count > 0 && self.order.len() == self.pair_count
    }
}
