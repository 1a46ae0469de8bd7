//! Two-tap selection.
//!
//! The player picks one tile on each side in either order. When both sides
//! hold a pick, the pair is committed to the ledger and both picks clear.
//! Picking a tile that is already connected is ignored. Picking a second
//! tile on the same side replaces the first pick.

use super::connections::{ConnectRejection, Connection, ConnectionLedger};
use crate::round::Side;

/// Result of one selection tap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Waiting for a tile on the other side.
    Pending,
    /// Both sides were picked and the connection was made.
    Connected(Connection),
    /// The tapped tile is already connected or out of range.
    Ignored,
    /// Both sides were picked but the ledger refused the connection.
    Rejected(ConnectRejection),
}

/// Pending picks on each side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    left: Option<usize>,
    right: Option<usize>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pending left pick.
    #[must_use]
    pub fn left(&self) -> Option<usize> {
        self.left
    }

    /// Pending right pick.
    #[must_use]
    pub fn right(&self) -> Option<usize> {
        self.right
    }

    /// Drop both picks.
    pub fn clear(&mut self) {
        self.left = None;
        self.right = None;
    }

    /// Tap a tile on `side`.
    pub fn select(&mut self, ledger: &mut ConnectionLedger, side: Side, index: usize) -> SelectionOutcome {
        let taken = match side {
            Side::Left => ledger.is_left_connected(index),
            Side::Right => ledger.is_right_connected(index),
        };
        if taken || index >= ledger.pair_count() || ledger.is_finalized() {
            return SelectionOutcome::Ignored;
        }

        match side {
            Side::Left => self.left = Some(index),
            Side::Right => self.right = Some(index),
        }

        let (Some(left), Some(right)) = (self.left, self.right) else {
            return SelectionOutcome::Pending;
        };
        self.clear();

        match ledger.connect(left, right) {
            Ok(connection) => SelectionOutcome::Connected(connection),
            Err(rejection) => SelectionOutcome::Rejected(rejection),
        }
    }
}
