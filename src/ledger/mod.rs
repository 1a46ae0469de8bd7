//! Player input for a round: connections and the two-tap selection.
//!
//! ## Key Types
//!
//! - `Connection`: A line from a left index to a right index
//! - `ConnectionLedger`: Partial matching with at most one line per tile
//! - `Selection`: Pending picks that commit to the ledger in pairs

pub mod connections;
pub mod selection;

pub use connections::{ConnectRejection, Connection, ConnectionLedger};
pub use selection::{Selection, SelectionOutcome};
