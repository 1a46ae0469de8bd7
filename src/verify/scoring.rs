//! Scoring a ledger against its round.
//!
//! A connection is correct when the two tiles share a rank. Category is
//! ignored on purpose: different suits carry the same values.

use serde::{Deserialize, Serialize};

use crate::core::DEFAULT_POINTS_PER_MATCH;
use crate::ledger::{Connection, ConnectionLedger};
use crate::round::Round;

/// Why verification was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerifyRejection {
    /// Nothing has been connected yet.
    EmptyLedger,
    /// The ledger refers to rows the round does not have.
    RoundMismatch,
}

/// Correctness of one connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionVerdict {
    pub connection: Connection,
    pub is_correct: bool,
}

/// Outcome of one verification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// One verdict per connection, in ledger order.
    pub verdicts: Vec<ConnectionVerdict>,
    pub correct_count: usize,
    pub incorrect_count: usize,
    /// Score delta for the session.
    pub points_awarded: i64,
}

impl VerificationResult {
    /// No mistakes and at least one correct connection.
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.incorrect_count == 0 && self.correct_count > 0
    }

    /// Verdict for a specific connection, if it was verified.
    #[must_use]
    pub fn verdict_for(&self, connection: Connection) -> Option<bool> {
        self.verdicts
            .iter()
            .find(|v| v.connection == connection)
            .map(|v| v.is_correct)
    }
}

/// Scores ledgers with a fixed multiplier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verifier {
    points_per_match: i64,
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new(DEFAULT_POINTS_PER_MATCH)
    }
}

impl Verifier {
    #[must_use]
    pub fn new(points_per_match: i64) -> Self {
        Self { points_per_match }
    }

    #[must_use]
    pub fn points_per_match(&self) -> i64 {
        self.points_per_match
    }

    /// Score every connection in `ledger` against `round`.
    ///
    /// Unconnected rows count neither way. The verifier does not touch any
    /// score; the caller applies `points_awarded`.
    pub fn verify(
        &self,
        round: &Round,
        ledger: &ConnectionLedger,
    ) -> Result<VerificationResult, VerifyRejection> {
        if ledger.is_empty() {
            return Err(VerifyRejection::EmptyLedger);
        }

        let mut verdicts = Vec::with_capacity(ledger.len());
        for &connection in ledger.connections() {
            let is_correct = round
                .is_match(connection.left, connection.right)
                .ok_or(VerifyRejection::RoundMismatch)?;
            verdicts.push(ConnectionVerdict {
                connection,
                is_correct,
            });
        }

        let correct_count = verdicts.iter().filter(|v| v.is_correct).count();
        let incorrect_count = verdicts.len() - correct_count;
        let points_awarded = correct_count as i64 * self.points_per_match;

        Ok(VerificationResult {
            verdicts,
            correct_count,
            incorrect_count,
            points_awarded,
        })
    }
}
