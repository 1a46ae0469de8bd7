//! Verification of submitted connections.

pub mod scoring;

pub use scoring::{ConnectionVerdict, VerificationResult, Verifier, VerifyRejection};
