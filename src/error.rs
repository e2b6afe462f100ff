//! Error taxonomy for the engine.
//!
//! Verification failure is deliberately absent: a bad proof is a normal
//! `false` from [`crate::verify`], not an error.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PowError {
    /// The OS entropy source could not supply challenge bytes.
    ///
    /// Fatal for the round. The caller must not fall back to a weaker
    /// source; a predictable challenge defeats the whole scheme.
    #[error("OS entropy source unavailable: {0}")]
    EntropyUnavailable(String),

    /// The search space was exhausted (or the round was stopped) without
    /// finding a valid nonce. Expected-rare; the caller may re-issue a
    /// fresh challenge or lower difficulty.
    #[error("no valid nonce found in the search space")]
    NoSolutionFound,
}
