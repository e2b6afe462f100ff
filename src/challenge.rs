//! Challenge generation.
//!
//! Each round gets a fresh 32-byte challenge drawn from the OS CSPRNG.
//! The value must be unpredictable to anyone who did not observe this
//! specific issuance, otherwise solutions can be precomputed offline and
//! the admission gate is worthless.

use crate::error::PowError;
use crate::params::CHALLENGE_SIZE;

/// An opaque 32-byte challenge, unique per proof-of-work round.
pub type Challenge = [u8; CHALLENGE_SIZE];

/// Generate a fresh challenge from OS entropy.
///
/// Returns [`PowError::EntropyUnavailable`] if the OS RNG cannot supply
/// bytes. That failure is surfaced, not retried: issuing a challenge from
/// a degraded source is worse than issuing none.
pub fn generate_challenge() -> Result<Challenge, PowError> {
    let mut challenge = [0u8; CHALLENGE_SIZE];
    getrandom::getrandom(&mut challenge)
        .map_err(|e| PowError::EntropyUnavailable(e.to_string()))?;
    Ok(challenge)
}
