//! Solution verification.
//!
//! The whole point of the scheme is the cost asymmetry: a solver grinds
//! through the nonce space, a verifier recomputes exactly one digest. Both
//! sides share [`pow_digest`] so the byte layout cannot drift between them.

use sha2::{Digest, Sha256};

use crate::challenge::Challenge;
use crate::difficulty::Target;
use crate::params::TARGET_SIZE;

/// Compute the proof digest for a candidate nonce.
///
/// The digest is SHA-256 over the 36-byte concatenation of the challenge
/// and the little-endian nonce encoding. Little-endian is fixed on both the
/// solver and verifier side; any mismatch here silently breaks all
/// verification.
#[inline]
pub fn pow_digest(challenge: &Challenge, nonce: u32) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(challenge);
    hasher.update(nonce.to_le_bytes());
    hasher.finalize().into()
}

/// Check a digest against a target mask.
///
/// The target is a required-bit pattern: every bit set in the target must
/// also be set in the digest (`hash[i] & target[i] == target[i]` for every
/// byte). This is a mask test, not a numeric "hash below threshold"
/// comparison.
#[inline]
pub fn meets_target(hash: &[u8; 32], target: &Target) -> bool {
    for i in 0..TARGET_SIZE {
        if hash[i] & target[i] != target[i] {
            return false;
        }
    }
    true
}

/// Verify a claimed solution.
///
/// Recomputes the digest and applies the mask test. Pure and stateless;
/// costs one hash evaluation regardless of how expensive the search was.
pub fn verify(challenge: &Challenge, nonce: u32, target: &Target) -> bool {
    meets_target(&pow_digest(challenge, nonce), target)
}
