//! Per-round session state.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::challenge::Challenge;
use crate::difficulty::Target;

/// State for one proof-of-work round.
///
/// Created at round start (fresh challenge, target derived from the
/// controller's current difficulty), mutated concurrently by solver workers
/// (attempt counting) and serially by the controller (difficulty, target,
/// `last_adjust`), and discarded once the round's solution is consumed or
/// the round is abandoned. A challenge is never reused across rounds.
#[derive(Debug)]
pub struct PowContext {
    /// The 32-byte challenge for this round.
    pub challenge: Challenge,
    /// Target mask; always `target_for(difficulty)`.
    pub target: Target,
    /// Difficulty the target was derived from.
    pub difficulty: u16,
    /// Hash evaluations since the last adjustment. Workers increment this
    /// with relaxed atomics; only eventual visibility is needed for the
    /// controller's periodic read.
    attempts: AtomicU64,
    /// Timestamp of the last adjustment (seconds). Only moves forward.
    pub(crate) last_adjust: u64,
}

impl PowContext {
    pub fn new(challenge: Challenge, target: Target, difficulty: u16, now: u64) -> Self {
        Self {
            challenge,
            target,
            difficulty,
            attempts: AtomicU64::new(0),
            last_adjust: now,
        }
    }

    /// Shared attempt counter for solver workers.
    pub fn attempts(&self) -> &AtomicU64 {
        &self.attempts
    }

    /// Attempts recorded since the last adjustment.
    pub fn attempt_count(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    /// Timestamp of the last adjustment.
    pub fn last_adjust(&self) -> u64 {
        self.last_adjust
    }

    /// Read and reset the attempt counter. Called exactly once per
    /// adjustment.
    pub(crate) fn take_attempts(&self) -> u64 {
        self.attempts.swap(0, Ordering::Relaxed)
    }

    #[cfg(test)]
    pub(crate) fn set_attempts(&self, n: u64) {
        self.attempts.store(n, Ordering::Relaxed);
    }
}
