//! Parallel nonce search.
//!
//! The nonce space is split into one contiguous range per worker thread.
//! Workers grind SHA-256 evaluations in increasing nonce order and race to
//! claim a shared stop flag the moment one of them finds a valid nonce;
//! everyone else bails out on their next poll of that flag. The claim is a
//! compare-and-set, so exactly one solution wins even when two workers find
//! valid nonces in the same instant.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use std::thread;

use serde::{Deserialize, Serialize};

use crate::challenge::Challenge;
use crate::difficulty::Target;
use crate::error::PowError;
use crate::params::MAX_NONCE;
use crate::verify::{meets_target, pow_digest};

/// A solved round: the winning nonce and its digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// Nonce satisfying the target mask.
    pub nonce: u32,
    /// `SHA-256(challenge || nonce_le)`.
    pub hash: [u8; 32],
}

/// Multi-threaded solver for one proof-of-work round.
#[derive(Debug, Clone)]
pub struct Solver {
    worker_count: usize,
    max_nonce: u32,
}

impl Solver {
    /// Solver with an explicit worker count over the full nonce space.
    pub fn new(worker_count: usize) -> Self {
        Self {
            worker_count: worker_count.max(1),
            max_nonce: MAX_NONCE,
        }
    }

    /// Restrict the search space to `[0, max_nonce]`.
    ///
    /// Mostly useful in tests, where a 2^16 space keeps exhausted-search
    /// runs fast.
    pub fn with_max_nonce(mut self, max_nonce: u32) -> Self {
        self.max_nonce = max_nonce;
        self
    }

    /// Search for a valid nonce.
    ///
    /// `attempts` is incremented once per hash evaluation across all
    /// workers. Returns [`PowError::NoSolutionFound`] if the whole space is
    /// exhausted without a hit.
    pub fn solve(
        &self,
        challenge: &Challenge,
        target: &Target,
        attempts: &AtomicU64,
    ) -> Result<Solution, PowError> {
        self.solve_with_stop(challenge, target, attempts, &AtomicBool::new(false))
    }

    /// Search for a valid nonce with an externally visible stop flag.
    ///
    /// The flag doubles as the found signal: a caller may set it to abort
    /// the round (timeout, shutdown) and every worker honors it on its next
    /// poll. An aborted round reports [`PowError::NoSolutionFound`].
    pub fn solve_with_stop(
        &self,
        challenge: &Challenge,
        target: &Target,
        attempts: &AtomicU64,
        stop: &AtomicBool,
    ) -> Result<Solution, PowError> {
        let solution: Mutex<Option<Solution>> = Mutex::new(None);

        // Contiguous, non-overlapping ranges covering [0, max_nonce]; the
        // last worker absorbs the remainder.
        let space = self.max_nonce as u64 + 1;
        let workers = (self.worker_count as u64).min(space);
        let chunk = space / workers;

        thread::scope(|s| {
            for i in 0..workers {
                let start = (i * chunk) as u32;
                let end = if i == workers - 1 {
                    self.max_nonce
                } else {
                    ((i + 1) * chunk - 1) as u32
                };
                let solution = &solution;

                s.spawn(move || {
                    for nonce in start..=end {
                        if stop.load(Ordering::Acquire) {
                            return;
                        }

                        let hash = pow_digest(challenge, nonce);
                        attempts.fetch_add(1, Ordering::Relaxed);

                        if meets_target(&hash, target) {
                            // First successful claim wins; a concurrent
                            // winner's flag makes this a no-op and the
                            // losing solution is discarded.
                            if stop
                                .compare_exchange(
                                    false,
                                    true,
                                    Ordering::AcqRel,
                                    Ordering::Acquire,
                                )
                                .is_ok()
                            {
                                if let Ok(mut slot) = solution.lock() {
                                    *slot = Some(Solution { nonce, hash });
                                }
                            }
                            return;
                        }
                    }
                });
            }
        });

        let found = solution
            .lock()
            .map_err(|_| PowError::NoSolutionFound)?
            .take();
        found.ok_or(PowError::NoSolutionFound)
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}
