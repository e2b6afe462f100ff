//! # powgate
//!
//! A proof-of-work admission engine for Sybil resistance: expensive to
//! solve, cheap to verify.
//!
//! ## How a round works
//!
//! 1. The issuer draws a fresh 32-byte challenge from OS entropy and pairs
//!    it with a target mask derived from the current difficulty.
//! 2. The client searches the 32-bit nonce space, in parallel, for a nonce
//!    whose `SHA-256(challenge || nonce_le)` digest carries every bit the
//!    target requires.
//! 3. The issuer verifies the claim with a single digest recomputation.
//! 4. Periodically, a feedback controller maps the observed hash rate onto
//!    a new difficulty so that solve latency tracks a configured value.
//!
//! ## Example
//!
//! ```rust
//! use powgate::{target_for, verify, Solver};
//! use std::sync::atomic::AtomicU64;
//!
//! let challenge = [0u8; 32];
//! let target = target_for(8); // digest must start with 0xFF
//! let attempts = AtomicU64::new(0);
//!
//! let solution = Solver::new(4)
//!     .solve(&challenge, &target, &attempts)
//!     .expect("difficulty 8 solves in ~256 attempts");
//!
//! assert!(verify(&challenge, solution.nonce, &target));
//! ```
//!
//! Transport, persistence of issued challenges, and anything chain-like are
//! out of scope; this is the in-process engine only.

mod challenge;
mod context;
mod difficulty;
mod error;
pub mod params;
mod solver;
mod verify;

pub use challenge::{generate_challenge, Challenge};
pub use context::PowContext;
pub use difficulty::{target_for, ControllerConfig, DifficultyController, Target};
pub use error::PowError;
pub use solver::{Solution, Solver};
pub use verify::{meets_target, pow_digest, verify};

#[cfg(test)]
mod tests;

/// Issuer-side facade tying challenge generation to difficulty control.
///
/// The engine owns the difficulty value that survives across rounds, the
/// one deliberate exception to per-round state isolation. Everything else
/// lives in the [`PowContext`] it issues.
#[derive(Debug, Default)]
pub struct PowEngine {
    controller: DifficultyController,
}

impl PowEngine {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            controller: DifficultyController::new(config),
        }
    }

    /// Current difficulty level.
    pub fn difficulty(&self) -> u16 {
        self.controller.difficulty()
    }

    /// Issue a fresh round: new challenge, target for the current
    /// difficulty, attempt counter at zero.
    pub fn issue(&self, now: u64) -> Result<PowContext, PowError> {
        let challenge = generate_challenge()?;
        Ok(PowContext::new(
            challenge,
            self.controller.target(),
            self.controller.difficulty(),
            now,
        ))
    }

    /// Run a difficulty adjustment step against a round context.
    ///
    /// See [`DifficultyController::adjust`]. Returns whether an adjustment
    /// occurred.
    pub fn adjust(&mut self, ctx: &mut PowContext, now: u64) -> bool {
        self.controller.adjust(ctx, now)
    }

    /// Verify a claimed solution against a round context.
    pub fn check(&self, ctx: &PowContext, nonce: u32) -> bool {
        verify(&ctx.challenge, nonce, &ctx.target)
    }
}

/// One-shot solve over the full nonce space with `worker_count` threads.
pub fn solve(
    challenge: &Challenge,
    target: &Target,
    worker_count: usize,
) -> Result<Solution, PowError> {
    let attempts = std::sync::atomic::AtomicU64::new(0);
    Solver::new(worker_count).solve(challenge, target, &attempts)
}
