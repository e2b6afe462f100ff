//! Difficulty control.
//!
//! Difficulty is a scalar in `[1, 65535]` counting required leading bits;
//! [`target_for`] maps it to a 32-byte mask. The controller adapts the
//! scalar from observed solve throughput so solve latency tracks a desired
//! value.
//!
//! The adjustment is a plain feedback loop over the previous measurement
//! window: difficulty always lags real solver capacity by one window. That
//! lag is an accepted trade-off for an admission gate, where a transiently
//! easy (or hard) window costs little.

use serde::{Deserialize, Serialize};

use crate::context::PowContext;
use crate::params::{
    DEFAULT_ADJUST_INTERVAL_SECS, DEFAULT_TARGET_SOLVE_SECS, HASHES_PER_DIFFICULTY,
    MAX_DIFFICULTY, MIN_DIFFICULTY, TARGET_SIZE,
};

/// A 32-byte required-bit mask derived from the current difficulty.
pub type Target = [u8; TARGET_SIZE];

/// Build the target mask for a difficulty level.
///
/// Bit `i` (counting from the most significant end of the 256-bit mask) is
/// 1 for the first `difficulty` bits and 0 thereafter, packed byte-wise:
/// full `0xFF` bytes, then at most one partial byte, then zeros.
/// Difficulties above 256 saturate at the all-ones mask, which no digest
/// short of all-ones can satisfy.
///
/// This mapping is pure; the target is never mutated independently of the
/// difficulty it was derived from.
pub fn target_for(difficulty: u16) -> Target {
    let difficulty = difficulty.max(MIN_DIFFICULTY) as usize;
    let full_bytes = (difficulty / 8).min(TARGET_SIZE);
    let partial_bits = difficulty % 8;

    let mut target = [0u8; TARGET_SIZE];
    for byte in target.iter_mut().take(full_bytes) {
        *byte = 0xFF;
    }
    if partial_bits != 0 && full_bytes < TARGET_SIZE {
        target[full_bytes] = 0xFF << (8 - partial_bits);
    }
    target
}

/// Controller tuning parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Seconds between difficulty adjustments.
    pub adjust_interval_secs: u64,
    /// Desired solve latency in seconds.
    pub target_solve_secs: u64,
    /// Difficulty used before the first adjustment.
    pub initial_difficulty: u16,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            adjust_interval_secs: DEFAULT_ADJUST_INTERVAL_SECS,
            target_solve_secs: DEFAULT_TARGET_SOLVE_SECS,
            initial_difficulty: MIN_DIFFICULTY,
        }
    }
}

/// Adaptive difficulty controller.
///
/// The difficulty value is the only state that survives across rounds;
/// everything else lives in a per-round [`PowContext`].
#[derive(Debug, Clone)]
pub struct DifficultyController {
    config: ControllerConfig,
    difficulty: u16,
}

impl DifficultyController {
    pub fn new(config: ControllerConfig) -> Self {
        let difficulty = config
            .initial_difficulty
            .clamp(MIN_DIFFICULTY, MAX_DIFFICULTY);
        Self { config, difficulty }
    }

    /// Current difficulty level.
    pub fn difficulty(&self) -> u16 {
        self.difficulty
    }

    /// Target mask for the current difficulty.
    pub fn target(&self) -> Target {
        target_for(self.difficulty)
    }

    /// Run one adjustment step against a round context.
    ///
    /// No-op until `now - ctx.last_adjust` exceeds the configured interval.
    /// When it fires, the observed hash rate over the window is mapped to a
    /// new difficulty:
    ///
    /// ```text
    /// new = clamp(rate * target_solve_secs / HASHES_PER_DIFFICULTY, 1, 65535)
    /// ```
    ///
    /// with saturating arithmetic on extreme rates. The context's target is
    /// recomputed, its attempt counter resets to zero, and `last_adjust`
    /// moves forward to `now`. Returns whether an adjustment occurred.
    ///
    /// Must not be called while a solve on `ctx` is in flight; the solver
    /// reads the target without synchronization for the whole round.
    pub fn adjust(&mut self, ctx: &mut PowContext, now: u64) -> bool {
        if now.saturating_sub(ctx.last_adjust) <= self.config.adjust_interval_secs {
            return false;
        }

        let attempts = ctx.take_attempts();
        let hash_rate = attempts / self.config.adjust_interval_secs.max(1);
        let scaled = hash_rate.saturating_mul(self.config.target_solve_secs)
            / HASHES_PER_DIFFICULTY;
        let new_difficulty = scaled
            .clamp(MIN_DIFFICULTY as u64, MAX_DIFFICULTY as u64) as u16;

        self.difficulty = new_difficulty;
        ctx.difficulty = new_difficulty;
        ctx.target = target_for(new_difficulty);
        ctx.last_adjust = now;
        true
    }
}

impl Default for DifficultyController {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}
