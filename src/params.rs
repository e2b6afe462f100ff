//! Engine parameters.
//!
//! The difficulty calibration constants are explicit rather than baked into
//! the adjustment arithmetic, so the feedback loop can be reasoned about
//! (and tuned) in one place.

/// Challenge size in bytes.
pub const CHALLENGE_SIZE: usize = 32;

/// Target mask size in bytes (one bit per bit of the 256-bit digest).
pub const TARGET_SIZE: usize = 32;

/// Nonce size in bytes (little-endian u32 on the wire).
pub const NONCE_SIZE: usize = 4;

/// Upper bound of the nonce search space.
pub const MAX_NONCE: u32 = u32::MAX;

/// Minimum difficulty (required leading constrained bits).
pub const MIN_DIFFICULTY: u16 = 1;

/// Maximum difficulty.
pub const MAX_DIFFICULTY: u16 = u16::MAX;

/// Default interval between difficulty adjustments, in seconds.
pub const DEFAULT_ADJUST_INTERVAL_SECS: u64 = 60;

/// Default desired solve latency, in seconds.
pub const DEFAULT_TARGET_SOLVE_SECS: u64 = 1;

/// Hash-rate units per difficulty point.
///
/// The controller maps an observed rate of `n * HASHES_PER_DIFFICULTY`
/// hashes per second to difficulty `n` at the default one-second solve
/// latency. This is the calibration constant of the feedback loop.
pub const HASHES_PER_DIFFICULTY: u64 = 1000;
