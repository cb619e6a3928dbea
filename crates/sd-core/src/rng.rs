//! Deterministic per-siding and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each siding gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (siding_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive siding IDs uniformly across the seed space.
//! Sidings never share RNG state, so ticking them in parallel does not change
//! which vehicle identities are minted.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AnchorId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── SidingRng ─────────────────────────────────────────────────────────────────

/// Per-siding deterministic RNG, used to mint random vehicle identities under
/// unlimited spawning.
#[derive(Clone, Debug)]
pub struct SidingRng(SmallRng);

impl SidingRng {
    /// Seed deterministically from the run's global seed and a siding ID.
    pub fn new(global_seed: u64, siding: AnchorId) -> Self {
        let seed = global_seed ^ siding.0.wrapping_mul(MIXING_CONSTANT);
        SidingRng(SmallRng::seed_from_u64(seed))
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Run-level RNG for global operations: minting anchor identities for
/// sidings created without one.
///
/// Used only in single-threaded contexts (yard construction).
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Mint a fresh anchor identity.
    pub fn anchor_id(&mut self) -> AnchorId {
        loop {
            let id = AnchorId(self.0.r#gen());
            if id != AnchorId::INVALID {
                return id;
            }
        }
    }
}
