//! Deterministic per-agent and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each agent gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (agent_index * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive agent indices uniformly across the seed space.
//! This means:
//!
//! - Agents never share RNG state (no contention, no ordering dependency).
//! - A resident's sequence of destinations and trip times depends only on
//!   the master seed and its own ID — never on thread interleaving.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG.
///
/// Create one per agent at simulation init and move it into the agent's
/// thread.  The type is `!Sync` so it can never be accidentally shared.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's master seed and an agent index.
    ///
    /// Residents use their `ResidentId`; the maintenance truck uses an index
    /// one past the last resident.
    pub fn new(global_seed: u64, agent_index: u64) -> Self {
        let seed = global_seed ^ agent_index.wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// A trip or backoff duration: uniform in `1..=waiting_time` time units.
    #[inline]
    pub fn trip_time(&mut self, waiting_time: u32) -> u32 {
        self.0.gen_range(1..=waiting_time.max(1))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
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

/// Orchestrator-level RNG for global draws (initial resident placement).
///
/// Used only on the orchestrator thread, before any agent is spawned, so
/// placement is reproducible regardless of how agent threads later interleave.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
