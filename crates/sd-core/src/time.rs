//! Simulation time model and configuration.
//!
//! # Design
//!
//! The outer loop counts whole steps with a `Tick` counter.  Inside a step
//! the simulation advances by `elapsed_ticks_per_step` (an `f32`), because
//! vehicle motion is measured in fractional ticks: a lagging server may hand
//! the scheduler 1.5 ticks of motion in a single step.
//!
//! All kinematic quantities use the same units: distance in blocks, time in
//! ticks, speed in blocks per tick, acceleration in blocks per tick².

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute step counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── KinematicConfig ───────────────────────────────────────────────────────────

/// Constants of the kinematic model shared by the profiler and the vehicle
/// simulator.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KinematicConfig {
    /// Constant acceleration and deceleration rate, blocks per tick².  Also
    /// used as the "standstill" reference speed a vehicle departs with.
    pub acceleration: f32,

    /// Ticks per unit of scheduled dwell time.  A platform dwell of `d`
    /// holds the vehicle for `d * dwell_ticks_per_unit` ticks.
    pub dwell_ticks_per_unit: f32,
}

impl KinematicConfig {
    pub const DEFAULT_ACCELERATION: f32 = 0.01;
    pub const DEFAULT_DWELL_TICKS_PER_UNIT: f32 = 10.0;

    /// Ticks needed to brake from `speed` to a stop.
    #[inline]
    pub fn braking_ticks(&self, speed: f32) -> f32 {
        speed / (2.0 * self.acceleration)
    }

    #[inline]
    pub fn dwell_ticks(&self, dwell_time: f32) -> f32 {
        dwell_time * self.dwell_ticks_per_unit
    }
}

impl Default for KinematicConfig {
    fn default() -> Self {
        Self {
            acceleration:         Self::DEFAULT_ACCELERATION,
            dwell_ticks_per_unit: Self::DEFAULT_DWELL_TICKS_PER_UNIT,
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the yard builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Total steps to simulate.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Ticks of vehicle motion applied per step.  1.0 for a server that keeps
    /// up; larger values catch up after lag.
    pub elapsed_ticks_per_step: f32,

    /// Kinematic constants.
    #[cfg_attr(feature = "serde", serde(default))]
    pub kinematics: KinematicConfig,
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Check value ranges that would otherwise produce NaN or infinite loops
    /// deep inside the profiler.
    pub fn validate(&self) -> crate::CoreResult<()> {
        let k = &self.kinematics;
        if !(k.acceleration.is_finite() && k.acceleration > 0.0) {
            return Err(crate::CoreError::Config(format!(
                "acceleration must be positive and finite, got {}",
                k.acceleration
            )));
        }
        if !(k.dwell_ticks_per_unit.is_finite() && k.dwell_ticks_per_unit >= 0.0) {
            return Err(crate::CoreError::Config(format!(
                "dwell_ticks_per_unit must be non-negative, got {}",
                k.dwell_ticks_per_unit
            )));
        }
        if !(self.elapsed_ticks_per_step.is_finite() && self.elapsed_ticks_per_step > 0.0) {
            return Err(crate::CoreError::Config(format!(
                "elapsed_ticks_per_step must be positive, got {}",
                self.elapsed_ticks_per_step
            )));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            total_ticks:            24_000,
            seed:                   0,
            elapsed_ticks_per_step: 1.0,
            kinematics:             KinematicConfig::default(),
        }
    }
}
