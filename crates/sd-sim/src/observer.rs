//! Yard observer trait for progress reporting and replication.

use sd_core::{AnchorId, Tick};
use sd_siding::{SidingError, SidingRecord, TickOutcome};

/// Callbacks invoked by [`Yard::run`][crate::Yard::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — replication feed
///
/// ```rust,ignore
/// struct Replicator { out: Vec<VehicleId> }
///
/// impl YardObserver for Replicator {
///     fn on_siding_tick(&mut self, _tick: Tick, _siding: &SidingRecord, outcome: &TickOutcome) {
///         self.out.extend(&outcome.synced);
///     }
/// }
/// ```
pub trait YardObserver {
    /// Called at the very start of each tick, before the hand-off.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// A composition was installed on `siding`.
    fn on_route_applied(&mut self, _tick: Tick, _siding: &SidingRecord) {}

    /// A composition for `siding` was discarded.
    fn on_route_rejected(&mut self, _tick: Tick, _siding: AnchorId, _error: &SidingError) {}

    /// Called once per siding after its population tick.
    fn on_siding_tick(&mut self, _tick: Tick, _siding: &SidingRecord, _outcome: &TickOutcome) {}

    /// Called at the end of each tick.
    ///
    /// `synced` is the number of vehicles across all sidings whose state
    /// changed this tick.
    fn on_tick_end(&mut self, _tick: Tick, _synced: usize) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`YardObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl YardObserver for NoopObserver {}
