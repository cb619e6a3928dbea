//! Per-tick population maintenance for one siding.
//!
//! # Tick algorithm
//!
//! ```text
//! for vehicle in ascending id order:
//!     simulate          → changed vehicles join the sync set
//!     near depot start  → spawning suppressed
//!     second+ at depot  → marked for removal
//!     rounded progress already seen → marked for removal
//! spawn one vehicle if the population is empty,
//!     or if unlimited spawning and nothing is near the depot start
//! apply removals
//! ```
//!
//! Removals are collected during the walk and applied afterwards, so the
//! walk never observes a half-modified population.

use std::collections::{BTreeSet, HashSet};

use sd_core::VehicleId;
use sd_mobility::{RouteView, VehicleSimulator};

use crate::SidingRecord;

/// Vehicles whose state changed this tick and must be replicated.
pub type SyncSet = BTreeSet<VehicleId>;

/// What one tick did to a siding's population.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickOutcome {
    pub synced:  SyncSet,
    pub spawned: Option<VehicleId>,
    pub removed: Vec<VehicleId>,
}

/// Progress rounded to one decimal, as an integer number of tenths.
/// Halves round up.
#[inline]
pub(crate) fn rounded_progress(rail_progress: f32) -> i64 {
    (rail_progress * 10.0 + 0.5).floor() as i64
}

/// Drives a siding's vehicles with a pluggable [`VehicleSimulator`].
pub struct PopulationScheduler<S: VehicleSimulator> {
    simulator: S,
}

impl<S: VehicleSimulator> PopulationScheduler<S> {
    pub fn new(simulator: S) -> Self {
        Self { simulator }
    }

    pub fn simulator(&self) -> &S {
        &self.simulator
    }

    /// Advance `siding` by `elapsed_ticks`.  Does nothing without a depot.
    pub fn tick(&self, siding: &mut SidingRecord, elapsed_ticks: f32) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        let Some(depot) = siding.depot else {
            return outcome;
        };

        let threshold = siding.depot_threshold();
        let mut spawn = true;
        let mut at_depot = 0usize;
        let mut seen_progress: HashSet<i64> = HashSet::new();
        let mut to_remove: Vec<VehicleId> = Vec::new();

        {
            let route = match RouteView::new(&siding.path, &siding.profile) {
                Ok(route) => route,
                Err(e) => {
                    log::warn!("{}: skipping tick: {e}", siding.anchor.id);
                    return outcome;
                }
            };

            for (&id, vehicle) in siding.vehicles.iter_mut() {
                if self.simulator.simulate(vehicle, route, elapsed_ticks, depot) {
                    outcome.synced.insert(id);
                }
                if vehicle.is_close_to_depot(threshold) {
                    spawn = false;
                }
                if !vehicle.is_on_route() {
                    at_depot += 1;
                    if at_depot > 1 {
                        to_remove.push(id);
                    }
                }
                let duplicate = !seen_progress.insert(rounded_progress(vehicle.rail_progress()));
                if duplicate && to_remove.last() != Some(&id) {
                    to_remove.push(id);
                }
            }
        }

        // New vehicles start at progress 0.
        if seen_progress.contains(&rounded_progress(0.0)) {
            spawn = false;
        }

        if siding.vehicles.is_empty() || (siding.unlimited_spawning && spawn) {
            let id = siding.spawn_vehicle();
            log::debug!("{}: spawned {id}", siding.id());
            outcome.spawned = Some(id);
        }

        for id in &to_remove {
            siding.vehicles.remove(id);
            log::debug!("{}: removed {id}", siding.id());
        }
        outcome.removed = to_remove;

        log::trace!(
            "{}: {} vehicles, {} synced, {} removed",
            siding.id(),
            siding.vehicles.len(),
            outcome.synced.len(),
            outcome.removed.len(),
        );
        outcome
    }
}
