//! The per-vehicle simulator seam and its default implementation.

use sd_core::{DepotId, KinematicConfig};
use sd_rail::PathSegment;

use crate::{KinematicProfile, MobilityError, MobilityResult, Vehicle};

// ── RouteView ─────────────────────────────────────────────────────────────────

/// A borrowed view of a siding's path together with its profile.
///
/// Construction checks the profile covers exactly the path.
#[derive(Copy, Clone, Debug)]
pub struct RouteView<'a> {
    path:    &'a [PathSegment],
    profile: &'a KinematicProfile,
}

impl<'a> RouteView<'a> {
    pub fn new(path: &'a [PathSegment], profile: &'a KinematicProfile) -> MobilityResult<Self> {
        if path.len() != profile.len() {
            return Err(MobilityError::ProfileMismatch { path: path.len(), profile: profile.len() });
        }
        Ok(Self { path, profile })
    }

    #[inline]
    pub fn path(&self) -> &'a [PathSegment] {
        self.path
    }

    #[inline]
    pub fn profile(&self) -> &'a KinematicProfile {
        self.profile
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

// ── VehicleSimulator trait ────────────────────────────────────────────────────

/// Advances one vehicle along its siding's route.
///
/// # Thread safety
///
/// Sidings may be ticked in parallel, all sharing one simulator, so
/// implementations must be `Send + Sync` and keep per-vehicle state in the
/// [`Vehicle`] itself.
pub trait VehicleSimulator: Send + Sync {
    /// Advance `vehicle` by `elapsed_ticks`.
    ///
    /// Returns `true` if the vehicle's state changed in a way observers must
    /// be told about (departure, arrival).
    fn simulate(
        &self,
        vehicle:       &mut Vehicle,
        route:         RouteView<'_>,
        elapsed_ticks: f32,
        depot:         DepotId,
    ) -> bool;
}

// ── ProfileSimulator ──────────────────────────────────────────────────────────

/// Replays the siding's kinematic profile.
///
/// A vehicle waits `depot_hold_ticks` at the depot, departs, follows the
/// profile (see [`KinematicProfile::distance_at`]), and returns to the depot
/// once the profile's last time point has passed.  Departures and arrivals
/// are reported as changes; ordinary movement is not.
#[derive(Clone, Debug, Default)]
pub struct ProfileSimulator {
    pub kinematics:       KinematicConfig,
    pub depot_hold_ticks: f32,
}

impl ProfileSimulator {
    pub fn new(kinematics: KinematicConfig, depot_hold_ticks: f32) -> Self {
        Self { kinematics, depot_hold_ticks }
    }
}

impl VehicleSimulator for ProfileSimulator {
    fn simulate(
        &self,
        vehicle:       &mut Vehicle,
        route:         RouteView<'_>,
        elapsed_ticks: f32,
        depot:         DepotId,
    ) -> bool {
        if route.is_empty() {
            return false;
        }

        if !vehicle.is_on_route() {
            vehicle.hold(elapsed_ticks);
            if vehicle.held() < self.depot_hold_ticks {
                return false;
            }
            vehicle.depart();
            log::trace!("{} departed {depot}", vehicle.id());
            return true;
        }

        let elapsed = vehicle.elapsed() + elapsed_ticks;
        if elapsed >= route.profile().total_time() {
            vehicle.return_to_depot();
            log::trace!("{} returned to {depot}", vehicle.id());
            return true;
        }

        let progress = route.profile().distance_at(route.path(), &self.kinematics, elapsed);
        vehicle.advance(elapsed, progress);
        false
    }
}
