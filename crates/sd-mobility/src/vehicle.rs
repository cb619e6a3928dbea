//! One live vehicle instance bound to a siding.

use sd_core::{AnchorId, VehicleId, VehicleMapping};

/// A vehicle owned by a siding's population.
///
/// A vehicle is either **at the depot** (`on_route = false`, waiting at the
/// start of the path) or **on route** (replaying the siding's time profile).
/// `rail_progress` is the distance travelled along the path.
///
/// Vehicles do not hold their path: the siding owns path and profile and
/// lends them to the simulator every tick, so a vehicle is independently
/// serializable.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    id:            VehicleId,
    siding:        AnchorId,
    mapping:       VehicleMapping,
    car_count:     u32,
    rail_progress: f32,
    /// Ticks since departure; meaningful only while on route.
    elapsed:       f32,
    /// Ticks spent waiting at the depot since the last arrival.
    held:          f32,
    on_route:      bool,
}

impl Vehicle {
    /// A new vehicle waiting at the start of the path.
    pub fn new(id: VehicleId, siding: AnchorId, mapping: VehicleMapping, car_count: u32) -> Self {
        Self {
            id,
            siding,
            mapping,
            car_count,
            rail_progress: 0.0,
            elapsed:       0.0,
            held:          0.0,
            on_route:      false,
        }
    }

    #[inline]
    pub fn id(&self) -> VehicleId {
        self.id
    }

    #[inline]
    pub fn siding(&self) -> AnchorId {
        self.siding
    }

    #[inline]
    pub fn mapping(&self) -> &VehicleMapping {
        &self.mapping
    }

    #[inline]
    pub fn car_count(&self) -> u32 {
        self.car_count
    }

    /// `true` if this is the siding's canonical home vehicle.
    #[inline]
    pub fn is_home(&self) -> bool {
        self.id.is_home_of(self.siding)
    }

    #[inline]
    pub fn rail_progress(&self) -> f32 {
        self.rail_progress
    }

    #[inline]
    pub fn is_on_route(&self) -> bool {
        self.on_route
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    pub fn held(&self) -> f32 {
        self.held
    }

    /// `true` while the vehicle waits at the depot or is still within
    /// `threshold` blocks of the start of the path.
    #[inline]
    pub fn is_close_to_depot(&self, threshold: f32) -> bool {
        !self.on_route || self.rail_progress < threshold
    }

    // ── State transitions (driven by a VehicleSimulator) ──────────────────

    /// Accumulate waiting time at the depot.
    pub fn hold(&mut self, ticks: f32) {
        self.held += ticks;
    }

    /// Leave the depot and start replaying the profile.
    pub fn depart(&mut self) {
        self.on_route = true;
        self.elapsed = 0.0;
        self.held = 0.0;
        self.rail_progress = 0.0;
    }

    /// Move to `rail_progress` at `elapsed` ticks after departure.
    pub fn advance(&mut self, elapsed: f32, rail_progress: f32) {
        self.elapsed = elapsed;
        self.rail_progress = rail_progress;
    }

    /// Finish the run and wait at the start of the path again.
    pub fn return_to_depot(&mut self) {
        self.on_route = false;
        self.elapsed = 0.0;
        self.held = 0.0;
        self.rail_progress = 0.0;
    }
}
