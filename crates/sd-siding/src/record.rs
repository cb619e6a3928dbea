//! `SidingRecord`: a depot siding's configuration and live state.
//!
//! The record owns its path, the kinematic profile derived from it, and the
//! vehicle population.  Path and profile are only ever replaced together
//! (`regenerate_profile` runs after every path change), so their lengths
//! always agree.

use std::collections::BTreeMap;

use sd_core::{AnchorId, DepotId, KinematicConfig, RailPos, SidingRng, VehicleId, VehicleMapping, VehicleType};
use sd_mobility::{KinematicProfile, MobilityResult, RouteView, Vehicle};
use sd_rail::{Anchor, PathSegment, Rail, RailNetwork};

use crate::{Composition, FieldUpdate, RouteRequest, SidingError, SidingResult, SidingUpdate};

#[derive(Clone, Debug)]
pub struct SidingRecord {
    pub(crate) anchor:             Anchor,
    pub(crate) rail_length:        f32,
    pub(crate) mapping:            VehicleMapping,
    pub(crate) car_count:          u32,
    pub(crate) unlimited_spawning: bool,
    pub(crate) path:               Vec<PathSegment>,
    pub(crate) profile:            KinematicProfile,
    /// Ascending id order; the scheduler's "first encountered" relies on it.
    pub(crate) vehicles:           BTreeMap<VehicleId, Vehicle>,
    pub(crate) depot:              Option<DepotId>,
    pub(crate) depot_generation:   u64,
    pub(crate) kinematics:         KinematicConfig,
    pub(crate) rng:                SidingRng,
}

impl SidingRecord {
    /// A siding with the default vehicle assignment, no path, and no depot.
    ///
    /// `seed` is the run's global seed; the siding derives its own RNG stream
    /// from it and the anchor id.
    pub fn new(anchor: Anchor, rail_length: f32, kinematics: KinematicConfig, seed: u64) -> SidingResult<Self> {
        if !(rail_length.is_finite() && rail_length > 0.0) {
            return Err(SidingError::InvalidRailLength(rail_length));
        }
        let mapping = VehicleMapping::default();
        Ok(Self {
            car_count: mapping.car_count(rail_length),
            rng: SidingRng::new(seed, anchor.id),
            anchor,
            rail_length,
            mapping,
            unlimited_spawning: false,
            path: Vec::new(),
            profile: KinematicProfile::empty(),
            vehicles: BTreeMap::new(),
            depot: None,
            depot_generation: 0,
            kinematics,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> AnchorId {
        self.anchor.id
    }

    #[inline]
    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    #[inline]
    pub fn rail_length(&self) -> f32 {
        self.rail_length
    }

    #[inline]
    pub fn mapping(&self) -> &VehicleMapping {
        &self.mapping
    }

    /// Cars per vehicle: how many of the mapped type fit on the siding.
    #[inline]
    pub fn car_count(&self) -> u32 {
        self.car_count
    }

    #[inline]
    pub fn unlimited_spawning(&self) -> bool {
        self.unlimited_spawning
    }

    #[inline]
    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    #[inline]
    pub fn profile(&self) -> &KinematicProfile {
        &self.profile
    }

    #[inline]
    pub fn kinematics(&self) -> &KinematicConfig {
        &self.kinematics
    }

    #[inline]
    pub fn depot(&self) -> Option<DepotId> {
        self.depot
    }

    #[inline]
    pub fn depot_generation(&self) -> u64 {
        self.depot_generation
    }

    /// Live vehicles in ascending id order.
    pub fn vehicles(&self) -> impl Iterator<Item = &Vehicle> + '_ {
        self.vehicles.values()
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(&id)
    }

    /// Number of live vehicles.
    #[inline]
    pub fn population(&self) -> usize {
        self.vehicles.len()
    }

    /// Path and profile bundled for a simulator.
    pub fn route(&self) -> MobilityResult<RouteView<'_>> {
        RouteView::new(&self.path, &self.profile)
    }

    /// Distance from the siding start inside which a waiting vehicle blocks
    /// further spawning: one full vehicle length.
    pub fn depot_threshold(&self) -> f32 {
        self.mapping.spacing() as f32 * self.car_count as f32
    }

    // ── Field updates ─────────────────────────────────────────────────────

    /// Reassign the vehicle type.  Returns the update to broadcast.
    pub fn set_vehicle_mapping(&mut self, custom_id: impl Into<String>, vehicle_type: VehicleType) -> SidingUpdate {
        let update = FieldUpdate::VehicleType { custom_id: custom_id.into(), type_index: vehicle_type.index() };
        self.apply_known(&update);
        SidingUpdate { siding: self.id(), update }
    }

    /// Toggle unlimited spawning.  Returns the update to broadcast.
    pub fn set_unlimited_spawning(&mut self, unlimited: bool) -> SidingUpdate {
        let update = FieldUpdate::UnlimitedSpawning(unlimited);
        self.apply_known(&update);
        SidingUpdate { siding: self.id(), update }
    }

    /// Apply a received field update.
    ///
    /// Returns the update back if this record does not own its key, so the
    /// caller can hand it to the base entity.
    pub fn apply_update(&mut self, update: FieldUpdate) -> Option<FieldUpdate> {
        if self.apply_known(&update) { None } else { Some(update) }
    }

    fn apply_known(&mut self, update: &FieldUpdate) -> bool {
        match update {
            FieldUpdate::VehicleType { custom_id, type_index } => {
                self.mapping = VehicleMapping::new(custom_id.clone(), VehicleType::from_index_or_default(*type_index));
                self.car_count = self.mapping.car_count(self.rail_length);
                true
            }
            FieldUpdate::UnlimitedSpawning(unlimited) => {
                self.unlimited_spawning = *unlimited;
                true
            }
            FieldUpdate::Other { .. } => false,
        }
    }

    // ── Depot association ─────────────────────────────────────────────────

    /// Associate the siding with `depot`, or detach it with `None`.
    ///
    /// Detaching drops the population, path, and profile.  Attaching a
    /// siding that has no path installs the default path.  Every change of
    /// association invalidates compositions computed for the old one.
    pub fn set_depot(&mut self, depot: Option<DepotId>, network: &RailNetwork) -> SidingResult<()> {
        if self.depot != depot {
            self.depot_generation += 1;
        }
        self.depot = depot;

        match depot {
            None => {
                self.vehicles.clear();
                self.path.clear();
                self.profile = KinematicProfile::empty();
            }
            Some(_) if self.path.is_empty() => {
                self.generate_default_path(network)?;
                self.regenerate_profile();
            }
            Some(_) => {}
        }
        Ok(())
    }

    /// Drop every vehicle; the path is kept.
    pub fn clear_vehicles(&mut self) {
        self.vehicles.clear();
    }

    // ── Routes ────────────────────────────────────────────────────────────

    /// Capture everything a composition needs, by value.
    pub fn route_request(
        &self,
        first_platform: Option<Anchor>,
        last_platform:  Option<Anchor>,
        main_path:      Vec<PathSegment>,
        main_success:   u32,
    ) -> RouteRequest {
        RouteRequest {
            siding: self.anchor,
            depot_generation: self.depot_generation,
            first_platform,
            last_platform,
            main_path,
            main_success,
        }
    }

    /// Install a finished composition.
    ///
    /// Compositions for another siding, or computed before the last depot
    /// change, are rejected.  An empty composition installs the default path.
    pub fn apply_composition(&mut self, composition: Composition, network: &RailNetwork) -> SidingResult<()> {
        if composition.siding != self.id() {
            return Err(SidingError::WrongSiding { expected: self.id(), got: composition.siding });
        }
        if composition.depot_generation != self.depot_generation {
            return Err(SidingError::StaleComposition {
                siding:   self.id(),
                computed: composition.depot_generation,
                current:  self.depot_generation,
            });
        }

        if composition.path.is_empty() {
            self.generate_default_path(network)?;
        } else {
            self.path = composition.path;
        }
        self.regenerate_profile();
        log::info!(
            "{}: applied route of {} segments ({} legs found)",
            self.id(),
            self.path.len(),
            composition.successful_segments,
        );
        Ok(())
    }

    /// A single segment over the siding's own track, if the network has it.
    ///
    /// Always resets the population to the canonical home vehicle.
    pub(crate) fn generate_default_path(&mut self, network: &RailNetwork) -> SidingResult<()> {
        let (start, end) = self.anchor.ordered_positions(RailPos::ORIGIN, false);
        self.install_default_path(network.edge(start, end).copied())
    }

    /// Replace path and population with the default over `rail`.
    ///
    /// The segment is validated first; on error the record is unchanged.
    pub(crate) fn install_default_path(&mut self, rail: Option<Rail>) -> SidingResult<()> {
        let (start, end) = self.anchor.ordered_positions(RailPos::ORIGIN, false);
        let segment = rail
            .map(|rail| PathSegment::new(rail, start, end, Some(self.id()), 0.0, 0))
            .transpose()?;

        self.vehicles.clear();
        self.path = segment.into_iter().collect();
        self.insert_vehicle(VehicleId::home(self.id()));
        log::debug!("{}: default path with {} segment(s)", self.id(), self.path.len());
        Ok(())
    }

    /// Recompute the profile from the current path, then purge vehicles whose
    /// identity no longer fits the spawning policy.
    ///
    /// A single-segment path is the default path, whose home vehicle is kept
    /// regardless of policy.
    pub(crate) fn regenerate_profile(&mut self) {
        self.profile = KinematicProfile::compute(&self.path, &self.kinematics);

        if self.path.len() != 1 {
            let siding = self.id();
            let unlimited = self.unlimited_spawning;
            self.vehicles.retain(|id, _| id.is_home_of(siding) != unlimited);
        }
    }

    // ── Population ────────────────────────────────────────────────────────

    /// Add one vehicle according to the spawning policy.
    pub(crate) fn spawn_vehicle(&mut self) -> VehicleId {
        let id = if self.unlimited_spawning {
            self.random_vehicle_id()
        } else {
            VehicleId::home(self.id())
        };
        self.insert_vehicle(id);
        id
    }

    fn insert_vehicle(&mut self, id: VehicleId) {
        let vehicle = Vehicle::new(id, self.id(), self.mapping.clone(), self.car_count);
        self.vehicles.insert(id, vehicle);
    }

    fn random_vehicle_id(&mut self) -> VehicleId {
        loop {
            let id = VehicleId(self.rng.random());
            if id != VehicleId::INVALID && !id.is_home_of(self.id()) && !self.vehicles.contains_key(&id) {
                return id;
            }
        }
    }
}
