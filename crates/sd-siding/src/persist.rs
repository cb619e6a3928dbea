//! Persistence and replication shapes for a siding, and keyed field updates.
//!
//! | Shape              | Vehicle type | Vehicles | Used for                 |
//! |--------------------|--------------|----------|--------------------------|
//! | [`SidingSnapshot`] | by name      | yes      | saving to storage        |
//! | [`SidingReplica`]  | by index     | no       | syncing to observers     |
//!
//! Neither shape carries the kinematic profile; restoring always recomputes
//! it from the restored path.  An unknown type name or out-of-range index
//! falls back to the first vehicle type.

use serde::{Deserialize, Serialize};

use sd_core::{AnchorId, KinematicConfig, VehicleMapping, VehicleType};
use sd_mobility::Vehicle;
use sd_rail::{Anchor, PathSegment};

use crate::{SidingRecord, SidingResult};

// ── Field updates ─────────────────────────────────────────────────────────────

/// One keyed change to a siding's configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldUpdate {
    VehicleType { custom_id: String, type_index: u32 },
    UnlimitedSpawning(bool),
    /// A key owned by the base entity, passed through untouched.
    Other { key: String, payload: String },
}

impl FieldUpdate {
    pub const KEY_VEHICLE_TYPE: &'static str = "vehicle_type";
    pub const KEY_UNLIMITED_SPAWNING: &'static str = "unlimited_spawning";

    pub fn key(&self) -> &str {
        match self {
            FieldUpdate::VehicleType { .. } => Self::KEY_VEHICLE_TYPE,
            FieldUpdate::UnlimitedSpawning(_) => Self::KEY_UNLIMITED_SPAWNING,
            FieldUpdate::Other { key, .. } => key,
        }
    }
}

/// A field update addressed to one siding, as broadcast to peers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SidingUpdate {
    pub siding: AnchorId,
    pub update: FieldUpdate,
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SidingSnapshot {
    pub anchor:             Anchor,
    pub rail_length:        f32,
    #[serde(default)]
    pub custom_id:          String,
    #[serde(default)]
    pub vehicle_type:       String,
    #[serde(default)]
    pub unlimited_spawning: bool,
    #[serde(default)]
    pub path:               Vec<PathSegment>,
    #[serde(default)]
    pub vehicles:           Vec<Vehicle>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SidingReplica {
    pub anchor:             Anchor,
    pub rail_length:        f32,
    #[serde(default)]
    pub custom_id:          String,
    #[serde(default)]
    pub type_index:         u32,
    #[serde(default)]
    pub unlimited_spawning: bool,
    #[serde(default)]
    pub path:               Vec<PathSegment>,
}

impl SidingRecord {
    pub fn snapshot(&self) -> SidingSnapshot {
        SidingSnapshot {
            anchor:             self.anchor,
            rail_length:        self.rail_length,
            custom_id:          self.mapping.custom_id.clone(),
            vehicle_type:       self.mapping.vehicle_type.as_str().to_owned(),
            unlimited_spawning: self.unlimited_spawning,
            path:               self.path.clone(),
            vehicles:           self.vehicles.values().cloned().collect(),
        }
    }

    pub fn replica(&self) -> SidingReplica {
        SidingReplica {
            anchor:             self.anchor,
            rail_length:        self.rail_length,
            custom_id:          self.mapping.custom_id.clone(),
            type_index:         self.mapping.vehicle_type.index(),
            unlimited_spawning: self.unlimited_spawning,
            path:               self.path.clone(),
        }
    }

    /// Rebuild a siding from storage.  The depot association is not stored;
    /// the restored siding starts detached.
    pub fn restore(snapshot: SidingSnapshot, kinematics: KinematicConfig, seed: u64) -> SidingResult<Self> {
        let vehicle_type = VehicleType::from_name_or_default(&snapshot.vehicle_type);
        let mut record = Self::new(snapshot.anchor, snapshot.rail_length, kinematics, seed)?;
        record.install(
            VehicleMapping::new(snapshot.custom_id, vehicle_type),
            snapshot.unlimited_spawning,
            snapshot.path,
        );

        let siding = record.id();
        for vehicle in snapshot.vehicles {
            if vehicle.siding() == siding {
                record.vehicles.insert(vehicle.id(), vehicle);
            } else {
                log::debug!("{siding}: dropping restored vehicle {} of {}", vehicle.id(), vehicle.siding());
            }
        }
        record.regenerate_profile();
        Ok(record)
    }

    /// Rebuild a siding's observer-side copy from a replica.
    pub fn from_replica(replica: SidingReplica, kinematics: KinematicConfig, seed: u64) -> SidingResult<Self> {
        let vehicle_type = VehicleType::from_index_or_default(replica.type_index);
        let mut record = Self::new(replica.anchor, replica.rail_length, kinematics, seed)?;
        record.install(
            VehicleMapping::new(replica.custom_id, vehicle_type),
            replica.unlimited_spawning,
            replica.path,
        );
        record.regenerate_profile();
        Ok(record)
    }

    fn install(&mut self, mapping: VehicleMapping, unlimited_spawning: bool, path: Vec<PathSegment>) {
        self.car_count = mapping.car_count(self.rail_length);
        self.mapping = mapping;
        self.unlimited_spawning = unlimited_spawning;
        self.path = path;
    }
}
