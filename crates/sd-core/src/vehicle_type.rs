//! Vehicle type lookup table and the per-siding vehicle mapping.
//!
//! All variants are always compiled in.  Behaviour that differs per type is
//! expressed as data (`spacing`, `label`), never as trait objects.

use std::fmt;

/// The kind of vehicle a siding dispatches.
///
/// The first variant (`Minecart`) is the fallback whenever persisted data
/// names an unknown type.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VehicleType {
    #[default]
    Minecart,
    LightRail,
    Metro,
    Commuter,
    HighSpeed,
}

impl VehicleType {
    /// Every type in enumeration order.  Indices into this slice are the
    /// `type_index` used by field updates and replicas.
    pub const ALL: [VehicleType; 5] = [
        VehicleType::Minecart,
        VehicleType::LightRail,
        VehicleType::Metro,
        VehicleType::Commuter,
        VehicleType::HighSpeed,
    ];

    /// Track length one car occupies, in blocks.
    pub fn spacing(self) -> u32 {
        match self {
            VehicleType::Minecart  => 1,
            VehicleType::LightRail => 20,
            VehicleType::Metro     => 25,
            VehicleType::Commuter  => 25,
            VehicleType::HighSpeed => 26,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VehicleType::Minecart  => "minecart",
            VehicleType::LightRail => "light_rail",
            VehicleType::Metro     => "metro",
            VehicleType::Commuter  => "commuter",
            VehicleType::HighSpeed => "high_speed",
        }
    }

    /// Position in [`VehicleType::ALL`].
    pub fn index(self) -> u32 {
        VehicleType::ALL
            .iter()
            .position(|&t| t == self)
            .map_or(0, |i| i as u32)
    }

    /// Look up by index; `None` if out of range.
    pub fn from_index(index: u32) -> Option<VehicleType> {
        VehicleType::ALL.get(index as usize).copied()
    }

    /// Look up by label, case-insensitively.
    pub fn from_name(name: &str) -> Option<VehicleType> {
        let name = name.trim();
        VehicleType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
    }

    /// Look up by index, falling back to the first type.
    pub fn from_index_or_default(index: u32) -> VehicleType {
        Self::from_index(index).unwrap_or_default()
    }

    /// Look up by label, falling back to the first type.
    pub fn from_name_or_default(name: &str) -> VehicleType {
        Self::from_name(name).unwrap_or_default()
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── VehicleMapping ────────────────────────────────────────────────────────────

/// The vehicle type assigned to a siding plus an application-defined custom
/// identifier (e.g. a livery or resource-pack key).
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleMapping {
    pub custom_id:    String,
    pub vehicle_type: VehicleType,
}

impl VehicleMapping {
    pub fn new(custom_id: impl Into<String>, vehicle_type: VehicleType) -> Self {
        Self { custom_id: custom_id.into(), vehicle_type }
    }

    #[inline]
    pub fn spacing(&self) -> u32 {
        self.vehicle_type.spacing()
    }

    /// Number of cars that fit on a siding of `rail_length` blocks.
    pub fn car_count(&self, rail_length: f32) -> u32 {
        let cars = (rail_length / self.spacing() as f32).floor();
        if cars.is_finite() && cars > 0.0 { cars as u32 } else { 0 }
    }
}
