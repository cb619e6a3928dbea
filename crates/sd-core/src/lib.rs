//! `sd-core` — foundational types for the `rust_siding` depot scheduler.
//!
//! This crate is a dependency of every other `sd-*` crate.  It intentionally
//! has no `sd-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module             | Contents                                             |
//! |--------------------|------------------------------------------------------|
//! | [`ids`]            | `AnchorId`, `VehicleId`, `DepotId`                   |
//! | [`pos`]            | `RailPos`, integer track coordinates                 |
//! | [`time`]           | `Tick`, `SimConfig`, `KinematicConfig`               |
//! | [`rng`]            | `SidingRng` (per-siding), `SimRng` (global)          |
//! | [`vehicle_type`]   | `VehicleType` lookup table, `VehicleMapping`         |
//! | [`error`]          | `CoreError`, `CoreResult`                            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on all public types (persistence) |

pub mod error;
pub mod ids;
pub mod pos;
pub mod rng;
pub mod time;
pub mod vehicle_type;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{AnchorId, DepotId, VehicleId};
pub use pos::RailPos;
pub use rng::{SidingRng, SimRng};
pub use time::{KinematicConfig, SimConfig, Tick};
pub use vehicle_type::{VehicleMapping, VehicleType};
