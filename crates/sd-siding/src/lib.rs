//! `sd-siding` — the depot siding and what drives it.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`record`]    | `SidingRecord`: configuration plus live path/profile/vehicles  |
//! | [`compose`]   | `RouteRequest`, `Composition`, `RouteComposer`                  |
//! | [`scheduler`] | `PopulationScheduler<S>`, `TickOutcome`                         |
//! | [`handoff`]   | `RouteMailbox`, `RouteSender` for deferred delivery             |
//! | [`persist`]   | `SidingSnapshot`, `SidingReplica`, `FieldUpdate`, `SidingUpdate` |
//! | [`error`]     | `SidingError`, `SidingResult<T>`                                |
//!
//! # Lifecycle
//!
//! ```text
//! SidingRecord::new ──set_depot(Some)──▶ default path + home vehicle
//!        │
//!        ├── route_request ─▶ RouteComposer::compose ─▶ Composition
//!        │                        (any thread)              │
//!        │                                            RouteMailbox
//!        │                                                  │
//!        ├── apply_composition ◀──── tick boundary ─────────┘
//!        │
//!        └── PopulationScheduler::tick  (every tick)
//! ```
//!
//! A composition is always applied on the thread that owns the siding, at a
//! tick boundary, so path, profile, and population are never observed half
//! updated.

pub mod compose;
pub mod error;
pub mod handoff;
pub mod persist;
pub mod record;
pub mod scheduler;


pub use compose::{Composition, RouteComposer, RouteRequest};
pub use error::{SidingError, SidingResult};
pub use handoff::{RouteMailbox, RouteSender};
pub use persist::{FieldUpdate, SidingReplica, SidingSnapshot, SidingUpdate};
pub use record::SidingRecord;
pub use scheduler::{PopulationScheduler, SyncSet, TickOutcome};
