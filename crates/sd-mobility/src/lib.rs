//! `sd-mobility` — kinematic profiles, vehicle state, and vehicle simulation.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`profile`]   | `KinematicSegment` trait, `KinematicProfile` (the profiler)   |
//! | [`vehicle`]   | `Vehicle`, one live vehicle instance bound to a siding        |
//! | [`simulator`] | `RouteView`, `VehicleSimulator` trait, `ProfileSimulator`     |
//! | [`error`]     | `MobilityError`, `MobilityResult<T>`                          |
//!
//! # Movement model
//!
//! 1. A siding's path is profiled once, producing cumulative distance and
//!    cumulative time at the end of every segment.
//! 2. Every tick the siding hands each vehicle to a [`VehicleSimulator`]
//!    together with a [`RouteView`] of that path and profile.
//! 3. The default [`ProfileSimulator`] holds a vehicle at the depot for a
//!    configurable number of ticks, then replays the time profile, and
//!    returns it to the depot when the profile is exhausted.

pub mod error;
pub mod profile;
pub mod simulator;
pub mod vehicle;


pub use error::{MobilityError, MobilityResult};
pub use profile::{KinematicProfile, KinematicSegment};
pub use simulator::{ProfileSimulator, RouteView, VehicleSimulator};
pub use vehicle::Vehicle;
