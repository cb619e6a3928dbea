//! `sd-sim` — tick loop orchestrator for the rust_siding scheduler.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Hand-off — drain the RouteMailbox; apply each composition to its
//!                siding (stale or failing ones are logged and skipped).
//!   ② Sidings  — PopulationScheduler::tick for every siding, ascending
//!                AnchorId (parallel with the `parallel` feature).
//!   ③ Report   — observer callbacks in ascending AnchorId order.
//! ```
//!
//! Route requests may arrive at any time: [`Yard::request_route`] composes
//! on the calling thread, [`Yard::compose_in_background`] on a worker
//! thread.  Either way the result is only applied at step ① of a later tick.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Ticks sidings on Rayon's thread pool.                  |
//! | `fx-hash`  | FxHash for the siding index instead of SipHash.        |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sd_core::SimConfig;
//! use sd_mobility::ProfileSimulator;
//! use sd_rail::DijkstraPathFinder;
//! use sd_sim::{NoopObserver, YardBuilder};
//!
//! let mut yard = YardBuilder::new(config, ProfileSimulator::default(), DijkstraPathFinder)
//!     .network(network)
//!     .siding(anchor, 40.0)
//!     .build()?;
//! yard.set_depot(anchor.id, Some(DepotId(1)))?;
//! yard.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod yard;

#[cfg(test)]
mod tests;

pub use builder::YardBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, YardObserver};
pub use yard::Yard;
