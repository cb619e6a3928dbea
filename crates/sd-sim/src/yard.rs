//! The `Yard` struct and its tick loop.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use sd_core::{AnchorId, CoreError, DepotId, RailPos, SimConfig, SimRng, Tick};
use sd_mobility::VehicleSimulator;
use sd_rail::{Anchor, PathFinder, PathSegment, RailNetwork};
use sd_siding::{PopulationScheduler, RouteComposer, RouteMailbox, RouteRequest, SidingRecord, TickOutcome};

use crate::{SimResult, YardObserver};

#[cfg(feature = "fx-hash")]
pub(crate) type SidingIndex = rustc_hash::FxHashMap<AnchorId, usize>;
#[cfg(not(feature = "fx-hash"))]
pub(crate) type SidingIndex = std::collections::HashMap<AnchorId, usize>;

// ── Yard ──────────────────────────────────────────────────────────────────────

/// The main simulation runner: every siding of a rail network, ticked
/// together.
///
/// Create via [`YardBuilder`][crate::YardBuilder].
pub struct Yard<S: VehicleSimulator, F: PathFinder + 'static> {
    /// Global configuration (total ticks, seed, step size, kinematics).
    pub config: SimConfig,

    /// Next tick to process.
    pub clock: Tick,

    /// Drives each siding's population with the vehicle simulator.
    pub scheduler: PopulationScheduler<S>,

    /// Rail graph, shared read-only with background composers.
    pub(crate) network: Arc<RailNetwork>,

    /// Path search, shared with background composers.
    pub(crate) finder: Arc<F>,

    /// Sidings in ascending `AnchorId` order.
    pub(crate) sidings: Vec<SidingRecord>,

    /// `AnchorId` → position in `sidings`.
    pub(crate) index: SidingIndex,

    pub(crate) mailbox: RouteMailbox,

    /// Mints identities for sidings created at run time.
    pub(crate) rng: SimRng,
}

impl<S: VehicleSimulator, F: PathFinder + 'static> Yard<S, F> {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn network(&self) -> &RailNetwork {
        &self.network
    }

    pub fn siding(&self, id: AnchorId) -> Option<&SidingRecord> {
        self.index.get(&id).map(|&i| &self.sidings[i])
    }

    pub fn siding_mut(&mut self, id: AnchorId) -> Option<&mut SidingRecord> {
        self.index.get(&id).map(|&i| &mut self.sidings[i])
    }

    /// All sidings, ascending `AnchorId`.
    pub fn sidings(&self) -> impl Iterator<Item = &SidingRecord> + '_ {
        self.sidings.iter()
    }

    /// Create a detached siding on the track between `pos1` and `pos2` with
    /// a freshly minted identity.
    pub fn create_siding(&mut self, pos1: RailPos, pos2: RailPos, rail_length: f32) -> SimResult<AnchorId> {
        let id = loop {
            let id = self.rng.anchor_id();
            if !self.index.contains_key(&id) {
                break id;
            }
        };
        let anchor = Anchor::new(id, pos1, pos2);
        let record = SidingRecord::new(anchor, rail_length, self.config.kinematics, self.config.seed)?;

        let at = self.sidings.partition_point(|s| s.id() < id);
        self.sidings.insert(at, record);
        for (i, siding) in self.sidings.iter().enumerate().skip(at) {
            self.index.insert(siding.id(), i);
        }
        log::debug!("created siding {id}");
        Ok(id)
    }

    fn require_mut(&mut self, id: AnchorId) -> SimResult<&mut SidingRecord> {
        let i = *self.index.get(&id).ok_or(CoreError::AnchorNotFound(id))?;
        Ok(&mut self.sidings[i])
    }

    // ── Depot association ─────────────────────────────────────────────────

    /// Attach `siding` to `depot`, or detach it with `None`.
    pub fn set_depot(&mut self, siding: AnchorId, depot: Option<DepotId>) -> SimResult<()> {
        let network = Arc::clone(&self.network);
        self.require_mut(siding)?.set_depot(depot, &network)?;
        Ok(())
    }

    // ── Route composition ─────────────────────────────────────────────────

    fn route_request(
        &self,
        siding:         AnchorId,
        first_platform: Option<Anchor>,
        last_platform:  Option<Anchor>,
        main_path:      Vec<PathSegment>,
        main_success:   u32,
    ) -> SimResult<RouteRequest> {
        let record = self.siding(siding).ok_or(CoreError::AnchorNotFound(siding))?;
        Ok(record.route_request(first_platform, last_platform, main_path, main_success))
    }

    /// Compose `siding`'s route now and queue it for the next tick.
    ///
    /// Returns the number of legs found.  The siding keeps its current path
    /// until the composition is applied.
    pub fn request_route(
        &mut self,
        siding:         AnchorId,
        first_platform: Option<Anchor>,
        last_platform:  Option<Anchor>,
        main_path:      Vec<PathSegment>,
        main_success:   u32,
    ) -> SimResult<u32> {
        let request = self.route_request(siding, first_platform, last_platform, main_path, main_success)?;
        let composition = RouteComposer::new(self.finder.as_ref(), &self.network).compose(&request)?;
        let successful = composition.successful_segments;
        self.mailbox.sender().post(composition)?;
        Ok(successful)
    }

    /// Compose `siding`'s route on a worker thread.
    ///
    /// The result is posted to the yard's mailbox and applied at the start of
    /// the first tick after it arrives.  Search errors are logged on the
    /// worker.
    pub fn compose_in_background(
        &self,
        siding:         AnchorId,
        first_platform: Option<Anchor>,
        last_platform:  Option<Anchor>,
        main_path:      Vec<PathSegment>,
        main_success:   u32,
    ) -> SimResult<JoinHandle<()>> {
        let request = self.route_request(siding, first_platform, last_platform, main_path, main_success)?;
        let network = Arc::clone(&self.network);
        let finder = Arc::clone(&self.finder);
        let sender = self.mailbox.sender();

        Ok(thread::spawn(move || {
            let result = RouteComposer::new(finder.as_ref(), &network)
                .compose(&request)
                .and_then(|composition| sender.post(composition));
            if let Err(e) = result {
                log::warn!("{}: background composition failed: {e}", request.siding.id);
            }
        }))
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    pub fn run<O: YardObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock < self.config.end_tick() {
            self.step(observer);
        }
        observer.on_sim_end(self.clock);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: YardObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer);
        }
        Ok(())
    }

    fn step<O: YardObserver>(&mut self, observer: &mut O) {
        let now = self.clock;
        observer.on_tick_start(now);
        self.apply_pending(now, observer);

        let outcomes = self.tick_sidings();
        let mut synced = 0;
        for (siding, outcome) in self.sidings.iter().zip(&outcomes) {
            synced += outcome.synced.len();
            observer.on_siding_tick(now, siding, outcome);
        }
        log::trace!("{now}: {} sidings, {synced} vehicles synced", self.sidings.len());

        observer.on_tick_end(now, synced);
        self.clock = now.next();
    }

    /// Install every composition that arrived since the last tick.
    fn apply_pending<O: YardObserver>(&mut self, now: Tick, observer: &mut O) {
        for composition in self.mailbox.drain() {
            let id = composition.siding;
            let Some(&i) = self.index.get(&id) else {
                log::warn!("{now}: dropping composition for unknown siding {id}");
                continue;
            };
            let siding = &mut self.sidings[i];
            match siding.apply_composition(composition, &self.network) {
                Ok(()) => observer.on_route_applied(now, siding),
                Err(e) => {
                    log::warn!("{now}: {id}: composition not applied: {e}");
                    observer.on_route_rejected(now, id, &e);
                }
            }
        }
    }

    /// One population tick per siding, outcomes in siding order.
    fn tick_sidings(&mut self) -> Vec<TickOutcome> {
        let elapsed = self.config.elapsed_ticks_per_step;
        let scheduler = &self.scheduler;

        #[cfg(not(feature = "parallel"))]
        {
            self.sidings
                .iter_mut()
                .map(|siding| scheduler.tick(siding, elapsed))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            // Indexed collect keeps siding order.
            self.sidings
                .par_iter_mut()
                .map(|siding| scheduler.tick(siding, elapsed))
                .collect()
        }
    }
}
