//! Fluent builder for constructing a [`Yard`].

use std::sync::Arc;

use sd_core::{SimConfig, SimRng, Tick};
use sd_mobility::VehicleSimulator;
use sd_rail::{Anchor, PathFinder, RailNetwork};
use sd_siding::{PopulationScheduler, RouteMailbox, SidingRecord, SidingSnapshot};

use crate::yard::SidingIndex;
use crate::{SimError, SimResult, Yard};

/// Fluent builder for [`Yard<S, F>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: run length, seed, step size, kinematics
/// - `S: VehicleSimulator`, e.g. [`sd_mobility::ProfileSimulator`]
/// - `F: PathFinder`, e.g. [`sd_rail::DijkstraPathFinder`]
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                   |
/// |---------------------|---------------------------|
/// | `.network(n)`       | `RailNetwork::empty()`    |
/// | `.siding(a, len)`   | no sidings                |
/// | `.restore(s)`       | no sidings                |
///
/// Sidings are created detached; attach them with
/// [`Yard::set_depot`][crate::Yard::set_depot].
pub struct YardBuilder<S: VehicleSimulator, F: PathFinder + 'static> {
    config:    SimConfig,
    network:   Option<RailNetwork>,
    fresh:     Vec<(Anchor, f32)>,
    restored:  Vec<SidingSnapshot>,
    simulator: S,
    finder:    F,
}

impl<S: VehicleSimulator, F: PathFinder + 'static> YardBuilder<S, F> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, simulator: S, finder: F) -> Self {
        Self {
            config,
            network:  None,
            fresh:    Vec::new(),
            restored: Vec::new(),
            simulator,
            finder,
        }
    }

    /// Supply the rail network.
    ///
    /// If not called, an empty network is used: every siding's default path
    /// is empty and every route search comes back empty.
    pub fn network(mut self, network: RailNetwork) -> Self {
        self.network = Some(network);
        self
    }

    /// Add a new siding on `anchor`'s track.
    pub fn siding(mut self, anchor: Anchor, rail_length: f32) -> Self {
        self.fresh.push((anchor, rail_length));
        self
    }

    /// Add a siding restored from storage.
    pub fn restore(mut self, snapshot: SidingSnapshot) -> Self {
        self.restored.push(snapshot);
        self
    }

    /// Validate inputs, construct the sidings, and return a ready-to-run
    /// [`Yard`].
    pub fn build(self) -> SimResult<Yard<S, F>> {
        self.config.validate()?;
        let kinematics = self.config.kinematics;
        let seed = self.config.seed;

        // ── Construct sidings ─────────────────────────────────────────────
        let mut sidings = Vec::with_capacity(self.fresh.len() + self.restored.len());
        for (anchor, rail_length) in self.fresh {
            sidings.push(SidingRecord::new(anchor, rail_length, kinematics, seed)?);
        }
        for snapshot in self.restored {
            sidings.push(SidingRecord::restore(snapshot, kinematics, seed)?);
        }
        sidings.sort_by_key(|s| s.id());

        // ── Index by id, rejecting duplicates ─────────────────────────────
        let mut index = SidingIndex::default();
        for (i, siding) in sidings.iter().enumerate() {
            if index.insert(siding.id(), i).is_some() {
                return Err(SimError::DuplicateSiding(siding.id()));
            }
        }

        Ok(Yard {
            clock:     Tick::ZERO,
            config:    self.config,
            scheduler: PopulationScheduler::new(self.simulator),
            network:   Arc::new(self.network.unwrap_or_else(RailNetwork::empty)),
            finder:    Arc::new(self.finder),
            sidings,
            index,
            mailbox:   RouteMailbox::new(),
            rng:       SimRng::new(seed),
        })
    }
}
