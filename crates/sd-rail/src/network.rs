//! Rail network representation and builder.
//!
//! # Data layout
//!
//! The graph is a nested ordered map keyed by endpoint position:
//!
//! ```text
//! rails[from][to] = Rail
//! ```
//!
//! Track-side objects refer to rails by their two endpoint positions, so
//! keying by position makes `has_edge` / `edge` lookups direct.  `BTreeMap`
//! rather than `HashMap` keeps neighbour iteration order stable, which makes
//! path search tie-breaking deterministic.
//!
//! The network is read-only once built; the simulation shares it between
//! threads behind an `Arc`.

use std::collections::BTreeMap;

use sd_core::RailPos;

use crate::{Rail, RailResult, RailType};

// ── RailNetwork ───────────────────────────────────────────────────────────────

/// Directed rail graph keyed by endpoint positions.
///
/// Do not construct directly; use [`RailNetworkBuilder`].
#[derive(Clone, Debug, Default)]
pub struct RailNetwork {
    rails: BTreeMap<RailPos, BTreeMap<RailPos, Rail>>,
    rail_count: usize,
}

impl RailNetwork {
    /// Construct an empty network.
    ///
    /// Every search against an empty network returns an empty path, and
    /// every siding on it falls back to an empty default path.
    pub fn empty() -> Self {
        Self::default()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    /// Number of distinct positions with at least one outgoing rail.
    pub fn node_count(&self) -> usize {
        self.rails.len()
    }

    /// Number of directed rails.
    pub fn rail_count(&self) -> usize {
        self.rail_count
    }

    pub fn is_empty(&self) -> bool {
        self.rail_count == 0
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    /// `true` if a rail runs directly from `a` to `b`.
    #[inline]
    pub fn has_edge(&self, a: RailPos, b: RailPos) -> bool {
        self.edge(a, b).is_some()
    }

    /// The rail running from `a` to `b`, if any.
    #[inline]
    pub fn edge(&self, a: RailPos, b: RailPos) -> Option<&Rail> {
        self.rails.get(&a).and_then(|out| out.get(&b))
    }

    /// Outgoing rails of `a` in ascending position order.
    pub fn neighbors(&self, a: RailPos) -> impl Iterator<Item = (RailPos, &Rail)> + '_ {
        self.rails
            .get(&a)
            .into_iter()
            .flat_map(|out| out.iter().map(|(&to, rail)| (to, rail)))
    }
}

// ── RailNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RailNetwork`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use sd_core::RailPos;
/// use sd_rail::{RailNetworkBuilder, RailType};
///
/// let mut b = RailNetworkBuilder::new();
/// b.add_track(RailPos::new(0, 0, 0), RailPos::new(10, 0, 0), 10.0, RailType::Iron).unwrap();
/// let net = b.build();
/// assert_eq!(net.rail_count(), 2); // bidirectional
/// ```
#[derive(Default)]
pub struct RailNetworkBuilder {
    network: RailNetwork,
}

impl RailNetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a **directed** rail from `from` to `to`.  A later rail between the
    /// same endpoints replaces the earlier one.
    pub fn add_rail(&mut self, from: RailPos, to: RailPos, length: f32, rail_type: RailType) -> RailResult<()> {
        let rail = Rail::new(length, rail_type)?;
        if self.network.rails.entry(from).or_default().insert(to, rail).is_none() {
            self.network.rail_count += 1;
        }
        Ok(())
    }

    /// Convenience: add rails in **both directions**.
    pub fn add_track(&mut self, a: RailPos, b: RailPos, length: f32, rail_type: RailType) -> RailResult<()> {
        self.add_rail(a, b, length, rail_type)?;
        self.add_rail(b, a, length, rail_type)
    }

    pub fn rail_count(&self) -> usize {
        self.network.rail_count
    }

    /// Consume the builder and produce a [`RailNetwork`].
    pub fn build(self) -> RailNetwork {
        self.network
    }
}
