//! Path-search trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! The route composer calls search via the [`PathFinder`] trait, so
//! applications can swap in their own algorithm (signal-aware, A*,
//! precomputed tables) without touching the scheduler.
//!
//! # Path shape
//!
//! A path through waypoints `[w0, w1, …, wn]` is:
//!
//! ```text
//! track(w0) · connecting rails · track(w1) · connecting rails · … · track(wn)
//! ```
//!
//! Each waypoint's own track is a segment tagged with the waypoint's id and
//! dwell time.  Segments are numbered consecutively starting at the caller's
//! `offset`.  If any leg is unreachable the whole result is empty.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use sd_core::RailPos;

use crate::{Anchor, PathSegment, Rail, RailNetwork, RailResult};

// ── PathFinder trait ──────────────────────────────────────────────────────────

/// Pluggable path search.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so a composition can run on a
/// background thread while the tick loop keeps going.
pub trait PathFinder: Send + Sync {
    /// Find a path visiting `waypoints` in order, numbering segments from
    /// `offset`.
    ///
    /// Returns an empty `Vec` when no path exists.  Errors are reserved for
    /// invalid rail data encountered while building segments.
    fn find_path(
        &self,
        network:   &RailNetwork,
        waypoints: &[Anchor],
        offset:    u32,
    ) -> RailResult<Vec<PathSegment>>;
}

// ── DijkstraPathFinder ────────────────────────────────────────────────────────

/// Shortest cruise-time search over the rail graph.
///
/// Cost of a rail is its length divided by its rail type's line speed
/// (milli-ticks).  The first waypoint may be left in either direction; the
/// cheaper overall orientation wins, ties going to `pos1 → pos2`.
#[derive(Copy, Clone, Debug, Default)]
pub struct DijkstraPathFinder;

impl PathFinder for DijkstraPathFinder {
    fn find_path(
        &self,
        network:   &RailNetwork,
        waypoints: &[Anchor],
        offset:    u32,
    ) -> RailResult<Vec<PathSegment>> {
        let Some((first, rest)) = waypoints.split_first() else {
            return Ok(Vec::new());
        };
        if rest.is_empty() {
            return Ok(Vec::new());
        }

        let mut best: Option<(u64, Vec<Hop>)> = None;
        for (from, to) in [(first.pos1, first.pos2), (first.pos2, first.pos1)] {
            let Some(rail) = network.edge(from, to) else { continue };
            let start = Hop { from, to, rail: *rail, stop: Some(*first) };
            let Some((cost, hops)) = route_from(network, start, rest) else { continue };
            if best.as_ref().is_none_or(|(best_cost, _)| cost < *best_cost) {
                best = Some((cost, hops));
            }
        }

        let Some((_, hops)) = best else {
            return Ok(Vec::new());
        };

        hops.into_iter()
            .enumerate()
            .map(|(i, hop)| {
                let (stop, dwell) = hop.stop.map_or((None, 0.0), |a| (Some(a.id), a.dwell_time));
                PathSegment::new(hop.rail, hop.from, hop.to, stop, dwell, offset + i as u32)
            })
            .collect()
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// A rail chosen by the search, before validation into a `PathSegment`.
struct Hop {
    from: RailPos,
    to:   RailPos,
    rail: Rail,
    stop: Option<Anchor>,
}

/// Chain legs starting with `start` through every anchor in `rest`.
fn route_from(network: &RailNetwork, start: Hop, rest: &[Anchor]) -> Option<(u64, Vec<Hop>)> {
    let mut cost = start.rail.cost();
    let mut at = start.to;
    let mut hops = vec![start];

    for target in rest {
        let search = dijkstra(network, at, &[target.pos1, target.pos2]);

        // Enter the target's track from either end; take the cheaper one.
        let mut leg: Option<(u64, RailPos, RailPos, Rail)> = None;
        for (entry, exit) in [(target.pos1, target.pos2), (target.pos2, target.pos1)] {
            let (Some(&reach), Some(rail)) = (search.dist.get(&entry), network.edge(entry, exit)) else {
                continue;
            };
            let total = reach.saturating_add(rail.cost());
            if leg.as_ref().is_none_or(|(best, ..)| total < *best) {
                leg = Some((total, entry, exit, *rail));
            }
        }

        let (leg_cost, entry, exit, rail) = leg?;
        hops.extend(search.reconstruct(network, entry));
        hops.push(Hop { from: entry, to: exit, rail, stop: Some(*target) });
        cost = cost.saturating_add(leg_cost);
        at = exit;
    }

    Some((cost, hops))
}

struct Search {
    /// Best known cost to reach each settled or frontier position.
    dist: BTreeMap<RailPos, u64>,
    /// Predecessor of each reached position.
    prev: BTreeMap<RailPos, RailPos>,
}

impl Search {
    /// Connecting rails from the search origin to `target`, in travel order.
    fn reconstruct(&self, network: &RailNetwork, target: RailPos) -> Vec<Hop> {
        let mut hops = Vec::new();
        let mut cur = target;
        while let Some(&prev) = self.prev.get(&cur) {
            if let Some(rail) = network.edge(prev, cur) {
                hops.push(Hop { from: prev, to: cur, rail: *rail, stop: None });
            }
            cur = prev;
        }
        hops.reverse();
        hops
    }
}

/// Dijkstra from `from`, stopping once every position in `targets` is
/// settled (or the frontier is exhausted).
fn dijkstra(network: &RailNetwork, from: RailPos, targets: &[RailPos]) -> Search {
    let mut dist: BTreeMap<RailPos, u64> = BTreeMap::new();
    let mut prev: BTreeMap<RailPos, RailPos> = BTreeMap::new();
    let mut settled = 0usize;

    dist.insert(from, 0);

    // Min-heap: (cost, position).  Secondary key gives deterministic ties.
    let mut heap: BinaryHeap<Reverse<(u64, RailPos)>> = BinaryHeap::new();
    heap.push(Reverse((0, from)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        // Skip stale heap entries.
        if dist.get(&node).is_some_and(|&best| cost > best) {
            continue;
        }
        if targets.contains(&node) {
            settled += 1;
            if settled == targets.len() {
                break;
            }
        }

        for (neighbor, rail) in network.neighbors(node) {
            let new_cost = cost.saturating_add(rail.cost());
            if dist.get(&neighbor).is_none_or(|&best| new_cost < best) {
                dist.insert(neighbor, new_cost);
                prev.insert(neighbor, node);
                heap.push(Reverse((new_cost, neighbor)));
            }
        }
    }

    Search { dist, prev }
}
