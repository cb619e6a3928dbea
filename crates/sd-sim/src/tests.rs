//! Integration tests for sd-sim.

use sd_core::{AnchorId, DepotId, KinematicConfig, RailPos, SimConfig, Tick, VehicleId};
use sd_mobility::ProfileSimulator;
use sd_rail::{Anchor, DijkstraPathFinder, PathFinder, PathSegment, RailNetwork, RailNetworkBuilder, RailType};
use sd_siding::{SidingError, SidingRecord, TickOutcome};

use crate::{NoopObserver, Yard, YardBuilder, YardObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig {
        total_ticks,
        seed:                   42,
        elapsed_ticks_per_step: 1.0,
        kinematics:             KinematicConfig::default(),
    }
}

fn p(x: i32) -> RailPos {
    RailPos::new(x, 64, 0)
}

/// Two sidings at either end of a two-platform line:
///
/// ```text
///   0 ─siding─ 40 ─iron─ 140 ─platform─ 180 ─iron─ 280 ─platform─ 320 ─siding─ 360
/// ```
fn line_network() -> RailNetwork {
    let mut b = RailNetworkBuilder::new();
    b.add_track(p(0), p(40), 40.0, RailType::Siding).unwrap();
    b.add_track(p(40), p(140), 100.0, RailType::Iron).unwrap();
    b.add_track(p(140), p(180), 40.0, RailType::Platform).unwrap();
    b.add_track(p(180), p(280), 100.0, RailType::Iron).unwrap();
    b.add_track(p(280), p(320), 40.0, RailType::Platform).unwrap();
    b.add_track(p(320), p(360), 40.0, RailType::Siding).unwrap();
    b.build()
}

const WEST: AnchorId = AnchorId(1);
const EAST: AnchorId = AnchorId(2);
const DEPOT: DepotId = DepotId(7);

fn west() -> Anchor {
    Anchor::new(WEST, p(0), p(40))
}

fn east() -> Anchor {
    Anchor::new(EAST, p(320), p(360))
}

fn platform_a() -> Anchor {
    Anchor::new(AnchorId(10), p(140), p(180)).with_dwell(2.0)
}

fn platform_b() -> Anchor {
    Anchor::new(AnchorId(11), p(280), p(320)).with_dwell(3.0)
}

fn main_path(net: &RailNetwork) -> Vec<PathSegment> {
    DijkstraPathFinder.find_path(net, &[platform_a(), platform_b()], 0).unwrap()
}

type TestYard = Yard<ProfileSimulator, DijkstraPathFinder>;

fn builder(total_ticks: u64) -> YardBuilder<ProfileSimulator, DijkstraPathFinder> {
    let simulator = ProfileSimulator::new(KinematicConfig::default(), 5.0);
    YardBuilder::new(test_config(total_ticks), simulator, DijkstraPathFinder).network(line_network())
}

/// Both sidings, attached to `DEPOT`.
fn attached_yard(total_ticks: u64) -> TestYard {
    let mut yard = builder(total_ticks).siding(east(), 40.0).siding(west(), 40.0).build().unwrap();
    yard.set_depot(WEST, Some(DEPOT)).unwrap();
    yard.set_depot(EAST, Some(DEPOT)).unwrap();
    yard
}

fn request_full_route(yard: &mut TestYard, siding: AnchorId) -> u32 {
    let main = main_path(yard.network());
    yard.request_route(siding, Some(platform_a()), Some(platform_b()), main, 1).unwrap()
}

#[derive(Default)]
struct Recorder {
    started:  Vec<Tick>,
    applied:  Vec<AnchorId>,
    rejected: Vec<AnchorId>,
    synced:   usize,
    per_tick: usize,
    ended:    Option<Tick>,
}

impl YardObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.started.push(tick);
    }

    fn on_route_applied(&mut self, _tick: Tick, siding: &SidingRecord) {
        self.applied.push(siding.id());
    }

    fn on_route_rejected(&mut self, _tick: Tick, siding: AnchorId, _error: &SidingError) {
        self.rejected.push(siding);
    }

    fn on_siding_tick(&mut self, _tick: Tick, _siding: &SidingRecord, outcome: &TickOutcome) {
        self.per_tick += outcome.synced.len();
    }

    fn on_tick_end(&mut self, _tick: Tick, synced: usize) {
        self.synced += synced;
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.ended = Some(final_tick);
    }
}

// ── YardBuilder validation ────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::SimError;

    #[test]
    fn builds_with_defaults() {
        let yard = builder(10).build().unwrap();
        assert_eq!(yard.sidings().count(), 0);
        assert_eq!(yard.clock, Tick::ZERO);
        assert!(!yard.network().is_empty());
    }

    #[test]
    fn sidings_are_ordered_by_id() {
        let yard = builder(10).siding(east(), 40.0).siding(west(), 40.0).build().unwrap();
        let ids: Vec<AnchorId> = yard.sidings().map(|s| s.id()).collect();
        assert_eq!(ids, vec![WEST, EAST]);
        assert!(yard.siding(EAST).is_some());
        assert!(yard.siding(AnchorId(99)).is_none());
    }

    #[test]
    fn duplicate_siding_errors() {
        let result = builder(10).siding(west(), 40.0).siding(west(), 20.0).build();
        assert!(matches!(result, Err(SimError::DuplicateSiding(WEST))));
    }

    #[test]
    fn invalid_config_errors() {
        let mut config = test_config(10);
        config.kinematics.acceleration = 0.0;
        let result = YardBuilder::new(config, ProfileSimulator::default(), DijkstraPathFinder).build();
        assert!(matches!(result, Err(SimError::Core(_))));
    }

    #[test]
    fn invalid_rail_length_errors() {
        let result = builder(10).siding(west(), -1.0).build();
        assert!(matches!(result, Err(SimError::Siding(SidingError::InvalidRailLength(_)))));
    }

    #[test]
    fn restores_snapshot() {
        let mut original = attached_yard(10);
        request_full_route(&mut original, WEST);
        original.run_ticks(1, &mut NoopObserver).unwrap();
        let snapshot = original.siding(WEST).unwrap().snapshot();

        let yard = builder(10).restore(snapshot).build().unwrap();
        let restored = yard.siding(WEST).unwrap();
        assert_eq!(restored.path(), original.siding(WEST).unwrap().path());
        assert_eq!(restored.depot(), None);
    }

    #[test]
    fn empty_network_gives_empty_default_path() {
        let simulator = ProfileSimulator::default();
        let mut yard = YardBuilder::new(test_config(10), simulator, DijkstraPathFinder)
            .siding(west(), 40.0)
            .build()
            .unwrap();
        yard.set_depot(WEST, Some(DEPOT)).unwrap();
        assert!(yard.siding(WEST).unwrap().path().is_empty());
    }
}

// ── Depot association ─────────────────────────────────────────────────────────

#[cfg(test)]
mod depot_tests {
    use super::*;
    use crate::SimError;

    #[test]
    fn unknown_siding_errors() {
        let mut yard = attached_yard(10);
        let result = yard.set_depot(AnchorId(99), Some(DEPOT));
        assert!(matches!(result, Err(SimError::Core(sd_core::CoreError::AnchorNotFound(_)))));
    }

    #[test]
    fn attaching_installs_default_path() {
        let yard = attached_yard(10);
        for siding in yard.sidings() {
            assert_eq!(siding.path().len(), 1);
            assert!(siding.vehicle(VehicleId::home(siding.id())).is_some());
        }
    }

    #[test]
    fn created_siding_is_indexed_in_order() {
        let mut yard = attached_yard(10);
        let id = yard.create_siding(p(1120), p(1160), 40.0).unwrap();
        assert!(id != WEST && id != EAST);

        let ids: Vec<AnchorId> = yard.sidings().map(|s| s.id()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        for siding in [WEST, EAST, id] {
            assert_eq!(yard.siding(siding).map(|s| s.id()), Some(siding));
        }

        let created = yard.siding(id).unwrap();
        assert_eq!(created.depot(), None);
        assert_eq!(created.anchor().pos1, p(1120));
        yard.set_depot(id, Some(DEPOT)).unwrap();
    }

    #[test]
    fn created_ids_follow_the_seed() {
        let mint = || attached_yard(10).create_siding(p(0), p(40), 40.0).unwrap();
        assert_eq!(mint(), mint());
    }

    #[test]
    fn detached_siding_does_not_tick() {
        let mut yard = attached_yard(10);
        yard.set_depot(EAST, None).unwrap();
        yard.run_ticks(20, &mut NoopObserver).unwrap();
        assert_eq!(yard.siding(EAST).unwrap().population(), 0);
        assert_eq!(yard.siding(WEST).unwrap().population(), 1);
    }
}

// ── Route hand-off ────────────────────────────────────────────────────────────

#[cfg(test)]
mod routing_tests {
    use super::*;

    #[test]
    fn route_applies_at_next_tick() {
        let mut yard = attached_yard(10);
        let successful = request_full_route(&mut yard, WEST);
        assert_eq!(successful, 3);
        assert_eq!(yard.siding(WEST).unwrap().path().len(), 1, "not applied yet");

        let mut rec = Recorder::default();
        yard.run_ticks(1, &mut rec).unwrap();
        assert_eq!(rec.applied, vec![WEST]);
        let siding = yard.siding(WEST).unwrap();
        assert!(siding.path().len() > 1);
        assert_eq!(siding.profile().len(), siding.path().len());
    }

    #[test]
    fn missing_platform_falls_back_to_default_path() {
        let mut yard = attached_yard(10);
        request_full_route(&mut yard, WEST);
        yard.run_ticks(1, &mut NoopObserver).unwrap();

        let successful = yard.request_route(WEST, None, Some(platform_b()), Vec::new(), 0).unwrap();
        assert_eq!(successful, 0);
        yard.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(yard.siding(WEST).unwrap().path().len(), 1);
    }

    #[test]
    fn stale_route_is_discarded() {
        let mut yard = attached_yard(10);
        request_full_route(&mut yard, WEST);
        yard.set_depot(WEST, Some(DepotId(8))).unwrap();

        let mut rec = Recorder::default();
        yard.run_ticks(1, &mut rec).unwrap();
        assert!(rec.applied.is_empty());
        assert_eq!(rec.rejected, vec![WEST]);
        assert_eq!(yard.siding(WEST).unwrap().path().len(), 1);
    }

    #[test]
    fn background_composition_is_applied() {
        let mut yard = attached_yard(10);
        let main = main_path(yard.network());
        let handle = yard
            .compose_in_background(EAST, Some(platform_a()), Some(platform_b()), main, 1)
            .unwrap();
        handle.join().unwrap();

        let mut rec = Recorder::default();
        yard.run_ticks(1, &mut rec).unwrap();
        assert_eq!(rec.applied, vec![EAST]);
        let siding = yard.siding(EAST).unwrap();
        assert_eq!(siding.path().first().and_then(|s| s.stop()), Some(EAST));
        assert_eq!(siding.path().last().and_then(|s| s.stop()), Some(EAST));
    }

    #[test]
    fn background_request_for_unknown_siding_errors() {
        let yard = attached_yard(10);
        assert!(yard.compose_in_background(AnchorId(99), None, None, Vec::new(), 0).is_err());
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn run_stops_at_end_tick() {
        let mut yard = attached_yard(25);
        let mut rec = Recorder::default();
        yard.run(&mut rec).unwrap();
        assert_eq!(yard.clock, Tick(25));
        assert_eq!(rec.started.len(), 25);
        assert_eq!(rec.started.first(), Some(&Tick(0)));
        assert_eq!(rec.ended, Some(Tick(25)));
    }

    #[test]
    fn run_ticks_ignores_end_tick() {
        let mut yard = attached_yard(5);
        yard.run_ticks(12, &mut NoopObserver).unwrap();
        assert_eq!(yard.clock, Tick(12));
    }

    #[test]
    fn synced_counts_match_outcomes() {
        let mut yard = attached_yard(2_000);
        request_full_route(&mut yard, WEST);
        request_full_route(&mut yard, EAST);
        let mut rec = Recorder::default();
        yard.run(&mut rec).unwrap();
        assert!(rec.synced > 0, "departures should be reported");
        assert_eq!(rec.synced, rec.per_tick);
    }

    #[test]
    fn unlimited_runs_are_deterministic() {
        let run = || {
            let mut yard = attached_yard(1_500);
            for id in [WEST, EAST] {
                yard.siding_mut(id).unwrap().set_unlimited_spawning(true);
                request_full_route(&mut yard, id);
            }
            yard.run(&mut NoopObserver).unwrap();
            yard.sidings()
                .flat_map(|s| s.vehicles().map(|v| (v.id(), v.rail_progress().to_bits())))
                .collect::<Vec<_>>()
        };
        let first = run();
        assert!(first.len() > 2);
        assert_eq!(first, run());
    }
}
