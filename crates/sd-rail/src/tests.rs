//! Unit tests for sd-rail.
//!
//! All tests use a hand-crafted network so they run without any CSV file.

#[cfg(test)]
mod helpers {
    use sd_core::{AnchorId, RailPos};

    use crate::{Anchor, RailNetwork, RailNetworkBuilder, RailType};

    pub fn p(x: i32) -> RailPos {
        RailPos::new(x, 64, 0)
    }

    /// A straight line along x:
    ///
    /// ```text
    ///   0 ──siding── 40 ──iron── 140 ──platform── 180 ──iron── 280 ──platform── 320
    /// ```
    ///
    /// plus an isolated stub 1000 ── 1010 that nothing reaches.
    pub fn line_network() -> RailNetwork {
        let mut b = RailNetworkBuilder::new();
        b.add_track(p(0), p(40), 40.0, RailType::Siding).unwrap();
        b.add_track(p(40), p(140), 100.0, RailType::Iron).unwrap();
        b.add_track(p(140), p(180), 40.0, RailType::Platform).unwrap();
        b.add_track(p(180), p(280), 100.0, RailType::Iron).unwrap();
        b.add_track(p(280), p(320), 40.0, RailType::Platform).unwrap();
        b.add_track(p(1000), p(1010), 10.0, RailType::Iron).unwrap();
        b.build()
    }

    pub fn siding() -> Anchor {
        Anchor::new(AnchorId(1), p(0), p(40))
    }

    pub fn platform_a() -> Anchor {
        Anchor::new(AnchorId(10), p(140), p(180)).with_dwell(2.0)
    }

    pub fn platform_b() -> Anchor {
        Anchor::new(AnchorId(11), p(280), p(320)).with_dwell(3.0)
    }

    pub fn island() -> Anchor {
        Anchor::new(AnchorId(99), p(1000), p(1010))
    }
}

// ── Rails & network structure ─────────────────────────────────────────────────

#[cfg(test)]
mod network {
    use super::helpers::{line_network, p};
    use crate::{Rail, RailNetworkBuilder, RailType};

    #[test]
    fn empty_build() {
        let net = RailNetworkBuilder::new().build();
        assert!(net.is_empty());
        assert_eq!(net.rail_count(), 0);
        assert!(!net.has_edge(p(0), p(1)));
    }

    #[test]
    fn track_is_bidirectional() {
        let net = line_network();
        assert!(net.has_edge(p(0), p(40)));
        assert!(net.has_edge(p(40), p(0)));
        assert_eq!(net.edge(p(40), p(140)).map(|r| r.length), Some(100.0));
        assert!(!net.has_edge(p(0), p(140)));
        assert_eq!(net.rail_count(), 12);
    }

    #[test]
    fn neighbors_are_ordered() {
        let net = line_network();
        let out: Vec<_> = net.neighbors(p(40)).map(|(to, _)| to).collect();
        assert_eq!(out, vec![p(0), p(140)]);
        assert_eq!(net.neighbors(p(5)).count(), 0);
    }

    #[test]
    fn replacing_a_rail_keeps_count() {
        let mut b = RailNetworkBuilder::new();
        b.add_rail(p(0), p(1), 1.0, RailType::Wooden).unwrap();
        b.add_rail(p(0), p(1), 2.0, RailType::Diamond).unwrap();
        assert_eq!(b.rail_count(), 1);
        let net = b.build();
        assert_eq!(net.edge(p(0), p(1)).map(|r| r.rail_type), Some(RailType::Diamond));
    }

    #[test]
    fn rejects_non_positive_length() {
        assert!(Rail::new(0.0, RailType::Iron).is_err());
        assert!(Rail::new(-3.0, RailType::Iron).is_err());
        assert!(Rail::new(f32::INFINITY, RailType::Iron).is_err());
        assert!(RailNetworkBuilder::new().add_track(p(0), p(1), 0.0, RailType::Iron).is_err());
    }

    #[test]
    fn rail_type_table() {
        assert!(RailType::Iron.can_accelerate());
        assert!(!RailType::Platform.can_accelerate());
        assert!(!RailType::Siding.can_accelerate());
        // 80 km/h = 80 / 3.6 / 20 blocks per tick.
        assert!((RailType::Iron.max_blocks_per_tick() - 80.0 / 72.0).abs() < 1e-6);
        assert_eq!(RailType::from_name("Turn_Back"), Some(RailType::TurnBack));
        assert_eq!(RailType::from_name("maglev"), None);
    }
}

// ── Path segments & append ────────────────────────────────────────────────────

#[cfg(test)]
mod path {
    use sd_core::AnchorId;

    use super::helpers::p;
    use crate::{PathSegment, Rail, RailError, RailType, append_path};

    fn seg(from: i32, to: i32, index: u32) -> PathSegment {
        let rail = Rail::new((to - from).abs() as f32, RailType::Iron).unwrap();
        PathSegment::new(rail, p(from), p(to), None, 0.0, index).unwrap()
    }

    #[test]
    fn rejects_zero_length() {
        let rail = Rail { length: 0.0, rail_type: RailType::Iron };
        let err = PathSegment::new(rail, p(0), p(0), None, 0.0, 0).unwrap_err();
        assert!(matches!(err, RailError::InvalidSegment { .. }));
    }

    #[test]
    fn rejects_negative_dwell() {
        let rail = Rail::new(5.0, RailType::Platform).unwrap();
        assert!(PathSegment::new(rail, p(0), p(5), Some(AnchorId(1)), -1.0, 0).is_err());
        assert!(PathSegment::new(rail, p(0), p(5), Some(AnchorId(1)), f32::NAN, 0).is_err());
        assert!(PathSegment::new(rail, p(0), p(5), Some(AnchorId(1)), 0.0, 0).is_ok());
    }

    #[test]
    fn append_to_empty_keeps_numbering() {
        let mut dst = Vec::new();
        append_path(&mut dst, &[seg(0, 10, 7), seg(10, 20, 8)]);
        let idx: Vec<u32> = dst.iter().map(PathSegment::index).collect();
        assert_eq!(idx, vec![7, 8]);
    }

    #[test]
    fn append_continues_numbering() {
        let mut dst = vec![seg(0, 10, 0), seg(10, 20, 1)];
        append_path(&mut dst, &[seg(20, 30, 0), seg(30, 40, 1)]);
        let idx: Vec<u32> = dst.iter().map(PathSegment::index).collect();
        assert_eq!(idx, vec![0, 1, 2, 3]);
        assert_eq!(dst[2].start(), p(20));
    }

    #[test]
    fn append_skips_shared_track() {
        let mut dst = vec![seg(0, 10, 0), seg(10, 20, 1)];
        append_path(&mut dst, &[seg(10, 20, 5), seg(20, 30, 6)]);
        assert_eq!(dst.len(), 3);
        assert_eq!(dst[2].start(), p(20));
        assert_eq!(dst[2].index(), 2);
    }

    #[test]
    fn append_empty_src_is_noop() {
        let mut dst = vec![seg(0, 10, 0)];
        append_path(&mut dst, &[]);
        assert_eq!(dst.len(), 1);
    }
}

// ── Dijkstra path finder ──────────────────────────────────────────────────────

#[cfg(test)]
mod finder {
    use sd_core::AnchorId;

    use super::helpers::{island, line_network, p, platform_a, platform_b, siding};
    use crate::{DijkstraPathFinder, PathFinder, PathSegment, RailNetwork};

    #[test]
    fn siding_to_platform() {
        let net = line_network();
        let path = DijkstraPathFinder.find_path(&net, &[siding(), platform_a()], 0).unwrap();

        let hops: Vec<_> = path.iter().map(|s| (s.start(), s.end())).collect();
        assert_eq!(hops, vec![(p(0), p(40)), (p(40), p(140)), (p(140), p(180))]);

        assert_eq!(path[0].stop(), Some(AnchorId(1)));
        assert_eq!(path[1].stop(), None);
        assert_eq!(path[2].stop(), Some(AnchorId(10)));
        assert_eq!(path[2].dwell_time(), 2.0);
        assert_eq!(path[1].dwell_time(), 0.0);
    }

    #[test]
    fn offset_seeds_numbering() {
        let net = line_network();
        let path = DijkstraPathFinder.find_path(&net, &[siding(), platform_a()], 4).unwrap();
        let idx: Vec<u32> = path.iter().map(PathSegment::index).collect();
        assert_eq!(idx, vec![4, 5, 6]);
    }

    #[test]
    fn return_leg_reverses_direction() {
        let net = line_network();
        let path = DijkstraPathFinder.find_path(&net, &[platform_b(), siding()], 0).unwrap();
        assert_eq!(path.first().map(|s| (s.start(), s.end())), Some((p(320), p(280))));
        assert_eq!(path.last().map(|s| (s.start(), s.end())), Some((p(40), p(0))));
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn multi_waypoint_path_is_contiguous() {
        let net = line_network();
        let path = DijkstraPathFinder
            .find_path(&net, &[siding(), platform_a(), platform_b()], 0)
            .unwrap();
        for pair in path.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start());
        }
        assert_eq!(path.last().and_then(PathSegment::stop), Some(AnchorId(11)));
    }

    #[test]
    fn unreachable_is_empty_not_error() {
        let net = line_network();
        let path = DijkstraPathFinder.find_path(&net, &[siding(), island()], 0).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn degenerate_waypoint_lists_are_empty() {
        let net = line_network();
        assert!(DijkstraPathFinder.find_path(&net, &[], 0).unwrap().is_empty());
        assert!(DijkstraPathFinder.find_path(&net, &[siding()], 0).unwrap().is_empty());
        assert!(DijkstraPathFinder
            .find_path(&RailNetwork::empty(), &[siding(), platform_a()], 0)
            .unwrap()
            .is_empty());
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use super::helpers::p;
    use crate::{RailError, RailType, load_network_reader};

    const CSV: &str = "\
x1,y1,z1,x2,y2,z2,length,rail_type,one_way\n\
0,64,0,40,64,0,40,siding,false\n\
40,64,0,140,64,0,100,iron,\n\
140,64,0,180,64,0,40,platform,true\n\
";

    #[test]
    fn loads_rows() {
        let net = load_network_reader(Cursor::new(CSV)).unwrap();
        assert_eq!(net.rail_count(), 5);
        assert!(net.has_edge(p(40), p(0)));
        assert!(net.has_edge(p(140), p(180)));
        assert!(!net.has_edge(p(180), p(140)), "one_way row adds a single rail");
        assert_eq!(net.edge(p(0), p(40)).map(|r| r.rail_type), Some(RailType::Siding));
    }

    #[test]
    fn unknown_rail_type_errors() {
        let csv = "x1,y1,z1,x2,y2,z2,length,rail_type\n0,0,0,1,0,0,1,maglev\n";
        let err = load_network_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, RailError::UnknownRailType(ref t) if t == "maglev"));
    }

    #[test]
    fn bad_length_errors() {
        let csv = "x1,y1,z1,x2,y2,z2,length,rail_type\n0,0,0,1,0,0,0,iron\n";
        assert!(matches!(load_network_reader(Cursor::new(csv)), Err(RailError::Parse(_))));
    }
}
