//! Integer track coordinates.
//!
//! Rails are keyed by the positions of their two endpoints, so `RailPos` is
//! the key type of the whole rail graph.  It is `Ord` to keep graph traversal
//! deterministic (`BTreeMap` adjacency).

use std::fmt;

/// A block-grid position of a rail endpoint.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RailPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl RailPos {
    pub const ORIGIN: RailPos = RailPos { x: 0, y: 0, z: 0 };

    #[inline]
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Squared Euclidean distance, computed in `i64` so far-apart positions
    /// cannot overflow.
    #[inline]
    pub fn distance_sq(self, other: RailPos) -> i64 {
        let dx = self.x as i64 - other.x as i64;
        let dy = self.y as i64 - other.y as i64;
        let dz = self.z as i64 - other.z as i64;
        dx * dx + dy * dy + dz * dz
    }

    /// Order `a` and `b` by distance from `reference`, nearest first.  Ties
    /// fall back to coordinate order.  `reverse` swaps the result.
    pub fn ordered_pair(a: RailPos, b: RailPos, reference: RailPos, reverse: bool) -> (RailPos, RailPos) {
        let key_a = (a.distance_sq(reference), a);
        let key_b = (b.distance_sq(reference), b);
        let (near, far) = if key_a <= key_b { (a, b) } else { (b, a) };
        if reverse { (far, near) } else { (near, far) }
    }
}

impl fmt::Display for RailPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
