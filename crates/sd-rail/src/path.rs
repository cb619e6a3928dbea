//! Anchors (track-side objects used as waypoints) and validated path
//! segments.

use sd_core::{AnchorId, RailPos};

use crate::{Rail, RailError, RailResult};

// ── Anchor ────────────────────────────────────────────────────────────────────

/// A track-side object occupying the rail between two positions: a siding or
/// a platform.  Anchors are the waypoints of a path search.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Anchor {
    pub id:   AnchorId,
    pub pos1: RailPos,
    pub pos2: RailPos,
    /// Scheduled stop at this anchor, in dwell units.  0 for no stop.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dwell_time: f32,
}

impl Anchor {
    pub fn new(id: AnchorId, pos1: RailPos, pos2: RailPos) -> Self {
        Self { id, pos1, pos2, dwell_time: 0.0 }
    }

    /// Builder-style setter for the stop duration.
    pub fn with_dwell(mut self, dwell_time: f32) -> Self {
        self.dwell_time = dwell_time;
        self
    }

    /// Endpoints ordered by distance from `reference`, nearest first.
    pub fn ordered_positions(&self, reference: RailPos, reverse: bool) -> (RailPos, RailPos) {
        RailPos::ordered_pair(self.pos1, self.pos2, reference, reverse)
    }
}

// ── PathSegment ───────────────────────────────────────────────────────────────

/// One traversable step of a vehicle path: a rail between two positions,
/// an optional stop at its end, and its ordinal in the path.
///
/// Construction validates the kinematic inputs (positive length,
/// non-negative dwell), so the profiler never sees invalid data.  The same
/// validation runs when a segment is deserialized.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPathSegment"))]
pub struct PathSegment {
    rail:       Rail,
    start:      RailPos,
    end:        RailPos,
    stop:       Option<AnchorId>,
    dwell_time: f32,
    index:      u32,
}

impl PathSegment {
    pub fn new(
        rail:       Rail,
        start:      RailPos,
        end:        RailPos,
        stop:       Option<AnchorId>,
        dwell_time: f32,
        index:      u32,
    ) -> RailResult<Self> {
        let invalid = |reason: String| RailError::InvalidSegment { start, end, reason };
        if !(rail.length.is_finite() && rail.length > 0.0) {
            return Err(invalid(format!("length must be positive, got {}", rail.length)));
        }
        if !(dwell_time.is_finite() && dwell_time >= 0.0) {
            return Err(invalid(format!("dwell time must be non-negative, got {dwell_time}")));
        }
        Ok(Self { rail, start, end, stop, dwell_time, index })
    }

    #[inline]
    pub fn rail(&self) -> &Rail {
        &self.rail
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.rail.length
    }

    #[inline]
    pub fn can_accelerate(&self) -> bool {
        self.rail.can_accelerate()
    }

    #[inline]
    pub fn max_speed(&self) -> f32 {
        self.rail.max_speed()
    }

    #[inline]
    pub fn dwell_time(&self) -> f32 {
        self.dwell_time
    }

    #[inline]
    pub fn start(&self) -> RailPos {
        self.start
    }

    #[inline]
    pub fn end(&self) -> RailPos {
        self.end
    }

    /// The anchor whose track this segment is, if any.
    #[inline]
    pub fn stop(&self) -> Option<AnchorId> {
        self.stop
    }

    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    /// `true` if both segments cover the same directed rail.
    #[inline]
    pub fn same_track(&self, other: &PathSegment) -> bool {
        self.start == other.start && self.end == other.end
    }

    pub(crate) fn with_index(mut self, index: u32) -> Self {
        self.index = index;
        self
    }
}

/// Unvalidated wire shape of a [`PathSegment`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawPathSegment {
    rail:       Rail,
    start:      RailPos,
    end:        RailPos,
    stop:       Option<AnchorId>,
    dwell_time: f32,
    index:      u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPathSegment> for PathSegment {
    type Error = RailError;

    fn try_from(raw: RawPathSegment) -> RailResult<Self> {
        PathSegment::new(raw.rail, raw.start, raw.end, raw.stop, raw.dwell_time, raw.index)
    }
}

// ── append_path ───────────────────────────────────────────────────────────────

/// Append `src` to `dst`, continuing `dst`'s index numbering.
///
/// When `dst` ends on the same rail `src` starts on (a platform shared by two
/// legs), the duplicate first segment of `src` is dropped.  Appending to an
/// empty `dst` keeps `src`'s own numbering.
pub fn append_path(dst: &mut Vec<PathSegment>, src: &[PathSegment]) {
    let Some(last) = dst.last() else {
        dst.extend_from_slice(src);
        return;
    };

    let skip = usize::from(src.first().is_some_and(|first| first.same_track(last)));
    let mut next_index = last.index + 1;
    for segment in &src[skip..] {
        dst.push(segment.clone().with_index(next_index));
        next_index += 1;
    }
}
