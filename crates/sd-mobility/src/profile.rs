//! The kinematic profiler: cumulative distance and time along a path.
//!
//! # Model
//!
//! A vehicle accelerates and brakes at a single constant rate `a`.  It
//! departs with speed `a` (the "standstill reference": a stopped vehicle is
//! never modelled at exactly zero speed, which keeps every division finite).
//!
//! For each segment the profiler walks the track in sub-spans.  On track that
//! allows acceleration the target speed is the track's line speed; elsewhere
//! the vehicle holds its entry speed.  Speed changes follow
//! `v² = v₀² ± 2·a·d` and the time for a sub-span is `2·d / (v₀ + v₁)`.
//!
//! A segment with a dwell ends with braking time `v / 2a`, the recorded time
//! point, and then the dwell itself; the next segment starts from standstill.
//! A non-accelerating segment entered from standstill is skipped in time: its
//! time point equals the previous one.

use sd_core::KinematicConfig;
use sd_rail::PathSegment;

/// The four properties the profiler reads from a path segment.
pub trait KinematicSegment {
    /// Track length, always positive.
    fn length(&self) -> f32;
    /// Whether vehicles may accelerate on this track.
    fn can_accelerate(&self) -> bool;
    /// Line speed in blocks per tick.
    fn max_speed(&self) -> f32;
    /// Scheduled stop at the end of the segment, in dwell units.
    fn dwell_time(&self) -> f32;
}

impl KinematicSegment for PathSegment {
    #[inline]
    fn length(&self) -> f32 {
        PathSegment::length(self)
    }

    #[inline]
    fn can_accelerate(&self) -> bool {
        PathSegment::can_accelerate(self)
    }

    #[inline]
    fn max_speed(&self) -> f32 {
        PathSegment::max_speed(self)
    }

    #[inline]
    fn dwell_time(&self) -> f32 {
        PathSegment::dwell_time(self)
    }
}

// ── KinematicProfile ──────────────────────────────────────────────────────────

/// Cumulative distance and elapsed time at the end of every path segment.
///
/// Both vectors have one entry per segment and are non-decreasing.  The
/// profile is a pure function of the path and the [`KinematicConfig`], so it
/// is never persisted: restoring a siding recomputes it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KinematicProfile {
    distances:   Vec<f32>,
    time_points: Vec<f32>,
}

impl KinematicProfile {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Profile `path` under `config`.
    pub fn compute<S: KinematicSegment>(path: &[S], config: &KinematicConfig) -> Self {
        let a = config.acceleration;
        let mut distances = Vec::with_capacity(path.len());
        let mut time_points = Vec::with_capacity(path.len());

        let mut distance_sum = 0.0f32;
        let mut time_sum = 0.0f32;
        let mut speed = a;

        for segment in path {
            let length = segment.length();
            distance_sum += length;
            distances.push(distance_sum);

            if speed == a && !segment.can_accelerate() {
                time_points.push(time_sum);
                continue;
            }

            let mut tracker = 0.0f32;
            while tracker < length {
                let remaining = length - tracker;
                let target = if segment.can_accelerate() { segment.max_speed() } else { speed };

                if speed == target {
                    time_sum += remaining / speed;
                    tracker = length;
                    continue;
                }

                let full = (target * target - speed * speed).abs() / (2.0 * a);
                if full >= remaining {
                    // Target not reached before the segment ends.
                    let sign = if speed < target { 2.0 } else { -2.0 };
                    let new_speed = (sign * a * remaining + speed * speed).max(0.0).sqrt();
                    time_sum += 2.0 * remaining / (speed + new_speed);
                    speed = new_speed;
                    tracker = length;
                } else {
                    time_sum += 2.0 * full / (speed + target);
                    speed = target;
                    tracker += full;
                }
            }

            let dwell = segment.dwell_time();
            if dwell > 0.0 {
                time_sum += config.braking_ticks(speed);
                time_points.push(time_sum);
                time_sum += config.dwell_ticks(dwell);
                speed = a;
            } else {
                time_points.push(time_sum);
            }
        }

        Self { distances, time_points }
    }

    #[inline]
    pub fn distances(&self) -> &[f32] {
        &self.distances
    }

    #[inline]
    pub fn time_points(&self) -> &[f32] {
        &self.time_points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Distance at the end of the last segment.
    pub fn total_distance(&self) -> f32 {
        self.distances.last().copied().unwrap_or(0.0)
    }

    /// Time point of the last segment.
    pub fn total_time(&self) -> f32 {
        self.time_points.last().copied().unwrap_or(0.0)
    }

    /// Distance travelled `time` ticks after departure.
    ///
    /// Within a segment the position is interpolated linearly between the
    /// segment's start and end time; during a dwell the vehicle holds at the
    /// segment end.  Times past the end clamp to [`total_distance`](Self::total_distance).
    pub fn distance_at<S: KinematicSegment>(&self, path: &[S], config: &KinematicConfig, time: f32) -> f32 {
        let mut start_time = 0.0f32;
        let mut start_distance = 0.0f32;

        for ((segment, &end_time), &end_distance) in path.iter().zip(&self.time_points).zip(&self.distances) {
            if time <= end_time {
                let span = end_time - start_time;
                if span <= 0.0 {
                    return end_distance;
                }
                let fraction = ((time - start_time) / span).clamp(0.0, 1.0);
                return start_distance + fraction * (end_distance - start_distance);
            }

            let departure = end_time + config.dwell_ticks(segment.dwell_time());
            if time <= departure {
                return end_distance;
            }
            start_time = departure;
            start_distance = end_distance;
        }

        self.total_distance()
    }
}
