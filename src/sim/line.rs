//! Line and segment geometry
//!
//! Every higher-level query reduces to one primitive: intersect the line
//! through `p` with direction `dir` against the segment `start -> end`, by
//! inverting the 2x2 system `p + a*dir == start + b*(end - start)`.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::select::select_best;
use super::vector::VecExt;
use crate::consts::EPSILON;
use crate::within;

/// A wall edge or any other straight segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: DVec2,
    pub end: DVec2,
}

impl Segment {
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }

    /// Vector from start to end
    #[inline]
    pub fn direction(&self) -> DVec2 {
        self.end - self.start
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Unit direction (zero for a degenerate segment)
    #[inline]
    pub fn unit(&self) -> DVec2 {
        self.direction().normalize_or_zero()
    }

    /// Copy of the segment moved by `delta`
    #[inline]
    pub fn offset(&self, delta: DVec2) -> Segment {
        Segment::new(self.start + delta, self.end + delta)
    }

    pub fn distance_to(&self, p: DVec2) -> f64 {
        distance_point_to_segment(p, self.start, self.end)
    }
}

/// Intersection of a line with a segment's supporting line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineHit {
    /// Point where the two lines meet
    pub intersection: DVec2,
    /// Distance from the line's origin `p` to the intersection
    pub distance: f64,
    /// `0 <= a <= 1`: intersection lies on `p -> p + dir`
    pub on_path: bool,
    /// `0 <= b <= 1`: intersection lies on the segment
    pub on_segment: bool,
    /// Parameter along `dir`
    pub a: f64,
    /// Parameter along the segment
    pub b: f64,
}

/// Intersect the line through `p` in direction `dir` with segment `start -> end`
///
/// Returns `None` when the two directions are parallel (including a zero
/// direction or a zero-length segment): there is no unique intersection.
pub fn project_point_onto_line(
    p: DVec2,
    dir: DVec2,
    start: DVec2,
    end: DVec2,
) -> Option<LineHit> {
    let u = end - start;
    // Determinant of [dir | -u]
    let det = u.perp_dot(dir);
    if det.abs() <= EPSILON * dir.length() * u.length() {
        return None;
    }

    let q = start - p;
    let a = u.perp_dot(q) / det;
    let b = dir.perp_dot(q) / det;

    let intersection = p + dir * a;
    Some(LineHit {
        intersection,
        distance: p.distance(intersection),
        on_path: within(a, 0.0, 1.0),
        on_segment: within(b, 0.0, 1.0),
        a,
        b,
    })
}

/// Distance from `p` to the segment `start -> end`
///
/// Perpendicular distance when the foot lies on the segment, otherwise the
/// nearer endpoint distance.
pub fn distance_point_to_segment(p: DVec2, start: DVec2, end: DVec2) -> f64 {
    let normal = (end - start).normalize_or_zero().perpendicular();
    match project_point_onto_line(p, normal, start, end) {
        Some(hit) if hit.on_segment => hit.distance,
        _ => p.distance(start).min(p.distance(end)),
    }
}

/// Point of `points` nearest to `p`, with its distance
///
/// Ties keep the first point found. `None` for an empty list.
pub fn nearest_point(p: DVec2, points: &[DVec2]) -> Option<(f64, DVec2)> {
    select_best(
        points.iter().map(|&q| (p.distance_squared(q), q)),
        |_| true,
        |a, b| a.0 < b.0,
    )
    .map(|(d2, q)| (d2.sqrt(), q))
}

/// A ray crossing a segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayCrossing {
    pub point: DVec2,
    pub distance: f64,
    /// Unit direction of the ray after mirroring off the segment
    pub reflected_dir: DVec2,
}

/// Cross the ray from `p` along `dir` with segment `start -> end`
///
/// Only crossings strictly ahead of `p` count.
pub fn ray_cross_segment(p: DVec2, dir: DVec2, start: DVec2, end: DVec2) -> Option<RayCrossing> {
    let hit = project_point_onto_line(p, dir, start, end)?;
    if !hit.on_segment || hit.a <= EPSILON {
        return None;
    }

    let along = (end - start).normalize_or_zero();
    let projected = along * dir.dot(along);
    Some(RayCrossing {
        point: hit.intersection,
        distance: hit.distance,
        reflected_dir: (projected * 2.0 - dir).normalize_or_zero(),
    })
}
