//! Static wall geometry
//!
//! A wall is an ordered vertex list:
//! - fewer than 2 points: no edges
//! - exactly 2 points: one open segment
//! - 3 or more points: closed polygon, edge `i` joins vertex `i` to `i + 1 (mod n)`

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::line::{RayCrossing, Segment, ray_cross_segment};
use super::select::select_best;
use crate::consts::CIRCLE_WALL_STEP_DEG;

/// Upper bound on the vertices of a generated circle
pub const MAX_CIRCLE_VERTICES: usize = 4096;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    points: Vec<DVec2>,
}

impl Wall {
    pub fn new(points: Vec<DVec2>) -> Self {
        Self { points }
    }

    /// Single open segment
    pub fn segment(a: DVec2, b: DVec2) -> Self {
        Self::new(vec![a, b])
    }

    /// Axis-aligned closed rectangle
    pub fn rectangle(min: DVec2, max: DVec2) -> Self {
        Self::new(vec![
            min,
            DVec2::new(max.x, min.y),
            max,
            DVec2::new(min.x, max.y),
        ])
    }

    /// Closed polygon approximating a circle, one vertex every `step_deg`
    ///
    /// The vertex count is kept between 3 and `MAX_CIRCLE_VERTICES`; a step
    /// outside that range is replaced by an even spacing at the limit.
    pub fn circle(center: DVec2, radius: f64, step_deg: f64) -> Self {
        let mut step = if step_deg > 0.0 {
            step_deg
        } else {
            CIRCLE_WALL_STEP_DEG
        };
        let wanted = (360.0 / step).ceil();
        let count = wanted.clamp(3.0, MAX_CIRCLE_VERTICES as f64) as usize;
        if count as f64 != wanted {
            step = 360.0 / count as f64;
        }

        let points = (0..count)
            .map(|i| {
                let (sin, cos) = (i as f64 * step).to_radians().sin_cos();
                center + DVec2::new(cos, sin) * radius
            })
            .collect();
        Self::new(points)
    }

    /// Replace the vertex list (between steps only)
    pub fn set_points(&mut self, points: Vec<DVec2>) {
        self.points = points;
    }

    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    pub fn edge_count(&self) -> usize {
        match self.points.len() {
            0 | 1 => 0,
            2 => 1,
            n => n,
        }
    }

    /// Edge `i`, or `None` when out of range
    pub fn edge(&self, i: usize) -> Option<Segment> {
        if i >= self.edge_count() {
            return None;
        }
        let next = (i + 1) % self.points.len();
        Some(Segment::new(self.points[i], self.points[next]))
    }

    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        (0..self.edge_count()).filter_map(move |i| self.edge(i))
    }

    /// Nearest crossing of the ray from `p` along `dir` with any edge
    pub fn cross_point(&self, p: DVec2, dir: DVec2) -> Option<RayCrossing> {
        select_best(
            self.edges()
                .filter_map(|e| ray_cross_segment(p, dir, e.start, e.end)),
            |_| true,
            |a, b| a.distance < b.distance,
        )
    }
}
