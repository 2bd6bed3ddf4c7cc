//! Swept-circle contact against a single segment
//!
//! The tricky part of the engine: a ball of radius `r` moving from `start`
//! to `end` can touch a segment in two ways.
//!
//! ```text
//!        offset line (+r)  ─────────────
//!   ●──────────────▶      ●━━━━━━━━━━━━━●   segment
//!        offset line (-r)  ─────────────
//! ```
//!
//! - its center crosses one of the two lines parallel to the segment at
//!   distance `r` (an interior contact), or
//! - its boundary becomes tangent to one of the segment's endpoints (a
//!   vertex contact, computed by circle tangency along the path).
//!
//! The nearest candidate to `start` wins and the rest of the step is mirrored
//! about the surface at the contact.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::line::{Segment, project_point_onto_line};
use super::select::select_best;
use super::vector::VecExt;
use crate::consts::EPSILON;

/// Which end of a segment a vertex contact touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Endpoint {
    Start,
    End,
}

/// What part of the segment produced a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactSource {
    /// Ball center crossed a line offset by `r` from the segment
    Interior,
    /// Ball boundary became tangent to a segment endpoint
    Endpoint(Endpoint),
    /// Ball started the step inside the segment's `r` margin and is moving
    /// toward it
    Embedded,
}

/// A resolved contact between a moving ball and a segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Ball center at the instant of contact
    pub center: DVec2,
    /// Point on the segment that is touched
    pub point: DVec2,
    /// Where the ball ends up if the remaining displacement is mirrored off
    /// the contact surface (after restitution)
    pub reflected_end: DVec2,
    /// Unit direction of the surface the ball reflects off
    pub surface: DVec2,
    pub source: ContactSource,
    /// Distance travelled from the step start to `center`
    pub distance: f64,
}

impl Contact {
    /// Displacement still to travel after the bounce
    #[inline]
    pub fn remaining(&self) -> DVec2 {
        self.reflected_end - self.center
    }
}

/// A contact candidate before the reflection is computed
#[derive(Debug, Clone, Copy)]
struct Candidate {
    center: DVec2,
    point: DVec2,
    surface: DVec2,
    source: ContactSource,
    distance: f64,
}

/// Earliest contact of a ball moving `start -> end` with `segment`
///
/// `None` when the ball does not touch the segment during this step.
pub fn ball_segment_contact(
    start: DVec2,
    end: DVec2,
    radius: f64,
    segment: &Segment,
    restitution: f64,
) -> Option<Contact> {
    let path = end - start;

    if segment.distance_to(start) <= radius + EPSILON {
        // Already inside the margin: no approach contacts, the ball bounces
        // in place off the perpendicular foot while it is closing in
        let normal = segment.unit().perpendicular();
        let foot = project_point_onto_line(start, normal, segment.start, segment.end)?;
        if !foot.on_segment || path.dot(foot.intersection - start) <= 0.0 {
            return None;
        }
        let surface = segment.unit();
        log::trace!("embedded contact at {} (foot {})", start, foot.intersection);
        return Some(Contact {
            center: start,
            point: foot.intersection,
            reflected_end: reflect_remaining(start, end, surface, restitution),
            surface,
            source: ContactSource::Embedded,
            distance: 0.0,
        });
    }

    // Fixed evaluation order: endpoint start, endpoint end, offset +, offset -
    let candidates = [
        vertex_candidate(start, end, radius, segment.start, Endpoint::Start),
        vertex_candidate(start, end, radius, segment.end, Endpoint::End),
        offset_candidate(start, end, radius, segment, 1.0),
        offset_candidate(start, end, radius, segment, -1.0),
    ];

    let best = select_best(candidates, Option::is_some, |a, b| match (a, b) {
        (Some(a), Some(b)) => a.distance < b.distance,
        _ => false,
    })
    .flatten()?;

    log::trace!(
        "{:?} contact at {} touching {} ({:.4} along path)",
        best.source,
        best.center,
        best.point,
        best.distance
    );

    Some(Contact {
        center: best.center,
        point: best.point,
        reflected_end: reflect_remaining(best.center, end, best.surface, restitution),
        surface: best.surface,
        source: best.source,
        distance: best.distance,
    })
}

/// Center of the circle swept along `start -> end` that is first tangent to
/// `vertex`, if that happens within the step
///
/// The perpendicular from `vertex` onto the path has length `d`; when
/// `d < r` the tangent center sits `sqrt(r² - d²)` back along the path from
/// the perpendicular foot.
pub fn vertex_tangency(start: DVec2, end: DVec2, radius: f64, vertex: DVec2) -> Option<DVec2> {
    let path = end - start;
    let along = path.normalize_or_zero();
    if along == DVec2::ZERO {
        return None;
    }

    let foot = project_point_onto_line(vertex, along.perpendicular(), start, end)?;
    let d = foot.distance;
    if d >= radius {
        return None;
    }

    let center = foot.intersection - along * (radius * radius - d * d).sqrt();
    let to_center = center - start;
    if along.dot(to_center) > 0.0 && to_center.length() <= path.length() + EPSILON {
        Some(center)
    } else {
        None
    }
}

fn vertex_candidate(
    start: DVec2,
    end: DVec2,
    radius: f64,
    vertex: DVec2,
    which: Endpoint,
) -> Option<Candidate> {
    let center = vertex_tangency(start, end, radius, vertex)?;
    Some(Candidate {
        center,
        point: vertex,
        // Tangent to the ball at the touched vertex
        surface: (vertex - center).normalize_or_zero().perpendicular(),
        source: ContactSource::Endpoint(which),
        distance: start.distance(center),
    })
}

/// Crossing of the path with the segment shifted by `side * r` along its normal
fn offset_candidate(
    start: DVec2,
    end: DVec2,
    radius: f64,
    segment: &Segment,
    side: f64,
) -> Option<Candidate> {
    let along = segment.unit();
    if along == DVec2::ZERO {
        return None;
    }

    let shift = along.perpendicular() * (radius * side);
    let offset = segment.offset(shift);
    let hit = project_point_onto_line(start, end - start, offset.start, offset.end)?;
    if !(hit.on_path && hit.on_segment) {
        return None;
    }

    Some(Candidate {
        center: hit.intersection,
        point: hit.intersection - shift,
        surface: along,
        source: ContactSource::Interior,
        distance: hit.distance,
    })
}

/// Mirror the displacement `center -> end` about the unit `surface` direction
///
/// Restitution scales the whole displacement before mirroring, so a value of
/// 1 preserves the remaining distance exactly.
pub fn reflect_remaining(center: DVec2, end: DVec2, surface: DVec2, restitution: f64) -> DVec2 {
    let remaining = (end - center) * restitution;
    let along = surface * remaining.dot(surface);
    center + along * 2.0 - remaining
}
