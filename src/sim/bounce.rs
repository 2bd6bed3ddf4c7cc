//! Ball-vs-walls resolution for one step
//!
//! ```text
//! MOVING ─▶ TESTING ──contact──▶ REFLECTED ─┐
//!              ▲                             │
//!              └─────────────────────────────┘
//!           TESTING ──no contact──▶ DONE (pos += remaining)
//! ```
//!
//! Each bounce leaves the ball at the contact center with the mirrored
//! remainder of its displacement, which is tested again against every edge.
//! The number of bounces per step is capped by `max_reflections`.

use glam::DVec2;

use super::ball::Ball;
use super::contact::{Contact, ball_segment_contact, reflect_remaining};
use super::select::select_best;
use super::wall::Wall;
use crate::settings::EngineSettings;

/// A contact together with the edge that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallHit {
    pub contact: Contact,
    /// Index into the wall slice
    pub wall: usize,
    /// Edge index within that wall
    pub edge: usize,
}

/// What happened to a ball during one wall pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WallOutcome {
    /// Every bounce, in order
    pub hits: Vec<WallHit>,
    /// The reflection bound was reached before the displacement was used up
    pub truncated: bool,
}

impl WallOutcome {
    pub fn bounces(&self) -> usize {
        self.hits.len()
    }
}

/// Nearest contact of a ball moving `start -> end` across all edges of all walls
///
/// Edges are scanned wall by wall in order; on equal distance the first edge wins.
pub fn nearest_wall_contact(
    start: DVec2,
    end: DVec2,
    radius: f64,
    walls: &[Wall],
    restitution: f64,
) -> Option<WallHit> {
    let hits = walls.iter().enumerate().flat_map(|(wi, wall)| {
        wall.edges().enumerate().filter_map(move |(ei, edge)| {
            ball_segment_contact(start, end, radius, &edge, restitution).map(|contact| WallHit {
                contact,
                wall: wi,
                edge: ei,
            })
        })
    });

    select_best(hits, |_| true, |a, b| a.contact.distance < b.contact.distance)
}

/// Move `ball` by its velocity for one step, bouncing off `walls`
pub fn resolve_ball_walls(ball: &mut Ball, walls: &[Wall], settings: &EngineSettings) -> WallOutcome {
    let displacement = ball.vel;
    resolve_ball_walls_by(ball, displacement, walls, settings)
}

/// Move `ball` by an explicit `displacement`, bouncing off `walls`
///
/// Used when part of the step was already consumed elsewhere (a ball-ball
/// impact). The ball's velocity is mirrored with each bounce and scaled by
/// the restitution factor; its position ends at the end of the last leg.
pub fn resolve_ball_walls_by(
    ball: &mut Ball,
    displacement: DVec2,
    walls: &[Wall],
    settings: &EngineSettings,
) -> WallOutcome {
    let mut outcome = WallOutcome::default();
    let mut remaining = displacement;
    let restitution = settings.restitution;

    loop {
        if outcome.hits.len() >= settings.max_reflections as usize {
            log::warn!(
                "Ball at {} hit the reflection bound ({}), {:.4} of displacement dropped",
                ball.pos,
                settings.max_reflections,
                remaining.length()
            );
            outcome.truncated = true;
            break;
        }

        let end = ball.pos + remaining;
        let Some(hit) = nearest_wall_contact(ball.pos, end, ball.radius(), walls, restitution)
        else {
            ball.pos = end;
            break;
        };

        let contact = hit.contact;
        log::debug!(
            "Bounce {} off wall {} edge {} ({:?}) at {}",
            outcome.hits.len() + 1,
            hit.wall,
            hit.edge,
            contact.source,
            contact.center
        );

        ball.pos = contact.center;
        ball.vel = reflect_remaining(DVec2::ZERO, ball.vel, contact.surface, restitution);
        remaining = contact.remaining();
        outcome.hits.push(hit);
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::contact::ContactSource;

    const TOL: f64 = 1e-9;

    fn ball(x: f64, y: f64, vx: f64, vy: f64, r: f64) -> Ball {
        Ball::new(DVec2::new(x, y), DVec2::new(vx, vy), r).unwrap()
    }

    #[test]
    fn test_zero_displacement_is_noop() {
        let walls = vec![Wall::segment(DVec2::new(10.0, -50.0), DVec2::new(10.0, 50.0))];
        let mut b = ball(0.0, 0.0, 0.0, 0.0, 5.0);
        let outcome = resolve_ball_walls(&mut b, &walls, &EngineSettings::default());
        assert_eq!(b.pos, DVec2::ZERO);
        assert_eq!(b.vel, DVec2::ZERO);
        assert_eq!(outcome.bounces(), 0);

        // Also inside the margin
        let mut b = ball(6.0, 0.0, 0.0, 0.0, 5.0);
        resolve_ball_walls(&mut b, &walls, &EngineSettings::default());
        assert_eq!(b.pos, DVec2::new(6.0, 0.0));
    }

    #[test]
    fn test_free_flight_without_walls() {
        let mut b = ball(1.0, 2.0, 3.0, 4.0, 1.0);
        let outcome = resolve_ball_walls(&mut b, &[], &EngineSettings::default());
        assert_eq!(b.pos, DVec2::new(4.0, 6.0));
        assert_eq!(b.vel, DVec2::new(3.0, 4.0));
        assert!(!outcome.truncated);
    }

    #[test]
    fn test_single_bounce_vertical_wall() {
        let walls = vec![Wall::segment(DVec2::new(10.0, -50.0), DVec2::new(10.0, 50.0))];
        let mut b = ball(0.0, 0.0, 20.0, 0.0, 5.0);
        let outcome = resolve_ball_walls(&mut b, &walls, &EngineSettings::default());

        assert_eq!(outcome.bounces(), 1);
        let contact = outcome.hits[0].contact;
        assert!((contact.center - DVec2::new(5.0, 0.0)).length() < TOL);
        assert!((contact.point - DVec2::new(10.0, 0.0)).length() < TOL);
        // 5 consumed on the way in, 15 travelled back
        assert!((b.pos - DVec2::new(-10.0, 0.0)).length() < TOL);
        assert!((b.vel - DVec2::new(-20.0, 0.0)).length() < TOL);
    }

    #[test]
    fn test_restitution_slows_ball() {
        let walls = vec![Wall::segment(DVec2::new(10.0, -50.0), DVec2::new(10.0, 50.0))];
        let settings = EngineSettings::with_restitution(0.5).unwrap();
        let mut b = ball(0.0, 0.0, 20.0, 0.0, 5.0);
        resolve_ball_walls(&mut b, &walls, &settings);
        assert!((b.pos - DVec2::new(-2.5, 0.0)).length() < TOL);
        assert!((b.vel - DVec2::new(-10.0, 0.0)).length() < TOL);
    }

    #[test]
    fn test_multiple_bounces_in_corridor() {
        // Two parallel walls 20 apart, ball radius 2 travelling 50 in one step
        let walls = vec![
            Wall::segment(DVec2::new(10.0, -100.0), DVec2::new(10.0, 100.0)),
            Wall::segment(DVec2::new(-10.0, -100.0), DVec2::new(-10.0, 100.0)),
        ];
        let mut b = ball(0.0, 0.0, 50.0, 0.0, 2.0);
        let outcome = resolve_ball_walls(&mut b, &walls, &EngineSettings::default());

        // 8 to the right wall, 16 across, 16 back, 10 left over
        assert_eq!(outcome.bounces(), 3);
        assert_eq!(outcome.hits[0].wall, 0);
        assert_eq!(outcome.hits[1].wall, 1);
        assert_eq!(outcome.hits[2].wall, 0);
        assert!((b.pos - DVec2::new(-2.0, 0.0)).length() < TOL);
        assert!((b.vel - DVec2::new(-50.0, 0.0)).length() < TOL);
    }

    #[test]
    fn test_reflection_bound_truncates() {
        let walls = vec![
            Wall::segment(DVec2::new(10.0, -100.0), DVec2::new(10.0, 100.0)),
            Wall::segment(DVec2::new(-10.0, -100.0), DVec2::new(-10.0, 100.0)),
        ];
        let settings = EngineSettings {
            max_reflections: 2,
            ..EngineSettings::default()
        };
        let mut b = ball(0.0, 0.0, 50.0, 0.0, 2.0);
        let outcome = resolve_ball_walls(&mut b, &walls, &settings);
        assert!(outcome.truncated);
        assert_eq!(outcome.bounces(), 2);
        // Left at the last contact center
        assert!((b.pos - DVec2::new(-8.0, 0.0)).length() < TOL);
    }

    #[test]
    fn test_nearest_wall_across_walls() {
        let walls = vec![
            Wall::segment(DVec2::new(30.0, -50.0), DVec2::new(30.0, 50.0)),
            Wall::segment(DVec2::new(20.0, -50.0), DVec2::new(20.0, 50.0)),
        ];
        let hit =
            nearest_wall_contact(DVec2::ZERO, DVec2::new(100.0, 0.0), 5.0, &walls, 1.0).unwrap();
        assert_eq!(hit.wall, 1);
        assert!((hit.contact.center.x - 15.0).abs() < TOL);
    }

    #[test]
    fn test_polygon_corner_vertex_bounce() {
        // Ball aimed past a square corner hits the vertex
        let walls = vec![Wall::rectangle(DVec2::new(20.0, 0.0), DVec2::new(40.0, 20.0))];
        let mut b = ball(0.0, 22.0, 60.0, 0.0, 4.0);
        let outcome = resolve_ball_walls(&mut b, &walls, &EngineSettings::default());
        assert!(outcome.bounces() >= 1);
        assert!(matches!(
            outcome.hits[0].contact.source,
            ContactSource::Endpoint(_)
        ));
        assert_eq!(outcome.hits[0].contact.point, DVec2::new(20.0, 20.0));
        // Deflected upward, speed kept
        assert!(b.vel.y > 0.0);
        assert!((b.speed() - 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_ball_inside_box_stays_inside() {
        let walls = vec![Wall::rectangle(DVec2::ZERO, DVec2::new(100.0, 100.0))];
        let mut b = ball(50.0, 50.0, 37.0, -23.0, 5.0);
        for _ in 0..200 {
            resolve_ball_walls(&mut b, &walls, &EngineSettings::default());
            assert!(b.pos.x >= 5.0 - 1e-6 && b.pos.x <= 95.0 + 1e-6);
            assert!(b.pos.y >= 5.0 - 1e-6 && b.pos.y <= 95.0 + 1e-6);
        }
        assert!((b.speed() - (37.0_f64.powi(2) + 23.0_f64.powi(2)).sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_resting_ball_pushed_into_wall_bounces() {
        // Center exactly r from the wall, moving 3 toward it
        let walls = vec![Wall::segment(DVec2::new(10.0, -50.0), DVec2::new(10.0, 50.0))];
        let mut b = ball(5.0, 0.0, 3.0, 0.0, 5.0);
        let outcome = resolve_ball_walls(&mut b, &walls, &EngineSettings::default());

        assert_eq!(outcome.bounces(), 1);
        assert_eq!(outcome.hits[0].contact.source, ContactSource::Embedded);
        assert!((b.pos - DVec2::new(2.0, 0.0)).length() < TOL);
        assert!((b.vel - DVec2::new(-3.0, 0.0)).length() < TOL);
        assert!(walls[0].edge(0).unwrap().distance_to(b.pos) >= 5.0 - 1e-6);
    }

    #[test]
    fn test_near_tangent_graze_stays_outside_margin() {
        let walls = vec![Wall::segment(DVec2::new(-1000.0, 0.0), DVec2::new(1000.0, 0.0))];
        let edge = walls[0].edge(0).unwrap();

        // Within EPSILON of the margin, drifting in very slowly
        let mut b = ball(0.0, 5.0 + 1e-9, 100.0, -1e-3, 5.0);
        let outcome = resolve_ball_walls(&mut b, &walls, &EngineSettings::default());
        assert_eq!(outcome.bounces(), 1);
        assert!(b.vel.y > 0.0);
        assert!(edge.distance_to(b.pos) >= 5.0 - 1e-6);

        // Exactly parallel on the margin: free flight
        let mut b = ball(0.0, 5.0, 100.0, 0.0, 5.0);
        let outcome = resolve_ball_walls(&mut b, &walls, &EngineSettings::default());
        assert_eq!(outcome.bounces(), 0);
        assert!((b.pos - DVec2::new(100.0, 5.0)).length() < TOL);
    }

    #[test]
    fn test_narrow_wedge_terminates_outside_margins() {
        // Thin triangle with its apex at the origin, ball fired at the apex
        let walls = vec![Wall::new(vec![
            DVec2::ZERO,
            DVec2::new(100.0, 5.0),
            DVec2::new(100.0, -5.0),
        ])];
        let settings = EngineSettings::default();
        let r = 1.0;
        let mut b = ball(80.0, 0.5, -400.0, 0.3, r);
        let speed = b.speed();

        for _ in 0..10 {
            let outcome = resolve_ball_walls(&mut b, &walls, &settings);
            assert!(outcome.bounces() <= settings.max_reflections as usize);
            assert_eq!(
                outcome.truncated,
                outcome.bounces() == settings.max_reflections as usize
            );
            for edge in walls[0].edges() {
                assert!(edge.distance_to(b.pos) >= r - 1e-6);
            }
            assert!(b.pos.x > 0.0 && b.pos.x < 100.0);
        }
        assert!((b.speed() - speed).abs() < 1e-6 * speed);
    }
}
