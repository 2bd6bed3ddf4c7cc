//! Ball-vs-ball collision
//!
//! Both balls move linearly over the step, `a_start + t*v` and
//! `b_start + t*u` for `t` in `[0, 1]`. Their squared center distance is
//! quadratic in `t`; solving `|s + t*w|² = (r1 + r2)²` with `s = b_start -
//! a_start` and `w = u - v` gives the time of impact.

use glam::DVec2;

use super::ball::Ball;
use crate::approx_eq;
use crate::within;

/// Outcome of a ball-ball impact within one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallCollision {
    /// Fraction of the step at which the balls touch
    pub toi: f64,
    pub center_a: DVec2,
    pub center_b: DVec2,
    /// Touching point on the line of centers
    pub contact_point: DVec2,
    /// End of step for ball A after the impact
    pub reflected_end_a: DVec2,
    /// End of step for ball B after the impact
    pub reflected_end_b: DVec2,
    /// Post-impact per-step velocity of A
    pub vel_a: DVec2,
    /// Post-impact per-step velocity of B
    pub vel_b: DVec2,
}

impl BallCollision {
    /// Displacement A still travels this step after the impact
    #[inline]
    pub fn remaining_a(&self) -> DVec2 {
        self.reflected_end_a - self.center_a
    }

    #[inline]
    pub fn remaining_b(&self) -> DVec2 {
        self.reflected_end_b - self.center_b
    }
}

/// Earliest impact of ball A (`a_start -> a_end`, radius `r1`, mass `m1`)
/// with ball B (`b_start -> b_end`, `r2`, `m2`) during the step
///
/// Velocities are exchanged elastically along the line of centers; the
/// tangential components are kept. Returns `None` when the balls never
/// reach contact distance in `[0, 1]`, when their relative motion is zero,
/// or when they are separating at the root.
#[allow(clippy::too_many_arguments)]
pub fn ball_ball_collision(
    a_start: DVec2,
    a_end: DVec2,
    r1: f64,
    m1: f64,
    b_start: DVec2,
    b_end: DVec2,
    r2: f64,
    m2: f64,
) -> Option<BallCollision> {
    let v = a_end - a_start;
    let u = b_end - b_start;
    let w = u - v;
    let s = b_start - a_start;
    let reach = r1 + r2;

    // a t² + 2b t + c = 0
    let a = w.length_squared();
    let b = w.dot(s);
    let c = s.length_squared() - reach * reach;

    if approx_eq(a, 0.0) {
        return None;
    }
    let disc = b * b - a * c;
    if disc < 0.0 {
        return None;
    }

    let root = disc.sqrt();
    let t1 = (-b - root) / a;
    let t2 = (-b + root) / a;
    let t = [t1, t2]
        .into_iter()
        .filter(|t| within(*t, 0.0, 1.0))
        .reduce(f64::min)?
        .clamp(0.0, 1.0);

    // Closing speed along the line of centers must be positive
    if (s + w * t).dot(w) >= 0.0 {
        return None;
    }

    let center_a = a_start + v * t;
    let center_b = b_start + u * t;
    let contact_point = center_a + (center_b - center_a) * (r1 / reach);

    let normal = (center_b - center_a).normalize_or_zero();
    let va = v.dot(normal);
    let vb = u.dot(normal);
    let total = m1 + m2;
    let va_after = ((m1 - m2) * va + 2.0 * m2 * vb) / total;
    let vb_after = ((m2 - m1) * vb + 2.0 * m1 * va) / total;

    let vel_a = v + normal * (va_after - va);
    let vel_b = u + normal * (vb_after - vb);
    let left = 1.0 - t;

    Some(BallCollision {
        toi: t,
        center_a,
        center_b,
        contact_point,
        reflected_end_a: center_a + vel_a * left,
        reflected_end_b: center_b + vel_b * left,
        vel_a,
        vel_b,
    })
}

/// Collision between two balls for their current step, if any
///
/// Balls that already overlap at the start of the step are left alone.
pub fn collide_balls(a: &Ball, b: &Ball) -> Option<BallCollision> {
    if a.pos.distance(b.pos) < a.radius() + b.radius() {
        return None;
    }
    ball_ball_collision(
        a.pos,
        a.destination(),
        a.radius(),
        a.mass(),
        b.pos,
        b.destination(),
        b.radius(),
        b.mass(),
    )
}

/// Resolve one pair: both balls jump to their post-impact end of step and
/// take their new velocities
pub fn resolve_ball_pair(a: &mut Ball, b: &mut Ball) -> Option<BallCollision> {
    let hit = collide_balls(a, b)?;
    a.pos = hit.reflected_end_a;
    a.vel = hit.vel_a;
    b.pos = hit.reflected_end_b;
    b.vel = hit.vel_b;
    Some(hit)
}

/// A collision found during a pair pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairHit {
    pub a: usize,
    pub b: usize,
    pub collision: BallCollision,
}

/// Result of a pair pass over a ball list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairPass {
    /// Displacement each ball still has to travel this step
    pub remaining: Vec<DVec2>,
    pub hits: Vec<PairHit>,
}

/// Resolve ball-ball impacts for every unordered pair `(i, j)`, `i < j`
///
/// A ball takes part in at most one impact per step. Colliding balls are
/// left at their contact centers with their new velocities; the rest of
/// their step is returned in `remaining` for the wall pass to consume.
pub fn resolve_ball_pairs(balls: &mut [Ball]) -> PairPass {
    let mut pass = PairPass {
        remaining: balls.iter().map(|b| b.vel).collect(),
        hits: Vec::new(),
    };
    let mut resolved = vec![false; balls.len()];

    for i in 0..balls.len() {
        for j in (i + 1)..balls.len() {
            if resolved[i] || resolved[j] {
                continue;
            }
            let (a, b) = pair_mut(balls, i, j);
            let Some(collision) = collide_balls(a, b) else {
                continue;
            };

            log::debug!(
                "Balls {} and {} collide at t={:.4} ({})",
                i,
                j,
                collision.toi,
                collision.contact_point
            );

            a.pos = collision.center_a;
            a.vel = collision.vel_a;
            b.pos = collision.center_b;
            b.vel = collision.vel_b;
            pass.remaining[i] = collision.remaining_a();
            pass.remaining[j] = collision.remaining_b();
            resolved[i] = true;
            resolved[j] = true;
            pass.hits.push(PairHit {
                a: i,
                b: j,
                collision,
            });
        }
    }

    pass
}

/// Two distinct mutable balls, `i < j`
fn pair_mut(balls: &mut [Ball], i: usize, j: usize) -> (&mut Ball, &mut Ball) {
    let (lo, hi) = balls.split_at_mut(j);
    (&mut lo[i], &mut hi[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn ball(x: f64, y: f64, vx: f64, vy: f64, r: f64) -> Ball {
        Ball::new(DVec2::new(x, y), DVec2::new(vx, vy), r).unwrap()
    }

    #[test]
    fn test_equal_mass_head_on_transfer() {
        let mut a = ball(0.0, 0.0, 20.0, 0.0, 10.0);
        let mut b = ball(30.0, 0.0, 0.0, 0.0, 10.0);
        assert_eq!(a.mass(), 100.0);

        let hit = resolve_ball_pair(&mut a, &mut b).unwrap();
        assert!((hit.toi - 0.5).abs() < TOL);
        assert!((hit.center_a - DVec2::new(10.0, 0.0)).length() < TOL);
        assert!((hit.center_b - DVec2::new(30.0, 0.0)).length() < TOL);
        assert!((hit.center_a.distance(hit.center_b) - 20.0).abs() < TOL);
        assert!((hit.contact_point - DVec2::new(20.0, 0.0)).length() < TOL);

        assert!(a.vel.length() < TOL);
        assert!((b.vel - DVec2::new(20.0, 0.0)).length() < TOL);
        assert!((a.pos - DVec2::new(10.0, 0.0)).length() < TOL);
        assert!((b.pos - DVec2::new(40.0, 0.0)).length() < TOL);
    }

    #[test]
    fn test_contact_point_weighted_by_radius() {
        let hit = ball_ball_collision(
            DVec2::ZERO,
            DVec2::new(40.0, 0.0),
            10.0,
            1.0,
            DVec2::new(50.0, 0.0),
            DVec2::new(50.0, 0.0),
            30.0,
            1.0,
        )
        .unwrap();
        // Centers 40 apart at contact, touching point 10 from A
        assert!((hit.center_a - DVec2::new(10.0, 0.0)).length() < TOL);
        assert!((hit.contact_point - DVec2::new(20.0, 0.0)).length() < TOL);
    }

    #[test]
    fn test_momentum_conserved_unequal_masses() {
        let a = Ball::with_mass(DVec2::ZERO, DVec2::new(30.0, 5.0), 5.0, 3.0).unwrap();
        let b = Ball::with_mass(DVec2::new(25.0, 4.0), DVec2::new(-10.0, 0.0), 8.0, 7.0).unwrap();
        let before = a.momentum() + b.momentum();

        let hit = collide_balls(&a, &b).unwrap();
        let after = hit.vel_a * 3.0 + hit.vel_b * 7.0;
        assert!((before - after).length() < 1e-7);

        // Elastic: kinetic energy kept
        let ke = |m: f64, v: DVec2| 0.5 * m * v.length_squared();
        let ke_before = ke(3.0, a.vel) + ke(7.0, b.vel);
        let ke_after = ke(3.0, hit.vel_a) + ke(7.0, hit.vel_b);
        assert!((ke_before - ke_after).abs() < 1e-6);
    }

    #[test]
    fn test_miss_and_parallel_motion() {
        // Passing well clear
        let a = ball(0.0, 0.0, 20.0, 0.0, 5.0);
        let b = ball(10.0, 50.0, 0.0, 0.0, 5.0);
        assert!(collide_balls(&a, &b).is_none());

        // Same velocity: no relative motion
        let a = ball(0.0, 0.0, 20.0, 0.0, 5.0);
        let b = ball(15.0, 0.0, 20.0, 0.0, 5.0);
        assert!(collide_balls(&a, &b).is_none());

        // Too short to reach
        let a = ball(0.0, 0.0, 5.0, 0.0, 5.0);
        let b = ball(30.0, 0.0, 0.0, 0.0, 5.0);
        assert!(collide_balls(&a, &b).is_none());
    }

    #[test]
    fn test_touching_but_separating_is_not_a_collision() {
        let a = ball(0.0, 0.0, -5.0, 0.0, 5.0);
        let b = ball(10.0, 0.0, 5.0, 0.0, 5.0);
        assert!(collide_balls(&a, &b).is_none());

        // Touching and approaching collides immediately
        let a = ball(0.0, 0.0, 5.0, 0.0, 5.0);
        let b = ball(10.0, 0.0, 0.0, 0.0, 5.0);
        let hit = collide_balls(&a, &b).unwrap();
        assert!(hit.toi.abs() < TOL);
    }

    #[test]
    fn test_overlapping_balls_skipped() {
        let a = ball(0.0, 0.0, 5.0, 0.0, 5.0);
        let b = ball(6.0, 0.0, 0.0, 0.0, 5.0);
        assert!(collide_balls(&a, &b).is_none());
    }

    #[test]
    fn test_glancing_blow_keeps_tangential() {
        // B offset vertically: impact normal not along the motion
        let a = ball(0.0, 0.0, 30.0, 0.0, 5.0);
        let b = ball(20.0, 6.0, 0.0, 0.0, 5.0);
        let hit = collide_balls(&a, &b).unwrap();
        let n = (hit.center_b - hit.center_a).normalize();
        let t = DVec2::new(-n.y, n.x);
        // Equal masses: A keeps its tangential part, B takes the normal part
        assert!((hit.vel_a.dot(t) - a.vel.dot(t)).abs() < 1e-9);
        assert!(hit.vel_a.dot(n).abs() < 1e-9);
        assert!((hit.vel_b.dot(n) - a.vel.dot(n)).abs() < 1e-9);
        assert!(hit.vel_b.dot(t).abs() < 1e-9);
    }

    #[test]
    fn test_pair_pass_resolves_each_ball_once() {
        let mut balls = vec![
            ball(0.0, 0.0, 20.0, 0.0, 10.0),
            ball(30.0, 0.0, 0.0, 0.0, 10.0),
            ball(60.0, 0.0, -20.0, 0.0, 10.0),
        ];
        let pass = resolve_ball_pairs(&mut balls);

        // 0 hits 1; ball 1 is then out of the pass, so (1, 2) is skipped
        assert_eq!(pass.hits.len(), 1);
        assert_eq!((pass.hits[0].a, pass.hits[0].b), (0, 1));
        assert!((balls[0].pos - DVec2::new(10.0, 0.0)).length() < TOL);
        assert!((pass.remaining[0]).length() < TOL);
        assert!((pass.remaining[1] - DVec2::new(10.0, 0.0)).length() < TOL);
        assert_eq!(pass.remaining[2], DVec2::new(-20.0, 0.0));
        assert_eq!(balls[2].pos, DVec2::new(60.0, 0.0));
    }
}
