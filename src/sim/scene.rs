//! Seeded scene generation
//!
//! Same seed and parameters always build the same world.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::wall::Wall;
use super::world::World;
use crate::consts::CIRCLE_WALL_STEP_DEG;
use crate::error::EngineError;
use crate::settings::EngineSettings;

/// Placement attempts per ball before giving up on it
const MAX_PLACEMENT_TRIES: u32 = 64;

/// Clearance kept between spawned balls and anything else
const SPAWN_GAP: f64 = 1.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneParams {
    /// Arena lower-left corner
    pub min: DVec2,
    /// Arena upper-right corner
    pub max: DVec2,
    pub ball_count: usize,
    pub min_radius: f64,
    pub max_radius: f64,
    /// Upper bound on per-step speed
    pub max_speed: f64,
    /// Put a circular obstacle in the middle of the arena
    pub obstacle: bool,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            min: DVec2::ZERO,
            max: DVec2::new(800.0, 600.0),
            ball_count: 12,
            min_radius: 8.0,
            max_radius: 24.0,
            max_speed: 12.0,
            obstacle: true,
        }
    }
}

impl SceneParams {
    /// Radius of the central obstacle
    pub fn obstacle_radius(&self) -> f64 {
        let size = self.max - self.min;
        size.x.min(size.y) * 0.15
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }
}

/// Uniform sample in `[lo, hi)`, or `lo` for an empty range
fn sample(rng: &mut Pcg32, lo: f64, hi: f64) -> f64 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

/// Build a world from `seed`
///
/// Balls never overlap each other, the arena margin or the obstacle. A ball
/// that cannot be placed after a few tries is skipped.
pub fn random_scene(
    seed: u64,
    params: &SceneParams,
    settings: EngineSettings,
) -> Result<World, EngineError> {
    if !(params.min_radius > 0.0) {
        return Err(EngineError::InvalidRadius(params.min_radius));
    }

    let mut rng = Pcg32::seed_from_u64(seed);
    let mut world = World::new(settings)?;

    world.add_wall(Wall::rectangle(params.min, params.max));
    if params.obstacle {
        world.add_wall(Wall::circle(
            params.center(),
            params.obstacle_radius(),
            CIRCLE_WALL_STEP_DEG,
        ));
    }

    for i in 0..params.ball_count {
        let radius = sample(&mut rng, params.min_radius, params.max_radius);
        let lo = params.min + DVec2::splat(radius + SPAWN_GAP);
        let hi = params.max - DVec2::splat(radius + SPAWN_GAP);

        let mut placed = None;
        for _ in 0..MAX_PLACEMENT_TRIES {
            let pos = DVec2::new(sample(&mut rng, lo.x, hi.x), sample(&mut rng, lo.y, hi.y));
            if fits(&world, params, pos, radius) {
                placed = Some(pos);
                break;
            }
        }

        let Some(pos) = placed else {
            log::warn!("Scene {}: no room for ball {} (r={:.1})", seed, i, radius);
            continue;
        };

        let angle = sample(&mut rng, 0.0, std::f64::consts::TAU);
        let speed = sample(&mut rng, 0.0, params.max_speed);
        let vel = DVec2::from_angle(angle) * speed;
        world.spawn_ball(pos, vel, radius)?;
    }

    log::info!(
        "Scene {}: {} balls, {} walls",
        seed,
        world.balls.len(),
        world.walls.len()
    );
    Ok(world)
}

fn fits(world: &World, params: &SceneParams, pos: DVec2, radius: f64) -> bool {
    if params.obstacle
        && pos.distance(params.center()) < params.obstacle_radius() + radius + SPAWN_GAP
    {
        return false;
    }
    world
        .balls
        .iter()
        .all(|b| pos.distance(b.pos) >= b.radius() + radius + SPAWN_GAP)
}
