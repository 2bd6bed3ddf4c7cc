//! Fixed step driver
//!
//! One step runs, in order: gravity, the ball-ball pair pass, then the
//! wall pass for every ball with whatever displacement it has left.
//! Resolver calls run one at a time and each holds the only mutable borrow
//! of the balls it is working on.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::bounce::resolve_ball_walls_by;
use super::pair::resolve_ball_pairs;
use super::wall::Wall;
use crate::error::EngineError;
use crate::settings::EngineSettings;

/// Counters for one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub step: u64,
    pub pair_collisions: usize,
    pub wall_bounces: usize,
    /// Balls that hit the reflection bound
    pub truncated: usize,
}

/// Balls, walls and settings for a running simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub balls: Vec<Ball>,
    pub walls: Vec<Wall>,
    settings: EngineSettings,
    /// Steps completed
    steps: u64,
}

impl World {
    pub fn new(settings: EngineSettings) -> Result<Self, EngineError> {
        settings.validate()?;
        Ok(Self {
            balls: Vec::new(),
            walls: Vec::new(),
            settings,
            steps: 0,
        })
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn add_wall(&mut self, wall: Wall) {
        self.walls.push(wall);
    }

    pub fn add_ball(&mut self, ball: Ball) {
        self.balls.push(ball);
    }

    /// Create a ball using the configured mass model
    pub fn spawn_ball(&mut self, pos: DVec2, vel: DVec2, radius: f64) -> Result<usize, EngineError> {
        let ball = Ball::with_model(pos, vel, radius, self.settings.mass_model)?;
        self.balls.push(ball);
        Ok(self.balls.len() - 1)
    }

    /// Total momentum of all balls
    pub fn momentum(&self) -> DVec2 {
        self.balls.iter().map(Ball::momentum).sum()
    }

    /// Advance the world by one step
    pub fn step(&mut self) -> StepReport {
        let gravity = self.settings.gravity;
        if gravity != DVec2::ZERO {
            for ball in &mut self.balls {
                ball.vel += gravity;
            }
        }

        let pass = resolve_ball_pairs(&mut self.balls);

        let mut report = StepReport {
            step: self.steps,
            pair_collisions: pass.hits.len(),
            ..StepReport::default()
        };

        for (ball, displacement) in self.balls.iter_mut().zip(pass.remaining) {
            let outcome = resolve_ball_walls_by(ball, displacement, &self.walls, &self.settings);
            report.wall_bounces += outcome.bounces();
            if outcome.truncated {
                report.truncated += 1;
            }
        }

        self.steps += 1;
        log::trace!(
            "Step {}: {} pair collisions, {} wall bounces",
            report.step,
            report.pair_collisions,
            report.wall_bounces
        );
        report
    }

    /// Run `n` steps, returning the summed counters
    pub fn run(&mut self, n: u64) -> StepReport {
        let mut total = StepReport::default();
        for _ in 0..n {
            let r = self.step();
            total.step = r.step;
            total.pair_collisions += r.pair_collisions;
            total.wall_bounces += r.wall_bounces;
            total.truncated += r.truncated;
        }
        total
    }
}
