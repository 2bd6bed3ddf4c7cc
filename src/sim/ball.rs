//! Ball state
//!
//! A ball's velocity is its displacement for one step: direction and speed
//! are both carried in the vector, never split.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::vector::VecExt;
use crate::error::EngineError;
use crate::settings::MassModel;

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: DVec2,
    /// Displacement per step
    pub vel: DVec2,
    radius: f64,
    mass: f64,
}

impl Ball {
    /// New ball with mass = radius²
    pub fn new(pos: DVec2, vel: DVec2, radius: f64) -> Result<Self, EngineError> {
        Self::with_model(pos, vel, radius, MassModel::Area)
    }

    /// New ball with an explicit mass
    pub fn with_mass(pos: DVec2, vel: DVec2, radius: f64, mass: f64) -> Result<Self, EngineError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(EngineError::InvalidRadius(radius));
        }
        if !(mass.is_finite() && mass > 0.0) {
            return Err(EngineError::InvalidMass(mass));
        }
        Ok(Self {
            pos,
            vel,
            radius,
            mass,
        })
    }

    /// New ball with mass derived by `model`
    pub fn with_model(
        pos: DVec2,
        vel: DVec2,
        radius: f64,
        model: MassModel,
    ) -> Result<Self, EngineError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(EngineError::InvalidRadius(radius));
        }
        Self::with_mass(pos, vel, radius, model.mass_for(radius))
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn set_radius(&mut self, radius: f64) -> Result<(), EngineError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(EngineError::InvalidRadius(radius));
        }
        self.radius = radius;
        Ok(())
    }

    pub fn set_mass(&mut self, mass: f64) -> Result<(), EngineError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(EngineError::InvalidMass(mass));
        }
        self.mass = mass;
        Ok(())
    }

    /// Where the ball would be after one unobstructed step
    #[inline]
    pub fn destination(&self) -> DVec2 {
        self.pos + self.vel
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.vel.length()
    }

    /// Unit direction of travel (zero when at rest)
    #[inline]
    pub fn direction(&self) -> DVec2 {
        self.vel.normalize_or_zero()
    }

    /// Change speed, keeping direction; negative speeds are ignored
    pub fn set_speed(&mut self, speed: f64) {
        if speed >= 0.0 {
            self.vel = self.vel.with_length(speed);
        }
    }

    /// Change direction, keeping speed
    pub fn set_direction(&mut self, dir: DVec2) {
        self.vel = dir.with_length(self.speed());
    }

    /// Momentum for one step
    #[inline]
    pub fn momentum(&self) -> DVec2 {
        self.vel * self.mass
    }
}
