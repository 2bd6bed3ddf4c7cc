//! Engine settings
//!
//! Loaded from JSON (or built in code) and validated before use.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_RESTITUTION, MAX_REFLECTIONS};
use crate::error::EngineError;

/// How a ball's mass is derived from its radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum MassModel {
    /// Mass = radius² (disc area as a 2D mass proxy)
    #[default]
    Area,
    /// Every ball has the same mass
    Uniform(f64),
}

impl MassModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            MassModel::Area => "area",
            MassModel::Uniform(_) => "uniform",
        }
    }

    /// Parse a model name; `uniform` defaults to unit mass
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "area" | "r2" => Some(MassModel::Area),
            "uniform" | "unit" => Some(MassModel::Uniform(1.0)),
            _ => None,
        }
    }

    /// Mass of a ball with the given radius
    pub fn mass_for(&self, radius: f64) -> f64 {
        match self {
            MassModel::Area => radius * radius,
            MassModel::Uniform(m) => *m,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Scale applied to the remaining displacement at each wall bounce (0 < e <= 1)
    pub restitution: f64,
    /// Upper bound on wall reflections for one ball in one step
    pub max_reflections: u32,
    /// Added to every ball's per-step displacement before collisions
    #[serde(default)]
    pub gravity: DVec2,
    /// Mass derivation for balls created through the settings
    #[serde(default)]
    pub mass_model: MassModel,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            restitution: DEFAULT_RESTITUTION,
            max_reflections: MAX_REFLECTIONS,
            gravity: DVec2::ZERO,
            mass_model: MassModel::Area,
        }
    }
}

impl EngineSettings {
    /// Settings with a custom restitution factor
    pub fn with_restitution(restitution: f64) -> Result<Self, EngineError> {
        let settings = Self {
            restitution,
            ..Self::default()
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.restitution > 0.0 && self.restitution <= 1.0) {
            return Err(EngineError::InvalidRestitution(self.restitution));
        }
        if self.max_reflections == 0 {
            return Err(EngineError::InvalidSettings(
                "max_reflections must be at least 1".into(),
            ));
        }
        if !self.gravity.is_finite() {
            return Err(EngineError::InvalidSettings(format!(
                "gravity must be finite, got {}",
                self.gravity
            )));
        }
        if let MassModel::Uniform(m) = self.mass_model {
            if !(m.is_finite() && m > 0.0) {
                return Err(EngineError::InvalidMass(m));
            }
        }
        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        log::debug!(
            "Loaded engine settings: restitution={}, max_reflections={}",
            settings.restitution,
            settings.max_reflections
        );
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
