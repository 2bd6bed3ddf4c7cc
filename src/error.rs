//! Engine errors
//!
//! Only construction and configuration can fail. Geometric queries return
//! `Option` instead: "no contact" is a normal answer, not an error.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("ball radius must be positive and finite, got {0}")]
    InvalidRadius(f64),
    #[error("ball mass must be positive and finite, got {0}")]
    InvalidMass(f64),
    #[error("restitution must lie in (0, 1], got {0}")]
    InvalidRestitution(f64),
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("settings JSON: {0}")]
    Config(#[from] serde_json::Error),
}
