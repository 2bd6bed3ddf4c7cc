//! Carom - swept-circle collision engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, contacts, resolvers, world step)
//! - `settings`: Engine configuration (restitution, reflection bound, gravity, mass model)
//! - `error`: Construction and configuration errors
//!
//! Balls move by a per-step displacement, never by wall-clock time. Each step
//! a ball is swept along its straight-line path, every contact along that path
//! is found and resolved, and the leftover displacement is tested again.

pub mod error;
pub mod settings;
pub mod sim;

pub use error::EngineError;
pub use settings::{EngineSettings, MassModel};

/// Engine constants
pub mod consts {
    /// Tolerance for every "on segment" / "parallel" / "inside margin" test
    pub const EPSILON: f64 = 1e-7;
    /// Maximum wall reflections resolved for one ball in one step
    pub const MAX_REFLECTIONS: u32 = 16;
    /// Perfectly elastic wall bounces
    pub const DEFAULT_RESTITUTION: f64 = 1.0;
    /// Vertex spacing used when approximating a circular wall (degrees)
    pub const CIRCLE_WALL_STEP_DEG: f64 = 15.0;
}

/// Equal as reals, within `EPSILON`
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < consts::EPSILON
}

/// True if `x` lies in `[lo, hi]`, widened by `EPSILON` on both ends
#[inline]
pub fn within(x: f64, lo: f64, hi: f64) -> bool {
    x >= lo - consts::EPSILON && x <= hi + consts::EPSILON
}
