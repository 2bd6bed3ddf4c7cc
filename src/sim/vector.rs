//! 2D vector helpers on top of `glam::DVec2`
//!
//! glam already covers add/sub/scale/dot/length/distance and
//! `normalize_or_zero`. The engine's geometry additionally needs a
//! clockwise perpendicular, clockwise rotation in degrees and length changes.

use glam::DVec2;

use crate::approx_eq;

pub trait VecExt {
    /// Rotate 90° clockwise: `(x, y) -> (y, -x)`
    fn perpendicular(self) -> Self;
    /// Rotate clockwise by `degrees`
    fn rotate_deg(self, degrees: f64) -> Self;
    /// Same direction, new length (zero stays zero)
    fn with_length(self, len: f64) -> Self;
    /// Component-wise equality within `EPSILON`
    fn approx_eq(self, other: Self) -> bool;
}

impl VecExt for DVec2 {
    #[inline]
    fn perpendicular(self) -> Self {
        DVec2::new(self.y, -self.x)
    }

    fn rotate_deg(self, degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        DVec2::new(cos * self.x + sin * self.y, -sin * self.x + cos * self.y)
    }

    #[inline]
    fn with_length(self, len: f64) -> Self {
        self.normalize_or_zero() * len
    }

    #[inline]
    fn approx_eq(self, other: Self) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y)
    }
}
