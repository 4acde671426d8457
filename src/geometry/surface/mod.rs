mod tapered;
mod torsion;

pub use tapered::{TaperCutoffs, TaperedTorsion};
pub use torsion::{calculate_detail_2d, Torsion, TwistMode};

use crate::error::Result;
use crate::math::Point3;

/// Parameter domain for a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceDomain {
    /// Start of the U parameter range.
    pub u_min: f64,
    /// End of the U parameter range.
    pub u_max: f64,
    /// Start of the V parameter range.
    pub v_min: f64,
    /// End of the V parameter range.
    pub v_max: f64,
}

impl SurfaceDomain {
    /// Creates a new surface domain.
    #[must_use]
    pub fn new(u_min: f64, u_max: f64, v_min: f64, v_max: f64) -> Self {
        Self {
            u_min,
            u_max,
            v_min,
            v_max,
        }
    }

    /// The unit square `[0, 1] x [0, 1]`.
    #[must_use]
    pub fn unit() -> Self {
        Self::new(0.0, 1.0, 0.0, 1.0)
    }
}

/// Trait for parametric surfaces in 3D space.
pub trait Surface {
    /// Evaluates the surface at parameters `(u, v)`, returning the 3D point.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are out of range or evaluation fails.
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3>;

    /// Returns the parameter domain of the surface.
    fn domain(&self) -> SurfaceDomain;

    /// Whether `evaluate(u_min, v) == evaluate(u_max, v)` up to a grid shift in `v`.
    fn is_periodic_u(&self) -> bool;

    /// Whether `evaluate(u, v_min) == evaluate(u, v_max)`.
    fn is_periodic_v(&self) -> bool;
}
