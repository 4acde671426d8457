use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain};

/// A full circle in 3D space, used as the centre line of holder loops.
///
/// `P(t) = center + radius * cos(t) * ref_dir + radius * sin(t) * binormal`
/// where `binormal = normal x ref_dir`, `t` in `[0, 2*pi]`.
#[derive(Debug, Clone)]
pub struct Circle {
    center: Point3,
    radius: f64,
    normal: Vector3,
    ref_dir: Vector3,
}

impl Circle {
    /// Creates a new circle.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive, the normal or reference
    /// direction is zero-length, or the two are not perpendicular.
    pub fn new(center: Point3, radius: f64, normal: Vector3, ref_dir: Vector3) -> Result<Self> {
        if radius < TOLERANCE || !radius.is_finite() {
            return Err(GeometryError::Degenerate("circle radius must be positive".into()).into());
        }
        let normal = normal.try_normalize(TOLERANCE).ok_or(GeometryError::ZeroVector)?;
        let ref_dir = ref_dir.try_normalize(TOLERANCE).ok_or(GeometryError::ZeroVector)?;
        if normal.dot(&ref_dir).abs() > TOLERANCE {
            return Err(GeometryError::Degenerate(
                "reference direction must be perpendicular to normal".into(),
            )
            .into());
        }

        Ok(Self {
            center,
            radius,
            normal,
            ref_dir,
        })
    }

    /// The unit circle in the XY plane, starting on +X.
    #[must_use]
    pub fn unit() -> Self {
        Self {
            center: Point3::origin(),
            radius: 1.0,
            normal: Vector3::z(),
            ref_dir: Vector3::x(),
        }
    }

    fn binormal(&self) -> Vector3 {
        self.normal.cross(&self.ref_dir)
    }
}

impl Curve for Circle {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        let (sin_t, cos_t) = t.sin_cos();
        Ok(self.center + (self.ref_dir * cos_t + self.binormal() * sin_t) * self.radius)
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        let (sin_t, cos_t) = t.sin_cos();
        Ok(self.binormal() * cos_t - self.ref_dir * sin_t)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, std::f64::consts::TAU)
    }

    fn is_closed(&self) -> bool {
        true
    }
}
