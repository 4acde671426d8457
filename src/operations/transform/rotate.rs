use crate::error::{OperationError, Result};
use crate::math::transform::rotation_matrix;
use crate::math::{Matrix4, Point3, Vector3, TOLERANCE};
use crate::tessellation::TriangleMesh;

use super::GeneralTransform;

/// Rotates a mesh around an axis.
pub struct Rotate {
    axis_origin: Point3,
    axis_direction: Vector3,
    angle: f64,
}

impl Rotate {
    /// Creates a new `Rotate` operation.
    ///
    /// * `angle` - Rotation angle in radians.
    #[must_use]
    pub fn new(axis_origin: Point3, axis_direction: Vector3, angle: f64) -> Self {
        Self {
            axis_origin,
            axis_direction,
            angle,
        }
    }

    /// The equivalent 4x4 matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if the axis direction is zero-length.
    pub fn matrix(&self) -> Result<Matrix4> {
        let len = self.axis_direction.norm();
        if len < TOLERANCE {
            return Err(
                OperationError::InvalidInput("rotation axis must be non-zero".into()).into(),
            );
        }
        let axis = self.axis_direction / len;

        // Translate to origin, rotate, translate back
        let t_neg = Matrix4::new_translation(&(-self.axis_origin.coords));
        let rot = rotation_matrix(&axis, self.angle);
        let t_pos = Matrix4::new_translation(&self.axis_origin.coords);
        Ok(t_pos * rot * t_neg)
    }

    /// Executes the rotation, returning the rotated mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if the axis direction is zero-length.
    pub fn execute(&self, mesh: &TriangleMesh) -> Result<TriangleMesh> {
        GeneralTransform::new(self.matrix()?).execute(mesh)
    }
}
