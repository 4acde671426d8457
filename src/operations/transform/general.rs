use crate::error::{OperationError, Result};
use crate::math::transform::{transform_direction, transform_point};
use crate::math::{Matrix4, Vector3, TOLERANCE};
use crate::tessellation::TriangleMesh;

/// Applies an arbitrary 4x4 transformation matrix to a mesh.
pub struct GeneralTransform {
    matrix: Matrix4,
}

impl GeneralTransform {
    /// Creates a new `GeneralTransform` operation.
    #[must_use]
    pub fn new(matrix: Matrix4) -> Self {
        Self { matrix }
    }

    /// Returns the matrix applied by this operation.
    #[must_use]
    pub fn matrix(&self) -> &Matrix4 {
        &self.matrix
    }

    /// Executes the transformation, returning a transformed copy of `mesh`.
    ///
    /// Positions go through the full homogeneous matrix. Normals go through
    /// its linear part and are renormalized; a normal that collapses keeps
    /// `+Z`.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the matrix has non-finite
    /// entries.
    pub fn execute(&self, mesh: &TriangleMesh) -> Result<TriangleMesh> {
        if self.matrix.iter().any(|v| !v.is_finite()) {
            return Err(OperationError::InvalidInput("transform matrix must be finite".into()).into());
        }

        Ok(TriangleMesh {
            vertices: mesh
                .vertices
                .iter()
                .map(|p| transform_point(&self.matrix, p))
                .collect(),
            normals: mesh
                .normals
                .iter()
                .map(|n| {
                    transform_direction(&self.matrix, n)
                        .try_normalize(TOLERANCE)
                        .unwrap_or_else(Vector3::z)
                })
                .collect(),
            indices: mesh.indices.clone(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::Point3;

    fn unit_triangle() -> TriangleMesh {
        TriangleMesh {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            normals: vec![Vector3::z(); 3],
            indices: vec![[0, 1, 2]],
        }
    }

    #[test]
    fn identity_transform_preserves_mesh() {
        let mesh = unit_triangle();
        let out = GeneralTransform::new(Matrix4::identity()).execute(&mesh).unwrap();
        assert_eq!(out, mesh);
    }

    #[test]
    fn translation_shifts_vertices_but_not_normals() {
        let mut matrix = Matrix4::identity();
        matrix[(0, 3)] = 5.0;
        matrix[(1, 3)] = 3.0;
        matrix[(2, 3)] = 2.0;
        let out = GeneralTransform::new(matrix).execute(&unit_triangle()).unwrap();
        assert_relative_eq!(out.vertices[1], Point3::new(6.0, 3.0, 2.0), epsilon = 1e-12);
        assert_relative_eq!(out.normals[0], Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn scaling_renormalizes_normals() {
        let out = GeneralTransform::new(Matrix4::new_scaling(2.0))
            .execute(&unit_triangle())
            .unwrap();
        assert_relative_eq!(out.vertices[2], Point3::new(0.0, 2.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(out.normals[2].norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn non_finite_matrix_is_rejected() {
        let mut matrix = Matrix4::identity();
        matrix[(0, 0)] = f64::NAN;
        assert!(GeneralTransform::new(matrix).execute(&unit_triangle()).is_err());
    }
}
