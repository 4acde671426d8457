use tracing::debug;

use crate::error::Result;
use crate::math::{Vector3, TOLERANCE};
use crate::tessellation::TriangleMesh;

/// Recomputes smooth per-vertex normals.
///
/// Each vertex normal is the normalized sum of the unnormalized normals of
/// its incident triangles, so larger triangles weigh more. Vertices with no
/// usable contribution get `+Z`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComputeNormals;

impl ComputeNormals {
    /// Creates the operation.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the operation, returning a copy of `mesh` with fresh normals.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh references vertices it does not have.
    pub fn execute(&self, mesh: &TriangleMesh) -> Result<TriangleMesh> {
        let mut out = mesh.clone();
        out.normals.clear();
        out.validate()?;

        let mut sums = vec![Vector3::zeros(); out.vertices.len()];
        for (face, tri) in out.indices.iter().enumerate() {
            let n = out.face_normal(face);
            for &i in tri {
                sums[i as usize] += n;
            }
        }

        let mut fallbacks = 0usize;
        out.normals = sums
            .into_iter()
            .map(|n| {
                n.try_normalize(TOLERANCE).unwrap_or_else(|| {
                    fallbacks += 1;
                    Vector3::z()
                })
            })
            .collect();

        debug!(vertices = out.vertices.len(), fallbacks, "computed vertex normals");
        Ok(out)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::Point3;

    #[test]
    fn flat_square_points_up() {
        let mesh = TriangleMesh {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            normals: Vec::new(),
            indices: vec![[0, 1, 2], [0, 2, 3]],
        };
        let out = ComputeNormals::new().execute(&mesh).unwrap();
        assert_eq!(out.normals.len(), 4);
        for n in &out.normals {
            assert_relative_eq!(*n, Vector3::z(), epsilon = 1e-12);
        }
    }

    #[test]
    fn larger_faces_dominate() {
        // A vertex shared by a big +Z triangle and a small +X triangle.
        let mesh = TriangleMesh {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(10.0, 0.0, 0.0),
                Point3::new(0.0, 10.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
            ],
            normals: Vec::new(),
            indices: vec![[0, 1, 2], [0, 3, 4]],
        };
        let out = ComputeNormals::new().execute(&mesh).unwrap();
        assert!(out.normals[0].z > 0.99);
        assert_relative_eq!(out.normals[0].norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn isolated_vertex_gets_fallback() {
        let mesh = TriangleMesh {
            vertices: vec![Point3::origin()],
            normals: Vec::new(),
            indices: Vec::new(),
        };
        let out = ComputeNormals::new().execute(&mesh).unwrap();
        assert_eq!(out.normals, vec![Vector3::z()]);
    }

    #[test]
    fn rerunning_is_stable() {
        let mesh = TriangleMesh {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 1.0),
            ],
            normals: Vec::new(),
            indices: vec![[0, 1, 2]],
        };
        let once = ComputeNormals::new().execute(&mesh).unwrap();
        let twice = ComputeNormals::new().execute(&once).unwrap();
        assert_eq!(once, twice);
    }
}
