use tracing::debug;

use crate::error::Result;
use crate::tessellation::TriangleMesh;

use super::compact;

/// Drops triangles whose area is below a threshold, then any vertices they
/// leave unreferenced.
///
/// Normals are carried over for the surviving vertices.
#[derive(Debug, Clone, Copy)]
pub struct RemoveDegenerateFaces {
    min_area: f64,
}

impl Default for RemoveDegenerateFaces {
    fn default() -> Self {
        Self {
            min_area: Self::DEFAULT_MIN_AREA,
        }
    }
}

impl RemoveDegenerateFaces {
    /// Default area threshold in square model units.
    pub const DEFAULT_MIN_AREA: f64 = 1e-12;

    /// Creates the operation with an explicit area threshold.
    #[must_use]
    pub fn new(min_area: f64) -> Self {
        Self { min_area }
    }

    /// Executes the cleanup.
    ///
    /// # Errors
    ///
    /// Returns an error if the input mesh is malformed.
    pub fn execute(&self, mesh: &TriangleMesh) -> Result<TriangleMesh> {
        mesh.validate()?;

        let indices: Vec<[u32; 3]> = mesh
            .indices
            .iter()
            .enumerate()
            .filter(|(face, _)| mesh.face_normal(*face).norm() * 0.5 >= self.min_area)
            .map(|(_, tri)| *tri)
            .collect();

        let mut out = compact(&mesh.vertices, &indices);
        if mesh.has_normals() {
            let mut used = vec![false; mesh.vertices.len()];
            for tri in &indices {
                for &i in tri {
                    used[i as usize] = true;
                }
            }
            out.normals = mesh
                .normals
                .iter()
                .zip(used)
                .filter_map(|(n, keep)| keep.then_some(*n))
                .collect();
        }

        debug!(
            removed = mesh.indices.len() - out.indices.len(),
            min_area = self.min_area,
            "removed degenerate faces"
        );
        Ok(out)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point3, Vector3};

    #[test]
    fn sliver_is_removed_with_its_lone_vertex() {
        let mesh = TriangleMesh {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
            ],
            normals: vec![
                Vector3::z(),
                Vector3::z(),
                Vector3::z(),
                Vector3::x(),
            ],
            indices: vec![[0, 1, 2], [0, 1, 3]],
        };
        let out = RemoveDegenerateFaces::default().execute(&mesh).unwrap();
        assert_eq!(out.indices, vec![[0, 1, 2]]);
        assert_eq!(out.vertex_count(), 3);
        assert_eq!(out.normals, vec![Vector3::z(); 3]);
    }

    #[test]
    fn clean_mesh_is_untouched() {
        let mesh = TriangleMesh {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            normals: Vec::new(),
            indices: vec![[0, 1, 2]],
        };
        assert_eq!(RemoveDegenerateFaces::default().execute(&mesh).unwrap(), mesh);
    }
}
