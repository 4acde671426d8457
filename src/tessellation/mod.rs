mod frame;
mod sweep_tube;
mod tessellate_surface;

pub use frame::{rotation_minimizing_frames, Frame};
pub use sweep_tube::SweepTube;
pub use tessellate_surface::TessellateSurface;

use std::collections::HashMap;

use crate::error::{OperationError, Result};
use crate::math::{Point3, Vector3};

/// A triangle mesh: the value handed to renderers and exporters.
///
/// Positions, normals and triangle indices live in separate buffers so they
/// can be uploaded as-is. `normals` is either empty (not yet computed) or
/// holds one entry per vertex.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` when normals have been computed for every vertex.
    #[must_use]
    pub fn has_normals(&self) -> bool {
        !self.vertices.is_empty() && self.normals.len() == self.vertices.len()
    }

    /// Appends another mesh, offsetting its indices past this mesh's vertices.
    ///
    /// Normals are kept only if both meshes carry them.
    #[allow(clippy::cast_possible_truncation)]
    pub fn merge(&mut self, other: &TriangleMesh) {
        let keep_normals = (self.vertices.is_empty() || self.has_normals()) && other.has_normals();
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        if keep_normals {
            self.normals.extend_from_slice(&other.normals);
        } else {
            self.normals.clear();
        }
        self.indices
            .extend(other.indices.iter().map(|t| [t[0] + offset, t[1] + offset, t[2] + offset]));
    }

    /// Unnormalized normal of triangle `face` (its length is twice the area).
    #[must_use]
    pub fn face_normal(&self, face: usize) -> Vector3 {
        let [a, b, c] = self.indices[face];
        let p0 = self.vertices[a as usize];
        let p1 = self.vertices[b as usize];
        let p2 = self.vertices[c as usize];
        (p1 - p0).cross(&(p2 - p0))
    }

    /// Checks the index buffer and normal buffer against the vertex buffer.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::Failed`] if an index is out of range or the
    /// normal buffer has the wrong length.
    pub fn validate(&self) -> Result<()> {
        let count = self.vertices.len();
        if let Some(tri) = self.indices.iter().find(|t| t.iter().any(|&i| i as usize >= count)) {
            return Err(OperationError::Failed(format!(
                "triangle {tri:?} references a vertex beyond {count}"
            ))
            .into());
        }
        if !self.normals.is_empty() && self.normals.len() != count {
            return Err(OperationError::Failed(format!(
                "{} normals for {count} vertices",
                self.normals.len()
            ))
            .into());
        }
        Ok(())
    }

    /// Counts how many triangles use each undirected edge.
    #[must_use]
    pub fn edge_use_counts(&self) -> HashMap<(u32, u32), usize> {
        let mut counts = HashMap::new();
        for tri in &self.indices {
            for k in 0..3 {
                let (a, b) = (tri[k], tri[(k + 1) % 3]);
                *counts.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Returns `true` if every edge is shared by exactly two triangles.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        !self.indices.is_empty() && self.edge_use_counts().values().all(|&n| n == 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tetrahedron() -> TriangleMesh {
        TriangleMesh {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
            ],
            normals: Vec::new(),
            indices: vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [0, 3, 2]],
        }
    }

    #[test]
    fn tetrahedron_is_closed() {
        assert!(tetrahedron().is_closed());
    }

    #[test]
    fn single_triangle_is_open() {
        let mut mesh = tetrahedron();
        mesh.indices.truncate(1);
        assert!(!mesh.is_closed());
    }

    #[test]
    fn merge_offsets_indices() {
        let mut a = tetrahedron();
        let b = tetrahedron();
        a.merge(&b);
        assert_eq!(a.vertex_count(), 8);
        assert_eq!(a.face_count(), 8);
        assert_eq!(a.indices[4], [4, 6, 5]);
        assert!(a.validate().is_ok());
    }

    #[test]
    fn merge_drops_partial_normals() {
        let mut a = tetrahedron();
        a.normals = vec![Vector3::z(); 4];
        a.merge(&tetrahedron());
        assert!(a.normals.is_empty());
    }

    #[test]
    fn face_normal_points_outward() {
        let mesh = tetrahedron();
        let n = mesh.face_normal(0);
        assert!(n.z < 0.0);
        assert!((n.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn validate_catches_bad_index() {
        let mut mesh = tetrahedron();
        mesh.indices.push([0, 1, 9]);
        assert!(mesh.validate().is_err());
    }
}
