use tracing::debug;

use crate::error::Result;
use crate::math::Matrix4;
use crate::tessellation::TriangleMesh;

use super::transform::GeneralTransform;

/// Concatenates meshes into one, optionally transforming each part first.
///
/// Parts keep their order: the vertices of part `n` follow those of parts
/// `0..n`, and its indices are offset accordingly. Vertices are never
/// welded across parts. Normals survive only if every part has them.
#[derive(Debug, Clone, Default)]
pub struct Compose {
    parts: Vec<(TriangleMesh, Option<Matrix4>)>,
}

impl Compose {
    /// Creates an empty composition.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a part with an optional placement transform.
    #[must_use]
    pub fn with_part(mut self, mesh: TriangleMesh, transform: Option<Matrix4>) -> Self {
        self.parts.push((mesh, transform));
        self
    }

    /// Number of parts queued.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns `true` if no parts are queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Executes the composition.
    ///
    /// # Errors
    ///
    /// Returns an error if a transform is not finite or a part is malformed.
    pub fn execute(&self) -> Result<TriangleMesh> {
        let mut out = TriangleMesh::default();
        for (mesh, transform) in &self.parts {
            mesh.validate()?;
            match transform {
                Some(matrix) => out.merge(&GeneralTransform::new(*matrix).execute(mesh)?),
                None => out.merge(mesh),
            }
        }
        debug!(
            parts = self.parts.len(),
            vertices = out.vertices.len(),
            faces = out.indices.len(),
            "composed meshes"
        );
        Ok(out)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::{Point3, Vector3};

    /// A fan of `n` vertices around the origin with `n - 2` triangles.
    fn fan(n: u32) -> TriangleMesh {
        let mut mesh = TriangleMesh::default();
        for i in 0..n {
            let a = std::f64::consts::TAU * f64::from(i) / f64::from(n);
            mesh.vertices.push(Point3::new(a.cos(), a.sin(), 0.0));
            mesh.normals.push(Vector3::z());
        }
        for i in 1..n - 1 {
            mesh.indices.push([0, i, i + 1]);
        }
        mesh
    }

    #[test]
    fn band_and_holder_concatenate() {
        let band = fan(500);
        let holder = fan(200);
        let lift = Matrix4::new_translation(&Vector3::new(0.0, 10.0, 0.0));
        let out = Compose::new()
            .with_part(band.clone(), None)
            .with_part(holder.clone(), Some(lift))
            .execute()
            .unwrap();

        assert_eq!(out.vertex_count(), 700);
        assert_eq!(out.face_count(), band.face_count() + holder.face_count());
        assert_eq!(out.indices[band.face_count()], [500, 501, 502]);
        for (i, p) in holder.vertices.iter().enumerate() {
            assert_relative_eq!(out.vertices[500 + i], p + Vector3::new(0.0, 10.0, 0.0), epsilon = 1e-12);
        }
        assert!(out.validate().is_ok());
        assert!(out.has_normals());
    }

    #[test]
    fn rotated_part_rotates_normals() {
        let flip = Matrix4::new_rotation(Vector3::new(std::f64::consts::PI, 0.0, 0.0));
        let out = Compose::new().with_part(fan(4), Some(flip)).execute().unwrap();
        for n in &out.normals {
            assert_relative_eq!(*n, -Vector3::z(), epsilon = 1e-12);
        }
    }

    #[test]
    fn missing_normals_on_any_part_clears_them() {
        let mut bare = fan(3);
        bare.normals.clear();
        let out = Compose::new()
            .with_part(fan(3), None)
            .with_part(bare, None)
            .execute()
            .unwrap();
        assert!(out.normals.is_empty());
        assert_eq!(out.vertex_count(), 6);
    }

    #[test]
    fn empty_composition_is_empty_mesh() {
        let compose = Compose::new();
        assert!(compose.is_empty());
        assert_eq!(compose.execute().unwrap(), TriangleMesh::default());
    }
}
