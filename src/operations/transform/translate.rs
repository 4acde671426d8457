use crate::error::Result;
use crate::math::{Matrix4, Vector3};
use crate::tessellation::TriangleMesh;

use super::GeneralTransform;

/// Translates a mesh by a displacement vector.
pub struct Translate {
    displacement: Vector3,
}

impl Translate {
    /// Creates a new `Translate` operation.
    #[must_use]
    pub fn new(displacement: Vector3) -> Self {
        Self { displacement }
    }

    /// The equivalent 4x4 matrix.
    #[must_use]
    pub fn matrix(&self) -> Matrix4 {
        Matrix4::new_translation(&self.displacement)
    }

    /// Executes the translation, returning the moved mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if the displacement is not finite.
    pub fn execute(&self, mesh: &TriangleMesh) -> Result<TriangleMesh> {
        GeneralTransform::new(self.matrix()).execute(mesh)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;

    #[test]
    fn moves_every_vertex() {
        let mesh = TriangleMesh {
            vertices: vec![Point3::new(1.0, 2.0, 3.0), Point3::new(-1.0, 0.0, 0.5)],
            normals: Vec::new(),
            indices: Vec::new(),
        };
        let out = Translate::new(Vector3::new(0.0, 4.0, -1.0)).execute(&mesh).unwrap();
        assert_eq!(out.vertices[0], Point3::new(1.0, 6.0, 2.0));
        assert_eq!(out.vertices[1], Point3::new(-1.0, 4.0, -0.5));
        assert!(out.normals.is_empty());
    }
}
