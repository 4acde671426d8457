use crate::error::Result;
use crate::tessellation::TriangleMesh;

/// Computes the signed volume enclosed by a closed mesh.
///
/// Uses the signed tetrahedron method: for each triangle, `(1/6) * v0 . (v1 x v2)`
/// summed over all triangles. The result is positive when triangles are
/// wound counter-clockwise seen from outside, so its sign doubles as an
/// orientation check.
pub struct Volume<'a> {
    mesh: &'a TriangleMesh,
}

impl<'a> Volume<'a> {
    /// Creates a new `Volume` query.
    #[must_use]
    pub fn new(mesh: &'a TriangleMesh) -> Self {
        Self { mesh }
    }

    /// Executes the query, returning the signed volume.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh references vertices it does not have.
    pub fn execute(&self) -> Result<f64> {
        self.mesh.validate()?;

        let signed_volume: f64 = self
            .mesh
            .indices
            .iter()
            .map(|tri| {
                let v0 = self.mesh.vertices[tri[0] as usize].coords;
                let v1 = self.mesh.vertices[tri[1] as usize].coords;
                let v2 = self.mesh.vertices[tri[2] as usize].coords;
                v0.dot(&v1.cross(&v2))
            })
            .sum();

        Ok(signed_volume / 6.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::curve::{Circle, Curve};
    use crate::math::{Point3, Vector3};
    use crate::tessellation::SweepTube;

    fn unit_tetrahedron() -> TriangleMesh {
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
    fn tetrahedron_volume() {
        let v = Volume::new(&unit_tetrahedron()).execute().unwrap();
        assert_relative_eq!(v, 1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn flipped_winding_is_negative() {
        let mut mesh = unit_tetrahedron();
        for tri in &mut mesh.indices {
            tri.swap(1, 2);
        }
        let v = Volume::new(&mesh).execute().unwrap();
        assert_relative_eq!(v, -1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn swept_ring_approaches_torus_volume() {
        let path = Circle::new(Point3::origin(), 10.0, Vector3::z(), Vector3::x())
            .unwrap()
            .sample(128)
            .unwrap();
        let mesh = SweepTube::new(path, 1.0)
            .with_segments(128)
            .with_radial_segments(32)
            .execute()
            .unwrap();
        let v = Volume::new(&mesh).execute().unwrap();
        let exact = 2.0 * PI * PI * 10.0;
        assert!(v > 0.0);
        assert_relative_eq!(v, exact, max_relative = 0.02);
    }
}
