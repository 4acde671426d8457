use tracing::debug;

use crate::error::{OperationError, Result};
use crate::math::{Point3, TOLERANCE};
use crate::tessellation::TriangleMesh;

/// Wraps a mesh lying along the X axis around the Y axis.
///
/// With `r = 1 / angle`, each vertex `(x, y, z)` is mapped to
/// `((z - r) sin(x / r), y, -(z - r) cos(x / r))`, so the X axis becomes a
/// circle of radius `r` and a strip of length `2 pi r` closes into a loop.
/// Orientation is preserved for `z < r`. The output carries no normals.
#[derive(Debug, Clone, Copy)]
pub struct Bend {
    angle: f64,
}

impl Bend {
    /// Creates a bend of `angle` radians per unit of X.
    #[must_use]
    pub fn new(angle: f64) -> Self {
        Self { angle }
    }

    /// Creates the bend that wraps X onto a circle of the given radius.
    #[must_use]
    pub fn with_radius(radius: f64) -> Self {
        Self::new(1.0 / radius)
    }

    /// Returns the bend angle per unit of X.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Executes the bend, returning the bent mesh.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the angle is zero or not
    /// finite.
    pub fn execute(&self, mesh: &TriangleMesh) -> Result<TriangleMesh> {
        if !self.angle.is_finite() || self.angle.abs() < TOLERANCE {
            return Err(OperationError::InvalidInput(format!(
                "bend angle must be finite and non-zero, got {}",
                self.angle
            ))
            .into());
        }

        let radius = 1.0 / self.angle;
        let vertices = mesh
            .vertices
            .iter()
            .map(|p| {
                let (sin_t, cos_t) = (p.x * self.angle).sin_cos();
                let w = p.z - radius;
                Point3::new(w * sin_t, p.y, -w * cos_t)
            })
            .collect();

        debug!(angle = self.angle, radius, vertices = mesh.vertices.len(), "bent mesh");
        Ok(TriangleMesh {
            vertices,
            normals: Vec::new(),
            indices: mesh.indices.clone(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;

    use super::*;
    use crate::math::Vector3;

    fn strip(length: f64, n: u32) -> TriangleMesh {
        let mut mesh = TriangleMesh::default();
        for i in 0..=n {
            let x = length * f64::from(i) / f64::from(n);
            mesh.vertices.push(Point3::new(x, 0.0, 0.0));
            mesh.vertices.push(Point3::new(x, 1.0, 0.0));
        }
        for i in 0..n {
            let a = 2 * i;
            mesh.indices.push([a, a + 2, a + 1]);
            mesh.indices.push([a + 1, a + 2, a + 3]);
        }
        mesh.normals = vec![Vector3::z(); mesh.vertices.len()];
        mesh
    }

    #[test]
    fn axis_wraps_onto_circle() {
        let radius = 5.0;
        let bent = Bend::with_radius(radius).execute(&strip(PI * radius, 16)).unwrap();
        for p in &bent.vertices {
            assert_relative_eq!((p.x * p.x + p.z * p.z).sqrt(), radius, epsilon = 1e-9);
        }
        assert_relative_eq!(bent.vertices[0], Point3::new(0.0, 0.0, radius), epsilon = 1e-12);
        // Half the circumference lands on the opposite side.
        let end = bent.vertices[32];
        assert_relative_eq!(end, Point3::new(0.0, 0.0, -radius), epsilon = 1e-9);
    }

    #[test]
    fn normals_are_cleared_and_topology_kept() {
        let mesh = strip(3.0, 4);
        let bent = Bend::new(0.2).execute(&mesh).unwrap();
        assert!(bent.normals.is_empty());
        assert_eq!(bent.indices, mesh.indices);
        assert_eq!(bent.vertex_count(), mesh.vertex_count());
    }

    #[test]
    fn zero_angle_is_rejected() {
        assert!(Bend::new(0.0).execute(&strip(1.0, 2)).is_err());
        assert!(Bend::new(f64::INFINITY).execute(&strip(1.0, 2)).is_err());
    }
}
