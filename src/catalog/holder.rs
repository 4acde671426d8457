//! The jump ring that hangs earrings and pendants.

use std::f64::consts::FRAC_PI_2;

use crate::error::Result;
use crate::geometry::curve::{Circle, Curve};
use crate::math::transform::rotation_matrix;
use crate::math::{Matrix4, Point3, Vector3};
use crate::operations::post::ComputeNormals;
use crate::operations::query::BoundingBox;
use crate::operations::Compose;
use crate::tessellation::{SweepTube, TriangleMesh};

const LOOP_STEPS: usize = 64;
const LOOP_SEGMENTS: usize = 48;
const LOOP_RADIAL_SEGMENTS: usize = 8;

/// A small torus placed on top of a band so it can be hung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HolderLoop {
    /// Radius of the loop's centre line.
    pub radius: f64,
    /// Radius of the wire.
    pub thickness: f64,
}

impl HolderLoop {
    /// Creates a loop description.
    #[must_use]
    pub fn new(radius: f64, thickness: f64) -> Self {
        Self { radius, thickness }
    }

    /// The loop as a tube around the origin in the XY plane.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius or thickness is not positive.
    pub fn mesh(&self) -> Result<TriangleMesh> {
        let path = Circle::new(Point3::origin(), self.radius, Vector3::z(), Vector3::x())?.sample(LOOP_STEPS)?;
        SweepTube::new(path, self.thickness)
            .with_segments(LOOP_SEGMENTS)
            .with_radial_segments(LOOP_RADIAL_SEGMENTS)
            .execute()
    }

    /// Placement that stands the loop in the YZ plane on top of `band`.
    ///
    /// The loop is centred over the band in X and Z and sunk by its wire
    /// thickness so the two parts interlock.
    ///
    /// # Errors
    ///
    /// Returns an error if `band` has no vertices.
    pub fn placement(&self, band: &TriangleMesh) -> Result<Matrix4> {
        let bounds = BoundingBox::new(band).execute()?;
        let center = bounds.center();
        let lift = Vector3::new(center.x, bounds.max.y + self.radius - self.thickness, center.z);
        Ok(Matrix4::new_translation(&lift) * rotation_matrix(&Vector3::y(), FRAC_PI_2))
    }

    /// Composes `band` with this loop and recomputes normals over the result.
    ///
    /// The parts are not welded; the band's vertices come first, unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the band is empty or the loop cannot be built.
    pub fn attach(&self, band: TriangleMesh) -> Result<TriangleMesh> {
        let placement = self.placement(&band)?;
        let composed = Compose::new()
            .with_part(band, None)
            .with_part(self.mesh()?, Some(placement))
            .execute()?;
        ComputeNormals::new().execute(&composed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn flat_band() -> TriangleMesh {
        TriangleMesh {
            vertices: vec![
                Point3::new(-5.0, -10.0, 0.0),
                Point3::new(5.0, -10.0, 0.0),
                Point3::new(0.0, 10.0, 0.0),
            ],
            normals: Vec::new(),
            indices: vec![[0, 1, 2]],
        }
    }

    #[test]
    fn loop_stands_in_yz_plane_above_band() {
        let holder = HolderLoop::new(2.0, 0.5);
        let out = holder.attach(flat_band()).unwrap();
        let loop_vertices = &out.vertices[3..];
        assert_eq!(loop_vertices.len(), LOOP_SEGMENTS * LOOP_RADIAL_SEGMENTS);
        for p in loop_vertices {
            assert!(p.x.abs() <= 0.5 + 1e-9);
            assert!(p.y >= 10.0 - 1.0 - 1e-9);
        }
        let top = loop_vertices.iter().map(|p| p.y).fold(f64::MIN, f64::max);
        assert_relative_eq!(top, 10.0 + 2.0 * 2.0, epsilon = 0.05);
    }

    #[test]
    fn band_vertices_come_first_and_normals_cover_all() {
        let band = flat_band();
        let out = HolderLoop::new(2.0, 0.5).attach(band.clone()).unwrap();
        assert_eq!(&out.vertices[..3], &band.vertices[..]);
        assert!(out.has_normals());
        assert!(out.validate().is_ok());
    }

    #[test]
    fn empty_band_has_nowhere_to_hang() {
        assert!(HolderLoop::new(2.0, 0.5).attach(TriangleMesh::default()).is_err());
    }
}
