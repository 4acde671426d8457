use std::f64::consts::TAU;

use tracing::debug;

use crate::error::{Result, TessellationError};
use crate::geometry::curve::{CatmullRom, Path};
use crate::math::Point3;

use super::frame::rotation_minimizing_frames;
use super::TriangleMesh;

/// Sweeps a circular section along a smooth spline through a [`Path`].
///
/// The path is interpolated with a centripetal Catmull-Rom spline, sampled
/// at equal arc-length steps, and framed with rotation-minimizing frames.
/// Closed paths produce a watertight torus-like tube whose seam is shared by
/// index (no duplicate vertices); open paths produce an uncapped tube.
#[derive(Debug, Clone)]
pub struct SweepTube {
    path: Path,
    radius: f64,
    segments: usize,
    radial_segments: usize,
}

impl SweepTube {
    /// Default number of samples along the path.
    pub const DEFAULT_SEGMENTS: usize = 64;

    /// Default number of vertices around the section.
    pub const DEFAULT_RADIAL_SEGMENTS: usize = 8;

    /// Creates a new sweep with default resolution.
    #[must_use]
    pub fn new(path: Path, radius: f64) -> Self {
        Self {
            path,
            radius,
            segments: Self::DEFAULT_SEGMENTS,
            radial_segments: Self::DEFAULT_RADIAL_SEGMENTS,
        }
    }

    /// Sets the number of samples along the path.
    #[must_use]
    pub fn with_segments(mut self, segments: usize) -> Self {
        self.segments = segments;
        self
    }

    /// Sets the number of vertices around the section.
    #[must_use]
    pub fn with_radial_segments(mut self, radial_segments: usize) -> Self {
        self.radial_segments = radial_segments;
        self
    }

    /// Executes the sweep, producing a tube mesh with outward normals.
    ///
    /// # Errors
    ///
    /// Returns [`TessellationError::InvalidParameters`] if the radius is not
    /// positive or either resolution is below 3, and a geometry error if the
    /// path has fewer than two distinct points.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn execute(&self) -> Result<TriangleMesh> {
        if !(self.radius > 0.0 && self.radius.is_finite()) {
            return Err(TessellationError::InvalidParameters(format!(
                "tube radius must be positive, got {}",
                self.radius
            ))
            .into());
        }
        if self.segments < 3 || self.radial_segments < 3 {
            return Err(TessellationError::InvalidParameters(format!(
                "tube needs at least 3 segments and 3 radial segments, got {} and {}",
                self.segments, self.radial_segments
            ))
            .into());
        }

        let spline = CatmullRom::new(&self.path)?;
        let closed = self.path.closed;

        let mut centers: Vec<Point3> = Vec::with_capacity(self.segments + 1);
        let mut tangents = Vec::with_capacity(self.segments + 1);
        for i in 0..=self.segments {
            let u = i as f64 / self.segments as f64;
            centers.push(spline.point_at(u));
            tangents.push(spline.derivative_at(u));
        }
        let mut frames = rotation_minimizing_frames(&tangents, closed);

        // The closing sample duplicates the first ring; share it by index instead.
        let rings = if closed {
            frames.truncate(self.segments);
            centers.truncate(self.segments);
            self.segments
        } else {
            self.segments + 1
        };

        let radial = self.radial_segments;
        let mut mesh = TriangleMesh::default();
        mesh.vertices.reserve(rings * radial);
        mesh.normals.reserve(rings * radial);
        mesh.indices.reserve(self.segments * radial * 2);

        for (center, frame) in centers.iter().zip(&frames) {
            for k in 0..radial {
                let (sin_a, cos_a) = (TAU * k as f64 / radial as f64).sin_cos();
                let dir = frame.normal * cos_a + frame.binormal * sin_a;
                mesh.vertices.push(center + dir * self.radius);
                mesh.normals.push(dir);
            }
        }

        for j in 0..self.segments {
            let next = if closed { (j + 1) % rings } else { j + 1 };
            for k in 0..radial {
                let k1 = (k + 1) % radial;
                let a = (j * radial + k) as u32;
                let b = (next * radial + k) as u32;
                let c = (next * radial + k1) as u32;
                let d = (j * radial + k1) as u32;
                mesh.indices.push([a, d, b]);
                mesh.indices.push([b, d, c]);
            }
        }

        debug!(
            closed,
            rings,
            radial,
            length = spline.length(),
            vertices = mesh.vertices.len(),
            faces = mesh.indices.len(),
            "swept tube"
        );
        Ok(mesh)
    }
}
