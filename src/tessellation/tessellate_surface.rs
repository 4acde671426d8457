use tracing::debug;

use crate::error::{Result, TessellationError};
use crate::geometry::surface::Surface;

use super::TriangleMesh;

/// Samples a parametric surface on a regular `(slices + 1) x (stacks + 1)` grid.
///
/// Every 2x2 neighbourhood becomes two triangles. Seams of periodic surfaces
/// are left as duplicated rows/columns; run
/// [`WeldVertices`](crate::operations::post::WeldVertices) afterwards to stitch
/// them. Normals are left empty since they are only meaningful after welding.
pub struct TessellateSurface<'a> {
    surface: &'a dyn Surface,
    slices: usize,
    stacks: usize,
}

impl<'a> TessellateSurface<'a> {
    /// Creates a new tessellation with `slices` cells along `u` and `stacks` along `v`.
    #[must_use]
    pub fn new(surface: &'a dyn Surface, slices: usize, stacks: usize) -> Self {
        Self {
            surface,
            slices,
            stacks,
        }
    }

    /// Executes the tessellation, returning the grid mesh.
    ///
    /// Vertex `(i, j)` (slice `i`, stack `j`) is stored at `i * (stacks + 1) + j`.
    ///
    /// # Errors
    ///
    /// Returns [`TessellationError::InvalidParameters`] if either resolution is
    /// zero, or the surface's error if evaluation fails.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn execute(&self) -> Result<TriangleMesh> {
        if self.slices == 0 || self.stacks == 0 {
            return Err(TessellationError::InvalidParameters(format!(
                "surface grid needs at least one slice and one stack, got {} x {}",
                self.slices, self.stacks
            ))
            .into());
        }

        let domain = self.surface.domain();
        let cols = self.stacks + 1;
        let rows = self.slices + 1;

        let mut mesh = TriangleMesh::default();
        mesh.vertices.reserve(rows * cols);
        mesh.indices.reserve(self.slices * self.stacks * 2);

        for i in 0..rows {
            let u = domain.u_min + (domain.u_max - domain.u_min) * i as f64 / self.slices as f64;
            for j in 0..cols {
                let v = domain.v_min + (domain.v_max - domain.v_min) * j as f64 / self.stacks as f64;
                mesh.vertices.push(self.surface.evaluate(u, v)?);
            }
        }

        // Two triangles per cell, wound so the normal follows du x dv.
        for i in 0..self.slices {
            for j in 0..self.stacks {
                let i00 = (i * cols + j) as u32;
                let i10 = ((i + 1) * cols + j) as u32;
                let i01 = (i * cols + j + 1) as u32;
                let i11 = ((i + 1) * cols + j + 1) as u32;
                mesh.indices.push([i00, i10, i11]);
                mesh.indices.push([i00, i11, i01]);
            }
        }

        debug!(
            slices = self.slices,
            stacks = self.stacks,
            periodic_u = self.surface.is_periodic_u(),
            periodic_v = self.surface.is_periodic_v(),
            vertices = mesh.vertices.len(),
            faces = mesh.indices.len(),
            "tessellated surface"
        );
        Ok(mesh)
    }
}
