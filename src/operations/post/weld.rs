use std::collections::HashMap;

use tracing::debug;

use crate::error::{OperationError, Result};
use crate::math::Point3;
use crate::tessellation::TriangleMesh;

use super::compact;

/// Merges vertices that lie closer together than a tolerance.
///
/// Vertices are visited in buffer order; each one snaps onto the earliest
/// surviving vertex within `tolerance`, or survives itself. Survivors are
/// therefore pairwise at least `tolerance` apart. Triangles that collapse
/// onto a repeated vertex are dropped, as are vertices left unreferenced.
///
/// Normals are discarded: they must be recomputed over the welded topology.
#[derive(Debug, Clone, Copy)]
pub struct WeldVertices {
    tolerance: f64,
}

impl Default for WeldVertices {
    fn default() -> Self {
        Self {
            tolerance: Self::DEFAULT_TOLERANCE,
        }
    }
}

type CellKey = (i64, i64, i64);

impl WeldVertices {
    /// Tolerance used by the catalog pipelines, in model units (millimetres).
    pub const DEFAULT_TOLERANCE: f64 = 0.01;

    /// Creates a weld with the given tolerance.
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Returns the weld tolerance.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    #[allow(clippy::cast_possible_truncation)]
    fn cell(&self, p: &Point3) -> CellKey {
        (
            (p.x / self.tolerance).floor() as i64,
            (p.y / self.tolerance).floor() as i64,
            (p.z / self.tolerance).floor() as i64,
        )
    }

    /// Executes the weld, returning the welded mesh.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the tolerance is not a
    /// positive finite number or a vertex position is not finite, and
    /// [`OperationError::Failed`] if an index is out of range.
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute(&self, mesh: &TriangleMesh) -> Result<TriangleMesh> {
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(OperationError::InvalidInput(format!(
                "weld tolerance must be positive, got {}",
                self.tolerance
            ))
            .into());
        }
        mesh.validate()?;
        if mesh.vertices.iter().any(|p| !p.coords.iter().all(|c| c.is_finite())) {
            return Err(OperationError::InvalidInput("cannot weld non-finite vertex positions".into()).into());
        }

        let mut grid: HashMap<CellKey, Vec<u32>> = HashMap::new();
        let mut kept: Vec<Point3> = Vec::new();
        let mut remap: Vec<u32> = Vec::with_capacity(mesh.vertices.len());

        for p in &mesh.vertices {
            let (cx, cy, cz) = self.cell(p);
            let mut target: Option<u32> = None;
            for dx in -1..=1 {
                for dy in -1..=1 {
                    for dz in -1..=1 {
                        let Some(bucket) = grid.get(&(cx + dx, cy + dy, cz + dz)) else {
                            continue;
                        };
                        for &candidate in bucket {
                            let close = (kept[candidate as usize] - p).norm() < self.tolerance;
                            if close && target.is_none_or(|t| candidate < t) {
                                target = Some(candidate);
                            }
                        }
                    }
                }
            }

            let index = if let Some(t) = target {
                t
            } else {
                let index = kept.len() as u32;
                kept.push(*p);
                grid.entry((cx, cy, cz)).or_default().push(index);
                index
            };
            remap.push(index);
        }

        let indices: Vec<[u32; 3]> = mesh
            .indices
            .iter()
            .map(|t| [remap[t[0] as usize], remap[t[1] as usize], remap[t[2] as usize]])
            .filter(|t| t[0] != t[1] && t[1] != t[2] && t[0] != t[2])
            .collect();

        let welded = compact(&kept, &indices);
        debug!(
            before = mesh.vertices.len(),
            after = welded.vertices.len(),
            dropped_faces = mesh.indices.len() - welded.indices.len(),
            tolerance = self.tolerance,
            "welded vertices"
        );
        Ok(welded)
    }
}
