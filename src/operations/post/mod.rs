//! Mesh post-processing: welding, normals, bending and cleanup.

mod bend;
mod cleanup;
mod normals;
mod weld;

pub use bend::Bend;
pub use cleanup::RemoveDegenerateFaces;
pub use normals::ComputeNormals;
pub use weld::WeldVertices;

use crate::math::Point3;
use crate::tessellation::TriangleMesh;

/// Builds a mesh from `vertices` and `indices`, dropping unreferenced
/// vertices while keeping the survivors in their original order.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn compact(vertices: &[Point3], indices: &[[u32; 3]]) -> TriangleMesh {
    let mut used = vec![false; vertices.len()];
    for tri in indices {
        for &i in tri {
            used[i as usize] = true;
        }
    }

    let mut remap = vec![u32::MAX; vertices.len()];
    let mut kept = Vec::with_capacity(vertices.len());
    for (i, p) in vertices.iter().enumerate() {
        if used[i] {
            remap[i] = kept.len() as u32;
            kept.push(*p);
        }
    }

    TriangleMesh {
        vertices: kept,
        normals: Vec::new(),
        indices: indices
            .iter()
            .map(|t| [remap[t[0] as usize], remap[t[1] as usize], remap[t[2] as usize]])
            .collect(),
    }
}
