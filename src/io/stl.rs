//! Binary STL export.
//!
//! Export is a pure function of the mesh and an optional placement
//! transform: the same inputs always produce the same bytes, and nothing is
//! written to disk. Saving the bytes is the caller's business.

use tracing::debug;

use crate::error::{ExportError, Result};
use crate::math::transform::transform_point;
use crate::math::{Matrix4, Point3, Vector3, TOLERANCE};
use crate::tessellation::TriangleMesh;

/// Encodes `mesh` as binary STL, applying `transform` to positions first.
///
/// Facet normals are recomputed from the (transformed) triangle winding;
/// degenerate facets get a zero normal, which STL readers treat as
/// "compute it yourself".
///
/// # Errors
///
/// Returns [`ExportError::EmptyMesh`] if the mesh has no triangles, or an
/// error if the mesh is malformed or encoding fails.
///
/// # Example
///
/// ```
/// use jewelgen::io::stl;
/// use jewelgen::math::Point3;
/// use jewelgen::tessellation::TriangleMesh;
///
/// let mesh = TriangleMesh {
///     vertices: vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ],
///     normals: Vec::new(),
///     indices: vec![[0, 1, 2]],
/// };
/// let bytes = stl::to_bytes(&mesh, None).unwrap();
/// assert_eq!(bytes.len(), 84 + 50);
/// ```
pub fn to_bytes(mesh: &TriangleMesh, transform: Option<&Matrix4>) -> Result<Vec<u8>> {
    if mesh.indices.is_empty() {
        return Err(ExportError::EmptyMesh.into());
    }
    mesh.validate()?;

    let positions: Vec<Point3> = match transform {
        Some(matrix) => mesh.vertices.iter().map(|p| transform_point(matrix, p)).collect(),
        None => mesh.vertices.clone(),
    };

    let triangles: Vec<stl_io::Triangle> = mesh
        .indices
        .iter()
        .map(|tri| {
            let p0 = &positions[tri[0] as usize];
            let p1 = &positions[tri[1] as usize];
            let p2 = &positions[tri[2] as usize];

            let n = (p1 - p0)
                .cross(&(p2 - p0))
                .try_normalize(TOLERANCE)
                .unwrap_or_else(Vector3::zeros);

            stl_io::Triangle {
                normal: stl_io::Normal::new(to_f32(n.x, n.y, n.z)),
                vertices: [
                    stl_io::Vertex::new(to_f32(p0.x, p0.y, p0.z)),
                    stl_io::Vertex::new(to_f32(p1.x, p1.y, p1.z)),
                    stl_io::Vertex::new(to_f32(p2.x, p2.y, p2.z)),
                ],
            }
        })
        .collect();

    let mut bytes = Vec::with_capacity(84 + 50 * triangles.len());
    stl_io::write_stl(&mut bytes, triangles.iter()).map_err(ExportError::Encode)?;
    debug!(triangles = triangles.len(), bytes = bytes.len(), "encoded binary stl");
    Ok(bytes)
}

#[allow(clippy::cast_possible_truncation)]
fn to_f32(x: f64, y: f64, z: f64) -> [f32; 3] {
    [x as f32, y as f32, z as f32]
}
