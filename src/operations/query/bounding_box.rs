use crate::error::{OperationError, Result};
use crate::math::Point3;
use crate::tessellation::TriangleMesh;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Smallest box containing every point, or `None` for an empty slice.
    #[must_use]
    pub fn from_points(points: &[Point3]) -> Option<Self> {
        let first = points.first()?;
        Some(points.iter().skip(1).fold(
            Self {
                min: *first,
                max: *first,
            },
            |acc, p| Self {
                min: acc.min.inf(p),
                max: acc.max.sup(p),
            },
        ))
    }

    /// Centre of the box.
    #[must_use]
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }
}

/// Computes the axis-aligned bounding box of a mesh.
pub struct BoundingBox<'a> {
    mesh: &'a TriangleMesh,
}

impl<'a> BoundingBox<'a> {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new(mesh: &'a TriangleMesh) -> Self {
        Self { mesh }
    }

    /// Executes the query, returning the AABB.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the mesh has no vertices.
    pub fn execute(&self) -> Result<Aabb> {
        Aabb::from_points(&self.mesh.vertices)
            .ok_or_else(|| OperationError::InvalidInput("bounding box of an empty mesh".into()).into())
    }
}
