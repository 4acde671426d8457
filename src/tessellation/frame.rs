//! Rotation-minimizing frames for sweeping a section along a curve.

use crate::math::transform::rotate_vector;
use crate::math::Vector3;

/// Tangents shorter than this are considered numerically unstable.
const TANGENT_EPSILON: f64 = 1e-12;

/// An orthonormal frame at a point on a curve, with `binormal = tangent x normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Tangent direction (forward along curve).
    pub tangent: Vector3,
    /// Normal direction (perpendicular to tangent).
    pub normal: Vector3,
    /// Binormal direction (perpendicular to both tangent and normal).
    pub binormal: Vector3,
}

impl Frame {
    /// Creates an initial frame from a tangent.
    ///
    /// The normal is built from the world axis least aligned with the tangent.
    #[must_use]
    pub fn from_tangent(tangent: Vector3) -> Self {
        let tangent = tangent.try_normalize(TANGENT_EPSILON).unwrap_or(Vector3::z());
        let normal = find_perpendicular(&tangent);
        Self {
            tangent,
            normal,
            binormal: tangent.cross(&normal),
        }
    }

    /// Carries this frame onto `new_tangent` with the smallest rotation.
    ///
    /// An unstable (near-zero) tangent keeps the previous orientation.
    #[must_use]
    pub fn transport(&self, new_tangent: &Vector3) -> Self {
        let Some(tangent) = new_tangent.try_normalize(TANGENT_EPSILON) else {
            return *self;
        };

        let axis = self.tangent.cross(&tangent);
        let normal = match axis.try_normalize(TANGENT_EPSILON) {
            Some(axis) => {
                let angle = self.tangent.dot(&tangent).clamp(-1.0, 1.0).acos();
                rotate_vector(&self.normal, &axis, angle)
            }
            // Parallel or anti-parallel: the old normal is still perpendicular.
            None => self.normal,
        };
        // Re-orthogonalize against drift.
        let normal = (normal - tangent * tangent.dot(&normal))
            .try_normalize(TANGENT_EPSILON)
            .unwrap_or_else(|| find_perpendicular(&tangent));

        Self {
            tangent,
            normal,
            binormal: tangent.cross(&normal),
        }
    }

    /// Rotates normal and binormal around the tangent by `angle`.
    #[must_use]
    pub fn rotate_around_tangent(&self, angle: f64) -> Self {
        let (sin_a, cos_a) = angle.sin_cos();
        Self {
            tangent: self.tangent,
            normal: self.normal * cos_a + self.binormal * sin_a,
            binormal: self.binormal * cos_a - self.normal * sin_a,
        }
    }
}

/// Finds a unit vector perpendicular to the unit vector `v`.
fn find_perpendicular(v: &Vector3) -> Vector3 {
    let (ax, ay, az) = (v.x.abs(), v.y.abs(), v.z.abs());
    let axis = if ax <= ay && ax <= az {
        Vector3::x()
    } else if ay <= az {
        Vector3::y()
    } else {
        Vector3::z()
    };
    v.cross(&axis).try_normalize(TANGENT_EPSILON).unwrap_or(Vector3::y())
}

/// Computes rotation-minimizing frames for a sequence of tangents.
///
/// Frames are propagated by parallel transport, so they never flip at
/// inflection points the way Frenet frames do. When `closed` is set, the
/// input is expected to include the closing sample (first and last tangents
/// at the same curve point); the twist left between the last transported
/// frame and the first is spread evenly along the sequence so both ends
/// agree.
#[must_use]
pub fn rotation_minimizing_frames(tangents: &[Vector3], closed: bool) -> Vec<Frame> {
    let Some(first) = tangents.first() else {
        return Vec::new();
    };

    let mut frames = Vec::with_capacity(tangents.len());
    let mut current = Frame::from_tangent(*first);
    frames.push(current);
    for tangent in &tangents[1..] {
        current = current.transport(tangent);
        frames.push(current);
    }

    if closed && frames.len() > 1 {
        let last = frames.len() - 1;
        let start = frames[0];
        let end = frames[last];
        let mut theta = start.normal.dot(&end.normal).clamp(-1.0, 1.0).acos();
        if start.tangent.dot(&start.normal.cross(&end.normal)) > 0.0 {
            theta = -theta;
        }
        #[allow(clippy::cast_precision_loss)]
        let step = theta / last as f64;
        for (i, frame) in frames.iter_mut().enumerate().skip(1) {
            #[allow(clippy::cast_precision_loss)]
            let angle = step * i as f64;
            *frame = frame.rotate_around_tangent(angle);
        }
    }

    frames
}
