pub mod transform;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 4x4 transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Quintic smoothstep (`6x^5 - 15x^4 + 10x^3`) of `x` across `[edge0, edge1]`.
///
/// Returns 0 below `edge0`, 1 above `edge1`, and has zero first and second
/// derivatives at both edges.
#[must_use]
pub fn smootherstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smootherstep_edges_and_midpoint() {
        assert!(smootherstep(0.2, 0.4, 0.1).abs() < TOLERANCE);
        assert!((smootherstep(0.2, 0.4, 0.5) - 1.0).abs() < TOLERANCE);
        assert!((smootherstep(0.0, 1.0, 0.5) - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn smootherstep_is_monotonic() {
        let mut prev = 0.0;
        for i in 0..=100 {
            let x = f64::from(i) / 100.0;
            let y = smootherstep(0.0, 1.0, x);
            assert!(y >= prev - TOLERANCE);
            prev = y;
        }
    }
}
