use super::{Matrix4, Point3, Vector3};

/// Transforms a point by a 4x4 matrix (homogeneous coordinates).
#[must_use]
pub fn transform_point(matrix: &Matrix4, point: &Point3) -> Point3 {
    let v = matrix * nalgebra::Vector4::new(point.x, point.y, point.z, 1.0);
    Point3::new(v.x, v.y, v.z)
}

/// Transforms a direction vector by a 4x4 matrix (ignoring translation).
#[must_use]
pub fn transform_direction(matrix: &Matrix4, dir: &Vector3) -> Vector3 {
    let v = matrix * nalgebra::Vector4::new(dir.x, dir.y, dir.z, 0.0);
    Vector3::new(v.x, v.y, v.z)
}

/// Builds a 4x4 rotation matrix around a unit axis by an angle (Rodrigues).
#[must_use]
#[allow(clippy::many_single_char_names)]
pub fn rotation_matrix(axis: &Vector3, angle: f64) -> Matrix4 {
    let c = angle.cos();
    let s = angle.sin();
    let t = 1.0 - c;
    let (x, y, z) = (axis.x, axis.y, axis.z);

    #[allow(clippy::suspicious_operation_groupings)]
    Matrix4::new(
        t * x * x + c,     t * x * y - s * z, t * x * z + s * y, 0.0,
        t * x * y + s * z, t * y * y + c,     t * y * z - s * x, 0.0,
        t * x * z - s * y, t * y * z + s * x, t * z * z + c,     0.0,
        0.0,               0.0,               0.0,               1.0,
    )
}

/// Rotates `v` around the unit axis `k` by `angle` (Rodrigues).
#[must_use]
pub fn rotate_vector(v: &Vector3, k: &Vector3, angle: f64) -> Vector3 {
    let (sin_a, cos_a) = angle.sin_cos();
    v * cos_a + k.cross(v) * sin_a + k * k.dot(v) * (1.0 - cos_a)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn translation_moves_points_not_directions() {
        let m = Matrix4::new_translation(&Vector3::new(1.0, 2.0, 3.0));
        let p = transform_point(&m, &Point3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(p, Point3::new(2.0, 3.0, 4.0), epsilon = 1e-12);

        let d = transform_direction(&m, &Vector3::x());
        assert_relative_eq!(d, Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn quarter_turn_about_z() {
        let m = rotation_matrix(&Vector3::z(), FRAC_PI_2);
        let p = transform_point(&m, &Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn rotate_vector_matches_matrix() {
        let axis = Vector3::new(1.0, 1.0, 0.0).normalize();
        let v = Vector3::new(0.3, -0.2, 0.9);
        let by_matrix = transform_direction(&rotation_matrix(&axis, 0.7), &v);
        let direct = rotate_vector(&v, &axis, 0.7);
        assert_relative_eq!(by_matrix, direct, epsilon = 1e-12);
    }
}
