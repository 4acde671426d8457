use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain, Path};

/// Knot intervals shorter than this are replaced to avoid dividing by zero.
const MIN_KNOT_INTERVAL: f64 = 1e-4;

/// Minimum number of chord samples used for the arc-length table.
const MIN_ARC_LENGTH_DIVISIONS: usize = 200;

/// Points closer than this are treated as the same path point.
const DUPLICATE_POINT_TOLERANCE: f64 = 1e-9;

/// A centripetal Catmull-Rom spline through a [`Path`].
///
/// The spline passes through every distinct input point and is C1-continuous.
/// Knot intervals use the square root of the chord length (alpha = 0.5), which
/// prevents cusps and overshoot on unevenly spaced points.
///
/// The raw parameter `t` in `[0, 1]` advances one span per input point; the
/// `*_at` accessors take an arc-length fraction `u` instead, so equally spaced
/// `u` values produce equally spaced points along the curve.
#[derive(Debug, Clone)]
pub struct CatmullRom {
    points: Vec<Point3>,
    closed: bool,
    /// Cumulative chord lengths at `i / divisions` for `i = 0..=divisions`.
    lengths: Vec<f64>,
}

/// Cubic Hermite coefficients for one span: `c0 + c1 w + c2 w^2 + c3 w^3`.
struct SpanPoly {
    c0: Vector3,
    c1: Vector3,
    c2: Vector3,
    c3: Vector3,
}

impl SpanPoly {
    fn centripetal(p0: &Point3, p1: &Point3, p2: &Point3, p3: &Point3) -> Self {
        let mut dt0 = (p1 - p0).norm_squared().powf(0.25);
        let mut dt1 = (p2 - p1).norm_squared().powf(0.25);
        let mut dt2 = (p3 - p2).norm_squared().powf(0.25);

        if dt1 < MIN_KNOT_INTERVAL {
            dt1 = 1.0;
        }
        if dt0 < MIN_KNOT_INTERVAL {
            dt0 = dt1;
        }
        if dt2 < MIN_KNOT_INTERVAL {
            dt2 = dt1;
        }

        let t1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
        let t2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;

        let x0 = p1.coords;
        let x1 = p2.coords;
        Self {
            c0: x0,
            c1: t1,
            c2: -3.0 * x0 + 3.0 * x1 - 2.0 * t1 - t2,
            c3: 2.0 * x0 - 2.0 * x1 + t1 + t2,
        }
    }

    fn value(&self, w: f64) -> Point3 {
        Point3::from(self.c0 + self.c1 * w + self.c2 * (w * w) + self.c3 * (w * w * w))
    }

    fn derivative(&self, w: f64) -> Vector3 {
        self.c1 + self.c2 * (2.0 * w) + self.c3 * (3.0 * w * w)
    }
}

impl CatmullRom {
    /// Builds a spline through the distinct points of `path`.
    ///
    /// Consecutive duplicates and, for closed paths, a trailing copy of the
    /// first point are dropped before fitting.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if fewer than two distinct points
    /// remain.
    pub fn new(path: &Path) -> Result<Self> {
        let points = path.distinct_points(DUPLICATE_POINT_TOLERANCE);
        if points.len() < 2 {
            return Err(GeometryError::Degenerate(format!(
                "spline needs at least 2 distinct points, got {}",
                points.len()
            ))
            .into());
        }

        let mut spline = Self {
            points,
            closed: path.closed,
            lengths: Vec::new(),
        };
        spline.lengths = spline.compute_lengths();
        Ok(spline)
    }

    /// Returns the interpolated points.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Approximate total arc length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Point at arc-length fraction `u` in `[0, 1]`.
    #[must_use]
    pub fn point_at(&self, u: f64) -> Point3 {
        self.point(self.arc_to_param(u))
    }

    /// Derivative direction (not normalized) at arc-length fraction `u`.
    #[must_use]
    pub fn derivative_at(&self, u: f64) -> Vector3 {
        self.derivative(self.arc_to_param(u))
    }

    fn span_count(&self) -> usize {
        if self.closed {
            self.points.len()
        } else {
            self.points.len() - 1
        }
    }

    /// Locates the span containing `t` and the local weight within it.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    fn span(&self, t: f64) -> (SpanPoly, f64) {
        let n = self.points.len();
        let spans = self.span_count();
        let p = spans as f64 * t;
        let mut index = p.floor() as isize;
        let mut weight = p - index as f64;

        if self.closed {
            index = index.rem_euclid(n as isize);
        } else if index >= spans as isize {
            index = spans as isize - 1;
            weight = 1.0;
        } else if index < 0 {
            index = 0;
            weight = 0.0;
        }
        let i = index as usize;

        let (p0, p1, p2, p3) = if self.closed {
            (
                self.points[(i + n - 1) % n],
                self.points[i % n],
                self.points[(i + 1) % n],
                self.points[(i + 2) % n],
            )
        } else {
            let p1 = self.points[i];
            let p2 = self.points[i + 1];
            // Reflect the neighbours at the open ends.
            let p0 = if i > 0 { self.points[i - 1] } else { p1 + (p1 - p2) };
            let p3 = if i + 2 < n { self.points[i + 2] } else { p2 + (p2 - p1) };
            (p0, p1, p2, p3)
        };

        (SpanPoly::centripetal(&p0, &p1, &p2, &p3), weight)
    }

    fn point(&self, t: f64) -> Point3 {
        let (poly, w) = self.span(t);
        poly.value(w)
    }

    fn derivative(&self, t: f64) -> Vector3 {
        let (poly, w) = self.span(t);
        poly.derivative(w)
    }

    #[allow(clippy::cast_precision_loss)]
    fn compute_lengths(&self) -> Vec<f64> {
        let divisions = (self.points.len() * 8).max(MIN_ARC_LENGTH_DIVISIONS);
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut total = 0.0;
        let mut prev = self.point(0.0);
        lengths.push(0.0);
        for i in 1..=divisions {
            let current = self.point(i as f64 / divisions as f64);
            total += (current - prev).norm();
            lengths.push(total);
            prev = current;
        }
        lengths
    }

    /// Maps an arc-length fraction to the raw spline parameter.
    #[allow(clippy::cast_precision_loss)]
    fn arc_to_param(&self, u: f64) -> f64 {
        let total = self.length();
        let divisions = self.lengths.len() - 1;
        if total < TOLERANCE || divisions == 0 {
            return u.clamp(0.0, 1.0);
        }
        let target = u.clamp(0.0, 1.0) * total;

        // First index whose cumulative length reaches the target.
        let hi = self.lengths.partition_point(|&l| l < target).clamp(1, divisions);
        let lo = hi - 1;
        let before = self.lengths[lo];
        let segment = self.lengths[hi] - before;
        let fraction = if segment > TOLERANCE {
            (target - before) / segment
        } else {
            0.0
        };
        (lo as f64 + fraction) / divisions as f64
    }
}

impl Curve for CatmullRom {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        Ok(self.point(t))
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        self.derivative(t)
            .try_normalize(TOLERANCE)
            .ok_or_else(|| GeometryError::ZeroVector.into())
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, 1.0)
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::curve::Circle;

    fn square() -> Path {
        Path::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            true,
        )
    }

    #[test]
    fn passes_through_input_points() {
        let spline = CatmullRom::new(&square()).unwrap();
        for (i, expected) in square().points.iter().enumerate() {
            let t = f64::from(u32::try_from(i).unwrap()) / 4.0;
            assert_relative_eq!(spline.evaluate(t).unwrap(), *expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn closed_spline_wraps_around() {
        let spline = CatmullRom::new(&square()).unwrap();
        assert_relative_eq!(spline.point_at(0.0), spline.point_at(1.0), epsilon = 1e-9);
    }

    #[test]
    fn open_spline_hits_both_ends() {
        let mut path = square();
        path.closed = false;
        let spline = CatmullRom::new(&path).unwrap();
        assert_relative_eq!(spline.point_at(0.0), Point3::new(0.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(spline.point_at(1.0), Point3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn arc_length_sampling_is_uniform_on_circle() {
        let path = Circle::unit().sample(12).unwrap();
        let spline = CatmullRom::new(&path).unwrap();
        assert_relative_eq!(spline.length(), std::f64::consts::TAU, epsilon = 0.01);

        let samples: Vec<Point3> = (0..=20).map(|i| spline.point_at(f64::from(i) / 20.0)).collect();
        let gaps: Vec<f64> = samples.windows(2).map(|w| (w[1] - w[0]).norm()).collect();
        let mean = gaps.iter().sum::<f64>() / 20.0;
        for g in gaps {
            assert!((g - mean).abs() < 0.01 * mean, "gap {g} deviates from {mean}");
        }
    }

    #[test]
    fn duplicate_closing_point_is_ignored() {
        let path = Circle::unit().sample(8).unwrap();
        let spline = CatmullRom::new(&path).unwrap();
        assert_eq!(spline.points().len(), 8);
    }

    #[test]
    fn too_few_points_is_error() {
        let path = Path::new(vec![Point3::origin(), Point3::origin()], true);
        assert!(CatmullRom::new(&path).is_err());
    }
}
