mod circle;
mod lissajous;
mod spline;

pub use circle::Circle;
pub use lissajous::{adjust_frequency, Lissajous2D, Lissajous3D, LissajousAxis};
pub use spline::CatmullRom;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3};

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }
}

/// Trait for parametric curves in 3D space.
pub trait Curve {
    /// Evaluates the curve at parameter `t`, returning the 3D point.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range or evaluation fails.
    fn evaluate(&self, t: f64) -> Result<Point3>;

    /// Computes the unit tangent vector at parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range or the tangent is degenerate.
    fn tangent(&self, t: f64) -> Result<Vector3>;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Returns whether the curve is closed.
    fn is_closed(&self) -> bool;

    /// Samples `steps + 1` points evenly across the parameter domain.
    ///
    /// For closed curves the last sample lands on the first one after a full
    /// revolution; the returned [`Path`] is flagged closed either way.
    ///
    /// # Errors
    ///
    /// Returns an error if `steps` is zero or any evaluation fails.
    fn sample(&self, steps: usize) -> Result<Path> {
        if steps == 0 {
            return Err(GeometryError::Degenerate("curve sampling needs at least one step".into()).into());
        }
        let domain = self.domain();
        let mut points = Vec::with_capacity(steps + 1);
        for i in 0..=steps {
            #[allow(clippy::cast_precision_loss)]
            let t = domain.t_min + (domain.t_max - domain.t_min) * i as f64 / steps as f64;
            points.push(self.evaluate(t)?);
        }
        Ok(Path::new(points, self.is_closed()))
    }
}

/// An ordered sequence of points describing a curve to be extruded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    /// The ordered points.
    pub points: Vec<Point3>,
    /// Whether the last point connects back to the first.
    pub closed: bool,
}

impl Path {
    /// Creates a new path.
    #[must_use]
    pub fn new(points: Vec<Point3>, closed: bool) -> Self {
        Self { points, closed }
    }

    /// Number of points in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the path has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the points with the closing duplicate removed.
    ///
    /// A closed path often repeats its first point at the end; interpolation
    /// treats the path as cyclic, so that trailing copy (and any consecutive
    /// duplicates closer than `tolerance`) would only produce zero-length
    /// spans.
    #[must_use]
    pub fn distinct_points(&self, tolerance: f64) -> Vec<Point3> {
        let mut out: Vec<Point3> = Vec::with_capacity(self.points.len());
        for p in &self.points {
            if out.last().is_some_and(|q| (p - q).norm() < tolerance) {
                continue;
            }
            out.push(*p);
        }
        if self.closed && out.len() > 1 {
            if let (Some(first), Some(last)) = (out.first(), out.last()) {
                if (first - last).norm() < tolerance {
                    out.pop();
                }
            }
        }
        out
    }
}
