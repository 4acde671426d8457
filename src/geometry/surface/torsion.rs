use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::error::{GeometryError, Result};
use crate::math::{smootherstep, Point3, Vector3, TOLERANCE};

use super::{Surface, SurfaceDomain};

/// Internal gain applied to the user-facing twist value.
const TWIST_GAIN: f64 = 10.0;

/// Exponent of the superellipse cross-section blend.
const SECTION_EXPONENT: i32 = 10;

/// Upper bound for the derived slice count.
pub const MAX_DETAIL: usize = 1000;

/// Lower bound for the derived slice count; a closed grid needs three slices.
pub const MIN_DETAIL: usize = 3;

/// How twist is distributed along the band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwistMode {
    /// The section rotates linearly along the whole band (a uniform spiral).
    Uniform,
    /// The section twists in and back out inside a window around the middle
    /// of the band and is untouched elsewhere.
    Localized,
}

impl TwistMode {
    /// Maps the UI toggle ("twist all") to a mode.
    #[must_use]
    pub fn from_twist_all(twist_all: bool) -> Self {
        if twist_all {
            Self::Uniform
        } else {
            Self::Localized
        }
    }
}

/// Number of slices along `u` for a band of radius `major_r` twisted `twist` times.
///
/// Larger and more twisted bands get more slices, capped at [`MAX_DETAIL`].
/// A zero twist counts as one so the result never collapses to zero.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
pub fn calculate_detail_2d(major_r: f64, twist: f64) -> usize {
    let divisor = if twist == 0.0 { 1.0 } else { twist.abs() };
    let detail = (major_r * TAU * divisor).floor();
    if !detail.is_finite() || detail <= 0.0 {
        return MIN_DETAIL;
    }
    (detail as usize).clamp(MIN_DETAIL, MAX_DETAIL)
}

/// Superellipse radius factor: `(cos^10 + sin^10)^(-1/10)`.
///
/// Turns the unit circle into a rounded square, which gives twisted bands
/// their flat facets.
fn squared(v: f64) -> f64 {
    let (s, c) = v.sin_cos();
    (c.powi(SECTION_EXPONENT) + s.powi(SECTION_EXPONENT)).powf(-1.0 / f64::from(SECTION_EXPONENT))
}

/// A torus-like band with a rounded-square section, twist and inflate.
///
/// `u` runs around the band, `v` around the section; both span `[0, 1]`.
#[derive(Debug, Clone)]
pub struct Torsion {
    scale: Vector3,
    major_r: f64,
    minor_r: f64,
    twist: f64,
    mode: TwistMode,
    inflate: f64,
}

impl Torsion {
    /// Creates a new torsion surface.
    ///
    /// # Arguments
    ///
    /// * `scale` - Per-axis stretch (x and y act on the band, z on the section height)
    /// * `major_r` - Band radius (centre to section centre)
    /// * `minor_r` - Section radius
    /// * `twist` - Full turns of the section along the band; see [`TwistMode`]
    /// * `mode` - Whether twist is uniform or localized
    /// * `inflate` - Extra section growth on the far side of the band
    ///
    /// # Errors
    ///
    /// Returns an error if a radius or scale is non-positive or any value is
    /// not finite.
    pub fn new(
        scale: Vector3,
        major_r: f64,
        minor_r: f64,
        twist: f64,
        mode: TwistMode,
        inflate: f64,
    ) -> Result<Self> {
        if major_r < TOLERANCE || !major_r.is_finite() {
            return Err(GeometryError::Degenerate("torsion major radius must be positive".into()).into());
        }
        if minor_r < TOLERANCE || !minor_r.is_finite() {
            return Err(GeometryError::Degenerate("torsion minor radius must be positive".into()).into());
        }
        if scale.iter().any(|s| *s < TOLERANCE || !s.is_finite()) {
            return Err(GeometryError::Degenerate("torsion scale must be positive".into()).into());
        }
        if !twist.is_finite() || !inflate.is_finite() {
            return Err(GeometryError::Degenerate("torsion twist and inflate must be finite".into()).into());
        }

        Ok(Self {
            scale,
            major_r,
            minor_r,
            twist,
            mode,
            inflate,
        })
    }

    /// Returns the band radius.
    #[must_use]
    pub fn major_r(&self) -> f64 {
        self.major_r
    }

    /// Returns the section radius.
    #[must_use]
    pub fn minor_r(&self) -> f64 {
        self.minor_r
    }

    /// Returns the twist amount.
    #[must_use]
    pub fn twist(&self) -> f64 {
        self.twist
    }

    /// Slices along `u` suited to this band, see [`calculate_detail_2d`].
    #[must_use]
    pub fn detail(&self) -> usize {
        calculate_detail_2d(self.major_r, self.twist)
    }

    /// Section rotation angle at `u`.
    pub(crate) fn twist_angle(&self, u: f64) -> f64 {
        let gained = self.twist * TWIST_GAIN;
        match self.mode {
            TwistMode::Uniform => PI * u * gained / 5.0,
            TwistMode::Localized => {
                let window = smootherstep(0.2, 0.4, u) - smootherstep(0.6, 0.8, u);
                PI * gained / 5.0 * window
            }
        }
    }

    /// Section growth factor at band angle `big_u` (radians).
    ///
    /// Peaks at `1 + inflate` opposite the seam and is exactly 1 outside
    /// `(pi/2, 3pi/2)`.
    pub(crate) fn inflate_factor(&self, big_u: f64) -> f64 {
        if big_u > FRAC_PI_2 && big_u < 3.0 * FRAC_PI_2 {
            self.inflate * 0.5 * (1.0 - (2.0 * big_u - PI).cos()) + 1.0
        } else {
            1.0
        }
    }

    /// Evaluates the band with an extra section scale (used for tapering).
    pub(crate) fn point_with_section_scale(&self, u: f64, v: f64, section_scale: f64) -> Point3 {
        let big_u = u * TAU;
        let big_v = v * TAU;

        let radius = self.minor_r * squared(big_v) * section_scale;
        let (sin_v, cos_v) = big_v.sin_cos();
        let (s, h) = (radius * cos_v, radius * sin_v);

        let (sin_t, cos_t) = self.twist_angle(u).sin_cos();
        let s_twisted = s * cos_t - h * sin_t;
        let h_twisted = s * sin_t + h * cos_t;

        let k = self.inflate_factor(big_u);
        let r = self.major_r + s_twisted * k;
        let (sin_u, cos_u) = big_u.sin_cos();
        Point3::new(
            self.scale.x * r * cos_u,
            self.scale.y * r * sin_u,
            self.scale.z * h_twisted * k,
        )
    }
}

impl Surface for Torsion {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3> {
        Ok(self.point_with_section_scale(u, v, 1.0))
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::unit()
    }

    fn is_periodic_u(&self) -> bool {
        true
    }

    fn is_periodic_v(&self) -> bool {
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn band(twist: f64, mode: TwistMode, inflate: f64) -> Torsion {
        Torsion::new(Vector3::new(1.0, 1.0, 1.0), 10.0, 2.0, twist, mode, inflate).unwrap()
    }

    #[test]
    fn detail_for_zero_twist_uses_unit_divisor() {
        assert_eq!(calculate_detail_2d(9.0, 0.0), 56);
        assert_eq!(calculate_detail_2d(10.0, 0.0), 62);
    }

    #[test]
    fn detail_scales_with_twist_and_is_capped() {
        assert_eq!(calculate_detail_2d(10.0, -2.0), 125);
        assert_eq!(calculate_detail_2d(100.0, 5.0), MAX_DETAIL);
    }

    #[test]
    fn superellipse_is_one_on_axes_and_wider_on_diagonals() {
        assert_relative_eq!(squared(0.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(squared(FRAC_PI_2), 1.0, epsilon = 1e-12);
        assert!(squared(PI / 4.0) > 1.0);
    }

    #[test]
    fn untwisted_outer_equator() {
        let t = band(0.0, TwistMode::Uniform, 0.0);
        let p = t.evaluate(0.0, 0.0).unwrap();
        assert_relative_eq!(p, Point3::new(12.0, 0.0, 0.0), epsilon = 1e-12);
        let top = t.evaluate(0.0, 0.25).unwrap();
        assert_relative_eq!(top, Point3::new(10.0, 0.0, 2.0), epsilon = 1e-9);
    }

    #[test]
    fn uniform_twist_is_two_pi_per_unit() {
        let t = band(1.5, TwistMode::Uniform, 0.0);
        assert_relative_eq!(t.twist_angle(1.0), 3.0 * PI, epsilon = 1e-12);
        assert_relative_eq!(t.twist_angle(0.5), 1.5 * PI, epsilon = 1e-12);
    }

    #[test]
    fn localized_twist_vanishes_outside_window() {
        let t = band(1.0, TwistMode::Localized, 0.0);
        assert!(t.twist_angle(0.1).abs() < TOLERANCE);
        assert!(t.twist_angle(0.9).abs() < TOLERANCE);
        assert!(t.twist_angle(1.0).abs() < TOLERANCE);
        assert_relative_eq!(t.twist_angle(0.5), TAU, epsilon = 1e-12);
    }

    #[test]
    fn quarter_twist_seam_matches_shifted_section() {
        let t = band(0.25, TwistMode::Uniform, 0.3);
        // A quarter turn maps v onto v + 1/4 on the rounded-square section.
        for j in 0..32 {
            let v = f64::from(j) / 32.0;
            let end = t.evaluate(1.0, v).unwrap();
            let start = t.evaluate(0.0, v + 0.25).unwrap();
            assert_relative_eq!(end, start, epsilon = 1e-9);
        }
    }

    #[test]
    fn inflate_peaks_opposite_the_seam() {
        let t = band(0.0, TwistMode::Uniform, 0.8);
        assert_relative_eq!(t.inflate_factor(PI), 1.8, epsilon = 1e-12);
        assert_relative_eq!(t.inflate_factor(0.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(t.inflate_factor(FRAC_PI_2 + 1e-9), 1.0, epsilon = 1e-9);
        let far = t.evaluate(0.5, 0.25).unwrap();
        assert_relative_eq!(far.z, 2.0 * 1.8, epsilon = 1e-9);
    }

    #[test]
    fn rejects_non_positive_radii() {
        let s = Vector3::new(1.0, 1.0, 1.0);
        assert!(Torsion::new(s, 0.0, 1.0, 0.0, TwistMode::Uniform, 0.0).is_err());
        assert!(Torsion::new(s, 1.0, -1.0, 0.0, TwistMode::Uniform, 0.0).is_err());
        assert!(Torsion::new(Vector3::zeros(), 1.0, 1.0, 0.0, TwistMode::Uniform, 0.0).is_err());
    }
}
