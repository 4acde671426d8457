use crate::error::{GeometryError, Result};
use crate::math::Point3;

use super::{Surface, SurfaceDomain, Torsion};

/// Edge factors are kept this far from 0 and 1 so the taper never hits an
/// exact zero-radius section.
const EDGE_FACTOR_MARGIN: f64 = 1e-9;

/// Where the taper starts at each end of the band, as fractions of `u`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaperCutoffs {
    /// Below this `u` the section shrinks towards the start of the band.
    pub lower: f64,
    /// Above this `u` the section shrinks towards the end of the band.
    pub upper: f64,
}

impl Default for TaperCutoffs {
    fn default() -> Self {
        Self {
            lower: 0.10,
            upper: 0.90,
        }
    }
}

impl TaperCutoffs {
    /// Section scale at `u`: `sqrt(1 - e^2)` inside the edge regions, 1 elsewhere.
    ///
    /// `e` is 0 at the cutoff and approaches 1 at the end of the band; it is
    /// clamped away from both so the result stays finite and non-zero.
    #[must_use]
    pub fn factor(&self, u: f64) -> f64 {
        let edge = if u < self.lower {
            (self.lower - u) / self.lower
        } else if u > self.upper {
            (u - self.upper) / (1.0 - self.upper)
        } else {
            return 1.0;
        };
        let edge = edge.clamp(EDGE_FACTOR_MARGIN, 1.0 - EDGE_FACTOR_MARGIN);
        (1.0 - edge * edge).sqrt()
    }
}

/// An open torsion band for bracelets: rounded tapered ends and a helical
/// rise (`screw`) along `u` so the ends do not meet.
#[derive(Debug, Clone)]
pub struct TaperedTorsion {
    band: Torsion,
    screw: f64,
    cutoffs: TaperCutoffs,
}

impl TaperedTorsion {
    /// Creates a tapered band from a torsion surface.
    ///
    /// # Errors
    ///
    /// Returns an error if `screw` is not finite or the cutoffs are not
    /// ordered inside `(0, 1)`.
    pub fn new(band: Torsion, screw: f64, cutoffs: TaperCutoffs) -> Result<Self> {
        if !screw.is_finite() {
            return Err(GeometryError::Degenerate("screw must be finite".into()).into());
        }
        if !(cutoffs.lower > 0.0 && cutoffs.lower < cutoffs.upper && cutoffs.upper < 1.0) {
            return Err(GeometryError::Degenerate(format!(
                "taper cutoffs must satisfy 0 < lower < upper < 1, got {} / {}",
                cutoffs.lower, cutoffs.upper
            ))
            .into());
        }
        Ok(Self {
            band,
            screw,
            cutoffs,
        })
    }

    /// Returns the underlying untapered band.
    #[must_use]
    pub fn band(&self) -> &Torsion {
        &self.band
    }

    /// Returns the axial rise over the full band.
    #[must_use]
    pub fn screw(&self) -> f64 {
        self.screw
    }
}

impl Surface for TaperedTorsion {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3> {
        let mut p = self.band.point_with_section_scale(u, v, self.cutoffs.factor(u));
        p.z += self.screw * u;
        Ok(p)
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::unit()
    }

    fn is_periodic_u(&self) -> bool {
        false
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
    use crate::geometry::surface::TwistMode;
    use crate::math::Vector3;

    fn bracelet(screw: f64) -> TaperedTorsion {
        let band = Torsion::new(Vector3::new(1.0, 1.0, 1.0), 30.0, 3.0, 0.0, TwistMode::Uniform, 0.0).unwrap();
        TaperedTorsion::new(band, screw, TaperCutoffs::default()).unwrap()
    }

    #[test]
    fn taper_is_one_in_the_middle() {
        let c = TaperCutoffs::default();
        assert_relative_eq!(c.factor(0.5), 1.0);
        assert_relative_eq!(c.factor(0.1), 1.0);
        assert_relative_eq!(c.factor(0.9), 1.0);
    }

    #[test]
    fn taper_shrinks_towards_ends_without_vanishing() {
        let c = TaperCutoffs::default();
        let tip = c.factor(0.0);
        assert!(tip > 0.0 && tip < 1e-3, "tip factor {tip}");
        assert!(c.factor(1.0) > 0.0);
        assert!(c.factor(0.05) < 1.0 && c.factor(0.05) > tip);
        // Halfway into the edge region: sqrt(1 - 0.25)
        assert_relative_eq!(c.factor(0.05), 0.75_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(c.factor(0.95), 0.75_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn screw_raises_the_end() {
        let b = bracelet(12.0);
        let start = b.evaluate(0.0, 0.0).unwrap();
        let end = b.evaluate(1.0, 0.0).unwrap();
        assert_relative_eq!(end.z - start.z, 12.0, epsilon = 1e-6);
    }

    #[test]
    fn ends_collapse_to_the_band_centre_line() {
        let b = bracelet(0.0);
        let tip = b.evaluate(0.0, 0.3).unwrap();
        assert!((tip - Point3::new(30.0, 0.0, 0.0)).norm() < 0.01);
    }

    #[test]
    fn rejects_bad_cutoffs() {
        let band = Torsion::new(Vector3::new(1.0, 1.0, 1.0), 30.0, 3.0, 0.0, TwistMode::Uniform, 0.0).unwrap();
        let cutoffs = TaperCutoffs { lower: 0.6, upper: 0.4 };
        assert!(TaperedTorsion::new(band, 1.0, cutoffs).is_err());
    }
}
