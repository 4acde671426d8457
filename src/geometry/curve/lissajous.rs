use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain, Path};

/// One axis of a Lissajous figure: `scale / length * sin(frequency * θ + phase)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LissajousAxis {
    /// Overall extent of the axis.
    pub scale: f64,
    /// Divisor applied to `scale`; lets schemas express extent as a ratio.
    pub length: f64,
    /// Angular frequency (number of oscillations per revolution).
    pub frequency: f64,
    /// Phase offset in radians.
    pub phase: f64,
}

impl LissajousAxis {
    /// Creates a new axis.
    #[must_use]
    pub fn new(scale: f64, length: f64, frequency: f64, phase: f64) -> Self {
        Self {
            scale,
            length,
            frequency,
            phase,
        }
    }

    fn amplitude(&self) -> f64 {
        self.scale / self.length
    }

    fn value(&self, theta: f64) -> f64 {
        self.amplitude() * (self.frequency * theta + self.phase).sin()
    }

    fn derivative(&self, theta: f64) -> f64 {
        self.amplitude() * self.frequency * (self.frequency * theta + self.phase).cos()
    }

    fn validate(&self, name: &'static str) -> Result<()> {
        if !(self.scale.is_finite() && self.frequency.is_finite() && self.phase.is_finite()) {
            return Err(GeometryError::Degenerate(format!("{name} axis has non-finite values")).into());
        }
        if !self.length.is_finite() || self.length.abs() < TOLERANCE {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: name,
                value: self.length,
                min: TOLERANCE,
                max: f64::MAX,
            }
            .into());
        }
        Ok(())
    }
}

/// Shifts a secondary frequency so it does not retrace the primary one.
///
/// When `freq_a > 1`, every `freq_a - 1` steps of the secondary frequency
/// would land on a figure already drawn by a lower value, so the secondary
/// frequency is pushed forward by `floor((freq - 1) / (freq_a - 1))`. This is
/// an empirical rule that keeps slider positions visually distinct, not a
/// mathematical identity; it is preserved exactly because existing designs
/// depend on it.
#[must_use]
pub fn adjust_frequency(freq: f64, freq_a: f64) -> f64 {
    if freq_a > 1.0 {
        freq + ((freq - 1.0) / (freq_a - 1.0)).floor()
    } else {
        freq
    }
}

fn is_whole(f: f64) -> bool {
    (f - f.round()).abs() < TOLERANCE
}

/// A planar Lissajous figure lying in the XY plane.
///
/// `x` follows axis B (which carries the phase) and `y` follows axis A, so
/// the figure stands upright for the default axis convention.
#[derive(Debug, Clone)]
pub struct Lissajous2D {
    steps: usize,
    a: LissajousAxis,
    b: LissajousAxis,
}

impl Lissajous2D {
    /// Creates a new planar figure. The phase of axis A is ignored.
    ///
    /// The B frequency is adjusted with [`adjust_frequency`].
    ///
    /// # Errors
    ///
    /// Returns an error if `steps` is zero or an axis has a zero length divisor
    /// or non-finite values.
    pub fn new(steps: usize, a: LissajousAxis, b: LissajousAxis) -> Result<Self> {
        if steps == 0 {
            return Err(GeometryError::Degenerate("lissajous curve needs at least one step".into()).into());
        }
        a.validate("length_a")?;
        b.validate("length_b")?;
        let a = LissajousAxis { phase: 0.0, ..a };
        let b = LissajousAxis {
            frequency: adjust_frequency(b.frequency, a.frequency),
            ..b
        };
        Ok(Self { steps, a, b })
    }

    /// Returns the effective frequencies `(a, b)` after adjustment.
    #[must_use]
    pub fn frequencies(&self) -> (f64, f64) {
        (self.a.frequency, self.b.frequency)
    }

    /// Samples the figure at its configured step count (`steps + 1` points).
    ///
    /// # Errors
    ///
    /// Returns an error if sampling fails.
    pub fn path(&self) -> Result<Path> {
        self.sample(self.steps)
    }
}

impl Curve for Lissajous2D {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        Ok(Point3::new(self.b.value(t), self.a.value(t), 0.0))
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        Vector3::new(self.b.derivative(t), self.a.derivative(t), 0.0)
            .try_normalize(TOLERANCE)
            .ok_or_else(|| GeometryError::ZeroVector.into())
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, TAU)
    }

    fn is_closed(&self) -> bool {
        is_whole(self.a.frequency) && is_whole(self.b.frequency)
    }
}

/// A spatial Lissajous figure.
#[derive(Debug, Clone)]
pub struct Lissajous3D {
    steps: usize,
    a: LissajousAxis,
    b: LissajousAxis,
    c: LissajousAxis,
    closed_ring: bool,
}

impl Lissajous3D {
    /// Creates a new spatial figure. The phase of axis A is ignored.
    ///
    /// B is always adjusted with [`adjust_frequency`]; C is adjusted only
    /// when `closed_ring` is false, and then bumped by one if it coincides
    /// with B, which would flatten the figure onto a plane.
    ///
    /// # Errors
    ///
    /// Returns an error if `steps` is zero or an axis has a zero length divisor
    /// or non-finite values.
    pub fn new(
        steps: usize,
        a: LissajousAxis,
        b: LissajousAxis,
        c: LissajousAxis,
        closed_ring: bool,
    ) -> Result<Self> {
        if steps == 0 {
            return Err(GeometryError::Degenerate("lissajous curve needs at least one step".into()).into());
        }
        a.validate("length_a")?;
        b.validate("length_b")?;
        c.validate("length_c")?;

        let a = LissajousAxis { phase: 0.0, ..a };
        let freq_b = adjust_frequency(b.frequency, a.frequency);
        let freq_c = if closed_ring {
            c.frequency
        } else {
            let adjusted = adjust_frequency(c.frequency, a.frequency);
            if (adjusted - freq_b).abs() < TOLERANCE {
                adjusted + 1.0
            } else {
                adjusted
            }
        };

        Ok(Self {
            steps,
            a,
            b: LissajousAxis {
                frequency: freq_b,
                ..b
            },
            c: LissajousAxis {
                frequency: freq_c,
                ..c
            },
            closed_ring,
        })
    }

    /// Returns the effective frequencies `(a, b, c)` after adjustment.
    #[must_use]
    pub fn frequencies(&self) -> (f64, f64, f64) {
        (self.a.frequency, self.b.frequency, self.c.frequency)
    }

    /// Returns whether this figure was built for a closed ring.
    #[must_use]
    pub fn is_ring(&self) -> bool {
        self.closed_ring
    }

    /// Samples the figure at its configured step count (`steps + 1` points).
    ///
    /// # Errors
    ///
    /// Returns an error if sampling fails.
    pub fn path(&self) -> Result<Path> {
        self.sample(self.steps)
    }
}

impl Curve for Lissajous3D {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        Ok(Point3::new(self.a.value(t), self.b.value(t), self.c.value(t)))
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        Vector3::new(self.a.derivative(t), self.b.derivative(t), self.c.derivative(t))
            .try_normalize(TOLERANCE)
            .ok_or_else(|| GeometryError::ZeroVector.into())
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, TAU)
    }

    fn is_closed(&self) -> bool {
        is_whole(self.a.frequency) && is_whole(self.b.frequency) && is_whole(self.c.frequency)
    }
}
