//! Lissajous collection: tubes swept along Lissajous figures.

use tracing::debug;

use crate::error::Result;
use crate::geometry::curve::{Lissajous2D, Lissajous3D, LissajousAxis, Path};
use crate::operations::post::{Bend, ComputeNormals};
use crate::tessellation::{SweepTube, TriangleMesh};

use super::holder::HolderLoop;
use super::schema::{value_map, ParameterSchema, ParameterSpec, ParameterValues, ValueReader};

/// Samples taken along every Lissajous figure.
pub const CURVE_STEPS: usize = 1000;

/// Tube resolution along the figure.
const TUBE_SEGMENTS: usize = 600;

/// Tube resolution around the wire.
const TUBE_RADIAL_SEGMENTS: usize = 12;

/// Phase of the axis that closes ring figures into a circle, in degrees.
const RING_PHASE_DEG: f64 = 90.0;

fn sweep(path: Path, thickness: f64) -> Result<TriangleMesh> {
    SweepTube::new(path, thickness)
        .with_segments(TUBE_SEGMENTS)
        .with_radial_segments(TUBE_RADIAL_SEGMENTS)
        .execute()
}

/// A ring wound from a spatial figure that circles the finger.
///
/// The X and Z axes share a frequency and sit a quarter turn apart, so the
/// wire winds `freq_a` times around a circle of `radius` while undulating
/// along Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LissajousRingParams {
    /// Radius of the circle the wire winds around.
    pub radius: f64,
    /// Amplitude of the undulation across the band.
    pub height: f64,
    /// Number of windings around the finger.
    pub freq_a: f64,
    /// Undulations per revolution before adjustment.
    pub freq_b: f64,
    /// Phase of the undulation, in degrees.
    pub phase: f64,
    /// Wire radius.
    pub thickness: f64,
}

impl LissajousRingParams {
    /// Declared parameters.
    pub const SCHEMA: ParameterSchema = ParameterSchema {
        archetype: "lissajous ring",
        specs: &[
            ParameterSpec::slider("radius", 9.0, 7.0, 12.0, 0.1),
            ParameterSpec::slider("height", 3.0, 1.0, 8.0, 0.1),
            ParameterSpec::slider("freq_a", 3.0, 1.0, 6.0, 1.0),
            ParameterSpec::slider("freq_b", 5.0, 1.0, 12.0, 1.0),
            ParameterSpec::slider("phase", 90.0, 0.0, 360.0, 1.0),
            ParameterSpec::slider("thickness", 0.8, 0.4, 2.0, 0.05),
        ],
    };

    pub(crate) fn read(values: &ValueReader<'_>) -> Result<Self> {
        Ok(Self {
            radius: values.number("radius")?,
            height: values.number("height")?,
            freq_a: values.number("freq_a")?,
            freq_b: values.number("freq_b")?,
            phase: values.number("phase")?,
            thickness: values.number("thickness")?,
        })
    }

    /// The parameters as a value map.
    #[must_use]
    pub fn values(&self) -> ParameterValues {
        value_map([
            ("radius", self.radius.into()),
            ("height", self.height.into()),
            ("freq_a", self.freq_a.into()),
            ("freq_b", self.freq_b.into()),
            ("phase", self.phase.into()),
            ("thickness", self.thickness.into()),
        ])
    }

    /// The wound figure.
    ///
    /// # Errors
    ///
    /// Returns an error if the figure cannot be sampled.
    pub fn curve(&self) -> Result<Lissajous3D> {
        Lissajous3D::new(
            CURVE_STEPS,
            LissajousAxis::new(self.radius, 1.0, self.freq_a, 0.0),
            LissajousAxis::new(self.height, 1.0, self.freq_b, self.phase.to_radians()),
            LissajousAxis::new(self.radius, 1.0, self.freq_a, RING_PHASE_DEG.to_radians()),
            true,
        )
    }

    /// Builds the ring.
    ///
    /// # Errors
    ///
    /// Returns an error if any pipeline stage fails.
    pub fn render(&self) -> Result<TriangleMesh> {
        let path = self.curve()?.path()?;
        let mesh = sweep(path, self.thickness)?;
        debug!(vertices = mesh.vertex_count(), "rendered lissajous ring");
        Ok(mesh)
    }
}

impl Default for LissajousRingParams {
    fn default() -> Self {
        Self {
            radius: 9.0,
            height: 3.0,
            freq_a: 3.0,
            freq_b: 5.0,
            phase: 90.0,
            thickness: 0.8,
        }
    }
}

/// A flat figure stretched along X and bent around the wrist.
///
/// The figure spans `2 pi radius` in X so that bending closes it into a full
/// loop of `radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LissajousBraceletParams {
    /// Inner radius of the bracelet.
    pub radius: f64,
    /// Width of the band across the wrist.
    pub width: f64,
    /// Frequency across the band.
    pub freq_a: f64,
    /// Frequency around the wrist before adjustment.
    pub freq_b: f64,
    /// Phase offset, in degrees.
    pub phase: f64,
    /// Wire radius.
    pub thickness: f64,
}

impl LissajousBraceletParams {
    /// Declared parameters.
    pub const SCHEMA: ParameterSchema = ParameterSchema {
        archetype: "lissajous bracelet",
        specs: &[
            ParameterSpec::slider("radius", 30.0, 25.0, 40.0, 0.5),
            ParameterSpec::slider("width", 12.0, 4.0, 30.0, 0.5),
            ParameterSpec::slider("freq_a", 3.0, 1.0, 8.0, 1.0),
            ParameterSpec::slider("freq_b", 7.0, 1.0, 16.0, 1.0),
            ParameterSpec::slider("phase", 0.0, 0.0, 360.0, 1.0),
            ParameterSpec::slider("thickness", 1.0, 0.5, 3.0, 0.05),
        ],
    };

    pub(crate) fn read(values: &ValueReader<'_>) -> Result<Self> {
        Ok(Self {
            radius: values.number("radius")?,
            width: values.number("width")?,
            freq_a: values.number("freq_a")?,
            freq_b: values.number("freq_b")?,
            phase: values.number("phase")?,
            thickness: values.number("thickness")?,
        })
    }

    /// The parameters as a value map.
    #[must_use]
    pub fn values(&self) -> ParameterValues {
        value_map([
            ("radius", self.radius.into()),
            ("width", self.width.into()),
            ("freq_a", self.freq_a.into()),
            ("freq_b", self.freq_b.into()),
            ("phase", self.phase.into()),
            ("thickness", self.thickness.into()),
        ])
    }

    /// The unbent figure.
    ///
    /// # Errors
    ///
    /// Returns an error if the figure cannot be sampled.
    pub fn curve(&self) -> Result<Lissajous2D> {
        Lissajous2D::new(
            CURVE_STEPS,
            LissajousAxis::new(self.width, 2.0, self.freq_a, 0.0),
            LissajousAxis::new(std::f64::consts::PI * self.radius, 1.0, self.freq_b, self.phase.to_radians()),
        )
    }

    /// Builds the bracelet.
    ///
    /// # Errors
    ///
    /// Returns an error if any pipeline stage fails.
    pub fn render(&self) -> Result<TriangleMesh> {
        let flat = sweep(self.curve()?.path()?, self.thickness)?;
        let bent = Bend::with_radius(self.radius).execute(&flat)?;
        let mesh = ComputeNormals::new().execute(&bent)?;
        debug!(vertices = mesh.vertex_count(), "rendered lissajous bracelet");
        Ok(mesh)
    }
}

impl Default for LissajousBraceletParams {
    fn default() -> Self {
        Self {
            radius: 30.0,
            width: 12.0,
            freq_a: 3.0,
            freq_b: 7.0,
            phase: 0.0,
            thickness: 1.0,
        }
    }
}

/// A flat figure hung from a holder loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LissajousEarringParams {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
    /// Vertical frequency.
    pub freq_a: f64,
    /// Horizontal frequency before adjustment.
    pub freq_b: f64,
    /// Phase offset, in degrees.
    pub phase: f64,
    /// Wire radius.
    pub thickness: f64,
    /// Radius of the holder loop.
    pub holder_radius: f64,
}

impl LissajousEarringParams {
    /// Declared parameters.
    pub const SCHEMA: ParameterSchema = ParameterSchema {
        archetype: "lissajous earring",
        specs: &[
            ParameterSpec::slider("width", 20.0, 8.0, 40.0, 0.5),
            ParameterSpec::slider("height", 30.0, 8.0, 50.0, 0.5),
            ParameterSpec::slider("freq_a", 3.0, 1.0, 8.0, 1.0),
            ParameterSpec::slider("freq_b", 2.0, 1.0, 8.0, 1.0),
            ParameterSpec::slider("phase", 0.0, 0.0, 360.0, 1.0),
            ParameterSpec::slider("thickness", 0.8, 0.4, 2.0, 0.05),
            ParameterSpec::slider("holder_radius", 2.0, 1.0, 4.0, 0.1),
        ],
    };

    pub(crate) fn read(values: &ValueReader<'_>) -> Result<Self> {
        Ok(Self {
            width: values.number("width")?,
            height: values.number("height")?,
            freq_a: values.number("freq_a")?,
            freq_b: values.number("freq_b")?,
            phase: values.number("phase")?,
            thickness: values.number("thickness")?,
            holder_radius: values.number("holder_radius")?,
        })
    }

    /// The parameters as a value map.
    #[must_use]
    pub fn values(&self) -> ParameterValues {
        value_map([
            ("width", self.width.into()),
            ("height", self.height.into()),
            ("freq_a", self.freq_a.into()),
            ("freq_b", self.freq_b.into()),
            ("phase", self.phase.into()),
            ("thickness", self.thickness.into()),
            ("holder_radius", self.holder_radius.into()),
        ])
    }

    /// The hanging figure.
    ///
    /// # Errors
    ///
    /// Returns an error if the figure cannot be sampled.
    pub fn curve(&self) -> Result<Lissajous2D> {
        Lissajous2D::new(
            CURVE_STEPS,
            LissajousAxis::new(self.height, 2.0, self.freq_a, 0.0),
            LissajousAxis::new(self.width, 2.0, self.freq_b, self.phase.to_radians()),
        )
    }

    /// Builds the earring.
    ///
    /// # Errors
    ///
    /// Returns an error if any pipeline stage fails.
    pub fn render(&self) -> Result<TriangleMesh> {
        let band = sweep(self.curve()?.path()?, self.thickness)?;
        let mesh = HolderLoop::new(self.holder_radius, self.thickness).attach(band)?;
        debug!(vertices = mesh.vertex_count(), "rendered lissajous earring");
        Ok(mesh)
    }
}

impl Default for LissajousEarringParams {
    fn default() -> Self {
        Self {
            width: 20.0,
            height: 30.0,
            freq_a: 3.0,
            freq_b: 2.0,
            phase: 0.0,
            thickness: 0.8,
            holder_radius: 2.0,
        }
    }
}

/// A spatial figure hung from a holder loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LissajousPendantParams {
    /// Extent along X.
    pub scale_a: f64,
    /// Extent along Y.
    pub scale_b: f64,
    /// Extent along Z.
    pub scale_c: f64,
    /// Frequency along X.
    pub freq_a: f64,
    /// Frequency along Y before adjustment.
    pub freq_b: f64,
    /// Frequency along Z before adjustment.
    pub freq_c: f64,
    /// Phase along Y, in degrees.
    pub phase_1: f64,
    /// Phase along Z, in degrees.
    pub phase_2: f64,
    /// Wire radius.
    pub thickness: f64,
    /// Radius of the holder loop.
    pub holder_radius: f64,
}

impl LissajousPendantParams {
    /// Declared parameters.
    pub const SCHEMA: ParameterSchema = ParameterSchema {
        archetype: "lissajous pendant",
        specs: &[
            ParameterSpec::slider("scale_a", 12.0, 5.0, 25.0, 0.5),
            ParameterSpec::slider("scale_b", 12.0, 5.0, 25.0, 0.5),
            ParameterSpec::slider("scale_c", 6.0, 2.0, 15.0, 0.5),
            ParameterSpec::slider("freq_a", 2.0, 1.0, 6.0, 1.0),
            ParameterSpec::slider("freq_b", 3.0, 1.0, 8.0, 1.0),
            ParameterSpec::slider("freq_c", 4.0, 1.0, 8.0, 1.0),
            ParameterSpec::slider("phase_1", 90.0, 0.0, 360.0, 1.0),
            ParameterSpec::slider("phase_2", 45.0, 0.0, 360.0, 1.0),
            ParameterSpec::slider("thickness", 0.8, 0.4, 2.0, 0.05),
            ParameterSpec::slider("holder_radius", 2.5, 1.0, 5.0, 0.1),
        ],
    };

    pub(crate) fn read(values: &ValueReader<'_>) -> Result<Self> {
        Ok(Self {
            scale_a: values.number("scale_a")?,
            scale_b: values.number("scale_b")?,
            scale_c: values.number("scale_c")?,
            freq_a: values.number("freq_a")?,
            freq_b: values.number("freq_b")?,
            freq_c: values.number("freq_c")?,
            phase_1: values.number("phase_1")?,
            phase_2: values.number("phase_2")?,
            thickness: values.number("thickness")?,
            holder_radius: values.number("holder_radius")?,
        })
    }

    /// The parameters as a value map.
    #[must_use]
    pub fn values(&self) -> ParameterValues {
        value_map([
            ("scale_a", self.scale_a.into()),
            ("scale_b", self.scale_b.into()),
            ("scale_c", self.scale_c.into()),
            ("freq_a", self.freq_a.into()),
            ("freq_b", self.freq_b.into()),
            ("freq_c", self.freq_c.into()),
            ("phase_1", self.phase_1.into()),
            ("phase_2", self.phase_2.into()),
            ("thickness", self.thickness.into()),
            ("holder_radius", self.holder_radius.into()),
        ])
    }

    /// The spatial figure; not a ring, so both B and C are adjusted.
    ///
    /// # Errors
    ///
    /// Returns an error if the figure cannot be sampled.
    pub fn curve(&self) -> Result<Lissajous3D> {
        Lissajous3D::new(
            CURVE_STEPS,
            LissajousAxis::new(self.scale_a, 1.0, self.freq_a, 0.0),
            LissajousAxis::new(self.scale_b, 1.0, self.freq_b, self.phase_1.to_radians()),
            LissajousAxis::new(self.scale_c, 1.0, self.freq_c, self.phase_2.to_radians()),
            false,
        )
    }

    /// Builds the pendant.
    ///
    /// # Errors
    ///
    /// Returns an error if any pipeline stage fails.
    pub fn render(&self) -> Result<TriangleMesh> {
        let band = sweep(self.curve()?.path()?, self.thickness)?;
        let mesh = HolderLoop::new(self.holder_radius, self.thickness).attach(band)?;
        debug!(vertices = mesh.vertex_count(), "rendered lissajous pendant");
        Ok(mesh)
    }
}

impl Default for LissajousPendantParams {
    fn default() -> Self {
        Self {
            scale_a: 12.0,
            scale_b: 12.0,
            scale_c: 6.0,
            freq_a: 2.0,
            freq_b: 3.0,
            freq_c: 4.0,
            phase_1: 90.0,
            phase_2: 45.0,
            thickness: 0.8,
            holder_radius: 2.5,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::curve::Curve;

    fn reader_defaults_match(schema: &ParameterSchema, values: &ParameterValues) {
        assert_eq!(&schema.defaults(), values);
    }

    #[test]
    fn defaults_agree_with_schemas() {
        reader_defaults_match(&LissajousRingParams::SCHEMA, &LissajousRingParams::default().values());
        reader_defaults_match(
            &LissajousBraceletParams::SCHEMA,
            &LissajousBraceletParams::default().values(),
        );
        reader_defaults_match(
            &LissajousEarringParams::SCHEMA,
            &LissajousEarringParams::default().values(),
        );
        reader_defaults_match(
            &LissajousPendantParams::SCHEMA,
            &LissajousPendantParams::default().values(),
        );
    }

    #[test]
    fn ring_winds_around_its_radius() {
        let ring = LissajousRingParams::default();
        let curve = ring.curve().unwrap();
        assert!(curve.is_ring());
        // 5 + floor(4 / 2)
        assert_relative_eq!(curve.frequencies().1, 7.0);
        let path = curve.path().unwrap();
        assert_eq!(path.len(), CURVE_STEPS + 1);
        for p in &path.points {
            assert_relative_eq!((p.x * p.x + p.z * p.z).sqrt(), ring.radius, epsilon = 1e-9);
        }
    }

    #[test]
    fn ring_tube_is_closed() {
        let mesh = LissajousRingParams::default().render().unwrap();
        assert_eq!(mesh.vertex_count(), TUBE_SEGMENTS * TUBE_RADIAL_SEGMENTS);
        assert!(mesh.is_closed());
        assert!(mesh.has_normals());
    }

    #[test]
    fn bracelet_figure_spans_the_wrist() {
        let params = LissajousBraceletParams::default();
        let path = params.curve().unwrap().path().unwrap();
        let max_x = path.points.iter().map(|p| p.x).fold(f64::MIN, f64::max);
        assert!(max_x <= std::f64::consts::PI * params.radius + 1e-9);
        assert!(max_x > 0.99 * std::f64::consts::PI * params.radius);
    }

    #[test]
    fn bracelet_wraps_onto_the_wrist() {
        let params = LissajousBraceletParams::default();
        let mesh = params.render().unwrap();
        assert!(mesh.has_normals());
        for p in &mesh.vertices {
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!((r - params.radius).abs() <= params.thickness + 1e-6);
        }
    }

    #[test]
    fn pendant_adjusts_both_secondary_frequencies() {
        let curve = LissajousPendantParams::default().curve().unwrap();
        let (a, b, c) = curve.frequencies();
        assert_relative_eq!(a, 2.0);
        assert_relative_eq!(b, 5.0);
        assert_relative_eq!(c, 7.0);
    }

    #[test]
    fn earring_carries_a_holder() {
        let params = LissajousEarringParams::default();
        let bare = sweep(params.curve().unwrap().path().unwrap(), params.thickness).unwrap();
        let mesh = params.render().unwrap();
        assert!(mesh.vertex_count() > bare.vertex_count());
        assert_eq!(&mesh.vertices[..bare.vertex_count()], &bare.vertices[..]);
    }
}
