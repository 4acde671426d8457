//! Torsion collection: twisted rounded-square bands.

use tracing::debug;

use crate::error::Result;
use crate::geometry::surface::{Surface, TaperCutoffs, TaperedTorsion, Torsion, TwistMode};
use crate::math::Vector3;
use crate::operations::post::{ComputeNormals, RemoveDegenerateFaces, WeldVertices};
use crate::tessellation::{TessellateSurface, TriangleMesh};

use super::holder::HolderLoop;
use super::schema::{value_map, ParameterSchema, ParameterSpec, ParameterValues, ValueReader};

/// Grid resolution around the section. Divisible by four so a quarter twist
/// lands the seam back on grid points.
pub const SECTION_STACKS: usize = 32;

/// Twist granularity, in turns, that keeps the band seam aligned.
const TWIST_STEP: f64 = 0.25;

/// Holder wire radius for torsion drops.
const HOLDER_THICKNESS: f64 = 0.6;

/// Tessellates, welds, cleans and shades a surface.
fn render_surface(surface: &dyn Surface, slices: usize) -> Result<TriangleMesh> {
    let grid = TessellateSurface::new(surface, slices, SECTION_STACKS).execute()?;
    let welded = WeldVertices::default().execute(&grid)?;
    let cleaned = RemoveDegenerateFaces::default().execute(&welded)?;
    ComputeNormals::new().execute(&cleaned)
}

fn band(radius: f64, thickness: f64, height: f64, twist: f64, twist_all: bool, inflate: f64) -> Result<Torsion> {
    Torsion::new(
        Vector3::new(1.0, 1.0, height),
        radius,
        thickness,
        twist,
        TwistMode::from_twist_all(twist_all),
        inflate,
    )
}

/// A closed twisted band worn on the finger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorsionRingParams {
    /// Band radius.
    pub radius: f64,
    /// Section radius.
    pub thickness: f64,
    /// Vertical stretch of the section.
    pub height: f64,
    /// Turns of the section around the band.
    pub twist: f64,
    /// Twist along the whole band rather than a window.
    pub twist_all: bool,
    /// Bulge opposite the seam.
    pub inflate: f64,
}

impl TorsionRingParams {
    /// Declared parameters.
    pub const SCHEMA: ParameterSchema = ParameterSchema {
        archetype: "torsion ring",
        specs: &[
            ParameterSpec::slider("radius", 9.0, 7.0, 12.0, 0.1),
            ParameterSpec::slider("thickness", 1.5, 0.5, 2.5, 0.05),
            ParameterSpec::slider("height", 1.2, 0.5, 3.0, 0.05),
            ParameterSpec::slider("twist", 1.0, 0.0, 4.0, TWIST_STEP),
            ParameterSpec::toggle("twist_all", true),
            ParameterSpec::slider("inflate", 0.0, 0.0, 0.8, 0.05),
        ],
    };

    pub(crate) fn read(values: &ValueReader<'_>) -> Result<Self> {
        Ok(Self {
            radius: values.number("radius")?,
            thickness: values.number("thickness")?,
            height: values.number("height")?,
            twist: values.number("twist")?,
            twist_all: values.flag("twist_all")?,
            inflate: values.number("inflate")?,
        })
    }

    /// The parameters as a value map.
    #[must_use]
    pub fn values(&self) -> ParameterValues {
        value_map([
            ("radius", self.radius.into()),
            ("thickness", self.thickness.into()),
            ("height", self.height.into()),
            ("twist", self.twist.into()),
            ("twist_all", self.twist_all.into()),
            ("inflate", self.inflate.into()),
        ])
    }

    /// The band surface.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is not positive.
    pub fn surface(&self) -> Result<Torsion> {
        band(self.radius, self.thickness, self.height, self.twist, self.twist_all, self.inflate)
    }

    /// Builds the ring.
    ///
    /// # Errors
    ///
    /// Returns an error if any pipeline stage fails.
    pub fn render(&self) -> Result<TriangleMesh> {
        let surface = self.surface()?;
        let mesh = render_surface(&surface, surface.detail())?;
        debug!(vertices = mesh.vertex_count(), "rendered torsion ring");
        Ok(mesh)
    }
}

impl Default for TorsionRingParams {
    fn default() -> Self {
        Self {
            radius: 9.0,
            thickness: 1.5,
            height: 1.2,
            twist: 1.0,
            twist_all: true,
            inflate: 0.0,
        }
    }
}

/// An open twisted band with tapered ends that spirals around the wrist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorsionBraceletParams {
    /// Band radius.
    pub radius: f64,
    /// Section radius.
    pub thickness: f64,
    /// Vertical stretch of the section.
    pub height: f64,
    /// Turns of the section along the band.
    pub twist: f64,
    /// Twist along the whole band rather than a window.
    pub twist_all: bool,
    /// Bulge opposite the opening.
    pub inflate: f64,
    /// Axial rise from one end to the other.
    pub screw: f64,
}

impl TorsionBraceletParams {
    /// Declared parameters.
    pub const SCHEMA: ParameterSchema = ParameterSchema {
        archetype: "torsion bracelet",
        specs: &[
            ParameterSpec::slider("radius", 30.0, 25.0, 40.0, 0.5),
            ParameterSpec::slider("thickness", 3.0, 1.0, 5.0, 0.1),
            ParameterSpec::slider("height", 1.0, 0.5, 2.0, 0.05),
            ParameterSpec::slider("twist", 2.0, 0.0, 6.0, TWIST_STEP),
            ParameterSpec::toggle("twist_all", true),
            ParameterSpec::slider("inflate", 0.2, 0.0, 0.8, 0.05),
            ParameterSpec::input("screw", 12.0, 8.0, 30.0, 0.5),
        ],
    };

    pub(crate) fn read(values: &ValueReader<'_>) -> Result<Self> {
        Ok(Self {
            radius: values.number("radius")?,
            thickness: values.number("thickness")?,
            height: values.number("height")?,
            twist: values.number("twist")?,
            twist_all: values.flag("twist_all")?,
            inflate: values.number("inflate")?,
            screw: values.number("screw")?,
        })
    }

    /// The parameters as a value map.
    #[must_use]
    pub fn values(&self) -> ParameterValues {
        value_map([
            ("radius", self.radius.into()),
            ("thickness", self.thickness.into()),
            ("height", self.height.into()),
            ("twist", self.twist.into()),
            ("twist_all", self.twist_all.into()),
            ("inflate", self.inflate.into()),
            ("screw", self.screw.into()),
        ])
    }

    /// The tapered band surface.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is not positive.
    pub fn surface(&self) -> Result<TaperedTorsion> {
        let inner = band(self.radius, self.thickness, self.height, self.twist, self.twist_all, self.inflate)?;
        TaperedTorsion::new(inner, self.screw, TaperCutoffs::default())
    }

    /// Builds the bracelet. The tapered tips weld into single poles.
    ///
    /// # Errors
    ///
    /// Returns an error if any pipeline stage fails.
    pub fn render(&self) -> Result<TriangleMesh> {
        let surface = self.surface()?;
        let mesh = render_surface(&surface, surface.band().detail())?;
        debug!(vertices = mesh.vertex_count(), "rendered torsion bracelet");
        Ok(mesh)
    }
}

impl Default for TorsionBraceletParams {
    fn default() -> Self {
        Self {
            radius: 30.0,
            thickness: 3.0,
            height: 1.0,
            twist: 2.0,
            twist_all: true,
            inflate: 0.2,
            screw: 12.0,
        }
    }
}

/// A small twisted band hung from a holder loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorsionEarringParams {
    /// Band radius.
    pub radius: f64,
    /// Section radius.
    pub thickness: f64,
    /// Vertical stretch of the section.
    pub height: f64,
    /// Turns of the section around the band.
    pub twist: f64,
    /// Twist along the whole band rather than a window.
    pub twist_all: bool,
    /// Bulge at the bottom of the drop.
    pub inflate: f64,
    /// Radius of the holder loop.
    pub holder_radius: f64,
}

/// A larger twisted band hung from a holder loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorsionPendantParams {
    /// Band radius.
    pub radius: f64,
    /// Section radius.
    pub thickness: f64,
    /// Vertical stretch of the section.
    pub height: f64,
    /// Turns of the section around the band.
    pub twist: f64,
    /// Twist along the whole band rather than a window.
    pub twist_all: bool,
    /// Bulge at the bottom of the drop.
    pub inflate: f64,
    /// Radius of the holder loop.
    pub holder_radius: f64,
}

macro_rules! torsion_drop {
    ($name:ident, $archetype:literal, $defaults:expr, [$($spec:expr),+ $(,)?]) => {
        impl $name {
            /// Declared parameters.
            pub const SCHEMA: ParameterSchema = ParameterSchema {
                archetype: $archetype,
                specs: &[$($spec),+],
            };

            pub(crate) fn read(values: &ValueReader<'_>) -> Result<Self> {
                Ok(Self {
                    radius: values.number("radius")?,
                    thickness: values.number("thickness")?,
                    height: values.number("height")?,
                    twist: values.number("twist")?,
                    twist_all: values.flag("twist_all")?,
                    inflate: values.number("inflate")?,
                    holder_radius: values.number("holder_radius")?,
                })
            }

            /// The parameters as a value map.
            #[must_use]
            pub fn values(&self) -> ParameterValues {
                value_map([
                    ("radius", self.radius.into()),
                    ("thickness", self.thickness.into()),
                    ("height", self.height.into()),
                    ("twist", self.twist.into()),
                    ("twist_all", self.twist_all.into()),
                    ("inflate", self.inflate.into()),
                    ("holder_radius", self.holder_radius.into()),
                ])
            }

            /// The band surface.
            ///
            /// # Errors
            ///
            /// Returns an error if a dimension is not positive.
            pub fn surface(&self) -> Result<Torsion> {
                band(self.radius, self.thickness, self.height, self.twist, self.twist_all, self.inflate)
            }

            /// Builds the band and hangs it from a holder loop.
            ///
            /// # Errors
            ///
            /// Returns an error if any pipeline stage fails.
            pub fn render(&self) -> Result<TriangleMesh> {
                let surface = self.surface()?;
                let band = render_surface(&surface, surface.detail())?;
                let mesh = HolderLoop::new(self.holder_radius, HOLDER_THICKNESS).attach(band)?;
                debug!(archetype = $archetype, vertices = mesh.vertex_count(), "rendered torsion drop");
                Ok(mesh)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $defaults
            }
        }
    };
}

torsion_drop!(
    TorsionEarringParams,
    "torsion earring",
    TorsionEarringParams {
        radius: 8.0,
        thickness: 1.0,
        height: 1.0,
        twist: 1.0,
        twist_all: false,
        inflate: 0.4,
        holder_radius: 2.0,
    },
    [
        ParameterSpec::slider("radius", 8.0, 5.0, 15.0, 0.1),
        ParameterSpec::slider("thickness", 1.0, 0.5, 2.0, 0.05),
        ParameterSpec::slider("height", 1.0, 0.5, 3.0, 0.05),
        ParameterSpec::slider("twist", 1.0, 0.0, 4.0, TWIST_STEP),
        ParameterSpec::toggle("twist_all", false),
        ParameterSpec::slider("inflate", 0.4, 0.0, 0.8, 0.05),
        ParameterSpec::slider("holder_radius", 2.0, 1.0, 4.0, 0.1),
    ]
);

torsion_drop!(
    TorsionPendantParams,
    "torsion pendant",
    TorsionPendantParams {
        radius: 15.0,
        thickness: 2.0,
        height: 1.0,
        twist: 1.5,
        twist_all: true,
        inflate: 0.3,
        holder_radius: 2.5,
    },
    [
        ParameterSpec::slider("radius", 15.0, 10.0, 25.0, 0.1),
        ParameterSpec::slider("thickness", 2.0, 1.0, 3.5, 0.05),
        ParameterSpec::slider("height", 1.0, 0.5, 3.0, 0.05),
        ParameterSpec::slider("twist", 1.5, 0.0, 4.0, TWIST_STEP),
        ParameterSpec::toggle("twist_all", true),
        ParameterSpec::slider("inflate", 0.3, 0.0, 0.8, 0.05),
        ParameterSpec::slider("holder_radius", 2.5, 1.0, 5.0, 0.1),
    ]
);
