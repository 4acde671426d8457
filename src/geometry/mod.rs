pub mod curve;
pub mod surface;

pub use curve::{CatmullRom, Circle, Curve, CurveDomain, Lissajous2D, Lissajous3D, LissajousAxis, Path};
pub use surface::{Surface, SurfaceDomain, TaperCutoffs, TaperedTorsion, Torsion, TwistMode};
