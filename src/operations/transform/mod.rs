//! Rigid and affine transforms applied to whole meshes.

mod general;
mod rotate;
mod translate;

pub use general::GeneralTransform;
pub use rotate::Rotate;
pub use translate::Translate;
