//! Operations on triangle meshes: post-processing, transforms, composition
//! and queries.

mod compose;
pub mod post;
pub mod query;
pub mod transform;

pub use compose::Compose;
