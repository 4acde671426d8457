//! Mesh serialization.

pub mod stl;
