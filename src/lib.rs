//! Parametric jewelry mesh generator.
//!
//! Archetypes from the [`catalog`] turn a small set of validated parameters
//! into a watertight-where-possible [`tessellation::TriangleMesh`] through a
//! fixed pipeline: curve or surface evaluation, tube sweep or grid
//! tessellation, welding, optional bending and holder attachment, and normal
//! computation. [`io::stl`] serializes the result.

pub mod catalog;
pub mod error;
pub mod geometry;
pub mod io;
pub mod math;
pub mod operations;
pub mod tessellation;

pub use error::{JewelgenError, Result};
