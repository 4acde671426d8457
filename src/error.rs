use thiserror::Error;

/// Top-level error type for the jewelgen mesh generator.
#[derive(Debug, Error)]
pub enum JewelgenError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors raised while validating archetype parameters.
///
/// These indicate a caller bug (a value the schema never declared), not a
/// runtime data problem; out-of-range numbers are clamped instead.
#[derive(Debug, Error)]
pub enum ParameterError {
    #[error("archetype {archetype} has no parameter named {name:?}")]
    Unknown {
        archetype: &'static str,
        name: String,
    },

    #[error("parameter {name:?} expects a {expected} value")]
    KindMismatch {
        name: &'static str,
        expected: &'static str,
    },

    #[error("parameter {name:?} is not a finite number")]
    NonFinite { name: &'static str },

    #[error("no archetype selected")]
    NoArchetype,
}

/// Errors related to mesh operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),
}

/// Errors related to mesh serialization.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("mesh has no triangles to export")]
    EmptyMesh,

    #[error("failed to encode mesh: {0}")]
    Encode(#[from] std::io::Error),
}

/// Convenience type alias for results using [`JewelgenError`].
pub type Result<T> = std::result::Result<T, JewelgenError>;
