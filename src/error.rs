//! Error taxonomy for well operations
//!
//! Structural and argument errors surface immediately. Numeric-backend
//! failures wrap [`GeometryError`] and abort the enclosing call. Data-quality
//! conditions (missing zonelog, empty result) are not errors at all: they are
//! logged with `warn!` and returned as `None`.

use thiserror::Error;

use crate::geometry::GeometryError;
use crate::markers::MarkerError;

/// Errors raised by `LogTable` / `Well` operations
#[derive(Debug, Error)]
pub enum WellError {
    #[error("Unknown log: {0}")]
    UnknownLog(String),

    #[error("Cannot set code record for '{0}' (not a discrete log)")]
    RecordNotSettable(String),

    #[error("Log '{0}' is not discrete")]
    NotDiscrete(String),

    #[error("Log '{0}' already exists")]
    DuplicateLog(String),

    #[error("Log name '{0}' is reserved for the trajectory")]
    ReservedLog(String),

    #[error("Length mismatch for '{name}': expected {expected}, got {actual}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Geometry computation failed: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Marker extraction failed: {0}")]
    Marker(#[from] MarkerError),
}
