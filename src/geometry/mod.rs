//! Trajectory Geometry Boundary
//!
//! The core never computes trajectory geometry itself. It hands the XYZ
//! trajectory to a [`GeometryProvider`] (measured depth, inclination,
//! horizontal length) or a [`Resampler`] (fence polylines) and only relies on
//! the shape of what comes back.
//!
//! ## Contract
//!
//! - Inputs are three equal-length slices (easting, northing, depth), N >= 0.
//! - Measured depth is non-decreasing, inclination is in degrees with
//!   0 = vertical down, horizontal length is relative to the first sample.
//! - Any failure is a [`GeometryError`]; callers treat it as fatal for the
//!   enclosing operation and never retry.
//!
//! [`PolylineGeometry`] is a piecewise-linear implementation of both traits.

mod buffers;
mod polyline;

pub use buffers::TrajectoryBuffers;
pub use polyline::PolylineGeometry;

use thiserror::Error;

/// Hard limit on the number of vertices a resampler may return
pub const FENCE_BUFFER_CAPACITY: usize = 1_000_000;

/// Failures reported by a geometry backend
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Input length mismatch: x={x}, y={y}, z={z}")]
    LengthMismatch { x: usize, y: usize, z: usize },

    #[error("Insufficient points: need {needed}, have {available}")]
    InsufficientPoints { needed: usize, available: usize },

    #[error("Non-finite coordinate at sample {0}")]
    NonFiniteInput(usize),

    #[error("Invalid sampling: interval {sampling}, extension {extension}")]
    InvalidSampling { sampling: f64, extension: f64 },

    #[error("Degenerate trajectory (zero length)")]
    DegenerateTrajectory,

    #[error("Output needs {required} vertices, capacity is {capacity}")]
    CapacityExceeded { required: usize, capacity: usize },

    #[error("Provider returned {actual} values for {expected} samples")]
    OutputLength { expected: usize, actual: usize },

    #[error("Numeric backend failed with status {0}")]
    Backend(i32),
}

/// Per-sample measured depth and inclination
#[derive(Debug, Clone, PartialEq)]
pub struct MdIncl {
    pub md: Vec<f64>,
    pub incl: Vec<f64>,
}

/// Resampled (and end-extended) polyline
#[derive(Debug, Clone, PartialEq)]
pub struct ResampledPolyline {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    /// Cumulative horizontal length from the first output vertex
    pub hlen: Vec<f64>,
}

impl ResampledPolyline {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Computes derived geometry logs from a trajectory
pub trait GeometryProvider {
    /// Measured depth and inclination for every sample.
    fn measured_depth_and_inclination(
        &self,
        x: &[f64],
        y: &[f64],
        z: &[f64],
    ) -> Result<MdIncl, GeometryError>;

    /// Horizontal length relative to the first sample.
    fn horizontal_length(&self, x: &[f64], y: &[f64], z: &[f64]) -> Result<Vec<f64>, GeometryError>;
}

/// Resamples a trajectory into a fixed-interval polyline
pub trait Resampler {
    /// Resample at `sampling` spacing and extend both ends by `extension`.
    ///
    /// Implementations must fail with [`GeometryError::CapacityExceeded`]
    /// rather than return more than `capacity` vertices. Callers check the
    /// vertex count and column lengths again on return.
    fn resample(
        &self,
        x: &[f64],
        y: &[f64],
        z: &[f64],
        sampling: f64,
        extension: f64,
        capacity: usize,
    ) -> Result<ResampledPolyline, GeometryError>;
}

/// Check that a provider returned one value per input sample.
pub(crate) fn check_output_len(expected: usize, values: &[f64]) -> Result<(), GeometryError> {
    if values.len() == expected {
        Ok(())
    } else {
        Err(GeometryError::OutputLength {
            expected,
            actual: values.len(),
        })
    }
}
