//! Scoped trajectory buffers handed to a geometry backend.
//!
//! Buffers are acquired right before a numeric call and released when the
//! guard drops, whether the call succeeded or not.

use tracing::trace;

use super::GeometryError;
use crate::types::LogTable;

/// Owned copy of the trajectory columns for one backend call
#[derive(Debug)]
pub struct TrajectoryBuffers {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl TrajectoryBuffers {
    /// Copy the trajectory out of a table.
    pub fn acquire(table: &LogTable) -> Self {
        let buffers = Self {
            x: table.x().to_vec(),
            y: table.y().to_vec(),
            z: table.z().to_vec(),
        };
        trace!(samples = buffers.len(), "Acquired trajectory buffers");
        buffers
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Run a backend call over the buffers. The buffers are consumed and
    /// dropped when this returns.
    pub fn compute<T, F>(self, f: F) -> Result<T, GeometryError>
    where
        F: FnOnce(&[f64], &[f64], &[f64]) -> Result<T, GeometryError>,
    {
        f(&self.x, &self.y, &self.z)
    }
}

impl Drop for TrajectoryBuffers {
    fn drop(&mut self) {
        trace!(samples = self.x.len(), "Released trajectory buffers");
    }
}
