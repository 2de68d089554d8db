//! Fence polyline outputs

use serde::{Deserialize, Serialize};

/// Requested fence packaging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FenceFormat {
    /// M x 4 numeric buffer
    Raw,
    /// Annotated polyline with per-vertex well labels
    #[default]
    Polyline,
}

/// Raw fence: M rows of (x, y, z, hlen) stored column-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FenceBuffer {
    nrow: usize,
    data: Vec<f64>,
}

impl FenceBuffer {
    pub const NCOL: usize = 4;

    /// Pack four equal-length columns.
    pub(crate) fn from_columns(x: &[f64], y: &[f64], z: &[f64], hlen: &[f64]) -> Self {
        let nrow = x.len();
        let mut data = Vec::with_capacity(nrow * Self::NCOL);
        for col in [x, y, z, hlen] {
            data.extend_from_slice(col);
        }
        Self { nrow, data }
    }

    pub fn nrow(&self) -> usize {
        self.nrow
    }

    /// Value at (row, col); `None` when out of range
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.nrow && col < Self::NCOL {
            Some(self.data[col * self.nrow + row])
        } else {
            None
        }
    }

    /// One full column (0 = x, 1 = y, 2 = z, 3 = hlen)
    pub fn column(&self, col: usize) -> Option<&[f64]> {
        (col < Self::NCOL).then(|| &self.data[col * self.nrow..(col + 1) * self.nrow])
    }

    /// Underlying column-major storage
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

/// Annotated fence polyline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FencePolyline {
    /// File-safe well name
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub hlen: Vec<f64>,
    /// Polyline id, always 0 for a single well
    pub poly_id: Vec<i32>,
    /// Well label per vertex; `None` on extrapolated end vertices
    pub well: Vec<Option<String>>,
}

impl FencePolyline {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Result of a fence build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum FenceOutput {
    Raw(FenceBuffer),
    Polyline(FencePolyline),
}
