//! Zonation result types: hole findings and zone interval segments

use serde::{Deserialize, Serialize};

use super::log_table::FilledTable;

/// Column holding the dense segment id in a [`ZoneInterval`]
pub const SEGMENT_ID: &str = "POLY_ID";

/// A hole found by the raw scan: the row closing the hole and the length
/// of the undefined run before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleSpan {
    pub index: usize,
    pub length: usize,
    pub zone: i32,
}

/// One reported zonation hole
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoleRecord {
    /// Row index of the defined sample closing the hole
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Zone code of the closing sample
    pub zone: i32,
    pub well: String,
    /// Measured depth at `index`; `None` when undefined there
    pub md: Option<f64>,
    /// Number of undefined samples in the hole
    pub hole_length: usize,
}

/// Hole findings for one well. Only built when at least one hole exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoleReport {
    pub well: String,
    pub zonelog: String,
    pub mdlog: String,
    pub threshold: usize,
    pub holes: Vec<HoleRecord>,
}

impl HoleReport {
    pub fn len(&self) -> usize {
        self.holes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holes.is_empty()
    }
}

/// Rows of one zone, grouped into contiguous segments.
///
/// The table holds `X_UTME`, `Y_UTMN`, `Z_TVDSS`, any requested extra logs
/// (sentinel-filled) and the `POLY_ID` segment column, in ascending
/// segment order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneInterval {
    pub zone: i32,
    pub table: FilledTable,
}

impl ZoneInterval {
    pub fn nrow(&self) -> usize {
        self.table.nrow()
    }

    /// Segment id per row
    pub fn segment_ids(&self) -> &[i32] {
        self.table
            .get(SEGMENT_ID)
            .and_then(|c| c.as_discrete())
            .unwrap_or(&[])
    }

    /// Number of distinct segments
    pub fn segment_count(&self) -> usize {
        self.segment_ids().last().map_or(0, |&id| id as usize + 1)
    }
}
