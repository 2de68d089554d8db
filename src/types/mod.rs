//! Core data model: log tables, wells and the derived zonation/fence records

mod fence;
mod log_table;
mod well;
mod zonation;

pub use fence::{FenceBuffer, FenceFormat, FenceOutput, FencePolyline};
pub use log_table::{
    to_code, CodeRecord, FilledColumn, FilledTable, LogTable, LogType, Q_INCL, Q_MDEPTH, R_HLEN,
    TRAJECTORY, UNDEF, UNDEF_INT, UNDEF_INT_LIMIT, UNDEF_LIMIT, X_UTME, Y_UTMN, Z_TVDSS,
};
pub(crate) use log_table::stride_indices;
pub use well::{Well, WellImport};
pub use zonation::{HoleRecord, HoleReport, HoleSpan, ZoneInterval, SEGMENT_ID};
