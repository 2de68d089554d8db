//! wellzone: Well Log Zonation Analysis
//!
//! In-memory well log tables with zonation quality control and fence output.
//!
//! ## Architecture
//!
//! - **Types**: Log tables with continuous/discrete logs and code records
//! - **Zonation**: Hole detection and zone interval segmentation
//! - **Fence**: Resampled trajectory polylines for cross-sections
//! - **Geometry**: Pluggable trajectory geometry (MD, inclination, resampling)
//! - **Markers**: Zone tops / isochores through an external extractor
//! - **Storage**: Sled-backed well store

pub mod config;
pub mod error;
pub mod fence;
pub mod geometry;
pub mod markers;
pub mod storage;
pub mod types;
pub mod zonation;

// Re-export configuration
pub use config::ZonationConfig;

// Re-export commonly used types
pub use error::WellError;
pub use types::{
    CodeRecord, FenceBuffer, FenceFormat, FenceOutput, FencePolyline, FilledColumn, FilledTable,
    HoleRecord, HoleReport, HoleSpan, LogTable, LogType, Well, WellImport, ZoneInterval,
};

// Re-export geometry boundary
pub use geometry::{GeometryError, GeometryProvider, PolylineGeometry, Resampler};

// Re-export operations
pub use fence::FenceBuilder;
pub use markers::{MarkerExtractor, MarkerOptions, ZoneMarker};
pub use storage::{StorageError, WellStore};
pub use zonation::{find_zonation_holes, report_holes_batch};
