//! Zonation Markers
//!
//! Zone tops / isochore points are computed by an external
//! [`MarkerExtractor`]. This module prepares its input (filled table,
//! zonelist, measured depth, inclination) and forwards the call.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::defaults::{MARKER_INCL_LIMIT_DEG, MARKER_TOP_PREFIX};
use crate::error::WellError;
use crate::geometry::GeometryProvider;
use crate::types::{FilledTable, Well, Q_INCL, Q_MDEPTH};

/// Failures reported by a marker extractor
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MarkerError {
    #[error("Required input missing: {0}")]
    MissingInput(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),
}

/// What kind of marker rows to produce
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerMode {
    /// Zone tops, named `<prefix><zone label>`
    Tops { prefix: String },
    /// Zone thickness points
    Isochores,
}

/// Options for [`Well::zonation_points`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerOptions {
    pub mode: MarkerMode,
    /// Maximum well inclination (degrees) for a usable point
    pub incl_limit: f64,
    /// Zones to report; `None` means every code in the zonelog record
    pub zonelist: Option<Vec<i32>>,
    /// Also use transitions from undefined zonation
    pub use_undef: bool,
}

impl Default for MarkerOptions {
    fn default() -> Self {
        Self {
            mode: MarkerMode::Tops {
                prefix: MARKER_TOP_PREFIX.to_string(),
            },
            incl_limit: MARKER_INCL_LIMIT_DEG,
            zonelist: None,
            use_undef: false,
        }
    }
}

/// Everything an extractor gets to see
#[derive(Debug)]
pub struct MarkerInput<'a> {
    pub well: &'a str,
    pub zonelog: &'a str,
    pub table: &'a FilledTable,
    pub zonelist: &'a [i32],
    pub md: &'a [f64],
    pub incl: &'a [f64],
    pub options: &'a MarkerOptions,
}

/// One marker row returned by an extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneMarker {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub md: f64,
    pub incl: f64,
    /// Top name or zone name
    pub name: String,
    pub well: String,
    /// Thickness for isochore rows
    #[serde(default)]
    pub thickness: Option<f64>,
}

/// Turns zone transitions into top / isochore records
pub trait MarkerExtractor {
    fn extract(&self, input: &MarkerInput<'_>) -> Result<Vec<ZoneMarker>, MarkerError>;
}

impl Well {
    /// Compute geometry logs, then hand the zonation to a marker extractor.
    ///
    /// Returns `Ok(None)` when no zonelog is designated. The measured depth
    /// passed on is the designated mdlog when present, else `Q_MDEPTH`.
    pub fn zonation_points<G, E>(
        &mut self,
        provider: &G,
        extractor: &E,
        options: &MarkerOptions,
    ) -> Result<Option<Vec<ZoneMarker>>, WellError>
    where
        G: GeometryProvider + ?Sized,
        E: MarkerExtractor + ?Sized,
    {
        self.geometrics(provider)?;

        let Some(zonelog) = self.zonelog() else {
            warn!(well = %self.name(), "No zonelog designated, cannot extract zonation points");
            return Ok(None);
        };

        let zonelist = match &options.zonelist {
            Some(list) => list.clone(),
            None => self
                .table()
                .record(zonelog)
                .map(|r| r.codes())
                .unwrap_or_default(),
        };
        info!(well = %self.name(), ?zonelist, "Find zonation points");

        let table = self.table();
        let md_name = self.mdlog().unwrap_or(Q_MDEPTH);
        let md = table
            .get(md_name)
            .ok_or_else(|| MarkerError::MissingInput(md_name.to_string()))?;
        let incl = table
            .get(Q_INCL)
            .ok_or_else(|| MarkerError::MissingInput(Q_INCL.to_string()))?;
        let filled = table.filled();
        let wname = self.xwellname();

        let input = MarkerInput {
            well: &wname,
            zonelog,
            table: &filled,
            zonelist: &zonelist,
            md,
            incl,
            options,
        };
        let markers = extractor.extract(&input)?;
        debug!(well = %self.name(), markers = markers.len(), "Zonation points extracted");
        Ok(Some(markers))
    }
}
