//! Zonation Hole Detection
//!
//! Zonation may have short gaps of undefined samples between defined zones;
//! a few undefined samples usually indicate that something is wrong in the
//! zonelog. This scan reports every such gap of at most `threshold` samples.
//!
//! ## Scan states
//!
//! - `SeekingFirstDefined`: skip undefined samples until a defined one.
//!   Leading undefined runs are never holes.
//! - `InZone`: inside defined zonation.
//! - `InHole`: counting an undefined run. A run longer than the threshold
//!   is abandoned and the scan goes back to seeking; the rest of that run is
//!   skipped until a defined sample re-establishes a boundary.

use tracing::{debug, info, warn};

use crate::types::{to_code, HoleRecord, HoleReport, HoleSpan, Well, UNDEF_INT_LIMIT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    SeekingFirstDefined,
    InZone,
    InHole { count: usize },
}

/// Scan a zonelog (NaN = undefined) and return the holes found, in order.
pub fn find_zonation_holes(zonelog: &[f64], threshold: usize) -> Vec<HoleSpan> {
    let mut holes = Vec::new();
    let mut state = ScanState::SeekingFirstDefined;

    for (index, &value) in zonelog.iter().enumerate() {
        let code = to_code(value).filter(|c| *c <= UNDEF_INT_LIMIT);

        state = match (state, code) {
            (ScanState::SeekingFirstDefined, None) => ScanState::SeekingFirstDefined,
            (ScanState::SeekingFirstDefined, Some(_)) | (ScanState::InZone, Some(_)) => {
                ScanState::InZone
            }
            (ScanState::InZone, None) => enter_or_abandon(1, threshold),
            (ScanState::InHole { count }, None) => enter_or_abandon(count + 1, threshold),
            (ScanState::InHole { count }, Some(zone)) => {
                holes.push(HoleSpan {
                    index,
                    length: count,
                    zone,
                });
                ScanState::InZone
            }
        };
    }

    holes
}

fn enter_or_abandon(count: usize, threshold: usize) -> ScanState {
    if count > threshold {
        debug!(count, threshold, "Undefined run exceeds threshold, restarting boundary search");
        ScanState::SeekingFirstDefined
    } else {
        ScanState::InHole { count }
    }
}

impl Well {
    /// Report zonation holes of at most `threshold` undefined samples.
    ///
    /// `zonelog` and `mdlog` default to the well's designated logs. Returns
    /// `None` when either log is missing (with a warning) or when no hole
    /// was found.
    pub fn report_zonation_holes(
        &self,
        zonelog: Option<&str>,
        mdlog: Option<&str>,
        threshold: usize,
    ) -> Option<HoleReport> {
        let table = self.table();
        let zonelog = zonelog.or_else(|| self.zonelog());
        let mdlog = mdlog.or_else(|| self.mdlog());
        debug!(well = %self.name(), ?mdlog, ?zonelog, "Scanning zonation holes");

        let Some((zname, zvalues)) = zonelog.and_then(|n| table.get(n).map(|v| (n, v))) else {
            warn!(well = %self.name(), ?zonelog, "Cannot get zonelog");
            return None;
        };
        let Some((mdname, mdvalues)) = mdlog.and_then(|n| table.get(n).map(|v| (n, v))) else {
            warn!(well = %self.name(), ?mdlog, "Cannot get mdlog");
            return None;
        };

        let wname = self.xwellname();
        let holes: Vec<HoleRecord> = find_zonation_holes(zvalues, threshold)
            .into_iter()
            .map(|span| {
                let md = mdvalues[span.index];
                HoleRecord {
                    index: span.index,
                    x: table.x()[span.index],
                    y: table.y()[span.index],
                    z: table.z()[span.index],
                    zone: span.zone,
                    well: wname.clone(),
                    md: (!md.is_nan()).then_some(md),
                    hole_length: span.length,
                }
            })
            .collect();

        if holes.is_empty() {
            return None;
        }

        info!(well = %self.name(), holes = holes.len(), threshold, "Zonation holes found");
        Some(HoleReport {
            well: wname,
            zonelog: zname.to_string(),
            mdlog: mdname.to_string(),
            threshold,
            holes,
        })
    }
}

/// Run hole detection over many wells. Wells lacking a zonelog or mdlog
/// yield `None` without stopping the batch.
pub fn report_holes_batch<'a, I>(wells: I, threshold: usize) -> Vec<(String, Option<HoleReport>)>
where
    I: IntoIterator<Item = &'a Well>,
{
    wells
        .into_iter()
        .map(|w| (w.name().to_string(), w.report_zonation_holes(None, None, threshold)))
        .collect()
}
