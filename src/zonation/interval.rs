//! Zone Interval Segmentation
//!
//! Extracts the trajectory rows belonging to one zone code and groups them
//! into maximal contiguous runs. Run ids come from a change-point encoding
//! over the whole table, so two runs of the same zone separated by other
//! zones stay separate segments.

use tracing::{debug, warn};

use crate::error::WellError;
use crate::types::{stride_indices, FilledColumn, Well, ZoneInterval, SEGMENT_ID, TRAJECTORY};

/// Change-point run ids: a new id starts every time the flag changes
/// relative to the previous row. The first row has id 0.
pub fn change_point_ids(flags: &[bool]) -> Vec<usize> {
    let mut ids = Vec::with_capacity(flags.len());
    let mut id = 0;
    for (i, &flag) in flags.iter().enumerate() {
        if i > 0 && flag != flags[i - 1] {
            id += 1;
        }
        ids.push(id);
    }
    ids
}

impl Well {
    /// Rows of zone `zone_value` as contiguous segments.
    ///
    /// `resample_every > 1` keeps every Nth row of each segment plus the
    /// segment's last row. Only the trajectory, the `POLY_ID` segment column
    /// and `extra_logs` are kept. Returns `Ok(None)` when no zonelog is
    /// designated or the zone does not occur.
    pub fn zone_interval(
        &self,
        zone_value: i32,
        resample_every: usize,
        extra_logs: &[&str],
    ) -> Result<Option<ZoneInterval>, WellError> {
        if resample_every < 1 {
            return Err(WellError::InvalidArgument(
                "resample must be an integer >= 1".to_string(),
            ));
        }
        let Some(zonelog) = self.zonelog() else {
            warn!(well = %self.name(), "No zonelog designated, cannot extract zone interval");
            return Ok(None);
        };

        let filled = self.table().filled();
        let Some(zcodes) = filled.get(zonelog).and_then(FilledColumn::as_discrete) else {
            warn!(well = %self.name(), zonelog, "Zonelog column missing or not discrete");
            return Ok(None);
        };

        let flags: Vec<bool> = zcodes.iter().map(|&z| z == zone_value).collect();
        let runs = change_point_ids(&flags);

        // rows per matching run, in run order
        let mut segments: Vec<Vec<usize>> = Vec::new();
        let mut current_run = None;
        for (row, (&hit, &run)) in flags.iter().zip(&runs).enumerate() {
            if !hit {
                continue;
            }
            if current_run != Some(run) {
                segments.push(Vec::new());
                current_run = Some(run);
            }
            if let Some(seg) = segments.last_mut() {
                seg.push(row);
            }
        }

        if segments.is_empty() {
            debug!(well = %self.name(), zone = zone_value, "Zone not present (no data)");
            return Ok(None);
        }

        let mut rows = Vec::new();
        let mut segment_ids = Vec::new();
        for (seg_id, seg) in segments.iter().enumerate() {
            for i in stride_indices(seg.len(), resample_every, true) {
                rows.push(seg[i]);
                segment_ids.push(seg_id as i32);
            }
        }

        let mut keep: Vec<&str> = TRAJECTORY.to_vec();
        for &name in extra_logs {
            if filled.get(name).is_some() {
                keep.push(name);
            } else {
                warn!(well = %self.name(), log = name, "Extra log not found, skipping");
            }
        }

        let mut table = filled.select_rows(&rows);
        table.retain_columns(&keep);
        table.push(SEGMENT_ID, FilledColumn::Discrete(segment_ids));

        debug!(
            well = %self.name(),
            zone = zone_value,
            segments = segments.len(),
            rows = table.nrow(),
            "Extracted zone interval"
        );
        Ok(Some(ZoneInterval {
            zone: zone_value,
            table,
        }))
    }
}
