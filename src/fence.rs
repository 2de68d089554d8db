//! Fence Polyline Builder
//!
//! Resamples a well trajectory into a fixed-interval polyline for
//! cross-section display. Both ends are extended by `extend` sampling steps;
//! those synthetic vertices carry no well label.

use tracing::{debug, warn};

use crate::config::defaults::{FENCE_EXTEND, FENCE_SAMPLING};
use crate::config::FenceConfig;
use crate::error::WellError;
use crate::geometry::{
    check_output_len, GeometryError, Resampler, TrajectoryBuffers, FENCE_BUFFER_CAPACITY,
};
use crate::types::{FenceBuffer, FenceFormat, FenceOutput, FencePolyline, Well};

/// Fence build parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FenceBuilder {
    /// Sampling interval along the trajectory
    pub sampling: f64,
    /// Number of sampling steps to extrapolate at each end
    pub extend: usize,
    /// Only rows deeper than this take part
    pub tvd_min: Option<f64>,
}

impl Default for FenceBuilder {
    fn default() -> Self {
        Self {
            sampling: FENCE_SAMPLING,
            extend: FENCE_EXTEND,
            tvd_min: None,
        }
    }
}

impl From<&FenceConfig> for FenceBuilder {
    fn from(cfg: &FenceConfig) -> Self {
        Self {
            sampling: cfg.sampling,
            extend: cfg.extend,
            tvd_min: cfg.tvd_min,
        }
    }
}

impl FenceBuilder {
    pub fn new(sampling: f64, extend: usize) -> Self {
        Self {
            sampling,
            extend,
            tvd_min: None,
        }
    }

    pub fn with_tvd_min(mut self, tvd_min: f64) -> Self {
        self.tvd_min = Some(tvd_min);
        self
    }

    /// Build the fence for a well.
    ///
    /// Returns `Ok(None)` (with a warning) when fewer than two rows remain
    /// after the depth filter. A resampler failure is returned as an error.
    /// The well is never modified.
    pub fn build<R: Resampler + ?Sized>(
        &self,
        well: &Well,
        resampler: &R,
        format: FenceFormat,
    ) -> Result<Option<FenceOutput>, WellError> {
        let table = match self.tvd_min {
            Some(tvd_min) => {
                let z = well.table().z();
                well.table().filter_rows(|i| z[i] > tvd_min)
            }
            None => well.table().clone(),
        };

        if table.nrow() < 2 {
            warn!(
                well = %well.name(),
                rows = table.nrow(),
                tvd_min = ?self.tvd_min,
                "Well does not have enough points in interval, outside range?"
            );
            return Ok(None);
        }

        let extension = self.sampling * self.extend as f64;
        let line = TrajectoryBuffers::acquire(&table).compute(|x, y, z| {
            resampler.resample(x, y, z, self.sampling, extension, FENCE_BUFFER_CAPACITY)
        })?;
        let m = line.len();
        if m > FENCE_BUFFER_CAPACITY {
            return Err(GeometryError::CapacityExceeded {
                required: m,
                capacity: FENCE_BUFFER_CAPACITY,
            }
            .into());
        }
        check_output_len(m, &line.y)?;
        check_output_len(m, &line.z)?;
        check_output_len(m, &line.hlen)?;
        debug!(well = %well.name(), vertices = m, sampling = self.sampling, extend = self.extend, "Resampled fence");

        let output = match format {
            FenceFormat::Raw => {
                FenceOutput::Raw(FenceBuffer::from_columns(&line.x, &line.y, &line.z, &line.hlen))
            }
            FenceFormat::Polyline => {
                let name = well.xwellname();
                let well_labels = (0..m)
                    .map(|i| {
                        let interior = i >= self.extend && i + self.extend < m;
                        interior.then(|| name.clone())
                    })
                    .collect();
                FenceOutput::Polyline(FencePolyline {
                    name,
                    poly_id: vec![0; m],
                    well: well_labels,
                    x: line.x,
                    y: line.y,
                    z: line.z,
                    hlen: line.hlen,
                })
            }
        };
        Ok(Some(output))
    }
}
