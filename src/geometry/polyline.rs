//! Piecewise-linear geometry backend
//!
//! Treats the trajectory as straight segments between samples:
//! - MD is the cumulative 3D chord length (MD[0] = 0)
//! - Inclination is the angle of the arriving segment from vertical down
//! - Horizontal length is the cumulative XY chord length
//! - Resampling walks the 3D along-hole length at a fixed step and extends
//!   both ends along the first/last non-degenerate segment

use super::{GeometryError, GeometryProvider, MdIncl, ResampledPolyline, Resampler};

/// Segments shorter than this are treated as repeated samples
const MIN_SEGMENT_LENGTH: f64 = 1e-9;

/// Piecewise-linear [`GeometryProvider`] and [`Resampler`]
#[derive(Debug, Clone, Copy, Default)]
pub struct PolylineGeometry;

impl PolylineGeometry {
    pub fn new() -> Self {
        Self
    }

    fn check_inputs(x: &[f64], y: &[f64], z: &[f64]) -> Result<(), GeometryError> {
        if x.len() != y.len() || x.len() != z.len() {
            return Err(GeometryError::LengthMismatch {
                x: x.len(),
                y: y.len(),
                z: z.len(),
            });
        }
        if let Some(i) = (0..x.len()).find(|&i| !(x[i].is_finite() && y[i].is_finite() && z[i].is_finite())) {
            return Err(GeometryError::NonFiniteInput(i));
        }
        Ok(())
    }

    /// Cumulative 3D length at each vertex
    fn along_hole(x: &[f64], y: &[f64], z: &[f64]) -> Vec<f64> {
        let mut s = Vec::with_capacity(x.len());
        let mut acc = 0.0;
        for i in 0..x.len() {
            if i > 0 {
                acc += segment_length(x, y, z, i - 1, i);
            }
            s.push(acc);
        }
        s
    }

    /// Unit direction of the first segment (scanning from `indices`) with
    /// non-zero length.
    fn direction<I: Iterator<Item = usize>>(
        x: &[f64],
        y: &[f64],
        z: &[f64],
        mut indices: I,
    ) -> Option<[f64; 3]> {
        indices.find_map(|i| {
            let len = segment_length(x, y, z, i, i + 1);
            (len > MIN_SEGMENT_LENGTH).then(|| {
                [
                    (x[i + 1] - x[i]) / len,
                    (y[i + 1] - y[i]) / len,
                    (z[i + 1] - z[i]) / len,
                ]
            })
        })
    }
}

fn segment_length(x: &[f64], y: &[f64], z: &[f64], a: usize, b: usize) -> f64 {
    let dx = x[b] - x[a];
    let dy = y[b] - y[a];
    let dz = z[b] - z[a];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

impl GeometryProvider for PolylineGeometry {
    fn measured_depth_and_inclination(
        &self,
        x: &[f64],
        y: &[f64],
        z: &[f64],
    ) -> Result<MdIncl, GeometryError> {
        Self::check_inputs(x, y, z)?;
        let n = x.len();
        let md = Self::along_hole(x, y, z);

        let mut incl = vec![0.0; n];
        let mut first = None;
        let mut last = None;
        for i in 1..n {
            let dh = (x[i] - x[i - 1]).hypot(y[i] - y[i - 1]);
            let dz = z[i] - z[i - 1];
            if dh.hypot(dz) > MIN_SEGMENT_LENGTH {
                let angle = dh.atan2(dz).to_degrees();
                first.get_or_insert(angle);
                last = Some(angle);
            }
            incl[i] = last.or(first).unwrap_or(0.0);
        }
        // leading repeated samples take the first defined segment angle
        if let Some(angle) = first {
            for v in incl.iter_mut().take_while(|v| **v == 0.0) {
                *v = angle;
            }
        }

        Ok(MdIncl { md, incl })
    }

    fn horizontal_length(&self, x: &[f64], y: &[f64], z: &[f64]) -> Result<Vec<f64>, GeometryError> {
        Self::check_inputs(x, y, z)?;
        let mut hlen = Vec::with_capacity(x.len());
        let mut acc = 0.0;
        for i in 0..x.len() {
            if i > 0 {
                acc += (x[i] - x[i - 1]).hypot(y[i] - y[i - 1]);
            }
            hlen.push(acc);
        }
        Ok(hlen)
    }
}

impl Resampler for PolylineGeometry {
    fn resample(
        &self,
        x: &[f64],
        y: &[f64],
        z: &[f64],
        sampling: f64,
        extension: f64,
        capacity: usize,
    ) -> Result<ResampledPolyline, GeometryError> {
        Self::check_inputs(x, y, z)?;
        if !(sampling.is_finite() && sampling > 0.0 && extension.is_finite() && extension >= 0.0) {
            return Err(GeometryError::InvalidSampling { sampling, extension });
        }
        let n = x.len();
        if n < 2 {
            return Err(GeometryError::InsufficientPoints {
                needed: 2,
                available: n,
            });
        }

        let s = Self::along_hole(x, y, z);
        let total = s[n - 1];
        if total <= MIN_SEGMENT_LENGTH {
            return Err(GeometryError::DegenerateTrajectory);
        }

        let steps = (total / sampling).floor();
        let n_ext = (extension / sampling).round();
        // a final station at `total` only when the track is not a whole number of steps
        let has_tail = total - steps * sampling > sampling * 1e-6;
        let required = steps + 1.0 + f64::from(u8::from(has_tail)) + 2.0 * n_ext;
        if required > capacity as f64 {
            return Err(GeometryError::CapacityExceeded {
                required: if required >= usize::MAX as f64 { usize::MAX } else { required as usize },
                capacity,
            });
        }
        let steps = steps as usize;
        let n_ext = n_ext as usize;

        // along-hole positions of interior vertices, last vertex always included
        let mut stations: Vec<f64> = (0..=steps).map(|k| k as f64 * sampling).collect();
        if has_tail {
            stations.push(total);
        }

        let (Some(d_start), Some(d_end)) = (
            Self::direction(x, y, z, 0..n - 1),
            Self::direction(x, y, z, (0..n - 1).rev()),
        ) else {
            return Err(GeometryError::DegenerateTrajectory);
        };

        let m = stations.len() + 2 * n_ext;
        let mut out = ResampledPolyline {
            x: Vec::with_capacity(m),
            y: Vec::with_capacity(m),
            z: Vec::with_capacity(m),
            hlen: Vec::with_capacity(m),
        };
        let mut push = |p: [f64; 3]| {
            out.x.push(p[0]);
            out.y.push(p[1]);
            out.z.push(p[2]);
        };

        for j in (1..=n_ext).rev() {
            let d = j as f64 * sampling;
            push([x[0] - d_start[0] * d, y[0] - d_start[1] * d, z[0] - d_start[2] * d]);
        }

        let mut seg = 0;
        for &st in &stations {
            while seg + 1 < n - 1 && s[seg + 1] < st {
                seg += 1;
            }
            let len = s[seg + 1] - s[seg];
            let t = if len > MIN_SEGMENT_LENGTH {
                ((st - s[seg]) / len).clamp(0.0, 1.0)
            } else {
                1.0
            };
            push([
                x[seg] + t * (x[seg + 1] - x[seg]),
                y[seg] + t * (y[seg + 1] - y[seg]),
                z[seg] + t * (z[seg + 1] - z[seg]),
            ]);
        }

        for j in 1..=n_ext {
            let d = j as f64 * sampling;
            push([
                x[n - 1] + d_end[0] * d,
                y[n - 1] + d_end[1] * d,
                z[n - 1] + d_end[2] * d,
            ]);
        }

        let mut acc = 0.0;
        for i in 0..out.x.len() {
            if i > 0 {
                acc += (out.x[i] - out.x[i - 1]).hypot(out.y[i] - out.y[i - 1]);
            }
            out.hlen.push(acc);
        }

        Ok(out)
    }
}
