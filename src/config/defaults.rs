//! System-wide default constants.
//!
//! Centralises the built-in values behind every config section.

// ============================================================================
// Zonation
// ============================================================================

/// Longest undefined zonelog run (samples) still reported as a hole.
pub const HOLE_THRESHOLD_SAMPLES: usize = 5;

// ============================================================================
// Fence
// ============================================================================

/// Fence sampling interval (same length unit as the trajectory).
pub const FENCE_SAMPLING: f64 = 20.0;

/// Sampling steps extrapolated beyond each end of the trajectory.
pub const FENCE_EXTEND: usize = 2;

/// Extension counts above this are suspicious (`extend * sampling` past the well).
pub const FENCE_EXTEND_WARN: usize = 100;

// ============================================================================
// Markers
// ============================================================================

/// Maximum well inclination (degrees) for a usable zonation point.
pub const MARKER_INCL_LIMIT_DEG: f64 = 80.0;

/// Prefix of zone top names.
pub const MARKER_TOP_PREFIX: &str = "Top";

// ============================================================================
// Storage
// ============================================================================

/// Default on-disk location of the well store.
pub const STORAGE_PATH: &str = "./data/wells";
