//! Zonation Configuration - operator-tunable defaults as TOML values
//!
//! Each section implements `Default` with the values used when no config
//! file is present.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults;
use crate::markers::{MarkerMode, MarkerOptions};

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "WELLZONE_CONFIG";
/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "wellzone.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration.
///
/// Load with `ZonationConfig::load()` which searches:
/// 1. `$WELLZONE_CONFIG` env var
/// 2. `./wellzone.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZonationConfig {
    /// Hole detection
    #[serde(default)]
    pub holes: HolesConfig,

    /// Zone interval extraction
    #[serde(default)]
    pub interval: IntervalConfig,

    /// Fence polylines
    #[serde(default)]
    pub fence: FenceConfig,

    /// Zonation markers
    #[serde(default)]
    pub markers: MarkersConfig,

    /// Well store
    #[serde(default)]
    pub storage: StorageConfig,
}

impl ZonationConfig {
    /// Load configuration using the standard search order.
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded config from {}", CONFIG_ENV);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", CONFIG_ENV);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", CONFIG_ENV);
            }
        }

        // 2. Check ./wellzone.toml
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded config from ./{}", LOCAL_CONFIG_FILE);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", LOCAL_CONFIG_FILE);
                }
            }
        }

        // 3. Defaults
        info!("No {} found, using built-in defaults", LOCAL_CONFIG_FILE);
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, err) => ConfigError::Parse(path.to_path_buf(), err),
            other => other,
        })
    }

    /// Parse and validate TOML text. Unknown keys only produce warnings.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Reject impossible values; log suspicious ones.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (errors, warnings) = super::validation::validate_ranges(self);
        for w in &warnings {
            warn!("{}", w);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Errors from loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({path}): {err}", path = .0.display(), err = .1)]
    Io(PathBuf, std::io::Error),

    #[error("Config parse error ({path}): {err}", path = .0.display(), err = .1)]
    Parse(PathBuf, toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(toml::ser::Error),

    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ============================================================================
// Sections
// ============================================================================

/// Hole detection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolesConfig {
    /// Longest undefined run (samples) still reported as a hole
    #[serde(default = "default_threshold_samples")]
    pub threshold_samples: usize,
}

fn default_threshold_samples() -> usize {
    defaults::HOLE_THRESHOLD_SAMPLES
}

impl Default for HolesConfig {
    fn default() -> Self {
        Self {
            threshold_samples: default_threshold_samples(),
        }
    }
}

/// Zone interval settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalConfig {
    /// Keep every Nth row per segment (1 = no resampling)
    #[serde(default = "default_resample_every")]
    pub resample_every: usize,
}

fn default_resample_every() -> usize {
    1
}

impl Default for IntervalConfig {
    fn default() -> Self {
        Self {
            resample_every: default_resample_every(),
        }
    }
}

/// Fence polyline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FenceConfig {
    #[serde(default = "default_fence_sampling")]
    pub sampling: f64,

    /// Sampling steps extrapolated at each end
    #[serde(default = "default_fence_extend")]
    pub extend: usize,

    #[serde(default)]
    pub tvd_min: Option<f64>,
}

fn default_fence_sampling() -> f64 {
    defaults::FENCE_SAMPLING
}
fn default_fence_extend() -> usize {
    defaults::FENCE_EXTEND
}

impl Default for FenceConfig {
    fn default() -> Self {
        Self {
            sampling: default_fence_sampling(),
            extend: default_fence_extend(),
            tvd_min: None,
        }
    }
}

/// Zonation marker settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkersConfig {
    /// Maximum inclination (degrees) for a usable point
    #[serde(default = "default_incl_limit")]
    pub incl_limit: f64,

    #[serde(default = "default_top_prefix")]
    pub top_prefix: String,

    #[serde(default)]
    pub use_undef: bool,
}

fn default_incl_limit() -> f64 {
    defaults::MARKER_INCL_LIMIT_DEG
}
fn default_top_prefix() -> String {
    defaults::MARKER_TOP_PREFIX.to_string()
}

impl Default for MarkersConfig {
    fn default() -> Self {
        Self {
            incl_limit: default_incl_limit(),
            top_prefix: default_top_prefix(),
            use_undef: false,
        }
    }
}

impl MarkersConfig {
    /// Marker options for tops (`tops = true`) or isochores.
    pub fn options(&self, tops: bool) -> MarkerOptions {
        MarkerOptions {
            mode: if tops {
                MarkerMode::Tops {
                    prefix: self.top_prefix.clone(),
                }
            } else {
                MarkerMode::Isochores
            },
            incl_limit: self.incl_limit,
            zonelist: None,
            use_undef: self.use_undef,
        }
    }
}

/// Well store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from(defaults::STORAGE_PATH)
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let cfg = ZonationConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.holes.threshold_samples, 5);
        assert_eq!(cfg.interval.resample_every, 1);
        assert_eq!(cfg.fence.sampling, 20.0);
        assert_eq!(cfg.fence.extend, 2);
        assert!(cfg.fence.tvd_min.is_none());
        assert_eq!(cfg.markers.top_prefix, "Top");
    }

    #[test]
    fn test_partial_override() {
        let cfg = ZonationConfig::from_toml_str(
            r#"
[fence]
sampling = 10.0
tvd_min = 1500.0
"#,
        )
        .unwrap();
        assert_eq!(cfg.fence.sampling, 10.0);
        assert_eq!(cfg.fence.extend, 2);
        assert_eq!(cfg.fence.tvd_min, Some(1500.0));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = ZonationConfig::from_toml_str("[interval]\nresample_every = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_toml_roundtrip_keeps_values() {
        let mut cfg = ZonationConfig::default();
        cfg.holes.threshold_samples = 9;
        let text = cfg.to_toml().unwrap();
        let back = ZonationConfig::from_toml_str(&text).unwrap();
        assert_eq!(back.holes.threshold_samples, 9);
    }

    #[test]
    fn test_marker_options_from_config() {
        let cfg = MarkersConfig::default();
        assert_eq!(
            cfg.options(true).mode,
            MarkerMode::Tops {
                prefix: "Top".to_string()
            }
        );
        assert_eq!(cfg.options(false).mode, MarkerMode::Isochores);
    }
}
