//! Configuration Module
//!
//! Zonation, fence and storage defaults loaded from TOML.
//!
//! ## Loading Order
//!
//! 1. `WELLZONE_CONFIG` environment variable (path to TOML file)
//! 2. `wellzone.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! Call `config::init()` once at startup, then `config::get()` anywhere:
//!
//! ```ignore
//! config::init(ZonationConfig::load());
//! let threshold = config::get().holes.threshold_samples;
//! ```

mod zonation_config;
pub mod defaults;
pub mod validation;

pub use zonation_config::*;

use std::sync::OnceLock;

/// Global configuration, initialized once at startup.
static CONFIG: OnceLock<ZonationConfig> = OnceLock::new();

/// Initialize the global configuration. Later calls are ignored.
pub fn init(config: ZonationConfig) {
    if CONFIG.set(config).is_err() {
        tracing::warn!("config::init() called more than once, ignoring");
    }
}

/// Get the global configuration, falling back to built-in defaults when
/// `init()` was never called.
pub fn get() -> &'static ZonationConfig {
    CONFIG.get_or_init(ZonationConfig::default)
}

/// Check whether the config has been initialized.
pub fn is_initialized() -> bool {
    CONFIG.get().is_some()
}
