//! wellzone - Well Log Zonation Analysis
//!
//! Imports wells (JSON `WellImport` documents) into a local store and runs
//! zonation checks and fence extraction on them.
//!
//! # Usage
//!
//! ```bash
//! # Import a well
//! wellzone import --file well_a1.json
//!
//! # Zonation holes of at most 3 samples
//! wellzone holes --well A-1 --threshold 3
//!
//! # Zone 2 segments, every 4th row, keep GR
//! wellzone interval --well A-1 --zone 2 --resample 4 --extra GR
//!
//! # Fence polyline below 1500 m TVD
//! wellzone fence --well A-1 --tvd-min 1500
//! ```
//!
//! # Environment Variables
//!
//! - `WELLZONE_CONFIG`: Path to the TOML config (default: ./wellzone.toml)
//! - `WELLZONE_STORE`: Store directory (overrides `[storage] path`)
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use wellzone::config::{self, ZonationConfig};
use wellzone::{
    report_holes_batch, FenceBuilder, FenceFormat, PolylineGeometry, Well, WellImport, WellStore,
};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "wellzone")]
#[command(about = "Well log zonation checks and fence polylines")]
#[command(version)]
struct CliArgs {
    /// Store directory (default: `[storage] path` from config)
    #[arg(long, global = true, env = "WELLZONE_STORE")]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Import a well from a JSON file into the store
    Import {
        /// Path to a JSON `WellImport` document
        #[arg(long)]
        file: PathBuf,
    },

    /// List stored wells
    List,

    /// Report zonation holes (all wells when --well is omitted)
    Holes {
        #[arg(long)]
        well: Option<String>,
        /// Longest undefined run still reported (default: config)
        #[arg(long)]
        threshold: Option<usize>,
    },

    /// Extract the contiguous segments of one zone
    Interval {
        #[arg(long)]
        well: String,
        /// Zone code
        #[arg(long)]
        zone: i32,
        /// Keep every Nth row per segment (default: config)
        #[arg(long)]
        resample: Option<usize>,
        /// Extra logs to carry along
        #[arg(long, num_args = 1..)]
        extra: Vec<String>,
    },

    /// Build a fence polyline from the trajectory
    Fence {
        #[arg(long)]
        well: String,
        #[arg(long)]
        sampling: Option<f64>,
        #[arg(long)]
        extend: Option<usize>,
        #[arg(long)]
        tvd_min: Option<f64>,
        /// Emit the raw M x 4 buffer instead of the labelled polyline
        #[arg(long)]
        raw: bool,
    },
}

// ============================================================================
// Commands
// ============================================================================

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{text}");
    Ok(())
}

fn load_well(store: &WellStore, name: &str) -> Result<Well> {
    match store.get(name).with_context(|| format!("Failed to load well '{name}'"))? {
        Some(well) => Ok(well),
        None => bail!("Well '{name}' not found in store"),
    }
}

fn run_import(store: &WellStore, file: &Path) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let import: WellImport = serde_json::from_str(&text)
        .with_context(|| format!("Invalid well document {}", file.display()))?;
    let well = Well::from_import(import).context("Well failed validation")?;
    store.put(&well).context("Failed to store well")?;
    info!(
        well = %well.name(),
        rows = well.table().nrow(),
        logs = well.table().nlogs(),
        "Imported well"
    );
    Ok(())
}

fn run_holes(store: &WellStore, well: Option<&str>, threshold: usize) -> Result<()> {
    let wells = match well {
        Some(name) => vec![load_well(store, name)?],
        None => store.load_all(),
    };
    let results = report_holes_batch(&wells, threshold);
    let found: Vec<_> = results.into_iter().filter_map(|(_, report)| report).collect();
    if found.is_empty() {
        info!(wells = wells.len(), threshold, "No zonation holes found");
    }
    print_json(&found)
}

fn run_interval(
    store: &WellStore,
    name: &str,
    zone: i32,
    resample: usize,
    extra: &[String],
) -> Result<()> {
    let well = load_well(store, name)?;
    let extra: Vec<&str> = extra.iter().map(String::as_str).collect();
    match well.zone_interval(zone, resample, &extra)? {
        Some(interval) => print_json(&interval),
        None => {
            warn!(well = %name, zone, "No interval extracted");
            Ok(())
        }
    }
}

fn run_fence(store: &WellStore, name: &str, builder: FenceBuilder, raw: bool) -> Result<()> {
    let well = load_well(store, name)?;
    let format = if raw {
        FenceFormat::Raw
    } else {
        FenceFormat::Polyline
    };
    match builder.build(&well, &PolylineGeometry::new(), format)? {
        Some(output) => print_json(&output),
        None => Ok(()),
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    config::init(ZonationConfig::load());
    let cfg = config::get();

    let store_path = args.store.unwrap_or_else(|| cfg.storage.path.clone());
    let store = WellStore::open(&store_path)
        .with_context(|| format!("Failed to open well store at {}", store_path.display()))?;

    match args.command {
        SubCommand::Import { file } => run_import(&store, &file),
        SubCommand::List => {
            for name in store.list_names() {
                println!("{name}");
            }
            Ok(())
        }
        SubCommand::Holes { well, threshold } => run_holes(
            &store,
            well.as_deref(),
            threshold.unwrap_or(cfg.holes.threshold_samples),
        ),
        SubCommand::Interval {
            well,
            zone,
            resample,
            extra,
        } => run_interval(
            &store,
            &well,
            zone,
            resample.unwrap_or(cfg.interval.resample_every),
            &extra,
        ),
        SubCommand::Fence {
            well,
            sampling,
            extend,
            tvd_min,
            raw,
        } => {
            let mut builder = FenceBuilder::from(&cfg.fence);
            if let Some(s) = sampling {
                builder.sampling = s;
            }
            if let Some(e) = extend {
                builder.extend = e;
            }
            if let Some(t) = tvd_min {
                builder = builder.with_tvd_min(t);
            }
            run_fence(&store, &well, builder, raw)
        }
    }
}
