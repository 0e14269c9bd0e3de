//! Command-line interface definitions
//!
//! Lives in the library so that `xtask` can generate the man page from the
//! same definitions the binary parses.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::analysis::{AnalysisOptions, ContactSource, CoordinateMode, Units};
use crate::config::{ColorMode, Config};

/// Measure the per-slot delta between touch frames of a libinput recording
#[derive(Parser, Debug)]
#[command(name = "slotdelta")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print per-slot deltas for every frame of a recording
    Analyze(AnalyzeArgs),

    /// Show the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file location
    Path,
}

#[derive(Args, Debug, Clone, Default)]
pub struct AnalyzeArgs {
    /// Path to a libinput-record YAML file
    #[arg(value_name = "RECORDING")]
    pub recording: PathBuf,

    /// Use mm instead of device deltas
    #[arg(long)]
    pub use_mm: bool,

    /// Show the absolute distance relative to the first position
    #[arg(long)]
    pub show_distance: bool,

    /// Use ABS_X/ABS_Y instead of ABS_MT_POSITION_X/Y
    #[arg(long)]
    pub use_st: bool,

    /// Use absolute coordinates, not deltas
    #[arg(long)]
    pub use_absolute: bool,

    /// Mark any delta above this threshold
    #[arg(long, value_name = "DISTANCE")]
    pub threshold: Option<f64>,

    /// Ignore any delta below this threshold
    #[arg(long, value_name = "DISTANCE")]
    pub ignore_below: Option<f64>,

    /// Highlight touches above this pressure minimum
    #[arg(long, value_name = "PRESSURE")]
    pub pressure_min: Option<i32>,

    /// Highlight touches above this pressure maximum in a second color
    #[arg(long, value_name = "PRESSURE")]
    pub pressure_max: Option<i32>,

    /// When to color the output
    #[arg(long, value_enum)]
    pub color: Option<ColorMode>,

    /// Index of the device to analyze in multi-device recordings
    #[arg(long, default_value_t = 0)]
    pub device: usize,
}

impl AnalyzeArgs {
    /// Merge flags over config file defaults.
    pub fn to_options(&self, config: &Config) -> AnalysisOptions {
        let color = self.color.unwrap_or(config.display.color);

        AnalysisOptions {
            units: if self.use_mm || config.display.use_mm {
                Units::Millimeters
            } else {
                Units::Device
            },
            source: if self.use_st {
                ContactSource::SingleTouch
            } else {
                ContactSource::MultiTouch
            },
            coordinates: if self.use_absolute {
                CoordinateMode::Absolute
            } else {
                CoordinateMode::Relative
            },
            show_distance: self.show_distance || config.display.show_distance,
            threshold: self.threshold.or(config.filter.threshold),
            ignore_below: self.ignore_below.or(config.filter.ignore_below),
            pressure_min: self.pressure_min.or(config.filter.pressure_min),
            pressure_max: self.pressure_max.or(config.filter.pressure_max),
            color: color.enabled(),
        }
    }
}
