//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use motion_traits::ScoreCategory;
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "motion", version, about = "Motion evaluation CLI")]
pub struct Cli {
    /// Path to config TOML (typed)
    #[arg(long, value_name = "FILE", default_value = "etc/motion.toml")]
    pub config: PathBuf,

    /// Baseline store JSON file (overrides store.path from the config)
    #[arg(long, value_name = "FILE")]
    pub store: Option<PathBuf>,

    /// Print results and errors as JSON lines; logs become JSON too
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); defaults to logging.level, then info
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Baseline category as spelled on the command line.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CategoryArg {
    /// Exemplary execution (scores 100)
    Reference,
    /// Deliberately failed execution (scores 0)
    #[value(name = "zero_score", alias = "zero-score")]
    ZeroScore,
}

impl From<CategoryArg> for ScoreCategory {
    fn from(c: CategoryArg) -> Self {
        match c {
            CategoryArg::Reference => ScoreCategory::Reference,
            CategoryArg::ZeroScore => ScoreCategory::ZeroScore,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a recording against the stored baselines of a motion
    Evaluate {
        /// Motion type name
        #[arg(long)]
        motion: String,
        /// Sensor recording (.json array of frames or .csv with a channel header)
        #[arg(long, value_name = "FILE")]
        data: PathBuf,
        /// User identifier recorded in the hand-off file
        #[arg(long, value_name = "ID")]
        user: Option<String>,
        /// Append one JSON line per successful evaluation to this file
        #[arg(long, value_name = "FILE")]
        handoff: Option<PathBuf>,
    },
    /// Store a baseline recording for a motion
    Record {
        /// Motion type name (must already exist)
        #[arg(long)]
        motion: String,
        /// Calibration anchor this recording belongs to
        #[arg(long, value_enum)]
        category: CategoryArg,
        /// Sensor recording (.json or .csv)
        #[arg(long, value_name = "FILE")]
        data: PathBuf,
    },
    /// Register a motion type, or update the description of an existing one
    AddMotion {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// List motion types with their baseline counts
    Motions,
    /// Validate the config and store; report which motions can be evaluated
    SelfCheck,
}
