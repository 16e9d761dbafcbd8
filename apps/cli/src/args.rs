use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use meter_app::{MoveDirection, YearParams};
use meter_core::EvaluationMode;

#[derive(Debug, Parser)]
#[command(
    name = "meter-tracker",
    version,
    about = "Track sparse meter readings and reconstruct monthly and yearly consumption"
)]
pub struct Cli {
    /// User whose categories and readings are addressed
    #[arg(long, global = true, env = "METER_TRACKER_USER")]
    pub user: Option<String>,

    /// Directory holding the database
    #[arg(long, global = true, env = "METER_TRACKER_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List categories in display order
    Categories,

    /// Manage categories
    Category {
        #[command(subcommand)]
        command: CategoryCommand,
    },

    /// Record a reading (overwrites an existing reading on the same date)
    Add {
        category: String,
        /// Reading date, YYYY-MM-DD
        date: String,
        value: f64,
    },

    /// Delete the reading of a category on a date
    Delete {
        category: String,
        /// Reading date, YYYY-MM-DD
        date: String,
    },

    /// List stored readings of a category
    Readings { category: String },

    /// Import readings from a JSON array of {meter_type, date, value} ("-" reads stdin)
    Import { file: PathBuf },

    /// Monthly buckets of a category
    Monthly {
        category: String,
        #[command(flatten)]
        years: YearArgs,
    },

    /// Yearly statistics of a category, newest year first
    Yearly {
        category: String,
        #[command(flatten)]
        years: YearArgs,
    },

    /// Monthly values side by side per year
    Compare {
        category: String,
        #[command(flatten)]
        years: YearArgs,
    },

    /// Linear trend through the monthly values
    Trend {
        category: String,
        #[command(flatten)]
        years: YearArgs,
    },

    /// Text report of every category with data
    Report {
        #[command(flatten)]
        years: YearArgs,
    },

    /// Show or change the stored default user
    DefaultUser { user: Option<String> },
}

#[derive(Debug, Subcommand)]
pub enum CategoryCommand {
    /// Create a category at the end of the list
    Add {
        name: String,
        #[arg(long)]
        unit: Option<String>,
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
        /// Display title
        #[arg(long)]
        title: Option<String>,
    },

    /// Change unit, evaluation mode or title of a category
    Configure {
        name: String,
        #[arg(long)]
        unit: Option<String>,
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
        #[arg(long, conflicts_with = "clear_title")]
        title: Option<String>,
        #[arg(long)]
        clear_title: bool,
    },

    /// Move a category one position up or down
    Move {
        name: String,
        #[arg(value_enum)]
        direction: DirectionArg,
    },

    /// Remove a category (stored readings are kept)
    Remove { name: String },
}

#[derive(Debug, Clone, Default, Args)]
pub struct YearArgs {
    /// First year to include
    #[arg(long)]
    pub from_year: Option<i32>,
    /// Last year to include
    #[arg(long)]
    pub to_year: Option<i32>,
}

impl From<&YearArgs> for YearParams {
    fn from(args: &YearArgs) -> Self {
        YearParams {
            from_year: args.from_year,
            to_year: args.to_year,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Cumulative counter; monthly values are consumption totals
    Difference,
    /// Instantaneous measurement; monthly values are averages
    Absolute,
}

impl From<ModeArg> for EvaluationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Difference => EvaluationMode::Difference,
            ModeArg::Absolute => EvaluationMode::Absolute,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    Up,
    Down,
}

impl From<DirectionArg> for MoveDirection {
    fn from(direction: DirectionArg) -> Self {
        match direction {
            DirectionArg::Up => MoveDirection::Up,
            DirectionArg::Down => MoveDirection::Down,
        }
    }
}
