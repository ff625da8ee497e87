//! CLI definition using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use maint_types::{FilterMode, OutputFormat};

#[derive(Parser)]
#[command(name = "maint-checker")]
#[command(author = "moalamir")]
#[command(version)]
#[command(about = "Vehicle maintenance sheet checker - delay and status classification")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List classified rows for a filter/search view
    List {
        /// Path to the maintenance sheet CSV export
        sheet: PathBuf,

        /// Path to the Invygo reference plate list CSV
        #[arg(long, short = 'p')]
        plates: Option<PathBuf>,

        /// Row filter to apply
        #[arg(long, value_enum, default_value_t = FilterMode::All)]
        filter: FilterMode,

        /// Case-insensitive text search across all fields
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Show per-category counts and the delayed-vehicles report
    Summary {
        /// Path to the maintenance sheet CSV export
        sheet: PathBuf,

        /// Path to the Invygo reference plate list CSV
        #[arg(long, short = 'p')]
        plates: Option<PathBuf>,
    },

    /// Export the current view to an Excel workbook
    Export {
        /// Path to the maintenance sheet CSV export
        sheet: PathBuf,

        /// Path to the Invygo reference plate list CSV
        #[arg(long, short = 'p')]
        plates: Option<PathBuf>,

        /// Row filter to apply
        #[arg(long, value_enum, default_value_t = FilterMode::All)]
        filter: FilterMode,

        /// Case-insensitive text search across all fields
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Output file path. Defaults to a name derived from the view.
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Edit a single cell and write it back to the sheet file
    Edit {
        /// Path to the maintenance sheet CSV export
        sheet: PathBuf,

        /// 1-based row position in the sheet
        #[arg(long, short = 'r')]
        row: u32,

        /// Column name, exactly as in the header
        #[arg(long, short = 'c')]
        column: String,

        /// New cell value
        #[arg(long, short = 'v')]
        value: String,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set the accident delay threshold in days
        #[arg(long)]
        set_accident_days: Option<i64>,

        /// Set the oil-service delay threshold in days
        #[arg(long)]
        set_oil_days: Option<i64>,

        /// Set the default delay threshold in days
        #[arg(long)]
        set_default_days: Option<i64>,

        /// Let a non-empty search bypass the mode filter
        #[arg(long)]
        set_search_overrides: Option<bool>,

        /// Require a date-out (and non-total-loss damage) for "notready"
        #[arg(long)]
        set_strict_not_ready: Option<bool>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
