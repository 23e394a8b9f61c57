//! CLI definitions for SheetPilot.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// SheetPilot CLI.
#[derive(Parser)]
#[command(name = "sheetpilot")]
#[command(about = "Fill timesheets from spoken or written weekly summaries")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/sheetpilot.toml", global = true, env = "SHEETPILOT_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Serve the HTTP API and recorder page (default)
    Run {
        /// Override `server.host`
        #[arg(long)]
        host: Option<String>,

        /// Override `server.port`
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the form rows for a timesheet JSON file
    Normalize {
        /// Weekly timesheet record (JSON)
        file: PathBuf,

        /// One row per work item instead of grouping
        #[arg(long)]
        ungrouped: bool,
    },

    /// Extract a timesheet from free text with the configured model
    Extract {
        /// Instruction, e.g. "Monday to Friday 8 hours build on BC#452"
        text: String,

        /// One row per work item instead of grouping
        #[arg(long)]
        ungrouped: bool,
    },

    /// Fill the form once from a timesheet JSON file
    Fill {
        /// Weekly timesheet record (JSON)
        file: PathBuf,

        /// Only load the form and snapshot it
        #[arg(long)]
        preview: bool,

        /// One row per work item instead of grouping
        #[arg(long)]
        ungrouped: bool,
    },

    /// Validate the configuration file
    CheckConfig,
}
