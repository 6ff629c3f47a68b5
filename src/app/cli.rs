//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// JustSplit - expense timeline layout and settlement from the terminal
#[derive(Parser, Debug)]
#[command(name = "justsplit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute timeline markers for an event document
    Layout {
        /// Input event document (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Grouping threshold in percent (overrides config)
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Fixed "now" for ongoing events (ISO-8601, defaults to the wall clock)
        #[arg(long)]
        now: Option<String>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show per-participant balances
    Balances {
        /// Input event document (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Target currency (overrides config)
        #[arg(short = 'u', long)]
        currency: Option<String>,

        /// Exchange-rate table (JSON)
        #[arg(short, long)]
        rates: Option<PathBuf>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Suggest settlement transfers
    Settle {
        /// Input event document (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Target currency (overrides config)
        #[arg(short = 'u', long)]
        currency: Option<String>,

        /// Exchange-rate table (JSON)
        #[arg(short, long)]
        rates: Option<PathBuf>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Validate an event document
    Validate {
        /// Path to the event document
        input: PathBuf,
    },

    /// List event documents
    List {
        /// Show detailed information
        #[arg(short, long)]
        detailed: bool,
    },

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Delete an event document
    Delete {
        /// Document name to delete
        name: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// View or reset configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the event documents directory
    pub fn events_dir() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".justsplit").join("events"))
            .unwrap_or_else(|| PathBuf::from("events"))
    }
}
