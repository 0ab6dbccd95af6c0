//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

use crate::models::Platform;

#[derive(Parser)]
#[command(name = "content-optimizer")]
#[command(about = "Clean marketing worksheets and extract keyword/theme insights")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: config.toml, then config.example.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the worksheet table in PostgreSQL
    Init {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Load a worksheet from a JSON file into the store (full overwrite)
    Import {
        /// Worksheet name, e.g. Reddit_Product_Content
        worksheet: String,
        /// JSON file: {"columns": [...], "rows": [...]} or an array of records
        file: PathBuf,
    },
    /// Write cleaned_<column> text columns for every configured worksheet
    Clean {
        /// Keep whole words instead of stems
        #[arg(long)]
        no_stem: bool,
    },
    /// Extract top keywords and themes
    Insights {
        /// Only consult worksheets from this platform
        #[arg(short, long, value_enum)]
        platform: Option<PlatformArg>,
        /// Number of keywords (default from config)
        #[arg(short, long)]
        keywords: Option<usize>,
        /// Number of themes (default from config)
        #[arg(short, long)]
        themes: Option<usize>,
        /// Keep whole words instead of stems
        #[arg(long)]
        no_stem: bool,
        /// Print per-worksheet extraction details
        #[arg(long)]
        report: bool,
        /// Print the insight as JSON
        #[arg(long)]
        json: bool,
        /// Also send the insight through the notifier
        #[arg(long)]
        notify: bool,
    },
    /// Summarize stored sentiment per worksheet and check negative-sentiment alerts
    Report {
        /// Print only; send nothing through the notifier
        #[arg(long)]
        dry_run: bool,
        /// Skip the summaries and only check alert rules
        #[arg(long)]
        alerts_only: bool,
    },
    /// Send a message through the configured notifier
    Notify {
        /// Message text
        message: String,
        /// Channel override (e.g. "#marketing-alerts")
        #[arg(long)]
        channel: Option<String>,
    },
    /// Show current configuration
    Config,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlatformArg {
    /// Google Trends related queries
    GoogleTrends,
    /// Twitter/X posts
    Twitter,
    /// YouTube video metadata
    Youtube,
    /// Reddit posts
    Reddit,
}

impl From<PlatformArg> for Platform {
    fn from(value: PlatformArg) -> Self {
        match value {
            PlatformArg::GoogleTrends => Platform::GoogleTrends,
            PlatformArg::Twitter => Platform::Twitter,
            PlatformArg::Youtube => Platform::Youtube,
            PlatformArg::Reddit => Platform::Reddit,
        }
    }
}
