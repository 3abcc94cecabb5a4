//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Page through a paginated items source as one lazy stream
#[derive(Parser, Debug)]
#[command(name = "pagestream")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the example items server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Fetch every page from an items server
    Fetch {
        /// Source configuration file (YAML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Base URL of the items server
        #[arg(long)]
        base_url: Option<String>,

        /// Total number of items
        #[arg(long)]
        total: Option<u64>,

        /// Items per page
        #[arg(long)]
        per_page: Option<u64>,

        /// First page to request
        #[arg(long)]
        initial_page: Option<u64>,

        /// Stop after this many pages
        #[arg(long)]
        max_pages: Option<u64>,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one page per line)
    Json,
    /// Human-readable output
    Pretty,
}
