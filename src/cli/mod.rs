//! CLI module
//!
//! Command-line interface for the example items source.
//!
//! # Commands
//!
//! - `serve` - Start the items server
//! - `fetch` - Stream every page from an items server

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{fetch, FetchArgs, FetchSummary, Runner};
