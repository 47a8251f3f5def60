// linkscrub/src/cli.rs
//! This file defines the command-line interface (CLI) for the linkscrub
//! application, including all available commands and their arguments.
//!
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "linkscrub",
    version = env!("CARGO_PKG_VERSION"),
    about = "Scrub tracking junk from your links",
    long_about = "Linkscrub is a command-line utility for cleaning hyperlinks. It applies a configurable, ClearURLs-compatible rule set to unwrap tracking redirectors, strip tracking query parameters, and withhold links to domains that should never be surfaced.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG for the 'linkscrub' crates)
    #[arg(long, short = 'd', help = "Enable debug logging.")]
    pub debug: bool,

    /// Path to a custom rules document (ClearURLs-compatible JSON).
    #[arg(long = "rules", value_name = "FILE", global = true, help = "Path to a custom rules document (ClearURLs-compatible JSON).")]
    pub rules: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `linkscrub` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cleans one or more URLs given on the command line.
    #[command(about = "Cleans one or more URLs given on the command line.")]
    Clean(CleanCommand),

    /// Scans text for links, cleans them, and reports significant changes.
    #[command(about = "Scans text for links, cleans them, and reports the ones that changed.")]
    Scan(ScanCommand),

    /// Downloads the latest rules document and installs it locally.
    #[command(about = "Downloads the latest rules document and installs it locally.")]
    Update(UpdateCommand),

    /// Lists the providers in the active rule set.
    #[command(about = "Lists the providers in the active rule set.")]
    Providers,
}

/// Arguments for the `clean` command.
#[derive(Parser, Debug)]
pub struct CleanCommand {
    /// The URLs to clean.
    #[arg(value_name = "URL", required = true, help = "One or more URLs to clean.")]
    pub urls: Vec<String>,
}

/// Arguments for the `scan` command.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Minimum character-length delta before a cleaned link is reported.
    #[arg(long = "threshold", value_name = "N", default_value_t = 0, help = "Minimum character-length delta before a cleaned link is reported.")]
    pub threshold: usize,
}

/// Arguments for the `update` command.
#[derive(Parser, Debug)]
pub struct UpdateCommand {
    /// Alternative rules endpoint (defaults to the ClearURLs data file).
    #[arg(long = "url", value_name = "URL", help = "Fetch rules from an alternative compatible endpoint.")]
    pub url: Option<String>,

    /// Install the fetched document to this path instead of the user cache.
    #[arg(long = "out", value_name = "FILE", help = "Install the fetched document to this path instead of the user cache.")]
    pub out: Option<PathBuf>,
}
