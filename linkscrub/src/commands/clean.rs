// linkscrub/src/commands/clean.rs
//! Clean command implementation: clean explicit URLs from the command line.
//!
//! License: MIT OR Apache-2.0

use anyhow::Result;
use log::info;
use std::io::{self, Write};

use linkscrub_core::{CleaningEngine, CleaningOutcome};

/// Cleans each URL and prints the resulting form, one per line. A blocked
/// URL is suppressed outright: nothing is written for it and a notice
/// (without the URL) goes to stderr.
pub fn run(engine: &dyn CleaningEngine, urls: &[String]) -> Result<()> {
    info!("Cleaning {} URL(s).", urls.len());
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut blocked = 0usize;

    for url in urls {
        match engine.clean(url) {
            CleaningOutcome::Cleaned(cleaned) => writeln!(out, "{cleaned}")?,
            CleaningOutcome::Unchanged(original) => writeln!(out, "{original}")?,
            CleaningOutcome::Blocked => blocked += 1,
        }
    }

    if blocked > 0 {
        eprintln!("{blocked} link(s) withheld by provider rules.");
    }
    Ok(())
}
