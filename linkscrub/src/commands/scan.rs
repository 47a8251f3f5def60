// linkscrub/src/commands/scan.rs
//! Scan command implementation: extract links from free text, clean them,
//! and report the ones that changed significantly.
//!
//! License: MIT OR Apache-2.0

use anyhow::Result;
use log::info;
use std::io::{self, Write};

use linkscrub_core::{CleaningEngine, CleaningOutcome};

use crate::report;

/// Options for the scan runner.
pub struct ScanOptions {
    pub input: String,
    /// Minimum character-length delta before a cleaned link is reported.
    pub threshold: usize,
}

/// Scans `opts.input` for links and prints each significantly cleaned form,
/// one per line. Unchanged links are never reported; blocked links are
/// counted but never shown.
pub fn run(engine: &dyn CleaningEngine, opts: ScanOptions) -> Result<()> {
    let matches = engine.scan(&opts.input);
    info!("Extracted {} candidate link(s).", matches.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut reported = 0usize;
    let mut blocked = 0usize;

    for link in &matches {
        match &link.outcome {
            CleaningOutcome::Blocked => blocked += 1,
            CleaningOutcome::Cleaned(cleaned)
                if report::is_significant(&link.original, cleaned, opts.threshold) =>
            {
                writeln!(out, "{cleaned}")?;
                reported += 1;
            }
            _ => {}
        }
    }

    info!(
        "Reported {} of {} link(s); {} blocked.",
        reported,
        matches.len(),
        blocked
    );
    if blocked > 0 {
        eprintln!("{blocked} link(s) withheld by provider rules.");
    }
    Ok(())
}
