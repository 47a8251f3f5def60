// linkscrub/src/commands/providers.rs
//! Providers command implementation: list the active rule set.
//!
//! License: MIT OR Apache-2.0

use anyhow::Result;
use std::io::{self, Write};

use linkscrub_core::CleaningEngine;

/// Prints one line per usable provider, with a marker for providers that
/// block matching URLs outright.
pub fn run(engine: &dyn CleaningEngine) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for provider in &engine.compiled_providers().providers {
        if provider.complete_provider {
            writeln!(out, "{} [blocking]", provider.name)?;
        } else {
            writeln!(out, "{}", provider.name)?;
        }
    }
    Ok(())
}
