// linkscrub/src/commands/update.rs
//! Update command implementation: fetch the latest rules document and
//! install it locally.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Result};

use crate::cli::UpdateCommand;
use crate::rules_loader::{self, DEFAULT_RULES_URL};

pub fn run(cmd: &UpdateCommand) -> Result<()> {
    let url = cmd.url.as_deref().unwrap_or(DEFAULT_RULES_URL);
    let destination = match &cmd.out {
        Some(path) => path.clone(),
        None => rules_loader::cached_rules_path()
            .ok_or_else(|| anyhow!("No user configuration directory available; pass --out"))?,
    };

    let provider_count = rules_loader::fetch_and_install(url, &destination)?;
    println!(
        "Rules updated: {} providers installed to {}.",
        provider_count,
        destination.display()
    );
    Ok(())
}
