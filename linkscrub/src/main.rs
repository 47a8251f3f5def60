// linkscrub/src/main.rs
//! Linkscrub entry point.
//!
//! Resolves the active rule set, builds the cleaning engine, and dispatches
//! to the selected command.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::Read;

use linkscrub::cli::{Cli, Commands};
use linkscrub::{commands, logger, rules_loader};
use linkscrub_core::ProviderEngine;

fn main() -> Result<()> {
    let args = Cli::parse();
    logger::init(args.quiet, args.debug);

    // The updater runs before any engine exists: it must work even when the
    // currently installed document is broken.
    if let Commands::Update(cmd) = &args.command {
        return commands::update::run(cmd);
    }

    let config = rules_loader::resolve_rules(args.rules.as_deref())?;
    let engine = ProviderEngine::new(config);

    match &args.command {
        Commands::Clean(cmd) => commands::clean::run(&engine, &cmd.urls),
        Commands::Scan(cmd) => {
            let input = match &cmd.input_file {
                Some(path) => fs::read_to_string(path)
                    .with_context(|| format!("Failed to read input file {}", path.display()))?,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buffer)
                        .context("Failed to read from stdin")?;
                    buffer
                }
            };
            commands::scan::run(
                &engine,
                commands::scan::ScanOptions {
                    input,
                    threshold: cmd.threshold,
                },
            )
        }
        Commands::Providers => commands::providers::run(&engine),
        Commands::Update(_) => unreachable!("handled above"),
    }
}
