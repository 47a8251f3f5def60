// linkscrub/src/rules_loader.rs
//! Rule-set acquisition for the CLI: resolution of the active rules
//! document and the remote updater.
//!
//! The engine itself never fetches anything; this layer owns all I/O and
//! only ever hands the engine a fully validated `RulesConfig`.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use linkscrub_core::RulesConfig;

/// The canonical ClearURLs data file.
pub const DEFAULT_RULES_URL: &str =
    "https://kevinroebert.gitlab.io/ClearUrls/data/data.min.json";

/// Per-user location of the installed rules document.
pub fn cached_rules_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("linkscrub").join("rules.json"))
}

/// Resolves the active rules document: an explicit `--rules` file, then the
/// per-user installed copy, then the embedded default snapshot.
///
/// An explicit file that fails to load is an error; an unusable installed
/// copy is only a warning, since the embedded defaults still apply.
pub fn resolve_rules(explicit: Option<&Path>) -> Result<RulesConfig> {
    if let Some(path) = explicit {
        return RulesConfig::load_from_file(path);
    }
    if let Some(path) = cached_rules_path() {
        if path.exists() {
            match RulesConfig::load_from_file(&path) {
                Ok(config) => return Ok(config),
                Err(e) => warn!(
                    "Ignoring unusable installed rules at {}: {:#}",
                    path.display(),
                    e
                ),
            }
        }
    }
    RulesConfig::load_default_rules()
}

/// Fetches a rules document and installs it at `destination`, swapping only
/// after the document fully validates. A failed fetch, a non-success
/// status, or an invalid body leaves any existing installed document
/// untouched.
///
/// Returns the number of providers in the installed document.
pub fn fetch_and_install(url: &str, destination: &Path) -> Result<usize> {
    info!("Downloading rules data from {}", url);
    let body = reqwest::blocking::get(url)
        .with_context(|| format!("Failed to fetch rules from {url}"))?
        .error_for_status()
        .context("Rules endpoint returned an error status")?
        .text()
        .context("Failed to read rules response body")?;

    let config = RulesConfig::from_json_str(&body)
        .context("Fetched rules document is invalid; keeping existing rules")?;

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    // Write to a sibling temp file first so a partial write can never
    // clobber a good document.
    let staging = destination.with_extension("json.tmp");
    fs::write(&staging, &body)
        .with_context(|| format!("Failed to write {}", staging.display()))?;
    fs::rename(&staging, destination)
        .with_context(|| format!("Failed to install {}", destination.display()))?;

    info!(
        "Installed {} providers to {}",
        config.providers.len(),
        destination.display()
    );
    Ok(config.providers.len())
}
