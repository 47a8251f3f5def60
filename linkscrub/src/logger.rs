// linkscrub/src/logger.rs
//! Logger initialization for the linkscrub binary.
//!
//! License: MIT OR Apache-2.0

use log::LevelFilter;

/// Initializes the global logger. `quiet` wins over `debug`; with neither
/// flag the usual `RUST_LOG` environment variable applies.
pub fn init(quiet: bool, debug: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if quiet {
        builder.filter_level(LevelFilter::Off);
    } else if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    // Integration tests may initialize more than once.
    let _ = builder.try_init();
}
