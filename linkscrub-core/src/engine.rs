// linkscrub-core/src/engine.rs
//! Defines the core CleaningEngine trait.
//!
//! The `CleaningEngine` trait provides a pluggable interface for URL
//! cleaning so callers (CLI, bots, services) depend on the contract rather
//! than on a concrete implementation.
//!
//! License: MIT OR Apache-2.0

use crate::config::RulesConfig;
use crate::outcome::{CleaningOutcome, LinkMatch};
use crate::providers::compiler::CompiledProviders;

/// A trait that defines the core functionality of a URL cleaning engine.
///
/// Implementations are pure and synchronous: for a given URL and rule-set
/// snapshot the result is deterministic, there is no I/O, and the engine may
/// be called concurrently from multiple threads without locking.
pub trait CleaningEngine: Send + Sync {
    /// Cleans a single URL against the engine's rule-set snapshot.
    ///
    /// Returns `Unchanged` when no provider altered the input, `Cleaned`
    /// with the final rewritten form, or `Blocked` when a complete provider
    /// matched and the URL must not be surfaced at all.
    fn clean(&self, url: &str) -> CleaningOutcome;

    /// Extracts candidate links from free text and cleans each one,
    /// de-duplicated and in first-seen order.
    fn scan(&self, content: &str) -> Vec<LinkMatch>;

    /// Returns the compiled providers backing this engine.
    ///
    /// This is used by external components, such as the provider listing
    /// command, to display rule information without recompiling.
    fn compiled_providers(&self) -> &CompiledProviders;

    /// Returns the engine's source configuration.
    fn config(&self) -> &RulesConfig;
}
