// linkscrub-core/src/lib.rs
//! # LinkScrub Core Library
//!
//! `linkscrub-core` provides the fundamental, platform-independent logic for
//! rule-driven URL canonicalization. Given a URL and a versioned,
//! externally-supplied rule set, it decides whether the URL is produced by a
//! known tracking/redirector scheme, resolves any indirection to the real
//! destination, strips tracking query parameters and raw tracking fragments,
//! and reports whether the result differs from the input.
//!
//! The library is designed to be pure and stateless: the engine performs no
//! I/O, never fetches network resources, and is deterministic for a given
//! (URL, rule set) pair. Rule-set replacement is value-level: a new
//! compiled snapshot per document, shared via `Arc`, so readers never block
//! on a refresh.
//!
//! ## Modules
//!
//! * `config`: Defines `ProviderSpec` and `RulesConfig` for the
//!   ClearURLs-compatible rules document, with order-preserving parsing.
//! * `providers`: Compiles provider definitions into regex bundles, with a
//!   shared compile cache and per-pattern hardening limits.
//! * `outcome`: The three-way `CleaningOutcome` and per-link `LinkMatch`.
//! * `engine`: The `CleaningEngine` trait, enabling a modular design.
//! * `engines`: Concrete implementations of the `CleaningEngine` trait.
//! * `extract`: Candidate-link extraction from free text.
//! * `errors`: The structured `ScrubError` type.
//!
//! ## Usage Example
//!
//! ```rust
//! use linkscrub_core::{CleaningEngine, CleaningOutcome, ProviderEngine, RulesConfig};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     // 1. Load the built-in rules snapshot.
//!     let config = RulesConfig::load_default_rules()?;
//!
//!     // 2. Build an engine over the compiled rule set.
//!     let engine = ProviderEngine::new(config);
//!
//!     // 3. Clean a link.
//!     match engine.clean("https://news.example/story?id=9&utm_campaign=mail") {
//!         CleaningOutcome::Cleaned(url) => println!("cleaned: {url}"),
//!         CleaningOutcome::Unchanged(url) => println!("already clean: {url}"),
//!         CleaningOutcome::Blocked => println!("link withheld"),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fallible loading uses `anyhow::Error` with context; the library defines
//! `ScrubError` for programmatic handling. Cleaning itself is total: a
//! malformed pattern is skipped at compile time and a matching error is
//! treated as "no match," so a clean call can never fail mid-request.
//!
//! ## Design Principles
//!
//! * **Pluggable Architecture:** The `CleaningEngine` trait decouples
//!   callers from the concrete matching implementation.
//! * **Stateless:** The core library does not maintain application state.
//! * **Hardened:** Rules come from an untrusted remote document; matching is
//!   linear-time and compilation is size-bounded.
//!
//! ---
//! License: MIT OR Apache-2.0

// All modules must be declared before they can be used.
pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod extract;
pub mod outcome;
pub mod providers;

/// Re-exports the public configuration types for the rules document.
pub use config::{NamedProvider, ProviderSpec, RulesConfig, MAX_PATTERN_LENGTH};

/// Re-exports the custom error type for clear error reporting.
pub use errors::ScrubError;

/// Re-exports the core engine trait.
pub use engine::CleaningEngine;

/// Re-exports the concrete `ProviderEngine` implementation.
pub use engines::provider_engine::ProviderEngine;

/// Re-exports the cleaning result types.
pub use outcome::{CleaningOutcome, LinkMatch};

/// Re-exports link extraction for callers that scan free text themselves.
pub use extract::extract_links;

// Re-export key types from the providers::compiler module for advanced usage.
pub use providers::compiler::{compile_providers, get_or_compile_providers, CompiledProvider, CompiledProviders};
