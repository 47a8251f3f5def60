//! compiler.rs - Manages the compilation and caching of provider rules.
//!
//! This module converts a `RulesConfig` into `CompiledProviders`, ready for
//! efficient matching, and keeps a thread-safe, global cache keyed by a
//! hash of the source document to avoid redundant compilation.
//!
//! Rule documents come from an untrusted remote source, so compilation is
//! the hardening boundary: the regex engine guarantees linear-time matching,
//! every pattern carries a compiled-size limit and a source-length cap, and
//! a pattern that fails to compile is skipped with a warning instead of
//! aborting the whole document.
//!
//! License: MIT OR Apache-2.0

use lazy_static::lazy_static;
use log::{debug, warn};
use regex::{Regex, RegexBuilder};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use crate::config::{NamedProvider, RulesConfig, MAX_PATTERN_LENGTH};
use crate::errors::ScrubError;

/// Upper bound on the compiled size of a single pattern.
const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20); // 10 MB

/// How a pattern list binds to its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    /// The match must begin at the start of the input.
    Prefix,
    /// The match may occur anywhere in the input.
    Search,
}

/// A single provider with all of its pattern lists compiled.
#[derive(Debug)]
pub struct CompiledProvider {
    /// The document key of the provider.
    pub name: String,
    /// Prefix-anchored, case-insensitive match against the working URL.
    pub url_pattern: Regex,
    /// If true, a `url_pattern` match suppresses the URL outright.
    pub complete_provider: bool,
    /// Prefix-anchored; any match skips this provider for the URL.
    pub exceptions: Vec<Regex>,
    /// Searched anywhere in the URL; capture group 1 holds the destination.
    pub redirections: Vec<Regex>,
    /// Prefix-anchored against query parameter keys. Holds `rules` and
    /// `referralMarketing` concatenated, since both remove matching pairs.
    pub query_rules: Vec<Regex>,
    /// Searched anywhere; matches are replaced with the empty string.
    pub raw_rules: Vec<Regex>,
}

/// All usable providers from one rules document, in document order.
#[derive(Debug, Default)]
pub struct CompiledProviders {
    pub providers: Vec<CompiledProvider>,
}

lazy_static! {
    /// A thread-safe, global cache for compiled providers.
    /// The key is a hash of the parsed `RulesConfig`.
    static ref COMPILED_PROVIDERS_CACHE: RwLock<HashMap<u64, Arc<CompiledProviders>>> =
        RwLock::new(HashMap::new());
}

/// Hashes the `RulesConfig` to create a stable, unique key for the cache.
///
/// Provider order is semantic (later providers see earlier output), so the
/// hash covers the providers exactly in document order.
fn hash_config(config: &RulesConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    config.providers.hash(&mut hasher);
    hasher.finish()
}

fn compile_pattern(provider: &str, pattern: &str, anchor: Anchor) -> Result<Regex, ScrubError> {
    if pattern.len() > MAX_PATTERN_LENGTH {
        return Err(ScrubError::PatternLengthExceeded(
            provider.to_string(),
            pattern.len(),
            MAX_PATTERN_LENGTH,
        ));
    }

    // The non-capturing wrapper keeps group numbering intact, so capture
    // group 1 of a redirection pattern stays group 1.
    let source = match anchor {
        Anchor::Prefix => format!("^(?:{pattern})"),
        Anchor::Search => pattern.to_string(),
    };

    RegexBuilder::new(&source)
        .case_insensitive(true)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
        .map_err(|e| ScrubError::PatternCompilationError(provider.to_string(), e))
}

/// Compiles a pattern list, skipping (and logging) patterns that do not
/// compile so one faulty entry cannot poison the rest of the provider.
fn compile_list(provider: &str, patterns: &[String], anchor: Anchor) -> Vec<Regex> {
    let mut compiled = Vec::with_capacity(patterns.len());
    for pattern in patterns {
        match compile_pattern(provider, pattern, anchor) {
            Ok(regex) => compiled.push(regex),
            Err(e) => warn!("Skipping pattern '{}': {}", pattern, e),
        }
    }
    compiled
}

fn compile_provider(named: &NamedProvider) -> Option<CompiledProvider> {
    let spec = &named.spec;
    if spec.url_pattern.is_empty() {
        warn!("Skipping provider '{}': missing urlPattern.", named.name);
        return None;
    }
    let url_pattern = match compile_pattern(&named.name, &spec.url_pattern, Anchor::Prefix) {
        Ok(regex) => regex,
        Err(e) => {
            warn!("Skipping provider '{}': {}", named.name, e);
            return None;
        }
    };

    let mut query_rules = compile_list(&named.name, &spec.rules, Anchor::Prefix);
    query_rules.extend(compile_list(&named.name, &spec.referral_marketing, Anchor::Prefix));

    Some(CompiledProvider {
        name: named.name.clone(),
        url_pattern,
        complete_provider: spec.complete_provider,
        exceptions: compile_list(&named.name, &spec.exceptions, Anchor::Prefix),
        redirections: compile_list(&named.name, &spec.redirections, Anchor::Search),
        query_rules,
        raw_rules: compile_list(&named.name, &spec.raw_rules, Anchor::Search),
    })
}

/// Compiles every provider in the document, in order. This is the low-level
/// function that performs the actual regex compilation.
pub fn compile_providers(config: &RulesConfig) -> CompiledProviders {
    debug!("Starting compilation of {} providers.", config.providers.len());

    let providers: Vec<CompiledProvider> =
        config.providers.iter().filter_map(compile_provider).collect();

    debug!("Finished compiling providers. Total usable: {}.", providers.len());
    CompiledProviders { providers }
}

/// Gets a `CompiledProviders` instance from the cache or compiles it if not
/// found.
///
/// This is the public entry point for retrieving compiled providers. It
/// returns an `Arc`, allowing a snapshot to be shared cheaply across
/// concurrent callers; a rules refresh compiles a new snapshot rather than
/// mutating an existing one.
pub fn get_or_compile_providers(config: &RulesConfig) -> Arc<CompiledProviders> {
    let cache_key = hash_config(config);

    // Attempt to acquire a read lock first.
    {
        let cache = COMPILED_PROVIDERS_CACHE.read().unwrap();
        if let Some(providers) = cache.get(&cache_key) {
            debug!("Serving compiled providers from cache for key: {}", cache_key);
            return Arc::clone(providers);
        }
    } // Read lock is released here.

    debug!("Compiled providers not found in cache. Compiling now.");
    let compiled = Arc::new(compile_providers(config));

    COMPILED_PROVIDERS_CACHE
        .write()
        .unwrap()
        .insert(cache_key, Arc::clone(&compiled));

    debug!("Successfully compiled and cached providers for key: {}", cache_key);
    compiled
}
