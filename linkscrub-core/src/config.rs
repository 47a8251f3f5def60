//! Configuration management for `linkscrub-core`.
//!
//! This module defines the data model for ClearURLs-compatible rules
//! documents. A document is a JSON object with a `providers` object mapping
//! provider name to provider definition. Provider order is semantic: later
//! providers see the output of earlier ones, so deserialization preserves
//! the document's insertion order rather than using an unordered map.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::Path;

use crate::errors::ScrubError;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// One provider definition: a named bundle of patterns describing a single
/// tracking or redirector scheme and how to neutralize it.
///
/// Every field other than `url_pattern` is optional in the source document
/// and defaults to empty/false when absent. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderSpec {
    /// Regex tested against the URL with case-insensitive prefix matching.
    pub url_pattern: String,
    /// If true and `url_pattern` matches, the whole URL is suppressed.
    pub complete_provider: bool,
    /// Prefix-matched patterns; a match skips this provider entirely.
    pub exceptions: Vec<String>,
    /// Patterns whose first capture group holds an embedded destination URL.
    pub redirections: Vec<String>,
    /// Patterns matched against a query parameter key; a match removes the pair.
    pub rules: Vec<String>,
    /// Same removal semantics as `rules`, kept as a separate list in the
    /// source format for affiliate/referral parameters.
    pub referral_marketing: Vec<String>,
    /// Patterns applied as whole-string substitution on the serialized URL.
    pub raw_rules: Vec<String>,
}

/// A provider definition together with its document key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedProvider {
    pub name: String,
    pub spec: ProviderSpec,
}

/// The parsed rules document: an ordered sequence of providers.
///
/// Constructed atomically from a successfully parsed document and never
/// mutated afterwards; a refresh replaces the whole value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct RulesConfig {
    /// Providers in document order.
    #[serde(deserialize_with = "ordered_providers")]
    pub providers: Vec<NamedProvider>,
}

/// Deserializes the `providers` JSON object into a `Vec`, preserving the
/// key order of the source document.
fn ordered_providers<'de, D>(deserializer: D) -> Result<Vec<NamedProvider>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ProvidersVisitor;

    impl<'de> Visitor<'de> for ProvidersVisitor {
        type Value = Vec<NamedProvider>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map of provider name to provider definition")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut providers = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((name, spec)) = access.next_entry::<String, ProviderSpec>()? {
                providers.push(NamedProvider { name, spec });
            }
            Ok(providers)
        }
    }

    deserializer.deserialize_map(ProvidersVisitor)
}

impl RulesConfig {
    /// Parses and validates a rules document from JSON text.
    ///
    /// Fails if the text is not a JSON object with a `providers` object, or
    /// if the `providers` object is empty. Callers decide fallback behavior;
    /// an invalid document must never replace a valid existing one.
    pub fn from_json_str(text: &str) -> Result<Self, ScrubError> {
        let config: RulesConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a rules document from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading rules from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rules file {}", path.display()))?;
        let config = Self::from_json_str(&text)
            .with_context(|| format!("Failed to parse rules file {}", path.display()))?;

        info!(
            "Loaded {} providers from file {}.",
            config.providers.len(),
            path.display()
        );
        Ok(config)
    }

    /// Loads the built-in rules snapshot from the embedded document.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default rules from embedded document...");
        let default_json = include_str!("../config/default_rules.json");
        let config = Self::from_json_str(default_json).context("Failed to parse default rules")?;

        debug!("Loaded {} default providers.", config.providers.len());
        Ok(config)
    }

    fn validate(&self) -> Result<(), ScrubError> {
        if self.providers.is_empty() {
            return Err(ScrubError::InvalidRulesDocument(
                "document contains no providers".to_string(),
            ));
        }
        Ok(())
    }
}
