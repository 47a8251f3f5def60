// linkscrub-core/src/engines/provider_engine.rs
//! A `CleaningEngine` implementation that applies ClearURLs-style provider
//! rules: ordered provider matching, redirect unwrapping, query-parameter
//! stripping, and raw substitution.
//!
//! License: MIT OR Apache-2.0

use std::sync::Arc;

use log::debug;
use regex::Regex;
use url::Url;

use crate::config::RulesConfig;
use crate::engine::CleaningEngine;
use crate::extract;
use crate::outcome::{CleaningOutcome, LinkMatch};
use crate::providers::compiler::{get_or_compile_providers, CompiledProviders};

/// Redirect decodes the engine will follow in one `clean` call. The control
/// flow already stops recursing after the first hop; the counter is a guard
/// against regressions.
const MAX_REDIRECT_HOPS: usize = 1;

/// Intermediate result of one pass over the provider list: either the URL
/// was suppressed outright, or we have a (possibly rewritten) working URL.
enum Pass {
    Blocked,
    Url(String),
}

#[derive(Debug)]
pub struct ProviderEngine {
    compiled: Arc<CompiledProviders>,
    config: RulesConfig,
}

impl ProviderEngine {
    pub fn new(config: RulesConfig) -> Self {
        let compiled = get_or_compile_providers(&config);
        Self { compiled, config }
    }

    /// Runs every provider over the working URL, in document order, each
    /// provider seeing the output of the ones before it.
    ///
    /// `hops` counts redirect decodes already followed. On the outer pass a
    /// decoded destination restarts the whole provider walk (one recursive
    /// hop); inside that hop further destinations are substituted in place
    /// and processing continues within the current provider.
    fn clean_pass(&self, url: &str, hops: usize) -> Pass {
        debug_assert!(hops <= MAX_REDIRECT_HOPS);
        let mut current = url.to_string();

        for provider in &self.compiled.providers {
            if !provider.url_pattern.is_match(&current) {
                continue;
            }
            // An exception skips the provider entirely: no rewriting and no
            // blocking, even for complete providers.
            if provider.exceptions.iter().any(|exc| exc.is_match(&current)) {
                debug!("Provider '{}' skipped: exception matched.", provider.name);
                continue;
            }
            if provider.complete_provider {
                debug!("Provider '{}' blocks the URL outright.", provider.name);
                return Pass::Blocked;
            }

            for redirection in &provider.redirections {
                let Some(captures) = redirection.captures(&current) else {
                    continue;
                };
                match captures.get(1) {
                    Some(embedded) if !embedded.as_str().is_empty() => {
                        let destination = percent_decode_lossy(embedded.as_str());
                        if hops < MAX_REDIRECT_HOPS {
                            debug!(
                                "Provider '{}': following embedded destination.",
                                provider.name
                            );
                            return self.clean_pass(&destination, hops + 1);
                        }
                        // Already inside the single allowed hop: substitute
                        // in place and keep working through this provider.
                        current = destination;
                    }
                    _ => {
                        // The redirection rule matched but exposed no usable
                        // destination; the rule is probably faulty.
                        debug!(
                            "Provider '{}': redirection '{}' matched without a destination capture.",
                            provider.name,
                            redirection.as_str()
                        );
                    }
                }
            }

            current = strip_query_params(&current, &provider.name, &provider.query_rules);

            for raw_rule in &provider.raw_rules {
                current = raw_rule.replace_all(&current, "").into_owned();
            }
        }

        Pass::Url(current)
    }
}

impl CleaningEngine for ProviderEngine {
    fn clean(&self, url: &str) -> CleaningOutcome {
        match self.clean_pass(url, 0) {
            Pass::Blocked => CleaningOutcome::Blocked,
            Pass::Url(cleaned) if cleaned == url => CleaningOutcome::Unchanged(cleaned),
            Pass::Url(cleaned) => CleaningOutcome::Cleaned(cleaned),
        }
    }

    fn scan(&self, content: &str) -> Vec<LinkMatch> {
        extract::extract_links(content)
            .into_iter()
            .map(|link| LinkMatch {
                outcome: self.clean(&link),
                original: link,
            })
            .collect()
    }

    fn compiled_providers(&self) -> &CompiledProviders {
        &self.compiled
    }

    fn config(&self) -> &RulesConfig {
        &self.config
    }
}

/// Percent-decodes a captured destination. Decoding never fails: invalid
/// UTF-8 sequences are recovered lossily, mirroring the tolerance of the
/// rules format's reference implementations.
fn percent_decode_lossy(input: &str) -> String {
    match urlencoding::decode(input) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => {
            String::from_utf8_lossy(&urlencoding::decode_binary(input.as_bytes())).into_owned()
        }
    }
}

/// Removes query pairs whose key prefix-matches any removal rule, keeping
/// the order and duplicates of the surviving pairs.
///
/// The URL is re-serialized only when a pair was actually removed, so a
/// matching provider with nothing to strip never perturbs the input. A URL
/// that no longer parses (for example after an aggressive raw rule from an
/// earlier provider) is left untouched.
fn strip_query_params(url: &str, provider_name: &str, query_rules: &[Regex]) -> String {
    if query_rules.is_empty() {
        return url.to_string();
    }
    let Ok(parsed) = Url::parse(url) else {
        debug!(
            "Provider '{}': working URL does not parse; leaving query untouched.",
            provider_name
        );
        return url.to_string();
    };
    if parsed.query().is_none() {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let (kept, removed): (Vec<_>, Vec<_>) = pairs
        .into_iter()
        .partition(|(key, _)| !query_rules.iter().any(|rule| rule.is_match(key)));
    if removed.is_empty() {
        return url.to_string();
    }
    debug!(
        "Provider '{}': removed {} tracking parameter(s).",
        provider_name,
        removed.len()
    );

    let mut rebuilt = parsed;
    rebuilt.set_query(None);
    if !kept.is_empty() {
        let mut serializer = rebuilt.query_pairs_mut();
        for (key, value) in &kept {
            serializer.append_pair(key, value);
        }
    }
    rebuilt.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(doc: &str) -> ProviderEngine {
        ProviderEngine::new(RulesConfig::from_json_str(doc).unwrap())
    }

    const TRACKER_DOC: &str = r#"{
        "providers": {
            "example": {
                "urlPattern": "^https?://example\\.com/go",
                "redirections": ["url=(.+)"]
            },
            "realsite": {
                "urlPattern": "^https?://real\\.site",
                "rules": ["^utm_"]
            }
        }
    }"#;

    #[test]
    fn unmatched_url_passes_through_untouched() {
        let engine = engine(TRACKER_DOC);
        let url = "https://unrelated.example/path?utm_source=x";
        assert_eq!(
            engine.clean(url),
            CleaningOutcome::Unchanged(url.to_string())
        );
    }

    #[test]
    fn complete_provider_blocks_the_url() {
        let engine = engine(
            r#"{
                "providers": {
                    "ads": { "urlPattern": "^https?://ads\\.", "completeProvider": true }
                }
            }"#,
        );
        assert_eq!(engine.clean("https://ads.example.com/x"), CleaningOutcome::Blocked);
    }

    #[test]
    fn exception_skips_provider_entirely() {
        let engine = engine(
            r#"{
                "providers": {
                    "ads": {
                        "urlPattern": "^https?://ads\\.",
                        "completeProvider": true,
                        "exceptions": ["^https?://ads\\.allowed\\.example"]
                    }
                }
            }"#,
        );
        let url = "https://ads.allowed.example/page";
        assert_eq!(
            engine.clean(url),
            CleaningOutcome::Unchanged(url.to_string())
        );
    }

    #[test]
    fn strips_tracking_query_parameters() {
        let engine = engine(
            r#"{
                "providers": {
                    "site": { "urlPattern": "^https?://x\\.example", "rules": ["^utm_"] }
                }
            }"#,
        );
        assert_eq!(
            engine.clean("https://x.example/page?utm_source=x&id=5"),
            CleaningOutcome::Cleaned("https://x.example/page?id=5".to_string())
        );
    }

    #[test]
    fn query_key_matching_is_case_insensitive() {
        let engine = engine(
            r#"{
                "providers": {
                    "site": { "urlPattern": "^https?://x\\.example", "rules": ["^utm_"] }
                }
            }"#,
        );
        assert_eq!(
            engine.clean("https://x.example/page?UTM_SOURCE=x&id=5"),
            CleaningOutcome::Cleaned("https://x.example/page?id=5".to_string())
        );
    }

    #[test]
    fn unwraps_redirector_and_cleans_destination() {
        let engine = engine(TRACKER_DOC);
        let url = "http://example.com/go?url=http%3A%2F%2Freal.site%2Fpage%3Futm_source%3Dnews";
        assert_eq!(
            engine.clean(url),
            CleaningOutcome::Cleaned("http://real.site/page".to_string())
        );
    }

    #[test]
    fn redirect_recursion_is_bounded_to_one_hop_with_iterative_substitution() {
        let engine = engine(
            r#"{
                "providers": {
                    "outer": {
                        "urlPattern": "^https?://out\\.example",
                        "redirections": ["target=([^&]+)"]
                    },
                    "middle": {
                        "urlPattern": "^https?://mid\\.example",
                        "redirections": ["next=([^&]+)"]
                    },
                    "inner": {
                        "urlPattern": "^https?://inner\\.example",
                        "rules": ["^utm_"]
                    }
                }
            }"#,
        );
        let innermost = "https://inner.example/page?utm_x=1&id=2";
        let middle = format!(
            "https://mid.example/r?next={}",
            urlencoding::encode(innermost)
        );
        let outer = format!(
            "https://out.example/r?target={}",
            urlencoding::encode(&middle)
        );
        // Only the outer decode recurses; the middle hop is unwrapped by
        // in-place substitution and the inner provider still cleans it.
        assert_eq!(
            engine.clean(&outer),
            CleaningOutcome::Cleaned("https://inner.example/page?id=2".to_string())
        );
    }

    #[test]
    fn blocked_destination_propagates_through_redirect() {
        let engine = engine(
            r#"{
                "providers": {
                    "wrap": {
                        "urlPattern": "^https?://wrap\\.example",
                        "redirections": ["to=([^&]+)"]
                    },
                    "ads": { "urlPattern": "^https?://ads\\.", "completeProvider": true }
                }
            }"#,
        );
        let url = format!(
            "https://wrap.example/r?to={}",
            urlencoding::encode("https://ads.example.com/banner")
        );
        assert_eq!(engine.clean(&url), CleaningOutcome::Blocked);
    }

    #[test]
    fn redirection_without_capture_group_falls_through_to_stripping() {
        let engine = engine(
            r#"{
                "providers": {
                    "faulty": {
                        "urlPattern": "^https?://f\\.example",
                        "redirections": ["url="],
                        "rules": ["^utm_"]
                    }
                }
            }"#,
        );
        assert_eq!(
            engine.clean("https://f.example/p?url=&utm_source=x&id=1"),
            CleaningOutcome::Cleaned("https://f.example/p?url=&id=1".to_string())
        );
    }

    #[test]
    fn empty_capture_is_not_a_redirection() {
        let engine = engine(
            r#"{
                "providers": {
                    "site": {
                        "urlPattern": "^https?://e\\.example",
                        "redirections": ["url=([^&]*)"],
                        "rules": ["^utm_"]
                    }
                }
            }"#,
        );
        assert_eq!(
            engine.clean("https://e.example/p?url=&utm_source=x"),
            CleaningOutcome::Cleaned("https://e.example/p?url=".to_string())
        );
    }

    #[test]
    fn raw_rules_run_after_query_stripping() {
        let engine = engine(
            r#"{
                "providers": {
                    "shop": {
                        "urlPattern": "^https?://shop\\.example",
                        "rules": ["^tag$"],
                        "rawRules": ["/ref=[^/?#]*"]
                    }
                }
            }"#,
        );
        assert_eq!(
            engine.clean("https://shop.example/dp/B01/ref=sr_1_1?tag=aff-20&id=7"),
            CleaningOutcome::Cleaned("https://shop.example/dp/B01?id=7".to_string())
        );
    }

    #[test]
    fn cleaning_is_idempotent() {
        let engine = engine(
            r#"{
                "providers": {
                    "shop": {
                        "urlPattern": "^https?://shop\\.example",
                        "rules": ["^tag$"],
                        "rawRules": ["/ref=[^/?#]*"]
                    }
                }
            }"#,
        );
        let once = engine.clean("https://shop.example/dp/B01/ref=sr_1_1?tag=aff-20&id=7");
        let CleaningOutcome::Cleaned(cleaned) = once else {
            panic!("expected a cleaned URL");
        };
        assert_eq!(
            engine.clean(&cleaned),
            CleaningOutcome::Unchanged(cleaned.clone())
        );
    }

    #[test]
    fn later_providers_see_earlier_output() {
        let engine = engine(
            r#"{
                "providers": {
                    "unwrapper": {
                        "urlPattern": "^https?://tr\\.example",
                        "rawRules": ["^https?://tr\\.example/c\\?dest="]
                    },
                    "target": {
                        "urlPattern": "^https?://b\\.example",
                        "rules": ["^bb_"]
                    }
                }
            }"#,
        );
        assert_eq!(
            engine.clean("https://tr.example/c?dest=https://b.example/?bb_y=2"),
            CleaningOutcome::Cleaned("https://b.example/".to_string())
        );
    }

    #[test]
    fn url_pattern_matching_is_case_insensitive() {
        let engine = engine(
            r#"{
                "providers": {
                    "site": { "urlPattern": "^https?://x\\.example", "rules": ["^utm_"] }
                }
            }"#,
        );
        assert_eq!(
            engine.clean("HTTPS://X.EXAMPLE/page?utm_source=n&id=1"),
            CleaningOutcome::Cleaned("https://x.example/page?id=1".to_string())
        );
    }

    #[test]
    fn surviving_pairs_keep_order_and_duplicates() {
        let engine = engine(
            r#"{
                "providers": {
                    "site": { "urlPattern": "^https?://d\\.example", "rules": ["^utm_"] }
                }
            }"#,
        );
        assert_eq!(
            engine.clean("https://d.example/p?a=1&utm_m=x&a=2&b=3"),
            CleaningOutcome::Cleaned("https://d.example/p?a=1&a=2&b=3".to_string())
        );
    }

    #[test]
    fn referral_marketing_rules_strip_pairs_too() {
        let engine = engine(
            r#"{
                "providers": {
                    "site": {
                        "urlPattern": "^https?://r\\.example",
                        "referralMarketing": ["^ref$"]
                    }
                }
            }"#,
        );
        assert_eq!(
            engine.clean("https://r.example/p?ref=partner&id=1"),
            CleaningOutcome::Cleaned("https://r.example/p?id=1".to_string())
        );
    }

    #[test]
    fn scan_cleans_extracted_links() {
        let engine = engine(TRACKER_DOC);
        let text = "look at https://real.site/a?utm_source=x and https://other.example/ too";
        let matches = engine.scan(text);
        assert_eq!(matches.len(), 2);
        assert_eq!(
            matches[0].outcome,
            CleaningOutcome::Cleaned("https://real.site/a".to_string())
        );
        assert_eq!(matches[0].original, "https://real.site/a?utm_source=x");
        assert!(matches!(matches[1].outcome, CleaningOutcome::Unchanged(_)));
    }

    #[test]
    fn default_rules_strip_global_tracking_parameters() {
        let engine = ProviderEngine::new(RulesConfig::load_default_rules().unwrap());
        assert_eq!(
            engine.clean("https://news.example/story?id=9&utm_campaign=mail&fbclid=abc"),
            CleaningOutcome::Cleaned("https://news.example/story?id=9".to_string())
        );
    }

    #[test]
    fn default_rules_block_ad_redirector_domains() {
        let engine = ProviderEngine::new(RulesConfig::load_default_rules().unwrap());
        assert!(engine.clean("https://ad.doubleclick.net/clk;123").is_blocked());
    }
}
