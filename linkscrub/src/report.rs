// linkscrub/src/report.rs
//! Caller-side reporting policy.
//!
//! The engine reports every change; deciding which changes are worth
//! surfacing is this layer's job, so the engine stays a pure function
//! usable outside any messaging context.
//!
//! License: MIT OR Apache-2.0

/// Returns true when a cleaned URL differs enough from the original to be
/// worth reporting: the character-length delta must reach `threshold` and
/// the two forms must differ beyond letter case.
///
/// The case-insensitive check alone (with a threshold of zero) suppresses
/// pure case/normalization noise such as `HTTP://HOST` vs `http://host`.
pub fn is_significant(original: &str, cleaned: &str, threshold: usize) -> bool {
    original.len().abs_diff(cleaned.len()) >= threshold
        && original.to_lowercase() != cleaned.to_lowercase()
}
