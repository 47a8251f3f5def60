//! outcome.rs - Result types produced by the cleaning engine.
//!
//! The engine's three possible results are modeled as a proper tagged
//! variant so callers can never confuse "blocked" with a rewritten URL.
//!
//! License: MIT OR Apache-2.0

/// The result of cleaning a single URL against a rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleaningOutcome {
    /// No provider altered the input; carries the original URL untouched.
    Unchanged(String),
    /// At least one provider rewrote the URL; carries the final form.
    Cleaned(String),
    /// A complete provider matched: the URL must not be surfaced at all.
    Blocked,
}

impl CleaningOutcome {
    /// The resulting URL, if there is one to show.
    pub fn url(&self) -> Option<&str> {
        match self {
            CleaningOutcome::Unchanged(url) | CleaningOutcome::Cleaned(url) => Some(url),
            CleaningOutcome::Blocked => None,
        }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, CleaningOutcome::Blocked)
    }

    pub fn was_cleaned(&self) -> bool {
        matches!(self, CleaningOutcome::Cleaned(_))
    }
}

/// One extracted link together with its cleaning outcome, as produced by a
/// scan over free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMatch {
    /// The candidate link exactly as it appeared in the source text.
    pub original: String,
    pub outcome: CleaningOutcome,
}
