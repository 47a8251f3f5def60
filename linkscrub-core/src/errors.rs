//! errors.rs - Custom error types for the linkscrub-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `linkscrub-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions. This prevents them from
/// matching all variants exhaustively, thus avoiding breaking changes.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ScrubError {
    #[error("Failed to compile pattern for provider '{0}': {1}")]
    PatternCompilationError(String, regex::Error),

    #[error("Provider '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Invalid rules document: {0}")]
    InvalidRulesDocument(String),

    #[error("Failed to parse rules document: {0}")]
    ParseError(#[from] serde_json::Error),
}
