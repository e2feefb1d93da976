// crates/preflight-core/src/placeholder.rs
// ============================================================================
// Module: Preflight Gate Placeholder Smells
// Description: Heuristic detection of never-replaced template values.
// Purpose: Share one placeholder pattern list across validation tiers.
// Dependencies: regex
// ============================================================================

//! ## Overview
//! A placeholder smell is a string pattern suggesting a value was copied from
//! documentation or a template and never replaced with real configuration.
//! Detection is shared by the environment and secrets tiers; each tier
//! decides the finding severity (the environment tier warns, the secrets
//! tier blocks).

// ============================================================================
// SECTION: Imports
// ============================================================================

use regex::Regex;

// ============================================================================
// SECTION: Patterns
// ============================================================================

/// Placeholder-smell patterns, applied case-insensitively and unanchored.
pub const PLACEHOLDER_PATTERNS: &[&str] = &[
    r"your[-_]?\w+",
    "placeholder",
    "example",
    r"test[-_]?\w+",
    "demo",
    "sample",
    "dummy",
    "fake",
    "mock",
];

// ============================================================================
// SECTION: Detection
// ============================================================================

/// Returns the first placeholder pattern matching the value, if any.
#[must_use]
pub fn placeholder_smell(value: &str) -> Option<&'static str> {
    PLACEHOLDER_PATTERNS
        .iter()
        .find(|pattern| pattern_matches(&format!("(?i){pattern}"), value))
        .copied()
}

/// Returns true when the value matches the pattern.
///
/// A pattern that fails to compile matches nothing.
#[must_use]
pub fn pattern_matches(pattern: &str, value: &str) -> bool {
    let Ok(regex) = Regex::new(pattern) else {
        return false;
    };
    regex.is_match(value)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
