// crates/preflight-secrets/src/classify.rs
// ============================================================================
// Module: Preflight Secrets Classification
// Description: Secret type classification by name and value shape.
// Purpose: Route each secret to the format checks appropriate for its type.
// Dependencies: preflight-core
// ============================================================================

//! ## Overview
//! Secrets are classified before any format check runs: the name is
//! consulted first (a `*_ANON_KEY` is a JWT no matter what its value looks
//! like), then the value shape. Anything unrecognized is a generic token and
//! gets the baseline length and entropy checks only.

// ============================================================================
// SECTION: Imports
// ============================================================================

use preflight_core::pattern_matches;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Secret Kinds
// ============================================================================

/// Secret type driving the format checks applied to a value.
///
/// # Invariants
/// - Variants are stable for serialization and report grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretKind {
    /// Signed JWT (three base64url segments).
    Jwt,
    /// Provider API key with a recognized prefix.
    ApiKey,
    /// Endpoint URL.
    Url,
    /// Generic opaque token.
    GenericToken,
}

impl SecretKind {
    /// Returns the stable string form used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Jwt => "jwt",
            Self::ApiKey => "api_key",
            Self::Url => "url",
            Self::GenericToken => "generic_token",
        }
    }
}

// ============================================================================
// SECTION: Classification Patterns
// ============================================================================

/// Name shapes identifying JWT-bearing secrets.
const JWT_NAME_PATTERN: &str = r"(?i)jwt|service_role|anon";

/// Name shapes identifying endpoint URLs.
const URL_NAME_PATTERN: &str = r"(?i)url|endpoint|uri";

/// Name shapes identifying provider API keys.
const API_KEY_NAME_PATTERN: &str = r"(?i)api[_-]?key|secret[_-]?key|access[_-]?key";

/// Value shape of a three-segment JWT.
const JWT_VALUE_PATTERN: &str = r"^eyJ[A-Za-z0-9_-]*\.[A-Za-z0-9_-]*\.[A-Za-z0-9_-]*$";

// ============================================================================
// SECTION: Classification
// ============================================================================

/// Classifies a secret by name first, value shape second.
#[must_use]
pub fn classify(name: &str, value: &str) -> SecretKind {
    if pattern_matches(JWT_NAME_PATTERN, name) || pattern_matches(JWT_VALUE_PATTERN, value) {
        return SecretKind::Jwt;
    }
    if pattern_matches(URL_NAME_PATTERN, name)
        || value.starts_with("https://")
        || value.starts_with("http://")
    {
        return SecretKind::Url;
    }
    if pattern_matches(API_KEY_NAME_PATTERN, name) || value.starts_with("sk-") {
        return SecretKind::ApiKey;
    }
    SecretKind::GenericToken
}

// ============================================================================
// SECTION: Tests
// ============================================================================
