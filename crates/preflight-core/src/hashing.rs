// crates/preflight-core/src/hashing.rs
// ============================================================================
// Module: Preflight Gate Report Hashing
// Description: RFC 8785 JSON canonicalization and report fingerprinting.
// Purpose: Provide deterministic digests so CI can detect validation drift.
// Dependencies: serde, serde_jcs, sha2
// ============================================================================

//! ## Overview
//! Validation outcomes are fingerprinted by hashing their canonical JSON
//! (RFC 8785/JCS) with SHA-256. Two runs over identical inputs produce the
//! same digest, so a pipeline can compare fingerprints instead of diffing
//! report text.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

// ============================================================================
// SECTION: Report Digest
// ============================================================================

/// Deterministic fingerprint of a validation outcome.
///
/// # Invariants
/// - `value` is the lowercase hex SHA-256 of the canonical JSON bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDigest {
    /// Lowercase hex-encoded digest.
    pub value: String,
}

impl ReportDigest {
    /// Returns the digest as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while fingerprinting a validation outcome.
#[derive(Debug, Error)]
pub enum DigestError {
    /// JSON canonicalization failed for the outcome value.
    #[error("failed to canonicalize outcome: {0}")]
    Canonicalization(String),
}

// ============================================================================
// SECTION: Fingerprinting
// ============================================================================

/// Fingerprints a serializable validation outcome.
///
/// # Errors
///
/// Returns [`DigestError::Canonicalization`] when the value cannot be
/// serialized to canonical JSON.
pub fn fingerprint<T: Serialize + ?Sized>(outcome: &T) -> Result<ReportDigest, DigestError> {
    let canonical = serde_jcs::to_vec(outcome)
        .map_err(|err| DigestError::Canonicalization(err.to_string()))?;
    let mut hasher = Sha256::new();
    hasher.update(&canonical);
    Ok(ReportDigest {
        value: hex_encode(&hasher.finalize()),
    })
}

/// Encodes bytes as a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn identical_values_share_a_digest() {
        let left = fingerprint(&json!({"b": 2, "a": 1}));
        let right = fingerprint(&json!({"a": 1, "b": 2}));
        assert_eq!(left.ok(), right.ok());
    }

    #[test]
    fn different_values_diverge() {
        let left = fingerprint(&json!({"a": 1})).ok();
        let right = fingerprint(&json!({"a": 2})).ok();
        assert_ne!(left, right);
    }

    #[test]
    fn digest_is_lowercase_hex() {
        let digest = fingerprint(&json!("probe")).ok();
        assert!(digest.is_some_and(|digest| {
            digest.value.len() == 64
                && digest.value.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
        }));
    }
}
