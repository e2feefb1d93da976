// crates/preflight-secrets/src/validator.rs
// ============================================================================
// Module: Preflight Secrets Validator
// Description: Per-type secret format, strength, and placeholder checks.
// Purpose: Score configured secret material and surface blocking gaps.
// Dependencies: crate::{classify, entropy}, preflight-core, serde
// ============================================================================

//! ## Overview
//! Each configured secret is classified, then checked with the rules for its
//! type: format shape, minimum length, placeholder smells, and entropy.
//! Placeholder secrets are critical errors here, unlike the environment tier
//! where a placeholder display string merely warns; a placeholder secret is a
//! guaranteed production failure. Findings deduct from a 0-100 score with
//! the same weights the configuration tier uses.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use preflight_core::Category;
use preflight_core::Findings;
use preflight_core::Priority;
use preflight_core::Recommendation;
use preflight_core::Score;
use preflight_core::ScoreLedger;
use preflight_core::Severity;
use preflight_core::ValidationError;
use preflight_core::ValidationWarning;
use preflight_core::pattern_matches;
use preflight_core::placeholder_smell;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::classify::SecretKind;
use crate::classify::classify;
use crate::entropy::LOW_ENTROPY_THRESHOLD;
use crate::entropy::shannon_entropy;

// ============================================================================
// SECTION: Format Patterns and Limits
// ============================================================================

/// Well-formed three-segment JWT shape.
const JWT_FORMAT_PATTERN: &str = r"^eyJ[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+$";

/// Recognized provider API key shape.
const API_KEY_FORMAT_PATTERN: &str = r"^(sk|pk)-[A-Za-z0-9_-]+$";

/// HTTPS endpoint shape.
const URL_FORMAT_PATTERN: &str = r"^https://[A-Za-z0-9.-]+(:\d+)?(/\S*)?$";

/// Minimum length of a signed JWT.
const MIN_JWT_LENGTH: usize = 100;

/// Minimum length of a provider API key.
const MIN_API_KEY_LENGTH: usize = 20;

/// Minimum length of a generic token.
const MIN_GENERIC_LENGTH: usize = 16;

/// Length below which a rotation recommendation is emitted.
const ROTATION_LENGTH: usize = 32;

/// Deduction per critical error.
const CRITICAL_DEDUCTION: i32 = 15;

/// Deduction per non-critical error.
const ERROR_DEDUCTION: i32 = 10;

/// Deduction per warning.
const WARNING_DEDUCTION: i32 = 2;

// ============================================================================
// SECTION: Validation Result
// ============================================================================

/// Outcome of secrets-tier validation.
///
/// # Invariants
/// - `is_valid` is true exactly when `errors` is empty.
/// - `score` is clamped to `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecretsValidationResult {
    /// True when no blocking errors were found.
    pub is_valid: bool,
    /// Security score for the secrets tier.
    pub score: Score,
    /// Blocking errors in evaluation order.
    pub errors: Vec<ValidationError>,
    /// Warnings in evaluation order.
    pub warnings: Vec<ValidationWarning>,
    /// Recommendations in evaluation order.
    pub recommendations: Vec<Recommendation>,
}

// ============================================================================
// SECTION: Validator
// ============================================================================

/// Secrets-tier validator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecretsValidator;

impl SecretsValidator {
    /// Creates the validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates a map of secret names to raw values.
    #[must_use]
    pub fn validate(&self, secrets: &BTreeMap<String, String>) -> SecretsValidationResult {
        debug!(secrets = secrets.len(), "validating secrets tier");
        let mut findings = Findings::new();

        if secrets.is_empty() {
            findings.push_recommendation(Recommendation::new(
                Category::Security,
                "secrets",
                "no secrets are configured",
                Priority::High,
                "Managed secrets keep credentials out of images and shell history",
            ));
        }
        for (name, value) in secrets {
            check_secret(name, value, &mut findings);
        }

        let score = score_findings(&findings);
        debug!(
            errors = findings.errors.len(),
            warnings = findings.warnings.len(),
            score = score.get(),
            "secrets tier validated"
        );
        SecretsValidationResult {
            is_valid: findings.is_valid(),
            score,
            errors: findings.errors,
            warnings: findings.warnings,
            recommendations: findings.recommendations,
        }
    }

    /// Validates an untrusted JSON secrets shape.
    ///
    /// A shape that is not an object of strings is reported as a single
    /// critical error instead of an error return.
    #[must_use]
    pub fn validate_json(&self, value: &Value) -> SecretsValidationResult {
        let Some(secrets) = string_map(value) else {
            let mut findings = Findings::new();
            findings.push_error(ValidationError::new(
                Category::Format,
                "unknown",
                "secrets input has an unexpected shape",
                Severity::Critical,
                "Pass a flat map of secret names to string values",
            ));
            let score = score_findings(&findings);
            return SecretsValidationResult {
                is_valid: false,
                score,
                errors: findings.errors,
                warnings: findings.warnings,
                recommendations: findings.recommendations,
            };
        };
        self.validate(&secrets)
    }
}

/// Converts a JSON object of strings into a secrets map.
fn string_map(value: &Value) -> Option<BTreeMap<String, String>> {
    let object = value.as_object()?;
    let mut secrets = BTreeMap::new();
    for (key, member) in object {
        match member {
            Value::Null => {}
            Value::String(text) => {
                secrets.insert(key.clone(), text.clone());
            }
            _ => return None,
        }
    }
    Some(secrets)
}

// ============================================================================
// SECTION: Per-Secret Checks
// ============================================================================

/// Runs the full check sequence for one secret.
fn check_secret(name: &str, value: &str, findings: &mut Findings) {
    if value.trim().is_empty() {
        findings.push_error(ValidationError::new(
            Category::Security,
            name,
            format!("{name} is empty"),
            Severity::Critical,
            "Provide the secret value or remove the entry",
        ));
        return;
    }
    if let Some(pattern) = placeholder_smell(value) {
        findings.push_error(ValidationError::new(
            Category::Security,
            name,
            format!("{name} looks like a placeholder value (matched {pattern})"),
            Severity::Critical,
            "Replace the placeholder with the real secret before deploying",
        ));
        return;
    }

    let kind = classify(name, value);
    format_checks(name, value, kind, findings);
    strength_checks(name, value, kind, findings);
}

/// Applies the format rules for the secret's type.
fn format_checks(name: &str, value: &str, kind: SecretKind, findings: &mut Findings) {
    match kind {
        SecretKind::Jwt => {
            if !pattern_matches(JWT_FORMAT_PATTERN, value) {
                findings.push_error(secret_error(name, "is not a well-formed JWT"));
            }
            if value.len() < MIN_JWT_LENGTH {
                findings.push_error(secret_error(name, "is too short for a signed token"));
            }
        }
        SecretKind::ApiKey => {
            if value.len() < MIN_API_KEY_LENGTH {
                findings.push_error(secret_error(name, "is too short for a provider API key"));
            }
            if !pattern_matches(API_KEY_FORMAT_PATTERN, value) {
                findings.push_error(secret_error(name, "does not have a recognized key prefix"));
            }
        }
        SecretKind::Url => {
            if value.starts_with("http://") {
                findings.push_error(secret_error(name, "must use https"));
            } else if !pattern_matches(URL_FORMAT_PATTERN, value) {
                findings.push_error(secret_error(name, "is not a valid https URL"));
            }
        }
        SecretKind::GenericToken => {
            if value.len() < MIN_GENERIC_LENGTH {
                findings.push_error(secret_error(name, "is too short for a credential"));
            }
        }
    }
}

/// Applies entropy and rotation-length checks common to all types.
fn strength_checks(name: &str, value: &str, kind: SecretKind, findings: &mut Findings) {
    if kind != SecretKind::Url {
        if value.len() >= MIN_GENERIC_LENGTH
            && shannon_entropy(value) < LOW_ENTROPY_THRESHOLD
        {
            findings.push_warning(
                ValidationWarning::new(
                    Category::Security,
                    name,
                    format!("{name} has low entropy for its length"),
                )
                .with_suggestion("Generate the secret with a cryptographic random source"),
            );
        }
        if value.len() < ROTATION_LENGTH {
            findings.push_recommendation(Recommendation::new(
                Category::Security,
                name,
                format!("{name} is shorter than {ROTATION_LENGTH} characters"),
                Priority::Medium,
                "Longer secrets resist offline guessing if a hash ever leaks",
            ));
        }
    }
}

/// Builds a non-critical secret format error.
fn secret_error(name: &str, detail: &str) -> ValidationError {
    ValidationError::new(
        Category::Security,
        name,
        format!("{name} {detail}"),
        Severity::Error,
        "Copy the value from the provider console without truncation",
    )
}

// ============================================================================
// SECTION: Scoring
// ============================================================================

/// Deducts the secrets score from accumulated findings.
fn score_findings(findings: &Findings) -> Score {
    let mut ledger = ScoreLedger::new();
    for error in &findings.errors {
        if error.severity.is_critical() {
            ledger.deduct(CRITICAL_DEDUCTION);
        } else {
            ledger.deduct(ERROR_DEDUCTION);
        }
    }
    let warning_count = i32::try_from(findings.warnings.len()).unwrap_or(i32::MAX);
    ledger.deduct(warning_count.saturating_mul(WARNING_DEDUCTION));
    ledger.into_score()
}
