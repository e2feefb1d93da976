// crates/preflight-config/src/readiness.rs
// ============================================================================
// Module: Preflight Config Scoring and Readiness
// Description: Tier score and deployment-readiness score computations.
// Purpose: Keep the two formulas side by side and deliberately separate.
// Dependencies: crate::model, preflight-core, preflight-env
// ============================================================================

//! ## Overview
//! The configuration tier produces two scores from the same findings. The
//! tier score deducts 15/10/2 points for critical errors, errors, and
//! warnings and credits flat bonuses for enabled good practices. The
//! readiness score deducts 20 per critical error plus flat penalties for
//! concrete deployment blockers. The two formulas share no helper on
//! purpose; deriving one from the other would silently change gating
//! behavior.

// ============================================================================
// SECTION: Imports
// ============================================================================

use preflight_core::DeploymentReadiness;
use preflight_core::Findings;
use preflight_core::ReadinessLevel;
use preflight_core::Score;
use preflight_core::ScoreLedger;
use preflight_env::EnvConfig;

use crate::model::AppConfig;

// ============================================================================
// SECTION: Tier Score Weights
// ============================================================================

/// Tier score deduction per critical error.
const SCORE_CRITICAL_DEDUCTION: i32 = 15;

/// Tier score deduction per non-critical error.
const SCORE_ERROR_DEDUCTION: i32 = 10;

/// Tier score deduction per warning.
const SCORE_WARNING_DEDUCTION: i32 = 2;

/// Tier score bonus per enabled good practice.
const SCORE_PRACTICE_BONUS: i32 = 5;

// ============================================================================
// SECTION: Readiness Score Weights
// ============================================================================

/// Readiness deduction per critical error.
const READINESS_CRITICAL_DEDUCTION: i32 = 20;

/// Readiness deduction when the project URL is missing.
const READINESS_MISSING_URL_DEDUCTION: i32 = 30;

/// Readiness deduction when AI is enabled without a provider key.
const READINESS_MISSING_AI_KEY_DEDUCTION: i32 = 20;

/// Readiness deduction when the secrets tier is invalid.
const READINESS_SECRETS_DEDUCTION: i32 = 25;

/// Readiness score gating the production tier and the ready verdict.
const READY_THRESHOLD: u8 = 80;

/// Readiness score gating the staging tier and the needs-attention verdict.
const ATTENTION_THRESHOLD: u8 = 60;

/// Readiness score gating the development tier.
const DEVELOPMENT_THRESHOLD: u8 = 40;

// ============================================================================
// SECTION: Tier Score
// ============================================================================

/// Computes the configuration tier score.
///
/// Bonuses are not mutually exclusive; the raw value can exceed 100 before
/// the final clamp.
#[must_use]
pub fn calculate_config_score(findings: &Findings, config: &AppConfig) -> Score {
    let mut ledger = ScoreLedger::new();
    for error in &findings.errors {
        if error.severity.is_critical() {
            ledger.deduct(SCORE_CRITICAL_DEDUCTION);
        } else {
            ledger.deduct(SCORE_ERROR_DEDUCTION);
        }
    }
    let warning_count = i32::try_from(findings.warnings.len()).unwrap_or(i32::MAX);
    ledger.deduct(warning_count.saturating_mul(SCORE_WARNING_DEDUCTION));

    if config.cache_enabled() {
        ledger.credit(SCORE_PRACTICE_BONUS);
    }
    if config.encryption_enabled() {
        ledger.credit(SCORE_PRACTICE_BONUS);
    }
    if config.monitoring_enabled() {
        ledger.credit(SCORE_PRACTICE_BONUS);
    }
    ledger.into_score()
}

// ============================================================================
// SECTION: Readiness Score
// ============================================================================

/// Computes deployment readiness with its own deduction formula.
///
/// The tri-state verdict and the three tier gates are separately stated
/// rules over the readiness score; none is derived from another.
#[must_use]
pub fn calculate_deployment_readiness(
    findings: &Findings,
    config: &AppConfig,
    env: Option<&EnvConfig>,
    secrets_valid: bool,
) -> DeploymentReadiness {
    let mut ledger = ScoreLedger::new();
    let mut issues = Vec::new();

    let critical_count = findings.critical_count();
    for error in &findings.errors {
        if error.severity.is_critical() {
            ledger.deduct(READINESS_CRITICAL_DEDUCTION);
            issues.push(error.message.clone());
        }
    }
    let project_url = env.is_some_and(|env| env.supabase_url.is_some());
    if !project_url {
        ledger.deduct(READINESS_MISSING_URL_DEDUCTION);
        issues.push("the project URL is not configured".to_string());
    }
    let ai_key = env.is_some_and(|env| env.openai_api_key.is_some());
    if config.ai_enabled() && !ai_key {
        ledger.deduct(READINESS_MISSING_AI_KEY_DEDUCTION);
        issues.push("AI features are enabled without a provider key".to_string());
    }
    if !secrets_valid {
        ledger.deduct(READINESS_SECRETS_DEDUCTION);
        issues.push("the secrets tier is not valid".to_string());
    }

    let score = ledger.into_score();
    let overall = if score.get() >= READY_THRESHOLD && critical_count == 0 {
        ReadinessLevel::Ready
    } else if score.get() >= ATTENTION_THRESHOLD {
        ReadinessLevel::NeedsAttention
    } else {
        ReadinessLevel::NotReady
    };
    let production = score.get() >= READY_THRESHOLD && critical_count == 0;
    let staging = score.get() >= ATTENTION_THRESHOLD && findings.errors.is_empty();
    let development = score.get() >= DEVELOPMENT_THRESHOLD;

    DeploymentReadiness {
        overall,
        production,
        staging,
        development,
        issues,
        score,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use preflight_core::Category;
    use preflight_core::Severity;
    use preflight_core::ValidationError;

    use super::*;

    /// Findings with the requested number of critical errors.
    fn critical_findings(count: usize) -> Findings {
        let mut findings = Findings::new();
        for index in 0 .. count {
            findings.push_error(ValidationError::new(
                Category::Integration,
                format!("field_{index}"),
                "synthetic critical",
                Severity::Critical,
                "fix",
            ));
        }
        findings
    }

    #[test]
    fn the_two_formulas_use_different_critical_weights() {
        let findings = critical_findings(1);
        let config = AppConfig::default();
        let score = calculate_config_score(&findings, &config);
        let readiness = calculate_deployment_readiness(&findings, &config, None, true);
        assert_eq!(score.get(), 85);
        // 100 - 20 (critical) - 30 (missing URL) = 50.
        assert_eq!(readiness.score.get(), 50);
    }

    #[test]
    fn ready_requires_both_score_and_zero_criticals() {
        let findings = Findings::new();
        let config = AppConfig::default();
        let readiness = calculate_deployment_readiness(&findings, &config, None, true);
        // 100 - 30 (missing URL) = 70: attention band, staging gate open.
        assert_eq!(readiness.overall, ReadinessLevel::NeedsAttention);
        assert!(!readiness.production);
        assert!(readiness.staging);
        assert!(readiness.development);
    }

    #[test]
    fn staging_gate_closes_on_any_error_severity() {
        let mut findings = Findings::new();
        findings.push_error(ValidationError::new(
            Category::Core,
            "app.name",
            "synthetic error",
            Severity::Error,
            "fix",
        ));
        let config = AppConfig::default();
        let readiness = calculate_deployment_readiness(&findings, &config, None, true);
        // Non-critical errors do not deduct readiness points, but they do
        // close the staging gate.
        assert_eq!(readiness.score.get(), 70);
        assert!(!readiness.staging);
        assert!(readiness.development);
    }
}
