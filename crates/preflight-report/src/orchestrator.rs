// crates/preflight-report/src/orchestrator.rs
// ============================================================================
// Module: Preflight Report Orchestrator
// Description: Sequenced execution of the three validation tiers.
// Purpose: Compose tier results into one weighted verdict and report.
// Dependencies: crate::render, preflight-config, preflight-core,
// preflight-env, preflight-secrets, serde
// ============================================================================

//! ## Overview
//! The orchestrator runs the environment, secrets, and configuration
//! validators in that order (the configuration tier consumes the first
//! two tiers' outputs), blends the tier scores into a weighted composite,
//! derives the final readiness verdict, and renders the aggregate report.
//! The three validators are plain eager values; the whole pipeline is
//! synchronous and pure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use preflight_config::AppConfig;
use preflight_config::ConfigValidationResult;
use preflight_config::ConfigValidator;
use preflight_core::ReadinessLevel;
use preflight_core::Score;
use preflight_env::EnvValidationResult;
use preflight_env::EnvValidator;
use preflight_secrets::SecretsValidationResult;
use preflight_secrets::SecretsValidator;
use serde::Deserialize;
use serde::Serialize;
use tracing::info;

use crate::render::render_overall_report;

// ============================================================================
// SECTION: Composite Weights
// ============================================================================

/// Weighted share contributed by a valid environment tier.
///
/// The environment tier is pass/fail: it contributes this full share or
/// nothing, unlike the scored secrets and configuration tiers.
const ENV_SHARE: f64 = 30.0;

/// Composite weight of the secrets score.
const SECRETS_WEIGHT: f64 = 0.4;

/// Composite weight of the configuration score.
const CONFIG_WEIGHT: f64 = 0.3;

/// Composite score required for the ready verdict.
const READY_THRESHOLD: u8 = 80;

/// Composite score required for the needs-attention verdict.
const ATTENTION_THRESHOLD: u8 = 60;

// ============================================================================
// SECTION: Overall Result
// ============================================================================

/// Aggregate outcome across all three validation tiers.
///
/// # Invariants
/// - `is_valid` is the conjunction of the three tier validity flags.
/// - `score` is clamped to `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallResult {
    /// True when every tier is valid.
    pub is_valid: bool,
    /// Weighted composite score.
    pub score: Score,
    /// Final readiness verdict from the composite score.
    pub readiness: ReadinessLevel,
    /// Rendered aggregate report.
    pub summary: String,
    /// Environment tier result.
    pub env: EnvValidationResult,
    /// Secrets tier result.
    pub secrets: SecretsValidationResult,
    /// Configuration tier result.
    pub config: ConfigValidationResult,
}

// ============================================================================
// SECTION: Orchestrator
// ============================================================================

/// Orchestrator holding the three tier validators.
#[derive(Debug, Clone, Copy, Default)]
pub struct Orchestrator {
    /// Environment tier validator.
    env: EnvValidator,
    /// Secrets tier validator.
    secrets: SecretsValidator,
    /// Configuration tier validator.
    config: ConfigValidator,
}

impl Orchestrator {
    /// Creates an orchestrator with eagerly constructed validators.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            env: EnvValidator::new(),
            secrets: SecretsValidator::new(),
            config: ConfigValidator::new(),
        }
    }

    /// Runs all three tiers and composes the aggregate verdict.
    ///
    /// Absent inputs validate as empty; nothing is read from ambient state.
    #[must_use]
    pub fn validate_all(
        &self,
        env_map: Option<&BTreeMap<String, String>>,
        secrets_map: Option<&BTreeMap<String, String>>,
        app_config: Option<&AppConfig>,
    ) -> OverallResult {
        let empty_map = BTreeMap::new();
        let default_config = AppConfig::default();

        let env_result = self.env.validate(env_map.unwrap_or(&empty_map));
        let secrets_result = self.secrets.validate(secrets_map.unwrap_or(&empty_map));
        let config_result = self.config.validate(
            app_config.unwrap_or(&default_config),
            env_result.config.as_ref(),
            &secrets_result,
        );

        let is_valid = env_result.is_valid && secrets_result.is_valid && config_result.is_valid;
        let score = composite_score(&env_result, &secrets_result, &config_result);
        let readiness = if score.get() >= READY_THRESHOLD && is_valid {
            ReadinessLevel::Ready
        } else if score.get() >= ATTENTION_THRESHOLD {
            ReadinessLevel::NeedsAttention
        } else {
            ReadinessLevel::NotReady
        };
        info!(
            valid = is_valid,
            score = score.get(),
            readiness = %readiness,
            "preflight validation complete"
        );

        let summary = render_overall_report(
            &env_result,
            &secrets_result,
            &config_result,
            score,
            readiness,
            is_valid,
        );
        OverallResult {
            is_valid,
            score,
            readiness,
            summary,
            env: env_result,
            secrets: secrets_result,
            config: config_result,
        }
    }
}

// ============================================================================
// SECTION: Composite Score
// ============================================================================

/// Blends the three tier outcomes into the weighted composite score.
#[allow(
    clippy::cast_possible_truncation,
    reason = "The weighted blend of clamped scores is bounded by 100."
)]
fn composite_score(
    env: &EnvValidationResult,
    secrets: &SecretsValidationResult,
    config: &ConfigValidationResult,
) -> Score {
    let env_share = if env.is_valid { ENV_SHARE } else { 0.0 };
    let raw = env_share
        + f64::from(secrets.score.get()) * SECRETS_WEIGHT
        + f64::from(config.score.get()) * CONFIG_WEIGHT;
    Score::clamped(raw.round() as i32)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
