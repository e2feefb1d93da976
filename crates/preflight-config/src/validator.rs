// crates/preflight-config/src/validator.rs
// ============================================================================
// Module: Preflight Config Validator
// Description: Six-pass application configuration validation.
// Purpose: Check internal consistency plus cross-tier dependencies and score
//          the configuration tier.
// Dependencies: crate::{model, readiness}, preflight-core, preflight-env,
// preflight-secrets, serde
// ============================================================================

//! ## Overview
//! Configuration validation runs six passes in fixed order: core identity
//! checks, feature dependency checks, performance checks, security checks,
//! integration readiness checks, and recommendation generation. Every pass
//! appends to the same containers; no pass reads another pass's findings.
//! The tier score and the deployment-readiness score are computed by two
//! separate formulas over the same findings.

// ============================================================================
// SECTION: Imports
// ============================================================================

use preflight_core::Category;
use preflight_core::DeploymentReadiness;
use preflight_core::Findings;
use preflight_core::Priority;
use preflight_core::Recommendation;
use preflight_core::Score;
use preflight_core::Severity;
use preflight_core::ValidationError;
use preflight_core::ValidationWarning;
use preflight_core::pattern_matches;
use preflight_env::EnvConfig;
use preflight_secrets::SecretsValidationResult;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::model::AppConfig;
use crate::readiness::calculate_config_score;
use crate::readiness::calculate_deployment_readiness;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Semantic version shape for the core version check.
const VERSION_PATTERN: &str = r"^\d+\.\d+\.\d+$";

/// Deployment environments accepted by the core environment check.
const ENVIRONMENTS: &[&str] = &["development", "staging", "production"];

/// Cache TTLs below this warn about thrashing.
const MIN_CACHE_TTL_SECONDS: u64 = 60;

/// Cache capacities below this warn about eviction churn.
const MIN_CACHE_MAX_SIZE: u64 = 100;

/// Rate-limit windows below this block as misconfigured.
const MIN_RATE_LIMIT_WINDOW_MS: u64 = 1000;

/// JWT expiries below this warn about session churn.
const MIN_JWT_EXPIRY_SECONDS: u64 = 300;

/// JWT expiries above this warn about stolen-token exposure.
const MAX_JWT_EXPIRY_SECONDS: u64 = 86_400;

// ============================================================================
// SECTION: Validation Result
// ============================================================================

/// Outcome of configuration-tier validation.
///
/// # Invariants
/// - `is_valid` is true exactly when `errors` is empty.
/// - `score` and `readiness.score` come from separate formulas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigValidationResult {
    /// True when no blocking errors were found.
    pub is_valid: bool,
    /// Configuration tier score.
    pub score: Score,
    /// Blocking errors in evaluation order.
    pub errors: Vec<ValidationError>,
    /// Warnings in evaluation order.
    pub warnings: Vec<ValidationWarning>,
    /// Recommendations in evaluation order.
    pub recommendations: Vec<Recommendation>,
    /// Deployment readiness verdict.
    pub readiness: DeploymentReadiness,
}

// ============================================================================
// SECTION: Validator
// ============================================================================

/// Configuration-tier validator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigValidator;

impl ConfigValidator {
    /// Creates the validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates the application configuration against both upstream tiers.
    ///
    /// `env` is the typed environment when that tier parsed cleanly; the
    /// secrets result is consumed only for its validity flag.
    #[must_use]
    pub fn validate(
        &self,
        config: &AppConfig,
        env: Option<&EnvConfig>,
        secrets: &SecretsValidationResult,
    ) -> ConfigValidationResult {
        debug!("validating configuration tier");
        let mut findings = Findings::new();

        core_checks(config, &mut findings);
        feature_checks(config, env, &mut findings);
        performance_checks(config, &mut findings);
        security_checks(config, env, &mut findings);
        integration_checks(config, env, secrets.is_valid, &mut findings);
        recommendation_checks(config, &mut findings);

        let score = calculate_config_score(&findings, config);
        let readiness = calculate_deployment_readiness(&findings, config, env, secrets.is_valid);
        debug!(
            errors = findings.errors.len(),
            warnings = findings.warnings.len(),
            score = score.get(),
            readiness = %readiness.overall,
            "configuration tier validated"
        );
        ConfigValidationResult {
            is_valid: findings.is_valid(),
            score,
            errors: findings.errors,
            warnings: findings.warnings,
            recommendations: findings.recommendations,
            readiness,
        }
    }

    /// Validates an untrusted JSON configuration shape.
    ///
    /// A shape that does not deserialize into the config model is reported
    /// as a single critical error instead of an error return.
    #[must_use]
    pub fn validate_json(
        &self,
        value: &Value,
        env: Option<&EnvConfig>,
        secrets: &SecretsValidationResult,
    ) -> ConfigValidationResult {
        match serde_json::from_value::<AppConfig>(value.clone()) {
            Ok(config) => self.validate(&config, env, secrets),
            Err(err) => {
                let mut findings = Findings::new();
                findings.push_error(ValidationError::new(
                    Category::Format,
                    "unknown",
                    format!("configuration input has an unexpected shape: {err}"),
                    Severity::Critical,
                    "Pass a configuration object with the documented sections",
                ));
                let config = AppConfig::default();
                let score = calculate_config_score(&findings, &config);
                let readiness =
                    calculate_deployment_readiness(&findings, &config, env, secrets.is_valid);
                ConfigValidationResult {
                    is_valid: false,
                    score,
                    errors: findings.errors,
                    warnings: findings.warnings,
                    recommendations: findings.recommendations,
                    readiness,
                }
            }
        }
    }
}

// ============================================================================
// SECTION: Pass 1 - Core Checks
// ============================================================================

/// Validates core application identity fields when the section is present.
fn core_checks(config: &AppConfig, findings: &mut Findings) {
    let Some(app) = &config.app else {
        return;
    };
    if app.name.trim().is_empty() {
        findings.push_error(ValidationError::new(
            Category::Core,
            "app.name",
            "application name is empty",
            Severity::Error,
            "Set app.name to the deployed application identifier",
        ));
    }
    if !pattern_matches(VERSION_PATTERN, &app.version) {
        findings.push_error(ValidationError::new(
            Category::Core,
            "app.version",
            format!("version '{}' is not of the form major.minor.patch", app.version),
            Severity::Error,
            "Use a three-component semantic version such as 1.4.2",
        ));
    }
    if !ENVIRONMENTS.contains(&app.environment.as_str()) {
        findings.push_error(ValidationError::new(
            Category::Core,
            "app.environment",
            format!("environment '{}' is not recognized", app.environment),
            Severity::Error,
            "Use one of: development, staging, production",
        ));
    }
}

// ============================================================================
// SECTION: Pass 2 - Feature Dependency Checks
// ============================================================================

/// Validates feature flags against the environment they depend on.
fn feature_checks(config: &AppConfig, env: Option<&EnvConfig>, findings: &mut Findings) {
    let Some(features) = &config.features else {
        return;
    };
    let ai_key = env.is_some_and(|env| env.openai_api_key.is_some());
    let project_url = env.is_some_and(|env| env.supabase_url.is_some());
    let google_id = env.is_some_and(|env| env.google_client_id.is_some());

    if let Some(ai) = &features.ai {
        if ai.enabled && !ai_key {
            findings.push_error(ValidationError::new(
                Category::Features,
                "ai.enabled",
                "AI features are enabled but no AI provider key is configured",
                Severity::Error,
                "Set OPENAI_API_KEY in the environment or disable AI features",
            ));
        }
        if ai.ml_agent && !ai.enabled {
            findings.push_warning(
                ValidationWarning::new(
                    Category::Features,
                    "ai.ml_agent",
                    "the ML agent is enabled while AI features are disabled",
                )
                .with_suggestion("Enable features.ai.enabled or disable the ML agent"),
            );
        }
    }
    if let Some(auth) = &features.auth {
        if auth.enabled && !project_url {
            findings.push_error(ValidationError::new(
                Category::Features,
                "auth.enabled",
                "authentication is enabled but no project URL is configured",
                Severity::Critical,
                "Set SUPABASE_URL in the environment; auth cannot start without it",
            ));
        }
        if auth.google && !google_id {
            findings.push_warning(
                ValidationWarning::new(
                    Category::Features,
                    "auth.google",
                    "Google sign-in is enabled but no Google client id is configured",
                )
                .with_suggestion("Set GOOGLE_CLIENT_ID in the environment"),
            );
        }
    }
    if let Some(analysis) = &features.analysis
        && analysis.enabled
        && !project_url
    {
        findings.push_error(ValidationError::new(
            Category::Features,
            "analysis.enabled",
            "analysis is enabled but no project URL is configured",
            Severity::Error,
            "Set SUPABASE_URL in the environment or disable analysis",
        ));
    }
    if let Some(social) = &features.social
        && social.comments
        && !project_url
    {
        findings.push_warning(
            ValidationWarning::new(
                Category::Features,
                "social.comments",
                "comments are enabled but no project URL is configured",
            )
            .with_suggestion("Set SUPABASE_URL in the environment"),
        );
    }
}

// ============================================================================
// SECTION: Pass 3 - Performance Checks
// ============================================================================

/// Validates performance settings when their sections are present and enabled.
fn performance_checks(config: &AppConfig, findings: &mut Findings) {
    let Some(performance) = &config.performance else {
        return;
    };
    if let Some(cache) = &performance.cache
        && cache.enabled
    {
        if let Some(ttl) = cache.ttl_seconds
            && ttl < MIN_CACHE_TTL_SECONDS
        {
            findings.push_warning(
                ValidationWarning::new(
                    Category::Performance,
                    "cache.ttl",
                    format!("cache TTL of {ttl}s is below {MIN_CACHE_TTL_SECONDS}s"),
                )
                .with_suggestion("Short TTLs defeat the cache; raise the TTL"),
            );
        }
        if let Some(max_size) = cache.max_size
            && max_size < MIN_CACHE_MAX_SIZE
        {
            findings.push_warning(
                ValidationWarning::new(
                    Category::Performance,
                    "cache.max_size",
                    format!("cache capacity of {max_size} is below {MIN_CACHE_MAX_SIZE}"),
                )
                .with_suggestion("Tiny caches churn on eviction; raise the capacity"),
            );
        }
    }
    if let Some(rate_limit) = &performance.rate_limit
        && rate_limit.enabled
    {
        if rate_limit.max_requests.is_some_and(|max_requests| max_requests < 1) {
            findings.push_error(ValidationError::new(
                Category::Performance,
                "rateLimit.requests",
                "rate limiting is enabled with a zero request budget",
                Severity::Error,
                "Allow at least one request per window",
            ));
        }
        if let Some(window_ms) = rate_limit.window_ms
            && window_ms < MIN_RATE_LIMIT_WINDOW_MS
        {
            findings.push_error(ValidationError::new(
                Category::Performance,
                "rateLimit.window",
                format!("rate limit window of {window_ms}ms is below {MIN_RATE_LIMIT_WINDOW_MS}ms"),
                Severity::Error,
                "Use a window of at least one second",
            ));
        }
    }
}

// ============================================================================
// SECTION: Pass 4 - Security Checks
// ============================================================================

/// Validates security settings when their sections are present.
fn security_checks(config: &AppConfig, env: Option<&EnvConfig>, findings: &mut Findings) {
    let Some(security) = &config.security else {
        return;
    };
    let encryption_key = env.is_some_and(|env| env.encryption_key.is_some());
    let project_url = env.is_some_and(|env| env.supabase_url.is_some());

    if let Some(encryption) = &security.encryption
        && encryption.enabled
        && !encryption_key
    {
        findings.push_warning(
            ValidationWarning::new(
                Category::Security,
                "encryption.enabled",
                "encryption is enabled but no encryption key is configured",
            )
            .with_suggestion("Set ENCRYPTION_KEY in the environment"),
        );
    }
    if let Some(authentication) = &security.authentication
        && let Some(expiry) = authentication.jwt_expiry_seconds
    {
        if expiry < MIN_JWT_EXPIRY_SECONDS {
            findings.push_warning(
                ValidationWarning::new(
                    Category::Security,
                    "authentication.jwt_expiry",
                    format!("JWT expiry of {expiry}s is below {MIN_JWT_EXPIRY_SECONDS}s"),
                )
                .with_suggestion("Very short expiries force constant re-authentication"),
            );
        }
        if expiry > MAX_JWT_EXPIRY_SECONDS {
            findings.push_warning(
                ValidationWarning::new(
                    Category::Security,
                    "authentication.jwt_expiry",
                    format!("JWT expiry of {expiry}s exceeds {MAX_JWT_EXPIRY_SECONDS}s"),
                )
                .with_suggestion("Long-lived tokens extend the window of a stolen token"),
            );
        }
    }
    if let Some(data_protection) = &security.data_protection
        && data_protection.row_level_security
        && !project_url
    {
        findings.push_warning(
            ValidationWarning::new(
                Category::Security,
                "dataProtection.row_level_security",
                "row-level security is enabled but no project URL is configured",
            )
            .with_suggestion("Set SUPABASE_URL in the environment"),
        );
    }
}

// ============================================================================
// SECTION: Pass 5 - Integration Readiness Checks
// ============================================================================

/// Validates cross-tier integration readiness; always runs.
fn integration_checks(
    config: &AppConfig,
    env: Option<&EnvConfig>,
    secrets_valid: bool,
    findings: &mut Findings,
) {
    let backend_ready = env.is_some_and(|env| {
        env.supabase_url.is_some() && env.supabase_anon_key.is_some()
    });
    if !backend_ready {
        findings.push_error(ValidationError::new(
            Category::Integration,
            "integration.backend",
            "the project URL and anon key must both be configured",
            Severity::Critical,
            "Set SUPABASE_URL and SUPABASE_ANON_KEY in the environment",
        ));
    }
    let ai_key = env.is_some_and(|env| env.openai_api_key.is_some());
    if config.ai_enabled() && !ai_key {
        findings.push_error(ValidationError::new(
            Category::Integration,
            "integration.ai",
            "AI features are enabled but no AI provider key is configured",
            Severity::Error,
            "Set OPENAI_API_KEY in the environment",
        ));
    }
    if !secrets_valid {
        findings.push_error(ValidationError::new(
            Category::Integration,
            "integration.secrets",
            "the secrets tier reported blocking problems",
            Severity::Critical,
            "Resolve the secrets findings before deploying",
        ));
    }
}

// ============================================================================
// SECTION: Pass 6 - Recommendations
// ============================================================================

/// Emits best-practice recommendations; always runs.
fn recommendation_checks(config: &AppConfig, findings: &mut Findings) {
    if !config.cache_enabled() {
        findings.push_recommendation(Recommendation::new(
            Category::Performance,
            "performance.cache.enabled",
            "caching is not enabled",
            Priority::Medium,
            "Caching cuts backend load and tail latency for hot reads",
        ));
    }
    if !config.compression_enabled() {
        findings.push_recommendation(Recommendation::new(
            Category::Performance,
            "performance.optimization.compression",
            "response compression is not enabled",
            Priority::Medium,
            "Compression reduces transfer sizes for text-heavy responses",
        ));
    }
    if !config.encryption_enabled() {
        findings.push_recommendation(Recommendation::new(
            Category::Security,
            "security.encryption.enabled",
            "encryption at rest is not enabled",
            Priority::High,
            "Encryption limits the blast radius of a storage compromise",
        ));
    }
    if !config.audit_logging_enabled() {
        findings.push_recommendation(Recommendation::new(
            Category::Security,
            "security.data_protection.audit_logging",
            "audit logging is not enabled",
            Priority::Medium,
            "Audit trails make incident reconstruction possible",
        ));
    }
    let auth_on = config
        .features
        .as_ref()
        .and_then(|features| features.auth.as_ref())
        .is_some_and(|auth| auth.enabled);
    let google_on = config
        .features
        .as_ref()
        .and_then(|features| features.auth.as_ref())
        .is_some_and(|auth| auth.google);
    if auth_on && !google_on {
        findings.push_recommendation(Recommendation::new(
            Category::Features,
            "features.auth.google",
            "Google sign-in is not enabled alongside authentication",
            Priority::Low,
            "A federated provider reduces password-reset support load",
        ));
    }
    if !config.monitoring_enabled() {
        findings.push_recommendation(Recommendation::new(
            Category::Features,
            "features.monitoring.enabled",
            "monitoring is not enabled",
            Priority::Medium,
            "Monitoring shortens time-to-detection for production faults",
        ));
    }
}
