// crates/preflight-env/src/validator.rs
// ============================================================================
// Module: Preflight Env Validator
// Description: Four-stage environment validation pipeline.
// Purpose: Turn a raw environment map into a typed config plus findings.
// Dependencies: crate::{coerce, schema}, preflight-core, serde
// ============================================================================

//! ## Overview
//! The environment tier validates a raw string map in four stages: schema
//! coercion against the declarative table, an independent security pattern
//! re-check, a placeholder-smell scan, and cross-flag dependency checks.
//! A schema failure short-circuits the later stages and withholds the typed
//! config; security errors after a clean parse keep the config but mark the
//! result invalid. Placeholder smells and cross-flag gaps only ever warn.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use preflight_core::Category;
use preflight_core::Findings;
use preflight_core::Severity;
use preflight_core::ValidationError;
use preflight_core::ValidationWarning;
use preflight_core::pattern_matches;
use preflight_core::placeholder_smell;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::coerce::CoercedValue;
use crate::coerce::coerce;
use crate::coerce::to_integer;
use crate::schema::DefaultValue;
use crate::schema::FieldKind;
use crate::schema::FieldSpec;
use crate::schema::SCHEMA;
use crate::schema::suggestion_for;

// ============================================================================
// SECTION: Security Re-Check Patterns
// ============================================================================

/// Strict project-URL pattern (20-char lowercase project ref).
const SECURE_PROJECT_URL_PATTERN: &str = r"^https://[a-z0-9]{20}\.supabase\.co$";

/// Strict JWT pattern requiring non-trivial segment lengths.
const SECURE_JWT_PATTERN: &str =
    r"^eyJ[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}$";

/// Strict AI provider key pattern requiring a 20+ character tail.
const SECURE_AI_KEY_PATTERN: &str = r"^sk-[A-Za-z0-9_-]{20,}$";

/// Fields re-validated by the security stage, with their strict patterns.
const SECURITY_CHECKS: &[(&str, &str, &str)] = &[
    ("SUPABASE_URL", SECURE_PROJECT_URL_PATTERN, "is not a valid project URL"),
    ("SUPABASE_ANON_KEY", SECURE_JWT_PATTERN, "is not a well-formed JWT"),
    ("SUPABASE_SERVICE_ROLE_KEY", SECURE_JWT_PATTERN, "is not a well-formed JWT"),
    ("OPENAI_API_KEY", SECURE_AI_KEY_PATTERN, "is not a valid provider API key"),
];

// ============================================================================
// SECTION: Typed Environment Config
// ============================================================================

/// Deployment environment the application runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppEnv {
    /// Local or shared development.
    Development,
    /// Pre-production staging.
    Staging,
    /// Production.
    Production,
}

impl AppEnv {
    /// Parses a validated schema value into the enum.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "development" => Some(Self::Development),
            "staging" => Some(Self::Staging),
            "production" => Some(Self::Production),
            _ => None,
        }
    }
}

/// Log verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Errors only.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational logging.
    Info,
    /// Verbose debugging.
    Debug,
}

impl LogLevel {
    /// Parses a validated schema value into the enum.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "error" => Some(Self::Error),
            "warn" => Some(Self::Warn),
            "info" => Some(Self::Info),
            "debug" => Some(Self::Debug),
            _ => None,
        }
    }
}

/// Fully coerced and defaulted environment configuration.
///
/// # Invariants
/// - Produced only when every schema row validated cleanly.
/// - Numeric fields are within their declared bounds.
#[allow(clippy::struct_excessive_bools, reason = "Toggles mirror the feature-flag env keys.")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Deployed service identifier.
    pub service_name: String,
    /// Deployment environment.
    pub app_env: AppEnv,
    /// Log verbosity.
    pub log_level: LogLevel,
    /// Listen port.
    pub port: u64,
    /// Listen host.
    pub host: String,
    /// Backend project URL.
    pub supabase_url: Option<String>,
    /// Public anon key.
    pub supabase_anon_key: Option<String>,
    /// Privileged service role key.
    pub supabase_service_role_key: Option<String>,
    /// AI provider API key.
    pub openai_api_key: Option<String>,
    /// OAuth client id for Google sign-in.
    pub google_client_id: Option<String>,
    /// Symmetric encryption key.
    pub encryption_key: Option<String>,
    /// AI feature toggle.
    pub enable_ai_features: bool,
    /// ML agent toggle.
    pub enable_ml_agent: bool,
    /// Analysis mode toggle.
    pub enable_analysis: bool,
    /// Comments feature toggle.
    pub enable_comments: bool,
    /// Google auth toggle.
    pub enable_google_auth: bool,
    /// Monitoring toggle.
    pub enable_monitoring: bool,
    /// Request budget per rate-limit window.
    pub rate_limit_max_requests: u64,
    /// Rate-limit window in milliseconds.
    pub rate_limit_window_ms: u64,
    /// Request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Cache entry TTL in seconds.
    pub cache_ttl_seconds: u64,
    /// Cache capacity in entries.
    pub cache_max_size: u64,
    /// Session TTL in seconds.
    pub session_ttl_seconds: u64,
    /// JWT expiry in seconds.
    pub jwt_expiry_seconds: u64,
    /// Background cleanup interval in milliseconds.
    pub cleanup_interval_ms: u64,
    /// Database connection pool size.
    pub db_pool_size: u64,
}

// ============================================================================
// SECTION: Validation Result
// ============================================================================

/// Outcome of environment-tier validation.
///
/// # Invariants
/// - `is_valid` is true exactly when `errors` is empty.
/// - `config` is present exactly when schema parsing succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvValidationResult {
    /// True when no blocking errors were found.
    pub is_valid: bool,
    /// Blocking errors in evaluation order.
    pub errors: Vec<ValidationError>,
    /// Warnings in evaluation order.
    pub warnings: Vec<ValidationWarning>,
    /// Typed configuration, absent on schema failure.
    pub config: Option<EnvConfig>,
}

impl EnvValidationResult {
    /// Builds a result from accumulated findings and an optional config.
    fn from_findings(findings: Findings, config: Option<EnvConfig>) -> Self {
        Self {
            is_valid: findings.is_valid(),
            errors: findings.errors,
            warnings: findings.warnings,
            config,
        }
    }
}

// ============================================================================
// SECTION: Validator
// ============================================================================

/// Environment-tier validator.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvValidator;

impl EnvValidator {
    /// Creates the validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates a raw environment map.
    ///
    /// The map is the complete input; ambient process state is never read.
    #[must_use]
    pub fn validate(&self, env: &BTreeMap<String, String>) -> EnvValidationResult {
        debug!(keys = env.len(), "validating environment tier");
        let mut findings = Findings::new();
        let mut coerced: BTreeMap<&'static str, CoercedValue> = BTreeMap::new();

        for spec in SCHEMA {
            check_field(spec, env, &mut findings, &mut coerced);
        }
        if !findings.errors.is_empty() {
            debug!(errors = findings.errors.len(), "schema parse failed");
            return EnvValidationResult::from_findings(findings, None);
        }

        security_recheck(env, &mut findings);
        placeholder_scan(&coerced, &mut findings);
        cross_flag_checks(&coerced, &mut findings);

        let config = assemble(&coerced);
        debug!(
            errors = findings.errors.len(),
            warnings = findings.warnings.len(),
            "environment tier validated"
        );
        EnvValidationResult::from_findings(findings, Some(config))
    }

    /// Validates an untrusted JSON environment shape.
    ///
    /// A shape that is not an object of scalar values is reported as a
    /// single critical error instead of an error return.
    #[must_use]
    pub fn validate_json(&self, value: &Value) -> EnvValidationResult {
        let Some(env) = scalar_map(value) else {
            return unexpected_shape();
        };
        self.validate(&env)
    }
}

/// Converts a JSON object of scalars into an environment map.
fn scalar_map(value: &Value) -> Option<BTreeMap<String, String>> {
    let object = value.as_object()?;
    let mut env = BTreeMap::new();
    for (key, member) in object {
        match member {
            Value::Null => {}
            Value::String(text) => {
                env.insert(key.clone(), text.clone());
            }
            Value::Bool(flag) => {
                env.insert(key.clone(), flag.to_string());
            }
            Value::Number(number) => {
                env.insert(key.clone(), number.to_string());
            }
            Value::Array(_) | Value::Object(_) => return None,
        }
    }
    Some(env)
}

/// Builds the single-critical-error result for malformed input shapes.
fn unexpected_shape() -> EnvValidationResult {
    let mut findings = Findings::new();
    findings.push_error(ValidationError::new(
        Category::Format,
        "unknown",
        "environment input has an unexpected shape",
        Severity::Critical,
        "Pass a flat map of string keys to scalar values",
    ));
    EnvValidationResult::from_findings(findings, None)
}

// ============================================================================
// SECTION: Stage 1 - Schema Checks
// ============================================================================

/// Coerces and checks one schema row, recording the value on success.
fn check_field(
    spec: &FieldSpec,
    env: &BTreeMap<String, String>,
    findings: &mut Findings,
    coerced: &mut BTreeMap<&'static str, CoercedValue>,
) {
    let Some(raw) = env.get(spec.key) else {
        if let Some(default) = spec.default {
            coerced.insert(spec.key, default_value(default));
        } else if spec.required {
            findings.push_error(schema_error(spec.key, "is required but missing"));
        }
        return;
    };

    let value = coerce(raw);
    match spec.kind {
        FieldKind::Bool => {
            if value.as_bool().is_none() {
                findings.push_error(schema_error(spec.key, "must be true or false"));
                return;
            }
        }
        FieldKind::Number => {
            let Some(number) = value.as_number() else {
                findings.push_error(schema_error(spec.key, "must be a number"));
                return;
            };
            if number.fract() != 0.0 {
                findings.push_error(schema_error(spec.key, "must be an integer"));
                return;
            }
            if let Some(min) = spec.min
                && number < min
            {
                findings.push_error(schema_error(spec.key, format!("must be at least {min}")));
                return;
            }
            if let Some(max) = spec.max
                && number > max
            {
                findings.push_error(schema_error(spec.key, format!("must be at most {max}")));
                return;
            }
        }
        FieldKind::Str => {
            let Some(text) = value.as_str() else {
                findings.push_error(schema_error(spec.key, "must be a string"));
                return;
            };
            if let Some(min_len) = spec.min_len
                && text.len() < min_len
            {
                findings.push_error(schema_error(
                    spec.key,
                    format!("must be at least {min_len} characters"),
                ));
                return;
            }
            if let Some(values) = spec.values
                && !values.contains(&text)
            {
                findings.push_error(schema_error(
                    spec.key,
                    format!("must be one of: {}", values.join(", ")),
                ));
                return;
            }
            if let Some(pattern) = spec.pattern
                && !pattern_matches(pattern, text)
            {
                findings.push_error(schema_error(spec.key, "does not match the expected format"));
                return;
            }
        }
    }
    coerced.insert(spec.key, value);
}

/// Converts a declared default into a coerced value.
fn default_value(default: DefaultValue) -> CoercedValue {
    match default {
        DefaultValue::Str(text) => CoercedValue::Str(text.to_string()),
        DefaultValue::Number(number) => CoercedValue::Number(number),
        DefaultValue::Bool(flag) => CoercedValue::Bool(flag),
    }
}

/// Builds a schema-stage error with the registered suggestion.
fn schema_error(key: &str, detail: impl Into<String>) -> ValidationError {
    ValidationError::new(
        Category::Format,
        key,
        format!("{key} {}", detail.into()),
        Severity::Error,
        suggestion_for(key),
    )
}

// ============================================================================
// SECTION: Stage 2 - Security Re-Check
// ============================================================================

/// Re-validates security-sensitive fields against strict named patterns.
///
/// Runs on raw input values, independent of schema results; a field can fail
/// both the schema pattern and this check with separate findings.
fn security_recheck(env: &BTreeMap<String, String>, findings: &mut Findings) {
    for &(key, pattern, detail) in SECURITY_CHECKS {
        if let Some(raw) = env.get(key)
            && !pattern_matches(pattern, raw)
        {
            findings.push_error(ValidationError::new(
                Category::Security,
                key,
                format!("{key} {detail}"),
                Severity::Error,
                suggestion_for(key),
            ));
        }
    }
}

// ============================================================================
// SECTION: Stage 3 - Placeholder Scan
// ============================================================================

/// Scans every string-valued field for placeholder smells.
///
/// Placeholder detection never blocks validity; matches only warn.
fn placeholder_scan(coerced: &BTreeMap<&'static str, CoercedValue>, findings: &mut Findings) {
    for spec in SCHEMA {
        let Some(text) = coerced.get(spec.key).and_then(CoercedValue::as_str) else {
            continue;
        };
        if let Some(pattern) = placeholder_smell(text) {
            findings.push_warning(
                ValidationWarning::new(
                    Category::Security,
                    spec.key,
                    format!("{} looks like a placeholder value (matched {pattern})", spec.key),
                )
                .with_suggestion("Replace the placeholder with the real deployment value"),
            );
        }
    }
}

// ============================================================================
// SECTION: Stage 4 - Cross-Flag Checks
// ============================================================================

/// Checks feature flags against the settings they depend on.
///
/// All three checks run every time, independent of earlier outcomes.
fn cross_flag_checks(coerced: &BTreeMap<&'static str, CoercedValue>, findings: &mut Findings) {
    let flag = |key: &str| coerced.get(key).and_then(CoercedValue::as_bool).unwrap_or(false);
    let present = |key: &str| coerced.get(key).and_then(CoercedValue::as_str).is_some();

    if flag("ENABLE_AI_FEATURES") && !present("OPENAI_API_KEY") {
        findings.push_warning(
            ValidationWarning::new(
                Category::Dependency,
                "ENABLE_AI_FEATURES",
                "AI features are enabled but OPENAI_API_KEY is not set",
            )
            .with_suggestion("Set OPENAI_API_KEY or disable ENABLE_AI_FEATURES"),
        );
    }
    if flag("ENABLE_ML_AGENT") && !flag("ENABLE_AI_FEATURES") {
        findings.push_warning(
            ValidationWarning::new(
                Category::Dependency,
                "ENABLE_ML_AGENT",
                "the ML agent is enabled while AI features are disabled",
            )
            .with_suggestion("Enable ENABLE_AI_FEATURES or disable ENABLE_ML_AGENT"),
        );
    }
    if flag("ENABLE_ANALYSIS") && !present("SUPABASE_URL") {
        findings.push_warning(
            ValidationWarning::new(
                Category::Dependency,
                "ENABLE_ANALYSIS",
                "analysis mode is enabled but SUPABASE_URL is not set",
            )
            .with_suggestion("Set SUPABASE_URL or disable ENABLE_ANALYSIS"),
        );
    }
}

// ============================================================================
// SECTION: Typed Assembly
// ============================================================================

/// Assembles the typed config from schema-validated coerced values.
fn assemble(coerced: &BTreeMap<&'static str, CoercedValue>) -> EnvConfig {
    let text = |key: &str| coerced.get(key).and_then(CoercedValue::as_str).map(str::to_string);
    let flag = |key: &str| coerced.get(key).and_then(CoercedValue::as_bool).unwrap_or(false);
    let number = |key: &str| {
        coerced.get(key).and_then(CoercedValue::as_number).and_then(to_integer).unwrap_or(0)
    };

    EnvConfig {
        service_name: text("SERVICE_NAME").unwrap_or_default(),
        app_env: text("APP_ENV")
            .and_then(|value| AppEnv::parse(&value))
            .unwrap_or(AppEnv::Development),
        log_level: text("LOG_LEVEL")
            .and_then(|value| LogLevel::parse(&value))
            .unwrap_or(LogLevel::Info),
        port: number("PORT"),
        host: text("HOST").unwrap_or_default(),
        supabase_url: text("SUPABASE_URL"),
        supabase_anon_key: text("SUPABASE_ANON_KEY"),
        supabase_service_role_key: text("SUPABASE_SERVICE_ROLE_KEY"),
        openai_api_key: text("OPENAI_API_KEY"),
        google_client_id: text("GOOGLE_CLIENT_ID"),
        encryption_key: text("ENCRYPTION_KEY"),
        enable_ai_features: flag("ENABLE_AI_FEATURES"),
        enable_ml_agent: flag("ENABLE_ML_AGENT"),
        enable_analysis: flag("ENABLE_ANALYSIS"),
        enable_comments: flag("ENABLE_COMMENTS"),
        enable_google_auth: flag("ENABLE_GOOGLE_AUTH"),
        enable_monitoring: flag("ENABLE_MONITORING"),
        rate_limit_max_requests: number("RATE_LIMIT_MAX_REQUESTS"),
        rate_limit_window_ms: number("RATE_LIMIT_WINDOW_MS"),
        request_timeout_ms: number("REQUEST_TIMEOUT_MS"),
        cache_ttl_seconds: number("CACHE_TTL_SECONDS"),
        cache_max_size: number("CACHE_MAX_SIZE"),
        session_ttl_seconds: number("SESSION_TTL_SECONDS"),
        jwt_expiry_seconds: number("JWT_EXPIRY_SECONDS"),
        cleanup_interval_ms: number("CLEANUP_INTERVAL_MS"),
        db_pool_size: number("DB_POOL_SIZE"),
    }
}
