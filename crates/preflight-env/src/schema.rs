// crates/preflight-env/src/schema.rs
// ============================================================================
// Module: Preflight Env Schema Table
// Description: Declarative field specifications for the environment tier.
// Purpose: Keep schema rules as data so one generic routine enforces them all.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Every recognized environment key is described by one [`FieldSpec`] row:
//! declared type, requiredness, default, numeric bounds, minimum length,
//! shape pattern, and enumeration membership. The validator walks this table
//! with a single coerce-and-check routine, so adding a field is a one-row
//! change. Unrecognized keys are ignored.

// ============================================================================
// SECTION: Field Kinds and Defaults
// ============================================================================

/// Declared type of an environment field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free-form string value.
    Str,
    /// Numeric value (integral for every field in this schema).
    Number,
    /// Boolean toggle.
    Bool,
}

/// Default applied when a field is absent from the input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    /// String default.
    Str(&'static str),
    /// Numeric default.
    Number(f64),
    /// Boolean default.
    Bool(bool),
}

// ============================================================================
// SECTION: Field Specification
// ============================================================================

/// One row of the environment schema table.
///
/// # Invariants
/// - Constraint fields apply only where they make sense for `kind`; the
///   generic check routine skips the rest.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Environment key.
    pub key: &'static str,
    /// Declared type.
    pub kind: FieldKind,
    /// Whether absence (with no default) is a schema error.
    pub required: bool,
    /// Default filled in when the key is absent.
    pub default: Option<DefaultValue>,
    /// Inclusive numeric lower bound.
    pub min: Option<f64>,
    /// Inclusive numeric upper bound.
    pub max: Option<f64>,
    /// Minimum string length.
    pub min_len: Option<usize>,
    /// Shape pattern the full value must match.
    pub pattern: Option<&'static str>,
    /// Enumeration of permitted values.
    pub values: Option<&'static [&'static str]>,
}

impl FieldSpec {
    /// Creates an unconstrained optional field of the given kind.
    const fn new(key: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            kind,
            required: false,
            default: None,
            min: None,
            max: None,
            min_len: None,
            pattern: None,
            values: None,
        }
    }

    /// Marks the field as required.
    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the default value.
    const fn default_value(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Sets inclusive numeric bounds.
    const fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Sets the minimum string length.
    const fn min_length(mut self, min_len: usize) -> Self {
        self.min_len = Some(min_len);
        self
    }

    /// Sets the shape pattern.
    const fn shaped(mut self, pattern: &'static str) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Sets the permitted enumeration values.
    const fn one_of(mut self, values: &'static [&'static str]) -> Self {
        self.values = Some(values);
        self
    }
}

// ============================================================================
// SECTION: Shape Patterns
// ============================================================================

/// Schema-level pattern for the backend project URL.
pub const PROJECT_URL_PATTERN: &str = r"^https://[a-z0-9]+\.supabase\.co$";

/// Schema-level pattern for JWT-shaped keys (three base64url segments).
pub const JWT_PATTERN: &str = r"^eyJ[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+$";

/// Schema-level pattern for the AI provider API key.
pub const AI_KEY_PATTERN: &str = r"^sk-[A-Za-z0-9_-]+$";

/// Permitted deployment environments.
pub const APP_ENVS: &[&str] = &["development", "staging", "production"];

/// Permitted log levels.
pub const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug"];

// ============================================================================
// SECTION: Schema Table
// ============================================================================

/// The full environment schema, one row per recognized key.
pub const SCHEMA: &[FieldSpec] = &[
    FieldSpec::new("SERVICE_NAME", FieldKind::Str).required().min_length(1),
    FieldSpec::new("APP_ENV", FieldKind::Str)
        .one_of(APP_ENVS)
        .default_value(DefaultValue::Str("development")),
    FieldSpec::new("LOG_LEVEL", FieldKind::Str)
        .one_of(LOG_LEVELS)
        .default_value(DefaultValue::Str("info")),
    FieldSpec::new("PORT", FieldKind::Number)
        .range(1.0, 65535.0)
        .default_value(DefaultValue::Number(3000.0)),
    FieldSpec::new("HOST", FieldKind::Str)
        .min_length(1)
        .default_value(DefaultValue::Str("0.0.0.0")),
    FieldSpec::new("SUPABASE_URL", FieldKind::Str).shaped(PROJECT_URL_PATTERN),
    FieldSpec::new("SUPABASE_ANON_KEY", FieldKind::Str).min_length(100).shaped(JWT_PATTERN),
    FieldSpec::new("SUPABASE_SERVICE_ROLE_KEY", FieldKind::Str)
        .min_length(100)
        .shaped(JWT_PATTERN),
    FieldSpec::new("OPENAI_API_KEY", FieldKind::Str).min_length(20).shaped(AI_KEY_PATTERN),
    FieldSpec::new("GOOGLE_CLIENT_ID", FieldKind::Str).min_length(20),
    FieldSpec::new("ENCRYPTION_KEY", FieldKind::Str).min_length(32),
    FieldSpec::new("ENABLE_AI_FEATURES", FieldKind::Bool).default_value(DefaultValue::Bool(false)),
    FieldSpec::new("ENABLE_ML_AGENT", FieldKind::Bool).default_value(DefaultValue::Bool(false)),
    FieldSpec::new("ENABLE_ANALYSIS", FieldKind::Bool).default_value(DefaultValue::Bool(false)),
    FieldSpec::new("ENABLE_COMMENTS", FieldKind::Bool).default_value(DefaultValue::Bool(false)),
    FieldSpec::new("ENABLE_GOOGLE_AUTH", FieldKind::Bool).default_value(DefaultValue::Bool(false)),
    FieldSpec::new("ENABLE_MONITORING", FieldKind::Bool).default_value(DefaultValue::Bool(false)),
    FieldSpec::new("RATE_LIMIT_MAX_REQUESTS", FieldKind::Number)
        .range(1.0, 100_000.0)
        .default_value(DefaultValue::Number(100.0)),
    FieldSpec::new("RATE_LIMIT_WINDOW_MS", FieldKind::Number)
        .range(1000.0, 3_600_000.0)
        .default_value(DefaultValue::Number(60_000.0)),
    FieldSpec::new("REQUEST_TIMEOUT_MS", FieldKind::Number)
        .range(100.0, 120_000.0)
        .default_value(DefaultValue::Number(30_000.0)),
    FieldSpec::new("CACHE_TTL_SECONDS", FieldKind::Number)
        .range(1.0, 86_400.0)
        .default_value(DefaultValue::Number(3600.0)),
    FieldSpec::new("CACHE_MAX_SIZE", FieldKind::Number)
        .range(1.0, 1_000_000.0)
        .default_value(DefaultValue::Number(1000.0)),
    FieldSpec::new("SESSION_TTL_SECONDS", FieldKind::Number)
        .range(60.0, 604_800.0)
        .default_value(DefaultValue::Number(86_400.0)),
    FieldSpec::new("JWT_EXPIRY_SECONDS", FieldKind::Number)
        .range(60.0, 604_800.0)
        .default_value(DefaultValue::Number(3600.0)),
    FieldSpec::new("CLEANUP_INTERVAL_MS", FieldKind::Number)
        .range(1000.0, 86_400_000.0)
        .default_value(DefaultValue::Number(300_000.0)),
    FieldSpec::new("DB_POOL_SIZE", FieldKind::Number)
        .range(1.0, 100.0)
        .default_value(DefaultValue::Number(10.0)),
];

// ============================================================================
// SECTION: Remediation Suggestions
// ============================================================================

/// Field-specific remediation suggestions surfaced with schema errors.
const SUGGESTIONS: &[(&str, &str)] = &[
    ("SERVICE_NAME", "Set SERVICE_NAME to the deployed service identifier"),
    ("APP_ENV", "Use one of: development, staging, production"),
    ("LOG_LEVEL", "Use one of: error, warn, info, debug"),
    ("PORT", "Use a TCP port between 1 and 65535"),
    ("SUPABASE_URL", "Use the project URL from the dashboard, e.g. https://<ref>.supabase.co"),
    ("SUPABASE_ANON_KEY", "Copy the anon key from the project API settings"),
    ("SUPABASE_SERVICE_ROLE_KEY", "Copy the service role key from the project API settings"),
    ("OPENAI_API_KEY", "Use an API key starting with sk- from the provider console"),
    ("GOOGLE_CLIENT_ID", "Use the OAuth client id from the cloud console"),
    ("ENCRYPTION_KEY", "Generate a random key of at least 32 characters"),
    ("RATE_LIMIT_MAX_REQUESTS", "Use a positive request budget per window"),
    ("RATE_LIMIT_WINDOW_MS", "Use a window of at least 1000 milliseconds"),
];

/// Generic fallback suggestion for fields without a registered entry.
const FALLBACK_SUGGESTION: &str = "Check the configuration documentation for the expected format";

/// Returns the remediation suggestion for a schema error on `key`.
#[must_use]
pub fn suggestion_for(key: &str) -> &'static str {
    SUGGESTIONS
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map_or(FALLBACK_SUGGESTION, |(_, suggestion)| suggestion)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_keys_are_unique() {
        for (index, spec) in SCHEMA.iter().enumerate() {
            let duplicate = SCHEMA.iter().skip(index + 1).any(|other| other.key == spec.key);
            assert!(!duplicate, "duplicate schema key {}", spec.key);
        }
    }

    #[test]
    fn required_fields_have_no_default() {
        for spec in SCHEMA {
            if spec.required {
                assert!(spec.default.is_none(), "{} is required with a default", spec.key);
            }
        }
    }

    #[test]
    fn suggestion_falls_back_to_generic_text() {
        assert_eq!(suggestion_for("HOST"), FALLBACK_SUGGESTION);
        assert_ne!(suggestion_for("SUPABASE_URL"), FALLBACK_SUGGESTION);
    }
}
