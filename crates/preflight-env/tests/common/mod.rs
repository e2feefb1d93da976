// crates/preflight-env/tests/common/mod.rs
// ============================================================================
// Module: Environment Test Fixtures
// Description: Shared fixtures and matchers for environment validator tests.
// Purpose: Keep a single source of truth for a fully valid environment map.
// Dependencies: preflight-core
// ============================================================================

//! Shared fixtures for environment validator tests.

#![allow(dead_code, reason = "Fixtures are shared across test binaries with different usage.")]

use std::collections::BTreeMap;

use preflight_core::ValidationError;

/// Builds a fully valid environment map covering every schema constraint.
#[must_use]
pub fn base_env() -> BTreeMap<String, String> {
    let mut env = BTreeMap::new();
    env.insert("SERVICE_NAME".to_string(), "edge-api".to_string());
    env.insert("APP_ENV".to_string(), "production".to_string());
    env.insert("LOG_LEVEL".to_string(), "warn".to_string());
    env.insert("PORT".to_string(), "8080".to_string());
    env.insert("SUPABASE_URL".to_string(), project_url());
    env.insert("SUPABASE_ANON_KEY".to_string(), jwt_like("a"));
    env.insert("SUPABASE_SERVICE_ROLE_KEY".to_string(), jwt_like("b"));
    env.insert("OPENAI_API_KEY".to_string(), ai_key());
    env.insert("ENCRYPTION_KEY".to_string(), "k".repeat(48));
    env.insert("ENABLE_AI_FEATURES".to_string(), "true".to_string());
    env
}

/// Returns a project URL with a 20-character lowercase ref.
#[must_use]
pub fn project_url() -> String {
    "https://abcdefghij0123456789.supabase.co".to_string()
}

/// Returns a JWT-shaped value over 100 characters using the given letter.
#[must_use]
pub fn jwt_like(letter: &str) -> String {
    format!("eyJ{}.{}.{}", letter.repeat(40), letter.repeat(40), letter.repeat(40))
}

/// Returns a well-formed AI provider key.
#[must_use]
pub fn ai_key() -> String {
    format!("sk-{}", "A1".repeat(14))
}

/// Asserts that exactly one of the errors targets the given field.
pub fn assert_error_on(errors: &[ValidationError], field: &str) -> Result<(), String> {
    let hits = errors.iter().filter(|error| error.field == field).count();
    if hits == 0 {
        return Err(format!("no error on {field}: {errors:?}"));
    }
    Ok(())
}
