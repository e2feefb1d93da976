// crates/preflight-config/tests/common/mod.rs
// ============================================================================
// Module: Config Test Fixtures
// Description: Shared fixtures for configuration validator tests.
// Purpose: Provide a fully provisioned environment and secrets results.
// Dependencies: preflight-env, preflight-secrets
// ============================================================================

//! Shared fixtures for configuration validator tests.

#![allow(dead_code, reason = "Fixtures are shared across test binaries with different usage.")]

use std::collections::BTreeMap;

use preflight_config::AiFeature;
use preflight_config::AppConfig;
use preflight_config::AuthFeature;
use preflight_config::CacheSettings;
use preflight_config::FeaturesSection;
use preflight_config::PerformanceSection;
use preflight_env::AppEnv;
use preflight_env::EnvConfig;
use preflight_env::LogLevel;
use preflight_secrets::SecretsValidationResult;
use preflight_secrets::SecretsValidator;

/// Builds a fully provisioned typed environment.
#[must_use]
pub fn full_env() -> EnvConfig {
    EnvConfig {
        service_name: "edge-api".to_string(),
        app_env: AppEnv::Production,
        log_level: LogLevel::Info,
        port: 8080,
        host: "0.0.0.0".to_string(),
        supabase_url: Some("https://abcdefghij0123456789.supabase.co".to_string()),
        supabase_anon_key: Some(jwt_like("a")),
        supabase_service_role_key: Some(jwt_like("b")),
        openai_api_key: Some(format!("sk-{}", "A1".repeat(14))),
        google_client_id: Some("1234567890-client.apps".to_string()),
        encryption_key: Some("k".repeat(48)),
        enable_ai_features: true,
        enable_ml_agent: false,
        enable_analysis: false,
        enable_comments: false,
        enable_google_auth: false,
        enable_monitoring: false,
        rate_limit_max_requests: 100,
        rate_limit_window_ms: 60_000,
        request_timeout_ms: 30_000,
        cache_ttl_seconds: 3600,
        cache_max_size: 1000,
        session_ttl_seconds: 86_400,
        jwt_expiry_seconds: 3600,
        cleanup_interval_ms: 300_000,
        db_pool_size: 10,
    }
}

/// Builds a JWT-shaped value over 100 characters.
#[must_use]
pub fn jwt_like(letter: &str) -> String {
    format!("eyJ{}.{}.{}", letter.repeat(40), letter.repeat(40), letter.repeat(40))
}

/// Builds a passing secrets result by validating an empty map.
#[must_use]
pub fn secrets_ok() -> SecretsValidationResult {
    SecretsValidator::new().validate(&BTreeMap::new())
}

/// Builds a failing secrets result by validating an empty-valued secret.
#[must_use]
pub fn secrets_bad() -> SecretsValidationResult {
    let mut secrets = BTreeMap::new();
    secrets.insert("DEPLOY_TOKEN".to_string(), String::new());
    SecretsValidator::new().validate(&secrets)
}

/// Builds the config used by the happy-path deployment scenario.
#[must_use]
pub fn scenario_config() -> AppConfig {
    AppConfig {
        features: Some(FeaturesSection {
            ai: Some(AiFeature {
                enabled: true,
                ml_agent: false,
            }),
            auth: Some(AuthFeature {
                enabled: true,
                google: false,
            }),
            ..FeaturesSection::default()
        }),
        performance: Some(PerformanceSection {
            cache: Some(CacheSettings {
                enabled: true,
                ttl_seconds: Some(3600),
                max_size: Some(1000),
            }),
            ..PerformanceSection::default()
        }),
        ..AppConfig::default()
    }
}
