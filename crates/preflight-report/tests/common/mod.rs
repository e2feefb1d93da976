// crates/preflight-report/tests/common/mod.rs
// ============================================================================
// Module: Report Test Fixtures
// Description: Shared fixtures for orchestration and rendering tests.
// Purpose: Provide a fully valid raw environment and scenario config.
// Dependencies: preflight-config
// ============================================================================

//! Shared fixtures for report-tier tests.

#![allow(dead_code, reason = "Fixtures are shared across test binaries with different usage.")]

use std::collections::BTreeMap;

use preflight_config::AiFeature;
use preflight_config::AppConfig;
use preflight_config::AuthFeature;
use preflight_config::CacheSettings;
use preflight_config::FeaturesSection;
use preflight_config::PerformanceSection;

/// Builds a fully valid raw environment map.
#[must_use]
pub fn full_env_map() -> BTreeMap<String, String> {
    let mut env = BTreeMap::new();
    env.insert("SERVICE_NAME".to_string(), "edge-api".to_string());
    env.insert("APP_ENV".to_string(), "production".to_string());
    env.insert(
        "SUPABASE_URL".to_string(),
        "https://abcdefghij0123456789.supabase.co".to_string(),
    );
    env.insert("SUPABASE_ANON_KEY".to_string(), jwt_like("a"));
    env.insert("SUPABASE_SERVICE_ROLE_KEY".to_string(), jwt_like("b"));
    env.insert("OPENAI_API_KEY".to_string(), format!("sk-{}", "A1".repeat(14)));
    env.insert("ENABLE_AI_FEATURES".to_string(), "true".to_string());
    env
}

/// Builds a JWT-shaped value over 100 characters.
#[must_use]
pub fn jwt_like(letter: &str) -> String {
    format!("eyJ{}.{}.{}", letter.repeat(40), letter.repeat(40), letter.repeat(40))
}

/// Builds the happy-path application config.
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
