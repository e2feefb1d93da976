// crates/preflight-config/tests/config_validation.rs
// ============================================================================
// Module: Config Validation Tests
// Description: Tests for the six validation passes over the config model.
// Purpose: Ensure each pass fires on its conditions and skips absent input.
// Dependencies: preflight-config
// ============================================================================

//! Behavior tests for the configuration validator's six passes.

use preflight_config::AppConfig;
use preflight_config::AppSection;
use preflight_config::AuthenticationSettings;
use preflight_config::ConfigValidator;
use preflight_config::FeaturesSection;
use preflight_config::PerformanceSection;
use preflight_config::RateLimitSettings;
use preflight_config::SecuritySection;
use preflight_config::ToggleFeature;
use preflight_core::Severity;
use serde_json::json;

mod common;

type TestResult = Result<(), String>;

#[test]
fn happy_path_scores_full_marks() -> TestResult {
    let env = common::full_env();
    let secrets = common::secrets_ok();
    let result =
        ConfigValidator::new().validate(&common::scenario_config(), Some(&env), &secrets);
    if !result.is_valid {
        return Err(format!("expected valid config, got {:?}", result.errors));
    }
    // Base 100 with no findings plus the cache bonus, clamped back to 100.
    if result.score.get() != 100 {
        return Err(format!("expected score 100, got {}", result.score));
    }
    if result.readiness.overall != preflight_core::ReadinessLevel::Ready {
        return Err(format!("expected ready, got {}", result.readiness.overall));
    }
    Ok(())
}

#[test]
fn auth_without_project_url_is_critical() -> TestResult {
    let mut env = common::full_env();
    env.supabase_url = None;
    let secrets = common::secrets_ok();
    let config = AppConfig {
        features: Some(FeaturesSection {
            auth: Some(preflight_config::AuthFeature {
                enabled: true,
                google: false,
            }),
            ..FeaturesSection::default()
        }),
        ..AppConfig::default()
    };
    let result = ConfigValidator::new().validate(&config, Some(&env), &secrets);
    let hit = result.errors.iter().any(|error| {
        error.field == "auth.enabled" && error.severity == Severity::Critical
    });
    if !hit {
        return Err(format!("expected critical auth error: {:?}", result.errors));
    }
    if result.readiness.overall == preflight_core::ReadinessLevel::Ready {
        return Err("missing project URL can never be ready".to_string());
    }
    Ok(())
}

#[test]
fn absent_sections_skip_their_checks() -> TestResult {
    let env = common::full_env();
    let secrets = common::secrets_ok();
    let result = ConfigValidator::new().validate(&AppConfig::default(), Some(&env), &secrets);
    if !result.is_valid {
        return Err(format!("absent sections must not fail: {:?}", result.errors));
    }
    Ok(())
}

#[test]
fn core_identity_violations_each_error() -> TestResult {
    let env = common::full_env();
    let secrets = common::secrets_ok();
    let config = AppConfig {
        app: Some(AppSection {
            name: "   ".to_string(),
            version: "2.1".to_string(),
            environment: "qa".to_string(),
        }),
        ..AppConfig::default()
    };
    let result = ConfigValidator::new().validate(&config, Some(&env), &secrets);
    for field in ["app.name", "app.version", "app.environment"] {
        if !result.errors.iter().any(|error| error.field == field) {
            return Err(format!("expected error on {field}: {:?}", result.errors));
        }
    }
    Ok(())
}

#[test]
fn ml_agent_without_ai_warns() -> TestResult {
    let env = common::full_env();
    let secrets = common::secrets_ok();
    let config = AppConfig {
        features: Some(FeaturesSection {
            ai: Some(preflight_config::AiFeature {
                enabled: false,
                ml_agent: true,
            }),
            ..FeaturesSection::default()
        }),
        ..AppConfig::default()
    };
    let result = ConfigValidator::new().validate(&config, Some(&env), &secrets);
    if !result.warnings.iter().any(|warning| warning.field == "ai.ml_agent") {
        return Err(format!("expected ML agent warning: {:?}", result.warnings));
    }
    if !result.is_valid {
        return Err("the ML agent gap must only warn".to_string());
    }
    Ok(())
}

#[test]
fn zero_rate_limit_budget_is_an_error() -> TestResult {
    let env = common::full_env();
    let secrets = common::secrets_ok();
    let config = AppConfig {
        performance: Some(PerformanceSection {
            rate_limit: Some(RateLimitSettings {
                enabled: true,
                max_requests: Some(0),
                window_ms: Some(500),
            }),
            ..PerformanceSection::default()
        }),
        ..AppConfig::default()
    };
    let result = ConfigValidator::new().validate(&config, Some(&env), &secrets);
    for field in ["rateLimit.requests", "rateLimit.window"] {
        if !result.errors.iter().any(|error| error.field == field) {
            return Err(format!("expected error on {field}: {:?}", result.errors));
        }
    }
    Ok(())
}

#[test]
fn disabled_rate_limit_skips_its_checks() -> TestResult {
    let env = common::full_env();
    let secrets = common::secrets_ok();
    let config = AppConfig {
        performance: Some(PerformanceSection {
            rate_limit: Some(RateLimitSettings {
                enabled: false,
                max_requests: Some(0),
                window_ms: Some(1),
            }),
            ..PerformanceSection::default()
        }),
        ..AppConfig::default()
    };
    let result = ConfigValidator::new().validate(&config, Some(&env), &secrets);
    if !result.is_valid {
        return Err(format!("disabled sections must not fail: {:?}", result.errors));
    }
    Ok(())
}

#[test]
fn jwt_expiry_extremes_warn_in_both_directions() -> TestResult {
    let env = common::full_env();
    let secrets = common::secrets_ok();
    for expiry in [120_u64, 172_800] {
        let config = AppConfig {
            security: Some(SecuritySection {
                authentication: Some(AuthenticationSettings {
                    jwt_expiry_seconds: Some(expiry),
                }),
                ..SecuritySection::default()
            }),
            ..AppConfig::default()
        };
        let result = ConfigValidator::new().validate(&config, Some(&env), &secrets);
        let hit =
            result.warnings.iter().any(|warning| warning.field == "authentication.jwt_expiry");
        if !hit {
            return Err(format!("expected expiry warning for {expiry}: {:?}", result.warnings));
        }
    }
    Ok(())
}

#[test]
fn invalid_secrets_tier_is_a_critical_integration_error() -> TestResult {
    let env = common::full_env();
    let secrets = common::secrets_bad();
    let result = ConfigValidator::new().validate(&AppConfig::default(), Some(&env), &secrets);
    let hit = result.errors.iter().any(|error| {
        error.field == "integration.secrets" && error.severity == Severity::Critical
    });
    if !hit {
        return Err(format!("expected secrets integration error: {:?}", result.errors));
    }
    Ok(())
}

#[test]
fn missing_backend_credentials_are_critical() -> TestResult {
    let secrets = common::secrets_ok();
    let result = ConfigValidator::new().validate(&AppConfig::default(), None, &secrets);
    let hit = result.errors.iter().any(|error| {
        error.field == "integration.backend" && error.severity == Severity::Critical
    });
    if !hit {
        return Err(format!("expected backend integration error: {:?}", result.errors));
    }
    Ok(())
}

#[test]
fn recommendations_cover_every_missing_practice() -> TestResult {
    let env = common::full_env();
    let secrets = common::secrets_ok();
    let config = AppConfig {
        features: Some(FeaturesSection {
            auth: Some(preflight_config::AuthFeature {
                enabled: true,
                google: false,
            }),
            ..FeaturesSection::default()
        }),
        ..AppConfig::default()
    };
    let result = ConfigValidator::new().validate(&config, Some(&env), &secrets);
    let expected = [
        "performance.cache.enabled",
        "performance.optimization.compression",
        "security.encryption.enabled",
        "security.data_protection.audit_logging",
        "features.auth.google",
        "features.monitoring.enabled",
    ];
    for field in expected {
        if !result.recommendations.iter().any(|entry| entry.field == field) {
            return Err(format!("expected recommendation on {field}"));
        }
    }
    Ok(())
}

#[test]
fn bonus_stack_clamps_at_one_hundred() -> TestResult {
    let env = common::full_env();
    let secrets = common::secrets_ok();
    let config = AppConfig {
        performance: Some(PerformanceSection {
            cache: Some(preflight_config::CacheSettings {
                enabled: true,
                ttl_seconds: Some(3600),
                max_size: Some(1000),
            }),
            ..PerformanceSection::default()
        }),
        security: Some(SecuritySection {
            encryption: Some(ToggleFeature {
                enabled: true,
            }),
            ..SecuritySection::default()
        }),
        features: Some(FeaturesSection {
            monitoring: Some(ToggleFeature {
                enabled: true,
            }),
            ..FeaturesSection::default()
        }),
        ..AppConfig::default()
    };
    let result = ConfigValidator::new().validate(&config, Some(&env), &secrets);
    // Raw 115 before the clamp: zero findings plus three bonuses.
    if result.score.get() != 100 {
        return Err(format!("expected clamped 100, got {}", result.score));
    }
    Ok(())
}

#[test]
fn malformed_json_shape_yields_single_critical_error() -> TestResult {
    let env = common::full_env();
    let secrets = common::secrets_ok();
    let shape = json!({"features": {"ai": {"enabled": "not-a-bool"}}});
    let result = ConfigValidator::new().validate_json(&shape, Some(&env), &secrets);
    if result.errors.len() != 1 || result.errors[0].field != "unknown" {
        return Err(format!("expected the single shape error: {:?}", result.errors));
    }
    if !result.errors[0].severity.is_critical() {
        return Err("shape errors must be critical".to_string());
    }
    Ok(())
}

#[test]
fn repeated_runs_are_identical() -> TestResult {
    let env = common::full_env();
    let secrets = common::secrets_ok();
    let validator = ConfigValidator::new();
    let first = validator.validate(&common::scenario_config(), Some(&env), &secrets);
    let second = validator.validate(&common::scenario_config(), Some(&env), &secrets);
    if first != second {
        return Err("identical inputs must produce identical results".to_string());
    }
    Ok(())
}
