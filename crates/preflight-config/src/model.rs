// crates/preflight-config/src/model.rs
// ============================================================================
// Module: Preflight Config Model
// Description: Partial application configuration accepted for validation.
// Purpose: Model optional sections whose absence skips checks, not fails them.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The application config is a nested object of optional sections: core app
//! identity, feature toggles, performance tuning, and security settings.
//! Every section and leaf is optional; an absent piece skips its checks
//! rather than defaulting to a failure. Defaults therefore express "not
//! configured", never "misconfigured".

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Top-Level Config
// ============================================================================

/// Partial application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Core application identity.
    pub app: Option<AppSection>,
    /// Feature toggles.
    pub features: Option<FeaturesSection>,
    /// Performance tuning.
    pub performance: Option<PerformanceSection>,
    /// Security settings.
    pub security: Option<SecuritySection>,
}

/// Core application identity fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSection {
    /// Application name.
    pub name: String,
    /// Semantic version string.
    pub version: String,
    /// Deployment environment name.
    pub environment: String,
}

// ============================================================================
// SECTION: Features
// ============================================================================

/// Feature toggle sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesSection {
    /// AI feature settings.
    pub ai: Option<AiFeature>,
    /// Authentication feature settings.
    pub auth: Option<AuthFeature>,
    /// Analysis feature settings.
    pub analysis: Option<ToggleFeature>,
    /// Social feature settings.
    pub social: Option<SocialFeature>,
    /// Monitoring feature settings.
    pub monitoring: Option<ToggleFeature>,
}

/// AI feature settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiFeature {
    /// Whether AI features are enabled.
    pub enabled: bool,
    /// Whether the ML agent runs on top of AI features.
    pub ml_agent: bool,
}

/// Authentication feature settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthFeature {
    /// Whether authentication is enabled.
    pub enabled: bool,
    /// Whether Google sign-in is enabled.
    pub google: bool,
}

/// Social feature settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialFeature {
    /// Whether comments are enabled.
    pub comments: bool,
}

/// Bare enablement toggle shared by single-switch features.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToggleFeature {
    /// Whether the feature is enabled.
    pub enabled: bool,
}

// ============================================================================
// SECTION: Performance
// ============================================================================

/// Performance tuning sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceSection {
    /// Cache settings.
    pub cache: Option<CacheSettings>,
    /// Rate limit settings.
    pub rate_limit: Option<RateLimitSettings>,
    /// Optimization settings.
    pub optimization: Option<OptimizationSettings>,
}

/// Cache settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Whether the cache is enabled.
    pub enabled: bool,
    /// Entry TTL in seconds.
    pub ttl_seconds: Option<u64>,
    /// Capacity in entries.
    pub max_size: Option<u64>,
}

/// Rate limit settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitSettings {
    /// Whether rate limiting is enabled.
    pub enabled: bool,
    /// Request budget per window.
    pub max_requests: Option<u64>,
    /// Window duration in milliseconds.
    pub window_ms: Option<u64>,
}

/// Optimization settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizationSettings {
    /// Whether response compression is enabled.
    pub compression: bool,
}

// ============================================================================
// SECTION: Security
// ============================================================================

/// Security settings sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecuritySection {
    /// Encryption-at-rest settings.
    pub encryption: Option<ToggleFeature>,
    /// Authentication hardening settings.
    pub authentication: Option<AuthenticationSettings>,
    /// Data protection settings.
    pub data_protection: Option<DataProtectionSettings>,
}

/// Authentication hardening settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthenticationSettings {
    /// JWT expiry in seconds.
    pub jwt_expiry_seconds: Option<u64>,
}

/// Data protection settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataProtectionSettings {
    /// Whether row-level security is enabled.
    pub row_level_security: bool,
    /// Whether audit logging is enabled.
    pub audit_logging: bool,
}

// ============================================================================
// SECTION: Convenience Accessors
// ============================================================================

impl AppConfig {
    /// Returns true when the cache is configured and enabled.
    #[must_use]
    pub fn cache_enabled(&self) -> bool {
        self.performance
            .as_ref()
            .and_then(|performance| performance.cache.as_ref())
            .is_some_and(|cache| cache.enabled)
    }

    /// Returns true when encryption is configured and enabled.
    #[must_use]
    pub fn encryption_enabled(&self) -> bool {
        self.security
            .as_ref()
            .and_then(|security| security.encryption.as_ref())
            .is_some_and(|encryption| encryption.enabled)
    }

    /// Returns true when monitoring is configured and enabled.
    #[must_use]
    pub fn monitoring_enabled(&self) -> bool {
        self.features
            .as_ref()
            .and_then(|features| features.monitoring.as_ref())
            .is_some_and(|monitoring| monitoring.enabled)
    }

    /// Returns true when AI features are configured and enabled.
    #[must_use]
    pub fn ai_enabled(&self) -> bool {
        self.features
            .as_ref()
            .and_then(|features| features.ai.as_ref())
            .is_some_and(|ai| ai.enabled)
    }

    /// Returns true when compression is configured and enabled.
    #[must_use]
    pub fn compression_enabled(&self) -> bool {
        self.performance
            .as_ref()
            .and_then(|performance| performance.optimization.as_ref())
            .is_some_and(|optimization| optimization.compression)
    }

    /// Returns true when audit logging is configured and enabled.
    #[must_use]
    pub fn audit_logging_enabled(&self) -> bool {
        self.security
            .as_ref()
            .and_then(|security| security.data_protection.as_ref())
            .is_some_and(|data_protection| data_protection.audit_logging)
    }
}
