// crates/preflight-report/src/render.rs
// ============================================================================
// Module: Preflight Report Rendering
// Description: Plain-text rendering of tier results and the aggregate report.
// Purpose: Give humans and CI logs one readable view of a validation run.
// Dependencies: preflight-config, preflight-core, preflight-env,
// preflight-secrets, serde
// ============================================================================

//! ## Overview
//! Reports use plain textual markers (`[ERROR]`, `[WARN]`, `[HINT]`) so they
//! read the same in terminals, CI logs, and ticket pastes. The aggregate
//! report concatenates the three tier sections, lists recommendations
//! grouped by priority (critical first), and closes with a pass/fail banner
//! and the canonical fingerprint of the structured outcome. Nothing in a
//! report depends on wall-clock time; identical inputs render identically.

// ============================================================================
// SECTION: Imports
// ============================================================================

use preflight_config::ConfigValidationResult;
use preflight_core::Priority;
use preflight_core::ReadinessLevel;
use preflight_core::Recommendation;
use preflight_core::Score;
use preflight_core::ValidationError;
use preflight_core::ValidationWarning;
use preflight_core::fingerprint;
use preflight_env::EnvValidationResult;
use preflight_secrets::SecretsValidationResult;
use serde::Serialize;

// ============================================================================
// SECTION: Section Renderers
// ============================================================================

/// Renders the environment tier section.
#[must_use]
pub fn render_env_report(result: &EnvValidationResult) -> String {
    let mut out = String::new();
    out.push_str("== Environment ==\n");
    out.push_str(&format!("status: {}\n", if result.is_valid { "valid" } else { "invalid" }));
    push_errors(&mut out, &result.errors);
    push_warnings(&mut out, &result.warnings);
    out
}

/// Renders the secrets tier section.
#[must_use]
pub fn render_secrets_report(result: &SecretsValidationResult) -> String {
    let mut out = String::new();
    out.push_str("== Secrets ==\n");
    out.push_str(&format!(
        "status: {} (score {})\n",
        if result.is_valid { "valid" } else { "invalid" },
        result.score
    ));
    push_errors(&mut out, &result.errors);
    push_warnings(&mut out, &result.warnings);
    out
}

/// Renders the configuration tier section.
#[must_use]
pub fn render_config_report(result: &ConfigValidationResult) -> String {
    let mut out = String::new();
    out.push_str("== Configuration ==\n");
    out.push_str(&format!(
        "status: {} (score {}, readiness {})\n",
        if result.is_valid { "valid" } else { "invalid" },
        result.score,
        result.readiness.overall
    ));
    push_errors(&mut out, &result.errors);
    push_warnings(&mut out, &result.warnings);
    for issue in &result.readiness.issues {
        out.push_str(&format!("[ISSUE] {issue}\n"));
    }
    out
}

/// Appends error lines with severity markers.
fn push_errors(out: &mut String, errors: &[ValidationError]) {
    for error in errors {
        let marker = if error.severity.is_critical() { "[CRITICAL]" } else { "[ERROR]" };
        out.push_str(&format!(
            "{marker} {}: {} ({})\n",
            error.field, error.message, error.suggestion
        ));
    }
}

/// Appends warning lines.
fn push_warnings(out: &mut String, warnings: &[ValidationWarning]) {
    for warning in warnings {
        out.push_str(&format!("[WARN] {}: {}", warning.field, warning.message));
        if let Some(suggestion) = &warning.suggestion {
            out.push_str(&format!(" ({suggestion})"));
        }
        out.push('\n');
    }
}

// ============================================================================
// SECTION: Recommendation Listing
// ============================================================================

/// Display order for grouped recommendations.
const PRIORITY_ORDER: &[Priority] =
    &[Priority::Critical, Priority::High, Priority::Medium, Priority::Low];

/// Renders recommendations grouped by priority, most urgent first.
fn push_recommendations(out: &mut String, recommendations: &[&Recommendation]) {
    if recommendations.is_empty() {
        return;
    }
    out.push_str("== Recommendations ==\n");
    for priority in PRIORITY_ORDER {
        for entry in recommendations {
            if entry.priority == *priority {
                out.push_str(&format!(
                    "[HINT/{}] {}: {} ({})\n",
                    priority.as_str(),
                    entry.field,
                    entry.message,
                    entry.benefit
                ));
            }
        }
    }
}

// ============================================================================
// SECTION: Aggregate Report
// ============================================================================

/// Serializable view of the structured outcome used for fingerprinting.
#[derive(Serialize)]
struct OutcomeView<'a> {
    /// Environment tier result.
    env: &'a EnvValidationResult,
    /// Secrets tier result.
    secrets: &'a SecretsValidationResult,
    /// Configuration tier result.
    config: &'a ConfigValidationResult,
    /// Composite score.
    score: Score,
    /// Final readiness verdict.
    readiness: ReadinessLevel,
}

/// Renders the aggregate multi-section report.
#[must_use]
pub fn render_overall_report(
    env: &EnvValidationResult,
    secrets: &SecretsValidationResult,
    config: &ConfigValidationResult,
    score: Score,
    readiness: ReadinessLevel,
    is_valid: bool,
) -> String {
    let mut out = String::new();
    out.push_str("==== Preflight Validation Report ====\n");
    out.push_str(&format!("overall score: {score}/100\n"));
    out.push_str(&format!("readiness: {readiness}\n\n"));
    out.push_str(&render_env_report(env));
    out.push('\n');
    out.push_str(&render_secrets_report(secrets));
    out.push('\n');
    out.push_str(&render_config_report(config));
    out.push('\n');

    let mut recommendations: Vec<&Recommendation> = Vec::new();
    recommendations.extend(secrets.recommendations.iter());
    recommendations.extend(config.recommendations.iter());
    push_recommendations(&mut out, &recommendations);

    out.push_str(&format!(
        "\n==== {} ====\n",
        if is_valid { "PASS: all tiers valid" } else { "FAIL: blocking findings present" }
    ));
    let digest = fingerprint(&OutcomeView {
        env,
        secrets,
        config,
        score,
        readiness,
    });
    match digest {
        Ok(digest) => out.push_str(&format!("fingerprint: {}\n", digest.as_str())),
        Err(_) => out.push_str("fingerprint: unavailable\n"),
    }
    out
}
