// crates/preflight-core/src/findings.rs
// ============================================================================
// Module: Preflight Gate Findings
// Description: Categorized validation findings and their ordered containers.
// Purpose: Provide the atomic units of validation output shared by all tiers.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A finding is one reported issue produced by a validation rule: a blocking
//! error, a non-blocking warning, or a best-practice recommendation. Findings
//! are immutable once produced and are collected into append-only containers
//! whose insertion order is the rule evaluation order, so identical inputs
//! always yield identical output sequences.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Categories
// ============================================================================

/// Rule category a finding belongs to.
///
/// # Invariants
/// - Variants are stable for serialization and report grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Core application settings (name, version, environment).
    Core,
    /// Feature flags and their dependencies.
    Features,
    /// Performance tuning settings.
    Performance,
    /// Security-sensitive settings and secret material.
    Security,
    /// Cross-tier integration readiness.
    Integration,
    /// Type, range, or shape violations against the declared schema.
    Format,
    /// A setting requires another setting that is absent.
    Dependency,
}

impl Category {
    /// Returns the stable string form used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Features => "features",
            Self::Performance => "performance",
            Self::Security => "security",
            Self::Integration => "integration",
            Self::Format => "format",
            Self::Dependency => "dependency",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Severity and Priority
// ============================================================================

/// Two-level escalation for blocking errors.
///
/// # Invariants
/// - `Critical` always outranks `Error` in score deductions and gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Blocking but functionally recoverable.
    Error,
    /// Blocking and catastrophic for the affected tier.
    Critical,
}

impl Severity {
    /// Returns true for the critical escalation level.
    #[must_use]
    pub const fn is_critical(self) -> bool {
        matches!(self, Self::Critical)
    }
}

/// Priority attached to best-practice recommendations.
///
/// # Invariants
/// - `rank` ordering drives report display order (critical first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Nice to have.
    Low,
    /// Worth scheduling.
    Medium,
    /// Should be addressed before the next release.
    High,
    /// Should be addressed before deploying at all.
    Critical,
}

impl Priority {
    /// Returns a ranking for ordering priorities (higher is more urgent).
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::Critical => 3,
        }
    }

    /// Returns the stable string form used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

// ============================================================================
// SECTION: Finding Types
// ============================================================================

/// Blocking validation error.
///
/// # Invariants
/// - Immutable once produced; `field` is a dotted path into the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Rule category.
    pub category: Category,
    /// Dotted path identifying the offending setting.
    pub field: String,
    /// Human-readable description of the violation.
    pub message: String,
    /// Escalation level.
    pub severity: Severity,
    /// Actionable remediation text.
    pub suggestion: String,
}

impl ValidationError {
    /// Creates a new blocking error finding.
    #[must_use]
    pub fn new(
        category: Category,
        field: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            category,
            field: field.into(),
            message: message.into(),
            severity,
            suggestion: suggestion.into(),
        }
    }
}

/// Non-blocking validation warning.
///
/// # Invariants
/// - Never affects validity; advisory only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationWarning {
    /// Rule category.
    pub category: Category,
    /// Dotted path identifying the setting.
    pub field: String,
    /// Human-readable description of the concern.
    pub message: String,
    /// Optional remediation text.
    pub suggestion: Option<String>,
}

impl ValidationWarning {
    /// Creates a new warning finding without a suggestion.
    #[must_use]
    pub fn new(
        category: Category,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Attaches a remediation suggestion to the warning.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Best-practice recommendation.
///
/// # Invariants
/// - Never affects validity; advisory only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Rule category.
    pub category: Category,
    /// Dotted path identifying the setting.
    pub field: String,
    /// Human-readable description of the missed practice.
    pub message: String,
    /// Urgency for acting on the recommendation.
    pub priority: Priority,
    /// Expected gain from adopting the practice.
    pub benefit: String,
}

impl Recommendation {
    /// Creates a new recommendation finding.
    #[must_use]
    pub fn new(
        category: Category,
        field: impl Into<String>,
        message: impl Into<String>,
        priority: Priority,
        benefit: impl Into<String>,
    ) -> Self {
        Self {
            category,
            field: field.into(),
            message: message.into(),
            priority,
            benefit: benefit.into(),
        }
    }
}

// ============================================================================
// SECTION: Findings Container
// ============================================================================

/// Ordered, append-only container for the findings of one validation run.
///
/// # Invariants
/// - Insertion order is rule evaluation order within each sequence.
/// - Validity is defined by the error sequence alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Findings {
    /// Blocking errors in evaluation order.
    pub errors: Vec<ValidationError>,
    /// Warnings in evaluation order.
    pub warnings: Vec<ValidationWarning>,
    /// Recommendations in evaluation order.
    pub recommendations: Vec<Recommendation>,
}

impl Findings {
    /// Creates an empty findings container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a blocking error.
    pub fn push_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Appends a warning.
    pub fn push_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Appends a recommendation.
    pub fn push_recommendation(&mut self, recommendation: Recommendation) {
        self.recommendations.push(recommendation);
    }

    /// Returns true when the error sequence is empty.
    ///
    /// Warnings and recommendations never affect validity.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of critical errors.
    #[must_use]
    pub fn critical_count(&self) -> usize {
        self.errors.iter().filter(|error| error.severity.is_critical()).count()
    }

    /// Returns the number of non-critical errors.
    #[must_use]
    pub fn non_critical_count(&self) -> usize {
        self.errors.len() - self.critical_count()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_tracks_errors_only() {
        let mut findings = Findings::new();
        findings.push_warning(ValidationWarning::new(Category::Core, "a", "warn"));
        findings.push_recommendation(Recommendation::new(
            Category::Core,
            "b",
            "rec",
            Priority::Low,
            "benefit",
        ));
        assert!(findings.is_valid());

        findings.push_error(ValidationError::new(
            Category::Core,
            "c",
            "broken",
            Severity::Error,
            "fix it",
        ));
        assert!(!findings.is_valid());
    }

    #[test]
    fn severity_counters_split_critical() {
        let mut findings = Findings::new();
        findings.push_error(ValidationError::new(
            Category::Security,
            "a",
            "bad",
            Severity::Critical,
            "fix",
        ));
        findings.push_error(ValidationError::new(
            Category::Security,
            "b",
            "bad",
            Severity::Error,
            "fix",
        ));
        assert_eq!(findings.critical_count(), 1);
        assert_eq!(findings.non_critical_count(), 1);
    }

    #[test]
    fn priority_rank_orders_urgency() {
        assert!(Priority::Critical.rank() > Priority::High.rank());
        assert!(Priority::High.rank() > Priority::Medium.rank());
        assert!(Priority::Medium.rank() > Priority::Low.rank());
    }
}
