// crates/preflight-core/src/readiness.rs
// ============================================================================
// Module: Preflight Gate Deployment Readiness
// Description: Tri-state readiness verdicts and per-tier deployment gates.
// Purpose: Express coarse go/no-go signals distinct from numeric scores.
// Dependencies: crate::score, serde
// ============================================================================

//! ## Overview
//! Readiness is a coarse deployment signal computed independently of the main
//! configuration score. The tri-state verdict and the three per-tier boolean
//! gates are separately stated rules over the same readiness score; none is
//! derived from another.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::score::Score;

// ============================================================================
// SECTION: Readiness Level
// ============================================================================

/// Tri-state deployment readiness verdict.
///
/// # Invariants
/// - Variants are stable for serialization and CI gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessLevel {
    /// Deployable as-is.
    Ready,
    /// Deployable with known gaps that need follow-up.
    NeedsAttention,
    /// Not deployable until blocking issues are resolved.
    NotReady,
}

impl ReadinessLevel {
    /// Returns the stable string form used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::NeedsAttention => "needs_attention",
            Self::NotReady => "not_ready",
        }
    }
}

impl fmt::Display for ReadinessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Deployment Readiness
// ============================================================================

/// Deployment readiness verdict with per-tier gates.
///
/// # Invariants
/// - `score` is computed by its own deduction formula, not the main
///   configuration score.
/// - `production`, `staging`, and `development` are independent gates over
///   the readiness score; they are not derived from `overall`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentReadiness {
    /// Tri-state verdict.
    pub overall: ReadinessLevel,
    /// Production deployment gate.
    pub production: bool,
    /// Staging deployment gate.
    pub staging: bool,
    /// Development deployment gate.
    pub development: bool,
    /// Blocking or notable issues in evaluation order.
    pub issues: Vec<String>,
    /// Readiness score (independent of the main configuration score).
    pub score: Score,
}

// ============================================================================
// SECTION: Tests
// ============================================================================
