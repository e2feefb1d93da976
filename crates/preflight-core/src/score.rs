// crates/preflight-core/src/score.rs
// ============================================================================
// Module: Preflight Gate Scores
// Description: Clamped 0-100 validation scores and deduction arithmetic.
// Purpose: Enforce the score range invariant at construction boundaries.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Every tier score is an integer in `[0, 100]`. Deduction formulas can
//! produce raw values outside that range (negative after heavy deductions,
//! above 100 after bonuses); the range invariant is enforced once, at
//! construction, so downstream arithmetic never needs to re-clamp.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Score
// ============================================================================

/// Validation score clamped to `[0, 100]`.
///
/// # Invariants
/// - Always within `[0, 100]`; enforced by every constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    /// Maximum score.
    pub const MAX: Self = Self(100);

    /// Minimum score.
    pub const MIN: Self = Self(0);

    /// Creates a score by clamping a raw deduction result into `[0, 100]`.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Value is clamped to [0, 100] before the narrowing cast."
    )]
    pub fn clamped(raw: i32) -> Self {
        Self(raw.clamp(0, 100) as u8)
    }

    /// Returns the score value (always within `[0, 100]`).
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Deduction Ledger
// ============================================================================

/// Running deduction ledger for a score computation.
///
/// # Invariants
/// - Starts at 100; `into_score` clamps the final raw value.
#[derive(Debug, Clone, Copy)]
pub struct ScoreLedger {
    /// Raw unclamped running value.
    raw: i32,
}

impl Default for ScoreLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreLedger {
    /// Creates a ledger starting at the maximum score.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            raw: 100,
        }
    }

    /// Subtracts a deduction from the running value.
    pub fn deduct(&mut self, points: i32) {
        self.raw = self.raw.saturating_sub(points);
    }

    /// Adds a bonus to the running value (may exceed 100 before clamping).
    pub fn credit(&mut self, points: i32) {
        self.raw = self.raw.saturating_add(points);
    }

    /// Returns the raw unclamped running value.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.raw
    }

    /// Finalizes the ledger into a clamped score.
    #[must_use]
    pub fn into_score(self) -> Score {
        Score::clamped(self.raw)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
