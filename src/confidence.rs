//! Confidence scoring for a solved or extracted complexity bound (§3, §4.5.4).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A coarse confidence band, derived from [`ConfidenceAssessment::overall`]
/// by the fixed thresholds in §4.5.4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    /// `overall < 0.25`.
    VeryLow,
    /// `0.25 ≤ overall < 0.5`.
    Low,
    /// `0.5 ≤ overall < 0.75`.
    Medium,
    /// `0.75 ≤ overall < 0.9`.
    High,
    /// `overall ≥ 0.9`.
    VeryHigh,
}

impl ConfidenceLevel {
    /// Classify a raw `overall` score (clamped to `[0, 1]` by the caller)
    /// into a level using the §4.5.4 thresholds.
    #[must_use]
    pub fn from_score(overall: f64) -> Self {
        if overall >= 0.9 {
            Self::VeryHigh
        } else if overall >= 0.75 {
            Self::High
        } else if overall >= 0.5 {
            Self::Medium
        } else if overall >= 0.25 {
            Self::Low
        } else {
            Self::VeryLow
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::VeryLow => "very low",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::VeryHigh => "very high",
        };
        write!(f, "{label}")
    }
}

/// The individually-scored inputs to a [`ConfidenceAssessment`], each in
/// `[0, 1]`. Exposed on the assessment so a consumer can recompute the
/// overall score under different weights without re-running analysis
/// (resolving the "confidence-weight tuning" open question).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceFactors {
    /// How strong the evidence behind the bound's origin is (e.g. a
    /// `Documented` BCL entry scores higher than a `Heuristic` fallback).
    pub analysis_source: f64,
    /// How well the refinement pipeline's induction verification held up.
    pub verification: f64,
    /// Whether a recognized theorem applied cleanly, versus a boundary case
    /// or an unclassifiable recurrence.
    pub theorem_applicability: f64,
    /// Numerical stability of any sampling-based step (regularity check,
    /// critical-exponent solve, slack optimization).
    pub numerical_stability: f64,
    /// How simple the final expression is after normalization (a single
    /// dominant term scores higher than a wide `max`/`min` of incomparable
    /// terms).
    pub expression_simplicity: f64,
}

/// Fixed factor weights from §4.5.4. Not empirically calibrated — the spec
/// notes this as an open question — but they do satisfy monotonicity:
/// raising any one factor while holding the others fixed strictly raises
/// the weighted geometric mean.
pub const SOURCE_WEIGHT: f64 = 1.5;
/// See [`SOURCE_WEIGHT`].
pub const VERIFICATION_WEIGHT: f64 = 1.3;
/// See [`SOURCE_WEIGHT`].
pub const THEOREM_WEIGHT: f64 = 1.2;
/// See [`SOURCE_WEIGHT`].
pub const STABILITY_WEIGHT: f64 = 1.0;
/// See [`SOURCE_WEIGHT`].
pub const SIMPLICITY_WEIGHT: f64 = 0.8;

impl ConfidenceFactors {
    /// Weighted geometric mean of the five factors, using the fixed §4.5.4
    /// weights. Factors are clamped into `(0, 1]` first so a zero factor
    /// cannot force the whole product to zero outright while still
    /// dominating the result.
    #[must_use]
    pub fn weighted_geometric_mean(self) -> f64 {
        self.weighted_geometric_mean_with_weights(
            SOURCE_WEIGHT,
            VERIFICATION_WEIGHT,
            THEOREM_WEIGHT,
            STABILITY_WEIGHT,
            SIMPLICITY_WEIGHT,
        )
    }

    /// Recompute the weighted geometric mean with caller-supplied weights,
    /// for a consumer that wants different calibration than §4.5.4's
    /// defaults.
    #[must_use]
    pub fn weighted_geometric_mean_with_weights(
        self,
        source_weight: f64,
        verification_weight: f64,
        theorem_weight: f64,
        stability_weight: f64,
        simplicity_weight: f64,
    ) -> f64 {
        let factors = [
            (self.analysis_source, source_weight),
            (self.verification, verification_weight),
            (self.theorem_applicability, theorem_weight),
            (self.numerical_stability, stability_weight),
            (self.expression_simplicity, simplicity_weight),
        ];
        let total_weight: f64 = factors.iter().map(|(_, w)| w).sum();
        let log_sum: f64 = factors
            .iter()
            .map(|(value, weight)| weight * value.clamp(1e-6, 1.0).ln())
            .sum();
        (log_sum / total_weight).exp()
    }
}

/// A confidence report attached to every [`crate::result::ProcedureResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceAssessment {
    /// The overall score in `[0, 1]`.
    pub overall: f64,
    /// The coarse band `overall` falls into.
    pub level: ConfidenceLevel,
    /// The per-factor breakdown that produced `overall`.
    pub factors: ConfidenceFactors,
    /// Free-text warnings surfaced alongside the score (distinct from
    /// [`crate::diagnostics::Diagnostic`]s, which are attached to the
    /// result separately).
    pub warnings: Vec<String>,
    /// A short recommendation for what a reviewer should check, if
    /// anything.
    pub recommendation: Option<String>,
}

impl ConfidenceAssessment {
    /// Build an assessment from its factors, deriving `overall` and `level`.
    #[must_use]
    pub fn from_factors(factors: ConfidenceFactors, warnings: Vec<String>, recommendation: Option<String>) -> Self {
        let overall = factors.weighted_geometric_mean().clamp(0.0, 1.0);
        Self { overall, level: ConfidenceLevel::from_score(overall), factors, warnings, recommendation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> ConfidenceFactors {
        ConfidenceFactors {
            analysis_source: 0.3,
            verification: 0.5,
            theorem_applicability: 0.5,
            numerical_stability: 0.5,
            expression_simplicity: 0.5,
        }
    }

    #[test]
    fn raising_source_strictly_raises_overall() {
        let low = baseline().weighted_geometric_mean();
        let mut higher = baseline();
        higher.analysis_source = 1.0;
        let high = higher.weighted_geometric_mean();
        assert!(high > low);
    }

    #[test]
    fn thresholds_classify_correctly() {
        assert_eq!(ConfidenceLevel::from_score(0.95), ConfidenceLevel::VeryHigh);
        assert_eq!(ConfidenceLevel::from_score(0.8), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(0.6), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(0.3), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_score(0.1), ConfidenceLevel::VeryLow);
    }
}
