//! The per-procedure analysis result schema (§6 "External Interfaces").
//!
//! Serialized with `serde` so a host process can consume it as JSON across a
//! process boundary, matching the external-helper protocol in
//! [`crate::external`].

use serde::{Deserialize, Serialize};

use asymptote_algebra::ComplexityExpression;

use crate::confidence::ConfidenceAssessment;
use crate::diagnostics::Diagnostic;

/// A rendered complexity bound plus the expression it was rendered from.
///
/// Kept as a pair rather than just the string so a consumer that wants to
/// compare or further manipulate the bound algebraically doesn't have to
/// re-parse the rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedComplexity {
    /// The conventional `"O(...)"` string, e.g. `"O(n log n)"`.
    pub big_o: String,
    /// The underlying expression, for callers that link against
    /// `asymptote-algebra` directly.
    #[serde(skip)]
    pub expression: Option<ComplexityExpression>,
}

impl RenderedComplexity {
    /// Render `expression` and keep both the string and the value.
    #[must_use]
    pub fn new(expression: ComplexityExpression) -> Self {
        let big_o = asymptote_algebra::to_big_o(&expression);
        Self { big_o, expression: Some(expression) }
    }
}

/// The full per-procedure analysis result (§6).
///
/// `time_complexity` is always present; the rest are optional because most
/// host languages only ask for time. `confidence`, `requires_review`, and
/// `diagnostics` are always populated, even on total failure: a failed
/// analysis is represented as a low-confidence `O(n)`-style fallback plus an
/// `Error`-severity diagnostic, never as a missing result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcedureResult {
    /// The procedure's name, as reported by the host adapter.
    pub name: String,
    /// The source file the procedure was defined in.
    pub file: String,
    /// The 1-based line the procedure's definition starts at.
    pub line: u32,
    /// The dominant time-complexity bound.
    pub time_complexity: RenderedComplexity,
    /// The space-complexity bound, if the host requested memory analysis.
    pub space_complexity: Option<RenderedComplexity>,
    /// The parallel span/work bound, if the procedure used a recognized
    /// concurrency construct.
    pub parallel_complexity: Option<RenderedComplexity>,
    /// The expected-case bound, if the procedure used a recognized
    /// randomized construct.
    pub probabilistic_complexity: Option<RenderedComplexity>,
    /// How confident the analyzer is in `time_complexity`.
    pub confidence: ConfidenceAssessment,
    /// `true` if a human should review this result before trusting it.
    pub requires_review: bool,
    /// All diagnostics raised while analyzing this procedure.
    pub diagnostics: Vec<Diagnostic>,
}

impl ProcedureResult {
    /// Build a result, deriving `requires_review` from `diagnostics`.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        file: impl Into<String>,
        line: u32,
        time_complexity: RenderedComplexity,
        confidence: ConfidenceAssessment,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        let requires_review = crate::diagnostics::requires_review(&diagnostics);
        Self {
            name: name.into(),
            file: file.into(),
            line,
            time_complexity,
            space_complexity: None,
            parallel_complexity: None,
            probabilistic_complexity: None,
            confidence,
            requires_review,
            diagnostics,
        }
    }

    /// Attach a space-complexity bound.
    #[must_use]
    pub fn with_space_complexity(mut self, complexity: RenderedComplexity) -> Self {
        self.space_complexity = Some(complexity);
        self
    }

    /// Attach a parallel-complexity bound.
    #[must_use]
    pub fn with_parallel_complexity(mut self, complexity: RenderedComplexity) -> Self {
        self.parallel_complexity = Some(complexity);
        self
    }

    /// Attach a probabilistic (expected-case) complexity bound.
    #[must_use]
    pub fn with_probabilistic_complexity(mut self, complexity: RenderedComplexity) -> Self {
        self.probabilistic_complexity = Some(complexity);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confidence::{ConfidenceAssessment, ConfidenceFactors};
    use crate::diagnostics::Diagnostic;
    use asymptote_algebra::{ComplexityExpression, Variable};

    fn assessment() -> ConfidenceAssessment {
        ConfidenceAssessment::from_factors(
            ConfidenceFactors {
                analysis_source: 0.9,
                verification: 0.8,
                theorem_applicability: 0.9,
                numerical_stability: 1.0,
                expression_simplicity: 0.9,
            },
            vec![],
            None,
        )
    }

    #[test]
    fn requires_review_follows_error_diagnostics() {
        let rendered = RenderedComplexity::new(ComplexityExpression::var(Variable::n()));
        let result = ProcedureResult::new("foo", "foo.rs", 1, rendered, assessment(), vec![Diagnostic::solver_gap("no theorem applied")]);
        assert!(result.requires_review);
    }

    #[test]
    fn no_review_needed_without_errors() {
        let rendered = RenderedComplexity::new(ComplexityExpression::var(Variable::n()));
        let result = ProcedureResult::new("foo", "foo.rs", 1, rendered, assessment(), vec![Diagnostic::structural("fallback used")]);
        assert!(!result.requires_review);
    }
}
