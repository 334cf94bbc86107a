//! Recurrence solving (§4.5): turns an unsolved
//! [`asymptote_algebra::RecurrenceData`] into a closed-form
//! [`asymptote_algebra::ComplexityExpression`] via the Master Theorem,
//! Akra–Bazzi, or the subtract-form linear solver, in that order.

mod akra_bazzi;
mod classify;
mod linear;
mod master;
mod refinement;

use asymptote_algebra::{ComplexityExpression, RecurrenceData, RecurrenceTerm};

use crate::diagnostics::Diagnostic;

pub use akra_bazzi::{find_critical_exponent, CONVERGENCE_TOLERANCE};
pub use classify::{classify_power_log, PowerLogShape};
pub use linear::CharacteristicRoot;
pub use master::EPSILON_MIN;
pub use refinement::{assess_confidence, detect_boundary, verify_by_induction, BoundaryProximity, InductionCheck};

/// The outcome of attempting to solve a recurrence (§4.5).
///
/// Each variant carries exactly the evidence its theorem produces, so a
/// consumer can render a tailored explanation (e.g. "Case 2 of the Master
/// Theorem, `a=2, b=2`") instead of a single opaque string.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Applicability {
    /// The Master Theorem applied.
    MasterApplicable {
        /// Which of the three cases matched.
        case: u8,
        /// The number of recursive subcalls, `a`.
        a: f64,
        /// The branching factor, `b = 1/scale_factor`.
        b: f64,
        /// `log_b(a)`, the critical exponent.
        log_b_a: f64,
        /// The boundary tolerance used to classify the case.
        epsilon: f64,
        /// `f(n)`'s classified polynomial degree.
        k: f64,
        /// Whether the Case 3 regularity condition was checked and held.
        regularity_verified: bool,
        /// The resulting closed-form bound.
        solution: ComplexityExpression,
    },
    /// The Akra–Bazzi theorem applied.
    AkraBazziApplicable {
        /// The critical exponent solving `Σ aᵢ·bᵢ^p = 1`.
        p: f64,
        /// The recurrence's own terms, carried for explanation rendering.
        terms: Vec<RecurrenceTerm>,
        /// The driving integral `I(n)`.
        integral: ComplexityExpression,
        /// The resulting closed-form bound, `Θ(n^p·(1+I(n)))`.
        solution: ComplexityExpression,
    },
    /// A subtract-form linear recurrence was solved via its characteristic
    /// polynomial (or the pure-summation shortcut).
    LinearSolved {
        /// The resulting closed-form bound.
        solution: ComplexityExpression,
        /// Which linear technique produced it (`"summation"` or
        /// `"characteristic-polynomial"`).
        method: String,
    },
    /// No available theorem applied.
    NotApplicable {
        /// Why no theorem matched.
        reason: String,
        /// Suggested next steps (e.g. "try annotating this procedure").
        suggestions: Vec<String>,
    },
}

impl Applicability {
    /// The solved closed-form bound, if this recurrence was solved at all.
    #[must_use]
    pub fn solution(&self) -> Option<&ComplexityExpression> {
        match self {
            Self::MasterApplicable { solution, .. }
            | Self::AkraBazziApplicable { solution, .. }
            | Self::LinearSolved { solution, .. } => Some(solution),
            Self::NotApplicable { .. } => None,
        }
    }
}

/// Validate a recurrence's terms before handing it to any solver:
/// non-empty, every coefficient strictly positive, every scale factor in
/// `(0, 1]` (the subtract-form boundary case `scale_factor == 1` is allowed
/// since it is what a `T(n-k)` term naturally produces).
fn validate(data: &RecurrenceData) -> Result<(), Diagnostic> {
    if data.terms.is_empty() {
        return Err(Diagnostic::structural("recurrence has no recursive terms to solve"));
    }
    for term in &data.terms {
        if term.coefficient <= 0.0 {
            return Err(Diagnostic::structural(format!(
                "recurrence term has a non-positive coefficient ({})",
                term.coefficient
            )));
        }
        if !(0.0..=1.0).contains(&term.scale_factor) {
            return Err(Diagnostic::structural(format!(
                "recurrence term has a scale factor outside (0, 1] ({})",
                term.scale_factor
            )));
        }
    }
    Ok(())
}

/// Solve `recurrence`, trying the Master Theorem, then Akra–Bazzi (on a
/// Master gap), then the subtract-form linear solver, in that order (§4.5
/// "Order of attempts").
#[must_use]
pub fn analyze(recurrence: &RecurrenceData) -> (Applicability, Vec<Diagnostic>) {
    if let Err(diagnostic) = validate(recurrence) {
        return (
            Applicability::NotApplicable {
                reason: diagnostic.message().to_owned(),
                suggestions: vec!["check the extracted recurrence terms for this procedure".to_owned()],
            },
            vec![diagnostic],
        );
    }

    let mut diagnostics = Vec::new();

    if let Some((applicability, master_diagnostics)) = master::try_master(recurrence) {
        diagnostics.extend(master_diagnostics);
        if !matches!(applicability, Applicability::NotApplicable { .. }) {
            return (applicability, diagnostics);
        }
    }

    let (applicability, akra_bazzi_diagnostics) = akra_bazzi::try_akra_bazzi(recurrence);
    diagnostics.extend(akra_bazzi_diagnostics);
    if !matches!(applicability, Applicability::NotApplicable { .. }) {
        return (applicability, diagnostics);
    }

    let (applicability, linear_diagnostics) = linear::try_linear(recurrence);
    diagnostics.extend(linear_diagnostics);
    (applicability, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use asymptote_algebra::{ComplexityExpression, Variable, VariableRole};
    use std::sync::Arc;

    #[test]
    fn rejects_empty_recurrence() {
        let n = Variable::new("n", VariableRole::InputSize);
        let data = RecurrenceData {
            terms: Vec::new(),
            variable: n,
            non_recursive_work: Arc::new(ComplexityExpression::constant(1.0)),
            base: Some(1.0),
        };
        let (applicability, diagnostics) = analyze(&data);
        assert!(matches!(applicability, Applicability::NotApplicable { .. }));
        assert!(!diagnostics.is_empty());
    }

    #[test]
    fn dispatches_binary_search_to_master_case_two() {
        let n = Variable::new("n", VariableRole::InputSize);
        let data = RecurrenceData {
            terms: vec![RecurrenceTerm::new(1.0, 0.5, Arc::new(ComplexityExpression::linear(0.5, n.clone())))],
            variable: n.clone(),
            non_recursive_work: Arc::new(ComplexityExpression::constant(1.0)),
            base: Some(1.0),
        };
        let (applicability, _) = analyze(&data);
        match applicability {
            Applicability::MasterApplicable { case, solution, .. } => {
                assert_eq!(case, 2);
                assert_eq!(asymptote_algebra::to_big_o(&solution), "O(log n)");
            }
            other => panic!("expected MasterApplicable, got {other:?}"),
        }
    }

    #[test]
    fn dispatches_unbalanced_split_to_akra_bazzi() {
        let n = Variable::new("n", VariableRole::InputSize);
        let data = RecurrenceData {
            terms: vec![
                RecurrenceTerm::new(1.0, 1.0 / 3.0, Arc::new(ComplexityExpression::linear(1.0 / 3.0, n.clone()))),
                RecurrenceTerm::new(1.0, 2.0 / 3.0, Arc::new(ComplexityExpression::linear(2.0 / 3.0, n.clone()))),
            ],
            variable: n.clone(),
            non_recursive_work: Arc::new(ComplexityExpression::var(n.clone())),
            base: Some(1.0),
        };
        let (applicability, _) = analyze(&data);
        assert!(matches!(applicability, Applicability::AkraBazziApplicable { .. }));
    }
}
