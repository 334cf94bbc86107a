//! Post-solve refinement (§4.5.4): boundary-case detection, numerical
//! induction verification, and confidence scoring for a solved recurrence.

use asymptote_algebra::{evaluate, Assignment, ComplexityExpression, RecurrenceData, RecurrenceTerm};

use crate::confidence::{ConfidenceAssessment, ConfidenceFactors};
use crate::diagnostics::Diagnostic;

use super::Applicability;

/// How close a solved recurrence sat to a theorem's case boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryProximity {
    /// `true` if the solve landed close enough to a boundary that a small
    /// perturbation in `f(n)`'s degree or the critical exponent could have
    /// flipped the case.
    pub near_boundary: bool,
    /// A normalized distance to the nearest boundary (smaller is closer);
    /// not comparable across theorems.
    pub distance: f64,
    /// A human-readable description of which boundary was checked.
    pub description: String,
}

/// Numerical induction verification result for a solved recurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct InductionCheck {
    /// `true` if the unrolled recurrence's growth trend matched the solved
    /// closed form within tolerance across all sample points.
    pub verified: bool,
    /// The largest relative error observed between the unrolled growth
    /// ratio and the solution's growth ratio across consecutive samples.
    /// `NaN` if verification could not be attempted.
    pub max_relative_error: f64,
    /// Why verification was skipped or what it measured.
    pub notes: String,
}

/// Check whether a solved recurrence sits near its theorem's case boundary.
#[must_use]
pub fn detect_boundary(applicability: &Applicability) -> BoundaryProximity {
    match applicability {
        Applicability::MasterApplicable { case, k, log_b_a, epsilon, .. } => {
            let delta = k - log_b_a;
            let distance = (delta.abs() - epsilon).abs();
            BoundaryProximity {
                near_boundary: delta.abs() <= epsilon * 3.0,
                distance,
                description: format!("Master Case {case}: delta={delta:.4}, epsilon={epsilon:.4}"),
            }
        }
        Applicability::AkraBazziApplicable { p, .. } => {
            let gap_to_integer = (p - p.round()).abs();
            BoundaryProximity {
                near_boundary: gap_to_integer < 0.05,
                distance: gap_to_integer,
                description: format!("critical exponent p={p:.4}, nearest integer gap={gap_to_integer:.4}"),
            }
        }
        Applicability::LinearSolved { method, .. } => BoundaryProximity {
            near_boundary: false,
            distance: 1.0,
            description: format!("linear solver ({method}) has no case boundary"),
        },
        Applicability::NotApplicable { reason, .. } => {
            BoundaryProximity { near_boundary: false, distance: 0.0, description: reason.clone() }
        }
    }
}

/// Sample points (in units of the bound variable) used for induction
/// verification. Kept small and geometric so the recursive unroll below
/// stays cheap even for a deeply divide-and-conquer recurrence.
const INDUCTION_SAMPLES: [f64; 4] = [64.0, 128.0, 256.0, 512.0];

/// Maximum unroll depth, bounding the work done by [`unroll`] regardless of
/// how close a term's scale factor is to `1.0`.
const MAX_UNROLL_DEPTH: u32 = 64;

/// Verify a solved recurrence numerically by unrolling it down to its base
/// case and comparing the resulting growth trend against the solution's.
///
/// Divide-form recurrences unroll in `O(log n)` recursive steps and are
/// checked directly. Subtract-form recurrences would need `O(n)` steps to
/// reach the base case, which is not a cost this analyzer pays per
/// procedure, so verification is skipped for those and reported as such
/// rather than silently approximated.
#[must_use]
pub fn verify_by_induction(data: &RecurrenceData, solution: &ComplexityExpression) -> InductionCheck {
    if data.terms.iter().any(RecurrenceTerm::is_subtract_form) {
        return InductionCheck {
            verified: false,
            max_relative_error: f64::NAN,
            notes: "subtract-form recursion depth makes direct unrolling impractical".to_owned(),
        };
    }

    let mut unrolled = Vec::with_capacity(INDUCTION_SAMPLES.len());
    let mut predicted = Vec::with_capacity(INDUCTION_SAMPLES.len());
    for &n in &INDUCTION_SAMPLES {
        let Some(value) = unroll(data, n, MAX_UNROLL_DEPTH) else {
            return InductionCheck {
                verified: false,
                max_relative_error: f64::NAN,
                notes: "non-recursive work did not evaluate numerically at a sample point".to_owned(),
            };
        };
        let mut assignment = Assignment::default();
        assignment.insert(data.variable.clone(), n);
        let Some(bound) = evaluate(solution, &assignment) else {
            return InductionCheck {
                verified: false,
                max_relative_error: f64::NAN,
                notes: "solved closed form did not evaluate numerically at a sample point".to_owned(),
            };
        };
        unrolled.push(value);
        predicted.push(bound);
    }

    let mut max_relative_error = 0.0_f64;
    for window in unrolled.windows(2).zip(predicted.windows(2)) {
        let (unrolled_pair, predicted_pair) = window;
        if unrolled_pair[0] <= 0.0 || predicted_pair[0] <= 0.0 {
            continue;
        }
        let unrolled_ratio = unrolled_pair[1] / unrolled_pair[0];
        let predicted_ratio = predicted_pair[1] / predicted_pair[0];
        if predicted_ratio <= 0.0 {
            continue;
        }
        let relative_error = (unrolled_ratio - predicted_ratio).abs() / predicted_ratio;
        max_relative_error = max_relative_error.max(relative_error);
    }

    InductionCheck {
        verified: max_relative_error < 1.0,
        max_relative_error,
        notes: format!("growth-ratio comparison across {} samples", INDUCTION_SAMPLES.len()),
    }
}

/// Recursively unroll `data` at input size `n` down to its base case (or
/// `depth` recursive steps, whichever comes first), returning the total
/// numeric work done.
fn unroll(data: &RecurrenceData, n: f64, depth: u32) -> Option<f64> {
    let base = data.base.unwrap_or(1.0).max(1.0);
    if n <= base || depth == 0 {
        return Some(1.0);
    }
    let mut total = 0.0;
    for term in &data.terms {
        let sub_n = term.scale_factor * n;
        total += term.coefficient * unroll(data, sub_n, depth - 1)?;
    }
    let mut assignment = Assignment::default();
    assignment.insert(data.variable.clone(), n);
    let f_n = evaluate(&data.non_recursive_work, &assignment)?;
    Some(total + f_n.max(0.0))
}

/// How many operands a normalized expression's top-level `max`/`min` chain
/// has, a proxy for how "simple" the final bound is (§4.5.4).
fn expression_width(expr: &ComplexityExpression) -> u32 {
    use asymptote_algebra::{BinaryOp, ComplexityKind};
    match expr.kind() {
        ComplexityKind::Binary(left, BinaryOp::Max | BinaryOp::Min, right) => {
            expression_width(left) + expression_width(right)
        }
        _ => 1,
    }
}

/// Build the overall [`ConfidenceAssessment`] for a solved recurrence from
/// its theorem outcome, boundary proximity, induction check, and any
/// diagnostics accumulated along the way (§4.5.4).
#[must_use]
pub fn assess_confidence(
    applicability: &Applicability,
    diagnostics: &[Diagnostic],
    boundary: &BoundaryProximity,
    induction: &InductionCheck,
) -> ConfidenceAssessment {
    let mut warnings = Vec::new();

    let theorem_applicability = match applicability {
        Applicability::MasterApplicable { case: 1 | 2, .. } => 0.95,
        Applicability::MasterApplicable { case: 3, regularity_verified: true, .. } => 0.85,
        Applicability::MasterApplicable { .. } => 0.6,
        Applicability::AkraBazziApplicable { .. } => 0.8,
        Applicability::LinearSolved { method, .. } if method == "summation" => 0.9,
        Applicability::LinearSolved { .. } => 0.7,
        Applicability::NotApplicable { .. } => 0.05,
    };

    if boundary.near_boundary {
        warnings.push(format!("solution sits near a theorem case boundary ({})", boundary.description));
    }

    let verification = if induction.max_relative_error.is_nan() {
        0.5
    } else if induction.verified {
        (1.0 - induction.max_relative_error.min(1.0)).max(0.1)
    } else {
        warnings.push(format!(
            "numerical induction check did not confirm the solved bound ({})",
            induction.notes
        ));
        0.2
    };

    let numerical_stability = if diagnostics.iter().any(|d| d.category() == crate::diagnostics::DiagnosticCategory::Numerical) {
        warnings.push("a numerical diagnostic was raised while solving this recurrence".to_owned());
        0.4
    } else {
        0.9
    };

    let expression_simplicity = applicability
        .solution()
        .map_or(0.3, |solution| 1.0 / f64::from(expression_width(solution)));

    let analysis_source = match applicability {
        Applicability::NotApplicable { .. } => 0.1,
        _ => 0.8,
    };

    let factors = ConfidenceFactors {
        analysis_source,
        verification,
        theorem_applicability,
        numerical_stability,
        expression_simplicity,
    };

    let recommendation = if boundary.near_boundary || !induction.verified {
        Some("review this bound manually; it sits near a solver boundary or failed induction verification".to_owned())
    } else {
        None
    };

    ConfidenceAssessment::from_factors(factors, warnings, recommendation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use asymptote_algebra::{RecurrenceTerm, Variable, VariableRole};
    use std::sync::Arc;

    #[test]
    fn merge_sort_induction_check_passes() {
        let n = Variable::new("n", VariableRole::InputSize);
        let data = RecurrenceData {
            terms: vec![RecurrenceTerm::new(2.0, 0.5, Arc::new(ComplexityExpression::linear(0.5, n.clone())))],
            variable: n.clone(),
            non_recursive_work: Arc::new(ComplexityExpression::var(n.clone())),
            base: Some(1.0),
        };
        let solution = ComplexityExpression::poly_log(1.0, 1, n);
        let check = verify_by_induction(&data, &solution);
        assert!(check.verified, "expected verification to pass, got {check:?}");
    }

    #[test]
    fn subtract_form_recurrence_skips_unrolling() {
        let n = Variable::new("n", VariableRole::InputSize);
        let data = RecurrenceData {
            terms: vec![RecurrenceTerm::new(1.0, 0.999, Arc::new(ComplexityExpression::var(n.clone())))],
            variable: n.clone(),
            non_recursive_work: Arc::new(ComplexityExpression::constant(1.0)),
            base: Some(1.0),
        };
        let solution = ComplexityExpression::var(n);
        let check = verify_by_induction(&data, &solution);
        assert!(!check.verified);
        assert!(check.max_relative_error.is_nan());
    }

    #[test]
    fn boundary_detection_flags_near_case_two() {
        let applicability = Applicability::MasterApplicable {
            case: 2,
            a: 2.0,
            b: 2.0,
            log_b_a: 1.0,
            epsilon: super::super::EPSILON_MIN,
            k: 1.0,
            regularity_verified: true,
            solution: ComplexityExpression::poly_log(1.0, 1, Variable::new("n", VariableRole::InputSize)),
        };
        let boundary = detect_boundary(&applicability);
        assert!(boundary.near_boundary);
    }
}
