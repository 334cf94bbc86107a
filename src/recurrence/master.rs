//! The Master Theorem (§4.5.1): closed-form solutions for single-term
//! divide-and-conquer recurrences `T(n) = a·T(n/b) + f(n)`.

use std::sync::Arc;

use asymptote_algebra::{Assignment, ComplexityExpression, RecurrenceData, Variable};

use crate::diagnostics::Diagnostic;

use super::classify::classify_power_log;
use super::Applicability;

/// The boundary tolerance `ε_min` from §4.5.1, used to classify a recurrence
/// into Case 1/2/3.
pub const EPSILON_MIN: f64 = 0.01;

/// Regularity-check sample points (§4.5.1 step 3), a fixed geometric set.
pub const REGULARITY_SAMPLES: &[f64] = &[100.0, 500.0, 1000.0, 5000.0, 10_000.0, 50_000.0, 100_000.0, 500_000.0, 1_000_000.0];

/// The ratio threshold below which regularity is considered verified.
pub const REGULARITY_THRESHOLD: f64 = 0.9999;

/// Attempt the Master Theorem on `data`. Returns `None` if `data` does not
/// fit the Master shape at all (more than one term, `a < 1`, or
/// `scale_factor` outside `(0, 1)`) so the caller can try Akra–Bazzi
/// instead; returns `Some` (possibly `NotApplicable`) once Master applies
/// structurally but the classification or regularity check fails.
#[must_use]
pub fn try_master(data: &RecurrenceData) -> Option<(Applicability, Vec<Diagnostic>)> {
    if data.terms.len() != 1 {
        return None;
    }
    let term = &data.terms[0];
    if term.coefficient < 1.0 || !(0.0..1.0).contains(&term.scale_factor) {
        return None;
    }

    let a = term.coefficient;
    let b = 1.0 / term.scale_factor;
    let log_b_a = a.ln() / b.ln();

    let Some((k, j)) = classify_power_log(&data.non_recursive_work, &data.variable) else {
        return Some((
            Applicability::NotApplicable {
                reason: "could not classify f(n) as a power-of-n times a power-of-log(n)".to_owned(),
                suggestions: vec![
                    "retry with Akra-Bazzi, whose driving integral accepts a broader class of f".to_owned(),
                ],
            },
            vec![Diagnostic::solver_gap("Master Theorem gap: f(n) is not polynomially separated from n^(log_b a)")],
        ));
    };

    let delta = k - log_b_a;
    let mut diagnostics = Vec::new();

    if delta < -EPSILON_MIN {
        let solution = poly_log_expr(log_b_a, 0, &data.variable);
        return Some((
            Applicability::MasterApplicable {
                case: 1,
                a,
                b,
                log_b_a,
                epsilon: EPSILON_MIN,
                k,
                regularity_verified: true,
                solution,
            },
            diagnostics,
        ));
    }

    if delta.abs() <= EPSILON_MIN {
        let Ok(next_j) = u32::try_from(j + 1) else {
            diagnostics.push(Diagnostic::solver_gap(
                "Master Theorem gap: |delta| <= epsilon but f's log exponent does not extend to a representable Case 2 form",
            ));
            return Some((
                Applicability::NotApplicable {
                    reason: "Case 2 boundary reached but f(n) log exponent is negative".to_owned(),
                    suggestions: vec!["retry with Akra-Bazzi".to_owned()],
                },
                diagnostics,
            ));
        };
        let solution = poly_log_expr(log_b_a, next_j, &data.variable);
        return Some((
            Applicability::MasterApplicable {
                case: 2,
                a,
                b,
                log_b_a,
                epsilon: EPSILON_MIN,
                k,
                regularity_verified: true,
                solution,
            },
            diagnostics,
        ));
    }

    // Case 3: verify the regularity condition before trusting Theta(f(n)).
    let (verified, numeric_ratio) = check_regularity(&data.non_recursive_work, &data.variable, a, term.scale_factor);
    if !verified {
        diagnostics.push(Diagnostic::numerical(format!(
            "Master Case 3 regularity check failed (max sampled ratio {numeric_ratio:.4} >= {REGULARITY_THRESHOLD}); falling back to Akra-Bazzi"
        )));
        return None;
    }

    let solution = (*data.non_recursive_work).clone();
    Some((
        Applicability::MasterApplicable {
            case: 3,
            a,
            b,
            log_b_a,
            epsilon: EPSILON_MIN,
            k,
            regularity_verified: true,
            solution,
        },
        diagnostics,
    ))
}

fn poly_log_expr(degree: f64, log_exponent: u32, variable: &Variable) -> ComplexityExpression {
    if log_exponent == 0 {
        if degree == 0.0 {
            ComplexityExpression::constant(1.0)
        } else if degree == 1.0 {
            ComplexityExpression::var(variable.clone())
        } else {
            ComplexityExpression::poly_log(degree, 0, variable.clone())
        }
    } else {
        ComplexityExpression::poly_log(degree, log_exponent, variable.clone())
    }
}

/// Check `a·f(n/b) ≤ c·f(n)` for some `c < 1` and all sufficiently large
/// `n`, by sampling `f` at a fixed geometric point set and tracking the
/// ratio `a·f(n/b)/f(n)` (§4.5.1 step 3). Returns `(verified, worst_tail_ratio)`.
fn check_regularity(f: &Arc<ComplexityExpression>, variable: &Variable, a: f64, scale_factor: f64) -> (bool, f64) {
    let mut ratios = Vec::with_capacity(REGULARITY_SAMPLES.len());
    for &n in REGULARITY_SAMPLES {
        let mut at_n = Assignment::default();
        at_n.insert(variable.clone(), n);
        let mut at_scaled = Assignment::default();
        at_scaled.insert(variable.clone(), n * scale_factor);

        let Some(f_n) = asymptote_algebra::evaluate(f, &at_n) else {
            return (false, f64::INFINITY);
        };
        let Some(f_scaled) = asymptote_algebra::evaluate(f, &at_scaled) else {
            return (false, f64::INFINITY);
        };
        if f_n <= 0.0 {
            continue;
        }
        ratios.push(a * f_scaled / f_n);
    }

    let worst = ratios.iter().copied().fold(f64::MIN, f64::max);
    (worst < REGULARITY_THRESHOLD, worst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use asymptote_algebra::{RecurrenceTerm, VariableRole};

    fn term(coefficient: f64, scale_factor: f64, variable: &Variable) -> RecurrenceTerm {
        let arg = ComplexityExpression::linear(scale_factor, variable.clone());
        RecurrenceTerm::new(coefficient, scale_factor, Arc::new(arg))
    }

    #[test]
    fn merge_sort_is_case_two() {
        let n = Variable::new("n", VariableRole::DataCount);
        let data = RecurrenceData {
            terms: vec![term(2.0, 0.5, &n)],
            variable: n.clone(),
            non_recursive_work: Arc::new(ComplexityExpression::var(n.clone())),
            base: Some(1.0),
        };
        let (applicability, _) = try_master(&data).expect("fits master shape");
        match applicability {
            Applicability::MasterApplicable { case, solution, .. } => {
                assert_eq!(case, 2);
                assert_eq!(asymptote_algebra::to_big_o(&solution), "O(n log n)");
            }
            other => panic!("expected MasterApplicable, got {other:?}"),
        }
    }

    #[test]
    fn karatsuba_is_case_one() {
        let n = Variable::new("n", VariableRole::DataCount);
        let data = RecurrenceData {
            terms: vec![term(3.0, 0.5, &n)],
            variable: n.clone(),
            non_recursive_work: Arc::new(ComplexityExpression::var(n.clone())),
            base: Some(1.0),
        };
        let (applicability, _) = try_master(&data).expect("fits master shape");
        match applicability {
            Applicability::MasterApplicable { case, log_b_a, .. } => {
                assert_eq!(case, 1);
                assert!((log_b_a - 3.0_f64.log2()).abs() < 1e-9);
            }
            other => panic!("expected MasterApplicable, got {other:?}"),
        }
    }

    #[test]
    fn strassen_is_case_one_with_expected_exponent() {
        let n = Variable::new("n", VariableRole::DataCount);
        let data = RecurrenceData {
            terms: vec![term(7.0, 0.5, &n)],
            variable: n.clone(),
            non_recursive_work: Arc::new(ComplexityExpression::poly(n.clone(), asymptote_algebra::poly::Polynomial::monomial(2, 1.0))),
            base: Some(1.0),
        };
        let (applicability, _) = try_master(&data).expect("fits master shape");
        match applicability {
            Applicability::MasterApplicable { case, log_b_a, .. } => {
                assert_eq!(case, 1);
                assert!((log_b_a - 7.0_f64.log2()).abs() < 1e-9);
            }
            other => panic!("expected MasterApplicable, got {other:?}"),
        }
    }
}
