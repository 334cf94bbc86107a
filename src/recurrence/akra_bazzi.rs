//! The Akra–Bazzi theorem (§4.5.2): closed-form solutions for multi-term,
//! possibly asymmetric divide-and-conquer recurrences
//! `T(n) = Σ aᵢ·T(bᵢ·n) + g(n)`.

use std::sync::Arc;

use asymptote_algebra::{ComplexityExpression, RecurrenceData, Variable};

use crate::diagnostics::Diagnostic;

use super::classify::classify_power_log;
use super::Applicability;

/// Convergence tolerance for the critical-exponent residual (§8: "Akra–Bazzi
/// critical-exponent equation residual at returned `p` is `< 10⁻⁸`").
pub const CONVERGENCE_TOLERANCE: f64 = 1e-10;
/// Maximum Newton/bisection iterations before giving up.
pub const MAX_ITERATIONS: usize = 100;
/// Bisection fallback bracket, used when Newton's method oscillates.
pub const BISECTION_BRACKET: (f64, f64) = (-10.0, 10.0);

/// Attempt Akra–Bazzi on `data`. Every term must have a strictly positive
/// coefficient and a scale factor in `(0, 1)`; a single term is accepted too
/// (Akra–Bazzi generalizes Master), so this is also the fallback path when
/// [`super::master::try_master`] hits a classification or regularity gap.
#[must_use]
pub fn try_akra_bazzi(data: &RecurrenceData) -> (Applicability, Vec<Diagnostic>) {
    if data.terms.is_empty() {
        return not_applicable("recurrence has no terms");
    }
    if data.terms.iter().any(|t| t.coefficient <= 0.0 || !(0.0..1.0).contains(&t.scale_factor)) {
        return not_applicable("a term's coefficient is non-positive or its scale factor is outside (0, 1)");
    }

    let Some(p) = find_critical_exponent(&data.terms) else {
        return not_applicable("critical-exponent solver did not converge");
    };

    let Some((k, j)) = classify_power_log(&data.non_recursive_work, &data.variable) else {
        return not_applicable("could not classify g(n) as a power-of-n times a power-of-log(n)");
    };
    if j < 0 {
        return not_applicable("g(n) has a negative log exponent, outside the driving-integral table's domain");
    }
    let j = j as u32;

    let integral = driving_integral(p, k, j, &data.variable);
    let solution = combine_with_n_to_p(p, &integral, &data.variable);

    let applicability = Applicability::AkraBazziApplicable {
        p,
        terms: data.terms.clone(),
        integral,
        solution,
    };
    (applicability, Vec::new())
}

fn not_applicable(reason: &str) -> (Applicability, Vec<Diagnostic>) {
    (
        Applicability::NotApplicable {
            reason: reason.to_owned(),
            suggestions: vec!["consider the subtract-form linear solver if the recursion reduces n by a constant".to_owned()],
        },
        vec![Diagnostic::solver_gap(format!("Akra-Bazzi not applicable: {reason}"))],
    )
}

/// Solve `Σ aᵢ·bᵢ^p = 1` for the unique critical exponent `p` (§4.5.2 step 1).
///
/// The left-hand side is strictly decreasing in `p` (derivative
/// `Σ aᵢ·bᵢ^p·ln(bᵢ)` is always negative since every `bᵢ ∈ (0,1)`), with
/// limit `Σaᵢ` as `p → -∞` and `0` as `p → +∞`, so a unique root exists.
/// Newton's method from `p₀ = 1` is tried first; if it diverges or
/// oscillates, bisection over [`BISECTION_BRACKET`] takes over.
#[must_use]
pub fn find_critical_exponent(terms: &[asymptote_algebra::RecurrenceTerm]) -> Option<f64> {
    let residual = |p: f64| -> f64 { terms.iter().map(|t| t.coefficient * t.scale_factor.powf(p)).sum::<f64>() - 1.0 };
    let derivative = |p: f64| -> f64 {
        terms
            .iter()
            .map(|t| t.coefficient * t.scale_factor.powf(p) * t.scale_factor.ln())
            .sum::<f64>()
    };

    let mut p = 1.0_f64;
    for _ in 0..MAX_ITERATIONS {
        let r = residual(p);
        if r.abs() < CONVERGENCE_TOLERANCE {
            return Some(p);
        }
        let d = derivative(p);
        if d.abs() < f64::EPSILON {
            break;
        }
        let next = p - r / d;
        if !next.is_finite() || (next - p).abs() > 1e6 {
            break;
        }
        p = next;
    }

    bisection(residual)
}

fn bisection(residual: impl Fn(f64) -> f64) -> Option<f64> {
    let (mut lo, mut hi) = BISECTION_BRACKET;
    let mut r_lo = residual(lo);
    let r_hi = residual(hi);
    if r_lo.signum() == r_hi.signum() {
        return None;
    }
    for _ in 0..MAX_ITERATIONS {
        let mid = (lo + hi) / 2.0;
        let r_mid = residual(mid);
        if r_mid.abs() < CONVERGENCE_TOLERANCE {
            return Some(mid);
        }
        if r_mid.signum() == r_lo.signum() {
            lo = mid;
            r_lo = r_mid;
        } else {
            hi = mid;
        }
    }
    Some((lo + hi) / 2.0)
}

/// The driving integral `I(n) = ∫₁ⁿ g(u)/u^(p+1) du`, classified per the
/// §4.5.2 table from `g`'s own `(k, j)` shape.
fn driving_integral(p: f64, k: f64, j: u32, variable: &Variable) -> ComplexityExpression {
    let epsilon = 1e-9;
    if k < p - epsilon {
        ComplexityExpression::constant(1.0)
    } else if (k - p).abs() <= epsilon {
        poly_log(0.0, j + 1, variable)
    } else {
        poly_log(k - p, j, variable)
    }
}

/// `Θ(n^p · (1 + I(n)))`, normalized so the dominant term of the two
/// factors survives.
fn combine_with_n_to_p(p: f64, integral: &ComplexityExpression, variable: &Variable) -> ComplexityExpression {
    let n_to_p = poly_log(p, 0, variable);
    let product = ComplexityExpression::mul(Arc::new(n_to_p), Arc::new(integral.clone()));
    asymptote_algebra::normalize(&product)
}

fn poly_log(degree: f64, log_exponent: u32, variable: &Variable) -> ComplexityExpression {
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

#[cfg(test)]
mod tests {
    use super::*;
    use asymptote_algebra::{RecurrenceTerm, VariableRole};

    #[test]
    fn balanced_three_way_split_has_p_equal_one() {
        let n = Variable::new("n", VariableRole::DataCount);
        let terms = vec![
            RecurrenceTerm::new(1.0, 1.0 / 3.0, Arc::new(ComplexityExpression::var(n.clone()))),
            RecurrenceTerm::new(1.0, 2.0 / 3.0, Arc::new(ComplexityExpression::var(n.clone()))),
        ];
        let p = find_critical_exponent(&terms).expect("converges");
        assert!((p - 1.0).abs() < 1e-6);

        let residual: f64 = terms.iter().map(|t| t.coefficient * t.scale_factor.powf(p)).sum::<f64>() - 1.0;
        assert!(residual.abs() < 1e-8);
    }

    #[test]
    fn t_n3_plus_t_2n3_yields_n_log_n() {
        let n = Variable::new("n", VariableRole::DataCount);
        let data = RecurrenceData {
            terms: vec![
                RecurrenceTerm::new(1.0, 1.0 / 3.0, Arc::new(ComplexityExpression::var(n.clone()))),
                RecurrenceTerm::new(1.0, 2.0 / 3.0, Arc::new(ComplexityExpression::var(n.clone()))),
            ],
            variable: n.clone(),
            non_recursive_work: Arc::new(ComplexityExpression::var(n.clone())),
            base: Some(1.0),
        };
        let (applicability, _) = try_akra_bazzi(&data);
        match applicability {
            Applicability::AkraBazziApplicable { p, solution, .. } => {
                assert!((p - 1.0).abs() < 1e-6);
                assert_eq!(asymptote_algebra::to_big_o(&solution), "O(n log n)");
            }
            other => panic!("expected AkraBazziApplicable, got {other:?}"),
        }
    }

    #[test]
    fn negative_log_exponent_g_is_not_applicable() {
        let n = Variable::new("n", VariableRole::DataCount);
        let log_n = Arc::new(ComplexityExpression::log_of(Arc::new(ComplexityExpression::var(n.clone())), std::f64::consts::E));
        let inv_log = ComplexityExpression::power(log_n, -1.0);
        let g = ComplexityExpression::mul(Arc::new(ComplexityExpression::var(n.clone())), Arc::new(inv_log));
        let data = RecurrenceData {
            terms: vec![RecurrenceTerm::new(2.0, 0.5, Arc::new(ComplexityExpression::var(n.clone())))],
            variable: n,
            non_recursive_work: Arc::new(g),
            base: Some(1.0),
        };
        let (applicability, diagnostics) = try_akra_bazzi(&data);
        assert!(matches!(applicability, Applicability::NotApplicable { .. }));
        assert!(!diagnostics.is_empty());
    }
}
