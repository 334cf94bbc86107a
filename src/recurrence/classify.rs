//! Classification of a complexity expression as `v^k · log^j(v)` over one
//! distinguished variable (§4.5.1 step 2, §4.5.2 step 2), shared by the
//! Master and Akra–Bazzi solvers.
//!
//! `j` is required to land on a non-negative integer: that is the shape
//! [`asymptote_algebra::ComplexityKind::PolyLog`] itself can hold, and it is
//! the shape every driving-function table in §4.5.1/§4.5.2 is written for.
//! An expression that only classifies to a negative or fractional log
//! exponent (e.g. `n / log n`, built as `Power(LogOf(n), -1.0)`) is
//! deliberately left unclassifiable here rather than extrapolating the
//! table outside the domain the spec states it for — callers surface that
//! as a solver-gap diagnostic instead of guessing (see `DESIGN.md`).

use asymptote_algebra::{BinaryOp, ComplexityExpression, ComplexityKind, Variable};

/// `(degree, log_exponent)` for `v^degree · log(v)^log_exponent`.
pub type PowerLogShape = (f64, i64);

/// Classify `expr` as a power-of-`variable` times a power of `log(variable)`,
/// or `None` if its shape does not fit that family.
#[must_use]
pub fn classify_power_log(expr: &ComplexityExpression, variable: &Variable) -> Option<PowerLogShape> {
    match expr.kind() {
        ComplexityKind::Const(_) => Some((0.0, 0)),
        ComplexityKind::Var(v) | ComplexityKind::Linear(_, v) if v == variable => Some((1.0, 0)),
        ComplexityKind::Poly(v, poly) if v == variable => Some((f64::from(poly.degree().unwrap_or(0)), 0)),
        ComplexityKind::Log(_, v, _) if v == variable => Some((0.0, 1)),
        ComplexityKind::PolyLog(k, j, v) if v == variable => Some((*k, i64::from(*j))),
        ComplexityKind::Power(base, exponent) => {
            let (degree, log_exponent) = classify_power_log(base, variable)?;
            let scaled_log = (log_exponent as f64) * exponent;
            integerize(degree * exponent, scaled_log)
        }
        ComplexityKind::LogOf(inner, _) => {
            let (degree, log_exponent) = classify_power_log(inner, variable)?;
            if degree == 1.0 && log_exponent == 0 {
                Some((0.0, 1))
            } else {
                None
            }
        }
        ComplexityKind::Binary(left, BinaryOp::Mul, right) => {
            let (d1, j1) = classify_power_log(left, variable)?;
            let (d2, j2) = classify_power_log(right, variable)?;
            integerize(d1 + d2, (j1 + j2) as f64)
        }
        ComplexityKind::Binary(left, BinaryOp::Add, right) => {
            let l = classify_power_log(left, variable)?;
            let r = classify_power_log(right, variable)?;
            (l == r).then_some(l)
        }
        _ => None,
    }
}

fn integerize(degree: f64, log_exponent: f64) -> Option<PowerLogShape> {
    if log_exponent < -1e-9 || (log_exponent - log_exponent.round()).abs() > 1e-6 {
        return None;
    }
    Some((degree, log_exponent.round() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use asymptote_algebra::poly::Polynomial;
    use std::sync::Arc;

    #[test]
    fn classifies_plain_polynomial() {
        let n = Variable::n();
        let expr = ComplexityExpression::poly(n.clone(), Polynomial::monomial(2, 1.0));
        assert_eq!(classify_power_log(&expr, &n), Some((2.0, 0)));
    }

    #[test]
    fn classifies_n_log_n() {
        let n = Variable::n();
        let expr = ComplexityExpression::mul(
            Arc::new(ComplexityExpression::var(n.clone())),
            Arc::new(ComplexityExpression::log(1.0, n.clone(), 2.0)),
        );
        assert_eq!(classify_power_log(&expr, &n), Some((1.0, 1)));
    }

    #[test]
    fn rejects_negative_log_power() {
        let n = Variable::n();
        let log_n = Arc::new(ComplexityExpression::log_of(Arc::new(ComplexityExpression::var(n.clone())), std::f64::consts::E));
        let inv_log = ComplexityExpression::power(log_n, -1.0);
        let expr = ComplexityExpression::mul(Arc::new(ComplexityExpression::var(n.clone())), Arc::new(inv_log));
        assert_eq!(classify_power_log(&expr, &n), None);
    }
}
