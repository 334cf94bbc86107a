//! Numerical evaluation of a [`super::ComplexityExpression`] under a
//! concrete variable assignment (§4.1).

use rustc_hash::FxHashMap;

use crate::variable::Variable;

use super::{BinaryOp, ComplexityExpression, ComplexityKind};

/// Maps each free variable of an expression to a concrete non-negative
/// value for [`evaluate`].
pub type Assignment = FxHashMap<Variable, f64>;

/// Numerically evaluate `expr` under `assignment`.
///
/// Returns `None` ("undefined") if any variable `expr` depends on is absent
/// from `assignment`, or if `expr` embeds an unsolved [`ComplexityKind::Recurrence`]
/// (recurrences must be solved and re-embedded as ordinary expressions
/// before they can be evaluated numerically). `max`/`min` use real
/// comparison; `Exp`/`Factorial` use natural arithmetic, with overflow
/// producing positive infinity rather than `None`.
#[must_use]
pub fn evaluate(expr: &ComplexityExpression, assignment: &Assignment) -> Option<f64> {
    match expr.kind() {
        ComplexityKind::Const(k) => Some(*k),
        ComplexityKind::Var(v) => assignment.get(v).copied(),
        ComplexityKind::Linear(c, v) => assignment.get(v).map(|x| c * x),
        ComplexityKind::Poly(v, poly) => assignment.get(v).map(|x| poly.evaluate(*x)),
        ComplexityKind::Log(c, v, base) => assignment.get(v).map(|x| c * x.max(1.0).log(*base)),
        ComplexityKind::PolyLog(k, j, v) => assignment.get(v).map(|x| {
            let n = x.max(1.0);
            n.powf(*k) * n.ln().powi(i32::try_from(*j).unwrap_or(i32::MAX))
        }),
        ComplexityKind::Exp(base, v, coef) => assignment.get(v).map(|x| coef * base.powf(*x)),
        ComplexityKind::Factorial(v, coef) => assignment.get(v).map(|x| coef * factorial(*x)),
        ComplexityKind::Power(base_expr, exponent) => {
            evaluate(base_expr, assignment).map(|b| b.powf(*exponent))
        }
        ComplexityKind::LogOf(inner, base) => {
            evaluate(inner, assignment).map(|v| v.max(1.0).log(*base))
        }
        ComplexityKind::ExpOf(base, inner) => evaluate(inner, assignment).map(|v| base.powf(v)),
        ComplexityKind::FactorialOf(inner) => evaluate(inner, assignment).map(factorial),
        ComplexityKind::Binary(left, op, right) => {
            let l = evaluate(left, assignment)?;
            let r = evaluate(right, assignment)?;
            Some(match op {
                BinaryOp::Add => l + r,
                BinaryOp::Mul => l * r,
                BinaryOp::Max => l.max(r),
                BinaryOp::Min => l.min(r),
            })
        }
        ComplexityKind::Conditional(_, then_expr, else_expr) => {
            // Without a live condition to evaluate, the conservative
            // numerical estimate is the worse of the two branches.
            let then_value = evaluate(then_expr, assignment)?;
            let else_value = evaluate(else_expr, assignment)?;
            Some(then_value.max(else_value))
        }
        ComplexityKind::Recurrence(_) => None,
        ComplexityKind::Amortized(_, worst) => evaluate(worst, assignment),
        ComplexityKind::Parallel(data) => evaluate(&data.work, assignment),
        ComplexityKind::Memory(data) => evaluate(&data.total, assignment),
        ComplexityKind::Probabilistic(data) => evaluate(&data.worst, assignment),
    }
}

fn factorial(x: f64) -> f64 {
    if x <= 1.0 {
        return 1.0;
    }
    let n = x.round() as u64;
    let mut acc = 1.0_f64;
    for i in 2..=n {
        acc *= i as f64;
        if acc.is_infinite() {
            return f64::INFINITY;
        }
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::Variable;

    #[test]
    fn undefined_without_assignment() {
        let expr = ComplexityExpression::var(Variable::n());
        let assignment = Assignment::default();
        assert_eq!(evaluate(&expr, &assignment), None);
    }

    #[test]
    fn linear_scales_by_coefficient() {
        let expr = ComplexityExpression::linear(3.0, Variable::n());
        let mut assignment = Assignment::default();
        assignment.insert(Variable::n(), 4.0);
        assert_eq!(evaluate(&expr, &assignment), Some(12.0));
    }

    #[test]
    fn factorial_overflows_to_infinity() {
        let expr = ComplexityExpression::factorial(Variable::n(), 1.0);
        let mut assignment = Assignment::default();
        assignment.insert(Variable::n(), 1000.0);
        assert_eq!(evaluate(&expr, &assignment), Some(f64::INFINITY));
    }
}
