//! Free-variable substitution (§4.1).
//!
//! Capture-avoidance is trivial here because no variable is bound outside a
//! [`ComplexityKind::Recurrence`] (§3 invariant (d)): substituting for a
//! recurrence's own bound variable is simply skipped rather than threaded
//! into its body, since that occurrence refers to the recurrence's local
//! induction variable, not the caller's free one.

use std::f64::consts::E;
use std::sync::Arc;

use crate::variable::Variable;

use super::{
    AllocationSite, ComplexityExpression, ComplexityKind, MemoryData, ParallelData,
    ProbabilisticData, RecurrenceData, RecurrenceTerm,
};

/// Replace every free occurrence of `target` in `expr` with `replacement`.
#[must_use]
pub fn substitute(expr: &ComplexityExpression, target: &Variable, replacement: &Arc<ComplexityExpression>) -> ComplexityExpression {
    match expr.kind() {
        ComplexityKind::Const(k) => ComplexityExpression::constant(*k),
        ComplexityKind::Var(v) => {
            if v == target {
                (**replacement).clone()
            } else {
                ComplexityExpression::var(v.clone())
            }
        }
        ComplexityKind::Linear(c, v) => {
            if v == target {
                ComplexityExpression::mul(Arc::new(ComplexityExpression::constant(*c)), replacement.clone())
            } else {
                ComplexityExpression::linear(*c, v.clone())
            }
        }
        ComplexityKind::Poly(v, poly) => {
            if v == target {
                let mut acc = ComplexityExpression::constant(0.0);
                for &(degree, coef) in poly.terms() {
                    let power = ComplexityExpression::power(replacement.clone(), f64::from(degree));
                    let term = ComplexityExpression::mul(Arc::new(ComplexityExpression::constant(coef)), Arc::new(power));
                    acc = ComplexityExpression::add(Arc::new(acc), Arc::new(term));
                }
                acc
            } else {
                ComplexityExpression::poly(v.clone(), poly.clone())
            }
        }
        ComplexityKind::Log(c, v, base) => {
            if v == target {
                let log_of = ComplexityExpression::log_of(replacement.clone(), *base);
                ComplexityExpression::mul(Arc::new(ComplexityExpression::constant(*c)), Arc::new(log_of))
            } else {
                ComplexityExpression::log(*c, v.clone(), *base)
            }
        }
        ComplexityKind::PolyLog(k, j, v) => {
            if v == target {
                let power = ComplexityExpression::power(replacement.clone(), *k);
                let log_of = ComplexityExpression::log_of(replacement.clone(), E);
                let log_pow = ComplexityExpression::power(Arc::new(log_of), f64::from(*j));
                ComplexityExpression::mul(Arc::new(power), Arc::new(log_pow))
            } else {
                ComplexityExpression::poly_log(*k, *j, v.clone())
            }
        }
        ComplexityKind::Exp(base, v, coef) => {
            if v == target {
                let exp_of = ComplexityExpression::exp_of(*base, replacement.clone());
                ComplexityExpression::mul(Arc::new(ComplexityExpression::constant(*coef)), Arc::new(exp_of))
            } else {
                ComplexityExpression::exp(*base, v.clone(), *coef)
            }
        }
        ComplexityKind::Factorial(v, coef) => {
            if v == target {
                let fact_of = ComplexityExpression::factorial_of(replacement.clone());
                ComplexityExpression::mul(Arc::new(ComplexityExpression::constant(*coef)), Arc::new(fact_of))
            } else {
                ComplexityExpression::factorial(v.clone(), *coef)
            }
        }
        ComplexityKind::Power(base_expr, exponent) => {
            ComplexityExpression::power(sub_arc(base_expr, target, replacement), *exponent)
        }
        ComplexityKind::LogOf(inner, base) => ComplexityExpression::log_of(sub_arc(inner, target, replacement), *base),
        ComplexityKind::ExpOf(base, inner) => ComplexityExpression::exp_of(*base, sub_arc(inner, target, replacement)),
        ComplexityKind::FactorialOf(inner) => ComplexityExpression::factorial_of(sub_arc(inner, target, replacement)),
        ComplexityKind::Binary(left, op, right) => {
            ComplexityExpression::binary(sub_arc(left, target, replacement), *op, sub_arc(right, target, replacement))
        }
        ComplexityKind::Conditional(description, then_expr, else_expr) => ComplexityExpression::conditional(
            description.as_ref(),
            sub_arc(then_expr, target, replacement),
            sub_arc(else_expr, target, replacement),
        ),
        ComplexityKind::Recurrence(data) => {
            if data.variable == *target {
                ComplexityExpression::recurrence((**data).clone())
            } else {
                let terms = data
                    .terms
                    .iter()
                    .map(|term| RecurrenceTerm::new(
                        term.coefficient,
                        term.scale_factor,
                        sub_arc(&term.argument_expression, target, replacement),
                    ))
                    .collect();
                ComplexityExpression::recurrence(RecurrenceData {
                    terms,
                    variable: data.variable.clone(),
                    non_recursive_work: sub_arc(&data.non_recursive_work, target, replacement),
                    base: data.base,
                })
            }
        }
        ComplexityKind::Amortized(amortized, worst) => {
            ComplexityExpression::amortized(sub_arc(amortized, target, replacement), sub_arc(worst, target, replacement))
        }
        ComplexityKind::Parallel(data) => ComplexityExpression::parallel(ParallelData::new(
            sub_arc(&data.work, target, replacement),
            sub_arc(&data.span, target, replacement),
            data.pattern,
            data.is_task_based,
            data.has_sync,
        )),
        ComplexityKind::Memory(data) => ComplexityExpression::memory(MemoryData {
            total: sub_arc(&data.total, target, replacement),
            stack: sub_arc(&data.stack, target, replacement),
            heap: sub_arc(&data.heap, target, replacement),
            auxiliary: sub_arc(&data.auxiliary, target, replacement),
            in_place: data.in_place,
            tail_recursive: data.tail_recursive,
            allocations: data
                .allocations
                .iter()
                .map(|site| AllocationSite::new(
                    sub_arc(&site.size, target, replacement),
                    sub_arc(&site.iterations, target, replacement),
                ))
                .collect(),
        }),
        ComplexityKind::Probabilistic(data) => ComplexityExpression::probabilistic(ProbabilisticData::new(
            sub_arc(&data.expected, target, replacement),
            sub_arc(&data.worst, target, replacement),
            data.source,
            data.distribution,
            data.assumptions.clone(),
        )),
    }
}

fn sub_arc(expr: &Arc<ComplexityExpression>, target: &Variable, replacement: &Arc<ComplexityExpression>) -> Arc<ComplexityExpression> {
    Arc::new(substitute(expr, target, replacement))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_matching_linear_variable() {
        let expr = ComplexityExpression::linear(1.0, Variable::n());
        let half = Arc::new(ComplexityExpression::constant(2.0));
        let result = substitute(&expr, &Variable::n(), &half);
        assert!(matches!(result.kind(), ComplexityKind::Binary(..)));
    }

    #[test]
    fn leaves_unrelated_variable_untouched() {
        let other = Variable::new("m", crate::variable::VariableRole::SecondarySize);
        let expr = ComplexityExpression::var(other.clone());
        let replacement = Arc::new(ComplexityExpression::constant(1.0));
        let result = substitute(&expr, &Variable::n(), &replacement);
        assert_eq!(result, expr);
        assert!(matches!(result.kind(), ComplexityKind::Var(v) if *v == other));
    }
}
