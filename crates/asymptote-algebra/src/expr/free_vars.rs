//! Free-variable collection (§4.1).

use rustc_hash::FxHashSet;

use crate::variable::Variable;

use super::{ComplexityExpression, ComplexityKind};

/// The set of variables `expr` depends on.
///
/// A [`ComplexityKind::Recurrence`] binds its own variable: that variable is
/// excluded from the result even though it appears throughout the
/// recurrence's terms and non-recursive work, matching §3's invariant (d).
#[must_use]
pub fn free_variables(expr: &ComplexityExpression) -> FxHashSet<Variable> {
    let mut out = FxHashSet::default();
    collect(expr, &mut out);
    out
}

fn collect(expr: &ComplexityExpression, out: &mut FxHashSet<Variable>) {
    match expr.kind() {
        ComplexityKind::Const(_) => {}
        ComplexityKind::Var(v)
        | ComplexityKind::Linear(_, v)
        | ComplexityKind::Poly(v, _)
        | ComplexityKind::Log(_, v, _)
        | ComplexityKind::PolyLog(_, _, v)
        | ComplexityKind::Exp(_, v, _)
        | ComplexityKind::Factorial(v, _) => {
            out.insert(v.clone());
        }
        ComplexityKind::Power(base, _) | ComplexityKind::LogOf(base, _) | ComplexityKind::ExpOf(_, base) | ComplexityKind::FactorialOf(base) => {
            collect(base, out);
        }
        ComplexityKind::Binary(left, _, right) => {
            collect(left, out);
            collect(right, out);
        }
        ComplexityKind::Conditional(_, then_expr, else_expr) => {
            collect(then_expr, out);
            collect(else_expr, out);
        }
        ComplexityKind::Recurrence(data) => {
            let mut bound = FxHashSet::default();
            collect(&data.non_recursive_work, &mut bound);
            for term in &data.terms {
                collect(&term.argument_expression, &mut bound);
            }
            bound.remove(&data.variable);
            out.extend(bound);
        }
        ComplexityKind::Amortized(amortized, worst) => {
            collect(amortized, out);
            collect(worst, out);
        }
        ComplexityKind::Parallel(data) => {
            collect(&data.work, out);
            collect(&data.span, out);
        }
        ComplexityKind::Memory(data) => {
            collect(&data.total, out);
            collect(&data.stack, out);
            collect(&data.heap, out);
            collect(&data.auxiliary, out);
            for site in &data.allocations {
                collect(&site.size, out);
                collect(&site.iterations, out);
            }
        }
        ComplexityKind::Probabilistic(data) => {
            collect(&data.expected, out);
            collect(&data.worst, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::VariableRole;
    use std::sync::Arc;

    #[test]
    fn recurrence_excludes_its_own_bound_variable() {
        let n = Variable::n();
        let m = Variable::new("m", VariableRole::SecondarySize);
        let term = super::super::RecurrenceTerm::new(
            2.0,
            0.5,
            Arc::new(ComplexityExpression::var(n.clone())),
        );
        let data = super::super::RecurrenceData {
            terms: vec![term],
            variable: n.clone(),
            non_recursive_work: Arc::new(ComplexityExpression::var(m.clone())),
            base: Some(1.0),
        };
        let expr = ComplexityExpression::recurrence(data);
        let vars = free_variables(&expr);
        assert!(!vars.contains(&n));
        assert!(vars.contains(&m));
    }
}
