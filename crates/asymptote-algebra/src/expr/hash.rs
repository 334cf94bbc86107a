//! Structural hashing for [`super::ComplexityKind`].
//!
//! Gives every [`super::ComplexityExpression`] a precomputed hash so
//! equality checks can reject unequal expressions in O(1) before falling
//! back to full structural comparison.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use super::ComplexityKind;

/// Compute the structural hash of a [`ComplexityKind`].
pub(super) fn compute_hash(kind: &ComplexityKind) -> u64 {
    let mut hasher = FxHasher::default();
    kind.hash(&mut hasher);
    hasher.finish()
}

impl Hash for ComplexityKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Const(k) => k.to_bits().hash(state),
            Self::Var(v) => v.hash(state),
            Self::Linear(c, v) => {
                c.to_bits().hash(state);
                v.hash(state);
            }
            Self::Poly(v, poly) => {
                v.hash(state);
                for &(degree, coef) in poly.terms() {
                    degree.hash(state);
                    coef.to_bits().hash(state);
                }
            }
            Self::Log(c, v, base) => {
                c.to_bits().hash(state);
                v.hash(state);
                base.to_bits().hash(state);
            }
            Self::PolyLog(k, j, v) => {
                k.to_bits().hash(state);
                j.hash(state);
                v.hash(state);
            }
            Self::Exp(base, v, coef) => {
                base.to_bits().hash(state);
                v.hash(state);
                coef.to_bits().hash(state);
            }
            Self::Factorial(v, coef) => {
                v.hash(state);
                coef.to_bits().hash(state);
            }
            Self::Power(base, exponent) => {
                base.hash(state);
                exponent.to_bits().hash(state);
            }
            Self::LogOf(expr, base) => {
                expr.hash(state);
                base.to_bits().hash(state);
            }
            Self::ExpOf(base, expr) => {
                base.to_bits().hash(state);
                expr.hash(state);
            }
            Self::FactorialOf(expr) => expr.hash(state),
            Self::Binary(left, op, right) => {
                left.hash(state);
                op.hash(state);
                right.hash(state);
            }
            Self::Conditional(description, then_expr, else_expr) => {
                description.hash(state);
                then_expr.hash(state);
                else_expr.hash(state);
            }
            Self::Recurrence(data) => {
                data.variable.hash(state);
                data.non_recursive_work.hash(state);
                data.base.map(f64::to_bits).hash(state);
                for term in &data.terms {
                    term.coefficient.to_bits().hash(state);
                    term.scale_factor.to_bits().hash(state);
                    term.argument_expression.hash(state);
                }
            }
            Self::Amortized(amortized, worst) => {
                amortized.hash(state);
                worst.hash(state);
            }
            Self::Parallel(data) => {
                data.work.hash(state);
                data.span.hash(state);
                data.pattern.hash(state);
                data.is_task_based.hash(state);
                data.has_sync.hash(state);
            }
            Self::Memory(data) => {
                data.total.hash(state);
                data.stack.hash(state);
                data.heap.hash(state);
                data.auxiliary.hash(state);
                data.in_place.hash(state);
                data.tail_recursive.hash(state);
                data.allocations.len().hash(state);
                for site in &data.allocations {
                    site.size.hash(state);
                    site.iterations.hash(state);
                }
            }
            Self::Probabilistic(data) => {
                data.expected.hash(state);
                data.worst.hash(state);
                data.source.hash(state);
                data.distribution.hash(state);
                data.assumptions.hash(state);
            }
        }
    }
}
