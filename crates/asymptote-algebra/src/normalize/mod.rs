//! Canonical normalization (§4.1 "Normalization rules").
//!
//! A rule-registry fixed-point engine, the same shape as the ancestor's
//! `simplification::engine::Simplifier` + `simplification::rules::Rule`:
//! each numbered rewrite rule is its own [`Rule`] implementation, rules run
//! bottom-up on every node, and the whole pass repeats to a fixed point with
//! cycle detection guarding against a rule pair that oscillates.

mod rules;

use std::collections::HashSet;
use std::sync::Arc;

use crate::expr::{BinaryOp, ComplexityExpression, ComplexityKind};

pub use rules::Rule;

/// Normalization stops after this many whole-tree passes even if no fixed
/// point was reached, so a buggy or oscillating rule can never hang the
/// caller.
pub const MAX_ITERATIONS: usize = 64;

/// Rewrite `expr` to its canonical form by applying every registered rule
/// bottom-up to a fixed point (§4.1 rules 1–7).
#[must_use]
pub fn normalize(expr: &ComplexityExpression) -> ComplexityExpression {
    let registry = rules::default_registry();
    let mut current = expr.clone();
    let mut seen = HashSet::new();

    for _ in 0..MAX_ITERATIONS {
        if !seen.insert(hash_of(&current)) {
            break;
        }
        let next = apply_bottom_up(&current, &registry);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn hash_of(expr: &ComplexityExpression) -> u64 {
    use std::hash::{Hash, Hasher};
    let mut hasher = rustc_hash::FxHasher::default();
    expr.hash(&mut hasher);
    hasher.finish()
}

fn apply_bottom_up(expr: &ComplexityExpression, registry: &[Box<dyn Rule>]) -> ComplexityExpression {
    let recursed = recurse_children(expr, registry);
    apply_rules_once(&recursed, registry)
}

fn apply_rules_once(expr: &ComplexityExpression, registry: &[Box<dyn Rule>]) -> ComplexityExpression {
    let mut current = expr.clone();
    for rule in registry {
        if let Some(rewritten) = rule.apply(&current) {
            current = rewritten;
        }
    }
    current
}

fn recurse_children(expr: &ComplexityExpression, registry: &[Box<dyn Rule>]) -> ComplexityExpression {
    match expr.kind() {
        ComplexityKind::Const(_)
        | ComplexityKind::Var(_)
        | ComplexityKind::Linear(..)
        | ComplexityKind::Poly(..)
        | ComplexityKind::Log(..)
        | ComplexityKind::PolyLog(..)
        | ComplexityKind::Exp(..)
        | ComplexityKind::Factorial(..) => expr.clone(),
        ComplexityKind::Power(base, exponent) => {
            ComplexityExpression::power(child(base, registry), *exponent)
        }
        ComplexityKind::LogOf(inner, base) => ComplexityExpression::log_of(child(inner, registry), *base),
        ComplexityKind::ExpOf(base, inner) => ComplexityExpression::exp_of(*base, child(inner, registry)),
        ComplexityKind::FactorialOf(inner) => ComplexityExpression::factorial_of(child(inner, registry)),
        ComplexityKind::Binary(left, op, right) => {
            ComplexityExpression::binary(child(left, registry), *op, child(right, registry))
        }
        ComplexityKind::Conditional(description, then_expr, else_expr) => ComplexityExpression::conditional(
            description.as_ref(),
            child(then_expr, registry),
            child(else_expr, registry),
        ),
        ComplexityKind::Recurrence(data) => {
            let mut data = (**data).clone();
            data.non_recursive_work = child(&data.non_recursive_work, registry);
            for term in &mut data.terms {
                term.argument_expression = child(&term.argument_expression, registry);
            }
            ComplexityExpression::recurrence(data)
        }
        ComplexityKind::Amortized(amortized, worst) => {
            ComplexityExpression::amortized(child(amortized, registry), child(worst, registry))
        }
        ComplexityKind::Parallel(data) => {
            let mut data = (**data).clone();
            data.work = child(&data.work, registry);
            data.span = child(&data.span, registry);
            ComplexityExpression::parallel(data)
        }
        ComplexityKind::Memory(data) => {
            let mut data = (**data).clone();
            data.total = child(&data.total, registry);
            data.stack = child(&data.stack, registry);
            data.heap = child(&data.heap, registry);
            data.auxiliary = child(&data.auxiliary, registry);
            ComplexityExpression::memory(data)
        }
        ComplexityKind::Probabilistic(data) => {
            let mut data = (**data).clone();
            data.expected = child(&data.expected, registry);
            data.worst = child(&data.worst, registry);
            ComplexityExpression::probabilistic(data)
        }
    }
}

fn child(expr: &Arc<ComplexityExpression>, registry: &[Box<dyn Rule>]) -> Arc<ComplexityExpression> {
    Arc::new(apply_bottom_up(expr, registry))
}

/// Flatten a binary chain of the same associative operator into a flat
/// operand list, the first half of rule 1 ("flatten associative chains").
pub(crate) fn flatten(expr: &ComplexityExpression, op: BinaryOp) -> Vec<Arc<ComplexityExpression>> {
    match expr.kind() {
        ComplexityKind::Binary(left, actual_op, right) if *actual_op == op => {
            let mut terms = flatten(left, op);
            terms.extend(flatten(right, op));
            terms
        }
        _ => vec![Arc::new(expr.clone())],
    }
}

/// Fold a flat operand list back into a right-associated binary chain, the
/// second half of rule 1.
pub(crate) fn fold(mut terms: Vec<Arc<ComplexityExpression>>, op: BinaryOp) -> ComplexityExpression {
    match terms.len() {
        0 => ComplexityExpression::constant(if op == BinaryOp::Mul { 1.0 } else { 0.0 }),
        1 => (*terms.remove(0)).clone(),
        _ => {
            let first = terms.remove(0);
            let rest = fold(terms, op);
            ComplexityExpression::binary(first, op, Arc::new(rest))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::Variable;

    #[test]
    fn drops_additive_identity() {
        let n = ComplexityExpression::var(Variable::n());
        let sum = ComplexityExpression::add(Arc::new(n.clone()), Arc::new(ComplexityExpression::constant(0.0)));
        assert_eq!(normalize(&sum), n);
    }

    #[test]
    fn drops_multiplicative_identity() {
        let n = ComplexityExpression::var(Variable::n());
        let product = ComplexityExpression::mul(Arc::new(n.clone()), Arc::new(ComplexityExpression::constant(1.0)));
        assert_eq!(normalize(&product), n);
    }

    #[test]
    fn idempotent_on_already_normalized_input() {
        let n = ComplexityExpression::var(Variable::n());
        let once = normalize(&n);
        let twice = normalize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn drops_dominated_sum_operand() {
        let n = ComplexityExpression::var(Variable::n());
        let squared = ComplexityExpression::poly(Variable::n(), crate::poly::Polynomial::monomial(2, 1.0));
        let sum = ComplexityExpression::add(Arc::new(n), Arc::new(squared.clone()));
        assert_eq!(normalize(&sum), squared);
    }
}
