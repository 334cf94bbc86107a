//! The individual rewrite rules applied by [`super::normalize`], grounded on
//! the ancestor's `simplification::rules::Rule` trait: each rule has a name
//! and a priority and is tried independently at every node.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::expr::{big_o_cmp, BinaryOp, ComplexityExpression, ComplexityKind};
use crate::variable::Variable;

use super::{flatten, fold};

/// A single canonicalization rewrite, tried at every node during a
/// normalization pass.
pub trait Rule {
    /// The rule's name, used in diagnostics and for stable ordering.
    fn name(&self) -> &'static str;
    /// Lower numbers run first within a pass.
    fn priority(&self) -> i32;
    /// Attempt the rewrite; `None` means the rule does not apply here.
    fn apply(&self, expr: &ComplexityExpression) -> Option<ComplexityExpression>;
}

/// Build the default rule set, ordered by priority.
pub(super) fn default_registry() -> Vec<Box<dyn Rule>> {
    let mut rules: Vec<Box<dyn Rule>> = vec![
        Box::new(AddChainRule),
        Box::new(MulChainRule),
        Box::new(MaxMinRule),
    ];
    rules.sort_by_key(|r| r.priority());
    rules
}

/// Rules 1 (flatten `+`), 2 (sort), 3 (absorb `e+0`), 4 (combine constants),
/// 5 (asymptotic dominance).
struct AddChainRule;

impl Rule for AddChainRule {
    fn name(&self) -> &'static str {
        "add-chain"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn apply(&self, expr: &ComplexityExpression) -> Option<ComplexityExpression> {
        if !matches!(expr.kind(), ComplexityKind::Binary(_, BinaryOp::Add, _)) {
            return None;
        }
        let terms = flatten(expr, BinaryOp::Add);
        let reduced = reduce_add(terms);
        let rebuilt = fold(reduced, BinaryOp::Add);
        if rebuilt == *expr {
            None
        } else {
            Some(rebuilt)
        }
    }
}

fn reduce_add(terms: Vec<Arc<ComplexityExpression>>) -> Vec<Arc<ComplexityExpression>> {
    let mut constant_sum = 0.0_f64;
    let mut rest: Vec<Arc<ComplexityExpression>> = Vec::new();

    for term in terms {
        if let ComplexityKind::Const(k) = term.kind() {
            constant_sum += k;
        } else if !rest.iter().any(|existing| existing == &term) {
            rest.push(term);
        }
    }

    // Rule 5: drop any term strictly dominated by another.
    let mut keep = vec![true; rest.len()];
    for i in 0..rest.len() {
        for j in 0..rest.len() {
            if i == j || !keep[j] {
                continue;
            }
            if big_o_cmp(&rest[i], &rest[j]) == Some(Ordering::Less) {
                keep[i] = false;
                break;
            }
        }
    }
    let mut reduced: Vec<Arc<ComplexityExpression>> = rest
        .into_iter()
        .zip(keep)
        .filter_map(|(term, k)| k.then_some(term))
        .collect();

    // A nonzero constant only survives if nothing else dominates it (rule
    // 5 applies to `Const` too: `1 + n` is just `O(n)`).
    if constant_sum > 0.0 {
        let constant = Arc::new(ComplexityExpression::constant(constant_sum));
        let dominated = reduced.iter().any(|term| big_o_cmp(&constant, term) == Some(Ordering::Less));
        if !dominated {
            reduced.push(constant);
        }
    }

    if reduced.is_empty() {
        reduced.push(Arc::new(ComplexityExpression::constant(0.0)));
    }

    crate::expr::sort_operands(&mut reduced);
    reduced
}

/// Rules 1 (flatten `×`), 2 (sort), 3 (absorb `e×1`, `e×0`), 4 (combine
/// constants), 6 (collapse same-variable powers), 7 (`Log × Log`
/// combination).
struct MulChainRule;

impl Rule for MulChainRule {
    fn name(&self) -> &'static str {
        "mul-chain"
    }

    fn priority(&self) -> i32 {
        20
    }

    fn apply(&self, expr: &ComplexityExpression) -> Option<ComplexityExpression> {
        if !matches!(expr.kind(), ComplexityKind::Binary(_, BinaryOp::Mul, _)) {
            return None;
        }
        let terms = flatten(expr, BinaryOp::Mul);
        let reduced = reduce_mul(terms);
        let rebuilt = fold(reduced, BinaryOp::Mul);
        if rebuilt == *expr {
            None
        } else {
            Some(rebuilt)
        }
    }
}

/// A factor broken down into its power-law shape over a single variable, so
/// same-variable factors can be combined by summing exponents (rule 6) and
/// log exponents (rule 7).
struct PowerLogFactor {
    variable: Variable,
    degree: f64,
    log_exponent: u32,
}

fn as_power_log_factor(expr: &ComplexityExpression) -> Option<(PowerLogFactor, f64)> {
    match expr.kind() {
        ComplexityKind::Var(v) => Some((
            PowerLogFactor { variable: v.clone(), degree: 1.0, log_exponent: 0 },
            1.0,
        )),
        ComplexityKind::Linear(c, v) => Some((
            PowerLogFactor { variable: v.clone(), degree: 1.0, log_exponent: 0 },
            *c,
        )),
        ComplexityKind::Log(c, v, _) => Some((
            PowerLogFactor { variable: v.clone(), degree: 0.0, log_exponent: 1 },
            *c,
        )),
        ComplexityKind::PolyLog(k, j, v) => Some((
            PowerLogFactor { variable: v.clone(), degree: *k, log_exponent: *j },
            1.0,
        )),
        _ => None,
    }
}

fn power_log_factor_to_expr(factor: PowerLogFactor) -> ComplexityExpression {
    match (factor.degree, factor.log_exponent) {
        (d, 0) if d == 1.0 => ComplexityExpression::var(factor.variable),
        (d, 0) => ComplexityExpression::poly_log(d, 0, factor.variable),
        (d, j) => ComplexityExpression::poly_log(d, j, factor.variable),
    }
}

fn reduce_mul(terms: Vec<Arc<ComplexityExpression>>) -> Vec<Arc<ComplexityExpression>> {
    let mut constant_product = 1.0_f64;
    let mut power_log: std::collections::HashMap<String, (PowerLogFactor, f64)> =
        std::collections::HashMap::new();
    let mut other: Vec<Arc<ComplexityExpression>> = Vec::new();

    for term in terms {
        match term.kind() {
            ComplexityKind::Const(k) => constant_product *= k,
            _ => {
                if let Some((factor, coef)) = as_power_log_factor(&term) {
                    constant_product *= coef;
                    let key = format!("{}:{}", factor.variable.name(), factor.variable.role());
                    power_log
                        .entry(key)
                        .and_modify(|(existing, _)| {
                            existing.degree += factor.degree;
                            existing.log_exponent += factor.log_exponent;
                        })
                        .or_insert((factor, 1.0));
                } else {
                    other.push(term);
                }
            }
        }
    }

    if constant_product == 0.0 {
        return vec![Arc::new(ComplexityExpression::constant(0.0))];
    }

    let mut result: Vec<Arc<ComplexityExpression>> = power_log
        .into_values()
        .map(|(factor, _)| Arc::new(power_log_factor_to_expr(factor)))
        .collect();
    result.extend(other);

    if (constant_product - 1.0).abs() > f64::EPSILON {
        result.push(Arc::new(ComplexityExpression::constant(constant_product)));
    }
    if result.is_empty() {
        result.push(Arc::new(ComplexityExpression::constant(1.0)));
    }

    crate::expr::sort_operands(&mut result);
    result
}

/// Rule 3's `max`/`min` cases: `max(e, e) → e`, `min(e, e) → e`,
/// `max(e, 0) → e`.
struct MaxMinRule;

impl Rule for MaxMinRule {
    fn name(&self) -> &'static str {
        "max-min-identity"
    }

    fn priority(&self) -> i32 {
        5
    }

    fn apply(&self, expr: &ComplexityExpression) -> Option<ComplexityExpression> {
        let ComplexityKind::Binary(left, op, right) = expr.kind() else {
            return None;
        };
        match op {
            BinaryOp::Max | BinaryOp::Min => {
                if left == right {
                    return Some((**left).clone());
                }
                if *op == BinaryOp::Max {
                    if matches!(right.kind(), ComplexityKind::Const(k) if *k == 0.0) {
                        return Some((**left).clone());
                    }
                    if matches!(left.kind(), ComplexityKind::Const(k) if *k == 0.0) {
                        return Some((**right).clone());
                    }
                    if let Some(ordering) = big_o_cmp(left, right) {
                        return Some(match ordering {
                            Ordering::Less => (**right).clone(),
                            Ordering::Greater | Ordering::Equal => (**left).clone(),
                        });
                    }
                }
                None
            }
            BinaryOp::Add | BinaryOp::Mul => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_of_equal_operands_collapses() {
        let n = ComplexityExpression::var(Variable::n());
        let expr = ComplexityExpression::max_of(Arc::new(n.clone()), Arc::new(n.clone()));
        assert_eq!(MaxMinRule.apply(&expr), Some(n));
    }
}
