//! The big-O dominance ordering (§4.1) and the canonical sort key used by
//! [`crate::normalize`] to put commutative operands into deterministic order.

use std::cmp::Ordering;

use crate::variable::{Variable, VariableRole};

use super::{BinaryOp, ComplexityExpression, ComplexityKind};

/// The asymptotic growth class of an expression, abstracting away its exact
/// shape down to what the dominance ordering actually cares about.
///
/// `PolyFamily` covers everything from `Const` (degree 0, no log factor) up
/// through arbitrary polynomial-times-polylog terms; `Exponential` and
/// `Factorial` always dominate every `PolyFamily` term, and `Factorial`
/// always dominates every `Exponential` one, matching the total preorder in
/// §4.1: `Const < Log < PolyLog(0<k<1) < Linear < PolyLog(k=1,j>0) < Poly(2)
/// < … < Exp < Factorial`.
#[derive(Debug, Clone, Copy, PartialEq)]
enum GrowthClass {
    PolyFamily { degree: f64, log_exponent: u32 },
    Exponential { base: f64 },
    Factorial,
}

impl GrowthClass {
    fn rank_tuple(self) -> (u8, f64, u32, f64) {
        match self {
            Self::PolyFamily { degree, log_exponent } => (0, degree, log_exponent, 0.0),
            Self::Exponential { base } => (1, 0.0, 0, base),
            Self::Factorial => (2, 0.0, 0, 0.0),
        }
    }

    fn cmp_rank(self, other: Self) -> Ordering {
        self.rank_tuple()
            .partial_cmp(&other.rank_tuple())
            .unwrap_or(Ordering::Equal)
    }
}

fn growth_class(expr: &ComplexityExpression) -> Option<(GrowthClass, Option<Variable>)> {
    match expr.kind() {
        ComplexityKind::Const(_) => Some((GrowthClass::PolyFamily { degree: 0.0, log_exponent: 0 }, None)),
        ComplexityKind::Var(v) => Some((GrowthClass::PolyFamily { degree: 1.0, log_exponent: 0 }, Some(v.clone()))),
        ComplexityKind::Linear(_, v) => {
            Some((GrowthClass::PolyFamily { degree: 1.0, log_exponent: 0 }, Some(v.clone())))
        }
        ComplexityKind::Poly(v, poly) => Some((
            GrowthClass::PolyFamily {
                degree: f64::from(poly.degree().unwrap_or(0)),
                log_exponent: 0,
            },
            Some(v.clone()),
        )),
        ComplexityKind::Log(_, v, _) => {
            Some((GrowthClass::PolyFamily { degree: 0.0, log_exponent: 1 }, Some(v.clone())))
        }
        ComplexityKind::PolyLog(k, j, v) => {
            Some((GrowthClass::PolyFamily { degree: *k, log_exponent: *j }, Some(v.clone())))
        }
        ComplexityKind::Exp(base, v, _) => Some((GrowthClass::Exponential { base: *base }, Some(v.clone()))),
        ComplexityKind::Factorial(v, _) => Some((GrowthClass::Factorial, Some(v.clone()))),
        ComplexityKind::Power(base_expr, exponent) => {
            let (inner, var) = growth_class(base_expr)?;
            match inner {
                GrowthClass::PolyFamily { degree, log_exponent } => Some((
                    GrowthClass::PolyFamily {
                        degree: degree * exponent,
                        log_exponent: log_exponent.saturating_mul(exponent.max(0.0).round() as u32),
                    },
                    var,
                )),
                // Exponential/Factorial raised to a power remains in the same
                // dominance class (`(2^n)^2` is still purely exponential).
                other => Some((other, var)),
            }
        }
        ComplexityKind::LogOf(inner_expr, _) => {
            let (_, var) = growth_class(inner_expr)?;
            Some((GrowthClass::PolyFamily { degree: 0.0, log_exponent: 1 }, var))
        }
        ComplexityKind::ExpOf(base, inner_expr) => {
            let (_, var) = growth_class(inner_expr)?;
            Some((GrowthClass::Exponential { base: *base }, var))
        }
        ComplexityKind::FactorialOf(inner_expr) => {
            let (_, var) = growth_class(inner_expr)?;
            Some((GrowthClass::Factorial, var))
        }
        // Composite shapes (sums, conditionals, recurrences, sub-analysis
        // bundles) have no single growth class; dominance over them is left
        // to the caller, which retains both operands when unsure.
        _ => None,
    }
}

fn role_primacy(role: VariableRole) -> u8 {
    match role {
        VariableRole::SecondarySize => 1,
        VariableRole::Custom => 0,
        _ => 2,
    }
}

/// Compare two expressions by asymptotic dominance, for `+`-operand
/// dropping (§4.1 rule 5). Returns `None` when the two expressions are
/// asymptotically incomparable (e.g. `Linear(n)` vs `Linear(m)`), in which
/// case both operands must be retained.
#[must_use]
pub fn big_o_cmp(a: &ComplexityExpression, b: &ComplexityExpression) -> Option<Ordering> {
    let (class_a, var_a) = growth_class(a)?;
    let (class_b, var_b) = growth_class(b)?;

    let rank = class_a.cmp_rank(class_b);
    if rank != Ordering::Equal {
        return Some(rank);
    }

    match (var_a, var_b) {
        (None, None) => Some(Ordering::Equal),
        (Some(va), Some(vb)) if va == vb => Some(Ordering::Equal),
        (Some(va), Some(vb)) => {
            let primacy = role_primacy(va.role()).cmp(&role_primacy(vb.role()));
            if primacy == Ordering::Equal {
                None
            } else {
                Some(primacy)
            }
        }
        // One side is a bare constant (no variable) and the other has grown
        // to the same rank via a variable — treat the variable as dominant.
        (None, Some(_)) => Some(Ordering::Less),
        (Some(_), None) => Some(Ordering::Greater),
    }
}

/// Deterministic key used to sort the operands of a commutative operator
/// into canonical order (§4.1 rule 2): variant tag, then variable name, then
/// constant value.
fn sort_key(expr: &ComplexityExpression) -> (u8, String, u64) {
    let tag = match expr.kind() {
        ComplexityKind::Const(_) => 0,
        ComplexityKind::Var(_) => 1,
        ComplexityKind::Linear(..) => 2,
        ComplexityKind::Poly(..) => 3,
        ComplexityKind::Log(..) => 4,
        ComplexityKind::PolyLog(..) => 5,
        ComplexityKind::Exp(..) => 6,
        ComplexityKind::Factorial(..) => 7,
        ComplexityKind::Power(..) => 8,
        ComplexityKind::LogOf(..) => 9,
        ComplexityKind::ExpOf(..) => 10,
        ComplexityKind::FactorialOf(..) => 11,
        ComplexityKind::Binary(.., op, _) => match op {
            BinaryOp::Add => 12,
            BinaryOp::Mul => 13,
            BinaryOp::Max => 14,
            BinaryOp::Min => 15,
        },
        ComplexityKind::Conditional(..) => 16,
        ComplexityKind::Recurrence(_) => 17,
        ComplexityKind::Amortized(..) => 18,
        ComplexityKind::Parallel(_) => 19,
        ComplexityKind::Memory(_) => 20,
        ComplexityKind::Probabilistic(_) => 21,
    };
    let name = variable_of(expr).map(|v| v.name().to_owned()).unwrap_or_default();
    (tag, name, expr_hash(expr))
}

fn variable_of(expr: &ComplexityExpression) -> Option<Variable> {
    match expr.kind() {
        ComplexityKind::Var(v) | ComplexityKind::Linear(_, v) | ComplexityKind::Poly(v, _) | ComplexityKind::Log(_, v, _) | ComplexityKind::PolyLog(_, _, v) | ComplexityKind::Exp(_, v, _) | ComplexityKind::Factorial(v, _) => {
            Some(v.clone())
        }
        _ => None,
    }
}

fn expr_hash(expr: &ComplexityExpression) -> u64 {
    use std::hash::{Hash, Hasher};
    let mut hasher = rustc_hash::FxHasher::default();
    expr.hash(&mut hasher);
    hasher.finish()
}

/// Sort a list of commutative-operator operands into canonical order.
pub(crate) fn sort_operands(operands: &mut [std::sync::Arc<ComplexityExpression>]) {
    operands.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::Variable;
    use std::sync::Arc;

    #[test]
    fn const_dominated_by_linear() {
        let c = ComplexityExpression::constant(5.0);
        let l = ComplexityExpression::linear(1.0, Variable::n());
        assert_eq!(big_o_cmp(&c, &l), Some(Ordering::Less));
    }

    #[test]
    fn distinct_variables_of_equal_rank_are_incomparable() {
        let n = ComplexityExpression::var(Variable::n());
        let m = ComplexityExpression::var(Variable::new("m", VariableRole::InputSize));
        assert_eq!(big_o_cmp(&n, &m), None);
    }

    #[test]
    fn poly_dominates_linear_regardless_of_variable() {
        let linear = ComplexityExpression::linear(1.0, Variable::n());
        let poly = ComplexityExpression::poly(
            Variable::new("m", VariableRole::InputSize),
            crate::poly::Polynomial::monomial(2, 1.0),
        );
        assert_eq!(big_o_cmp(&linear, &poly), Some(Ordering::Less));
    }

    #[test]
    fn sort_is_deterministic() {
        let a = Arc::new(ComplexityExpression::constant(1.0));
        let b = Arc::new(ComplexityExpression::var(Variable::n()));
        let mut v1 = vec![a.clone(), b.clone()];
        let mut v2 = vec![b, a];
        sort_operands(&mut v1);
        sort_operands(&mut v2);
        assert_eq!(v1, v2);
    }
}
