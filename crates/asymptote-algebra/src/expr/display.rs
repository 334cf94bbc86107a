//! Big-O/Θ rendering (§4.1 "Rendering").
//!
//! Big-O notation drops constant multipliers by definition, so every
//! coefficient and amortized/worst-case pairing collapses to its dominant
//! shape here — `to_big_o` is lossy with respect to [`std::fmt::Debug`] by
//! design.

use std::fmt;

use super::{BinaryOp, ComplexityExpression, ComplexityKind};

/// Render `expr` as a conventional big-O string, e.g. `O(n log n)`.
#[must_use]
pub fn to_big_o(expr: &ComplexityExpression) -> String {
    format!("O({})", render(expr))
}

fn render(expr: &ComplexityExpression) -> String {
    match expr.kind() {
        ComplexityKind::Const(_) => "1".to_owned(),
        ComplexityKind::Var(v) | ComplexityKind::Linear(_, v) => v.name().to_owned(),
        ComplexityKind::Poly(v, poly) => render_degree(v.name(), f64::from(poly.degree().unwrap_or(0))),
        ComplexityKind::Log(_, v, _) => format!("log {}", v.name()),
        ComplexityKind::PolyLog(k, j, v) => render_poly_log(v.name(), *k, *j),
        ComplexityKind::Exp(base, v, _) => format!("{base}^{}", v.name()),
        ComplexityKind::Factorial(v, _) => format!("{}!", v.name()),
        ComplexityKind::Power(base_expr, exponent) => render_degree(&render(base_expr), *exponent),
        ComplexityKind::LogOf(inner, _) => format!("log({})", render(inner)),
        ComplexityKind::ExpOf(base, inner) => format!("{base}^({})", render(inner)),
        ComplexityKind::FactorialOf(inner) => format!("({})!", render(inner)),
        ComplexityKind::Binary(left, op, right) => render_binary(left, *op, right),
        ComplexityKind::Conditional(description, then_expr, else_expr) => {
            format!("{} if {description} else {}", render(then_expr), render(else_expr))
        }
        ComplexityKind::Recurrence(data) => format!("T({})", data.variable.name()),
        ComplexityKind::Amortized(amortized, _worst) => format!("{} amortized", render(amortized)),
        ComplexityKind::Parallel(data) => {
            format!("work {}, span {}", render(&data.work), render(&data.span))
        }
        ComplexityKind::Memory(data) => render(&data.total),
        ComplexityKind::Probabilistic(data) => format!("{} expected", render(&data.expected)),
    }
}

fn render_degree(base: &str, degree: f64) -> String {
    if degree == 0.0 {
        "1".to_owned()
    } else if degree == 1.0 {
        base.to_owned()
    } else {
        format!("{base}^{degree}")
    }
}

fn render_poly_log(name: &str, k: f64, j: u32) -> String {
    let poly_part = if k == 0.0 { String::new() } else { render_degree(name, k) };
    let log_part = match j {
        0 => String::new(),
        1 => format!("log {name}"),
        _ => format!("log^{j} {name}"),
    };
    match (poly_part.is_empty(), log_part.is_empty()) {
        (true, true) => "1".to_owned(),
        (true, false) => log_part,
        (false, true) => poly_part,
        (false, false) => format!("{poly_part} {log_part}"),
    }
}

fn render_binary(left: &ComplexityExpression, op: BinaryOp, right: &ComplexityExpression) -> String {
    let l = render(left);
    let r = render(right);
    match op {
        BinaryOp::Add => format!("{l} + {r}"),
        BinaryOp::Mul => format!("{l} {r}"),
        BinaryOp::Max => format!("max({l}, {r})"),
        BinaryOp::Min => format!("min({l}, {r})"),
    }
}

impl fmt::Display for ComplexityExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", to_big_o(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::Variable;
    use std::sync::Arc;

    #[test]
    fn constant_renders_as_o_one() {
        assert_eq!(to_big_o(&ComplexityExpression::constant(5.0)), "O(1)");
    }

    #[test]
    fn n_log_n_renders_conventionally() {
        let n_log_n = ComplexityExpression::mul(
            Arc::new(ComplexityExpression::var(Variable::n())),
            Arc::new(ComplexityExpression::log(1.0, Variable::n(), 2.0)),
        );
        assert_eq!(to_big_o(&n_log_n), "O(n log n)");
    }

    #[test]
    fn square_renders_with_caret() {
        let squared = ComplexityExpression::poly(Variable::n(), crate::poly::Polynomial::monomial(2, 1.0));
        assert_eq!(to_big_o(&squared), "O(n^2)");
    }

    #[test]
    fn factorial_renders_with_bang() {
        assert_eq!(to_big_o(&ComplexityExpression::factorial(Variable::n(), 1.0)), "O(n!)");
    }
}
