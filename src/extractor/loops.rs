//! Loop-bound analysis (§4.3.1): classifying a loop's step as additive or
//! multiplicative and deriving the expression that counts its iterations.

use std::sync::Arc;

use asymptote_algebra::{ComplexityExpression, Variable};

use crate::adapter::{ArithmeticOperator, ExprKind, HostExpr, HostSymbol, Statement};
use crate::diagnostics::Diagnostic;

use super::context::AnalysisContext;

/// How a loop's induction variable advances each iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStepKind {
    /// Advances by a fixed additive amount (`i++`, `i += k`, `i--`): the body
    /// runs a number of times proportional to the bound itself.
    Linear,
    /// Advances by a fixed multiplicative or divisive factor (`i *= 2`,
    /// `i /= 2`): the body runs a number of times proportional to the
    /// logarithm of the bound.
    Logarithmic,
    /// No step expression could be classified; treated conservatively as
    /// [`Self::Linear`] so an unrecognized loop never understates its cost.
    Unknown,
}

/// A loop's derived iteration-count bound and step classification.
#[derive(Debug, Clone)]
pub struct LoopBound {
    /// The number of times the loop body executes.
    pub iterations: Arc<ComplexityExpression>,
    /// How the induction variable advances.
    pub step_kind: LoopStepKind,
}

/// Derive `stmt`'s iteration-count bound, classifying its step expression and
/// walking its condition for a referenced parameter variable.
pub fn analyze_loop<S: Statement>(stmt: &S, ctx: &AnalysisContext) -> (LoopBound, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();

    let step_kind = stmt.loop_step().map_or(LoopStepKind::Unknown, |step| classify_step(&step));

    let bound_variable = stmt.loop_condition().and_then(|condition| find_bound_variable(&condition, ctx));

    let variable = if let Some(variable) = bound_variable {
        variable
    } else {
        diagnostics.push(Diagnostic::structural(
            "loop condition did not reference a known parameter; defaulting to the procedure's primary variable",
        ));
        ctx.primary_variable.clone()
    };

    let iterations = match step_kind {
        LoopStepKind::Logarithmic => ComplexityExpression::poly_log(0.0, 1, variable),
        LoopStepKind::Linear | LoopStepKind::Unknown => ComplexityExpression::var(variable),
    };

    (LoopBound { iterations: Arc::new(iterations), step_kind }, diagnostics)
}

/// Classify a loop's step expression, looking one level into a top-level
/// assignment/binary-op node for its carried operator (covers both
/// `i = i * 2` and the already-compound `i *= 2` shapes).
fn classify_step<E: HostExpr>(step: &E) -> LoopStepKind {
    if let Some(kind) = step.arithmetic_operator().map(step_kind_of) {
        return kind;
    }
    step.children()
        .iter()
        .find_map(|child| child.arithmetic_operator())
        .map_or(LoopStepKind::Unknown, step_kind_of)
}

fn step_kind_of(operator: ArithmeticOperator) -> LoopStepKind {
    match operator {
        ArithmeticOperator::Multiply | ArithmeticOperator::Divide => LoopStepKind::Logarithmic,
        ArithmeticOperator::Add | ArithmeticOperator::Subtract => LoopStepKind::Linear,
        ArithmeticOperator::Modulo | ArithmeticOperator::Other => LoopStepKind::Unknown,
    }
}

/// Walk a loop condition depth-first looking for a reference to one of this
/// procedure's own declared parameters, used as the loop's iteration bound.
fn find_bound_variable<E: HostExpr>(expr: &E, ctx: &AnalysisContext) -> Option<Variable> {
    if matches!(expr.kind(), ExprKind::Identifier | ExprKind::MemberAccess) {
        if let Some(variable) = expr.resolved_symbol().and_then(|symbol| ctx.variable_for(symbol.name())) {
            return Some(variable);
        }
    }
    expr.children().iter().find_map(|child| find_bound_variable(child, ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::Parameter;
    use crate::extractor::test_support::MockExpr;

    fn ctx_with_n() -> AnalysisContext {
        AnalysisContext::new(&[Parameter { name: "n".to_owned(), type_name: None }])
    }

    #[test]
    fn additive_step_yields_linear_bound() {
        let ctx = ctx_with_n();
        let condition = MockExpr::binary(ArithmeticOperator::Other, MockExpr::var("i"), MockExpr::var("n"));
        let step = MockExpr::assignment(ArithmeticOperator::Add, MockExpr::var("i"), MockExpr::literal(1.0));
        let stmt = crate::extractor::test_support::MockStmt::loop_stmt(
            crate::extractor::test_support::MockStmt::expr_stmt(MockExpr::literal(0.0)),
            condition,
            step,
            crate::extractor::test_support::MockStmt::block(Vec::new()),
        );
        let (bound, diagnostics) = analyze_loop(&stmt, &ctx);
        assert_eq!(bound.step_kind, LoopStepKind::Linear);
        assert_eq!(asymptote_algebra::to_big_o(&bound.iterations), "O(n)");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn multiplicative_step_yields_logarithmic_bound() {
        let ctx = ctx_with_n();
        let condition = MockExpr::binary(ArithmeticOperator::Other, MockExpr::var("i"), MockExpr::var("n"));
        let step = MockExpr::assignment(ArithmeticOperator::Multiply, MockExpr::var("i"), MockExpr::literal(2.0));
        let stmt = crate::extractor::test_support::MockStmt::loop_stmt(
            crate::extractor::test_support::MockStmt::expr_stmt(MockExpr::literal(0.0)),
            condition,
            step,
            crate::extractor::test_support::MockStmt::block(Vec::new()),
        );
        let (bound, _) = analyze_loop(&stmt, &ctx);
        assert_eq!(bound.step_kind, LoopStepKind::Logarithmic);
        assert_eq!(asymptote_algebra::to_big_o(&bound.iterations), "O(log n)");
    }

    #[test]
    fn unresolvable_condition_defaults_to_primary_variable_with_diagnostic() {
        let ctx = ctx_with_n();
        let condition = MockExpr::binary(ArithmeticOperator::Other, MockExpr::var("i"), MockExpr::literal(10.0));
        let step = MockExpr::assignment(ArithmeticOperator::Add, MockExpr::var("i"), MockExpr::literal(1.0));
        let stmt = crate::extractor::test_support::MockStmt::loop_stmt(
            crate::extractor::test_support::MockStmt::expr_stmt(MockExpr::literal(0.0)),
            condition,
            step,
            crate::extractor::test_support::MockStmt::block(Vec::new()),
        );
        let (bound, diagnostics) = analyze_loop(&stmt, &ctx);
        assert_eq!(asymptote_algebra::to_big_o(&bound.iterations), "O(n)");
        assert_eq!(diagnostics.len(), 1);
    }
}
