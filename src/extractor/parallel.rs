//! Parallel work/span detection (§4.3.4): recognizing `Parallel.For`-style
//! constructs and `await`-based fan-out, and deriving a [`ParallelData`]
//! work/span bound from the detected pattern.

use std::sync::Arc;

use asymptote_algebra::{ComplexityExpression, ParallelData, ParallelPattern};

use crate::adapter::{ExprKind, HostExpr, HostSymbol, Statement, StatementKind};

/// Classify a statement's parallel pattern from its syntactic shape.
///
/// `Await`-kind statements are [`ParallelPattern::SequentialAwait`] unless
/// their expression is a recognized `Task.WhenAll`/`await_all`-style call,
/// in which case they fan out as [`ParallelPattern::TaskAwaitAll`]. Any
/// other [`StatementKind::ParallelConstruct`] defaults to
/// [`ParallelPattern::ParallelFor`]; a caller that recognizes a tree-shaped
/// reduction body should override this with
/// [`ParallelPattern::ParallelReduction`] directly, since that distinction
/// depends on the body's own shape, not the construct statement alone.
#[must_use]
pub fn classify_pattern<S: Statement>(stmt: &S) -> ParallelPattern {
    match stmt.kind() {
        StatementKind::Await => {
            if stmt.expression().is_some_and(|expr| is_await_all_call(&expr)) {
                ParallelPattern::TaskAwaitAll
            } else {
                ParallelPattern::SequentialAwait
            }
        }
        _ => ParallelPattern::ParallelFor,
    }
}

fn is_await_all_call<E: HostExpr>(expr: &E) -> bool {
    matches!(expr.kind(), ExprKind::Call)
        && expr.call_method_name().is_some_and(|method| {
            let lower = method.to_ascii_lowercase();
            lower.contains("whenall") || lower.contains("await_all") || lower.contains("waitall")
        })
}

fn is_sync_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.contains("lock") || lower.contains("mutex") || lower.contains("interlocked") || lower.contains("concurrent") || lower.contains("synchronized")
}

/// `true` if any identifier or call reachable from `expr` names a
/// synchronization primitive (`lock`, `mutex`, `interlocked`, `concurrent`,
/// `synchronized`), used to flag [`ParallelData::has_sync`].
#[must_use]
pub fn detect_sync<E: HostExpr>(expr: &E) -> bool {
    if expr.resolved_symbol().is_some_and(|symbol| is_sync_name(symbol.name())) {
        return true;
    }
    if expr.call_method_name().is_some_and(is_sync_name) {
        return true;
    }
    expr.children().iter().any(detect_sync)
}

/// Build a [`ParallelData`] bound for a detected parallel construct.
///
/// `work` is the total cost across every branch (`body_cost × iterations`,
/// same as a sequential loop would report). `span` is the critical-path
/// length: for a genuinely concurrent pattern that is just `body_cost`
/// (every branch runs at once), for a tree-shaped reduction it is
/// `body_cost × log(iterations)` (the reduction tree's depth), and for a
/// sequential await it equals `work` outright (§4.3.4: "span equals work"
/// for sequential awaits).
#[must_use]
pub fn analyze_parallel(pattern: ParallelPattern, body_cost: &Arc<ComplexityExpression>, iterations: &Arc<ComplexityExpression>, has_sync: bool) -> ParallelData {
    let work = Arc::new(ComplexityExpression::mul(Arc::clone(body_cost), Arc::clone(iterations)));
    let span = match pattern {
        ParallelPattern::SequentialAwait => Arc::clone(&work),
        ParallelPattern::ParallelFor | ParallelPattern::TaskAwaitAll => Arc::clone(body_cost),
        ParallelPattern::ParallelReduction => {
            let depth = Arc::new(ComplexityExpression::log_of(Arc::clone(iterations), 2.0));
            Arc::new(ComplexityExpression::mul(Arc::clone(body_cost), depth))
        }
    };
    let is_task_based = matches!(pattern, ParallelPattern::TaskAwaitAll | ParallelPattern::SequentialAwait);
    ParallelData::new(work, span, pattern, is_task_based, has_sync)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::test_support::{MockExpr, MockStmt};
    use asymptote_algebra::{Variable, VariableRole};

    fn n_expr() -> Arc<ComplexityExpression> {
        Arc::new(ComplexityExpression::var(Variable::new("n", VariableRole::InputSize)))
    }

    #[test]
    fn await_of_when_all_is_task_await_all() {
        let stmt = MockStmt { kind: StatementKind::Await, expression: Some(MockExpr::call("WhenAll", None, vec![])), ..Default::default() };
        assert_eq!(classify_pattern(&stmt), ParallelPattern::TaskAwaitAll);
    }

    #[test]
    fn plain_await_is_sequential() {
        let stmt = MockStmt { kind: StatementKind::Await, expression: Some(MockExpr::var("task")), ..Default::default() };
        assert_eq!(classify_pattern(&stmt), ParallelPattern::SequentialAwait);
    }

    #[test]
    fn sync_call_is_detected_through_nested_children() {
        let expr = MockExpr::call("body", None, vec![MockExpr::call("AcquireLock", None, vec![])]);
        assert!(detect_sync(&expr));
    }

    #[test]
    fn parallel_for_span_equals_body_cost_alone() {
        let body = n_expr();
        let iterations = n_expr();
        let data = analyze_parallel(ParallelPattern::ParallelFor, &body, &iterations, false);
        assert_eq!(asymptote_algebra::to_big_o(&data.work), "O(n n)");
        assert_eq!(asymptote_algebra::to_big_o(&data.span), "O(n)");
        assert!(!data.is_task_based);
    }

    #[test]
    fn sequential_await_span_equals_work() {
        let body = n_expr();
        let iterations = n_expr();
        let data = analyze_parallel(ParallelPattern::SequentialAwait, &body, &iterations, false);
        assert_eq!(data.span, data.work);
        assert!(data.is_task_based);
    }
}
