//! Memory/allocation tracking (§4.3.4): recording allocation sites inside a
//! procedure's body and folding them into a [`MemoryData`] bound.

use std::sync::Arc;

use asymptote_algebra::{AllocationSite, ComplexityExpression, MemoryData};

use crate::adapter::{ExprKind, HostExpr, HostSymbol};

use super::context::AnalysisContext;

/// `true` if `expr` is a recognized allocation site: an explicit
/// object-creation expression, or a call whose name suggests one (`new`,
/// `alloc`, `clone`, `copy`) for host languages that surface allocation as
/// a static method rather than a dedicated syntax.
fn is_allocation_site<E: HostExpr>(expr: &E) -> bool {
    if matches!(expr.kind(), ExprKind::ObjectCreation) {
        return true;
    }
    matches!(expr.kind(), ExprKind::Call)
        && expr.call_method_name().is_some_and(|method| {
            let lower = method.to_ascii_lowercase();
            lower.contains("new") || lower.contains("alloc") || lower.contains("clone") || lower.contains("copy")
        })
}

/// The size of a single allocation at `expr`: proportional to a known
/// parameter if one of the constructor's arguments names it directly (e.g.
/// `new int[n]`), `O(1)` otherwise.
fn allocation_size<E: HostExpr>(expr: &E, ctx: &AnalysisContext) -> ComplexityExpression {
    for child in expr.children() {
        if let Some(variable) = child.resolved_symbol().and_then(|symbol| ctx.variable_for(symbol.name())) {
            return ComplexityExpression::var(variable);
        }
    }
    ComplexityExpression::constant(1.0)
}

/// Record `expr` as an [`AllocationSite`] if it is one, scaled by the
/// context's current loop-nesting multiplier (§4.3.4: "`iterations`... the
/// enclosing loop's iteration count, or `Const(1)` outside any loop").
#[must_use]
pub fn record_allocation<E: HostExpr>(expr: &E, ctx: &AnalysisContext) -> Option<AllocationSite> {
    if !is_allocation_site(expr) {
        return None;
    }
    let size = Arc::new(allocation_size(expr, ctx));
    let iterations = Arc::new(ctx.current_loop_multiplier());
    Some(AllocationSite::new(size, iterations))
}

/// Fold every allocation site recorded during a procedure's walk into a
/// single [`MemoryData`] bound.
///
/// `recursion_depth` collapses to `O(1)` whenever `tail_recursive` is set,
/// since a syntactic tail call lets the host runtime reuse the current
/// stack frame instead of growing it (§4.3.4).
#[must_use]
pub fn summarize_memory(allocations: Vec<AllocationSite>, recursion_depth: Arc<ComplexityExpression>, tail_recursive: bool) -> MemoryData {
    let stack = if tail_recursive { Arc::new(ComplexityExpression::constant(1.0)) } else { recursion_depth };

    let heap = allocations.iter().fold(Arc::new(ComplexityExpression::constant(0.0)), |acc, site| {
        let contribution = Arc::new(ComplexityExpression::mul(Arc::clone(&site.size), Arc::clone(&site.iterations)));
        Arc::new(ComplexityExpression::add(acc, contribution))
    });

    let auxiliary = Arc::new(ComplexityExpression::constant(1.0));
    let in_place = allocations.is_empty();
    let total = Arc::new(ComplexityExpression::add(Arc::new(ComplexityExpression::add(Arc::clone(&stack), Arc::clone(&heap))), Arc::clone(&auxiliary)));

    MemoryData { total, stack, heap, auxiliary, in_place, tail_recursive, allocations }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::Parameter;
    use crate::extractor::test_support::MockExpr;

    #[test]
    fn object_creation_with_known_parameter_yields_proportional_size() {
        let ctx = AnalysisContext::new(&[Parameter { name: "n".to_owned(), type_name: None }]);
        let expr = MockExpr { kind: ExprKind::ObjectCreation, children: vec![MockExpr::var("n")], ..Default::default() };
        let site = record_allocation(&expr, &ctx).expect("expected an allocation site");
        assert_eq!(asymptote_algebra::to_big_o(&site.size), "O(n)");
        assert_eq!(asymptote_algebra::to_big_o(&site.iterations), "O(1)");
    }

    #[test]
    fn non_allocation_expression_is_not_recorded() {
        let ctx = AnalysisContext::new(&[]);
        let expr = MockExpr::var("x");
        assert!(record_allocation(&expr, &ctx).is_none());
    }

    #[test]
    fn tail_recursive_summary_collapses_stack_to_constant() {
        let depth = Arc::new(ComplexityExpression::var(asymptote_algebra::Variable::n()));
        let summary = summarize_memory(Vec::new(), depth, true);
        assert_eq!(asymptote_algebra::to_big_o(&summary.stack), "O(1)");
        assert!(summary.in_place);
    }

    #[test]
    fn non_tail_recursive_summary_keeps_recursion_depth_as_stack() {
        let depth = Arc::new(ComplexityExpression::var(asymptote_algebra::Variable::n()));
        let summary = summarize_memory(Vec::new(), Arc::clone(&depth), false);
        assert_eq!(asymptote_algebra::to_big_o(&summary.stack), "O(n)");
    }
}
