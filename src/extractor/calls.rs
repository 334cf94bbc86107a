//! Call resolution (§4.3): recognizing self-recursion, looking up an
//! already-analyzed sibling procedure's cached result, falling through to
//! the standard-library registry, and finally a name-based heuristic.

use std::sync::Arc;

use asymptote_algebra::{ComplexityExpression, Variable};
use asymptote_bcl::{Registry, Source};
use rustc_hash::FxHashMap;

use crate::adapter::{HostExpr, Procedure, SyntaxTree};
use crate::diagnostics::Diagnostic;

use super::context::{procedure_id, ProcedureId};

/// An index from a call's `(method name, argument count)` to the procedure
/// it resolves to, built once per syntax tree.
///
/// Keyed by name and arity alone, ignoring the declaring type: cross-type
/// method-name collisions are assumed rare enough within one syntax tree
/// that this index does not need a full type-aware overload resolution
/// pass, which the host adapter does not expose anyway.
pub struct CallIndex {
    by_signature: FxHashMap<(String, usize), ProcedureId>,
}

impl CallIndex {
    /// Build an index over every procedure declared in `tree`.
    #[must_use]
    pub fn build<T: SyntaxTree>(tree: &T) -> Self {
        let mut by_signature = FxHashMap::default();
        for proc in tree.procedures() {
            let key = (proc.name().to_owned(), proc.parameters().len());
            by_signature.entry(key).or_insert_with(|| procedure_id(&proc));
        }
        Self { by_signature }
    }

    /// Look up the procedure a `(method, arg_count)` call signature resolves
    /// to within this tree, if any.
    #[must_use]
    pub fn resolve(&self, method: &str, arg_count: usize) -> Option<&ProcedureId> {
        self.by_signature.get(&(method.to_owned(), arg_count))
    }
}

/// What a call expression resolved to.
#[derive(Debug, Clone)]
pub enum ResolvedCall {
    /// The call targets the procedure currently being walked; the extractor
    /// should feed this into recurrence formation rather than substituting
    /// a known cost.
    SelfRecursion,
    /// The call targets a procedure in the caller's own strongly connected
    /// component that has not finished analysis yet (mutual recursion).
    MutualRecursion,
    /// A cost was found, either from an already-analyzed sibling procedure,
    /// the standard-library registry, or a name-based heuristic.
    Known(Arc<ComplexityExpression>),
}

/// Resolve one call expression's cost.
///
/// Tries, in order: self-recursion, mutual recursion within the caller's
/// own SCC, a cached cost for an already-analyzed sibling procedure, a BCL
/// registry lookup, and a name-based heuristic, before giving up with a
/// conservative `O(input)` default (§4.3 "Order of attempts").
#[must_use]
pub fn resolve_call<E: HostExpr>(
    call_expr: &E,
    current: &ProcedureId,
    index: &CallIndex,
    cache: &FxHashMap<ProcedureId, Arc<ComplexityExpression>>,
    current_scc: &[ProcedureId],
    registry: &Registry,
    input_variable: &Variable,
) -> (ResolvedCall, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let method = call_expr.call_method_name();
    let arg_count = call_expr.call_arg_count();

    if let (Some(method), Some(arg_count)) = (method, arg_count) {
        if let Some(target) = index.resolve(method, arg_count) {
            if target == current {
                return (ResolvedCall::SelfRecursion, diagnostics);
            }
            if let Some(cost) = cache.get(target) {
                return (ResolvedCall::Known(Arc::clone(cost)), diagnostics);
            }
            if current_scc.contains(target) {
                return (ResolvedCall::MutualRecursion, diagnostics);
            }
            diagnostics.push(Diagnostic::structural(format!(
                "internal call to `{method}` resolved to a procedure with no cached result yet"
            )));
        }
    }

    if let (Some(declaring_type), Some(method), Some(arg_count)) = (call_expr.resolved_type_name(), method, arg_count) {
        let arity = i32::try_from(arg_count).unwrap_or(asymptote_bcl::ANY_ARITY);
        let mapping = registry.lookup(declaring_type, method, arity, input_variable.clone());
        if mapping.source() != Source::Heuristic {
            return (ResolvedCall::Known(Arc::clone(mapping.complexity())), diagnostics);
        }
    }

    if let Some(heuristic) = method.and_then(|name| heuristic_by_name(name, input_variable)) {
        diagnostics.push(Diagnostic::structural(format!(
            "call to `{}` had no internal or BCL resolution; applying a name-based heuristic",
            method.unwrap_or("<unknown>")
        )));
        return (ResolvedCall::Known(Arc::new(heuristic)), diagnostics);
    }

    diagnostics.push(Diagnostic::structural("call could not be resolved to any known cost; defaulting to O(input)"));
    (ResolvedCall::Known(Arc::new(ComplexityExpression::var(input_variable.clone()))), diagnostics)
}

/// A conservative guess at a call's cost from its method name alone, used
/// only when neither internal resolution nor the BCL registry produced
/// anything (§4.2 "Unknown method fallback").
fn heuristic_by_name(method: &str, variable: &Variable) -> Option<ComplexityExpression> {
    let lower = method.to_ascii_lowercase();
    if lower.contains("sort") {
        Some(ComplexityExpression::poly_log(1.0, 1, variable.clone()))
    } else if lower.contains("search") || lower.contains("find") || lower.contains("lookup") {
        Some(ComplexityExpression::poly_log(0.0, 1, variable.clone()))
    } else if lower.contains("hash") {
        Some(ComplexityExpression::constant(1.0))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::Parameter;
    use crate::extractor::test_support::{MockExpr, MockProc, MockTree};
    use asymptote_algebra::VariableRole;

    fn input_variable() -> Variable {
        Variable::new("n", VariableRole::InputSize)
    }

    #[test]
    fn call_to_self_is_recognized_as_self_recursion() {
        let proc = MockProc::new("fib", vec![Parameter { name: "n".to_owned(), type_name: None }], None);
        let tree = MockTree { procedures: vec![proc.clone()] };
        let index = CallIndex::build(&tree);
        let current = procedure_id(&proc);
        let call = MockExpr::call("fib", None, vec![MockExpr::var("n")]);
        let cache = FxHashMap::default();
        let (resolved, diagnostics) = resolve_call(&call, &current, &index, &cache, &[], &asymptote_bcl::DEFAULT_REGISTRY, &input_variable());
        assert!(matches!(resolved, ResolvedCall::SelfRecursion));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn call_to_cached_sibling_returns_its_cost() {
        let caller = MockProc::new("outer", vec![Parameter { name: "n".to_owned(), type_name: None }], None);
        let callee = MockProc::new("helper", vec![Parameter { name: "n".to_owned(), type_name: None }], None);
        let tree = MockTree { procedures: vec![caller.clone(), callee.clone()] };
        let index = CallIndex::build(&tree);
        let current = procedure_id(&caller);
        let callee_id = procedure_id(&callee);
        let mut cache = FxHashMap::default();
        cache.insert(callee_id, Arc::new(ComplexityExpression::constant(1.0)));
        let call = MockExpr::call("helper", None, vec![MockExpr::var("n")]);
        let (resolved, _) = resolve_call(&call, &current, &index, &cache, &[], &asymptote_bcl::DEFAULT_REGISTRY, &input_variable());
        match resolved {
            ResolvedCall::Known(cost) => assert_eq!(asymptote_algebra::to_big_o(&cost), "O(1)"),
            other => panic!("expected a known cost, got {other:?}"),
        }
    }

    #[test]
    fn unresolvable_sort_call_uses_name_heuristic() {
        let proc = MockProc::new("caller", vec![Parameter { name: "n".to_owned(), type_name: None }], None);
        let tree = MockTree { procedures: vec![proc.clone()] };
        let index = CallIndex::build(&tree);
        let current = procedure_id(&proc);
        let call = MockExpr::call("QuickSort", Some("MyNamespace.Widget"), vec![MockExpr::var("n")]);
        let cache = FxHashMap::default();
        let (resolved, diagnostics) = resolve_call(&call, &current, &index, &cache, &[], &asymptote_bcl::DEFAULT_REGISTRY, &input_variable());
        match resolved {
            ResolvedCall::Known(cost) => assert_eq!(asymptote_algebra::to_big_o(&cost), "O(n log n)"),
            other => panic!("expected a known cost, got {other:?}"),
        }
        assert_eq!(diagnostics.len(), 1);
    }
}
