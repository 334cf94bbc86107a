//! The AST-walking extraction engine (§4.3): composes a procedure's
//! complexity from its statements by delegating to the sub-walkers in this
//! module, driven bottom-up over the call graph so a callee's result is
//! always available before its callers are walked.

mod annotation;
mod calls;
mod context;
mod loops;
mod memory;
mod parallel;
mod probabilistic;
mod recurrence_formation;
#[cfg(test)]
mod test_support;

use std::sync::Arc;

use rustc_hash::FxHashMap;

use asymptote_algebra::{AllocationSite, ComplexityExpression, ParallelData, ProbabilisticData, Variable};
use asymptote_bcl::Registry;

use crate::adapter::{ExprKind, HostExpr, HostSymbol, Procedure, Statement, StatementKind, SyntaxTree};
use crate::call_graph::{CallGraph, NodeId};
use crate::confidence::{ConfidenceAssessment, ConfidenceFactors};
use crate::diagnostics::{Diagnostic, DiagnosticCategory, Severity};
use crate::recurrence::{self, Applicability, InductionCheck};
use crate::result::{ProcedureResult, RenderedComplexity};

pub use calls::{resolve_call, CallIndex, ResolvedCall};
pub use context::{procedure_id, AnalysisContext, ProcedureId};
pub use loops::{analyze_loop, LoopBound, LoopStepKind};
pub use memory::{record_allocation, summarize_memory};
pub use parallel::{analyze_parallel, classify_pattern as classify_parallel_pattern, detect_sync};
pub use probabilistic::{analyze_probabilistic, classify_source as classify_probabilistic_source};
pub use recurrence_formation::{choose_representative_component, classify_call_argument, form_recurrence, MutualRecurrenceSystem};

/// Read-only state a call or allocation needs to resolve against: which
/// procedure is currently being walked, the cross-procedure call index, the
/// already-solved sibling cache, the current strongly connected component
/// (for mutual-recursion detection), and the BCL registry.
struct ResolveContext<'a> {
    current: &'a ProcedureId,
    index: &'a CallIndex,
    cache: &'a FxHashMap<ProcedureId, Arc<ComplexityExpression>>,
    current_scc: &'a [ProcedureId],
    registry: &'a Registry,
}

/// Everything a statement walk accumulates as a side effect, alongside the
/// returned cost: diagnostics, recorded allocation sites, at most one
/// detected parallel/probabilistic pattern (first one found wins, since a
/// single procedure reports at most one of each per §6), and every
/// self/mutual-recursive call site found, paired with whether it sits in
/// syntactic tail position.
struct WalkAccumulator<E> {
    diagnostics: Vec<Diagnostic>,
    allocations: Vec<AllocationSite>,
    parallel: Option<ParallelData>,
    probabilistic: Option<ProbabilisticData>,
    recursive_call_sites: Vec<(E, bool)>,
}

impl<E> Default for WalkAccumulator<E> {
    fn default() -> Self {
        Self {
            diagnostics: Vec::new(),
            allocations: Vec::new(),
            parallel: None,
            probabilistic: None,
            recursive_call_sites: Vec::new(),
        }
    }
}

/// Collect every top-level expression reachable from `stmt` (its own
/// expression/condition/step/collection, and those of every nested
/// statement), used to find call expressions anywhere in a procedure's body
/// without the walker needing to know which statement shape holds them.
fn collect_expressions<S: Statement>(stmt: S, out: &mut Vec<S::Expr>) {
    if let Some(expr) = stmt.expression() {
        out.push(expr);
    }
    if let Some(expr) = stmt.loop_condition() {
        out.push(expr);
    }
    if let Some(expr) = stmt.loop_step() {
        out.push(expr);
    }
    if let Some(expr) = stmt.foreach_collection() {
        out.push(expr);
    }
    let children = stmt.children();
    let body = stmt.body();
    for child in children {
        collect_expressions(child, out);
    }
    if let Some(body) = body {
        collect_expressions(body, out);
    }
}

/// Collect every [`ExprKind::Call`] node reachable from `expr`, including
/// calls nested in its own arguments.
fn collect_calls_in_expr<E: HostExpr>(expr: E, out: &mut Vec<E>) {
    let children = expr.children();
    let is_call = matches!(expr.kind(), ExprKind::Call);
    if is_call {
        out.push(expr);
    }
    for child in children {
        collect_calls_in_expr(child, out);
    }
}

/// `true` if a sync-primitive identifier is reachable anywhere under `stmt`,
/// used by [`StatementKind::ParallelConstruct`] handling to set
/// [`ParallelData::has_sync`] from the whole body rather than just its
/// immediate expression.
fn body_has_sync<S: Statement>(stmt: &S) -> bool {
    if stmt.expression().is_some_and(|expr| detect_sync(&expr)) {
        return true;
    }
    if stmt.loop_condition().is_some_and(|expr| detect_sync(&expr)) {
        return true;
    }
    if stmt.loop_step().is_some_and(|expr| detect_sync(&expr)) {
        return true;
    }
    if stmt.foreach_collection().is_some_and(|expr| detect_sync(&expr)) {
        return true;
    }
    if stmt.children().into_iter().any(|child| body_has_sync(&child)) {
        return true;
    }
    stmt.body().is_some_and(|body| body_has_sync(&body))
}

/// The cost of a single expression node, recording any allocation site,
/// parallel/probabilistic pattern, or recursive call site found along the
/// way.
///
/// A call resolved to a known cost contributes that cost plus its
/// arguments' own costs (so a nested call inside an argument is still
/// found); a self/mutual-recursive call contributes nothing here — its cost
/// is deferred entirely to the recurrence solver — but is recorded into
/// `out.recursive_call_sites` using the call's first argument as the
/// recurrence-term argument expression (§4.3.3 assumes the bound variable
/// is the first declared parameter).
fn cost_of_expr<E: HostExpr>(
    expr: E,
    ctx: &AnalysisContext,
    rt: &ResolveContext<'_>,
    out: &mut WalkAccumulator<E>,
    in_tail_position: bool,
) -> Arc<ComplexityExpression> {
    match expr.kind() {
        ExprKind::Call => {
            let (resolved, diagnostics) =
                resolve_call(&expr, rt.current, rt.index, rt.cache, rt.current_scc, rt.registry, &ctx.primary_variable);
            out.diagnostics.extend(diagnostics);
            let probabilistic_source = classify_probabilistic_source(&expr);
            let allocation = record_allocation(&expr, ctx);
            let children = expr.children();

            match resolved {
                ResolvedCall::SelfRecursion | ResolvedCall::MutualRecursion => {
                    if let Some(argument) = children.into_iter().next() {
                        out.recursive_call_sites.push((argument, in_tail_position));
                    } else {
                        out.diagnostics.push(Diagnostic::structural("recursive call had no arguments to classify"));
                    }
                    Arc::new(ComplexityExpression::constant(0.0))
                }
                ResolvedCall::Known(cost) => {
                    if out.probabilistic.is_none() {
                        if let Some(source) = probabilistic_source {
                            out.probabilistic = Some(analyze_probabilistic(source, &ctx.primary_variable));
                        }
                    }
                    if let Some(site) = allocation {
                        out.allocations.push(site);
                    }
                    children.into_iter().fold(cost, |acc, child| {
                        let child_cost = cost_of_expr(child, ctx, rt, out, false);
                        Arc::new(ComplexityExpression::add(acc, child_cost))
                    })
                }
            }
        }
        ExprKind::ObjectCreation => {
            let allocation = record_allocation(&expr, ctx);
            let children = expr.children();
            let mut total = match &allocation {
                Some(site) => Arc::clone(&site.size),
                None => Arc::new(ComplexityExpression::constant(1.0)),
            };
            if let Some(site) = allocation {
                out.allocations.push(site);
            }
            for child in children {
                let child_cost = cost_of_expr(child, ctx, rt, out, false);
                total = Arc::new(ComplexityExpression::add(total, child_cost));
            }
            total
        }
        _ => {
            let children = expr.children();
            if children.is_empty() {
                Arc::new(ComplexityExpression::constant(1.0))
            } else {
                children.into_iter().fold(Arc::new(ComplexityExpression::constant(0.0)), |acc, child| {
                    let child_cost = cost_of_expr(child, ctx, rt, out, false);
                    Arc::new(ComplexityExpression::add(acc, child_cost))
                })
            }
        }
    }
}

/// The cost of a single statement, composing its children per §4.3's
/// sequential-sum/branch-max/loop-multiply rules. `in_tail_position` is
/// `true` only along the chain of last-statements-of-a-block and both arms
/// of a branch leading to a `return`, the shape a tail-call optimizer would
/// recognize (§4.3.4: "a syntactic tail call lets the runtime reuse the
/// current stack frame").
fn analyze_statement<S: Statement>(
    stmt: S,
    ctx: &mut AnalysisContext,
    rt: &ResolveContext<'_>,
    out: &mut WalkAccumulator<S::Expr>,
    in_tail_position: bool,
) -> Arc<ComplexityExpression> {
    match stmt.kind() {
        StatementKind::Expression => stmt
            .expression()
            .map_or_else(|| Arc::new(ComplexityExpression::constant(1.0)), |expr| cost_of_expr(expr, ctx, rt, out, false)),
        StatementKind::Return => stmt
            .expression()
            .map_or_else(|| Arc::new(ComplexityExpression::constant(1.0)), |expr| cost_of_expr(expr, ctx, rt, out, in_tail_position)),
        StatementKind::Block => {
            let children = stmt.children();
            let len = children.len();
            children
                .into_iter()
                .enumerate()
                .fold(Arc::new(ComplexityExpression::constant(0.0)), |acc, (i, child)| {
                    let child_tail = in_tail_position && i + 1 == len;
                    let child_cost = analyze_statement(child, ctx, rt, out, child_tail);
                    Arc::new(ComplexityExpression::add(acc, child_cost))
                })
        }
        StatementKind::Branch => {
            let mut costs = stmt.children().into_iter().map(|child| analyze_statement(child, ctx, rt, out, in_tail_position));
            let then_cost = costs.next().unwrap_or_else(|| Arc::new(ComplexityExpression::constant(1.0)));
            let else_cost = costs.next().unwrap_or_else(|| Arc::new(ComplexityExpression::constant(1.0)));
            Arc::new(ComplexityExpression::max_of(then_cost, else_cost))
        }
        StatementKind::MultiBranch => stmt
            .children()
            .into_iter()
            .map(|child| analyze_statement(child, ctx, rt, out, in_tail_position))
            .reduce(|a, b| Arc::new(ComplexityExpression::max_of(a, b)))
            .unwrap_or_else(|| Arc::new(ComplexityExpression::constant(1.0))),
        StatementKind::Loop => {
            let (bound, diagnostics) = analyze_loop(&stmt, ctx);
            out.diagnostics.extend(diagnostics);
            ctx.push_loop(Arc::clone(&bound.iterations));
            let body_cost = stmt
                .body()
                .map_or_else(|| Arc::new(ComplexityExpression::constant(1.0)), |body| analyze_statement(body, ctx, rt, out, false));
            ctx.pop_loop();
            Arc::new(ComplexityExpression::mul(body_cost, Arc::clone(&bound.iterations)))
        }
        StatementKind::ForEach => {
            let variable = stmt
                .foreach_collection()
                .and_then(|collection| collection.resolved_symbol())
                .and_then(|symbol| ctx.variable_for(symbol.name()))
                .unwrap_or_else(|| ctx.primary_variable.clone());
            let iterations = Arc::new(ComplexityExpression::var(variable));
            ctx.push_loop(Arc::clone(&iterations));
            let body_cost = stmt
                .body()
                .map_or_else(|| Arc::new(ComplexityExpression::constant(1.0)), |body| analyze_statement(body, ctx, rt, out, false));
            ctx.pop_loop();
            Arc::new(ComplexityExpression::mul(body_cost, iterations))
        }
        StatementKind::TryCatch => stmt.children().into_iter().fold(Arc::new(ComplexityExpression::constant(0.0)), |acc, child| {
            let child_cost = analyze_statement(child, ctx, rt, out, false);
            Arc::new(ComplexityExpression::add(acc, child_cost))
        }),
        StatementKind::Await => {
            let pattern = classify_parallel_pattern(&stmt);
            stmt.expression().map_or_else(
                || Arc::new(ComplexityExpression::constant(1.0)),
                |expr| {
                    let has_sync = detect_sync(&expr);
                    let cost = cost_of_expr(expr, ctx, rt, out, false);
                    if out.parallel.is_none() {
                        out.parallel = Some(analyze_parallel(pattern, &cost, &Arc::new(ComplexityExpression::constant(1.0)), has_sync));
                    }
                    cost
                },
            )
        }
        StatementKind::ParallelConstruct => {
            let pattern = classify_parallel_pattern(&stmt);
            let iterations = stmt
                .foreach_collection()
                .and_then(|collection| collection.resolved_symbol())
                .and_then(|symbol| ctx.variable_for(symbol.name()))
                .map_or_else(|| Arc::new(ComplexityExpression::var(ctx.primary_variable.clone())), |v| Arc::new(ComplexityExpression::var(v)));
            let has_sync = stmt.body().is_some_and(|body| body_has_sync(&body));
            let body_cost = stmt
                .body()
                .map_or_else(|| Arc::new(ComplexityExpression::constant(1.0)), |body| analyze_statement(body, ctx, rt, out, false));
            if out.parallel.is_none() {
                out.parallel = Some(analyze_parallel(pattern, &body_cost, &iterations, has_sync));
            }
            Arc::new(ComplexityExpression::mul(body_cost, iterations))
        }
        StatementKind::Other => Arc::new(ComplexityExpression::constant(1.0)),
    }
}

/// A single procedure's own walk results, kept around until its component's
/// recursive-vs-direct shape is known.
struct ProcEntry<E> {
    id: ProcedureId,
    name: String,
    file: String,
    line: u32,
    primary_variable: Variable,
    non_recursive_cost: Arc<ComplexityExpression>,
    diagnostics: Vec<Diagnostic>,
    allocations: Vec<AllocationSite>,
    parallel: Option<ParallelData>,
    probabilistic: Option<ProbabilisticData>,
    tail_recursive: bool,
    recursive_arguments: Vec<E>,
}

fn walk_procedure<P: Procedure>(id: &ProcedureId, proc: &P, rt: &ResolveContext<'_>) -> ProcEntry<<P::Stmt as Statement>::Expr> {
    let mut ctx = AnalysisContext::new(&proc.parameters());
    let mut accumulator: WalkAccumulator<<P::Stmt as Statement>::Expr> = WalkAccumulator::default();
    let non_recursive_cost = match proc.body() {
        Some(body) => analyze_statement(body, &mut ctx, rt, &mut accumulator, true),
        None => {
            accumulator.diagnostics.push(Diagnostic::structural("procedure has no body available for analysis; defaulting to O(input)"));
            Arc::new(ComplexityExpression::var(ctx.primary_variable.clone()))
        }
    };

    let tail_recursive = !accumulator.recursive_call_sites.is_empty() && accumulator.recursive_call_sites.iter().all(|(_, tail)| *tail);
    let recursive_arguments = accumulator.recursive_call_sites.into_iter().map(|(argument, _)| argument).collect();

    ProcEntry {
        id: id.clone(),
        name: proc.name().to_owned(),
        file: proc.file().to_owned(),
        line: proc.line(),
        primary_variable: ctx.primary_variable,
        non_recursive_cost,
        diagnostics: accumulator.diagnostics,
        allocations: accumulator.allocations,
        parallel: accumulator.parallel,
        probabilistic: accumulator.probabilistic,
        tail_recursive,
        recursive_arguments,
    }
}

/// The confidence assigned to a procedure whose cost came directly from an
/// annotation, trusted over inference per §6 but not independently
/// verified.
fn annotated_confidence() -> ConfidenceAssessment {
    let factors = ConfidenceFactors {
        analysis_source: 1.0,
        verification: 0.6,
        theorem_applicability: 1.0,
        numerical_stability: 1.0,
        expression_simplicity: 1.0,
    };
    ConfidenceAssessment::from_factors(factors, Vec::new(), None)
}

/// The confidence assigned to a procedure whose cost came from direct
/// (non-recurrence) composition: sequential sums, branch maxima, and loop
/// multiplication over resolved call costs.
fn direct_confidence(diagnostics: &[Diagnostic]) -> ConfidenceAssessment {
    let mut warnings = Vec::new();
    let analysis_source = if diagnostics.iter().any(|d| d.category() == DiagnosticCategory::Structural) { 0.65 } else { 0.85 };
    if diagnostics.iter().any(|d| d.severity() == Severity::Error) {
        warnings.push("one or more diagnostics were raised while analyzing this procedure".to_owned());
    }
    let factors = ConfidenceFactors {
        analysis_source,
        verification: 0.8,
        theorem_applicability: 1.0,
        numerical_stability: 0.9,
        expression_simplicity: 0.9,
    };
    ConfidenceAssessment::from_factors(factors, warnings, None)
}

fn attach_memory_and_extras(
    mut result: ProcedureResult,
    entry_allocations: Vec<AllocationSite>,
    recursion_depth: Arc<ComplexityExpression>,
    tail_recursive: bool,
    parallel: Option<ParallelData>,
    probabilistic: Option<ProbabilisticData>,
) -> ProcedureResult {
    let memory = summarize_memory(entry_allocations, recursion_depth, tail_recursive);
    result = result.with_space_complexity(RenderedComplexity::new(ComplexityExpression::memory(memory)));
    if let Some(parallel_data) = parallel {
        result = result.with_parallel_complexity(RenderedComplexity::new(ComplexityExpression::parallel(parallel_data)));
    }
    if let Some(probabilistic_data) = probabilistic {
        result = result.with_probabilistic_complexity(RenderedComplexity::new(ComplexityExpression::probabilistic(probabilistic_data)));
    }
    result
}

/// Analyze every procedure in one strongly connected component of the call
/// graph, appending a [`ProcedureResult`] per member to `results` and its
/// solved cost to `cache`.
///
/// Procedures carrying a parseable `Complexity(...)` annotation are
/// resolved first and skip inference entirely (§6: "the implementer
/// decides policy; default is to trust the annotation when present").
/// Everything else is walked; members with no self/mutual-recursive call
/// site use their walked cost directly, and the rest are handed to
/// [`choose_representative_component`] and the recurrence solver as one
/// system.
fn analyze_component<P: Procedure>(
    ids: &[ProcedureId],
    procedures: &FxHashMap<ProcedureId, P>,
    call_index: &CallIndex,
    registry: &Registry,
    cache: &mut FxHashMap<ProcedureId, Arc<ComplexityExpression>>,
    results: &mut Vec<ProcedureResult>,
) {
    let mut pending = Vec::new();
    for id in ids {
        let Some(proc) = procedures.get(id) else { continue };
        if let Some(annotation) = proc.complexity_annotation() {
            let primary_variable = AnalysisContext::new(&proc.parameters()).primary_variable;
            let (parsed, diagnostics) = annotation::parse_annotation(annotation, &primary_variable);
            if let Some(expr) = parsed {
                cache.insert(id.clone(), Arc::new(expr.clone()));
                let rendered = RenderedComplexity::new(expr);
                let result = ProcedureResult::new(proc.name(), proc.file(), proc.line(), rendered, annotated_confidence(), diagnostics);
                let result = attach_memory_and_extras(result, Vec::new(), Arc::new(ComplexityExpression::constant(1.0)), false, None, None);
                results.push(result);
                continue;
            }
        }
        pending.push(id.clone());
    }

    if pending.is_empty() {
        return;
    }

    let walked: Vec<_> = pending
        .iter()
        .filter_map(|id| {
            let proc = procedures.get(id)?;
            let rt = ResolveContext { current: id, index: call_index, cache, current_scc: ids, registry };
            Some(walk_procedure(id, proc, &rt))
        })
        .collect();

    let mut recurrence_components = Vec::new();
    let mut recursive_entries = Vec::new();

    for mut entry in walked {
        if entry.recursive_arguments.is_empty() {
            let confidence = direct_confidence(&entry.diagnostics);
            let rendered = RenderedComplexity::new((*entry.non_recursive_cost).clone());
            let result = ProcedureResult::new(entry.name, entry.file, entry.line, rendered, confidence, entry.diagnostics);
            let result =
                attach_memory_and_extras(result, entry.allocations, Arc::new(ComplexityExpression::constant(1.0)), false, entry.parallel, entry.probabilistic);
            cache.insert(entry.id, Arc::clone(&entry.non_recursive_cost));
            results.push(result);
        } else {
            let (data, mut form_diagnostics) =
                form_recurrence(&entry.primary_variable, Arc::clone(&entry.non_recursive_cost), &entry.recursive_arguments, Some(1.0));
            entry.diagnostics.append(&mut form_diagnostics);
            recurrence_components.push((entry.id.clone(), data));
            recursive_entries.push(entry);
        }
    }

    if recurrence_components.is_empty() {
        return;
    }

    let (system, rep_diagnostics) = choose_representative_component(recurrence_components);
    let representative_data = system.representative_recurrence().cloned();

    let (applicability, solve_diagnostics) = match &representative_data {
        Some(data) => recurrence::analyze(data),
        None => (
            Applicability::NotApplicable { reason: "mutually recursive component had no representative to solve".to_owned(), suggestions: Vec::new() },
            Vec::new(),
        ),
    };
    let boundary = recurrence::detect_boundary(&applicability);
    let fallback_variable = representative_data.as_ref().map(|data| data.variable.clone());
    let solution = applicability
        .solution()
        .cloned()
        .unwrap_or_else(|| fallback_variable.map_or_else(|| ComplexityExpression::constant(1.0), ComplexityExpression::var));
    let induction = match &representative_data {
        Some(data) => recurrence::verify_by_induction(data, &solution),
        None => InductionCheck { verified: false, max_relative_error: f64::NAN, notes: "no representative recurrence to verify".to_owned() },
    };

    let mut shared_diagnostics = rep_diagnostics;
    shared_diagnostics.extend(solve_diagnostics);
    let confidence = recurrence::assess_confidence(&applicability, &shared_diagnostics, &boundary, &induction);

    for entry in recursive_entries {
        let mut diagnostics = entry.diagnostics;
        diagnostics.extend(shared_diagnostics.clone());
        if entry.id != system.representative {
            diagnostics.push(Diagnostic::structural(
                "this procedure's cost was solved via its mutually recursive component's representative member",
            ));
        }
        let rendered = RenderedComplexity::new(solution.clone());
        let result = ProcedureResult::new(entry.name, entry.file, entry.line, rendered, confidence.clone(), diagnostics);
        let recursion_depth = Arc::new(ComplexityExpression::var(entry.primary_variable));
        let result = attach_memory_and_extras(result, entry.allocations, recursion_depth, entry.tail_recursive, entry.parallel, entry.probabilistic);
        cache.insert(entry.id, Arc::new(solution.clone()));
        results.push(result);
    }
}

/// Analyze every procedure declared in `tree`, in an order that guarantees
/// every callee is resolved (or recognized as mutually recursive) before
/// its callers are walked (§4.3.2).
#[must_use]
pub fn analyze_syntax_tree<T: SyntaxTree>(tree: &T, registry: &Registry) -> Vec<ProcedureResult> {
    let procedures: FxHashMap<ProcedureId, T::Proc> = tree.procedures().into_iter().map(|proc| (procedure_id(&proc), proc)).collect();
    let call_index = CallIndex::build(tree);

    let mut graph: CallGraph<ProcedureId> = CallGraph::new();
    let mut node_to_id: FxHashMap<NodeId, ProcedureId> = FxHashMap::default();
    for id in procedures.keys() {
        let node = graph.add_procedure(id.clone());
        node_to_id.insert(node, id.clone());
    }

    for (id, proc) in &procedures {
        let Some(body) = proc.body() else { continue };
        let mut expressions = Vec::new();
        collect_expressions(body, &mut expressions);
        let mut calls = Vec::new();
        for expr in expressions {
            collect_calls_in_expr(expr, &mut calls);
        }
        let Some(caller_node) = graph.node_of(id) else { continue };
        for call in &calls {
            if let (Some(method), Some(arg_count)) = (call.call_method_name(), call.call_arg_count()) {
                if let Some(target) = call_index.resolve(method, arg_count) {
                    if let Some(callee_node) = graph.node_of(target) {
                        graph.add_edge(caller_node, callee_node);
                    }
                }
            }
        }
    }

    let mut cache: FxHashMap<ProcedureId, Arc<ComplexityExpression>> = FxHashMap::default();
    let mut results = Vec::new();

    for component in graph.scc_analysis_order() {
        let ids: Vec<ProcedureId> = component.iter().filter_map(|node| node_to_id.get(node).cloned()).collect();
        analyze_component(&ids, &procedures, &call_index, registry, &mut cache, &mut results);
    }

    results
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::adapter::{ArithmeticOperator, Parameter};
    use test_support::{MockExpr, MockProc, MockStmt, MockTree};

    #[test]
    fn iterative_loop_over_parameter_yields_linear_bound() {
        let body = MockStmt::loop_stmt(
            MockStmt::expr_stmt(MockExpr::assignment(ArithmeticOperator::Add, MockExpr::var("i"), MockExpr::literal(0.0))),
            MockExpr::binary(ArithmeticOperator::Other, MockExpr::var("i"), MockExpr::var("n")),
            MockExpr::assignment(ArithmeticOperator::Add, MockExpr::var("i"), MockExpr::literal(1.0)),
            MockStmt::expr_stmt(MockExpr::var("i")),
        );
        let proc = MockProc::new("scan", vec![Parameter { name: "n".to_owned(), type_name: None }], Some(body));
        let tree = MockTree { procedures: vec![proc] };
        let results = analyze_syntax_tree(&tree, &asymptote_bcl::DEFAULT_REGISTRY);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].time_complexity.big_o, "O(n)");
    }

    #[test]
    fn self_recursive_halving_call_solves_via_master_theorem() {
        let recursive_call = MockExpr::call(
            "search",
            None,
            vec![MockExpr::binary(ArithmeticOperator::Divide, MockExpr::var("n"), MockExpr::literal(2.0))],
        );
        let body = MockStmt::return_stmt(recursive_call);
        let proc = MockProc::new("search", vec![Parameter { name: "n".to_owned(), type_name: None }], Some(body));
        let tree = MockTree { procedures: vec![proc] };
        let results = analyze_syntax_tree(&tree, &asymptote_bcl::DEFAULT_REGISTRY);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].time_complexity.big_o, "O(log n)");
    }

    #[test]
    fn annotated_procedure_uses_the_annotation_verbatim() {
        let mut proc = MockProc::new("mystery", vec![Parameter { name: "n".to_owned(), type_name: None }], None);
        proc.annotation = Some("O(n log n)".to_owned());
        let tree = MockTree { procedures: vec![proc] };
        let results = analyze_syntax_tree(&tree, &asymptote_bcl::DEFAULT_REGISTRY);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].time_complexity.big_o, "O(n log n)");
        assert!(results[0].diagnostics.is_empty());
    }
}
