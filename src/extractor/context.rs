//! Per-analysis state shared across the extractor's sub-walkers (§4.3).

use std::sync::Arc;

use asymptote_algebra::{ComplexityExpression, Variable, VariableRole};
use rustc_hash::FxHashMap;

use crate::adapter::{Parameter, Procedure};

/// A procedure's identity for call-graph keying and result caching, derived
/// from the host's own notion of symbol identity (§4.4): its declaring file,
/// starting line, and declared name. Two procedures with the same file/line
/// are treated as the same node even under different adapter invocations
/// (e.g. a forward declaration re-walked), since the host AST node itself is
/// opaque to this crate.
pub type ProcedureId = (Arc<str>, u32, Arc<str>);

/// Derive a [`ProcedureId`] from a host [`Procedure`].
pub fn procedure_id<P: Procedure>(proc: &P) -> ProcedureId {
    (Arc::from(proc.file()), proc.line(), Arc::from(proc.name()))
}

/// Guess a parameter's [`VariableRole`] from its declared type name, per the
/// "collection gets `DataCount`, everything else `InputSize`" convention
/// documented on [`VariableRole`].
fn classify_role(type_name: Option<&str>) -> VariableRole {
    let Some(type_name) = type_name else { return VariableRole::InputSize };
    let lower = type_name.to_ascii_lowercase();
    if lower.contains("graph") {
        VariableRole::VertexCount
    } else if lower.contains("tree") {
        VariableRole::TreeHeight
    } else if lower.contains("string") || lower.contains("str") {
        VariableRole::StringLength
    } else if lower.contains("list")
        || lower.contains("array")
        || lower.contains("vec")
        || lower.contains("collection")
        || lower.contains("dictionary")
        || lower.contains("map")
        || lower.contains("set")
        || lower.contains('[')
    {
        VariableRole::DataCount
    } else {
        VariableRole::InputSize
    }
}

/// Mutable state threaded through a single procedure's extraction: the
/// parameter-to-variable mapping, the active loop-nesting multiplier stack,
/// and which variable stands for "the" input size when a sub-walker needs a
/// single default (§4.3.1: "induction variable detection").
pub struct AnalysisContext {
    variables: FxHashMap<String, Variable>,
    /// The variable used as a default bound when no more specific one can be
    /// derived (typically the first/only parameter).
    pub primary_variable: Variable,
    /// Multipliers contributed by loops the walker is currently nested
    /// inside, outermost first. A sub-walker building an allocation site's
    /// `iterations` multiplies every entry together (§4.3.4).
    loop_multiplier_stack: Vec<Arc<ComplexityExpression>>,
}

impl AnalysisContext {
    /// Build a context for a procedure with the given declared parameters.
    #[must_use]
    pub fn new(parameters: &[Parameter]) -> Self {
        let mut variables = FxHashMap::default();
        let mut primary_variable = None;

        for parameter in parameters {
            let role = classify_role(parameter.type_name.as_deref());
            let variable = Variable::new(&parameter.name, role);
            if primary_variable.is_none() {
                primary_variable = Some(variable.clone());
            }
            variables.insert(parameter.name.clone(), variable);
        }

        Self {
            variables,
            primary_variable: primary_variable.unwrap_or_else(Variable::n),
            loop_multiplier_stack: Vec::new(),
        }
    }

    /// Look up the [`Variable`] a resolved symbol name corresponds to, if
    /// it's one of this procedure's own parameters.
    #[must_use]
    pub fn variable_for(&self, name: &str) -> Option<Variable> {
        self.variables.get(name).cloned()
    }

    /// Every declared parameter's variable, in no particular order; used by
    /// free-variable substitution when resolving a call's arguments.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }

    /// Enter a loop with the given iteration-count bound.
    pub fn push_loop(&mut self, iterations: Arc<ComplexityExpression>) {
        self.loop_multiplier_stack.push(iterations);
    }

    /// Leave the innermost active loop.
    pub fn pop_loop(&mut self) {
        self.loop_multiplier_stack.pop();
    }

    /// The product of every active loop's iteration count, `Const(1)` if no
    /// loop is active.
    #[must_use]
    pub fn current_loop_multiplier(&self) -> ComplexityExpression {
        self.loop_multiplier_stack
            .iter()
            .fold(ComplexityExpression::constant(1.0), |acc, bound| {
                ComplexityExpression::mul(Arc::new(acc), Arc::clone(bound))
            })
    }

    /// How many loops are currently active, used to tell a flat loop from a
    /// nested one without re-deriving the multiplier expression.
    #[must_use]
    pub fn loop_depth(&self) -> usize {
        self.loop_multiplier_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_parameter_gets_data_count_role() {
        let parameters = vec![Parameter { name: "items".to_owned(), type_name: Some("List<int>".to_owned()) }];
        let ctx = AnalysisContext::new(&parameters);
        assert_eq!(ctx.variable_for("items").unwrap().role(), VariableRole::DataCount);
    }

    #[test]
    fn untyped_parameter_defaults_to_input_size() {
        let parameters = vec![Parameter { name: "x".to_owned(), type_name: None }];
        let ctx = AnalysisContext::new(&parameters);
        assert_eq!(ctx.variable_for("x").unwrap().role(), VariableRole::InputSize);
    }

    #[test]
    fn no_parameters_falls_back_to_n() {
        let ctx = AnalysisContext::new(&[]);
        assert_eq!(ctx.primary_variable, Variable::n());
    }
}
