//! Deriving `RecurrenceTerm`s from a procedure's own recursive call sites
//! (§4.3.3), including the representative-component heuristic used for a
//! mutually recursive strongly connected component.

use std::sync::Arc;

use asymptote_algebra::{evaluate, Assignment, ComplexityExpression, RecurrenceData, RecurrenceTerm, Variable, SUBTRACT_FORM_TOLERANCE};

use crate::adapter::{ArithmeticOperator, HostExpr};
use crate::diagnostics::Diagnostic;

use super::context::ProcedureId;

/// Classify one recursive call's argument expression into a
/// `(scale_factor, argument_expression)` pair.
///
/// Divide-form arguments (`n / k`, `n * k` with `0 < k < 1`) reduce to a
/// genuine `Linear(k, v)` expression. Subtract-form arguments (`n - k`,
/// `n + k`) cannot be represented exactly: [`ComplexityExpression::constant`]
/// clamps negative literals to zero, so there is no public way to build
/// `n - k` itself. A subtract-form argument is instead reported with
/// `scale_factor = 1.0` and a placeholder `Var(v)` expression; the
/// recurrence solver's positional-offset convention (the i-th term is
/// assumed to be the offset-`i` term) is what actually distinguishes
/// `T(n-1)` from `T(n-2)` downstream, not this expression.
#[must_use]
pub fn classify_call_argument<E: HostExpr>(argument: &E, variable: &Variable) -> (f64, Arc<ComplexityExpression>) {
    if let Some(operator) = argument.arithmetic_operator() {
        let literal = argument.children().iter().find_map(HostExpr::literal_number);
        if let Some(literal) = literal {
            match operator {
                ArithmeticOperator::Divide if literal > 0.0 => {
                    let scale_factor = (1.0 / literal).clamp(0.0, 1.0);
                    return (scale_factor, Arc::new(ComplexityExpression::linear(scale_factor, variable.clone())));
                }
                ArithmeticOperator::Multiply if literal > 0.0 && literal < 1.0 => {
                    return (literal, Arc::new(ComplexityExpression::linear(literal, variable.clone())));
                }
                _ => {}
            }
        }
    }
    (1.0, Arc::new(ComplexityExpression::var(variable.clone())))
}

/// Derive a single procedure's [`RecurrenceData`] from its recursive call
/// arguments, merging divide-form calls that share a scale factor (e.g. two
/// `T(n/2)` calls become one `coefficient = 2` term) while keeping every
/// subtract-form call as its own term, in call order, since their exact
/// offsets are not individually recoverable (§9 "Subtract-vs-divide
/// ambiguity").
#[must_use]
pub fn form_recurrence<E: HostExpr>(
    variable: &Variable,
    non_recursive_work: Arc<ComplexityExpression>,
    self_call_arguments: &[E],
    base: Option<f64>,
) -> (RecurrenceData, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    if self_call_arguments.is_empty() {
        diagnostics.push(Diagnostic::structural(
            "no recursive call arguments were supplied; the derived recurrence has zero terms",
        ));
    }

    let mut terms: Vec<RecurrenceTerm> = Vec::new();
    for argument in self_call_arguments {
        let (scale_factor, argument_expression) = classify_call_argument(argument, variable);
        let is_subtract_like = (1.0 - scale_factor).abs() <= SUBTRACT_FORM_TOLERANCE;

        if !is_subtract_like {
            if let Some(existing) = terms
                .iter_mut()
                .find(|t| !t.is_subtract_form() && (t.scale_factor - scale_factor).abs() < 1e-9)
            {
                existing.coefficient += 1.0;
                continue;
            }
        }

        terms.push(RecurrenceTerm::new(1.0, scale_factor, argument_expression));
    }

    (RecurrenceData { terms, variable: variable.clone(), non_recursive_work, base }, diagnostics)
}

/// A mutual-recurrence system spanning every procedure in one strongly
/// connected component of the call graph.
///
/// Retains every component procedure's own derived recurrence so a future
/// joint solve has something to operate on, even though only the
/// `representative` component is actually handed to the recurrence solver
/// today (§9 "Mutual-recurrence solving").
#[derive(Debug, Clone)]
pub struct MutualRecurrenceSystem {
    /// Every component procedure's own recurrence, keyed by its identity.
    pub components: Vec<(ProcedureId, RecurrenceData)>,
    /// Which component procedure stands in for the whole system.
    pub representative: ProcedureId,
}

impl MutualRecurrenceSystem {
    /// The representative component's own recurrence, if it is present in
    /// [`Self::components`].
    #[must_use]
    pub fn representative_recurrence(&self) -> Option<&RecurrenceData> {
        self.components.iter().find(|(id, _)| *id == self.representative).map(|(_, data)| data)
    }
}

/// The sample point used to rank each component's non-recursive work when
/// choosing a representative; large enough that a constant-vs-linear-vs-`n
/// log n` difference is unambiguous at this scale.
const REPRESENTATIVE_SAMPLE: f64 = 1000.0;

fn estimate_work(data: &RecurrenceData) -> f64 {
    let mut assignment = Assignment::default();
    assignment.insert(data.variable.clone(), REPRESENTATIVE_SAMPLE);
    evaluate(&data.non_recursive_work, &assignment).unwrap_or(0.0)
}

/// Pick the strongly connected component member with the greatest
/// non-recursive work (evaluated at a fixed large sample point) to stand in
/// for the whole mutually recursive system, folding every sibling call
/// already present in its own `RecurrenceData` (§9 "Mutual-recurrence
/// solving").
#[must_use]
pub fn choose_representative_component(components: Vec<(ProcedureId, RecurrenceData)>) -> (MutualRecurrenceSystem, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();

    let representative = components
        .iter()
        .max_by(|(_, a), (_, b)| estimate_work(a).partial_cmp(&estimate_work(b)).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(id, _)| id.clone());

    let Some(representative) = representative else {
        diagnostics.push(Diagnostic::structural("mutually recursive component had no members to choose a representative from"));
        return (
            MutualRecurrenceSystem { components, representative: (Arc::from(""), 0, Arc::from("")) },
            diagnostics,
        );
    };

    if components.len() > 1 {
        diagnostics.push(Diagnostic::structural(format!(
            "mutually recursive component of {} procedures solved via its highest-work representative",
            components.len()
        )));
    }

    (MutualRecurrenceSystem { components, representative }, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::test_support::MockExpr;
    use asymptote_algebra::VariableRole;

    fn n() -> Variable {
        Variable::new("n", VariableRole::InputSize)
    }

    #[test]
    fn two_distinct_subtract_form_calls_stay_separate_terms() {
        let arguments = vec![
            MockExpr::binary(ArithmeticOperator::Subtract, MockExpr::var("n"), MockExpr::literal(1.0)),
            MockExpr::binary(ArithmeticOperator::Subtract, MockExpr::var("n"), MockExpr::literal(2.0)),
        ];
        let (data, diagnostics) = form_recurrence(&n(), Arc::new(ComplexityExpression::constant(1.0)), &arguments, Some(1.0));
        assert_eq!(data.terms.len(), 2);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn two_equal_divide_form_calls_merge_into_one_term() {
        let arguments = vec![
            MockExpr::binary(ArithmeticOperator::Divide, MockExpr::var("n"), MockExpr::literal(2.0)),
            MockExpr::binary(ArithmeticOperator::Divide, MockExpr::var("n"), MockExpr::literal(2.0)),
        ];
        let (data, _) = form_recurrence(&n(), Arc::new(ComplexityExpression::var(n())), &arguments, Some(1.0));
        assert_eq!(data.terms.len(), 1);
        assert!((data.terms[0].coefficient - 2.0).abs() < 1e-9);
        assert!((data.terms[0].scale_factor - 0.5).abs() < 1e-9);
    }

    #[test]
    fn representative_component_is_the_one_with_more_work() {
        let variable = n();
        let cheap = RecurrenceData {
            terms: vec![RecurrenceTerm::new(1.0, 1.0, Arc::new(ComplexityExpression::var(variable.clone())))],
            variable: variable.clone(),
            non_recursive_work: Arc::new(ComplexityExpression::constant(1.0)),
            base: Some(1.0),
        };
        let expensive = RecurrenceData {
            terms: vec![RecurrenceTerm::new(1.0, 1.0, Arc::new(ComplexityExpression::var(variable.clone())))],
            variable: variable.clone(),
            non_recursive_work: Arc::new(ComplexityExpression::var(variable.clone())),
            base: Some(1.0),
        };
        let cheap_id: ProcedureId = (Arc::from("a.src"), 1, Arc::from("cheap"));
        let expensive_id: ProcedureId = (Arc::from("a.src"), 2, Arc::from("expensive"));
        let (system, diagnostics) =
            choose_representative_component(vec![(cheap_id, cheap), (expensive_id.clone(), expensive)]);
        assert_eq!(system.representative, expensive_id);
        assert_eq!(diagnostics.len(), 1);
    }
}
