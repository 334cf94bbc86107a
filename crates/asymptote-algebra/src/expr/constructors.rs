//! Smart constructors for every [`ComplexityKind`] variant.

use std::sync::Arc;

use crate::poly::Polynomial;
use crate::variable::Variable;

use super::hash::compute_hash;
use super::{
    AllocationSite, BinaryOp, ComplexityExpression, ComplexityKind, Distribution, MemoryData,
    ParallelData, ParallelPattern, ProbabilisticData, ProbabilisticSource, RecurrenceData,
    RecurrenceTerm,
};

impl ComplexityExpression {
    fn from_kind(kind: ComplexityKind) -> Self {
        let hash = compute_hash(&kind);
        Self { hash, kind }
    }

    /// A non-negative literal constant, `O(1)`.
    #[must_use]
    pub fn constant(k: f64) -> Self {
        Self::from_kind(ComplexityKind::Const(k.max(0.0)))
    }

    /// `O(v)`.
    #[must_use]
    pub fn var(v: Variable) -> Self {
        Self::from_kind(ComplexityKind::Var(v))
    }

    /// `c·v`.
    #[must_use]
    pub fn linear(c: f64, v: Variable) -> Self {
        Self::from_kind(ComplexityKind::Linear(c, v))
    }

    /// A sparse polynomial in one variable.
    #[must_use]
    pub fn poly(v: Variable, polynomial: Polynomial) -> Self {
        Self::from_kind(ComplexityKind::Poly(v, polynomial))
    }

    /// `c·log_base(v)`.
    #[must_use]
    pub fn log(c: f64, v: Variable, base: f64) -> Self {
        Self::from_kind(ComplexityKind::Log(c, v, base))
    }

    /// `v^k · log^j(v)`.
    #[must_use]
    pub fn poly_log(k: f64, j: u32, v: Variable) -> Self {
        Self::from_kind(ComplexityKind::PolyLog(k, j, v))
    }

    /// `coef · base^v`.
    #[must_use]
    pub fn exp(base: f64, v: Variable, coef: f64) -> Self {
        Self::from_kind(ComplexityKind::Exp(base, v, coef))
    }

    /// `coef · v!`.
    #[must_use]
    pub fn factorial(v: Variable, coef: f64) -> Self {
        Self::from_kind(ComplexityKind::Factorial(v, coef))
    }

    /// `base_expr ^ exponent`, for composite bases.
    #[must_use]
    pub fn power(base_expr: Arc<Self>, exponent: f64) -> Self {
        Self::from_kind(ComplexityKind::Power(base_expr, exponent))
    }

    /// `log_base(expr)`, for composite arguments.
    #[must_use]
    pub fn log_of(expr: Arc<Self>, base: f64) -> Self {
        Self::from_kind(ComplexityKind::LogOf(expr, base))
    }

    /// `base ^ expr`, for composite exponents.
    #[must_use]
    pub fn exp_of(base: f64, expr: Arc<Self>) -> Self {
        Self::from_kind(ComplexityKind::ExpOf(base, expr))
    }

    /// `expr!`, for composite arguments.
    #[must_use]
    pub fn factorial_of(expr: Arc<Self>) -> Self {
        Self::from_kind(ComplexityKind::FactorialOf(expr))
    }

    /// A raw binary node. Prefer [`Self::add`]/[`Self::mul`]/[`Self::max_of`]/
    /// [`Self::min_of`] unless you specifically need an unnormalized node.
    #[must_use]
    pub fn binary(left: Arc<Self>, op: BinaryOp, right: Arc<Self>) -> Self {
        Self::from_kind(ComplexityKind::Binary(left, op, right))
    }

    /// `left + right`.
    #[must_use]
    pub fn add(left: Arc<Self>, right: Arc<Self>) -> Self {
        Self::binary(left, BinaryOp::Add, right)
    }

    /// `left × right`.
    #[must_use]
    pub fn mul(left: Arc<Self>, right: Arc<Self>) -> Self {
        Self::binary(left, BinaryOp::Mul, right)
    }

    /// `max(left, right)`.
    #[must_use]
    pub fn max_of(left: Arc<Self>, right: Arc<Self>) -> Self {
        Self::binary(left, BinaryOp::Max, right)
    }

    /// `min(left, right)`.
    #[must_use]
    pub fn min_of(left: Arc<Self>, right: Arc<Self>) -> Self {
        Self::binary(left, BinaryOp::Min, right)
    }

    /// A named conditional bound.
    #[must_use]
    pub fn conditional(description: impl AsRef<str>, then_expr: Arc<Self>, else_expr: Arc<Self>) -> Self {
        Self::from_kind(ComplexityKind::Conditional(
            Arc::from(description.as_ref()),
            then_expr,
            else_expr,
        ))
    }

    /// An unsolved recurrence.
    #[must_use]
    pub fn recurrence(data: RecurrenceData) -> Self {
        Self::from_kind(ComplexityKind::Recurrence(Box::new(data)))
    }

    /// `(amortized, worst)` bound pair.
    #[must_use]
    pub fn amortized(amortized: Arc<Self>, worst: Arc<Self>) -> Self {
        Self::from_kind(ComplexityKind::Amortized(amortized, worst))
    }

    /// A parallel work/span bound.
    #[must_use]
    pub fn parallel(data: ParallelData) -> Self {
        Self::from_kind(ComplexityKind::Parallel(Box::new(data)))
    }

    /// A memory bound.
    #[must_use]
    pub fn memory(data: MemoryData) -> Self {
        Self::from_kind(ComplexityKind::Memory(Box::new(data)))
    }

    /// A randomized-algorithm expected/worst bound.
    #[must_use]
    pub fn probabilistic(data: ProbabilisticData) -> Self {
        Self::from_kind(ComplexityKind::Probabilistic(Box::new(data)))
    }
}

impl RecurrenceTerm {
    /// A recurrence term with an explicit argument expression.
    #[must_use]
    pub fn new(coefficient: f64, scale_factor: f64, argument_expression: Arc<ComplexityExpression>) -> Self {
        Self {
            coefficient,
            scale_factor,
            argument_expression,
        }
    }

    /// `true` if this term's scale factor is close enough to `1.0` to be a
    /// subtract-form recursion (`T(n-k)`) rather than divide-form (`T(n/k)`).
    #[must_use]
    pub fn is_subtract_form(&self) -> bool {
        (1.0 - self.scale_factor).abs() <= super::SUBTRACT_FORM_TOLERANCE
    }
}

impl AllocationSite {
    /// A new allocation site.
    #[must_use]
    pub fn new(size: Arc<ComplexityExpression>, iterations: Arc<ComplexityExpression>) -> Self {
        Self { size, iterations }
    }
}

impl ParallelData {
    /// A new parallel work/span bound.
    #[must_use]
    pub fn new(
        work: Arc<ComplexityExpression>,
        span: Arc<ComplexityExpression>,
        pattern: ParallelPattern,
        is_task_based: bool,
        has_sync: bool,
    ) -> Self {
        Self {
            work,
            span,
            pattern,
            is_task_based,
            has_sync,
        }
    }
}

impl ProbabilisticData {
    /// A new expected/worst-case randomized-algorithm bound.
    #[must_use]
    pub fn new(
        expected: Arc<ComplexityExpression>,
        worst: Arc<ComplexityExpression>,
        source: ProbabilisticSource,
        distribution: Distribution,
        assumptions: Vec<String>,
    ) -> Self {
        Self {
            expected,
            worst,
            source,
            distribution,
            assumptions,
        }
    }
}
