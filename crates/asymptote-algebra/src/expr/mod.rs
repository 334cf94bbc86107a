//! The canonical symbolic representation of an asymptotic complexity bound.
//!
//! # Architecture
//!
//! `ComplexityExpression` mirrors the N-ary, `Arc`-sharing, structurally
//! hashed AST this crate's architectural ancestor uses for formula algebra:
//! most variants hold `Arc<ComplexityExpression>` children so cloning an
//! expression never deep-copies it, and every node carries a precomputed
//! structural hash for O(1) inequality rejection before falling back to a
//! full structural comparison.
//!
//! `Binary` nodes are genuinely binary (the data model calls for
//! `Binary(left, op, right)`), but [`crate::normalize`] flattens runs of the
//! same associative operator into a sorted, combined chain before folding
//! them back into a binary tree — giving the same O(N) combination behavior
//! the ancestor gets from its N-ary `Sum`/`Product` without changing the
//! public shape of the data model.

mod constructors;
mod display;
pub mod evaluate;
pub mod free_vars;
mod hash;
mod ordering;
pub mod substitute;

pub use display::to_big_o;
pub use ordering::big_o_cmp;
pub(crate) use ordering::sort_operands;

use std::sync::Arc;

use crate::poly::Polynomial;
use crate::variable::Variable;

/// Operator carried by a [`ComplexityKind::Binary`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// Asymptotic sum.
    Add,
    /// Asymptotic product.
    Mul,
    /// Pointwise maximum (the branch/parallel-span combinator).
    Max,
    /// Pointwise minimum.
    Min,
}

/// A single term of an unsolved recurrence: `coefficient · T(scale_factor · v)`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurrenceTerm {
    /// `aᵢ`, required to be strictly positive.
    pub coefficient: f64,
    /// `bᵢ`, the fraction of `v` passed to the recursive call. Values very
    /// close to `1.0` (within [`SUBTRACT_FORM_TOLERANCE`]) denote a
    /// subtract-form term (`n - k`) rather than a divide-form one.
    pub scale_factor: f64,
    /// The callee's own argument expression the scale factor was derived
    /// from (e.g. `n - 1`, or `n / 2`), kept so a consumer can re-derive the
    /// term under a different subtract/divide threshold without re-walking
    /// the host AST.
    pub argument_expression: Arc<ComplexityExpression>,
}

/// Tolerance used to flag a [`RecurrenceTerm::scale_factor`] near `1.0` as a
/// subtract-form recursion (`T(n-1)`) rather than a divide-form one
/// (`T(n/k)`).
pub const SUBTRACT_FORM_TOLERANCE: f64 = 0.01;

/// An unsolved recurrence `T(v) = Σ terms + non_recursive_work`, handed to
/// the recurrence solver before being embedded back into algebra.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurrenceData {
    /// The `Σ aᵢ·T(bᵢ·v)` terms.
    pub terms: Vec<RecurrenceTerm>,
    /// The bound variable `v` (often but not always called `n`).
    pub variable: Variable,
    /// `f(v)`, the work done outside the recursive calls.
    pub non_recursive_work: Arc<ComplexityExpression>,
    /// The base-case value of `v` at which the recursion bottoms out, if
    /// known from the host AST (usually `1` or `0`).
    pub base: Option<f64>,
}

/// A pattern tag describing how a [`ComplexityKind::Parallel`] bound was
/// derived; see the extractor's parallel sub-analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ParallelPattern {
    /// Parallel-for over a collection with no shared mutation detected.
    ParallelFor,
    /// Tree-shaped parallel reduction.
    ParallelReduction,
    /// `Task.WhenAll`/`await_all`-style fan-out.
    TaskAwaitAll,
    /// Sequential `await`s; span equals work.
    SequentialAwait,
}

/// Parallel work/span bound, per the extractor's parallelism sub-analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallelData {
    /// Total work across all parallel branches.
    pub work: Arc<ComplexityExpression>,
    /// Span (critical-path length) across parallel branches.
    pub span: Arc<ComplexityExpression>,
    /// Which recognized pattern produced this bound.
    pub pattern: ParallelPattern,
    /// `true` if the pattern is task/future based rather than a language
    /// `parallel-for` construct.
    pub is_task_based: bool,
    /// `true` if identifiers suggesting a lock/mutex/interlocked/concurrent
    /// construct were found in the parallel region.
    pub has_sync: bool,
}

/// A single recorded allocation site, per the extractor's memory
/// sub-analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationSite {
    /// The size of a single allocation.
    pub size: Arc<ComplexityExpression>,
    /// How many times the allocation site executes (its enclosing loop's
    /// iteration count, or `Const(1)` outside any loop).
    pub iterations: Arc<ComplexityExpression>,
}

/// Memory-complexity bound, per the extractor's memory sub-analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryData {
    /// Total memory (stack + heap + auxiliary).
    pub total: Arc<ComplexityExpression>,
    /// Stack depth, derived from the recursion shape.
    pub stack: Arc<ComplexityExpression>,
    /// Heap allocation total (`Σ size × iterations` over all sites).
    pub heap: Arc<ComplexityExpression>,
    /// Auxiliary (non-heap, non-stack, e.g. register/temporary) usage.
    pub auxiliary: Arc<ComplexityExpression>,
    /// `true` if the procedure performs its work without extra heap
    /// allocation proportional to input size.
    pub in_place: bool,
    /// `true` if the sole recursive call is a syntactic tail call, letting
    /// stack usage collapse to `O(1)`.
    pub tail_recursive: bool,
    /// Every allocation site discovered during the walk.
    pub allocations: Vec<AllocationSite>,
}

/// Which recognized randomized-algorithm pattern produced a
/// [`ComplexityKind::Probabilistic`] bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ProbabilisticSource {
    /// Hash-based container access.
    HashAccess,
    /// Direct use of a random-number API.
    RandomNumberGeneration,
    /// Fisher–Yates-style shuffle.
    FisherYatesShuffle,
    /// Randomized pivot selection (e.g. randomized quickselect/quicksort).
    RandomPivot,
    /// A Monte-Carlo-named predicate or loop bound.
    MonteCarlo,
}

/// The shape of the probability distribution governing a
/// [`ComplexityKind::Probabilistic`] bound's expected/worst gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Distribution {
    /// Uniform over a bounded range (e.g. uniform random pivot choice).
    Uniform,
    /// Geometric tail (e.g. expected probes until first hash hit).
    Geometric,
    /// A high-probability bound with no simple closed-form distribution
    /// (e.g. "whp O(log n) with randomized balancing").
    HighProbabilityBound,
}

/// Expected/worst-case bound pair for a randomized algorithm, per the
/// extractor's probabilistic sub-analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilisticData {
    /// Expected-case bound.
    pub expected: Arc<ComplexityExpression>,
    /// Worst-case bound.
    pub worst: Arc<ComplexityExpression>,
    /// Which pattern was detected.
    pub source: ProbabilisticSource,
    /// The shape of the underlying distribution.
    pub distribution: Distribution,
    /// Free-text assumptions the bound depends on (e.g. "keys hashed
    /// uniformly at random").
    pub assumptions: Vec<String>,
}

/// The structural shape of a [`ComplexityExpression`] node.
///
/// Most variants hold `Arc<ComplexityExpression>` children; this is what
/// makes [`ComplexityExpression::clone`] cheap regardless of subtree size.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ComplexityKind {
    /// A non-negative literal constant.
    Const(f64),
    /// `O(v)`.
    Var(Variable),
    /// `c·v`.
    Linear(f64, Variable),
    /// A sparse polynomial in one variable.
    Poly(Variable, Polynomial),
    /// `c·log_base(v)`.
    Log(f64, Variable, f64),
    /// `v^k · log^j(v)`, real `k`, non-negative integer `j`.
    PolyLog(f64, u32, Variable),
    /// `coef · base^v`.
    Exp(f64, Variable, f64),
    /// `coef · v!`.
    Factorial(Variable, f64),
    /// `base_expr ^ exponent`, for composite bases.
    Power(Arc<ComplexityExpression>, f64),
    /// `log_base(expr)`, for composite arguments.
    LogOf(Arc<ComplexityExpression>, f64),
    /// `base ^ expr`, for composite exponents.
    ExpOf(f64, Arc<ComplexityExpression>),
    /// `expr!`, for composite arguments.
    FactorialOf(Arc<ComplexityExpression>),
    /// A binary combination of two expressions.
    Binary(Arc<ComplexityExpression>, BinaryOp, Arc<ComplexityExpression>),
    /// A named conditional bound (e.g. best/worst-case split) with a
    /// human-readable description of the condition.
    Conditional(Arc<str>, Arc<ComplexityExpression>, Arc<ComplexityExpression>),
    /// An unsolved recurrence, awaiting the recurrence solver.
    Recurrence(Box<RecurrenceData>),
    /// `(amortized, worst)` bound pair, e.g. dynamic-array append.
    Amortized(Arc<ComplexityExpression>, Arc<ComplexityExpression>),
    /// A parallel work/span bound.
    Parallel(Box<ParallelData>),
    /// A memory bound.
    Memory(Box<MemoryData>),
    /// A randomized-algorithm expected/worst bound.
    Probabilistic(Box<ProbabilisticData>),
}

/// A symbolic asymptotic complexity expression.
///
/// Equality, hashing, and ordering are all structural and driven by the
/// precomputed `hash` field for fast rejection, matching this crate's
/// architectural ancestor's `Expr` type.
#[derive(Debug, Clone)]
pub struct ComplexityExpression {
    hash: u64,
    kind: ComplexityKind,
}

impl ComplexityExpression {
    /// The structural shape of this expression.
    #[must_use]
    pub fn kind(&self) -> &ComplexityKind {
        &self.kind
    }

    /// Wrap `self` in an `Arc`, the form every composite constructor expects
    /// for its children.
    #[must_use]
    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl PartialEq for ComplexityExpression {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.kind == other.kind
    }
}

impl Eq for ComplexityExpression {}

impl std::hash::Hash for ComplexityExpression {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

impl std::ops::Deref for ComplexityExpression {
    type Target = ComplexityKind;

    fn deref(&self) -> &Self::Target {
        &self.kind
    }
}
