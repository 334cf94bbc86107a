//! Canonical symbolic algebra for asymptotic complexity expressions.
//!
//! This crate is the dependency-free leaf of the workspace: it defines the
//! [`Variable`]/[`ComplexityExpression`] data model, structural equality and
//! hashing, the big-O dominance ordering, free-variable collection,
//! substitution, numerical evaluation, canonical normalization, and big-O
//! string rendering. Nothing in here knows about a host language's syntax
//! tree, a BCL table, or a recurrence solver — those live further up the
//! workspace, built on top of the types exported here.

pub mod expr;
pub mod normalize;
pub mod poly;
pub mod variable;
pub mod visitor;

pub use expr::{
    big_o_cmp, to_big_o, AllocationSite, BinaryOp, ComplexityExpression, ComplexityKind,
    Distribution, MemoryData, ParallelData, ParallelPattern, ProbabilisticData,
    ProbabilisticSource, RecurrenceData, RecurrenceTerm, SUBTRACT_FORM_TOLERANCE,
};
pub use expr::evaluate::{evaluate, Assignment};
pub use expr::free_vars::free_variables;
pub use expr::substitute::substitute;
pub use normalize::normalize;
pub use poly::Polynomial;
pub use variable::{Variable, VariableRole};
