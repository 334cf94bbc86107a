//! Static asymptotic time/space complexity analysis for bound syntax trees
//! (see `SPEC_FULL.md` for the full module map).
//!
//! This crate consumes an already-parsed, already-bound syntax tree (via
//! the [`adapter`] traits) and produces, for every procedure, a symbolic
//! complexity expression in closed form together with a confidence score
//! and diagnostics (§6 "Result schema").
//!
//! The three core subsystems are:
//!
//! - [`extractor`] — walks the bound syntax tree and composes a
//!   per-procedure complexity expression (§4.3).
//! - [`call_graph`] — the directed graph of procedure references used to
//!   order analysis so callees are solved before callers (§4.4).
//! - [`recurrence`] — reduces the recurrences recursive procedures produce
//!   to closed-form bounds via the Master Theorem, Akra–Bazzi, or the
//!   subtract-form linear solver (§4.5).
//!
//! The canonical symbolic algebra itself ([`asymptote_algebra::ComplexityExpression`])
//! and the BCL lookup table ([`asymptote_bcl::Registry`]) live in their own
//! leaf crates so that a consumer (an editor integration, a CLI) can depend
//! on either without pulling in the extractor.

pub mod adapter;
pub mod call_graph;
pub mod confidence;
pub mod diagnostics;
pub mod external;
pub mod extractor;
pub mod recurrence;
pub mod result;

pub use adapter::{ArithmeticOperator, ExprKind, HostExpr, HostSymbol, Parameter, Procedure, Statement, StatementKind, SyntaxTree};
pub use confidence::{ConfidenceAssessment, ConfidenceFactors, ConfidenceLevel};
pub use diagnostics::{Diagnostic, DiagnosticCategory, Severity};
pub use extractor::analyze_syntax_tree;
pub use recurrence::Applicability;
pub use result::{ProcedureResult, RenderedComplexity};

/// The canonical complexity-expression algebra, re-exported for consumers
/// who want to build or inspect [`asymptote_algebra::ComplexityExpression`]
/// values directly (e.g. to seed a custom BCL entry).
pub use asymptote_algebra;
/// The BCL (base class library) lookup table, re-exported for consumers who
/// want to build a [`asymptote_bcl::Registry`] with custom entries before
/// calling [`analyze_syntax_tree`].
pub use asymptote_bcl;
