//! Diagnostics-as-data (§7 "Error Handling Design").
//!
//! Nothing in this crate's core throws. Every fallible step appends a
//! [`Diagnostic`] to the result instead of a `panic!`/`eprintln!`, following
//! the ancestor's `DiffError` manual-`Display` pattern but carried as
//! ordinary return data rather than a `Result`'s error channel — a single
//! `analyze_procedure` call can produce many diagnostics without aborting.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which part of the error taxonomy (§7) a diagnostic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DiagnosticCategory {
    /// Missing body, unrecognized expression shape, unresolvable symbol.
    Structural,
    /// A recurrence did not fit any available theorem.
    SolverGap,
    /// Non-convergence in a numerical solver, or divergent sampling.
    Numerical,
    /// The host adapter raised or returned inconsistent data for one node.
    HostAdapterFault,
}

/// Severity of a [`Diagnostic`]. Severity never changes whether analysis
/// continues — it only guides how a consumer surfaces the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Informational; the analyzer made a reasonable default choice.
    Info,
    /// The analyzer fell back to a conservative default; the result may be
    /// looser than the true bound.
    Warning,
    /// The result for this procedure should be reviewed by a human.
    Error,
}

/// A single diagnostic message produced during analysis.
///
/// Diagnostics are purely informational data: appending one never changes
/// control flow, and a caller may safely ignore the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    category: DiagnosticCategory,
    severity: Severity,
    message: String,
    suggestions: Vec<String>,
}

impl Diagnostic {
    /// Build a new diagnostic with no suggestions.
    #[must_use]
    pub fn new(category: DiagnosticCategory, severity: Severity, message: impl Into<String>) -> Self {
        Self { category, severity, message: message.into(), suggestions: Vec::new() }
    }

    /// Attach suggestion strings (e.g. "try Akra-Bazzi", "annotate with
    /// `Complexity(\"O(n)\")`").
    #[must_use]
    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    /// Shorthand for a [`DiagnosticCategory::Structural`] warning.
    #[must_use]
    pub fn structural(message: impl Into<String>) -> Self {
        Self::new(DiagnosticCategory::Structural, Severity::Warning, message)
    }

    /// Shorthand for a [`DiagnosticCategory::SolverGap`] error (always
    /// raises `requires_review`).
    #[must_use]
    pub fn solver_gap(message: impl Into<String>) -> Self {
        Self::new(DiagnosticCategory::SolverGap, Severity::Error, message)
    }

    /// Shorthand for a [`DiagnosticCategory::Numerical`] warning.
    #[must_use]
    pub fn numerical(message: impl Into<String>) -> Self {
        Self::new(DiagnosticCategory::Numerical, Severity::Warning, message)
    }

    /// Shorthand for a [`DiagnosticCategory::HostAdapterFault`] warning.
    #[must_use]
    pub fn host_adapter_fault(message: impl Into<String>) -> Self {
        Self::new(DiagnosticCategory::HostAdapterFault, Severity::Warning, message)
    }

    /// Which part of the taxonomy this diagnostic belongs to.
    #[must_use]
    pub const fn category(&self) -> DiagnosticCategory {
        self.category
    }

    /// The diagnostic's severity.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// The human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Suggested next steps, if any.
    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}/{:?}] {}", self.category, self.severity, self.message)
    }
}

impl std::error::Error for Diagnostic {}

/// `true` if any diagnostic in the list is severe enough that a caller
/// should set `requires_review` on its result.
#[must_use]
pub fn requires_review(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(|d| d.severity() == Severity::Error)
}
