//! A single BCL table entry (§3 "ComplexityMapping", §4.2).

use std::sync::Arc;

use asymptote_algebra::ComplexityExpression;

/// How confident the analyzer should be in a [`ComplexityMapping`], from
/// strongest to weakest evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Source {
    /// Taken directly from the standard library's own documented complexity
    /// guarantee.
    Documented,
    /// Attested by a widely cited secondary source (a textbook, a language
    /// design document) rather than the library's own documentation.
    Attested,
    /// Derived from empirical benchmarking of the library's actual
    /// implementation.
    Empirical,
    /// Inferred from the shape of a closely related, documented operation.
    Inferred,
    /// A conservative default used only when nothing more specific is
    /// known.
    Heuristic,
}

/// A caveat flag attached to a [`ComplexityMapping`], carried through to the
/// analyzer's diagnostics rather than silently folded into the bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum NoteFlag {
    /// The bound given is amortized, not worst-case-per-call.
    Amortized,
    /// The operation is lazily evaluated; cost is paid at enumeration time,
    /// not at construction.
    DeferredExecution,
    /// The operation may exhibit pathological backtracking on adversarial
    /// input (e.g. certain regex engines).
    BacktrackingWarning,
    /// Actual cost depends on runtime data distribution beyond what static
    /// analysis can see (e.g. hash collision rate).
    InputDependent,
    /// The operation performs internal synchronization.
    ThreadSafe,
    /// No specific entry was found; this is the table's fallback default.
    Unknown,
}

/// A registry entry: the complexity of one BCL operation, the strength of
/// the evidence behind it, and any caveats.
#[derive(Debug, Clone)]
pub struct ComplexityMapping {
    complexity: Arc<ComplexityExpression>,
    source: Source,
    notes_flags: Vec<NoteFlag>,
}

impl ComplexityMapping {
    /// Build a new mapping.
    #[must_use]
    pub fn new(complexity: Arc<ComplexityExpression>, source: Source, notes_flags: Vec<NoteFlag>) -> Self {
        Self { complexity, source, notes_flags }
    }

    /// The complexity bound itself.
    #[must_use]
    pub fn complexity(&self) -> &Arc<ComplexityExpression> {
        &self.complexity
    }

    /// How strong the evidence for this bound is.
    #[must_use]
    pub const fn source(&self) -> Source {
        self.source
    }

    /// Caveat flags attached to this bound.
    #[must_use]
    pub fn notes_flags(&self) -> &[NoteFlag] {
        &self.notes_flags
    }

    /// `true` if this mapping carries the given flag.
    #[must_use]
    pub fn has_flag(&self, flag: NoteFlag) -> bool {
        self.notes_flags.contains(&flag)
    }

    /// The table's fallback default: `O(n)`, flagged `Unknown`.
    #[must_use]
    pub fn unknown_default(input_variable: asymptote_algebra::Variable) -> Self {
        Self {
            complexity: Arc::new(ComplexityExpression::var(input_variable)),
            source: Source::Heuristic,
            notes_flags: vec![NoteFlag::Unknown],
        }
    }
}
