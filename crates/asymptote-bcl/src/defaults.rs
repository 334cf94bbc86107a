//! The built-in seed set of BCL entries (§4.2).
//!
//! A representative, extensible seed for the common collection/sequence
//! operations of a mainstream OO standard library — not an exhaustive port
//! of any one library's API surface. Hosts append their own entries on top
//! via [`crate::registry::Registry::builder`].

use std::sync::Arc;

use asymptote_algebra::{ComplexityExpression, Variable, VariableRole};

use crate::mapping::{ComplexityMapping, NoteFlag, Source};
use crate::registry::{RegistryBuilder, ANY_ARITY};

fn n() -> Variable {
    Variable::new("n", VariableRole::DataCount)
}

fn const_one() -> Arc<ComplexityExpression> {
    Arc::new(ComplexityExpression::constant(1.0))
}

fn linear_n() -> Arc<ComplexityExpression> {
    Arc::new(ComplexityExpression::var(n()))
}

fn log_n() -> Arc<ComplexityExpression> {
    Arc::new(ComplexityExpression::log(1.0, n(), 2.0))
}

fn n_log_n() -> Arc<ComplexityExpression> {
    Arc::new(ComplexityExpression::mul(linear_n(), log_n()))
}

pub(crate) fn seed(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        // Indexed sequences: random access is O(1), structural edits are O(n).
        .with_entry("List", "get_item", 1, documented(const_one(), &[]))
        .with_entry("List", "set_item", 2, documented(const_one(), &[]))
        .with_entry(
            "List",
            "Add",
            ANY_ARITY,
            ComplexityMapping::new(
                Arc::new(ComplexityExpression::amortized(const_one(), linear_n())),
                Source::Documented,
                vec![NoteFlag::Amortized],
            ),
        )
        .with_entry("List", "Insert", 2, documented(linear_n(), &[]))
        .with_entry("List", "RemoveAt", 1, documented(linear_n(), &[]))
        .with_entry("List", "Contains", 1, documented(linear_n(), &[]))
        .with_entry("List", "IndexOf", 1, documented(linear_n(), &[]))
        .with_entry("List", "Sort", ANY_ARITY, documented(n_log_n(), &[]))
        .with_entry("List", "ToList", 0, documented(linear_n(), &[]))
        .with_entry("List", "Count", 0, documented(const_one(), &[]))
        // Hash-backed associative containers.
        .with_entry("Dictionary", "get_item", 1, documented(const_one(), &[]))
        .with_entry("Dictionary", "set_item", 2, documented(const_one(), &[]))
        .with_entry("Dictionary", "ContainsKey", 1, documented(const_one(), &[NoteFlag::InputDependent]))
        .with_entry("Dictionary", "Remove", 1, documented(const_one(), &[NoteFlag::InputDependent]))
        .with_entry("HashSet", "Contains", 1, documented(const_one(), &[NoteFlag::InputDependent]))
        .with_entry("HashSet", "Add", 1, documented(const_one(), &[NoteFlag::InputDependent]))
        // Sorted/tree-backed containers.
        .with_entry("SortedDictionary", "get_item", 1, documented(log_n(), &[]))
        .with_entry("SortedDictionary", "ContainsKey", 1, documented(log_n(), &[]))
        .with_entry("SortedSet", "Contains", 1, documented(log_n(), &[]))
        // Lazy sequence combinators: free to construct, paid for on enumeration.
        .with_entry("IEnumerable", "Select", 1, deferred(const_one()))
        .with_entry("IEnumerable", "Where", 1, deferred(const_one()))
        .with_entry("IEnumerable", "OrderBy", 1, deferred(n_log_n()))
        .with_entry("IEnumerable", "ToList", 0, documented(linear_n(), &[NoteFlag::DeferredExecution]))
        .with_entry("IEnumerable", "Count", 0, documented(linear_n(), &[]))
        .with_entry("IEnumerable", "Any", 1, documented(linear_n(), &[]))
        .with_entry("IEnumerable", "First", 0, documented(const_one(), &[]))
        // Strings.
        .with_entry("String", "get_Length", 0, documented(const_one(), &[]))
        .with_entry("String", "Concat", ANY_ARITY, documented(linear_n(), &[]))
        .with_entry("String", "Substring", ANY_ARITY, documented(linear_n(), &[]))
        .with_entry("String", "Split", ANY_ARITY, documented(linear_n(), &[]))
        // Backtracking-prone constructs.
        .with_entry(
            "Regex",
            "Match",
            ANY_ARITY,
            ComplexityMapping::new(linear_n(), Source::Heuristic, vec![NoteFlag::BacktrackingWarning]),
        )
        // Supertype fallbacks: concrete collection types degrade to their
        // interface's cost when no more specific entry exists.
        .with_supertype("List", "IList")
        .with_supertype("IList", "ICollection")
        .with_supertype("ICollection", "IEnumerable")
        .with_supertype("Dictionary", "IDictionary")
        .with_supertype("IDictionary", "ICollection")
        .with_supertype("HashSet", "ICollection")
        .with_supertype("SortedDictionary", "IDictionary")
        .with_supertype("SortedSet", "ICollection")
}

fn documented(complexity: Arc<ComplexityExpression>, flags: &[NoteFlag]) -> ComplexityMapping {
    ComplexityMapping::new(complexity, Source::Documented, flags.to_vec())
}

fn deferred(complexity: Arc<ComplexityExpression>) -> ComplexityMapping {
    ComplexityMapping::new(complexity, Source::Documented, vec![NoteFlag::DeferredExecution])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    #[test]
    fn list_add_is_amortized() {
        let registry = Registry::builder().build();
        let mapping = registry.lookup("List", "Add", 1, n());
        assert!(mapping.has_flag(NoteFlag::Amortized));
    }

    #[test]
    fn select_is_deferred() {
        let registry = Registry::builder().build();
        let mapping = registry.lookup("IEnumerable", "Select", 1, n());
        assert!(mapping.has_flag(NoteFlag::DeferredExecution));
    }

    #[test]
    fn dictionary_falls_back_to_icollection_for_unknown_method() {
        let registry = Registry::builder().build();
        let mapping = registry.lookup("Dictionary", "Clear", 0, n());
        // No entry for Clear anywhere in the chain; heuristic default applies.
        assert_eq!(mapping.source(), Source::Heuristic);
    }
}
