//! The BCL lookup table itself (§4.2).
//!
//! A process-wide, immutable registry keyed by
//! `(declaring-type-name, method-name, arg-count | -1)`. Lookup falls
//! through unknown arg-counts, then a small set of supertype fallbacks,
//! before settling on the [`ComplexityMapping::unknown_default`].

use std::sync::{Arc, LazyLock};

use asymptote_algebra::Variable;
use rustc_hash::FxHashMap;

use crate::mapping::ComplexityMapping;

/// Sentinel arg-count meaning "any arity", used both as a registration key
/// and as the final fallback lookup before giving up.
pub const ANY_ARITY: i32 = -1;

type Key = (Arc<str>, Arc<str>, i32);

/// A lookup table of BCL operation costs.
///
/// Construction is static data built once; the registry itself is
/// read-only thereafter, matching §5's "no shared mutable state in the
/// core." Use [`Registry::builder`] to start from the built-in seed set and
/// layer custom entries on top before freezing it into a `Registry`.
#[derive(Debug, Clone)]
pub struct Registry {
    entries: FxHashMap<Key, ComplexityMapping>,
    supertypes: FxHashMap<Arc<str>, Vec<Arc<str>>>,
}

/// Builder for constructing a [`Registry`], letting a host application
/// append custom entries at startup (§4.2: "implementations should allow
/// appending custom entries").
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: FxHashMap<Key, ComplexityMapping>,
    supertypes: FxHashMap<Arc<str>, Vec<Arc<str>>>,
}

impl RegistryBuilder {
    /// Start an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mapping for `(declaring_type, method, arg_count)`. Pass
    /// [`ANY_ARITY`] for `arg_count` to match any call arity not otherwise
    /// registered for this `(type, method)` pair.
    #[must_use]
    pub fn with_entry(
        mut self,
        declaring_type: impl AsRef<str>,
        method: impl AsRef<str>,
        arg_count: i32,
        mapping: ComplexityMapping,
    ) -> Self {
        self.entries.insert(
            (Arc::from(declaring_type.as_ref()), Arc::from(method.as_ref()), arg_count),
            mapping,
        );
        self
    }

    /// Declare that `type_name` should fall back to `supertype` when no
    /// direct entry is found.
    #[must_use]
    pub fn with_supertype(mut self, type_name: impl AsRef<str>, supertype: impl AsRef<str>) -> Self {
        self.supertypes
            .entry(Arc::from(type_name.as_ref()))
            .or_default()
            .push(Arc::from(supertype.as_ref()));
        self
    }

    /// Freeze the builder into a read-only [`Registry`].
    #[must_use]
    pub fn build(self) -> Registry {
        Registry { entries: self.entries, supertypes: self.supertypes }
    }
}

impl Registry {
    /// Start a builder seeded with the built-in entries of
    /// [`crate::defaults::seed`].
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        crate::defaults::seed(RegistryBuilder::new())
    }

    /// Look up the cost of `declaring_type::method(arg_count args)`.
    ///
    /// Falls through, in order: exact arity, [`ANY_ARITY`] for the same
    /// type, then the same lookup repeated for each registered supertype of
    /// `declaring_type` (breadth-first, so a nearer supertype wins over a
    /// more distant one). On a total miss, returns
    /// [`ComplexityMapping::unknown_default`] tagged with `input_variable`.
    #[must_use]
    pub fn lookup(&self, declaring_type: &str, method: &str, arg_count: i32, input_variable: Variable) -> ComplexityMapping {
        self.lookup_inner(declaring_type, method, arg_count, &mut Vec::new())
            .unwrap_or_else(|| ComplexityMapping::unknown_default(input_variable))
    }

    fn lookup_inner(&self, declaring_type: &str, method: &str, arg_count: i32, visited: &mut Vec<String>) -> Option<ComplexityMapping> {
        if visited.iter().any(|t| t == declaring_type) {
            return None;
        }
        visited.push(declaring_type.to_owned());

        let exact = (Arc::from(declaring_type), Arc::from(method), arg_count);
        if let Some(mapping) = self.entries.get(&exact) {
            return Some(mapping.clone());
        }
        let any_arity: Key = (Arc::from(declaring_type), Arc::from(method), ANY_ARITY);
        if let Some(mapping) = self.entries.get(&any_arity) {
            return Some(mapping.clone());
        }
        for supertype in self.supertypes.get(declaring_type).into_iter().flatten() {
            if let Some(mapping) = self.lookup_inner(supertype, method, arg_count, visited) {
                return Some(mapping);
            }
        }
        None
    }
}

/// The default, process-wide registry built from the seed set, constructed
/// once on first access.
pub static DEFAULT_REGISTRY: LazyLock<Registry> = LazyLock::new(|| Registry::builder().build());

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::Source;
    use asymptote_algebra::{ComplexityExpression, VariableRole};

    #[test]
    fn falls_back_to_any_arity() {
        let registry = RegistryBuilder::new()
            .with_entry(
                "List",
                "Add",
                ANY_ARITY,
                ComplexityMapping::new(Arc::new(ComplexityExpression::constant(1.0)), Source::Documented, vec![]),
            )
            .build();
        let found = registry.lookup("List", "Add", 3, Variable::new("n", VariableRole::DataCount));
        assert_eq!(found.source(), Source::Documented);
    }

    #[test]
    fn unknown_method_falls_back_to_heuristic() {
        let registry = RegistryBuilder::new().build();
        let found = registry.lookup("Frobnicator", "frob", 1, Variable::new("n", VariableRole::InputSize));
        assert_eq!(found.source(), Source::Heuristic);
    }

    #[test]
    fn supertype_fallback_is_followed() {
        let registry = RegistryBuilder::new()
            .with_entry(
                "IList",
                "Contains",
                ANY_ARITY,
                ComplexityMapping::new(Arc::new(ComplexityExpression::var(Variable::n())), Source::Documented, vec![]),
            )
            .with_supertype("List", "IList")
            .build();
        let found = registry.lookup("List", "Contains", 1, Variable::n());
        assert_eq!(found.source(), Source::Documented);
    }
}
