//! Named input-size placeholders used throughout complexity expressions.

use std::fmt;
use std::sync::Arc;

/// The semantic role a [`Variable`] plays in a procedure's signature.
///
/// Two variables are equal iff both their name and role match (§3). The role
/// exists mainly so the extractor can pick a sensible default name/kind for
/// a parameter (a collection gets `DataCount`, everything else `InputSize`)
/// and so the big-O ordering can break ties between incomparable variables
/// in a deterministic, human-meaningful way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum VariableRole {
    /// The generic size of an input, when nothing more specific is known.
    InputSize,
    /// Number of elements in a collection (`list.len()`, `.Count`, ...).
    DataCount,
    /// Number of vertices in a graph-shaped input.
    VertexCount,
    /// Number of edges in a graph-shaped input.
    EdgeCount,
    /// Height of a tree-shaped input.
    TreeHeight,
    /// Length of a string/text input.
    StringLength,
    /// A secondary size, used when a procedure has more than one
    /// independently-varying input (e.g. two sequences being merged).
    SecondarySize,
    /// Anything the extractor could not classify more specifically.
    Custom,
}

impl fmt::Display for VariableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InputSize => "input-size",
            Self::DataCount => "data-count",
            Self::VertexCount => "vertex-count",
            Self::EdgeCount => "edge-count",
            Self::TreeHeight => "tree-height",
            Self::StringLength => "string-length",
            Self::SecondarySize => "secondary-size",
            Self::Custom => "custom",
        };
        write!(f, "{label}")
    }
}

/// A named input-size placeholder, e.g. the `n` in `O(n log n)`.
///
/// `Variable` is value-typed and freely copyable: cloning only bumps an
/// `Arc` refcount, never allocates a new string. Equality and ordering are
/// defined on `(name, role)`, matching §3's invariant exactly.
#[derive(Debug, Clone, Eq)]
pub struct Variable {
    name: Arc<str>,
    role: VariableRole,
}

impl Variable {
    /// Create a new variable with the given name and semantic role.
    #[must_use]
    pub fn new(name: impl AsRef<str>, role: VariableRole) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            role,
        }
    }

    /// Shorthand for the common case: a generic `InputSize` variable named `n`.
    #[must_use]
    pub fn n() -> Self {
        Self::new("n", VariableRole::InputSize)
    }

    /// The variable's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The variable's semantic role.
    #[must_use]
    pub const fn role(&self) -> VariableRole {
        self.role
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.role == other.role && self.name.as_ref() == other.name.as_ref()
    }
}

impl std::hash::Hash for Variable {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.as_ref().hash(state);
        self.role.hash(state);
    }
}

impl PartialOrd for Variable {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Variable {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.name
            .as_ref()
            .cmp(other.name.as_ref())
            .then_with(|| self.role.cmp(&other.role))
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_name_and_role() {
        let a = Variable::new("n", VariableRole::InputSize);
        let b = Variable::new("n", VariableRole::InputSize);
        let c = Variable::new("n", VariableRole::DataCount);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn clone_is_cheap_and_equal() {
        let a = Variable::new("items", VariableRole::DataCount);
        let b = a.clone();
        assert_eq!(a, b);
    }
}
