//! Depth-guarded tree walking over [`ComplexityExpression`].
//!
//! Mirrors the ancestor's `core::visitor` module: a small trait consumers
//! implement to react to each node, plus a `walk_expr` driver that recurses
//! with a depth counter instead of trusting the tree to be shallow.

use crate::expr::{ComplexityExpression, ComplexityKind};

/// Returned when a walk exceeds [`MAX_WALK_DEPTH`]. Complexity expressions
/// built by this crate's own normalizer never get this deep; a host adapter
/// handing back a pathological tree is the only realistic trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthExceeded;

/// The deepest a [`ComplexityExpression`] tree may recurse before
/// [`walk_expr`] gives up and returns [`DepthExceeded`] instead of
/// overflowing the stack.
pub const MAX_WALK_DEPTH: usize = 256;

/// Callback invoked once per node during [`walk_expr`], in post-order
/// (children before parents).
pub trait ExprVisitor {
    /// Called for every node, after its children have been visited.
    fn visit(&mut self, expr: &ComplexityExpression);
}

/// Walk `expr` post-order, calling `visitor.visit` on every node.
///
/// # Errors
///
/// Returns [`DepthExceeded`] without finishing the walk if the tree nests
/// deeper than [`MAX_WALK_DEPTH`].
pub fn walk_expr<V: ExprVisitor>(expr: &ComplexityExpression, visitor: &mut V) -> Result<(), DepthExceeded> {
    walk_with_depth(expr, visitor, 0)
}

fn walk_with_depth<V: ExprVisitor>(expr: &ComplexityExpression, visitor: &mut V, depth: usize) -> Result<(), DepthExceeded> {
    if depth > MAX_WALK_DEPTH {
        return Err(DepthExceeded);
    }
    match expr.kind() {
        ComplexityKind::Const(_)
        | ComplexityKind::Var(_)
        | ComplexityKind::Linear(..)
        | ComplexityKind::Poly(..)
        | ComplexityKind::Log(..)
        | ComplexityKind::PolyLog(..)
        | ComplexityKind::Exp(..)
        | ComplexityKind::Factorial(..) => {}
        ComplexityKind::Power(base, _) | ComplexityKind::LogOf(base, _) | ComplexityKind::ExpOf(_, base) | ComplexityKind::FactorialOf(base) => {
            walk_with_depth(base, visitor, depth + 1)?;
        }
        ComplexityKind::Binary(left, _, right) => {
            walk_with_depth(left, visitor, depth + 1)?;
            walk_with_depth(right, visitor, depth + 1)?;
        }
        ComplexityKind::Conditional(_, then_expr, else_expr) => {
            walk_with_depth(then_expr, visitor, depth + 1)?;
            walk_with_depth(else_expr, visitor, depth + 1)?;
        }
        ComplexityKind::Recurrence(data) => {
            walk_with_depth(&data.non_recursive_work, visitor, depth + 1)?;
            for term in &data.terms {
                walk_with_depth(&term.argument_expression, visitor, depth + 1)?;
            }
        }
        ComplexityKind::Amortized(amortized, worst) => {
            walk_with_depth(amortized, visitor, depth + 1)?;
            walk_with_depth(worst, visitor, depth + 1)?;
        }
        ComplexityKind::Parallel(data) => {
            walk_with_depth(&data.work, visitor, depth + 1)?;
            walk_with_depth(&data.span, visitor, depth + 1)?;
        }
        ComplexityKind::Memory(data) => {
            walk_with_depth(&data.total, visitor, depth + 1)?;
            walk_with_depth(&data.stack, visitor, depth + 1)?;
            walk_with_depth(&data.heap, visitor, depth + 1)?;
            walk_with_depth(&data.auxiliary, visitor, depth + 1)?;
            for site in &data.allocations {
                walk_with_depth(&site.size, visitor, depth + 1)?;
                walk_with_depth(&site.iterations, visitor, depth + 1)?;
            }
        }
        ComplexityKind::Probabilistic(data) => {
            walk_with_depth(&data.expected, visitor, depth + 1)?;
            walk_with_depth(&data.worst, visitor, depth + 1)?;
        }
    }
    visitor.visit(expr);
    Ok(())
}

/// A visitor that simply counts how many nodes a tree has.
#[derive(Debug, Default)]
pub struct NodeCounter {
    /// Nodes visited so far.
    pub count: usize,
}

impl ExprVisitor for NodeCounter {
    fn visit(&mut self, _expr: &ComplexityExpression) {
        self.count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::Variable;
    use std::sync::Arc;

    #[test]
    fn counts_every_node() {
        let expr = ComplexityExpression::add(
            Arc::new(ComplexityExpression::var(Variable::n())),
            Arc::new(ComplexityExpression::constant(1.0)),
        );
        let mut counter = NodeCounter::default();
        walk_expr(&expr, &mut counter).expect("shallow tree");
        assert_eq!(counter.count, 3);
    }
}
