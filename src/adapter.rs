//! Host adapter traits (§6 "External Interfaces: Host adapter (consumed)").
//!
//! This crate never parses a host language itself. Instead the host embeds
//! it by implementing these traits over its own parser/binder's syntax
//! tree. Every accessor returns an opaque handle or a small, stable "kind
//! tag" enum so the extractor never needs to know which concrete language it
//! is looking at.

/// The kind of an [`HostExpr`] node. Mirrors the shapes listed in §6:
/// literal, identifier, member-access, call, object-creation, binary-op,
/// unary-op, assignment, cast, lambda, plus the loop/branch/block
/// statement-level shapes the extractor needs to drive traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ExprKind {
    /// A literal constant (number, string, boolean, etc).
    Literal,
    /// A bare name reference.
    Identifier,
    /// `a.b` field or property access.
    MemberAccess,
    /// A procedure or method invocation.
    Call,
    /// `new T(...)` or equivalent construction.
    ObjectCreation,
    /// A binary operator application.
    BinaryOp,
    /// A unary operator application.
    UnaryOp,
    /// An assignment, including compound assignment (`+=`, etc).
    Assignment,
    /// An explicit type cast or conversion.
    Cast,
    /// An anonymous function or closure literal.
    Lambda,
    /// An indexing expression (`a[i]`).
    Index,
    /// A conditional (ternary) expression.
    Conditional,
    /// Anything the adapter cannot classify more specifically.
    Other,
}

/// The kind of a [`Statement`]. Covers the control-flow shapes the loop-bound
/// analyzer and composition rules need to recognize (§4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum StatementKind {
    /// A bare expression evaluated for effect.
    Expression,
    /// A counted or condition-driven loop (`for`, `while`, `do-while`).
    Loop,
    /// An iterate-over-collection loop (`foreach` or equivalent).
    ForEach,
    /// An `if`/`else` branch.
    Branch,
    /// A `switch`/`match` branch with more than two arms.
    MultiBranch,
    /// A `return` statement.
    Return,
    /// A block containing nested statements.
    Block,
    /// A `try`/`catch`/`finally` construct.
    TryCatch,
    /// An `await` point or `async` block boundary.
    Await,
    /// A recognized parallel construct (`Parallel.For`, a task-spawning call).
    ParallelConstruct,
    /// Anything the adapter cannot classify more specifically.
    Other,
}

/// The arithmetic operator carried by a [`ExprKind::BinaryOp`] node or a
/// compound [`ExprKind::Assignment`] (`+=`, `*=`, ...). Exists so the
/// loop-bound step classifier (§4.3.1) can tell an additive step (`i++`,
/// `i += 1`) from a multiplicative one (`i *= 2`, `i /= 2`) without the
/// extractor needing to know the host's own operator token representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ArithmeticOperator {
    /// `+`, `+=`, `++`.
    Add,
    /// `-`, `-=`, `--`.
    Subtract,
    /// `*`, `*=`.
    Multiply,
    /// `/`, `/=`.
    Divide,
    /// `%`, `%=`.
    Modulo,
    /// Anything not one of the above (comparisons, bitwise, logical, ...).
    Other,
}

/// An opaque resolved symbol handle (a variable, parameter, or field).
///
/// The extractor only ever compares symbols for identity and asks for their
/// declared name; it never needs to know how the host represents bindings
/// internally.
pub trait HostSymbol {
    /// The symbol's declared name, for diagnostics and variable naming.
    fn name(&self) -> &str;
}

/// An opaque expression node from the host's syntax tree.
pub trait HostExpr {
    /// The symbol type this adapter resolves expressions to.
    type Symbol: HostSymbol;

    /// This node's shape.
    fn kind(&self) -> ExprKind;

    /// The symbol this expression resolves to, if any (e.g. the target of an
    /// identifier or member access).
    fn resolved_symbol(&self) -> Option<Self::Symbol>;

    /// The name of this expression's resolved type, if the host's binder
    /// determined one (used for BCL lookups on method calls).
    fn resolved_type_name(&self) -> Option<&str>;

    /// Direct child expressions, in source order.
    fn children(&self) -> Vec<Self>
    where
        Self: Sized;

    /// For a [`ExprKind::Call`] node, the name of the called method.
    fn call_method_name(&self) -> Option<&str>;

    /// For a [`ExprKind::Call`] node, the number of argument expressions.
    fn call_arg_count(&self) -> Option<usize>;

    /// For a literal, its numeric value if it is one (used to recognize
    /// fixed loop bounds and recurrence scale factors).
    fn literal_number(&self) -> Option<f64>;

    /// For a [`ExprKind::BinaryOp`] node or a compound [`ExprKind::Assignment`],
    /// which arithmetic operator it carries, if classifiable.
    fn arithmetic_operator(&self) -> Option<ArithmeticOperator>;
}

/// An opaque statement node from the host's syntax tree.
///
/// Loop constructs expose their initializer/condition/step/body as separate
/// accessors, per §6, so the loop-bound analyzer can examine each part
/// without the host having to normalize its own loop grammar first.
pub trait Statement {
    /// The expression type this adapter produces.
    type Expr: HostExpr;

    /// This statement's shape.
    fn kind(&self) -> StatementKind;

    /// Nested statements, for [`StatementKind::Block`],
    /// [`StatementKind::Branch`], [`StatementKind::MultiBranch`], and loop
    /// bodies.
    fn children(&self) -> Vec<Self>
    where
        Self: Sized;

    /// A loop's initializer statement (e.g. `i = 0`), if this is a
    /// [`StatementKind::Loop`].
    fn loop_initializer(&self) -> Option<Self>
    where
        Self: Sized;

    /// A loop's condition expression (e.g. `i < n`), if this is a
    /// [`StatementKind::Loop`].
    fn loop_condition(&self) -> Option<Self::Expr>;

    /// A loop's step expression (e.g. `i++`, `i /= 2`), if this is a
    /// [`StatementKind::Loop`].
    fn loop_step(&self) -> Option<Self::Expr>;

    /// The collection expression of a [`StatementKind::ForEach`] loop.
    fn foreach_collection(&self) -> Option<Self::Expr>;

    /// The loop/branch/block body, if this statement has one.
    fn body(&self) -> Option<Self>
    where
        Self: Sized;

    /// The top-level expression, for [`StatementKind::Expression`] and
    /// [`StatementKind::Return`].
    fn expression(&self) -> Option<Self::Expr>;
}

/// A single declared parameter, for arity and role inference.
pub struct Parameter {
    /// The parameter's declared name.
    pub name: String,
    /// The parameter's declared type name, if known.
    pub type_name: Option<String>,
}

/// An opaque procedure (function, method, constructor) from the host's
/// syntax tree.
pub trait Procedure {
    /// The statement type this adapter produces.
    type Stmt: Statement;

    /// The procedure's declared name.
    fn name(&self) -> &str;

    /// The declaring type's name, if the procedure is a method.
    fn declaring_type_name(&self) -> Option<&str>;

    /// Declared parameters, in order.
    fn parameters(&self) -> Vec<Parameter>;

    /// The procedure's body, if one is available (absent for abstract or
    /// external declarations, handled as a [`crate::diagnostics::Diagnostic::structural`]).
    fn body(&self) -> Option<Self::Stmt>;

    /// A `Complexity("O(...)")` annotation or XML-doc complexity note, if
    /// present (§6 "Optional attribute/doc input").
    fn complexity_annotation(&self) -> Option<&str>;

    /// The source file this procedure was defined in.
    fn file(&self) -> &str;

    /// The 1-based source line this procedure's definition starts at.
    fn line(&self) -> u32;
}

/// An opaque syntax tree, the adapter's top-level handle.
pub trait SyntaxTree {
    /// The procedure type this adapter produces.
    type Proc: Procedure;

    /// All procedures declared anywhere in this tree.
    fn procedures(&self) -> Vec<Self::Proc>;
}
