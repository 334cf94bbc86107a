//! A minimal in-memory host adapter implementation, used only by this
//! module's own test suites to exercise the extractor without a real
//! language binder.

#![cfg(test)]

use crate::adapter::{ArithmeticOperator, ExprKind, HostExpr, HostSymbol, Parameter, Procedure, Statement, StatementKind, SyntaxTree};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockSymbol {
    pub name: String,
}

impl HostSymbol for MockSymbol {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockExpr {
    pub kind: ExprKind,
    pub symbol: Option<MockSymbol>,
    pub type_name: Option<String>,
    pub children: Vec<MockExpr>,
    pub call_method_name: Option<String>,
    pub call_arg_count: Option<usize>,
    pub literal_number: Option<f64>,
    pub operator: Option<ArithmeticOperator>,
}

impl Default for ExprKind {
    fn default() -> Self {
        Self::Other
    }
}

impl MockExpr {
    pub fn literal(value: f64) -> Self {
        Self { kind: ExprKind::Literal, literal_number: Some(value), ..Default::default() }
    }

    pub fn var(name: &str) -> Self {
        Self {
            kind: ExprKind::Identifier,
            symbol: Some(MockSymbol { name: name.to_owned() }),
            ..Default::default()
        }
    }

    pub fn binary(op: ArithmeticOperator, left: MockExpr, right: MockExpr) -> Self {
        Self { kind: ExprKind::BinaryOp, operator: Some(op), children: vec![left, right], ..Default::default() }
    }

    pub fn assignment(op: ArithmeticOperator, target: MockExpr, value: MockExpr) -> Self {
        Self { kind: ExprKind::Assignment, operator: Some(op), children: vec![target, value], ..Default::default() }
    }

    pub fn call(method: &str, declaring_type: Option<&str>, args: Vec<MockExpr>) -> Self {
        Self {
            kind: ExprKind::Call,
            call_method_name: Some(method.to_owned()),
            call_arg_count: Some(args.len()),
            type_name: declaring_type.map(str::to_owned),
            children: args,
            ..Default::default()
        }
    }
}

impl HostExpr for MockExpr {
    type Symbol = MockSymbol;

    fn kind(&self) -> ExprKind {
        self.kind
    }

    fn resolved_symbol(&self) -> Option<Self::Symbol> {
        self.symbol.clone()
    }

    fn resolved_type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    fn children(&self) -> Vec<Self> {
        self.children.clone()
    }

    fn call_method_name(&self) -> Option<&str> {
        self.call_method_name.as_deref()
    }

    fn call_arg_count(&self) -> Option<usize> {
        self.call_arg_count
    }

    fn literal_number(&self) -> Option<f64> {
        self.literal_number
    }

    fn arithmetic_operator(&self) -> Option<ArithmeticOperator> {
        self.operator
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockStmt {
    pub kind: StatementKind,
    pub children: Vec<MockStmt>,
    pub initializer: Option<Box<MockStmt>>,
    pub condition: Option<MockExpr>,
    pub step: Option<MockExpr>,
    pub foreach_collection: Option<MockExpr>,
    pub body: Option<Box<MockStmt>>,
    pub expression: Option<MockExpr>,
}

impl Default for StatementKind {
    fn default() -> Self {
        Self::Other
    }
}

impl MockStmt {
    pub fn expr_stmt(expr: MockExpr) -> Self {
        Self { kind: StatementKind::Expression, expression: Some(expr), ..Default::default() }
    }

    pub fn return_stmt(expr: MockExpr) -> Self {
        Self { kind: StatementKind::Return, expression: Some(expr), ..Default::default() }
    }

    pub fn block(children: Vec<MockStmt>) -> Self {
        Self { kind: StatementKind::Block, children, ..Default::default() }
    }

    pub fn branch(then_branch: MockStmt, else_branch: Option<MockStmt>) -> Self {
        let mut children = vec![then_branch];
        if let Some(else_branch) = else_branch {
            children.push(else_branch);
        }
        Self { kind: StatementKind::Branch, children, ..Default::default() }
    }

    pub fn loop_stmt(initializer: MockStmt, condition: MockExpr, step: MockExpr, body: MockStmt) -> Self {
        Self {
            kind: StatementKind::Loop,
            initializer: Some(Box::new(initializer)),
            condition: Some(condition),
            step: Some(step),
            body: Some(Box::new(body)),
            ..Default::default()
        }
    }

    pub fn foreach_stmt(collection: MockExpr, body: MockStmt) -> Self {
        Self { kind: StatementKind::ForEach, foreach_collection: Some(collection), body: Some(Box::new(body)), ..Default::default() }
    }
}

impl Statement for MockStmt {
    type Expr = MockExpr;

    fn kind(&self) -> StatementKind {
        self.kind
    }

    fn children(&self) -> Vec<Self> {
        self.children.clone()
    }

    fn loop_initializer(&self) -> Option<Self> {
        self.initializer.as_ref().map(|stmt| (**stmt).clone())
    }

    fn loop_condition(&self) -> Option<Self::Expr> {
        self.condition.clone()
    }

    fn loop_step(&self) -> Option<Self::Expr> {
        self.step.clone()
    }

    fn foreach_collection(&self) -> Option<Self::Expr> {
        self.foreach_collection.clone()
    }

    fn body(&self) -> Option<Self> {
        self.body.as_ref().map(|stmt| (**stmt).clone())
    }

    fn expression(&self) -> Option<Self::Expr> {
        self.expression.clone()
    }
}

#[derive(Debug, Clone)]
pub struct MockProc {
    pub name: String,
    pub declaring_type: Option<String>,
    pub parameters: Vec<Parameter>,
    pub body: Option<MockStmt>,
    pub annotation: Option<String>,
    pub file: String,
    pub line: u32,
}

impl MockProc {
    pub fn new(name: &str, parameters: Vec<Parameter>, body: Option<MockStmt>) -> Self {
        Self {
            name: name.to_owned(),
            declaring_type: None,
            parameters,
            body,
            annotation: None,
            file: "test.src".to_owned(),
            line: 1,
        }
    }
}

impl Procedure for MockProc {
    type Stmt = MockStmt;

    fn name(&self) -> &str {
        &self.name
    }

    fn declaring_type_name(&self) -> Option<&str> {
        self.declaring_type.as_deref()
    }

    fn parameters(&self) -> Vec<Parameter> {
        self.parameters
            .iter()
            .map(|p| Parameter { name: p.name.clone(), type_name: p.type_name.clone() })
            .collect()
    }

    fn body(&self) -> Option<Self::Stmt> {
        self.body.clone()
    }

    fn complexity_annotation(&self) -> Option<&str> {
        self.annotation.as_deref()
    }

    fn file(&self) -> &str {
        &self.file
    }

    fn line(&self) -> u32 {
        self.line
    }
}

pub struct MockTree {
    pub procedures: Vec<MockProc>,
}

impl SyntaxTree for MockTree {
    type Proc = MockProc;

    fn procedures(&self) -> Vec<Self::Proc> {
        self.procedures.clone()
    }
}
