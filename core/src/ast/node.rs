use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

use crate::location::Span;

use super::kind::{BinaryOperator, ExprKind, StmtKind};

/// Root of a decoded tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "_t")]
pub enum SourceUnit {
    Module {
        #[serde(default)]
        body: Vec<Stmt>,
    },
    Interactive {},
    Expression {},
    FunctionType {},
}

impl SourceUnit {
    pub fn module(body: Vec<Stmt>) -> Self {
        SourceUnit::Module { body }
    }

    /// Top-level statements; only a module has any.
    pub fn body(&self) -> Option<&[Stmt]> {
        match self {
            SourceUnit::Module { body } => Some(body),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            SourceUnit::Module { .. } => "Module",
            SourceUnit::Interactive { .. } => "Interactive",
            SourceUnit::Expression { .. } => "Expression",
            SourceUnit::FunctionType { .. } => "FunctionType",
        }
    }
}

/// Position fields every statement/expression node may carry.
#[derive(Deserialize)]
struct RawPosition {
    #[serde(default)]
    lineno: Option<usize>,
    #[serde(default)]
    col_offset: Option<usize>,
    #[serde(default)]
    end_lineno: Option<usize>,
    #[serde(default)]
    end_col_offset: Option<usize>,
}

impl RawPosition {
    fn into_span(self) -> Option<Span> {
        Span::from_positions(self.lineno, self.col_offset, self.end_lineno, self.end_col_offset)
    }
}

#[derive(Deserialize)]
struct RawStmt {
    #[serde(flatten)]
    kind: StmtKind,
    #[serde(flatten)]
    position: RawPosition,
}

#[derive(Deserialize)]
struct RawExpr {
    #[serde(flatten)]
    kind: ExprKind,
    #[serde(flatten)]
    position: RawPosition,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawStmt")]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Option<Span>,
}

impl From<RawStmt> for Stmt {
    fn from(raw: RawStmt) -> Self {
        Stmt { kind: raw.kind, span: raw.position.into_span() }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawExpr")]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Option<Span>,
}

impl From<RawExpr> for Expr {
    fn from(raw: RawExpr) -> Self {
        Expr { kind: raw.kind, span: raw.position.into_span() }
    }
}

/// Formal parameter list of a function definition.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Arguments {
    #[serde(default)]
    pub posonlyargs: Vec<Arg>,
    #[serde(default)]
    pub args: Vec<Arg>,
    #[serde(default)]
    pub vararg: Option<Arg>,
    #[serde(default)]
    pub kwonlyargs: Vec<Arg>,
    #[serde(default)]
    pub kw_defaults: Vec<Option<Expr>>,
    #[serde(default)]
    pub kwarg: Option<Arg>,
    #[serde(default)]
    pub defaults: Vec<Expr>,
}

impl Arguments {
    /// Plain positional parameters only.
    pub fn positional(args: Vec<Arg>) -> Self {
        Arguments { args, ..Default::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Arg {
    pub arg: String,
    #[serde(default)]
    pub annotation: Option<Expr>,
}

impl Arg {
    pub fn new(name: &str, annotation: Option<Expr>) -> Self {
        Arg { arg: name.to_string(), annotation }
    }
}

/// `name=value` at a call site or in a class header. `arg` is absent for
/// `**mapping` unpacking.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Keyword {
    #[serde(default)]
    pub arg: Option<String>,
    pub value: Expr,
}

impl Keyword {
    pub fn new(arg: &str, value: Expr) -> Self {
        Keyword { arg: Some(arg.to_string()), value }
    }
}

/// Literal payload of a `Constant` node.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Constant {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    /// Integer literal wider than `i64`, kept as its decimal digits.
    BigInt(String),
    Float(f64),
    Str(String),
}

impl<'de> Deserialize<'de> for Constant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ConstantVisitor)
    }
}

struct ConstantVisitor;

impl<'de> Visitor<'de> for ConstantVisitor {
    type Value = Constant;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null, a boolean, a number or a string")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Constant, E> {
        Ok(Constant::None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Constant, E> {
        Ok(Constant::None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Constant, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Constant, E> {
        Ok(Constant::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Constant, E> {
        Ok(Constant::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Constant, E> {
        Ok(i64::try_from(v).map(Constant::Int).unwrap_or_else(|_| Constant::BigInt(v.to_string())))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Constant, E> {
        Ok(Constant::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Constant, E> {
        Ok(Constant::Str(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Constant, E> {
        Ok(Constant::Str(v))
    }
}

impl Stmt {
    pub fn new(kind: StmtKind) -> Self {
        Stmt { kind, span: None }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn get_kind(&self) -> &StmtKind {
        &self.kind
    }

    pub fn get_span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    /// `target = value` with a single name target.
    pub fn assign(target: &str, value: Expr) -> Self {
        Stmt::new(StmtKind::Assign { targets: vec![Expr::name(target)], value: Box::new(value) })
    }

    /// `target: annotation = value`.
    pub fn ann_assign(target: &str, annotation: Expr, value: Option<Expr>) -> Self {
        Stmt::new(StmtKind::AnnAssign {
            target: Box::new(Expr::name(target)),
            annotation: Box::new(annotation),
            value: value.map(Box::new),
            simple: 1,
        })
    }

    pub fn aug_assign(target: &str, op: BinaryOperator, value: Expr) -> Self {
        Stmt::new(StmtKind::AugAssign { target: Box::new(Expr::name(target)), op, value: Box::new(value) })
    }

    pub fn ret(value: Option<Expr>) -> Self {
        Stmt::new(StmtKind::Return { value: value.map(Box::new) })
    }

    pub fn expr(value: Expr) -> Self {
        Stmt::new(StmtKind::Expr { value: Box::new(value) })
    }

    pub fn function(name: &str, args: Vec<Arg>, returns: Option<Expr>, body: Vec<Stmt>) -> Self {
        Stmt::new(StmtKind::FunctionDef {
            name: name.to_string(),
            args: Arguments::positional(args),
            body,
            decorator_list: Vec::new(),
            returns: returns.map(Box::new),
        })
    }

    pub fn if_(test: Expr, body: Vec<Stmt>, orelse: Vec<Stmt>) -> Self {
        Stmt::new(StmtKind::If { test: Box::new(test), body, orelse })
    }

    pub fn while_(test: Expr, body: Vec<Stmt>) -> Self {
        Stmt::new(StmtKind::While { test: Box::new(test), body, orelse: Vec::new() })
    }

    pub fn for_(target: &str, iter: Expr, body: Vec<Stmt>) -> Self {
        Stmt::new(StmtKind::For {
            target: Box::new(Expr::name(target)),
            iter: Box::new(iter),
            body,
            orelse: Vec::new(),
        })
    }
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Expr { kind, span: None }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn get_kind(&self) -> &ExprKind {
        &self.kind
    }

    pub fn get_span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    pub fn name(id: &str) -> Self {
        Expr::new(ExprKind::Name { id: id.to_string() })
    }

    pub fn constant(value: Constant) -> Self {
        Expr::new(ExprKind::Constant { value, kind: None })
    }

    pub fn int(value: i64) -> Self {
        Expr::constant(Constant::Int(value))
    }

    pub fn str(value: &str) -> Self {
        Expr::constant(Constant::Str(value.to_string()))
    }

    pub fn binop(left: Expr, op: BinaryOperator, right: Expr) -> Self {
        Expr::new(ExprKind::BinOp { left: Box::new(left), op, right: Box::new(right) })
    }

    pub fn call(func: Expr, args: Vec<Expr>, keywords: Vec<Keyword>) -> Self {
        Expr::new(ExprKind::Call { func: Box::new(func), args, keywords })
    }

    pub fn attribute(value: Expr, attr: &str) -> Self {
        Expr::new(ExprKind::Attribute { value: Box::new(value), attr: attr.to_string() })
    }

    pub fn subscript(value: Expr, slice: Expr) -> Self {
        Expr::new(ExprKind::Subscript { value: Box::new(value), slice: Box::new(slice) })
    }

    pub fn tuple(elts: Vec<Expr>) -> Self {
        Expr::new(ExprKind::Tuple { elts })
    }

    /// The identifier if this expression is a bare name reference.
    pub fn as_name(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Name { id } => Some(id.as_str()),
            _ => None,
        }
    }
}
