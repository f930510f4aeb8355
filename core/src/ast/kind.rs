//! file: core/src/ast/kind.rs
//! description: node kind definitions and operator enums.
//!
//! Defines `StmtKind` and `ExprKind` along with the operator enums. The
//! kinds enumerate the whole source grammar, including constructs the
//! lowering engine refuses, so that a refused node can still be named in
//! a diagnostic. Kinds the engine never looks into are empty struct
//! variants; their fields are skipped when a tree is decoded.
//!
use serde::Deserialize;

use super::node::{Arguments, Constant, Expr, Keyword, Stmt};

/// Boolean connectives (`and`, `or`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "_t")]
pub enum BoolOperator {
    And,
    Or,
}

/// Binary arithmetic and bitwise operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "_t")]
pub enum BinaryOperator {
    Add,      // +
    Sub,      // -
    Mult,     // *
    MatMult,  // @
    Div,      // /
    Mod,      // %
    Pow,      // **
    LShift,   // <<
    RShift,   // >>
    BitOr,    // |
    BitXor,   // ^
    BitAnd,   // &
    FloorDiv, // //
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "_t")]
pub enum CmpOperator {
    Eq,    // ==
    NotEq, // !=
    Lt,    // <
    LtE,   // <=
    Gt,    // >
    GtE,   // >=
    Is,    // is
    IsNot, // is not
    In,    // in
    NotIn, // not in
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "_t")]
pub enum UnaryOperator {
    Invert, // ~
    Not,    // not
    UAdd,   // +
    USub,   // -
}

impl BoolOperator {
    /// Lowercase name recorded in the `op` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            BoolOperator::And => "and",
            BoolOperator::Or => "or",
        }
    }

    pub fn symbol(&self) -> &'static str {
        self.name()
    }
}

impl BinaryOperator {
    /// Lowercase name recorded in the `op` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "add",
            BinaryOperator::Sub => "sub",
            BinaryOperator::Mult => "mult",
            BinaryOperator::MatMult => "matmult",
            BinaryOperator::Div => "div",
            BinaryOperator::Mod => "mod",
            BinaryOperator::Pow => "pow",
            BinaryOperator::LShift => "lshift",
            BinaryOperator::RShift => "rshift",
            BinaryOperator::BitOr => "bitor",
            BinaryOperator::BitXor => "bitxor",
            BinaryOperator::BitAnd => "bitand",
            BinaryOperator::FloorDiv => "floordiv",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mult => "*",
            BinaryOperator::MatMult => "@",
            BinaryOperator::Div => "/",
            BinaryOperator::Mod => "%",
            BinaryOperator::Pow => "**",
            BinaryOperator::LShift => "<<",
            BinaryOperator::RShift => ">>",
            BinaryOperator::BitOr => "|",
            BinaryOperator::BitXor => "^",
            BinaryOperator::BitAnd => "&",
            BinaryOperator::FloorDiv => "//",
        }
    }
}

impl CmpOperator {
    /// Lowercase name recorded in the `op` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            CmpOperator::Eq => "eq",
            CmpOperator::NotEq => "noteq",
            CmpOperator::Lt => "lt",
            CmpOperator::LtE => "lte",
            CmpOperator::Gt => "gt",
            CmpOperator::GtE => "gte",
            CmpOperator::Is => "is",
            CmpOperator::IsNot => "isnot",
            CmpOperator::In => "in",
            CmpOperator::NotIn => "notin",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            CmpOperator::Eq => "==",
            CmpOperator::NotEq => "!=",
            CmpOperator::Lt => "<",
            CmpOperator::LtE => "<=",
            CmpOperator::Gt => ">",
            CmpOperator::GtE => ">=",
            CmpOperator::Is => "is",
            CmpOperator::IsNot => "is not",
            CmpOperator::In => "in",
            CmpOperator::NotIn => "not in",
        }
    }
}

impl UnaryOperator {
    /// Lowercase name recorded in the `op` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            UnaryOperator::Invert => "invert",
            UnaryOperator::Not => "not",
            UnaryOperator::UAdd => "uadd",
            UnaryOperator::USub => "usub",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOperator::Invert => "~",
            UnaryOperator::Not => "not ",
            UnaryOperator::UAdd => "+",
            UnaryOperator::USub => "-",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "_t")]
pub enum StmtKind {
    FunctionDef {
        name: String,
        args: Arguments,
        #[serde(default)]
        body: Vec<Stmt>,
        #[serde(default)]
        decorator_list: Vec<Expr>,
        #[serde(default)]
        returns: Option<Box<Expr>>,
    },
    AsyncFunctionDef {},
    ClassDef {
        name: String,
        #[serde(default)]
        bases: Vec<Expr>,
        #[serde(default)]
        keywords: Vec<Keyword>,
        #[serde(default)]
        body: Vec<Stmt>,
        #[serde(default)]
        decorator_list: Vec<Expr>,
    },
    Return {
        #[serde(default)]
        value: Option<Box<Expr>>,
    },
    Delete {},
    Assign {
        targets: Vec<Expr>,
        value: Box<Expr>,
    },
    TypeAlias {},
    AugAssign {
        target: Box<Expr>,
        op: BinaryOperator,
        value: Box<Expr>,
    },
    AnnAssign {
        target: Box<Expr>,
        annotation: Box<Expr>,
        #[serde(default)]
        value: Option<Box<Expr>>,
        #[serde(default)]
        simple: u8,
    },
    For {
        target: Box<Expr>,
        iter: Box<Expr>,
        #[serde(default)]
        body: Vec<Stmt>,
        #[serde(default)]
        orelse: Vec<Stmt>,
    },
    AsyncFor {},
    While {
        test: Box<Expr>,
        #[serde(default)]
        body: Vec<Stmt>,
        #[serde(default)]
        orelse: Vec<Stmt>,
    },
    If {
        test: Box<Expr>,
        #[serde(default)]
        body: Vec<Stmt>,
        #[serde(default)]
        orelse: Vec<Stmt>,
    },
    With {},
    AsyncWith {},
    Match {},
    Raise {},
    Try {},
    TryStar {},
    Assert {},
    Import {},
    ImportFrom {},
    Global {},
    Nonlocal {},
    Expr {
        value: Box<Expr>,
    },
    Pass {},
    Break {},
    Continue {},
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "_t")]
pub enum ExprKind {
    BoolOp {
        op: BoolOperator,
        values: Vec<Expr>,
    },
    NamedExpr {},
    BinOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expr>,
    },
    Lambda {},
    IfExp {},
    Dict {},
    Set {},
    ListComp {},
    SetComp {},
    DictComp {},
    GeneratorExp {},
    Await {},
    Yield {},
    YieldFrom {},
    Compare {
        left: Box<Expr>,
        ops: Vec<CmpOperator>,
        comparators: Vec<Expr>,
    },
    Call {
        func: Box<Expr>,
        #[serde(default)]
        args: Vec<Expr>,
        #[serde(default)]
        keywords: Vec<Keyword>,
    },
    FormattedValue {},
    JoinedStr {},
    Constant {
        #[serde(default)]
        value: Constant,
        #[serde(default)]
        kind: Option<String>,
    },
    Attribute {
        value: Box<Expr>,
        attr: String,
    },
    Subscript {
        value: Box<Expr>,
        slice: Box<Expr>,
    },
    Starred {
        value: Box<Expr>,
    },
    Name {
        id: String,
    },
    List {
        #[serde(default)]
        elts: Vec<Expr>,
    },
    Tuple {
        #[serde(default)]
        elts: Vec<Expr>,
    },
    Slice {},
    /// Subscript wrapper emitted by older parser versions.
    Index {
        value: Box<Expr>,
    },
}

impl StmtKind {
    /// Grammar name of this statement kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            StmtKind::FunctionDef { .. } => "FunctionDef",
            StmtKind::AsyncFunctionDef { .. } => "AsyncFunctionDef",
            StmtKind::ClassDef { .. } => "ClassDef",
            StmtKind::Return { .. } => "Return",
            StmtKind::Delete { .. } => "Delete",
            StmtKind::Assign { .. } => "Assign",
            StmtKind::TypeAlias { .. } => "TypeAlias",
            StmtKind::AugAssign { .. } => "AugAssign",
            StmtKind::AnnAssign { .. } => "AnnAssign",
            StmtKind::For { .. } => "For",
            StmtKind::AsyncFor { .. } => "AsyncFor",
            StmtKind::While { .. } => "While",
            StmtKind::If { .. } => "If",
            StmtKind::With { .. } => "With",
            StmtKind::AsyncWith { .. } => "AsyncWith",
            StmtKind::Match { .. } => "Match",
            StmtKind::Raise { .. } => "Raise",
            StmtKind::Try { .. } => "Try",
            StmtKind::TryStar { .. } => "TryStar",
            StmtKind::Assert { .. } => "Assert",
            StmtKind::Import { .. } => "Import",
            StmtKind::ImportFrom { .. } => "ImportFrom",
            StmtKind::Global { .. } => "Global",
            StmtKind::Nonlocal { .. } => "Nonlocal",
            StmtKind::Expr { .. } => "Expr",
            StmtKind::Pass { .. } => "Pass",
            StmtKind::Break { .. } => "Break",
            StmtKind::Continue { .. } => "Continue",
        }
    }
}

impl ExprKind {
    /// Grammar name of this expression kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ExprKind::BoolOp { .. } => "BoolOp",
            ExprKind::NamedExpr { .. } => "NamedExpr",
            ExprKind::BinOp { .. } => "BinOp",
            ExprKind::UnaryOp { .. } => "UnaryOp",
            ExprKind::Lambda { .. } => "Lambda",
            ExprKind::IfExp { .. } => "IfExp",
            ExprKind::Dict { .. } => "Dict",
            ExprKind::Set { .. } => "Set",
            ExprKind::ListComp { .. } => "ListComp",
            ExprKind::SetComp { .. } => "SetComp",
            ExprKind::DictComp { .. } => "DictComp",
            ExprKind::GeneratorExp { .. } => "GeneratorExp",
            ExprKind::Await { .. } => "Await",
            ExprKind::Yield { .. } => "Yield",
            ExprKind::YieldFrom { .. } => "YieldFrom",
            ExprKind::Compare { .. } => "Compare",
            ExprKind::Call { .. } => "Call",
            ExprKind::FormattedValue { .. } => "FormattedValue",
            ExprKind::JoinedStr { .. } => "JoinedStr",
            ExprKind::Constant { .. } => "Constant",
            ExprKind::Attribute { .. } => "Attribute",
            ExprKind::Subscript { .. } => "Subscript",
            ExprKind::Starred { .. } => "Starred",
            ExprKind::Name { .. } => "Name",
            ExprKind::List { .. } => "List",
            ExprKind::Tuple { .. } => "Tuple",
            ExprKind::Slice { .. } => "Slice",
            ExprKind::Index { .. } => "Index",
        }
    }
}

use std::fmt;

impl fmt::Display for StmtKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind_name())
    }
}

impl fmt::Display for ExprKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind_name())
    }
}
