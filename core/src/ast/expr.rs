//! file: core/src/ast/expr.rs
//! description: source-like rendering of expression nodes.
//!
//! The lowering engine records some expressions (class bases, decorators,
//! keyword values, call targets, field annotations) as opaque string
//! attributes instead of lowering them. `Display` for `Expr` produces the
//! text used for those attributes.
//!
use std::fmt;

use super::kind::ExprKind;
use super::node::{Constant, Expr, Keyword};

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::None => write!(f, "None"),
            Constant::Bool(true) => write!(f, "True"),
            Constant::Bool(false) => write!(f, "False"),
            Constant::Int(v) => write!(f, "{}", v),
            Constant::BigInt(digits) => write!(f, "{}", digits),
            Constant::Float(v) => write!(f, "{:?}", v),
            Constant::Str(s) => write!(f, "'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.arg {
            Some(name) => write!(f, "{}={}", name, self.value),
            None => write!(f, "**{}", self.value),
        }
    }
}

/// Operands that are themselves operator expressions get parenthesized so
/// the rendered text keeps the tree's grouping.
fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr) -> fmt::Result {
    match expr.get_kind() {
        ExprKind::BinOp { .. } | ExprKind::BoolOp { .. } | ExprKind::Compare { .. } | ExprKind::UnaryOp { .. } => {
            write!(f, "({})", expr)
        }
        _ => write!(f, "{}", expr),
    }
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get_kind() {
            ExprKind::Name { id } => write!(f, "{}", id),
            ExprKind::Constant { value, .. } => write!(f, "{}", value),
            ExprKind::Attribute { value, attr } => {
                write_operand(f, value)?;
                write!(f, ".{}", attr)
            }
            ExprKind::Subscript { value, slice } => {
                write_operand(f, value)?;
                write!(f, "[")?;
                match slice.get_kind() {
                    ExprKind::Tuple { elts } => write_joined(f, elts)?,
                    _ => write!(f, "{}", slice)?,
                }
                write!(f, "]")
            }
            ExprKind::Index { value } => write!(f, "{}", value),
            ExprKind::BinOp { left, op, right } => {
                write_operand(f, left)?;
                write!(f, " {} ", op.symbol())?;
                write_operand(f, right)
            }
            ExprKind::BoolOp { op, values } => {
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {} ", op.symbol())?;
                    }
                    write_operand(f, v)?;
                }
                Ok(())
            }
            ExprKind::Compare { left, ops, comparators } => {
                write_operand(f, left)?;
                for (op, rhs) in ops.iter().zip(comparators.iter()) {
                    write!(f, " {} ", op.symbol())?;
                    write_operand(f, rhs)?;
                }
                Ok(())
            }
            ExprKind::UnaryOp { op, operand } => {
                write!(f, "{}", op.symbol())?;
                write_operand(f, operand)
            }
            ExprKind::Call { func, args, keywords } => {
                write_operand(f, func)?;
                write!(f, "(")?;
                write_joined(f, args)?;
                if !args.is_empty() && !keywords.is_empty() {
                    write!(f, ", ")?;
                }
                write_joined(f, keywords)?;
                write!(f, ")")
            }
            ExprKind::Starred { value } => write!(f, "*{}", value),
            ExprKind::List { elts } => {
                write!(f, "[")?;
                write_joined(f, elts)?;
                write!(f, "]")
            }
            ExprKind::Tuple { elts } => {
                write!(f, "(")?;
                write_joined(f, elts)?;
                if elts.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            other => write!(f, "<{}>", other.kind_name()),
        }
    }
}
