//! Mapping from annotation expressions and literals to `SimpleType`.

use crate::ast::{Constant, Expr, ExprKind};
use crate::ir::value::SimpleType;

/// Type named by an annotation expression. Anything that is not a name,
/// dotted name, subscripted generic, `None` or string forward reference is
/// unknown.
pub fn annotation_type(annotation: &Expr) -> SimpleType {
    match annotation.get_kind() {
        ExprKind::Constant { value: Constant::None, .. } => SimpleType::Unit,
        ExprKind::Constant { value: Constant::Str(s), .. } => SimpleType::Named(s.clone()),
        ExprKind::Subscript { value, slice } => match dotted_name(value) {
            Some(ctor) => SimpleType::Generic { ctor, args: generic_args(slice) },
            None => SimpleType::Unknown,
        },
        _ => dotted_name(annotation).map(SimpleType::Named).unwrap_or(SimpleType::Unknown),
    }
}

/// Type of an optional annotation; a missing one is unknown.
pub fn optional_annotation_type(annotation: Option<&Expr>) -> SimpleType {
    annotation.map(annotation_type).unwrap_or(SimpleType::Unknown)
}

fn generic_args(slice: &Expr) -> Vec<SimpleType> {
    match slice.get_kind() {
        ExprKind::Index { value } => generic_args(value),
        ExprKind::Tuple { elts } => elts.iter().map(annotation_type).collect(),
        _ => vec![annotation_type(slice)],
    }
}

/// `a.b.c` for a chain of attribute accesses rooted at a name.
pub fn dotted_name(expr: &Expr) -> Option<String> {
    match expr.get_kind() {
        ExprKind::Name { id } => Some(id.clone()),
        ExprKind::Attribute { value, attr } => dotted_name(value).map(|base| format!("{}.{}", base, attr)),
        _ => None,
    }
}

/// Result type of a literal.
pub fn constant_type(value: &Constant) -> SimpleType {
    match value {
        Constant::None => SimpleType::named("NoneType"),
        Constant::Bool(_) => SimpleType::named("bool"),
        Constant::Int(_) | Constant::BigInt(_) => SimpleType::named("int"),
        Constant::Float(_) => SimpleType::named("float"),
        Constant::Str(_) => SimpleType::named("str"),
    }
}
