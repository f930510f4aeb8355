//! file: core/src/ir/lower/lower_expr.rs
//! description: expression lowering helpers.
//!
//! Expressions are flattened one consumer at a time: `process_operand`
//! lowers a sub-expression, appends the operators it needs to the current
//! insertion point, and hands the consumer the resulting value. A bare
//! name never produces an operator unless the variable lives in memory,
//! in which case a load is emitted.
//!
use log::trace;

use super::err::{LowerResult, UnsupportedConstructError};
use super::lower_types::{constant_type, dotted_name};
use super::lowering_context::{LoweringContext, VarState};
use crate::ast::{BoolOperator, CmpOperator, Constant, Expr, ExprKind, Keyword};
use crate::ir::op::{AttrValue, Operator};
use crate::ir::value::{SimpleType, ValueId};

/// Outcome of lowering one expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Lowered {
    /// The expression already names a value; nothing to emit.
    Value(ValueId, SimpleType),
    /// An operator computing the expression, not yet emitted and without a
    /// result name.
    Op(Operator, SimpleType),
}

/// Give `op` a fresh result name, append it to the current insertion point
/// and return the result.
pub fn emit_with_result(mut op: Operator, ty: SimpleType, ctx: &mut LoweringContext) -> (ValueId, SimpleType) {
    let value = ctx.fresh_temp();
    op.set_result(value.clone(), ty.clone());
    ctx.emit(op);
    (value, ty)
}

/// Lower `expr` to a value, emitting whatever operators it needs.
pub fn resolve_operand(expr: &Expr, ctx: &mut LoweringContext) -> LowerResult<(ValueId, SimpleType)> {
    match lower_expression(expr, ctx)? {
        Lowered::Value(value, ty) => Ok((value, ty)),
        Lowered::Op(op, ty) => Ok(emit_with_result(op, ty, ctx)),
    }
}

/// Lower `expr` and append its value to `consumer`'s arguments. Operators
/// computing the value land in the current block before the consumer.
pub fn process_operand(consumer: &mut Operator, expr: &Expr, ctx: &mut LoweringContext) -> LowerResult<()> {
    let (value, ty) = resolve_operand(expr, ctx)?;
    consumer.push_argument(value, ty);
    Ok(())
}

/// Read of a variable. Memory variables are loaded; pending-SSA variables
/// and names with no definition in scope resolve without an operator.
pub fn visit_name(name: &str, ctx: &mut LoweringContext) -> (ValueId, SimpleType) {
    let ty = ctx.type_of(name);
    match ctx.var_state(name) {
        VarState::Memory => {
            let value = ctx.fresh_version(name);
            let mut load = Operator::py("load");
            load.set_attr("name", name);
            load.set_result(value.clone(), ty.clone());
            ctx.emit(load);
            trace!("load `{}` into {}", name, value);
            (value, ty)
        }
        VarState::Pending { value, .. } => (value, ty),
        VarState::Undefined => (ValueId::named(name), ty),
    }
}

/// Lower one expression node.
pub fn lower_expression(expr: &Expr, ctx: &mut LoweringContext) -> LowerResult<Lowered> {
    match expr.get_kind() {
        ExprKind::Name { id } => {
            let (value, ty) = visit_name(id, ctx);
            Ok(Lowered::Value(value, ty))
        }
        ExprKind::Constant { value, kind } => {
            let mut op = Operator::py("constant");
            op.set_attr("value", constant_attr(value));
            if let Some(kind) = kind {
                op.set_attr("kind", kind.as_str());
            }
            Ok(Lowered::Op(op, constant_type(value)))
        }
        ExprKind::BinOp { left, op, right } => {
            let mut bin = Operator::py("binOp");
            bin.set_attr("op", op.name());
            process_operand(&mut bin, left, ctx)?;
            process_operand(&mut bin, right, ctx)?;
            Ok(Lowered::Op(bin, SimpleType::Unknown))
        }
        ExprKind::UnaryOp { op, operand } => {
            let mut unary = Operator::py("unaryOp");
            unary.set_attr("op", op.name());
            process_operand(&mut unary, operand, ctx)?;
            Ok(Lowered::Op(unary, SimpleType::Unknown))
        }
        ExprKind::BoolOp { op, values } => lower_bool_op(expr, *op, values, ctx),
        ExprKind::Compare { left, ops, comparators } => lower_compare(expr, left, ops, comparators, ctx),
        ExprKind::Call { func, args, keywords } => lower_call(func, args, keywords, ctx),
        other => Err(UnsupportedConstructError::new(
            format!("{} expression", other.kind_name()),
            expr.get_span(),
        )),
    }
}

fn constant_attr(value: &Constant) -> AttrValue {
    match value {
        Constant::None => AttrValue::Unit,
        Constant::Bool(b) => AttrValue::Bool(*b),
        Constant::Int(i) => AttrValue::Int(*i),
        Constant::BigInt(digits) => AttrValue::BigInt(digits.clone()),
        Constant::Float(v) => AttrValue::Float(*v),
        Constant::Str(s) => AttrValue::Str(s.clone()),
    }
}

fn bool_op(op: BoolOperator) -> Operator {
    let mut bool_op = Operator::py("boolOp");
    bool_op.set_attr("op", op.name());
    bool_op
}

/// `a and b and c` folds left: `(a and b) and c`.
fn lower_bool_op(
    expr: &Expr,
    op: BoolOperator,
    values: &[Expr],
    ctx: &mut LoweringContext,
) -> LowerResult<Lowered> {
    let [first, middle @ .., last] = values else {
        return Err(UnsupportedConstructError::new(
            "BoolOp with fewer than two operands",
            expr.get_span(),
        ));
    };

    let (mut acc, mut acc_ty) = resolve_operand(first, ctx)?;
    for value in middle {
        let mut step = bool_op(op);
        step.push_argument(acc, acc_ty);
        process_operand(&mut step, value, ctx)?;
        (acc, acc_ty) = emit_with_result(step, SimpleType::Unknown, ctx);
    }

    let mut folded = bool_op(op);
    folded.push_argument(acc, acc_ty);
    process_operand(&mut folded, last, ctx)?;
    Ok(Lowered::Op(folded, SimpleType::Unknown))
}

fn compare_op(op: CmpOperator, lhs: &(ValueId, SimpleType), rhs: &(ValueId, SimpleType)) -> Operator {
    let mut cmp = Operator::py("compare");
    cmp.set_attr("op", op.name());
    cmp.push_argument(lhs.0.clone(), lhs.1.clone());
    cmp.push_argument(rhs.0.clone(), rhs.1.clone());
    cmp
}

/// `a < b` is one compare. A chain `a < b < c` lowers every operand once,
/// compares adjacent pairs and joins the results with `and`.
fn lower_compare(
    expr: &Expr,
    left: &Expr,
    ops: &[CmpOperator],
    comparators: &[Expr],
    ctx: &mut LoweringContext,
) -> LowerResult<Lowered> {
    if ops.is_empty() || ops.len() != comparators.len() {
        return Err(UnsupportedConstructError::new(
            "Compare with mismatched operators and operands",
            expr.get_span(),
        ));
    }

    let mut operands = Vec::with_capacity(comparators.len() + 1);
    operands.push(resolve_operand(left, ctx)?);
    for comparator in comparators {
        operands.push(resolve_operand(comparator, ctx)?);
    }

    if ops.len() == 1 {
        return Ok(Lowered::Op(compare_op(ops[0], &operands[0], &operands[1]), SimpleType::Unknown));
    }

    let mut results = Vec::with_capacity(ops.len());
    for (i, op) in ops.iter().enumerate() {
        let cmp = compare_op(*op, &operands[i], &operands[i + 1]);
        results.push(emit_with_result(cmp, SimpleType::Unknown, ctx));
    }

    let [first, middle @ .., last] = results.as_slice() else {
        return Err(UnsupportedConstructError::new(
            "Compare with mismatched operators and operands",
            expr.get_span(),
        ));
    };
    let mut acc = first.clone();
    for result in middle {
        let mut step = bool_op(BoolOperator::And);
        step.push_argument(acc.0, acc.1);
        step.push_argument(result.0.clone(), result.1.clone());
        acc = emit_with_result(step, SimpleType::Unknown, ctx);
    }

    let mut joined = bool_op(BoolOperator::And);
    joined.push_argument(acc.0, acc.1);
    joined.push_argument(last.0.clone(), last.1.clone());
    Ok(Lowered::Op(joined, SimpleType::Unknown))
}

/// Positional arguments are lowered; the callee and keyword arguments are
/// recorded as opaque strings.
fn lower_call(
    func: &Expr,
    args: &[Expr],
    keywords: &[Keyword],
    ctx: &mut LoweringContext,
) -> LowerResult<Lowered> {
    let mut call = Operator::py("call");
    call.set_attr("callee", func.to_string());

    for arg in args {
        if let ExprKind::Starred { .. } = arg.get_kind() {
            return Err(UnsupportedConstructError::new("starred call argument", arg.get_span()));
        }
        process_operand(&mut call, arg, ctx)?;
    }

    if !keywords.is_empty() {
        let mut rendered = Vec::with_capacity(keywords.len());
        for keyword in keywords {
            if keyword.arg.is_none() {
                return Err(UnsupportedConstructError::new(
                    "keyword unpacking in call",
                    keyword.value.get_span(),
                ));
            }
            rendered.push(AttrValue::Str(keyword.to_string()));
        }
        call.set_attr("keywords", AttrValue::List(rendered));
    }

    let ty = dotted_name(func)
        .and_then(|name| ctx.declared_type(&name).cloned())
        .unwrap_or(SimpleType::Unknown);
    Ok(Lowered::Op(call, ty))
}
