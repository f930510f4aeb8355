//! Lowering helpers for statement nodes.
//!
//! Every supported statement lowers to exactly one operator, returned to
//! the caller for emission. Sub-expressions are emitted into the current
//! block first, so they precede the statement's operator. Bodies become
//! nested single-block regions.
//!
//! See also: `ir::lower::lower_expr` for expression lowering helpers.

use super::block_arena::StagedOp;
use super::err::{LowerResult, UnsupportedConstructError};
use super::lower_expr::process_operand;
use super::lower_types::{annotation_type, optional_annotation_type};
use super::lowering_context::{LoweringContext, VarState};
use super::{lower_body, process_expr_region, process_region};
use crate::ast::{Arguments, BinaryOperator, Expr, Keyword, Stmt, StmtKind};
use crate::ir::op::{AttrValue, BlockLabel, FunctionTypeAttr, Operator};
use crate::ir::value::SimpleType;

/// Label of a function's entry block.
pub const ENTRY_LABEL: &str = "^entry";

pub fn lower_statement(stmt: &Stmt, ctx: &mut LoweringContext) -> LowerResult<StagedOp> {
    match stmt.get_kind() {
        StmtKind::FunctionDef { name, args, body, decorator_list, returns } => {
            lower_function_def(stmt, name, args, body, decorator_list, returns.as_deref(), ctx)
        }
        StmtKind::ClassDef { name, bases, keywords, body, decorator_list } => {
            lower_class_def(name, bases, keywords, body, decorator_list, ctx)
        }
        StmtKind::Return { value } => {
            let mut ret = Operator::py("return");
            if let Some(value) = value {
                process_operand(&mut ret, value, ctx)?;
            }
            Ok(ret.into())
        }
        StmtKind::Assign { targets, value } => {
            let name = single_name_target(stmt, targets)?;
            lower_assignment(name, value, None, ctx)
        }
        StmtKind::AugAssign { target, op, value } => lower_aug_assign(stmt, target, *op, value, ctx),
        StmtKind::AnnAssign { target, annotation, value, simple } => {
            lower_ann_assign(stmt, target, annotation, value.as_deref(), *simple, ctx)
        }
        StmtKind::For { target, iter, body, orelse } => {
            if !orelse.is_empty() {
                return Err(UnsupportedConstructError::new("else clause on for loop", stmt.get_span()));
            }
            let Some(var) = target.as_name() else {
                return Err(UnsupportedConstructError::new(
                    format!("for loop over {} target", target.get_kind().kind_name()),
                    target.get_span().or(stmt.get_span()),
                ));
            };
            let mut for_op = Operator::py("for");
            for_op.set_attr("target", var);
            let mut staged = StagedOp::new(for_op);
            process_expr_region(&mut staged, iter, ctx)?;
            // Each iteration writes the element to the target's memory slot.
            write_through_memory(var, ctx);
            process_region(&mut staged, body, ctx)?;
            Ok(staged)
        }
        StmtKind::While { test, body, orelse } => {
            if !orelse.is_empty() {
                return Err(UnsupportedConstructError::new("else clause on while loop", stmt.get_span()));
            }
            let mut staged = StagedOp::new(Operator::py("while"));
            process_expr_region(&mut staged, test, ctx)?;
            process_region(&mut staged, body, ctx)?;
            Ok(staged)
        }
        StmtKind::If { test, body, orelse } => {
            let mut if_op = Operator::py("if");
            process_operand(&mut if_op, test, ctx)?;
            let mut staged = StagedOp::new(if_op);
            process_region(&mut staged, body, ctx)?;
            if !orelse.is_empty() {
                process_region(&mut staged, orelse, ctx)?;
            }
            Ok(staged)
        }
        StmtKind::Expr { value } => {
            let mut expr_op = Operator::py("expr");
            process_operand(&mut expr_op, value, ctx)?;
            Ok(expr_op.into())
        }
        StmtKind::Pass { .. } => Ok(Operator::py("pass").into()),
        StmtKind::Break { .. } => Ok(Operator::py("break").into()),
        StmtKind::Continue { .. } => Ok(Operator::py("continue").into()),
        other => Err(UnsupportedConstructError::new(
            format!("{} statement", other.kind_name()),
            stmt.get_span(),
        )),
    }
}

fn single_name_target<'a>(stmt: &Stmt, targets: &'a [Expr]) -> LowerResult<&'a str> {
    let [target] = targets else {
        return Err(UnsupportedConstructError::new(
            format!("assignment with {} targets", targets.len()),
            stmt.get_span(),
        ));
    };
    target.as_name().ok_or_else(|| {
        UnsupportedConstructError::new(
            format!("assignment to {} target", target.get_kind().kind_name()),
            target.get_span().or(stmt.get_span()),
        )
    })
}

/// Turn the pending SSA definition of `name` into a memory write: a store
/// of the defining value is appended to the block holding the definition,
/// which may be an enclosing block or one lowering has already left.
fn promote_to_memory(name: &str, ctx: &mut LoweringContext) {
    if let Some((block, value)) = ctx.promote(name) {
        let mut store = Operator::py("store");
        store.set_attr("name", name);
        store.push_argument(value, ctx.type_of(name));
        ctx.emit_into(block, store);
    }
}

/// `name` is about to be written by an operator that stores to memory
/// directly (`py.augAssign`, the `py.for` target). Later reads load it.
fn write_through_memory(name: &str, ctx: &mut LoweringContext) {
    match ctx.var_state(name) {
        VarState::Pending { .. } => promote_to_memory(name, ctx),
        VarState::Undefined => ctx.mark_memory(name),
        VarState::Memory => {}
    }
}

/// Assignment to a plain name. The first definition is an SSA value; the
/// second promotes the variable to memory; later ones are plain stores.
/// `declared` is the annotation of an annotated assignment.
pub fn lower_assignment(
    name: &str,
    value: &Expr,
    declared: Option<SimpleType>,
    ctx: &mut LoweringContext,
) -> LowerResult<StagedOp> {
    let mut op = Operator::py("assign");
    process_operand(&mut op, value, ctx)?;
    let rhs_ty = op.argument_types.first().cloned().unwrap_or(SimpleType::Unknown);

    match ctx.var_state(name) {
        VarState::Undefined => {
            let ty = match declared {
                Some(ty) => {
                    op.name = "cast".to_string();
                    ctx.declare_type(name, ty.clone());
                    ty
                }
                None => match ctx.declared_type(name) {
                    Some(ty) => ty.clone(),
                    None => {
                        if !rhs_ty.is_unknown() {
                            ctx.declare_type(name, rhs_ty.clone());
                        }
                        rhs_ty
                    }
                },
            };
            let result = ctx.fresh_definition(name);
            op.set_result(result.clone(), ty);
            ctx.define_pending(name, result);
        }
        VarState::Pending { .. } => {
            promote_to_memory(name, ctx);
            if let Some(ty) = declared {
                ctx.declare_type(name, ty);
            }
            op.name = "store".to_string();
            op.set_attr("name", name);
        }
        VarState::Memory => {
            if let Some(ty) = declared {
                ctx.declare_type(name, ty);
            }
            op.name = "store".to_string();
            op.set_attr("name", name);
        }
    }
    Ok(op.into())
}

/// `x op= value` is a read-modify-write of memory: the target is promoted
/// (or marked as memory) before the operator is emitted.
fn lower_aug_assign(
    stmt: &Stmt,
    target: &Expr,
    op: BinaryOperator,
    value: &Expr,
    ctx: &mut LoweringContext,
) -> LowerResult<StagedOp> {
    let Some(name) = target.as_name() else {
        return Err(UnsupportedConstructError::new(
            format!("augmented assignment to {} target", target.get_kind().kind_name()),
            target.get_span().or(stmt.get_span()),
        ));
    };

    let mut aug = Operator::py("augAssign");
    aug.set_attr("target", name);
    aug.set_attr("op", op.name());
    process_operand(&mut aug, value, ctx)?;
    write_through_memory(name, ctx);
    Ok(aug.into())
}

/// Inside a function an annotated assignment defines a typed SSA value.
/// Elsewhere (module or class body) it declares a field and produces no
/// value.
fn lower_ann_assign(
    stmt: &Stmt,
    target: &Expr,
    annotation: &Expr,
    value: Option<&Expr>,
    simple: u8,
    ctx: &mut LoweringContext,
) -> LowerResult<StagedOp> {
    let declared = annotation_type(annotation);

    if ctx.in_function() {
        let Some(name) = target.as_name() else {
            return Err(UnsupportedConstructError::new(
                format!("annotated assignment to {} target", target.get_kind().kind_name()),
                target.get_span().or(stmt.get_span()),
            ));
        };
        if let Some(value) = value {
            return lower_assignment(name, value, Some(declared), ctx);
        }
    }

    if let Some(name) = target.as_name() {
        ctx.declare_type(name, declared);
    }

    let mut decl = Operator::py("annAssign");
    decl.set_attr("target", target.to_string());
    decl.set_attr("annotation", annotation.to_string());
    decl.set_attr("simple", simple != 0);
    if let Some(value) = value {
        process_operand(&mut decl, value, ctx)?;
    }
    Ok(decl.into())
}

/// Only plain positional parameters without defaults are accepted.
fn check_parameters(stmt: &Stmt, args: &Arguments) -> LowerResult<()> {
    let refused = if !args.posonlyargs.is_empty() {
        Some("positional-only parameter".to_string())
    } else if let Some(vararg) = &args.vararg {
        Some(format!("variadic parameter *{}", vararg.arg))
    } else if !args.kwonlyargs.is_empty() {
        Some("keyword-only parameter".to_string())
    } else if let Some(kwarg) = &args.kwarg {
        Some(format!("keyword-variadic parameter **{}", kwarg.arg))
    } else if !args.defaults.is_empty() || args.kw_defaults.iter().any(Option::is_some) {
        Some("parameter default value".to_string())
    } else {
        None
    };

    match refused {
        Some(construct) => Err(UnsupportedConstructError::new(construct, stmt.get_span())),
        None => Ok(()),
    }
}

fn opaque_list(exprs: &[Expr]) -> AttrValue {
    AttrValue::List(exprs.iter().map(|e| AttrValue::Str(e.to_string())).collect())
}

fn lower_function_def(
    stmt: &Stmt,
    name: &str,
    args: &Arguments,
    body: &[Stmt],
    decorator_list: &[Expr],
    returns: Option<&Expr>,
    ctx: &mut LoweringContext,
) -> LowerResult<StagedOp> {
    check_parameters(stmt, args)?;

    let return_type = optional_annotation_type(returns);
    // Calls to this function by name take its declared return type.
    ctx.declare_type(name, return_type.clone());

    let mut func = Operator::builtin("func");
    func.set_attr("sym_name", name);
    if !decorator_list.is_empty() {
        func.set_attr("decorators", opaque_list(decorator_list));
    }

    ctx.push_function_scope();
    let entry = ctx.enter_block();
    let mut params = Vec::with_capacity(args.args.len());
    for arg in &args.args {
        let ty = optional_annotation_type(arg.annotation.as_ref());
        let value = ctx.bind_parameter(&arg.arg, ty.clone(), entry);
        params.push((value, ty));
    }
    lower_body(body, ctx)?;
    ctx.leave_block(entry);
    ctx.pop_function_scope();

    func.set_attr(
        "function_type",
        FunctionTypeAttr {
            types: params.iter().map(|(_, ty)| ty.clone()).collect(),
            returns: return_type,
        },
    );

    let mut staged = StagedOp::new(func);
    staged.attach_region(entry, Some(BlockLabel::new(ENTRY_LABEL, params)));
    Ok(staged)
}

fn lower_class_def(
    name: &str,
    bases: &[Expr],
    keywords: &[Keyword],
    body: &[Stmt],
    decorator_list: &[Expr],
    ctx: &mut LoweringContext,
) -> LowerResult<StagedOp> {
    let mut class = Operator::py("class");
    class.set_attr("name", name);
    class.set_attr("bases", opaque_list(bases));
    class.set_attr(
        "keywords",
        AttrValue::List(keywords.iter().map(|k| AttrValue::Str(k.to_string())).collect()),
    );
    class.set_attr("decorators", opaque_list(decorator_list));

    let mut staged = StagedOp::new(class);
    ctx.push_class_site();
    process_region(&mut staged, body, ctx)?;
    ctx.pop_class_site();
    Ok(staged)
}
