//! Lowering of a decoded source tree into the region/block IR.
//!
//! Lowering walks statements in source order. Expression operators are
//! appended to the block at the top of the insertion-point stack; every
//! statement body (function, class, branch, loop) becomes a region of its
//! own. Blocks are staged in a `BlockArena` and the owned operator tree is
//! built once the whole unit has been lowered.
pub mod block_arena;
pub mod err;
pub mod lower_expr;
pub mod lower_stmt;
pub mod lower_types;
pub mod lowering_context;

use log::debug;

use self::block_arena::StagedOp;
pub use self::err::{LowerResult, UnsupportedConstructError};
pub use self::lowering_context::{DefinitionSite, LoweringContext, VarState};
use crate::ast::{Expr, SourceUnit, Stmt};
use crate::ir::op::Operator;

/// Lower a whole source unit to a `builtin.module` operator.
pub fn lower_unit(unit: &SourceUnit) -> LowerResult<Operator> {
    let Some(body) = unit.body() else {
        return Err(UnsupportedConstructError::new(
            format!("{} source unit", unit.kind_name()),
            None,
        ));
    };

    let mut ctx = LoweringContext::new();
    let mut module = StagedOp::new(Operator::builtin("module"));
    process_region(&mut module, body, &mut ctx)?;
    debug!("lowered {} top-level statements", body.len());
    Ok(ctx.arena.materialize(module))
}

/// Lower `body` statement by statement into the current insertion point.
pub fn lower_body(body: &[Stmt], ctx: &mut LoweringContext) -> LowerResult<()> {
    for stmt in body {
        let op = lower_stmt::lower_statement(stmt, ctx)?;
        ctx.emit(op);
    }
    Ok(())
}

/// Give `owner` a new region holding `body`.
pub fn process_region(owner: &mut StagedOp, body: &[Stmt], ctx: &mut LoweringContext) -> LowerResult<()> {
    let block = ctx.enter_block();
    lower_body(body, ctx)?;
    ctx.leave_block(block);
    owner.attach_region(block, None);
    Ok(())
}

/// Give `owner` a new region computing `expr`. The region ends with a
/// `py.yield` of the value, so it is never empty even when the expression
/// is a bare name.
pub fn process_expr_region(owner: &mut StagedOp, expr: &Expr, ctx: &mut LoweringContext) -> LowerResult<()> {
    let block = ctx.enter_block();
    let mut terminator = Operator::py("yield");
    lower_expr::process_operand(&mut terminator, expr, ctx)?;
    ctx.emit(terminator);
    ctx.leave_block(block);
    owner.attach_region(block, None);
    Ok(())
}
