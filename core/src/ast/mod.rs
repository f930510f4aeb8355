//! file: core/src/ast/mod.rs
//! description: the already-parsed source tree consumed by lowering.
//!
//! Trees arrive as JSON dumps of the source language's abstract syntax
//! tree: every node is an object whose `_t` field names its kind. Parsing
//! source text is not done here.
//!
pub mod err;
pub mod expr;
pub mod kind;
pub mod node;

pub use err::AstLoadError;
pub use kind::{BinaryOperator, BoolOperator, CmpOperator, ExprKind, StmtKind, UnaryOperator};
pub use node::{Arg, Arguments, Constant, Expr, Keyword, SourceUnit, Stmt};

/// Decode a JSON tree dump into a `SourceUnit`.
pub fn generate_ast_from_json(text: &str) -> Result<SourceUnit, AstLoadError> {
    if text.trim().is_empty() {
        return Err(AstLoadError::new("The provided source tree is empty.".to_string(), None));
    }
    let unit: SourceUnit = serde_json::from_str(text)?;
    if let SourceUnit::Module { body } = &unit {
        log::trace!("decoded module with {} top-level statements", body.len());
    }
    Ok(unit)
}

/// Decode an already-parsed `serde_json::Value` tree.
pub fn generate_ast_from_value(value: serde_json::Value) -> Result<SourceUnit, AstLoadError> {
    Ok(serde_json::from_value(value)?)
}
