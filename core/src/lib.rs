pub mod ast;
pub mod error;
pub mod ir;
pub mod location;
pub mod source;

pub use ast::{generate_ast_from_json, AstLoadError, SourceUnit};
pub use error::{HlirErrorExt, Level};
pub use ir::lower::UnsupportedConstructError;
pub use ir::{lower_ast_to_ir, render_ir, Operator};
pub use location::{Location, Span};
pub use source::{MissingSourceError, SourceFile};

pub fn generate_error_report(error: &dyn HlirErrorExt) -> String {
    error.report()
}

/// Decode a JSON tree dump and lower it to a module operator.
pub fn lower_json(text: &str) -> Result<Operator, Box<dyn HlirErrorExt>> {
    let unit = ast::generate_ast_from_json(text).map_err(|e| Box::new(e) as Box<dyn HlirErrorExt>)?;
    lower_ast_to_ir(&unit).map_err(|e| Box::new(e) as Box<dyn HlirErrorExt>)
}

/// Decode, lower and print in one step.
pub fn compile_json_to_ir(text: &str) -> Result<String, Box<dyn HlirErrorExt>> {
    let module = lower_json(text)?;
    Ok(render_ir(&module))
}

pub fn compile_source_to_ir(source: &SourceFile) -> Result<String, Box<dyn HlirErrorExt>> {
    compile_json_to_ir(&source.content)
}
