use hlir_core::ast::{Expr, SourceUnit, Stmt, StmtKind};
use hlir_core::ir::lower_ast_to_ir;
use hlir_core::{generate_ast_from_json, generate_error_report, HlirErrorExt, Level, Location, Span};

fn while_else_error() -> Box<dyn HlirErrorExt> {
    let span = Span::new(Location::new(2, 4), Location::new(5, 12));
    let stmt = Stmt::new(StmtKind::While {
        test: Box::new(Expr::name("running")),
        body: vec![Stmt::expr(Expr::name("tick"))],
        orelse: vec![Stmt::expr(Expr::name("done"))],
    });
    let unit = SourceUnit::module(vec![stmt.with_span(span)]);
    Box::new(lower_ast_to_ir(&unit).unwrap_err())
}

#[test]
fn lowering_error_location_is_start_of_span() {
    let err = while_else_error();

    assert_eq!(err.level(), Level::Error);
    assert_eq!(err.issuer(), "hlir.lower");
    assert_eq!(err.location(), Some(Location::new(2, 4)));
    assert_eq!(err.report(), "HLIR | ERROR | 2:4 | Unsupported construct: else clause on while loop");
    assert_eq!(generate_error_report(err.as_ref()), err.report());
    assert_eq!(err.to_string(), err.report());
}

#[test]
fn debug_form_names_issuer_and_full_span() {
    let err = while_else_error();

    assert_eq!(
        format!("{:?}", err),
        "HLIR | ERROR | hlir.lower | 2:4 - 5:12 | Unsupported construct: else clause on while loop"
    );
}

#[test]
fn decode_error_has_location_but_no_span() {
    let err: Box<dyn HlirErrorExt> = Box::new(generate_ast_from_json("{\"_t\": \"Module\",\n  \"body\": [}").unwrap_err());

    assert!(err.span().is_none());
    let loc = err.location().unwrap();
    assert_eq!(loc.line, 2);
    assert!(format!("{:?}", err).starts_with(&format!("HLIR | ERROR | hlir.ast | {} | Malformed source tree:", loc)));
}
