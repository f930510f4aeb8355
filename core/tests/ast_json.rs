use hlir_core::ast::{
    generate_ast_from_json, generate_ast_from_value, BinaryOperator, CmpOperator, Constant, Expr, ExprKind, Keyword,
    SourceUnit, StmtKind,
};
use hlir_core::{HlirErrorExt, Location, Span};
use serde_json::json;

#[test]
fn decodes_assignment_with_positions() {
    let tree = json!({
        "_t": "Module",
        "body": [{
            "_t": "Assign",
            "targets": [{"_t": "Name", "id": "a", "ctx": {"_t": "Store"}, "lineno": 1, "col_offset": 0, "end_lineno": 1, "end_col_offset": 1}],
            "value": {"_t": "Constant", "value": 1, "lineno": 1, "col_offset": 4, "end_lineno": 1, "end_col_offset": 5},
            "type_comment": null,
            "lineno": 1, "col_offset": 0, "end_lineno": 1, "end_col_offset": 5
        }],
        "type_ignores": []
    });
    let unit = generate_ast_from_json(&tree.to_string()).unwrap();

    let body = unit.body().unwrap();
    assert_eq!(body.len(), 1);
    let stmt = &body[0];
    assert_eq!(stmt.get_span(), Some(&Span::new(Location::new(1, 0), Location::new(1, 5))));
    match stmt.get_kind() {
        StmtKind::Assign { targets, value } => {
            assert_eq!(targets.len(), 1);
            assert_eq!(targets[0].as_name(), Some("a"));
            assert_eq!(value.get_kind(), &ExprKind::Constant { value: Constant::Int(1), kind: None });
            assert_eq!(value.get_span().map(|s| s.start.column), Some(4));
        }
        other => panic!("unexpected statement: {:?}", other),
    }
}

#[test]
fn decodes_operators_and_literals() {
    let tree = json!({
        "_t": "Module",
        "body": [
            {"_t": "Expr", "value": {
                "_t": "Compare",
                "left": {"_t": "BinOp", "left": {"_t": "Name", "id": "x"}, "op": {"_t": "FloorDiv"}, "right": {"_t": "Constant", "value": 2.5}},
                "ops": [{"_t": "NotIn"}],
                "comparators": [{"_t": "Constant", "value": "abc", "kind": "u"}]
            }},
            {"_t": "Expr", "value": {"_t": "Constant", "value": null}},
            {"_t": "Expr", "value": {"_t": "Constant", "value": false}}
        ]
    });
    let unit = generate_ast_from_value(tree).unwrap();
    let body = unit.body().unwrap();

    let StmtKind::Expr { value } = body[0].get_kind() else { panic!("expected expression statement") };
    let ExprKind::Compare { left, ops, comparators } = value.get_kind() else { panic!("expected compare") };
    assert_eq!(ops, &vec![CmpOperator::NotIn]);
    assert!(matches!(left.get_kind(), ExprKind::BinOp { op: BinaryOperator::FloorDiv, .. }));
    assert_eq!(
        comparators[0].get_kind(),
        &ExprKind::Constant { value: Constant::Str("abc".to_string()), kind: Some("u".to_string()) }
    );
    assert_eq!(value.to_string(), "(x // 2.5) not in 'abc'");

    let StmtKind::Expr { value } = body[1].get_kind() else { panic!() };
    assert_eq!(value.get_kind(), &ExprKind::Constant { value: Constant::None, kind: None });
    let StmtKind::Expr { value } = body[2].get_kind() else { panic!() };
    assert_eq!(value.get_kind(), &ExprKind::Constant { value: Constant::Bool(false), kind: None });
}

#[test]
fn known_but_unsupported_kinds_decode() {
    let tree = json!({
        "_t": "Module",
        "body": [
            {"_t": "Import", "names": [{"_t": "alias", "name": "os"}], "lineno": 1, "col_offset": 0},
            {"_t": "Expr", "value": {"_t": "Lambda", "args": {}, "body": {"_t": "Name", "id": "x"}}}
        ]
    });
    let unit = generate_ast_from_json(&tree.to_string()).unwrap();
    let body = unit.body().unwrap();

    assert_eq!(body[0].get_kind().kind_name(), "Import");
    assert_eq!(body[0].get_span().map(|s| s.start.clone()), Some(Location::new(1, 0)));
    let StmtKind::Expr { value } = body[1].get_kind() else { panic!() };
    assert_eq!(value.get_kind(), &ExprKind::Lambda {});
    assert_eq!(value.to_string(), "<Lambda>");
}

#[test]
fn unknown_tag_is_a_load_error() {
    let err = generate_ast_from_json(r#"{"_t": "Module", "body": [{"_t": "Frobnicate"}]}"#).unwrap_err();
    assert!(err.message().starts_with("Malformed source tree: "));
    assert_eq!(err.issuer(), "hlir.ast");
}

#[test]
fn truncated_json_reports_position() {
    let err = generate_ast_from_json("{\"_t\": \"Module\",\n \"body\": [").unwrap_err();
    assert!(err.message().starts_with("Malformed source tree: "));
    assert_eq!(err.location().map(|l| l.line), Some(2));
}

#[test]
fn empty_input_is_rejected() {
    let err = generate_ast_from_json("  \n").unwrap_err();
    assert_eq!(err.message(), "The provided source tree is empty.");
    assert!(err.location().is_none());
}

#[test]
fn other_source_units_decode() {
    let unit = generate_ast_from_json(r#"{"_t": "Expression", "body": {"_t": "Name", "id": "x"}}"#).unwrap();
    assert_eq!(unit, SourceUnit::Expression {});
    assert!(unit.body().is_none());
}

#[test]
fn expressions_unparse_like_source() {
    let call = Expr::call(
        Expr::attribute(Expr::name("np"), "sum"),
        vec![Expr::binop(Expr::name("x"), BinaryOperator::Add, Expr::int(1))],
        vec![Keyword::new("axis", Expr::int(0))],
    );
    assert_eq!(call.to_string(), "np.sum(x + 1, axis=0)");

    let generic = Expr::subscript(
        Expr::name("Dict"),
        Expr::tuple(vec![Expr::name("str"), Expr::subscript(Expr::name("List"), Expr::name("int"))]),
    );
    assert_eq!(generic.to_string(), "Dict[str, List[int]]");

    assert_eq!(Expr::tuple(vec![Expr::name("a")]).to_string(), "(a,)");
    assert_eq!(Expr::str("it's").to_string(), "'it\\'s'");
}

#[test]
fn integer_wider_than_i64_keeps_digits_and_int_type() {
    let text = r#"{"_t": "Module", "body": [
        {"_t": "Expr", "value": {"_t": "Constant", "value": 10000000000000000000}}
    ]}"#;
    let unit = generate_ast_from_json(text).unwrap();

    let StmtKind::Expr { value } = unit.body().unwrap()[0].get_kind() else { panic!("expected expression statement") };
    assert_eq!(
        value.get_kind(),
        &ExprKind::Constant { value: Constant::BigInt("10000000000000000000".to_string()), kind: None }
    );

    let ir = hlir_core::render_ir(&hlir_core::lower_ast_to_ir(&unit).unwrap());
    assert!(ir.contains(r#"%0 = "py.constant"() {value=10000000000000000000} : () -> !_.int"#), "{}", ir);
}

#[test]
fn integer_at_i64_max_stays_int() {
    let text = r#"{"_t": "Module", "body": [
        {"_t": "Expr", "value": {"_t": "Constant", "value": 9223372036854775807}}
    ]}"#;
    let unit = generate_ast_from_json(text).unwrap();

    let StmtKind::Expr { value } = unit.body().unwrap()[0].get_kind() else { panic!("expected expression statement") };
    assert_eq!(value.get_kind(), &ExprKind::Constant { value: Constant::Int(i64::MAX), kind: None });
}
