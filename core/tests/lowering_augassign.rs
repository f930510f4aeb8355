use hlir_core::ast::{BinaryOperator, Expr, SourceUnit, Stmt, StmtKind};
use hlir_core::ir::{lower_ast_to_ir, render_ir};

fn lower_text(body: Vec<Stmt>) -> String {
    render_ir(&lower_ast_to_ir(&SourceUnit::module(body)).unwrap())
}

#[test]
fn aug_assign_promotes_pending_variable() {
    let body = vec![
        Stmt::assign("total", Expr::int(0)),
        Stmt::aug_assign("total", BinaryOperator::Add, Expr::int(5)),
        Stmt::ret(Some(Expr::name("total"))),
    ];
    let text = lower_text(vec![Stmt::function("f", vec![], None, body)]);

    let expected = r#""builtin.module"() ({
    "builtin.func"() ({
    ^entry():
        %0 = "py.constant"() {value=0} : () -> !_.int
        %total = "py.assign"(%0) : (!_.int) -> !_.int
        %1 = "py.constant"() {value=5} : () -> !_.int
        "py.store"(%total) {name="total"} : (!_.int) -> ()
        "py.augAssign"(%1) {op="add", target="total"} : (!_.int) -> ()
        %total.2 = "py.load"() {name="total"} : () -> !_.int
        "py.return"(%total.2) : (!_.int) -> ()
    }) {function_type=() -> !_.Any, sym_name="f"} : () -> ()
}) : () -> ()"#;
    assert_eq!(text, expected);
}

#[test]
fn aug_assign_on_undefined_name_forces_memory() {
    let body = vec![
        Stmt::aug_assign("count", BinaryOperator::Add, Expr::int(1)),
        Stmt::assign("x", Expr::name("count")),
    ];
    let text = lower_text(body);

    let expected = r#""builtin.module"() ({
    %0 = "py.constant"() {value=1} : () -> !_.int
    "py.augAssign"(%0) {op="add", target="count"} : (!_.int) -> ()
    %count.1 = "py.load"() {name="count"} : () -> !_.Any
    %x = "py.assign"(%count.1) : (!_.Any) -> !_.Any
}) : () -> ()"#;
    assert_eq!(text, expected);
}

#[test]
fn assignment_after_aug_assign_is_a_store() {
    let body = vec![
        Stmt::assign("n", Expr::int(1)),
        Stmt::aug_assign("n", BinaryOperator::Mult, Expr::int(3)),
        Stmt::assign("n", Expr::int(7)),
    ];
    let text = lower_text(body);

    assert!(text.contains("\"py.augAssign\"(%1) {op=\"mult\", target=\"n\"} : (!_.int) -> ()"));
    assert!(text.contains("\"py.store\"(%2) {name=\"n\"} : (!_.int) -> ()"));
    assert_eq!(text.matches("\"py.store\"").count(), 2);
}

#[test]
fn aug_assign_to_attribute_is_rejected() {
    let stmt = Stmt::new(StmtKind::AugAssign {
        target: Box::new(Expr::attribute(Expr::name("self"), "hits")),
        op: BinaryOperator::Add,
        value: Box::new(Expr::int(1)),
    });
    let err = lower_ast_to_ir(&SourceUnit::module(vec![stmt])).unwrap_err();
    assert_eq!(err.construct(), "augmented assignment to Attribute target");
}
