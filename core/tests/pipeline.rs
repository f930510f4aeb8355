use std::path::PathBuf;

use hlir_core::{compile_json_to_ir, compile_source_to_ir, generate_error_report, HlirErrorExt, SourceFile};
use serde_json::json;

fn sample_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("..");
    path.push("cli");
    path.push("samples");
    path.push(name);
    path
}

#[test]
fn compiles_json_text_to_ir() {
    let tree = json!({
        "_t": "Module",
        "body": [{"_t": "Expr", "value": {"_t": "Call", "func": {"_t": "Name", "id": "main"}, "args": [], "keywords": []}}]
    });
    let text = compile_json_to_ir(&tree.to_string()).unwrap();
    assert_eq!(
        text,
        "\"builtin.module\"() ({\n    %0 = \"py.call\"() {callee=\"main\"} : () -> !_.Any\n    \"py.expr\"(%0) : (!_.Any) -> ()\n}) : () -> ()"
    );
}

#[test]
fn compiles_sample_file() {
    let source = SourceFile::new(sample_path("compute.json")).unwrap();
    assert_eq!(source.name, "compute.json");
    let text = compile_source_to_ir(&source).unwrap();
    assert!(text.contains("sym_name=\"compute\""));
    assert!(text.contains("%a = \"py.cast\"(%0) : (!_.Any) -> !_.int"));
}

#[test]
fn unsupported_sample_reports_location() {
    let source = SourceFile::new(sample_path("unsupported.json")).unwrap();
    let err = compile_source_to_ir(&source).unwrap_err();
    assert_eq!(
        generate_error_report(err.as_ref()),
        "HLIR | ERROR | 1:0 | Unsupported construct: else clause on while loop"
    );
}

#[test]
fn missing_file_is_reported() {
    let err = SourceFile::new(sample_path("does_not_exist.json")).unwrap_err();
    assert_eq!(err.issuer(), "hlir.source");
    assert!(generate_error_report(err.as_ref()).starts_with("HLIR | ERROR | unknown location | Missing source tree at"));
}

#[test]
fn empty_text_is_a_load_error() {
    let err = compile_json_to_ir("").unwrap_err();
    assert_eq!(err.issuer(), "hlir.ast");
    assert_eq!(err.message(), "The provided source tree is empty.");
}
