use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::tempdir;

fn sample(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("samples");
    path.push(name);
    path
}

const COMPUTE_IR: &str = r#""builtin.module"() ({
    "builtin.func"() ({
    ^entry(%x: !_.int, %y: !_.int):
        %0 = "py.binOp"(%x, %y) {op="add"} : (!_.int, !_.int) -> !_.Any
        %a = "py.cast"(%0) : (!_.Any) -> !_.int
        "py.return"(%a) : (!_.int) -> ()
    }) {function_type=(!_.int, !_.int) -> !_.int, sym_name="compute"} : () -> ()
}) : () -> ()
"#;

#[test]
fn build_prints_ir_for_sample() {
    let output = Command::cargo_bin("hlir")
        .unwrap()
        .arg("build")
        .arg(sample("compute.json"))
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), COMPUTE_IR);
}

#[test]
fn build_writes_output_file_and_dumps() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("compute.ir");

    Command::cargo_bin("hlir")
        .unwrap()
        .current_dir(dir.path())
        .arg("build")
        .arg(sample("compute.json"))
        .arg("-o")
        .arg(&out)
        .arg("-d")
        .arg("ir")
        .assert()
        .success();

    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(written, COMPUTE_IR);

    let dumped = std::fs::read_to_string(dir.path().join("dumped_ir.txt")).unwrap();
    assert!(dumped.contains("Operator"));
    assert!(dumped.contains("\"binOp\""));
}

#[test]
fn build_dumps_decoded_tree() {
    let dir = tempdir().unwrap();

    Command::cargo_bin("hlir")
        .unwrap()
        .current_dir(dir.path())
        .arg("build")
        .arg(sample("compute.json"))
        .arg("--dump")
        .arg("ast")
        .assert()
        .success();

    let dumped = std::fs::read_to_string(dir.path().join("dumped_ast.txt")).unwrap();
    assert!(dumped.contains("FunctionDef"));
    assert!(dumped.contains("\"compute\""));
}

#[test]
fn unsupported_construct_fails_with_report() {
    let output = Command::cargo_bin("hlir")
        .unwrap()
        .arg("build")
        .arg(sample("unsupported.json"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("HLIR | ERROR | 1:0 | Unsupported construct: else clause on while loop"));
}

#[test]
fn missing_file_fails() {
    let dir = tempdir().unwrap();

    let output = Command::cargo_bin("hlir")
        .unwrap()
        .arg("build")
        .arg(dir.path().join("nope.json"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Missing source tree"));
}

#[test]
fn malformed_json_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{\"_t\": \"Module\", \"body\": [").unwrap();

    let output = Command::cargo_bin("hlir")
        .unwrap()
        .arg("build")
        .arg(&path)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Malformed source tree"));
}

#[test]
fn stats_counts_opcodes_as_json() {
    let output = Command::cargo_bin("hlir")
        .unwrap()
        .arg("stats")
        .arg(sample("compute.json"))
        .arg("--json")
        .output()
        .unwrap();

    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    let opcodes: Vec<&str> = rows.iter().map(|r| r["opcode"].as_str().unwrap()).collect();
    assert_eq!(
        opcodes,
        vec!["builtin.func", "builtin.module", "py.binOp", "py.cast", "py.return"]
    );
    assert!(rows.iter().all(|r| r["count"] == 1));
}

#[test]
fn stats_prints_table() {
    let output = Command::cargo_bin("hlir")
        .unwrap()
        .arg("stats")
        .arg(sample("compute.json"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("5 operators"));
    assert!(stdout.contains("Opcode"));
    assert!(stdout.contains("py.binOp"));
}
