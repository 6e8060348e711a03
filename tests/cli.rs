//! Integration tests for top-level CLI behavior.

use std::process::Command;

fn run_hdlgen(args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_hdlgen");
    Command::new(bin).args(args).output().expect("failed to run hdlgen binary")
}

#[test]
fn no_arguments_shows_usage_error() {
    let output = run_hdlgen(&[]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Usage") || stderr.contains("usage"));
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let output = run_hdlgen(&["nonsense"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}

#[test]
fn run_without_endpoint_fails_with_hint() {
    let output = run_hdlgen(&["run", "cpu.txt"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("--endpoint"));
}

#[test]
fn run_help_shows_flags() {
    let output = run_hdlgen(&["run", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("--target"));
    assert!(stdout.contains("--replay"));
    assert!(stdout.contains("--retry-max"));
}

#[test]
fn check_accepts_a_valid_completion_file() {
    let dir = std::env::temp_dir().join("hdlgen_cli_check_accept");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("alu.txt");
    std::fs::write(
        &path,
        "####[BEGIN]####\n- `op_a` 8-bit operand\n- `op_b` 8-bit operand\n####[END]####\n\
         ####[BEGIN]####\nclass AluCore extends Module {}\n####[END]####\n",
    )
    .unwrap();

    let output = run_hdlgen(&["check", path.to_str().unwrap(), "--module", "alu"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("accepted"));
    assert!(stdout.contains("The interface of alu should contain 2 signals"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn check_rejects_an_unimplemented_completion_file() {
    let dir = std::env::temp_dir().join("hdlgen_cli_check_reject");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("alu.txt");
    std::fs::write(
        &path,
        "####[BEGIN]####\n- `op_a` 8-bit operand\n####[END]####\n\
         ####[BEGIN]####\nclass AluCore extends Module { // adder logic here\n}\n####[END]####\n",
    )
    .unwrap();

    let output = run_hdlgen(&["check", path.to_str().unwrap(), "--module", "alu"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("rejected"));
    assert!(stderr.contains("incomplete implementation of alu"));

    let _ = std::fs::remove_dir_all(&dir);
}
