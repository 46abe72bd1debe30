// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Runs the `tric` binary end to end.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn tric(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tric"))
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run tric")
}

fn write_source(dir: &Path, text: &str) -> String {
    let path = dir.join("main.tri");
    fs::write(&path, text).unwrap();
    path.display().to_string()
}

#[test]
fn compiles_and_writes_both_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path(), "let var y Integer; const x ~ 5 in y = x endlet pass");
    let bin = dir.path().join("main.bin").display().to_string();
    let lst = dir.path().join("main.lst").display().to_string();

    let out = tric(&[&input, &bin, &lst]);

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stdout).contains("=== compile OK ==="));
    assert!(fs::read_to_string(&lst).unwrap().contains("! 1:9 variable y: Integer"));
    assert!(!fs::read(&bin).unwrap().is_empty());
}

#[test]
fn undefined_name_fails_with_location() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path(), "z = 3");
    let bin = dir.path().join("main.bin").display().to_string();
    let lst = dir.path().join("main.lst").display().to_string();

    let out = tric(&[&input, &bin, &lst]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("error[E0200]: undefined symbol: `z`"));
    assert!(stderr.contains(&format!("--> {}:1:1", input)));
    assert!(stderr.contains("=== resolve FAILED: 1 error ==="));
    assert!(!Path::new(&bin).exists());
}

#[test]
fn json_report_on_type_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path(), "if 3 then pass else pass");

    let out = tric(&["--format", "json", &input, "unused.bin", "unused.lst"]);

    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("\"phase\": \"typecheck\""));
    assert!(stdout.contains("\"success\": false"));
    assert!(stdout.contains("E0308"));
}

#[test]
fn missing_input_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("absent.tri").display().to_string();

    let out = tric(&[&input, "a.bin", "a.lst"]);

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("cannot read"));
}

#[test]
fn emit_tokens_dumps_stream() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path(), "const x ~ 5");

    let out = tric(&["--emit", "tokens", &input]);

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.lines().count(), 5);
    assert!(stdout.lines().last().unwrap().starts_with("EndOfText"));
}
