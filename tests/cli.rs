//! End-to-end tests for the fnlang binary

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn workspace_with(source: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("main.fn"), source).unwrap();
    dir
}

#[test]
fn translates_explicit_path() {
    let dir = workspace_with("function add(x: int, y: int): int { add(x, y); }");
    let mut cmd = cargo_bin_cmd!("fnlang");
    cmd.arg(dir.path().join("main.fn"));

    cmd.assert()
        .success()
        .stdout("int add(int x, int y){\n\tadd(x,y);\n}");
}

#[test]
fn reads_default_input_path() {
    let dir = workspace_with("function f(): int { 42; }");
    let mut cmd = cargo_bin_cmd!("fnlang");
    cmd.current_dir(dir.path());

    cmd.assert().success().stdout("int f(){\n\t42;\n}");
}

#[test]
fn local_config_file_is_picked_up() {
    let dir = workspace_with("");
    fs::write(dir.path().join("prog.fn"), "function g(): int { g(); }").unwrap();
    fs::write(
        dir.path().join("fnlang.toml"),
        "[input]\npath = \"prog.fn\"\n\n[output]\ntrailing_newline = true\n",
    )
    .unwrap();
    let mut cmd = cargo_bin_cmd!("fnlang");
    cmd.current_dir(dir.path());

    cmd.assert().success().stdout("int g(){\n\tg();\n}\n");
}

#[test]
fn explicit_config_file_overrides_format() {
    let dir = workspace_with("function f(): int { 1; }");
    let config = dir.path().join("custom.toml");
    fs::write(&config, "[output]\nformat = \"ast-treeviz\"\n").unwrap();
    let mut cmd = cargo_bin_cmd!("fnlang");
    cmd.current_dir(dir.path()).arg("--config").arg(&config);

    cmd.assert()
        .success()
        .stdout("FunctionDef: f -> int\n└─ IntegerLiteral: 1\n");
}

#[test]
fn format_flag_selects_token_output() {
    let dir = workspace_with("function f(): int { 1; }");
    let mut cmd = cargo_bin_cmd!("fnlang");
    cmd.current_dir(dir.path()).args(["--format", "token-simple"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("function-keyword function\nidentifier f\n"));
}

#[test]
fn parse_error_exits_nonzero_with_stage_and_kinds() {
    let dir = workspace_with("function f() int { 1; }");
    let mut cmd = cargo_bin_cmd!("fnlang");
    cmd.current_dir(dir.path());

    cmd.assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains(
            "parse error: expected colon, found identifier `int`",
        ));
}

#[test]
fn deep_nesting_exits_nonzero_instead_of_aborting() {
    let depth = 200_000;
    let dir = workspace_with(&format!(
        "function f(): int {{ {}1{}; }}",
        "g(".repeat(depth),
        ")".repeat(depth)
    ));
    let mut cmd = cargo_bin_cmd!("fnlang");
    cmd.current_dir(dir.path());

    cmd.assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains(
            "parse error: calls nested deeper than 256 levels",
        ));
}

#[test]
fn lex_error_names_remainder() {
    let dir = workspace_with("function f(): int { #1; }");
    let mut cmd = cargo_bin_cmd!("fnlang");
    cmd.current_dir(dir.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("lex error: no token matches at 1:21: `#1; }`"));
}

#[test]
fn missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("fnlang");
    cmd.current_dir(dir.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("io error: main.fn"));
}

#[test]
fn unknown_format() {
    let dir = workspace_with("function f(): int { 1; }");
    let mut cmd = cargo_bin_cmd!("fnlang");
    cmd.current_dir(dir.path()).args(["-f", "cobol"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("format error: format 'cobol' not found"));
}

#[test]
fn lists_formats() {
    let mut cmd = cargo_bin_cmd!("fnlang");
    cmd.arg("--list-formats");

    cmd.assert().success().stdout(
        predicate::str::contains("ast-json")
            .and(predicate::str::contains("  c\n"))
            .and(predicate::str::contains("token-simple")),
    );
}

#[test]
fn verbose_logs_stay_off_stdout() {
    let dir = workspace_with("function f(): int { 1; }");
    let mut cmd = cargo_bin_cmd!("fnlang");
    cmd.current_dir(dir.path()).arg("-vv").env_remove("RUST_LOG");

    cmd.assert()
        .success()
        .stdout("int f(){\n\t1;\n}")
        .stderr(predicate::str::contains("lexed 10 tokens"));
}
