//! Integration tests for the `render` command.

mod common;

use common::{blacksquid, check_stdout, temp_file};
use expect_test::expect;
use predicates::prelude::*;

// ============================================================================
// Substitution
// ============================================================================

#[test]
fn render_greeting() {
    let file = temp_file("Hello {{name}}, you have {{n}} items\n");
    check_stdout(
        &[
            "render",
            file.path().to_str().unwrap(),
            "--var",
            "name=Blacksquid",
            "--int",
            "n=3",
        ],
        None,
        expect![[r#"
            Hello Blacksquid, you have 3 items
        "#]],
    );
}

#[test]
fn render_from_stdin() {
    check_stdout(
        &["render", "-", "--list", "xs=1,2,3"],
        Some("{{xs}}"),
        expect!["( 1 2 3 )"],
    );
}

#[test]
fn render_numbers() {
    check_stdout(
        &[
            "render",
            "-",
            "--int",
            "i=-7",
            "--uint",
            "u=18446744073709551615",
            "--float",
            "f=2.5",
        ],
        Some("{{i}} {{u}} {{f}}"),
        expect!["-7 18446744073709551615 2.500000"],
    );
}

#[test]
fn later_binding_wins() {
    check_stdout(
        &["render", "-", "--var", "k=text", "--int", "k=1"],
        Some("{{k}}"),
        expect!["1"],
    );
}

#[test]
fn small_regions_still_render() {
    check_stdout(
        &[
            "render",
            "-",
            "--region-capacity",
            "1",
            "--list",
            "xs=alpha,bravo,charlie,delta",
        ],
        Some("<{{xs}}>"),
        expect!["<( alpha bravo charlie delta )>"],
    );
}

// ============================================================================
// Missing keys
// ============================================================================

#[test]
fn missing_key_skipped_by_default() {
    check_stdout(&["render", "-"], Some("[{{gone}}]"), expect!["[]"]);
}

#[test]
fn missing_key_kept() {
    check_stdout(
        &["render", "-", "--missing", "keep"],
        Some("[{{gone}}]"),
        expect!["[{{gone}}]"],
    );
}

#[test]
fn missing_key_error() {
    blacksquid()
        .args(["--no-color", "render", "-", "--missing", "error"])
        .write_stdin("hi {{gone}}")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no value for placeholder \"gone\""))
        .stderr(predicate::str::contains("<stdin>:1:4"));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn unterminated_placeholder() {
    let file = temp_file("ok {{open");
    blacksquid()
        .args(["--no-color", "render", file.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unterminated placeholder"));
}

#[test]
fn depth_limit() {
    blacksquid()
        .args(["render", "-", "--list", "xs=a", "--max-depth", "0"])
        .write_stdin("{{xs}}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("maximum depth of 0"));
}

#[test]
fn malformed_binding() {
    blacksquid()
        .args(["render", "-", "--int", "n=many"])
        .write_stdin("{{n}}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value for --int `n=many`"));
}

#[test]
fn missing_file() {
    blacksquid()
        .args(["render", "/nonexistent/template.tmpl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/template.tmpl"));
}

#[test]
fn bad_policy_is_a_usage_error() {
    blacksquid()
        .args(["render", "-", "--missing", "sometimes"])
        .assert()
        .failure()
        .code(2);
}
