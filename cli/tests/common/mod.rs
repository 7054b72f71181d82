//! Shared helpers for the CLI integration tests.

#![allow(dead_code)]

use std::io::Write;

use assert_cmd::Command;
use expect_test::Expect;

/// A command for the blacksquid binary, with logging quiet.
pub fn blacksquid() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_blacksquid"));
    cmd.env_remove("RUST_LOG");
    cmd
}

/// A temporary template file holding `content`.
pub fn temp_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".tmpl")
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

/// Run a command and check that stdout matches the expected output.
pub fn check_stdout(args: &[&str], stdin: Option<&str>, expected: Expect) {
    let mut cmd = blacksquid();
    cmd.args(args);
    if let Some(input) = stdin {
        cmd.write_stdin(input);
    }
    let output = cmd.output().expect("failed to execute command");
    expected.assert_eq(&String::from_utf8_lossy(&output.stdout));
}
