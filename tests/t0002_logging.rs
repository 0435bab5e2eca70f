use predicates::prelude::*;

mod common;

// Kept in its own test binary: it changes the environment of the test process.
#[test]
fn caller_log_level_is_not_inherited() {
    std::env::set_var("RUST_LOG", "debug");

    let tempdir = tempfile::tempdir().unwrap();

    common::tinygit()
        .args(&["init", tempdir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Initialized empty repository in "))
        .stderr("");
}
