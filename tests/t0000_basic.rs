use predicates::prelude::*;

mod common;

#[test]
fn no_subcommand_prints_hint() {
    common::tinygit()
        .assert()
        .success()
        .stdout(predicate::str::contains("Please supply a command"))
        .stderr("");
}

#[test]
fn unknown_subcommand_is_usage_error() {
    common::tinygit()
        .arg("commit")
        .assert()
        .code(2)
        .stdout("")
        .stderr("\"commit\" is not a valid command.\n");
}

#[test]
fn version() {
    common::tinygit()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("tinygit 0."))
        .stderr("");
}

#[test]
fn help_lists_init() {
    common::tinygit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"));
}
