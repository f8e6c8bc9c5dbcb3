use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn inspect_renders_tree_to_default_depth() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("backadmin-config"));
    cmd.arg("inspect")
        .arg(fixture("fixtures/backend.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("entities"))
        .stdout(predicate::str::contains("    class: App.Entity.Book"))
        .stdout(predicate::str::contains("      fields (3 keys)"));
}

#[test]
fn inspect_honors_depth_limit() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("backadmin-config"));
    cmd.arg("inspect")
        .arg(fixture("fixtures/backend.yaml"))
        .arg("--depth")
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::contains("  Book (5 keys)"));
}
