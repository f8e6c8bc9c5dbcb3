use std::path::PathBuf;
use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn path_as_str(path: &Path) -> &str {
    path.to_str().expect("utf-8 path")
}

#[test]
fn check_passes_for_real_fixture() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("backadmin-config"));
    cmd.arg("check")
        .arg(fixture("fixtures/backend.yaml"))
        .arg("--custom-types")
        .arg(fixture("fixtures/custom_types.toml"))
        .arg("--metadata")
        .arg(fixture("fixtures/metadata.toml"))
        .arg("--choices")
        .arg(fixture("fixtures/choices.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("result errors=0 warnings=0"));
}

#[test]
fn check_fails_on_missing_property() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("broken.yaml");
    fs::write(
        &input,
        r#"
entities:
  Book:
    class: App.Entity.Book
    list:
      form_filters:
        - type: acme.form.thing
"#,
    )
    .expect("write");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("backadmin-config"));
    cmd.arg("check")
        .arg(path_as_str(&input))
        .assert()
        .failure()
        .stderr(predicate::str::contains("check failed"))
        .stdout(predicate::str::contains("missing_property_key"));
}

#[test]
fn check_warns_on_dropped_filters() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("unguessable.yaml");
    fs::write(
        &input,
        r#"
entities:
  Book:
    class: App.Entity.Book
    list:
      form_filters:
        - ghost
"#,
    )
    .expect("write");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("backadmin-config"));
    cmd.arg("check")
        .arg(path_as_str(&input))
        .assert()
        .success()
        .stdout(predicate::str::contains("dropped_filter"))
        .stdout(predicate::str::contains("ghost"));
}

#[test]
fn check_strict_fails_on_warnings() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("unguessable.yaml");
    fs::write(
        &input,
        r#"
entities:
  Book:
    class: App.Entity.Book
    list:
      form_filters:
        - ghost
"#,
    )
    .expect("write");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("backadmin-config"));
    cmd.arg("check")
        .arg(path_as_str(&input))
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("strict mode"));
}

#[test]
fn check_emits_json_report() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("unknown_type.yaml");
    fs::write(
        &input,
        r#"
entities:
  Book:
    class: App.Entity.Book
    form:
      fields:
        body: { type: frobnicator }
"#,
    )
    .expect("write");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("backadmin-config"));
    cmd.arg("check")
        .arg(path_as_str(&input))
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"code\": \"unknown_form_type\""))
        .stdout(predicate::str::contains("frobnicator"));
}
