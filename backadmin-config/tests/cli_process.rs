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

fn process_fixture_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("backadmin-config"));
    cmd.arg("process")
        .arg(fixture("fixtures/backend.yaml"))
        .arg("--custom-types")
        .arg(fixture("fixtures/custom_types.toml"))
        .arg("--metadata")
        .arg(fixture("fixtures/metadata.toml"))
        .arg("--choices")
        .arg(fixture("fixtures/choices.toml"));
    cmd
}

#[test]
fn process_resolves_aliases_and_guesses_filters() {
    process_fixture_cmd()
        .assert()
        .success()
        // Custom alias override wins over the built-in embedded_list target.
        .stdout(predicate::str::contains("acme.form.embedded_list"))
        .stdout(predicate::str::contains("backadmin.form.security.admin_roles"))
        // Legacy `text` tokens resolve to the built-in identifier.
        .stdout(predicate::str::contains("backadmin.form.text"))
        // to-one association filter becomes an autocomplete selector.
        .stdout(predicate::str::contains("backadmin.form.autocomplete"))
        .stdout(predicate::str::contains("App.Entity.Author"))
        // boolean filter gets the choice selector defaults.
        .stdout(predicate::str::contains("list_form_filters.default.boolean.true"))
        // string filter choices come from the static callback table.
        .stdout(predicate::str::contains("fantasy"))
        .stdout(predicate::str::contains("choices_static_callback").not());
}

#[test]
fn process_without_metadata_drops_unguessable_filters() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("backadmin-config"));
    cmd.arg("process")
        .arg(fixture("fixtures/backend.yaml"))
        .arg("--choices")
        .arg(fixture("fixtures/choices.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("backadmin.form.autocomplete").not())
        .stdout(predicate::str::contains("form_filters: {}"));
}

#[test]
fn process_writes_output_file() {
    let dir = tempdir().expect("tempdir");
    let out_path = dir.path().join("processed.yaml");

    process_fixture_cmd()
        .arg("--output")
        .arg(path_as_str(&out_path))
        .assert()
        .success();

    let written = fs::read_to_string(&out_path).expect("output file");
    assert!(written.contains("backadmin.form.autocomplete"));
}

#[test]
fn process_emits_json_when_requested() {
    process_fixture_cmd()
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"class\": \"App.Entity.Book\""));
}

#[test]
fn process_fails_on_malformed_filter_entry() {
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
        - available
        - 42
"#,
    )
    .expect("write");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("backadmin-config"));
    cmd.arg("process")
        .arg(path_as_str(&input))
        .assert()
        .failure()
        .stderr(predicate::str::contains("can only be strings or mappings"))
        .stderr(predicate::str::contains("`42`"));
}
