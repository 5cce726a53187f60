use std::io::Write;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

fn schema_file(yaml: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file
}

#[test]
fn kinds_lists_builtin_kinds() {
    Command::cargo_bin("crudpanel")
        .unwrap()
        .arg("kinds")
        .assert()
        .success()
        .stdout(predicate::str::contains("form-range"))
        .stdout(predicate::str::contains("relation"));
}

#[test]
fn check_prints_form_section_as_yaml() {
    let file = schema_file(
        "entity: Page\nfields:\n  - id: title\n    kind: input\n    attributes:\n      title: Title\n",
    );
    Command::cargo_bin("crudpanel")
        .unwrap()
        .args(["check", "--format", "yaml"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("route_prefix: admin/pages"))
        .stdout(predicate::str::contains("id: title"));
}

#[test]
fn check_fails_on_duplicate_field_ids() {
    let file = schema_file(
        "entity: Page\nfields:\n  - id: title\n    kind: input\n    attributes:\n      title: Title\n  - id: title\n    kind: textarea\n    attributes:\n      title: Body\n",
    );
    Command::cargo_bin("crudpanel")
        .unwrap()
        .arg("check")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("title"));
}

#[test]
fn config_reads_explicit_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, "{{\"per_page\": 42}}").unwrap();
    Command::cargo_bin("crudpanel")
        .unwrap()
        .env_remove("CRUDPANEL_PER_PAGE")
        .args(["config", "--format", "json", "--file"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"per_page\": 42"));
}
