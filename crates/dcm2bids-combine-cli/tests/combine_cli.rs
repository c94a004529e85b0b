use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data")
}

fn bin() -> Command {
    Command::cargo_bin("compile-dcm2bids-config").unwrap()
}

#[test]
fn test_combine_to_stdout() {
    let data = data_dir();
    let expected = fs::read_to_string(data.join("merged_config1_config2.json")).unwrap();

    let assert = bin()
        .arg(data.join("config1.json"))
        .arg(data.join("config2.json"))
        .assert()
        .success()
        .stderr("");

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout, expected);
}

#[test]
fn test_combine_to_out_file() {
    let data = data_dir();
    let temp = assert_fs::TempDir::new().unwrap();
    let out = temp.child("combined/config.json");

    bin()
        .arg(data.join("config1.json"))
        .arg(data.join("config2.json"))
        .arg("-o")
        .arg(out.path())
        .assert()
        .success()
        .stdout("");

    out.assert(predicate::path::exists());
    let expected = fs::read_to_string(data.join("merged_config1_config2.json")).unwrap();
    assert_eq!(fs::read_to_string(out.path()).unwrap(), expected);
}

#[test]
fn test_yaml_output_matches_json_output() {
    let data = data_dir();

    let assert = bin()
        .arg("--yaml")
        .arg(data.join("config1.json"))
        .arg(data.join("config2.json"))
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.starts_with("searchMethod: fnmatch\n"));

    let from_yaml: serde_json::Value = serde_yaml::from_str(&stdout).unwrap();
    let expected: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(data.join("merged_config1_config2.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(from_yaml, expected);
}

#[test]
fn test_mixed_json_and_yaml_inputs() {
    let data = data_dir();

    let assert = bin()
        .arg(data.join("config1.json"))
        .arg(data.join("config3.yaml"))
        .assert()
        .success();

    let combined: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let descriptions = combined["descriptions"].as_array().unwrap();
    assert_eq!(descriptions.len(), 5);
    assert_eq!(descriptions[3]["id"], "swi");
    assert_eq!(descriptions[4]["IntendedFor"], serde_json::json!([3, "rest"]));
}

#[test]
fn test_small_merge_snapshot() {
    let temp = assert_fs::TempDir::new().unwrap();
    let a = temp.child("a.json");
    a.write_str(r#"{"descriptions": [{}, {"IntendedFor": 0}]}"#).unwrap();
    let b = temp.child("b.json");
    b.write_str(r#"{"descriptions": [{"IntendedFor": 1}, {}]}"#).unwrap();

    let assert = bin().arg(a.path()).arg(b.path()).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    insta::assert_snapshot!(stdout, @r#"
    {
      "descriptions": [
        {},
        {
          "IntendedFor": 0
        },
        {
          "IntendedFor": 3
        },
        {}
      ]
    }
    "#);
}

#[test]
fn test_conflicting_parameter_fails_without_output() {
    let data = data_dir();
    let temp = assert_fs::TempDir::new().unwrap();
    let out = temp.child("combined.json");

    bin()
        .arg(data.join("config1.json"))
        .arg(data.join("conflicting_search.json"))
        .arg("--out-file")
        .arg(out.path())
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("[searchMethod]"));

    out.assert(predicate::path::missing());
}

#[test]
fn test_duplicate_id_fails() {
    let data = data_dir();

    bin()
        .arg(data.join("config1.json"))
        .arg(data.join("duplicate_id.json"))
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("Found multiple descriptions with ID [t1w]"));
}

#[test]
fn test_malformed_intended_for_fails() {
    let temp = assert_fs::TempDir::new().unwrap();
    let bad = temp.child("bad.json");
    bad.write_str(r#"{"descriptions": [{"IntendedFor": {"index": 0}}]}"#)
        .unwrap();

    bin()
        .arg(bad.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("IntendedFor must be int, str or (int | str)[]"));
}

#[test]
fn test_missing_input_fails() {
    let temp = assert_fs::TempDir::new().unwrap();

    bin()
        .arg(temp.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.json"));
}

#[test]
fn test_requires_an_input() {
    bin()
        .assert()
        .failure()
        .stderr(predicate::str::contains("IN_FILE"));
}

#[test]
fn test_version_flag() {
    bin()
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_mentions_purpose() {
    bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Combine multiple dcm2bids config files"))
        .stdout(predicate::str::contains("--yaml"));
}
