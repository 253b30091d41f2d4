//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const REPORT: &str = r#"{
  "classes": [
    {
      "name": "Widget", "status": "Renamed", "status_text": "A",
      "methods": [{"name": "Compute", "params": ["Int", "Int"], "status": "Renamed", "status_text": "Run"}],
      "fields": [{"name": "count", "type": "Int", "status": "Skipped", "status_text": "public"}]
    },
    {"name": "Api", "status": "Skipped", "status_text": "public api"}
  ],
  "resources": [{"name": "Widget.resources", "status": "Renamed", "status_text": "A.resources"}],
  "hidden_strings": [{"key": "0", "value": "secret"}]
}"#;

fn obfmap(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("obfmap"));
    cmd.current_dir(dir)
        .env_remove("OBFMAP_FORMAT")
        .env_remove("OBFMAP_OUTPUT")
        .env_remove("OBFMAP_ATOMIC_WRITE");
    cmd
}

fn write_report(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write report");
    path
}

#[test]
fn test_cli_version() {
    let tmp = TempDir::new().expect("tmp");
    obfmap(tmp.path()).arg("--version").assert().success().stdout(predicate::str::contains("obfmap"));
}

#[test]
fn test_cli_help() {
    let tmp = TempDir::new().expect("tmp");
    obfmap(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("rename maps"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("info"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_render_text_to_stdout() {
    let tmp = TempDir::new().expect("tmp");
    let report = write_report(tmp.path(), "report.json", REPORT);

    obfmap(tmp.path())
        .arg("render")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Renamed Types:\n\nWidget -> A\n{\n"))
        .stdout(predicate::str::contains("\tCompute( Int, Int ) -> Run\n"))
        .stdout(predicate::str::contains("\tInt count skipped: public\n"))
        .stdout(predicate::str::contains("Api skipped: public api\n"))
        .stdout(predicate::str::contains("Widget.resources -> A.resources\n"))
        .stdout(predicate::str::contains("=>0:\nsecret\n=>END OF 0\n"));
}

#[test]
fn test_render_xml_to_file() {
    let tmp = TempDir::new().expect("tmp");
    let report = write_report(tmp.path(), "report.json", REPORT);
    let out = tmp.path().join("maps").join("map.xml");

    obfmap(tmp.path())
        .arg("render")
        .arg(&report)
        .args(["--format", "xml", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Map written to"));

    let xml = fs::read_to_string(&out).expect("read map");
    assert!(xml.starts_with("<mapping>"));
    assert!(xml.contains(r#"<renamedClass oldName="Widget" newName="A">"#));
    assert!(xml.contains(r#"<renamedMethod oldName="Compute(Int,Int)" newName="Run"/>"#));
    assert!(xml.contains(r#"<renamedResource oldName="Widget.resources" newName="A.resources"/>"#));
    assert!(!xml.contains("secret"));
}

#[test]
fn test_render_json_into_directory() {
    let tmp = TempDir::new().expect("tmp");
    let report = write_report(tmp.path(), "report.json", REPORT);
    let out_dir = tmp.path().join("out");
    fs::create_dir_all(&out_dir).expect("mkdir");

    obfmap(tmp.path())
        .arg("render")
        .arg(&report)
        .args(["-f", "json", "--no-atomic", "-o"])
        .arg(&out_dir)
        .assert()
        .success();

    let json = fs::read_to_string(out_dir.join("Mapping.json")).expect("read map");
    let doc: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(doc["Renamed Types"]["Widget"]["Methods"]["Compute(Int, Int)"], "Run");
    assert_eq!(doc["Skipped Types"]["Api"]["Reason"], "public api");
    assert_eq!(doc["Hided Strings"]["0"], "secret");
}

#[test]
fn test_render_yaml_report() {
    let tmp = TempDir::new().expect("tmp");
    let report = write_report(
        tmp.path(),
        "report.yml",
        "classes:\n  - name: Widget\n    status: Skipped\n    status_text: reflection\n",
    );

    obfmap(tmp.path())
        .arg("render")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped Types:\n\nWidget skipped: reflection\n"));
}

#[test]
fn test_render_unexpected_status_writes_nothing() {
    let tmp = TempDir::new().expect("tmp");
    let report = write_report(
        tmp.path(),
        "report.json",
        r#"{"classes": [{"name": "Half", "status": "WillRename", "status_text": ""}]}"#,
    );
    let out = tmp.path().join("map.txt");

    obfmap(tmp.path())
        .arg("render")
        .arg(&report)
        .arg("-o")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Half has status WillRename"));

    assert!(!out.exists());
    let entries: Vec<_> = fs::read_dir(tmp.path()).expect("read dir").collect();
    assert_eq!(entries.len(), 1, "only the report remains");
}

#[test]
fn test_render_unexpected_status_on_stdout_prints_nothing() {
    let tmp = TempDir::new().expect("tmp");
    let report = write_report(
        tmp.path(),
        "report.json",
        r#"{"classes": [{"name": "Widget", "status": "Renamed", "status_text": "A",
            "methods": [{"name": "Run", "status": "Unknown"}]}]}"#,
    );

    obfmap(tmp.path())
        .arg("render")
        .arg(&report)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Widget::Run has status Unknown"));
}

#[test]
fn test_render_rejects_unsupported_report_extension() {
    let tmp = TempDir::new().expect("tmp");
    let report = write_report(tmp.path(), "report.txt", REPORT);

    obfmap(tmp.path())
        .arg("render")
        .arg(&report)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported report extension"));
}

#[test]
fn test_render_uses_discovered_config_format() {
    let tmp = TempDir::new().expect("tmp");
    let report = write_report(tmp.path(), "report.json", REPORT);
    fs::write(tmp.path().join("obfmap.toml"), "[obfmap]\nformat = \"xml\"\n").expect("config");

    obfmap(tmp.path())
        .arg("render")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<mapping>"));
}

#[test]
fn test_cli_format_overrides_config_and_env() {
    let tmp = TempDir::new().expect("tmp");
    let report = write_report(tmp.path(), "report.json", REPORT);
    fs::write(tmp.path().join("obfmap.yml"), "format: xml\n").expect("config");

    obfmap(tmp.path())
        .env("OBFMAP_FORMAT", "xml")
        .arg("render")
        .arg(&report)
        .args(["-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{\n  \"Renamed Types\": {"));
}

#[test]
fn test_env_overrides_config_file() {
    let tmp = TempDir::new().expect("tmp");
    let report = write_report(tmp.path(), "report.json", REPORT);
    fs::write(tmp.path().join("obfmap.toml"), "format = \"xml\"\n").expect("config");

    obfmap(tmp.path())
        .env("OBFMAP_FORMAT", "json")
        .arg("render")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"));
}

#[test]
fn test_explicit_invalid_config_fails() {
    let tmp = TempDir::new().expect("tmp");
    let report = write_report(tmp.path(), "report.json", REPORT);
    let config = tmp.path().join("custom.toml");
    fs::write(&config, "format = \"csv\"\n").expect("config");

    obfmap(tmp.path())
        .arg("render")
        .arg(&report)
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}

#[test]
fn test_info_prints_summary() {
    let tmp = TempDir::new().expect("tmp");
    let report = write_report(tmp.path(), "report.json", REPORT);

    obfmap(tmp.path())
        .arg("info")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report: report.json"))
        .stdout(predicate::str::contains("Types:           1 renamed,      1 skipped"))
        .stdout(predicate::str::contains("Strings:         1"));
}

#[test]
fn test_info_json_summary() {
    let tmp = TempDir::new().expect("tmp");
    let report = write_report(tmp.path(), "report.json", REPORT);

    let output = obfmap(tmp.path()).arg("info").arg(&report).arg("--json").output().expect("run");
    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(summary["methods"]["renamed"], 1);
    assert_eq!(summary["fields"]["skipped"], 1);
    assert_eq!(summary["hidden_strings"], 1);
}

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().expect("tmp");
    obfmap(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("obfmap"));
}
