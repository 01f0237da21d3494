use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn dla_report_prints_overview() {
    let tmp = tempdir().unwrap();
    let midwest = tmp.path().join("MidwestKeyStatutes.csv");
    let akhi = tmp.path().join("AKHIEmergencyDeclaration.csv");
    fs::write(&midwest, "State,Local Authority\nOhio,Yes\nIowa,no\n").unwrap();
    fs::write(&akhi, "State,Emergency Declaration\nAlaska,Yes\n").unwrap();

    let mut cmd = Command::cargo_bin("dla-cli").unwrap();
    cmd.args([
        "report",
        midwest.to_str().unwrap(),
        akhi.to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("DISASTER LAW DATASET SUMMARY REPORT"))
    .stdout(predicate::str::contains("OVERALL STATISTICS:"))
    .stdout(predicate::str::contains("Total Files Processed: 2"))
    .stdout(predicate::str::contains("Total Records: 3"))
    .stdout(predicate::str::contains("Midwest: 1 datasets, 2 records"))
    .stdout(predicate::str::contains("Alaska/Hawaii: 1 datasets, 1 records"))
    .stdout(predicate::str::contains("State: 3 records (100.0% coverage)"));
}

#[test]
fn dla_report_filters_by_state() {
    let tmp = tempdir().unwrap();
    let data = tmp.path().join("SouthernLocalAuthority.csv");
    fs::write(&data, "State,Local Authority\nTexas,Yes\nGeorgia,no\n").unwrap();

    let mut cmd = Command::cargo_bin("dla-cli").unwrap();
    cmd.args(["report", data.to_str().unwrap(), "--state", "Texas"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Records: 1"));
}

#[test]
fn dla_inspect_json_is_valid() {
    let tmp = tempdir().unwrap();
    let data = tmp.path().join("NortheastFEMA.csv");
    fs::write(&data, "State\nMaine\nVermont\n").unwrap();

    let mut cmd = Command::cargo_bin("dla-cli").unwrap();
    let assert = cmd
        .args(["inspect", data.to_str().unwrap(), "--format", "json"])
        .assert()
        .success();

    let parsed: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(parsed["sheets"][0]["region"], "Northeast");
    assert_eq!(parsed["sheets"][0]["theme"], "FEMA/Risk Assessment");
    assert_eq!(parsed["sheets"][0]["row_count"], 2);
    assert_eq!(parsed["diagnostics"]["stats"]["sheets_read"], 1);
}

#[test]
fn dla_inspect_plain_lists_sheets() {
    let tmp = tempdir().unwrap();
    let data = tmp.path().join("AppalachiaVulnerable.csv");
    fs::write(&data, "State,Protection\nKentucky,shelters\n").unwrap();

    let mut cmd = Command::cargo_bin("dla-cli").unwrap();
    cmd.args(["inspect", data.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("FILE"))
        .stdout(predicate::str::contains("AppalachiaVulnerable.csv"))
        .stdout(predicate::str::contains("Appalachia/Central"))
        .stdout(predicate::str::contains("Load: 1 sources, 1 sheets, 1 rows"));
}

#[test]
fn dla_export_combined_writes_csv() {
    let tmp = tempdir().unwrap();
    let data = tmp.path().join("SouthernDeclaration.csv");
    fs::write(&data, "State,Emergency Declaration\nTexas,Yes\n").unwrap();
    let out = tmp.path().join("combined.csv");

    let mut cmd = Command::cargo_bin("dla-cli").unwrap();
    cmd.args([
        "export",
        "combined",
        data.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Combined data exported"));

    let contents = fs::read_to_string(&out).unwrap();
    assert!(contents
        .starts_with("source_file,sheet_name,region,theme,State,Emergency Declaration"));
    assert!(contents.contains("Texas"));
}

#[test]
fn dla_export_summary_writes_csv() {
    let tmp = tempdir().unwrap();
    let data = tmp.path().join("MidwestLocalAuthority.csv");
    fs::write(&data, "State,Local Authority\nOhio,Yes\nOhio,no\n").unwrap();
    let out = tmp.path().join("state_summary.csv");

    let mut cmd = Command::cargo_bin("dla-cli").unwrap();
    cmd.args([
        "export",
        "summary",
        data.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("State summary saved"));

    let contents = fs::read_to_string(&out).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next().unwrap(),
        "State,Local Authority Count,Vuln Pop Protection Count,region,Total Records"
    );
    assert_eq!(lines.next().unwrap(), "Ohio,1,0,Midwest,2");
}

#[test]
fn dla_export_groups_by_region() {
    let tmp = tempdir().unwrap();
    let a = tmp.path().join("MidwestMutualAid.csv");
    let b = tmp.path().join("NortheastMutualAid.csv");
    fs::write(&a, "State\nOhio\nIowa\n").unwrap();
    fs::write(&b, "State\nMaine\n").unwrap();
    let out = tmp.path().join("groups.csv");

    let mut cmd = Command::cargo_bin("dla-cli").unwrap();
    cmd.args([
        "export",
        "groups",
        a.to_str().unwrap(),
        b.to_str().unwrap(),
        "--by",
        "region",
        "--out",
        out.to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Grouped counts exported"));

    let contents = fs::read_to_string(&out).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next().unwrap(), "region,records");
    assert_eq!(lines.next().unwrap(), "Midwest,2");
    assert_eq!(lines.next().unwrap(), "Northeast,1");
}

#[test]
fn dla_report_missing_data_dir_fails() {
    let tmp = tempdir().unwrap();
    let missing = tmp.path().join("no-such-dir");

    let mut cmd = Command::cargo_bin("dla-cli").unwrap();
    cmd.args(["report", "--data-dir", missing.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}
