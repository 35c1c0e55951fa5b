use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn oosla() -> Command {
    let mut cmd = Command::cargo_bin("oosla").unwrap();
    cmd.env_remove("JIRA_USER")
        .env_remove("JIRA_PASSWORD")
        .env_remove("JIRA_PRIORITY");
    cmd
}

fn write_team_doc(dir: &TempDir, team: &str, body: &str) {
    std::fs::write(dir.path().join(format!("{team}.yaml")), body).unwrap();
}

// ---------------------------------------------------------------------------
// Invocation errors
// ---------------------------------------------------------------------------

#[test]
fn no_arguments_prints_usage_and_fails() {
    oosla()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn run_requires_credentials() {
    oosla()
        .args(["run", "payments"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--user"));
}

#[test]
fn invalid_priority_override_is_rejected() {
    let dir = TempDir::new().unwrap();
    write_team_doc(&dir, "payments", "projects: [PAY]\n");
    oosla()
        .args([
            "run",
            "payments",
            "--user",
            "u",
            "--password",
            "p",
            "--priority",
            "p9",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown priority"));
}

// ---------------------------------------------------------------------------
// Team document loading
// ---------------------------------------------------------------------------

#[test]
fn missing_team_document_is_fatal() {
    let dir = TempDir::new().unwrap();
    oosla()
        .args(["validate", "ghost", "--onboard-dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("team configuration not found"));
}

#[test]
fn invalid_team_document_is_fatal() {
    let dir = TempDir::new().unwrap();
    write_team_doc(&dir, "empty", "projects: []\n");
    oosla()
        .args(["validate", "empty", "--onboard-dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one project"));
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[test]
fn validate_prints_resolved_sla_table() {
    let dir = TempDir::new().unwrap();
    write_team_doc(&dir, "payments", "projects: [PAY]\n");
    oosla()
        .args(["validate", "payments", "--onboard-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("P0"))
        .stdout(predicate::str::contains("40h"))
        .stdout(predicate::str::contains("2060h"));
}

#[test]
fn validate_json_output_is_parseable() {
    let dir = TempDir::new().unwrap();
    write_team_doc(&dir, "payments", "projects: [PAY, BILL]\n");
    let output = oosla()
        .args(["validate", "payments", "--json", "--onboard-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["projects"].as_array().unwrap().len(), 2);
    assert_eq!(value["oosla_day"], "tuesday");
}

#[test]
fn validate_reflects_sla_overrides() {
    let dir = TempDir::new().unwrap();
    write_team_doc(
        &dir,
        "payments",
        "projects: [PAY]\nsla:\n  non_security:\n    p0:\n      deadline_hours: 24\n      soon_floor_hours: 12\n",
    );
    oosla()
        .args(["validate", "payments", "--onboard-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("24h"));
}

// ---------------------------------------------------------------------------
// run (remote failures are non-fatal)
// ---------------------------------------------------------------------------

#[test]
fn unreachable_tracker_does_not_abort_the_run() {
    let onboard = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_team_doc(&onboard, "payments", "projects: [PAY]\n");

    // Nothing listens here: every search fails, is logged, and the run
    // still completes with an empty summary.
    oosla()
        .args([
            "run",
            "payments",
            "--user",
            "u",
            "--password",
            "p",
            "--dry-run",
            "--json",
            "--base-url",
            "http://127.0.0.1:9",
            "--onboard-dir",
        ])
        .arg(onboard.path())
        .arg("--output-dir")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"notifications_sent\": 0"));
}
