use assert_cmd::prelude::*;
use rstest::rstest;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

fn write_valid_config(dir: &tempfile::TempDir) -> PathBuf {
    let toml = r#"
[session]
position_change_delay_ms = 40
tick_interval_ms = 5

[surface]
center_x = 400.0
center_y = 300.0
"#;
    let path = dir.path().join("cfg.toml");
    fs::write(&path, toml).unwrap();
    path
}

fn write_trace(dir: &tempfile::TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("trace.csv");
    fs::write(&path, format!("event,x,y,t_ms\n{body}")).unwrap();
    path
}

fn result_line(stdout: &[u8]) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(stdout);
    let line = stdout
        .lines()
        .find(|l| l.contains("\"status\""))
        .unwrap_or("")
        .to_string();
    assert!(
        !line.is_empty(),
        "no JSONL line with status found; stdout was: {stdout}"
    );
    serde_json::from_str(&line).expect("valid JSON")
}

/// Validate the JSONL schema for a completed replay.
#[rstest]
fn jsonl_complete_schema() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);
    let trace = write_trace(
        &dir,
        "down,450,300,0\nmove,400,350,10\nmove,350,300,20\nmove,400,250,30\nmove,450,300,40\n",
    );

    let mut cmd = Command::cargo_bin("circle").unwrap();
    cmd.arg("--json")
        .arg("--log-level")
        .arg("error")
        .arg("--config")
        .arg(&cfg)
        .arg("replay")
        .arg("--trace")
        .arg(&trace);

    let out = cmd.assert().success().get_output().stdout.clone();
    let v = result_line(&out);

    // Required numeric fields
    assert!(v.get("timestamp").and_then(|x| x.as_i64()).is_some());
    assert!(v.get("duration_ms").and_then(|x| x.as_u64()).is_some());
    assert_eq!(v.get("samples").and_then(|x| x.as_u64()), Some(4));
    let acc = v.get("accuracy").and_then(|x| x.as_f64()).unwrap();
    assert!((acc - 100.0).abs() < 1e-9);

    assert_eq!(v["command"], "replay");
    assert_eq!(v["status"], "complete");
    assert_eq!(v["error"], "");

    // Rejection must be null on success
    assert!(v.get("rejection").is_some());
    assert!(v.get("rejection").unwrap().is_null());
}

/// Validate the JSONL schema for a rejected replay, including the error object on stderr.
#[rstest]
fn jsonl_rejected_schema() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);
    let trace = write_trace(&dir, "down,450,300,0\nmove,400,350,500\n");

    let mut cmd = Command::cargo_bin("circle").unwrap();
    cmd.arg("--json")
        .arg("--log-level")
        .arg("error")
        .arg("--config")
        .arg(&cfg)
        .arg("replay")
        .arg("--trace")
        .arg(&trace);

    let output = cmd.assert().code(5).get_output().clone();
    let v = result_line(&output.stdout);
    assert_eq!(v["status"], "rejected");
    assert_eq!(v["rejection"], "TooSlow");
    assert_eq!(v["error"], "Too slow");
    assert_eq!(v["samples"], 1);

    let stderr = String::from_utf8_lossy(&output.stderr);
    let err_line = stderr
        .lines()
        .find(|l| l.contains("\"reason\""))
        .expect("structured error on stderr");
    let e: serde_json::Value = serde_json::from_str(err_line).expect("valid JSON");
    assert_eq!(e["reason"], "TooSlow");
    assert_eq!(e["details"]["position_change_delay_ms"], 40);
}

#[rstest]
fn jsonl_self_check_reports_effective_settings() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);

    let mut cmd = Command::cargo_bin("circle").unwrap();
    cmd.arg("--json").arg("--config").arg(&cfg).arg("self-check");
    let out = cmd.assert().success().get_output().stdout.clone();
    let v = result_line(&out);
    assert_eq!(v["status"], "ok");
    assert_eq!(v["idle_tick_limit"], 9);
    assert_eq!(v["tick_rate_hz"], 200);
    assert_eq!(v["quadrant_boundary"], "HalfOpen");
}
