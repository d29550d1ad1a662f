use assert_cmd::prelude::*;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

// Minimal config with the surface center used by the traces below
fn write_valid_config(dir: &tempfile::TempDir) -> PathBuf {
    let toml = r#"
[session]
min_radius = 25.0
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

fn write_trace(dir: &tempfile::TempDir, rows: &[&str]) -> PathBuf {
    let path = dir.path().join("trace.csv");
    let mut f = fs::File::create(&path).unwrap();
    writeln!(f, "event,x,y,t_ms").unwrap();
    for r in rows {
        writeln!(f, "{r}").unwrap();
    }
    path
}

#[rstest]
#[case::complete(
    &["down,450,300,0", "move,400,350,10", "move,350,300,20", "move,400,250,30", "move,450,300,40", "up,450,300,50"],
    0,
    "Circle complete"
)]
#[case::too_small(&["down,410,300,0", "move,400,310,10"], 3, "Too small")]
#[case::not_circle(&["down,450,300,0", "move,460,300,10", "move,450,300,20"], 4, "Not circle")]
#[case::too_slow(&["down,450,300,0", "move,400,350,500"], 5, "Too slow")]
#[case::idle_ticks(
    &["down,450,300,0", "tick,,,5", "tick,,,10", "tick,,,15", "tick,,,20", "tick,,,25", "tick,,,30", "tick,,,35", "tick,,,40", "tick,,,45"],
    5,
    "Too slow"
)]
#[case::released_early(&["down,450,300,0", "move,400,350,10", "up,400,350,20"], 6, "Circle is not completed")]
fn replay_table_cases(#[case] rows: &[&str], #[case] exit_code: i32, #[case] needle: &str) {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);
    let trace = write_trace(&dir, rows);

    let mut cmd = Command::cargo_bin("circle").unwrap();
    cmd.arg("--config")
        .arg(&cfg)
        .arg("replay")
        .arg("--trace")
        .arg(&trace);

    cmd.assert()
        .code(exit_code)
        .stdout(predicate::str::contains(needle));
}

#[rstest]
#[case(&["--help"], 0, "Usage:", "stdout")]
#[case(&["self-check"], 0, "OK", "stdout")]
#[case(&["replay"], 2, "required", "stderr")]
#[case(&["replay", "--trace", "/nonexistent/trace.csv"], 1, "could not be opened", "stderr")]
fn cli_table_cases(
    #[case] args: &[&str],
    #[case] exit_code: i32,
    #[case] needle: &str,
    #[case] stream: &str,
) {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);

    let mut cmd = Command::cargo_bin("circle").unwrap();

    // Always include a valid config to avoid relying on default path
    cmd.arg("--config").arg(&cfg);
    for a in args {
        cmd.arg(a);
    }

    let assert = cmd.assert().code(exit_code);
    match stream {
        "stdout" => {
            assert.stdout(predicate::str::contains(needle));
        }
        "stderr" => {
            assert.stderr(predicate::str::contains(needle));
        }
        other => panic!("unknown stream: {other}"),
    }
}

#[rstest]
fn cli_reports_bad_trace_header() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);

    let bad_csv = dir.path().join("trace.csv");
    let mut f = fs::File::create(&bad_csv).unwrap();
    writeln!(f, "kind,x,y,time").unwrap();
    writeln!(f, "down,450,300,0").unwrap();

    let mut cmd = Command::cargo_bin("circle").unwrap();
    cmd.arg("--config")
        .arg(&cfg)
        .arg("replay")
        .arg("--trace")
        .arg(&bad_csv);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid headers"));
}

#[rstest]
fn cli_rejects_invalid_config() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("cfg.toml");
    fs::write(&cfg, "[session]\nmin_radius = -1.0\n").unwrap();

    let mut cmd = Command::cargo_bin("circle").unwrap();
    cmd.arg("--config").arg(&cfg).arg("self-check");
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("session.min_radius must be > 0"));
}

#[rstest]
fn explicit_missing_config_is_an_error() {
    let mut cmd = Command::cargo_bin("circle").unwrap();
    cmd.arg("--config").arg("/nonexistent/circle.toml").arg("self-check");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[rstest]
fn device_scale_is_applied_to_replayed_points() {
    let dir = tempdir().unwrap();
    // Device reports at twice the surface resolution.
    let cfg = dir.path().join("cfg.toml");
    fs::write(
        &cfg,
        "[surface]\ncenter_x = 400.0\ncenter_y = 300.0\nscale = 0.5\n",
    )
    .unwrap();
    let trace = write_trace(
        &dir,
        &["down,900,600,0", "move,800,700,10", "move,700,600,20", "move,800,500,30", "move,900,600,40"],
    );

    let mut cmd = Command::cargo_bin("circle").unwrap();
    cmd.arg("--config").arg(&cfg).arg("replay").arg("--trace").arg(&trace);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("radius 50.0px"));
}
