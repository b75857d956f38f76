use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Command rooted in its own temp working directory, isolated from any real
/// user config (HOME and XDG both point into the temp dir).
fn sweeprun_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sweeprun").unwrap();
    cmd.current_dir(dir.path());
    cmd.env("HOME", dir.path());
    cmd.env("XDG_CONFIG_HOME", dir.path().join("xdg"));
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Write an executable stub script the runner can shell out to.
#[cfg(unix)]
fn write_stub(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

// ---- list tests ----

#[test]
fn list_shows_tasks_with_pending_status() {
    let tmp = TempDir::new().unwrap();

    sweeprun_cmd(&tmp)
        .args(["list", "--filter", "splitcount_5_16"])
        .assert()
        .success()
        .stdout(predicate::str::contains("splitcount_5_16: gscb 5613 1 5 16"))
        .stdout(predicate::str::contains("pending"))
        .stdout(predicate::str::contains("1 tasks, 0 done"));
}

#[test]
fn list_counts_the_full_sweep() {
    let tmp = TempDir::new().unwrap();

    sweeprun_cmd(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("432 tasks, 0 done"));
}

#[test]
fn list_marks_recorded_tasks_done() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("results.txt"), "splitcount_5_16: 37\n").unwrap();

    sweeprun_cmd(&tmp)
        .args(["list", "--filter", "splitcount_5_16"])
        .assert()
        .success()
        .stdout(predicate::str::contains("done"))
        .stdout(predicate::str::contains("1 tasks, 1 done"));
}

#[test]
fn list_json_is_parseable() {
    let tmp = TempDir::new().unwrap();

    let output = sweeprun_cmd(&tmp)
        .args(["list", "--filter", "feature_accu", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("output should be valid JSON");
    let arr = parsed.as_array().expect("should be a JSON array");
    assert_eq!(arr.len(), 20);
    assert_eq!(arr[0]["name"], "feature_accu_2_strategy1");
    assert_eq!(arr[0]["command"], "accu 1 2");
    assert_eq!(arr[0]["done"], false);
}

// ---- run tests ----

#[cfg(unix)]
#[test]
fn run_records_stub_output() {
    let tmp = TempDir::new().unwrap();
    let stub = write_stub(tmp.path(), "fake-bench", "echo 42");

    sweeprun_cmd(&tmp)
        .args(["run", "--filter", "splitcount_5_16"])
        .args(["--executable", stub.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("now running: splitcount_5_16"))
        .stdout(predicate::str::contains("task splitcount_5_16 done!"))
        .stdout(predicate::str::contains("1 executed, 0 skipped"));

    let contents = fs::read_to_string(tmp.path().join("results.txt")).unwrap();
    assert_eq!(contents, "splitcount_5_16: 42\n");
}

#[cfg(unix)]
#[test]
fn run_passes_the_argument_string_through_the_shell() {
    let tmp = TempDir::new().unwrap();
    let stub = write_stub(tmp.path(), "fake-bench", "echo \"$@\"");

    sweeprun_cmd(&tmp)
        .args(["run", "--filter", "splitcount_5_16"])
        .args(["--executable", stub.to_str().unwrap()])
        .assert()
        .success();

    let contents = fs::read_to_string(tmp.path().join("results.txt")).unwrap();
    assert_eq!(contents, "splitcount_5_16: gscb 5613 1 5 16\n");
}

#[cfg(unix)]
#[test]
fn rerun_skips_recorded_tasks() {
    let tmp = TempDir::new().unwrap();
    let stub = write_stub(tmp.path(), "fake-bench", "echo 42");

    for _ in 0..2 {
        sweeprun_cmd(&tmp)
            .args(["run", "--filter", "splitcount_5_16"])
            .args(["--executable", stub.to_str().unwrap()])
            .assert()
            .success();
    }

    // The second run must not re-execute or duplicate the line.
    let contents = fs::read_to_string(tmp.path().join("results.txt")).unwrap();
    assert_eq!(contents, "splitcount_5_16: 42\n");

    sweeprun_cmd(&tmp)
        .args(["run", "--filter", "splitcount_5_16"])
        .args(["--executable", stub.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 executed, 1 skipped"));
}

#[cfg(unix)]
#[test]
fn run_records_empty_output_from_failing_executable() {
    let tmp = TempDir::new().unwrap();
    let stub = write_stub(tmp.path(), "fake-bench", "exit 3");

    sweeprun_cmd(&tmp)
        .args(["run", "--filter", "splitcount_5_16"])
        .args(["--executable", stub.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 executed, 0 skipped"));

    let contents = fs::read_to_string(tmp.path().join("results.txt")).unwrap();
    assert_eq!(contents, "splitcount_5_16: \n");
}

#[cfg(unix)]
#[test]
fn bounded_jobs_still_complete_the_filtered_sweep() {
    let tmp = TempDir::new().unwrap();
    let stub = write_stub(tmp.path(), "fake-bench", "echo 1");

    // feature_accu sweep is 20 tasks.
    sweeprun_cmd(&tmp)
        .args(["run", "--filter", "feature_accu", "--jobs", "3"])
        .args(["--executable", stub.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("20 executed, 0 skipped"));

    let contents = fs::read_to_string(tmp.path().join("results.txt")).unwrap();
    assert_eq!(contents.lines().count(), 20);
    assert!(contents.lines().all(|l| l.ends_with(": 1")));
}

#[test]
fn dry_run_prints_without_touching_the_results_file() {
    let tmp = TempDir::new().unwrap();

    sweeprun_cmd(&tmp)
        .args(["run", "--filter", "splitcount_5_16", "--dry-run"])
        .args(["--executable", "/does/not/matter"])
        .assert()
        .success()
        .stdout(predicate::str::contains("splitcount_5_16: gscb 5613 1 5 16"));

    assert!(!tmp.path().join("results.txt").exists());
}

#[test]
fn run_without_executable_fails() {
    let tmp = TempDir::new().unwrap();

    sweeprun_cmd(&tmp)
        .args(["run", "--filter", "splitcount_5_16"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No benchmark executable configured"));
}

// ---- config file tests ----

#[cfg(unix)]
#[test]
fn config_file_supplies_executable_and_results_path() {
    let tmp = TempDir::new().unwrap();
    let stub = write_stub(tmp.path(), "fake-bench", "echo 7");
    fs::write(
        tmp.path().join("sweeprun.toml"),
        format!(
            "executable = \"{}\"\nresults_file = \"out.txt\"\n",
            stub.display()
        ),
    )
    .unwrap();

    sweeprun_cmd(&tmp)
        .args(["run", "--filter", "splitcount_5_16"])
        .assert()
        .success();

    let contents = fs::read_to_string(tmp.path().join("out.txt")).unwrap();
    assert_eq!(contents, "splitcount_5_16: 7\n");
    assert!(!tmp.path().join("results.txt").exists());
}

#[cfg(unix)]
#[test]
fn cli_flags_override_the_config_file() {
    let tmp = TempDir::new().unwrap();
    let config_stub = write_stub(tmp.path(), "config-bench", "echo from-config");
    let cli_stub = write_stub(tmp.path(), "cli-bench", "echo from-cli");
    fs::write(
        tmp.path().join("sweeprun.toml"),
        format!("executable = \"{}\"\n", config_stub.display()),
    )
    .unwrap();

    sweeprun_cmd(&tmp)
        .args(["run", "--filter", "splitcount_5_16"])
        .args(["--executable", cli_stub.to_str().unwrap()])
        .assert()
        .success();

    let contents = fs::read_to_string(tmp.path().join("results.txt")).unwrap();
    assert_eq!(contents, "splitcount_5_16: from-cli\n");
}

#[test]
fn invalid_config_file_is_reported() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("sweeprun.toml"), "executable = [broken").unwrap();

    sweeprun_cmd(&tmp)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

// ---- report tests ----

#[test]
fn report_extracts_matching_lines_in_order() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("results.txt"),
        "splitcount_9_20: 14\n\
         feature_accu_4_strategy1: 42\n\
         splitcount_5_16: 37\n\
         garbage line\n\
         splitcount_6_16: 40\n",
    )
    .unwrap();

    sweeprun_cmd(&tmp)
        .args(["report", "splitcount"])
        .assert()
        .success()
        .stdout(predicate::str::contains("{9, 20, 14},{5, 16, 37},{6, 16, 40},"));
}

#[test]
fn report_json_output() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("results.txt"), "measure_accu_strategy3: 0.875\n").unwrap();

    let output = sweeprun_cmd(&tmp)
        .args(["report", "measure-accu", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: Vec<Vec<String>> =
        serde_json::from_slice(&output.stdout).expect("output should be valid JSON");
    assert_eq!(parsed, vec![vec!["3".to_string(), "0.875".to_string()]]);
}

#[test]
fn report_on_missing_results_file_fails() {
    let tmp = TempDir::new().unwrap();

    sweeprun_cmd(&tmp)
        .args(["report", "splitcount"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read results file"));
}

#[test]
fn report_respects_results_flag() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("elsewhere.txt"), "disk_hsl_200_dim21: 88\n").unwrap();

    sweeprun_cmd(&tmp)
        .args(["report", "disk-hsl", "--results", "elsewhere.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("{200, 21, 88},"));
}
