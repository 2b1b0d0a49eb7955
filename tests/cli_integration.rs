use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_microgrid-sim"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("microgrid-sim process should run")
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "run failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).expect("stdout should be valid UTF-8")
}

fn parse_purchase_totals(stdout: &str) -> Vec<f64> {
    stdout
        .lines()
        .filter_map(|l| l.strip_prefix("Grid purchase total:"))
        .map(|v| {
            v.trim()
                .trim_end_matches("kWh")
                .trim()
                .parse()
                .expect("purchase total should be numeric")
        })
        .collect()
}

#[test]
fn default_run_reports_both_patterns() {
    let stdout = stdout_of(&run(&[]));

    assert!(stdout.contains("Factory pattern A (steady)"));
    assert!(stdout.contains("Factory pattern B (daytime shifted)"));
    assert!(stdout.contains("Pattern A vs pattern B"));
    assert_eq!(stdout.matches("Self-consumption:").count(), 2);
    assert_eq!(stdout.lines().filter(|l| l.starts_with("h=")).count(), 48);
}

#[test]
fn quiet_omits_hourly_rows() {
    let stdout = stdout_of(&run(&["--preset", "small_community", "--quiet"]));

    assert!(stdout.lines().all(|l| !l.starts_with("h=")));
    assert_eq!(parse_purchase_totals(&stdout).len(), 2);
}

#[test]
fn scenario_file_matches_preset() {
    let from_file = stdout_of(&run(&["--scenario", "scenarios/baseline.toml", "--quiet"]));
    let from_preset = stdout_of(&run(&["--preset", "baseline", "--quiet"]));
    assert_eq!(
        parse_purchase_totals(&from_file),
        parse_purchase_totals(&from_preset)
    );
}

#[test]
fn days_override_extends_horizon() {
    let stdout = stdout_of(&run(&["--preset", "small_community", "--days", "2"]));
    assert_eq!(stdout.lines().filter(|l| l.starts_with("h=")).count(), 96);
}

#[test]
fn csv_dir_writes_one_file_per_pattern() {
    let dir = std::env::temp_dir().join(format!("microgrid-cli-{}", std::process::id()));
    let dir_arg = dir.to_string_lossy().into_owned();
    stdout_of(&run(&["--quiet", "--csv-dir", &dir_arg]));

    for name in ["pattern_a.csv", "pattern_b.csv"] {
        let content = std::fs::read_to_string(dir.join(name)).expect("csv should exist");
        assert!(content.starts_with("hour,pv_kwh,"));
        assert_eq!(content.lines().count(), 25);
    }
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn unknown_preset_fails() {
    let output = run(&["--preset", "nonexistent"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown preset"));
}

#[test]
fn invalid_override_fails_validation() {
    let output = run(&["--days", "0"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("simulation.days"));
}

#[test]
fn scenario_and_preset_conflict() {
    let output = run(&["--scenario", "scenarios/baseline.toml", "--preset", "baseline"]);
    assert!(!output.status.success());
}
