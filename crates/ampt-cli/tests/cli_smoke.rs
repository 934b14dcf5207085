use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

const GOOD_EVENT: &str = "\
1 1 3 2.5 10 12 0 10 1 11 0.0
211 0.25 -0.5 1.0 0.13957 0 0 0 0
2212 0 0 140 0.938 0 0 0 0
-211 -0.1 0.3 -2.0 0.13957 0 0 0 0
";

const SHORT_EVENT: &str = "\
2 1 4 7.5 8 8 0 8 0 8 0.0
211 0.25 -0.5 1.0 0.13957 0 0 0 0
";

fn ampt2hepmc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ampt2hepmc"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch ampt2hepmc")
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn help_prints_usage_and_succeeds() {
    for args in [&["--help"][..], &["-h"][..], &[][..], &["only-one"][..], &["a", "b", "c"][..]] {
        let output = ampt2hepmc(args);
        assert!(output.status.success(), "{args:?}");
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Usage"), "{args:?}: {stdout}");
    }
}

#[test]
fn converts_a_well_formed_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("ampt.dat");
    let output = dir.path().join("out.hepmc");
    let summary = dir.path().join("summary.json");
    fs::write(&input, GOOD_EVENT).unwrap();

    let run = ampt2hepmc(&[
        path_str(&input),
        path_str(&output),
        "--summary",
        path_str(&summary),
    ]);
    assert!(run.status.success());
    assert!(String::from_utf8_lossy(&run.stdout).contains("converted 1 of 1 events"));

    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(text.lines().filter(|line| line.starts_with("P ")).count(), 4);
    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&summary).unwrap()).unwrap();
    assert_eq!(report["events_written"], 1);
    assert_eq!(report["beam_lines_filtered"], 1);
}

#[test]
fn partial_run_fails_with_summary() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("ampt.dat");
    let output = dir.path().join("out.jsonl");
    fs::write(&input, format!("{GOOD_EVENT}{SHORT_EVENT}")).unwrap();

    let run = ampt2hepmc(&[path_str(&input), path_str(&output), "--format", "jsonl"]);
    assert!(!run.status.success());
    assert!(String::from_utf8_lossy(&run.stdout).contains("converted 1 of 2 events"));
    assert_eq!(fs::read_to_string(&output).unwrap().lines().count(), 1);
}

#[test]
fn missing_input_fails() {
    let dir = tempdir().unwrap();
    let run = ampt2hepmc(&[
        path_str(&dir.path().join("absent.dat")),
        path_str(&dir.path().join("out.hepmc")),
    ]);
    assert!(!run.status.success());
    assert!(String::from_utf8_lossy(&run.stderr).contains("input-open"));
}

#[test]
fn config_file_overrides_beam() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("ampt.dat");
    let output = dir.path().join("out.hepmc");
    let config = dir.path().join("convert.yaml");
    fs::write(&input, GOOD_EVENT).unwrap();
    fs::write(&config, "beam:\n  pdg_id: 2112\n").unwrap();

    let run = ampt2hepmc(&[
        path_str(&input),
        path_str(&output),
        "--config",
        path_str(&config),
    ]);
    assert!(run.status.success());
    let text = fs::read_to_string(&output).unwrap();
    assert!(text.lines().any(|line| line.starts_with("P 10001 2112 ")));
    assert!(text.lines().any(|line| line.starts_with("P 10002 2112 ")));
}
