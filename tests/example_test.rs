use std::path::Path;
use std::process::Command;
use std::time::Duration;

use present_packer::parse;
use present_packer::solver::Solver;
use present_packer::types::Outcome;

const EXAMPLE: &str = include_str!("data/example.txt");

fn example_path() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/example.txt"))
}

#[test]
fn test_example_regions() {
    let puzzle = parse::parse_input(EXAMPLE);
    assert_eq!(puzzle.shapes.len(), 6);
    assert_eq!(puzzle.regions.len(), 3);

    let solver = Solver::with_shapes(&puzzle.shapes, Some(Duration::from_millis(200)));
    let summary = solver.solve_all(&puzzle.regions);

    assert_eq!(summary.regions[0].outcome, Outcome::Feasible);
    assert_eq!(summary.regions[1].outcome, Outcome::Feasible);
    // The third region leaves room by area alone, so only the search can reject it.
    assert!(matches!(
        summary.regions[2].outcome,
        Outcome::Exhausted | Outcome::TimedOut
    ));
    assert_eq!(summary.feasible, 2);
}

#[test]
fn test_example_orientation_counts() {
    let puzzle = parse::parse_input(EXAMPLE);
    let solver = Solver::with_shapes(&puzzle.shapes, None);
    let counts: Vec<usize> = (0..6).map(|i| solver.orientations(i).len()).collect();
    assert_eq!(counts, vec![8, 8, 2, 4, 4, 2]);
}

#[test]
fn test_separate_solvers_agree() {
    let first = parse::read_input(example_path()).unwrap();
    let second = parse::read_input(example_path()).unwrap();
    let a = Solver::with_shapes(&first.shapes, None);
    let b = Solver::with_shapes(&second.shapes, None);
    for (ra, rb) in first.regions.iter().zip(&second.regions).take(2) {
        assert_eq!(a.can_fit(ra), b.can_fit(rb));
    }
}

#[test]
fn test_cli_prints_part_one() {
    let output = Command::new(env!("CARGO_BIN_EXE_present_packer"))
        .arg(example_path())
        .args(["--timeout-ms", "200", "--log-level", "error"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim(), "Part 1: 2");
}

#[test]
fn test_cli_json_report() {
    let output = Command::new(env!("CARGO_BIN_EXE_present_packer"))
        .arg(example_path())
        .args(["--timeout-ms", "200", "--json", "--log-level", "error"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["feasible"], 2);
    assert_eq!(report["regions"][0]["outcome"], "feasible");
    assert_eq!(report["regions"][1]["placements"].as_array().unwrap().len(), 6);
}

#[test]
fn test_cli_without_input_is_usage_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_present_packer"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Usage"), "{stderr}");
}

#[test]
fn test_cli_missing_file_is_io_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_present_packer"))
        .arg("/nonexistent/present_packer/input.txt")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("/nonexistent/present_packer/input.txt"), "{stderr}");
}

#[test]
fn test_cli_log_level_uses_tracing_names() {
    let ok = Command::new(env!("CARGO_BIN_EXE_present_packer"))
        .arg(example_path())
        .args(["--timeout-ms", "200", "--log-level", "WARN"])
        .output()
        .unwrap();
    assert!(ok.status.success());
    assert_eq!(String::from_utf8(ok.stdout).unwrap().trim(), "Part 1: 2");

    let bad = Command::new(env!("CARGO_BIN_EXE_present_packer"))
        .arg(example_path())
        .args(["--log-level", "loud"])
        .output()
        .unwrap();
    assert!(!bad.status.success());
    assert!(bad.stdout.is_empty());
}
