//! CLI integration tests for every subcommand.
//!
//! Uses `assert_cmd` to spawn the `hmsim` binary and verify exit codes,
//! stdout content, and stderr content.
//!
//! All tests set `current_dir` to the workspace root so relative paths
//! to `fixtures/` resolve.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Locate the workspace root by walking up from CARGO_MANIFEST_DIR.
fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    // crates/cli -> workspace root is two levels up
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

/// Helper: create a Command for the `hmsim` binary, rooted at workspace.
fn hmsim() -> Command {
    let mut cmd = cargo_bin_cmd!("hmsim");
    cmd.current_dir(workspace_root());
    cmd.env_remove("RUST_LOG");
    cmd
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("failed to run hmsim");
    assert!(output.status.success(), "hmsim failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    hmsim()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Heavy-metal reaction simulator"));
}

#[test]
fn version_exits_0() {
    hmsim()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hmsim"));
}

#[test]
fn no_subcommand_is_usage_error() {
    hmsim().assert().failure().code(2);
}

// ──────────────────────────────────────────────
// 2. Validate subcommand
// ──────────────────────────────────────────────

#[test]
fn validate_good_registry_exits_0() {
    hmsim()
        .args(["validate", "fixtures/registry.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "valid registry: 2 element blocks, 6 rules",
        ));
}

#[test]
fn validate_json_output_is_summary() {
    let summary = stdout_json(hmsim().args(["--output", "json", "validate", "fixtures/registry.json"]));
    assert_eq!(summary["block_count"], 2);
    assert_eq!(summary["rule_count"], 6);
    assert_eq!(summary["blocks"][0]["element"], "Arsenic");
}

#[test]
fn validate_top_level_object_exits_1() {
    hmsim()
        .args(["validate", "fixtures/bad_registry.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("registry failed to load"));
}

#[test]
fn validate_missing_file_exits_1() {
    hmsim()
        .args(["validate", "fixtures/does_not_exist.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("does_not_exist.json"));
}

#[test]
fn validate_invalid_json_exits_1_with_json_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "[{\"metal\": ").unwrap();

    let output = hmsim()
        .args(["--output", "json", "validate"])
        .arg(&path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let err: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert!(err["error"].as_str().unwrap().contains("registry failed to load"));
}

// ──────────────────────────────────────────────
// 3. Simulate subcommand
// ──────────────────────────────────────────────

#[test]
fn simulate_text_lists_fired_reactions() {
    hmsim()
        .args(["simulate", "fixtures/registry.json", "-c", "As,O2,Pb"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "1. [heavy_metal] As + O2 -> AsO2  =>  AsO2",
        ))
        .stdout(predicate::str::contains(
            "2. [heavy_metal] AsO2 + Pb -> AsO2Pb  =>  AsO2Pb",
        ))
        .stdout(predicate::str::contains("3. [environment] Pb + O2 => PbO2  =>  PbO2"))
        .stderr(predicate::str::contains("skipping malformed equation"));
}

#[test]
fn simulate_json_chain_follows_priority_order() {
    let chain = stdout_json(hmsim().args([
        "--output",
        "json",
        "simulate",
        "fixtures/registry.json",
        "-c",
        "As",
        "-c",
        "O2",
        "-c",
        "Pb",
        "-c",
        "S",
        "-c",
        "H2O",
        "-e",
        "temperature=25",
    ]));
    let products: Vec<&str> = chain
        .as_array()
        .unwrap()
        .iter()
        .map(|step| step["product"].as_str().unwrap())
        .collect();
    assert_eq!(products, ["AsO2", "AsO2Pb", "H3AsO3", "PbO2", "PbS"]);
    assert_eq!(chain[2]["type"], "environment");
    assert_eq!(chain[2]["equation"], "AsO2 + H2O → H3AsO3");
}

#[test]
fn simulate_max_depth_limits_chain() {
    let chain = stdout_json(hmsim().args([
        "--output",
        "json",
        "simulate",
        "fixtures/registry.json",
        "-c",
        "As,O2,Pb,S,H2O",
        "--max-depth",
        "2",
    ]));
    assert_eq!(chain.as_array().unwrap().len(), 2);
}

#[test]
fn simulate_with_nothing_to_fire_exits_0() {
    hmsim()
        .args(["simulate", "fixtures/registry.json", "-c", "Hg"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no reactions fired"));

    let chain = stdout_json(hmsim().args(["--output", "json", "simulate", "fixtures/registry.json"]));
    assert_eq!(chain, serde_json::json!([]));
}

#[test]
fn simulate_quiet_hides_warnings() {
    hmsim()
        .args(["--quiet", "simulate", "fixtures/registry.json", "-c", "As,O2"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn simulate_bad_env_pair_is_usage_error() {
    hmsim()
        .args(["simulate", "fixtures/registry.json", "-e", "temperature"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("NAME=VALUE"));
}

#[test]
fn simulate_bad_registry_exits_1() {
    hmsim()
        .args(["simulate", "fixtures/bad_registry.json", "-c", "As,O2"])
        .assert()
        .failure()
        .code(1);
}

// ──────────────────────────────────────────────
// 4. Indices subcommand
// ──────────────────────────────────────────────

#[test]
fn indices_text_output() {
    hmsim()
        .args(["indices", "fixtures/sample.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SampleID: 7"))
        .stdout(predicate::str::contains("HPI: 50.00 -> safe"))
        .stdout(predicate::str::contains("Overall Conclusion: Safe"));
}

#[test]
fn indices_json_output() {
    let result = stdout_json(hmsim().args(["--output", "json", "indices", "fixtures/sample.json"]));
    assert_eq!(result["SampleID"], 7);
    assert_eq!(result["HPI"], 50.0);
    assert_eq!(result["HEI"], 0.5);
    assert_eq!(result["Cd"], 0.5);
    assert_eq!(result["OverallConclusion"], "Safe");
}

#[test]
fn indices_rejects_malformed_sample() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sample.json");
    fs::write(&path, r#"{"parameters": []}"#).unwrap();

    hmsim()
        .arg("indices")
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("SampleID"));
}
