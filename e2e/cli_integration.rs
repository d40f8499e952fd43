//! E2E: the `crush` binary as a black box.
//!
//! Runs the built binary with `std::process::Command`, covering flag
//! handling, compress/decompress dispatch, and exit codes.

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Locate the `crush` binary produced by Cargo.
fn crush_bin() -> PathBuf {
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_crush") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop();
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("crush");
    p
}

/// Create a TempDir containing a compressible input file.
fn make_temp_input() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.txt");
    fs::write(&input, "Hello, CRUSH container!\n".repeat(400)).unwrap();
    (dir, input)
}

#[test]
fn compress_decompress_round_trip() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    let packed = dir.path().join("out.crush");
    let restored = dir.path().join("restored.txt");

    let status = Command::new(crush_bin())
        .args([input.to_str().unwrap(), packed.to_str().unwrap()])
        .status()
        .expect("failed to run crush");
    assert!(status.success(), "compress should exit 0");
    assert!(packed.exists());

    let status = Command::new(crush_bin())
        .args(["-d", packed.to_str().unwrap(), restored.to_str().unwrap()])
        .status()
        .expect("failed to run crush -d");
    assert!(status.success(), "decompress should exit 0");
    assert_eq!(fs::read(&restored).unwrap(), original);
}

#[test]
fn optimal_level_round_trip_is_no_larger_than_default() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    let fast = dir.path().join("fast.crush");
    let best = dir.path().join("best.crush");
    let restored = dir.path().join("restored.txt");

    assert!(Command::new(crush_bin())
        .args(["-5", input.to_str().unwrap(), fast.to_str().unwrap()])
        .status()
        .unwrap()
        .success());
    assert!(Command::new(crush_bin())
        .args(["--optimal", input.to_str().unwrap(), best.to_str().unwrap()])
        .status()
        .unwrap()
        .success());

    let fast_len = fs::metadata(&fast).unwrap().len();
    let best_len = fs::metadata(&best).unwrap().len();
    assert!(best_len <= fast_len, "optimal {best_len} > fast {fast_len}");

    assert!(Command::new(crush_bin())
        .args(["--decompress", best.to_str().unwrap(), restored.to_str().unwrap()])
        .status()
        .unwrap()
        .success());
    assert_eq!(fs::read(&restored).unwrap(), original);
}

#[test]
fn version_flag_prints_version() {
    let output = Command::new(crush_bin()).arg("--version").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0.2.1"), "stdout: {stdout}");
}

#[test]
fn help_flag_prints_usage() {
    let output = Command::new(crush_bin()).arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"), "stdout: {stdout}");
    assert!(stdout.contains("--optimal"), "stdout: {stdout}");
}

#[test]
fn missing_operands_fail() {
    let (_dir, input) = make_temp_input();
    let output = Command::new(crush_bin())
        .arg(input.to_str().unwrap())
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn unknown_flag_fails_with_bad_usage() {
    let output = Command::new(crush_bin()).arg("--bogus").output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("bad usage"), "stderr: {stderr}");
}

#[test]
fn nonexistent_input_fails() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.crush");
    let output = Command::new(crush_bin())
        .args(["/no/such/input", out.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn corrupt_input_fails_decompression() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("bad.crush");
    let out = dir.path().join("out");
    // Header promises far more than the block size limit allows.
    fs::write(&bad, u32::MAX.to_le_bytes()).unwrap();

    let output = Command::new(crush_bin())
        .args(["-d", bad.to_str().unwrap(), out.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!output.status.success());
}
