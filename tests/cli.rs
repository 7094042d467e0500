//! CLI integration tests for base64-scan
//!
//! Tests the binary as a user would interact with it.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn base64_scan() -> Command {
    Command::cargo_bin("base64-scan").unwrap()
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("base64-scan-{}-{}", std::process::id(), name))
}

// ============================================================================
// Basic Commands
// ============================================================================

#[test]
fn test_help() {
    base64_scan()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Garbage-tolerant base64"));
}

#[test]
fn test_version() {
    base64_scan()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("base64-scan"));
}

#[test]
fn test_list_alphabets() {
    base64_scan()
        .arg("alphabets")
        .assert()
        .success()
        .stdout(predicate::str::contains("base64"))
        .stdout(predicate::str::contains("base64url"))
        .stdout(predicate::str::contains("crypt"));
}

#[test]
fn test_list_alphabets_json() {
    let output = base64_scan()
        .args(["alphabets", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let base64 = entries
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["name"] == "base64")
        .unwrap();
    assert_eq!(base64["padding"], "=");
    assert_eq!(base64["default"], true);
}

#[test]
fn test_config_show() {
    base64_scan()
        .args(["config", "show", "url"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alphabet: base64url"))
        .stdout(predicate::str::contains("Scan class: [\\-0-9=A-Z_a-z]"));
}

#[test]
fn test_config_show_unknown() {
    base64_scan()
        .args(["config", "show", "bas64"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bas64"))
        .stderr(predicate::str::contains("base64"));
}

// ============================================================================
// Encoding
// ============================================================================

#[test]
fn test_encode_stdin() {
    base64_scan()
        .arg("encode")
        .write_stdin("hello world")
        .assert()
        .success()
        .stdout("aGVsbG8gd29ybGQ=\n");
}

#[test]
fn test_encode_url_safe() {
    base64_scan()
        .args(["encode", "-a", "base64url"])
        .write_stdin(&b"\xfb\xff"[..])
        .assert()
        .success()
        .stdout("-_8=\n");
}

#[test]
fn test_encode_crypt_by_name() {
    base64_scan()
        .args(["encode", "-a", "crypt"])
        .write_stdin(&b"\x00\xff"[..])
        .assert()
        .success()
        .stdout(".Dw\n");
}

#[test]
fn test_encode_without_padding() {
    base64_scan()
        .args(["encode", "-t", ""])
        .write_stdin("a")
        .assert()
        .success()
        .stdout("YQ\n");
}

#[test]
fn test_encode_custom_symbols() {
    base64_scan()
        .args([
            "encode",
            "-a",
            "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz.-",
            "-t",
            "~",
        ])
        .write_stdin(&b"\x00"[..])
        .assert()
        .success()
        .stdout("00~~\n");
}

#[test]
fn test_encode_stream_has_no_newline() {
    base64_scan()
        .args(["encode", "--stream"])
        .write_stdin("This is a string")
        .assert()
        .success()
        .stdout("VGhpcyBpcyBhIHN0cmluZw==");
}

#[test]
fn test_encode_to_file() {
    let path = temp_path("encoded.txt");
    base64_scan()
        .args(["encode", "-o"])
        .arg(&path)
        .write_stdin("foobar")
        .assert()
        .success()
        .stdout("");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "Zm9vYmFy");
    std::fs::remove_file(&path).unwrap();
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn test_decode_stdin() {
    base64_scan()
        .arg("decode")
        .write_stdin("RHVkZSEgV2hlcmUgaXMgbXkgY2FyPz8/Cg==")
        .assert()
        .success()
        .stdout("Dude! Where is my car???\n");
}

#[test]
fn test_decode_noisy_input() {
    base64_scan()
        .arg("decode")
        .write_stdin("V 2 h h d C Bp c y B 0 a G l z P w o =")
        .assert()
        .success()
        .stdout("What is this?\n");
}

#[test]
fn test_decode_stream() {
    base64_scan()
        .args(["decode", "-s"])
        .write_stdin("aGVs\nbG8g\nd29y\nbGQ=\n")
        .assert()
        .success()
        .stdout("hello world");
}

#[test]
fn test_decode_garbage_is_not_an_error() {
    base64_scan()
        .arg("decode")
        .write_stdin("!!! ### $$$")
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("no decodable symbols"));
}

#[test]
fn test_decode_quiet_suppresses_notice() {
    base64_scan()
        .args(["-q", "decode"])
        .write_stdin("!!! ### $$$")
        .assert()
        .success()
        .stderr("");
}

#[test]
fn test_decode_file() {
    let path = temp_path("input.b64");
    std::fs::write(&path, "Zm9v\r\nYmFy\r\n").unwrap();
    base64_scan()
        .arg("decode")
        .arg(&path)
        .assert()
        .success()
        .stdout("foobar");
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_decode_missing_file() {
    base64_scan()
        .args(["decode", "/nonexistent/base64-scan/input"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("error: "));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_invalid_alphabet_fails() {
    base64_scan()
        .args(["encode", "-a", "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+"])
        .write_stdin("data")
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("error: invalid alphabet"))
        .stderr(predicate::str::contains("63"));
}

#[test]
fn test_terminator_collision_fails() {
    base64_scan()
        .args(["encode", "-t", "A"])
        .write_stdin("data")
        .assert()
        .failure();
}

#[test]
fn test_config_file_adds_alphabet() {
    let path = temp_path("alphabets.toml");
    std::fs::write(
        &path,
        r#"
[alphabets.dotted]
chars = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789.:"
padding = "!"
"#,
    )
    .unwrap();

    base64_scan()
        .arg("--config")
        .arg(&path)
        .args(["encode", "-a", "dotted"])
        .write_stdin(&b"\xff"[..])
        .assert()
        .success()
        .stdout(":w!!\n");
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_missing_config_file_fails() {
    base64_scan()
        .args(["--config", "/nonexistent/base64-scan.toml", "alphabets"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("error: Cannot load config"));
}
