use std::fs;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("gprs"))
}

fn repo_root() -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn golden_input(case: &str) -> std::path::PathBuf {
    repo_root()
        .join("tests")
        .join("golden")
        .join(case)
        .join("input.hex")
}

fn golden_hex(case: &str) -> String {
    fs::read_to_string(golden_input(case))
        .expect("read golden input")
        .trim()
        .to_string()
}

fn stdout_json(assert: &assert_cmd::assert::Assert) -> Value {
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    serde_json::from_str(&stdout).expect("valid json")
}

#[test]
fn help_lists_decode() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("decode"));
    cmd().arg("decode").arg("--help").assert().success();
}

#[test]
fn stdout_outputs_json_array() {
    let assert = cmd()
        .arg("decode")
        .arg(golden_hex("report_full"))
        .arg("--stdout")
        .assert()
        .success();
    let value = stdout_json(&assert);
    let entries = value.as_array().expect("array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["source"], "arg:1");
    assert_eq!(entries[0]["decoded"]["packet_type"], "report");
    assert_eq!(entries[0]["decoded"]["records"][0]["report"]["reference"], 7);
}

#[test]
fn accepts_prefixed_hex_tokens() {
    // diagnostic packet with an unknown command code 0x51
    let prefixed = "0x2 0x0 0x3 0x2 0x5 0x51 0xdb 0x41 0x3";
    let assert = cmd()
        .arg("decode")
        .arg(prefixed)
        .arg("--stdout")
        .assert()
        .success();
    let value = stdout_json(&assert);
    let command = &value[0]["decoded"]["records"][0]["command"];
    assert_eq!(command["reference"], 5);
    assert_eq!(command["body"]["unknown"], 0x51);
}

#[test]
fn failed_packet_is_reported_in_place() {
    let corrupted = "0x2 0x0 0x3 0x2 0x5 0x51 0xdb 0x42 0x3";
    let assert = cmd()
        .arg("decode")
        .arg(corrupted)
        .arg("--stdout")
        .assert()
        .success();
    let value = stdout_json(&assert);
    assert!(value[0].get("decoded").is_none());
    assert!(value[0]["error"].as_str().expect("error").contains("checksum"));

    cmd()
        .arg("decode")
        .arg(corrupted)
        .arg("--stdout")
        .arg("--strict")
        .assert()
        .failure();
}

#[test]
fn invalid_hex_shows_error_and_hint() {
    cmd()
        .arg("decode")
        .arg("0xZZ")
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn missing_packets_is_an_error() {
    cmd()
        .arg("decode")
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("no packets to decode"));
}

#[test]
fn stdout_and_output_conflict() {
    let temp = TempDir::new().expect("tempdir");
    cmd()
        .arg("decode")
        .arg(golden_hex("diagnostic_v1"))
        .arg("--stdout")
        .arg("-o")
        .arg(temp.path().join("out.json"))
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn pretty_and_compact_conflict() {
    cmd()
        .arg("decode")
        .arg(golden_hex("diagnostic_v1"))
        .arg("--stdout")
        .arg("--pretty")
        .arg("--compact")
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn output_file_is_written() {
    let temp = TempDir::new().expect("tempdir");
    let output = temp.path().join("nested").join("out.json");

    cmd()
        .arg("decode")
        .arg(golden_hex("diagnostic_v2"))
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stderr(contains("OK:"));

    let written = fs::read_to_string(&output).expect("read output");
    let value: Value = serde_json::from_str(&written).expect("valid json");
    assert_eq!(
        value[0]["decoded"]["records"][0]["command"]["body"]["diagnostic"]["v2"]["satellites"],
        9
    );
}

#[test]
fn quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    cmd()
        .arg("decode")
        .arg(golden_hex("diagnostic_v1"))
        .arg("-o")
        .arg(temp.path().join("out.json"))
        .arg("--quiet")
        .assert()
        .success()
        .stderr(contains("OK:").not());
}

#[test]
fn file_glob_reads_every_match_in_order() {
    let pattern = repo_root()
        .join("tests")
        .join("golden")
        .join("diagnostic_*")
        .join("input.hex");
    let assert = cmd()
        .arg("decode")
        .arg("--file")
        .arg(pattern)
        .arg("--stdout")
        .assert()
        .success();
    let value = stdout_json(&assert);
    let entries = value.as_array().expect("array");
    assert_eq!(entries.len(), 2);
    let first = entries[0]["source"].as_str().expect("source");
    assert!(first.contains("diagnostic_v1"), "{first}");
    assert!(first.ends_with(":1"), "{first}");
}

#[test]
fn unmatched_glob_shows_hint() {
    let temp = TempDir::new().expect("tempdir");
    cmd()
        .arg("decode")
        .arg("--file")
        .arg(temp.path().join("*.hex"))
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("no files match").and(contains("hint:")));
}

#[test]
fn text_file_skips_blank_and_comment_lines() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("capture.hex");
    let body = format!(
        "# two packets\n{}\n\n{}\n",
        golden_hex("diagnostic_v1"),
        golden_hex("report_full")
    );
    fs::write(&path, body).expect("write capture");

    let assert = cmd()
        .arg("decode")
        .arg("-f")
        .arg(&path)
        .arg("--stdout")
        .assert()
        .success();
    let value = stdout_json(&assert);
    assert_eq!(value.as_array().map(Vec::len), Some(2));
    assert!(
        value[1]["source"]
            .as_str()
            .expect("source")
            .ends_with(":4")
    );
}

#[test]
fn raw_file_is_one_binary_frame() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("frame.bin");
    let bytes = hex_bytes(&golden_hex("report_additional_io"));
    fs::write(&path, bytes).expect("write frame");

    let assert = cmd()
        .arg("decode")
        .arg("--file")
        .arg(&path)
        .arg("--raw")
        .arg("--stdout")
        .assert()
        .success();
    let value = stdout_json(&assert);
    assert_eq!(
        value[0]["decoded"]["records"][0]["report"]["report_type"],
        "extended_data"
    );
}

#[test]
fn verbose_dumps_records_to_stderr() {
    cmd()
        .arg("decode")
        .arg(golden_hex("report_full"))
        .arg("--stdout")
        .arg("--verbose")
        .assert()
        .success()
        .stderr(contains("report ref=7").and(contains("gps: lat=")));
}

#[test]
fn strict_fails_on_partial_decode() {
    cmd()
        .arg("decode")
        .arg(golden_hex("report_partial"))
        .arg("--stdout")
        .assert()
        .success();

    cmd()
        .arg("decode")
        .arg(golden_hex("report_partial"))
        .arg("--stdout")
        .arg("--strict")
        .assert()
        .failure()
        .stderr(contains("stopped early").and(contains("hint:")));
}

#[test]
fn strict_fails_on_unknown_extension() {
    // one extended record with data type 0x7f and ten bytes of its payload
    let packet = "020016010108010000000e1010017f00000100000000000599638703";
    let assert = cmd()
        .arg("decode")
        .arg(packet)
        .arg("--stdout")
        .assert()
        .success();
    let value = stdout_json(&assert);
    let decoded = &value[0]["decoded"];
    assert_eq!(decoded["records"].as_array().map(Vec::len), Some(1));
    assert_eq!(decoded["stop"]["unknown_extension"], 0x7f);

    cmd()
        .arg("decode")
        .arg(packet)
        .arg("--stdout")
        .arg("--strict")
        .assert()
        .failure()
        .stderr(contains("stopped early"));
}

fn hex_bytes(text: &str) -> Vec<u8> {
    (0..text.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&text[i..i + 2], 16).expect("hex byte"))
        .collect()
}
