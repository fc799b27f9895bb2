use std::fs;
use std::path::{Path, PathBuf};

use handscope_cli::run;
use serial_test::serial;

const WINAMAX_FILE: &str = "20141116_Double or Nothing(100679030)_real_holdem_no-limit.txt";
const POKERSTARS_FILE: &str = "HH20141031 Aase II - $0.01-$0.02 - USD No Limit Hold'em.txt";

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../engine/tests/fixtures")
        .join(name)
}

fn clear_env() {
    for key in [
        "HANDSCOPE_CONFIG",
        "HANDSCOPE_SITE",
        "HANDSCOPE_HISTORY_DIR",
        "HANDSCOPE_WORKERS",
    ] {
        unsafe {
            std::env::remove_var(key);
        }
    }
}

fn run_cli(args: &[&str]) -> (i32, String, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let mut argv = vec!["handscope"];
    argv.extend_from_slice(args);
    let code = run(argv, &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

fn winamax_account() -> tempfile::TempDir {
    let root = tempfile::tempdir().unwrap();
    let history = root.path().join("history");
    fs::create_dir(&history).unwrap();
    fs::copy(fixture(WINAMAX_FILE), history.join(WINAMAX_FILE)).unwrap();
    root
}

#[test]
#[serial]
fn load_prints_json_summary() {
    clear_env();
    let root = winamax_account();
    let dir = root.path().to_str().unwrap();
    let (code, out, err) = run_cli(&["load", "--dir", dir, "--json"]);

    assert_eq!(code, 0, "stderr: {err}");
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["site"], "Winamax");
    assert_eq!(json["tournaments"], 1);
    assert_eq!(json["hands"], 2);
    assert_eq!(json["players"], 3);
    assert_eq!(json["hero"], "Hero");
    assert!(err.contains("Processed 1/1 files"));
}

#[test]
#[serial]
fn load_reads_directory_from_env() {
    clear_env();
    let root = tempfile::tempdir().unwrap();
    fs::copy(fixture(POKERSTARS_FILE), root.path().join(POKERSTARS_FILE)).unwrap();
    unsafe {
        std::env::set_var("HANDSCOPE_HISTORY_DIR", root.path());
        std::env::set_var("HANDSCOPE_SITE", "pokerstars");
    }
    let (code, out, _err) = run_cli(&["load"]);
    clear_env();

    assert_eq!(code, 0);
    assert!(out.contains("Site: PokerStars"));
    assert!(out.contains("Hands: 2"));
}

#[test]
#[serial]
fn load_of_rejected_directory_warns_and_succeeds() {
    clear_env();
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().to_str().unwrap();
    let (code, out, err) = run_cli(&["load", "--dir", dir]);

    assert_eq!(code, 0);
    assert!(out.contains("Hands: 0"));
    assert!(err.contains("WARNING: no hand histories loaded"));
}

#[test]
#[serial]
fn load_without_directory_fails() {
    clear_env();
    let (code, _out, err) = run_cli(&["load"]);
    assert_eq!(code, 2);
    assert!(err.contains("history directory required"));
}

#[test]
#[serial]
fn parse_prints_full_site_json() {
    clear_env();
    let path = fixture(POKERSTARS_FILE);
    let (code, out, err) = run_cli(&[
        "parse",
        "--file",
        path.to_str().unwrap(),
        "--site",
        "pokerstars",
        "--json",
    ]);

    assert_eq!(code, 0, "stderr: {err}");
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    let hands = json["cash_games"][0]["hands"].as_array().unwrap();
    assert_eq!(hands.len(), 2);
    assert_eq!(hands[0]["actions"][0]["action_type"], "raise");
    assert_eq!(hands[0]["hero_cards"][0], "Td");
    assert_eq!(hands[0]["board_cards"][4], "none");
}

#[test]
#[serial]
fn parse_missing_file_fails() {
    clear_env();
    let (code, _out, err) = run_cli(&["parse", "--file", "/nonexistent/history.txt"]);
    assert_eq!(code, 2);
    assert!(err.contains("file not found"));
}

#[test]
#[serial]
fn cfg_reports_sources() {
    clear_env();
    unsafe {
        std::env::set_var("HANDSCOPE_WORKERS", "3");
    }
    let (code, out, _err) = run_cli(&["cfg"]);
    clear_env();

    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["workers"]["value"], 3);
    assert_eq!(json["workers"]["source"], "env");
    assert_eq!(json["site"]["source"], "default");
}

#[test]
fn unknown_command_prints_usage() {
    let (code, _out, err) = run_cli(&["replay"]);
    assert_eq!(code, 2);
    assert!(err.contains("Usage: handscope <command> [options]"));
    assert!(err.contains("  load"));
}

#[test]
fn help_goes_to_stdout() {
    let (code, out, _err) = run_cli(&["--help"]);
    assert_eq!(code, 0);
    assert!(out.contains("load"));
}
