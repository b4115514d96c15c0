use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_path(label: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    std::env::temp_dir().join(format!("chemassist-test-{label}-{nanos}"))
}

fn chemassist_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("chemassist"));
    cmd.env_remove("CHEMASSIST_DEFAULT_MODEL")
        .env_remove("CHEMASSIST_USE_MOCK")
        .env_remove("CHEMASSIST_MOCK_DELAY_MS")
        .env_remove("CHEMASSIST_OPENAI_BASE_URL")
        .env_remove("CHEMASSIST_ANTHROPIC_BASE_URL")
        .env_remove("CHEMASSIST_GOOGLE_BASE_URL")
        .env_remove("OPENAI_API_KEY")
        .env_remove("ANTHROPIC_API_KEY")
        .env_remove("GOOGLE_API_KEY")
        .env("CHEMASSIST_CONFIG", unique_temp_path("absent.toml"))
        .env("RUST_LOG", "off");
    cmd
}

fn mock_cmd() -> Command {
    let mut cmd = chemassist_cmd();
    cmd.env("CHEMASSIST_USE_MOCK", "true")
        .env("CHEMASSIST_MOCK_DELAY_MS", "0");
    cmd
}

fn parse_stdout_json(output: &[u8]) -> Value {
    let text = String::from_utf8(output.to_vec()).expect("stdout should be utf-8");
    serde_json::from_str(text.trim()).expect("stdout should contain valid JSON")
}

#[test]
fn generate_in_mock_mode_returns_aspirin() {
    let assert = mock_cmd()
        .args(["--json", "generate", "アスピリン"])
        .assert()
        .success();

    let body = parse_stdout_json(&assert.get_output().stdout);
    assert_eq!(body["success"], Value::Bool(true));
    assert_eq!(body["structures"][0]["data"], "CC(=O)OC1=CC=CC=C1C(=O)O");
    assert_eq!(body["structures"][0]["format"], "smiles");
    assert_eq!(body["suggestions"][0], "アスピリンの反応性について教えて");
    assert!(!body["message"].as_str().unwrap().contains("```"));
    assert!(body.get("canvas").is_none());
}

#[test]
fn generate_to_canvas_emits_editor_commands() {
    mock_cmd()
        .args(["generate", "カフェイン", "--to-canvas"])
        .assert()
        .success()
        .stdout(contains(r#"{"command":"copy_prime"}"#))
        .stdout(contains(r#""input_format":"chemical/x-daylight-smiles""#))
        .stdout(contains("CN1C=NC2=C1C(=O)N(C(=O)N2C)C"))
        .stdout(contains("canvas: 1 structure(s) added"));
}

#[test]
fn json_to_canvas_stays_a_single_document() {
    let assert = mock_cmd()
        .args(["--json", "generate", "カフェイン", "--to-canvas"])
        .assert()
        .success();

    let body = parse_stdout_json(&assert.get_output().stdout);
    assert_eq!(body["canvas"]["success"], true);
    assert_eq!(body["canvas"]["added_structures"], 1);
    let commands = body["editor_commands"].as_array().expect("editor commands");
    assert_eq!(commands.len(), 2);
    assert_eq!(commands[0]["command"], "copy_prime");
    assert_eq!(commands[1]["command"], "load");
    assert_eq!(commands[1]["data"], "CN1C=NC2=C1C(=O)N(C(=O)N2C)C");
    assert_eq!(commands[1]["fragment"], true);
}

#[test]
fn analyze_prints_keyword_suggestion() {
    mock_cmd()
        .args(["analyze", "c1ccccc1", "--question", "性質は？"])
        .assert()
        .success()
        .stdout(contains("ベンゼン環について詳しく"));
}

#[test]
fn react_requires_reactants() {
    mock_cmd().arg("react").assert().failure();
}

#[test]
fn models_lists_the_catalogue() {
    let assert = chemassist_cmd().args(["--json", "models"]).assert().success();
    let body = parse_stdout_json(&assert.get_output().stdout);
    let rows = body.as_array().expect("model list");
    assert_eq!(rows.len(), 11);
    let default: Vec<&Value> = rows.iter().filter(|r| r["default"] == true).collect();
    assert_eq!(default.len(), 1);
    assert_eq!(default[0]["id"], "gpt-3.5-turbo");
    assert!(rows.iter().all(|r| r["credentials"] == false));
}

#[test]
fn live_mode_without_key_exits_with_failure() {
    chemassist_cmd()
        .args(["generate", "アスピリン"])
        .assert()
        .code(1)
        .stdout(contains("AI サービスでエラーが発生しました"))
        .stderr(contains("API key not found for openai"));
}

#[test]
fn unknown_model_is_rejected() {
    mock_cmd()
        .args(["--model", "gpt-7", "ask", "水とは？"])
        .assert()
        .failure()
        .stderr(contains("Unknown AI model: gpt-7"));
}

#[test]
fn config_check_reads_file_and_env() {
    let path = unique_temp_path("config.toml");
    fs::write(
        &path,
        "default_model = \"claude-3-haiku-20240307\"\n\n[credentials]\nanthropic = \"ak-file\"\n",
    )
    .expect("write config");

    chemassist_cmd()
        .env("CHEMASSIST_CONFIG", &path)
        .env("GOOGLE_API_KEY", "g-env")
        .args(["config", "check"])
        .assert()
        .success()
        .stdout(contains("default model: claude-3-haiku-20240307"))
        .stdout(contains("anthropic: API key set"))
        .stdout(contains("google: API key set"))
        .stdout(contains("openai: API key missing"))
        .stdout(contains("ak-file").not());

    let _ = fs::remove_file(path);
}

#[test]
fn config_check_rejects_unknown_default_model() {
    chemassist_cmd()
        .env("CHEMASSIST_DEFAULT_MODEL", "gpt-7")
        .args(["config", "check"])
        .assert()
        .failure()
        .stderr(contains("not in the catalogue"));
}
