//! CLI integration tests for factcheckctl
//!
//! Only paths that never reach the network are exercised here:
//! - rate, models, interpret (offline)
//! - check with blank input, an unimplemented model, or no token
//! - config --init / config, including a config file that does not parse

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn factcheckctl(config_dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_factcheckctl"));
    cmd.env("FACTCHECK_CONFIG", config_dir.join("config.toml"))
        .env("PERPLEXITY_API_KEY", "pplx-test")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn run(args: &[&str]) -> Output {
    let dir = tempfile::tempdir().unwrap();
    factcheckctl(dir.path()).args(args).output().unwrap()
}

fn run_with_stdin(args: &[&str], input: &str) -> Output {
    let dir = tempfile::tempdir().unwrap();
    let mut child = factcheckctl(dir.path())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_rate_boundary() {
    let output = run(&["rate", "80"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "[Highly Factual] 80/100");

    let output = run(&["rate", "79"]);
    assert_eq!(stdout(&output).trim(), "[Likely Factual] 79/100");
}

#[test]
fn test_rate_without_score() {
    let output = run(&["rate"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "[Not Rated]");
}

#[test]
fn test_rate_json() {
    let output = run(&["rate", "45", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["label"], "Partially Factual");
    assert_eq!(json["color"], "#fd7e14");
    assert_eq!(json["bucket"], "partially-factual");
}

#[test]
fn test_models_listing() {
    let output = run(&["models"]);
    assert!(output.status.success());
    let text = stdout(&output);
    for id in ["sonar-pro", "sonar-free", "gemini", "chatgpt", "claude"] {
        assert!(text.contains(id), "missing {}", id);
    }
}

#[test]
fn test_check_blank_input_is_validation_error() {
    let output = run(&["check", "   "]);
    assert_eq!(output.status.code(), Some(64));
    assert!(stderr(&output).contains("Please enter or select text to fact-check."));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_check_blank_input_easy_wording() {
    let output = run(&["check", "\t ", "--mode", "easy"]);
    assert_eq!(output.status.code(), Some(64));
    assert!(stderr(&output).contains("Please enter or select text to analyze."));
}

#[test]
fn test_check_unimplemented_model() {
    let output = run(&["check", "The sky is green.", "--model", "gemini"]);
    assert_eq!(output.status.code(), Some(69));
    assert_eq!(stdout(&output).trim(), "The gemini model is not yet implemented.");
}

#[test]
fn test_check_unimplemented_model_json() {
    let output = run(&["check", "claim", "--model", "claude", "--json"]);
    assert_eq!(output.status.code(), Some(69));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["status"], "not-implemented");
    assert_eq!(json["model"], "claude");
    assert_eq!(json["analysis"], "The claude model is not yet implemented.");
}

#[test]
fn test_check_selection_of_blank_region() {
    // Characters 5..8 of the input are spaces
    let output = run(&["check", "Paris   is in France", "--select", "5:8"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn test_check_without_token_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = factcheckctl(dir.path())
        .env_remove("PERPLEXITY_API_KEY")
        .args(["check", "claim"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(78));
    assert!(stderr(&output).contains("PERPLEXITY_API_KEY"));
}

#[test]
fn test_interpret_structured_from_stdin() {
    let output = run_with_stdin(
        &["interpret"],
        r#"Sure: {"score": 73, "analysis": "Mostly true **confirmed**"} Thanks!"#,
    );
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "[Likely Factual] 73/100\n\nMostly true **confirmed**\n"
    );
}

#[test]
fn test_interpret_fallback_json() {
    let raw = r#"{"score": "high", "analysis": 42}"#;
    let output = run_with_stdin(&["interpret", "--json"], raw);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["used_fallback"], true);
    assert_eq!(json["score"], serde_json::Value::Null);
    assert_eq!(json["analysis"], raw);
    assert_eq!(json["rating"]["label"], "Not Rated");
}

#[test]
fn test_interpret_score_policy_override() {
    let raw = r#"{"score": 150, "analysis": "x"}"#;
    let output = run_with_stdin(&["interpret", "--json", "--score-policy", "pass-through"], raw);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["score"], 150);

    let output = run_with_stdin(&["interpret", "--json", "--score-policy", "reject"], raw);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["used_fallback"], true);
}

#[test]
fn test_config_init_then_show() {
    let dir = tempfile::tempdir().unwrap();
    let output = factcheckctl(dir.path()).args(["config", "--init"]).output().unwrap();
    assert!(output.status.success());
    assert!(dir.path().join("config.toml").exists());

    let output = factcheckctl(dir.path()).args(["config"]).output().unwrap();
    let text = stdout(&output);
    assert!(text.contains("endpoint = \"https://api.perplexity.ai/chat/completions\""));
    assert!(text.contains("score_policy = \"clamp\""));
    assert!(text.contains("# token ($PERPLEXITY_API_KEY): set"));
    assert!(!text.contains("pplx-test"));
}

#[test]
fn test_config_invalid_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "score_policy = [\n").unwrap();

    let output = factcheckctl(dir.path()).args(["config"]).output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("(invalid, using defaults)"));
    assert!(text.contains("endpoint = \"https://api.perplexity.ai/chat/completions\""));
    assert!(text.contains("score_policy = \"clamp\""));
}

#[test]
fn test_check_with_invalid_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "not toml at all").unwrap();
    let output = factcheckctl(dir.path())
        .args(["check", "claim", "--model", "gemini"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(69));
}
