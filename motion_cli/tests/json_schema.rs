use assert_cmd::prelude::*;
use rstest::rstest;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::{TempDir, tempdir};

const CONFIG: &str = r#"
[channels]
required = ["x", "y"]
fill_policy = "carry_forward"

[weights]
x = 2.0
"#;

const REFERENCE: &str = r#"[{"x": 0.0, "y": 1.0}, {"x": 1.0, "y": null}, {"x": 2.0}]"#;
const ZERO_SCORE: &str = r#"[{"x": 5.0, "y": 5.0}, {"x": 5.0, "y": 5.0}]"#;

struct Fixture {
    dir: TempDir,
    cfg: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        let cfg = dir.path().join("motion.toml");
        fs::write(&cfg, CONFIG).unwrap();
        fs::write(dir.path().join("ref.json"), REFERENCE).unwrap();
        fs::write(dir.path().join("zero.json"), ZERO_SCORE).unwrap();
        let fx = Self { dir, cfg };
        fx.cmd().args(["add-motion", "--name", "lift"]).assert().success();
        for (category, file) in [("reference", "ref.json"), ("zero_score", "zero.json")] {
            fx.cmd()
                .args(["record", "--motion", "lift", "--category", category, "--data"])
                .arg(fx.dir.path().join(file))
                .assert()
                .success();
        }
        fx
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("motion").unwrap();
        cmd.arg("--json")
            .arg("--log-level")
            .arg("error")
            .arg("--config")
            .arg(&self.cfg)
            .arg("--store")
            .arg(self.dir.path().join("store.json"));
        cmd
    }
}

fn json_line(bytes: &[u8], key: &str) -> serde_json::Value {
    let text = String::from_utf8_lossy(bytes);
    let line = text
        .lines()
        .find(|l| l.contains(&format!("\"{key}\"")))
        .unwrap_or_else(|| panic!("no JSON line with {key}; output was: {text}"));
    serde_json::from_str(line).expect("valid JSON")
}

/// Validate the JSON result line of a successful evaluation.
#[rstest]
fn evaluate_result_schema() {
    let fx = Fixture::new();
    let out = fx
        .cmd()
        .args(["evaluate", "--motion", "lift", "--data"])
        .arg(fx.dir.path().join("ref.json"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v = json_line(&out, "score");

    assert_eq!(v["motion"], "lift");
    assert_eq!(v["score"].as_f64(), Some(100.0));
    assert_eq!(v["reference_id"].as_u64(), Some(1));
    assert_eq!(v["zero_score_id"].as_u64(), Some(2));
    assert_eq!(v["user_frames"].as_u64(), Some(3));
    assert!(v["d_ref"].as_f64().is_some());
    assert!(v["d_zero"].as_f64().unwrap() > 0.0);

    let channels = v["channels"].as_array().expect("channels array");
    let names: Vec<_> = channels.iter().map(|c| c["channel"].as_str().unwrap()).collect();
    assert_eq!(names, ["x", "y"]);
    for c in channels {
        assert!(c["score"].as_f64().is_some());
    }
}

/// Every successful evaluation appends one hand-off line.
#[rstest]
fn handoff_record_schema() {
    let fx = Fixture::new();
    let handoff = fx.dir.path().join("results.jsonl");
    for _ in 0..2 {
        fx.cmd()
            .args(["evaluate", "--motion", "lift", "--user", "u-42", "--data"])
            .arg(fx.dir.path().join("zero.json"))
            .arg("--handoff")
            .arg(&handoff)
            .assert()
            .success();
    }

    let text = fs::read_to_string(&handoff).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    let v: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(v["user_id"], "u-42");
    assert_eq!(v["motion_id"], "lift");
    assert_eq!(v["score"].as_f64(), Some(0.0));
    assert_eq!(v["raw_sensor_data"].as_array().map(Vec::len), Some(2));
    assert!(v["timestamp"].as_str().is_some_and(|t| t.contains('T')));
}

/// Failed evaluations write a structured error to stderr and no hand-off line.
#[rstest]
#[case("jump", "ref.json", "UnknownMotion", true, 3)]
#[case("lift", "empty.json", "Schema", true, 5)]
fn error_schema(
    #[case] motion: &str,
    #[case] data: &str,
    #[case] reason: &str,
    #[case] client_error: bool,
    #[case] code: i32,
) {
    let fx = Fixture::new();
    fs::write(fx.dir.path().join("empty.json"), "[]").unwrap();
    let handoff = fx.dir.path().join("results.jsonl");

    let out = fx
        .cmd()
        .args(["evaluate", "--motion", motion, "--data"])
        .arg(fx.dir.path().join(data))
        .arg("--handoff")
        .arg(&handoff)
        .assert()
        .code(code)
        .get_output()
        .stderr
        .clone();
    let v = json_line(&out, "client_error");

    assert_eq!(v["reason"], reason);
    assert_eq!(v["kind"], "evaluation");
    assert_eq!(v["client_error"], client_error);
    assert!(v["message"].as_str().is_some_and(|m| m.starts_with("What happened")));
    assert!(!handoff.exists());
}

#[rstest]
fn motions_list_schema() {
    let fx = Fixture::new();
    let out = fx
        .cmd()
        .arg("motions")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let list = v.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "lift");
    assert_eq!(list[0]["references"], 1);
    assert_eq!(list[0]["zero_scores"], 1);
    assert_eq!(list[0]["evaluable"], true);
}
