//! End-to-end runs of the `ergo analyze` binary.

use std::path::Path;
use std::process::{Command, Output};

const CHAIN: &str = "5\n\
1 2 0.5\n1 5 0.5\n\
2 3 1.0\n\
3 4 0.5\n3 2 0.5\n\
4 1 1.0\n\
5 5 1.0\n";

fn ergo(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ergo"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn write(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn prints_text_report() {
    let dir = tempfile::tempdir().unwrap();
    let graph = write(dir.path(), "chain.txt", CHAIN);
    let out = ergo(&["analyze", "--graph", &graph]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let text = String::from_utf8(out.stdout).unwrap();
    assert!(text.contains("States: 5 (7 edges)"));
    assert!(text.contains("Irreducible: no"));
    assert!(text.contains("{5} persistent, period 1, absorbing"));
    assert!(text.contains("{1,2,3,4} transient"));
    assert!(text.contains("Absorbing states: 5"));
}

#[test]
fn writes_requested_outputs_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let graph = write(dir.path(), "chain.txt", CHAIN);
    let json = dir.path().join("report.json");
    let hasse = dir.path().join("hasse.mmd");
    let config = write(
        dir.path(),
        "ergo.toml",
        &format!(
            "[convergence]\nepsilon = 1e-6\n\n[output]\njson = {:?}\n",
            json.to_str().unwrap()
        ),
    );
    let out = ergo(&[
        "analyze",
        "--graph",
        &graph,
        "--config",
        &config,
        "--hasse-mermaid",
        hasse.to_str().unwrap(),
        "--steps",
        "2",
        "--start",
        "1",
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(report["absorbing_states"][0], 5);
    assert_eq!(report["distribution"]["start"], 1);
    // 1 -> {2: 0.5, 5: 0.5} -> {3: 0.5, 5: 0.5}
    assert_eq!(report["distribution"]["values"][2], 0.5);
    assert_eq!(report["distribution"]["values"][4], 0.5);

    let flowchart = std::fs::read_to_string(&hasse).unwrap();
    assert!(flowchart.contains("flowchart LR"));
}

#[test]
fn missing_graph_exits_with_error() {
    let out = ergo(&["analyze", "--graph", "/nonexistent/ergo/chain.txt"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.starts_with("Error: failed to read graph"));
}

#[test]
fn rejects_invalid_epsilon() {
    let dir = tempfile::tempdir().unwrap();
    let graph = write(dir.path(), "chain.txt", CHAIN);
    let out = ergo(&["analyze", "--graph", &graph, "--epsilon", "0"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("epsilon must be finite and positive"));
}
