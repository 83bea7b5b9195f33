// End-to-end tests against the built `policylens` binary.
//
// Logs, progress output and notices go to stderr; stdout carries only the
// report, so `trends --json` can be piped straight into a JSON parser.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// Writes a small corpus into its own temp directory and removes it on drop.
struct CorpusDir(PathBuf);

impl CorpusDir {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir()
            .join(format!("policylens_cli_{name}_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let docs = [
            ("2015-16_solar.txt", "Solar tariffs fall as renewable auctions scale."),
            ("2016-17_grid.txt", "Grid storage pilots support renewable integration."),
            ("2016-17_metro.txt", "Metro railway corridors open to commuters."),
        ];
        for (name, text) in docs {
            fs::write(dir.join(name), text).unwrap();
        }
        Self(dir)
    }
}

impl Drop for CorpusDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

fn policylens(corpus: &CorpusDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_policylens"));
    cmd.env("POLICYLENS_CORPUS_DIR", &corpus.0)
        .env("POLICYLENS_PASSES", "5")
        .env("RUST_LOG", "policylens=debug");
    cmd
}

#[test]
fn trends_json_stdout_is_a_single_json_document() {
    let corpus = CorpusDir::new("json");
    let output = policylens(&corpus)
        .args(["trends", "--sector", "energy", "--json"])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!("stdout is not JSON ({e}): {}", String::from_utf8_lossy(&output.stdout))
    });
    assert_eq!(json["sector"], "energy");
    assert_eq!(json["years"][0], "2015-16");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Reading corpus from"));
}

#[test]
fn unknown_sector_fails_before_training() {
    let corpus = CorpusDir::new("bad_sector");
    let output = policylens(&corpus)
        .args(["trends", "--sector", "agriculture", "--json"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("agriculture"));
}
