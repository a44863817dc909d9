//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::{Value, json};
use tempfile::TempDir;

/// Generator stand-in: logs the spec name to `gen.log`, fails with code 7 for
/// the spec named in `$FAIL_SPEC`, otherwise writes `docs/api/<spec>/index.md`.
const GENERATOR_SCRIPT: &str = r#"echo "$1" >> gen.log
if [ "$1" = "$FAIL_SPEC" ]; then exit 7; fi
mkdir -p "docs/api/$1" && echo generated > "docs/api/$1/index.md""#;

/// Build stand-in: exits with `$BUILD_EXIT` when set, otherwise writes `build/index.html`.
const BUILD_SCRIPT: &str = r#"if [ -n "$BUILD_EXIT" ]; then exit "$BUILD_EXIT"; fi
mkdir -p build && echo site > build/index.html"#;

fn sh(script: &str) -> Value {
  json!({ "program": "/bin/sh", "args": ["-c", script, "sh"] })
}

/// Isolated docs root.
///
/// Each test gets its own temporary directory holding an `apiref.json` whose
/// commands are small shell scripts that leave marker files behind.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// Create a docs root with one spec file per name.
  pub fn with_specs(names: &[&str]) -> Self {
    let env = Self {
      temp: TempDir::new().unwrap(),
    };
    for name in names {
      env.write_spec(name, &format!("openapi: 3.0.0\ninfo:\n  title: {}\n", name));
    }
    env.write_config(names, json!([]));
    env
  }

  /// Write `apiref.json` for the given specs and sync entries.
  pub fn write_config(&self, names: &[&str], sync: Value) {
    let specs: Vec<Value> = names
      .iter()
      .map(|name| {
        json!({
          "name": name,
          "input": format!("openapi/{}.yaml", name),
          "output": format!("docs/api/{}", name),
        })
      })
      .collect();

    let config = json!({
      "specs": specs,
      "install": sh("mkdir node_modules"),
      "generator": sh(GENERATOR_SCRIPT),
      "build": sh(BUILD_SCRIPT),
      "serve": sh("touch served"),
      "sync": sync,
    });
    self.write_file("apiref.json", &serde_json::to_string_pretty(&config).unwrap());
  }

  pub fn write_spec(&self, name: &str, content: &str) {
    self.write_file(&format!("openapi/{}.yaml", name), content);
  }

  /// Write a file relative to the docs root.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  pub fn exists(&self, relative_path: &str) -> bool {
    self.temp.path().join(relative_path).exists()
  }

  /// Docs root path.
  pub fn root_path(&self) -> PathBuf {
    let p = self.temp.path().to_path_buf();
    dunce::canonicalize(&p).unwrap_or(p)
  }

  /// Spec names the generator was invoked with, in invocation order.
  pub fn generator_runs(&self) -> Vec<String> {
    std::fs::read_to_string(self.temp.path().join("gen.log"))
      .map(|log| log.lines().map(String::from).collect())
      .unwrap_or_default()
  }

  /// Parsed cache file.
  pub fn cache(&self) -> Value {
    let content = std::fs::read_to_string(self.temp.path().join(".openapi-cache.json")).unwrap();
    serde_json::from_str(&content).unwrap()
  }

  /// Get a pre-configured Command for the apiref binary.
  ///
  /// Points `APIREF_DOCS_DIR` at the docs root and clears the generation
  /// flags so the caller's environment cannot leak into the test.
  pub fn apiref_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("apiref");
    cmd.current_dir(self.root_path());
    cmd.env("APIREF_DOCS_DIR", self.root_path());
    cmd.env_remove("FORCE_API_GEN");
    cmd.env_remove("SKIP_API_GEN");
    cmd.env_remove("FAIL_SPEC");
    cmd.env_remove("BUILD_EXIT");
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
