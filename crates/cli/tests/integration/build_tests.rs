use predicates::prelude::*;
use serde_json::json;

use super::common::TestEnv;

#[test]
fn build_runs_every_step() {
  let env = TestEnv::with_specs(&["stable"]);
  env.write_file("CHANGELOG.md", "# Changes");
  env.write_config(&["stable"], json!([{ "from": "CHANGELOG.md", "to": "docs/changelog.md" }]));

  env
    .apiref_cmd()
    .arg("build")
    .assert()
    .success()
    .stdout(predicate::str::contains("Install dependencies"))
    .stdout(predicate::str::contains("Generate API docs"))
    .stdout(predicate::str::contains("Sync imported files"))
    .stdout(predicate::str::contains("Build site"))
    .stdout(predicate::str::contains("Build complete!"))
    .stdout(predicate::str::contains("Files synced: 1"));

  assert!(env.exists("node_modules"));
  assert!(env.exists("docs/api/stable/index.md"));
  assert!(env.exists("docs/changelog.md"));
  assert!(env.exists("build/index.html"));
  assert!(!env.exists("served"));
}

#[test]
fn build_skips_install_when_dependencies_present() {
  let env = TestEnv::with_specs(&["stable"]);
  env.write_file("node_modules/.keep", "");

  env
    .apiref_cmd()
    .arg("build")
    .assert()
    .success()
    .stdout(predicate::str::contains("Skipping install dependencies"));
}

#[test]
fn skip_api_flag_skips_generation() {
  let env = TestEnv::with_specs(&["stable"]);

  env
    .apiref_cmd()
    .args(["build", "--skip-api"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Skipping generate API docs"));

  assert!(env.generator_runs().is_empty());
  assert!(env.exists("build/index.html"));
}

#[test]
fn skip_env_skips_generation() {
  let env = TestEnv::with_specs(&["stable"]);

  env
    .apiref_cmd()
    .arg("build")
    .env("SKIP_API_GEN", "1")
    .assert()
    .success();

  assert!(env.generator_runs().is_empty());
}

#[test]
fn build_reuses_generation_cache() {
  let env = TestEnv::with_specs(&["stable"]);
  env.apiref_cmd().arg("generate").assert().success();

  env
    .apiref_cmd()
    .arg("build")
    .assert()
    .success()
    .stdout(predicate::str::contains("No changes detected, skipping"));

  assert_eq!(env.generator_runs(), vec!["stable"]);
}

#[test]
fn generation_failure_stops_build() {
  let env = TestEnv::with_specs(&["stable"]);

  env
    .apiref_cmd()
    .arg("build")
    .env("FAIL_SPEC", "stable")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("Build stopped at step 'generate API docs'"));

  assert!(!env.exists("build"));
}

#[test]
fn site_build_failure_propagates_exit_code() {
  let env = TestEnv::with_specs(&["stable"]);

  env
    .apiref_cmd()
    .args(["build", "--serve"])
    .env("BUILD_EXIT", "4")
    .assert()
    .code(4)
    .stderr(predicate::str::contains("site build failed"));

  assert!(!env.exists("served"));
}

#[test]
fn missing_sync_source_stops_build() {
  let env = TestEnv::with_specs(&["stable"]);
  env.write_config(&["stable"], json!([{ "from": "missing.md", "to": "docs/missing.md" }]));

  env
    .apiref_cmd()
    .arg("build")
    .assert()
    .failure()
    .stderr(predicate::str::contains("sync source not found"));

  assert!(!env.exists("build"));
}

#[test]
fn serve_runs_after_build() {
  let env = TestEnv::with_specs(&["stable"]);

  env
    .apiref_cmd()
    .args(["build", "--serve"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Serve site"));

  assert!(env.exists("served"));
}
