use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn first_run_generates_every_spec() {
  let env = TestEnv::with_specs(&["stable", "experimental", "deprecated"]);

  env
    .apiref_cmd()
    .arg("generate")
    .assert()
    .success()
    .stdout(predicate::str::contains("[stable] Generated"))
    .stdout(predicate::str::contains("Generation complete!"));

  assert_eq!(env.generator_runs(), vec!["stable", "experimental", "deprecated"]);
  assert!(env.exists("docs/api/deprecated/index.md"));

  let cache = env.cache();
  for name in ["stable", "experimental", "deprecated"] {
    assert_eq!(cache[name]["hash"].as_str().unwrap().len(), 64);
    assert!(cache[name]["generatedAt"].is_string());
  }
}

#[test]
fn unchanged_specs_are_skipped() {
  let env = TestEnv::with_specs(&["stable"]);
  env.apiref_cmd().arg("generate").assert().success();

  env
    .apiref_cmd()
    .arg("generate")
    .assert()
    .success()
    .stdout(predicate::str::contains("[stable] No changes detected, skipping"))
    .stdout(predicate::str::contains("API docs are up to date"));

  assert_eq!(env.generator_runs(), vec!["stable"]);
}

#[test]
fn changed_spec_is_regenerated() {
  let env = TestEnv::with_specs(&["stable", "experimental"]);
  env.apiref_cmd().arg("generate").assert().success();
  let before = env.cache()["stable"]["hash"].clone();

  env.write_spec("stable", "openapi: 3.0.1\n");

  env
    .apiref_cmd()
    .arg("generate")
    .assert()
    .success()
    .stdout(predicate::str::contains("[stable] Changes detected"));

  assert_eq!(env.generator_runs(), vec!["stable", "experimental", "stable"]);
  assert_ne!(env.cache()["stable"]["hash"], before);
}

#[test]
fn force_flag_regenerates() {
  let env = TestEnv::with_specs(&["stable"]);
  env.apiref_cmd().arg("generate").assert().success();

  env
    .apiref_cmd()
    .args(["generate", "--force"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Force regeneration requested"));

  assert_eq!(env.generator_runs().len(), 2);
}

#[test]
fn force_env_regenerates() {
  let env = TestEnv::with_specs(&["stable"]);
  env.apiref_cmd().arg("generate").assert().success();

  env
    .apiref_cmd()
    .arg("generate")
    .env("FORCE_API_GEN", "1")
    .assert()
    .success();

  assert_eq!(env.generator_runs().len(), 2);
}

#[test]
fn force_env_other_values_are_ignored() {
  let env = TestEnv::with_specs(&["stable"]);
  env.apiref_cmd().arg("generate").assert().success();

  env
    .apiref_cmd()
    .arg("generate")
    .env("FORCE_API_GEN", "true")
    .assert()
    .success();

  assert_eq!(env.generator_runs().len(), 1);
}

#[test]
fn single_target_generates_only_that_spec() {
  let env = TestEnv::with_specs(&["stable", "experimental"]);

  env.apiref_cmd().args(["generate", "experimental"]).assert().success();

  assert_eq!(env.generator_runs(), vec!["experimental"]);
  assert!(env.cache().get("stable").is_none());
}

#[test]
fn unknown_target_fails() {
  let env = TestEnv::with_specs(&["stable"]);

  env
    .apiref_cmd()
    .args(["generate", "beta"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("unknown spec 'beta' (available: stable)"));

  assert!(env.generator_runs().is_empty());
}

#[test]
fn sequential_failure_stops_later_specs() {
  let env = TestEnv::with_specs(&["stable", "experimental", "deprecated"]);

  env
    .apiref_cmd()
    .arg("generate")
    .env("FAIL_SPEC", "experimental")
    .assert()
    .failure()
    .stderr(predicate::str::contains("exited with code 7"))
    .stdout(predicate::str::contains("Not attempted: deprecated"));

  assert_eq!(env.generator_runs(), vec!["stable", "experimental"]);

  let cache = env.cache();
  assert!(cache.get("stable").is_some());
  assert!(cache.get("experimental").is_none());
  assert!(cache.get("deprecated").is_none());
}

#[test]
fn parallel_failure_keeps_successful_siblings() {
  let env = TestEnv::with_specs(&["stable", "experimental", "deprecated"]);

  env
    .apiref_cmd()
    .args(["generate", "--parallel"])
    .env("FAIL_SPEC", "experimental")
    .assert()
    .failure()
    .stdout(predicate::str::contains("Failed: experimental"));

  let mut runs = env.generator_runs();
  runs.sort();
  assert_eq!(runs, vec!["deprecated", "experimental", "stable"]);

  let cache = env.cache();
  assert!(cache.get("stable").is_some());
  assert!(cache.get("deprecated").is_some());
  assert!(cache.get("experimental").is_none());
}

#[test]
fn missing_input_warns_and_regenerates() {
  let env = TestEnv::with_specs(&["stable"]);
  std::fs::remove_file(env.temp.path().join("openapi/stable.yaml")).unwrap();

  env
    .apiref_cmd()
    .arg("generate")
    .assert()
    .success()
    .stderr(predicate::str::contains("Input file not found"));

  assert_eq!(env.generator_runs(), vec!["stable"]);
}

#[test]
fn corrupt_cache_is_not_fatal() {
  let env = TestEnv::with_specs(&["stable"]);
  env.write_file(".openapi-cache.json", "{ not json");

  env
    .apiref_cmd()
    .arg("generate")
    .assert()
    .success()
    .stderr(predicate::str::contains("treating cache as empty"));

  assert!(env.cache().get("stable").is_some());
}

#[test]
fn docs_dir_flag_selects_root() {
  let env = TestEnv::with_specs(&["stable"]);
  let elsewhere = tempfile::TempDir::new().unwrap();

  env
    .apiref_cmd()
    .env_remove("APIREF_DOCS_DIR")
    .current_dir(elsewhere.path())
    .arg("-C")
    .arg(env.root_path())
    .arg("generate")
    .assert()
    .success();

  assert_eq!(env.generator_runs(), vec!["stable"]);
}

#[test]
fn non_ascii_cached_hash_is_regenerated() {
  let env = TestEnv::with_specs(&["stable"]);
  env.apiref_cmd().arg("generate").assert().success();
  env.write_file(
    ".openapi-cache.json",
    r#"{"stable":{"hash":"aéééééééé","generatedAt":"2025-03-01T10:00:00.000Z"}}"#,
  );

  env
    .apiref_cmd()
    .arg("generate")
    .assert()
    .success()
    .stdout(predicate::str::contains("[stable] Changes detected (aéééééééé ->"));

  assert_eq!(env.generator_runs(), vec!["stable", "stable"]);
  assert_eq!(env.cache()["stable"]["hash"].as_str().unwrap().len(), 64);
}
