//! Status command implementation.
//!
//! Displays the cache record and the current regeneration decision for each
//! spec without running anything.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};

use apiref_lib::cache::Cache;
use apiref_lib::config::SiteConfig;
use apiref_lib::decide::plan;

use crate::output::{OutputFormat, print_info, print_json, print_stat, print_success, print_warning};

pub fn cmd_status(root: &Path, output: OutputFormat) -> Result<ExitCode> {
  let config = SiteConfig::load(root).context("Failed to load site configuration")?;
  let cache_path = config.cache_path(root);

  let cache = Cache::load(&cache_path).unwrap_or_else(|e| {
    print_warning(&format!("{}; treating cache as empty", e));
    Cache::default()
  });

  let decisions = plan(&config.specs, root, &cache, false);

  if output.is_json() {
    let specs: Vec<_> = decisions
      .iter()
      .map(|(spec, decision)| {
        let entry = cache.get(&spec.name);
        serde_json::json!({
          "name": spec.name,
          "input": spec.input,
          "output": spec.output,
          "hash": entry.map(|e| &e.hash),
          "generatedAt": entry.map(|e| &e.generated_at),
          "regenerate": decision.needs_regeneration(),
          "status": decision.to_string(),
        })
      })
      .collect();
    print_json(&serde_json::json!({ "cacheFile": cache_path, "specs": specs }))?;
    return Ok(ExitCode::SUCCESS);
  }

  print_stat("Cache", &cache_path.display().to_string());

  for (spec, decision) in &decisions {
    println!();
    if decision.needs_regeneration() {
      print_info(&format!("{} needs regeneration", spec.name));
    } else {
      print_success(&format!("{} is up to date", spec.name));
    }
    print_stat("Input", &spec.input.display().to_string());
    print_stat("Output", &spec.output.display().to_string());
    match cache.get(&spec.name) {
      Some(entry) => {
        print_stat("Hash", entry.hash.short());
        print_stat("Generated", &entry.generated_at);
      }
      None => print_stat("Generated", "never"),
    }
    print_stat("Status", &decision.to_string());
  }

  Ok(ExitCode::SUCCESS)
}
