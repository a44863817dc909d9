//! Implementation of the `apiref build` command.

use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::debug;

use apiref_lib::config::{BuildRequest, SiteConfig};
use apiref_lib::pipeline::run_build;

use super::{failure_code, print_generation_summary};
use crate::output::{ConsoleReporter, format_duration, print_error, print_stat, print_success};

/// Execute the build command.
///
/// Runs install, API doc generation, file sync, site build and optionally the
/// site server, stopping at the first failing step. A failing child's exit
/// code becomes ours.
pub fn cmd_build(root: &Path, force: bool, parallel: bool, skip_api: bool, serve: bool) -> Result<ExitCode> {
  let start = Instant::now();

  let config = SiteConfig::load(root).context("Failed to load site configuration")?;
  debug!(root = %root.display(), specs = config.specs.len(), "loaded site configuration");

  let request = BuildRequest::from_args(force, parallel, skip_api, serve);

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let report = match rt.block_on(run_build(&request, &config, root, &ConsoleReporter)) {
    Ok(report) => report,
    Err(e) => {
      print_error(&format!("Build stopped at step '{}': {}", e.step(), e));
      return Ok(failure_code(e.exit_code()));
    }
  };

  println!();
  if let Some(generation) = &report.generation {
    print_generation_summary(generation);
  }
  print_success("Build complete!");
  if report.installed {
    print_stat("Dependencies", "installed");
  }
  print_stat("Files synced", &report.synced.to_string());
  print_stat("Duration", &format_duration(start.elapsed()));

  Ok(ExitCode::SUCCESS)
}
