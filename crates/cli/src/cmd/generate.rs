//! Implementation of the `apiref generate` command.

use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::debug;

use apiref_lib::config::{RunRequest, SiteConfig};
use apiref_lib::generate::generate;

use super::print_generation_summary;
use crate::output::{ConsoleReporter, format_duration, print_stat};

/// Execute the generate command.
///
/// Decides per spec whether its reference pages are stale, runs the generator
/// for the stale ones and records successes in the cache. Exits non-zero if
/// any generator run failed.
pub fn cmd_generate(root: &Path, target: &str, force: bool, parallel: bool) -> Result<ExitCode> {
  let start = Instant::now();

  let config = SiteConfig::load(root).context("Failed to load site configuration")?;
  debug!(root = %root.display(), specs = config.specs.len(), "loaded site configuration");

  let request = RunRequest::from_args(target, force, parallel);

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let report = rt
    .block_on(generate(&request, &config, root, &ConsoleReporter))
    .context("Generation failed")?;

  println!();
  print_generation_summary(&report);
  print_stat("Duration", &format_duration(start.elapsed()));

  Ok(if report.is_success() {
    ExitCode::SUCCESS
  } else {
    ExitCode::FAILURE
  })
}
