//! Docs build orchestration.
//!
//! Runs the fixed build sequence, stopping at the first failing step:
//!
//! 1. install dependencies (only when the dependency marker is missing)
//! 2. generate API docs (unless skipped)
//! 3. sync imported files
//! 4. build the site
//! 5. serve the site (only when requested)

use std::fmt;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::config::{BuildRequest, SiteConfig};
use crate::events::{Event, Reporter};
use crate::generate::{GenerateError, GenerationReport, generate};
use crate::process::{ProcessError, run_command};
use crate::sync::{SyncError, sync_files};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
  Install,
  Generate,
  Sync,
  Build,
  Serve,
}

impl fmt::Display for Step {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let label = match self {
      Step::Install => "install dependencies",
      Step::Generate => "generate API docs",
      Step::Sync => "sync imported files",
      Step::Build => "build site",
      Step::Serve => "serve site",
    };
    f.write_str(label)
  }
}

#[derive(Debug, Error)]
pub enum PipelineError {
  #[error("dependency install failed: {0}")]
  Install(#[source] ProcessError),

  #[error(transparent)]
  Generate(#[from] GenerateError),

  #[error("API doc generation failed for: {}", specs.join(", "))]
  GenerationFailed { specs: Vec<String> },

  #[error(transparent)]
  Sync(#[from] SyncError),

  #[error("site build failed: {0}")]
  Build(#[source] ProcessError),

  #[error("site server failed: {0}")]
  Serve(#[source] ProcessError),
}

impl PipelineError {
  /// The step that failed.
  pub fn step(&self) -> Step {
    match self {
      PipelineError::Install(_) => Step::Install,
      PipelineError::Generate(_) | PipelineError::GenerationFailed { .. } => Step::Generate,
      PipelineError::Sync(_) => Step::Sync,
      PipelineError::Build(_) => Step::Build,
      PipelineError::Serve(_) => Step::Serve,
    }
  }

  /// Process exit code to report: the failing child's code when there is one.
  pub fn exit_code(&self) -> i32 {
    match self {
      PipelineError::Install(e) | PipelineError::Build(e) | PipelineError::Serve(e) => {
        e.exit_code().filter(|code| *code != 0).unwrap_or(1)
      }
      _ => 1,
    }
  }
}

/// What the build sequence did.
#[derive(Debug, Default)]
pub struct BuildReport {
  pub installed: bool,
  /// `None` when generation was skipped.
  pub generation: Option<GenerationReport>,
  pub synced: usize,
  pub served: bool,
}

/// Run the build sequence for the docs root.
pub async fn run_build(
  request: &BuildRequest,
  config: &SiteConfig,
  root: &Path,
  reporter: &dyn Reporter,
) -> Result<BuildReport, PipelineError> {
  let mut report = BuildReport::default();

  if root.join(&config.deps_marker).exists() {
    skip(reporter, Step::Install, "dependencies already installed");
  } else {
    start(reporter, Step::Install);
    run_command(&config.install, &[], root)
      .await
      .map_err(PipelineError::Install)?;
    report.installed = true;
  }

  if request.skip_api {
    skip(reporter, Step::Generate, "API doc generation disabled");
  } else {
    start(reporter, Step::Generate);
    let generation = generate(&request.run_request(), config, root, reporter).await?;
    if !generation.is_success() {
      let specs = generation.failed().into_iter().map(String::from).collect();
      return Err(PipelineError::GenerationFailed { specs });
    }
    report.generation = Some(generation);
  }

  if config.sync.is_empty() {
    skip(reporter, Step::Sync, "nothing to sync");
  } else {
    start(reporter, Step::Sync);
    report.synced = sync_files(&config.sync, root)?;
    info!(files = report.synced, "synced imported files");
  }

  start(reporter, Step::Build);
  run_command(&config.build, &[], root)
    .await
    .map_err(PipelineError::Build)?;

  if request.serve {
    start(reporter, Step::Serve);
    run_command(&config.serve, &[], root)
      .await
      .map_err(PipelineError::Serve)?;
    report.served = true;
  }

  Ok(report)
}

fn start(reporter: &dyn Reporter, step: Step) {
  info!(step = %step, "starting step");
  reporter.report(&Event::StepStarted(step));
}

fn skip(reporter: &dyn Reporter, step: Step, reason: &str) {
  info!(step = %step, reason, "skipping step");
  reporter.report(&Event::StepSkipped { step, reason });
}
