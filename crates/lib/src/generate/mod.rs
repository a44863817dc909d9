//! API reference generation.
//!
//! This module ties the decider to the external generator:
//! - Resolves the requested target to spec descriptors
//! - Loads the cache once, decides per spec, and runs the generator for the
//!   specs that need it, sequentially or in parallel
//! - Records a cache entry for every spec whose generation succeeded
//! - Saves the cache once at the end
//!
//! A failure never rolls back cache entries of specs that succeeded in the
//! same run.

pub mod types;

use std::path::Path;
use std::time::SystemTime;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::cache::Cache;
use crate::config::{CommandLine, RunRequest, SiteConfig, SpecDescriptor};
use crate::decide::plan;
use crate::events::{Event, Reporter};
use crate::process::{ProcessError, describe, run_command};
use crate::util::hash::hash_file;

pub use types::{GenerateError, GenerationReport, SpecOutcome, SpecResult};

/// Run one generation request end to end.
///
/// Returns `Err` only for problems outside the generator itself: an unknown
/// target or a cache that cannot be saved. Generator failures are reported in
/// the returned [`GenerationReport`].
pub async fn generate(
  request: &RunRequest,
  config: &SiteConfig,
  root: &Path,
  reporter: &dyn Reporter,
) -> Result<GenerationReport, GenerateError> {
  let specs = config.resolve_target(&request.target)?;
  info!(requested = %request.target, specs = specs.len(), force = request.force, "starting generation");

  let cache_path = config.cache_path(root);
  let mut cache = load_cache(&cache_path, reporter);

  let mut pending = Vec::new();
  let mut skipped = Vec::new();
  for (spec, decision) in plan(&specs, root, &cache, request.force) {
    reporter.report(&Event::Decision {
      spec: &spec.name,
      decision: &decision,
    });
    if decision.needs_regeneration() {
      pending.push(spec);
    } else {
      skipped.push(spec.name);
    }
  }

  if pending.is_empty() {
    info!("all specs up to date");
    return Ok(GenerationReport {
      results: Vec::new(),
      skipped,
    });
  }

  let mut report = run_generation(&pending, root, &config.generator, &mut cache, request.parallel, reporter).await;
  report.skipped = skipped;

  if !report.succeeded().is_empty() {
    cache.save(&cache_path)?;
    info!(path = %cache_path.display(), entries = cache.len(), "cache saved");
  }

  info!(
    succeeded = report.succeeded().len(),
    failed = report.failed().len(),
    skipped = report.skipped.len(),
    "generation complete"
  );

  Ok(report)
}

/// Run the generator for each spec and record successes in `cache`.
///
/// Sequential mode stops at the first failure; the remaining specs are
/// reported as not attempted. Parallel mode starts every spec at once and
/// waits for all of them.
pub async fn run_generation(
  specs: &[SpecDescriptor],
  root: &Path,
  generator: &CommandLine,
  cache: &mut Cache,
  parallel: bool,
  reporter: &dyn Reporter,
) -> GenerationReport {
  let results = if parallel {
    run_parallel(specs, root, generator, cache, reporter).await
  } else {
    run_sequential(specs, root, generator, cache, reporter).await
  };

  GenerationReport {
    results,
    skipped: Vec::new(),
  }
}

async fn run_sequential(
  specs: &[SpecDescriptor],
  root: &Path,
  generator: &CommandLine,
  cache: &mut Cache,
  reporter: &dyn Reporter,
) -> Vec<SpecResult> {
  let mut results = Vec::with_capacity(specs.len());
  let mut remaining = specs.iter();

  for spec in remaining.by_ref() {
    let outcome = match run_command(generator, &[spec.name.as_str()], root).await {
      Ok(()) => record_success(cache, spec, root),
      Err(e) => SpecOutcome::Failed(e),
    };
    let failed = matches!(outcome, SpecOutcome::Failed(_));
    results.push(finish(spec, outcome, reporter));

    if failed {
      break;
    }
  }

  for spec in remaining {
    results.push(finish(spec, SpecOutcome::NotAttempted, reporter));
  }

  results
}

async fn run_parallel(
  specs: &[SpecDescriptor],
  root: &Path,
  generator: &CommandLine,
  cache: &mut Cache,
  reporter: &dyn Reporter,
) -> Vec<SpecResult> {
  info!(specs = specs.len(), "launching parallel generation");

  let handles: Vec<(&SpecDescriptor, JoinHandle<Result<(), ProcessError>>)> = specs
    .iter()
    .map(|spec| {
      let generator = generator.clone();
      let root = root.to_path_buf();
      let name = spec.name.clone();
      let handle = tokio::spawn(async move { run_command(&generator, &[name.as_str()], &root).await });
      (spec, handle)
    })
    .collect();

  let mut results = Vec::with_capacity(handles.len());

  for (spec, handle) in handles {
    let outcome = match handle.await {
      Ok(Ok(())) => record_success(cache, spec, root),
      Ok(Err(e)) => SpecOutcome::Failed(e),
      Err(e) => {
        error!(spec = %spec.name, error = %e, "generation task panicked");
        SpecOutcome::Failed(ProcessError::Aborted {
          command: describe(generator, &[spec.name.as_str()]),
          message: e.to_string(),
        })
      }
    };
    results.push(finish(spec, outcome, reporter));
  }

  results
}

/// Hash the input as it is now and record it.
fn record_success(cache: &mut Cache, spec: &SpecDescriptor, root: &Path) -> SpecOutcome {
  match hash_file(&spec.input_path(root)) {
    Ok(hash) => {
      cache.record(&spec.name, hash.clone(), SystemTime::now());
      SpecOutcome::Generated { hash: Some(hash) }
    }
    Err(e) => {
      warn!(spec = %spec.name, error = %e, "generated, but input could not be hashed; cache not updated");
      SpecOutcome::Generated { hash: None }
    }
  }
}

fn finish(spec: &SpecDescriptor, outcome: SpecOutcome, reporter: &dyn Reporter) -> SpecResult {
  match &outcome {
    SpecOutcome::Generated { .. } => info!(spec = %spec.name, "generation succeeded"),
    SpecOutcome::Failed(e) => error!(spec = %spec.name, error = %e, "generation failed"),
    SpecOutcome::NotAttempted => warn!(spec = %spec.name, "not attempted after earlier failure"),
  }

  let result = SpecResult {
    name: spec.name.clone(),
    outcome,
  };
  reporter.report(&Event::SpecFinished(&result));
  result
}

fn load_cache(path: &Path, reporter: &dyn Reporter) -> Cache {
  match Cache::load(path) {
    Ok(cache) => cache,
    Err(e) => {
      warn!(path = %path.display(), error = %e, "cache file unreadable, treating as empty");
      reporter.report(&Event::CacheUnreadable(&e));
      Cache::default()
    }
  }
}
