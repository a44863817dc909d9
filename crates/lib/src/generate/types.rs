//! Result and error types for API doc generation.

use thiserror::Error;

use crate::cache::CacheError;
use crate::config::ConfigError;
use crate::process::ProcessError;
use crate::util::hash::ContentHash;

/// Errors that stop a generation run before or after the generator runs.
///
/// Generator failures are not errors here; they are recorded per spec in the
/// [`GenerationReport`].
#[derive(Debug, Error)]
pub enum GenerateError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Cache(#[from] CacheError),
}

#[derive(Debug)]
pub enum SpecOutcome {
  /// The generator succeeded. `hash` is `None` if the input could not be
  /// hashed afterwards, in which case no cache entry was written.
  Generated { hash: Option<ContentHash> },
  Failed(ProcessError),
  /// Not run because an earlier spec failed in sequential mode.
  NotAttempted,
}

/// Outcome of generating a single spec.
#[derive(Debug)]
pub struct SpecResult {
  pub name: String,
  pub outcome: SpecOutcome,
}

impl SpecResult {
  pub fn is_success(&self) -> bool {
    matches!(self.outcome, SpecOutcome::Generated { .. })
  }
}

/// Per-spec results of one generation run, in configuration order.
#[derive(Debug, Default)]
pub struct GenerationReport {
  pub results: Vec<SpecResult>,
  /// Specs whose decision was to skip.
  pub skipped: Vec<String>,
}

impl GenerationReport {
  /// True when no attempted or pending spec failed.
  pub fn is_success(&self) -> bool {
    self.results.iter().all(SpecResult::is_success)
  }

  pub fn succeeded(&self) -> Vec<&str> {
    self.names_where(|r| r.is_success())
  }

  pub fn failed(&self) -> Vec<&str> {
    self.names_where(|r| matches!(r.outcome, SpecOutcome::Failed(_)))
  }

  pub fn not_attempted(&self) -> Vec<&str> {
    self.names_where(|r| matches!(r.outcome, SpecOutcome::NotAttempted))
  }

  fn names_where(&self, pred: impl Fn(&SpecResult) -> bool) -> Vec<&str> {
    self
      .results
      .iter()
      .filter(|r| pred(r))
      .map(|r| r.name.as_str())
      .collect()
  }
}
