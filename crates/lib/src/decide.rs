//! Regeneration decisions.
//!
//! Given a spec, the persisted cache and the force flag, decide whether the
//! generator has to run. Checks happen in a fixed order:
//!
//! 1. force requested
//! 2. input file missing (the hash cannot be computed)
//! 3. output directory missing or empty
//! 4. content hash differs from the cached hash, or nothing is cached
//!
//! Deciding never touches the cache.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::cache::Cache;
use crate::config::SpecDescriptor;
use crate::util::hash::{ContentHash, hash_file};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
  Forced,
  MissingInput { path: PathBuf },
  /// The input exists but could not be read.
  Unreadable { path: PathBuf, message: String },
  OutputMissing { path: PathBuf },
  NotCached { current: ContentHash },
  Changed { previous: ContentHash, current: ContentHash },
  Unchanged { hash: ContentHash },
}

impl Decision {
  pub fn needs_regeneration(&self) -> bool {
    !matches!(self, Decision::Unchanged { .. })
  }

  /// Whether the status line should be shown as a warning.
  pub fn is_warning(&self) -> bool {
    matches!(self, Decision::MissingInput { .. } | Decision::Unreadable { .. })
  }
}

impl fmt::Display for Decision {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Decision::Forced => write!(f, "Force regeneration requested"),
      Decision::MissingInput { path } => {
        write!(f, "Input file not found: {}, regenerating", path.display())
      }
      Decision::Unreadable { path, message } => {
        write!(f, "Cannot hash {} ({}), regenerating", path.display(), message)
      }
      Decision::OutputMissing { .. } => write!(f, "Output directory missing or empty, regenerating"),
      Decision::NotCached { .. } => write!(f, "No previous generation recorded, regenerating"),
      Decision::Changed { previous, current } => {
        write!(f, "Changes detected ({} -> {}), regenerating", previous.short(), current.short())
      }
      Decision::Unchanged { .. } => write!(f, "No changes detected, skipping"),
    }
  }
}

/// Decide whether one spec needs regeneration.
pub fn decide(spec: &SpecDescriptor, root: &Path, cache: &Cache, force: bool) -> Decision {
  let decision = evaluate(spec, root, cache, force);

  if decision.is_warning() {
    warn!(spec = %spec.name, "{}", decision);
  } else {
    info!(spec = %spec.name, regenerate = decision.needs_regeneration(), "{}", decision);
  }

  decision
}

/// Decide for every spec, in order.
pub fn plan(specs: &[SpecDescriptor], root: &Path, cache: &Cache, force: bool) -> Vec<(SpecDescriptor, Decision)> {
  specs
    .iter()
    .map(|spec| (spec.clone(), decide(spec, root, cache, force)))
    .collect()
}

fn evaluate(spec: &SpecDescriptor, root: &Path, cache: &Cache, force: bool) -> Decision {
  if force {
    return Decision::Forced;
  }

  let input = spec.input_path(root);
  if !input.is_file() {
    return Decision::MissingInput { path: input };
  }

  let output = spec.output_path(root);
  if !has_entries(&output) {
    return Decision::OutputMissing { path: output };
  }

  let current = match hash_file(&input) {
    Ok(hash) => hash,
    Err(e) => {
      return Decision::Unreadable {
        path: input,
        message: e.to_string(),
      };
    }
  };

  match cache.get(&spec.name) {
    None => Decision::NotCached { current },
    Some(entry) if entry.hash == current => Decision::Unchanged { hash: current },
    Some(entry) => Decision::Changed {
      previous: entry.hash.clone(),
      current,
    },
  }
}

/// True if `path` is a directory with at least one entry.
fn has_entries(path: &Path) -> bool {
  fs::read_dir(path)
    .map(|mut entries| entries.next().is_some())
    .unwrap_or(false)
}
