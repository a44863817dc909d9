//! Syncing of files imported by the docs.
//!
//! Pages may import content that lives outside the site (changelogs, shared
//! snippets). Each configured entry is copied into place before the site is
//! built. Directory sources are copied recursively.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::config::SyncEntry;

#[derive(Debug, Error)]
pub enum SyncError {
  #[error("sync source not found: {0}")]
  SourceMissing(PathBuf),

  #[error("failed to walk {path}: {source}")]
  Walk {
    path: PathBuf,
    #[source]
    source: walkdir::Error,
  },

  #[error("failed to create directory {path}: {source}")]
  CreateDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to copy {from} to {to}: {source}")]
  Copy {
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Copy every entry into place, returning the number of files copied.
pub fn sync_files(entries: &[SyncEntry], root: &Path) -> Result<usize, SyncError> {
  let mut copied = 0;

  for entry in entries {
    let from = root.join(&entry.from);
    let to = root.join(&entry.to);

    if from.is_dir() {
      copied += copy_dir(&from, &to)?;
    } else if from.is_file() {
      copy_file(&from, &to)?;
      copied += 1;
    } else {
      return Err(SyncError::SourceMissing(from));
    }
  }

  Ok(copied)
}

fn copy_dir(from: &Path, to: &Path) -> Result<usize, SyncError> {
  let mut copied = 0;

  for entry in WalkDir::new(from).sort_by_file_name() {
    let entry = entry.map_err(|source| SyncError::Walk {
      path: from.to_path_buf(),
      source,
    })?;

    if !entry.file_type().is_file() {
      continue;
    }

    let rel_path = entry.path().strip_prefix(from).unwrap_or(entry.path());
    copy_file(entry.path(), &to.join(rel_path))?;
    copied += 1;
  }

  Ok(copied)
}

fn copy_file(from: &Path, to: &Path) -> Result<(), SyncError> {
  if let Some(parent) = to.parent() {
    fs::create_dir_all(parent).map_err(|source| SyncError::CreateDir {
      path: parent.to_path_buf(),
      source,
    })?;
  }

  fs::copy(from, to).map_err(|source| SyncError::Copy {
    from: from.to_path_buf(),
    to: to.to_path_buf(),
    source,
  })?;

  debug!(from = %from.display(), to = %to.display(), "synced file");
  Ok(())
}
