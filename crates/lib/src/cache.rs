//! Persisted generation cache.
//!
//! The cache is a flat JSON object keyed by spec name:
//!
//! ```json
//! {
//!   "stable": { "hash": "2cf24dba...", "generatedAt": "2026-01-01T00:00:00.000Z" }
//! }
//! ```
//!
//! It is loaded once at the start of a run and saved once at the end. An entry
//! is only written after the generator succeeded for that spec.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::hash::ContentHash;

#[derive(Debug, Error)]
pub enum CacheError {
  #[error("failed to read cache {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse cache {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("failed to serialize cache: {0}")]
  Serialize(#[source] serde_json::Error),

  #[error("failed to write cache {path}: {source}")]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Record of the last successful generation of one spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
  pub hash: ContentHash,
  /// RFC 3339 timestamp with millisecond precision.
  pub generated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cache {
  entries: BTreeMap<String, CacheEntry>,
}

impl Cache {
  /// Load the cache file.
  ///
  /// Returns an empty cache if the file doesn't exist.
  pub fn load(path: &Path) -> Result<Self, CacheError> {
    let content = match fs::read_to_string(path) {
      Ok(content) => content,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
      Err(source) => {
        return Err(CacheError::Read {
          path: path.to_path_buf(),
          source,
        });
      }
    };

    serde_json::from_str(&content).map_err(|source| CacheError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Save the cache file.
  ///
  /// Uses atomic write (write to temp, then rename) to prevent corruption.
  pub fn save(&self, path: &Path) -> Result<(), CacheError> {
    let write_err = |source| CacheError::Write {
      path: path.to_path_buf(),
      source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      fs::create_dir_all(parent).map_err(write_err)?;
    }

    let mut temp_path = path.as_os_str().to_owned();
    temp_path.push(".tmp");
    let temp_path = PathBuf::from(temp_path);

    let mut content = serde_json::to_string_pretty(self).map_err(CacheError::Serialize)?;
    content.push('\n');
    fs::write(&temp_path, &content).map_err(write_err)?;
    fs::rename(&temp_path, path).map_err(write_err)?;

    Ok(())
  }

  pub fn get(&self, name: &str) -> Option<&CacheEntry> {
    self.entries.get(name)
  }

  /// Overwrite the entry for a spec after a successful generation.
  pub fn record(&mut self, name: &str, hash: ContentHash, at: SystemTime) {
    let entry = CacheEntry {
      hash,
      generated_at: humantime::format_rfc3339_millis(at).to_string(),
    };
    self.entries.insert(name.to_string(), entry);
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}
