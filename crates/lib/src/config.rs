//! Site configuration and run requests.
//!
//! The configuration lives in an optional `apiref.json` at the docs root. When
//! the file is absent the defaults describe a Docusaurus site with three
//! OpenAPI specs (`stable`, `experimental`, `deprecated`).
//!
//! ```json
//! {
//!   "specs": [{ "name": "stable", "input": "openapi/stable.yaml", "output": "docs/api/stable" }],
//!   "generator": { "program": "npx", "args": ["docusaurus", "gen-api-docs"] },
//!   "sync": [{ "from": "../CHANGELOG.md", "to": "docs/changelog.md" }]
//! }
//! ```

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{ALL_TARGET, CACHE_FILENAME, CONFIG_FILENAME, FORCE_GENERATION_ENV, SKIP_GENERATION_ENV};
use crate::util::env_flag;

/// Errors that can occur while loading or querying the site configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse config {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("config declares no specs")]
  NoSpecs,

  #[error("duplicate spec name: {0}")]
  DuplicateSpec(String),

  #[error("spec name '{0}' is reserved")]
  ReservedName(String),

  #[error("{field} command has no program")]
  EmptyCommand { field: &'static str },

  #[error("unknown spec '{name}' (available: {})", available.join(", "))]
  UnknownSpec { name: String, available: Vec<String> },
}

/// One OpenAPI spec and where its generated pages go.
///
/// Paths are relative to the docs root unless absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecDescriptor {
  pub name: String,
  pub input: PathBuf,
  pub output: PathBuf,
}

impl SpecDescriptor {
  pub fn new(name: impl Into<String>, input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
    Self {
      name: name.into(),
      input: input.into(),
      output: output.into(),
    }
  }

  pub fn input_path(&self, root: &Path) -> PathBuf {
    root.join(&self.input)
  }

  pub fn output_path(&self, root: &Path) -> PathBuf {
    root.join(&self.output)
  }
}

/// An external program invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandLine {
  pub program: String,
  #[serde(default)]
  pub args: Vec<String>,
}

impl CommandLine {
  pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
    Self {
      program: program.into(),
      args: args.iter().map(|a| a.to_string()).collect(),
    }
  }
}

impl fmt::Display for CommandLine {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program)?;
    for arg in &self.args {
      write!(f, " {}", arg)?;
    }
    Ok(())
  }
}

/// A file or directory copied into the site before building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncEntry {
  pub from: PathBuf,
  pub to: PathBuf,
}

/// Static configuration for one documentation site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SiteConfig {
  pub specs: Vec<SpecDescriptor>,
  /// Cache file, relative to the docs root.
  pub cache_file: PathBuf,
  /// Install is skipped when this directory exists.
  pub deps_marker: PathBuf,
  pub install: CommandLine,
  /// The spec name is appended as the last argument.
  pub generator: CommandLine,
  pub build: CommandLine,
  pub serve: CommandLine,
  pub sync: Vec<SyncEntry>,
}

impl Default for SiteConfig {
  fn default() -> Self {
    let specs = ["stable", "experimental", "deprecated"]
      .into_iter()
      .map(|name| {
        SpecDescriptor::new(
          name,
          format!("openapi/{}.yaml", name),
          format!("docs/api/{}", name),
        )
      })
      .collect();

    Self {
      specs,
      cache_file: PathBuf::from(CACHE_FILENAME),
      deps_marker: PathBuf::from("node_modules"),
      install: CommandLine::new("npm", &["install"]),
      generator: CommandLine::new("npx", &["docusaurus", "gen-api-docs"]),
      build: CommandLine::new("npm", &["run", "build"]),
      serve: CommandLine::new("npm", &["run", "serve"]),
      sync: Vec::new(),
    }
  }
}

impl SiteConfig {
  /// Load `apiref.json` from the docs root, falling back to defaults when absent.
  pub fn load(root: &Path) -> Result<Self, ConfigError> {
    let path = root.join(CONFIG_FILENAME);

    let content = match fs::read_to_string(&path) {
      Ok(content) => content,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Self::default());
      }
      Err(source) => return Err(ConfigError::Read { path, source }),
    };

    let config: SiteConfig = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.clone(),
      source,
    })?;
    config.validate()?;

    Ok(config)
  }

  /// Check spec names and command lines.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.specs.is_empty() {
      return Err(ConfigError::NoSpecs);
    }

    let mut seen = HashSet::new();
    for spec in &self.specs {
      if spec.name == ALL_TARGET {
        return Err(ConfigError::ReservedName(spec.name.clone()));
      }
      if !seen.insert(spec.name.as_str()) {
        return Err(ConfigError::DuplicateSpec(spec.name.clone()));
      }
    }

    for (field, cmd) in [
      ("install", &self.install),
      ("generator", &self.generator),
      ("build", &self.build),
      ("serve", &self.serve),
    ] {
      if cmd.program.trim().is_empty() {
        return Err(ConfigError::EmptyCommand { field });
      }
    }

    Ok(())
  }

  pub fn spec(&self, name: &str) -> Option<&SpecDescriptor> {
    self.specs.iter().find(|s| s.name == name)
  }

  pub fn spec_names(&self) -> Vec<String> {
    self.specs.iter().map(|s| s.name.clone()).collect()
  }

  pub fn cache_path(&self, root: &Path) -> PathBuf {
    root.join(&self.cache_file)
  }

  /// Resolve a target to the specs it selects, in configuration order.
  pub fn resolve_target(&self, target: &Target) -> Result<Vec<SpecDescriptor>, ConfigError> {
    match target {
      Target::All => Ok(self.specs.clone()),
      Target::Spec(name) => self
        .spec(name)
        .cloned()
        .map(|spec| vec![spec])
        .ok_or_else(|| ConfigError::UnknownSpec {
          name: name.clone(),
          available: self.spec_names(),
        }),
    }
  }
}

/// Which specs a run covers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Target {
  #[default]
  All,
  Spec(String),
}

impl FromStr for Target {
  type Err = std::convert::Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(match s {
      ALL_TARGET => Target::All,
      name => Target::Spec(name.to_string()),
    })
  }
}

impl fmt::Display for Target {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Target::All => write!(f, "{}", ALL_TARGET),
      Target::Spec(name) => write!(f, "{}", name),
    }
  }
}

/// Options for one `generate` run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunRequest {
  pub target: Target,
  pub force: bool,
  pub parallel: bool,
}

impl RunRequest {
  /// Build a request from CLI flags, honoring `FORCE_API_GEN=1`.
  pub fn from_args(target: &str, force: bool, parallel: bool) -> Self {
    let target = target.parse().unwrap_or_default();
    Self {
      target,
      force: force || env_flag(FORCE_GENERATION_ENV),
      parallel,
    }
  }
}

/// Options for one `build` run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuildRequest {
  pub force: bool,
  pub parallel: bool,
  pub skip_api: bool,
  pub serve: bool,
}

impl BuildRequest {
  /// Build a request from CLI flags, honoring `FORCE_API_GEN=1` and `SKIP_API_GEN=1`.
  pub fn from_args(force: bool, parallel: bool, skip_api: bool, serve: bool) -> Self {
    Self {
      force: force || env_flag(FORCE_GENERATION_ENV),
      parallel,
      skip_api: skip_api || env_flag(SKIP_GENERATION_ENV),
      serve,
    }
  }

  /// The generation request covering every spec.
  pub fn run_request(&self) -> RunRequest {
    RunRequest {
      target: Target::All,
      force: self.force,
      parallel: self.parallel,
    }
  }
}
