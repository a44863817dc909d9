//! External command execution.
//!
//! Runs the site tooling (install, generator, build, serve) as child processes.
//! Children inherit the parent's environment and stdio so their output reaches
//! the terminal directly; only the exit status is consumed.

use std::path::Path;

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

use crate::config::CommandLine;

/// Errors that can occur while running an external command.
#[derive(Debug, Error)]
pub enum ProcessError {
  #[error("failed to start '{command}': {source}")]
  Spawn {
    command: String,
    #[source]
    source: std::io::Error,
  },

  #[error("'{command}' exited with code {code}")]
  Failed { command: String, code: i32 },

  /// Terminated without an exit code (e.g. killed by a signal).
  #[error("'{command}' was terminated")]
  Terminated { command: String },

  #[error("task for '{command}' did not complete: {message}")]
  Aborted { command: String, message: String },
}

impl ProcessError {
  /// The child's exit code, if it exited with one.
  pub fn exit_code(&self) -> Option<i32> {
    match self {
      ProcessError::Failed { code, .. } => Some(*code),
      _ => None,
    }
  }
}

/// Run a command in `cwd`, appending `extra_args`, and wait for it to exit.
pub async fn run_command(cmd: &CommandLine, extra_args: &[&str], cwd: &Path) -> Result<(), ProcessError> {
  let shown = describe(cmd, extra_args);
  info!(cmd = %shown, "executing command");

  let mut command = Command::new(&cmd.program);
  command.args(&cmd.args).args(extra_args).current_dir(cwd);

  debug!(program = %cmd.program, working_dir = ?cwd, "spawning process");

  let status = command
    .status()
    .await
    .map_err(|source| ProcessError::Spawn {
      command: shown.clone(),
      source,
    })?;

  if status.success() {
    debug!(cmd = %shown, "command succeeded");
    return Ok(());
  }

  match status.code() {
    Some(code) => Err(ProcessError::Failed { command: shown, code }),
    None => Err(ProcessError::Terminated { command: shown }),
  }
}

/// Human-readable form of the full invocation.
pub fn describe(cmd: &CommandLine, extra_args: &[&str]) -> String {
  let mut line = cmd.to_string();
  for arg in extra_args {
    line.push(' ');
    line.push_str(arg);
  }
  line
}
