mod build;
mod generate;
mod status;

use std::process::ExitCode;

use apiref_lib::generate::GenerationReport;

use crate::output::{print_error, print_stat, print_success};

pub use build::cmd_build;
pub use generate::cmd_generate;
pub use status::cmd_status;

/// Summary lines shared by `generate` and `build`.
fn print_generation_summary(report: &GenerationReport) {
  if report.results.is_empty() {
    print_success("API docs are up to date");
    return;
  }

  print_stat("Generated", &report.succeeded().len().to_string());
  print_stat("Skipped", &report.skipped.len().to_string());

  let failed = report.failed();
  if !failed.is_empty() {
    print_stat("Failed", &failed.join(", "));
  }

  let not_attempted = report.not_attempted();
  if !not_attempted.is_empty() {
    print_stat("Not attempted", &not_attempted.join(", "));
  }

  if report.is_success() {
    print_success("Generation complete!");
  } else {
    print_error("Generation failed");
  }
}

/// Map a child exit code to our own, never reporting success for a failure.
fn failure_code(code: i32) -> ExitCode {
  u8::try_from(code)
    .ok()
    .filter(|c| *c != 0)
    .map(ExitCode::from)
    .unwrap_or(ExitCode::FAILURE)
}
