mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use apiref_lib::consts::{ALL_TARGET, DOCS_DIR_ENV};

use crate::cmd::{cmd_build, cmd_generate, cmd_status};
use crate::output::{OutputFormat, print_error};

/// apiref - Cache-aware OpenAPI reference generation and docs builds
#[derive(Parser)]
#[command(name = "apiref")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Docs site root (holds apiref.json, the specs and the cache file)
  #[arg(short = 'C', long, global = true, env = DOCS_DIR_ENV, default_value = ".")]
  docs_dir: PathBuf,

  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Regenerate API reference pages for specs that changed
  Generate {
    /// Spec to generate, or "all"
    #[arg(default_value = ALL_TARGET)]
    target: String,

    /// Regenerate even if nothing changed (or set FORCE_API_GEN=1)
    #[arg(short, long)]
    force: bool,

    /// Run the generator for all pending specs at once
    #[arg(short, long)]
    parallel: bool,
  },

  /// Install dependencies, generate API docs, sync imported files and build the site
  Build {
    /// Regenerate API docs even if nothing changed (or set FORCE_API_GEN=1)
    #[arg(short, long)]
    force: bool,

    /// Run the generator for all pending specs at once
    #[arg(short, long)]
    parallel: bool,

    /// Skip API doc generation (or set SKIP_API_GEN=1)
    #[arg(long)]
    skip_api: bool,

    /// Serve the site after building
    #[arg(long)]
    serve: bool,
  },

  /// Show the cached generation state of each spec
  Status {
    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  init_tracing(cli.verbose);

  let root = cli.docs_dir.as_path();
  let result = match cli.command {
    Commands::Generate {
      target,
      force,
      parallel,
    } => cmd_generate(root, &target, force, parallel),
    Commands::Build {
      force,
      parallel,
      skip_api,
      serve,
    } => cmd_build(root, force, parallel, skip_api, serve),
    Commands::Status { output } => cmd_status(root, output),
  };

  match result {
    Ok(code) => code,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}

fn init_tracing(verbose: bool) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    if verbose {
      EnvFilter::new("apiref=debug,apiref_lib=debug")
    } else {
      EnvFilter::new("error")
    }
  });

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}
