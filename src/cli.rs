use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, ValueHint};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod run_impl;

pub use run_impl::{resolve_root, run_with_args};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "techusage",
    version,
    about = "Lines of code per technology, as a percentage breakdown",
    long_about = None
)]
pub struct Args {
    /// Directory to analyze
    #[arg(value_name = "PATH", default_value = ".", value_hint = ValueHint::DirPath)]
    pub path: PathBuf,
}

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Builds the log filter from a `RUST_LOG`-style directive string, falling
/// back to warnings only when it is absent or malformed.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Log to stderr, filtered by `RUST_LOG` (quiet by default).
fn setup_logging() {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(env.as_deref());

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

/// Runs the CLI application.
///
/// # Errors
/// Returns an error if the repository path does not exist.
pub fn run() -> Result<ExitCode> {
    let args = Args::parse();
    setup_logging();
    run_with_args(&args)
}
