use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use tracing::debug;

use crate::error::ScanError;
use crate::formatters::table;
use crate::traversal::scan_tree;
use crate::types::compute_percentages;

use super::Args;

/// Scans, reports, and picks the exit status: success only when at least
/// one technology row was produced.
///
/// # Errors
/// Returns [`ScanError::RootNotFound`] if the path does not exist.
pub fn run_with_args(args: &Args) -> Result<ExitCode> {
    let root = resolve_root(&args.path);
    if !root.exists() {
        return Err(ScanError::RootNotFound(root).into());
    }

    println!("Analyzing repository: {}\n", root.display());

    let tally = scan_tree(&root)?;
    let rows = compute_percentages(&tally);
    debug!(rows = rows.len(), "computed percentages");

    println!("{}", table::render(&rows));

    if rows.is_empty() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Canonical form of `path` when it exists, otherwise an absolute form of
/// it, otherwise the path as given.
pub fn resolve_root(path: &Path) -> PathBuf {
    std::fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
