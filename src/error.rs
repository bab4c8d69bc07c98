use std::path::PathBuf;

use thiserror::Error;

/// Failures that end a scan. Per-file read problems never surface here.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Repository path does not exist: {}", .0.display())]
    RootNotFound(PathBuf),
}
