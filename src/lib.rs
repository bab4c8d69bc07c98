//! Per-technology lines-of-code breakdown for a directory tree.
//!
//! The pipeline is linear: [`traversal::scan_tree`] walks the tree and
//! builds a [`types::Tally`], [`types::compute_percentages`] turns it into
//! sorted rows, and [`formatters::table::render`] prints them.

pub mod analyzer;
pub mod cli;
pub mod error;
pub mod formatters;
pub mod technologies;
pub mod traversal;
pub mod types;

pub use error::ScanError;
pub use types::{Tally, TechRow, compute_percentages};
