//! Output formatters for scan results.
//!
//! This module provides the ways results leave the program:
//! - [`log`]: the duplicate log file grouping canonical files with their copies
//! - [`json`]: JSON for automation and scripting
//! - [`summary`]: end-of-phase console summaries
//!
//! # Example
//!
//! ```no_run
//! use basedupe::duplicates::DuplicateFinder;
//! use basedupe::output::ReportWriter;
//! use std::path::Path;
//!
//! let mut finder = DuplicateFinder::with_defaults();
//! finder
//!     .find_duplicates(Path::new("/photos"), true, Path::new("/downloads"), true)
//!     .unwrap();
//!
//! print!("{}", ReportWriter::new(finder.index()).render());
//! ```

pub mod json;
pub mod log;
pub mod summary;

// Re-export main types
pub use json::JsonOutput;
pub use log::{ReportError, ReportWriter};
