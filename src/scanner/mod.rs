//! Scanner module for directory traversal and file fingerprinting.
//!
//! This module provides functionality for:
//! - Sequential, sorted, pre-order directory walking using walkdir
//! - Content fingerprinting (size + SHA-256 or BLAKE3 digest)
//! - Path cleaning and case-insensitive folder comparison
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal with recursion and exclusion policy
//! - [`hasher`]: Streaming file fingerprints
//! - [`path_utils`]: Path cleaning and comparison
//!
//! # Example
//!
//! ```no_run
//! use basedupe::scanner::{EntryKind, Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let config = WalkerConfig {
//!     recursive: true,
//!     ..Default::default()
//! };
//!
//! let walker = Walker::new(Path::new("."), config);
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(e) if e.kind == EntryKind::File => println!("{}: {} bytes", e.path.display(), e.size),
//!         Ok(_) => {}
//!         Err(e) => eprintln!("Fatal: {}", e),
//!     }
//! }
//! ```

pub mod hasher;
pub mod path_utils;
pub mod walker;

use std::path::PathBuf;

// Re-export main types
pub use hasher::{Fingerprint, Fingerprinter, HashAlgorithm, SIZE_DIGITS};
pub use walker::Walker;

/// Directory names never descended into unless configured otherwise.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[".git"];

/// Kind of entry produced by the walker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A subdirectory that is about to be descended into.
    Directory,
    /// A regular file.
    File,
}

/// One entry produced by a directory walk.
#[derive(Debug, Clone)]
pub struct WalkEntry {
    /// Path to the entry (root joined with the relative path)
    pub path: PathBuf,
    /// Directory or regular file
    pub kind: EntryKind,
    /// File size in bytes (0 for directories)
    pub size: u64,
}

impl WalkEntry {
    /// Create a file entry.
    #[must_use]
    pub fn file(path: PathBuf, size: u64) -> Self {
        Self {
            path,
            kind: EntryKind::File,
            size,
        }
    }

    /// Create a directory entry.
    #[must_use]
    pub fn directory(path: PathBuf) -> Self {
        Self {
            path,
            kind: EntryKind::Directory,
            size: 0,
        }
    }
}

/// Configuration for directory walking.
///
/// Controls recursion, directory exclusion and symlink handling.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Descend into subdirectories of the root.
    /// When false only the root's immediate files are produced.
    pub recursive: bool,

    /// Directory base names (compared case-insensitively) that are never
    /// descended into.
    pub excluded_dirs: Vec<String>,

    /// Follow symbolic links during traversal.
    /// Link loops are reported as walk errors.
    pub follow_symlinks: bool,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            recursive: false,
            excluded_dirs: DEFAULT_EXCLUDED_DIRS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            follow_symlinks: false,
        }
    }
}

impl WalkerConfig {
    /// Create a new configuration.
    ///
    /// # Arguments
    ///
    /// * `recursive` - Whether to descend into subdirectories
    /// * `excluded_dirs` - Directory names to prune
    /// * `follow_symlinks` - Whether to follow symbolic links
    #[must_use]
    pub fn new(recursive: bool, excluded_dirs: Vec<String>, follow_symlinks: bool) -> Self {
        Self {
            recursive,
            excluded_dirs,
            follow_symlinks,
        }
    }
}

/// Errors that can occur during directory scanning.
///
/// Every variant is fatal for the scan that produced it.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// Following symlinks led back to an ancestor directory.
    #[error("Symlink loop at {path} (points to ancestor {ancestor})")]
    Loop {
        /// Path of the looping link
        path: PathBuf,
        /// Ancestor it resolves to
        ancestor: PathBuf,
    },

    /// An I/O error occurred while accessing a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while fingerprinting a single file.
///
/// These are recovered by the caller: the file is skipped.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    /// Classify an I/O error raised while reading `path`.
    #[must_use]
    pub fn from_io(path: &std::path::Path, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}
