//! Directory walker implementation using walkdir for sequential traversal.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory
//! tree in pre-order and producing every regular file and every descended
//! subdirectory. Scanning is strictly single-threaded; walkdir gives us a
//! sorted, depth-first stream with subtree pruning.
//!
//! # Traversal policy
//!
//! - The root is always walked and never produced itself.
//! - With `recursive` off, no subdirectory is entered or produced.
//! - A subdirectory whose name matches an excluded name (case-insensitive,
//!   `.git` by default) is neither entered nor produced.
//! - Regular files are produced with their size; size filtering is the
//!   caller's job.
//! - Symlinks are skipped unless `follow_symlinks` is set.
//! - Any read failure is produced as a [`ScanError`]. Callers treat it as
//!   fatal.
//!
//! # Example
//!
//! ```no_run
//! use basedupe::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Pictures"), WalkerConfig::default());
//! for entry in walker.walk() {
//!     let entry = entry.expect("walk failed");
//!     println!("{:?} {}", entry.kind, entry.path.display());
//! }
//! ```

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::path_utils::is_excluded_name;
use super::{ScanError, WalkEntry, WalkerConfig};

/// Directory walker for sequential file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// # Arguments
    ///
    /// * `path` - Root directory to scan
    /// * `config` - Walker configuration options
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// Decide whether an entry passes the pruning policy.
    ///
    /// Returning `false` for a directory skips its whole subtree.
    fn should_enter(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }

        if !self.config.recursive {
            log::trace!(
                "Skipping folder (recursion off): {}",
                entry.path().display()
            );
            return false;
        }

        let name = entry.file_name().to_string_lossy();
        if is_excluded_name(&name, &self.config.excluded_dirs) {
            log::debug!("Skipping excluded folder: {}", entry.path().display());
            return false;
        }

        true
    }

    /// Walk the directory tree in pre-order.
    ///
    /// Returns an iterator over [`WalkEntry`] results. Children of each
    /// directory are visited sorted by file name.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use basedupe::scanner::{EntryKind, Walker, WalkerConfig};
    /// use std::path::Path;
    ///
    /// let walker = Walker::new(Path::new("."), WalkerConfig::default());
    /// let files: Vec<_> = walker
    ///     .walk()
    ///     .filter_map(Result::ok)
    ///     .filter(|e| e.kind == EntryKind::File)
    ///     .collect();
    /// println!("Found {} files", files.len());
    /// ```
    pub fn walk(&self) -> impl Iterator<Item = Result<WalkEntry, ScanError>> + '_ {
        WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| self.should_enter(entry))
            .filter_map(move |result| match result {
                Ok(entry) => self.process_entry(&entry),
                Err(e) => Some(Err(self.convert_error(e))),
            })
    }

    /// Turn a walkdir entry into a [`WalkEntry`], or drop it.
    fn process_entry(&self, entry: &DirEntry) -> Option<Result<WalkEntry, ScanError>> {
        if entry.depth() == 0 {
            return None;
        }

        let file_type = entry.file_type();
        let path = entry.path().to_path_buf();

        if file_type.is_dir() {
            return Some(Ok(WalkEntry::directory(path)));
        }

        if !file_type.is_file() {
            log::trace!("Skipping non-regular entry: {}", path.display());
            return None;
        }

        match entry.metadata() {
            Ok(metadata) => Some(Ok(WalkEntry::file(path, metadata.len()))),
            Err(e) => Some(Err(self.convert_error(e))),
        }
    }

    /// Convert a walkdir error into a [`ScanError`].
    fn convert_error(&self, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);

        if let Some(ancestor) = error.loop_ancestor() {
            return ScanError::Loop {
                path,
                ancestor: ancestor.to_path_buf(),
            };
        }

        log::error!("Walker error for {}: {}", path.display(), error);

        match error.io_error().map(std::io::Error::kind) {
            Some(std::io::ErrorKind::PermissionDenied) => ScanError::PermissionDenied(path),
            Some(std::io::ErrorKind::NotFound) => ScanError::NotFound(path),
            _ => ScanError::Io {
                path,
                source: std::io::Error::other(error.to_string()),
            },
        }
    }
}
