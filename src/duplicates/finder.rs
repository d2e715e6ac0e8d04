//! Scan orchestration: walk a folder, filter, fingerprint and index.
//!
//! # Overview
//!
//! [`DuplicateFinder`] owns the [`DuplicateIndex`] and runs scan phases
//! against it, strictly in order:
//! 1. **Base phase**: every new fingerprint becomes a canonical record;
//!    repeats inside the base folder attach as duplicates.
//! 2. **Search phase**: fingerprints already in the index attach as
//!    duplicates; anything else is ignored.
//!
//! For each file the walker produces:
//! - empty files and files at or above the size limit are counted and skipped;
//! - unreadable files are logged, counted and skipped;
//! - everything else is fingerprinted and offered to the index.
//!
//! A walk failure aborts the phase with [`FinderError::Scan`].
//!
//! # Example
//!
//! ```no_run
//! use basedupe::duplicates::{DuplicateFinder, ScanPhase};
//! use std::path::Path;
//!
//! let mut finder = DuplicateFinder::with_defaults();
//! let base = finder.run_scan(Path::new("/photos"), true, ScanPhase::Base).unwrap();
//! let search = finder.run_scan(Path::new("/downloads"), true, ScanPhase::Search).unwrap();
//!
//! println!("{} unique in base, {} copies found", base.counters.base_unique_count,
//!     search.counters.base_duplicate_count);
//! for (_, record) in finder.index().groups() {
//!     println!("{} has {} copies", record.canonical_path.display(), record.duplicate_paths.len());
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use bytesize::ByteSize;

use crate::progress::ProgressCallback;
use crate::scanner::{
    EntryKind, Fingerprinter, HashAlgorithm, ScanError, WalkEntry, Walker, WalkerConfig,
    DEFAULT_EXCLUDED_DIRS,
};

use super::{DuplicateIndex, Observation, ScanCounters, ScanPhase, ScanSummary};

/// Files at or above this size are skipped (75 MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 75_000_000;

/// Configuration for the duplicate finder.
#[derive(Clone)]
pub struct FinderConfig {
    /// Files at or above this many bytes are not fingerprinted.
    pub max_file_size: u64,
    /// Directory names never descended into (case-insensitive).
    pub excluded_dirs: Vec<String>,
    /// Follow symbolic links during traversal.
    pub follow_symlinks: bool,
    /// Digest used for fingerprints.
    pub hash_algorithm: HashAlgorithm,
    /// Optional progress callback for reporting.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("max_file_size", &self.max_file_size)
            .field("excluded_dirs", &self.excluded_dirs)
            .field("follow_symlinks", &self.follow_symlinks)
            .field("hash_algorithm", &self.hash_algorithm)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            excluded_dirs: DEFAULT_EXCLUDED_DIRS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            follow_symlinks: false,
            hash_algorithm: HashAlgorithm::default(),
            progress_callback: None,
        }
    }
}

impl FinderConfig {
    /// Set the size limit.
    #[must_use]
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// Set the excluded directory names.
    #[must_use]
    pub fn with_excluded_dirs(mut self, names: Vec<String>) -> Self {
        self.excluded_dirs = names;
        self
    }

    /// Follow symbolic links during traversal.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Set the fingerprint digest.
    #[must_use]
    pub fn with_hash_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.hash_algorithm = algorithm;
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Walker settings for one phase.
    fn walker_config(&self, recursive: bool) -> WalkerConfig {
        WalkerConfig::new(recursive, self.excluded_dirs.clone(), self.follow_symlinks)
    }
}

/// Errors that abort a scan phase.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The provided path does not exist.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The provided path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Phases were requested out of order.
    #[error("Cannot run the {requested} scan: {reason}")]
    PhaseOrder {
        /// Phase that was requested
        requested: ScanPhase,
        /// Why it was refused
        reason: &'static str,
    },

    /// The directory walk failed.
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Mutable state threaded through one scan phase.
struct ScanContext<'a> {
    index: &'a mut DuplicateIndex,
    counters: ScanCounters,
    phase: ScanPhase,
}

impl<'a> ScanContext<'a> {
    fn new(index: &'a mut DuplicateIndex, phase: ScanPhase) -> Self {
        Self {
            index,
            counters: ScanCounters::default(),
            phase,
        }
    }

    /// Apply the size filter, fingerprint and index one file.
    ///
    /// Returns `true` if the file was fingerprinted.
    fn process_file(
        &mut self,
        entry: WalkEntry,
        fingerprinter: &Fingerprinter,
        max_file_size: u64,
    ) -> bool {
        if entry.size == 0 {
            self.counters.empty_or_oversized_skipped += 1;
            log::trace!("Skipping empty file: {}", entry.path.display());
            return false;
        }

        if entry.size >= max_file_size {
            self.counters.empty_or_oversized_skipped += 1;
            log::warn!(
                "Skipping large file: {} ({}) {}",
                entry.size,
                ByteSize::b(entry.size),
                entry.path.display()
            );
            return false;
        }

        let fingerprint = match fingerprinter.fingerprint(&entry.path, entry.size) {
            Ok(fp) => fp,
            Err(e) => {
                self.counters.unreadable_skipped += 1;
                log::warn!("Skipping unreadable file: {}", e);
                return false;
            }
        };

        self.counters.files_processed += 1;
        self.counters.bytes_processed += entry.size;

        match self.index.observe(fingerprint, entry.path, self.phase) {
            Observation::Canonical => self.counters.base_unique_count += 1,
            Observation::Duplicate => self.counters.base_duplicate_count += 1,
            Observation::Unmatched => {}
        }
        true
    }
}

/// Runs base and search scans against a shared [`DuplicateIndex`].
#[derive(Debug)]
pub struct DuplicateFinder {
    config: FinderConfig,
    fingerprinter: Fingerprinter,
    index: DuplicateIndex,
    /// Last phase that completed successfully
    completed: Option<ScanPhase>,
}

impl DuplicateFinder {
    /// Create a finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        Self {
            fingerprinter: Fingerprinter::new(config.hash_algorithm),
            config,
            index: DuplicateIndex::new(),
            completed: None,
        }
    }

    /// Create a finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// The index built so far.
    #[must_use]
    pub fn index(&self) -> &DuplicateIndex {
        &self.index
    }

    fn check_phase(&self, requested: ScanPhase) -> Result<(), FinderError> {
        match (requested, self.completed) {
            (ScanPhase::Base, None) | (ScanPhase::Search, Some(ScanPhase::Base)) => Ok(()),
            (ScanPhase::Base, Some(_)) => Err(FinderError::PhaseOrder {
                requested,
                reason: "the base folder was already scanned",
            }),
            (ScanPhase::Search, None) => Err(FinderError::PhaseOrder {
                requested,
                reason: "the base folder has not been scanned yet",
            }),
            (ScanPhase::Search, Some(ScanPhase::Search)) => Err(FinderError::PhaseOrder {
                requested,
                reason: "the search folder was already scanned",
            }),
        }
    }

    /// Run one scan phase over `root`.
    ///
    /// Counters start from zero; the index carries over from earlier phases.
    ///
    /// # Errors
    ///
    /// - [`FinderError::PhaseOrder`] unless phases run base first, then search,
    ///   each once.
    /// - [`FinderError::PathNotFound`] / [`FinderError::NotADirectory`] for a bad root.
    /// - [`FinderError::Scan`] if the directory walk fails.
    pub fn run_scan(
        &mut self,
        root: &Path,
        recursive: bool,
        phase: ScanPhase,
    ) -> Result<ScanSummary, FinderError> {
        self.check_phase(phase)?;

        match std::fs::metadata(root) {
            Ok(m) if m.is_dir() => {}
            Ok(_) => return Err(FinderError::NotADirectory(root.to_path_buf())),
            Err(_) => return Err(FinderError::PathNotFound(root.to_path_buf())),
        }

        log::info!(
            "Scanning {} folder {} (recursive: {})",
            phase,
            root.display(),
            recursive
        );

        let start = Instant::now();
        let walker = Walker::new(root, self.config.walker_config(recursive));
        let progress = self.config.progress_callback.as_deref();
        let phase_name = phase.to_string();

        if let Some(callback) = progress {
            callback.on_phase_start(&phase_name, root);
        }

        let mut ctx = ScanContext::new(&mut self.index, phase);
        let walked = walker.walk().try_for_each(|entry| {
            let entry = entry?;
            match entry.kind {
                EntryKind::Directory => ctx.counters.subfolders_visited += 1,
                EntryKind::File => {
                    if ctx.process_file(entry, &self.fingerprinter, self.config.max_file_size) {
                        if let Some(callback) = progress {
                            callback.on_file_processed(
                                ctx.counters.files_processed,
                                ctx.counters.bytes_processed,
                            );
                        }
                    }
                }
            }
            Ok::<(), ScanError>(())
        });
        let counters = ctx.counters;

        if let Some(callback) = progress {
            callback.on_phase_end(&phase_name);
        }
        walked?;

        self.completed = Some(phase);
        let summary = ScanSummary {
            phase,
            root: root.to_path_buf(),
            recursive,
            counters,
            elapsed: start.elapsed(),
        };

        log::debug!("{} scan finished: {:?}", phase, summary.counters);
        Ok(summary)
    }

    /// Run the base scan and then the search scan.
    ///
    /// # Errors
    ///
    /// Returns the first [`FinderError`] from either phase.
    pub fn find_duplicates(
        &mut self,
        base: &Path,
        base_recursive: bool,
        search: &Path,
        search_recursive: bool,
    ) -> Result<(ScanSummary, ScanSummary), FinderError> {
        let base_summary = self.run_scan(base, base_recursive, ScanPhase::Base)?;
        let search_summary = self.run_scan(search, search_recursive, ScanPhase::Search)?;
        Ok((base_summary, search_summary))
    }
}
