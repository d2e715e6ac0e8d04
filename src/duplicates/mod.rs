//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - The fingerprint index of canonical files and their duplicates ([`index`])
//! - Running one scan phase over a folder ([`finder`])
//! - Per-phase counters and summaries

pub mod finder;
pub mod index;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use finder::{DuplicateFinder, FinderConfig, FinderError, DEFAULT_MAX_FILE_SIZE};
pub use index::{CanonicalRecord, DuplicateIndex, Observation};

/// Bytes per binary gigabyte.
const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Which folder a scan covers.
///
/// The base phase creates canonical records; the search phase only
/// attaches duplicates to records that already exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanPhase {
    /// Base (canonical) folder
    Base,
    /// Search folder
    Search,
}

impl fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanPhase::Base => write!(f, "base"),
            ScanPhase::Search => write!(f, "search"),
        }
    }
}

/// How the search-phase duplicate percentage is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PercentageMode {
    /// Files processed divided by duplicates, as earlier releases printed it
    #[default]
    Legacy,
    /// Duplicates divided by files processed
    Corrected,
}

/// Counters accumulated during one scan phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanCounters {
    /// Files fingerprinted
    pub files_processed: u64,
    /// Bytes fingerprinted
    pub bytes_processed: u64,
    /// Files skipped for being empty or too large
    pub empty_or_oversized_skipped: u64,
    /// Files skipped because they could not be read
    pub unreadable_skipped: u64,
    /// Subdirectories descended into
    pub subfolders_visited: u64,
    /// New canonical records created
    pub base_unique_count: u64,
    /// Paths attached as duplicates
    pub base_duplicate_count: u64,
}

impl ScanCounters {
    /// Bytes processed, in binary gigabytes.
    #[must_use]
    pub fn gigabytes_processed(&self) -> f64 {
        self.bytes_processed as f64 / BYTES_PER_GB
    }
}

/// Result of one scan phase.
#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    /// Which phase this was
    pub phase: ScanPhase,
    /// Folder that was scanned
    pub root: PathBuf,
    /// Whether subdirectories were scanned
    pub recursive: bool,
    /// Final counters
    pub counters: ScanCounters,
    /// Wall-clock duration of the phase
    #[serde(serialize_with = "serialize_duration")]
    pub elapsed: Duration,
}

impl ScanSummary {
    /// Throughput in gigabytes per second (0 when no time elapsed).
    #[must_use]
    pub fn throughput_gb_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.counters.gigabytes_processed() / secs
        } else {
            0.0
        }
    }

    /// Duplicate percentage for the phase.
    ///
    /// In [`PercentageMode::Legacy`] this is files processed over duplicates
    /// (0 without duplicates); in [`PercentageMode::Corrected`] it is
    /// duplicates over files processed (0 without processed files).
    #[must_use]
    pub fn duplicate_percentage(&self, mode: PercentageMode) -> f64 {
        let processed = self.counters.files_processed as f64;
        let duplicates = self.counters.base_duplicate_count as f64;
        match mode {
            PercentageMode::Legacy if duplicates > 0.0 => processed / duplicates * 100.0,
            PercentageMode::Corrected if processed > 0.0 => duplicates / processed * 100.0,
            _ => 0.0,
        }
    }
}

fn serialize_duration<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(duration.as_secs_f64())
}
