//! JSON output formatter for scan results.
//!
//! Provides machine-readable output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "generated_at": "2026-01-01T12:00:00Z",
//!   "base": { "phase": "base", "root": "/photos", "recursive": true, "counters": { ... }, "elapsed": 1.25 },
//!   "search": { "phase": "search", ... },
//!   "groups": [
//!     {
//!       "fingerprint": "000000000002<sha256>",
//!       "size": 2,
//!       "canonical": "/photos/a.txt",
//!       "duplicates": ["/downloads/b.txt"]
//!     }
//!   ]
//! }
//! ```

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::duplicates::{CanonicalRecord, DuplicateIndex, ScanSummary};
use crate::scanner::Fingerprint;

/// One canonical file and its duplicates in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonGroup {
    /// Textual fingerprint key
    pub fingerprint: String,
    /// File size in bytes
    pub size: u64,
    /// Canonical (base) file
    pub canonical: String,
    /// Duplicates in discovery order
    pub duplicates: Vec<String>,
}

impl JsonGroup {
    /// Create a JSON group from an index entry.
    #[must_use]
    pub fn from_record(fingerprint: &Fingerprint, record: &CanonicalRecord) -> Self {
        Self {
            fingerprint: fingerprint.key(),
            size: fingerprint.size,
            canonical: record.canonical_path.to_string_lossy().into_owned(),
            duplicates: record
                .duplicate_paths
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
        }
    }
}

/// Full JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput<'a> {
    /// When the report was produced
    pub generated_at: DateTime<Utc>,
    /// Base phase summary
    pub base: &'a ScanSummary,
    /// Search phase summary
    pub search: &'a ScanSummary,
    /// Groups with at least one duplicate
    pub groups: Vec<JsonGroup>,
}

impl<'a> JsonOutput<'a> {
    /// Build a report from both phase summaries and the index.
    #[must_use]
    pub fn new(index: &DuplicateIndex, base: &'a ScanSummary, search: &'a ScanSummary) -> Self {
        Self {
            generated_at: Utc::now(),
            base,
            search,
            groups: index
                .groups()
                .map(|(fp, record)| JsonGroup::from_record(fp, record))
                .collect(),
        }
    }

    /// Serialize to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write pretty-printed JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, mut writer: W) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer).map_err(serde_json::Error::io)
    }
}
