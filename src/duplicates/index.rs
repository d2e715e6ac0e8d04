//! Fingerprint index of canonical files and their duplicates.
//!
//! # Overview
//!
//! The [`DuplicateIndex`] maps each [`Fingerprint`] to a [`CanonicalRecord`]:
//! the first path seen with that fingerprint plus every later path with the
//! same fingerprint, in the order they were seen.
//!
//! Only the base scan creates records. Both scans attach duplicates to
//! existing records. A duplicate found inside the base folder and one found
//! in the search folder are recorded the same way.
//!
//! Records are kept in insertion order, so reports list canonical files in
//! the order the base scan visited them.
//!
//! # Example
//!
//! ```
//! use basedupe::duplicates::{DuplicateIndex, Observation, ScanPhase};
//! use basedupe::scanner::Fingerprint;
//! use std::path::PathBuf;
//!
//! let mut index = DuplicateIndex::new();
//! let fp = Fingerprint::new(2, "8f43");
//!
//! let first = index.observe(fp.clone(), PathBuf::from("base/a.txt"), ScanPhase::Base);
//! let second = index.observe(fp, PathBuf::from("search/b.txt"), ScanPhase::Search);
//!
//! assert_eq!(first, Observation::Canonical);
//! assert_eq!(second, Observation::Duplicate);
//! assert_eq!(index.groups().count(), 1);
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::scanner::Fingerprint;

use super::ScanPhase;

/// A canonical file and the duplicates found for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalRecord {
    /// First path seen with this fingerprint during the base scan
    pub canonical_path: PathBuf,
    /// Later paths with the same fingerprint, in discovery order
    pub duplicate_paths: Vec<PathBuf>,
}

impl CanonicalRecord {
    /// Create a record with no duplicates yet.
    #[must_use]
    pub fn new(canonical_path: PathBuf) -> Self {
        Self {
            canonical_path,
            duplicate_paths: Vec::new(),
        }
    }

    /// Whether any duplicates were attached.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        !self.duplicate_paths.is_empty()
    }
}

/// What happened when a fingerprint was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// New fingerprint in the base scan; a record was created.
    Canonical,
    /// Known fingerprint; the path was attached as a duplicate.
    Duplicate,
    /// Unknown fingerprint in the search scan; nothing recorded.
    Unmatched,
}

/// Mapping from fingerprint to canonical record, in insertion order.
#[derive(Debug, Default)]
pub struct DuplicateIndex {
    /// Fingerprint to position in `records`
    positions: HashMap<Fingerprint, usize>,
    /// Records in insertion order
    records: Vec<(Fingerprint, CanonicalRecord)>,
}

impl DuplicateIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `path` has fingerprint `fingerprint`.
    ///
    /// - Known fingerprint: `path` is appended to the record's duplicates.
    /// - Unknown, base phase: a new record is created with `path` canonical.
    /// - Unknown, search phase: nothing is recorded.
    pub fn observe(
        &mut self,
        fingerprint: Fingerprint,
        path: PathBuf,
        phase: ScanPhase,
    ) -> Observation {
        if let Some(&pos) = self.positions.get(&fingerprint) {
            let record = &mut self.records[pos].1;
            log::debug!(
                "Duplicate of {}: {}",
                record.canonical_path.display(),
                path.display()
            );
            record.duplicate_paths.push(path);
            return Observation::Duplicate;
        }

        match phase {
            ScanPhase::Base => {
                self.positions.insert(fingerprint.clone(), self.records.len());
                self.records.push((fingerprint, CanonicalRecord::new(path)));
                Observation::Canonical
            }
            ScanPhase::Search => Observation::Unmatched,
        }
    }

    /// Look up the record for a fingerprint.
    #[must_use]
    pub fn get(&self, fingerprint: &Fingerprint) -> Option<&CanonicalRecord> {
        self.positions
            .get(fingerprint)
            .map(|&pos| &self.records[pos].1)
    }

    /// Check whether a fingerprint is known.
    #[must_use]
    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.positions.contains_key(fingerprint)
    }

    /// Find the record whose canonical file is `path`.
    #[must_use]
    pub fn find_canonical(&self, path: &Path) -> Option<&CanonicalRecord> {
        self.records
            .iter()
            .map(|(_, record)| record)
            .find(|record| record.canonical_path == path)
    }

    /// All records in insertion order, with or without duplicates.
    pub fn records(&self) -> impl Iterator<Item = (&Fingerprint, &CanonicalRecord)> {
        self.records.iter().map(|(fp, record)| (fp, record))
    }

    /// Records that have at least one duplicate, in insertion order.
    pub fn groups(&self) -> impl Iterator<Item = (&Fingerprint, &CanonicalRecord)> {
        self.records().filter(|(_, record)| record.has_duplicates())
    }

    /// Number of records (distinct canonical fingerprints).
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total number of duplicate paths across all records.
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.records
            .iter()
            .map(|(_, record)| record.duplicate_paths.len())
            .sum()
    }

    /// Bytes occupied by all duplicate copies.
    #[must_use]
    pub fn wasted_bytes(&self) -> u64 {
        self.records
            .iter()
            .map(|(fp, record)| fp.size * record.duplicate_paths.len() as u64)
            .sum()
    }
}
