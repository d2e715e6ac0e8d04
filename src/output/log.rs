//! Plain-text duplicate log.
//!
//! The log lists every canonical file that has duplicates, followed by the
//! duplicates in the order they were found, one block per file:
//!
//! ```text
//! Base File:    "/base/a.txt"
//!   - Duplicate:"/search/b.txt"
//!   - Duplicate:"/search/old/a.txt"
//!
//! ```
//!
//! By default the log sits next to the running executable and shares its
//! name with a `.log` extension (`basedupe.exe` → `basedupe.log`).

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::duplicates::DuplicateIndex;

/// Errors that can occur while writing the log.
#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    /// The running executable's path could not be determined.
    #[error("Cannot determine the executable path: {0}")]
    ExecutablePath(#[source] io::Error),

    /// An existing log could not be removed.
    #[error("Cannot remove old log {path}: {source}")]
    Remove {
        /// Log path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The log could not be created or written.
    #[error("Cannot write log {path}: {source}")]
    Write {
        /// Log path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Wrap a path in double quotes, first trimming surrounding spaces and quotes.
///
/// # Example
///
/// ```
/// use basedupe::output::log::quote_path;
///
/// assert_eq!(quote_path("a b.txt"), "\"a b.txt\"");
/// assert_eq!(quote_path(" \"a.txt\" "), "\"a.txt\"");
/// ```
#[must_use]
pub fn quote_path(path: &str) -> String {
    format!("\"{}\"", path.trim_matches(|c| c == ' ' || c == '"'))
}

/// Log path derived from an executable path: same folder, lowercased
/// file stem, `.log` extension.
#[must_use]
pub fn log_path_for(executable: &Path) -> PathBuf {
    let stem = executable
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
    executable.with_file_name(format!("{stem}.log"))
}

/// Log path for the running executable.
///
/// # Errors
///
/// Returns [`ReportError::ExecutablePath`] if the executable path is unknown.
pub fn default_log_path() -> Result<PathBuf, ReportError> {
    let exe = std::env::current_exe().map_err(ReportError::ExecutablePath)?;
    Ok(log_path_for(&exe))
}

/// Renders a [`DuplicateIndex`] as the duplicate log.
#[derive(Debug)]
pub struct ReportWriter<'a> {
    index: &'a DuplicateIndex,
}

impl<'a> ReportWriter<'a> {
    /// Create a writer over an index.
    #[must_use]
    pub fn new(index: &'a DuplicateIndex) -> Self {
        Self { index }
    }

    /// Number of blocks the log will contain.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.index.groups().count()
    }

    /// Write the log to any writer.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the writer.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for (_, record) in self.index.groups() {
            writeln!(
                writer,
                "Base File:    {}",
                quote_path(&record.canonical_path.to_string_lossy())
            )?;
            for dup in &record.duplicate_paths {
                writeln!(writer, "  - Duplicate:{}", quote_path(&dup.to_string_lossy()))?;
            }
            writeln!(writer)?;
        }
        writer.flush()
    }

    /// Render the log to a string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut buf = Vec::new();
        // Writing to a Vec cannot fail
        let _ = self.write_to(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Write the log to `path`, removing any previous file first.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if the old file cannot be removed or the new
    /// one cannot be written.
    pub fn write_file(&self, path: &Path) -> Result<(), ReportError> {
        match fs::remove_file(path) {
            Ok(()) => log::debug!("Removed previous log {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(ReportError::Remove {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }

        let write_err = |source| ReportError::Write {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(write_err)?;
        self.write_to(BufWriter::new(file)).map_err(write_err)?;

        log::info!(
            "Wrote {} duplicate group(s) to {}",
            self.block_count(),
            path.display()
        );
        Ok(())
    }
}
