//! Path cleaning and comparison helpers.
//!
//! Folder arguments arrive in whatever shape the user typed them:
//! trailing separators, `.` components, doubled slashes. Before the base and
//! search folders are compared or scanned they are cleaned into a canonical
//! lexical form. Comparison is case-insensitive and Unicode-normalized (NFC),
//! so `Photos/` and `photos` name the same folder, as do the NFC and NFD
//! spellings of `café`.
//!
//! # Example
//!
//! ```
//! use basedupe::scanner::path_utils::{clean_path, same_folder};
//! use std::path::{Path, PathBuf};
//!
//! assert_eq!(clean_path(Path::new("data//pics/./")), PathBuf::from("data/pics"));
//! assert!(same_folder(Path::new("Data/Pics"), Path::new("data/pics/")));
//! ```

use std::path::{Component, Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Lexically clean a path.
///
/// Removes `.` components, redundant separators and trailing separators.
/// `..` components are kept as-is; no filesystem access is performed, so
/// symlinks are not resolved.
///
/// An empty result (for example from `"."`) becomes `"."`.
#[must_use]
pub fn clean_path(path: &Path) -> PathBuf {
    let cleaned: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}

/// Comparison key for a folder: cleaned, NFC-normalized and lowercased.
///
/// Non-UTF-8 paths fall back to their lossy conversion.
#[must_use]
pub fn folder_key(path: &Path) -> String {
    clean_path(path)
        .to_string_lossy()
        .nfc()
        .collect::<String>()
        .to_lowercase()
}

/// Check whether two folder paths name the same folder, ignoring case.
#[must_use]
pub fn same_folder(a: &Path, b: &Path) -> bool {
    folder_key(a) == folder_key(b)
}

/// Check whether a directory name matches any excluded name, ignoring case.
#[must_use]
pub fn is_excluded_name(name: &str, excluded: &[String]) -> bool {
    let name = name.to_lowercase();
    excluded.iter().any(|ex| ex.to_lowercase() == name)
}
