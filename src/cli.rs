//! Command-line interface definitions for basedupe.
//!
//! Four positionals drive a run: the base folder, the search folder, and one
//! recursion token for each. Recursion is enabled only by the exact tokens
//! `/BR` (base) and `/SR` (search); anything else means "this folder only".
//!
//! # Example
//!
//! ```bash
//! # Base folder recursive, search folder top level only
//! basedupe "C:\Images" "C:\Temp" /BR /SN
//!
//! # Both recursive, machine-readable report on stdout
//! basedupe ~/photos ~/downloads /BR /SR --json
//!
//! # Also skip node_modules, lower the size ceiling
//! basedupe ~/src ~/backup /BR /SR --exclude node_modules --max-size 10MB
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::scanner::HashAlgorithm;

/// Token enabling recursion into the base folder.
pub const BASE_RECURSIVE_TOKEN: &str = "/BR";
/// Token enabling recursion into the search folder.
pub const SEARCH_RECURSIVE_TOKEN: &str = "/SR";

/// Usage lines printed after an argument error.
pub const USAGE_HINT: &str = "\
Usage: basedupe \"base-folder\" \"search-folder\" /B[R/N] /S[R/N]
  /B=base folder; /S=search folder; R=recursive; N=not recursive
  example:  basedupe \"c:\\Images\" \"c:\\Temp\" /BR /SN";

/// Find files in a search folder that duplicate files in a base folder.
///
/// Files are compared by size and SHA-256 content hash. The first copy seen
/// in the base folder is kept as the original; every later copy, in the base
/// or the search folder, is written to the duplicate log.
#[derive(Debug, Parser)]
#[command(name = "basedupe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base folder whose files are treated as the originals
    #[arg(value_name = "BASE")]
    pub base: PathBuf,

    /// Folder searched for copies of base files
    #[arg(value_name = "SEARCH")]
    pub search: PathBuf,

    /// `/BR` to recurse into the base folder, anything else (e.g. `/BN`) not to
    #[arg(value_name = "BASE_RECURSE", allow_hyphen_values = true)]
    pub base_recurse: String,

    /// `/SR` to recurse into the search folder, anything else (e.g. `/SN`) not to
    #[arg(value_name = "SEARCH_RECURSE", allow_hyphen_values = true)]
    pub search_recurse: String,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output (any non-empty `NO_COLOR` value counts)
    #[arg(long, env = "NO_COLOR", value_parser = clap::builder::FalseyValueParser::new())]
    pub no_color: bool,

    /// Do not print progress while scanning
    #[arg(long)]
    pub no_progress: bool,

    /// Configuration file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the duplicate log here instead of next to the executable
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Print the results as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Print fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,

    /// Skip files of this size or larger (e.g., 75MB, 1GiB)
    ///
    /// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB
    #[arg(long, value_name = "SIZE", value_parser = parse_size)]
    pub max_size: Option<u64>,

    /// Directory name to skip when recursing (can be specified multiple times)
    ///
    /// Added to the configured list, which contains `.git` by default.
    /// Matching is case-insensitive.
    #[arg(long = "exclude", value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Content hash to fingerprint files with
    #[arg(long = "hash", value_enum, value_name = "ALGORITHM")]
    pub hash_algorithm: Option<HashAlgorithm>,

    /// Report duplicates as a share of processed files
    #[arg(long)]
    pub fixed_percentage: bool,
}

impl Cli {
    /// Whether the base folder is scanned recursively.
    #[must_use]
    pub fn base_recursive(&self) -> bool {
        self.base_recurse == BASE_RECURSIVE_TOKEN
    }

    /// Whether the search folder is scanned recursively.
    #[must_use]
    pub fn search_recursive(&self) -> bool {
        self.search_recurse == SEARCH_RECURSIVE_TOKEN
    }
}

/// Parse a human-readable size string into bytes.
///
/// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB
/// Case-insensitive. Numbers without suffix are treated as bytes.
///
/// # Examples
///
/// ```
/// use basedupe::cli::parse_size;
///
/// assert_eq!(parse_size("75000000").unwrap(), 75_000_000);
/// assert_eq!(parse_size("75MB").unwrap(), 75_000_000);
/// assert_eq!(parse_size("1KiB").unwrap(), 1024);
/// ```
///
/// # Errors
///
/// Returns an error if the string is empty, contains an invalid number,
/// or an unknown size suffix.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Size cannot be empty".to_string());
    }
    if s.starts_with('-') {
        return Err("Size cannot be negative".to_string());
    }

    let (num_str, suffix) = match s.find(|c: char| !c.is_ascii_digit() && c != '.') {
        Some(idx) => (&s[..idx], s[idx..].trim().to_uppercase()),
        None => (s, String::new()),
    };

    let num: f64 = num_str
        .parse()
        .map_err(|_| format!("Invalid number: '{num_str}'"))?;

    let multiplier: u64 = match suffix.as_str() {
        "" | "B" => 1,
        "KB" | "K" => 1_000,
        "KIB" => 1_024,
        "MB" | "M" => 1_000_000,
        "MIB" => 1_048_576,
        "GB" | "G" => 1_000_000_000,
        "GIB" => 1_073_741_824,
        "TB" | "T" => 1_000_000_000_000,
        "TIB" => 1_099_511_627_776,
        _ => return Err(format!("Unknown size suffix: '{suffix}'")),
    };

    Ok((num * multiplier as f64) as u64)
}
