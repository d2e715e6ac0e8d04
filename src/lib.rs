//! basedupe - find copies of a base folder's files inside a search folder.
//!
//! Files are fingerprinted by size and content hash. The base folder is
//! scanned first and the first file seen with each fingerprint becomes the
//! canonical copy; the search folder is scanned second and every file whose
//! fingerprint is already known is recorded as a duplicate. The result is a
//! plain-text log listing each canonical file with its duplicates.

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use bytesize::ByteSize;

use crate::cli::Cli;
use crate::config::Config;
use crate::duplicates::{DuplicateFinder, ScanPhase};
use crate::error::{AppError, ExitCode};
use crate::output::summary::{format_folder_banner, format_summary};
use crate::output::{JsonOutput, ReportWriter};
use crate::progress::{Progress, ProgressMode};
use crate::scanner::path_utils::{clean_path, same_folder};

/// Message printed when base and search name the same folder.
pub const SAME_FOLDER_MESSAGE: &str = "Base/Search folder cannot be the same.";

/// Human-readable console output, silenced by `--quiet` and `--json`.
struct Console {
    enabled: bool,
}

impl Console {
    fn line(&self, text: &str) {
        if self.enabled {
            println!("{text}");
        }
    }

    fn block(&self, text: &str) {
        if self.enabled {
            print!("{text}");
        }
    }
}

/// Check that `path` is an existing directory.
fn check_folder(path: &Path, phase: ScanPhase) -> Result<(), AppError> {
    match std::fs::metadata(path) {
        Ok(m) if m.is_dir() => Ok(()),
        Ok(_) => Err(match phase {
            ScanPhase::Base => AppError::BaseNotAFolder(path.to_path_buf()),
            ScanPhase::Search => AppError::SearchNotAFolder(path.to_path_buf()),
        }),
        Err(e) => {
            log::debug!("Cannot stat {}: {e}", path.display());
            Err(match phase {
                ScanPhase::Base => AppError::BaseFolderMissing(path.to_path_buf()),
                ScanPhase::Search => AppError::SearchFolderMissing(path.to_path_buf()),
            })
        }
    }
}

/// Run a full base/search comparison for parsed command-line arguments.
///
/// # Errors
///
/// Returns an [`AppError`] (wrapped in `anyhow`) for invalid folders,
/// invalid configuration, scan failures, or an unwritable log.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    if cli.no_color || !std::io::stdout().is_terminal() {
        yansi::disable();
    }
    let console = Console {
        enabled: !cli.quiet && !cli.json,
    };

    let base = clean_path(&cli.base);
    let search = clean_path(&cli.search);
    let base_recursive = cli.base_recursive();
    let search_recursive = cli.search_recursive();

    check_folder(&base, ScanPhase::Base)?;
    console.line(&format_folder_banner(ScanPhase::Base, &base, base_recursive));
    check_folder(&search, ScanPhase::Search)?;
    console.line(&format_folder_banner(ScanPhase::Search, &search, search_recursive));

    if same_folder(&base, &search) {
        log::debug!("{} and {} are the same folder", base.display(), search.display());
        if cli.json {
            eprintln!("{SAME_FOLDER_MESSAGE}");
        } else if !cli.quiet {
            println!("{SAME_FOLDER_MESSAGE}");
        }
        return Ok(ExitCode::Success);
    }

    let mut config = Config::load(cli.config.as_deref());
    config.merge_cli(&cli);
    config.validate().map_err(AppError::Config)?;
    if log::log_enabled!(log::Level::Trace) {
        if let Ok(text) = config.to_toml() {
            log::trace!("Effective configuration:\n{text}");
        }
    }
    log::debug!(
        "Skipping files of {} or more; excluded folders: {:?}",
        ByteSize::b(config.max_file_size),
        config.excluded_dirs
    );

    let log_path: PathBuf = match &config.report_path {
        Some(p) => p.clone(),
        None => output::log::default_log_path().map_err(AppError::Report)?,
    };

    let mode = ProgressMode::detect(
        cli.quiet || cli.json,
        cli.no_progress,
        std::io::stdout().is_terminal(),
    );
    let progress = Arc::new(Progress::new(mode, config.progress_interval));
    let finder_config = config.finder_config().with_progress_callback(progress);
    let mut finder = DuplicateFinder::new(finder_config);

    console.line("");
    let base_summary = finder
        .run_scan(&base, base_recursive, ScanPhase::Base)
        .map_err(AppError::Scan)?;
    console.block(&format_summary(&base_summary, config.percentage_mode));
    console.line("");

    let search_summary = finder
        .run_scan(&search, search_recursive, ScanPhase::Search)
        .map_err(AppError::Scan)?;
    console.block(&format_summary(&search_summary, config.percentage_mode));
    console.line("");

    let index = finder.index();
    ReportWriter::new(index)
        .write_file(&log_path)
        .map_err(AppError::Report)?;
    log::info!(
        "{} duplicate(s) found, {} reclaimable",
        index.duplicate_count(),
        ByteSize::b(index.wasted_bytes())
    );

    if cli.json {
        JsonOutput::new(index, &base_summary, &search_summary)
            .write_to(std::io::stdout().lock())
            .map_err(AppError::Json)?;
    }

    console.line(&format!("Finished. See {} for results.", log_path.display()));
    Ok(ExitCode::Success)
}
