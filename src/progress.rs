//! Progress reporting for scan phases.
//!
//! This module provides the [`Progress`] struct which implements
//! [`ProgressCallback`] to show scan progress on the console.
//!
//! # Display modes
//!
//! - **Spinner**: an indicatif spinner with the running file count and
//!   cumulative gigabytes, used when stdout is a terminal.
//! - **Plain**: a `.` every N files and a `Processed: X.XXGb` line every ten
//!   dots, used when output is redirected.
//! - **Hidden**: nothing at all (`--quiet` or `--no-progress`).

use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Dots printed between two cumulative-size lines in plain mode.
const DOTS_PER_LINE: u64 = 10;

/// Progress callback for scan phases.
///
/// Implement this trait to receive progress updates while a folder is
/// being scanned.
pub trait ProgressCallback: Send + Sync {
    /// Called when a scan phase starts.
    ///
    /// # Arguments
    ///
    /// * `phase` - Name of the phase ("base" or "search")
    /// * `root` - Folder being scanned
    fn on_phase_start(&self, phase: &str, root: &Path);

    /// Called after each fingerprinted file.
    ///
    /// # Arguments
    ///
    /// * `files` - Files fingerprinted so far in this phase
    /// * `bytes` - Bytes fingerprinted so far in this phase
    fn on_file_processed(&self, files: u64, bytes: u64);

    /// Called when a scan phase completes.
    fn on_phase_end(&self, phase: &str);
}

/// How progress is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    /// Animated spinner for interactive terminals
    Spinner,
    /// Dots and periodic size lines for logs and pipes
    Plain,
    /// No progress output
    Hidden,
}

impl ProgressMode {
    /// Pick a mode from the output flags and whether stdout is a terminal.
    #[must_use]
    pub fn detect(quiet: bool, no_progress: bool, is_terminal: bool) -> Self {
        if quiet || no_progress {
            Self::Hidden
        } else if is_terminal {
            Self::Spinner
        } else {
            Self::Plain
        }
    }
}

/// Dot/line bookkeeping for plain mode.
#[derive(Debug, Default)]
struct PlainTicker {
    /// Files per dot
    interval: u64,
    /// Files seen since the last dot
    since_dot: u64,
    /// Dots printed since the last size line
    dots: u64,
    /// Whether the current console line has dots on it
    dirty: bool,
}

impl PlainTicker {
    fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
            ..Default::default()
        }
    }

    /// Advance by one file and return the text to print, if any.
    fn tick(&mut self, bytes: u64) -> Option<String> {
        self.since_dot += 1;
        if self.since_dot < self.interval {
            return None;
        }
        self.since_dot = 0;
        self.dots += 1;

        if self.dots >= DOTS_PER_LINE {
            self.dots = 0;
            self.dirty = false;
            Some(format!(".Processed: {:.2}Gb\n", gigabytes(bytes)))
        } else {
            self.dirty = true;
            Some(".".to_string())
        }
    }

    /// Reset for a new phase; returns a newline if a line is still open.
    fn finish(&mut self) -> Option<String> {
        let open = self.dirty;
        *self = Self::new(self.interval);
        open.then(|| "\n".to_string())
    }
}

/// Convert bytes to binary gigabytes.
fn gigabytes(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0 * 1024.0)
}

/// Console progress reporter.
pub struct Progress {
    mode: ProgressMode,
    spinner: Mutex<Option<ProgressBar>>,
    plain: Mutex<PlainTicker>,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// # Arguments
    ///
    /// * `mode` - How to render progress
    /// * `interval` - Files per dot in plain mode
    ///
    /// # Examples
    ///
    /// ```
    /// use basedupe::progress::{Progress, ProgressMode};
    ///
    /// let progress = Progress::new(ProgressMode::Plain, 25);
    /// assert_eq!(progress.mode(), ProgressMode::Plain);
    /// ```
    #[must_use]
    pub fn new(mode: ProgressMode, interval: u64) -> Self {
        Self {
            mode,
            spinner: Mutex::new(None),
            plain: Mutex::new(PlainTicker::new(interval)),
        }
    }

    /// The active display mode.
    #[must_use]
    pub fn mode(&self) -> ProgressMode {
        self.mode
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "{spinner:.green} {prefix} [{elapsed_precise}] {pos} files, {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
    }

    fn print_plain(text: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }
}

impl ProgressCallback for Progress {
    fn on_phase_start(&self, phase: &str, root: &Path) {
        if self.mode != ProgressMode::Spinner {
            return;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(format!("Scanning {phase} folder {}", root.display()));
        pb.set_message("0.00 GB");
        pb.enable_steady_tick(Duration::from_millis(100));
        if let Ok(mut spinner) = self.spinner.lock() {
            *spinner = Some(pb);
        }
    }

    fn on_file_processed(&self, files: u64, bytes: u64) {
        match self.mode {
            ProgressMode::Hidden => {}
            ProgressMode::Spinner => {
                if let Ok(spinner) = self.spinner.lock() {
                    if let Some(ref pb) = *spinner {
                        pb.set_position(files);
                        pb.set_message(format!("{:.2} GB", gigabytes(bytes)));
                    }
                }
            }
            ProgressMode::Plain => {
                let text = self.plain.lock().ok().and_then(|mut t| t.tick(bytes));
                if let Some(text) = text {
                    Self::print_plain(&text);
                }
            }
        }
    }

    fn on_phase_end(&self, _phase: &str) {
        match self.mode {
            ProgressMode::Hidden => {}
            ProgressMode::Spinner => {
                if let Some(pb) = self.spinner.lock().ok().and_then(|mut s| s.take()) {
                    pb.finish_and_clear();
                }
            }
            ProgressMode::Plain => {
                let text = self.plain.lock().ok().and_then(|mut t| t.finish());
                if let Some(text) = text {
                    Self::print_plain(&text);
                }
            }
        }
    }
}
