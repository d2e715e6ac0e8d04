//! Application configuration management.
//!
//! Settings are layered, later sources winning:
//!
//! 1. Built-in defaults
//! 2. `config.toml` in the platform config directory, or the file given
//!    with `--config`
//! 3. `BASEDUPE_*` environment variables (e.g. `BASEDUPE_MAX_FILE_SIZE`)
//! 4. Command-line flags, applied with [`Config::merge_cli`]
//!
//! ```toml
//! max_file_size = 75000000
//! excluded_dirs = [".git", "node_modules"]
//! hash_algorithm = "sha256"
//! percentage_mode = "corrected"
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::duplicates::{FinderConfig, PercentageMode, DEFAULT_MAX_FILE_SIZE};
use crate::scanner::{HashAlgorithm, DEFAULT_EXCLUDED_DIRS};

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "BASEDUPE_";

/// Files between two progress dots when stdout is not a terminal.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 25;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Files of this size or larger are skipped.
    pub max_file_size: u64,
    /// Directory names (case-insensitive) never descended into.
    pub excluded_dirs: Vec<String>,
    /// Content hash used for fingerprints.
    pub hash_algorithm: HashAlgorithm,
    /// Follow symbolic links while walking.
    pub follow_symlinks: bool,
    /// How the search-phase duplicate percentage is computed.
    pub percentage_mode: PercentageMode,
    /// Files between progress dots in plain progress mode.
    pub progress_interval: u64,
    /// Where to write the duplicate log; next to the executable when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| (*s).to_string()).collect(),
            hash_algorithm: HashAlgorithm::default(),
            follow_symlinks: false,
            percentage_mode: PercentageMode::default(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            report_path: None,
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing or malformed file is not fatal: defaults are used and the
    /// reason is logged at debug level.
    #[must_use]
    pub fn load(path: Option<&Path>) -> Self {
        match path {
            Some(p) => Self::load_from_path(p),
            None => match Self::default_path() {
                Some(p) => Self::load_from_path(&p),
                None => {
                    log::debug!("No config directory available, using defaults");
                    Self::from_figment(Self::figment(None))
                }
            },
        }
    }

    /// Load from a specific TOML file, with environment overrides.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        log::debug!("Loading configuration from {}", path.display());
        Self::from_figment(Self::figment(Some(path)))
    }

    /// Layered provider chain: defaults, optional TOML file, environment.
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(p) = path {
            figment = figment.merge(Toml::file(p));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    fn from_figment(figment: Figment) -> Self {
        match figment.extract() {
            Ok(config) => config,
            Err(e) => {
                log::debug!("Failed to load config, using defaults: {e}");
                Self::default()
            }
        }
    }

    /// `config.toml` in the platform configuration directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "basedupe", "basedupe")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Apply command-line flags on top of the loaded settings.
    pub fn merge_cli(&mut self, cli: &Cli) {
        if let Some(max) = cli.max_size {
            self.max_file_size = max;
        }
        for name in &cli.exclude {
            if !self
                .excluded_dirs
                .iter()
                .any(|existing| existing.eq_ignore_ascii_case(name))
            {
                self.excluded_dirs.push(name.clone());
            }
        }
        if let Some(algorithm) = cli.hash_algorithm {
            self.hash_algorithm = algorithm;
        }
        if cli.fixed_percentage {
            self.percentage_mode = PercentageMode::Corrected;
        }
        if let Some(report) = &cli.report {
            self.report_path = Some(report.clone());
        }
    }

    /// Reject settings that would make a scan meaningless.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_file_size == 0 {
            return Err("max_file_size must be greater than zero".to_string());
        }
        if self.progress_interval == 0 {
            return Err("progress_interval must be greater than zero".to_string());
        }
        if self.excluded_dirs.iter().any(|d| d.trim().is_empty()) {
            return Err("excluded_dirs cannot contain empty names".to_string());
        }
        Ok(())
    }

    /// Finder settings derived from this configuration.
    #[must_use]
    pub fn finder_config(&self) -> FinderConfig {
        FinderConfig::default()
            .with_max_file_size(self.max_file_size)
            .with_excluded_dirs(self.excluded_dirs.clone())
            .with_follow_symlinks(self.follow_symlinks)
            .with_hash_algorithm(self.hash_algorithm)
    }

    /// Render as TOML, in the same shape the loader accepts.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
